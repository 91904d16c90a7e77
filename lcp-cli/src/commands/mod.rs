//! Command implementations for the lcptools CLI

pub mod parse;
pub mod inspect;
