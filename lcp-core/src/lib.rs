//! LCP Core Library
//!
//! Locally consistent parsing of DNA: alphabet encoding, core
//! identification, DCT deepening, segmented construction and the binary
//! record format.

pub mod types;
pub mod error;
pub mod alphabet;
pub mod hash;
pub mod cores;
pub mod parser;
pub mod dct;
pub mod lps;
pub mod segment;
pub mod store;

// Re-export commonly used types and functions
pub use types::{Label, Level, ParseOptions, Position, Strand};
pub use error::{LcpError, LcpResult};
pub use alphabet::Alphabet;
pub use cores::Core;
pub use lps::{Lps, ReverseMap};
pub use segment::{min_overlap, SegmentConfig};

/// Version information for the LCP core library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
