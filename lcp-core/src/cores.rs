//! Core record
//!
//! A core is a labelled interval `[start, end)` of the original sequence.
//! Coordinates always refer to level 0, whatever level produced the core.

use crate::hash::hash_words;
use crate::types::{Label, Position};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Mask selecting the two-bit structural class of a label.
pub const CLASS_MASK: Label = 0b11;

/// A labelled interval of the original sequence.
///
/// `PartialEq` compares label and interval. The coarser comparison used by
/// LPS equality is [`Core::class_eq`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Core {
    pub label: Label,
    pub start: Position,
    pub end: Position,
}

impl Core {
    pub fn new(label: Label, start: Position, end: Position) -> Self {
        Self { label, start, end }
    }

    /// Level-1 core over `len` symbols whose first, second-to-last and last
    /// codes are given. Each code occupies `bit_size` bits and the length
    /// sits above them.
    pub fn from_symbols(
        first: u32,
        second_last: u32,
        last: u32,
        len: usize,
        bit_size: u32,
        start: Position,
        end: Position,
    ) -> Self {
        let label = ((len as u32).wrapping_sub(2) << (3 * bit_size))
            | (first << (2 * bit_size))
            | (second_last << bit_size)
            | last;
        Self::new(label, start, end)
    }

    /// Core spanning a run of at least two lower-level cores, in reading
    /// order. The label hashes the first, second-to-last and last labels
    /// together with the run length.
    pub fn from_run(run: &[Core]) -> Self {
        debug_assert!(run.len() >= 2);
        let first = run[0];
        let last = run[run.len() - 1];
        let label = hash_words([
            first.label,
            run[run.len() - 2].label,
            last.label,
            (run.len() as u32).wrapping_sub(2),
        ]);
        Self::spanning(label, &first, &last)
    }

    /// Core spanning a run whose three DCT symbols are packed into the label
    /// without hashing. Symbols are at most 7 bits wide.
    pub fn from_packed(symbols: [u32; 3], run: &[Core]) -> Self {
        debug_assert!(run.len() >= 2);
        let label = (symbols[0] << 14) | (symbols[1] << 7) | symbols[2];
        Self::spanning(label, &run[0], &run[run.len() - 1])
    }

    fn spanning(label: Label, first: &Core, last: &Core) -> Self {
        Self::new(
            label,
            first.start.min(last.start),
            first.end.max(last.end),
        )
    }

    pub fn len(&self) -> Position {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    /// Two-bit structural class of the label.
    #[inline]
    pub fn class(&self) -> Label {
        self.label & CLASS_MASK
    }

    /// Compare only the two low label bits.
    ///
    /// This is deliberately much coarser than `==`: cores with different
    /// labels and different intervals can be class-equal.
    #[inline]
    pub fn class_eq(&self, other: &Core) -> bool {
        self.class() == other.class()
    }
}

impl fmt::Display for Core {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label)
    }
}
