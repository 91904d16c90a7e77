use serde::{Deserialize, Serialize};
use std::fmt;

/// Offset into the original, level-0 sequence.
pub type Position = u64;

/// Parse level. 0 is raw, 1 is the first core pass.
pub type Level = i32;

/// Equivalence label attached to every core.
pub type Label = u32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strand {
    #[default]
    Forward,
    Reverse,
}

impl Strand {
    pub fn is_reverse(self) -> bool {
        matches!(self, Strand::Reverse)
    }
}

impl From<bool> for Strand {
    /// `true` selects the reverse-complement strand.
    fn from(reverse_complement: bool) -> Self {
        if reverse_complement {
            Strand::Reverse
        } else {
            Strand::Forward
        }
    }
}

impl fmt::Display for Strand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strand::Forward => write!(f, "+"),
            Strand::Reverse => write!(f, "-"),
        }
    }
}

/// Options for a single level-1 parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ParseOptions {
    /// Which strand the input is read from.
    #[serde(default)]
    pub strand: Strand,

    /// Pack three-symbol DCT runs directly instead of hashing them.
    #[serde(default)]
    pub compressed_labels: bool,

    /// Added to every reported coordinate.
    #[serde(default)]
    pub offset: Position,
}

impl ParseOptions {
    pub fn new(compressed_labels: bool, reverse_complement: bool) -> Self {
        Self {
            strand: Strand::from(reverse_complement),
            compressed_labels,
            offset: 0,
        }
    }

    pub fn with_offset(mut self, offset: Position) -> Self {
        self.offset = offset;
        self
    }
}
