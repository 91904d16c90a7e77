//! Alphabet encoder
//!
//! Maps input bytes to small integer codes through a forward table and a
//! reverse-complement table. Bytes outside the alphabet map to `None`, which
//! the parser treats as a symbol that can neither open nor close a core.

use crate::error::{LcpError, LcpResult};
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

const INVALID: u8 = u8::MAX;

/// Forward and reverse-complement lookup tables plus the bit width of the
/// largest code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alphabet {
    forward: [u8; 256],
    reverse_complement: [u8; 256],
    bit_size: u32,
}

impl Default for Alphabet {
    fn default() -> Self {
        Self::dna()
    }
}

impl Alphabet {
    /// `A=0 C=1 G=2 T=3`, case-insensitive, with `T G C A` as complements.
    pub fn dna() -> Self {
        let mut alphabet = Self::empty();
        for (c, code, rc) in [(b'A', 0, 3), (b'C', 1, 2), (b'G', 2, 1), (b'T', 3, 0)] {
            alphabet.insert(c, code, rc);
        }
        alphabet.bit_size = 2;
        alphabet
    }

    /// Build an alphabet from `(character, code, reverse_complement_code)` triples.
    pub fn from_entries<I>(entries: I) -> LcpResult<Self>
    where
        I: IntoIterator<Item = (u8, u8, u8)>,
    {
        let mut alphabet = Self::empty();
        let mut max_code = 0u8;
        let mut count = 0usize;

        for (c, code, rc) in entries {
            if code == INVALID || rc == INVALID {
                return Err(LcpError::Alphabet(format!(
                    "code for '{}' collides with the invalid sentinel {}",
                    c as char, INVALID
                )));
            }
            if alphabet.forward[c.to_ascii_uppercase() as usize] != INVALID {
                return Err(LcpError::Alphabet(format!(
                    "duplicate character '{}'",
                    c as char
                )));
            }
            alphabet.insert(c, code, rc);
            max_code = max_code.max(code).max(rc);
            count += 1;
        }

        if count == 0 {
            return Err(LcpError::Alphabet("no characters defined".to_string()));
        }

        alphabet.bit_size = bits_needed(max_code);
        Ok(alphabet)
    }

    /// Read an encoding table where each line is `<char> <code> <rc_code>`.
    ///
    /// Blank lines and lines starting with `#` are skipped.
    pub fn from_reader<R: Read>(reader: R) -> LcpResult<Self> {
        let mut entries = Vec::new();

        for (line_no, line) in BufReader::new(reader).lines().enumerate() {
            let line = line?;
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }

            let fields: Vec<&str> = trimmed.split_whitespace().collect();
            if fields.len() != 3 || fields[0].len() != 1 {
                return Err(LcpError::Alphabet(format!(
                    "line {}: expected '<char> <code> <rc_code>', got '{}'",
                    line_no + 1,
                    trimmed
                )));
            }

            let parse_code = |field: &str| {
                field.parse::<u8>().map_err(|e| {
                    LcpError::Alphabet(format!("line {}: bad code '{}': {}", line_no + 1, field, e))
                })
            };

            entries.push((fields[0].as_bytes()[0], parse_code(fields[1])?, parse_code(fields[2])?));
        }

        Self::from_entries(entries)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> LcpResult<Self> {
        let file = File::open(path.as_ref())?;
        let alphabet = Self::from_reader(file)?;
        log::debug!(
            "Loaded alphabet from {} ({} bits per symbol)",
            path.as_ref().display(),
            alphabet.bit_size
        );
        Ok(alphabet)
    }

    #[inline]
    pub fn encode(&self, byte: u8) -> Option<u8> {
        match self.forward[byte as usize] {
            INVALID => None,
            code => Some(code),
        }
    }

    #[inline]
    pub fn encode_rc(&self, byte: u8) -> Option<u8> {
        match self.reverse_complement[byte as usize] {
            INVALID => None,
            code => Some(code),
        }
    }

    /// Number of bits used per code when packing level-1 labels.
    pub fn bit_size(&self) -> u32 {
        self.bit_size
    }

    fn empty() -> Self {
        Self {
            forward: [INVALID; 256],
            reverse_complement: [INVALID; 256],
            bit_size: 1,
        }
    }

    fn insert(&mut self, c: u8, code: u8, rc: u8) {
        for byte in [c.to_ascii_uppercase(), c.to_ascii_lowercase()] {
            self.forward[byte as usize] = code;
            self.reverse_complement[byte as usize] = rc;
        }
    }
}

fn bits_needed(max_code: u8) -> u32 {
    (u8::BITS - max_code.leading_zeros()).max(1)
}
