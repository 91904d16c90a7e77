//! Locally parsed sequence
//!
//! An [`Lps`] owns the ordered core list of one sequence at one level.
//! Parsing produces level 1; [`Lps::deepen`] replaces the list with the next
//! level in place. Cores are always stored ascending by `start`, whatever
//! the strand; a reverse-complement LPS is deepened in its own reading order,
//! right to left.

use crate::alphabet::Alphabet;
use crate::cores::Core;
use crate::dct::deepen_cores;
use crate::parser::{find_matches, ForwardSymbols, ReverseComplementSymbols, Symbols};
use crate::types::{Label, Level, ParseOptions, Position, Strand};
use fnv::FnvHashMap;
use std::fmt;

/// Maps a label to its slot in a caller-owned counter array.
pub type ReverseMap = FnvHashMap<Label, usize>;

#[derive(Debug, Clone, Default)]
pub struct Lps {
    level: Level,
    cores: Vec<Core>,
    strand: Strand,
    compressed_labels: bool,
}

impl Lps {
    /// Parse `seq` into level-1 cores.
    pub fn new(seq: &[u8], alphabet: &Alphabet, options: ParseOptions) -> Self {
        let mut lps = Self::default();
        lps.parse(seq, alphabet, options);
        lps
    }

    /// Parse `seq` and deepen towards `level`.
    ///
    /// If the level cannot be reached the result is the deepest non-empty
    /// level, as with [`Lps::deepen_to`].
    pub fn with_level(seq: &[u8], alphabet: &Alphabet, level: Level, options: ParseOptions) -> Self {
        let mut lps = Self::new(seq, alphabet, options);
        if level > 1 && !lps.deepen_to(level) {
            log::debug!(
                "Level {} unreachable for {} bp, keeping level {}",
                level,
                seq.len(),
                lps.level
            );
        }
        lps
    }

    /// Build from an already computed core list, e.g. a deserialized one.
    pub fn from_cores(level: Level, cores: Vec<Core>) -> Self {
        Self {
            level,
            cores,
            strand: Strand::Forward,
            compressed_labels: false,
        }
    }

    pub(crate) fn with_options(mut self, options: ParseOptions) -> Self {
        self.strand = options.strand;
        self.compressed_labels = options.compressed_labels;
        self
    }

    /// Replace the contents with the level-1 parse of `seq`.
    pub fn parse(&mut self, seq: &[u8], alphabet: &Alphabet, options: ParseOptions) {
        self.cores = parse_level1(seq, alphabet, options);
        self.level = 1;
        self.strand = options.strand;
        self.compressed_labels = options.compressed_labels;
        log::debug!(
            "Parsed {} bp on strand {} into {} cores",
            seq.len(),
            self.strand,
            self.cores.len()
        );
    }

    /// Advance one level. Returns `false` and leaves the LPS untouched when
    /// the next level would hold no cores.
    pub fn deepen(&mut self) -> bool {
        let next = next_level(&self.cores, self.strand, self.compressed_labels);
        if next.is_empty() {
            return false;
        }
        log::debug!(
            "Deepened level {} -> {}: {} -> {} cores",
            self.level,
            self.level + 1,
            self.cores.len(),
            next.len()
        );
        self.cores = next;
        self.level += 1;
        true
    }

    /// Deepen until `target` is reached or the next level would be empty.
    ///
    /// Every completed level is kept, so on `false` the LPS sits at the
    /// deepest level it could reach. A target at or below the current level
    /// is a no-op that returns `false`.
    pub fn deepen_to(&mut self, target: Level) -> bool {
        if target <= self.level {
            return false;
        }

        while self.level < target {
            if !self.deepen() {
                log::debug!("Deepening stopped at level {}, target {} unreachable", self.level, target);
                return false;
            }
        }
        true
    }

    pub fn level(&self) -> Level {
        self.level
    }

    pub fn cores(&self) -> &[Core] {
        &self.cores
    }

    pub fn into_cores(self) -> Vec<Core> {
        self.cores
    }

    pub fn len(&self) -> usize {
        self.cores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cores.is_empty()
    }

    pub fn strand(&self) -> Strand {
        self.strand
    }

    pub fn compressed_labels(&self) -> bool {
        self.compressed_labels
    }

    /// Labels in core order.
    pub fn labels(&self) -> Vec<Label> {
        let mut labels = Vec::new();
        self.extend_labels(&mut labels);
        labels
    }

    /// Append the labels to an existing buffer.
    pub fn extend_labels(&self, labels: &mut Vec<Label>) {
        labels.reserve(self.cores.len());
        labels.extend(self.cores.iter().map(|c| c.label));
    }

    /// Reset `counts` to one zeroed slot per map entry, then count every
    /// core whose label is mapped. Returns `false` for an empty map.
    pub fn set_label_counts(&self, counts: &mut Vec<u32>, reverse_map: &ReverseMap) -> bool {
        if reverse_map.is_empty() {
            return false;
        }
        counts.clear();
        counts.resize(reverse_map.len(), 0);
        self.update_label_counts(counts, reverse_map)
    }

    /// Add this LPS's mapped labels on top of the existing counts.
    pub fn update_label_counts(&self, counts: &mut Vec<u32>, reverse_map: &ReverseMap) -> bool {
        if reverse_map.is_empty() {
            return false;
        }
        for core in &self.cores {
            if let Some(&slot) = reverse_map.get(&core.label) {
                if slot >= counts.len() {
                    counts.resize(slot + 1, 0);
                }
                counts[slot] += 1;
            }
        }
        true
    }

    /// Bytes held by this LPS and its core list. Diagnostic only.
    pub fn memory_footprint_bytes(&self) -> f64 {
        (std::mem::size_of::<Self>() + self.cores.len() * std::mem::size_of::<Core>()) as f64
    }

    /// Same core count and every pair equal on the two-bit label class.
    ///
    /// Far weaker than `==`, which also compares level, labels and intervals.
    pub fn equivalent(&self, other: &Lps) -> bool {
        self.cores.len() == other.cores.len()
            && self
                .cores
                .iter()
                .zip(&other.cores)
                .all(|(a, b)| a.class_eq(b))
    }
}

impl PartialEq for Lps {
    fn eq(&self, other: &Self) -> bool {
        self.level == other.level && self.cores == other.cores
    }
}

impl Eq for Lps {}

impl fmt::Display for Lps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Level: {}", self.level)?;
        for core in &self.cores {
            write!(f, " {}", core)?;
        }
        Ok(())
    }
}

/// Level-1 cores of `seq`, ascending by start.
pub(crate) fn parse_level1(seq: &[u8], alphabet: &Alphabet, options: ParseOptions) -> Vec<Core> {
    match options.strand {
        Strand::Forward => {
            let symbols = ForwardSymbols::new(seq, alphabet);
            collect_level1(&symbols, alphabet.bit_size(), |a, b| {
                (options.offset + a as Position, options.offset + b as Position)
            })
        }
        Strand::Reverse => {
            let n = seq.len() as Position;
            let symbols = ReverseComplementSymbols::new(seq, alphabet);
            let mut cores = collect_level1(&symbols, alphabet.bit_size(), |a, b| {
                (options.offset + n - b as Position, options.offset + n - a as Position)
            });
            cores.reverse();
            cores
        }
    }
}

fn collect_level1<S, F>(symbols: &S, bit_size: u32, to_forward: F) -> Vec<Core>
where
    S: Symbols + ?Sized,
    F: Fn(usize, usize) -> (Position, Position),
{
    find_matches(symbols)
        .into_iter()
        .filter_map(|m| {
            let first = symbols.get(m.start)?;
            let second_last = symbols.get(m.end - 2)?;
            let last = symbols.get(m.end - 1)?;
            let (start, end) = to_forward(m.start, m.end);
            Some(Core::from_symbols(first, second_last, last, m.len(), bit_size, start, end))
        })
        .collect()
}

/// Next level of an ascending core list, walked in the strand's reading order.
pub(crate) fn next_level(cores: &[Core], strand: Strand, compressed_labels: bool) -> Vec<Core> {
    match strand {
        Strand::Forward => deepen_cores(cores, compressed_labels),
        Strand::Reverse => {
            let reading: Vec<Core> = cores.iter().rev().copied().collect();
            let mut next = deepen_cores(&reading, compressed_labels);
            next.reverse();
            next
        }
    }
}
