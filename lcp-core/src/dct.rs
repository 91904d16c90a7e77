//! Deterministic coin tossing and one level of deepening.
//!
//! Every core except the first is reduced against its left neighbour to the
//! index of the lowest differing label bit, shifted left once, with the value
//! of that bit in the current label appended. The first core has no left
//! neighbour and only serves as context. The reduced stream is then fed back
//! through the rule engine.

use crate::cores::Core;
use crate::parser::find_matches;
use crate::types::Label;

/// Symbol used when two adjacent labels are identical.
pub const EQUAL_LABELS: u32 = 64;

/// Reduce `cur` against its left neighbour `left`.
#[inline]
pub fn dct(left: Label, cur: Label) -> u32 {
    let diff = left ^ cur;
    if diff == 0 {
        return EQUAL_LABELS;
    }
    let pos = diff.trailing_zeros();
    (pos << 1) | ((cur >> pos) & 1)
}

/// Reduce a core list given in reading order. The result has one symbol
/// fewer than the input; symbol `j` stands for core `j + 1`.
pub fn reduce(cores: &[Core]) -> Vec<u32> {
    cores
        .windows(2)
        .map(|pair| dct(pair[0].label, pair[1].label))
        .collect()
}

/// Produce the next level from cores given in reading order. The output is
/// in reading order as well.
///
/// A match `[p, q)` over the reduced stream covers cores `p..=q`: the
/// reduced symbols stand for cores `p + 1..=q` and core `p` supplies their
/// left context.
pub fn deepen_cores(cores: &[Core], compressed_labels: bool) -> Vec<Core> {
    if cores.len() < 2 {
        return Vec::new();
    }

    let reduced = reduce(cores);
    find_matches(reduced.as_slice())
        .into_iter()
        .map(|m| {
            let run = &cores[m.start..=m.end];
            if compressed_labels && m.len() == 3 {
                let symbols = [reduced[m.start], reduced[m.start + 1], reduced[m.start + 2]];
                Core::from_packed(symbols, run)
            } else {
                Core::from_run(run)
            }
        })
        .collect()
}
