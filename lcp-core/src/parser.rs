//! Core-identification engine
//!
//! Scans a symbol stream and reports every interval matched by one of the
//! four structural rules. Every position is evaluated on its own, so a core
//! never depends on where the previous one happened to end; neighbouring
//! cores may share their boundary symbols. This is what makes a core
//! re-derivable from its own interval alone.
//!
//! Rules, tried in this order at each position `i` with `x y z` at
//! `i, i+1, i+2`:
//!
//! - `LMIN`: `x > y < z`, core `[i, i+3)`.
//! - `LMAX`: `s <= x < y > z >= t`, core `[i, i+3)`. A missing or invalid
//!   guard `s` or `t` counts as satisfied.
//! - `RINT`: `x != y == z`, the run of `y` extended until a different valid
//!   symbol, which closes the core.
//! - `SSEQ`: a strictly monotone stretch of valid symbols left uncovered
//!   between two cores (or a range edge and a core), spanning from the last
//!   symbol of the left core to the first symbol of the right one.

use crate::alphabet::Alphabet;
use std::fmt;

/// Random access to a stream of comparable symbols. `None` marks a symbol
/// outside the alphabet.
pub trait Symbols {
    fn len(&self) -> usize;

    fn get(&self, index: usize) -> Option<u32>;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Raw bytes read left to right through the forward table.
pub struct ForwardSymbols<'a> {
    seq: &'a [u8],
    alphabet: &'a Alphabet,
}

impl<'a> ForwardSymbols<'a> {
    pub fn new(seq: &'a [u8], alphabet: &'a Alphabet) -> Self {
        Self { seq, alphabet }
    }
}

impl Symbols for ForwardSymbols<'_> {
    fn len(&self) -> usize {
        self.seq.len()
    }

    #[inline]
    fn get(&self, index: usize) -> Option<u32> {
        self.alphabet.encode(self.seq[index]).map(u32::from)
    }
}

/// Raw bytes read right to left through the reverse-complement table.
pub struct ReverseComplementSymbols<'a> {
    seq: &'a [u8],
    alphabet: &'a Alphabet,
}

impl<'a> ReverseComplementSymbols<'a> {
    pub fn new(seq: &'a [u8], alphabet: &'a Alphabet) -> Self {
        Self { seq, alphabet }
    }
}

impl Symbols for ReverseComplementSymbols<'_> {
    fn len(&self) -> usize {
        self.seq.len()
    }

    #[inline]
    fn get(&self, index: usize) -> Option<u32> {
        let byte = self.seq[self.seq.len() - 1 - index];
        self.alphabet.encode_rc(byte).map(u32::from)
    }
}

/// A reduced stream produced by DCT; every symbol is valid.
impl Symbols for [u32] {
    fn len(&self) -> usize {
        <[u32]>::len(self)
    }

    #[inline]
    fn get(&self, index: usize) -> Option<u32> {
        Some(self[index])
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rule {
    Lmin,
    Lmax,
    Rint,
    Sseq,
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Rule::Lmin => "LMIN",
            Rule::Lmax => "LMAX",
            Rule::Rint => "RINT",
            Rule::Sseq => "SSEQ",
        };
        write!(f, "{}", name)
    }
}

/// Matched interval `[start, end)` in stream positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Match {
    pub start: usize,
    pub end: usize,
    pub rule: Rule,
}

impl Match {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }
}

/// Find all cores of a symbol stream, ordered by start.
///
/// Streams shorter than three symbols yield nothing.
pub fn find_matches<S: Symbols + ?Sized>(symbols: &S) -> Vec<Match> {
    let n = symbols.len();
    let mut matches = Vec::new();
    if n < 3 {
        return matches;
    }

    // The range start behaves like a core ending at index 1, so its last
    // symbol is index 0.
    let mut gap_from = 0;
    let mut open_end = 1;

    for i in 0..n - 2 {
        let Some((end, rule)) = rule_at(symbols, i) else {
            continue;
        };

        if open_end < i && is_monotone(symbols, gap_from, i + 1) {
            matches.push(Match {
                start: gap_from,
                end: i + 1,
                rule: Rule::Sseq,
            });
        }

        matches.push(Match { start: i, end, rule });
        gap_from = end - 1;
        open_end = end;
    }

    // The range end behaves like a core starting at index n - 1.
    if open_end < n - 1 && is_monotone(symbols, gap_from, n) {
        matches.push(Match {
            start: gap_from,
            end: n,
            rule: Rule::Sseq,
        });
    }

    matches
}

/// Evaluate LMIN, LMAX and RINT centred on `i + 1`. Requires `i + 2 < len`.
fn rule_at<S: Symbols + ?Sized>(symbols: &S, i: usize) -> Option<(usize, Rule)> {
    let n = symbols.len();
    let x = symbols.get(i)?;
    let y = symbols.get(i + 1)?;
    if x == y {
        return None;
    }
    let z = symbols.get(i + 2)?;

    if y != z {
        if x > y && y < z {
            return Some((i + 3, Rule::Lmin));
        }
        if x < y && y > z {
            let left_ok = i == 0 || symbols.get(i - 1).map_or(true, |s| s <= x);
            let right_ok = i + 3 >= n || symbols.get(i + 3).map_or(true, |t| z >= t);
            if left_ok && right_ok {
                return Some((i + 3, Rule::Lmax));
            }
        }
        return None;
    }

    let mut j = i + 2;
    while j < n && symbols.get(j) == Some(y) {
        j += 1;
    }
    if j < n && symbols.get(j).is_some() {
        Some((j + 1, Rule::Rint))
    } else {
        None
    }
}

fn is_monotone<S: Symbols + ?Sized>(symbols: &S, start: usize, end: usize) -> bool {
    let mut increasing = true;
    let mut decreasing = true;
    let Some(mut prev) = symbols.get(start) else {
        return false;
    };
    for k in start + 1..end {
        let Some(cur) = symbols.get(k) else {
            return false;
        };
        increasing &= prev < cur;
        decreasing &= prev > cur;
        if !increasing && !decreasing {
            return false;
        }
        prev = cur;
    }
    true
}
