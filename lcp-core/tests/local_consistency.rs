mod common;

use common::{random_dna, EXAMPLE};
use lcp_core::{Alphabet, Core, Level, Lps, ParseOptions, Position};
use proptest::prelude::*;

fn reparse(seq: &[u8], core: &Core, level: Level, options: ParseOptions) -> Lps {
    let (start, end) = (core.start as usize, core.end as usize);
    Lps::with_level(&seq[start..end], &Alphabet::dna(), level, options.with_offset(core.start))
}

fn narrowed(seq: &[u8], start: usize, end: usize, options: ParseOptions) -> Vec<Core> {
    Lps::new(&seq[start..end], &Alphabet::dna(), options.with_offset(start as Position)).into_cores()
}

/// Strictly monotone run of at least three valid symbols.
fn is_monotone_run(bytes: &[u8]) -> bool {
    let alphabet = Alphabet::dna();
    let codes: Option<Vec<u8>> = bytes.iter().map(|&b| alphabet.encode(b)).collect();
    match codes {
        Some(codes) if codes.len() >= 3 => {
            codes.windows(2).all(|w| w[0] < w[1]) || codes.windows(2).all(|w| w[0] > w[1])
        }
        _ => false,
    }
}

fn assert_locally_consistent(seq: &[u8], level: Level, options: ParseOptions) {
    let lps = Lps::with_level(seq, &Alphabet::dna(), level, options);
    assert_eq!(lps.level(), level, "level {} unreachable", level);
    assert!(!lps.is_empty());

    for core in lps.cores() {
        let isolated = reparse(seq, core, level, options);
        assert_eq!(isolated.level(), level);
        assert_eq!(isolated.cores(), &[*core], "core {:?} at level {}", core, level);
    }
}

#[test]
fn test_example_cores_are_locally_consistent() {
    for level in 1..=4 {
        assert_locally_consistent(EXAMPLE, level, ParseOptions::default());
    }
}

#[test]
fn test_deep_levels_forward() {
    let seq = random_dna(4000, 11, 0);
    for level in 1..=6 {
        assert_locally_consistent(&seq, level, ParseOptions::new(false, false));
        assert_locally_consistent(&seq, level, ParseOptions::new(true, false));
    }
}

#[test]
fn test_deep_levels_reverse_complement() {
    let seq = random_dna(4000, 11, 0);
    for level in 1..=6 {
        assert_locally_consistent(&seq, level, ParseOptions::new(false, true));
        assert_locally_consistent(&seq, level, ParseOptions::new(true, true));
    }
}

#[test]
fn test_deep_levels_with_ambiguity_codes() {
    let seq = random_dna(4000, 12, 15);
    for level in 1..=6 {
        for (compressed, reverse) in [(false, false), (true, false), (false, true), (true, true)] {
            assert_locally_consistent(&seq, level, ParseOptions::new(compressed, reverse));
        }
    }
}

#[test]
fn test_core_at_sequence_start() {
    // LMIN right at index 0 and a monotone stretch closing the range
    let lps = Lps::new(b"GACGT", &Alphabet::dna(), ParseOptions::default());
    assert_eq!(lps.cores()[0].start, 0);
    assert_locally_consistent(b"GACGT", 1, ParseOptions::default());
}

proptest! {
    #[test]
    fn prop_level1_reparse_reproduces_core(
        seq in "[ACGTNacgt]{0,300}",
        reverse in any::<bool>(),
    ) {
        let seq = seq.into_bytes();
        let options = ParseOptions::new(false, reverse);
        let lps = Lps::new(&seq, &Alphabet::dna(), options);

        for core in lps.cores() {
            let isolated = reparse(&seq, core, 1, options);
            prop_assert_eq!(isolated.cores(), &[*core]);
        }
    }

    #[test]
    fn prop_level1_narrowing_loses_the_core(
        seq in "[ACGTN]{3,300}",
        reverse in any::<bool>(),
    ) {
        let seq = seq.into_bytes();
        let options = ParseOptions::new(false, reverse);
        let lps = Lps::new(&seq, &Alphabet::dna(), options);

        for core in lps.cores() {
            let (start, end) = (core.start as usize, core.end as usize);
            for (from, to) in [(start + 1, end), (start, end - 1)] {
                let found = narrowed(&seq, from, to, options);
                if is_monotone_run(&seq[from..to]) {
                    // a shorter monotone stretch is still a stretch of its own
                    prop_assert_eq!(found.len(), 1);
                    prop_assert_eq!((found[0].start, found[0].end), (from as Position, to as Position));
                } else {
                    prop_assert!(found.is_empty(), "{:?} narrowed to {}..{} gave {:?}", core, from, to, found);
                }
            }
        }
    }

    #[test]
    fn prop_cores_are_ordered(seq in "[ACGTN]{0,500}", reverse in any::<bool>()) {
        let lps = Lps::new(seq.as_bytes(), &Alphabet::dna(), ParseOptions::new(false, reverse));
        for pair in lps.cores().windows(2) {
            prop_assert!(pair[0].start < pair[1].start);
            prop_assert!(pair[0].end < pair[1].end);
        }
        for core in lps.cores() {
            prop_assert!(core.end - core.start >= 3);
            prop_assert!(core.end as usize <= seq.len());
        }
    }

    #[test]
    fn prop_deepen_strictly_shrinks(seq in "[ACGTN]{0,600}", compressed in any::<bool>()) {
        let mut lps = Lps::new(seq.as_bytes(), &Alphabet::dna(), ParseOptions::new(compressed, false));
        loop {
            let (level, count) = (lps.level(), lps.len());
            if !lps.deepen() {
                prop_assert_eq!(lps.level(), level);
                prop_assert_eq!(lps.len(), count);
                break;
            }
            prop_assert_eq!(lps.level(), level + 1);
            prop_assert!(lps.len() < count);
        }
    }
}
