mod common;

use common::{random_dna, EXAMPLE};
use lcp_core::{min_overlap, Alphabet, Core, LcpError, Level, Lps, ParseOptions, SegmentConfig};

fn assert_split_matches_whole(
    seq: &[u8],
    level: Level,
    segment_length: usize,
    overlap_length: usize,
    options: ParseOptions,
) {
    let alphabet = Alphabet::dna();
    let config = SegmentConfig::new(segment_length, overlap_length);

    let whole = Lps::with_level(seq, &alphabet, level, options);
    let split = Lps::segmented(seq, &alphabet, level, &config, options).unwrap();

    assert_eq!(whole.level(), level);
    assert_eq!(split.level(), level);
    assert_eq!(split.strand(), whole.strand());
    assert_eq!(
        split.len(),
        whole.len(),
        "level {} segment {} overlap {}",
        level,
        segment_length,
        overlap_length
    );
    assert_eq!(split, whole);
    assert!(split.equivalent(&whole));
}

#[test]
fn test_forward_levels_one_to_six() {
    let params = [
        (1, 500, 50),
        (2, 700, 100),
        (3, 1000, 300),
        (4, 2000, 600),
        (5, 2000, 1000),
        (6, 4000, 2500),
    ];
    for seed in 1..=4 {
        let seq = random_dna(30_000, seed, 0);
        for (level, segment, overlap) in params {
            assert_split_matches_whole(&seq, level, segment, overlap, ParseOptions::default());
        }
    }
}

#[test]
fn test_reverse_complement() {
    for seed in [5, 6] {
        let seq = random_dna(30_000, seed, 0);
        for (level, segment, overlap) in [(3, 1000, 300), (4, 2000, 600)] {
            assert_split_matches_whole(&seq, level, segment, overlap, ParseOptions::new(false, true));
        }
    }
}

#[test]
fn test_compressed_labels() {
    let seq = random_dna(30_000, 7, 0);
    for (level, segment, overlap) in [(3, 1000, 300), (5, 2000, 1000)] {
        assert_split_matches_whole(&seq, level, segment, overlap, ParseOptions::new(true, false));
    }
}

#[test]
fn test_ambiguity_codes() {
    let seq = random_dna(30_000, 8, 20);
    for (level, segment, overlap) in [(2, 700, 100), (4, 2000, 600)] {
        assert_split_matches_whole(&seq, level, segment, overlap, ParseOptions::default());
    }
}

#[test]
fn test_example_with_large_overlap() {
    // Level 5 is empty for the example, so both constructions stop at level 4.
    let alphabet = Alphabet::dna();
    let mut whole = Lps::new(EXAMPLE, &alphabet, ParseOptions::default());
    assert!(!whole.deepen_to(7));
    assert_eq!(whole.level(), 4);

    let config = SegmentConfig::new(1_000_000, 100_000);
    let mut split = Lps::segmented(EXAMPLE, &alphabet, 7, &config, ParseOptions::default()).unwrap();
    assert!(!split.deepen_to(7));

    assert_eq!(split, whole);
    assert!(split.equivalent(&whole));
    assert_eq!(split.level(), 4);
    assert_eq!(split.cores(), &[Core::new(1_587_516_376, 8, 68)]);
}

#[test]
fn test_unreachable_level_through_windows() {
    // Many windows, but past the run only level 6 still holds cores.
    let alphabet = Alphabet::dna();
    let mut seq = random_dna(300, 31, 0);
    seq.extend(std::iter::repeat(b'A').take(12_000));
    seq.extend(random_dna(300, 32, 0));
    let config = SegmentConfig::new(1000, min_overlap(8));

    let whole = Lps::with_level(&seq, &alphabet, 8, ParseOptions::default());
    let split = Lps::segmented(&seq, &alphabet, 8, &config, ParseOptions::default()).unwrap();
    assert_eq!(whole.level(), 6);
    assert_eq!(whole.len(), 2);
    assert_eq!(split, whole);
}

#[test]
fn test_homopolymer_across_boundary() {
    let alphabet = Alphabet::dna();
    let base = random_dna(1500, 5, 0);
    let mut seq = base[..480].to_vec();
    seq.push(b'C');
    seq.extend(std::iter::repeat(b'A').take(200));
    seq.push(b'G');
    seq.extend_from_slice(&base[682..]);

    let whole = Lps::new(&seq, &alphabet, ParseOptions::default());
    assert!(whole.cores().contains(&Core::new(12_818, 480, 682)));

    // the run straddles the boundary at 500 and outgrows the overlap
    assert_split_matches_whole(&seq, 1, 500, 50, ParseOptions::default());
}

#[test]
fn test_run_spanning_several_windows() {
    let mut seq = random_dna(2000, 6, 0)[..700].to_vec();
    seq.extend(std::iter::repeat(b'T').take(3000));
    seq.extend(random_dna(2000, 7, 0));

    let whole = Lps::new(&seq, &Alphabet::dna(), ParseOptions::default());
    assert!(whole.cores().iter().any(|c| c.start == 698 && c.end == 3701));

    for level in 1..=3 {
        assert_split_matches_whole(&seq, level, 500, min_overlap(level), ParseOptions::default());
    }
}

#[test]
fn test_tandem_repeats() {
    let mut seq = random_dna(1000, 33, 0);
    seq.extend(b"ACG".repeat(2000));
    seq.extend(random_dna(1000, 34, 0));
    seq.extend(b"AC".repeat(1500));
    seq.extend(random_dna(1000, 35, 0));

    for level in 1..=4 {
        assert_split_matches_whole(&seq, level, 400, min_overlap(level), ParseOptions::default());
    }
}

#[test]
fn test_short_segments_at_minimum_overlap() {
    for seed in 1..=5 {
        let seq = random_dna(5000, seed, 0);
        for level in 1..=3 {
            assert_split_matches_whole(&seq, level, 100, min_overlap(level), ParseOptions::default());
        }
    }
}

#[test]
fn test_offset_is_carried_into_windows() {
    let alphabet = Alphabet::dna();
    let seq = random_dna(10_000, 9, 0);
    let options = ParseOptions::default().with_offset(5_000_000);
    let config = SegmentConfig::new(1000, 300);

    let whole = Lps::with_level(&seq, &alphabet, 3, options);
    let split = Lps::segmented(&seq, &alphabet, 3, &config, options).unwrap();
    assert_eq!(split, whole);
    assert!(split.cores()[0].start >= 5_000_000);
}

#[test]
fn test_invalid_parameters() {
    let alphabet = Alphabet::dna();
    let seq = random_dna(1000, 1, 0);
    assert!(Lps::segmented(&seq, &alphabet, 2, &SegmentConfig::new(0, 100), ParseOptions::default()).is_err());
    assert!(Lps::segmented(&seq, &alphabet, 2, &SegmentConfig::new(100, 2), ParseOptions::default()).is_err());

    // overlaps that only suffice for shallower levels
    let short = SegmentConfig::new(100, 4);
    assert!(matches!(
        Lps::segmented(&seq, &alphabet, 1, &short, ParseOptions::default()),
        Err(LcpError::InvalidParams(_))
    ));
    let config = SegmentConfig::new(2000, 200);
    assert!(Lps::segmented(&seq, &alphabet, 3, &config, ParseOptions::default()).is_ok());
    assert!(matches!(
        Lps::segmented(&seq, &alphabet, 5, &config, ParseOptions::default()),
        Err(LcpError::InvalidParams(_))
    ));
}
