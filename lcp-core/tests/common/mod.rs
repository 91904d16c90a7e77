#![allow(dead_code)]

pub const EXAMPLE: &[u8] = b"GGGACCTGGTGACCCCAGCCCACGACAGCCAAGCGCCAGCTGAGCTCAGGTGTGAGGAGATCACAGTCCT";

fn splitmix64(state: &mut u64) -> u64 {
    *state = state.wrapping_add(0x9e37_79b9_7f4a_7c15);
    let mut z = *state;
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^ (z >> 31)
}

/// Reproducible DNA, with roughly `n_per_mille` ambiguity codes per thousand.
pub fn random_dna(length: usize, seed: u64, n_per_mille: u64) -> Vec<u8> {
    let mut state = seed;
    (0..length)
        .map(|_| {
            let value = splitmix64(&mut state);
            if n_per_mille > 0 && (value & 0xffff) % 1000 < n_per_mille {
                b'N'
            } else {
                b"ACGT"[(value >> 62) as usize]
            }
        })
        .collect()
}
