//! 32-bit MurmurHash3 used to fold runs of cores into a single label.
//!
//! This is not the textbook variant: the block loop rotates the running hash
//! by 15 bits, and tails of two or three bytes are read but never mixed in.
//! Stored labels depend on these exact bits, so they must not be "fixed".

const C1: u32 = 0xcc9e_2d51;
const C2: u32 = 0x1b87_3593;

/// Seed used for every core label.
pub const LABEL_SEED: u32 = 42;

pub fn murmur3_32(key: &[u8], seed: u32) -> u32 {
    let mut h1 = seed;

    let mut blocks = key.chunks_exact(4);
    for block in &mut blocks {
        let mut k1 = u32::from_le_bytes([block[0], block[1], block[2], block[3]]);
        k1 = k1.wrapping_mul(C1);
        k1 = k1.rotate_left(15);
        k1 = k1.wrapping_mul(C2);

        h1 ^= k1;
        h1 = h1.rotate_left(15);
        h1 = h1.wrapping_mul(5).wrapping_add(0xe654_6b64);
    }

    let tail = blocks.remainder();
    if tail.len() == 1 {
        let mut k1 = tail[0] as u32;
        k1 = k1.wrapping_mul(C1);
        k1 = k1.rotate_left(15);
        k1 = k1.wrapping_mul(C2);
        h1 ^= k1;
    }

    h1 ^= key.len() as u32;
    fmix32(h1)
}

#[inline]
fn fmix32(mut h: u32) -> u32 {
    h ^= h >> 16;
    h = h.wrapping_mul(0x85eb_ca6b);
    h ^= h >> 13;
    h = h.wrapping_mul(0xc2b2_ae35);
    h ^= h >> 16;
    h
}

/// Hash four 32-bit words laid out little-endian, the fixed record used for
/// deepened labels.
pub fn hash_words(words: [u32; 4]) -> u32 {
    let mut buf = [0u8; 16];
    for (chunk, word) in buf.chunks_exact_mut(4).zip(words) {
        chunk.copy_from_slice(&word.to_le_bytes());
    }
    murmur3_32(&buf, LABEL_SEED)
}
