//! Polynomial string hash used to pick buckets.
//!
//! Each byte is folded in as `h = h * 31 + byte` with wrapping arithmetic.
//! The result depends only on the bytes, never on a seed, so the same key
//! lands in the same bucket for a given table size across instances and
//! runs.
//!
//! This is NOT a cryptographic algorithm, nor is it resistant to
//! adversarially chosen keys.

use core::hash::Hasher;

const MULTIPLIER: u64 = 31;

/// Streaming form of the polynomial hash.
///
/// Only `write` is meaningful: feeding it a key's bytes in one or several
/// pieces yields the same state as long as the concatenation is the same.
#[derive(Clone, Copy, Debug, Default)]
pub struct PolyHasher {
    hash: u64,
}

impl PolyHasher {
    pub const fn new() -> Self {
        Self { hash: 0 }
    }

    /// Hash a whole key in one go.
    #[inline]
    pub fn hash_bytes(bytes: &[u8]) -> u64 {
        let mut h = Self::new();
        h.write(bytes);
        h.finish()
    }
}

impl Hasher for PolyHasher {
    #[inline]
    fn write(&mut self, bytes: &[u8]) {
        self.hash = bytes.iter().fold(self.hash, |h, &b| {
            h.wrapping_mul(MULTIPLIER).wrapping_add(u64::from(b))
        });
    }

    #[inline]
    fn finish(&self) -> u64 {
        self.hash
    }
}
