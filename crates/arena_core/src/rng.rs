//! Seeded random streams and the deterministic shuffle.
//!
//! Every random decision in map generation goes through [`MapRng`], a thin
//! wrapper around ChaCha8 with the bounded and unit draws spelled out here
//! rather than delegated to a distribution crate. Two implementations that
//! follow these definitions produce the same maps for the same seeds.

use rand_chacha::rand_core::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Deterministic RNG for map generation.
pub struct MapRng {
    inner: ChaCha8Rng,
}

impl MapRng {
    /// Create a stream seeded with `seed`.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Next raw 64-bit value.
    pub fn next_u64(&mut self) -> u64 {
        self.inner.next_u64()
    }

    /// Uniform value in `[0, bound)` by rejection sampling.
    ///
    /// Values below `2^64 mod bound` are redrawn so every residue is equally
    /// likely.
    ///
    /// # Panics
    ///
    /// Panics if `bound` is zero.
    pub fn next_below(&mut self, bound: u64) -> u64 {
        assert!(bound > 0, "next_below bound must be positive");
        let threshold = bound.wrapping_neg() % bound;
        loop {
            let value = self.next_u64();
            if value >= threshold {
                return value % bound;
            }
        }
    }

    /// Uniform index in `[min, max]` (inclusive).
    pub fn range_inclusive(&mut self, min: usize, max: usize) -> usize {
        debug_assert!(min <= max);
        let span = (max - min) as u64 + 1;
        min + self.next_below(span) as usize
    }

    /// Uniform float in `[0, 1)` built from the top 24 bits of a draw.
    pub fn next_unit_f32(&mut self) -> f32 {
        (self.inner.next_u32() >> 8) as f32 * (1.0 / (1u32 << 24) as f32)
    }
}

/// Fisher–Yates shuffle seeded with `seed`.
///
/// For `i` in `0..len - 1`, swaps element `i` with a uniformly drawn index in
/// `[i, len - 1]`. Sequences of length 0 or 1 are left untouched.
pub fn shuffle<T>(items: &mut [T], seed: u64) {
    if items.len() <= 1 {
        return;
    }
    let mut rng = MapRng::new(seed);
    let last = items.len() - 1;
    for i in 0..last {
        let j = rng.range_inclusive(i, last);
        items.swap(i, j);
    }
}

/// Owned variant of [`shuffle`].
#[must_use]
pub fn shuffled<T>(mut items: Vec<T>, seed: u64) -> Vec<T> {
    shuffle(&mut items, seed);
    items
}
