//! Deterministic random stream shared by every generation step.
//!
//! - Seeded Xoroshiro128+ (`rand_xoshiro`), reproducible across platforms
//! - `fork()` derives an independent child stream from the parent's next output
//! - Integer and float ranges are half-open: `[min, max)`
//!
//! Two runs with the same seed and the same call order produce identical
//! content, which is what keeps multiplayer peers in agreement.

use rand::{RngCore, SeedableRng};
use rand_xoshiro::Xoroshiro128Plus;

/// Seeded stream of integers, floats and booleans
#[derive(Debug, Clone)]
pub struct DeterministicRng {
    inner: Xoroshiro128Plus,
    seed: u64,
}

impl DeterministicRng {
    pub fn new(seed: u64) -> Self {
        Self {
            inner: Xoroshiro128Plus::seed_from_u64(seed),
            seed,
        }
    }

    /// Seed this stream was created from
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Child stream seeded from this stream's next output.
    ///
    /// The parent advances by exactly one draw, so forking is itself part of
    /// the reproducible sequence.
    pub fn fork(&mut self) -> Self {
        let child_seed = self.next_u64();
        Self::new(child_seed)
    }

    pub fn next_u64(&mut self) -> u64 {
        self.inner.next_u64()
    }

    /// Uniform float in `[0, 1)` built from the 24 high bits
    pub fn next_normalized_float(&mut self) -> f32 {
        (self.next_u64() >> 40) as f32 / (1u64 << 24) as f32
    }

    /// Fair coin flip. Uses the high bit; Xoroshiro128+ low bits are weak.
    pub fn next_bool(&mut self) -> bool {
        self.next_u64() >> 63 == 1
    }

    /// Uniform float in `[min, max)`. Returns `min` for an empty range.
    pub fn range_float(&mut self, min: f32, max: f32) -> f32 {
        let t = self.next_normalized_float();
        if max <= min {
            return min;
        }
        let value = min + t * (max - min);
        if value < max {
            value
        } else {
            // t * span can round up onto max for wide or coarse spans
            float_below(max).max(min)
        }
    }

    /// Uniform integer in `[min, max)`. Returns `min` for an empty range.
    pub fn range_int(&mut self, min: i32, max: i32) -> i32 {
        let span = (max as i64 - min as i64).max(0) as u64;
        let draw = self.next_u64();
        if span == 0 {
            return min;
        }
        (min as i64 + ((draw >> 32) * span >> 32) as i64) as i32
    }

    /// Uniform index into a collection of `len` elements
    pub fn range_index(&mut self, len: usize) -> usize {
        let draw = self.next_u64();
        if len == 0 {
            return 0;
        }
        ((draw >> 32) * len as u64 >> 32) as usize
    }
}

/// Largest f32 strictly below `x`
fn float_below(x: f32) -> f32 {
    if x > 0.0 {
        f32::from_bits(x.to_bits() - 1)
    } else if x == 0.0 {
        -f32::from_bits(1)
    } else {
        f32::from_bits(x.to_bits() + 1)
    }
}
