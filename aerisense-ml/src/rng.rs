//! Deterministic xorshift generator for tree construction.
//!
//! The forest only needs cheap, reproducible randomness for sub-sampling and
//! split selection, so a 32-bit xorshift is enough and keeps the crate free
//! of an RNG dependency on `no_std` targets.

/// Xorshift32 generator with a scrambled seed
#[derive(Debug, Clone)]
pub struct Rng {
    state: u32,
}

impl Rng {
    /// Create a generator. Nearby seeds yield unrelated streams.
    pub fn new(seed: u32) -> Self {
        // splitmix-style scramble; xorshift state must never be zero
        let mut z = seed.wrapping_add(0x9E37_79B9);
        z = (z ^ (z >> 16)).wrapping_mul(0x85EB_CA6B);
        z = (z ^ (z >> 13)).wrapping_mul(0xC2B2_AE35);
        z ^= z >> 16;
        Self { state: if z == 0 { 0x6D2B_79F5 } else { z } }
    }

    /// Next raw value
    pub fn next_u32(&mut self) -> u32 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.state = x;
        x
    }

    /// Uniform in `[0, 1)`
    pub fn next_f32(&mut self) -> f32 {
        (self.next_u32() >> 8) as f32 / 16_777_216.0
    }

    /// Uniform index in `[0, n)`; `n == 0` yields 0.
    pub fn next_range(&mut self, n: usize) -> usize {
        if n == 0 {
            return 0;
        }
        (self.next_u32() as u64 * n as u64 >> 32) as usize
    }

    /// Uniform in `[min, max)`
    pub fn next_f32_range(&mut self, min: f32, max: f32) -> f32 {
        min + self.next_f32() * (max - min)
    }
}
