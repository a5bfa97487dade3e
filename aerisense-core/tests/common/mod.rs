//! Shared fixtures for the integration tests
//!
//! - a deterministic xorshift noise source
//! - synthetic multi-source weather scenarios

#![allow(dead_code)]

/// Deterministic noise source; same seed, same sequence
pub struct TestRng {
    state: u32,
}

impl TestRng {
    pub fn new(seed: u32) -> Self {
        Self { state: seed.max(1) }
    }

    pub fn next_u32(&mut self) -> u32 {
        self.state ^= self.state << 13;
        self.state ^= self.state >> 17;
        self.state ^= self.state << 5;
        self.state
    }

    /// Uniform in `[0, 1)`
    pub fn next_f32(&mut self) -> f32 {
        (self.next_u32() >> 8) as f32 / 16_777_216.0
    }

    pub fn gen_range(&mut self, min: f32, max: f32) -> f32 {
        min + self.next_f32() * (max - min)
    }
}

/// One tick of a three-source temperature feed
#[derive(Debug, Clone, Copy)]
pub struct Tick {
    pub truth: f32,
    pub esp32: Option<f32>,
    pub openweather: Option<f32>,
    pub openaq: Option<f32>,
}

/// Constant truth with per-source uniform noise and periodic outages
///
/// - `esp32` is noisy (±1.5) and drops every 7th tick
/// - `openweather` is clean (±0.3) and drops every 11th tick
/// - `openaq` is in between (±0.8) and always reports
pub fn temperature_feed(truth: f32, ticks: usize, seed: u32) -> Vec<Tick> {
    let mut rng = TestRng::new(seed);
    (0..ticks)
        .map(|i| {
            let esp32 = truth + rng.gen_range(-1.5, 1.5);
            let openweather = truth + rng.gen_range(-0.3, 0.3);
            let openaq = truth + rng.gen_range(-0.8, 0.8);
            Tick {
                truth,
                esp32: (i % 7 != 6).then_some(esp32),
                openweather: (i % 11 != 10).then_some(openweather),
                openaq: Some(openaq),
            }
        })
        .collect()
}

/// Steady channel around `base` with occasional large spikes
pub fn spiky_channel(base: f32, len: usize, spike_every: usize, seed: u32) -> Vec<f32> {
    let mut rng = TestRng::new(seed);
    (0..len)
        .map(|i| {
            let noise = rng.gen_range(-0.5, 0.5);
            if i > 0 && i % spike_every == 0 {
                base + 50.0
            } else {
                base + noise
            }
        })
        .collect()
}
