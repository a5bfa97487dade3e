//! Shared fixtures for the anomaly integration tests
//!
//! Readings are drawn from seeded `StdRng`s so every run trains the same model.

#![allow(dead_code)]

use aerisense_ml::FeatureVector;
use rand::{rngs::StdRng, Rng, SeedableRng};

/// Typical daytime reading at a healthy site
pub const NOMINAL: FeatureVector = FeatureVector {
    temperature: 24.0,
    pressure: 1012.0,
    vibration: 0.6,
    wind_speed: 12.0,
    uv_index: 4.0,
    soil_temperature: 18.0,
    soil_moisture: 0.32,
    pm25: 14.0,
    pm10: 24.0,
    no2: 20.0,
    solar_radiation: 450.0,
};

/// Half-width of the uniform noise on each channel, in positional order
const SPREAD: [f32; 11] = [2.0, 4.0, 0.3, 4.0, 1.5, 1.5, 0.04, 4.0, 6.0, 6.0, 120.0];

/// Furnace fire next to a failing fan: every channel far from nominal
pub const FAULT: FeatureVector = FeatureVector {
    temperature: 92.0,
    pressure: 960.0,
    vibration: 9.0,
    wind_speed: 65.0,
    uv_index: 12.0,
    soil_temperature: 30.0,
    soil_moisture: 0.05,
    pm25: 240.0,
    pm10: 320.0,
    no2: 140.0,
    solar_radiation: 1300.0,
};

pub fn rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Nominal reading with uniform per-channel noise
pub fn normal_reading(rng: &mut StdRng) -> FeatureVector {
    let mut values = NOMINAL.as_array();
    for (value, spread) in values.iter_mut().zip(SPREAD) {
        *value += rng.gen_range(-spread..=spread);
    }
    FeatureVector::from_array(values)
}

/// `count` noisy nominal readings
pub fn normal_readings(count: usize, seed: u64) -> Vec<FeatureVector> {
    let mut rng = rng(seed);
    (0..count).map(|_| normal_reading(&mut rng)).collect()
}
