//! Composed Feature Vector and Min-Max Scaling
//!
//! ## Overview
//!
//! Every site reading handed to the anomaly model is an 11-channel vector in
//! a fixed order. Naming the fields removes the classic positional bug where
//! a caller swaps wind and UV and the model silently learns garbage:
//!
//! ```text
//! idx  channel            min     max
//!  0   temperature °C     -10     100
//!  1   pressure hPa       900    1100
//!  2   vibration            0      20
//!  3   wind km/h            0     150
//!  4   UV index             0      15
//!  5   soil temp °C       -10      60
//!  6   soil moisture        0       1
//!  7   PM2.5 µg/m³          0     500
//!  8   PM10 µg/m³           0     500
//!  9   NO2 ppb              0     200
//! 10   solar W/m²           0    1500
//! ```
//!
//! Scaling is `(v − min) / (max − min)` with no clamping: a reading outside
//! its bounds lands outside `[0, 1]` and the model sees it as extreme.

use crate::{MlError, MlResult, Sample};

/// Number of channels in a [`FeatureVector`]
pub const FEATURE_COUNT: usize = 11;

/// Channel names in positional order
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "temperature",
    "pressure",
    "vibration",
    "wind_speed",
    "uv_index",
    "soil_temperature",
    "soil_moisture",
    "pm25",
    "pm10",
    "no2",
    "solar_radiation",
];

/// One composed site reading
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FeatureVector {
    /// Air temperature (°C)
    pub temperature: f32,
    /// Barometric pressure (hPa)
    pub pressure: f32,
    /// Vibration magnitude
    pub vibration: f32,
    /// Wind speed (km/h)
    pub wind_speed: f32,
    /// UV index
    pub uv_index: f32,
    /// Soil temperature (°C)
    pub soil_temperature: f32,
    /// Volumetric soil moisture (0–1)
    pub soil_moisture: f32,
    /// PM2.5 (µg/m³)
    pub pm25: f32,
    /// PM10 (µg/m³)
    pub pm10: f32,
    /// Nitrogen dioxide (ppb)
    pub no2: f32,
    /// Solar irradiance (W/m²)
    pub solar_radiation: f32,
}

impl FeatureVector {
    /// Channels in positional order
    pub fn as_array(&self) -> [f32; FEATURE_COUNT] {
        [
            self.temperature,
            self.pressure,
            self.vibration,
            self.wind_speed,
            self.uv_index,
            self.soil_temperature,
            self.soil_moisture,
            self.pm25,
            self.pm10,
            self.no2,
            self.solar_radiation,
        ]
    }

    /// Build from channels in positional order
    pub fn from_array(values: [f32; FEATURE_COUNT]) -> Self {
        let [temperature, pressure, vibration, wind_speed, uv_index, soil_temperature, soil_moisture, pm25, pm10, no2, solar_radiation] =
            values;
        Self {
            temperature,
            pressure,
            vibration,
            wind_speed,
            uv_index,
            soil_temperature,
            soil_moisture,
            pm25,
            pm10,
            no2,
            solar_radiation,
        }
    }

    /// Build from a positional slice, which must hold exactly
    /// [`FEATURE_COUNT`] values.
    pub fn from_slice(values: &[f32]) -> MlResult<Self> {
        let array: [f32; FEATURE_COUNT] = values.try_into().map_err(|_| MlError::FeatureLength {
            expected: FEATURE_COUNT,
            actual: values.len(),
        })?;
        Ok(Self::from_array(array))
    }

    /// Channel by position
    pub fn get(&self, index: usize) -> MlResult<f32> {
        self.as_array()
            .get(index)
            .copied()
            .ok_or(MlError::InvalidFeature { index })
    }
}

impl From<[f32; FEATURE_COUNT]> for FeatureVector {
    fn from(values: [f32; FEATURE_COUNT]) -> Self {
        Self::from_array(values)
    }
}

/// Fixed-range min-max normalizer
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FeatureScaler {
    min: [f32; FEATURE_COUNT],
    max: [f32; FEATURE_COUNT],
}

impl Default for FeatureScaler {
    fn default() -> Self {
        Self {
            min: [-10.0, 900.0, 0.0, 0.0, 0.0, -10.0, 0.0, 0.0, 0.0, 0.0, 0.0],
            max: [100.0, 1100.0, 20.0, 150.0, 15.0, 60.0, 1.0, 500.0, 500.0, 200.0, 1500.0],
        }
    }
}

impl FeatureScaler {
    /// Scaler with custom bounds; every `max` must exceed its `min`.
    pub fn new(min: [f32; FEATURE_COUNT], max: [f32; FEATURE_COUNT]) -> MlResult<Self> {
        let scaler = Self { min, max };
        scaler.validate()?;
        Ok(scaler)
    }

    /// Replace the bounds of one channel
    pub fn with_bounds(mut self, index: usize, min: f32, max: f32) -> MlResult<Self> {
        if index >= FEATURE_COUNT {
            return Err(MlError::InvalidFeature { index });
        }
        self.min[index] = min;
        self.max[index] = max;
        self.validate()?;
        Ok(self)
    }

    /// Check every range is finite and non-empty
    pub fn validate(&self) -> MlResult<()> {
        for (lo, hi) in self.min.iter().zip(self.max.iter()) {
            if !(lo.is_finite() && hi.is_finite() && hi > lo) {
                return Err(MlError::InvalidConfig("scaler bounds must be finite with max > min"));
            }
        }
        Ok(())
    }

    /// `(min, max)` of one channel
    pub fn bounds(&self, index: usize) -> Option<(f32, f32)> {
        Some((*self.min.get(index)?, *self.max.get(index)?))
    }

    /// Scale every channel to its unit range, unclamped
    pub fn scale(&self, features: &FeatureVector) -> [f32; FEATURE_COUNT] {
        let mut scaled = features.as_array();
        for (i, value) in scaled.iter_mut().enumerate() {
            *value = (*value - self.min[i]) / (self.max[i] - self.min[i]);
        }
        scaled
    }

    /// Scaled reading as a forest sample
    pub fn scale_sample(&self, features: &FeatureVector) -> Sample {
        Sample::from(self.scale(features))
    }
}
