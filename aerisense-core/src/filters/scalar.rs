//! Single-Channel Kalman Filter
//!
//! ## Model
//!
//! A constant-value model: between readings the quantity is assumed to stay
//! put, with drift captured by the process variance `Q`.
//!
//! ```text
//! Predict:  P⁻ = P + Q                 (estimate unchanged)
//! Gain:     K  = P⁻ / (P⁻ + R)
//! Correct:  x  = x + K·(z − x)
//!           P  = (1 − K)·P⁻
//! Confidence = 1 / (1 + P), clamped to [0, 1]
//! ```
//!
//! The first reading seeds the estimate directly and reports a fixed
//! confidence of 0.5; nothing has been averaged yet.
//!
//! ## Missing Data
//!
//! `update` is total. A missing reading means *do not call update* for that
//! channel; the filter never invents a value.

use crate::{
    constants::{
        DEFAULT_MEASUREMENT_VARIANCE, DEFAULT_PROCESS_VARIANCE, INITIAL_ERROR_COVARIANCE,
        UNCALIBRATED_CONFIDENCE,
    },
    errors::{check_variance, ConfigResult},
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Tuning of a [`ScalarKalmanFilter`]
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ScalarKalmanConfig {
    /// Process variance (Q): expected drift between readings
    pub process_variance: f32,
    /// Measurement variance (R): expected sensor noise
    pub measurement_variance: f32,
    /// Error covariance after a reset
    pub initial_covariance: f32,
}

impl Default for ScalarKalmanConfig {
    fn default() -> Self {
        Self {
            process_variance: DEFAULT_PROCESS_VARIANCE,
            measurement_variance: DEFAULT_MEASUREMENT_VARIANCE,
            initial_covariance: INITIAL_ERROR_COVARIANCE,
        }
    }
}

impl ScalarKalmanConfig {
    /// Config with the given Q and R and the default initial covariance
    pub fn new(process_variance: f32, measurement_variance: f32) -> Self {
        Self {
            process_variance,
            measurement_variance,
            ..Self::default()
        }
    }

    /// Set process variance (higher = less trust in the constant model)
    pub fn with_process_variance(mut self, variance: f32) -> Self {
        self.process_variance = variance;
        self
    }

    /// Set measurement variance (higher = less trust in the sensor)
    pub fn with_measurement_variance(mut self, variance: f32) -> Self {
        self.measurement_variance = variance;
        self
    }

    /// Set the covariance a reset filter starts from
    pub fn with_initial_covariance(mut self, covariance: f32) -> Self {
        self.initial_covariance = covariance;
        self
    }

    /// Check every variance is finite and positive
    pub fn validate(&self) -> ConfigResult<()> {
        check_variance("process_variance", self.process_variance)?;
        check_variance("measurement_variance", self.measurement_variance)?;
        check_variance("initial_covariance", self.initial_covariance)
    }
}

/// Internal state of a scalar filter
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FilterState {
    /// Current estimate (x)
    pub estimate: f32,
    /// Estimate error covariance (P)
    pub error_covariance: f32,
    /// Process variance (Q)
    pub process_variance: f32,
    /// Measurement variance (R)
    pub measurement_variance: f32,
    /// False until the first reading has seeded the estimate
    pub initialized: bool,
}

/// Recursive estimator smoothing one noisy scalar stream
#[derive(Debug, Clone)]
pub struct ScalarKalmanFilter {
    state: FilterState,
    initial_covariance: f32,
}

impl Default for ScalarKalmanFilter {
    fn default() -> Self {
        Self::new(ScalarKalmanConfig::default())
    }
}

impl ScalarKalmanFilter {
    /// Create an uninitialized filter
    pub fn new(config: ScalarKalmanConfig) -> Self {
        Self {
            state: FilterState {
                estimate: 0.0,
                error_covariance: config.initial_covariance,
                process_variance: config.process_variance,
                measurement_variance: config.measurement_variance,
                initialized: false,
            },
            initial_covariance: config.initial_covariance,
        }
    }

    /// Create a filter after validating its config
    pub fn try_new(config: ScalarKalmanConfig) -> ConfigResult<Self> {
        config.validate()?;
        Ok(Self::new(config))
    }

    /// Create a filter that already holds a prior estimate.
    ///
    /// The next `update` runs a full predict/correct cycle against `estimate`
    /// instead of seeding from the reading.
    pub fn seeded(config: ScalarKalmanConfig, estimate: f32) -> Self {
        let mut filter = Self::new(config);
        filter.state.estimate = estimate;
        filter.state.initialized = true;
        filter
    }

    /// Feed one reading, returning `(filtered_value, confidence)`
    pub fn update(&mut self, measurement: f32) -> (f32, f32) {
        let s = &mut self.state;

        if !s.initialized {
            s.estimate = measurement;
            s.initialized = true;
            return (measurement, UNCALIBRATED_CONFIDENCE);
        }

        let predicted = s.error_covariance + s.process_variance;
        let gain = predicted / (predicted + s.measurement_variance);
        s.estimate += gain * (measurement - s.estimate);
        s.error_covariance = (1.0 - gain) * predicted;

        (s.estimate, self.confidence())
    }

    /// Confidence in the current estimate, `1 / (1 + P)` in `[0, 1]`
    pub fn confidence(&self) -> f32 {
        (1.0 / (1.0 + self.state.error_covariance)).clamp(0.0, 1.0)
    }

    /// Current estimate (0.0 before the first reading)
    pub fn estimate(&self) -> f32 {
        self.state.estimate
    }

    /// Current error covariance (P)
    pub fn variance(&self) -> f32 {
        self.state.error_covariance
    }

    /// Whether a reading has been absorbed since the last reset
    pub fn is_initialized(&self) -> bool {
        self.state.initialized
    }

    /// Snapshot of the internal state
    pub fn state(&self) -> FilterState {
        self.state
    }

    /// Return to the uninitialized state, keeping the tuning
    pub fn reset(&mut self) {
        self.state.estimate = 0.0;
        self.state.error_covariance = self.initial_covariance;
        self.state.initialized = false;
    }
}
