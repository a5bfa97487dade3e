//! Adaptive Two-State Kalman Filter
//!
//! ## Model
//!
//! State `x = [value, velocity]` under constant velocity, observing the value
//! only:
//!
//! ```text
//! F = | 1  1 |      H = | 1  0 |
//!     | 0  1 |
//!
//! Predict:  x = F·x,  P = F·P·Fᵀ + Q
//! Correct:  y = z − H·x,  S = H·P·Hᵀ + R,  K = P·Hᵀ / S
//!           x = x + K·y,  P = (I − K·H)·P·(I − K·H)ᵀ + K·R·Kᵀ
//! ```
//!
//! ## Adaptation
//!
//! After each predict the residual `|z − x̂₀|` picks one of two regimes for the
//! value term `Q₀₀`:
//!
//! | Residual      | Q₀₀  | Behaviour                              |
//! |---------------|------|----------------------------------------|
//! | > 2.0         | 1.0  | trust measurements, track fast changes |
//! | ≤ 2.0         | 0.01 | trust the model, smooth steady state   |
//!
//! The regime chosen on one update shapes the *next* prediction.
//!
//! ## Forecasting
//!
//! [`AdaptiveKalmanFilter::predict_future`] unrolls the motion model on a copy
//! of the state, so forecasting never disturbs the live filter.

use alloc::vec::Vec;

use super::matrix::{add, identity, make_symmetric, matvec, multiply, transpose, SquareMatrix, Vector};
use crate::{
    constants::{
        ADAPTIVE_HIGH_PROCESS_NOISE, ADAPTIVE_INITIAL_COVARIANCE, ADAPTIVE_LOW_PROCESS_NOISE,
        ADAPTIVE_MEASUREMENT_VARIANCE, ADAPTIVE_RESIDUAL_THRESHOLD,
    },
    errors::{check_threshold, check_variance, ConfigResult},
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// State transition of the constant-velocity model
const TRANSITION: SquareMatrix<2> = [[1.0, 1.0], [0.0, 1.0]];

/// Tuning of an [`AdaptiveKalmanFilter`]
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AdaptiveConfig {
    /// Value the state starts from (velocity starts at zero)
    pub initial_value: f32,
    /// Diagonal of the initial covariance
    pub initial_covariance: f32,
    /// Measurement variance (R)
    pub measurement_variance: f32,
    /// Residual above which the fast regime is selected
    pub residual_threshold: f32,
    /// Q₀₀ in the fast regime
    pub high_process_noise: f32,
    /// Q₀₀ in the steady regime; also the off-diagonal and velocity terms
    pub low_process_noise: f32,
}

impl Default for AdaptiveConfig {
    fn default() -> Self {
        Self {
            initial_value: 0.0,
            initial_covariance: ADAPTIVE_INITIAL_COVARIANCE,
            measurement_variance: ADAPTIVE_MEASUREMENT_VARIANCE,
            residual_threshold: ADAPTIVE_RESIDUAL_THRESHOLD,
            high_process_noise: ADAPTIVE_HIGH_PROCESS_NOISE,
            low_process_noise: ADAPTIVE_LOW_PROCESS_NOISE,
        }
    }
}

impl AdaptiveConfig {
    /// Start the state at a known value
    pub fn with_initial_value(mut self, value: f32) -> Self {
        self.initial_value = value;
        self
    }

    /// Set measurement variance (R)
    pub fn with_measurement_variance(mut self, variance: f32) -> Self {
        self.measurement_variance = variance;
        self
    }

    /// Set the residual that switches regimes
    pub fn with_residual_threshold(mut self, threshold: f32) -> Self {
        self.residual_threshold = threshold;
        self
    }

    /// Check variances and threshold are finite and positive
    pub fn validate(&self) -> ConfigResult<()> {
        check_variance("initial_covariance", self.initial_covariance)?;
        check_variance("measurement_variance", self.measurement_variance)?;
        check_variance("high_process_noise", self.high_process_noise)?;
        check_variance("low_process_noise", self.low_process_noise)?;
        check_threshold("residual_threshold", self.residual_threshold)
    }
}

/// Noise regime selected by the last residual
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum NoiseRegime {
    /// Small residual: smooth on the model
    Steady,
    /// Large residual: follow the measurements
    Tracking,
}

/// Constant-velocity Kalman filter with two-regime process noise
#[derive(Debug, Clone)]
pub struct AdaptiveKalmanFilter {
    state: Vector<2>,
    covariance: SquareMatrix<2>,
    process_noise: SquareMatrix<2>,
    regime: NoiseRegime,
    config: AdaptiveConfig,
}

impl Default for AdaptiveKalmanFilter {
    fn default() -> Self {
        Self::new(AdaptiveConfig::default())
    }
}

impl AdaptiveKalmanFilter {
    /// Create a filter from its config
    pub fn new(config: AdaptiveConfig) -> Self {
        let mut covariance = identity::<2>();
        for (i, row) in covariance.iter_mut().enumerate() {
            row[i] = config.initial_covariance;
        }
        let q = config.low_process_noise;

        Self {
            state: [config.initial_value, 0.0],
            covariance,
            process_noise: [[q, q], [q, q]],
            regime: NoiseRegime::Steady,
            config,
        }
    }

    /// Create a filter after validating its config
    pub fn try_new(config: AdaptiveConfig) -> ConfigResult<Self> {
        config.validate()?;
        Ok(Self::new(config))
    }

    /// Advance state and covariance one step with the motion model
    pub fn predict(&mut self) {
        let (state, covariance) = Self::propagate(&self.state, &self.covariance, &self.process_noise);
        self.state = state;
        self.covariance = covariance;
    }

    /// Predict, adapt the process noise, then correct with `measurement`.
    ///
    /// Returns the filtered value.
    pub fn update(&mut self, measurement: f32) -> f32 {
        self.predict();

        let residual = libm::fabsf(measurement - self.state[0]);
        self.regime = if residual > self.config.residual_threshold {
            NoiseRegime::Tracking
        } else {
            NoiseRegime::Steady
        };
        self.process_noise[0][0] = match self.regime {
            NoiseRegime::Tracking => self.config.high_process_noise,
            NoiseRegime::Steady => self.config.low_process_noise,
        };

        self.correct(measurement);
        self.state[0]
    }

    /// Forecast the next `steps` values without touching the live state
    pub fn predict_future(&self, steps: usize) -> Vec<f32> {
        let mut state = self.state;
        let mut covariance = self.covariance;
        let mut forecast = Vec::with_capacity(steps);

        for _ in 0..steps {
            let (next_state, next_cov) = Self::propagate(&state, &covariance, &self.process_noise);
            state = next_state;
            covariance = next_cov;
            forecast.push(state[0]);
        }

        forecast
    }

    /// Current value estimate
    pub fn value(&self) -> f32 {
        self.state[0]
    }

    /// Current velocity estimate (change per step)
    pub fn velocity(&self) -> f32 {
        self.state[1]
    }

    /// Current error covariance
    pub fn covariance(&self) -> SquareMatrix<2> {
        self.covariance
    }

    /// Current process-noise matrix
    pub fn process_noise(&self) -> SquareMatrix<2> {
        self.process_noise
    }

    /// Regime chosen on the last update
    pub fn regime(&self) -> NoiseRegime {
        self.regime
    }

    /// Return to the configured initial conditions
    pub fn reset(&mut self) {
        *self = Self::new(self.config);
    }

    fn propagate(
        state: &Vector<2>,
        covariance: &SquareMatrix<2>,
        process_noise: &SquareMatrix<2>,
    ) -> (Vector<2>, SquareMatrix<2>) {
        let next_state = matvec(&TRANSITION, state);
        let fp = multiply(&TRANSITION, covariance);
        let mut next_cov = add(&multiply(&fp, &transpose(&TRANSITION)), process_noise);
        make_symmetric(&mut next_cov);
        (next_state, next_cov)
    }

    fn correct(&mut self, measurement: f32) {
        let r = self.config.measurement_variance;
        let p = self.covariance;

        // H = [1, 0], so H·P·Hᵀ = P₀₀ and P·Hᵀ is the first column of P
        let innovation = measurement - self.state[0];
        let innovation_cov = p[0][0] + r;
        let gain = [p[0][0] / innovation_cov, p[1][0] / innovation_cov];

        self.state[0] += gain[0] * innovation;
        self.state[1] += gain[1] * innovation;

        // Joseph form keeps P positive semi-definite under round-off
        let i_kh: SquareMatrix<2> = [[1.0 - gain[0], 0.0], [-gain[1], 1.0]];
        let mut updated = multiply(&multiply(&i_kh, &p), &transpose(&i_kh));
        for i in 0..2 {
            for j in 0..2 {
                updated[i][j] += gain[i] * r * gain[j];
            }
        }
        make_symmetric(&mut updated);
        self.covariance = updated;
    }
}
