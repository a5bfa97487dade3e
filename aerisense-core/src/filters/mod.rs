//! Kalman Filters for Single-Channel Smoothing and Forecasting
//!
//! ## Overview
//!
//! Two recursive estimators, both small enough to keep one per stream:
//!
//! - [`ScalarKalmanFilter`]: constant-value model for slow channels
//!   (temperature, humidity, particulates). One state, one covariance.
//! - [`AdaptiveKalmanFilter`]: constant-velocity model `[value, velocity]`
//!   whose process noise flips between a steady and a tracking regime based on
//!   the size of the last residual. Also produces unrolled forecasts.
//!
//! ```text
//! reading ──► predict ──► adapt Q (adaptive only) ──► correct ──► estimate
//!                                                                 confidence
//! ```
//!
//! ## Choosing a Tuning
//!
//! - Raise **Q** when the quantity genuinely moves between readings.
//! - Raise **R** when the sensor is noisy.
//! - [`presets`] holds the tunings the deployment uses per metric.
//!
//! ## Usage Example
//!
//! ```rust
//! use aerisense_core::filters::{presets, AdaptiveKalmanFilter, AdaptiveConfig};
//!
//! let mut temp = presets::temperature_filter();
//! let (_value, confidence) = temp.update(24.8);
//! assert_eq!(confidence, 0.5);
//!
//! let mut trend = AdaptiveKalmanFilter::new(AdaptiveConfig::default().with_initial_value(24.8));
//! trend.update(25.1);
//! let next_ten = trend.predict_future(10);
//! assert_eq!(next_ten.len(), 10);
//! ```

pub mod adaptive;
pub mod matrix;
pub mod presets;
pub mod scalar;

pub use adaptive::{AdaptiveConfig, AdaptiveKalmanFilter, NoiseRegime};
pub use scalar::{FilterState, ScalarKalmanConfig, ScalarKalmanFilter};
