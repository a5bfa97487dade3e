//! Signal estimation core for AeriSense
//!
//! Turns noisy, intermittent readings from a local device and several
//! third-party weather/air-quality feeds into stable, risk-annotated values.
//!
//! Building blocks, leaves first:
//! - [`filters`]: scalar and adaptive (value + velocity) Kalman filters
//! - [`cleaning`]: rolling z-score outlier gate and EMA signal cleaner
//! - [`fusion`]: per-source Kalman smoothing with inverse-variance fusion
//! - [`aqi`]: EPA sub-indices, categories and health guidance
//! - [`diagnostics`]: sensor health, short-term trend and safety index
//!
//! Every component is synchronous and owns its state. Nothing here performs
//! I/O, retries or persistence.
//!
//! ```no_run
//! use aerisense_core::fusion::{MultiSourceFusion, FusionQuality};
//!
//! let mut fusion = MultiSourceFusion::default();
//! let result = fusion.fuse("temperature", [("esp32", Some(28.5)), ("openweather", Some(29.0))]);
//! assert_ne!(result.quality, FusionQuality::Unavailable);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]

extern crate alloc;

#[macro_use]
mod logging;

pub mod aqi;
pub mod cleaning;
pub mod constants;
pub mod diagnostics;
pub mod errors;
pub mod filters;
pub mod fusion;
#[cfg(feature = "std")]
pub mod registry;
pub mod stats;
pub mod window;

// Public API
pub use aqi::{AqiCategory, AqiEngine, AqiReport, HealthRecommendation, Pollutant, PollutantConcentrations};
pub use cleaning::{CleanedReading, OutlierGate, SignalCleaner};
pub use errors::{ConfigError, ConfigResult};
pub use filters::{AdaptiveConfig, AdaptiveKalmanFilter, ScalarKalmanConfig, ScalarKalmanFilter};
pub use fusion::{FusionConfig, FusionQuality, FusionResult, Measurement, MultiSourceFusion};
#[cfg(feature = "std")]
pub use registry::{StreamKey, StreamRegistry};

/// Crate version, as published.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_exists() {
        assert!(!VERSION.is_empty());
    }
}
