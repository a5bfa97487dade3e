//! Error Types for Filter and Engine Configuration
//!
//! ## Design Philosophy
//!
//! The estimation components themselves are total: a missing reading, a flat
//! signal or a cold start each produce a defined result rather than an error.
//! The only thing that can be *wrong* is how a component was tuned, so the
//! error surface is confined to construction time.
//!
//! 1. **Small Size**: variants carry a `&'static str` parameter name and the
//!    offending value, nothing heap-allocated.
//! 2. **Copy Semantics**: errors are `Copy` so they can be returned from
//!    builders without ceremony.
//! 3. **Actionable**: the parameter name says which knob to fix.
//!
//! ## Example
//!
//! ```rust
//! use aerisense_core::{ScalarKalmanConfig, ConfigError};
//!
//! let config = ScalarKalmanConfig::default().with_measurement_variance(-1.0);
//! match config.validate() {
//!     Err(ConfigError::InvalidVariance { name, .. }) => assert_eq!(name, "measurement_variance"),
//!     other => panic!("unexpected: {:?}", other),
//! }
//! ```

use thiserror_no_std::Error;

/// Result type for configuration checks
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Invalid tuning parameters
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum ConfigError {
    /// A variance must be finite and strictly positive
    #[error("{name} must be finite and > 0, got {value}")]
    InvalidVariance {
        /// Parameter name
        name: &'static str,
        /// Rejected value
        value: f32,
    },

    /// Smoothing factor outside (0, 1]
    #[error("smoothing factor must be in (0, 1], got {value}")]
    InvalidAlpha {
        /// Rejected value
        value: f32,
    },

    /// Threshold must be finite and strictly positive
    #[error("{name} must be finite and > 0, got {value}")]
    InvalidThreshold {
        /// Parameter name
        name: &'static str,
        /// Rejected value
        value: f32,
    },

    /// Window or sample count that cannot hold any data
    #[error("{name} must hold at least {min} samples, got {value}")]
    InvalidWindow {
        /// Parameter name
        name: &'static str,
        /// Smallest accepted value
        min: usize,
        /// Rejected value
        value: usize,
    },
}

/// Reject non-finite or non-positive variances.
pub(crate) fn check_variance(name: &'static str, value: f32) -> ConfigResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidVariance { name, value })
    }
}

/// Reject non-finite or non-positive thresholds.
pub(crate) fn check_threshold(name: &'static str, value: f32) -> ConfigResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidThreshold { name, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn variance_checks() {
        assert!(check_variance("q", 0.01).is_ok());
        assert_eq!(
            check_variance("q", 0.0),
            Err(ConfigError::InvalidVariance { name: "q", value: 0.0 })
        );
        assert!(check_variance("q", f32::NAN).is_err());
        assert!(check_variance("q", f32::INFINITY).is_err());
    }

    #[test]
    fn threshold_checks() {
        assert!(check_threshold("z", 3.0).is_ok());
        assert!(check_threshold("z", -3.0).is_err());
    }
}
