//! Per-source trust priors for [`MultiSourceFusion`](super::MultiSourceFusion).

use alloc::{collections::BTreeMap, string::String};

use crate::{
    constants::{
        DEFAULT_MEASUREMENT_VARIANCE, DEFAULT_PROCESS_VARIANCE, ESP32_MEASUREMENT_VARIANCE,
        INITIAL_ERROR_COVARIANCE, OPENAQ_MEASUREMENT_VARIANCE, OPENWEATHER_MEASUREMENT_VARIANCE,
    },
    errors::{check_variance, ConfigResult},
    filters::ScalarKalmanConfig,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Fusion tuning
///
/// Each source gets its own measurement variance (R). A higher R means the
/// source has a noisier history and earns a smaller share of the fused value
/// once its filter has settled.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FusionConfig {
    /// Process variance (Q) shared by every per-source filter
    pub process_variance: f32,
    /// R for sources without an explicit prior
    pub default_measurement_variance: f32,
    /// R per known source
    pub source_variances: BTreeMap<String, f32>,
}

impl Default for FusionConfig {
    fn default() -> Self {
        let mut source_variances = BTreeMap::new();
        source_variances.insert(String::from("esp32"), ESP32_MEASUREMENT_VARIANCE);
        source_variances.insert(String::from("openweather"), OPENWEATHER_MEASUREMENT_VARIANCE);
        source_variances.insert(String::from("openaq"), OPENAQ_MEASUREMENT_VARIANCE);

        Self {
            process_variance: DEFAULT_PROCESS_VARIANCE,
            default_measurement_variance: DEFAULT_MEASUREMENT_VARIANCE,
            source_variances,
        }
    }
}

impl FusionConfig {
    /// Config with no source priors at all
    pub fn uniform(process_variance: f32, measurement_variance: f32) -> Self {
        Self {
            process_variance,
            default_measurement_variance: measurement_variance,
            source_variances: BTreeMap::new(),
        }
    }

    /// Add or replace one source's prior
    pub fn with_source(mut self, source: impl Into<String>, measurement_variance: f32) -> Self {
        self.source_variances.insert(source.into(), measurement_variance);
        self
    }

    /// Set the shared process variance
    pub fn with_process_variance(mut self, variance: f32) -> Self {
        self.process_variance = variance;
        self
    }

    /// Measurement variance used for `source`
    pub fn measurement_variance(&self, source: &str) -> f32 {
        self.source_variances
            .get(source)
            .copied()
            .unwrap_or(self.default_measurement_variance)
    }

    /// Scalar filter tuning for a fresh `source` filter
    pub fn filter_config(&self, source: &str) -> ScalarKalmanConfig {
        ScalarKalmanConfig {
            process_variance: self.process_variance,
            measurement_variance: self.measurement_variance(source),
            initial_covariance: INITIAL_ERROR_COVARIANCE,
        }
    }

    /// Check every variance is finite and positive
    pub fn validate(&self) -> ConfigResult<()> {
        check_variance("process_variance", self.process_variance)?;
        check_variance("default_measurement_variance", self.default_measurement_variance)?;
        for variance in self.source_variances.values() {
            check_variance("source_variance", *variance)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_and_unknown_sources() {
        let config = FusionConfig::default();
        assert_eq!(config.measurement_variance("esp32"), 0.8);
        assert_eq!(config.measurement_variance("openweather"), 0.3);
        assert_eq!(config.measurement_variance("openaq"), 0.5);
        assert_eq!(config.measurement_variance("thingspeak"), 0.1);
        assert_eq!(config.filter_config("esp32").process_variance, 0.01);
    }

    #[test]
    fn validation_catches_bad_source_prior() {
        assert!(FusionConfig::default().validate().is_ok());
        assert!(FusionConfig::default().with_source("waqi", 0.0).validate().is_err());
        assert!(FusionConfig::uniform(0.01, 0.1).with_process_variance(-1.0).validate().is_err());
    }
}
