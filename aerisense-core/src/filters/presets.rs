//! Per-metric filter tunings used by the field deployment.
//!
//! | Metric      | Q    | R   | Note                                  |
//! |-------------|------|-----|---------------------------------------|
//! | temperature | 0.01 | 0.5 | slow, fairly clean                    |
//! | humidity    | 0.01 | 1.0 | slow, noisier capacitive sensor       |
//! | pm25        | 0.05 | 2.0 | fast-moving, optical counter is noisy |

use super::scalar::{ScalarKalmanConfig, ScalarKalmanFilter};
use crate::{cleaning::SignalCleaner, constants::GAS_SMOOTHING_ALPHA};

/// Tuning for an ambient temperature channel
pub fn temperature_config() -> ScalarKalmanConfig {
    ScalarKalmanConfig::new(0.01, 0.5)
}

/// Tuning for a relative-humidity channel
pub fn humidity_config() -> ScalarKalmanConfig {
    ScalarKalmanConfig::new(0.01, 1.0)
}

/// Tuning for a PM2.5 channel
pub fn pm25_config() -> ScalarKalmanConfig {
    ScalarKalmanConfig::new(0.05, 2.0)
}

/// Fresh temperature filter
pub fn temperature_filter() -> ScalarKalmanFilter {
    ScalarKalmanFilter::new(temperature_config())
}

/// Fresh humidity filter
pub fn humidity_filter() -> ScalarKalmanFilter {
    ScalarKalmanFilter::new(humidity_config())
}

/// Fresh PM2.5 filter
pub fn pm25_filter() -> ScalarKalmanFilter {
    ScalarKalmanFilter::new(pm25_config())
}

/// Cleaner for the raw MQ-135 gas channel, smoothed harder than the default
pub fn gas_cleaner() -> SignalCleaner {
    SignalCleaner::with_alpha(GAS_SMOOTHING_ALPHA)
}

/// Scalar tuning for a metric name, if one is known
pub fn config_for_metric(metric: &str) -> Option<ScalarKalmanConfig> {
    match metric {
        "temp" | "temperature" => Some(temperature_config()),
        "humidity" => Some(humidity_config()),
        "pm25" | "pm2_5" => Some(pm25_config()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn noisier_channels_get_higher_r() {
        assert!(pm25_config().measurement_variance > humidity_config().measurement_variance);
        assert!(humidity_config().measurement_variance > temperature_config().measurement_variance);
        assert!(pm25_config().validate().is_ok());
    }

    #[test]
    fn metric_lookup() {
        assert_eq!(config_for_metric("temp"), Some(temperature_config()));
        assert_eq!(config_for_metric("pm2_5"), Some(pm25_config()));
        assert_eq!(config_for_metric("wind"), None);
    }

    #[test]
    fn gas_cleaner_smooths_with_its_own_alpha() {
        let mut cleaner = gas_cleaner();
        cleaner.clean(100.0);
        let out = cleaner.clean(110.0);
        assert!((out.smoothed - 104.0).abs() < 1e-4);

        let mut temp = temperature_filter();
        assert_eq!(temp.update(21.0), (21.0, 0.5));
        assert!(humidity_filter().update(60.0).0 == 60.0);
        assert!(pm25_filter().update(12.0).0 == 12.0);
    }
}
