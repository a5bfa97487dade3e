//! Local/regional pair fusion
//!
//! A single correction step: the regional feed (weather or air-quality API)
//! acts as the prior, the on-site device as the measurement. No state is kept
//! between calls; the dashboard uses this for a one-shot "local vs regional"
//! comparison card.
//!
//! ```text
//! external ──► prior x₀, P₀
//! local    ──► z          ──► x = x₀ + K·(z − x₀),  K = (P₀+Q)/(P₀+Q+R)
//! ```

use crate::filters::{ScalarKalmanConfig, ScalarKalmanFilter};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Which inputs produced a [`PairFusion`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PairSource {
    /// Both readings were blended
    Fused,
    /// Only one reading was present and is passed through
    SingleSource,
    /// Neither reading was present
    Unavailable,
}

/// Tuning of one pair-fused metric
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PairProfile {
    /// Process variance (Q)
    pub process_variance: f32,
    /// Measurement variance of the local device (R)
    pub measurement_variance: f32,
    /// Prior variance of the regional value (P₀)
    pub prior_covariance: f32,
}

impl PairProfile {
    /// Air temperature: slow, regional feed is a decent prior
    pub const TEMPERATURE: Self = Self {
        process_variance: 0.1,
        measurement_variance: 2.0,
        prior_covariance: 1.0,
    };

    /// Relative humidity
    pub const HUMIDITY: Self = Self {
        process_variance: 0.5,
        measurement_variance: 5.0,
        prior_covariance: 2.0,
    };

    /// PM2.5 varies a lot locally, so the regional prior is weak
    pub const PM25: Self = Self {
        process_variance: 2.0,
        measurement_variance: 10.0,
        prior_covariance: 5.0,
    };

    fn filter_config(&self) -> ScalarKalmanConfig {
        ScalarKalmanConfig::new(self.process_variance, self.measurement_variance)
            .with_initial_covariance(self.prior_covariance)
    }
}

/// Outcome of [`fuse_pair`]
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PairFusion {
    /// On-site reading
    pub local: Option<f32>,
    /// Regional reading
    pub external: Option<f32>,
    /// Blended (or passed-through) value
    pub fused: Option<f32>,
    /// How `fused` was obtained
    pub source: PairSource,
}

/// Blend an on-site reading with a regional one
pub fn fuse_pair(local: Option<f32>, external: Option<f32>, profile: PairProfile) -> PairFusion {
    let local = local.filter(|v| v.is_finite());
    let external = external.filter(|v| v.is_finite());

    let (fused, source) = match (local, external) {
        (Some(z), Some(prior)) => {
            let mut filter = ScalarKalmanFilter::seeded(profile.filter_config(), prior);
            let (value, _) = filter.update(z);
            (Some(value), PairSource::Fused)
        }
        (Some(v), None) | (None, Some(v)) => (Some(v), PairSource::SingleSource),
        (None, None) => (None, PairSource::Unavailable),
    };

    PairFusion {
        local,
        external,
        fused,
        source,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn temperature_pair_follows_single_step() {
        let out = fuse_pair(Some(30.0), Some(28.0), PairProfile::TEMPERATURE);
        // K = 1.1 / 3.1
        let expected = 28.0 + (1.1 / 3.1) * 2.0;
        assert_eq!(out.source, PairSource::Fused);
        assert!((out.fused.unwrap() - expected).abs() < 1e-4);
    }

    #[test]
    fn pm25_leans_toward_local() {
        let out = fuse_pair(Some(80.0), Some(20.0), PairProfile::PM25);
        // K = 7 / 17, more than a third of the gap
        assert!(out.fused.unwrap() > 40.0);
    }

    #[test]
    fn single_and_missing() {
        let only_local = fuse_pair(Some(55.0), None, PairProfile::HUMIDITY);
        assert_eq!(only_local.fused, Some(55.0));
        assert_eq!(only_local.source, PairSource::SingleSource);

        let only_external = fuse_pair(None, Some(61.0), PairProfile::HUMIDITY);
        assert_eq!(only_external.fused, Some(61.0));

        let none = fuse_pair(None, Some(f32::NAN), PairProfile::HUMIDITY);
        assert_eq!(none.fused, None);
        assert_eq!(none.source, PairSource::Unavailable);
    }
}
