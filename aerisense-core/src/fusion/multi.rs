//! Inverse-variance fusion over per-source Kalman filters.

use alloc::{
    collections::BTreeMap,
    string::{String, ToString},
    vec::Vec,
};

use super::{
    config::FusionConfig,
    measurement::Measurement,
    result::{FusionQuality, FusionResult},
};
use crate::{constants::VARIANCE_FLOOR, errors::ConfigResult, filters::ScalarKalmanFilter};

/// Owns one [`ScalarKalmanFilter`] per `(metric, source)` pair
///
/// Filters are created the first time a source reports a metric, tuned with
/// that source's prior from [`FusionConfig`].
#[derive(Debug, Clone, Default)]
pub struct MultiSourceFusion {
    config: FusionConfig,
    filters: BTreeMap<(String, String), ScalarKalmanFilter>,
}

impl MultiSourceFusion {
    /// Fusion with the given priors
    pub fn new(config: FusionConfig) -> Self {
        Self {
            config,
            filters: BTreeMap::new(),
        }
    }

    /// Fusion after validating the priors
    pub fn try_new(config: FusionConfig) -> ConfigResult<Self> {
        config.validate()?;
        Ok(Self::new(config))
    }

    /// Fuse one metric's readings, one entry per source.
    ///
    /// Absent and non-finite readings are dropped. If a source appears twice
    /// its last reading is used.
    pub fn fuse<'a, I>(&mut self, metric: &str, readings: I) -> FusionResult
    where
        I: IntoIterator<Item = (&'a str, Option<f32>)>,
    {
        let present: BTreeMap<&str, f32> = readings
            .into_iter()
            .filter_map(|(source, value)| value.filter(|v| v.is_finite()).map(|v| (source, v)))
            .collect();

        if present.is_empty() {
            log_debug!("no usable reading for {}", metric);
            return FusionResult::unavailable();
        }

        let mut estimates: Vec<(&str, f32, f32)> = Vec::with_capacity(present.len());
        for (source, value) in present {
            let filter = self.filter_entry(metric, source);
            let (estimate, _) = filter.update(value);
            let variance = filter.variance().max(VARIANCE_FLOOR);
            estimates.push((source, estimate, variance));
        }

        let total_precision: f32 = estimates.iter().map(|(_, _, var)| 1.0 / var).sum();

        let mut value = 0.0;
        let mut weights = BTreeMap::new();
        for (source, estimate, variance) in &estimates {
            let weight = (1.0 / variance) / total_precision;
            value += weight * estimate;
            weights.insert(source.to_string(), weight * 100.0);
        }

        let variance = 1.0 / total_precision;
        let confidence = (1.0 / (1.0 + variance)).clamp(0.0, 1.0);

        FusionResult {
            value: Some(value),
            confidence,
            variance,
            weights,
            quality: FusionQuality::from_confidence(confidence),
        }
    }

    /// Group a batch of measurements by metric and fuse each group
    pub fn fuse_measurements(&mut self, measurements: &[Measurement]) -> BTreeMap<String, FusionResult> {
        let mut grouped: BTreeMap<&str, Vec<(&str, Option<f32>)>> = BTreeMap::new();
        for m in measurements {
            grouped
                .entry(m.metric.as_str())
                .or_default()
                .push((m.source.as_str(), m.usable_value()));
        }

        grouped
            .into_iter()
            .map(|(metric, readings)| (metric.to_string(), self.fuse(metric, readings)))
            .collect()
    }

    /// Fuse every metric of a `metric → source → value` snapshot
    pub fn fuse_environment(
        &mut self,
        snapshot: &BTreeMap<String, BTreeMap<String, Option<f32>>>,
    ) -> BTreeMap<String, FusionResult> {
        snapshot
            .iter()
            .map(|(metric, sources)| {
                let readings = sources.iter().map(|(s, v)| (s.as_str(), *v));
                (metric.clone(), self.fuse(metric, readings))
            })
            .collect()
    }

    /// Filter for one `(metric, source)` pair, if it exists yet
    pub fn filter(&self, metric: &str, source: &str) -> Option<&ScalarKalmanFilter> {
        self.filters.get(&(metric.to_string(), source.to_string()))
    }

    /// Number of live per-source filters
    pub fn filter_count(&self) -> usize {
        self.filters.len()
    }

    /// Active priors
    pub fn config(&self) -> &FusionConfig {
        &self.config
    }

    /// Drop every filter; sources start cold on their next reading
    pub fn reset(&mut self) {
        self.filters.clear();
    }

    /// Drop the filters of one metric
    pub fn reset_metric(&mut self, metric: &str) {
        self.filters.retain(|(m, _), _| m != metric);
    }

    fn filter_entry(&mut self, metric: &str, source: &str) -> &mut ScalarKalmanFilter {
        let config = &self.config;
        self.filters
            .entry((metric.to_string(), source.to_string()))
            .or_insert_with(|| ScalarKalmanFilter::new(config.filter_config(source)))
    }
}
