//! Raw readings as they arrive from the collectors.

use alloc::string::String;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Milliseconds since the Unix epoch
pub type Timestamp = u64;

/// One reading of one metric from one source
///
/// `value` is `None` when the source answered but had no data for the metric
/// (an API field missing, a sensor read timing out).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Measurement {
    /// Source name, e.g. `esp32`, `openweather`, `openaq`
    pub source: String,
    /// Metric name, e.g. `temperature`, `pm25`
    pub metric: String,
    /// Reading, absent if the source had none
    pub value: Option<f32>,
    /// When the reading was taken
    pub timestamp: Timestamp,
}

impl Measurement {
    /// Build a measurement
    pub fn new(
        source: impl Into<String>,
        metric: impl Into<String>,
        value: Option<f32>,
        timestamp: Timestamp,
    ) -> Self {
        Self {
            source: source.into(),
            metric: metric.into(),
            value,
            timestamp,
        }
    }

    /// The value, if present and finite
    pub fn usable_value(&self) -> Option<f32> {
        self.value.filter(|v| v.is_finite())
    }
}
