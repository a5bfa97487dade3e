//! Chart-ready split of a report's sub-indices.

use alloc::vec::Vec;

use super::engine::AqiReport;

#[cfg(feature = "serde")]
use serde::Serialize;

/// Parallel label/value/color series, in reporting order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct PollutantBreakdown {
    /// Display names
    pub labels: Vec<&'static str>,
    /// Sub-indices
    pub values: Vec<u16>,
    /// Slice colors
    pub colors: Vec<&'static str>,
}

impl PollutantBreakdown {
    /// Build from a report
    pub fn from_report(report: &AqiReport) -> Self {
        let mut out = Self::default();
        for (pollutant, index) in &report.sub_indices {
            out.labels.push(pollutant.display_name());
            out.values.push(*index);
            out.colors.push(pollutant.chart_color());
        }
        out
    }

    /// Number of pollutants in the chart
    pub fn total_pollutants(&self) -> usize {
        self.labels.len()
    }
}
