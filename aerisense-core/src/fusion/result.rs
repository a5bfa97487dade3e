//! Fusion output types.

use alloc::{collections::BTreeMap, string::String};

use crate::constants::{QUALITY_HIGH_CONFIDENCE, QUALITY_MEDIUM_CONFIDENCE};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Coarse trust bucket for a fused value
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum FusionQuality {
    /// Confidence above 0.8
    High,
    /// Confidence above 0.5
    Medium,
    /// Any other available estimate
    Low,
    /// No source produced a value
    Unavailable,
}

impl FusionQuality {
    /// Bucket a confidence in `[0, 1]`
    pub fn from_confidence(confidence: f32) -> Self {
        if confidence > QUALITY_HIGH_CONFIDENCE {
            Self::High
        } else if confidence > QUALITY_MEDIUM_CONFIDENCE {
            Self::Medium
        } else {
            Self::Low
        }
    }

    /// Upper-case label used on the dashboard
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "HIGH",
            Self::Medium => "MEDIUM",
            Self::Low => "LOW",
            Self::Unavailable => "UNAVAILABLE",
        }
    }
}

/// Fused estimate of one metric across sources
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FusionResult {
    /// Fused value, `None` when unavailable
    pub value: Option<f32>,
    /// `1 / (1 + variance)` in `[0, 1]`
    pub confidence: f32,
    /// Fused variance, `+∞` when unavailable
    pub variance: f32,
    /// Per-source weight in percent, summing to 100
    pub weights: BTreeMap<String, f32>,
    /// Trust bucket
    pub quality: FusionQuality,
}

impl FusionResult {
    /// Result for a metric with no usable reading
    pub fn unavailable() -> Self {
        Self {
            value: None,
            confidence: 0.0,
            variance: f32::INFINITY,
            weights: BTreeMap::new(),
            quality: FusionQuality::Unavailable,
        }
    }

    /// Whether a value was produced
    pub fn is_available(&self) -> bool {
        self.value.is_some()
    }
}
