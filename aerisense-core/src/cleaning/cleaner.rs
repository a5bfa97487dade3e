//! Outlier gate + exponential smoothing for one channel.

use super::outlier::OutlierGate;
use crate::{
    constants::{DEFAULT_SMOOTHING_ALPHA, OUTLIER_WINDOW, OUTLIER_Z_THRESHOLD},
    errors::{ConfigError, ConfigResult},
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Every intermediate value of one cleaning step
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CleanedReading {
    /// Reading as received
    pub raw: f32,
    /// Reading after outlier substitution
    pub cleaned: f32,
    /// Exponential moving average after this reading
    pub smoothed: f32,
    /// Whether the gate rejected the raw reading
    pub is_outlier: bool,
    /// Z-score reported by the gate
    pub z_score: f32,
}

/// Per-channel cleaning pipeline
///
/// An outlier is replaced by the last smoothed value (or kept as-is when there
/// is no smoothed value yet), then everything feeds an EMA:
///
/// ```text
/// smoothed = α·cleaned + (1 − α)·smoothed_prev
/// ```
#[derive(Debug, Clone)]
pub struct SignalCleaner<const N: usize = OUTLIER_WINDOW> {
    gate: OutlierGate<N>,
    alpha: f32,
    smoothed: Option<f32>,
}

impl<const N: usize> Default for SignalCleaner<N> {
    fn default() -> Self {
        Self::with_alpha(DEFAULT_SMOOTHING_ALPHA)
    }
}

impl<const N: usize> SignalCleaner<N> {
    /// Cleaner with a custom smoothing factor and the default gate
    pub fn with_alpha(alpha: f32) -> Self {
        Self {
            gate: OutlierGate::new(OUTLIER_Z_THRESHOLD),
            alpha,
            smoothed: None,
        }
    }

    /// Cleaner from a validated alpha and an existing gate
    pub fn try_new(alpha: f32, gate: OutlierGate<N>) -> ConfigResult<Self> {
        if !(alpha > 0.0 && alpha <= 1.0) {
            return Err(ConfigError::InvalidAlpha { value: alpha });
        }
        Ok(Self {
            gate,
            alpha,
            smoothed: None,
        })
    }

    /// Clean and smooth one reading
    pub fn clean(&mut self, value: f32) -> CleanedReading {
        let (is_outlier, z_score) = self.gate.is_outlier(value);

        let cleaned = if is_outlier {
            self.smoothed.unwrap_or(value)
        } else {
            value
        };

        let smoothed = match self.smoothed {
            Some(prev) => self.alpha * cleaned + (1.0 - self.alpha) * prev,
            None => cleaned,
        };
        self.smoothed = Some(smoothed);

        CleanedReading {
            raw: value,
            cleaned,
            smoothed,
            is_outlier,
            z_score,
        }
    }

    /// Last smoothed value
    pub fn smoothed(&self) -> Option<f32> {
        self.smoothed
    }

    /// Smoothing factor
    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    /// The underlying gate
    pub fn gate(&self) -> &OutlierGate<N> {
        &self.gate
    }

    /// Forget the baseline and the smoothed value
    pub fn reset(&mut self) {
        self.gate.reset();
        self.smoothed = None;
    }
}
