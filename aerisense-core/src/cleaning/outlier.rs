//! Rolling z-score outlier gate
//!
//! Keeps a window of *accepted* readings and rejects a new reading whose
//! distance from the window mean exceeds `threshold` standard deviations.
//! Rejected readings never enter the window, so a burst of spikes cannot drag
//! the baseline toward itself.
//!
//! Cold start: until the window holds [`OUTLIER_MIN_BASELINE`] readings every
//! value is admitted with a z-score of 0. A flat baseline (std ≈ 0) is treated
//! the same way rather than dividing by zero.

use crate::{
    constants::{OUTLIER_MIN_BASELINE, OUTLIER_WINDOW, OUTLIER_Z_THRESHOLD, STD_EPSILON},
    errors::{check_threshold, ConfigError, ConfigResult},
    window::RollingWindow,
};

/// Z-score outlier detector over the last `N` accepted readings
#[derive(Debug, Clone)]
pub struct OutlierGate<const N: usize = OUTLIER_WINDOW> {
    window: RollingWindow<N>,
    threshold: f32,
    min_baseline: usize,
}

impl<const N: usize> Default for OutlierGate<N> {
    fn default() -> Self {
        Self::new(OUTLIER_Z_THRESHOLD)
    }
}

impl<const N: usize> OutlierGate<N> {
    /// Gate with the given z-score threshold and the default baseline size
    pub fn new(threshold: f32) -> Self {
        Self {
            window: RollingWindow::new(),
            threshold,
            min_baseline: OUTLIER_MIN_BASELINE.min(N),
        }
    }

    /// Gate with a validated threshold and baseline size
    pub fn try_new(threshold: f32, min_baseline: usize) -> ConfigResult<Self> {
        check_threshold("z_threshold", threshold)?;
        if N == 0 {
            return Err(ConfigError::InvalidWindow { name: "window", min: 1, value: N });
        }
        if min_baseline < 2 || min_baseline > N {
            return Err(ConfigError::InvalidWindow {
                name: "min_baseline",
                min: 2,
                value: min_baseline,
            });
        }
        Ok(Self {
            window: RollingWindow::new(),
            threshold,
            min_baseline,
        })
    }

    /// Check a reading, returning `(is_outlier, z_score)`.
    ///
    /// Non-outliers are admitted to the baseline window.
    pub fn is_outlier(&mut self, value: f32) -> (bool, f32) {
        if self.window.len() < self.min_baseline {
            self.window.push(value);
            return (false, 0.0);
        }

        let (mean, std) = match (self.window.mean(), self.window.std_dev()) {
            (Some(mean), Some(std)) => (mean, std),
            _ => {
                self.window.push(value);
                return (false, 0.0);
            }
        };

        if std < STD_EPSILON {
            self.window.push(value);
            return (false, 0.0);
        }

        let z_score = libm::fabsf(value - mean) / std;
        let is_outlier = z_score > self.threshold;

        if is_outlier {
            log_debug!("outlier rejected: value={} mean={} z={}", value, mean, z_score);
        } else {
            self.window.push(value);
        }

        (is_outlier, z_score)
    }

    /// The reading if it passes the gate, `None` if it is an outlier
    pub fn clean(&mut self, value: f32) -> Option<f32> {
        let (is_outlier, _) = self.is_outlier(value);
        if is_outlier {
            None
        } else {
            Some(value)
        }
    }

    /// Accepted baseline, oldest first
    pub fn baseline(&self) -> impl Iterator<Item = f32> + '_ {
        self.window.iter()
    }

    /// Number of accepted readings in the window
    pub fn baseline_len(&self) -> usize {
        self.window.len()
    }

    /// Z-score threshold
    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    /// Forget the baseline
    pub fn reset(&mut self) {
        self.window.clear();
    }
}
