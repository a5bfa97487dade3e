//! Small descriptive statistics over `f32` slices.
//!
//! Population moments (divide by `n`) throughout, matching how the outlier
//! gate and the health checks were calibrated.

/// Arithmetic mean, `None` for an empty slice.
pub fn mean(values: &[f32]) -> Option<f32> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f32>() / values.len() as f32)
}

/// Population variance, `None` for an empty slice.
pub fn variance(values: &[f32]) -> Option<f32> {
    let mean = mean(values)?;
    let sum_sq: f32 = values.iter().map(|&v| (v - mean) * (v - mean)).sum();
    Some(sum_sq / values.len() as f32)
}

/// Population standard deviation, `None` for an empty slice.
pub fn std_dev(values: &[f32]) -> Option<f32> {
    variance(values).map(libm::sqrtf)
}

/// Linear-interpolated percentile (`q` in `[0, 100]`) of unsorted values.
///
/// Sorts a scratch copy; NaNs sort last.
pub fn percentile(values: &[f32], q: f32) -> Option<f32> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = alloc::vec::Vec::from(values);
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(core::cmp::Ordering::Greater));

    let rank = (q.clamp(0.0, 100.0) / 100.0) * (sorted.len() - 1) as f32;
    let lower = libm::floorf(rank) as usize;
    let upper = libm::ceilf(rank) as usize;
    let frac = rank - lower as f32;
    Some(sorted[lower] + (sorted[upper] - sorted[lower]) * frac)
}

/// Least-squares line through `(i, values[i])`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearFit {
    /// Change per sample
    pub slope: f32,
    /// Value at index 0
    pub intercept: f32,
}

impl LinearFit {
    /// Evaluate the line at a (possibly fractional or future) index.
    pub fn at(&self, x: f32) -> f32 {
        self.slope * x + self.intercept
    }
}

/// Fit a line over sample indices. Needs at least two points.
pub fn linear_fit(values: &[f32]) -> Option<LinearFit> {
    let n = values.len();
    if n < 2 {
        return None;
    }

    let n_f = n as f32;
    let mut sum_x = 0.0;
    let mut sum_y = 0.0;
    let mut sum_xy = 0.0;
    let mut sum_xx = 0.0;
    for (i, &y) in values.iter().enumerate() {
        let x = i as f32;
        sum_x += x;
        sum_y += y;
        sum_xy += x * y;
        sum_xx += x * x;
    }

    let denom = n_f * sum_xx - sum_x * sum_x;
    if libm::fabsf(denom) < f32::EPSILON {
        return None;
    }
    let slope = (n_f * sum_xy - sum_x * sum_y) / denom;
    let intercept = (sum_y - slope * sum_x) / n_f;
    Some(LinearFit { slope, intercept })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn moments() {
        let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert_eq!(mean(&values), Some(5.0));
        assert_eq!(variance(&values), Some(4.0));
        assert_eq!(std_dev(&values), Some(2.0));
        assert_eq!(mean(&[]), None);
    }

    #[test]
    fn percentile_interpolates() {
        let values = [4.0, 1.0, 3.0, 2.0, 5.0];
        assert_eq!(percentile(&values, 0.0), Some(1.0));
        assert_eq!(percentile(&values, 50.0), Some(3.0));
        assert_eq!(percentile(&values, 100.0), Some(5.0));
        assert!((percentile(&values, 90.0).unwrap() - 4.6).abs() < 1e-5);
    }

    #[test]
    fn line_fit() {
        let fit = linear_fit(&[1.0, 3.0, 5.0, 7.0]).unwrap();
        assert!((fit.slope - 2.0).abs() < 1e-6);
        assert!((fit.intercept - 1.0).abs() < 1e-6);
        assert!((fit.at(5.0) - 11.0).abs() < 1e-5);
        assert!(linear_fit(&[1.0]).is_none());
    }
}
