//! Anomaly score calculation
//!
//! Converts the forest's mean path length into the normalized score
//! `s = 2^(-E[h] / c(ψ))`:
//!
//! ```text
//! s → 1     isolated almost immediately    anomaly
//! s ≈ 0.5   path as long as a random BST   unremarkable
//! s → 0     buried deep in the data        very normal
//! ```

use crate::average_path_length;

/// Anomaly score result
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AnomalyScore {
    /// Normalized score (0.0 = normal, 1.0 = anomaly)
    pub score: f32,
    /// Average path length across trees
    pub avg_path_length: f32,
    /// Number of trees used
    pub num_trees: usize,
}

impl AnomalyScore {
    /// Create a new anomaly score
    pub fn new(score: f32, avg_path_length: f32, num_trees: usize) -> Self {
        Self {
            score,
            avg_path_length,
            num_trees,
        }
    }

    /// Check if score indicates an anomaly
    pub fn is_anomaly(&self, threshold: f32) -> bool {
        self.score > threshold
    }

    /// Signed distance below `threshold`; negative for anomalies.
    pub fn decision(&self, threshold: f32) -> f32 {
        threshold - self.score
    }
}

/// Calculate anomaly score from a mean path length
///
/// `sample_size` is the per-tree sub-sample size the trees were grown on.
pub fn calculate_anomaly_score(avg_path_length: f32, sample_size: usize) -> f32 {
    let expected_path = average_path_length(sample_size);
    if expected_path <= 0.0 {
        return 0.5; // Neutral score
    }

    libm::exp2f(-avg_path_length / expected_path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anomaly_score() {
        let score = AnomalyScore::new(0.7, 3.5, 100);

        assert!(score.is_anomaly(0.6));
        assert!(!score.is_anomaly(0.8));
        assert!((score.decision(0.6) + 0.1).abs() < 1e-6);
        assert!(score.decision(0.8) > 0.0);
    }

    #[test]
    fn test_calculate_anomaly_score() {
        // Short path = anomaly (high score)
        let score1 = calculate_anomaly_score(2.0, 100);
        assert!(score1 > 0.6);

        // Expected path length scores exactly one half
        let expected = average_path_length(100);
        let score2 = calculate_anomaly_score(expected, 100);
        assert!((score2 - 0.5).abs() < 1e-5);

        // Longer than expected = more normal
        let score3 = calculate_anomaly_score(expected * 1.2, 100);
        assert!(score3 < 0.5);

        // Edge cases
        assert_eq!(calculate_anomaly_score(0.0, 0), 0.5);
        assert_eq!(calculate_anomaly_score(0.0, 1), 0.5);
    }
}
