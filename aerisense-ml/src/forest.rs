//! Isolation Forest implementation
//!
//! Combines many isolation trees, each grown on its own random sub-sample,
//! and calibrates a decision threshold on the training data:
//!
//! ```text
//! fit(X):
//!     ψ = min(sample_size, |X|)
//!     for t in 0..num_trees: grow tree on ψ points drawn without replacement
//!     threshold = percentile(s(X), 100 · (1 − contamination))
//!
//! decision(x) = threshold − s(x)        < 0 ⇒ anomaly
//! ```

use alloc::vec::Vec;

use aerisense_core::stats;

use crate::{
    calculate_anomaly_score, AnomalyScore, IsolationTree, MlError, MlResult, Rng, Sample, TreeConfig,
    DEFAULT_CONTAMINATION, DEFAULT_NUM_TREES, DEFAULT_SAMPLE_SIZE, DEFAULT_SEED,
};

/// Configuration for Isolation Forest
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ForestConfig {
    /// Number of trees in the forest
    pub num_trees: usize,
    /// Upper bound on the sub-sample each tree is grown on
    pub sample_size: usize,
    /// Expected share of anomalies in the training data, in `(0, 0.5]`
    pub contamination: f32,
    /// Random seed
    pub seed: u32,
}

impl Default for ForestConfig {
    fn default() -> Self {
        Self {
            num_trees: DEFAULT_NUM_TREES,
            sample_size: DEFAULT_SAMPLE_SIZE,
            contamination: DEFAULT_CONTAMINATION,
            seed: DEFAULT_SEED,
        }
    }
}

impl ForestConfig {
    /// Set the number of trees
    pub fn with_num_trees(mut self, num_trees: usize) -> Self {
        self.num_trees = num_trees;
        self
    }

    /// Set the per-tree sub-sample bound
    pub fn with_sample_size(mut self, sample_size: usize) -> Self {
        self.sample_size = sample_size;
        self
    }

    /// Set the expected contamination
    pub fn with_contamination(mut self, contamination: f32) -> Self {
        self.contamination = contamination;
        self
    }

    /// Set the seed
    pub fn with_seed(mut self, seed: u32) -> Self {
        self.seed = seed;
        self
    }

    /// Check the configuration can train a forest
    pub fn validate(&self) -> MlResult<()> {
        if self.num_trees == 0 {
            return Err(MlError::InvalidConfig("num_trees must be at least 1"));
        }
        if self.sample_size < 2 || self.sample_size > u16::MAX as usize {
            return Err(MlError::InvalidConfig("sample_size must be in 2..=65535"));
        }
        if !(self.contamination > 0.0 && self.contamination <= 0.5) {
            return Err(MlError::InvalidConfig("contamination must be in (0, 0.5]"));
        }
        Ok(())
    }
}

/// Isolation Forest for anomaly detection
#[derive(Debug, Clone)]
pub struct IsolationForest {
    /// Individual trees
    trees: Vec<IsolationTree>,
    /// Configuration
    config: ForestConfig,
    /// Sub-sample size the trees were actually grown on
    sample_size: usize,
    /// Feature count seen during training
    num_features: usize,
    /// Number of samples used for training
    num_samples: usize,
    /// Score above which a sample is an anomaly
    threshold: f32,
}

impl IsolationForest {
    /// Create an untrained forest
    pub fn new(config: ForestConfig) -> Self {
        Self {
            trees: Vec::new(),
            config,
            sample_size: 0,
            num_features: 0,
            num_samples: 0,
            threshold: 0.5,
        }
    }

    /// Train the forest on samples and calibrate the threshold.
    ///
    /// Refitting discards the previous trees.
    pub fn fit(&mut self, samples: &[Sample]) -> MlResult<()> {
        self.config.validate()?;
        if samples.len() < 2 {
            return Err(MlError::InsufficientData {
                required: 2,
                actual: samples.len(),
            });
        }

        let num_features = samples[0].len();
        if let Some(bad) = samples.iter().find(|s| s.len() != num_features) {
            return Err(MlError::FeatureLength {
                expected: num_features,
                actual: bad.len(),
            });
        }

        let mut rng = Rng::new(self.config.seed);
        let sample_size = self.config.sample_size.min(samples.len());
        let tree_config = TreeConfig::for_sample_size(sample_size);

        let mut trees = Vec::with_capacity(self.config.num_trees);
        let mut scratch: Vec<Sample> = samples.to_vec();
        for _ in 0..self.config.num_trees {
            draw_without_replacement(&mut scratch, sample_size, &mut rng);
            let mut tree = IsolationTree::new(tree_config);
            tree.fit(&mut scratch[..sample_size], &mut rng)?;
            trees.push(tree);
        }

        self.trees = trees;
        self.sample_size = sample_size;
        self.num_features = num_features;
        self.num_samples = samples.len();

        let scores: Vec<f32> = samples.iter().map(|s| self.raw_score(s).score).collect();
        let quantile = 100.0 * (1.0 - self.config.contamination);
        self.threshold = stats::percentile(&scores, quantile).unwrap_or(0.5);

        log_debug!(
            "isolation forest fit: {} trees on {} samples (psi={}), threshold={:.4}",
            self.trees.len(),
            self.num_samples,
            self.sample_size,
            self.threshold
        );
        Ok(())
    }

    /// Whether [`fit`](Self::fit) has succeeded
    pub fn is_fitted(&self) -> bool {
        !self.trees.is_empty()
    }

    /// Calculate anomaly score for a sample
    pub fn anomaly_score(&self, sample: &Sample) -> MlResult<AnomalyScore> {
        if !self.is_fitted() {
            return Err(MlError::InsufficientData {
                required: 2,
                actual: self.num_samples,
            });
        }
        if sample.len() != self.num_features {
            return Err(MlError::FeatureLength {
                expected: self.num_features,
                actual: sample.len(),
            });
        }
        Ok(self.raw_score(sample))
    }

    fn raw_score(&self, sample: &Sample) -> AnomalyScore {
        let total: f32 = self.trees.iter().map(|tree| tree.path_length(sample)).sum();
        let avg_path_length = total / self.trees.len() as f32;
        let score = calculate_anomaly_score(avg_path_length, self.sample_size);
        AnomalyScore::new(score, avg_path_length, self.trees.len())
    }

    /// Signed decision value `threshold − score`; negative for anomalies.
    pub fn decision_function(&self, sample: &Sample) -> MlResult<f32> {
        Ok(self.anomaly_score(sample)?.decision(self.threshold))
    }

    /// Check if a sample is an anomaly
    pub fn is_anomaly(&self, sample: &Sample) -> MlResult<bool> {
        Ok(self.decision_function(sample)? < 0.0)
    }

    /// Scores for many samples
    pub fn predict(&self, samples: &[Sample]) -> MlResult<Vec<AnomalyScore>> {
        samples.iter().map(|s| self.anomaly_score(s)).collect()
    }

    /// Calibrated score threshold
    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    /// Get configuration
    pub fn config(&self) -> &ForestConfig {
        &self.config
    }

    /// Get forest statistics
    pub fn stats(&self) -> ForestStats {
        ForestStats {
            num_trees: self.trees.len(),
            total_nodes: self.trees.iter().map(|t| t.node_count()).sum(),
            max_depth: self.trees.iter().map(|t| t.depth()).max().unwrap_or(0),
            num_samples: self.num_samples,
            sample_size: self.sample_size,
            threshold: self.threshold,
        }
    }
}

/// Partial Fisher-Yates: move `k` random elements to the front.
fn draw_without_replacement(samples: &mut [Sample], k: usize, rng: &mut Rng) {
    let n = samples.len();
    for i in 0..k.min(n) {
        let j = i + rng.next_range(n - i);
        samples.swap(i, j);
    }
}

/// Forest statistics
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ForestStats {
    /// Number of trees
    pub num_trees: usize,
    /// Total nodes across all trees
    pub total_nodes: usize,
    /// Maximum tree depth
    pub max_depth: usize,
    /// Number of training samples
    pub num_samples: usize,
    /// Per-tree sub-sample size
    pub sample_size: usize,
    /// Anomaly threshold
    pub threshold: f32,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_data() -> Vec<Sample> {
        let mut samples = Vec::new();

        // Normal data cluster
        for i in 0..40 {
            let temp = 20.0 + (i % 8) as f32 * 0.25;
            let humidity = 50.0 + (i / 8) as f32 * 0.5;
            samples.push(Sample::new(&[temp, humidity]).unwrap());
        }

        // Anomalies
        samples.push(Sample::new(&[35.0, 90.0]).unwrap());
        samples.push(Sample::new(&[5.0, 20.0]).unwrap());

        samples
    }

    #[test]
    fn test_forest_creation() {
        let forest = IsolationForest::new(ForestConfig::default());
        assert!(!forest.is_fitted());
        assert_eq!(forest.stats().num_trees, 0);
        assert!(forest.anomaly_score(&Sample::new(&[1.0]).unwrap()).is_err());
    }

    #[test]
    fn test_forest_fit() {
        let mut forest = IsolationForest::new(ForestConfig::default().with_num_trees(20));
        forest.fit(&create_test_data()).unwrap();

        let stats = forest.stats();
        assert_eq!(stats.num_trees, 20);
        assert_eq!(stats.sample_size, 42);
        assert!(stats.total_nodes > 20);
        assert!(stats.max_depth <= 6);
    }

    #[test]
    fn test_anomaly_detection() {
        let mut forest = IsolationForest::new(ForestConfig::default());
        let samples = create_test_data();
        forest.fit(&samples).unwrap();

        let normal = Sample::new(&[20.9, 51.0]).unwrap();
        let outlier = Sample::new(&[35.0, 90.0]).unwrap();

        let normal_score = forest.anomaly_score(&normal).unwrap();
        let outlier_score = forest.anomaly_score(&outlier).unwrap();
        assert!(outlier_score.score > normal_score.score);
        assert!(forest.is_anomaly(&outlier).unwrap());
        assert!(!forest.is_anomaly(&normal).unwrap());
        assert!(forest.decision_function(&outlier).unwrap() < 0.0);
    }

    #[test]
    fn same_seed_same_model() {
        let samples = create_test_data();
        let mut a = IsolationForest::new(ForestConfig::default());
        let mut b = IsolationForest::new(ForestConfig::default());
        a.fit(&samples).unwrap();
        b.fit(&samples).unwrap();
        assert_eq!(a.threshold(), b.threshold());
        assert_eq!(a.predict(&samples).unwrap(), b.predict(&samples).unwrap());
    }

    #[test]
    fn feature_count_is_locked_at_training() {
        let mut forest = IsolationForest::new(ForestConfig::default());
        forest.fit(&create_test_data()).unwrap();
        assert_eq!(
            forest.anomaly_score(&Sample::new(&[1.0, 2.0, 3.0]).unwrap()),
            Err(MlError::FeatureLength { expected: 2, actual: 3 })
        );
    }

    #[test]
    fn rejects_bad_input() {
        let mut forest = IsolationForest::new(ForestConfig::default());
        assert!(matches!(
            forest.fit(&[Sample::new(&[1.0]).unwrap()]),
            Err(MlError::InsufficientData { .. })
        ));

        let mixed = [Sample::new(&[1.0]).unwrap(), Sample::new(&[1.0, 2.0]).unwrap()];
        assert!(matches!(forest.fit(&mixed), Err(MlError::FeatureLength { .. })));

        let mut bad = IsolationForest::new(ForestConfig::default().with_contamination(0.0));
        assert!(matches!(bad.fit(&create_test_data()), Err(MlError::InvalidConfig(_))));
    }
}
