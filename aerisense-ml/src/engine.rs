//! Anomaly Engine: learned model plus safety rules
//!
//! ## Overview
//!
//! The engine owns, per site:
//!
//! - a [`FeatureScaler`] mapping readings onto unit ranges
//! - a bounded FIFO of scaled readings (1000, oldest evicted)
//! - the model state, trained once when 50 readings are buffered
//! - the [`ThresholdConfig`] for rule checks
//!
//! ```text
//! reading ──▶ scale ──▶ buffer ──▶ [≥ 50 && untrained] fit once
//!    │                                    │
//!    │                          Trained ──┴──▶ (decision < 0, decision)
//!    │                          Untrained ───▶ (false, 0.0)
//!    │                          Failed ──────▶ (false, 0.0)
//!    ▼
//! thresholds ──▶ (alerts, precautions)
//! ```
//!
//! Training is one-shot: later readings keep the buffer current but never
//! refit the model. A failed fit is recorded and not retried.

use alloc::{collections::VecDeque, string::String, vec::Vec};

use crate::{
    FeatureScaler, FeatureVector, ForestConfig, IsolationForest, MlError, MlResult, Sample, ThresholdAlerts,
    ThresholdConfig, BUFFER_CAPACITY, MIN_TRAINING_SAMPLES,
};

/// Model output for one reading
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AnomalyVerdict {
    /// The model considers the reading anomalous
    pub is_anomaly: bool,
    /// Decision value; negative for anomalies, 0.0 before training
    pub score: f32,
}

/// Lifecycle of the learned model
#[derive(Debug, Clone)]
pub enum ModelState {
    /// Still collecting readings
    Untrained,
    /// Fitted forest
    Trained(IsolationForest),
    /// Fitting failed; the engine stays rules-only
    Failed(MlError),
}

/// Serializable summary of [`ModelState`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "state", rename_all = "snake_case"))]
pub enum ModelStatus {
    /// Waiting for enough readings
    Collecting {
        /// Readings buffered so far
        buffered: usize,
        /// Readings needed to train
        required: usize,
    },
    /// Model is scoring readings
    Trained {
        /// Readings the model was fitted on
        trained_on: usize,
    },
    /// Model could not be fitted
    Failed,
}

/// Combined rule and model result for one reading
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AnomalyReport {
    /// One line per violated limit
    pub alerts: Vec<String>,
    /// Actions for the violated limits
    pub precautions: Vec<String>,
    /// Model output
    pub verdict: AnomalyVerdict,
    /// Model lifecycle after this reading
    pub status: ModelStatus,
}

impl AnomalyReport {
    /// Either detector fired
    pub fn is_alarming(&self) -> bool {
        !self.alerts.is_empty() || self.verdict.is_anomaly
    }
}

/// Per-site anomaly detection
#[derive(Debug, Clone)]
pub struct AnomalyEngine {
    scaler: FeatureScaler,
    thresholds: ThresholdConfig,
    forest_config: ForestConfig,
    buffer: VecDeque<Sample>,
    state: ModelState,
}

impl Default for AnomalyEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl AnomalyEngine {
    /// Engine with the documented scaler, limits and forest settings
    pub fn new() -> Self {
        Self {
            scaler: FeatureScaler::default(),
            thresholds: ThresholdConfig::default(),
            forest_config: ForestConfig::default(),
            buffer: VecDeque::with_capacity(BUFFER_CAPACITY),
            state: ModelState::Untrained,
        }
    }

    /// Use custom scaler bounds
    pub fn with_scaler(mut self, scaler: FeatureScaler) -> Self {
        self.scaler = scaler;
        self
    }

    /// Use custom safety limits
    pub fn with_thresholds(mut self, thresholds: ThresholdConfig) -> Self {
        self.thresholds = thresholds;
        self
    }

    /// Use custom forest settings for the eventual training
    pub fn with_forest_config(mut self, config: ForestConfig) -> MlResult<Self> {
        config.validate()?;
        self.forest_config = config;
        Ok(self)
    }

    /// Scale and buffer a reading, train if due, and score it.
    pub fn update_and_predict(&mut self, reading: &FeatureVector) -> AnomalyVerdict {
        let sample = self.scaler.scale_sample(reading);
        if self.buffer.len() == BUFFER_CAPACITY {
            self.buffer.pop_front();
        }
        self.buffer.push_back(sample);

        if matches!(self.state, ModelState::Untrained) && self.buffer.len() >= MIN_TRAINING_SAMPLES {
            self.train();
        }

        match &self.state {
            ModelState::Trained(forest) => match forest.anomaly_score(&sample) {
                Ok(score) => {
                    let decision = score.decision(forest.threshold());
                    AnomalyVerdict {
                        is_anomaly: decision < 0.0,
                        score: decision,
                    }
                }
                Err(_e) => {
                    log_warn!("scoring failed: {}", _e);
                    AnomalyVerdict::default()
                }
            },
            ModelState::Untrained | ModelState::Failed(_) => AnomalyVerdict::default(),
        }
    }

    fn train(&mut self) {
        let (front, back) = self.buffer.as_slices();
        let mut samples = Vec::with_capacity(self.buffer.len());
        samples.extend_from_slice(front);
        samples.extend_from_slice(back);

        let mut forest = IsolationForest::new(self.forest_config);
        match forest.fit(&samples) {
            Ok(()) => {
                log_info!(
                    "anomaly model trained on {} readings (threshold {:.4})",
                    samples.len(),
                    forest.threshold()
                );
                self.state = ModelState::Trained(forest);
            }
            Err(e) => {
                log_warn!("anomaly model training failed: {}", e);
                self.state = ModelState::Failed(e);
            }
        }
    }

    /// Rule checks only; no buffering
    pub fn check_thresholds(&self, reading: &FeatureVector) -> ThresholdAlerts {
        self.thresholds.check(reading)
    }

    /// Merge named limit overrides; on error the current limits stay.
    pub fn update_config<'a, I>(&mut self, overrides: I) -> MlResult<()>
    where
        I: IntoIterator<Item = (&'a str, f32)>,
    {
        match self.thresholds.merge(overrides) {
            Ok(merged) => {
                log_info!("threshold config updated: {:?}", merged);
                self.thresholds = merged;
                Ok(())
            }
            Err(e) => {
                log_warn!("threshold update rejected: {}", e);
                Err(e)
            }
        }
    }

    /// Run both detectors on one reading
    pub fn evaluate(&mut self, reading: &FeatureVector) -> AnomalyReport {
        let ThresholdAlerts { alerts, precautions } = self.check_thresholds(reading);
        let verdict = self.update_and_predict(reading);
        AnomalyReport {
            alerts,
            precautions,
            verdict,
            status: self.status(),
        }
    }

    /// Where the model is in its lifecycle
    pub fn status(&self) -> ModelStatus {
        match &self.state {
            ModelState::Untrained => ModelStatus::Collecting {
                buffered: self.buffer.len(),
                required: MIN_TRAINING_SAMPLES,
            },
            ModelState::Trained(forest) => ModelStatus::Trained {
                trained_on: forest.stats().num_samples,
            },
            ModelState::Failed(_) => ModelStatus::Failed,
        }
    }

    /// Model state
    pub fn state(&self) -> &ModelState {
        &self.state
    }

    /// Fitted forest, if trained
    pub fn forest(&self) -> Option<&IsolationForest> {
        match &self.state {
            ModelState::Trained(forest) => Some(forest),
            ModelState::Untrained | ModelState::Failed(_) => None,
        }
    }

    /// Readings currently buffered
    pub fn buffered(&self) -> usize {
        self.buffer.len()
    }

    /// Current safety limits
    pub fn thresholds(&self) -> &ThresholdConfig {
        &self.thresholds
    }

    /// Scaler in use
    pub fn scaler(&self) -> &FeatureScaler {
        &self.scaler
    }
}
