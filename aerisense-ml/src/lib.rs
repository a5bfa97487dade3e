//! Lightweight Anomaly Detection for AeriSense Sensor Sites
//!
//! ## Overview
//!
//! Two independent detectors look at every composed reading:
//!
//! 1. **Safety thresholds**: deterministic limits (over-temperature, vibration,
//!    pressure drop, wind, UV, PM2.5, NO2) that produce human-readable alerts
//!    and precautions.
//! 2. **Isolation Forest**: an unsupervised model trained once on the first
//!    readings a site produces, flagging combinations that look unlike them.
//!
//! The caller combines both; neither suppresses the other.
//!
//! ## Why Isolation Forest?
//!
//! 1. **Unsupervised**: sites never come with labeled faults
//! 2. **Small**: only tree structures are kept after training
//! 3. **Fast Inference**: O(log n) per prediction
//!
//! ## Algorithm Overview
//!
//! The forest isolates points by random axis-aligned cuts:
//! ```text
//! Normal points: need many cuts to isolate
//! Anomalies:     isolated after a few cuts
//!
//! s(x) = 2^(-E[h(x)] / c(ψ))          ψ = per-tree sample size
//! c(n) = 2·(ln(n − 1) + γ) − 2(n − 1)/n
//! ```
//!
//! The decision value reported to callers is `threshold − s(x)`, where the
//! threshold is the score quantile matching the expected contamination
//! (10 % by default) over the training set. Negative values are anomalies.
//!
//! ## Model Lifecycle
//!
//! ```text
//! Collecting (< 50 buffered) ──▶ Trained (fit once, never refit)
//!      │                              │
//!  (false, 0.0)                 (decision < 0, decision)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use aerisense_ml::{AnomalyEngine, FeatureVector};
//!
//! let mut engine = AnomalyEngine::new();
//! let reading = FeatureVector { temperature: 85.0, pressure: 1012.0, ..FeatureVector::default() };
//!
//! let report = engine.evaluate(&reading);
//! assert_eq!(report.alerts.len(), 1);
//! assert!(!report.verdict.is_anomaly); // model still collecting
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]

extern crate alloc;

#[macro_use]
mod logging;

pub mod engine;
pub mod features;
pub mod forest;
pub mod node;
pub mod rng;
pub mod sample;
pub mod scoring;
pub mod thresholds;
pub mod tree;

pub use engine::{AnomalyEngine, AnomalyReport, AnomalyVerdict, ModelState, ModelStatus};
pub use features::{FeatureScaler, FeatureVector, FEATURE_COUNT, FEATURE_NAMES};
pub use forest::{ForestConfig, ForestStats, IsolationForest};
pub use node::{average_path_length, Node, NodeType};
pub use rng::Rng;
pub use sample::{Sample, MAX_FEATURES};
pub use scoring::{calculate_anomaly_score, AnomalyScore};
pub use thresholds::{ThresholdAlerts, ThresholdConfig, ThresholdKey};
pub use tree::{IsolationTree, TreeConfig};

use thiserror_no_std::Error;

/// Readings kept for training; the oldest is evicted beyond this.
pub const BUFFER_CAPACITY: usize = 1000;

/// Buffered readings needed before the forest is trained.
pub const MIN_TRAINING_SAMPLES: usize = 50;

/// Trees per forest.
pub const DEFAULT_NUM_TREES: usize = 100;

/// Upper bound on the per-tree sub-sample.
pub const DEFAULT_SAMPLE_SIZE: usize = 256;

/// Expected share of anomalies in the training data.
pub const DEFAULT_CONTAMINATION: f32 = 0.1;

/// Seed for tree construction; fixed so a site trains reproducibly.
pub const DEFAULT_SEED: u32 = 42;

/// Result type for model and rule operations
pub type MlResult<T> = Result<T, MlError>;

/// Errors raised by the anomaly engine and its model
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum MlError {
    /// Not enough samples to train on
    #[error("need at least {required} samples, got {actual}")]
    InsufficientData {
        /// Minimum accepted
        required: usize,
        /// Provided
        actual: usize,
    },

    /// Feature index outside the sample
    #[error("feature index {index} out of range")]
    InvalidFeature {
        /// Requested index
        index: usize,
    },

    /// Positional input with the wrong number of channels
    #[error("expected {expected} features, got {actual}")]
    FeatureLength {
        /// Channels the consumer expects
        expected: usize,
        /// Channels provided
        actual: usize,
    },

    /// Threshold override naming no known limit
    #[error("unknown threshold name")]
    UnknownThreshold,

    /// Threshold override with an unusable value
    #[error("{name} must be finite and consistent, got {value}")]
    InvalidThreshold {
        /// Limit name, as used in overrides
        name: &'static str,
        /// Rejected value
        value: f32,
    },

    /// Model or scaler tuning that cannot work
    #[error("invalid configuration: {0}")]
    InvalidConfig(&'static str),
}
