//! Fixed-capacity feature sample used by the forest.
//!
//! Samples are `Copy` so trees can partition sub-samples in place without
//! touching the heap per node.

use crate::{MlError, MlResult};

/// Largest number of features a sample can hold
pub const MAX_FEATURES: usize = 16;

/// One point in feature space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    features: [f32; MAX_FEATURES],
    len: usize,
}

impl Sample {
    /// Copy `values` into a sample.
    pub fn new(values: &[f32]) -> MlResult<Self> {
        if values.is_empty() || values.len() > MAX_FEATURES {
            return Err(MlError::FeatureLength {
                expected: MAX_FEATURES,
                actual: values.len(),
            });
        }
        let mut features = [0.0; MAX_FEATURES];
        features[..values.len()].copy_from_slice(values);
        Ok(Self { features, len: values.len() })
    }

    /// Number of features
    pub fn len(&self) -> usize {
        self.len
    }

    /// Always false for a constructed sample
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Feature at `index`, if present
    pub fn get_feature(&self, index: usize) -> Option<f32> {
        self.as_slice().get(index).copied()
    }

    /// The populated features
    pub fn as_slice(&self) -> &[f32] {
        &self.features[..self.len]
    }
}

impl<const N: usize> From<[f32; N]> for Sample {
    /// Arrays longer than [`MAX_FEATURES`] are truncated.
    fn from(values: [f32; N]) -> Self {
        let len = N.min(MAX_FEATURES);
        let mut features = [0.0; MAX_FEATURES];
        features[..len].copy_from_slice(&values[..len]);
        Self { features, len }
    }
}
