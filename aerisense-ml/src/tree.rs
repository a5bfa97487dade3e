//! Isolation tree implementation
//!
//! Trees are built by recursively cutting a sub-sample on a random feature at
//! a random value inside that feature's range, until a point is isolated, the
//! remaining points are identical, or the depth limit is reached.
//!
//! The sub-sample is partitioned in place, so building a tree allocates only
//! its node arena.

use alloc::vec::Vec;

use crate::{MlError, MlResult, Node, NodeType, Rng, Sample};

/// Configuration for isolation tree
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TreeConfig {
    /// Maximum depth of tree
    pub max_depth: u8,
}

impl TreeConfig {
    /// Depth limit `ceil(log2(ψ))` for a sub-sample of size `ψ`.
    ///
    /// Deeper nodes only separate normal points from each other.
    pub fn for_sample_size(sample_size: usize) -> Self {
        let depth = usize::BITS - sample_size.max(2).saturating_sub(1).leading_zeros();
        Self { max_depth: depth as u8 }
    }
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self::for_sample_size(crate::DEFAULT_SAMPLE_SIZE)
    }
}

/// Isolation tree structure
#[derive(Debug, Clone)]
pub struct IsolationTree {
    /// Tree nodes; the root is at index 0
    nodes: Vec<Node>,
    /// Configuration
    config: TreeConfig,
}

impl IsolationTree {
    /// Create an empty tree
    pub fn new(config: TreeConfig) -> Self {
        Self {
            nodes: Vec::new(),
            config,
        }
    }

    /// Build the tree over `samples`, reordering them in the process.
    pub fn fit(&mut self, samples: &mut [Sample], rng: &mut Rng) -> MlResult<()> {
        if samples.is_empty() {
            return Err(MlError::InsufficientData {
                required: 1,
                actual: 0,
            });
        }
        if samples.len() > u16::MAX as usize {
            return Err(MlError::InvalidConfig("tree sub-sample exceeds node index range"));
        }

        self.nodes.clear();
        self.grow(samples, 0, rng);
        Ok(())
    }

    /// Grow the subtree for `samples`, returning its root index.
    fn grow(&mut self, samples: &mut [Sample], depth: u8, rng: &mut Rng) -> u16 {
        let index = self.nodes.len() as u16;
        // Leaf placeholder; replaced below if the node splits
        self.nodes.push(Node::external(samples.len() as u16, depth));

        if depth >= self.config.max_depth || samples.len() <= 1 {
            return index;
        }

        let Some((feature, split_value)) = select_split(samples, rng) else {
            // all samples identical
            return index;
        };

        let mid = partition(samples, feature, split_value);
        if mid == 0 || mid == samples.len() {
            return index;
        }

        let (left_samples, right_samples) = samples.split_at_mut(mid);
        let left = self.grow(left_samples, depth + 1, rng);
        let right = self.grow(right_samples, depth + 1, rng);

        self.nodes[index as usize] = Node::internal(feature as u8, split_value, left, right, depth);
        index
    }

    /// Path length for a sample, including the leaf's `c(size)` adjustment.
    pub fn path_length(&self, sample: &Sample) -> f32 {
        let mut current = match self.nodes.first() {
            Some(root) => root,
            None => return 0.0,
        };

        loop {
            match current.traverse(sample) {
                Some(next) => match self.nodes.get(next as usize) {
                    Some(node) => current = node,
                    None => return current.depth as f32,
                },
                None => return current.path_length(),
            }
        }
    }

    /// Get the number of nodes in the tree
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Deepest node
    pub fn depth(&self) -> usize {
        self.nodes.iter().map(|n| n.depth as usize).max().unwrap_or(0)
    }

    /// Number of leaves
    pub fn leaf_count(&self) -> usize {
        self.nodes.iter().filter(|n| matches!(n.node_type, NodeType::External { .. })).count()
    }

    /// Get configuration
    pub fn config(&self) -> &TreeConfig {
        &self.config
    }
}

/// Random split on a random non-constant feature, `None` if every feature is
/// constant across `samples`.
fn select_split(samples: &[Sample], rng: &mut Rng) -> Option<(usize, f32)> {
    let num_features = samples.first()?.len();

    let mut candidates: [(usize, f32, f32); crate::MAX_FEATURES] = [(0, 0.0, 0.0); crate::MAX_FEATURES];
    let mut count = 0;
    for feature in 0..num_features {
        let (min, max) = feature_range(samples, feature);
        if max > min {
            candidates[count] = (feature, min, max);
            count += 1;
        }
    }

    if count == 0 {
        return None;
    }
    let (feature, min, max) = candidates[rng.next_range(count)];
    Some((feature, rng.next_f32_range(min, max)))
}

/// Min/max of one feature; NaNs are skipped.
fn feature_range(samples: &[Sample], feature: usize) -> (f32, f32) {
    samples
        .iter()
        .filter_map(|s| s.get_feature(feature))
        .filter(|v| !v.is_nan())
        .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), v| (lo.min(v), hi.max(v)))
}

/// Move samples below the split to the front; returns how many there are.
fn partition(samples: &mut [Sample], feature: usize, split_value: f32) -> usize {
    let mut mid = 0;
    for i in 0..samples.len() {
        let below = samples[i]
            .get_feature(feature)
            .map_or(false, |v| v < split_value);
        if below {
            samples.swap(i, mid);
            mid += 1;
        }
    }
    mid
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn create_test_samples() -> Vec<Sample> {
        vec![
            // Normal samples
            Sample::new(&[20.0, 50.0, 1013.0]).unwrap(),
            Sample::new(&[22.0, 55.0, 1012.0]).unwrap(),
            Sample::new(&[21.0, 52.0, 1014.0]).unwrap(),
            Sample::new(&[19.0, 48.0, 1013.0]).unwrap(),
            // Anomaly
            Sample::new(&[35.0, 90.0, 1000.0]).unwrap(),
        ]
    }

    #[test]
    fn test_tree_creation() {
        let tree = IsolationTree::new(TreeConfig::default());
        assert_eq!(tree.node_count(), 0);
        assert_eq!(tree.depth(), 0);
        assert_eq!(tree.config().max_depth, 8);
    }

    #[test]
    fn depth_limit_follows_sample_size() {
        assert_eq!(TreeConfig::for_sample_size(50).max_depth, 6);
        assert_eq!(TreeConfig::for_sample_size(64).max_depth, 6);
        assert_eq!(TreeConfig::for_sample_size(65).max_depth, 7);
        assert_eq!(TreeConfig::for_sample_size(1).max_depth, 1);
    }

    #[test]
    fn test_tree_fit() {
        let mut tree = IsolationTree::new(TreeConfig { max_depth: 5 });
        let mut samples = create_test_samples();
        tree.fit(&mut samples, &mut Rng::new(123)).unwrap();

        assert!(tree.node_count() > 1);
        assert!(tree.depth() <= 5);
        // full binary tree
        assert_eq!(tree.leaf_count(), tree.node_count() - tree.leaf_count() + 1);
    }

    #[test]
    fn children_are_wired_to_their_own_nodes() {
        let mut tree = IsolationTree::new(TreeConfig { max_depth: 8 });
        let mut samples = create_test_samples();
        tree.fit(&mut samples, &mut Rng::new(7)).unwrap();

        for node in &tree.nodes {
            if let NodeType::Internal { left, right, .. } = node.node_type {
                assert_eq!(tree.nodes[left as usize].depth, node.depth + 1);
                assert_eq!(tree.nodes[right as usize].depth, node.depth + 1);
            }
        }
    }

    #[test]
    fn identical_samples_make_a_single_leaf() {
        let mut tree = IsolationTree::new(TreeConfig::default());
        let mut samples = vec![Sample::new(&[1.0, 2.0]).unwrap(); 10];
        tree.fit(&mut samples, &mut Rng::new(1)).unwrap();

        assert_eq!(tree.node_count(), 1);
        let expected = crate::average_path_length(10);
        assert!((tree.path_length(&samples[0]) - expected).abs() < 1e-6);
    }

    #[test]
    fn test_path_length() {
        let mut tree = IsolationTree::new(TreeConfig::default());
        let mut samples = create_test_samples();
        tree.fit(&mut samples, &mut Rng::new(42)).unwrap();

        let normal = Sample::new(&[20.5, 51.0, 1013.0]).unwrap();
        assert!(tree.path_length(&normal) > 0.0);
        assert_eq!(IsolationTree::new(TreeConfig::default()).path_length(&normal), 0.0);
    }

    #[test]
    fn empty_fit_is_rejected() {
        let mut tree = IsolationTree::new(TreeConfig::default());
        assert!(tree.fit(&mut [], &mut Rng::new(1)).is_err());
    }
}
