//! Isolation tree node implementation
//!
//! Nodes live in a flat arena owned by the tree; children are referenced by
//! index so a whole tree is one allocation.

use crate::Sample;

/// Euler–Mascheroni constant
const EULER_GAMMA: f32 = 0.577_215_7;

/// Node type in the isolation tree
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NodeType {
    /// Internal node with split condition
    Internal {
        /// Feature index to split on
        feature: u8,
        /// Samples with `value < split_value` go left
        split_value: f32,
        /// Left child index
        left: u16,
        /// Right child index
        right: u16,
    },
    /// Leaf node (external)
    External {
        /// Number of training samples that reached this leaf
        size: u16,
    },
}

/// Arena node
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Node {
    /// Node type and data
    pub node_type: NodeType,
    /// Edges from the root
    pub depth: u8,
}

impl Node {
    /// Create an internal node
    pub fn internal(feature: u8, split_value: f32, left: u16, right: u16, depth: u8) -> Self {
        Self {
            node_type: NodeType::Internal {
                feature,
                split_value,
                left,
                right,
            },
            depth,
        }
    }

    /// Create an external (leaf) node
    pub fn external(size: u16, depth: u8) -> Self {
        Self {
            node_type: NodeType::External { size },
            depth,
        }
    }

    /// Check if node is a leaf
    pub fn is_leaf(&self) -> bool {
        matches!(self.node_type, NodeType::External { .. })
    }

    /// Path length credited to a sample ending here.
    ///
    /// A leaf that still holds `n` training samples stands for an unbuilt
    /// subtree, so its expected depth `c(n)` is added.
    pub fn path_length(&self) -> f32 {
        match self.node_type {
            NodeType::External { size } => self.depth as f32 + average_path_length(size as usize),
            NodeType::Internal { .. } => self.depth as f32,
        }
    }

    /// Child index to visit next, `None` on a leaf.
    ///
    /// A feature missing from the sample compares as NaN and goes right.
    pub fn traverse(&self, sample: &Sample) -> Option<u16> {
        match self.node_type {
            NodeType::Internal {
                feature,
                split_value,
                left,
                right,
            } => {
                let value = sample.get_feature(feature as usize).unwrap_or(f32::NAN);
                Some(if value < split_value { left } else { right })
            }
            NodeType::External { .. } => None,
        }
    }
}

/// Average path length of an unsuccessful BST search over `n` points, `c(n)`.
///
/// Normalizes path lengths so scores are comparable across sample sizes.
pub fn average_path_length(n: usize) -> f32 {
    match n {
        0 | 1 => 0.0,
        2 => 1.0,
        _ => {
            let n = n as f32;
            2.0 * (libm::logf(n - 1.0) + EULER_GAMMA) - 2.0 * (n - 1.0) / n
        }
    }
}
