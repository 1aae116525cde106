//! # Sortbench: scapegoat tree core
//!
//! A benchmarking harness around classic algorithms. The component with real
//! depth is a weight-balanced binary search tree with amortized rebuilding.
//!
//! ## Core Algorithm
//!
//! 1. **Unbalanced insert**: plain BST descent, reporting the depth reached
//! 2. **Depth check**: tolerate depth ≤ ⌈log_{3/2}(n)⌉
//! 3. **Scapegoat walk**: climb until a child outweighs 2/3 of its parent
//! 4. **Rebuild**: flatten that parent's subtree in order, relink it by
//!    midpoint recursion into height ⌈log2(n + 1)⌉
//!
//! Result: height stays O(log n) under any insertion order, with O(log n)
//! amortized insertion cost.
//!
//! ## Usage Example
//!
//! ```
//! use sortbench::ScapegoatTree;
//!
//! let mut tree = ScapegoatTree::new();
//! for key in 1..=20 {
//!     tree.add(key)?;
//! }
//! assert!(tree.rebuilds() > 0);
//! assert!(tree.find(7).is_some());
//! assert!(tree.max_depth() < 20);
//! # Ok::<(), sortbench::TreeError>(())
//! ```

#![warn(missing_docs, missing_debug_implementations)]

pub mod bench;      // Harness contract, data sets, timing
pub mod scapegoat;  // Weight-balanced rebuilding layer
pub mod tree;       // Arena-backed unbalanced BST

// Re-exports for convenience
pub use bench::{Algorithm, BenchConfig, BenchError, DatasetKind, RunReport};
pub use scapegoat::{depth_threshold, ScapegoatTree};
pub use tree::{Node, NodeId, SearchTree, Side};

use thiserror::Error;

/// Key type stored in the trees
pub type Key = i32;

/// Opaque satellite data owned by a node
pub type Payload = Vec<u8>;

/// Errors raised by tree operations
///
/// Lookups and deletes of absent keys are ordinary outcomes (`Option`/`bool`),
/// and depth queries on an empty tree return 0.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    /// Key already present; the tree is unchanged
    #[error("duplicate key {0}")]
    DuplicateKey(Key),

    /// Key required by the operation is absent
    #[error("key {0} not found")]
    KeyNotFound(Key),

    /// Arena cannot address another node
    #[error("node arena full ({capacity} slots)")]
    CapacityExceeded {
        /// Maximum number of addressable slots
        capacity: usize,
    },

    /// Internal consistency check failed
    #[error("invariant violation at {}: {reason}", describe_node(.node))]
    InvariantViolation {
        /// Offending node, if the failure is local to one
        node: Option<NodeId>,
        /// What was inconsistent
        reason: String,
    },
}

impl TreeError {
    /// Helper for constructing invariant failures.
    pub fn violation(node: Option<NodeId>, reason: impl Into<String>) -> Self {
        TreeError::InvariantViolation {
            node,
            reason: reason.into(),
        }
    }
}

fn describe_node(node: &Option<NodeId>) -> String {
    node.map_or_else(|| "tree".to_string(), |id| id.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(TreeError::DuplicateKey(5).to_string(), "duplicate key 5");
        assert_eq!(
            TreeError::violation(None, "size 3 but 2 reachable nodes").to_string(),
            "invariant violation at tree: size 3 but 2 reachable nodes"
        );
        assert_eq!(
            TreeError::violation(Some(NodeId::new(4, 0)), "root has a parent").to_string(),
            "invariant violation at #4: root has a parent"
        );
    }
}
