//! Scapegoat tree: weight-balanced BST with amortized rebuilding
//!
//! Insertion goes through the unbalanced [`SearchTree`]. When the reported
//! depth exceeds ⌈log_{3/2}(size)⌉ the walk climbs from the new node's
//! parent until it meets a child carrying more than 2/3 of its parent's
//! weight; that parent (the scapegoat) has its subtree rebuilt.

mod rebuild;

use tracing::{debug, trace};

use crate::tree::{Node, NodeId, SearchTree};
use crate::{Key, Payload, TreeError};

/// `1 / ln(3/2)`: converts a natural log into a log base 3/2.
pub const LOG_THREE_HALVES_RECIPROCAL: f64 = 2.466_303_462_376_431_7;

/// Maximum insertion depth tolerated at `size` nodes: ⌈log_{3/2}(size)⌉.
///
/// Sizes 0 and 1 yield 0.
pub fn depth_threshold(size: usize) -> usize {
    if size <= 1 {
        return 0;
    }
    (LOG_THREE_HALVES_RECIPROCAL * (size as f64).ln()).ceil() as usize
}

/// Scapegoat tree built on top of [`SearchTree`]
#[derive(Debug, Clone, Default)]
pub struct ScapegoatTree {
    tree: SearchTree,

    /// Rebalances fired so far
    rebuilds: usize,
}

impl ScapegoatTree {
    /// Create empty tree
    pub fn new() -> Self {
        Self::default()
    }

    /// Create empty tree with arena room for `capacity` nodes
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            tree: SearchTree::with_capacity(capacity),
            rebuilds: 0,
        }
    }

    /// Underlying search tree
    pub fn as_search_tree(&self) -> &SearchTree {
        &self.tree
    }

    /// Unwrap into the underlying search tree
    pub fn into_search_tree(self) -> SearchTree {
        self.tree
    }

    /// Add `key` without payload.
    pub fn add(&mut self, key: Key) -> Result<NodeId, TreeError> {
        self.add_with(key, None)
    }

    /// Add `key` with `payload`, rebuilding a scapegoat subtree if the
    /// insertion landed too deep.
    ///
    /// The returned handle stays valid through the rebuild.
    pub fn add_with(&mut self, key: Key, payload: Option<Payload>) -> Result<NodeId, TreeError> {
        let (id, depth) = self.tree.insert_with(key, payload)?;

        let threshold = depth_threshold(self.tree.size());
        if depth > threshold {
            trace!(key, depth, threshold, "insertion exceeded depth threshold");
            if let Some(scapegoat) = self.find_scapegoat(id) {
                let weight = self.rebalance(scapegoat);
                debug!(
                    key,
                    scapegoat = self.tree.slot(scapegoat).key(),
                    depth,
                    threshold,
                    weight,
                    rebuilds = self.rebuilds,
                    "rebuilt scapegoat subtree"
                );
            }
        }

        Ok(id)
    }

    /// Climb from the inserted node's parent to the first ancestor whose
    /// parent is not 2/3-weight-balanced; that parent is the scapegoat.
    ///
    /// `None` when the walk reaches the root.
    fn find_scapegoat(&self, inserted: NodeId) -> Option<NodeId> {
        let mut walk = self.tree.slot(inserted).parent?;
        let mut walk_weight = self.tree.weight(Some(walk));

        loop {
            let (parent, side) = self.tree.attachment(walk)?;
            let sibling = self.tree.slot(parent).child(side.flip());
            let parent_weight = walk_weight + 1 + self.tree.weight(sibling);

            if 3 * walk_weight > 2 * parent_weight {
                return Some(parent);
            }
            walk = parent;
            walk_weight = parent_weight;
        }
    }

    /// Rebuild the subtree at `scapegoat` into a perfectly balanced one.
    ///
    /// Returns the number of nodes rebuilt (0 for a stale handle).
    pub fn rebalance(&mut self, scapegoat: NodeId) -> usize {
        let Some((root, rebuilt)) = rebuild::rebuild_subtree(&mut self.tree, scapegoat) else {
            return 0;
        };
        self.rebuilds += 1;
        if cfg!(debug_assertions) {
            self.assert_balanced(root, rebuilt);
        }
        rebuilt
    }

    /// Rebalance the whole tree from its root.
    pub fn rebuild_all(&mut self) -> usize {
        match self.tree.root() {
            Some(root) => self.rebalance(root),
            None => 0,
        }
    }

    fn assert_balanced(&self, root: NodeId, rebuilt: usize) {
        let checked = self.tree.validate_subtree(root, None, None);
        debug_assert_eq!(checked.as_ref().ok(), Some(&rebuilt), "{:?}", checked);
        debug_assert!(
            self.tree.subtree_height(Some(root)) <= ceil_log2(rebuilt + 1),
            "rebuilt subtree is not height balanced"
        );
    }

    /// Number of rebalances fired so far
    pub fn rebuilds(&self) -> usize {
        self.rebuilds
    }

    /// Locate the node holding `key`.
    pub fn find(&self, key: Key) -> Option<NodeId> {
        self.tree.find(key)
    }

    /// Membership test
    pub fn contains(&self, key: Key) -> bool {
        self.tree.contains(key)
    }

    /// Resolve a handle; `None` if the node has been deleted.
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.tree.node(id)
    }

    /// Node currently holding `key`
    pub fn get(&self, key: Key) -> Option<&Node> {
        self.tree.get(key)
    }

    /// Payload stored with `key`
    pub fn payload(&self, key: Key) -> Option<&Payload> {
        self.tree.payload(key)
    }

    /// Replace the payload stored with `key`, returning the previous one.
    pub fn set_payload(
        &mut self,
        key: Key,
        payload: Option<Payload>,
    ) -> Result<Option<Payload>, TreeError> {
        self.tree.set_payload(key, payload)
    }

    /// Remove `key`; `false` if absent. Deletion does not rebalance.
    pub fn delete(&mut self, key: Key) -> bool {
        self.tree.delete(key)
    }

    /// Edges on the longest root-to-leaf path
    pub fn max_depth(&self) -> usize {
        self.tree.max_depth()
    }

    /// Levels on the longest root-to-leaf path
    pub fn height(&self) -> usize {
        self.tree.height()
    }

    /// Number of live nodes
    pub fn size(&self) -> usize {
        self.tree.size()
    }

    /// True when the tree holds no keys
    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Root node handle
    pub fn root(&self) -> Option<NodeId> {
        self.tree.root()
    }

    /// All keys in ascending order
    pub fn keys(&self) -> Vec<Key> {
        self.tree.keys()
    }

    /// Number of nodes in the subtree at `from`
    pub fn weight(&self, from: Option<NodeId>) -> usize {
        self.tree.weight(from)
    }

    /// Pre-order diagnostic dump
    pub fn dump(&self) -> String {
        self.tree.dump()
    }

    /// Check the search-tree invariants.
    pub fn validate(&self) -> Result<(), TreeError> {
        self.tree.validate()
    }

    /// Remove every node.
    pub fn clear(&mut self) {
        self.tree.clear();
        self.rebuilds = 0;
    }
}

impl From<SearchTree> for ScapegoatTree {
    fn from(tree: SearchTree) -> Self {
        Self { tree, rebuilds: 0 }
    }
}

impl std::fmt::Display for ScapegoatTree {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.tree, f)
    }
}

fn ceil_log2(n: usize) -> usize {
    (usize::BITS - (n - 1).leading_zeros()) as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_values() {
        assert_eq!(depth_threshold(0), 0);
        assert_eq!(depth_threshold(1), 0);
        assert_eq!(depth_threshold(2), 2);
        assert_eq!(depth_threshold(8), 6);
        assert_eq!(depth_threshold(20), 8);
        assert_eq!(depth_threshold(1000), 18);
    }

    #[test]
    fn test_no_rebuild_for_bushy_inserts() {
        let mut tree = ScapegoatTree::new();
        for key in [50, 25, 75, 10, 30, 60, 80, 5] {
            tree.add(key).unwrap();
        }
        assert_eq!(tree.rebuilds(), 0);
        assert_eq!(tree.max_depth(), 3);
    }

    #[test]
    fn test_ascending_inserts_trigger_rebuilds() {
        let mut tree = ScapegoatTree::new();
        for key in 1..=20 {
            tree.add(key).unwrap();
        }
        assert!(tree.rebuilds() >= 1);
        assert!(tree.height() <= depth_threshold(20));
        tree.validate().unwrap();
    }

    #[test]
    fn test_handle_survives_rebuild() {
        let mut tree = ScapegoatTree::new();
        let handles: Vec<_> = (1..=50).map(|k| (k, tree.add(k).unwrap())).collect();

        assert!(tree.rebuilds() > 0);
        for (key, id) in handles {
            assert_eq!(tree.node(id).map(Node::key), Some(key));
        }
    }

    #[test]
    fn test_rebalance_ignores_recycled_handle() {
        let mut tree = ScapegoatTree::new();
        for key in [2, 1, 3] {
            tree.add(key).unwrap();
        }
        let one = tree.find(1).unwrap();
        assert!(tree.delete(1));
        let ninety_nine = tree.add(99).unwrap();
        assert_eq!(ninety_nine.index(), one.index());

        assert!(tree.node(one).is_none());
        assert_eq!(tree.rebalance(one), 0);
        assert_eq!(tree.rebuilds(), 0);
        assert_eq!(tree.keys(), vec![2, 3, 99]);
    }

    #[test]
    fn test_rebuild_all() {
        let mut tree = ScapegoatTree::from({
            let mut chain = SearchTree::new();
            for key in 1..=15 {
                chain.insert(key).unwrap();
            }
            chain
        });
        assert_eq!(tree.height(), 15);

        assert_eq!(tree.rebuild_all(), 15);
        assert_eq!(tree.height(), 4);
        assert_eq!(tree.rebuilds(), 1);
        assert_eq!(ScapegoatTree::new().rebuild_all(), 0);
    }

    #[test]
    fn test_ceil_log2() {
        assert_eq!(ceil_log2(1), 0);
        assert_eq!(ceil_log2(2), 1);
        assert_eq!(ceil_log2(8), 3);
        assert_eq!(ceil_log2(9), 4);
    }
}
