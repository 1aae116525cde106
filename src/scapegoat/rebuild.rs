//! Flatten-and-rebuild of a subtree
//!
//! The in-order flatten yields node handles already sorted by key.
//! Rebuild by midpoint recursion over that array:
//!   m = n / 2 becomes the subtree root
//!   left child from [0, m), right child from [m + 1, n)
//! Height of the result: ⌈log2(n + 1)⌉. Nodes are relinked, never
//! reallocated, so handles and payloads survive.

use crate::tree::{NodeId, SearchTree};

/// Replace the subtree at `scapegoat` with a perfectly balanced one.
///
/// Returns the new subtree root and the number of nodes rebuilt; a stale
/// handle rebuilds nothing.
pub(crate) fn rebuild_subtree(
    tree: &mut SearchTree,
    scapegoat: NodeId,
) -> Option<(NodeId, usize)> {
    tree.node(scapegoat)?;

    let attachment = tree.attachment(scapegoat);
    let sorted = tree.in_order(Some(scapegoat));
    let root = build_balanced(tree, &sorted)?;
    tree.attach(attachment, Some(root));

    Some((root, sorted.len()))
}

/// Link `sorted` into a balanced subtree and return its root.
///
/// The returned root's parent link is left for the caller to set.
pub(crate) fn build_balanced(tree: &mut SearchTree, sorted: &[NodeId]) -> Option<NodeId> {
    if sorted.is_empty() {
        return None;
    }

    let m = sorted.len() / 2;
    let root = sorted[m];
    let left = build_balanced(tree, &sorted[..m]);
    let right = build_balanced(tree, &sorted[m + 1..]);
    tree.link_children(root, left, right);

    Some(root)
}
