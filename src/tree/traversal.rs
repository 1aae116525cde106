//! Depth-first traversals
//!
//! All walks keep an explicit stack instead of recursing: an unbalanced
//! tree fed ascending keys is a chain as deep as it is large.

use std::fmt::{self, Write as _};

use super::{NodeId, SearchTree, Side};
use crate::Key;

impl SearchTree {
    /// In-order (ascending key) node handles of the subtree at `from`.
    pub fn in_order(&self, from: Option<NodeId>) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = Vec::new();
        let mut current = from.filter(|&id| self.node(id).is_some());

        loop {
            while let Some(id) = current {
                stack.push(id);
                current = self.slot(id).left;
            }
            let Some(id) = stack.pop() else {
                break;
            };
            out.push(id);
            current = self.slot(id).right;
        }

        out
    }

    /// All keys in ascending order
    pub fn keys(&self) -> Vec<Key> {
        self.in_order(self.root)
            .into_iter()
            .map(|id| self.slot(id).key)
            .collect()
    }

    /// Number of nodes in the subtree at `from` (absent = 0)
    pub fn weight(&self, from: Option<NodeId>) -> usize {
        let mut stack: Vec<NodeId> = from
            .filter(|&id| self.node(id).is_some())
            .into_iter()
            .collect();
        let mut count = 0;

        while let Some(id) = stack.pop() {
            count += 1;
            let node = self.slot(id);
            stack.extend(node.left);
            stack.extend(node.right);
        }

        count
    }

    /// Edges on the longest root-to-leaf path; 0 for an empty tree.
    pub fn max_depth(&self) -> usize {
        self.height().saturating_sub(1)
    }

    /// Levels on the longest root-to-leaf path; 0 for an empty tree.
    pub fn height(&self) -> usize {
        self.subtree_height(self.root)
    }

    pub(crate) fn subtree_height(&self, from: Option<NodeId>) -> usize {
        let mut stack: Vec<(NodeId, usize)> = from.map(|id| (id, 1)).into_iter().collect();
        let mut deepest = 0;

        while let Some((id, level)) = stack.pop() {
            deepest = deepest.max(level);
            let node = self.slot(id);
            for child in [node.left, node.right].into_iter().flatten() {
                stack.push((child, level + 1));
            }
        }

        deepest
    }

    /// Pre-order diagnostic dump of the whole tree.
    pub fn dump(&self) -> String {
        self.dump_from(self.root)
    }

    /// Pre-order diagnostic dump of the subtree at `from`.
    ///
    /// One line per node: indentation by depth, the slot it hangs from,
    /// its handle and links.
    pub fn dump_from(&self, from: Option<NodeId>) -> String {
        let Some(start) = from.filter(|&id| self.node(id).is_some()) else {
            return "(empty)\n".to_string();
        };

        let mut out = String::new();
        let mut stack = vec![(start, 0usize, None::<Side>)];
        while let Some((id, depth, side)) = stack.pop() {
            let node = self.slot(id);
            let tag = match side {
                None => "*",
                Some(Side::Left) => "L",
                Some(Side::Right) => "R",
            };
            // Writing into a String cannot fail.
            let _ = writeln!(
                out,
                "{:indent$}{} {} {}",
                "",
                tag,
                id,
                node,
                indent = depth * 2
            );

            // Right pushed first so the left subtree prints first.
            if let Some(right) = node.right {
                stack.push((right, depth + 1, Some(Side::Right)));
            }
            if let Some(left) = node.left {
                stack.push((left, depth + 1, Some(Side::Left)));
            }
        }
        out
    }
}

impl fmt::Display for SearchTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.dump())
    }
}
