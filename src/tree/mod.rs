//! Unbalanced binary search tree
//!
//! Nodes live in a per-tree arena addressed by [`NodeId`].
//! Parent/child relationships are index fields, so relinking during
//! rebalancing never invalidates a handle.
//!
//! Depth conventions:
//!   insertion depth is 1-based (inserting into an empty tree reports 1)
//!   `max_depth` counts edges on the longest root-to-leaf path
//!   `height` counts levels (`max_depth + 1` for a non-empty tree)

mod node;
mod traversal;

pub use node::{Node, NodeId, Side};

use std::cmp::Ordering;

use crate::{Key, Payload, TreeError};

/// Unbalanced binary search tree over unique keys
///
/// No balancing guarantee: ascending inserts degenerate into a chain.
#[derive(Debug, Clone, Default)]
pub struct SearchTree {
    /// Node arena. Indices are `NodeId`.
    nodes: Vec<Node>,

    /// Freed slots available for reuse
    free_list: Vec<u32>,

    /// Sole entry point (absent when empty)
    root: Option<NodeId>,

    /// Number of live nodes reachable from `root`
    size: usize,
}

impl SearchTree {
    /// Create empty tree
    pub fn new() -> Self {
        Self::default()
    }

    /// Create empty tree with arena room for `capacity` nodes
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
            ..Self::default()
        }
    }

    /// Number of live nodes
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// True when the tree holds no keys
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Root node handle
    #[inline]
    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    /// Remove every node, releasing all payloads.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.free_list.clear();
        self.root = None;
        self.size = 0;
    }

    /// Resolve a handle; `None` if the node has been deleted.
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index()).filter(|node| node.is_current(id))
    }

    /// Node currently holding `key`
    pub fn get(&self, key: Key) -> Option<&Node> {
        self.find(key).map(|id| self.slot(id))
    }

    // ===== Arena operations =====

    #[inline]
    pub(crate) fn slot(&self, id: NodeId) -> &Node {
        let node = &self.nodes[id.index()];
        debug_assert!(node.is_current(id), "stale node handle {}", id);
        node
    }

    #[inline]
    pub(crate) fn slot_mut(&mut self, id: NodeId) -> &mut Node {
        let node = &mut self.nodes[id.index()];
        debug_assert!(node.is_current(id), "stale node handle {}", id);
        node
    }

    fn alloc(
        &mut self,
        key: Key,
        payload: Option<Payload>,
        parent: Option<NodeId>,
    ) -> Result<NodeId, TreeError> {
        let mut node = Node::new(key, payload, parent);
        if let Some(idx) = self.free_list.pop() {
            let slot = &mut self.nodes[idx as usize];
            let generation = slot.generation;
            node.generation = generation;
            *slot = node;
            return Ok(NodeId::new(idx, generation));
        }
        let idx = u32::try_from(self.nodes.len()).map_err(|_| TreeError::CapacityExceeded {
            capacity: u32::MAX as usize,
        })?;
        self.nodes.push(node);
        Ok(NodeId::new(idx, 0))
    }

    fn free(&mut self, id: NodeId) {
        self.slot_mut(id).release();
        self.free_list.push(id.slot_index());
    }

    // ===== Insert / find =====

    /// Insert `key` without payload.
    ///
    /// Returns the new node and its 1-based insertion depth.
    pub fn insert(&mut self, key: Key) -> Result<(NodeId, usize), TreeError> {
        self.insert_with(key, None)
    }

    /// Insert `key` carrying `payload`.
    ///
    /// Duplicate keys are rejected and leave the tree unchanged.
    pub fn insert_with(
        &mut self,
        key: Key,
        payload: Option<Payload>,
    ) -> Result<(NodeId, usize), TreeError> {
        let Some(mut current) = self.root else {
            let id = self.alloc(key, payload, None)?;
            self.root = Some(id);
            self.size += 1;
            return Ok((id, 1));
        };

        let mut depth = 1;
        loop {
            depth += 1;
            let node = self.slot(current);
            let side = match key.cmp(&node.key) {
                Ordering::Less => Side::Left,
                Ordering::Greater => Side::Right,
                Ordering::Equal => return Err(TreeError::DuplicateKey(key)),
            };
            match node.child(side) {
                Some(next) => current = next,
                None => {
                    let id = self.alloc(key, payload, Some(current))?;
                    self.slot_mut(current).set_child(side, Some(id));
                    self.size += 1;
                    return Ok((id, depth));
                }
            }
        }
    }

    /// Locate the node holding `key`.
    pub fn find(&self, key: Key) -> Option<NodeId> {
        let mut current = self.root;
        while let Some(id) = current {
            let node = self.slot(id);
            current = match key.cmp(&node.key) {
                Ordering::Less => node.left,
                Ordering::Greater => node.right,
                Ordering::Equal => return Some(id),
            };
        }
        None
    }

    /// Membership test
    pub fn contains(&self, key: Key) -> bool {
        self.find(key).is_some()
    }

    /// Payload stored with `key`
    pub fn payload(&self, key: Key) -> Option<&Payload> {
        self.get(key).and_then(Node::payload)
    }

    /// Replace the payload stored with `key`, returning the previous one.
    pub fn set_payload(
        &mut self,
        key: Key,
        payload: Option<Payload>,
    ) -> Result<Option<Payload>, TreeError> {
        let id = self.find(key).ok_or(TreeError::KeyNotFound(key))?;
        Ok(std::mem::replace(&mut self.slot_mut(id).payload, payload))
    }

    // ===== Delete =====

    /// Remove `key`; `false` if it was not present.
    ///
    /// Never rebalances.
    pub fn delete(&mut self, key: Key) -> bool {
        let Some(id) = self.find(key) else {
            return false;
        };
        self.remove_node(id);
        self.size -= 1;
        true
    }

    fn remove_node(&mut self, id: NodeId) {
        let node = self.slot(id);
        match (node.left, node.right) {
            (Some(_), Some(right)) => {
                // Successor has no left child, so removing it hits the simple case.
                let successor = self.leftmost(right);
                let succ = self.slot_mut(successor);
                let key = succ.key;
                let payload = succ.payload.take();

                let target = self.slot_mut(id);
                target.key = key;
                target.payload = payload;

                self.remove_node(successor);
            }
            (child, None) | (None, child) => {
                let attachment = self.attachment(id);
                self.attach(attachment, child);
                self.free(id);
            }
        }
    }

    /// Leftmost (minimum) node of the subtree at `id`
    pub(crate) fn leftmost(&self, mut id: NodeId) -> NodeId {
        while let Some(left) = self.slot(id).left {
            id = left;
        }
        id
    }

    // ===== Relinking =====

    /// Parent slot currently holding `id` (`None` for the root).
    pub(crate) fn attachment(&self, id: NodeId) -> Option<(NodeId, Side)> {
        let parent = self.slot(id).parent?;
        let side = if self.slot(parent).left == Some(id) {
            Side::Left
        } else {
            Side::Right
        };
        Some((parent, side))
    }

    /// Hang `subtree` in a parent slot, or make it the root.
    pub(crate) fn attach(&mut self, attachment: Option<(NodeId, Side)>, subtree: Option<NodeId>) {
        match attachment {
            Some((parent, side)) => self.slot_mut(parent).set_child(side, subtree),
            None => self.root = subtree,
        }
        if let Some(child) = subtree {
            self.slot_mut(child).parent = attachment.map(|(parent, _)| parent);
        }
    }

    /// Set both children of `id`, pointing their parent links back at it.
    pub(crate) fn link_children(
        &mut self,
        id: NodeId,
        left: Option<NodeId>,
        right: Option<NodeId>,
    ) {
        let node = self.slot_mut(id);
        node.left = left;
        node.right = right;
        for child in [left, right].into_iter().flatten() {
            self.slot_mut(child).parent = Some(id);
        }
    }

    // ===== Invariants =====

    /// Check BST order, parent consistency and size consistency.
    pub fn validate(&self) -> Result<(), TreeError> {
        let Some(root) = self.root else {
            if self.size != 0 {
                return Err(TreeError::violation(
                    None,
                    format!("empty tree reports size {}", self.size),
                ));
            }
            return Ok(());
        };
        if self.node(root).is_some_and(|node| node.parent.is_some()) {
            return Err(TreeError::violation(Some(root), "root has a parent"));
        }

        let count = self.validate_subtree(root, None, None)?;
        if count != self.size {
            return Err(TreeError::violation(
                None,
                format!("size {} but {} reachable nodes", self.size, count),
            ));
        }
        Ok(())
    }

    /// Validate the subtree at `id` against exclusive key bounds.
    ///
    /// Returns the number of nodes visited.
    pub(crate) fn validate_subtree(
        &self,
        id: NodeId,
        lower: Option<Key>,
        upper: Option<Key>,
    ) -> Result<usize, TreeError> {
        let mut stack = vec![(id, lower, upper)];
        let mut count = 0;

        while let Some((id, lower, upper)) = stack.pop() {
            let node = self
                .node(id)
                .ok_or_else(|| TreeError::violation(Some(id), "link to freed slot"))?;
            count += 1;
            if count > self.nodes.len() {
                return Err(TreeError::violation(Some(id), "cycle in child links"));
            }
            if lower.is_some_and(|lo| node.key <= lo) || upper.is_some_and(|hi| node.key >= hi) {
                return Err(TreeError::violation(
                    Some(id),
                    format!("key {} outside ({:?}, {:?})", node.key, lower, upper),
                ));
            }
            for (child, lo, hi) in [
                (node.left, lower, Some(node.key)),
                (node.right, Some(node.key), upper),
            ] {
                if let Some(child) = child {
                    let parent = self.nodes.get(child.index()).and_then(|c| c.parent);
                    if parent != Some(id) {
                        return Err(TreeError::violation(
                            Some(child),
                            format!("parent link {:?} does not match owner {}", parent, id),
                        ));
                    }
                    stack.push((child, lo, hi));
                }
            }
        }

        Ok(count)
    }
}
