//! Arena node representation
//!
//! A node stores one key plus optional satellite payload.
//! Links are arena indices, never pointers:
//!   `left`/`right` own the child subtree
//!   `parent` is a back-reference used only for upward walks

use std::fmt;

use crate::{Key, Payload};

/// Stable handle to a node slot in a tree's arena.
///
/// Handles stay valid across rebalancing (nodes are relinked, not
/// reallocated) and become stale once the key is deleted. The generation
/// tag keeps a stale handle stale after its slot is recycled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId {
    index: u32,
    generation: u32,
}

impl NodeId {
    #[inline]
    pub(crate) fn new(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }

    /// Arena slot index.
    #[inline]
    pub fn index(self) -> usize {
        self.index as usize
    }

    /// Times the slot had been recycled when this handle was issued.
    #[inline]
    pub fn generation(self) -> u32 {
        self.generation
    }

    #[inline]
    pub(crate) fn slot_index(self) -> u32 {
        self.index
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.index)
    }
}

/// Which child slot of a parent a node occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    /// Smaller keys
    Left,
    /// Larger keys
    Right,
}

impl Side {
    /// The opposite slot.
    #[inline]
    pub fn flip(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

/// Tree node (one stored key)
#[derive(Debug, Clone)]
pub struct Node {
    pub(crate) key: Key,
    pub(crate) payload: Option<Payload>,
    pub(crate) parent: Option<NodeId>,
    pub(crate) left: Option<NodeId>,
    pub(crate) right: Option<NodeId>,
    /// False once the slot has been returned to the free list
    pub(crate) alive: bool,
    /// Bumped on every release
    pub(crate) generation: u32,
}

impl Node {
    pub(crate) fn new(key: Key, payload: Option<Payload>, parent: Option<NodeId>) -> Self {
        Self {
            key,
            payload,
            parent,
            left: None,
            right: None,
            alive: true,
            generation: 0,
        }
    }

    /// Whether `id` names this slot's current occupant.
    #[inline]
    pub(crate) fn is_current(&self, id: NodeId) -> bool {
        self.alive && self.generation == id.generation
    }

    /// Stored key
    #[inline]
    pub fn key(&self) -> Key {
        self.key
    }

    /// Satellite payload, if any
    #[inline]
    pub fn payload(&self) -> Option<&Payload> {
        self.payload.as_ref()
    }

    /// Parent back-reference (absent for the root)
    #[inline]
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Left child
    #[inline]
    pub fn left(&self) -> Option<NodeId> {
        self.left
    }

    /// Right child
    #[inline]
    pub fn right(&self) -> Option<NodeId> {
        self.right
    }

    /// Child on the given side
    #[inline]
    pub fn child(&self, side: Side) -> Option<NodeId> {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    #[inline]
    pub(crate) fn set_child(&mut self, side: Side, child: Option<NodeId>) {
        match side {
            Side::Left => self.left = child,
            Side::Right => self.right = child,
        }
    }

    /// Check if leaf (no children)
    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }

    /// Number of children (0, 1 or 2)
    #[inline]
    pub fn degree(&self) -> usize {
        usize::from(self.left.is_some()) + usize::from(self.right.is_some())
    }

    /// Drop links and payload when the slot is freed.
    pub(crate) fn release(&mut self) {
        self.payload = None;
        self.parent = None;
        self.left = None;
        self.right = None;
        self.alive = false;
        self.generation = self.generation.wrapping_add(1);
    }
}

fn link(f: &mut fmt::Formatter<'_>, id: Option<NodeId>) -> fmt::Result {
    match id {
        Some(id) => write!(f, "{}", id),
        None => f.write_str("-"),
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "key={} parent=", self.key)?;
        link(f, self.parent)?;
        f.write_str(" left=")?;
        link(f, self.left)?;
        f.write_str(" right=")?;
        link(f, self.right)?;
        if let Some(payload) = &self.payload {
            write!(f, " payload={}B", payload.len())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_child_slots() {
        let mut node = Node::new(10, None, None);
        assert!(node.is_leaf());

        node.set_child(Side::Left, Some(NodeId::new(1, 0)));
        node.set_child(Side::Right.flip().flip(), Some(NodeId::new(2, 0)));

        assert_eq!(node.child(Side::Left), Some(NodeId::new(1, 0)));
        assert_eq!(node.child(Side::Right), Some(NodeId::new(2, 0)));
        assert_eq!(node.degree(), 2);
        assert!(!node.is_leaf());
    }

    #[test]
    fn test_release_drops_payload() {
        let mut node = Node::new(7, Some(vec![1, 2, 3]), Some(NodeId::new(0, 0)));
        node.release();

        assert!(!node.alive);
        assert_eq!(node.generation, 1);
        assert!(!node.is_current(NodeId::new(0, 0)));
        assert!(node.payload().is_none());
        assert!(node.parent().is_none());
    }

    #[test]
    fn test_display() {
        let mut node = Node::new(50, Some(vec![0; 4]), None);
        node.left = Some(NodeId::new(1, 0));
        assert_eq!(node.to_string(), "key=50 parent=- left=#1 right=- payload=4B");
    }
}
