//! Node IDs and ranges for the flat syntax tree.
//!
//! Children are referenced by `NodeId(u32)` indices into the owning
//! [`SyntaxTree`](crate::SyntaxTree) rather than boxed pointers. Ordered
//! child sequences (block bodies, call arguments) are flattened into a side
//! array and referenced by `NodeRange`.

use std::fmt;

/// Index into a syntax tree's node arena.
///
/// `INVALID` doubles as the "absent optional child" marker (a missing else
/// branch, a bare `return`). IDs are only meaningful relative to the tree
/// that allocated them.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(transparent)]
pub struct NodeId(u32);

impl NodeId {
    /// Invalid node ID (sentinel for absent optional children and roots'
    /// parent back-reference).
    pub const INVALID: NodeId = NodeId(u32::MAX);

    /// Create a new `NodeId`.
    #[inline]
    pub const fn new(index: u32) -> Self {
        NodeId(index)
    }

    /// Get the index into the arena.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Get the raw u32 value.
    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Check if this is a valid ID.
    #[inline]
    pub const fn is_valid(self) -> bool {
        self.0 != u32::MAX
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_valid() {
            write!(f, "NodeId({})", self.0)
        } else {
            write!(f, "NodeId::INVALID")
        }
    }
}

impl Default for NodeId {
    fn default() -> Self {
        Self::INVALID
    }
}

/// Range of node IDs in the tree's flattened list array.
///
/// Compact (start: u32, len: u16) pair; ordered child sequences never exceed
/// 65k entries in practice.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
#[repr(C)]
pub struct NodeRange {
    pub start: u32,
    pub len: u16,
}

impl NodeRange {
    /// Empty range.
    pub const EMPTY: NodeRange = NodeRange { start: 0, len: 0 };

    /// Create a new range.
    #[inline]
    pub const fn new(start: u32, len: u16) -> Self {
        NodeRange { start, len }
    }

    /// Check if the range is empty.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of nodes in the range.
    #[inline]
    pub const fn len(&self) -> usize {
        self.len as usize
    }
}

impl fmt::Debug for NodeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeRange({}..+{})", self.start, self.len)
    }
}

impl Default for NodeRange {
    fn default() -> Self {
        Self::EMPTY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_id_validity() {
        assert!(NodeId::new(0).is_valid());
        assert!(!NodeId::INVALID.is_valid());
        assert_eq!(NodeId::default(), NodeId::INVALID);
    }

    #[test]
    fn test_node_id_debug() {
        assert_eq!(format!("{:?}", NodeId::new(3)), "NodeId(3)");
        assert_eq!(format!("{:?}", NodeId::INVALID), "NodeId::INVALID");
    }

    #[test]
    fn test_node_range_empty() {
        assert!(NodeRange::EMPTY.is_empty());
        assert_eq!(NodeRange::EMPTY.len(), 0);
        assert!(!NodeRange::new(4, 2).is_empty());
        assert_eq!(NodeRange::new(4, 2).len(), 2);
    }
}
