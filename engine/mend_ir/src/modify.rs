//! Pending-edit descriptions.
//!
//! A [`Modification`] describes one edit derived from a successful match:
//! replace a named sub-slot of a node, insert source text before a statement
//! at an index, or delete the statement at an index. Modifications never
//! mutate the tree; the overlay engine turns them into cached rendering
//! overrides.
//!
//! Slot selectors are an explicit enum rather than reserved index values, so
//! "the controlling expression" can never collide with an ordinary statement
//! index.

use crate::{NodeId, Slot};

/// One pending edit, positioned relative to a specific node of a specific
/// tree. IDs are not globally unique and must not be compared across trees.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Modification {
    /// Replace a fixed sub-slot of `target` with `text`.
    Replace {
        target: NodeId,
        slot: Slot,
        text: String,
    },

    /// Insert `text` before the statement at `index` in `target`'s ordered
    /// statement list. `index == len` appends.
    Insert {
        target: NodeId,
        index: u32,
        text: String,
    },

    /// Delete the statement at `index` in `target`'s ordered statement list.
    Delete { target: NodeId, index: u32 },
}

impl Modification {
    /// The node this edit is positioned against.
    pub fn target(&self) -> NodeId {
        match self {
            Modification::Replace { target, .. }
            | Modification::Insert { target, .. }
            | Modification::Delete { target, .. } => *target,
        }
    }

    /// Returns `true` for Insert/Delete (statement-list edits).
    pub fn is_list_edit(&self) -> bool {
        matches!(
            self,
            Modification::Insert { .. } | Modification::Delete { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_accessor() {
        let m = Modification::Delete {
            target: NodeId::new(7),
            index: 0,
        };
        assert_eq!(m.target(), NodeId::new(7));
        assert!(m.is_list_edit());
    }

    #[test]
    fn test_replace_is_not_list_edit() {
        let m = Modification::Replace {
            target: NodeId::new(1),
            slot: Slot::Cond,
            text: "x != null".into(),
        };
        assert!(!m.is_list_edit());
    }
}
