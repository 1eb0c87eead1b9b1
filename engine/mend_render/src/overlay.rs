//! Non-destructive patch overlays.
//!
//! A candidate repair is a set of [`Modification`]s applied over an
//! immutable tree. The overlay records the pending edits per position;
//! rendering consults them before descending, so the tree itself is never
//! rewritten and a candidate can be discarded by dropping (or
//! [`restore`](Overlay::restore)-ing) its overlay.

use rustc_hash::FxHashMap;

use mend_ir::{Modification, NodeId, Slot, SyntaxTree};

/// Position within a parent node that pending edits attach to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OverlayKey {
    /// A fixed child slot.
    Slot(Slot),
    /// The parent's ordered statement list as a whole.
    StmtList,
}

/// Overlay application failure.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OverlayError {
    /// The target node has no such fixed slot.
    NoSuchSlot { target: NodeId, slot: Slot },
    /// The target node does not own an ordered statement list.
    NotAList { target: NodeId },
    /// List edit position past the end of the list.
    IndexOutOfBounds { index: u32, len: usize },
}

impl std::fmt::Display for OverlayError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoSuchSlot { target, slot } => {
                write!(f, "node {target:?} has no {slot:?} slot")
            }
            Self::NotAList { target } => {
                write!(f, "node {target:?} does not own a statement list")
            }
            Self::IndexOutOfBounds { index, len } => {
                write!(f, "list index {index} out of bounds (len {len})")
            }
        }
    }
}

impl std::error::Error for OverlayError {}

/// Pending edits against one canonical statement list.
///
/// Indices address the canonical list, so the edits of one candidate
/// compose regardless of adapt order: a Delete and an Insert at the same
/// position replace that statement.
#[derive(Debug, Default)]
pub(crate) struct ListPatch {
    inserted: Vec<(u32, String)>,
    deleted: Vec<u32>,
}

impl ListPatch {
    /// Texts inserted before the canonical statement at `index`, in adapt
    /// order. `index == len` yields the trailing insertions.
    pub(crate) fn inserted_at(&self, index: u32) -> impl Iterator<Item = &str> {
        self.inserted
            .iter()
            .filter(move |(at, _)| *at == index)
            .map(|(_, text)| text.as_str())
    }

    /// Whether the canonical statement at `index` is deleted.
    pub(crate) fn is_deleted(&self, index: u32) -> bool {
        self.deleted.contains(&index)
    }
}

/// Per-candidate record of pending edits.
///
/// At most one replacement text lives at each `(node, slot)` key; a second
/// Replace on the same slot overwrites the first. List edits accumulate
/// per parent instead, since one candidate routinely carries several edits
/// against the same statement list.
#[derive(Debug, Default)]
pub struct Overlay {
    slots: FxHashMap<(NodeId, Slot), String>,
    lists: FxHashMap<NodeId, ListPatch>,
}

impl Overlay {
    /// Create an empty overlay.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replacement text for a fixed slot of `parent`, if any.
    pub fn slot_text(&self, parent: NodeId, slot: Slot) -> Option<&str> {
        self.slots.get(&(parent, slot)).map(String::as_str)
    }

    /// Pending list edits for `parent`, if any.
    pub(crate) fn list_patch(&self, parent: NodeId) -> Option<&ListPatch> {
        self.lists.get(&parent)
    }

    /// Number of positions with pending edits.
    pub fn len(&self) -> usize {
        self.slots.len() + self.lists.len()
    }

    /// Check whether no edit is pending.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty() && self.lists.is_empty()
    }

    /// Record one modification. List-edit indices address the canonical
    /// statement list; a rejected edit leaves the overlay unchanged.
    pub fn adapt(
        &mut self,
        tree: &SyntaxTree,
        modification: &Modification,
    ) -> Result<(), OverlayError> {
        match modification {
            Modification::Replace { target, slot, text } => {
                if !tree.has_slot(*target, *slot) {
                    return Err(OverlayError::NoSuchSlot {
                        target: *target,
                        slot: *slot,
                    });
                }
                self.slots.insert((*target, *slot), text.clone());
                Ok(())
            }
            Modification::Insert {
                target,
                index,
                text,
            } => {
                let len = list_len(tree, *target)?;
                if *index as usize > len {
                    return Err(OverlayError::IndexOutOfBounds { index: *index, len });
                }
                self.lists
                    .entry(*target)
                    .or_default()
                    .inserted
                    .push((*index, text.clone()));
                Ok(())
            }
            Modification::Delete { target, index } => {
                let len = list_len(tree, *target)?;
                if *index as usize >= len {
                    return Err(OverlayError::IndexOutOfBounds { index: *index, len });
                }
                let patch = self.lists.entry(*target).or_default();
                if !patch.deleted.contains(index) {
                    patch.deleted.push(*index);
                }
                Ok(())
            }
        }
    }

    /// Record a batch of modifications, stopping at the first failure.
    pub fn adapt_all(
        &mut self,
        tree: &SyntaxTree,
        modifications: &[Modification],
    ) -> Result<(), OverlayError> {
        for modification in modifications {
            self.adapt(tree, modification)?;
        }
        Ok(())
    }

    /// Drop the pending edits at one position, restoring canonical
    /// rendering there. Returns whether anything was pending.
    pub fn restore(&mut self, target: NodeId, key: OverlayKey) -> bool {
        match key {
            OverlayKey::Slot(slot) => self.slots.remove(&(target, slot)).is_some(),
            OverlayKey::StmtList => self.lists.remove(&target).is_some(),
        }
    }

    /// Drop every pending edit.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.lists.clear();
    }
}

fn list_len(tree: &SyntaxTree, target: NodeId) -> Result<usize, OverlayError> {
    tree.stmt_list(target)
        .map(|range| range.len())
        .ok_or(OverlayError::NotAList { target })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, reason = "Tests can panic")]

    use super::*;
    use crate::source::{render, render_overlaid};
    use mend_ir::{NodeKind, Span, StringInterner, TreeBuilder};
    use pretty_assertions::assert_eq;

    fn guarded_return(interner: &StringInterner) -> (SyntaxTree, NodeId, NodeId) {
        let x = interner.intern("x");
        let mut b = TreeBuilder::new();
        let cond = {
            let lhs = b.push(NodeKind::Ident(x), Span::DUMMY);
            let rhs = b.push(NodeKind::NullLit, Span::DUMMY);
            b.push(
                NodeKind::Binary {
                    op: mend_ir::BinaryOp::NotEq,
                    left: lhs,
                    right: rhs,
                },
                Span::DUMMY,
            )
        };
        let ret = b.push(NodeKind::Return { value: NodeId::INVALID }, Span::DUMMY);
        let stmts = b.push_list(&[ret]);
        let block = b.push(NodeKind::Block { stmts }, Span::DUMMY);
        let if_stmt = b.push(
            NodeKind::If {
                cond,
                then_branch: block,
                else_branch: NodeId::INVALID,
            },
            Span::DUMMY,
        );
        let tree = b.finish(if_stmt).unwrap();
        (tree, if_stmt, block)
    }

    #[test]
    fn test_replace_slot() {
        let interner = StringInterner::new();
        let (tree, if_stmt, _) = guarded_return(&interner);
        let mut overlay = Overlay::new();
        overlay
            .adapt(
                &tree,
                &Modification::Replace {
                    target: if_stmt,
                    slot: Slot::Cond,
                    text: "x != null && ready".to_string(),
                },
            )
            .unwrap();
        assert_eq!(
            render_overlaid(&tree, &interner, if_stmt, &overlay),
            "if (x != null && ready) {\nreturn;\n}"
        );
    }

    #[test]
    fn test_replace_missing_slot_rejected() {
        let interner = StringInterner::new();
        let (tree, if_stmt, _) = guarded_return(&interner);
        let mut overlay = Overlay::new();
        let err = overlay
            .adapt(
                &tree,
                &Modification::Replace {
                    target: if_stmt,
                    slot: Slot::Else,
                    text: "{}".to_string(),
                },
            )
            .unwrap_err();
        assert!(matches!(err, OverlayError::NoSuchSlot { .. }));
        assert!(overlay.is_empty());
    }

    #[test]
    fn test_insert_and_delete_in_list() {
        let interner = StringInterner::new();
        let (tree, if_stmt, block) = guarded_return(&interner);
        let mut overlay = Overlay::new();
        overlay
            .adapt(
                &tree,
                &Modification::Insert {
                    target: block,
                    index: 0,
                    text: "log(x);".to_string(),
                },
            )
            .unwrap();
        assert_eq!(
            render_overlaid(&tree, &interner, if_stmt, &overlay),
            "if (x != null) {\nlog(x);\nreturn;\n}"
        );

        // A later delete addresses the canonical list, so it removes the
        // original statement and keeps the insertion.
        overlay
            .adapt(
                &tree,
                &Modification::Delete {
                    target: block,
                    index: 0,
                },
            )
            .unwrap();
        assert_eq!(
            render_overlaid(&tree, &interner, if_stmt, &overlay),
            "if (x != null) {\nlog(x);\n}"
        );
    }

    #[test]
    fn test_paired_delete_insert_replaces_statement() {
        let interner = StringInterner::new();
        let (tree, if_stmt, block) = guarded_return(&interner);
        let mut overlay = Overlay::new();
        overlay
            .adapt_all(
                &tree,
                &[
                    Modification::Delete {
                        target: block,
                        index: 0,
                    },
                    Modification::Insert {
                        target: block,
                        index: 0,
                        text: "cleanup();".to_string(),
                    },
                ],
            )
            .unwrap();
        assert_eq!(
            render_overlaid(&tree, &interner, if_stmt, &overlay),
            "if (x != null) {\ncleanup();\n}"
        );
    }

    #[test]
    fn test_insert_past_end_rejected() {
        let interner = StringInterner::new();
        let (tree, _, block) = guarded_return(&interner);
        let mut overlay = Overlay::new();
        let err = overlay
            .adapt(
                &tree,
                &Modification::Insert {
                    target: block,
                    index: 2,
                    text: "break;".to_string(),
                },
            )
            .unwrap_err();
        assert_eq!(err, OverlayError::IndexOutOfBounds { index: 2, len: 1 });
    }

    #[test]
    fn test_delete_at_end_rejected() {
        let interner = StringInterner::new();
        let (tree, _, block) = guarded_return(&interner);
        let mut overlay = Overlay::new();
        let err = overlay
            .adapt(
                &tree,
                &Modification::Delete {
                    target: block,
                    index: 1,
                },
            )
            .unwrap_err();
        assert!(matches!(err, OverlayError::IndexOutOfBounds { .. }));
    }

    #[test]
    fn test_restore_round_trip() {
        let interner = StringInterner::new();
        let (tree, if_stmt, _) = guarded_return(&interner);
        let before = render(&tree, &interner, if_stmt);

        let mut overlay = Overlay::new();
        overlay
            .adapt(
                &tree,
                &Modification::Replace {
                    target: if_stmt,
                    slot: Slot::Cond,
                    text: "false".to_string(),
                },
            )
            .unwrap();
        assert_ne!(render_overlaid(&tree, &interner, if_stmt, &overlay), before);

        assert!(overlay.restore(if_stmt, OverlayKey::Slot(Slot::Cond)));
        assert_eq!(render_overlaid(&tree, &interner, if_stmt, &overlay), before);
    }

    #[test]
    fn test_slot_and_list_edits_compose() {
        let interner = StringInterner::new();
        let (tree, if_stmt, block) = guarded_return(&interner);
        let mut overlay = Overlay::new();
        overlay
            .adapt(
                &tree,
                &Modification::Replace {
                    target: if_stmt,
                    slot: Slot::Cond,
                    text: "ok".to_string(),
                },
            )
            .unwrap();
        overlay
            .adapt(
                &tree,
                &Modification::Insert {
                    target: block,
                    index: 1,
                    text: "cleanup();".to_string(),
                },
            )
            .unwrap();
        assert_eq!(
            render_overlaid(&tree, &interner, if_stmt, &overlay),
            "if (ok) {\nreturn;\ncleanup();\n}"
        );
    }
}
