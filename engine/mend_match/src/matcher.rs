//! Structural matcher.
//!
//! Compares a target node against a donor node and, on success, emits the
//! modifications that would rewrite the target into the donor's shape plus
//! the variable renaming the donor text must be read under.
//!
//! Statements match best-effort: a same-kind statement pair always matches,
//! and every disagreement is captured as a modification (slot replacement,
//! statement insertion or deletion). Expressions match strictly: structural
//! equality modulo a consistent variable renaming, with no modifications —
//! an expression-level disagreement degrades the enclosing statement slot
//! instead. When the kinds differ outright, the matcher searches the
//! shallowest same-kind donor descendant and, independently, the target's
//! statement children against the whole donor, keeping every path that
//! produced a match.

use std::collections::VecDeque;

use mend_ir::{
    Modification, Name, NodeId, NodeKind, RenameMap, ScopeSet, Slot, StringInterner, SyntaxTree,
};
use mend_render::render_renamed;

use crate::align::{align, AlignOp};

/// Structural matcher over one target/donor tree pair.
pub struct Matcher<'a> {
    target: &'a SyntaxTree,
    donor: &'a SyntaxTree,
    interner: &'a StringInterner,
    target_scope: &'a ScopeSet,
    donor_scope: &'a ScopeSet,
}

impl<'a> Matcher<'a> {
    /// Create a matcher for one target/donor pair with their scopes.
    pub fn new(
        target: &'a SyntaxTree,
        donor: &'a SyntaxTree,
        interner: &'a StringInterner,
        target_scope: &'a ScopeSet,
        donor_scope: &'a ScopeSet,
    ) -> Self {
        Self {
            target,
            donor,
            interner,
            target_scope,
            donor_scope,
        }
    }

    /// Match `target_id` against `donor_id`.
    ///
    /// On `true`, `mods` holds the edits (positioned against target nodes)
    /// and `rename` the donor-to-target name bindings the edit text assumes.
    /// On `false`, both are left as they were on entry.
    #[tracing::instrument(
        level = "trace",
        skip_all,
        fields(target = self.target.kind(target_id).tag(), donor = self.donor.kind(donor_id).tag())
    )]
    pub fn matches(
        &self,
        target_id: NodeId,
        donor_id: NodeId,
        rename: &mut RenameMap,
        mods: &mut Vec<Modification>,
    ) -> bool {
        let t_kind = self.target.kind(target_id);
        let d_kind = self.donor.kind(donor_id);
        if t_kind.same_kind(d_kind) {
            if t_kind.is_statement() {
                self.match_statement(target_id, donor_id, rename, mods)
            } else {
                let mark = rename.mark();
                let ok = self.expr_matches(target_id, donor_id, rename);
                if !ok {
                    rename.rollback(mark);
                }
                ok
            }
        } else {
            self.match_across_kinds(target_id, donor_id, rename, mods)
        }
    }

    /// Same-kind statement match. Always succeeds except when declared
    /// names cannot be consistently bound; disagreements become mods.
    ///
    /// Two passes: recursive matching first, so every binding the donor can
    /// establish is committed, then the degraded edits are rendered under
    /// the complete renaming.
    fn match_statement(
        &self,
        target_id: NodeId,
        donor_id: NodeId,
        rename: &mut RenameMap,
        mods: &mut Vec<Modification>,
    ) -> bool {
        let mark = rename.mark();

        if let (Some((t_name, t_ty)), Some((d_name, d_ty))) = (
            self.target.declared_name(target_id),
            self.donor.declared_name(donor_id),
        ) {
            if !ScopeSet::compatible(t_ty, d_ty) || !rename.try_bind(d_name, t_name) {
                rename.rollback(mark);
                return false;
            }
        }

        let mut failed_slots: Vec<(Slot, NodeId)> = Vec::new();
        for (slot, t_child) in self.target.slots(target_id) {
            let Some(d_child) = self.donor.slot_child(donor_id, slot) else {
                continue;
            };
            let slot_mark = rename.mark();
            let mods_len = mods.len();
            if !self.matches(t_child, d_child, rename, mods) {
                rename.rollback(slot_mark);
                mods.truncate(mods_len);
                failed_slots.push((slot, d_child));
            }
        }

        let mut list_edits: Vec<ListEdit> = Vec::new();
        if let (Some(t_range), Some(d_range)) = (
            self.target.stmt_list(target_id),
            self.donor.stmt_list(donor_id),
        ) {
            let t_stmts = self.target.list(t_range);
            let d_stmts = self.donor.list(d_range);
            for op in align(self.target, t_stmts, self.donor, d_stmts) {
                match op {
                    AlignOp::Pair {
                        target_index,
                        donor_index,
                    } => {
                        let pair_mark = rename.mark();
                        let mods_len = mods.len();
                        if !self.matches(
                            t_stmts[target_index],
                            d_stmts[donor_index],
                            rename,
                            mods,
                        ) {
                            rename.rollback(pair_mark);
                            mods.truncate(mods_len);
                            list_edits.push(ListEdit::Delete { at: target_index });
                            list_edits.push(ListEdit::Insert {
                                at: target_index,
                                donor: d_stmts[donor_index],
                            });
                        }
                    }
                    AlignOp::Insert { at, donor_index } => {
                        list_edits.push(ListEdit::Insert {
                            at,
                            donor: d_stmts[donor_index],
                        });
                    }
                    AlignOp::Delete { at } => list_edits.push(ListEdit::Delete { at }),
                }
            }
        }

        for (slot, d_child) in failed_slots {
            let text = render_renamed(self.donor, self.interner, d_child, rename);
            mods.push(Modification::Replace {
                target: target_id,
                slot,
                text,
            });
        }
        for edit in list_edits {
            match edit {
                ListEdit::Insert { at, donor } => {
                    let text = render_renamed(self.donor, self.interner, donor, rename);
                    mods.push(Modification::Insert {
                        target: target_id,
                        index: list_index(at),
                        text,
                    });
                }
                ListEdit::Delete { at } => mods.push(Modification::Delete {
                    target: target_id,
                    index: list_index(at),
                }),
            }
        }

        true
    }

    /// Strict expression equality modulo the renaming. Never emits mods;
    /// the caller rolls back bindings on failure.
    fn expr_matches(&self, target_id: NodeId, donor_id: NodeId, rename: &mut RenameMap) -> bool {
        match (*self.target.kind(target_id), *self.donor.kind(donor_id)) {
            (NodeKind::Ident(t_name), NodeKind::Ident(d_name)) => {
                self.bind_var(d_name, t_name, rename)
            }
            (NodeKind::IntLit(a), NodeKind::IntLit(b)) => a == b,
            (NodeKind::FloatLit(a), NodeKind::FloatLit(b)) => a == b,
            (NodeKind::BoolLit(a), NodeKind::BoolLit(b)) => a == b,
            (NodeKind::StrLit(a), NodeKind::StrLit(b)) => a == b,
            (NodeKind::CharLit(a), NodeKind::CharLit(b)) => a == b,
            (NodeKind::NullLit, NodeKind::NullLit) => true,
            (
                NodeKind::Assign {
                    target: tt,
                    value: tv,
                },
                NodeKind::Assign {
                    target: dt,
                    value: dv,
                },
            ) => self.expr_matches(tt, dt, rename) && self.expr_matches(tv, dv, rename),
            (
                NodeKind::Binary {
                    op: t_op,
                    left: tl,
                    right: tr,
                },
                NodeKind::Binary {
                    op: d_op,
                    left: dl,
                    right: dr,
                },
            ) => {
                t_op == d_op
                    && self.expr_matches(tl, dl, rename)
                    && self.expr_matches(tr, dr, rename)
            }
            (
                NodeKind::Unary {
                    op: t_op,
                    operand: to,
                },
                NodeKind::Unary {
                    op: d_op,
                    operand: d_operand,
                },
            ) => t_op == d_op && self.expr_matches(to, d_operand, rename),
            (
                NodeKind::Call {
                    receiver: tr,
                    method: tm,
                    args: ta,
                },
                NodeKind::Call {
                    receiver: dr,
                    method: dm,
                    args: da,
                },
            ) => {
                if tm != dm || tr.is_valid() != dr.is_valid() {
                    return false;
                }
                if tr.is_valid() && !self.expr_matches(tr, dr, rename) {
                    return false;
                }
                let t_args = self.target.list(ta);
                let d_args = self.donor.list(da);
                t_args.len() == d_args.len()
                    && t_args
                        .iter()
                        .zip(d_args)
                        .all(|(&t, &d)| self.expr_matches(t, d, rename))
            }
            (
                NodeKind::FieldAccess {
                    receiver: tr,
                    field: tf,
                },
                NodeKind::FieldAccess {
                    receiver: dr,
                    field: df,
                },
            ) => tf == df && self.expr_matches(tr, dr, rename),
            (
                NodeKind::Index {
                    receiver: tr,
                    index: ti,
                },
                NodeKind::Index {
                    receiver: dr,
                    index: di,
                },
            ) => self.expr_matches(tr, dr, rename) && self.expr_matches(ti, di, rename),
            (
                NodeKind::Conditional {
                    cond: tc,
                    then_expr: tt,
                    else_expr: te,
                },
                NodeKind::Conditional {
                    cond: dc,
                    then_expr: dt,
                    else_expr: de,
                },
            ) => {
                self.expr_matches(tc, dc, rename)
                    && self.expr_matches(tt, dt, rename)
                    && self.expr_matches(te, de, rename)
            }
            _ => false,
        }
    }

    /// Bind a donor variable to a target variable. The target name must be
    /// usable at the target site with a type the donor name can stand for.
    fn bind_var(&self, donor_name: Name, target_name: Name, rename: &mut RenameMap) -> bool {
        let Some(t_ty) = self.target_scope.lookup(target_name) else {
            return false;
        };
        let d_ty = self.donor_scope.lookup(donor_name).unwrap_or(Name::EMPTY);
        if !ScopeSet::compatible(t_ty, d_ty) {
            return false;
        }
        rename.try_bind(donor_name, target_name)
    }

    /// Kind-mismatch path: shallowest same-kind donor descendant, plus the
    /// target's statement children against the whole donor. Every path that
    /// matched contributes; one suffices for an overall match.
    fn match_across_kinds(
        &self,
        target_id: NodeId,
        donor_id: NodeId,
        rename: &mut RenameMap,
        mods: &mut Vec<Modification>,
    ) -> bool {
        let mut matched = false;

        if let Some(descendant) = self.shallowest_same_kind(donor_id, self.target.kind(target_id)) {
            tracing::trace!(
                descendant = self.donor.kind(descendant).tag(),
                "descending into donor"
            );
            if self.matches(target_id, descendant, rename, mods) {
                matched = true;
            }
        }

        for child in self.target.children(target_id) {
            if self.target.kind(child).is_statement() && self.matches(child, donor_id, rename, mods)
            {
                matched = true;
            }
        }

        matched
    }

    /// Breadth-first search below `donor_id` for the shallowest node of the
    /// wanted kind, earliest sibling first.
    fn shallowest_same_kind(&self, donor_id: NodeId, want: &NodeKind) -> Option<NodeId> {
        let mut queue: VecDeque<NodeId> = self.donor.children(donor_id).into_iter().collect();
        while let Some(id) = queue.pop_front() {
            if self.donor.kind(id).same_kind(want) {
                return Some(id);
            }
            queue.extend(self.donor.children(id));
        }
        None
    }
}

/// Deferred statement-list edit; donor text is rendered once the full
/// renaming is known.
enum ListEdit {
    Insert { at: usize, donor: NodeId },
    Delete { at: usize },
}

fn list_index(index: usize) -> u32 {
    u32::try_from(index).unwrap_or(u32::MAX)
}
