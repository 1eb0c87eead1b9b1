//! Structure-driven source rendering.
//!
//! Renders a node's source text from the tree itself, never from the
//! original file. Rendering consults a per-candidate [`Overlay`] for
//! pending slot and list edits, and an optional [`RenameMap`] when donor
//! text must be rewritten into target-scope names.

use mend_ir::{
    Name, NodeId, NodeKind, NodeRange, RenameMap, Slot, StringInterner, SyntaxTree,
};

use crate::emitter::{Emitter, StringEmitter};
use crate::overlay::Overlay;

/// Render a node to source text from the canonical tree alone.
pub fn render(tree: &SyntaxTree, interner: &StringInterner, id: NodeId) -> String {
    render_with(tree, interner, id, None, None)
}

/// Render a node with donor names rewritten through `rename`.
pub fn render_renamed(
    tree: &SyntaxTree,
    interner: &StringInterner,
    id: NodeId,
    rename: &RenameMap,
) -> String {
    render_with(tree, interner, id, None, Some(rename))
}

/// Render a node under a pending-edit overlay.
pub fn render_overlaid(
    tree: &SyntaxTree,
    interner: &StringInterner,
    id: NodeId,
    overlay: &Overlay,
) -> String {
    render_with(tree, interner, id, Some(overlay), None)
}

/// Render with both an overlay and a renaming in effect.
pub fn render_with(
    tree: &SyntaxTree,
    interner: &StringInterner,
    id: NodeId,
    overlay: Option<&Overlay>,
    rename: Option<&RenameMap>,
) -> String {
    let mut out = StringEmitter::with_capacity(64);
    let mut renderer = SourceRenderer {
        tree,
        interner,
        overlay,
        rename,
        out: &mut out,
    };
    renderer.node(id);
    out.output()
}

struct SourceRenderer<'a, E: Emitter> {
    tree: &'a SyntaxTree,
    interner: &'a StringInterner,
    overlay: Option<&'a Overlay>,
    rename: Option<&'a RenameMap>,
    out: &'a mut E,
}

impl<E: Emitter> SourceRenderer<'_, E> {
    fn name(&mut self, name: Name) {
        let resolved = match self.rename {
            Some(map) => map.resolve(name).unwrap_or(name),
            None => name,
        };
        self.out.emit(self.interner.lookup(resolved));
    }

    /// Render a fixed slot child, honoring a cached override for the slot.
    fn slot(&mut self, parent: NodeId, slot: Slot, child: NodeId) {
        if let Some(text) = self.overlay.and_then(|o| o.slot_text(parent, slot)) {
            self.out.emit(text);
        } else {
            self.node(child);
        }
    }

    /// Render an ordered statement list, one statement per line, honoring
    /// pending list edits for the parent. Edit indices address the
    /// canonical list, so insertions and deletions from one candidate
    /// compose here regardless of the order they were recorded in.
    fn stmt_list(&mut self, parent: NodeId, range: NodeRange) {
        let stmts = self.tree.list(range);
        let Some(patch) = self.overlay.and_then(|o| o.list_patch(parent)) else {
            for &stmt in stmts {
                self.node(stmt);
                self.out.emit_newline();
            }
            return;
        };
        for (i, &stmt) in stmts.iter().enumerate() {
            // List positions fit u16 by NodeRange construction.
            let at = i as u32;
            for text in patch.inserted_at(at) {
                self.out.emit(text);
                self.out.emit_newline();
            }
            if !patch.is_deleted(at) {
                self.node(stmt);
                self.out.emit_newline();
            }
        }
        for text in patch.inserted_at(stmts.len() as u32) {
            self.out.emit(text);
            self.out.emit_newline();
        }
    }

    fn node(&mut self, id: NodeId) {
        match *self.tree.kind(id) {
            NodeKind::Block { stmts } => {
                self.out.emit("{");
                self.out.emit_newline();
                self.stmt_list(id, stmts);
                self.out.emit("}");
            }
            NodeKind::If {
                cond,
                then_branch,
                else_branch,
            } => {
                self.out.emit("if (");
                self.slot(id, Slot::Cond, cond);
                self.out.emit(") ");
                self.slot(id, Slot::Then, then_branch);
                if else_branch.is_valid() {
                    self.out.emit(" else ");
                    self.slot(id, Slot::Else, else_branch);
                }
            }
            NodeKind::Switch {
                discriminant,
                body,
            } => {
                self.out.emit("switch (");
                self.slot(id, Slot::Discriminant, discriminant);
                self.out.emit(") {");
                self.out.emit_newline();
                self.stmt_list(id, body);
                self.out.emit("}");
            }
            NodeKind::SwitchCase { label } => {
                if label.is_valid() {
                    self.out.emit("case ");
                    self.slot(id, Slot::Label, label);
                    self.out.emit(":");
                } else {
                    self.out.emit("default:");
                }
            }
            NodeKind::While { cond, body } => {
                self.out.emit("while (");
                self.slot(id, Slot::Cond, cond);
                self.out.emit(") ");
                self.slot(id, Slot::Body, body);
            }
            NodeKind::For {
                init,
                cond,
                step,
                body,
            } => {
                self.out.emit("for (");
                if init.is_valid() {
                    self.slot(id, Slot::Init, init);
                }
                self.out.emit("; ");
                if cond.is_valid() {
                    self.slot(id, Slot::Cond, cond);
                }
                self.out.emit("; ");
                if step.is_valid() {
                    self.slot(id, Slot::Step, step);
                }
                self.out.emit(") ");
                self.slot(id, Slot::Body, body);
            }
            NodeKind::Return { value } => {
                self.out.emit("return");
                if value.is_valid() {
                    self.out.emit_space();
                    self.slot(id, Slot::Value, value);
                }
                self.out.emit(";");
            }
            NodeKind::Throw { value } => {
                self.out.emit("throw ");
                self.slot(id, Slot::Value, value);
                self.out.emit(";");
            }
            NodeKind::Break => self.out.emit("break;"),
            NodeKind::Continue => self.out.emit("continue;"),
            NodeKind::VarDecl { ty, name, init } => {
                self.out.emit(self.interner.lookup(ty));
                self.out.emit_space();
                self.name(name);
                if init.is_valid() {
                    self.out.emit(" = ");
                    self.slot(id, Slot::Init, init);
                }
                self.out.emit(";");
            }
            NodeKind::ExprStmt { expr } => {
                self.slot(id, Slot::Expr, expr);
                self.out.emit(";");
            }
            NodeKind::Ident(name) => self.name(name),
            NodeKind::IntLit(v) => self.out.emit(&v.to_string()),
            NodeKind::FloatLit(bits) => self.out.emit(&f64::from_bits(bits).to_string()),
            NodeKind::BoolLit(v) => self.out.emit(if v { "true" } else { "false" }),
            NodeKind::StrLit(s) => {
                self.out.emit("\"");
                self.out.emit(self.interner.lookup(s));
                self.out.emit("\"");
            }
            NodeKind::CharLit(c) => {
                self.out.emit("'");
                self.out.emit(&c.to_string());
                self.out.emit("'");
            }
            NodeKind::NullLit => self.out.emit("null"),
            NodeKind::Assign { target, value } => {
                self.slot(id, Slot::Target, target);
                self.out.emit(" = ");
                self.slot(id, Slot::Source, value);
            }
            NodeKind::Binary { op, left, right } => {
                self.slot(id, Slot::Lhs, left);
                self.out.emit_space();
                self.out.emit(op.as_symbol());
                self.out.emit_space();
                self.slot(id, Slot::Rhs, right);
            }
            NodeKind::Unary { op, operand } => {
                self.out.emit(op.as_symbol());
                self.slot(id, Slot::Operand, operand);
            }
            NodeKind::Call {
                receiver,
                method,
                args,
            } => {
                if receiver.is_valid() {
                    self.slot(id, Slot::Receiver, receiver);
                    self.out.emit(".");
                }
                self.out.emit(self.interner.lookup(method));
                self.out.emit("(");
                for (i, &arg) in self.tree.list(args).iter().enumerate() {
                    if i > 0 {
                        self.out.emit(", ");
                    }
                    // Arg positions fit u16 by NodeRange construction.
                    self.slot(id, Slot::Arg(i as u16), arg);
                }
                self.out.emit(")");
            }
            NodeKind::FieldAccess { receiver, field } => {
                self.slot(id, Slot::Receiver, receiver);
                self.out.emit(".");
                self.out.emit(self.interner.lookup(field));
            }
            NodeKind::Index { receiver, index } => {
                self.slot(id, Slot::Receiver, receiver);
                self.out.emit("[");
                self.slot(id, Slot::IndexKey, index);
                self.out.emit("]");
            }
            NodeKind::Conditional {
                cond,
                then_expr,
                else_expr,
            } => {
                self.slot(id, Slot::Cond, cond);
                self.out.emit(" ? ");
                self.slot(id, Slot::Then, then_expr);
                self.out.emit(" : ");
                self.slot(id, Slot::Else, else_expr);
            }
        }
    }
}
