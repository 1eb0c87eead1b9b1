//! Structural summary walks.
//!
//! Each walk produces the node's own contribution unioned with the
//! recursive contribution of all children, in child order. All walks are
//! pure reads over the tree and may be repeated freely.

use mend_ir::visitor::{walk_node, Visitor};
use mend_ir::{NodeId, NodeKind, SyntaxTree, UseKind};

use crate::shapes::{
    CallShape, CondKind, CondShape, LoopKind, LoopShape, OpShape, OperatorUse, OtherKind,
    OtherShape, VarUse,
};

/// Literal nodes under `id`, in child order.
pub fn literals(tree: &SyntaxTree, id: NodeId) -> Vec<NodeId> {
    let mut v = Collector::new(|out: &mut Vec<NodeId>, node, tree: &SyntaxTree| {
        if tree.kind(node).is_literal() {
            out.push(node);
        }
    });
    v.visit_node(id, tree);
    v.items
}

/// Variable occurrences under `id`, tagged with how their parent uses them.
pub fn variables(tree: &SyntaxTree, id: NodeId) -> Vec<VarUse> {
    let mut v = Collector::new(|out: &mut Vec<VarUse>, node, tree: &SyntaxTree| {
        if let NodeKind::Ident(name) = *tree.kind(node) {
            let use_kind = tree
                .parent(node)
                .map_or(UseKind::Plain, |p| tree.use_kind(p, node));
            out.push(VarUse {
                node,
                name,
                use_kind,
            });
        }
    });
    v.visit_node(id, tree);
    v.items
}

/// Loop structures under `id`.
pub fn loop_shapes(tree: &SyntaxTree, id: NodeId) -> Vec<LoopShape> {
    let mut v = Collector::new(|out: &mut Vec<LoopShape>, node, tree: &SyntaxTree| {
        let kind = match tree.kind(node) {
            NodeKind::While { .. } => Some(LoopKind::While),
            NodeKind::For { .. } => Some(LoopKind::For),
            _ => None,
        };
        if let Some(kind) = kind {
            out.push(LoopShape { node, kind });
        }
    });
    v.visit_node(id, tree);
    v.items
}

/// Conditional structures under `id`.
pub fn cond_shapes(tree: &SyntaxTree, id: NodeId) -> Vec<CondShape> {
    let mut v = Collector::new(|out: &mut Vec<CondShape>, node, tree: &SyntaxTree| {
        let kind = match tree.kind(node) {
            NodeKind::If { .. } => Some(CondKind::If),
            NodeKind::Switch { .. } => Some(CondKind::Switch),
            NodeKind::Conditional { .. } => Some(CondKind::Ternary),
            _ => None,
        };
        if let Some(kind) = kind {
            out.push(CondShape { node, kind });
        }
    });
    v.visit_node(id, tree);
    v.items
}

/// Method calls under `id`.
pub fn calls(tree: &SyntaxTree, id: NodeId) -> Vec<CallShape> {
    let mut v = Collector::new(|out: &mut Vec<CallShape>, node, tree: &SyntaxTree| {
        if let NodeKind::Call {
            receiver,
            method,
            args,
        } = *tree.kind(node)
        {
            out.push(CallShape {
                node,
                method,
                arity: tree.list(args).len(),
                has_receiver: receiver.is_valid(),
            });
        }
    });
    v.visit_node(id, tree);
    v.items
}

/// Operator occurrences under `id`. Assignments count as operators.
pub fn operators(tree: &SyntaxTree, id: NodeId) -> Vec<OperatorUse> {
    let mut v = Collector::new(|out: &mut Vec<OperatorUse>, node, tree: &SyntaxTree| {
        let op = match *tree.kind(node) {
            NodeKind::Binary { op, .. } => Some(OpShape::Binary(op)),
            NodeKind::Unary { op, .. } => Some(OpShape::Unary(op)),
            NodeKind::Assign { .. } => Some(OpShape::Assign),
            _ => None,
        };
        if let Some(op) = op {
            out.push(OperatorUse { node, op });
        }
    });
    v.visit_node(id, tree);
    v.items
}

/// Structures under `id` not covered by the other walks.
pub fn other_shapes(tree: &SyntaxTree, id: NodeId) -> Vec<OtherShape> {
    let mut v = Collector::new(|out: &mut Vec<OtherShape>, node, tree: &SyntaxTree| {
        let kind = match tree.kind(node) {
            NodeKind::Return { .. } => Some(OtherKind::Return),
            NodeKind::Throw { .. } => Some(OtherKind::Throw),
            NodeKind::Break => Some(OtherKind::Break),
            NodeKind::Continue => Some(OtherKind::Continue),
            NodeKind::VarDecl { .. } => Some(OtherKind::VarDecl),
            NodeKind::FieldAccess { .. } => Some(OtherKind::FieldAccess),
            NodeKind::Index { .. } => Some(OtherKind::Index),
            NodeKind::Block { .. } => Some(OtherKind::Block),
            _ => None,
        };
        if let Some(kind) = kind {
            out.push(OtherShape { node, kind });
        }
    });
    v.visit_node(id, tree);
    v.items
}

/// Pre-order collector: the node's own item first, then children.
struct Collector<T, F> {
    items: Vec<T>,
    extract: F,
}

impl<T, F> Collector<T, F>
where
    F: FnMut(&mut Vec<T>, NodeId, &SyntaxTree),
{
    fn new(extract: F) -> Self {
        Self {
            items: Vec::new(),
            extract,
        }
    }
}

impl<T, F> Visitor for Collector<T, F>
where
    F: FnMut(&mut Vec<T>, NodeId, &SyntaxTree),
{
    fn visit_node(&mut self, id: NodeId, tree: &SyntaxTree) {
        (self.extract)(&mut self.items, id, tree);
        walk_node(self, id, tree);
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, reason = "Tests can panic")]

    use super::*;
    use mend_ir::{Name, Span, StringInterner, TreeBuilder};
    use pretty_assertions::assert_eq;

    /// `while (i < n) { sum = sum + a[i]; }`
    fn loop_tree(interner: &StringInterner) -> (SyntaxTree, NodeId) {
        let i = interner.intern("i");
        let n = interner.intern("n");
        let sum = interner.intern("sum");
        let a = interner.intern("a");
        let mut b = TreeBuilder::new();
        let cond = {
            let lhs = b.push(NodeKind::Ident(i), Span::DUMMY);
            let rhs = b.push(NodeKind::Ident(n), Span::DUMMY);
            b.push(
                NodeKind::Binary {
                    op: mend_ir::BinaryOp::Lt,
                    left: lhs,
                    right: rhs,
                },
                Span::DUMMY,
            )
        };
        let assign_stmt = {
            let target = b.push(NodeKind::Ident(sum), Span::DUMMY);
            let lhs = b.push(NodeKind::Ident(sum), Span::DUMMY);
            let recv = b.push(NodeKind::Ident(a), Span::DUMMY);
            let idx = b.push(NodeKind::Ident(i), Span::DUMMY);
            let elem = b.push(NodeKind::Index { receiver: recv, index: idx }, Span::DUMMY);
            let plus = b.push(
                NodeKind::Binary {
                    op: mend_ir::BinaryOp::Add,
                    left: lhs,
                    right: elem,
                },
                Span::DUMMY,
            );
            let assign = b.push(NodeKind::Assign { target, value: plus }, Span::DUMMY);
            b.push(NodeKind::ExprStmt { expr: assign }, Span::DUMMY)
        };
        let stmts = b.push_list(&[assign_stmt]);
        let body = b.push(NodeKind::Block { stmts }, Span::DUMMY);
        let while_stmt = b.push(NodeKind::While { cond, body }, Span::DUMMY);
        (b.finish(while_stmt).unwrap(), while_stmt)
    }

    #[test]
    fn test_variables_tagged_by_use() {
        let interner = StringInterner::new();
        let (tree, root) = loop_tree(&interner);
        let vars = variables(&tree, root);
        let names: Vec<Name> = vars.iter().map(|v| v.name).collect();
        assert_eq!(
            names,
            ["i", "n", "sum", "sum", "a", "i"]
                .iter()
                .map(|s| interner.intern(s))
                .collect::<Vec<_>>()
        );
        // Loop bound operands sit under the Binary, not the While, so only
        // direct children of tagged parents carry specific uses.
        assert_eq!(vars[2].use_kind, UseKind::AssignTarget);
        assert_eq!(vars[3].use_kind, UseKind::Plain);
        assert_eq!(vars[4].use_kind, UseKind::CallReceiver);
        assert_eq!(vars[5].use_kind, UseKind::IndexKey);
    }

    #[test]
    fn test_loops_operators_and_others() {
        let interner = StringInterner::new();
        let (tree, root) = loop_tree(&interner);

        let loops = loop_shapes(&tree, root);
        assert_eq!(loops.len(), 1);
        assert_eq!(loops[0].kind, LoopKind::While);

        let ops = operators(&tree, root);
        assert_eq!(
            ops.iter().map(|o| o.op).collect::<Vec<_>>(),
            vec![
                OpShape::Binary(mend_ir::BinaryOp::Lt),
                OpShape::Assign,
                OpShape::Binary(mend_ir::BinaryOp::Add),
            ]
        );

        let others = other_shapes(&tree, root);
        assert_eq!(
            others.iter().map(|o| o.kind).collect::<Vec<_>>(),
            vec![OtherKind::Block, OtherKind::Index]
        );

        assert_eq!(cond_shapes(&tree, root), vec![]);
        assert_eq!(calls(&tree, root), vec![]);
        assert_eq!(literals(&tree, root), vec![]);
    }
}
