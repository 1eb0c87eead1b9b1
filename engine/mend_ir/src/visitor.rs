//! Syntax tree visitor.
//!
//! Generic traversal over the flat node arena. The visitor can mutate its
//! own state during traversal; the tree remains immutable.
//!
//! The default `visit_node` calls [`walk_node`], which descends into
//! children in declared syntactic order. Override `visit_node` to add
//! behavior at each node and call `walk_node` to continue downward.

use crate::{NodeId, SyntaxTree};

/// Tree visitor trait.
pub trait Visitor {
    /// Visit a node. The default implementation just walks children.
    fn visit_node(&mut self, id: NodeId, tree: &SyntaxTree) {
        walk_node(self, id, tree);
    }
}

/// Walk a node's children in declared syntactic order.
pub fn walk_node<V: Visitor + ?Sized>(visitor: &mut V, id: NodeId, tree: &SyntaxTree) {
    for child in tree.children(id) {
        visitor.visit_node(child, tree);
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, reason = "Tests can panic")]

    use super::*;
    use crate::ast::NodeKind;
    use crate::{Name, Span, TreeBuilder};

    /// Visitor that counts nodes.
    struct NodeCounter {
        count: usize,
    }

    impl Visitor for NodeCounter {
        fn visit_node(&mut self, id: NodeId, tree: &SyntaxTree) {
            self.count += 1;
            walk_node(self, id, tree);
        }
    }

    /// Visitor that records identifier names in visit order.
    struct IdentCollector {
        idents: Vec<Name>,
    }

    impl Visitor for IdentCollector {
        fn visit_node(&mut self, id: NodeId, tree: &SyntaxTree) {
            if let NodeKind::Ident(name) = *tree.kind(id) {
                self.idents.push(name);
            }
            walk_node(self, id, tree);
        }
    }

    #[test]
    fn test_visit_counts_all_nodes() {
        let mut b = TreeBuilder::new();
        let x = b.push(NodeKind::Ident(Name::from_raw(1)), Span::DUMMY);
        let one = b.push(NodeKind::IntLit(1), Span::DUMMY);
        let cmp = b.push(
            NodeKind::Binary {
                op: crate::ast::BinaryOp::Lt,
                left: x,
                right: one,
            },
            Span::DUMMY,
        );
        let ret = b.push(NodeKind::Return { value: cmp }, Span::DUMMY);
        let tree = b.finish(ret).unwrap();

        let mut counter = NodeCounter { count: 0 };
        counter.visit_node(ret, &tree);
        assert_eq!(counter.count, 4);
    }

    #[test]
    fn test_visit_order_is_syntactic() {
        let mut b = TreeBuilder::new();
        let a = b.push(NodeKind::Ident(Name::from_raw(1)), Span::DUMMY);
        let c = b.push(NodeKind::Ident(Name::from_raw(2)), Span::DUMMY);
        let assign = b.push(NodeKind::Assign { target: a, value: c }, Span::DUMMY);
        let stmt = b.push(NodeKind::ExprStmt { expr: assign }, Span::DUMMY);
        let stmts = b.push_list(&[stmt]);
        let block = b.push(NodeKind::Block { stmts }, Span::DUMMY);
        let tree = b.finish(block).unwrap();

        let mut collector = IdentCollector { idents: vec![] };
        collector.visit_node(block, &tree);
        assert_eq!(collector.idents, vec![Name::from_raw(1), Name::from_raw(2)]);
    }
}
