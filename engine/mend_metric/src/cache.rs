//! Memoized feature vectors.
//!
//! Feature vectors are queried repeatedly while ranking donors against the
//! same target. The cache computes each subtree's vector once, bottom-up,
//! and serves repeats from the map. A cache is tied to one tree: node IDs
//! are tree-local, so reuse across trees would alias unrelated nodes.

use rustc_hash::FxHashMap;

use mend_ir::{NodeId, SyntaxTree};

use crate::vector::FeatureVector;

/// Per-tree memo of subtree feature vectors.
#[derive(Debug, Default)]
pub struct MetricCache {
    vectors: FxHashMap<NodeId, FeatureVector>,
}

impl MetricCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Feature vector of the subtree rooted at `id`.
    pub fn vector(&mut self, tree: &SyntaxTree, id: NodeId) -> FeatureVector {
        if let Some(&v) = self.vectors.get(&id) {
            return v;
        }
        let mut v = FeatureVector::of_node(tree, id);
        for child in tree.children(id) {
            let child_vector = self.vector(tree, child);
            v.merge(&child_vector);
        }
        self.vectors.insert(id, v);
        v
    }

    /// Number of memoized subtrees.
    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    /// Returns `true` if nothing is memoized yet.
    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, reason = "Tests can panic")]

    use super::*;
    use crate::vector::FeatureKind;
    use mend_ir::{Name, NodeKind, Span, TreeBuilder};
    use pretty_assertions::assert_eq;

    /// Three nested statements with known counts:
    /// `{ if (flag) { return 1; } }`
    fn nested_tree() -> (SyntaxTree, NodeId) {
        let mut b = TreeBuilder::new();
        let one = b.push(NodeKind::IntLit(1), Span::DUMMY);
        let ret = b.push(NodeKind::Return { value: one }, Span::DUMMY);
        let inner_stmts = b.push_list(&[ret]);
        let inner = b.push(NodeKind::Block { stmts: inner_stmts }, Span::DUMMY);
        let flag = b.push(NodeKind::Ident(Name::from_raw(1)), Span::DUMMY);
        let if_stmt = b.push(
            NodeKind::If {
                cond: flag,
                then_branch: inner,
                else_branch: NodeId::INVALID,
            },
            Span::DUMMY,
        );
        let outer_stmts = b.push_list(&[if_stmt]);
        let outer = b.push(NodeKind::Block { stmts: outer_stmts }, Span::DUMMY);
        (b.finish(outer).unwrap(), outer)
    }

    #[test]
    fn test_vector_counts() {
        let (tree, root) = nested_tree();
        let mut cache = MetricCache::new();
        let v = cache.vector(&tree, root);
        assert_eq!(v.get(FeatureKind::Block), 2);
        assert_eq!(v.get(FeatureKind::CondIf), 1);
        assert_eq!(v.get(FeatureKind::Return), 1);
        assert_eq!(v.get(FeatureKind::IntLiteral), 1);
        assert_eq!(v.get(FeatureKind::VarOccur), 1);
        assert_eq!(v.get(FeatureKind::VarBranchUse), 1);
    }

    #[test]
    fn test_parent_vector_is_additive() {
        let (tree, root) = nested_tree();
        let mut cache = MetricCache::new();
        let whole = cache.vector(&tree, root);

        let mut expected = FeatureVector::of_node(&tree, root);
        for child in tree.children(root) {
            let child_vector = cache.vector(&tree, child);
            expected.merge(&child_vector);
        }
        assert_eq!(whole, expected);
    }

    #[test]
    fn test_repeat_queries_hit_the_memo() {
        let (tree, root) = nested_tree();
        let mut cache = MetricCache::new();
        let first = cache.vector(&tree, root);
        let memoized = cache.len();
        let second = cache.vector(&tree, root);
        assert_eq!(first, second);
        assert_eq!(cache.len(), memoized);
    }
}
