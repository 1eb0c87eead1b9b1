//! Per-donor candidate evaluation.
//!
//! One donor at a time: structural match, similarity score, then a fresh
//! overlay renders the hypothetical patch. A failed match or a rejected
//! edit discards the candidate; nothing touches the target tree.

use rustc_hash::FxHashMap;

use mend_ir::{NodeId, RenameMap, ScopeSet, StringInterner, SyntaxTree};
use mend_match::Matcher;
use mend_metric::MetricCache;
use mend_render::{render_overlaid, Overlay};

use crate::candidate::{DonorCandidate, RepairCandidate};

/// Evaluation state shared across donors for one target tree.
pub struct RepairContext<'a> {
    target: &'a SyntaxTree,
    interner: &'a StringInterner,
    target_scope: &'a ScopeSet,
    /// Node rendered as the patched artifact, normally the tree root.
    unit: NodeId,
    cache: MetricCache,
    /// One metric cache per donor tree; node IDs are tree-local, so donor
    /// vectors cannot share the target's cache.
    donor_caches: FxHashMap<usize, MetricCache>,
}

impl<'a> RepairContext<'a> {
    /// Create a context; `unit` is the node rendered as the patched
    /// artifact (normally the enclosing unit's root).
    pub fn new(
        target: &'a SyntaxTree,
        interner: &'a StringInterner,
        target_scope: &'a ScopeSet,
        unit: NodeId,
    ) -> Self {
        Self {
            target,
            interner,
            target_scope,
            unit,
            cache: MetricCache::new(),
            donor_caches: FxHashMap::default(),
        }
    }

    /// Evaluate one donor against one target statement.
    ///
    /// Returns `None` when the donor does not match or its edits are
    /// rejected by the overlay; both are expected search outcomes.
    pub fn evaluate(
        &mut self,
        target_id: NodeId,
        donor: &DonorCandidate<'_>,
        donor_index: usize,
    ) -> Option<RepairCandidate> {
        let matcher = Matcher::new(
            self.target,
            donor.tree,
            self.interner,
            self.target_scope,
            donor.scope,
        );
        let mut rename = RenameMap::new();
        let mut modifications = Vec::new();
        if !matcher.matches(target_id, donor.root, &mut rename, &mut modifications) {
            tracing::debug!(donor_index, "donor does not match target");
            return None;
        }

        let target_vector = self.cache.vector(self.target, target_id);
        let donor_vector = self
            .donor_caches
            .entry(donor_index)
            .or_insert_with(MetricCache::new)
            .vector(donor.tree, donor.root);
        let score = target_vector.similarity(&donor_vector);

        let mut overlay = Overlay::new();
        if let Err(err) = overlay.adapt_all(self.target, &modifications) {
            tracing::debug!(donor_index, %err, "candidate edits rejected");
            return None;
        }
        let patched = render_overlaid(self.target, self.interner, self.unit, &overlay);
        tracing::debug!(donor_index, score, edits = modifications.len(), "candidate rendered");

        Some(RepairCandidate {
            donor_index,
            target: target_id,
            modifications,
            rename,
            score,
            patched,
        })
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, reason = "Tests can panic")]

    use super::*;
    use mend_ir::{NodeKind, Span, TreeBuilder};
    use pretty_assertions::assert_eq;

    fn single_return() -> (SyntaxTree, NodeId) {
        let mut b = TreeBuilder::new();
        let ret = b.push(NodeKind::Return { value: NodeId::INVALID }, Span::DUMMY);
        let stmts = b.push_list(&[ret]);
        let block = b.push(NodeKind::Block { stmts }, Span::DUMMY);
        (b.finish(block).unwrap(), block)
    }

    #[test]
    fn test_donor_vectors_cached_per_donor() {
        let interner = StringInterner::new();
        let (target, t_root) = single_return();
        let (donor_tree, d_root) = single_return();
        let target_scope = ScopeSet::new();
        let donor_scope = ScopeSet::new();

        let mut ctx = RepairContext::new(&target, &interner, &target_scope, t_root);
        let donor = DonorCandidate {
            tree: &donor_tree,
            root: d_root,
            scope: &donor_scope,
        };

        let first = ctx.evaluate(t_root, &donor, 0).unwrap();
        let memoized = ctx.donor_caches[&0].len();
        assert!(memoized > 0);

        let second = ctx.evaluate(t_root, &donor, 0).unwrap();
        assert_eq!(ctx.donor_caches.len(), 1);
        assert_eq!(ctx.donor_caches[&0].len(), memoized);
        assert_eq!(first.score.to_bits(), second.score.to_bits());
    }
}
