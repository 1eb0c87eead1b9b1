//! Suspicious-site target selection.
//!
//! Fault localization reports scored line spans. The core treats the report
//! as an opaque selection list: each site picks the smallest statement node
//! covering it, and matching runs against those nodes only.

use mend_ir::{NodeId, Span, SyntaxTree};

/// One fault-localization report entry.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SuspiciousSite {
    /// Reported line span.
    pub span: Span,
    /// Suspiciousness score; higher is more suspect.
    pub score: f64,
}

impl SuspiciousSite {
    /// Site covering a single line.
    pub fn line(line: u32, score: f64) -> Self {
        Self {
            span: Span::line(line),
            score,
        }
    }
}

/// Target statements for a suspicious-site report, most suspect first.
///
/// Each site selects the smallest statement node whose span covers it;
/// sites nothing covers select nothing. Duplicates are kept once, at the
/// position of their best-scored site.
pub fn select_targets(tree: &SyntaxTree, sites: &[SuspiciousSite]) -> Vec<NodeId> {
    let mut ordered: Vec<&SuspiciousSite> = sites.iter().collect();
    ordered.sort_by(|a, b| b.score.total_cmp(&a.score));

    let mut targets = Vec::new();
    for site in ordered {
        let Some(node) = covering_statement(tree, site.span) else {
            continue;
        };
        if !targets.contains(&node) {
            targets.push(node);
        }
    }
    targets
}

/// Smallest statement node covering `span`. Ties prefer the deeper node
/// (children are allocated before parents, so the lower ID).
fn covering_statement(tree: &SyntaxTree, span: Span) -> Option<NodeId> {
    let mut best: Option<(u32, NodeId)> = None;
    for raw in 0..tree.len() {
        // Allocation is bounded by u32 in the builder.
        #[allow(clippy::cast_possible_truncation, reason = "len() is u32-bounded")]
        let id = NodeId::new(raw as u32);
        if !tree.kind(id).is_statement() || !tree.span(id).contains_span(span) {
            continue;
        }
        let width = tree.span(id).lines();
        if best.is_none_or(|(w, _)| width < w) {
            best = Some((width, id));
        }
    }
    best.map(|(_, id)| id)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, reason = "Tests can panic")]

    use super::*;
    use mend_ir::{Name, NodeKind, TreeBuilder};
    use pretty_assertions::assert_eq;

    /// Lines 1-4:
    /// ```text
    /// 1  {
    /// 2    x = 1;
    /// 3    return;
    /// 4  }
    /// ```
    fn spanned_block() -> (SyntaxTree, NodeId, NodeId, NodeId) {
        let mut b = TreeBuilder::new();
        let x = b.push(NodeKind::Ident(Name::from_raw(1)), Span::line(2));
        let one = b.push(NodeKind::IntLit(1), Span::line(2));
        let assign = b.push(NodeKind::Assign { target: x, value: one }, Span::line(2));
        let assign_stmt = b.push(NodeKind::ExprStmt { expr: assign }, Span::line(2));
        let ret = b.push(NodeKind::Return { value: NodeId::INVALID }, Span::line(3));
        let stmts = b.push_list(&[assign_stmt, ret]);
        let block = b.push(NodeKind::Block { stmts }, Span::new(1, 4));
        (b.finish(block).unwrap(), block, assign_stmt, ret)
    }

    #[test]
    fn test_picks_smallest_covering_statement() {
        let (tree, _, assign_stmt, ret) = spanned_block();
        assert_eq!(
            select_targets(&tree, &[SuspiciousSite::line(2, 0.9)]),
            vec![assign_stmt]
        );
        assert_eq!(
            select_targets(&tree, &[SuspiciousSite::line(3, 0.9)]),
            vec![ret]
        );
    }

    #[test]
    fn test_block_line_falls_back_to_block() {
        let (tree, block, _, _) = spanned_block();
        assert_eq!(
            select_targets(&tree, &[SuspiciousSite::line(4, 0.5)]),
            vec![block]
        );
    }

    #[test]
    fn test_ordered_by_score_and_deduplicated() {
        let (tree, _, assign_stmt, ret) = spanned_block();
        let sites = [
            SuspiciousSite::line(2, 0.2),
            SuspiciousSite::line(3, 0.8),
            SuspiciousSite::line(2, 0.1),
        ];
        assert_eq!(select_targets(&tree, &sites), vec![ret, assign_stmt]);
    }

    #[test]
    fn test_uncovered_site_selects_nothing() {
        let (tree, _, _, _) = spanned_block();
        assert_eq!(select_targets(&tree, &[SuspiciousSite::line(99, 1.0)]), vec![]);
    }
}
