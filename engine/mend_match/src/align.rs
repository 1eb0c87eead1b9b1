//! Ordered statement-list alignment.
//!
//! Aligns two statement sequences by longest common subsequence over node
//! kind tags. Aligned pairs are handed back for recursive matching;
//! leftovers become per-position insertions (donor-only) and deletions
//! (target-only). At the same target position, insertions come before
//! deletions.

use mend_ir::{NodeId, SyntaxTree};

/// One step of a statement-list alignment.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AlignOp {
    /// Target statement `target_index` lines up with donor statement
    /// `donor_index`; match them recursively.
    Pair {
        target_index: usize,
        donor_index: usize,
    },
    /// Donor statement `donor_index` has no target counterpart; insert it
    /// before the target statement currently at `at`.
    Insert { at: usize, donor_index: usize },
    /// Target statement at `at` has no donor counterpart; delete it.
    Delete { at: usize },
}

/// Align `target_stmts` against `donor_stmts` by kind tag.
pub fn align(
    target: &SyntaxTree,
    target_stmts: &[NodeId],
    donor: &SyntaxTree,
    donor_stmts: &[NodeId],
) -> Vec<AlignOp> {
    let n = target_stmts.len();
    let m = donor_stmts.len();

    // lcs[i][j] = LCS length of target_stmts[i..] vs donor_stmts[j..].
    let mut lcs = vec![vec![0u32; m + 1]; n + 1];
    for i in (0..n).rev() {
        for j in (0..m).rev() {
            let t_tag = target.kind(target_stmts[i]).tag();
            let d_tag = donor.kind(donor_stmts[j]).tag();
            lcs[i][j] = if t_tag == d_tag {
                1 + lcs[i + 1][j + 1]
            } else {
                lcs[i + 1][j].max(lcs[i][j + 1])
            };
        }
    }

    let mut ops = Vec::with_capacity(n.max(m));
    let (mut i, mut j) = (0, 0);
    while i < n && j < m {
        let t_tag = target.kind(target_stmts[i]).tag();
        let d_tag = donor.kind(donor_stmts[j]).tag();
        if t_tag == d_tag && lcs[i][j] == 1 + lcs[i + 1][j + 1] {
            ops.push(AlignOp::Pair {
                target_index: i,
                donor_index: j,
            });
            i += 1;
            j += 1;
        } else if lcs[i][j + 1] >= lcs[i + 1][j] {
            ops.push(AlignOp::Insert {
                at: i,
                donor_index: j,
            });
            j += 1;
        } else {
            ops.push(AlignOp::Delete { at: i });
            i += 1;
        }
    }
    while j < m {
        ops.push(AlignOp::Insert {
            at: i,
            donor_index: j,
        });
        j += 1;
    }
    while i < n {
        ops.push(AlignOp::Delete { at: i });
        i += 1;
    }
    ops
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, reason = "Tests can panic")]

    use super::*;
    use mend_ir::{NodeKind, Span, TreeBuilder};
    use pretty_assertions::assert_eq;

    fn stmt_tree(kinds: &[fn(&mut TreeBuilder) -> NodeId]) -> (mend_ir::SyntaxTree, Vec<NodeId>) {
        let mut b = TreeBuilder::new();
        let stmts: Vec<NodeId> = kinds.iter().map(|f| f(&mut b)).collect();
        let range = b.push_list(&stmts);
        let block = b.push(NodeKind::Block { stmts: range }, Span::DUMMY);
        (b.finish(block).unwrap(), stmts)
    }

    fn ret(b: &mut TreeBuilder) -> NodeId {
        b.push(NodeKind::Return { value: NodeId::INVALID }, Span::DUMMY)
    }

    fn brk(b: &mut TreeBuilder) -> NodeId {
        b.push(NodeKind::Break, Span::DUMMY)
    }

    fn cont(b: &mut TreeBuilder) -> NodeId {
        b.push(NodeKind::Continue, Span::DUMMY)
    }

    #[test]
    fn test_identical_lists_pair_fully() {
        let (target, t_stmts) = stmt_tree(&[ret, brk]);
        let (donor, d_stmts) = stmt_tree(&[ret, brk]);
        assert_eq!(
            align(&target, &t_stmts, &donor, &d_stmts),
            vec![
                AlignOp::Pair { target_index: 0, donor_index: 0 },
                AlignOp::Pair { target_index: 1, donor_index: 1 },
            ]
        );
    }

    #[test]
    fn test_donor_extra_statement_is_insert() {
        let (target, t_stmts) = stmt_tree(&[ret]);
        let (donor, d_stmts) = stmt_tree(&[brk, ret]);
        assert_eq!(
            align(&target, &t_stmts, &donor, &d_stmts),
            vec![
                AlignOp::Insert { at: 0, donor_index: 0 },
                AlignOp::Pair { target_index: 0, donor_index: 1 },
            ]
        );
    }

    #[test]
    fn test_target_extra_statement_is_delete() {
        let (target, t_stmts) = stmt_tree(&[brk, ret]);
        let (donor, d_stmts) = stmt_tree(&[ret]);
        assert_eq!(
            align(&target, &t_stmts, &donor, &d_stmts),
            vec![
                AlignOp::Delete { at: 0 },
                AlignOp::Pair { target_index: 1, donor_index: 0 },
            ]
        );
    }

    #[test]
    fn test_disjoint_lists_insert_before_delete() {
        let (target, t_stmts) = stmt_tree(&[cont]);
        let (donor, d_stmts) = stmt_tree(&[ret]);
        assert_eq!(
            align(&target, &t_stmts, &donor, &d_stmts),
            vec![
                AlignOp::Insert { at: 0, donor_index: 0 },
                AlignOp::Delete { at: 0 },
            ]
        );
    }

    #[test]
    fn test_empty_lists() {
        let (target, t_stmts) = stmt_tree(&[]);
        let (donor, d_stmts) = stmt_tree(&[]);
        assert_eq!(align(&target, &t_stmts, &donor, &d_stmts), vec![]);
    }
}
