//! Candidate ranking.

use crate::candidate::RepairCandidate;

/// Order candidates best-first: similarity score descending. The sort is
/// stable, so score ties keep donor-corpus order.
pub fn rank(candidates: &mut [RepairCandidate]) {
    candidates.sort_by(|a, b| b.score.total_cmp(&a.score));
}
