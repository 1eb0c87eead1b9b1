//! Candidate types.

use mend_ir::{Modification, NodeId, RenameMap, ScopeSet, SyntaxTree};

/// One donor fragment offered to the matcher, with the scope at its
/// original location.
#[derive(Clone, Copy)]
pub struct DonorCandidate<'a> {
    pub tree: &'a SyntaxTree,
    pub root: NodeId,
    pub scope: &'a ScopeSet,
}

/// A successfully evaluated repair candidate.
#[derive(Clone, Debug)]
pub struct RepairCandidate {
    /// Position of the donor in the corpus it came from.
    pub donor_index: usize,
    /// Target statement the candidate repairs.
    pub target: NodeId,
    /// Edits, positioned against target-tree nodes.
    pub modifications: Vec<Modification>,
    /// Donor-to-target name bindings the edit text assumes.
    pub rename: RenameMap,
    /// Structural similarity of donor and target, in `[0, 1]`.
    pub score: f64,
    /// Fully rendered patched unit, ready for external compile/test.
    pub patched: String,
}
