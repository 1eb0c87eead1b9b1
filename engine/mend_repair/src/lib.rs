//! mend repair - candidate generation driver
//!
//! Composes the core layers into the repair pipeline: fault-localization
//! spans select target statements, each donor fragment is matched and
//! rendered into a hypothetical patched unit, and candidates are ranked by
//! structural similarity. The best-ranked patched text is the engine's
//! output, handed to external compile/test collaborators.

mod candidate;
mod evaluate;
mod rank;
mod suspicious;

pub use candidate::{DonorCandidate, RepairCandidate};
pub use evaluate::RepairContext;
pub use rank::rank;
pub use suspicious::{select_targets, SuspiciousSite};
