//! mend metric - structural similarity for donor ranking
//!
//! Summarizes subtrees (literals, variable uses, control structures,
//! calls, operators) and condenses the summaries into additive
//! [`FeatureVector`]s compared by cosine similarity. All walks are pure
//! reads; the [`MetricCache`] memoizes per-subtree vectors for one tree.

mod cache;
pub mod collect;
mod shapes;
mod vector;

pub use cache::MetricCache;
pub use shapes::{
    CallShape, CondKind, CondShape, LoopKind, LoopShape, OpShape, OperatorUse, OtherKind,
    OtherShape, VarUse,
};
pub use vector::{FeatureKind, FeatureVector};
