//! mend match - structural matching for the repair engine
//!
//! Decides whether a donor fragment can serve as a fix ingredient for a
//! target fragment, and if so with which edits and under which variable
//! renaming. Matching is a best-effort search, not a unifier: a negative
//! answer is an expected outcome, never an error.

mod align;
mod matcher;

pub use align::{align, AlignOp};
pub use matcher::Matcher;
