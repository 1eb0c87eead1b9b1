//! AST node kinds and child-use classification.

mod kinds;
mod operators;
mod use_kind;

pub use kinds::NodeKind;
pub use operators::{BinaryOp, UnaryOp};
pub use use_kind::UseKind;
