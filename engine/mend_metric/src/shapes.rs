//! Structural summary items.
//!
//! The extraction walks in [`crate::collect`] report what a subtree
//! contains: its literals, variable occurrences tagged by use, control
//! structures, calls, and operators. Donor ranking consumes the condensed
//! [`FeatureVector`](crate::FeatureVector) form; the itemized summaries
//! keep the node identities for callers that need to look back into the
//! tree.

use mend_ir::{BinaryOp, Name, NodeId, UnaryOp, UseKind};

/// One variable occurrence, tagged with how the enclosing node uses it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VarUse {
    pub node: NodeId,
    pub name: Name,
    pub use_kind: UseKind,
}

/// Loop structure family.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopKind {
    While,
    For,
}

/// One loop structure.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LoopShape {
    pub node: NodeId,
    pub kind: LoopKind,
}

/// Conditional structure family.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CondKind {
    If,
    Switch,
    Ternary,
}

/// One conditional structure.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CondShape {
    pub node: NodeId,
    pub kind: CondKind,
}

/// One method call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CallShape {
    pub node: NodeId,
    pub method: Name,
    pub arity: usize,
    pub has_receiver: bool,
}

/// Operator family of one operation node.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OpShape {
    Binary(BinaryOp),
    Unary(UnaryOp),
    Assign,
}

/// One operator occurrence.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OperatorUse {
    pub node: NodeId,
    pub op: OpShape,
}

/// Remaining statement/expression structures tracked for similarity.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OtherKind {
    Return,
    Throw,
    Break,
    Continue,
    VarDecl,
    FieldAccess,
    Index,
    Block,
}

/// One structure not covered by the loop/cond/call/operator walks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OtherShape {
    pub node: NodeId,
    pub kind: OtherKind,
}
