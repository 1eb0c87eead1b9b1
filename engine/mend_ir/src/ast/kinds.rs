//! Syntax node kinds.
//!
//! One closed enum covers both syntactic families (statements and
//! expressions). The structural matcher compares any node against any node,
//! so keeping a single kind space avoids a parallel pair of hierarchies.
//!
//! All children are `NodeId` indices into the owning tree; optional children
//! use `NodeId::INVALID`. Ordered sequences use `NodeRange`.

use std::fmt;

use super::operators::{BinaryOp, UnaryOp};
use crate::{Name, NodeId, NodeRange};

/// Syntax node kind and payload.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub enum NodeKind {
    // Statements
    /// Braced statement sequence: `{ ... }`
    Block { stmts: NodeRange },

    /// Conditional: `if (cond) then else alt`
    ///
    /// `else_branch` is `NodeId::INVALID` when absent.
    If {
        cond: NodeId,
        then_branch: NodeId,
        else_branch: NodeId,
    },

    /// Switch: `switch (discriminant) { body }`
    ///
    /// The body interleaves `SwitchCase` labels and ordinary statements, as
    /// in the source language.
    Switch {
        discriminant: NodeId,
        body: NodeRange,
    },

    /// Case label: `case label:` or `default:` (label invalid).
    SwitchCase { label: NodeId },

    /// While loop: `while (cond) body`
    While { cond: NodeId, body: NodeId },

    /// For loop: `for (init; cond; step) body`
    ///
    /// Header slots are expressions; any of them may be absent.
    For {
        init: NodeId,
        cond: NodeId,
        step: NodeId,
        body: NodeId,
    },

    /// Return: `return value;` (`value` invalid for a bare return).
    Return { value: NodeId },

    /// Throw: `throw value;`
    Throw { value: NodeId },

    /// Break: `break;`
    Break,

    /// Continue: `continue;`
    Continue,

    /// Variable declaration: `ty name = init;` (`init` optional).
    VarDecl { ty: Name, name: Name, init: NodeId },

    /// Expression statement: `expr;`
    ExprStmt { expr: NodeId },

    // Expressions
    /// Simple name.
    Ident(Name),

    /// Integer literal.
    IntLit(i64),

    /// Float literal (stored as bits for Hash).
    FloatLit(u64),

    /// Boolean literal.
    BoolLit(bool),

    /// String literal (interned).
    StrLit(Name),

    /// Char literal.
    CharLit(char),

    /// Null literal.
    NullLit,

    /// Assignment expression: `target = value`
    Assign { target: NodeId, value: NodeId },

    /// Binary operation: `left op right`
    Binary {
        op: BinaryOp,
        left: NodeId,
        right: NodeId,
    },

    /// Unary operation: `op operand`
    Unary { op: UnaryOp, operand: NodeId },

    /// Call: `receiver.method(args)` or `method(args)` (receiver invalid).
    Call {
        receiver: NodeId,
        method: Name,
        args: NodeRange,
    },

    /// Field access: `receiver.field`
    FieldAccess { receiver: NodeId, field: Name },

    /// Subscript: `receiver[index]`
    Index { receiver: NodeId, index: NodeId },

    /// Ternary: `cond ? then_expr : else_expr`
    Conditional {
        cond: NodeId,
        then_expr: NodeId,
        else_expr: NodeId,
    },
}

impl NodeKind {
    /// Returns `true` for statement-family kinds.
    pub const fn is_statement(&self) -> bool {
        matches!(
            self,
            NodeKind::Block { .. }
                | NodeKind::If { .. }
                | NodeKind::Switch { .. }
                | NodeKind::SwitchCase { .. }
                | NodeKind::While { .. }
                | NodeKind::For { .. }
                | NodeKind::Return { .. }
                | NodeKind::Throw { .. }
                | NodeKind::Break
                | NodeKind::Continue
                | NodeKind::VarDecl { .. }
                | NodeKind::ExprStmt { .. }
        )
    }

    /// Returns `true` for leaf literals (no children, compared by value).
    pub const fn is_literal(&self) -> bool {
        matches!(
            self,
            NodeKind::IntLit(_)
                | NodeKind::FloatLit(_)
                | NodeKind::BoolLit(_)
                | NodeKind::StrLit(_)
                | NodeKind::CharLit(_)
                | NodeKind::NullLit
        )
    }

    /// Returns `true` if `other` has the same kind tag, ignoring payloads
    /// and child identities.
    pub fn same_kind(&self, other: &NodeKind) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }

    /// Short tag for diagnostics.
    pub const fn tag(&self) -> &'static str {
        match self {
            NodeKind::Block { .. } => "block",
            NodeKind::If { .. } => "if",
            NodeKind::Switch { .. } => "switch",
            NodeKind::SwitchCase { .. } => "case",
            NodeKind::While { .. } => "while",
            NodeKind::For { .. } => "for",
            NodeKind::Return { .. } => "return",
            NodeKind::Throw { .. } => "throw",
            NodeKind::Break => "break",
            NodeKind::Continue => "continue",
            NodeKind::VarDecl { .. } => "var-decl",
            NodeKind::ExprStmt { .. } => "expr-stmt",
            NodeKind::Ident(_) => "ident",
            NodeKind::IntLit(_) => "int-lit",
            NodeKind::FloatLit(_) => "float-lit",
            NodeKind::BoolLit(_) => "bool-lit",
            NodeKind::StrLit(_) => "str-lit",
            NodeKind::CharLit(_) => "char-lit",
            NodeKind::NullLit => "null-lit",
            NodeKind::Assign { .. } => "assign",
            NodeKind::Binary { .. } => "binary",
            NodeKind::Unary { .. } => "unary",
            NodeKind::Call { .. } => "call",
            NodeKind::FieldAccess { .. } => "field",
            NodeKind::Index { .. } => "index",
            NodeKind::Conditional { .. } => "ternary",
        }
    }
}

impl fmt::Debug for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_kind_ignores_payload() {
        let a = NodeKind::IntLit(1);
        let b = NodeKind::IntLit(2);
        let c = NodeKind::BoolLit(true);
        assert!(a.same_kind(&b));
        assert!(!a.same_kind(&c));
    }

    #[test]
    fn test_family_predicates() {
        assert!(NodeKind::Break.is_statement());
        assert!(!NodeKind::NullLit.is_statement());
        assert!(NodeKind::NullLit.is_literal());
        assert!(!NodeKind::Ident(Name::EMPTY).is_literal());
    }
}
