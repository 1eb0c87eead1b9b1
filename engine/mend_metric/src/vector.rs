//! Numeric feature vectors.
//!
//! Condenses a subtree's structural summary into fixed-width counts used
//! for donor ranking. The vector is strictly additive: a parent's vector
//! equals its own contribution combined with the vectors of all children.

use mend_ir::{NodeId, NodeKind, SyntaxTree, UseKind};

/// One counted structural feature.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(usize)]
pub enum FeatureKind {
    IntLiteral,
    FloatLiteral,
    BoolLiteral,
    StrLiteral,
    CharLiteral,
    NullLiteral,
    /// Any variable occurrence.
    VarOccur,
    /// Variable used directly as a branch condition or case label.
    VarBranchUse,
    /// Variable used directly in a loop header or body position.
    VarLoopUse,
    /// Variable used directly as a call receiver or argument.
    VarCallUse,
    /// Variable used directly on either side of an assignment or as an
    /// initializer.
    VarAssignUse,
    LoopWhile,
    LoopFor,
    CondIf,
    CondSwitch,
    CondTernary,
    Call,
    OpArith,
    OpCompare,
    OpLogic,
    OpBit,
    OpUnary,
    OpAssign,
    Return,
    Throw,
    Break,
    Continue,
    VarDecl,
    FieldAccess,
    IndexAccess,
    Block,
}

impl FeatureKind {
    /// Number of tracked features.
    pub const COUNT: usize = 31;
}

/// Fixed-width structural feature counts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct FeatureVector([u32; FeatureKind::COUNT]);

impl FeatureVector {
    /// The zero vector.
    pub const ZERO: FeatureVector = FeatureVector([0; FeatureKind::COUNT]);

    /// Count for one feature.
    #[inline]
    pub fn get(&self, kind: FeatureKind) -> u32 {
        self.0[kind as usize]
    }

    /// Increment one feature count.
    #[inline]
    pub fn bump(&mut self, kind: FeatureKind) {
        self.0[kind as usize] = self.0[kind as usize].saturating_add(1);
    }

    /// Add another vector into this one.
    pub fn merge(&mut self, other: &FeatureVector) {
        for (slot, &count) in self.0.iter_mut().zip(other.0.iter()) {
            *slot = slot.saturating_add(count);
        }
    }

    /// Sum of two vectors.
    #[must_use]
    pub fn combine(mut self, other: &FeatureVector) -> FeatureVector {
        self.merge(other);
        self
    }

    /// Total count across all features.
    pub fn total(&self) -> u64 {
        self.0.iter().map(|&c| u64::from(c)).sum()
    }

    /// A node's own contribution, excluding children.
    ///
    /// Variable-use tagging is part of the using parent's contribution: a
    /// parent whose direct child is an identifier counts the tagged use,
    /// while the identifier node itself counts one plain occurrence. This
    /// keeps the vector additive over the tree.
    pub fn of_node(tree: &SyntaxTree, id: NodeId) -> FeatureVector {
        let mut v = FeatureVector::ZERO;
        match *tree.kind(id) {
            NodeKind::IntLit(_) => v.bump(FeatureKind::IntLiteral),
            NodeKind::FloatLit(_) => v.bump(FeatureKind::FloatLiteral),
            NodeKind::BoolLit(_) => v.bump(FeatureKind::BoolLiteral),
            NodeKind::StrLit(_) => v.bump(FeatureKind::StrLiteral),
            NodeKind::CharLit(_) => v.bump(FeatureKind::CharLiteral),
            NodeKind::NullLit => v.bump(FeatureKind::NullLiteral),
            NodeKind::Ident(_) => v.bump(FeatureKind::VarOccur),
            NodeKind::While { .. } => v.bump(FeatureKind::LoopWhile),
            NodeKind::For { .. } => v.bump(FeatureKind::LoopFor),
            NodeKind::If { .. } => v.bump(FeatureKind::CondIf),
            NodeKind::Switch { .. } => v.bump(FeatureKind::CondSwitch),
            NodeKind::Conditional { .. } => v.bump(FeatureKind::CondTernary),
            NodeKind::Call { .. } => v.bump(FeatureKind::Call),
            NodeKind::Binary { op, .. } => {
                if op.is_comparison() {
                    v.bump(FeatureKind::OpCompare);
                } else if op.is_logical() {
                    v.bump(FeatureKind::OpLogic);
                } else if op.is_bitwise() {
                    v.bump(FeatureKind::OpBit);
                } else {
                    v.bump(FeatureKind::OpArith);
                }
            }
            NodeKind::Unary { .. } => v.bump(FeatureKind::OpUnary),
            NodeKind::Assign { .. } => v.bump(FeatureKind::OpAssign),
            NodeKind::Return { .. } => v.bump(FeatureKind::Return),
            NodeKind::Throw { .. } => v.bump(FeatureKind::Throw),
            NodeKind::Break => v.bump(FeatureKind::Break),
            NodeKind::Continue => v.bump(FeatureKind::Continue),
            NodeKind::VarDecl { .. } => v.bump(FeatureKind::VarDecl),
            NodeKind::FieldAccess { .. } => v.bump(FeatureKind::FieldAccess),
            NodeKind::Index { .. } => v.bump(FeatureKind::IndexAccess),
            NodeKind::Block { .. } => v.bump(FeatureKind::Block),
            NodeKind::SwitchCase { .. } | NodeKind::ExprStmt { .. } => {}
        }

        for child in tree.children(id) {
            if !matches!(tree.kind(child), NodeKind::Ident(_)) {
                continue;
            }
            match tree.use_kind(id, child) {
                UseKind::Branch | UseKind::Discriminant | UseKind::CaseLabel => {
                    v.bump(FeatureKind::VarBranchUse);
                }
                UseKind::LoopBound | UseKind::LoopStep | UseKind::LoopBody => {
                    v.bump(FeatureKind::VarLoopUse);
                }
                UseKind::CallReceiver | UseKind::CallArgument => {
                    v.bump(FeatureKind::VarCallUse);
                }
                UseKind::AssignTarget | UseKind::AssignSource | UseKind::Initializer => {
                    v.bump(FeatureKind::VarAssignUse);
                }
                UseKind::SwitchBody
                | UseKind::BranchBody
                | UseKind::ReturnValue
                | UseKind::Thrown
                | UseKind::IndexKey
                | UseKind::Plain => {}
            }
        }

        v
    }

    /// Cosine similarity in `[0, 1]`. Two zero vectors are identical in
    /// shape, so their similarity is 1.0.
    pub fn similarity(&self, other: &FeatureVector) -> f64 {
        let dot: u64 = self
            .0
            .iter()
            .zip(other.0.iter())
            .map(|(&a, &b)| u64::from(a) * u64::from(b))
            .sum();
        let norm_a: u64 = self.0.iter().map(|&a| u64::from(a) * u64::from(a)).sum();
        let norm_b: u64 = other.0.iter().map(|&b| u64::from(b) * u64::from(b)).sum();
        match (norm_a, norm_b) {
            (0, 0) => 1.0,
            (0, _) | (_, 0) => 0.0,
            #[allow(
                clippy::cast_precision_loss,
                reason = "feature counts are far below 2^52"
            )]
            _ => dot as f64 / ((norm_a as f64).sqrt() * (norm_b as f64).sqrt()),
        }
    }
}
