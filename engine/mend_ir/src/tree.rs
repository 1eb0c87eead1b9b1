//! Syntax tree arena.
//!
//! The tree is built once from parser output and is immutable afterwards.
//! Nodes live in parallel arrays indexed by [`NodeId`]; ordered child
//! sequences are flattened into `node_lists`. Parent back-references are
//! plain IDs resolved by lookup, never owning edges, so the single-owner
//! invariant cannot form cycles through shared ownership.

use smallvec::SmallVec;

use crate::ast::{NodeKind, UseKind};
use crate::{Name, NodeId, NodeRange, Span};

/// Named sub-slot of a node.
///
/// Identifies a fixed-arity child position ("the controlling expression")
/// distinctly from statement-list indices. `Arg` carries the argument
/// position within a call.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Slot {
    /// Controlling expression of `if`/`while`/`for`/ternary.
    Cond,
    /// Controlling expression of `switch`.
    Discriminant,
    /// `for` header initializer or declaration initializer.
    Init,
    /// `for` header step expression.
    Step,
    /// Loop body or branch body.
    Body,
    /// Then branch of `if`/ternary.
    Then,
    /// Else branch of `if`/ternary.
    Else,
    /// Value of `return`/`throw`.
    Value,
    /// Assignment left-hand side.
    Target,
    /// Assignment right-hand side.
    Source,
    /// Call / field / subscript receiver.
    Receiver,
    /// Subscript index expression.
    IndexKey,
    /// Switch case label.
    Label,
    /// Unary operand.
    Operand,
    /// Binary left operand.
    Lhs,
    /// Binary right operand.
    Rhs,
    /// Expression of an expression statement.
    Expr,
    /// Call argument at a position.
    Arg(u16),
}

/// Error found while wiring a tree from parser output.
///
/// These are true faults in the input, not recoverable search outcomes:
/// the builder refuses to produce a tree rather than guess past them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    /// A child ID does not refer to an allocated node.
    DanglingChild { parent: NodeId, child: NodeId },
    /// A node is claimed as a child by two parents.
    MultipleParents {
        child: NodeId,
        first: NodeId,
        second: NodeId,
    },
    /// The designated root is not an allocated node.
    InvalidRoot { root: NodeId },
    /// The designated root is owned by another node.
    OwnedRoot { root: NodeId, parent: NodeId },
    /// A node range refers past the end of the flattened list array.
    RangeOutOfBounds { parent: NodeId, range: NodeRange },
}

impl std::fmt::Display for TreeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TreeError::DanglingChild { parent, child } => {
                write!(f, "node {parent:?} references unallocated child {child:?}")
            }
            TreeError::MultipleParents {
                child,
                first,
                second,
            } => write!(
                f,
                "node {child:?} is owned by both {first:?} and {second:?}"
            ),
            TreeError::InvalidRoot { root } => write!(f, "root {root:?} is not allocated"),
            TreeError::OwnedRoot { root, parent } => {
                write!(f, "root {root:?} is owned by {parent:?}")
            }
            TreeError::RangeOutOfBounds { parent, range } => {
                write!(f, "node {parent:?} has out-of-bounds child range {range:?}")
            }
        }
    }
}

impl std::error::Error for TreeError {}

/// Immutable syntax tree.
///
/// Read-heavy by design: matching, rendering, and feature extraction are
/// pure functions over a shared tree and may run in parallel on independent
/// trees with no coordination.
#[derive(Clone, Debug)]
pub struct SyntaxTree {
    /// Node kinds (parallel with spans and parents).
    kinds: Vec<NodeKind>,
    /// Source spans (parallel with kinds).
    spans: Vec<Span>,
    /// Parent back-references; `NodeId::INVALID` for the root.
    parents: Vec<NodeId>,
    /// Flattened ordered child sequences, indexed by `NodeRange`.
    node_lists: Vec<NodeId>,
    /// Root node.
    root: NodeId,
}

impl SyntaxTree {
    /// Root node of the tree.
    #[inline]
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Number of allocated nodes.
    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    /// Returns `true` if no nodes are allocated.
    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }

    /// Node kind.
    #[inline]
    pub fn kind(&self, id: NodeId) -> &NodeKind {
        &self.kinds[id.index()]
    }

    /// Node span.
    #[inline]
    pub fn span(&self, id: NodeId) -> Span {
        self.spans[id.index()]
    }

    /// Parent back-reference; `None` for the root.
    #[inline]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        let p = self.parents[id.index()];
        p.is_valid().then_some(p)
    }

    /// Resolve a range into the flattened list array.
    #[inline]
    pub fn list(&self, range: NodeRange) -> &[NodeId] {
        &self.node_lists[range.start as usize..range.start as usize + range.len()]
    }

    /// Ordered statement list of a list-bearing node (block body, switch
    /// body), or `None` for every other kind.
    pub fn stmt_list(&self, id: NodeId) -> Option<NodeRange> {
        match *self.kind(id) {
            NodeKind::Block { stmts } => Some(stmts),
            NodeKind::Switch { body, .. } => Some(body),
            _ => None,
        }
    }

    /// Fixed-arity child slots of a node, in declared syntactic order.
    /// Absent optional slots are omitted. List-bearing children (block
    /// statements, switch bodies) are not slots; see [`Self::stmt_list`].
    pub fn slots(&self, id: NodeId) -> SmallVec<[(Slot, NodeId); 4]> {
        let mut out = SmallVec::new();
        let mut push = |slot: Slot, child: NodeId| {
            if child.is_valid() {
                out.push((slot, child));
            }
        };
        match *self.kind(id) {
            NodeKind::Block { .. } | NodeKind::Break | NodeKind::Continue => {}
            NodeKind::If {
                cond,
                then_branch,
                else_branch,
            } => {
                push(Slot::Cond, cond);
                push(Slot::Then, then_branch);
                push(Slot::Else, else_branch);
            }
            NodeKind::Switch { discriminant, .. } => push(Slot::Discriminant, discriminant),
            NodeKind::SwitchCase { label } => push(Slot::Label, label),
            NodeKind::While { cond, body } => {
                push(Slot::Cond, cond);
                push(Slot::Body, body);
            }
            NodeKind::For {
                init,
                cond,
                step,
                body,
            } => {
                push(Slot::Init, init);
                push(Slot::Cond, cond);
                push(Slot::Step, step);
                push(Slot::Body, body);
            }
            NodeKind::Return { value } | NodeKind::Throw { value } => push(Slot::Value, value),
            NodeKind::VarDecl { init, .. } => push(Slot::Init, init),
            NodeKind::ExprStmt { expr } => push(Slot::Expr, expr),
            NodeKind::Assign { target, value } => {
                push(Slot::Target, target);
                push(Slot::Source, value);
            }
            NodeKind::Binary { left, right, .. } => {
                push(Slot::Lhs, left);
                push(Slot::Rhs, right);
            }
            NodeKind::Unary { operand, .. } => push(Slot::Operand, operand),
            NodeKind::Call { receiver, args, .. } => {
                push(Slot::Receiver, receiver);
                for (i, &arg) in self.list(args).iter().enumerate() {
                    // Arg positions fit u16 by NodeRange construction.
                    out.push((Slot::Arg(i as u16), arg));
                }
            }
            NodeKind::FieldAccess { receiver, .. } => push(Slot::Receiver, receiver),
            NodeKind::Index { receiver, index } => {
                push(Slot::Receiver, receiver);
                push(Slot::IndexKey, index);
            }
            NodeKind::Conditional {
                cond,
                then_expr,
                else_expr,
            } => {
                push(Slot::Cond, cond);
                push(Slot::Then, then_expr);
                push(Slot::Else, else_expr);
            }
            NodeKind::Ident(_)
            | NodeKind::IntLit(_)
            | NodeKind::FloatLit(_)
            | NodeKind::BoolLit(_)
            | NodeKind::StrLit(_)
            | NodeKind::CharLit(_)
            | NodeKind::NullLit => {}
        }
        out
    }

    /// Resolve a named slot to its current child, if present.
    pub fn slot_child(&self, id: NodeId, slot: Slot) -> Option<NodeId> {
        self.slots(id)
            .into_iter()
            .find(|&(s, _)| s == slot)
            .map(|(_, child)| child)
    }

    /// Returns `true` if `slot` is a valid sub-slot of `id` (present child).
    pub fn has_slot(&self, id: NodeId, slot: Slot) -> bool {
        self.slot_child(id, slot).is_some()
    }

    /// All direct children in declared syntactic order: fixed slots first,
    /// then the statement list for list-bearing kinds.
    pub fn children(&self, id: NodeId) -> SmallVec<[NodeId; 4]> {
        let mut out: SmallVec<[NodeId; 4]> =
            self.slots(id).into_iter().map(|(_, c)| c).collect();
        if let Some(range) = self.stmt_list(id) {
            out.extend(self.list(range).iter().copied());
        }
        out
    }

    /// Classify how `id` uses the direct child `child`.
    ///
    /// `UseKind::Plain` for a node that is not a direct child of `id`.
    pub fn use_kind(&self, id: NodeId, child: NodeId) -> UseKind {
        match *self.kind(id) {
            NodeKind::If { cond, .. } => {
                if child == cond {
                    UseKind::Branch
                } else {
                    UseKind::BranchBody
                }
            }
            NodeKind::Conditional { cond, .. } => {
                if child == cond {
                    UseKind::Branch
                } else {
                    UseKind::BranchBody
                }
            }
            NodeKind::Switch { discriminant, .. } => {
                if child == discriminant {
                    UseKind::Discriminant
                } else {
                    UseKind::SwitchBody
                }
            }
            NodeKind::SwitchCase { .. } => UseKind::CaseLabel,
            NodeKind::While { cond, .. } => {
                if child == cond {
                    UseKind::LoopBound
                } else {
                    UseKind::LoopBody
                }
            }
            NodeKind::For {
                init, cond, step, ..
            } => {
                if child == init {
                    UseKind::Initializer
                } else if child == cond {
                    UseKind::LoopBound
                } else if child == step {
                    UseKind::LoopStep
                } else {
                    UseKind::LoopBody
                }
            }
            NodeKind::Return { .. } => UseKind::ReturnValue,
            NodeKind::Throw { .. } => UseKind::Thrown,
            NodeKind::VarDecl { .. } => UseKind::Initializer,
            NodeKind::Assign { target, .. } => {
                if child == target {
                    UseKind::AssignTarget
                } else {
                    UseKind::AssignSource
                }
            }
            NodeKind::Call { receiver, .. } => {
                if child == receiver {
                    UseKind::CallReceiver
                } else {
                    UseKind::CallArgument
                }
            }
            NodeKind::FieldAccess { .. } => UseKind::CallReceiver,
            NodeKind::Index { receiver, .. } => {
                // Subscript receivers classify like other access receivers.
                if child == receiver {
                    UseKind::CallReceiver
                } else {
                    UseKind::IndexKey
                }
            }
            _ => UseKind::Plain,
        }
    }

    /// Variable name declared by a node, if it declares one.
    pub fn declared_name(&self, id: NodeId) -> Option<(Name, Name)> {
        match *self.kind(id) {
            NodeKind::VarDecl { ty, name, .. } => Some((name, ty)),
            _ => None,
        }
    }
}

/// Incremental tree builder.
///
/// The external parser allocates nodes bottom-up (children before parents),
/// then calls [`TreeBuilder::finish`], which wires parent back-references
/// and validates the single-owner invariant.
#[derive(Default)]
pub struct TreeBuilder {
    kinds: Vec<NodeKind>,
    spans: Vec<Span>,
    node_lists: Vec<NodeId>,
}

impl TreeBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a node, returning its ID.
    pub fn push(&mut self, kind: NodeKind, span: Span) -> NodeId {
        let id = NodeId::new(u32::try_from(self.kinds.len()).unwrap_or(u32::MAX - 1));
        self.kinds.push(kind);
        self.spans.push(span);
        id
    }

    /// Allocate an ordered child sequence.
    pub fn push_list(&mut self, ids: &[NodeId]) -> NodeRange {
        if ids.is_empty() {
            return NodeRange::EMPTY;
        }
        let start = u32::try_from(self.node_lists.len()).unwrap_or(u32::MAX);
        self.node_lists.extend_from_slice(ids);
        let len = u16::try_from(ids.len()).unwrap_or(u16::MAX);
        NodeRange::new(start, len)
    }

    /// Finish the tree, wiring parent back-references.
    ///
    /// # Errors
    ///
    /// Returns a [`TreeError`] if a child ID dangles, a node has two owners,
    /// or the root is invalid or owned.
    pub fn finish(self, root: NodeId) -> Result<SyntaxTree, TreeError> {
        let n = self.kinds.len();
        if root.index() >= n {
            return Err(TreeError::InvalidRoot { root });
        }

        let mut tree = SyntaxTree {
            kinds: self.kinds,
            spans: self.spans,
            parents: vec![NodeId::INVALID; n],
            node_lists: self.node_lists,
            root,
        };

        for raw in 0..n {
            // Parent ids stay in u32 range because n nodes were allocated
            // through push(), which is bounded by u32.
            let parent = NodeId::new(raw as u32);
            if let Some(range) = tree.stmt_list(parent) {
                if range.start as usize + range.len() > tree.node_lists.len() {
                    return Err(TreeError::RangeOutOfBounds { parent, range });
                }
            }
            if let NodeKind::Call { args, .. } = *tree.kind(parent) {
                if args.start as usize + args.len() > tree.node_lists.len() {
                    return Err(TreeError::RangeOutOfBounds {
                        parent,
                        range: args,
                    });
                }
            }
            for child in tree.children(parent) {
                if child.index() >= n {
                    return Err(TreeError::DanglingChild { parent, child });
                }
                let existing = tree.parents[child.index()];
                if existing.is_valid() {
                    return Err(TreeError::MultipleParents {
                        child,
                        first: existing,
                        second: parent,
                    });
                }
                tree.parents[child.index()] = parent;
            }
        }

        if let Some(parent) = tree.parent(root) {
            return Err(TreeError::OwnedRoot { root, parent });
        }

        Ok(tree)
    }
}
