//! mend IR - syntax-node data model for the repair engine
//!
//! This crate contains the shared data structures of the repair core:
//! - Spans for source locations (line granularity)
//! - Names for interned identifiers
//! - The flat syntax tree ([`SyntaxTree`]) with parent back-references
//! - Node kinds for both statement and expression families
//! - The modification model ([`Modification`], [`Slot`])
//! - Scope constraint sets and the variable-renaming map
//!
//! # Design
//!
//! - **Intern everything**: identifiers and type names are `Name(u32)`.
//! - **Flatten everything**: no `Box<Node>`; children are `NodeId(u32)`
//!   indices, ordered sequences are `NodeRange` into a side array.
//! - **Immutable after build**: the tree is wired once by [`TreeBuilder`]
//!   and never mutated; pending edits live in per-candidate overlays owned
//!   by the rendering layer.

pub mod ast;
mod interner;
mod modify;
mod name;
mod node_id;
mod rename;
mod scope;
mod span;
mod tree;
pub mod visitor;

pub use ast::{BinaryOp, NodeKind, UnaryOp, UseKind};
pub use interner::{InternError, StringInterner};
pub use modify::Modification;
pub use name::Name;
pub use node_id::{NodeId, NodeRange};
pub use rename::{RenameMap, RenameMark};
pub use scope::ScopeSet;
pub use span::Span;
pub use tree::{Slot, SyntaxTree, TreeBuilder, TreeError};
