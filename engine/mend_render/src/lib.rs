//! mend render - source rendering for the repair engine
//!
//! Turns syntax trees back into source text. The layers:
//! - [`Emitter`]: output sink abstraction ([`StringEmitter`] is the only
//!   production sink; rendered patches stay in memory).
//! - [`source`]: the recursive renderer, with variants that consult a
//!   renaming map and/or a pending-edit overlay.
//! - [`Overlay`]: per-candidate pending edits realizing the
//!   adapt/restore/render contract without mutating the tree.
//! - [`simplify`]: scope-restricted rendering that fails instead of
//!   referencing unavailable variables.

mod emitter;
mod overlay;
mod simplify;
pub mod source;

pub use emitter::{Emitter, StringEmitter};
pub use overlay::{Overlay, OverlayError, OverlayKey};
pub use simplify::simplify;
pub use source::{render, render_overlaid, render_renamed, render_with};
