//! Duplication analysis for the dedupe serializer.
//!
//! Given a value tree in a [`ValueArena`](dedupe_ir::ValueArena), find the
//! non-empty arrays and objects that occur more than once (by structure, so
//! shared instances and independently built equal subtrees are the same
//! thing) and decide which of them become bindings.
//!
//! # Pipeline Position
//!
//! ```text
//! ValueArena → **Analyze** → Emit → text
//! ```
//!
//! # Guarantees
//!
//! - Scalars and empty containers are never bound.
//! - Every binding is referenced at least twice in the emitted text.
//! - Bindings are allocated dependencies-first.
//! - The result depends only on the input structure, never on hash order or
//!   allocation addresses.

mod analysis;
mod analyzer;
mod error;
pub mod signature;

pub use analysis::{Analysis, AnalysisStats, Binding, Node, SlotId, Term};
pub use analyzer::{analyze, Analyzer};
pub use error::AnalyzeError;
pub use signature::{Shape, SigId, SignatureTable};
