//! Deduplicating serializer.
//!
//! Turns a value tree into the source text of an expression that evaluates
//! to an equal value. Non-empty arrays and objects that occur more than once
//! are declared once as bindings and referenced by name, so large repetitive
//! documents (generated query ASTs, config trees) stay small.
//!
//! ```text
//! [{"name": "id"}, {"name": "id"}]
//!
//! (function(){
//! var v0 = {
//!   "name": "id"
//! };
//! return [
//!   v0,
//!   v0
//! ];
//! })()
//! ```
//!
//! This crate ties the pipeline together:
//!
//! ```text
//! ValueArena (dedupe_ir) → analyze (dedupe_analyze) → emit (dedupe_emit)
//! ```
//!
//! The [`cli`] module holds argument parsing for the `dedupe` binary.

pub mod cli;

use std::sync::Once;

use serde::Serialize;

pub use dedupe_analyze::{analyze, Analysis, AnalysisStats, AnalyzeError};
pub use dedupe_emit::{
    emit, emit_to, is_binding_prefix, EmitConfig, Emitter, StringEmitter, TypeEscape,
};
pub use dedupe_ir::{IngestError, Number, Value, ValueArena, ValueId};

/// Anything that can go wrong between a host value and its source text.
#[derive(Debug, thiserror::Error)]
pub enum DedupeError {
    #[error(transparent)]
    Analyze(#[from] AnalyzeError),

    #[error(transparent)]
    Ingest(#[from] IngestError),
}

/// Serialize the tree rooted at `root`.
pub fn stringify(
    arena: &ValueArena,
    root: ValueId,
    config: &EmitConfig,
) -> Result<String, DedupeError> {
    let analysis = analyze(arena, root)?;
    Ok(emit(&analysis, config))
}

/// Serialize a JSON document.
///
/// A document parsed from text has no shared instances; structurally equal
/// subtrees are still bound once.
pub fn stringify_json(json: &serde_json::Value, config: &EmitConfig) -> Result<String, DedupeError> {
    let (arena, root) = ValueArena::from_json(json);
    stringify(&arena, root, config)
}

/// Serialize any `Serialize` value through its JSON form.
pub fn stringify_serialize<T: Serialize + ?Sized>(
    value: &T,
    config: &EmitConfig,
) -> Result<String, DedupeError> {
    let mut arena = ValueArena::new();
    let root = arena.alloc_serialize(value)?;
    stringify(&arena, root, config)
}

static TRACING_INIT: Once = Once::new();

/// Install a `tracing` subscriber filtered by `RUST_LOG`.
///
/// Does nothing when `RUST_LOG` is unset. Safe to call more than once.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(
                    fmt::layer()
                        .with_writer(std::io::stderr)
                        .with_target(true)
                        .with_level(true),
                )
                .with(filter)
                .init();
        }
    });
}
