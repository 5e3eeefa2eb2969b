//! Value tree representation for the dedupe serializer.
//!
//! Input trees are stored in a flat [`ValueArena`] and addressed by
//! [`ValueId`]. Composite values refer to their children by id, which gives
//! the two input shapes the serializer has to handle a direct encoding:
//!
//! - **Sharing**: the same `ValueId` placed at two positions is one instance
//!   reachable twice.
//! - **Cycles**: an array or object wired (after allocation) to one of its
//!   own ancestors. These are outside the value domain and rejected during
//!   analysis.
//!
//! # Modules
//!
//! - [`arena`]: the arena and its builders
//! - [`value`]: `Value` and `Number`
//! - [`ingest`]: conversion from `serde_json::Value` and `Serialize` types
//! - [`stack`]: stack growth for deep recursive walks

pub mod arena;
pub mod ingest;
pub mod stack;
pub mod value;
mod value_id;

pub use arena::{ArenaError, ValueArena};
pub use ingest::IngestError;
pub use stack::ensure_sufficient_stack;
pub use value::{Number, Value};
pub use value_id::ValueId;
