//! Building arenas from JSON documents and `Serialize` types.
//!
//! JSON documents have no sharing, so every composite gets its own id. The
//! analyzer still merges structurally equal subtrees.

use serde::Serialize;

use crate::{ensure_sufficient_stack, Number, Value, ValueArena, ValueId};

/// Error when a host value cannot be turned into a value tree.
#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    /// `serde` refused the value (non-string map key, failing `Serialize`
    /// impl, ...).
    #[error("value cannot be represented as JSON: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl ValueArena {
    /// Copy a `serde_json::Value` into the arena and return its root.
    pub fn alloc_json(&mut self, json: &serde_json::Value) -> ValueId {
        ensure_sufficient_stack(|| match json {
            serde_json::Value::Null => self.null(),
            serde_json::Value::Bool(b) => self.bool(*b),
            serde_json::Value::Number(n) => self.alloc(Value::Number(Number::from(n))),
            serde_json::Value::String(s) => self.string(s.as_str()),
            serde_json::Value::Array(items) => {
                let elements: Vec<ValueId> = items.iter().map(|item| self.alloc_json(item)).collect();
                self.alloc(Value::Array(elements))
            }
            serde_json::Value::Object(map) => {
                let props: Vec<(String, ValueId)> = map
                    .iter()
                    .map(|(key, item)| (key.clone(), self.alloc_json(item)))
                    .collect();
                self.alloc(Value::Object(props))
            }
        })
    }

    /// Serialize `value` and copy the result into the arena.
    ///
    /// `Option::None` fields serialize as `null`; skip them with
    /// `#[serde(skip_serializing_if = "Option::is_none")]` to get the
    /// "absent" behavior.
    pub fn alloc_serialize<T: Serialize + ?Sized>(
        &mut self,
        value: &T,
    ) -> Result<ValueId, IngestError> {
        let json = serde_json::to_value(value)?;
        Ok(self.alloc_json(&json))
    }

    /// Build a fresh arena holding one JSON document.
    pub fn from_json(json: &serde_json::Value) -> (Self, ValueId) {
        let mut arena = ValueArena::new();
        let root = arena.alloc_json(json);
        (arena, root)
    }
}
