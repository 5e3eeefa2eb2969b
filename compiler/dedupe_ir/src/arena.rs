//! Value arena.
//!
//! Values are appended and never removed. Composite values can be built in
//! one call ([`ValueArena::array`], [`ValueArena::object`]) or grown after
//! allocation ([`ValueArena::push_element`], [`ValueArena::insert_property`]).
//! Growing after allocation is what makes shared and cyclic graphs
//! expressible; the arena itself does not reject cycles.

use crate::{Number, Value, ValueId};

/// Error from an arena mutation.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ArenaError {
    /// The id does not belong to this arena.
    #[error("value {0} is not in this arena")]
    UnknownValue(ValueId),
    /// `push_element` on something other than an array.
    #[error("value {id} is {kind}, expected an array")]
    NotAnArray { id: ValueId, kind: &'static str },
    /// `insert_property` on something other than an object.
    #[error("value {id} is {kind}, expected an object")]
    NotAnObject { id: ValueId, kind: &'static str },
}

/// Flat storage for one or more input trees.
#[derive(Clone, Debug, Default)]
pub struct ValueArena {
    values: Vec<Value>,
}

impl ValueArena {
    /// Create an empty arena.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an arena with room for `capacity` values.
    pub fn with_capacity(capacity: usize) -> Self {
        ValueArena {
            values: Vec::with_capacity(capacity),
        }
    }

    /// Number of allocated values.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether nothing has been allocated.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Whether `id` was allocated by this arena.
    pub fn contains(&self, id: ValueId) -> bool {
        id.index() < self.values.len()
    }

    /// Look up a value.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not allocated by this arena.
    #[inline]
    pub fn get(&self, id: ValueId) -> &Value {
        &self.values[id.index()]
    }

    /// Look up a value, returning `None` for foreign ids.
    #[inline]
    pub fn try_get(&self, id: ValueId) -> Option<&Value> {
        self.values.get(id.index())
    }

    /// Allocate a value and return its id.
    ///
    /// # Panics
    ///
    /// Panics if the arena already holds `u32::MAX` values.
    pub fn alloc(&mut self, value: Value) -> ValueId {
        let index = u32::try_from(self.values.len())
            .unwrap_or_else(|_| panic!("value arena exceeded {} entries", u32::MAX));
        self.values.push(value);
        ValueId::new(index)
    }

    // === Scalars ===

    /// Allocate `null`.
    pub fn null(&mut self) -> ValueId {
        self.alloc(Value::Null)
    }

    /// Allocate a boolean.
    pub fn bool(&mut self, value: bool) -> ValueId {
        self.alloc(Value::Bool(value))
    }

    /// Allocate a signed integer.
    pub fn int(&mut self, value: i64) -> ValueId {
        self.alloc(Value::Number(Number::from_i64(value)))
    }

    /// Allocate an unsigned integer.
    pub fn uint(&mut self, value: u64) -> ValueId {
        self.alloc(Value::Number(Number::PosInt(value)))
    }

    /// Allocate a float.
    pub fn float(&mut self, value: f64) -> ValueId {
        self.alloc(Value::Number(Number::Float(value)))
    }

    /// Allocate a string.
    pub fn string(&mut self, value: impl Into<String>) -> ValueId {
        self.alloc(Value::String(value.into()))
    }

    /// Allocate the "undefined" marker.
    pub fn absent(&mut self) -> ValueId {
        self.alloc(Value::Absent)
    }

    /// Allocate an opaque host value.
    pub fn opaque(&mut self, description: impl Into<String>) -> ValueId {
        self.alloc(Value::Opaque(description.into()))
    }

    // === Composites ===

    /// Allocate an array with the given elements.
    pub fn array(&mut self, elements: impl IntoIterator<Item = ValueId>) -> ValueId {
        let elements = elements.into_iter().collect();
        self.alloc(Value::Array(elements))
    }

    /// Allocate an object with the given properties.
    ///
    /// A repeated key overwrites the earlier value but keeps the earlier
    /// position, the same as [`ValueArena::insert_property`].
    pub fn object<K: Into<String>>(
        &mut self,
        properties: impl IntoIterator<Item = (K, ValueId)>,
    ) -> ValueId {
        let mut props: Vec<(String, ValueId)> = Vec::new();
        for (key, value) in properties {
            upsert(&mut props, key.into(), value);
        }
        self.alloc(Value::Object(props))
    }

    /// Append an element to an existing array.
    pub fn push_element(&mut self, array: ValueId, element: ValueId) -> Result<(), ArenaError> {
        self.check(element)?;
        match self.slot_mut(array)? {
            Value::Array(elements) => {
                elements.push(element);
                Ok(())
            }
            other => Err(ArenaError::NotAnArray {
                id: array,
                kind: other.kind_name(),
            }),
        }
    }

    /// Set a property on an existing object.
    ///
    /// An existing key keeps its position and takes the new value.
    pub fn insert_property(
        &mut self,
        object: ValueId,
        key: impl Into<String>,
        value: ValueId,
    ) -> Result<(), ArenaError> {
        self.check(value)?;
        match self.slot_mut(object)? {
            Value::Object(props) => {
                upsert(props, key.into(), value);
                Ok(())
            }
            other => Err(ArenaError::NotAnObject {
                id: object,
                kind: other.kind_name(),
            }),
        }
    }

    fn check(&self, id: ValueId) -> Result<(), ArenaError> {
        if self.contains(id) {
            Ok(())
        } else {
            Err(ArenaError::UnknownValue(id))
        }
    }

    fn slot_mut(&mut self, id: ValueId) -> Result<&mut Value, ArenaError> {
        self.values
            .get_mut(id.index())
            .ok_or(ArenaError::UnknownValue(id))
    }
}

fn upsert(props: &mut Vec<(String, ValueId)>, key: String, value: ValueId) {
    if let Some(entry) = props.iter_mut().find(|(k, _)| *k == key) {
        entry.1 = value;
    } else {
        props.push((key, value));
    }
}
