//! Value and number types.

use crate::ValueId;

/// A JSON number as produced by the front end.
///
/// Integers keep their exact value. Floats are only representable when
/// finite; `NaN` and the infinities have no literal form and are rejected by
/// the analyzer.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Number {
    /// Non-negative integer.
    PosInt(u64),
    /// Negative integer.
    NegInt(i64),
    /// Floating point value.
    Float(f64),
}

impl Number {
    /// Build a number from a signed integer.
    pub fn from_i64(n: i64) -> Self {
        match u64::try_from(n) {
            Ok(n) => Number::PosInt(n),
            Err(_) => Number::NegInt(n),
        }
    }

    /// Literal text of this number, or `None` for non-finite floats.
    ///
    /// Floats use the shortest representation that reads back to the same
    /// `f64`, so the text is stable across runs and platforms.
    pub fn literal(self) -> Option<String> {
        match self {
            Number::PosInt(n) => Some(n.to_string()),
            Number::NegInt(n) => Some(n.to_string()),
            Number::Float(f) => serde_json::Number::from_f64(f).map(|n| n.to_string()),
        }
    }
}

impl From<&serde_json::Number> for Number {
    fn from(n: &serde_json::Number) -> Self {
        if let Some(u) = n.as_u64() {
            Number::PosInt(u)
        } else if let Some(i) = n.as_i64() {
            Number::NegInt(i)
        } else {
            // Without `arbitrary_precision` every serde_json number is one of
            // u64, i64 or f64.
            Number::Float(n.as_f64().unwrap_or(f64::NAN))
        }
    }
}

/// One node of an input tree.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    /// `null`.
    Null,
    /// `true` / `false`.
    Bool(bool),
    /// Numeric literal.
    Number(Number),
    /// String literal.
    String(String),
    /// Ordered elements.
    Array(Vec<ValueId>),
    /// Ordered properties. Keys are unique.
    Object(Vec<(String, ValueId)>),
    /// The "undefined" marker. Dropped when it is an object property value.
    Absent,
    /// A host value with no JSON form (function, symbol, ...), described for
    /// error messages.
    Opaque(String),
}

impl Value {
    /// Short name of the value's kind, for diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
            Value::Absent => "undefined",
            Value::Opaque(_) => "opaque value",
        }
    }
}
