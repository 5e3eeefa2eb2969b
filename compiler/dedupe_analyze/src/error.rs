//! Analysis errors.

use dedupe_ir::ValueId;

/// Why a value tree could not be analyzed.
///
/// Both variants abort the whole analysis; no partial result is produced.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum AnalyzeError {
    /// The tree reaches a value with no literal form.
    #[error("unsupported value at {id}: {reason}")]
    UnsupportedValue { id: ValueId, reason: String },

    /// The tree contains itself: `id` is reachable from its own children.
    #[error("cyclic value: {id} contains itself")]
    CyclicValue { id: ValueId },
}

impl AnalyzeError {
    /// The value the error points at.
    pub fn value(&self) -> ValueId {
        match self {
            AnalyzeError::UnsupportedValue { id, .. } | AnalyzeError::CyclicValue { id } => *id,
        }
    }
}
