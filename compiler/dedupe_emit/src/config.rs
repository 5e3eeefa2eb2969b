//! Emitter configuration.

/// Default indentation step, in spaces.
pub const INDENT_WIDTH: usize = 2;

/// Default binding name prefix (`v0`, `v1`, ...).
pub const BINDING_PREFIX: &str = "v";

/// Annotation style for slot references and bound empty arrays.
///
/// Downstream type checkers infer one fixed type per binding and per empty
/// array literal, which breaks when the same binding is read at positions
/// with different expected types. `Flow` wraps those expressions in an
/// `any` cast comment so the checker leaves them alone.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum TypeEscape {
    /// Plain identifiers and `[]`.
    #[default]
    None,

    /// `(v0/*: any*/)` for slot references, and `([]/*: any*/)` for empty
    /// arrays inside binding declarations.
    Flow,
}

/// Configuration for the emitter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EmitConfig {
    /// Type-escape annotation style. Defaults to none.
    pub type_escape: TypeEscape,

    /// Spaces added per nesting level. Defaults to 2.
    pub indent_width: usize,

    /// Prefix of binding names; the slot number is appended. Must start an
    /// identifier in the target language. Defaults to `v`.
    pub binding_prefix: String,
}

impl Default for EmitConfig {
    fn default() -> Self {
        Self {
            type_escape: TypeEscape::None,
            indent_width: INDENT_WIDTH,
            binding_prefix: BINDING_PREFIX.to_string(),
        }
    }
}

impl EmitConfig {
    /// Default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the type-escape style.
    #[must_use]
    pub fn with_type_escape(mut self, type_escape: TypeEscape) -> Self {
        self.type_escape = type_escape;
        self
    }

    /// Set the indentation step.
    #[must_use]
    pub fn with_indent_width(mut self, indent_width: usize) -> Self {
        self.indent_width = indent_width;
        self
    }

    /// Set the binding name prefix.
    ///
    /// The prefix is used as given. Callers taking it from user input should
    /// check it with [`is_binding_prefix`] first; an invalid prefix produces
    /// text that does not parse.
    #[must_use]
    pub fn with_binding_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.binding_prefix = prefix.into();
        self
    }
}

/// Whether `prefix` can start an identifier in the emitted language.
///
/// The slot number is appended, so only the prefix itself is checked.
pub fn is_binding_prefix(prefix: &str) -> bool {
    let mut chars = prefix.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}
