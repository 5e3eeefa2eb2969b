//! Output sink.
//!
//! The printer writes through the [`Emitter`] trait so callers can render
//! straight into their own buffer; [`StringEmitter`] covers the common case.

/// Destination for emitted text.
pub trait Emitter {
    /// Append a text fragment.
    fn emit(&mut self, text: &str);

    /// Append a newline (`\n`, never `\r\n`).
    fn emit_newline(&mut self);

    /// Append `spaces` spaces.
    fn emit_indent(&mut self, spaces: usize);
}

/// Emitter that collects output in a `String`.
#[derive(Debug, Default)]
pub struct StringEmitter {
    buffer: String,
}

impl StringEmitter {
    /// Create an empty emitter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with pre-allocated capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buffer: String::with_capacity(capacity),
        }
    }

    /// Text emitted so far.
    pub fn as_str(&self) -> &str {
        &self.buffer
    }

    /// Length of the emitted text in bytes.
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Whether nothing has been emitted.
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Take the emitted text.
    pub fn output(self) -> String {
        self.buffer
    }
}

impl Emitter for StringEmitter {
    fn emit(&mut self, text: &str) {
        self.buffer.push_str(text);
    }

    fn emit_newline(&mut self) {
        self.buffer.push('\n');
    }

    fn emit_indent(&mut self, spaces: usize) {
        self.buffer.extend(std::iter::repeat(' ').take(spaces));
    }
}

impl Emitter for String {
    fn emit(&mut self, text: &str) {
        self.push_str(text);
    }

    fn emit_newline(&mut self) {
        self.push('\n');
    }

    fn emit_indent(&mut self, spaces: usize) {
        self.extend(std::iter::repeat(' ').take(spaces));
    }
}
