//! Code emitter for the dedupe serializer.
//!
//! Turns an [`Analysis`] into source text. Without bindings the output is a
//! single literal expression. With bindings it is an immediately invoked
//! function that declares every binding in allocation order and returns the
//! root expression:
//!
//! ```text
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
//! No statement terminator follows the snippet; the caller embeds it.
//!
//! # Modules
//!
//! - [`config`]: `EmitConfig` and the type-escape option
//! - [`emitter`]: output sinks

pub mod config;
pub mod emitter;
mod printer;

use dedupe_analyze::Analysis;

pub use config::{is_binding_prefix, EmitConfig, TypeEscape, BINDING_PREFIX, INDENT_WIDTH};
pub use emitter::{Emitter, StringEmitter};

use printer::{Position, Printer};

/// Render `analysis` to a new string.
pub fn emit(analysis: &Analysis, config: &EmitConfig) -> String {
    let mut out = StringEmitter::new();
    emit_to(analysis, config, &mut out);
    out.output()
}

/// Render `analysis` into `out`.
pub fn emit_to<E: Emitter>(analysis: &Analysis, config: &EmitConfig, out: &mut E) {
    let mut printer = Printer::new(analysis, config, out);

    if !analysis.has_bindings() {
        printer.term(analysis.root(), 0, Position::Root);
        tracing::debug!("emitted literal expression");
        return;
    }

    printer.out().emit("(function(){");
    printer.out().emit_newline();
    printer.out().emit("var ");
    for (i, binding) in analysis.bindings().iter().enumerate() {
        if i > 0 {
            printer.out().emit(",");
            printer.out().emit_newline();
        }
        let name = printer.binding_name(binding.slot);
        printer.out().emit(&name);
        printer.out().emit(" = ");
        printer.shape(analysis.shape(binding.sig), 0, Position::Binding);
    }
    printer.out().emit(";");
    printer.out().emit_newline();
    printer.out().emit("return ");
    printer.term(analysis.root(), 0, Position::Root);
    printer.out().emit(";");
    printer.out().emit_newline();
    printer.out().emit("})()");

    tracing::debug!(
        bindings = analysis.bindings().len(),
        "emitted binding block"
    );
}

/// Render a string as a double-quoted literal, escaped the way the printer
/// escapes keys and string values.
pub fn string_literal(s: &str) -> String {
    let mut buf = String::with_capacity(s.len() + 2);
    printer::write_string_literal(&mut buf, s);
    buf
}
