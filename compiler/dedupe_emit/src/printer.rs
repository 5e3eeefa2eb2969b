//! Pretty printer.
//!
//! Renders one position of an [`Analysis`] as a literal expression. Layout
//! is fixed: empty containers on one line, everything else one element or
//! property per line, each level `indent_width` deeper than its container,
//! closing bracket at the container's own indentation.

use std::fmt::Write as _;

use dedupe_analyze::{Analysis, Shape, SigId, SlotId, Term};
use dedupe_ir::ensure_sufficient_stack;

use crate::config::{EmitConfig, TypeEscape};
use crate::emitter::Emitter;

/// Where an expression is being written.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Position {
    /// The returned (or only) expression.
    Root,
    /// The right-hand side of a binding declaration.
    Binding,
}

pub(crate) struct Printer<'a, E: Emitter> {
    analysis: &'a Analysis,
    config: &'a EmitConfig,
    out: &'a mut E,
}

impl<'a, E: Emitter> Printer<'a, E> {
    pub(crate) fn new(analysis: &'a Analysis, config: &'a EmitConfig, out: &'a mut E) -> Self {
        Printer {
            analysis,
            config,
            out,
        }
    }

    pub(crate) fn out(&mut self) -> &mut E {
        &mut *self.out
    }

    /// Write the expression for a position holding `sig`.
    pub(crate) fn term(&mut self, sig: SigId, indent: usize, position: Position) {
        let analysis = self.analysis;
        match analysis.term(sig) {
            Term::Slot(slot) => self.slot_ref(slot),
            Term::Inline(shape) => self.shape(shape, indent, position),
        }
    }

    /// Write `shape` inline, ignoring whether it is itself bound.
    pub(crate) fn shape(&mut self, shape: &Shape, indent: usize, position: Position) {
        match shape {
            Shape::Null => self.out.emit("null"),
            Shape::Bool(true) => self.out.emit("true"),
            Shape::Bool(false) => self.out.emit("false"),
            Shape::Number(text) => self.out.emit(text),
            Shape::String(s) => self.string(s),
            Shape::Array(items) if items.is_empty() => self.empty_array(position),
            Shape::Object(props) if props.is_empty() => self.out.emit("{}"),
            Shape::Array(items) => {
                let inner = indent + self.config.indent_width;
                self.out.emit("[");
                self.out.emit_newline();
                for (i, &item) in items.iter().enumerate() {
                    self.out.emit_indent(inner);
                    ensure_sufficient_stack(|| self.term(item, inner, position));
                    self.separator(i + 1 == items.len());
                }
                self.out.emit_indent(indent);
                self.out.emit("]");
            }
            Shape::Object(props) => {
                let inner = indent + self.config.indent_width;
                self.out.emit("{");
                self.out.emit_newline();
                for (i, (key, value)) in props.iter().enumerate() {
                    self.out.emit_indent(inner);
                    self.string(key);
                    self.out.emit(": ");
                    ensure_sufficient_stack(|| self.term(*value, inner, position));
                    self.separator(i + 1 == props.len());
                }
                self.out.emit_indent(indent);
                self.out.emit("}");
            }
        }
    }

    /// Binding name for a slot, without annotation.
    pub(crate) fn binding_name(&self, slot: SlotId) -> String {
        let mut name = String::with_capacity(self.config.binding_prefix.len() + 4);
        name.push_str(&self.config.binding_prefix);
        // Writing to a String is infallible
        let _ = write!(name, "{}", slot.raw());
        name
    }

    fn slot_ref(&mut self, slot: SlotId) {
        let name = self.binding_name(slot);
        match self.config.type_escape {
            TypeEscape::None => self.out.emit(&name),
            TypeEscape::Flow => {
                self.out.emit("(");
                self.out.emit(&name);
                self.out.emit("/*: any*/)");
            }
        }
    }

    fn empty_array(&mut self, position: Position) {
        match (self.config.type_escape, position) {
            (TypeEscape::Flow, Position::Binding) => self.out.emit("([]/*: any*/)"),
            _ => self.out.emit("[]"),
        }
    }

    fn separator(&mut self, last: bool) {
        if !last {
            self.out.emit(",");
        }
        self.out.emit_newline();
    }

    fn string(&mut self, s: &str) {
        let mut buf = String::with_capacity(s.len() + 2);
        write_string_literal(&mut buf, s);
        self.out.emit(&buf);
    }
}

/// Append `s` as a double-quoted JSON string literal.
pub(crate) fn write_string_literal(buf: &mut String, s: &str) {
    buf.push('"');
    for c in s.chars() {
        match c {
            '"' => buf.push_str("\\\""),
            '\\' => buf.push_str("\\\\"),
            '\n' => buf.push_str("\\n"),
            '\r' => buf.push_str("\\r"),
            '\t' => buf.push_str("\\t"),
            '\u{08}' => buf.push_str("\\b"),
            '\u{0C}' => buf.push_str("\\f"),
            c if u32::from(c) < 0x20 => {
                // Writing to a String is infallible
                let _ = write!(buf, "\\u{:04x}", u32::from(c));
            }
            c => buf.push(c),
        }
    }
    buf.push('"');
}
