//! Analysis results.

use std::fmt;

use dedupe_ir::ensure_sufficient_stack;

use crate::signature::{Shape, SigId, SignatureTable};

/// Sequence number of a binding (`v0`, `v1`, ...).
#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct SlotId(u32);

impl SlotId {
    pub(crate) const fn new(raw: u32) -> Self {
        SlotId(raw)
    }

    /// Slot for the binding at `index` in the binding list.
    ///
    /// # Panics
    ///
    /// Panics if `index` does not fit in a `u32`.
    pub(crate) fn from_index(index: usize) -> Self {
        let raw = u32::try_from(index)
            .unwrap_or_else(|_| panic!("binding count exceeded {} slots", u32::MAX));
        SlotId::new(raw)
    }

    /// Index into the binding list.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Raw u32 value.
    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SlotId({})", self.0)
    }
}

/// One hoisted subtree.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Binding {
    /// Slot number; equal to the binding's position in [`Analysis::bindings`].
    pub slot: SlotId,
    /// Signature whose canonical form the binding holds.
    pub sig: SigId,
}

/// Counters from one analysis run.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct AnalysisStats {
    /// Distinct input values visited (shared instances count once).
    pub values: usize,
    /// Distinct signatures.
    pub signatures: usize,
    /// Positions recognized as a repeat of an earlier subtree.
    pub repeats: usize,
    /// Bindings allocated.
    pub bindings: usize,
}

/// What a position renders as after substitution.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Term<'a> {
    /// Reference to a binding.
    Slot(SlotId),
    /// Inline literal; children are looked up again through [`Analysis::term`].
    Inline(&'a Shape),
}

/// A fully materialized substituted tree.
///
/// Produced on request by [`Analysis::substituted`] and
/// [`Analysis::binding_form`]; the emitter reads the table directly.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Node {
    Null,
    Bool(bool),
    Number(String),
    String(String),
    Array(Vec<Node>),
    Object(Vec<(String, Node)>),
    Slot(SlotId),
}

/// Result of analyzing one value tree.
#[derive(Debug)]
pub struct Analysis {
    pub(crate) table: SignatureTable,
    pub(crate) root: SigId,
    pub(crate) slots: Vec<Option<SlotId>>,
    pub(crate) bindings: Vec<Binding>,
    pub(crate) stats: AnalysisStats,
}

impl Analysis {
    /// Signature of the input root.
    pub fn root(&self) -> SigId {
        self.root
    }

    /// Bindings in allocation order. A binding only refers to bindings that
    /// come before it.
    pub fn bindings(&self) -> &[Binding] {
        &self.bindings
    }

    /// Whether any subtree was hoisted.
    pub fn has_bindings(&self) -> bool {
        !self.bindings.is_empty()
    }

    /// Slot bound to `sig`, if it was hoisted.
    pub fn slot_of(&self, sig: SigId) -> Option<SlotId> {
        self.slots.get(sig.index()).copied().flatten()
    }

    /// Structure behind a signature.
    pub fn shape(&self, sig: SigId) -> &Shape {
        self.table.shape(sig)
    }

    /// How the position holding `sig` is written out.
    pub fn term(&self, sig: SigId) -> Term<'_> {
        match self.slot_of(sig) {
            Some(slot) => Term::Slot(slot),
            None => Term::Inline(self.table.shape(sig)),
        }
    }

    /// Run counters.
    pub fn stats(&self) -> AnalysisStats {
        self.stats
    }

    /// The substituted root expression.
    pub fn substituted(&self) -> Node {
        self.materialize_term(self.root)
    }

    /// The canonical form a binding declares: its own shape inline, with
    /// hoisted children as slot references.
    pub fn binding_form(&self, binding: Binding) -> Node {
        self.materialize_shape(self.table.shape(binding.sig))
    }

    fn materialize_term(&self, sig: SigId) -> Node {
        match self.term(sig) {
            Term::Slot(slot) => Node::Slot(slot),
            Term::Inline(shape) => self.materialize_shape(shape),
        }
    }

    fn materialize_shape(&self, shape: &Shape) -> Node {
        ensure_sufficient_stack(|| match shape {
            Shape::Null => Node::Null,
            Shape::Bool(b) => Node::Bool(*b),
            Shape::Number(n) => Node::Number(n.clone()),
            Shape::String(s) => Node::String(s.clone()),
            Shape::Array(items) => {
                Node::Array(items.iter().map(|&item| self.materialize_term(item)).collect())
            }
            Shape::Object(props) => Node::Object(
                props
                    .iter()
                    .map(|(key, sig)| (key.clone(), self.materialize_term(*sig)))
                    .collect(),
            ),
        })
    }
}
