//! Canonical signatures.
//!
//! Every node of the input is reduced to a [`Shape`]: its own literal
//! content plus the signatures of its children. Shapes are interned into a
//! [`SignatureTable`], so two nodes are structurally equal exactly when they
//! intern to the same [`SigId`]. Substituting a hoisted child by its slot
//! never changes equality: equal children already share one `SigId`.
//!
//! Lookup hashes the shape with `FxHasher` and compares candidates in the
//! bucket exactly, so hash collisions cannot merge different shapes.

use std::fmt;
use std::hash::{Hash, Hasher};

use rustc_hash::{FxHashMap, FxHasher};

/// Interned signature of one node.
#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct SigId(u32);

impl SigId {
    /// Index into the table.
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

impl fmt::Debug for SigId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SigId({})", self.0)
    }
}

/// Structure of one node with children replaced by their signatures.
///
/// Absent object properties are already dropped; numbers carry their
/// literal text.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Shape {
    Null,
    Bool(bool),
    Number(String),
    String(String),
    Array(Vec<SigId>),
    Object(Vec<(String, SigId)>),
}

impl Shape {
    /// Non-empty arrays and objects. Nothing else is ever bound to a slot.
    pub fn is_hoistable(&self) -> bool {
        match self {
            Shape::Array(items) => !items.is_empty(),
            Shape::Object(props) => !props.is_empty(),
            Shape::Null | Shape::Bool(_) | Shape::Number(_) | Shape::String(_) => false,
        }
    }

    /// Child signatures in emission order.
    pub fn children(&self) -> impl Iterator<Item = SigId> + '_ {
        let (items, props): (&[SigId], &[(String, SigId)]) = match self {
            Shape::Array(items) => (items.as_slice(), &[]),
            Shape::Object(props) => (&[], props.as_slice()),
            Shape::Null | Shape::Bool(_) | Shape::Number(_) | Shape::String(_) => (&[], &[]),
        };
        items.iter().copied().chain(props.iter().map(|(_, sig)| *sig))
    }
}

/// Hash-consing table from shapes to signatures.
#[derive(Debug, Default)]
pub struct SignatureTable {
    shapes: Vec<Shape>,
    buckets: FxHashMap<u64, Vec<SigId>>,
}

impl SignatureTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct signatures.
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Shape behind a signature.
    ///
    /// # Panics
    ///
    /// Panics if `sig` came from a different table.
    #[inline]
    pub fn shape(&self, sig: SigId) -> &Shape {
        &self.shapes[sig.index()]
    }

    /// Look up a shape without interning it.
    pub fn get(&self, shape: &Shape) -> Option<SigId> {
        self.buckets
            .get(&hash_shape(shape))?
            .iter()
            .copied()
            .find(|candidate| self.shapes[candidate.index()] == *shape)
    }

    /// Intern a shape, returning the existing signature if an equal shape
    /// was interned before.
    ///
    /// # Panics
    ///
    /// Panics if the table already holds `u32::MAX` signatures.
    pub fn intern(&mut self, shape: Shape) -> SigId {
        let hash = hash_shape(&shape);
        let bucket = self.buckets.entry(hash).or_default();
        if let Some(existing) = bucket
            .iter()
            .copied()
            .find(|candidate| self.shapes[candidate.index()] == shape)
        {
            return existing;
        }

        let index = u32::try_from(self.shapes.len())
            .unwrap_or_else(|_| panic!("signature table exceeded {} entries", u32::MAX));
        let sig = SigId(index);
        bucket.push(sig);
        self.shapes.push(shape);
        sig
    }
}

fn hash_shape(shape: &Shape) -> u64 {
    let mut hasher = FxHasher::default();
    shape.hash(&mut hasher);
    hasher.finish()
}
