//! The duplication analyzer.
//!
//! Three walks, all depth-first and left to right:
//!
//! 1. **Signatures** (post-order over the input arena): intern every node's
//!    shape. Results are memoized per `ValueId`, so a shared instance is
//!    walked once; a node met again while still in progress is a cycle.
//! 2. **Repeats** (over signatures, in input order): a non-empty composite
//!    whose signature already completed earlier is a repeat. Its signature
//!    is hoisted and the walk does not enter it, so duplicates that live only
//!    inside a hoisted subtree are written once, in that binding's body.
//! 3. **Slots** (over signatures, in emission order): hoisted signatures get
//!    slot numbers on first reference, after everything their body refers
//!    to. Allocation order is therefore a topological order.

use dedupe_ir::{ensure_sufficient_stack, Value, ValueArena, ValueId};

use crate::analysis::{Analysis, AnalysisStats, Binding, SlotId};
use crate::error::AnalyzeError;
use crate::signature::{Shape, SigId, SignatureTable};

/// Per-value progress of the signature walk.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Visit {
    Pending,
    InProgress,
    Done(SigId),
}

/// Mutable state for one analysis run.
///
/// Owns the signature table and binding list; nothing outlives the call
/// except the returned [`Analysis`].
pub struct Analyzer<'a> {
    arena: &'a ValueArena,
    table: SignatureTable,
    visits: Vec<Visit>,
    /// Signatures whose first occurrence has completed (walk 2).
    completed: Vec<bool>,
    /// Signatures found repeated (walk 2).
    hoisted: Vec<bool>,
    slots: Vec<Option<SlotId>>,
    bindings: Vec<Binding>,
    stats: AnalysisStats,
}

impl<'a> Analyzer<'a> {
    /// Create an analyzer over `arena`.
    pub fn new(arena: &'a ValueArena) -> Self {
        Analyzer {
            arena,
            table: SignatureTable::new(),
            visits: vec![Visit::Pending; arena.len()],
            completed: Vec::new(),
            hoisted: Vec::new(),
            slots: Vec::new(),
            bindings: Vec::new(),
            stats: AnalysisStats::default(),
        }
    }

    /// Analyze the tree rooted at `root`.
    pub fn run(mut self, root: ValueId) -> Result<Analysis, AnalyzeError> {
        let root_sig = self.signature(root)?;

        let signatures = self.table.len();
        self.completed = vec![false; signatures];
        self.hoisted = vec![false; signatures];
        self.slots = vec![None; signatures];

        self.find_repeats(root_sig);
        self.assign_slots(root_sig);

        self.stats.signatures = signatures;
        self.stats.bindings = self.bindings.len();
        tracing::debug!(
            values = self.stats.values,
            signatures = self.stats.signatures,
            repeats = self.stats.repeats,
            bindings = self.stats.bindings,
            "duplication analysis complete"
        );

        Ok(Analysis {
            table: self.table,
            root: root_sig,
            slots: self.slots,
            bindings: self.bindings,
            stats: self.stats,
        })
    }

    // Walk 1: signatures

    fn signature(&mut self, id: ValueId) -> Result<SigId, AnalyzeError> {
        match self.visits.get(id.index()) {
            None => {
                return Err(AnalyzeError::UnsupportedValue {
                    id,
                    reason: "value id does not belong to the arena".to_string(),
                })
            }
            Some(Visit::Done(sig)) => return Ok(*sig),
            Some(Visit::InProgress) => return Err(AnalyzeError::CyclicValue { id }),
            Some(Visit::Pending) => {}
        }
        self.visits[id.index()] = Visit::InProgress;

        let shape = ensure_sufficient_stack(|| self.shape_of(id))?;
        let sig = self.table.intern(shape);

        self.visits[id.index()] = Visit::Done(sig);
        self.stats.values += 1;
        Ok(sig)
    }

    fn shape_of(&mut self, id: ValueId) -> Result<Shape, AnalyzeError> {
        let arena = self.arena;
        let shape = match arena.get(id) {
            Value::Null => Shape::Null,
            Value::Bool(b) => Shape::Bool(*b),
            Value::Number(n) => match n.literal() {
                Some(text) => Shape::Number(text),
                None => {
                    return Err(AnalyzeError::UnsupportedValue {
                        id,
                        reason: "number is not finite".to_string(),
                    })
                }
            },
            Value::String(s) => Shape::String(s.clone()),
            Value::Array(items) => {
                let mut sigs = Vec::with_capacity(items.len());
                for &item in items {
                    sigs.push(self.signature(item)?);
                }
                Shape::Array(sigs)
            }
            Value::Object(props) => {
                let mut sigs = Vec::with_capacity(props.len());
                for (key, value) in props {
                    if matches!(arena.try_get(*value), Some(Value::Absent)) {
                        continue;
                    }
                    sigs.push((key.clone(), self.signature(*value)?));
                }
                Shape::Object(sigs)
            }
            Value::Absent => {
                return Err(AnalyzeError::UnsupportedValue {
                    id,
                    reason: "undefined is only allowed as an object property value".to_string(),
                })
            }
            Value::Opaque(description) => {
                return Err(AnalyzeError::UnsupportedValue {
                    id,
                    reason: format!("{description} has no JSON representation"),
                })
            }
        };
        Ok(shape)
    }

    // Walk 2: repeats

    fn find_repeats(&mut self, sig: SigId) {
        if !self.table.shape(sig).is_hoistable() {
            return;
        }
        if self.completed[sig.index()] {
            self.stats.repeats += 1;
            if !self.hoisted[sig.index()] {
                self.hoisted[sig.index()] = true;
                tracing::trace!(sig = sig.raw(), "repeated subtree");
            }
            return;
        }

        ensure_sufficient_stack(|| {
            let children: Vec<SigId> = self.table.shape(sig).children().collect();
            for child in children {
                self.find_repeats(child);
            }
        });
        self.completed[sig.index()] = true;
    }

    // Walk 3: slots

    fn assign_slots(&mut self, sig: SigId) {
        let hoisted = self.hoisted[sig.index()];
        if hoisted && self.slots[sig.index()].is_some() {
            return;
        }

        ensure_sufficient_stack(|| {
            let children: Vec<SigId> = self.table.shape(sig).children().collect();
            for child in children {
                self.assign_slots(child);
            }
        });

        if hoisted {
            let slot = SlotId::from_index(self.bindings.len());
            self.slots[sig.index()] = Some(slot);
            self.bindings.push(Binding { slot, sig });
            tracing::trace!(sig = sig.raw(), slot = slot.raw(), "binding allocated");
        }
    }
}

/// Analyze the tree rooted at `root`.
///
/// # Errors
///
/// [`AnalyzeError::UnsupportedValue`] if the tree reaches an opaque value, a
/// non-finite number, or `undefined` outside an object property;
/// [`AnalyzeError::CyclicValue`] if a node contains itself.
pub fn analyze(arena: &ValueArena, root: ValueId) -> Result<Analysis, AnalyzeError> {
    Analyzer::new(arena).run(root)
}
