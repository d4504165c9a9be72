//! Path records — one traversal history leading to an element.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::{ElementId, ElementKind, MicroRef};
use crate::{Error, Result};

/// Inline capacity covers the common short traversals without a heap hop.
type Entries = SmallVec<[MicroRef; 4]>;

/// An ordered, oldest-first, non-empty history of micro-references.
///
/// Records are immutable: every transformation builds a new record.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<MicroRef>", into = "Vec<MicroRef>")]
pub struct PathRecord {
    entries: Entries,
}

impl PathRecord {
    /// A one-entry record: the element is its own origin.
    pub fn single(origin: MicroRef) -> Self {
        let mut entries = Entries::new();
        entries.push(origin);
        Self { entries }
    }

    /// Build a record from its entries, oldest first.
    pub fn new(entries: impl IntoIterator<Item = MicroRef>) -> Result<Self> {
        let entries: Entries = entries.into_iter().collect();
        if entries.is_empty() {
            return Err(Error::MalformedInput("path record must not be empty".into()));
        }
        Ok(Self { entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The entry the record terminates at, i.e. its owner.
    pub fn last(&self) -> &MicroRef {
        &self.entries[self.entries.len() - 1]
    }

    /// True if the record terminates at `(kind, id)`.
    pub fn ends_at(&self, kind: ElementKind, id: ElementId) -> bool {
        self.last().refers_to(kind, id)
    }

    /// New record holding the history up to and including `step`.
    pub fn rewound_to(&self, step: usize) -> Option<Self> {
        if step >= self.entries.len() {
            return None;
        }
        Some(Self { entries: self.entries[..=step].iter().cloned().collect() })
    }
}

impl TryFrom<Vec<MicroRef>> for PathRecord {
    type Error = Error;

    fn try_from(entries: Vec<MicroRef>) -> Result<Self> {
        Self::new(entries)
    }
}

impl From<PathRecord> for Vec<MicroRef> {
    fn from(record: PathRecord) -> Self {
        record.entries.into_vec()
    }
}
