//! Path state carried by every path-annotated element.

use serde::{Deserialize, Serialize};

use super::{ElementId, ElementKind, MicroRef, PathRecord};
use crate::{Error, Result};

/// Tracking flag plus the multiset of path records attached to an element.
///
/// Record order carries no meaning; entry order inside each record does.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathState {
    #[serde(default)]
    enabled: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    records: Vec<PathRecord>,
}

impl PathState {
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Turn tracking on or off. Turning it off drops every record.
    pub fn enable(&mut self, enabled: bool) {
        self.enabled = enabled;
        if !enabled {
            self.records.clear();
        }
    }

    /// Number of attached records; always 0 while tracking is off.
    pub fn count(&self) -> usize {
        self.records.len()
    }

    pub fn records(&self) -> &[PathRecord] {
        &self.records
    }

    /// Attach one record. Ignored while tracking is off.
    pub fn add(&mut self, record: PathRecord) {
        if self.enabled {
            self.records.push(record);
        }
    }

    /// Multiset union with `records`. Duplicates are kept.
    pub fn merge(&mut self, records: impl IntoIterator<Item = PathRecord>) {
        if self.enabled {
            self.records.extend(records);
        }
    }

    /// Detach and return every record, leaving tracking as it was.
    pub fn take(&mut self) -> Vec<PathRecord> {
        std::mem::take(&mut self.records)
    }

    /// Replace the records with a single `[origin]` record and enable tracking.
    pub fn start(&mut self, origin: MicroRef) {
        self.enabled = true;
        self.records = vec![PathRecord::single(origin)];
    }

    /// Canonical record order, so equal multisets compare equal.
    pub fn normalize(&mut self) {
        self.records.sort_unstable();
    }

    /// Check the structural invariants for the element `(kind, id)`.
    pub fn validate(&self, kind: ElementKind, id: ElementId) -> Result<()> {
        if !self.enabled && !self.records.is_empty() {
            return Err(Error::MalformedInput(format!(
                "{kind} {id} carries {} path records with tracking disabled",
                self.records.len()
            )));
        }
        for record in &self.records {
            if !record.ends_at(kind, id) {
                return Err(Error::MalformedInput(format!(
                    "path record on {kind} {id} terminates at {} {}",
                    record.last().kind(),
                    record.last().id()
                )));
            }
        }
        Ok(())
    }
}
