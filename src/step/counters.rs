//! Filtered-element counters.
//!
//! Each reduce invocation (or partition of invocations) owns its own
//! [`Counters`]; the driver merges them when the job completes.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::model::ElementKind;

/// Names of the diagnostic counters a step job reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Counter {
    VerticesFiltered,
    EdgesFiltered,
}

impl Counter {
    pub fn for_kind(kind: ElementKind) -> Self {
        match kind {
            ElementKind::Vertex => Counter::VerticesFiltered,
            ElementKind::Edge => Counter::EdgesFiltered,
        }
    }
}

impl fmt::Display for Counter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Counter::VerticesFiltered => write!(f, "VERTICES_FILTERED"),
            Counter::EdgesFiltered => write!(f, "EDGES_FILTERED"),
        }
    }
}

/// Append-only accumulator. Values only ever grow.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Counters {
    vertices_filtered: u64,
    edges_filtered: u64,
}

impl Counters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment(&mut self, counter: Counter, by: u64) {
        let slot = match counter {
            Counter::VerticesFiltered => &mut self.vertices_filtered,
            Counter::EdgesFiltered => &mut self.edges_filtered,
        };
        *slot = slot.saturating_add(by);
    }

    /// Record one filtered element of the given kind.
    pub fn filtered(&mut self, kind: ElementKind) {
        self.increment(Counter::for_kind(kind), 1);
    }

    pub fn get(&self, counter: Counter) -> u64 {
        match counter {
            Counter::VerticesFiltered => self.vertices_filtered,
            Counter::EdgesFiltered => self.edges_filtered,
        }
    }

    pub fn total_filtered(&self) -> u64 {
        self.vertices_filtered.saturating_add(self.edges_filtered)
    }

    /// Fold another accumulator into this one. Commutative and associative.
    pub fn merge(&mut self, other: &Counters) {
        self.increment(Counter::VerticesFiltered, other.vertices_filtered);
        self.increment(Counter::EdgesFiltered, other.edges_filtered);
    }
}

impl fmt::Display for Counters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}={} {}={}",
            Counter::VerticesFiltered,
            self.vertices_filtered,
            Counter::EdgesFiltered,
            self.edges_filtered
        )
    }
}
