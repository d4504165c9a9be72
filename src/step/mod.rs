//! # Step Job Contract
//!
//! Every traversal step compiles to one map/reduce pair over the vertex
//! stream. `StepJob` is the contract between a step and whatever driver
//! runs it.
//!
//! ```text
//! Vertex ──map──▶ (key, Holder)* ──shuffle by key──▶ reduce ──▶ Vertex?
//! ```
//!
//! Map invocations see one vertex; reduce invocations see one key's full
//! group, in any order. Neither may rely on shared mutable state: the only
//! cross-invocation channel is the shuffle, plus the [`Counters`]
//! accumulator each reduce is handed.

pub mod back;
pub mod config;
pub mod counters;
pub mod holder;

use crate::model::{ElementId, Vertex};
use crate::Result;

pub use back::BackStep;
pub use config::{Settings, StepConfig};
pub use counters::{Counter, Counters};
pub use holder::{Emission, Holder, HolderTag, PathFragment};

/// A single traversal step expressed as a map/reduce pair.
pub trait StepJob: Send + Sync {
    /// Short name for logs.
    fn name(&self) -> &str;

    /// Emit keyed holders for one input vertex. Must not depend on any
    /// other vertex.
    fn map(&self, vertex: &Vertex) -> Result<Vec<Emission>>;

    /// Rebuild at most one vertex from every holder sent to `key`.
    ///
    /// Holder order is unspecified. Returning `Ok(None)` drops the key
    /// from the output stream.
    fn reduce(
        &self,
        key: ElementId,
        holders: Vec<Holder>,
        counters: &mut Counters,
    ) -> Result<Option<Vertex>>;
}
