//! # pathflow — Path-Tracking Traversal Steps over Map/Reduce
//!
//! Graph traversals too large for one machine are compiled into chains of
//! map/reduce jobs over a vertex-centric, path-annotated graph stream. This
//! crate holds the per-step contract and its reference step, `back`.
//!
//! ## Design Principles
//!
//! 1. **Stream of vertices**: every step consumes and produces `Vertex`
//!    records; out-edges travel with their out-vertex
//! 2. **Immutable history**: a `PathRecord` is never edited, only rebuilt
//! 3. **Contract-first**: `StepJob` is the seam between steps and drivers
//! 4. **Explicit diagnostics**: filtered counts live in a `Counters` value
//!    handed to each reduce, never in globals
//!
//! ## Quick Start
//!
//! ```rust
//! use pathflow::{BackStep, ElementKind, LocalDriver, StepConfig, Vertex};
//!
//! # fn example() -> pathflow::Result<()> {
//! let job = BackStep::new(StepConfig::new(0, ElementKind::Vertex, true));
//! let output = LocalDriver::default().run(&job, vec![Vertex::new(1u64), Vertex::new(2u64)])?;
//!
//! assert_eq!(output.get(1u64).map(|v| v.path_count()), Some(1));
//! assert_eq!(output.counters.total_filtered(), 0);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

// ============================================================================
// Modules
// ============================================================================

pub mod model;
pub mod step;
pub mod codec;
pub mod graph;
pub mod runtime;

// ============================================================================
// Re-exports
// ============================================================================

pub use model::{
    Vertex, Edge, InEdge, MicroRef, PathRecord, PathState,
    ElementId, ElementKind, Value, PropertyMap,
};

pub use step::{
    StepJob, BackStep, StepConfig, Settings,
    Counter, Counters, Emission, Holder, HolderTag, PathFragment,
};

pub use runtime::{LocalDriver, DriverConfig, JobOutput, ChainOutput};

// ============================================================================
// Error Types
// ============================================================================

/// Job-fatal conditions. Filtering is never an error; see [`Counters`].
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Malformed input: {0}")]
    MalformedInput(String),

    #[error("Codec error: {0}")]
    Codec(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
