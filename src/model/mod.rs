//! # Path-Annotated Graph Model
//!
//! The records that cross every step boundary: vertices with their owned
//! out-edges, the micro-references stored in path history, and the path
//! state attached to each element.
//!
//! Design rule: this module is pure data — no I/O, no shuffling, no counters.

pub mod element;
pub mod micro;
pub mod path;
pub mod paths;
pub mod vertex;
pub mod edge;
pub mod value;

pub use element::{ElementId, ElementKind};
pub use micro::MicroRef;
pub use path::PathRecord;
pub use paths::PathState;
pub use vertex::Vertex;
pub use edge::{Edge, InEdge};
pub use value::{PropertyMap, Value};
