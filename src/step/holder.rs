//! Holder — the envelope for records crossing the shuffle.

use serde::{Deserialize, Serialize};

use crate::model::{ElementId, MicroRef, PathRecord, Vertex};

/// Which kind of payload a [`Holder`] carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HolderTag {
    ElementUpdate,
    PathFragment,
}

/// One path record routed to the element it now belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathFragment {
    /// The element the record was re-homed onto.
    pub target: MicroRef,
    pub path: PathRecord,
}

/// A single map emission's payload.
///
/// Lives for exactly one shuffle: created by a map invocation, consumed by
/// the reduce invocation for its key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "tag", content = "payload", rename_all = "snake_case")]
pub enum Holder {
    /// Authoritative base data for the key.
    ElementUpdate(Vertex),
    /// A path record that should join the key's element.
    PathFragment(PathFragment),
}

impl Holder {
    pub fn tag(&self) -> HolderTag {
        match self {
            Holder::ElementUpdate(_) => HolderTag::ElementUpdate,
            Holder::PathFragment(_) => HolderTag::PathFragment,
        }
    }
}

/// A keyed map output: `(destination id, holder)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Emission {
    pub key: ElementId,
    pub holder: Holder,
}

impl Emission {
    /// The element's own data, keyed by its own id.
    pub fn update(vertex: Vertex) -> Self {
        Self { key: vertex.id, holder: Holder::ElementUpdate(vertex) }
    }

    pub fn fragment(key: ElementId, target: MicroRef, path: PathRecord) -> Self {
        Self { key, holder: Holder::PathFragment(PathFragment { target, path }) }
    }
}
