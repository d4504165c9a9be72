//! Micro-references — the wire-compact handles stored inside path history.

use serde::{Deserialize, Serialize};

use super::{ElementId, ElementKind};

/// Minimal, immutable reference to a vertex or edge.
///
/// Carries no properties or adjacency. Edge references also keep their label
/// and `(out, in)` endpoints so a path can be read back without a lookup.
/// Absent fields are skipped on the wire.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MicroRef {
    id: ElementId,
    #[serde(default)]
    kind: ElementKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    endpoints: Option<(ElementId, ElementId)>,
}

impl MicroRef {
    pub fn vertex(id: impl Into<ElementId>) -> Self {
        Self { id: id.into(), kind: ElementKind::Vertex, label: None, endpoints: None }
    }

    pub fn edge(
        id: impl Into<ElementId>,
        label: impl Into<String>,
        out_vertex: impl Into<ElementId>,
        in_vertex: impl Into<ElementId>,
    ) -> Self {
        Self {
            id: id.into(),
            kind: ElementKind::Edge,
            label: Some(label.into()),
            endpoints: Some((out_vertex.into(), in_vertex.into())),
        }
    }

    pub fn id(&self) -> ElementId {
        self.id
    }

    pub fn kind(&self) -> ElementKind {
        self.kind
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn endpoints(&self) -> Option<(ElementId, ElementId)> {
        self.endpoints
    }

    /// Id of the stream record that owns the referenced element.
    ///
    /// Vertices own themselves; an edge lives at its out-vertex. Returns
    /// `None` for an edge reference that lost its endpoints.
    pub fn home(&self) -> Option<ElementId> {
        match self.kind {
            ElementKind::Vertex => Some(self.id),
            ElementKind::Edge => self.endpoints.map(|(out, _)| out),
        }
    }

    /// True if this reference points at the element `(kind, id)`.
    pub fn refers_to(&self, kind: ElementKind, id: ElementId) -> bool {
        self.kind == kind && self.id == id
    }
}
