//! Edges in the vertex-centric graph.

use serde::{Deserialize, Serialize};

use super::{ElementId, ElementKind, MicroRef, PathState, PropertyMap, Value};

/// A directed, labeled edge owned by its out-vertex.
///
/// Edges are path-annotated elements in their own right: a traversal can sit
/// on an edge, so each one carries its own [`PathState`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub id: ElementId,
    pub label: String,
    pub out_vertex: ElementId,
    pub in_vertex: ElementId,
    #[serde(default)]
    pub properties: PropertyMap,
    #[serde(default)]
    pub paths: PathState,
}

impl Edge {
    pub fn new(
        id: impl Into<ElementId>,
        out_vertex: impl Into<ElementId>,
        label: impl Into<String>,
        in_vertex: impl Into<ElementId>,
    ) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            out_vertex: out_vertex.into(),
            in_vertex: in_vertex.into(),
            properties: PropertyMap::new(),
            paths: PathState::default(),
        }
    }

    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    pub fn micro(&self) -> MicroRef {
        MicroRef::edge(self.id, self.label.clone(), self.out_vertex, self.in_vertex)
    }

    pub fn path_count(&self) -> usize {
        self.paths.count()
    }

    /// Same id, endpoints, label and properties; path state ignored.
    pub fn same_structure(&self, other: &Edge) -> bool {
        self.id == other.id
            && self.label == other.label
            && self.out_vertex == other.out_vertex
            && self.in_vertex == other.in_vertex
            && self.properties == other.properties
    }

    pub(crate) fn validate_paths(&self) -> crate::Result<()> {
        self.paths.validate(ElementKind::Edge, self.id)
    }
}

/// Incoming adjacency entry. The full edge lives at its out-vertex.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InEdge {
    pub id: ElementId,
    pub label: String,
    pub out_vertex: ElementId,
}

impl From<&Edge> for InEdge {
    fn from(edge: &Edge) -> Self {
        Self { id: edge.id, label: edge.label.clone(), out_vertex: edge.out_vertex }
    }
}
