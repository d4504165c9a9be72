//! Vertices — the records that flow through every step job.

use serde::{Deserialize, Serialize};

use super::{Edge, ElementId, ElementKind, InEdge, MicroRef, PathState, PropertyMap, Value};
use crate::{Error, Result};

/// A path-annotated vertex with its adjacency.
///
/// This is the unit of the step stream: out-edges are owned here (with their
/// own path state), in-edges are stubs pointing back at their owners.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vertex {
    pub id: ElementId,
    #[serde(default)]
    pub properties: PropertyMap,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub out_edges: Vec<Edge>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub in_edges: Vec<InEdge>,
    #[serde(default)]
    pub paths: PathState,
}

impl Vertex {
    pub fn new(id: impl Into<ElementId>) -> Self {
        Self {
            id: id.into(),
            properties: PropertyMap::new(),
            out_edges: Vec::new(),
            in_edges: Vec::new(),
            paths: PathState::default(),
        }
    }

    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.properties.get(key)
    }

    pub fn micro(&self) -> MicroRef {
        MicroRef::vertex(self.id)
    }

    pub fn path_count(&self) -> usize {
        self.paths.count()
    }

    /// Enable or disable path tracking on the vertex and all its out-edges.
    pub fn enable_paths(&mut self, enabled: bool) {
        self.paths.enable(enabled);
        for edge in &mut self.out_edges {
            edge.paths.enable(enabled);
        }
    }

    pub fn out_edge(&self, id: ElementId) -> Option<&Edge> {
        self.out_edges.iter().find(|e| e.id == id)
    }

    pub fn out_edge_mut(&mut self, id: ElementId) -> Option<&mut Edge> {
        self.out_edges.iter_mut().find(|e| e.id == id)
    }

    /// Same id, properties and adjacency; path state ignored.
    pub fn same_structure(&self, other: &Vertex) -> bool {
        self.id == other.id
            && self.properties == other.properties
            && self.in_edges == other.in_edges
            && self.out_edges.len() == other.out_edges.len()
            && self.out_edges.iter().zip(&other.out_edges).all(|(a, b)| a.same_structure(b))
    }

    /// Check that the vertex is a well-formed stream record.
    pub fn validate(&self) -> Result<()> {
        self.paths.validate(ElementKind::Vertex, self.id)?;
        for edge in &self.out_edges {
            if edge.out_vertex != self.id {
                return Err(Error::MalformedInput(format!(
                    "edge {} owned by vertex {} but leaves vertex {}",
                    edge.id, self.id, edge.out_vertex
                )));
            }
            edge.validate_paths()?;
        }
        Ok(())
    }
}
