//! Whole-stream helpers around the vertex model.

use hashbrown::HashMap;

use crate::model::{ElementId, ElementKind, Vertex};

/// Start a traversal on every element of `kind`: tracking on, with the
/// single record `[self]`.
pub fn seed_start_paths(vertices: &mut [Vertex], kind: ElementKind) {
    for vertex in vertices {
        match kind {
            ElementKind::Vertex => {
                let origin = vertex.micro();
                vertex.paths.start(origin);
            }
            ElementKind::Edge => {
                for edge in &mut vertex.out_edges {
                    let origin = edge.micro();
                    edge.paths.start(origin);
                }
            }
        }
    }
}

/// True if both streams hold the same vertices with the same properties
/// and adjacency, in any order. Path state is ignored.
pub fn identical_structure(left: &[Vertex], right: &[Vertex]) -> bool {
    if left.len() != right.len() {
        return false;
    }
    let by_id: HashMap<ElementId, &Vertex> = right.iter().map(|v| (v.id, v)).collect();
    by_id.len() == right.len()
        && left
            .iter()
            .all(|v| by_id.get(&v.id).is_some_and(|other| v.same_structure(other)))
}

/// Sum of path records over every element of `kind`.
pub fn total_paths(vertices: &[Vertex], kind: ElementKind) -> usize {
    vertices
        .iter()
        .map(|v| match kind {
            ElementKind::Vertex => v.path_count(),
            ElementKind::Edge => v.out_edges.iter().map(|e| e.path_count()).sum(),
        })
        .sum()
}
