//! Shared fixtures for the end-to-end tests.

#![allow(dead_code)]

use pathflow::{Edge, ElementId, InEdge, MicroRef, PathRecord, Vertex};

/// The classic six-vertex property graph:
///
/// ```text
/// marko(1) -knows-> vadas(2)     marko(1) -knows-> josh(4)
/// marko(1) -created-> lop(3)     josh(4) -created-> ripple(5)
/// josh(4) -created-> lop(3)      peter(6) -created-> lop(3)
/// ```
pub fn tinkergraph() -> Vec<Vertex> {
    let mut vertices = vec![
        Vertex::new(1u64).with_property("name", "marko").with_property("age", 29),
        Vertex::new(2u64).with_property("name", "vadas").with_property("age", 27),
        Vertex::new(3u64).with_property("name", "lop").with_property("lang", "java"),
        Vertex::new(4u64).with_property("name", "josh").with_property("age", 32),
        Vertex::new(5u64).with_property("name", "ripple").with_property("lang", "java"),
        Vertex::new(6u64).with_property("name", "peter").with_property("age", 35),
    ];

    let edges = [
        Edge::new(7u64, 1u64, "knows", 2u64).with_property("weight", 0.5),
        Edge::new(8u64, 1u64, "knows", 4u64).with_property("weight", 1.0),
        Edge::new(9u64, 1u64, "created", 3u64).with_property("weight", 0.4),
        Edge::new(10u64, 4u64, "created", 5u64).with_property("weight", 1.0),
        Edge::new(11u64, 4u64, "created", 3u64).with_property("weight", 0.4),
        Edge::new(12u64, 6u64, "created", 3u64).with_property("weight", 0.2),
    ];

    for edge in edges {
        let in_stub = InEdge::from(&edge);
        let (out, inn) = (edge.out_vertex.0 as usize - 1, edge.in_vertex.0 as usize - 1);
        vertices[inn].in_edges.push(in_stub);
        vertices[out].out_edges.push(edge);
    }
    vertices
}

/// Vertex path record from ids, oldest first.
pub fn vpath(ids: &[u64]) -> PathRecord {
    PathRecord::new(ids.iter().map(|&id| MicroRef::vertex(id))).unwrap()
}

pub fn vertex_mut(graph: &mut [Vertex], id: u64) -> &mut Vertex {
    graph.iter_mut().find(|v| v.id == ElementId(id)).unwrap()
}

/// Path counts as `(id, count)` pairs, in stream order.
pub fn path_counts(vertices: &[Vertex]) -> Vec<(u64, usize)> {
    vertices.iter().map(|v| (v.id.0, v.path_count())).collect()
}
