//! End-to-end tests for the back step.
//!
//! Each test runs map -> wire -> shuffle -> reduce through the local driver
//! over the six-vertex example graph.

mod common;

use common::{path_counts, tinkergraph, vertex_mut, vpath};
use pathflow::graph::{identical_structure, seed_start_paths, total_paths};
use pathflow::{
    BackStep, Counter, DriverConfig, ElementId, ElementKind, LocalDriver, MicroRef, PathRecord,
    StepConfig,
};
use pretty_assertions::assert_eq;

fn back_vertices(step: usize) -> BackStep {
    BackStep::new(StepConfig::new(step, ElementKind::Vertex, true))
}

// ============================================================================
// 1. Full start: every vertex becomes its own origin
// ============================================================================

#[test]
fn test_vertices_full_start() {
    let graph = tinkergraph();
    let output = LocalDriver::default().run(&back_vertices(0), graph.clone()).unwrap();

    assert_eq!(output.len(), 6);
    assert_eq!(
        path_counts(&output.vertices),
        vec![(1, 1), (2, 1), (3, 1), (4, 1), (5, 1), (6, 1)]
    );
    assert_eq!(output.counters.get(Counter::VerticesFiltered), 0);
    assert_eq!(output.counters.get(Counter::EdgesFiltered), 0);
    assert!(identical_structure(&output.vertices, &graph));

    for v in &output.vertices {
        assert_eq!(v.paths.records(), &[PathRecord::single(v.micro())]);
    }
}

#[test]
fn test_vertices_full_start_after_seeding() {
    let mut graph = tinkergraph();
    seed_start_paths(&mut graph, ElementKind::Vertex);

    let output = LocalDriver::default().run(&back_vertices(0), graph.clone()).unwrap();

    assert!(output.vertices.iter().all(|v| v.path_count() == 1));
    assert_eq!(output.counters.total_filtered(), 0);
    assert!(identical_structure(&output.vertices, &graph));
}

// ============================================================================
// 2. Biased start: seeded histories are re-homed
// ============================================================================

fn biased_graph() -> Vec<pathflow::Vertex> {
    let mut graph = tinkergraph();
    for v in &mut graph {
        v.enable_paths(true);
    }
    vertex_mut(&mut graph, 1).paths.add(vpath(&[1, 1]));
    vertex_mut(&mut graph, 2).paths.add(vpath(&[1, 2]));
    vertex_mut(&mut graph, 3).paths.add(vpath(&[2, 3]));
    vertex_mut(&mut graph, 4).paths.add(vpath(&[3, 4]));
    vertex_mut(&mut graph, 5).paths.add(vpath(&[3, 5]));
    graph
}

#[test]
fn test_vertices_biased_start() {
    let graph = biased_graph();
    let output = LocalDriver::default().run(&back_vertices(0), graph.clone()).unwrap();

    assert_eq!(output.len(), 6);
    assert_eq!(
        path_counts(&output.vertices),
        vec![(1, 2), (2, 1), (3, 2), (4, 0), (5, 0), (6, 0)]
    );
    assert_eq!(output.counters.get(Counter::VerticesFiltered), 0);
    assert_eq!(output.counters.get(Counter::EdgesFiltered), 0);
    assert!(identical_structure(&output.vertices, &graph));
}

#[test]
fn test_rehomed_records_end_at_new_owner() {
    let output = LocalDriver::default().run(&back_vertices(0), biased_graph()).unwrap();

    let v1 = output.get(1u64).unwrap();
    assert_eq!(v1.paths.records(), &[vpath(&[1]), vpath(&[1])]);
    let v3 = output.get(3u64).unwrap();
    assert!(v3.paths.records().iter().all(|r| r.ends_at(ElementKind::Vertex, ElementId(3))));
    assert!(output.vertices.iter().all(|v| v.validate().is_ok()));
}

#[test]
fn test_biased_start_later_step() {
    // step 1 points every record back at its owner
    let output = LocalDriver::default().run(&back_vertices(1), biased_graph()).unwrap();
    assert_eq!(
        path_counts(&output.vertices),
        vec![(1, 1), (2, 1), (3, 1), (4, 1), (5, 1), (6, 0)]
    );
    assert_eq!(output.counters.total_filtered(), 0);
}

#[test]
fn test_out_of_range_records_dropped_not_counted() {
    let output = LocalDriver::default().run(&back_vertices(2), biased_graph()).unwrap();
    assert_eq!(total_paths(&output.vertices, ElementKind::Vertex), 0);
    assert_eq!(output.len(), 6);
    assert_eq!(output.counters.total_filtered(), 0);
}

#[test]
fn test_mixed_lengths_filter_per_record() {
    let mut graph = biased_graph();
    vertex_mut(&mut graph, 4).paths.add(vpath(&[4]));

    let output = LocalDriver::default().run(&back_vertices(1), graph).unwrap();
    // [3,4] survives and comes home, [4] is too short
    assert_eq!(output.get(4u64).unwrap().paths.records(), &[vpath(&[3, 4])]);
}

// ============================================================================
// 3. Filtering
// ============================================================================

#[test]
fn test_dangling_reference_counted() {
    let mut graph = biased_graph();
    vertex_mut(&mut graph, 6).paths.add(vpath(&[42, 6]));

    let output = LocalDriver::default().run(&back_vertices(0), graph).unwrap();
    assert_eq!(output.len(), 6);
    assert!(output.get(42u64).is_none());
    assert_eq!(output.counters.get(Counter::VerticesFiltered), 1);
    assert_eq!(output.counters.get(Counter::EdgesFiltered), 0);
}

#[test]
fn test_wrong_class_counted() {
    let mut graph = tinkergraph();
    for v in &mut graph {
        v.enable_paths(true);
    }
    // traverser sitting on edge 7 after walking 1 -> e7
    let e7 = graph[0].out_edges[0].micro();
    let record = PathRecord::new([MicroRef::vertex(1u64), e7.clone()]).unwrap();
    graph[0].out_edges[0].paths.add(record);

    let job = BackStep::new(StepConfig::new(0, ElementKind::Edge, true));
    let output = LocalDriver::default().run(&job, graph).unwrap();

    // the record rewinds to vertex 1, but the job only re-homes onto edges
    assert_eq!(output.counters.get(Counter::VerticesFiltered), 1);
    assert_eq!(total_paths(&output.vertices, ElementKind::Vertex), 0);
}

#[test]
fn test_edge_reference_under_vertex_class_counted() {
    let mut graph = tinkergraph();
    for v in &mut graph {
        v.enable_paths(true);
    }
    // marko -e7-> vadas; step 1 points at the edge, not a vertex
    let e7 = graph[0].out_edges[0].micro();
    let record = PathRecord::new([MicroRef::vertex(1u64), e7, MicroRef::vertex(2u64)]).unwrap();
    vertex_mut(&mut graph, 2).paths.add(record);

    let output = LocalDriver::default().run(&back_vertices(1), graph).unwrap();
    assert_eq!(output.counters.get(Counter::VerticesFiltered), 0);
    assert_eq!(output.counters.get(Counter::EdgesFiltered), 1);
    assert_eq!(total_paths(&output.vertices, ElementKind::Vertex), 0);
    assert_eq!(total_paths(&output.vertices, ElementKind::Edge), 0);
}

#[test]
fn test_dangling_edge_reference_counted() {
    let mut graph = tinkergraph();
    for v in &mut graph {
        v.enable_paths(true);
    }
    // the first edge leaves vertex 42, which is not in the stream
    let ghost = MicroRef::edge(99u64, "knows", 42u64, 4u64);
    let e10 = vertex_mut(&mut graph, 4).out_edges[0].micro();
    let record = PathRecord::new([ghost, MicroRef::vertex(4u64), e10]).unwrap();
    vertex_mut(&mut graph, 4).out_edges[0].paths.add(record);

    let job = BackStep::new(StepConfig::new(0, ElementKind::Edge, true));
    let output = LocalDriver::default().run(&job, graph).unwrap();
    assert_eq!(output.len(), 6);
    assert_eq!(output.counters.get(Counter::VerticesFiltered), 0);
    assert_eq!(output.counters.get(Counter::EdgesFiltered), 1);
    assert_eq!(total_paths(&output.vertices, ElementKind::Edge), 0);
}

// ============================================================================
// 4. Edge class
// ============================================================================

#[test]
fn test_edges_full_start() {
    let graph = tinkergraph();
    let job = BackStep::new(StepConfig::new(0, ElementKind::Edge, true));
    let output = LocalDriver::default().run(&job, graph.clone()).unwrap();

    assert_eq!(total_paths(&output.vertices, ElementKind::Edge), 6);
    assert_eq!(total_paths(&output.vertices, ElementKind::Vertex), 0);
    assert_eq!(output.counters.total_filtered(), 0);
    assert!(identical_structure(&output.vertices, &graph));
}

#[test]
fn test_edges_biased_start() {
    let mut graph = tinkergraph();
    for v in &mut graph {
        v.enable_paths(true);
    }
    let e8 = graph[0].out_edges[1].micro(); // 1 -knows-> 4
    let e10 = vertex_mut(&mut graph, 4).out_edges[0].micro(); // 4 -created-> 5
    let record = PathRecord::new([MicroRef::vertex(1u64), e8, MicroRef::vertex(4u64), e10]).unwrap();
    vertex_mut(&mut graph, 4).out_edges[0].paths.add(record);

    let job = BackStep::new(StepConfig::new(1, ElementKind::Edge, true));
    let output = LocalDriver::default().run(&job, graph).unwrap();

    let v1 = output.get(1u64).unwrap();
    let knows_josh = v1.out_edge(ElementId(8)).unwrap();
    assert_eq!(knows_josh.path_count(), 1);
    assert_eq!(knows_josh.paths.records()[0].len(), 2);
    assert_eq!(output.get(4u64).unwrap().out_edge(ElementId(10)).unwrap().path_count(), 0);
    assert_eq!(output.counters.total_filtered(), 0);
}

// ============================================================================
// 5. Pass-through and drivers
// ============================================================================

#[test]
fn test_pass_through_leaves_graph_untouched() {
    let graph = biased_graph();
    let job = BackStep::new(StepConfig::new(3, ElementKind::Edge, false));
    let output = LocalDriver::default().run(&job, graph.clone()).unwrap();
    assert_eq!(output.vertices, graph);
    assert_eq!(output.counters.total_filtered(), 0);
}

#[test]
fn test_partitioning_does_not_change_output() {
    let job = back_vertices(0);
    let single = LocalDriver::new(DriverConfig { reducers: 1, wire_roundtrip: false })
        .run(&job, biased_graph())
        .unwrap();
    let many = LocalDriver::new(DriverConfig { reducers: 5, wire_roundtrip: true })
        .run(&job, biased_graph())
        .unwrap();
    assert_eq!(single.vertices, many.vertices);
    assert_eq!(single.counters, many.counters);
}

#[test]
fn test_chain_back_then_back() {
    let driver = LocalDriver::default();
    let first = back_vertices(0);
    let second = back_vertices(0);
    let out = driver.run_chain(&[&first, &second], biased_graph()).unwrap();

    assert_eq!(out.counters.len(), 2);
    // after the first step every record is [v]; the second keeps them home
    assert_eq!(
        path_counts(&out.vertices),
        vec![(1, 2), (2, 1), (3, 2), (4, 0), (5, 0), (6, 0)]
    );
}

#[test]
fn test_malformed_input_fails_job() {
    let mut graph = tinkergraph();
    vertex_mut(&mut graph, 2).enable_paths(true);
    vertex_mut(&mut graph, 2).paths.add(vpath(&[1, 3]));

    let err = LocalDriver::default().run(&back_vertices(0), graph).unwrap_err();
    assert!(matches!(err, pathflow::Error::MalformedInput(_)), "{err}");
}
