//! Criterion benchmarks for the leveling operations.
//!
//! Three benchmark groups:
//! - `layered_dag`: 20 layers of 50 nodes, fully linked between layers
//! - `ring`: one 50_000-node cycle, the worst case for visit depth
//! - `sparse_cyclic`: 10_000 nodes with pseudo-random forward and back edges

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use levelgraph_core::distance::longest_path_distances;
use levelgraph_core::graph::DependencyGraph;
use levelgraph_core::levels::levels;
use levelgraph_core::order::pseudo_topological_order;
use levelgraph_core::test_utils::*;

// ===========================================================================
// Graph builders
// ===========================================================================

fn build_ring(n: usize) -> DependencyGraph<String> {
    DependencyGraph::from_edges((0..n).map(|i| (i.to_string(), ((i + 1) % n).to_string())))
}

/// Each node links to the next one plus two pseudo-random nodes, which gives
/// a mix of forward edges and back-edges. A fixed LCG keeps runs comparable.
fn build_sparse_cyclic(n: usize) -> DependencyGraph<String> {
    let mut state: u64 = 0x2545_f491_4f6c_dd1d;
    let mut next = move || {
        state = state
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);
        (state >> 33) as usize % n
    };

    let mut g = DependencyGraph::new();
    for i in 0..n {
        g.add_edge(i.to_string(), ((i + 1) % n).to_string());
        g.add_edge(i.to_string(), next().to_string());
        g.add_edge(i.to_string(), next().to_string());
    }
    g
}

// ===========================================================================
// Benchmarks
// ===========================================================================

fn bench_layered_dag(c: &mut Criterion) {
    let g = layered_dag(20, 50);
    let sources: Vec<String> = (0..50).map(|i| format!("0:{i}")).collect();

    let mut group = c.benchmark_group("layered_dag");
    group.bench_function("order", |b| {
        b.iter(|| pseudo_topological_order(black_box(&g), &sources).unwrap())
    });
    group.bench_function("distances", |b| {
        b.iter(|| longest_path_distances(black_box(&g), &sources).unwrap())
    });
    group.bench_function("levels", |b| {
        b.iter(|| levels(black_box(&g), &sources).unwrap())
    });
    group.finish();
}

fn bench_ring(c: &mut Criterion) {
    let g = build_ring(50_000);
    let sources = names(&["0"]);

    let mut group = c.benchmark_group("ring");
    group.bench_function("levels", |b| {
        b.iter(|| levels(black_box(&g), &sources).unwrap())
    });
    group.finish();
}

fn bench_sparse_cyclic(c: &mut Criterion) {
    let g = build_sparse_cyclic(10_000);
    let sources = names(&["0", "5000"]);

    let mut group = c.benchmark_group("sparse_cyclic");
    group.bench_function("distances", |b| {
        b.iter(|| longest_path_distances(black_box(&g), &sources).unwrap())
    });
    group.bench_function("levels", |b| {
        b.iter(|| levels(black_box(&g), &sources).unwrap())
    });
    group.finish();
}

criterion_group!(benches, bench_layered_dag, bench_ring, bench_sparse_cyclic);
criterion_main!(benches);
