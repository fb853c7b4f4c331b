//! Shared test helpers for integration tests and benchmarks.
//!
//! Gated behind `#[cfg(any(test, feature = "test-utils"))]` so these helpers
//! are available in unit tests, integration tests, and benchmarks (via the
//! `test-utils` feature).

use crate::distance::Distance;
use crate::graph::{DependencyGraph, DirectedGraph};
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

// ===========================================================================
// Builders
// ===========================================================================

/// Build a string-labelled graph from an edge list.
pub fn graph(edges: &[(&str, &str)]) -> DependencyGraph<String> {
    DependencyGraph::from_edges(edges.iter().copied())
}

/// Owned node labels, in the given order.
pub fn names(nodes: &[&str]) -> Vec<String> {
    nodes.iter().map(|n| n.to_string()).collect()
}

pub fn node_set(nodes: &[&str]) -> BTreeSet<String> {
    nodes.iter().map(|n| n.to_string()).collect()
}

/// Expected level map from `(level, nodes)` pairs.
pub fn expected_levels(levels: &[(usize, &[&str])]) -> BTreeMap<usize, BTreeSet<String>> {
    levels
        .iter()
        .map(|&(level, nodes)| (level, node_set(nodes)))
        .collect()
}

// ===========================================================================
// Fixture graphs
// ===========================================================================

/// An acyclic dependency graph over `a..=h` with three roots `a`, `b`, `c`.
pub const ACYCLIC_EDGES: &[(&str, &str)] = &[
    ("a", "d"),
    ("a", "f"),
    ("b", "d"),
    ("b", "e"),
    ("b", "g"),
    ("c", "e"),
    ("c", "h"),
    ("d", "f"),
    ("d", "g"),
    ("d", "h"),
    ("e", "g"),
];

/// Edges added on top of [`ACYCLIC_EDGES`] to close the cycle `a -> b -> e -> a`.
pub const CYCLE_EDGES: &[(&str, &str)] = &[("a", "b"), ("e", "a"), ("c", "g")];

/// Edges added on top of [`CYCLE_EDGES`] to make `a` reach everything directly
/// and close `a -> b -> d -> c -> e -> a`.
pub const DENSE_CYCLE_EDGES: &[(&str, &str)] = &[
    ("d", "c"),
    ("a", "c"),
    ("a", "e"),
    ("a", "g"),
    ("a", "h"),
];

pub fn acyclic_fixture() -> DependencyGraph<String> {
    graph(ACYCLIC_EDGES)
}

pub fn cyclic_fixture() -> DependencyGraph<String> {
    let mut g = acyclic_fixture();
    g.add_edges(CYCLE_EDGES.iter().copied());
    g
}

pub fn dense_cyclic_fixture() -> DependencyGraph<String> {
    let mut g = cyclic_fixture();
    g.add_edges(DENSE_CYCLE_EDGES.iter().copied());
    g
}

/// A layered DAG: `layers` layers of `width` nodes, each node linked to every
/// node of the next layer. Labels are `"{layer}:{index}"`.
pub fn layered_dag(layers: usize, width: usize) -> DependencyGraph<String> {
    let mut g = DependencyGraph::new();
    for layer in 0..layers {
        for i in 0..width {
            g.add_node(format!("{layer}:{i}"));
        }
    }
    for layer in 0..layers.saturating_sub(1) {
        for i in 0..width {
            for j in 0..width {
                g.add_edge(format!("{layer}:{i}"), format!("{}:{j}", layer + 1));
            }
        }
    }
    g
}

// ===========================================================================
// Oracles
// ===========================================================================

/// Longest-path distances by exhaustive enumeration of simple paths.
///
/// A path starts at a source and never re-enters a source, matching the rule
/// that sources are pinned at 0. Exponential; only for small graphs. On a
/// DAG this is the exact answer the relaxation must reproduce.
pub fn brute_force_longest_paths<G: DirectedGraph>(
    graph: &G,
    sources: &[G::Node],
) -> HashMap<G::Node, Distance> {
    let mut best: HashMap<G::Node, Distance> = graph
        .nodes()
        .map(|n| (n.clone(), Distance::Unreachable))
        .collect();
    let source_set: HashSet<&G::Node> = sources.iter().collect();

    fn walk<'a, G: DirectedGraph>(
        graph: &'a G,
        node: &'a G::Node,
        depth: usize,
        sources: &HashSet<&'a G::Node>,
        on_path: &mut HashSet<&'a G::Node>,
        best: &mut HashMap<G::Node, Distance>,
    ) {
        let entry = best.entry(node.clone()).or_insert(Distance::Unreachable);
        if *entry < Distance::Finite(depth) {
            *entry = Distance::Finite(depth);
        }
        on_path.insert(node);
        for next in graph.successors(node) {
            if sources.contains(next) || on_path.contains(next) {
                continue;
            }
            walk(graph, next, depth + 1, sources, on_path, best);
        }
        on_path.remove(node);
    }

    for source in sources {
        let mut on_path = HashSet::new();
        walk(graph, source, 0, &source_set, &mut on_path, &mut best);
    }
    best
}
