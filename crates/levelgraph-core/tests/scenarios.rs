//! End-to-end leveling scenarios on the fixture dependency graphs.
//!
//! The fixtures grow in steps: an acyclic graph with three roots, the same
//! graph with a cycle through `a`, `b` and `e`, and finally a densely cyclic
//! graph where `a` reaches every node directly.

use levelgraph_core::distance::{Distance, longest_path_distances};
use levelgraph_core::levels::levels;
use levelgraph_core::order::{TraversalError, pseudo_topological_order};
use levelgraph_core::test_utils::*;

#[test]
fn acyclic_graph_with_three_roots() {
    let g = acyclic_fixture();
    let levels = levels(&g, &names(&["a", "b", "c"])).unwrap();
    assert_eq!(
        levels.into_inner(),
        expected_levels(&[
            (0, &["a", "b", "c"]),
            (1, &["d", "e"]),
            (2, &["f", "g", "h"]),
        ])
    );
}

#[test]
fn cycle_through_a_source() {
    let g = cyclic_fixture();
    let levels = levels(&g, &names(&["a", "c"])).unwrap();
    assert_eq!(
        levels.into_inner(),
        expected_levels(&[
            (0, &["a", "c"]),
            (1, &["b"]),
            (2, &["d", "e"]),
            (3, &["f", "g", "h"]),
        ])
    );
}

#[test]
fn dense_cycles_from_a_single_source() {
    let g = dense_cyclic_fixture();
    let levels = levels(&g, &names(&["a"])).unwrap();
    assert_eq!(
        levels.into_inner(),
        expected_levels(&[
            (0, &["a"]),
            (1, &["b"]),
            (2, &["d"]),
            (3, &["c", "f"]),
            (4, &["e", "h"]),
            (5, &["g"]),
        ])
    );
}

#[test]
fn dense_cycles_pseudo_topological_order() {
    let g = dense_cyclic_fixture();
    let order = pseudo_topological_order(&g, &names(&["a"])).unwrap();
    assert_eq!(order, names(&["a", "b", "d", "c", "e", "h", "g", "f"]));
}

#[test]
fn cyclic_distances_match_levels() {
    let g = cyclic_fixture();
    let sources = names(&["a", "c"]);
    let dist = longest_path_distances(&g, &sources).unwrap();
    let lv = levels(&g, &sources).unwrap();

    for (node, distance) in dist.iter() {
        assert_eq!(distance.finite(), lv.level_of(node), "node {node}");
    }
}

#[test]
fn every_scenario_pins_sources_at_zero() {
    let cases = [
        (acyclic_fixture(), names(&["a", "b", "c"])),
        (cyclic_fixture(), names(&["a", "c"])),
        (dense_cyclic_fixture(), names(&["a"])),
    ];
    for (g, sources) in cases {
        let dist = longest_path_distances(&g, &sources).unwrap();
        for source in &sources {
            assert_eq!(dist.get(source), Some(Distance::Finite(0)), "source {source}");
        }
    }
}

#[test]
fn unknown_source_fails_every_operation() {
    let g = cyclic_fixture();
    let sources = names(&["a", "z"]);
    let expected = TraversalError::UnknownSource("z".to_string());

    assert_eq!(pseudo_topological_order(&g, &sources).unwrap_err(), expected);
    assert_eq!(longest_path_distances(&g, &sources).unwrap_err(), expected);
    assert_eq!(levels(&g, &sources).unwrap_err(), expected);
}

#[test]
fn empty_sources_are_valid() {
    let g = dense_cyclic_fixture();
    assert!(pseudo_topological_order(&g, &[]).unwrap().is_empty());
    assert!(longest_path_distances(&g, &[]).unwrap().is_empty());
    assert!(levels(&g, &[]).unwrap().is_empty());
}

#[test]
fn levels_cover_exactly_the_reachable_nodes() {
    let mut g = cyclic_fixture();
    g.add_edges([("x", "y"), ("y", "a")]);
    let levels = levels(&g, &names(&["c"])).unwrap();

    let mut seen = std::collections::BTreeSet::new();
    for (_, nodes) in levels.iter() {
        for node in nodes {
            assert!(seen.insert(node.clone()), "{node} appears on two levels");
        }
    }
    // c reaches e, h and g; e closes back to a, which reaches the rest.
    assert_eq!(seen, node_set(&["a", "b", "c", "d", "e", "f", "g", "h"]));
}
