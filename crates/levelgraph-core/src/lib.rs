//! Levelgraph Core -- longest-path leveling of dependency graphs that may
//! contain cycles.
//!
//! Given a directed graph and a set of source nodes, this crate orders the
//! nodes reachable from the sources, computes each one's longest-path
//! distance from the sources, and groups them into levels by that distance.
//! Level `n` can be processed once levels `0..n` are done, which gives a
//! build/update order even when a strict topological sort does not exist.
//!
//! # Pipeline
//!
//! [`levels::levels`] runs the three stages, each usable on its own:
//!
//! 1. **Restrict** -- keep only the sources and their descendants
//!    ([`levels::reachable_from`], [`subgraph::Subgraph`]).
//! 2. **Distances** -- relax edges in pseudo-topological order
//!    ([`distance::longest_path_distances`]).
//! 3. **Order** -- depth-first postorder from the sources, reversed, with
//!    cycles broken where the visit closes them
//!    ([`order::pseudo_topological_order`]).
//!
//! ```rust
//! use levelgraph_core::graph::DependencyGraph;
//! use levelgraph_core::levels::levels;
//!
//! let graph = DependencyGraph::<String>::from_edges([
//!     ("core", "net"),
//!     ("core", "io"),
//!     ("net", "app"),
//!     ("io", "app"),
//! ]);
//! let levels = levels(&graph, &["core".to_string()]).unwrap();
//! assert_eq!(levels.level_of(&"app".to_string()), Some(2));
//! ```
//!
//! On acyclic graphs the distances are exact. On cyclic graphs they are an
//! approximation that depends on the visit order; see [`distance`].
//!
//! # Key Types
//!
//! - [`graph::DirectedGraph`] -- The read-only capabilities a host graph must
//!   provide.
//! - [`graph::DependencyGraph`] -- Slot-map backed graph over opaque labels
//!   with insertion-ordered adjacency.
//! - [`distance::Distance`] / [`distance::Distances`] -- Node -> longest-path
//!   distance, with an `Unreachable` sentinel.
//! - [`levels::Levels`] -- Level -> set of nodes.
//! - [`order::TraversalError`] -- Raised for a source missing from the graph.

pub mod distance;
pub mod graph;
pub mod id;
pub mod levels;
pub mod order;
pub mod subgraph;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
