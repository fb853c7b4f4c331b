//! Grouping of reachable nodes into levels by longest-path distance.
//!
//! Level 0 holds the sources, level 1 the nodes whose longest path from a
//! source has one edge, and so on. Processing the levels in ascending order
//! gives a build/update order that respects every dependency outside of
//! cycles.

use crate::distance::longest_path_distances;
use crate::graph::DirectedGraph;
use crate::order::{TraversalError, validate_sources};
use crate::subgraph::Subgraph;
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashSet};

/// Level number -> nodes at that longest-path distance.
///
/// The node sets are disjoint, and only nodes reachable from the sources
/// (sources included) appear.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
#[serde(bound(
    serialize = "N: Ord + Serialize",
    deserialize = "N: Ord + Deserialize<'de>"
))]
pub struct Levels<N> {
    levels: BTreeMap<usize, BTreeSet<N>>,
}

impl<N> Default for Levels<N> {
    fn default() -> Self {
        Self {
            levels: BTreeMap::new(),
        }
    }
}

impl<N> From<BTreeMap<usize, BTreeSet<N>>> for Levels<N> {
    fn from(levels: BTreeMap<usize, BTreeSet<N>>) -> Self {
        Self { levels }
    }
}

impl<N: Ord> Levels<N> {
    /// Nodes at `level`, if any.
    pub fn get(&self, level: usize) -> Option<&BTreeSet<N>> {
        self.levels.get(&level)
    }

    /// Levels in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &BTreeSet<N>)> + '_ {
        self.levels.iter().map(|(&level, nodes)| (level, nodes))
    }

    /// Number of non-empty levels.
    pub fn depth(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Total number of nodes across all levels.
    pub fn node_count(&self) -> usize {
        self.levels.values().map(BTreeSet::len).sum()
    }

    /// Level holding `node`, if it was reachable.
    pub fn level_of(&self, node: &N) -> Option<usize> {
        self.levels
            .iter()
            .find(|(_, nodes)| nodes.contains(node))
            .map(|(&level, _)| level)
    }

    pub fn as_map(&self) -> &BTreeMap<usize, BTreeSet<N>> {
        &self.levels
    }

    pub fn into_inner(self) -> BTreeMap<usize, BTreeSet<N>> {
        self.levels
    }

    /// Levels as ordered batches, lowest level first.
    pub fn into_batches(self) -> Vec<Vec<N>> {
        self.levels
            .into_values()
            .map(|nodes| nodes.into_iter().collect())
            .collect()
    }
}

/// The sources together with every node reachable from them.
pub fn reachable_from<G: DirectedGraph>(
    graph: &G,
    sources: &[G::Node],
) -> Result<HashSet<G::Node>, TraversalError<G::Node>> {
    validate_sources(graph, sources)?;
    // A single visit seeded with every source.
    let mut reachable: HashSet<G::Node> = sources.iter().cloned().collect();
    let mut stack: Vec<&G::Node> = sources.iter().collect();
    while let Some(node) = stack.pop() {
        for next in graph.successors(node) {
            if reachable.insert(next.clone()) {
                stack.push(next);
            }
        }
    }
    Ok(reachable)
}

/// Group the nodes reachable from `sources` by longest-path distance.
///
/// The graph is first restricted to the sources and their descendants, so
/// disconnected parts of the graph never show up; distances are then
/// computed on the restriction with [`longest_path_distances`] and inverted
/// into level -> nodes. The caller's graph is only read.
///
/// On cyclic graphs the levels inherit the order-dependent approximation
/// described in [`crate::distance`].
///
/// # Examples
///
/// ```
/// use levelgraph_core::graph::DependencyGraph;
/// use levelgraph_core::levels::levels;
///
/// let graph = DependencyGraph::<String>::from_edges([("a", "b"), ("b", "c"), ("x", "y")]);
/// let levels = levels(&graph, &["a".to_string()]).unwrap();
/// assert_eq!(levels.depth(), 3);
/// assert_eq!(levels.level_of(&"c".to_string()), Some(2));
/// assert_eq!(levels.level_of(&"x".to_string()), None);
/// ```
pub fn levels<G>(
    graph: &G,
    sources: &[G::Node],
) -> Result<Levels<G::Node>, TraversalError<G::Node>>
where
    G: DirectedGraph,
    G::Node: Ord,
{
    let reachable = reachable_from(graph, sources)?;
    let restricted = Subgraph::new(graph, reachable);
    let levels = longest_path_distances(&restricted, sources)?.into_levels();
    debug!(
        "levels: {} nodes in {} levels from {} sources",
        levels.node_count(),
        levels.depth(),
        sources.len()
    );
    Ok(levels)
}
