//! Longest-path distances from a set of sources.
//!
//! Distances are computed by relaxing edges in pseudo-topological order (see
//! [`crate::order`]). On an acyclic graph this is the classic longest-path
//! relaxation and the result is exact. On a cyclic graph the result is well
//! defined but depends on where the depth-first visit broke each cycle: it is
//! not a global longest path, which does not exist once a cycle is reachable.

use crate::graph::DirectedGraph;
use crate::levels::Levels;
use crate::order::{TraversalError, reversed_postorder, validate_sources};
use log::{debug, trace};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::fmt;
use std::hash::Hash;

/// Number of edges on the longest known path from a source.
///
/// `Unreachable` is the negative-infinity sentinel and orders below every
/// finite distance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Distance {
    Unreachable,
    Finite(usize),
}

impl Distance {
    /// The finite value, if any.
    pub fn finite(self) -> Option<usize> {
        match self {
            Distance::Finite(d) => Some(d),
            Distance::Unreachable => None,
        }
    }

    pub fn is_reachable(self) -> bool {
        matches!(self, Distance::Finite(_))
    }

    /// Distance one edge further along a path. Unreachable stays unreachable.
    fn extended(self) -> Distance {
        match self {
            Distance::Finite(d) => Distance::Finite(d + 1),
            Distance::Unreachable => Distance::Unreachable,
        }
    }
}

impl fmt::Display for Distance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Distance::Finite(d) => write!(f, "{d}"),
            Distance::Unreachable => f.write_str("-inf"),
        }
    }
}

/// Node -> distance mapping produced by [`longest_path_distances`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
#[serde(bound(
    serialize = "N: Eq + Hash + Serialize",
    deserialize = "N: Eq + Hash + Deserialize<'de>"
))]
pub struct Distances<N> {
    map: HashMap<N, Distance>,
}

impl<N> Default for Distances<N> {
    fn default() -> Self {
        Self {
            map: HashMap::new(),
        }
    }
}

impl<N: Eq + Hash> PartialEq for Distances<N> {
    fn eq(&self, other: &Self) -> bool {
        self.map == other.map
    }
}

impl<N: Eq + Hash> Eq for Distances<N> {}

impl<N: Eq + Hash> Distances<N> {
    /// Distance of `node`, or `None` if the node was not part of the graph.
    pub fn get(&self, node: &N) -> Option<Distance> {
        self.map.get(node).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&N, Distance)> + '_ {
        self.map.iter().map(|(node, &d)| (node, d))
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Number of nodes with a finite distance.
    pub fn reachable_count(&self) -> usize {
        self.map.values().filter(|d| d.is_reachable()).count()
    }

    /// Largest finite distance, if any node is reachable.
    pub fn max_distance(&self) -> Option<usize> {
        self.map.values().filter_map(|d| d.finite()).max()
    }

    pub fn into_inner(self) -> HashMap<N, Distance> {
        self.map
    }

    /// Group nodes by finite distance. Unreachable nodes are left out.
    pub fn into_levels(self) -> Levels<N>
    where
        N: Ord,
    {
        let mut levels: BTreeMap<usize, BTreeSet<N>> = BTreeMap::new();
        for (node, distance) in self.map {
            if let Distance::Finite(d) = distance {
                levels.entry(d).or_default().insert(node);
            }
        }
        Levels::from(levels)
    }
}

/// Longest-path distance from the nearest source to every node of `graph`.
///
/// Every node starts out [`Distance::Unreachable`] and every source at 0.
/// Nodes are then taken in pseudo-topological order; each one is settled,
/// and every successor not yet settled is raised to at least one more than
/// the node's own distance. An edge into a settled node is never used, which
/// keeps the back-edges of a cycle from feeding a distance into a node that
/// was already final. Sources count as settled from the start, so they stay
/// at 0, and settling happens before relaxing, so a self-loop never changes
/// anything.
///
/// Every node of `graph` appears in the result. An empty `sources` slice
/// yields an empty map.
///
/// # Examples
///
/// ```
/// use levelgraph_core::distance::{Distance, longest_path_distances};
/// use levelgraph_core::graph::DependencyGraph;
///
/// let graph = DependencyGraph::<String>::from_edges([("a", "b"), ("b", "c"), ("a", "c")]);
/// let dist = longest_path_distances(&graph, &["a".to_string()]).unwrap();
/// assert_eq!(dist.get(&"c".to_string()), Some(Distance::Finite(2)));
/// ```
pub fn longest_path_distances<G: DirectedGraph>(
    graph: &G,
    sources: &[G::Node],
) -> Result<Distances<G::Node>, TraversalError<G::Node>> {
    validate_sources(graph, sources)?;
    if sources.is_empty() {
        debug!("longest-path distances: no sources, nothing settles");
        return Ok(Distances::default());
    }

    let mut dist: HashMap<&G::Node, Distance> = graph
        .nodes()
        .map(|node| (node, Distance::Unreachable))
        .collect();
    for source in sources {
        dist.insert(source, Distance::Finite(0));
    }

    let order = reversed_postorder(graph, sources);
    // Sources are final at 0 from the start.
    let mut settled: HashSet<&G::Node> = sources.iter().collect();

    for u in order {
        settled.insert(u);
        let candidate = dist
            .get(u)
            .copied()
            .unwrap_or(Distance::Unreachable)
            .extended();

        for v in graph.successors(u) {
            if settled.contains(v) {
                continue;
            }
            let current = dist.entry(v).or_insert(Distance::Unreachable);
            if *current < candidate {
                trace!("relax {u:?} -> {v:?}: {current} => {candidate}");
                *current = candidate;
            }
        }
    }

    let distances = Distances {
        map: dist
            .into_iter()
            .map(|(node, d)| (node.clone(), d))
            .collect(),
    };
    debug!(
        "longest-path distances: {} of {} nodes reachable from {} sources",
        distances.reachable_count(),
        distances.len(),
        sources.len()
    );
    Ok(distances)
}
