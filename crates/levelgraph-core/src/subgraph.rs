//! Read-only node-induced restriction of a host graph.
//!
//! [`Subgraph`] hides every node outside a retained set, together with every
//! edge touching a hidden node. Nothing is copied from the host graph and the
//! host is never mutated.

use crate::graph::DirectedGraph;
use std::collections::HashSet;

/// A view of `graph` restricted to the nodes in `retained`.
#[derive(Debug)]
pub struct Subgraph<'g, G: DirectedGraph> {
    graph: &'g G,
    retained: HashSet<G::Node>,
}

impl<'g, G: DirectedGraph> Subgraph<'g, G> {
    /// Restrict `graph` to `retained`. Nodes of `retained` missing from the
    /// host graph are ignored.
    pub fn new(graph: &'g G, retained: HashSet<G::Node>) -> Self {
        let retained = retained
            .into_iter()
            .filter(|node| graph.contains_node(node))
            .collect();
        Self { graph, retained }
    }

    /// Number of nodes visible through the view.
    pub fn node_count(&self) -> usize {
        self.retained.len()
    }
}

/// Filters a host iterator down to retained nodes.
pub struct Retained<'a, N, I> {
    inner: Option<I>,
    retained: &'a HashSet<N>,
}

impl<'a, N, I> Iterator for Retained<'a, N, I>
where
    N: Eq + std::hash::Hash + 'a,
    I: Iterator<Item = &'a N>,
{
    type Item = &'a N;

    fn next(&mut self) -> Option<&'a N> {
        let retained = self.retained;
        self.inner.as_mut()?.find(|node| retained.contains(*node))
    }
}

impl<'g, G: DirectedGraph> DirectedGraph for Subgraph<'g, G> {
    type Node = G::Node;
    type Nodes<'a>
        = Retained<'a, G::Node, G::Nodes<'a>>
    where
        Self: 'a;
    type Successors<'a>
        = Retained<'a, G::Node, G::Successors<'a>>
    where
        Self: 'a;

    fn nodes(&self) -> Self::Nodes<'_> {
        Retained {
            inner: Some(self.graph.nodes()),
            retained: &self.retained,
        }
    }

    fn successors<'a>(&'a self, node: &G::Node) -> Self::Successors<'a> {
        let inner = self
            .retained
            .contains(node)
            .then(|| self.graph.successors(node));
        Retained {
            inner,
            retained: &self.retained,
        }
    }

    fn contains_node(&self, node: &G::Node) -> bool {
        self.retained.contains(node)
    }
}
