use crate::id::*;
use serde::{Deserialize, Serialize};
use slotmap::{SecondaryMap, SlotMap};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::hash::Hash;

// ---------------------------------------------------------------------------
// Graph capabilities
// ---------------------------------------------------------------------------

/// The read-only capabilities the traversal operations need from a host graph.
///
/// Successors must be yielded in a stable order: the pseudo-topological order
/// (and therefore every distance on a cyclic graph) depends on it.
pub trait DirectedGraph {
    /// Opaque node identifier.
    type Node: Clone + Eq + Hash + fmt::Debug;

    /// Iterator over every node of the graph.
    type Nodes<'a>: Iterator<Item = &'a Self::Node>
    where
        Self: 'a;

    /// Iterator over the direct successors of one node.
    type Successors<'a>: Iterator<Item = &'a Self::Node>
    where
        Self: 'a;

    /// Iterate over all nodes.
    fn nodes(&self) -> Self::Nodes<'_>;

    /// Iterate over the direct successors of `node`. Unknown nodes have none.
    fn successors<'a>(&'a self, node: &Self::Node) -> Self::Successors<'a>;

    /// Returns true if `node` is part of the graph.
    fn contains_node(&self, node: &Self::Node) -> bool;

    /// Every node reachable from `node` through at least one edge.
    ///
    /// `node` itself is only included when it lies on a cycle.
    fn descendants(&self, node: &Self::Node) -> HashSet<Self::Node> {
        let mut seen = HashSet::new();
        let mut stack: Vec<&Self::Node> = self.successors(node).collect();
        while let Some(next) = stack.pop() {
            if seen.insert(next.clone()) {
                stack.extend(self.successors(next));
            }
        }
        seen
    }
}

// ---------------------------------------------------------------------------
// Core data structures
// ---------------------------------------------------------------------------

/// Adjacency lists for a single node, tracking incoming and outgoing edges
/// in insertion order.
#[derive(Debug, Clone, Default)]
struct NodeAdjacency {
    /// Edges whose destination is this node.
    inputs: Vec<EdgeId>,
    /// Edges whose source is this node.
    outputs: Vec<EdgeId>,
}

#[derive(Debug, Clone)]
struct NodeData<N> {
    label: N,
}

/// Per-edge data stored in the dependency graph.
#[derive(Debug, Clone, Copy)]
struct EdgeData {
    from: NodeId,
    to: NodeId,
}

/// Edge-list form used to (de)serialize a [`DependencyGraph`].
///
/// `nodes` lists every node (isolated ones included); `edges` may mention
/// nodes missing from `nodes`, which are then added implicitly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(bound(deserialize = "N: Deserialize<'de>"))]
pub struct GraphData<N> {
    #[serde(default)]
    pub nodes: Vec<N>,
    #[serde(default)]
    pub edges: Vec<(N, N)>,
}

// ---------------------------------------------------------------------------
// DependencyGraph
// ---------------------------------------------------------------------------

/// A directed graph over opaque labels, with edges stored in insertion order.
///
/// Nodes and edges live in `SlotMap`s; adjacency is stored in a
/// `SecondaryMap` keyed by `NodeId` so it stays in sync with the node slots.
/// A label index maps each `N` to its slot. Parallel edges are not stored:
/// adding an edge that already exists is a no-op. Self-loops and cycles are
/// allowed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(into = "GraphData<N>", from = "GraphData<N>")]
#[serde(bound(
    serialize = "N: Clone + Eq + Hash + Serialize",
    deserialize = "N: Clone + Eq + Hash + Deserialize<'de>"
))]
pub struct DependencyGraph<N> {
    nodes: SlotMap<NodeId, NodeData<N>>,
    edges: SlotMap<EdgeId, EdgeData>,
    adjacency: SecondaryMap<NodeId, NodeAdjacency>,
    index: HashMap<N, NodeId>,
}

impl<N: Clone + Eq + Hash> Default for DependencyGraph<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N: Clone + Eq + Hash> DependencyGraph<N> {
    /// Create a new, empty graph.
    pub fn new() -> Self {
        Self {
            nodes: SlotMap::with_key(),
            edges: SlotMap::with_key(),
            adjacency: SecondaryMap::new(),
            index: HashMap::new(),
        }
    }

    /// Build a graph from a list of edges, adding endpoints as they appear.
    ///
    /// # Examples
    ///
    /// ```
    /// use levelgraph_core::graph::DependencyGraph;
    ///
    /// let graph = DependencyGraph::<String>::from_edges([("a", "b"), ("b", "c")]);
    /// assert_eq!(graph.node_count(), 3);
    /// assert_eq!(graph.edge_count(), 2);
    /// ```
    pub fn from_edges<I, A, B>(edges: I) -> Self
    where
        I: IntoIterator<Item = (A, B)>,
        A: Into<N>,
        B: Into<N>,
    {
        let mut graph = Self::new();
        graph.add_edges(edges);
        graph
    }

    // -----------------------------------------------------------------------
    // Mutations
    // -----------------------------------------------------------------------

    /// Add a node, returning its slot. Adding an existing label returns the
    /// slot it already occupies.
    pub fn add_node(&mut self, label: N) -> NodeId {
        if let Some(&id) = self.index.get(&label) {
            return id;
        }
        let id = self.nodes.insert(NodeData {
            label: label.clone(),
        });
        self.adjacency.insert(id, NodeAdjacency::default());
        self.index.insert(label, id);
        id
    }

    /// Add the edge `from -> to`, adding either endpoint if missing.
    ///
    /// Returns the existing edge when `from -> to` is already present.
    pub fn add_edge(&mut self, from: N, to: N) -> EdgeId {
        let from = self.add_node(from);
        let to = self.add_node(to);
        if let Some(existing) = self.find_edge(from, to) {
            return existing;
        }

        let edge_id = self.edges.insert(EdgeData { from, to });
        if let Some(adj) = self.adjacency.get_mut(from) {
            adj.outputs.push(edge_id);
        }
        if let Some(adj) = self.adjacency.get_mut(to) {
            adj.inputs.push(edge_id);
        }
        edge_id
    }

    /// Add every edge of `edges` in order.
    pub fn add_edges<I, A, B>(&mut self, edges: I)
    where
        I: IntoIterator<Item = (A, B)>,
        A: Into<N>,
        B: Into<N>,
    {
        for (from, to) in edges {
            self.add_edge(from.into(), to.into());
        }
    }

    /// Remove a node and every edge touching it. Returns false if the node
    /// was not present.
    pub fn remove_node(&mut self, label: &N) -> bool {
        let Some(node) = self.index.remove(label) else {
            return false;
        };

        let edges_to_remove: Vec<EdgeId> = self
            .adjacency
            .get(node)
            .map(|adj| adj.inputs.iter().chain(adj.outputs.iter()).copied().collect())
            .unwrap_or_default();
        for edge_id in edges_to_remove {
            self.disconnect(edge_id);
        }

        self.nodes.remove(node);
        self.adjacency.remove(node);
        true
    }

    /// Remove the edge `from -> to`. Returns false if it was not present.
    pub fn remove_edge(&mut self, from: &N, to: &N) -> bool {
        let (Some(&from), Some(&to)) = (self.index.get(from), self.index.get(to)) else {
            return false;
        };
        match self.find_edge(from, to) {
            Some(edge_id) => {
                self.disconnect(edge_id);
                true
            }
            None => false,
        }
    }

    fn disconnect(&mut self, edge: EdgeId) {
        if let Some(edge_data) = self.edges.remove(edge) {
            if let Some(adj) = self.adjacency.get_mut(edge_data.from) {
                adj.outputs.retain(|&e| e != edge);
            }
            if let Some(adj) = self.adjacency.get_mut(edge_data.to) {
                adj.inputs.retain(|&e| e != edge);
            }
        }
    }

    fn find_edge(&self, from: NodeId, to: NodeId) -> Option<EdgeId> {
        self.adjacency.get(from).and_then(|adj| {
            adj.outputs
                .iter()
                .copied()
                .find(|&eid| self.edges.get(eid).is_some_and(|e| e.to == to))
        })
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    /// Slot of the node with the given label.
    pub fn node_id(&self, label: &N) -> Option<NodeId> {
        self.index.get(label).copied()
    }

    /// Label stored in a node slot.
    pub fn label(&self, node: NodeId) -> Option<&N> {
        self.nodes.get(node).map(|data| &data.label)
    }

    /// Returns true if the node exists in the graph.
    pub fn contains(&self, label: &N) -> bool {
        self.index.contains_key(label)
    }

    /// Returns true if the edge `from -> to` exists.
    pub fn contains_edge(&self, from: &N, to: &N) -> bool {
        match (self.index.get(from), self.index.get(to)) {
            (Some(&from), Some(&to)) => self.find_edge(from, to).is_some(),
            _ => false,
        }
    }

    /// Total number of nodes in the graph.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Total number of edges in the graph.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Iterate over all node labels in slot order.
    pub fn labels(&self) -> Labels<'_, N> {
        Labels {
            inner: self.nodes.values(),
        }
    }

    /// Iterate over all edges as `(from, to)` label pairs.
    pub fn edges(&self) -> impl Iterator<Item = (&N, &N)> + '_ {
        self.edges.values().filter_map(|edge| {
            let from = self.label(edge.from)?;
            let to = self.label(edge.to)?;
            Some((from, to))
        })
    }

    /// Direct successors of a node, in edge insertion order.
    pub fn outgoing(&self, label: &N) -> Neighbors<'_, N> {
        self.neighbors(label, Direction::Outgoing)
    }

    /// Direct predecessors of a node, in edge insertion order.
    pub fn incoming(&self, label: &N) -> Neighbors<'_, N> {
        self.neighbors(label, Direction::Incoming)
    }

    fn neighbors(&self, label: &N, direction: Direction) -> Neighbors<'_, N> {
        let edges = self
            .index
            .get(label)
            .and_then(|&id| self.adjacency.get(id))
            .map(|adj| match direction {
                Direction::Outgoing => adj.outputs.as_slice(),
                Direction::Incoming => adj.inputs.as_slice(),
            })
            .unwrap_or(&[]);
        Neighbors {
            graph: self,
            edges: edges.iter(),
            direction,
        }
    }
}

// ---------------------------------------------------------------------------
// Iterators
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy)]
enum Direction {
    Outgoing,
    Incoming,
}

/// Iterator over node labels, returned by [`DependencyGraph::labels`].
pub struct Labels<'a, N> {
    inner: slotmap::basic::Values<'a, NodeId, NodeData<N>>,
}

impl<'a, N> Iterator for Labels<'a, N> {
    type Item = &'a N;

    fn next(&mut self) -> Option<&'a N> {
        self.inner.next().map(|data| &data.label)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

/// Iterator over the neighbors of one node on one side of its edges.
pub struct Neighbors<'a, N> {
    graph: &'a DependencyGraph<N>,
    edges: std::slice::Iter<'a, EdgeId>,
    direction: Direction,
}

impl<'a, N> Iterator for Neighbors<'a, N> {
    type Item = &'a N;

    fn next(&mut self) -> Option<&'a N> {
        for &edge_id in self.edges.by_ref() {
            let Some(edge) = self.graph.edges.get(edge_id) else {
                continue;
            };
            let end = match self.direction {
                Direction::Outgoing => edge.to,
                Direction::Incoming => edge.from,
            };
            if let Some(data) = self.graph.nodes.get(end) {
                return Some(&data.label);
            }
        }
        None
    }
}

impl<N> DirectedGraph for DependencyGraph<N>
where
    N: Clone + Eq + Hash + fmt::Debug,
{
    type Node = N;
    type Nodes<'a>
        = Labels<'a, N>
    where
        Self: 'a;
    type Successors<'a>
        = Neighbors<'a, N>
    where
        Self: 'a;

    fn nodes(&self) -> Labels<'_, N> {
        self.labels()
    }

    fn successors<'a>(&'a self, node: &N) -> Neighbors<'a, N> {
        self.outgoing(node)
    }

    fn contains_node(&self, node: &N) -> bool {
        self.contains(node)
    }
}

// ---------------------------------------------------------------------------
// Serde conversions
// ---------------------------------------------------------------------------

impl<N: Clone + Eq + Hash> From<DependencyGraph<N>> for GraphData<N> {
    /// Edges are listed per node in adjacency order, so rebuilding the graph
    /// gives every node the same successor order, whatever slots the edges
    /// occupied.
    fn from(graph: DependencyGraph<N>) -> Self {
        let nodes = graph.labels().cloned().collect();
        let edges = graph
            .labels()
            .flat_map(|from| graph.outgoing(from).map(move |to| (from.clone(), to.clone())))
            .collect();
        GraphData { nodes, edges }
    }
}

impl<N: Clone + Eq + Hash> From<GraphData<N>> for DependencyGraph<N> {
    fn from(data: GraphData<N>) -> Self {
        let mut graph = DependencyGraph::new();
        for node in data.nodes {
            graph.add_node(node);
        }
        graph.add_edges(data.edges);
        graph
    }
}
