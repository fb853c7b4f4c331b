use crate::graph::DirectedGraph;
use log::debug;
use std::collections::HashSet;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors raised by the traversal operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TraversalError<N> {
    #[error("unknown source node: {0:?}")]
    UnknownSource(N),
}

/// Fail with `UnknownSource` on the first source missing from `graph`.
pub(crate) fn validate_sources<G: DirectedGraph>(
    graph: &G,
    sources: &[G::Node],
) -> Result<(), TraversalError<G::Node>> {
    match sources.iter().find(|source| !graph.contains_node(source)) {
        Some(missing) => Err(TraversalError::UnknownSource(missing.clone())),
        None => Ok(()),
    }
}

// ---------------------------------------------------------------------------
// Pseudo-topological order
// ---------------------------------------------------------------------------

/// Returns every node reachable from `sources` (sources included), each
/// exactly once, in pseudo-topological order.
///
/// On the acyclic part of the graph the order is a true topological order.
/// Cycles are broken wherever the depth-first visit first closes them: a node
/// is marked visited when the visit enters it, so an edge back into a node
/// still on the visit path is ignored.
///
/// Sources are visited in the given order and successors in the graph's
/// native order, so the result is deterministic. A node reachable from
/// several sources is placed by the first visit that reaches it.
///
/// # Examples
///
/// ```
/// use levelgraph_core::graph::DependencyGraph;
/// use levelgraph_core::order::pseudo_topological_order;
///
/// let graph = DependencyGraph::<String>::from_edges([("a", "b"), ("b", "c"), ("c", "a")]);
/// let order = pseudo_topological_order(&graph, &["a".to_string()]).unwrap();
/// assert_eq!(order, vec!["a", "b", "c"]);
/// ```
pub fn pseudo_topological_order<G: DirectedGraph>(
    graph: &G,
    sources: &[G::Node],
) -> Result<Vec<G::Node>, TraversalError<G::Node>> {
    validate_sources(graph, sources)?;
    let order: Vec<G::Node> = reversed_postorder(graph, sources)
        .into_iter()
        .cloned()
        .collect();
    debug!(
        "pseudo-topological order: {} nodes from {} sources",
        order.len(),
        sources.len()
    );
    Ok(order)
}

/// Depth-first postorder from each source, reversed. Sources must already
/// be validated.
///
/// The visit is iterative: each stack entry holds a node and the iterator
/// over its remaining successors, so deep graphs do not grow the call stack.
pub(crate) fn reversed_postorder<'a, G: DirectedGraph>(
    graph: &'a G,
    sources: &'a [G::Node],
) -> Vec<&'a G::Node> {
    let mut visited: HashSet<&G::Node> = HashSet::new();
    let mut postorder: Vec<&G::Node> = Vec::new();
    let mut stack: Vec<(&G::Node, G::Successors<'a>)> = Vec::new();

    for source in sources {
        if !visited.insert(source) {
            continue;
        }
        stack.push((source, graph.successors(source)));

        while let Some((_, successors)) = stack.last_mut() {
            match successors.find(|succ| !visited.contains(*succ)) {
                Some(next) => {
                    visited.insert(next);
                    stack.push((next, graph.successors(next)));
                }
                None => {
                    if let Some((done, _)) = stack.pop() {
                        postorder.push(done);
                    }
                }
            }
        }
    }

    postorder.reverse();
    postorder
}
