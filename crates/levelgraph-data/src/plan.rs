//! Resolution of [`PlanData`] into a [`LevelingPlan`] ready to run.

use crate::loader::{DataLoadError, Format, check_duplicate, deserialize_file, deserialize_str};
use crate::schema::PlanData;
use levelgraph_core::distance::{Distances, longest_path_distances};
use levelgraph_core::graph::DependencyGraph;
use levelgraph_core::levels::{Levels, levels};
use levelgraph_core::order::{TraversalError, pseudo_topological_order};
use log::{debug, warn};
use std::collections::HashSet;
use std::path::Path;

/// A dependency graph together with the sources to level it from.
///
/// Every source is guaranteed to be a node of the graph, so the operations
/// below only fail if the plan was built by hand with [`LevelingPlan::new`].
#[derive(Debug, Clone)]
pub struct LevelingPlan {
    graph: DependencyGraph<String>,
    sources: Vec<String>,
}

impl LevelingPlan {
    pub fn new(graph: DependencyGraph<String>, sources: Vec<String>) -> Self {
        Self { graph, sources }
    }

    pub fn graph(&self) -> &DependencyGraph<String> {
        &self.graph
    }

    pub fn sources(&self) -> &[String] {
        &self.sources
    }

    /// Pseudo-topological order of everything reachable from the sources.
    pub fn order(&self) -> Result<Vec<String>, TraversalError<String>> {
        pseudo_topological_order(&self.graph, &self.sources)
    }

    /// Longest-path distance of every node from the sources.
    pub fn distances(&self) -> Result<Distances<String>, TraversalError<String>> {
        longest_path_distances(&self.graph, &self.sources)
    }

    /// Sources and their descendants grouped by longest-path distance.
    pub fn levels(&self) -> Result<Levels<String>, TraversalError<String>> {
        levels(&self.graph, &self.sources)
    }
}

/// Load and resolve a plan file. The format comes from the file extension.
pub fn load_plan(path: &Path) -> Result<LevelingPlan, DataLoadError> {
    let data: PlanData = deserialize_file(path)?;
    resolve(data, path)
}

/// Parse and resolve plan text. `origin` labels errors and log lines.
pub fn parse_plan(
    content: &str,
    format: Format,
    origin: &Path,
) -> Result<LevelingPlan, DataLoadError> {
    let data: PlanData = deserialize_str(content, format, origin)?;
    resolve(data, origin)
}

/// Build the graph from declared nodes then edges, and check the sources
/// against it.
fn resolve(data: PlanData, file: &Path) -> Result<LevelingPlan, DataLoadError> {
    let mut graph = DependencyGraph::new();

    let mut declared = HashSet::new();
    for name in &data.nodes {
        check_duplicate(&mut declared, name, file)?;
        graph.add_node(name.clone());
    }
    for edge in &data.edges {
        graph.add_edge(edge.from().to_string(), edge.to().to_string());
    }

    let mut seen_sources = HashSet::new();
    let mut sources = Vec::with_capacity(data.sources.len());
    for name in &data.sources {
        check_duplicate(&mut seen_sources, name, file)?;
        if graph.contains(name) {
            sources.push(name.clone());
        } else if data.strict {
            return Err(DataLoadError::UnresolvedRef {
                file: file.to_path_buf(),
                name: name.clone(),
                expected_kind: "source node",
            });
        } else {
            warn!(
                "{}: dropping source '{}' which is not in the graph",
                file.display(),
                name
            );
        }
    }

    debug!(
        "{}: resolved plan with {} nodes, {} edges, {} sources",
        file.display(),
        graph.node_count(),
        graph.edge_count(),
        sources.len()
    );
    Ok(LevelingPlan { graph, sources })
}
