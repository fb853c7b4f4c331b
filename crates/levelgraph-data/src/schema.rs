//! Serde data file structs for leveling plans.
//!
//! A plan file declares a dependency graph and the sources to level it from.
//! It is deserialized from RON, JSON, or TOML and then resolved into a
//! [`LevelingPlan`](crate::plan::LevelingPlan) by the loader.

use serde::Deserialize;

/// Top-level contents of a plan file.
#[derive(Debug, Clone, Deserialize)]
pub struct PlanData {
    /// Nodes to declare up front. Edge endpoints are declared implicitly, so
    /// this is only needed for isolated nodes or to fix slot order.
    #[serde(default)]
    pub nodes: Vec<String>,
    #[serde(default)]
    pub edges: Vec<EdgeData>,
    #[serde(default)]
    pub sources: Vec<String>,
    /// When true (the default), a source missing from the graph is an error.
    /// When false it is dropped with a warning.
    #[serde(default = "default_true")]
    pub strict: bool,
}

fn default_true() -> bool {
    true
}

/// A dependency edge, supporting both short pair form and full form.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum EdgeData {
    /// Short form: `("from", "to")`.
    Short(String, String),
    /// Full form with named fields.
    Full { from: String, to: String },
}

impl EdgeData {
    pub fn from(&self) -> &str {
        match self {
            EdgeData::Short(from, _) | EdgeData::Full { from, .. } => from,
        }
    }

    pub fn to(&self) -> &str {
        match self {
            EdgeData::Short(_, to) | EdgeData::Full { to, .. } => to,
        }
    }
}
