//! Prerequisite graph: layering, layout output and analytics.
//!
//! - **Index** ([`index::LayoutIndex`]): Concept/Goal metadata keyed by local id
//! - **Layering** ([`layering`]): longest-path layers, goal clamping, positions
//! - **Analytics** ([`analytics`]): cycle detection via Tarjan SCC
//!
//! The output types here are plain data handed to an external renderer.

pub mod analytics;
pub mod index;
pub mod layering;

use serde::{Deserialize, Serialize};

use crate::ld::NodeKind;
use crate::readiness::ReadinessState;

pub use analytics::prerequisite_cycles;
pub use layering::{LayoutConfig, layer, layer_for};

/// A laid-out Concept or Goal node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionedNode {
    /// Local identifier.
    pub id: String,
    /// Full `@id` from the source document.
    pub uri: String,
    /// Display label.
    pub label: String,
    /// Concept or Goal.
    pub kind: NodeKind,
    /// Layout depth.
    pub layer: usize,
    pub x: f64,
    pub y: f64,
    /// Whether the node's local id is in the mastery set.
    pub known: bool,
    /// Readiness of a Concept; `None` for Goals.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<ReadinessState>,
}

/// A directed prerequisite → dependent edge.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge {
    /// Stable edge identifier derived from its endpoints.
    pub id: String,
    /// Prerequisite local id.
    pub source: String,
    /// Dependent local id.
    pub target: String,
}

impl Edge {
    pub fn new(source: &str, target: &str) -> Self {
        Self {
            id: format!("{source}->{target}"),
            source: source.to_string(),
            target: target.to_string(),
        }
    }
}

/// Result of a layering pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    /// Concept and Goal nodes in document order.
    pub nodes: Vec<PositionedNode>,
    /// Deduplicated prerequisite edges.
    pub edges: Vec<Edge>,
    /// Prerequisite cycles found while laying out (sorted local ids).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub cycles: Vec<Vec<String>>,
}

impl Layout {
    /// Layer of the node with local id `id`.
    pub fn layer_of(&self, id: &str) -> Option<usize> {
        self.nodes.iter().find(|n| n.id == id).map(|n| n.layer)
    }

    /// Highest layer in use, `None` for an empty layout.
    pub fn depth(&self) -> Option<usize> {
        self.nodes.iter().map(|n| n.layer).max()
    }
}
