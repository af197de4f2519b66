//! Layered layout of the prerequisite graph.
//!
//! Concepts are placed by longest prerequisite chain from a root (a concept
//! with no prerequisites sits on layer 0). Goals are always pushed to the
//! column after the deepest concept. Cycles are broken with a per-path
//! visited set: a node met again on its own recursion path counts as layer 0.

use std::collections::{BTreeMap, HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::ld::{Document, NodeKind};
use crate::mastery::{MasteryScope, collect_known_for};
use crate::readiness::classify;

use super::analytics::cycles_in;
use super::index::LayoutIndex;
use super::{Edge, Layout, PositionedNode};

/// Spacing constants for position assignment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// X coordinate of layer 0.
    pub base_x: f64,
    /// Y coordinate each layer's column is centered on.
    pub base_y: f64,
    /// Horizontal distance between layers.
    pub layer_spacing: f64,
    /// Vertical distance between nodes sharing a layer.
    pub row_spacing: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            base_x: 100.0,
            base_y: 300.0,
            layer_spacing: 250.0,
            row_spacing: 120.0,
        }
    }
}

/// Lay out a document using the document-wide mastery set.
pub fn layer(document: &Document, config: &LayoutConfig) -> Layout {
    layer_for(document, &MasteryScope::Document, config)
}

/// Lay out a document, deriving node status from the mastery set in `scope`.
pub fn layer_for(document: &Document, scope: &MasteryScope, config: &LayoutConfig) -> Layout {
    let index = LayoutIndex::build(document);
    let known = collect_known_for(document, scope);
    let layers = assign_layers(&index);

    // Slot of each node within its layer, in document order.
    let mut columns: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
    for (i, &l) in layers.iter().enumerate() {
        columns.entry(l).or_default().push(i);
    }
    let mut slots = vec![(0usize, 1usize); index.len()];
    for members in columns.values() {
        for (slot, &i) in members.iter().enumerate() {
            slots[i] = (slot, members.len());
        }
    }

    let nodes = index
        .entries()
        .iter()
        .zip(layers.iter().zip(slots))
        .map(|(meta, (&l, (slot, count)))| {
            let status = (meta.kind == NodeKind::Concept)
                .then(|| classify(&meta.local_id, &meta.prerequisites, &known));
            PositionedNode {
                id: meta.local_id.clone(),
                uri: meta.uri.clone(),
                label: meta.label.clone(),
                kind: meta.kind,
                layer: l,
                x: config.base_x + l as f64 * config.layer_spacing,
                y: config.base_y + slot as f64 * config.row_spacing
                    - (count - 1) as f64 * config.row_spacing / 2.0,
                known: known.contains(&meta.local_id),
                status,
            }
        })
        .collect();

    let cycles = cycles_in(&index);
    if !cycles.is_empty() {
        tracing::warn!(count = cycles.len(), "prerequisite cycles present, layering is best-effort");
    }

    Layout {
        nodes,
        edges: prerequisite_edges(&index),
        cycles,
    }
}

/// Layer of every indexed node, aligned with [`LayoutIndex::entries`].
pub fn assign_layers(index: &LayoutIndex) -> Vec<usize> {
    let mut solver = LayerSolver {
        index,
        memo: HashMap::new(),
    };
    let mut layers = vec![0usize; index.len()];
    let mut max_concept: Option<usize> = None;

    for (i, meta) in index.entries().iter().enumerate() {
        if meta.kind == NodeKind::Concept {
            let l = solver.layer_of(i, &mut HashSet::new());
            layers[i] = l;
            max_concept = Some(max_concept.map_or(l, |m| m.max(l)));
        }
    }

    let goal_layer = max_concept.map_or(0, |m| m + 1);
    for (i, meta) in index.entries().iter().enumerate() {
        if meta.kind == NodeKind::Goal {
            layers[i] = goal_layer;
        }
    }
    layers
}

struct LayerSolver<'a> {
    index: &'a LayoutIndex,
    memo: HashMap<usize, usize>,
}

impl LayerSolver<'_> {
    fn layer_of(&mut self, i: usize, on_path: &mut HashSet<usize>) -> usize {
        if let Some(&l) = self.memo.get(&i) {
            return l;
        }
        if !on_path.insert(i) {
            return 0;
        }
        let index = self.index;
        let meta = &index.entries()[i];
        let mut l = 0;
        for prereq in &meta.prerequisites {
            match index.position(prereq) {
                Some(p) => l = l.max(self.layer_of(p, on_path) + 1),
                None => tracing::debug!(
                    node = %meta.local_id,
                    prerequisite = %prereq,
                    "unresolved prerequisite ignored for layering"
                ),
            }
        }
        on_path.remove(&i);
        self.memo.insert(i, l);
        l
    }
}

/// One edge per distinct (prerequisite, node) pair whose endpoints are both indexed.
pub fn prerequisite_edges(index: &LayoutIndex) -> Vec<Edge> {
    let mut seen: HashSet<(&str, &str)> = HashSet::new();
    let mut edges = Vec::new();
    for meta in index.entries() {
        for prereq in &meta.prerequisites {
            if index.position(prereq).is_none() {
                continue;
            }
            if seen.insert((prereq.as_str(), meta.local_id.as_str())) {
                edges.push(Edge::new(prereq, &meta.local_id));
            }
        }
    }
    edges
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ld::Node;
    use serde_json::json;

    fn concept(id: &str, prereqs: &[&str]) -> Node {
        Node::with_id(format!("http://x.org#{id}"))
            .with("@type", json!("Concept"))
            .with(
                "hasPrerequisite",
                json!(prereqs
                    .iter()
                    .map(|p| json!({"@id": format!("http://x.org#{p}")}))
                    .collect::<Vec<_>>()),
            )
    }

    fn goal(id: &str, prereqs: &[&str]) -> Node {
        concept(id, prereqs).with("@type", json!("Goal"))
    }

    fn layer_map(layout: &Layout) -> HashMap<String, usize> {
        layout
            .nodes
            .iter()
            .map(|n| (n.id.clone(), n.layer))
            .collect()
    }

    #[test]
    fn chain_layers_with_goal() {
        let doc = Document::new(vec![concept("A", &[]), concept("B", &["A"]), goal("G", &["B"])]);
        let layout = layer(&doc, &LayoutConfig::default());
        let layers = layer_map(&layout);
        assert_eq!(layers["A"], 0);
        assert_eq!(layers["B"], 1);
        assert_eq!(layers["G"], 2);
    }

    #[test]
    fn goal_without_prerequisites_is_terminal() {
        let doc = Document::new(vec![concept("A", &[]), concept("B", &["A"]), goal("G", &[])]);
        let layers = layer_map(&layer(&doc, &LayoutConfig::default()));
        assert_eq!(layers["G"], 2);
    }

    #[test]
    fn goal_with_long_chain_is_clamped() {
        // G declares A only, but still lands after the deepest concept.
        let doc = Document::new(vec![
            concept("A", &[]),
            concept("B", &["A"]),
            concept("C", &["B"]),
            goal("G", &["A"]),
        ]);
        let layers = layer_map(&layer(&doc, &LayoutConfig::default()));
        assert_eq!(layers["G"], 3);
    }

    #[test]
    fn longest_path_wins() {
        let doc = Document::new(vec![
            concept("D", &["A", "C"]),
            concept("A", &[]),
            concept("B", &["A"]),
            concept("C", &["B"]),
        ]);
        let layers = layer_map(&layer(&doc, &LayoutConfig::default()));
        assert_eq!(layers["D"], 3);
    }

    #[test]
    fn cycle_terminates_and_is_reported() {
        let doc = Document::new(vec![concept("A", &["B"]), concept("B", &["A"])]);
        let layout = layer(&doc, &LayoutConfig::default());
        let layers = layer_map(&layout);
        assert_eq!(layers["B"], 1);
        assert_eq!(layers["A"], 2);
        assert_eq!(layout.cycles, vec![vec!["A".to_string(), "B".to_string()]]);
    }

    #[test]
    fn positions_are_centered_per_layer() {
        let doc = Document::new(vec![concept("A", &[]), concept("B", &[]), concept("C", &["A"])]);
        let config = LayoutConfig::default();
        let layout = layer(&doc, &config);
        let a = &layout.nodes[0];
        let b = &layout.nodes[1];
        let c = &layout.nodes[2];
        assert_eq!(a.x, 100.0);
        assert_eq!(a.y, 300.0 - 60.0);
        assert_eq!(b.y, 300.0 + 60.0);
        assert_eq!(c.x, 350.0);
        assert_eq!(c.y, 300.0);
    }

    #[test]
    fn edges_are_deduplicated_and_unresolved_skipped() {
        let doc = Document::new(vec![
            concept("A", &[]),
            concept("B", &["A", "A", "ghost"]),
            concept("C", &["A"]),
        ]);
        let layout = layer(&doc, &LayoutConfig::default());
        let pairs: Vec<(&str, &str)> = layout
            .edges
            .iter()
            .map(|e| (e.source.as_str(), e.target.as_str()))
            .collect();
        assert_eq!(pairs, vec![("A", "B"), ("A", "C")]);
    }

    #[test]
    fn status_attached_to_concepts_only() {
        let doc = Document::new(vec![
            concept("A", &[]),
            goal("G", &["A"]),
            Node::with_id("http://x.org/user/1").with("knows", json!("http://x.org#A")),
        ]);
        let layout = layer(&doc, &LayoutConfig::default());
        assert_eq!(layout.nodes.len(), 2);
        assert_eq!(layout.nodes[0].status, Some(crate::readiness::ReadinessState::Known));
        assert!(layout.nodes[0].known);
        assert_eq!(layout.nodes[1].status, None);
    }

    #[test]
    fn empty_document_yields_empty_layout() {
        let layout = layer(&Document::default(), &LayoutConfig::default());
        assert!(layout.nodes.is_empty());
        assert!(layout.edges.is_empty());
        assert!(layout.cycles.is_empty());
    }

    #[test]
    fn goals_alone_sit_on_layer_zero() {
        let doc = Document::new(vec![goal("G", &[])]);
        let layers = layer_map(&layer(&doc, &LayoutConfig::default()));
        assert_eq!(layers["G"], 0);
    }
}
