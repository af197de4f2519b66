//! Layout index: the Concept and Goal nodes of a document keyed by local id.
//!
//! Built once per layering or analytics pass. Other node kinds stay in the
//! source document but are excluded here.

use std::collections::HashMap;

use crate::ld::{Document, NodeKind, label, local_id, prerequisite_ids};

/// Per-node metadata extracted from the document.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeMeta {
    /// Full `@id`.
    pub uri: String,
    /// Local identifier, the index key.
    pub local_id: String,
    /// Display label.
    pub label: String,
    /// Concept or Goal.
    pub kind: NodeKind,
    /// Prerequisite local ids in source order.
    pub prerequisites: Vec<String>,
}

/// Concept/Goal metadata in document order with a local-id lookup.
#[derive(Debug, Clone, Default)]
pub struct LayoutIndex {
    entries: Vec<NodeMeta>,
    positions: HashMap<String, usize>,
}

impl LayoutIndex {
    /// Index every Concept and Goal node with an `@id`.
    ///
    /// When two URIs share a local id the first occurrence wins.
    pub fn build(document: &Document) -> Self {
        let mut index = Self::default();
        for node in document.nodes() {
            let kind = NodeKind::of(node);
            if kind == NodeKind::Other {
                continue;
            }
            let Some(uri) = node.id() else {
                tracing::debug!(%kind, "skipping node without @id");
                continue;
            };
            let key = local_id(uri);
            if key.is_empty() {
                tracing::debug!(uri, "skipping node with empty local id");
                continue;
            }
            if let Some(&existing) = index.positions.get(&key) {
                let first = &index.entries[existing].uri;
                if first != uri {
                    tracing::warn!(
                        local_id = %key,
                        first = %first,
                        duplicate = %uri,
                        "local id collision, keeping first node"
                    );
                }
                continue;
            }
            index.positions.insert(key.clone(), index.entries.len());
            index.entries.push(NodeMeta {
                uri: uri.to_string(),
                local_id: key,
                label: label(node),
                kind,
                prerequisites: prerequisite_ids(node),
            });
        }
        index
    }

    /// Entries in document order.
    pub fn entries(&self) -> &[NodeMeta] {
        &self.entries
    }

    /// Position of `local_id` in [`entries`](Self::entries).
    pub fn position(&self, local_id: &str) -> Option<usize> {
        self.positions.get(local_id).copied()
    }

    pub fn get(&self, local_id: &str) -> Option<&NodeMeta> {
        self.position(local_id).map(|i| &self.entries[i])
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ld::Node;
    use serde_json::json;

    #[test]
    fn indexes_concepts_and_goals_only() {
        let doc = Document::new(vec![
            Node::with_id("http://x.org#A").with("@type", json!("Concept")),
            Node::with_id("http://x.org/user/1").with("knows", json!("http://x.org#A")),
            Node::with_id("http://x.org#G").with("@type", json!("Goal")),
            Node::default().with("@type", json!("Concept")),
        ]);
        let index = LayoutIndex::build(&doc);
        assert_eq!(index.len(), 2);
        assert_eq!(index.entries()[0].local_id, "A");
        assert_eq!(index.get("G").map(|m| m.kind), Some(NodeKind::Goal));
        assert!(index.get("1").is_none());
    }

    #[test]
    fn first_occurrence_wins_on_collision() {
        let doc = Document::new(vec![
            Node::with_id("http://a.org#X")
                .with("@type", json!("Concept"))
                .with("label", json!("first")),
            Node::with_id("http://b.org#X")
                .with("@type", json!("Concept"))
                .with("label", json!("second")),
        ]);
        let index = LayoutIndex::build(&doc);
        assert_eq!(index.len(), 1);
        assert_eq!(index.get("X").unwrap().label, "first");
    }
}
