//! Low-level readers over a single linked-data node.
//!
//! Every function here is total: unexpected shapes degrade to an empty
//! result rather than an error.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::document::Node;
use super::predicate::{LABEL_FALLBACKS, Predicate, lookup_local_names};

/// Domain kind of a node, derived from its `@type` declarations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeKind {
    /// A unit of learnable material.
    Concept,
    /// A terminal learning objective.
    Goal,
    /// Anything else (assertion records, people, untyped nodes).
    Other,
}

impl NodeKind {
    /// Kind of `node`: the first `@type` whose local name is `Concept` or `Goal`.
    pub fn of(node: &Node) -> Self {
        node_types(node)
            .iter()
            .find_map(|t| match t.as_str() {
                "Concept" => Some(NodeKind::Concept),
                "Goal" => Some(NodeKind::Goal),
                _ => None,
            })
            .unwrap_or(NodeKind::Other)
    }
}

impl std::fmt::Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NodeKind::Concept => write!(f, "Concept"),
            NodeKind::Goal => write!(f, "Goal"),
            NodeKind::Other => write!(f, "Other"),
        }
    }
}

/// Compact local identifier of a URI.
///
/// Takes the fragment after the last `#`, else the last path segment after
/// `/`, else the whole input; then replaces every character outside
/// `[A-Za-z0-9_-]` with `_`. Distinct URIs may collide on the same local id.
pub fn local_id(uri: &str) -> String {
    let trimmed = uri.trim();
    if trimmed.is_empty() {
        return String::new();
    }
    let tail = match trimmed.rsplit_once('#') {
        Some((_, fragment)) => fragment,
        None => match trimmed.trim_end_matches('/').rsplit_once('/') {
            Some((_, segment)) => segment,
            None => trimmed,
        },
    };
    let tail = if tail.is_empty() { trimmed } else { tail };
    tail.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Human-readable label of a node.
///
/// Tries the label aliases first, then any key ending in `label`
/// (case-insensitive), then `name` and `title`. Falls back to the node's
/// local id, or `""`.
pub fn label(node: &Node) -> String {
    let value = Predicate::Label
        .lookup(node)
        .or_else(|| {
            node.predicates()
                .find(|(key, _)| key.to_ascii_lowercase().ends_with("label"))
                .map(|(_, value)| value)
        })
        .or_else(|| lookup_local_names(node, LABEL_FALLBACKS));

    value
        .and_then(literal_text)
        .unwrap_or_else(|| node.id().map(local_id).unwrap_or_default())
}

/// Local ids of every declared `@type`, in declaration order.
pub fn node_types(node: &Node) -> Vec<String> {
    match node.get("@type") {
        Some(Value::String(t)) => vec![local_id(t)],
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(Value::as_str)
            .map(local_id)
            .collect(),
        _ => Vec::new(),
    }
}

/// Local id of the first declared type, if any.
pub fn node_type(node: &Node) -> Option<String> {
    node_types(node).into_iter().next()
}

/// Local ids of the node's prerequisites, in source order.
pub fn prerequisite_ids(node: &Node) -> Vec<String> {
    Predicate::Prerequisite
        .lookup(node)
        .map(reference_ids)
        .unwrap_or_default()
}

/// Normalize a reference value (string, `{"@id"}`, `{"@value"}`, or a list of
/// those) to local ids. Unrecognized entries are skipped.
pub fn reference_ids(value: &Value) -> Vec<String> {
    match value {
        Value::Array(items) => items.iter().flat_map(reference_ids).collect(),
        other => reference_target(other)
            .map(local_id)
            .filter(|id| !id.is_empty())
            .into_iter()
            .collect(),
    }
}

/// Raw target of a single reference: the string itself or its `@id`/`@value`.
pub fn reference_target(value: &Value) -> Option<&str> {
    match value {
        Value::String(s) => Some(s),
        Value::Object(map) => map
            .get("@id")
            .or_else(|| map.get("@value"))
            .and_then(Value::as_str),
        _ => None,
    }
}

fn literal_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Object(map) => match map.get("@value")? {
            Value::String(s) => Some(s.clone()),
            Value::Null => None,
            other => Some(other.to_string()),
        },
        Value::Array(items) => items.first().and_then(literal_text),
        _ => None,
    }
}
