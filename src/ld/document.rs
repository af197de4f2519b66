//! In-memory JSON-LD document: an ordered list of loosely-typed nodes.
//!
//! Nodes keep their full predicate map so that producer-specific keys survive
//! a read → merge → write cycle untouched.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::error::DocumentError;

/// Key of the persistence envelope holding the graph blob.
pub const ENVELOPE_KEY: &str = "kg_data";

/// A single linked-data record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Node(Map<String, Value>);

impl Node {
    /// Create a node with the given `@id` and no other predicates.
    pub fn with_id(id: impl Into<String>) -> Self {
        let mut map = Map::new();
        map.insert("@id".into(), Value::String(id.into()));
        Self(map)
    }

    /// The node's full `@id`, if present and a string.
    pub fn id(&self) -> Option<&str> {
        self.0.get("@id").and_then(Value::as_str)
    }

    /// Raw value of a predicate key.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Set a predicate, returning `self` for chaining.
    pub fn with(mut self, key: impl Into<String>, value: Value) -> Self {
        self.0.insert(key.into(), value);
        self
    }

    /// Iterate over `(key, value)` predicate pairs.
    pub fn predicates(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    /// Borrow the underlying map.
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }
}

impl From<Map<String, Value>> for Node {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// An ordered sequence of nodes. Not a tree: nodes reference each other by id.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Document {
    nodes: Vec<Node>,
}

impl Document {
    /// Create a document from already-built nodes.
    pub fn new(nodes: Vec<Node>) -> Self {
        Self { nodes }
    }

    /// Parse any accepted document shape.
    ///
    /// Accepts `null`, a node array, an `@graph` object (array or single
    /// node), a `kg_data` envelope, a JSON string wrapping any of these, or a
    /// single node object. Array entries that are not objects are dropped, and
    /// an object carrying no `@id`, `@graph` or `kg_data` (an empty record,
    /// a bare `@context`, a blank node) reads as an empty document. Only
    /// unparseable text and scalar top levels are errors.
    pub fn from_value(value: Value) -> Result<Self, DocumentError> {
        match value {
            Value::Null => Ok(Self::default()),
            Value::Array(items) => Ok(Self::from_items(items)),
            Value::String(text) => {
                if text.trim().is_empty() {
                    return Ok(Self::default());
                }
                Self::from_json_str(&text)
            }
            Value::Object(mut map) => {
                if let Some(inner) = map.remove(ENVELOPE_KEY) {
                    return Self::from_value(inner);
                }
                if let Some(graph) = map.remove("@graph") {
                    return match graph {
                        Value::Null => Ok(Self::default()),
                        Value::Array(items) => Ok(Self::from_items(items)),
                        Value::Object(node) => Ok(Self::from_items(vec![Value::Object(node)])),
                        other => Err(DocumentError::UnsupportedShape {
                            found: format!("@graph {}", shape_name(&other)),
                        }),
                    };
                }
                if map.contains_key("@id") {
                    return Ok(Self::new(vec![Node(map)]));
                }
                tracing::debug!(
                    keys = map.len(),
                    "object without @id, @graph or kg_data, reading as empty document"
                );
                Ok(Self::default())
            }
            other => Err(DocumentError::UnsupportedShape {
                found: shape_name(&other).into(),
            }),
        }
    }

    /// Parse a document from JSON text.
    pub fn from_json_str(text: &str) -> Result<Self, DocumentError> {
        let value: Value = serde_json::from_str(text).map_err(|e| DocumentError::Parse {
            message: e.to_string(),
        })?;
        Self::from_value(value)
    }

    fn from_items(items: Vec<Value>) -> Self {
        let nodes = items
            .into_iter()
            .enumerate()
            .filter_map(|(index, item)| match item {
                Value::Object(map) => Some(Node(map)),
                other => {
                    tracing::debug!(index, shape = shape_name(&other), "skipping non-object node");
                    None
                }
            })
            .collect();
        Self { nodes }
    }

    /// The nodes in source order.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Return a new document with `node` appended. The receiver is untouched.
    pub fn appended(&self, node: Node) -> Self {
        let mut nodes = Vec::with_capacity(self.nodes.len() + 1);
        nodes.extend(self.nodes.iter().cloned());
        nodes.push(node);
        Self { nodes }
    }

    /// Serialize as a plain JSON-LD node array.
    pub fn to_value(&self) -> Value {
        Value::Array(
            self.nodes
                .iter()
                .map(|n| Value::Object(n.0.clone()))
                .collect(),
        )
    }

    /// Serialize inside the persistence envelope: `{"kg_data": [...]}`.
    pub fn to_envelope(&self) -> Value {
        let mut map = Map::new();
        map.insert(ENVELOPE_KEY.into(), self.to_value());
        Value::Object(map)
    }
}

impl<'de> Deserialize<'de> for Document {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Document::from_value(value).map_err(serde::de::Error::custom)
    }
}

impl FromIterator<Node> for Document {
    fn from_iter<I: IntoIterator<Item = Node>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

fn shape_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
