//! Mastery merge: append "knows" assertions without duplicating them.
//!
//! The only write path of the engine. Every function returns a new
//! [`Document`]; the input is never mutated. Persisting the result is the
//! caller's job.
//!
//! Two integration styles are supported:
//! - engine-checked: [`merge_knowledge`] skips the append when the assertion
//!   already exists;
//! - caller-checked: [`contains_assertion`] then [`append_assertion`].

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::ld::{Document, Node, Predicate, local_id};

/// Bases used to build deterministic subject and object URIs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssertionUris {
    /// Prefix for learner URIs; the user id is appended.
    pub user_base: String,
    /// Prefix for concept URIs; the concept's local id is appended.
    pub concept_base: String,
}

impl Default for AssertionUris {
    fn default() -> Self {
        Self {
            user_base: "https://example.org/users/".into(),
            concept_base: "https://example.org/concepts#".into(),
        }
    }
}

impl AssertionUris {
    /// Learner URI. Ids that are already absolute URIs are kept as-is.
    pub fn user_uri(&self, user_id: &str) -> String {
        let user_id = user_id.trim();
        if is_absolute(user_id) {
            user_id.to_string()
        } else {
            format!("{}{}", self.user_base, user_id)
        }
    }

    /// Concept URI built from the concept's local id.
    pub fn concept_uri(&self, concept: &str) -> String {
        format!("{}{}", self.concept_base, local_id(concept))
    }
}

fn is_absolute(id: &str) -> bool {
    id.contains("://") || id.starts_with("urn:")
}

/// Whether a merge appended a node, found it already present, or had
/// nothing to write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MergeOutcome {
    Appended,
    AlreadyPresent,
    /// The user or concept id was blank; the document is returned unchanged.
    Skipped,
}

/// "User passed the evaluation for a concept", as reported by an assessment
/// subsystem. Pass/fail thresholds are decided upstream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationEvent {
    pub user_id: String,
    pub concept: String,
    pub passed: bool,
}

/// Build the assertion node `{"@id": <user>, "knows": [{"@id": <concept>}]}`.
pub fn knows_assertion(uris: &AssertionUris, user_id: &str, concept: &str) -> Node {
    Node::with_id(uris.user_uri(user_id)).with(
        Predicate::Knows.canonical_key(),
        json!([{ "@id": uris.concept_uri(concept) }]),
    )
}

/// Whether `document` already holds a node with the same subject and the same
/// serialized "knows" object list as `assertion`.
pub fn contains_assertion(document: &Document, assertion: &Node) -> bool {
    let (Some(subject), Some(objects)) = (assertion.id(), serialized_knows(assertion)) else {
        return false;
    };
    document
        .nodes()
        .iter()
        .any(|node| node.id() == Some(subject) && serialized_knows(node).as_ref() == Some(&objects))
}

/// Append `assertion` unconditionally. Callers check with [`contains_assertion`].
pub fn append_assertion(document: &Document, assertion: Node) -> Document {
    document.appended(assertion)
}

/// Merge "`user_id` knows `concept`" into `document`, reporting what happened.
pub fn merge_with_outcome(
    document: &Document,
    uris: &AssertionUris,
    user_id: &str,
    concept: &str,
) -> (Document, MergeOutcome) {
    if user_id.trim().is_empty() || local_id(concept).is_empty() {
        tracing::debug!(user = user_id, concept, "blank user or concept id, merge is a no-op");
        return (document.clone(), MergeOutcome::Skipped);
    }
    let assertion = knows_assertion(uris, user_id, concept);
    if contains_assertion(document, &assertion) {
        tracing::debug!(user = user_id, concept, "assertion already present, merge is a no-op");
        return (document.clone(), MergeOutcome::AlreadyPresent);
    }
    tracing::debug!(user = user_id, concept, "appending knows assertion");
    (append_assertion(document, assertion), MergeOutcome::Appended)
}

/// Merge "`user_id` knows `concept`" into `document`, idempotently.
///
/// An empty document yields a single-node document holding the assertion.
pub fn merge_knowledge(
    document: &Document,
    uris: &AssertionUris,
    user_id: &str,
    concept: &str,
) -> Document {
    merge_with_outcome(document, uris, user_id, concept).0
}

/// Apply an evaluation event: merge on pass, return the document unchanged on fail.
pub fn apply_evaluation(document: &Document, uris: &AssertionUris, event: &EvaluationEvent) -> Document {
    if !event.passed {
        tracing::debug!(user = %event.user_id, concept = %event.concept, "evaluation not passed");
        return document.clone();
    }
    merge_knowledge(document, uris, &event.user_id, &event.concept)
}

fn serialized_knows(node: &Node) -> Option<String> {
    Predicate::Knows.lookup(node).map(|value| value.to_string())
}
