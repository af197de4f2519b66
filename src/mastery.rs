//! Mastery set collection: which concepts a learner already knows.
//!
//! The mastery set is derived from "knows" assertion nodes anywhere in the
//! document. [`collect_known`] takes the union over every asserting node;
//! [`collect_known_for`] restricts it to assertions whose subject is a given
//! learner. Learner subjects are compared as full URIs; bare ids are resolved
//! with [`MasteryScope::resolved`] first.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::ld::accessor::reference_ids;
use crate::ld::{Document, Node, Predicate};
use crate::merge::AssertionUris;

/// Set of concept local ids the learner has mastered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MasterySet(BTreeSet<String>);

impl MasterySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `local_id` is mastered.
    pub fn contains(&self, local_id: &str) -> bool {
        self.0.contains(local_id)
    }

    /// Add a concept; returns `true` if it was not already present.
    pub fn insert(&mut self, local_id: impl Into<String>) -> bool {
        self.0.insert(local_id.into())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for MasterySet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

impl<S: Into<String>> Extend<S> for MasterySet {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        self.0.extend(iter.into_iter().map(Into::into));
    }
}

/// Whose assertions contribute to the mastery set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "id")]
pub enum MasteryScope {
    /// Every "knows" assertion in the document, regardless of subject.
    #[default]
    Document,
    /// Only assertions whose subject `@id` is exactly this learner URI.
    Learner(String),
}

impl MasteryScope {
    /// Resolve a bare learner id to the URI merges write for it.
    ///
    /// Absolute learner URIs are kept as-is.
    pub fn resolved(&self, uris: &AssertionUris) -> MasteryScope {
        match self {
            MasteryScope::Document => MasteryScope::Document,
            MasteryScope::Learner(learner) => MasteryScope::Learner(uris.user_uri(learner)),
        }
    }

    /// Whether an assertion node's subject falls inside this scope.
    pub fn admits(&self, node: &Node) -> bool {
        match self {
            MasteryScope::Document => true,
            MasteryScope::Learner(learner) => node.id() == Some(learner.trim()),
        }
    }
}

/// Concept local ids asserted as known by `node`, empty if it asserts nothing.
pub fn known_by(node: &Node) -> Vec<String> {
    Predicate::Knows
        .lookup(node)
        .map(reference_ids)
        .unwrap_or_default()
}

/// Union of every "knows" assertion in the document.
pub fn collect_known(document: &Document) -> MasterySet {
    collect_known_for(document, &MasteryScope::Document)
}

/// "Knows" assertions restricted to `scope`.
pub fn collect_known_for(document: &Document, scope: &MasteryScope) -> MasterySet {
    document
        .nodes()
        .iter()
        .filter(|node| scope.admits(node))
        .flat_map(known_by)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc() -> Document {
        Document::new(vec![
            Node::with_id("http://x.org/user/1").with("knows", json!({"@id": "http://x.org#A"})),
            Node::with_id("http://x.org/user/1")
                .with("schema:knows", json!(["http://x.org#B", {"@id": "http://x.org#C"}])),
            Node::with_id("http://x.org/user/2").with("knowsAbout", json!("http://x.org#D")),
            Node::with_id("http://x.org#A").with("@type", json!("Concept")),
        ])
    }

    #[test]
    fn collects_union_over_document() {
        let known = collect_known(&doc());
        let ids: Vec<&str> = known.iter().collect();
        assert_eq!(ids, vec!["A", "B", "C", "D"]);
    }

    #[test]
    fn order_independent() {
        let mut nodes = doc().nodes().to_vec();
        nodes.reverse();
        assert_eq!(collect_known(&Document::new(nodes)), collect_known(&doc()));
    }

    #[test]
    fn learner_scope_filters_by_subject() {
        let by_uri = collect_known_for(&doc(), &MasteryScope::Learner("http://x.org/user/2".into()));
        assert_eq!(by_uri.iter().collect::<Vec<_>>(), vec!["D"]);

        let uris = AssertionUris {
            user_base: "http://x.org/user/".into(),
            ..Default::default()
        };
        let by_bare_id = collect_known_for(&doc(), &MasteryScope::Learner("1".into()).resolved(&uris));
        assert_eq!(by_bare_id.len(), 3);
        assert!(!by_bare_id.contains("D"));
    }

    #[test]
    fn learner_scope_ignores_other_namespaces_sharing_an_id() {
        let doc = Document::new(vec![
            Node::with_id("http://x.org#A").with("@type", json!("Concept")),
            Node::with_id("https://other-tenant.org/accounts/42").with("knows", json!("http://x.org#A")),
            Node::with_id("https://x.org/quiz-items/42").with("knows", json!("http://x.org#B")),
        ]);

        let scope = MasteryScope::Learner("https://example.org/users/42".into());
        assert!(collect_known_for(&doc, &scope).is_empty());

        let bare = MasteryScope::Learner("42".into());
        assert!(collect_known_for(&doc, &bare).is_empty());
        assert!(collect_known_for(&doc, &bare.resolved(&AssertionUris::default())).is_empty());
    }

    #[test]
    fn resolved_keeps_absolute_learners_and_document_scope() {
        let uris = AssertionUris::default();
        assert_eq!(
            MasteryScope::Learner("42".into()).resolved(&uris),
            MasteryScope::Learner("https://example.org/users/42".into())
        );
        assert_eq!(
            MasteryScope::Learner("urn:learner:9".into()).resolved(&uris),
            MasteryScope::Learner("urn:learner:9".into())
        );
        assert_eq!(MasteryScope::Document.resolved(&uris), MasteryScope::Document);
    }

    #[test]
    fn empty_and_malformed_values() {
        assert!(collect_known(&Document::default()).is_empty());
        let doc = Document::new(vec![
            Node::with_id("u").with("knows", json!(42)),
            Node::with_id("u").with("knows", json!([null, {"name": "x"}])),
        ]);
        assert!(collect_known(&doc).is_empty());
    }
}
