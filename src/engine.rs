//! Engine facade: top-level API for the mastery-graph system.
//!
//! The `Engine` holds an [`EngineConfig`] and applies it to every call:
//! the mastery scope for readiness queries and layouts, spacing for
//! positions, URI bases for merges, and strict cycle handling. It owns no
//! document state; each call receives its own snapshot.

use std::path::Path;

use crate::config::EngineConfig;
use crate::error::{LayoutError, MasteryResult};
use crate::graph::{self, Layout};
use crate::ld::Document;
use crate::mastery::{MasteryScope, MasterySet, collect_known_for};
use crate::merge::{self, EvaluationEvent, MergeOutcome};
use crate::query::{self, ConceptWithStatus};
use crate::readiness::ReadinessState;

/// The prerequisite-aware knowledge graph engine.
#[derive(Debug, Clone)]
pub struct Engine {
    config: EngineConfig,
    /// `config.scope` with a bare learner id resolved through `config.uris`.
    scope: MasteryScope,
}

impl Engine {
    /// Create an engine with the given configuration.
    pub fn new(config: EngineConfig) -> MasteryResult<Self> {
        config.validate()?;
        tracing::info!(
            scope = ?config.scope,
            layer_spacing = config.layout.layer_spacing,
            row_spacing = config.layout.row_spacing,
            reject_cycles = config.reject_cycles,
            "initializing mastery-graph engine"
        );
        let scope = config.scope.resolved(&config.uris);
        Ok(Self { config, scope })
    }

    /// Create an engine from a TOML config file.
    pub fn from_config_file(path: &Path) -> MasteryResult<Self> {
        Self::new(EngineConfig::load(path)?)
    }

    /// Get the engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The mastery scope queries run under, with learner ids resolved to URIs.
    pub fn scope(&self) -> &MasteryScope {
        &self.scope
    }

    /// Mastery set under the configured scope.
    pub fn mastery(&self, document: &Document) -> MasterySet {
        collect_known_for(document, &self.scope)
    }

    /// Every Concept with its readiness.
    pub fn concepts_with_status(&self, document: &Document) -> Vec<ConceptWithStatus> {
        query::all_concepts_with_status_for(document, &self.scope)
    }

    /// Concepts that are ready to learn next.
    pub fn ready_concepts(&self, document: &Document) -> Vec<ConceptWithStatus> {
        query::ready_concepts_for(document, &self.scope)
    }

    /// Readiness of one concept by `@id` or local id.
    pub fn status_of(&self, concept_id: &str, document: &Document) -> Option<ReadinessState> {
        query::status_of_for(concept_id, document, &self.scope)
    }

    /// Layered layout of the document.
    ///
    /// With `reject_cycles` set, a document containing prerequisite cycles is
    /// an error; otherwise cycles are reported in [`Layout::cycles`].
    pub fn layout(&self, document: &Document) -> MasteryResult<Layout> {
        let layout = graph::layer_for(document, &self.scope, &self.config.layout);
        if self.config.reject_cycles {
            if let Some(members) = layout.cycles.first() {
                return Err(LayoutError::CyclicPrerequisite {
                    members: members.clone(),
                }
                .into());
            }
        }
        Ok(layout)
    }

    /// Prerequisite cycles in the document.
    pub fn cycles(&self, document: &Document) -> Vec<Vec<String>> {
        graph::prerequisite_cycles(document)
    }

    /// Merge "`user_id` knows `concept`" idempotently.
    pub fn merge_knowledge(&self, document: &Document, user_id: &str, concept: &str) -> Document {
        merge::merge_knowledge(document, &self.config.uris, user_id, concept)
    }

    /// Like [`merge_knowledge`](Self::merge_knowledge), also reporting whether a node was appended.
    pub fn merge_with_outcome(
        &self,
        document: &Document,
        user_id: &str,
        concept: &str,
    ) -> (Document, MergeOutcome) {
        merge::merge_with_outcome(document, &self.config.uris, user_id, concept)
    }

    /// Apply an evaluation event; only passing events merge.
    pub fn record_evaluation(&self, document: &Document, event: &EvaluationEvent) -> Document {
        merge::apply_evaluation(document, &self.config.uris, event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MasteryError;
    use crate::ld::Node;
    use serde_json::json;

    fn concept(id: &str, prereqs: &[&str]) -> Node {
        Node::with_id(format!("https://example.org/concepts#{id}"))
            .with("@type", json!("Concept"))
            .with("hasPrerequisite", json!(prereqs))
    }

    #[test]
    fn rejects_invalid_config() {
        let mut config = EngineConfig::default();
        config.layout.layer_spacing = -1.0;
        assert!(matches!(Engine::new(config), Err(MasteryError::Config(_))));
    }

    #[test]
    fn strict_layout_rejects_cycles() {
        let doc = Document::new(vec![concept("A", &["B"]), concept("B", &["A"])]);
        let lenient = Engine::new(EngineConfig::default()).unwrap();
        assert_eq!(lenient.layout(&doc).unwrap().cycles.len(), 1);

        let strict = Engine::new(EngineConfig {
            reject_cycles: true,
            ..Default::default()
        })
        .unwrap();
        let err = strict.layout(&doc).unwrap_err();
        assert!(matches!(
            err,
            MasteryError::Layout(LayoutError::CyclicPrerequisite { .. })
        ));
    }

    #[test]
    fn learner_scope_flows_through_merge_and_query() {
        let engine = Engine::new(EngineConfig {
            scope: MasteryScope::Learner("42".into()),
            ..Default::default()
        })
        .unwrap();
        let doc = Document::new(vec![concept("A", &[]), concept("B", &["A"])]);

        let other = engine.merge_knowledge(&doc, "7", "A");
        assert_eq!(engine.status_of("B", &other), Some(ReadinessState::Locked));

        let mine = engine.merge_knowledge(&other, "42", "A");
        assert_eq!(engine.status_of("A", &mine), Some(ReadinessState::Known));
        assert_eq!(engine.status_of("B", &mine), Some(ReadinessState::Ready));
        assert_eq!(engine.ready_concepts(&mine).len(), 1);
        assert_eq!(engine.mastery(&mine).len(), 1);
    }

    #[test]
    fn learner_scope_does_not_match_foreign_subjects_with_same_id() {
        let engine = Engine::new(EngineConfig {
            scope: MasteryScope::Learner("https://example.org/users/42".into()),
            ..Default::default()
        })
        .unwrap();
        let doc = Document::new(vec![
            concept("A", &[]),
            concept("B", &["A"]),
            Node::with_id("https://other-tenant.org/accounts/42")
                .with("knows", json!([{"@id": "https://example.org/concepts#A"}])),
            Node::with_id("https://x.org/quiz-items/42")
                .with("knows", json!([{"@id": "https://example.org/concepts#B"}])),
        ]);
        assert!(engine.mastery(&doc).is_empty());
        assert_eq!(engine.status_of("B", &doc), Some(ReadinessState::Locked));
        assert_eq!(engine.status_of("A", &doc), Some(ReadinessState::Ready));
    }

    #[test]
    fn bare_learner_id_resolves_through_user_base() {
        let engine = Engine::new(EngineConfig {
            scope: MasteryScope::Learner("42".into()),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(
            engine.scope(),
            &MasteryScope::Learner("https://example.org/users/42".into())
        );
    }

    #[test]
    fn record_evaluation_merges_once() {
        let engine = Engine::new(EngineConfig::default()).unwrap();
        let event = EvaluationEvent {
            user_id: "42".into(),
            concept: "A".into(),
            passed: true,
        };
        let once = engine.record_evaluation(&Document::default(), &event);
        let twice = engine.record_evaluation(&once, &event);
        assert_eq!(once.len(), 1);
        assert_eq!(twice.len(), 1);
    }
}
