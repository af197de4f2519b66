//! Readiness queries over a whole document.
//!
//! Each call re-derives the mastery set; nothing is cached across calls.
//! The plain functions use every "knows" assertion in the document; the
//! `_for` variants restrict mastery to a [`MasteryScope`].

use serde::{Deserialize, Serialize};

use crate::ld::{Document, NodeKind, label, local_id, prerequisite_ids};
use crate::mastery::{MasteryScope, collect_known_for};
use crate::readiness::{ReadinessState, classify};

/// A Concept node with its derived readiness.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConceptWithStatus {
    /// Full `@id`.
    pub id: String,
    pub local_id: String,
    pub label: String,
    pub status: ReadinessState,
    /// Prerequisite local ids in source order.
    pub prerequisites: Vec<String>,
}

/// Every Concept node (Goals excluded) with its readiness.
pub fn all_concepts_with_status(document: &Document) -> Vec<ConceptWithStatus> {
    all_concepts_with_status_for(document, &MasteryScope::Document)
}

/// Concepts whose status is `Ready`.
pub fn ready_concepts(document: &Document) -> Vec<ConceptWithStatus> {
    ready_concepts_for(document, &MasteryScope::Document)
}

/// Status of a concept looked up by exact `@id`, then by local id.
pub fn status_of(concept_id: &str, document: &Document) -> Option<ReadinessState> {
    status_of_for(concept_id, document, &MasteryScope::Document)
}

pub fn all_concepts_with_status_for(
    document: &Document,
    scope: &MasteryScope,
) -> Vec<ConceptWithStatus> {
    let known = collect_known_for(document, scope);
    document
        .nodes()
        .iter()
        .filter(|node| NodeKind::of(node) == NodeKind::Concept)
        .filter_map(|node| {
            let Some(id) = node.id() else {
                tracing::debug!("skipping concept without @id");
                return None;
            };
            let local = local_id(id);
            let prerequisites = prerequisite_ids(node);
            Some(ConceptWithStatus {
                id: id.to_string(),
                status: classify(&local, &prerequisites, &known),
                label: label(node),
                local_id: local,
                prerequisites,
            })
        })
        .collect()
}

pub fn ready_concepts_for(document: &Document, scope: &MasteryScope) -> Vec<ConceptWithStatus> {
    all_concepts_with_status_for(document, scope)
        .into_iter()
        .filter(|c| c.status == ReadinessState::Ready)
        .collect()
}

pub fn status_of_for(
    concept_id: &str,
    document: &Document,
    scope: &MasteryScope,
) -> Option<ReadinessState> {
    let concepts = all_concepts_with_status_for(document, scope);
    if let Some(exact) = concepts.iter().find(|c| c.id == concept_id) {
        return Some(exact.status);
    }
    let wanted = local_id(concept_id);
    concepts
        .iter()
        .find(|c| c.local_id == wanted)
        .map(|c| c.status)
}
