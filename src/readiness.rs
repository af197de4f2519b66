//! Readiness classification of a single concept.
//!
//! Only direct prerequisites are inspected, so cycles in the prerequisite
//! graph cannot affect the result.

use serde::{Deserialize, Serialize};

use crate::mastery::MasterySet;

/// Derived learning state of a concept relative to a mastery set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReadinessState {
    /// Already mastered.
    Known,
    /// Not mastered, and every prerequisite is.
    Ready,
    /// Not mastered, and at least one prerequisite is not.
    Locked,
}

impl std::fmt::Display for ReadinessState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReadinessState::Known => write!(f, "known"),
            ReadinessState::Ready => write!(f, "ready"),
            ReadinessState::Locked => write!(f, "locked"),
        }
    }
}

/// Classify a concept from its local id and resolved prerequisite local ids.
///
/// `Known` takes precedence over everything else, even stale prerequisites.
pub fn classify(local_id: &str, prerequisites: &[String], known: &MasterySet) -> ReadinessState {
    if known.contains(local_id) {
        return ReadinessState::Known;
    }
    if prerequisites.iter().all(|p| known.contains(p)) {
        ReadinessState::Ready
    } else {
        ReadinessState::Locked
    }
}
