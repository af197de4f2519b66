// thiserror's #[error("...{field}...")] format strings reference struct fields,
// but the compiler doesn't see through the derive macro and reports false positives.
#![allow(unused_assignments)]

//! # mastery-graph
//!
//! A prerequisite-aware knowledge graph engine. It reads a learner's
//! JSON-LD knowledge graph (concepts, goals and "knows" assertions), derives
//! each concept's readiness, lays the graph out in deterministic layers, and
//! merges newly earned mastery back in without duplicates.
//!
//! ## Architecture
//!
//! - **Linked data** (`ld`): document model, local ids, labels, predicate aliases
//! - **Mastery** (`mastery`): the set of concepts a learner already knows
//! - **Readiness** (`readiness`): `known` / `ready` / `locked` classification
//! - **Graph** (`graph`): longest-path layering, positions, edges, cycle analytics
//! - **Merge** (`merge`): idempotent "knows" assertion writes
//! - **Queries** (`query`, `engine`): composed entry points
//!
//! Every operation is a pure transformation over an in-memory snapshot:
//! inputs are never mutated, and the merge path returns a new document.
//!
//! ## Library usage
//!
//! ```no_run
//! use mastery_graph::engine::Engine;
//! use mastery_graph::config::EngineConfig;
//! use mastery_graph::ld::Document;
//!
//! let doc = Document::from_json_str(r#"[
//!     {"@id": "https://example.org/concepts#A", "@type": "Concept"},
//!     {"@id": "https://example.org/concepts#B", "@type": "Concept",
//!      "hasPrerequisite": [{"@id": "https://example.org/concepts#A"}]}
//! ]"#).unwrap();
//!
//! let engine = Engine::new(EngineConfig::default()).unwrap();
//! let doc = engine.merge_knowledge(&doc, "42", "A");
//! let ready = engine.ready_concepts(&doc);
//! assert_eq!(ready[0].local_id, "B");
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod graph;
pub mod ld;
pub mod mastery;
pub mod merge;
pub mod query;
pub mod readiness;
