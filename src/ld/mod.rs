//! Linked-data layer: document model and node accessors.
//!
//! - [`Document`] / [`Node`]: loosely-typed JSON-LD records, read wholesale
//! - [`accessor`]: local ids, labels, types and prerequisite links
//! - [`Predicate`]: alias tables for predicate spelling variance

pub mod accessor;
pub mod document;
pub mod predicate;

pub use accessor::{NodeKind, label, local_id, node_type, node_types, prerequisite_ids};
pub use document::{Document, ENVELOPE_KEY, Node};
pub use predicate::Predicate;
