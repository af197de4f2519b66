//! Predicate aliases tolerated across producers.
//!
//! Different producers spell the same predicate differently
//! (`hasPrerequisite`, `has_prerequisite`, `ex:prerequisite`, full IRIs...).
//! Each [`Predicate`] owns a fixed, priority-ordered alias list; a node key
//! matches when its local name equals one of the aliases.

use serde_json::Value;

use super::document::Node;

/// A predicate this engine reads from nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Predicate {
    /// "Has prerequisite": links a concept to concepts that must be mastered first.
    Prerequisite,
    /// "Knows": links a learner to mastered concepts.
    Knows,
    /// Human-readable label.
    Label,
}

impl Predicate {
    /// Accepted local names, highest priority first.
    pub fn aliases(self) -> &'static [&'static str] {
        match self {
            Predicate::Prerequisite => &[
                "hasPrerequisite",
                "has_prerequisite",
                "prerequisite",
                "prerequisites",
                "requires",
            ],
            Predicate::Knows => &["knows", "knowsAbout", "has_mastered"],
            Predicate::Label => &["label", "prefLabel"],
        }
    }

    /// Key written by this engine when it produces the predicate.
    pub fn canonical_key(self) -> &'static str {
        self.aliases()[0]
    }

    /// Find the value of this predicate on `node`, honoring alias priority.
    pub fn lookup(self, node: &Node) -> Option<&Value> {
        lookup_local_names(node, self.aliases())
    }
}

/// Generic naming keys tried for a label only after every `*label` key.
pub const LABEL_FALLBACKS: &[&str] = &["name", "title"];

/// Value of the first key whose local name matches `names`, in `names` order.
pub fn lookup_local_names<'a>(node: &'a Node, names: &[&str]) -> Option<&'a Value> {
    names.iter().find_map(|name| {
        node.predicates()
            .find(|(key, _)| key_local_name(key) == *name)
            .map(|(_, value)| value)
    })
}

/// Local name of a predicate key: the text after the last `#`, `/` or `:`.
///
/// `@`-keywords are returned unchanged.
pub fn key_local_name(key: &str) -> &str {
    if key.starts_with('@') {
        return key;
    }
    key.rsplit(|c: char| matches!(c, '#' | '/' | ':')).next().unwrap_or(key)
}
