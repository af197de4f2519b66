//! Rich diagnostic error types for the mastery-graph engine.
//!
//! The read side of the engine (accessors, mastery collection, readiness,
//! layering, queries) never fails: malformed input degrades to "absent".
//! Errors only surface at the edges: parsing a document blob, loading
//! configuration, and strict cycle rejection when the caller opts in.

use miette::Diagnostic;
use thiserror::Error;

/// Top-level error type for the mastery-graph engine.
#[derive(Debug, Error, Diagnostic)]
pub enum MasteryError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Document(#[from] DocumentError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Layout(#[from] LayoutError),
}

// ---------------------------------------------------------------------------
// Document errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum DocumentError {
    #[error("document is not valid JSON: {message}")]
    #[diagnostic(
        code(mastery::document::parse),
        help(
            "The knowledge graph blob could not be parsed as JSON. \
             Check that the stored `kg_data` field holds a JSON-LD array or object."
        )
    )]
    Parse { message: String },

    #[error("unsupported document shape: expected a node list, found {found}")]
    #[diagnostic(
        code(mastery::document::shape),
        help(
            "A document must be null, an array of node objects, a JSON object \
             (`@graph`, `kg_data` envelope, or single node), or a string holding one of these."
        )
    )]
    UnsupportedShape { found: String },
}

// ---------------------------------------------------------------------------
// Configuration errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    #[error("failed to read engine config: {path}")]
    #[diagnostic(
        code(mastery::config::read),
        help("Ensure the config file exists and is readable.")
    )]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse engine config: {path}: {message}")]
    #[diagnostic(
        code(mastery::config::parse),
        help("Check the TOML syntax and field names in the config file.")
    )]
    Parse { path: String, message: String },

    #[error("failed to serialize engine config for {path}: {message}")]
    #[diagnostic(
        code(mastery::config::serialize),
        help("The configuration could not be rendered as TOML.")
    )]
    Serialize { path: String, message: String },

    #[error("failed to write engine config: {path}")]
    #[diagnostic(
        code(mastery::config::write),
        help("Ensure you have write permissions to the target directory.")
    )]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid configuration: {message}")]
    #[diagnostic(
        code(mastery::config::invalid),
        help("Check the EngineConfig fields. {message}")
    )]
    Invalid { message: String },
}

// ---------------------------------------------------------------------------
// Layout errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum LayoutError {
    #[error("prerequisite cycle detected among: {}", .members.join(", "))]
    #[diagnostic(
        code(mastery::layout::cycle),
        help(
            "These concepts depend on each other, directly or transitively. \
             Remove one of the prerequisite links, or disable `reject_cycles` \
             to fall back to best-effort layering."
        )
    )]
    CyclicPrerequisite { members: Vec<String> },
}

/// Convenience alias for functions returning mastery-graph results.
pub type MasteryResult<T> = std::result::Result<T, MasteryError>;
