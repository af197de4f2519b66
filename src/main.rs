//! mastery-graph CLI: inspect and update JSON-LD learner knowledge graphs.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use miette::{IntoDiagnostic, Result};
use serde::Serialize;

use mastery_graph::config::EngineConfig;
use mastery_graph::engine::Engine;
use mastery_graph::ld::Document;
use mastery_graph::mastery::MasteryScope;

#[derive(Parser)]
#[command(name = "mastery-graph", version, about = "Prerequisite-aware knowledge graph engine")]
struct Cli {
    /// Engine config file (TOML).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Only count mastery asserted by this learner (overrides the config scope).
    #[arg(long, global = true)]
    learner: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List every concept with its readiness.
    Status {
        /// JSON-LD document (array, @graph, or kg_data envelope).
        #[arg(long)]
        file: PathBuf,

        /// Show a single concept (by @id or local id).
        #[arg(long)]
        concept: Option<String>,
    },

    /// List concepts that are ready to learn next.
    Ready {
        #[arg(long)]
        file: PathBuf,
    },

    /// Compute the layered layout (nodes with positions and edges).
    Layout {
        #[arg(long)]
        file: PathBuf,
    },

    /// Report prerequisite cycles.
    Cycles {
        #[arg(long)]
        file: PathBuf,
    },

    /// Merge a "knows" assertion and write the resulting document.
    Merge {
        /// Source document; a missing file starts a new, empty graph.
        #[arg(long)]
        file: PathBuf,

        /// Learner id or URI.
        #[arg(long)]
        user: String,

        /// Concept local id or URI.
        #[arg(long)]
        concept: String,

        /// Output path (default: stdout).
        #[arg(long)]
        out: Option<PathBuf>,

        /// Wrap the output in a `kg_data` envelope.
        #[arg(long)]
        envelope: bool,
    },

    /// Write the default engine config to a TOML file.
    InitConfig {
        /// Destination path.
        path: PathBuf,
    },
}

fn main() -> Result<()> {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(3)
                .build(),
        )
    }))
    .ok(); // Ignore error if hook already set (e.g., in tests)

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => EngineConfig::load(path)?,
        None => EngineConfig::default(),
    };
    if let Some(learner) = cli.learner.clone() {
        config.scope = MasteryScope::Learner(learner);
    }

    match cli.command {
        Commands::Status { file, concept } => {
            let engine = Engine::new(config)?;
            let doc = read_document(&file, MissingFile::Error)?;
            match concept {
                Some(id) => match engine.status_of(&id, &doc) {
                    Some(status) => println!("{id}: {status}"),
                    None => miette::bail!("concept \"{id}\" not found in {}", file.display()),
                },
                None => print_json(&engine.concepts_with_status(&doc))?,
            }
        }

        Commands::Ready { file } => {
            let engine = Engine::new(config)?;
            let doc = read_document(&file, MissingFile::Error)?;
            print_json(&engine.ready_concepts(&doc))?;
        }

        Commands::Layout { file } => {
            let engine = Engine::new(config)?;
            let doc = read_document(&file, MissingFile::Error)?;
            print_json(&engine.layout(&doc)?)?;
        }

        Commands::Cycles { file } => {
            let engine = Engine::new(config)?;
            let doc = read_document(&file, MissingFile::Error)?;
            let cycles = engine.cycles(&doc);
            if cycles.is_empty() {
                println!("No prerequisite cycles.");
            } else {
                println!("Prerequisite cycles ({}):", cycles.len());
                for members in &cycles {
                    println!("  {}", members.join(" <-> "));
                }
            }
        }

        Commands::Merge {
            file,
            user,
            concept,
            out,
            envelope,
        } => {
            let engine = Engine::new(config)?;
            let doc = read_document(&file, MissingFile::Empty)?;
            let (merged, outcome) = engine.merge_with_outcome(&doc, &user, &concept);
            tracing::info!(?outcome, nodes = merged.len(), "merge complete");

            let value = if envelope {
                merged.to_envelope()
            } else {
                merged.to_value()
            };
            let json = serde_json::to_string_pretty(&value).into_diagnostic()?;
            match out {
                Some(path) => std::fs::write(&path, json).into_diagnostic()?,
                None => println!("{json}"),
            }
        }

        Commands::InitConfig { path } => {
            config.save(&path)?;
            println!("Wrote engine config to {}", path.display());
        }
    }

    Ok(())
}

/// How [`read_document`] treats a path that does not exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MissingFile {
    /// Report it; read-only commands need an existing graph.
    Error,
    /// Start from an empty document, as a first merge does.
    Empty,
}

fn read_document(path: &Path, missing: MissingFile) -> Result<Document> {
    if !path.exists() {
        if missing == MissingFile::Error {
            miette::bail!("document file not found: {}", path.display());
        }
        tracing::info!(path = %path.display(), "document file missing, starting from an empty graph");
        return Ok(Document::default());
    }
    let content = std::fs::read_to_string(path).into_diagnostic()?;
    if content.trim().is_empty() {
        return Ok(Document::default());
    }
    Ok(Document::from_json_str(&content)?)
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).into_diagnostic()?;
    println!("{json}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_is_an_error_for_reads() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("typo.json");
        let err = read_document(&path, MissingFile::Error).unwrap_err();
        assert!(format!("{err}").contains("typo.json"));
    }

    #[test]
    fn missing_file_is_empty_for_merge() {
        let dir = tempfile::TempDir::new().unwrap();
        let doc = read_document(&dir.path().join("new.json"), MissingFile::Empty).unwrap();
        assert!(doc.is_empty());
    }

    #[test]
    fn existing_file_is_parsed_either_way() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("graph.json");
        std::fs::write(&path, r#"{"kg_data": [{"@id": "https://example.org/concepts#A"}]}"#).unwrap();
        assert_eq!(read_document(&path, MissingFile::Error).unwrap().len(), 1);
        assert_eq!(read_document(&path, MissingFile::Empty).unwrap().len(), 1);

        std::fs::write(&path, "  \n").unwrap();
        assert!(read_document(&path, MissingFile::Error).unwrap().is_empty());
    }
}
