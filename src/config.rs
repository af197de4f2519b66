//! Engine configuration, optionally persisted as TOML.
//!
//! ```toml
//! reject_cycles = false
//!
//! [layout]
//! layer_spacing = 250.0
//! row_spacing = 120.0
//!
//! [uris]
//! user_base = "https://example.org/users/"
//! concept_base = "https://example.org/concepts#"
//!
//! [scope]
//! kind = "learner"
//! id = "42"
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::graph::LayoutConfig;
use crate::mastery::MasteryScope;
use crate::merge::AssertionUris;

pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Configuration for the mastery-graph engine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Fail layouts on prerequisite cycles instead of laying them out best-effort.
    pub reject_cycles: bool,
    /// Position spacing for layouts.
    pub layout: LayoutConfig,
    /// URI bases for merged assertions.
    pub uris: AssertionUris,
    /// Whose assertions count toward the mastery set.
    pub scope: MasteryScope,
}

impl EngineConfig {
    /// Load from a TOML file. Missing fields take their defaults.
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            source: e,
        })?;
        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Save to a TOML file, creating parent directories.
    ///
    /// Invalid configs are rejected before anything is written.
    pub fn save(&self, path: &Path) -> ConfigResult<()> {
        self.validate()?;
        let content = toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::Write {
                path: parent.display().to_string(),
                source: e,
            })?;
        }
        std::fs::write(path, content).map_err(|e| ConfigError::Write {
            path: path.display().to_string(),
            source: e,
        })
    }

    /// Reject spacings that would collapse or invert the layout.
    pub fn validate(&self) -> ConfigResult<()> {
        let spacings = [
            ("layout.layer_spacing", self.layout.layer_spacing),
            ("layout.row_spacing", self.layout.row_spacing),
        ];
        for (name, value) in spacings {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::Invalid {
                    message: format!("{name} must be a positive number, got {value}"),
                });
            }
        }
        for (name, value) in [("layout.base_x", self.layout.base_x), ("layout.base_y", self.layout.base_y)] {
            if !value.is_finite() {
                return Err(ConfigError::Invalid {
                    message: format!("{name} must be finite, got {value}"),
                });
            }
        }
        if let MasteryScope::Learner(id) = &self.scope {
            if id.trim().is_empty() {
                return Err(ConfigError::Invalid {
                    message: "scope.id must not be empty for a learner scope".into(),
                });
            }
        }
        Ok(())
    }
}
