//! Config persistence tests: engine configs survive a save/load cycle on disk
//! and bad files surface as diagnostics rather than panics.

use mastery_graph::config::EngineConfig;
use mastery_graph::engine::Engine;
use mastery_graph::error::{ConfigError, MasteryError};
use mastery_graph::mastery::MasteryScope;

#[test]
fn save_then_load_round_trips() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("nested").join("engine.toml");

    let mut config = EngineConfig {
        reject_cycles: true,
        scope: MasteryScope::Learner("42".into()),
        ..Default::default()
    };
    config.layout.row_spacing = 90.0;
    config.uris.concept_base = "https://courses.example.net/kg#".into();

    config.save(&path).unwrap();
    let loaded = EngineConfig::load(&path).unwrap();
    assert_eq!(loaded, config);
}

#[test]
fn default_config_round_trips() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("engine.toml");
    EngineConfig::default().save(&path).unwrap();
    assert_eq!(EngineConfig::load(&path).unwrap(), EngineConfig::default());
}

#[test]
fn missing_file_is_read_error() {
    let dir = tempfile::TempDir::new().unwrap();
    let err = EngineConfig::load(&dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, ConfigError::Read { .. }));
}

#[test]
fn malformed_toml_is_parse_error() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("engine.toml");
    std::fs::write(&path, "reject_cycles = = true").unwrap();
    assert!(matches!(
        EngineConfig::load(&path).unwrap_err(),
        ConfigError::Parse { .. }
    ));
}

#[test]
fn invalid_values_are_rejected_on_load() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("engine.toml");
    std::fs::write(&path, "[layout]\nlayer_spacing = 0.0\n").unwrap();
    assert!(matches!(
        Engine::from_config_file(&path).unwrap_err(),
        MasteryError::Config(ConfigError::Invalid { .. })
    ));
}

#[test]
fn invalid_config_is_not_saved() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("engine.toml");
    let mut config = EngineConfig::default();
    config.layout.row_spacing = -5.0;
    assert!(matches!(
        config.save(&path).unwrap_err(),
        ConfigError::Invalid { .. }
    ));
    assert!(!path.exists());
}
