//! Configuration persistence tests: TOML files on disk.

use filet_grid::config::EngineConfig;
use filet_grid::engine::PatternEngine;
use filet_grid::error::ConfigError;

#[test]
fn save_then_load_preserves_values() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("nested").join("filet.toml");

    let config = EngineConfig {
        cell_size: 12,
        search_limit: 3,
        baseline_gauge: 5.0,
        max_gauge: 16.0,
        seed_samples: false,
    };
    config.save(&path).unwrap();
    assert!(path.exists());

    let loaded = EngineConfig::load(&path).unwrap();
    assert_eq!(loaded, config);
}

#[test]
fn partial_file_fills_defaults() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("filet.toml");
    std::fs::write(&path, "search_limit = 2\n").unwrap();

    let loaded = EngineConfig::load(&path).unwrap();
    assert_eq!(loaded.search_limit, 2);
    assert_eq!(loaded.cell_size, 20);

    let engine = PatternEngine::new(loaded).unwrap();
    assert_eq!(engine.search_images("").len(), 2);
}

#[test]
fn invalid_values_fail_to_load() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("filet.toml");
    std::fs::write(&path, "cell_size = 0\n").unwrap();

    assert!(matches!(
        EngineConfig::load(&path),
        Err(ConfigError::Invalid { .. })
    ));
}

#[test]
fn malformed_toml_reports_parse_error() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("filet.toml");
    std::fs::write(&path, "cell_size = \"big\"\n").unwrap();

    let err = EngineConfig::load(&path).unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }));
    assert!(err.to_string().contains("filet.toml"));
}

#[test]
fn missing_file_reports_read_error() {
    let dir = tempfile::TempDir::new().unwrap();
    let err = EngineConfig::load(&dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, ConfigError::Read { .. }));
}
