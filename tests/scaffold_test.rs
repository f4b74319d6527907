// Scaffold checks for the draft board crate.

use std::path::Path;

/// Verify that config/draft.toml is valid TOML.
#[test]
fn draft_toml_is_valid() {
    let content =
        std::fs::read_to_string("config/draft.toml").expect("config/draft.toml should exist");
    let parsed: Result<toml::Value, _> = toml::from_str(&content);
    assert!(
        parsed.is_ok(),
        "config/draft.toml is not valid TOML: {:?}",
        parsed.err()
    );
}

/// Verify that the shipped config file matches the built-in defaults, so a
/// fresh checkout behaves the same with or without it.
#[test]
fn shipped_config_matches_defaults() {
    let config = draft_board::config::load_config_from(Path::new("."))
        .expect("shipped config should load");
    let defaults = draft_board::config::load_config_from(Path::new("/nonexistent"))
        .expect("defaults should load");

    assert_eq!(config.roster.team_capacity, defaults.roster.team_capacity);
    assert_eq!(config.roster.min_teams, defaults.roster.min_teams);
    assert_eq!(
        config.roster.min_participants,
        defaults.roster.min_participants
    );
    assert_eq!(config.draft.countdown_secs, defaults.draft.countdown_secs);
}

/// Verify that all expected directories exist.
#[test]
fn directory_structure_exists() {
    let expected_dirs = ["src", "src/draft", "config", "tests"];
    for dir in expected_dirs {
        assert!(Path::new(dir).is_dir(), "Expected directory '{}' to exist", dir);
    }
}

/// Verify that all expected source files exist.
#[test]
fn source_files_exist() {
    let expected_files = [
        "src/lib.rs",
        "src/main.rs",
        "src/config.rs",
        "src/countdown.rs",
        "src/protocol.rs",
        "src/session.rs",
        "src/draft/mod.rs",
        "src/draft/roster.rs",
        "src/draft/engine.rs",
        "src/draft/history.rs",
    ];
    for file in expected_files {
        assert!(Path::new(file).is_file(), "Expected file '{}' to exist", file);
    }
}
