// Configuration loading and parsing (config/draft.toml).

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not readable: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },
}

// ---------------------------------------------------------------------------
// Config structs
// ---------------------------------------------------------------------------

/// Top-level configuration. Every section and field has a default, so the
/// app runs without a config file at all.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DraftConfig {
    pub roster: RosterRules,
    pub draft: DraftRules,
}

/// Size rules for the two rosters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RosterRules {
    /// Maximum number of teams.
    pub team_capacity: usize,
    /// Minimum teams before a draft may start.
    pub min_teams: usize,
    /// Minimum participants before a draft may start.
    pub min_participants: usize,
}

impl Default for RosterRules {
    fn default() -> Self {
        RosterRules {
            team_capacity: 8,
            min_teams: 2,
            min_participants: 2,
        }
    }
}

/// Draft-run settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DraftRules {
    /// Seconds the countdown runs before the assignment fires.
    pub countdown_secs: u64,
}

impl Default for DraftRules {
    fn default() -> Self {
        DraftRules { countdown_secs: 5 }
    }
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Load configuration from `config/draft.toml` under `base_dir`.
///
/// A missing file is not an error: the built-in defaults apply. A file
/// that exists but cannot be read or parsed is reported, as is any value
/// outside its valid range.
pub fn load_config_from(base_dir: &Path) -> Result<DraftConfig, ConfigError> {
    let path = base_dir.join("config").join("draft.toml");

    let config = if path.exists() {
        let text = std::fs::read_to_string(&path).map_err(|_| ConfigError::FileNotFound {
            path: path.clone(),
        })?;
        toml::from_str(&text).map_err(|e| ConfigError::ParseError {
            path: path.clone(),
            source: e,
        })?
    } else {
        DraftConfig::default()
    };

    validate(&config)?;
    Ok(config)
}

/// Convenience wrapper: loads config relative to the current working
/// directory.
pub fn load_config() -> Result<DraftConfig, ConfigError> {
    let cwd = std::env::current_dir().map_err(|_| ConfigError::FileNotFound {
        path: PathBuf::from("."),
    })?;
    load_config_from(&cwd)
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate(config: &DraftConfig) -> Result<(), ConfigError> {
    let rules = &config.roster;

    // A draft needs at least two of each; anything lower would let the
    // session gate pass rosters the engine rejects.
    if rules.min_teams < 2 {
        return Err(ConfigError::ValidationError {
            field: "roster.min_teams".into(),
            message: format!("must be at least 2, got {}", rules.min_teams),
        });
    }
    if rules.min_participants < 2 {
        return Err(ConfigError::ValidationError {
            field: "roster.min_participants".into(),
            message: format!("must be at least 2, got {}", rules.min_participants),
        });
    }
    if rules.team_capacity < rules.min_teams {
        return Err(ConfigError::ValidationError {
            field: "roster.team_capacity".into(),
            message: format!(
                "must be at least roster.min_teams ({}), got {}",
                rules.min_teams, rules.team_capacity
            ),
        });
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let tmp = std::env::temp_dir().join("draftboard_config_missing");
        let _ = fs::remove_dir_all(&tmp);
        fs::create_dir_all(&tmp).unwrap();

        let config = load_config_from(&tmp).expect("defaults should apply");
        assert_eq!(config.roster.team_capacity, 8);
        assert_eq!(config.roster.min_teams, 2);
        assert_eq!(config.roster.min_participants, 2);
        assert_eq!(config.draft.countdown_secs, 5);

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn loads_values_from_file() {
        let tmp = std::env::temp_dir().join("draftboard_config_values");
        let config_dir = tmp.join("config");
        let _ = fs::remove_dir_all(&tmp);
        fs::create_dir_all(&config_dir).unwrap();
        fs::write(
            config_dir.join("draft.toml"),
            r#"
[roster]
team_capacity = 12
min_teams = 3
min_participants = 6

[draft]
countdown_secs = 10
"#,
        )
        .unwrap();

        let config = load_config_from(&tmp).expect("should load");
        assert_eq!(config.roster.team_capacity, 12);
        assert_eq!(config.roster.min_teams, 3);
        assert_eq!(config.roster.min_participants, 6);
        assert_eq!(config.draft.countdown_secs, 10);

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn partial_file_keeps_defaults_for_omitted_fields() {
        let tmp = std::env::temp_dir().join("draftboard_config_partial");
        let config_dir = tmp.join("config");
        let _ = fs::remove_dir_all(&tmp);
        fs::create_dir_all(&config_dir).unwrap();
        fs::write(config_dir.join("draft.toml"), "[draft]\ncountdown_secs = 1\n").unwrap();

        let config = load_config_from(&tmp).expect("should load");
        assert_eq!(config.draft.countdown_secs, 1);
        assert_eq!(config.roster.team_capacity, 8);

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn rejects_min_teams_below_two() {
        let tmp = std::env::temp_dir().join("draftboard_config_min_teams");
        let config_dir = tmp.join("config");
        let _ = fs::remove_dir_all(&tmp);
        fs::create_dir_all(&config_dir).unwrap();
        fs::write(config_dir.join("draft.toml"), "[roster]\nmin_teams = 1\n").unwrap();

        let err = load_config_from(&tmp).unwrap_err();
        match &err {
            ConfigError::ValidationError { field, .. } => {
                assert_eq!(field, "roster.min_teams");
            }
            other => panic!("expected ValidationError, got: {other}"),
        }

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn rejects_capacity_below_min_teams() {
        let tmp = std::env::temp_dir().join("draftboard_config_capacity");
        let config_dir = tmp.join("config");
        let _ = fs::remove_dir_all(&tmp);
        fs::create_dir_all(&config_dir).unwrap();
        fs::write(
            config_dir.join("draft.toml"),
            "[roster]\nteam_capacity = 2\nmin_teams = 4\n",
        )
        .unwrap();

        let err = load_config_from(&tmp).unwrap_err();
        match &err {
            ConfigError::ValidationError { field, .. } => {
                assert_eq!(field, "roster.team_capacity");
            }
            other => panic!("expected ValidationError, got: {other}"),
        }

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn parse_error_for_invalid_toml() {
        let tmp = std::env::temp_dir().join("draftboard_config_invalid");
        let config_dir = tmp.join("config");
        let _ = fs::remove_dir_all(&tmp);
        fs::create_dir_all(&config_dir).unwrap();
        fs::write(config_dir.join("draft.toml"), "this is not valid [[[ toml").unwrap();

        let err = load_config_from(&tmp).unwrap_err();
        match &err {
            ConfigError::ParseError { path, .. } => {
                assert!(path.ends_with("draft.toml"));
            }
            other => panic!("expected ParseError, got: {other}"),
        }

        let _ = fs::remove_dir_all(&tmp);
    }
}
