//! Configuration management with layered hierarchy

use serde::Deserialize;
use std::path::PathBuf;

/// Default response window in calendar days
pub const DEFAULT_RESPONSE_DAYS: i64 = 20;

/// Default database file name, resolved against the working directory
pub const DEFAULT_DB_FILE: &str = "foiadesk.db";

/// FOIA Desk configuration with layered hierarchy
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Database file path
    pub db_path: Option<PathBuf>,

    /// Response window in days for newly submitted requests
    pub response_days: Option<i64>,

    /// Actor recorded on notes, closures, and releases when no officer is
    /// named
    pub actor: Option<String>,
}

impl Config {
    /// Load configuration from all sources, merging in priority order
    pub fn load() -> Self {
        let mut config = Config::default();

        // 1. Built-in defaults (already in Default impl)

        // 2. Global user config (~/.config/foiadesk/config.yaml)
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                if let Ok(contents) = std::fs::read_to_string(&global_path) {
                    if let Ok(global) = serde_yml::from_str::<Config>(&contents) {
                        config.merge(global);
                    }
                }
            }
        }

        // 3. Environment variables; the database path env var is handled by
        //    the CLI argument layer
        if let Ok(days) = std::env::var("FOIADESK_RESPONSE_DAYS") {
            if let Ok(days) = days.parse() {
                config.response_days = Some(days);
            }
        }
        if let Ok(actor) = std::env::var("FOIADESK_ACTOR") {
            config.actor = Some(actor);
        }

        config
    }

    /// Get the path to the global config file
    fn global_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "foiadesk")
            .map(|dirs| dirs.config_dir().join("config.yaml"))
    }

    /// Merge another config into this one (other takes precedence)
    fn merge(&mut self, other: Config) {
        if other.db_path.is_some() {
            self.db_path = other.db_path;
        }
        if other.response_days.is_some() {
            self.response_days = other.response_days;
        }
        if other.actor.is_some() {
            self.actor = other.actor;
        }
    }

    /// Database path, defaulting to `foiadesk.db`
    pub fn db_path(&self) -> PathBuf {
        self.db_path
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DB_FILE))
    }

    /// Response window in days for new requests
    pub fn response_days(&self) -> i64 {
        self.response_days.unwrap_or(DEFAULT_RESPONSE_DAYS)
    }

    /// Default actor name
    pub fn actor(&self) -> String {
        self.actor.clone().unwrap_or_else(|| "system".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.db_path(), PathBuf::from("foiadesk.db"));
        assert_eq!(config.response_days(), 20);
        assert_eq!(config.actor(), "system");
    }

    #[test]
    fn test_yaml_overrides() {
        let parsed: Config =
            serde_yml::from_str("db_path: /var/lib/foia/desk.db\nresponse_days: 30\n").unwrap();
        assert_eq!(parsed.db_path(), PathBuf::from("/var/lib/foia/desk.db"));
        assert_eq!(parsed.response_days(), 30);
        assert_eq!(parsed.actor(), "system");
    }
}
