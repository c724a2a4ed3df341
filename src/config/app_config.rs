//! Application settings
//!
//! Stored as settings.json in the config directory; a missing file is
//! created with defaults on first run.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use super::Paths;
use crate::utils::dates::DateFormat;

/// Application settings structure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppConfig {
    /// Key used to sign flash cookies
    #[serde(default)]
    pub secret_key: String,

    /// Database file; defaults to fyyur.db in the config directory
    #[serde(default)]
    pub database_path: Option<PathBuf>,

    /// Connection pool size
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    /// How long SQLite waits on a locked database
    #[serde(default = "default_busy_timeout_secs")]
    pub busy_timeout_secs: u64,

    /// Pattern for `start_time_display` in listings: "full" or "medium"
    #[serde(default = "default_display_format")]
    pub display_format: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            secret_key: String::new(),
            database_path: None,
            max_connections: default_max_connections(),
            busy_timeout_secs: default_busy_timeout_secs(),
            display_format: default_display_format(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the global config directory
    pub fn load() -> Result<Self> {
        let paths = Paths::get()?;
        Self::load_from(&paths.settings_path())
    }

    /// Load configuration from a settings file, creating it if missing.
    ///
    /// A secret key is generated and saved the first time one is needed.
    pub fn load_from(settings_path: &Path) -> Result<Self> {
        let mut config = if settings_path.exists() {
            let content =
                std::fs::read_to_string(settings_path).context("Failed to read settings file")?;
            serde_json::from_str::<AppConfig>(&content).context("Failed to parse settings file")?
        } else {
            Self::default()
        };

        if config.secret_key.is_empty() || !settings_path.exists() {
            if config.secret_key.is_empty() {
                config.secret_key = uuid::Uuid::new_v4().simple().to_string();
            }
            config.save_to(settings_path)?;
        }

        Ok(config)
    }

    /// Save configuration to a settings file
    pub fn save_to(&self, settings_path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self).context("Failed to serialize settings")?;
        std::fs::write(settings_path, content).context("Failed to write settings file")?;
        Ok(())
    }

    /// Apply FYYUR_DATABASE and FYYUR_SECRET_KEY from the environment
    pub fn apply_env(&mut self) {
        if let Ok(db) = std::env::var("FYYUR_DATABASE") {
            if !db.trim().is_empty() {
                self.database_path = Some(PathBuf::from(db.trim()));
            }
        }
        if let Ok(key) = std::env::var("FYYUR_SECRET_KEY") {
            if !key.is_empty() {
                self.secret_key = key;
            }
        }
    }

    /// Database file to open
    pub fn database_path(&self, paths: &Paths) -> PathBuf {
        self.database_path
            .clone()
            .unwrap_or_else(|| paths.app_db_path())
    }

    pub fn busy_timeout(&self) -> Duration {
        Duration::from_secs(self.busy_timeout_secs)
    }

    /// The display pattern, falling back to "full" if the setting is unknown
    pub fn display_format(&self) -> DateFormat {
        self.display_format.parse().unwrap_or_else(|e| {
            tracing::warn!("{}; using \"full\"", e);
            DateFormat::default()
        })
    }
}

// Default value functions for serde

fn default_max_connections() -> u32 {
    5
}

fn default_busy_timeout_secs() -> u64 {
    30
}

fn default_display_format() -> String {
    "full".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.max_connections, 5);
        assert_eq!(config.busy_timeout(), Duration::from_secs(30));
        assert_eq!(config.display_format(), DateFormat::Full);
        assert_eq!(config.display_format(), DateFormat::default());
        assert!(config.database_path.is_none());
    }

    #[test]
    fn test_first_load_writes_secret() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");

        let first = AppConfig::load_from(&path).unwrap();
        assert!(path.exists());
        assert_eq!(first.secret_key.len(), 32);

        let second = AppConfig::load_from(&path).unwrap();
        assert_eq!(first.secret_key, second.secret_key);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{ "secretKey": "abc", "displayFormat": "medium" }"#).unwrap();

        let config = AppConfig::load_from(&path).unwrap();
        assert_eq!(config.secret_key, "abc");
        assert_eq!(config.display_format(), DateFormat::Medium);
        assert_eq!(config.max_connections, 5);
    }

    #[test]
    fn test_unknown_display_format_falls_back() {
        let config = AppConfig {
            display_format: "short".into(),
            ..Default::default()
        };
        assert_eq!(config.display_format(), DateFormat::Full);
    }
}
