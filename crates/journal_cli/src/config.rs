//! CLI configuration loading.
//!
//! The core never reads configuration; database location, gate password
//! and logging choices all live here, in the presentation layer.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE_NAME: &str = "config.toml";
const DB_FILE_NAME: &str = "journal.db";
const DEFAULT_ACCESS_PASSWORD: &str = "1310";

/// Resolved runtime configuration with defaults applied.
#[derive(Debug, Clone)]
pub struct Config {
    /// SQLite database file driven through the core store.
    pub database_path: PathBuf,
    /// Password the access gate compares against before issuing a grant.
    pub access_password: String,
    /// Log level handed to core logging bootstrap.
    pub log_level: String,
    /// Directory for rolling log files; must be absolute.
    pub log_dir: PathBuf,
}

/// Raw optional fields as they appear in the TOML file.
#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    database_path: Option<PathBuf>,
    access_password: Option<String>,
    log_level: Option<String>,
    log_dir: Option<PathBuf>,
}

impl Config {
    /// Loads configuration from `override_path` when given, otherwise
    /// from the platform config directory when a file exists there,
    /// otherwise pure defaults.
    pub fn load(override_path: Option<&Path>) -> Result<Self> {
        let file_config = match override_path {
            Some(path) => parse_file(path)?,
            None => match default_config_file() {
                Some(path) if path.exists() => parse_file(&path)?,
                _ => FileConfig::default(),
            },
        };
        Ok(Self::from_file_config(file_config))
    }

    fn from_file_config(file_config: FileConfig) -> Self {
        let data_dir = project_dirs()
            .map(|dirs| dirs.data_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from("."));

        Self {
            database_path: file_config
                .database_path
                .unwrap_or_else(|| data_dir.join(DB_FILE_NAME)),
            access_password: file_config
                .access_password
                .unwrap_or_else(|| DEFAULT_ACCESS_PASSWORD.to_string()),
            log_level: file_config
                .log_level
                .unwrap_or_else(|| journal_core::default_log_level().to_string()),
            log_dir: file_config.log_dir.unwrap_or_else(|| data_dir.join("logs")),
        }
    }
}

fn parse_file(path: &Path) -> Result<FileConfig> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;
    toml::from_str(&raw).with_context(|| format!("failed to parse config file {}", path.display()))
}

fn default_config_file() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", "journal")
}

#[cfg(test)]
mod tests {
    use super::{Config, FileConfig};
    use std::path::PathBuf;

    #[test]
    fn file_config_fields_override_defaults() {
        let parsed: FileConfig = toml::from_str(
            r#"
            database_path = "/tmp/test-journal.db"
            access_password = "hunter2"
            log_level = "warn"
            log_dir = "/tmp/test-journal-logs"
            "#,
        )
        .unwrap();

        let config = Config::from_file_config(parsed);
        assert_eq!(config.database_path, PathBuf::from("/tmp/test-journal.db"));
        assert_eq!(config.access_password, "hunter2");
        assert_eq!(config.log_level, "warn");
        assert_eq!(config.log_dir, PathBuf::from("/tmp/test-journal-logs"));
    }

    #[test]
    fn defaults_apply_when_file_is_empty() {
        let config = Config::from_file_config(FileConfig::default());
        assert!(!config.access_password.is_empty());
        assert!(config.database_path.ends_with("journal.db"));
        assert!(!config.log_level.is_empty());
    }
}
