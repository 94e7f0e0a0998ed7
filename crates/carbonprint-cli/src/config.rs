// SPDX-License-Identifier: PMPL-1.0-or-later
// SPDX-FileCopyrightText: 2025-2026 Jonathan D.A. Jewell
//! Configuration for the carbonprint CLI

use anyhow::{Context, Result};
use carbonprint_engine::EmissionFactorTable;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Result rendering
    #[serde(default)]
    pub output: OutputConfig,

    /// History record storage
    #[serde(default)]
    pub records: RecordsConfig,

    /// Alternative emission factor table
    #[serde(default)]
    pub factors: FactorsConfig,

    #[serde(default)]
    pub log: LogConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_format")]
    pub format: OutputFormat,

    /// Append the rating message to text output
    #[serde(default = "default_true")]
    pub show_rating: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: default_format(),
            show_rating: true,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordsConfig {
    /// Save every calculation made with a user id
    #[serde(default)]
    pub enabled: bool,

    /// Storage directory; defaults to the platform data directory
    #[serde(default)]
    pub directory: Option<PathBuf>,

    /// Keep at most this many records per user
    #[serde(default)]
    pub keep: Option<usize>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FactorsConfig {
    /// TOML or JSON file holding a complete factor table
    #[serde(default)]
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_format() -> OutputFormat {
    OutputFormat::Text
}

fn default_true() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}

impl RecordsConfig {
    pub fn directory(&self) -> PathBuf {
        self.directory.clone().unwrap_or_else(|| {
            dirs::data_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("carbonprint")
                .join("records")
        })
    }
}

impl Config {
    /// Factor table named by the config, or the built-in one
    pub fn factor_table(&self) -> Result<EmissionFactorTable> {
        match &self.factors.path {
            Some(path) => EmissionFactorTable::load(path)
                .with_context(|| format!("loading factor table {}", path.display())),
            None => Ok(EmissionFactorTable::default()),
        }
    }
}

pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("carbonprint")
        .join("config.yml")
}

/// Load a YAML or TOML config (by extension). A missing file yields defaults.
pub fn load_config(path: &Path) -> Result<Config> {
    if !path.exists() {
        debug!(path = %path.display(), "No config file, using defaults");
        return Ok(Config::default());
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;

    let config = if path.extension().and_then(|s| s.to_str()) == Some("toml") {
        toml::from_str(&content).context("TOML parse error")?
    } else {
        serde_yaml::from_str(&content).context("YAML parse error")?
    };

    debug!(path = %path.display(), "Loaded config");
    Ok(config)
}

pub fn write_default_config(path: &Path) -> Result<()> {
    let config = Config::default();

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let content = if path.extension().and_then(|s| s.to_str()) == Some("toml") {
        toml::to_string_pretty(&config).context("TOML serialize error")?
    } else {
        serde_yaml::to_string(&config)?
    };

    std::fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let temp = TempDir::new().unwrap();
        let config = load_config(&temp.path().join("absent.yml")).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.output.format, OutputFormat::Text);
        assert!(config.output.show_rating);
        assert_eq!(config.log.level, "info");
    }

    #[test]
    fn test_partial_yaml() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.yml");
        std::fs::write(&path, "output:\n  format: json\nrecords:\n  enabled: true\n  keep: 12\n").unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.output.format, OutputFormat::Json);
        assert!(config.output.show_rating);
        assert!(config.records.enabled);
        assert_eq!(config.records.keep, Some(12));
        assert!(config.factors.path.is_none());
    }

    #[test]
    fn test_write_and_reload_toml() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested").join("config.toml");
        write_default_config(&path).unwrap();
        assert_eq!(load_config(&path).unwrap(), Config::default());
    }

    #[test]
    fn test_write_and_reload_yaml() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.yml");
        write_default_config(&path).unwrap();
        assert_eq!(load_config(&path).unwrap(), Config::default());
    }

    #[test]
    fn test_factor_table_from_config() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("factors.toml");

        let mut table = EmissionFactorTable::default();
        table.consumption.diet.balanced = 3.0;
        std::fs::write(&path, table.to_toml_string().unwrap()).unwrap();

        let mut config = Config::default();
        assert_eq!(config.factor_table().unwrap(), EmissionFactorTable::default());

        config.factors.path = Some(path);
        assert_eq!(config.factor_table().unwrap().consumption.diet.balanced, 3.0);
    }

    #[test]
    fn test_records_directory_override() {
        let config = RecordsConfig {
            directory: Some(PathBuf::from("/srv/records")),
            ..Default::default()
        };
        assert_eq!(config.directory(), PathBuf::from("/srv/records"));
        assert!(RecordsConfig::default().directory().ends_with("carbonprint/records"));
    }
}
