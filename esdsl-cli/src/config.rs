//! CLI configuration
//!
//! Default config location: ~/.esdsl/config.toml

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OutputConfig {
    /// Pretty-print rendered bodies (default: true)
    #[serde(default = "default_true")]
    pub pretty: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            pretty: default_true(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// Log level filter string
    /// Override with RUST_LOG env var
    #[serde(default = "default_level")]
    pub level: String,

    /// Log output format: "pretty" or "json"
    /// Override with LOG_FORMAT env var
    #[serde(default = "default_format")]
    pub format: String,
}

fn default_true() -> bool {
    true
}

fn default_level() -> String {
    "warn,esdsl=info".to_string()
}

fn default_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            format: default_format(),
        }
    }
}

impl Config {
    /// ~/.esdsl/config.toml
    pub fn default_path() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or_else(|| anyhow!("Cannot determine home directory"))?;
        Ok(home.join(".esdsl").join("config.toml"))
    }

    /// Load an explicitly requested config file; it must exist
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config at {:?}", path))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Invalid config at {:?}", path))?;
        Ok(config)
    }

    /// Load `path` if given, else the default location, else defaults
    pub fn load(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::load_from(path);
        }

        match Self::default_path() {
            Ok(default) if default.exists() => Self::load_from(&default),
            _ => Ok(Config::default()),
        }
    }

    /// RUST_LOG wins over the configured level
    pub fn log_filter(&self) -> String {
        std::env::var("RUST_LOG").unwrap_or_else(|_| self.logging.level.clone())
    }

    /// LOG_FORMAT wins over the configured format
    pub fn log_json(&self) -> bool {
        std::env::var("LOG_FORMAT")
            .unwrap_or_else(|_| self.logging.format.clone())
            .eq_ignore_ascii_case("json")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert!(config.output.pretty);
        assert_eq!(config.logging.level, "warn,esdsl=info");
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[output]\npretty = false").unwrap();

        let config = Config::load(Some(file.path())).unwrap();
        assert!(!config.output.pretty);
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn test_logging_section() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[logging]\nlevel = \"debug\"\nformat = \"json\"").unwrap();

        let config = Config::load_from(file.path()).unwrap();
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.format, "json");
    }

    #[test]
    fn test_explicit_missing_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(Config::load(Some(missing.as_path())).is_err());
    }

    #[test]
    fn test_invalid_toml_is_error() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[output\npretty = ").unwrap();
        assert!(Config::load_from(file.path()).is_err());
    }
}
