//! Configuration file
//!
//! ```json
//! {
//!   "data_dir": "./data",
//!   "http": { "host": "0.0.0.0", "port": 8080, "cors_origins": [] },
//!   "log_filter": "info"
//! }
//! ```
//!
//! Every field is optional. Without `data_dir` the server keeps records in
//! memory only.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::errors::{CliError, CliResult};
use crate::http_server::HttpServerConfig;

/// Configuration file structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Directory for the file store; `None` selects the in-memory store
    #[serde(default)]
    pub data_dir: Option<PathBuf>,

    #[serde(default)]
    pub http: HttpServerConfig,

    /// `tracing` filter used when `RUST_LOG` is unset
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

fn default_log_filter() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: None,
            http: HttpServerConfig::default(),
            log_filter: default_log_filter(),
        }
    }
}

impl Config {
    /// Loads configuration from `path`. A missing file yields defaults.
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => {
                return Err(CliError::config_error(format!(
                    "Failed to read config {}: {}",
                    path.display(),
                    e
                )))
            }
        };

        let config: Config = serde_json::from_str(&content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> CliResult<()> {
        if self.http.host.trim().is_empty() {
            return Err(CliError::config_error("http.host must not be empty"));
        }
        if self.log_filter.trim().is_empty() {
            return Err(CliError::config_error("log_filter must not be empty"));
        }
        Ok(())
    }

    /// Applies a command-line `--data-dir` override.
    pub fn with_data_dir(mut self, data_dir: Option<PathBuf>) -> Self {
        if data_dir.is_some() {
            self.data_dir = data_dir;
        }
        self
    }

    /// Data directory, required by the one-shot commands.
    pub fn require_data_dir(&self) -> CliResult<&Path> {
        self.data_dir.as_deref().ok_or_else(|| {
            CliError::config_error("a data directory is required (set data_dir or pass --data-dir)")
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let config = Config::load(&dir.path().join("absent.json")).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.log_filter, "info");
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("datasets.json");
        fs::write(&path, r#"{"data_dir": "/var/lib/datasets", "http": {"port": 9001}}"#).unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.data_dir, Some(PathBuf::from("/var/lib/datasets")));
        assert_eq!(config.http.port, 9001);
        assert_eq!(config.http.host, "0.0.0.0");
    }

    #[test]
    fn test_invalid_json_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("datasets.json");
        fs::write(&path, "{ not json").unwrap();

        let err = Config::load(&path).unwrap_err();
        assert_eq!(err.code(), "DATASETS_CLI_CONFIG_ERROR");
    }

    #[test]
    fn test_data_dir_override() {
        let config = Config::default().with_data_dir(Some(PathBuf::from("/tmp/d")));
        assert_eq!(config.require_data_dir().unwrap(), Path::new("/tmp/d"));

        assert!(Config::default().with_data_dir(None).require_data_dir().is_err());
    }
}
