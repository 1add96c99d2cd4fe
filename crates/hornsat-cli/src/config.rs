//! CLI configuration.

use anyhow::Context;
use hornsat_engine::EngineConfig;
use hornsat_format::InputFormat;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable naming a configuration file.
pub const CONFIG_ENV: &str = "HORNSAT_CONFIG";

/// Configuration file looked up in the working directory.
pub const CONFIG_FILE: &str = "hornsat.toml";

/// CLI configuration loaded from a TOML file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Format for inputs whose extension is not recognised.
    pub default_format: Option<String>,
    /// Default number of batch workers (0 = auto).
    pub workers: usize,
    /// Keep counter updates in written traces.
    pub record_counters: bool,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            default_format: None,
            workers: 0,
            record_counters: true,
        }
    }
}

impl CliConfig {
    /// Loads configuration from `explicit`, else from `$HORNSAT_CONFIG`,
    /// else from `./hornsat.toml` when present, else defaults.
    pub fn load(explicit: Option<&Path>) -> anyhow::Result<Self> {
        let path = match explicit {
            Some(path) => Some(path.to_path_buf()),
            None => std::env::var_os(CONFIG_ENV).map(PathBuf::from),
        };
        if let Some(path) = path {
            return Self::from_path(&path);
        }

        let local = Path::new(CONFIG_FILE);
        if local.is_file() {
            return Self::from_path(local);
        }
        Ok(Self::default())
    }

    /// Reads a configuration file.
    pub fn from_path(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config =
            Self::parse(&content).with_context(|| format!("Invalid config {}", path.display()))?;
        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Parses TOML content.
    pub fn parse(content: &str) -> anyhow::Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.default_format()?;
        Ok(config)
    }

    /// The configured fallback input format.
    pub fn default_format(&self) -> anyhow::Result<Option<InputFormat>> {
        self.default_format
            .as_deref()
            .map(str::parse::<InputFormat>)
            .transpose()
            .map_err(anyhow::Error::from)
    }

    /// Engine settings derived from this configuration.
    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            record_counters: self.record_counters,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full() {
        let config = CliConfig::parse(
            r#"
            default_format = "json"
            workers = 4
            record_counters = false
            "#,
        )
        .unwrap();
        assert_eq!(config.default_format().unwrap(), Some(InputFormat::Json));
        assert_eq!(config.workers, 4);
        assert!(!config.engine_config().record_counters);
    }

    #[test]
    fn test_parse_empty_uses_defaults() {
        assert_eq!(CliConfig::parse("").unwrap(), CliConfig::default());
    }

    #[test]
    fn test_rejects_unknown_format() {
        assert!(CliConfig::parse(r#"default_format = "dimacs""#).is_err());
    }

    #[test]
    fn test_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(&path, "workers = 2\n").unwrap();

        let config = CliConfig::load(Some(path.as_path())).unwrap();
        assert_eq!(config.workers, 2);
        assert!(config.record_counters);

        assert!(CliConfig::load(Some(dir.path().join("missing.toml").as_path())).is_err());
    }
}
