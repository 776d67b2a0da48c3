//! Configuration module for Mauka LPM.
//!
//! Settings are layered: built-in defaults, then an optional file (TOML, YAML,
//! JSON), then environment variables. The merged result is validated before use.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::config::ConfigError;
use crate::error::{LpmError, LpmResult};
use config::{Config, ConfigError as ExternalConfigError, Environment, File};
use serde::{Deserialize, Serialize};

pub mod trie;
pub mod workload;

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Default environment variable prefix for configuration overrides
pub const ENV_PREFIX: &str = "MAUKA_LPM";

/// A trait for types that can be validated.
pub trait Validate {
    /// Validates that the configuration is correct.
    ///
    /// # Returns
    ///
    /// * `Ok(())` if the configuration is valid
    /// * `Err(ConfigError)` if the configuration is invalid
    fn validate(&self) -> ConfigResult<()>;
}

/// Main configuration for Mauka LPM.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct LpmConfig {
    /// Trie configuration
    pub trie: trie::TrieConfig,

    /// Benchmark workload configuration
    pub workload: workload::WorkloadConfig,

    /// Log configuration
    pub log: LogConfig,
}

impl Validate for LpmConfig {
    fn validate(&self) -> ConfigResult<()> {
        self.trie.validate()?;
        self.workload.validate()?;
        self.log.validate()?;
        Ok(())
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LogConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Whether to log in JSON format
    pub json: bool,

    /// Whether to include source code locations in logs
    pub source_location: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
            source_location: true,
        }
    }
}

impl Validate for LogConfig {
    fn validate(&self) -> ConfigResult<()> {
        match self.level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => Ok(()),
            _ => Err(ConfigError::ValidationError(format!(
                "Invalid log level: {}",
                self.level
            ))),
        }
    }
}

/// Configuration loader for Mauka LPM.
#[derive(Debug)]
pub struct ConfigLoader {
    config_path: Option<PathBuf>,
    env_prefix: String,
}

impl ConfigLoader {
    /// Creates a new configuration loader.
    ///
    /// # Arguments
    ///
    /// * `config_path` - Optional path to the configuration file
    /// * `env_prefix` - Prefix for environment variables that override configuration values
    pub fn new<P: AsRef<Path>>(config_path: Option<P>, env_prefix: &str) -> Self {
        Self {
            config_path: config_path.map(|p| p.as_ref().to_path_buf()),
            env_prefix: env_prefix.to_string(),
        }
    }

    /// Loads the configuration from defaults, the file and environment variables.
    pub fn load(&self) -> ConfigResult<LpmConfig> {
        let mut builder = Config::builder();

        builder = builder.add_source(
            Config::try_from(&LpmConfig::default())
                .map_err(|e| ConfigError::ParseError(e.to_string()))?,
        );

        if let Some(path) = &self.config_path {
            if !path.exists() {
                return Err(ConfigError::FileNotFound(path.clone()));
            }

            let format = match path.extension().and_then(|ext| ext.to_str()) {
                Some("toml") => config::FileFormat::Toml,
                Some("json") => config::FileFormat::Json,
                Some("yaml" | "yml") => config::FileFormat::Yaml,
                _ => {
                    return Err(ConfigError::ParseError(format!(
                        "Unsupported file extension for: {path:?}"
                    )))
                }
            };
            builder = builder.add_source(File::from(path.as_path()).format(format));
        }

        builder = builder.add_source(
            Environment::with_prefix(&self.env_prefix)
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build().map_err(map_external_error)?;

        let lpm_config: LpmConfig = config
            .try_deserialize()
            .map_err(|e| ConfigError::ParseError(e.to_string()))?;

        lpm_config.validate()?;

        Ok(lpm_config)
    }
}

/// Writes `config` to `path` as TOML, creating missing parent directories.
pub fn write_config(config: &LpmConfig, path: &Path) -> LpmResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let rendered = toml::to_string_pretty(config)
        .map_err(|e| LpmError::Custom(format!("Failed to serialize configuration: {e}")))?;
    fs::write(path, rendered)?;
    Ok(())
}

fn map_external_error(error: ExternalConfigError) -> ConfigError {
    match error {
        ExternalConfigError::NotFound(path) => ConfigError::FileNotFound(PathBuf::from(path)),
        ExternalConfigError::FileParse { uri, cause } => ConfigError::ParseError(format!(
            "Error parsing config file {}: {cause}",
            uri.unwrap_or_default()
        )),
        other => ConfigError::ParseError(other.to_string()),
    }
}
