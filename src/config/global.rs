//! Global configuration for formgate.
//!
//! The global configuration file (`~/.formgate/config.toml`) holds user-wide
//! defaults for the command line and registers schema files under short names.
//!
//! # File Format
//!
//! ```toml
//! # Keep stored errors while editing instead of clearing them
//! error_policy = "retain"
//!
//! # Default output format for `formgate check`
//! format = "json"
//!
//! [schemas]
//! newsletter = "schemas/newsletter.toml"     # relative to this file
//! survey = "/srv/forms/survey.toml"
//! ```
//!
//! Every key is optional; a missing file is the same as an empty one.
//!
//! # Examples
//!
//! ```rust,no_run
//! use formgate_cli::config::GlobalConfig;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = GlobalConfig::load().await?;
//! for (name, path) in config.schema_paths() {
//!     println!("{name} -> {}", path.display());
//! }
//! # Ok(())
//! # }
//! ```

use crate::controller::ErrorPolicy;
use crate::core::FormgateError;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Output format for command results.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable, coloured output
    #[default]
    Text,
    /// Structured JSON for scripts
    Json,
}

/// Global configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GlobalConfig {
    /// Error policy used by `check` and `replay`.
    #[serde(default)]
    pub error_policy: ErrorPolicy,

    /// Default output format when `--format` is not given.
    #[serde(default)]
    pub format: OutputFormat,

    /// Schema files registered by form name.
    ///
    /// Relative paths are resolved against the directory holding the config file.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub schemas: BTreeMap<String, PathBuf>,

    #[serde(skip)]
    base_dir: Option<PathBuf>,
}

impl GlobalConfig {
    /// Load from the default location, or defaults if the file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined, or the file
    /// exists but cannot be read or parsed.
    pub async fn load() -> Result<Self> {
        let path = Self::default_path()?;
        Self::load_with_optional(Some(path)).await
    }

    /// Load from `path` if given, otherwise from the default location.
    ///
    /// A missing file yields the default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub async fn load_with_optional(path: Option<PathBuf>) -> Result<Self> {
        let path = match path {
            Some(path) => path,
            None => match Self::default_path() {
                Ok(path) => path,
                Err(e) => {
                    tracing::debug!("no default config location: {e}");
                    return Ok(Self::default());
                }
            },
        };
        if fs::try_exists(&path).await.unwrap_or(false) {
            Self::load_from(&path).await
        } else {
            tracing::debug!(path = %path.display(), "config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Load from a specific file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, or
    /// [`FormgateError::ConfigError`] if it does not match the expected structure.
    pub async fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read global config from {}", path.display()))?;

        let mut config: Self =
            toml::from_str(&content).map_err(|e| FormgateError::ConfigError {
                message: format!("Failed to parse global config {}: {e}", path.display()),
            })?;
        config.base_dir = path.parent().map(Path::to_path_buf);
        tracing::debug!(path = %path.display(), schemas = config.schemas.len(), "loaded global config");
        Ok(config)
    }

    /// `~/.formgate/config.toml`, or `%LOCALAPPDATA%\formgate\config.toml` on Windows.
    ///
    /// # Errors
    ///
    /// Returns an error if the home (or local data) directory cannot be determined.
    pub fn default_path() -> Result<PathBuf> {
        let config_dir = if cfg!(target_os = "windows") {
            dirs::data_local_dir()
                .ok_or_else(|| anyhow::anyhow!("Unable to determine local data directory"))?
                .join("formgate")
        } else {
            dirs::home_dir()
                .ok_or_else(|| anyhow::anyhow!("Unable to determine home directory"))?
                .join(".formgate")
        };

        Ok(config_dir.join("config.toml"))
    }

    /// Path of the schema registered as `name`, resolved against the config directory.
    #[must_use]
    pub fn schema_path(&self, name: &str) -> Option<PathBuf> {
        self.schemas.get(name).map(|path| self.resolve(path))
    }

    /// All registered schemas with resolved paths, in name order.
    pub fn schema_paths(&self) -> impl Iterator<Item = (&str, PathBuf)> {
        self.schemas.iter().map(|(name, path)| (name.as_str(), self.resolve(path)))
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        match &self.base_dir {
            Some(base) if path.is_relative() => base.join(path),
            _ => path.to_path_buf(),
        }
    }
}
