//! Command-line interface for formgate.
//!
//! # Commands
//!
//! - `check` - validate a values file against a form and report errors
//! - `schema` - list available forms or describe one
//! - `replay` - drive a form through a script of edits and submits
//!
//! # Global Options
//!
//! - `--verbose` / `-v`: debug logging
//! - `--quiet` / `-q`: errors only
//! - `--config <PATH>`: use a config file other than `~/.formgate/config.toml`
//!
//! `RUST_LOG` always takes precedence over the verbosity flags.
//!
//! # Examples
//!
//! ```bash
//! formgate check application.toml --form job
//! formgate check answers.json --form ./forms/survey.toml --format json
//! formgate schema show event
//! formgate --verbose replay session.txt --form job
//! ```

pub mod check;
pub mod replay;
pub mod schema;


use crate::config::GlobalConfig;
use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Settings derived from the global flags.
///
/// Kept separate from [`Cli`] so tests can run commands without parsing
/// arguments.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    /// Log filter used when `RUST_LOG` is not set.
    pub log_level: Option<String>,

    /// Explicit config file; `None` means the default location.
    pub config_path: Option<PathBuf>,
}

impl CliConfig {
    /// Defaults: no log level override, default config location.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Install the global tracing subscriber, writing to stderr.
    ///
    /// Does nothing if a subscriber is already installed.
    pub fn init_logging(&self) {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(self.log_level.as_deref().unwrap_or("warn")));

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    }

    /// Load the global configuration this CLI run should use.
    ///
    /// # Errors
    ///
    /// Fails if the config file exists but cannot be read or parsed.
    pub async fn load_global(&self) -> Result<GlobalConfig> {
        GlobalConfig::load_with_optional(self.config_path.clone()).await
    }
}

/// Validate form input against conditional form schemas.
#[derive(Parser, Debug)]
#[command(
    name = "formgate",
    about = "Validate form input against conditional form schemas",
    version,
    long_about = "formgate checks form values against schemas whose fields appear and \
                  disappear depending on other answers. Built-in forms: event, job."
)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Show debug logging
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Path to the global configuration file
    #[arg(long, global = true, value_name = "PATH", env = "FORMGATE_CONFIG")]
    config: Option<PathBuf>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate a values file against a form
    Check(check::CheckCommand),

    /// List or describe forms
    #[command(subcommand)]
    Schema(schema::SchemaCommand),

    /// Run a script of edits and submits through a form
    Replay(replay::ReplayCommand),
}

impl Cli {
    /// Run the selected command with settings taken from the global flags.
    ///
    /// # Errors
    ///
    /// Returns whatever the command returns; `check` fails when the values are
    /// invalid.
    pub async fn execute(self) -> Result<()> {
        let config = self.build_config();
        self.execute_with_config(config).await
    }

    /// Translate the global flags into a [`CliConfig`].
    #[must_use]
    pub fn build_config(&self) -> CliConfig {
        let log_level = if self.verbose {
            Some("debug".to_string())
        } else if self.quiet {
            Some("error".to_string())
        } else {
            None
        };

        CliConfig {
            log_level,
            config_path: self.config.clone(),
        }
    }

    /// Run the selected command with an explicit configuration.
    ///
    /// # Errors
    ///
    /// See [`Self::execute`].
    pub async fn execute_with_config(self, config: CliConfig) -> Result<()> {
        config.init_logging();
        let global = config.load_global().await?;

        match self.command {
            Commands::Check(cmd) => cmd.execute(&global).await,
            Commands::Schema(cmd) => cmd.execute(&global).await,
            Commands::Replay(cmd) => cmd.execute(&global).await,
        }
    }
}
