//! Common test utilities for formgate integration tests
//!
//! Every [`TestProject`] owns a temporary directory and its own config file
//! path, so commands never read the real `~/.formgate/config.toml`.

// Not every helper is used by every test module
#![allow(dead_code)]

use anyhow::{Context, Result};
use assert_cmd::Command;
use formgate_cli::test_utils::FileFixture;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Isolated working directory for running the `formgate` binary.
pub struct TestProject {
    _temp_dir: TempDir, // Keep alive for RAII cleanup
    root: PathBuf,
    config_path: PathBuf,
}

impl TestProject {
    /// Create an empty project with no config file.
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let root = temp_dir.path().to_path_buf();
        let config_path = root.join("formgate-config.toml");
        Ok(Self {
            _temp_dir: temp_dir,
            root,
            config_path,
        })
    }

    /// Project root.
    pub fn path(&self) -> &Path {
        &self.root
    }

    /// Write a fixture into the project root.
    pub fn write_fixture(&self, fixture: &FileFixture) -> Result<PathBuf> {
        fixture.write_to(&self.root)
    }

    /// Write an arbitrary file relative to the project root.
    pub fn write_file(&self, name: &str, content: &str) -> Result<PathBuf> {
        let path = self.root.join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, content)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(path)
    }

    /// Write the global config used by [`Self::formgate`].
    pub fn write_config(&self, content: &str) -> Result<()> {
        fs::write(&self.config_path, content).context("Failed to write config")
    }

    /// A `formgate` command running in the project root with this project's config.
    pub fn formgate(&self) -> Command {
        let mut cmd = Command::cargo_bin("formgate").unwrap();
        cmd.current_dir(&self.root)
            .arg("--config")
            .arg(&self.config_path)
            .env("NO_COLOR", "1")
            .env_remove("RUST_LOG")
            .env_remove("FORMGATE_CONFIG");
        cmd
    }
}
