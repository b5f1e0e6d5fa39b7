//! Configuration and form lookup.
//!
//! # Modules
//!
//! - `global` - the user-wide `~/.formgate/config.toml`
//!
//! # Form References
//!
//! Commands take a form reference that is resolved in this order:
//!
//! 1. A built-in form name (`event`, `job`)
//! 2. A name registered under `[schemas]` in the global configuration
//! 3. A path to a schema file (anything ending in `.toml`, or any existing file)
//!
//! A built-in name cannot be shadowed by a registered schema.

mod global;

pub use global::{GlobalConfig, OutputFormat};

use crate::core::FormgateError;
use crate::schema::FormSchema;
use crate::schema::builtin::{BUILTIN_FORMS, builtin};
use anyhow::Result;
use std::path::{Path, PathBuf};

/// Where a form definition comes from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FormSource {
    /// Compiled into the binary
    Builtin,
    /// Registered in the global configuration
    Registered(PathBuf),
    /// Given directly as a file path
    File(PathBuf),
}

/// One entry of [`available_forms`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FormEntry {
    /// Name used to reference the form
    pub name: String,
    /// Where it is defined
    pub source: FormSource,
}

/// Every form that can be referenced by name: built-ins first, then registered schemas.
#[must_use]
pub fn available_forms(config: &GlobalConfig) -> Vec<FormEntry> {
    let builtins = BUILTIN_FORMS.iter().map(|(name, _)| FormEntry {
        name: (*name).to_string(),
        source: FormSource::Builtin,
    });
    let registered = config
        .schema_paths()
        .filter(|(name, _)| builtin(name).is_none())
        .map(|(name, path)| FormEntry {
            name: name.to_string(),
            source: FormSource::Registered(path),
        });
    builtins.chain(registered).collect()
}

/// Decide where `reference` points without loading anything.
///
/// # Errors
///
/// [`FormgateError::FormNotFound`] if `reference` is neither a known name nor a
/// schema file path.
pub fn locate_form(reference: &str, config: &GlobalConfig) -> Result<FormSource> {
    if builtin(reference).is_some() {
        return Ok(FormSource::Builtin);
    }
    if let Some(path) = config.schema_path(reference) {
        return Ok(FormSource::Registered(path));
    }
    let path = Path::new(reference);
    if path.extension().is_some_and(|ext| ext == "toml") || path.is_file() {
        return Ok(FormSource::File(path.to_path_buf()));
    }
    Err(FormgateError::FormNotFound {
        name: reference.to_string(),
    }
    .into())
}

/// Resolve and load the schema `reference` points to.
///
/// # Errors
///
/// Fails if the reference cannot be located, or the schema file cannot be read
/// or is rejected by the schema checks.
pub async fn resolve_form(reference: &str, config: &GlobalConfig) -> Result<FormSchema> {
    match locate_form(reference, config)? {
        FormSource::Builtin => match builtin(reference) {
            Some(schema) => Ok(schema?),
            None => Err(FormgateError::FormNotFound {
                name: reference.to_string(),
            }
            .into()),
        },
        FormSource::Registered(path) | FormSource::File(path) => FormSchema::load(&path).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const TINY: &str = "name = \"tiny\"\n[[fields]]\nname = \"note\"\nrules = [\"required\"]\n";

    #[tokio::test]
    async fn test_builtin_names_resolve_first() {
        let config = GlobalConfig::default();
        let schema = resolve_form("job", &config).await.unwrap();
        assert_eq!(schema.title(), "Job Application Form");
        assert_eq!(locate_form("event", &config).unwrap(), FormSource::Builtin);
    }

    #[tokio::test]
    async fn test_registered_and_file_forms() {
        let temp = tempdir().unwrap();
        std::fs::write(temp.path().join("tiny.toml"), TINY).unwrap();
        let config_path = temp.path().join("config.toml");
        std::fs::write(&config_path, "[schemas]\ntiny = \"tiny.toml\"\njob = \"tiny.toml\"\n")
            .unwrap();
        let config = GlobalConfig::load_from(&config_path).await.unwrap();

        assert_eq!(resolve_form("tiny", &config).await.unwrap().name(), "tiny");
        assert_eq!(resolve_form("job", &config).await.unwrap().name(), "job");

        let direct = temp.path().join("tiny.toml");
        let schema = resolve_form(direct.to_str().unwrap(), &GlobalConfig::default()).await.unwrap();
        assert_eq!(schema.fields().len(), 1);

        let names: Vec<String> = available_forms(&config).into_iter().map(|e| e.name).collect();
        assert_eq!(names, vec!["event", "job", "tiny"]);
    }

    #[test]
    fn test_unknown_reference() {
        let err = locate_form("survey", &GlobalConfig::default()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<FormgateError>(),
            Some(FormgateError::FormNotFound { name }) if name == "survey"
        ));
    }
}
