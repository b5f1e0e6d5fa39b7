//! Validate a values file against a form.
//!
//! The values are fed into a [`FormController`] one field at a time, exactly as
//! an interactive user would enter them, and then submitted once. The command
//! reports the active fields and every error, and fails when the form would
//! have been rejected.
//!
//! # Values Files
//!
//! TOML or JSON (chosen by extension), one key per field:
//!
//! ```toml
//! fullName = "Grace Hopper"
//! email = "grace@example.com"
//! phoneNumber = "5551234"
//! position = "Designer"
//! relevantExperience = 7
//! portfolioUrl = "https://grace.dev"
//! additionalSkills = ["CSS", "Python"]
//! preferredInterviewTime = "2024-05-01T14:30"
//! ```
//!
//! Keys the form does not declare are reported as warnings, or as errors with
//! `--strict`.

use crate::config::{GlobalConfig, OutputFormat, resolve_form};
use crate::controller::{FormController, Submission, SubmitOutcome};
use crate::core::FormgateError;
use crate::schema::FormSchema;
use crate::store::FieldValue;
use crate::validation::ErrorMap;
use crate::visibility::ActiveFields;
use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::warn;

/// Arguments of `formgate check`.
#[derive(Args, Debug)]
pub struct CheckCommand {
    /// Values file (`.toml` or `.json`)
    #[arg(value_name = "VALUES")]
    pub values: PathBuf,

    /// Form name or schema file path
    #[arg(short, long)]
    pub form: String,

    /// Output format; defaults to the configured format
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Treat unknown keys in the values file as errors
    #[arg(long)]
    pub strict: bool,
}

/// Result of a check, as printed with `--format json`.
///
/// ```json
/// {
///   "valid": false,
///   "form": "event",
///   "active_fields": ["age", "attendingWithGuest", "email", "name"],
///   "errors": { "name": "Name is required" },
///   "warnings": []
/// }
/// ```
#[derive(Debug, Serialize)]
pub struct CheckReport {
    /// Whether the form would be accepted
    pub valid: bool,
    /// Form name
    pub form: String,
    /// Fields active after applying the values
    pub active_fields: ActiveFields,
    /// Field errors
    pub errors: ErrorMap,
    /// Non-fatal problems such as unknown keys
    pub warnings: Vec<String>,
}

impl CheckCommand {
    /// Run the check.
    ///
    /// # Errors
    ///
    /// Fails if the form or values cannot be loaded, if any field is invalid,
    /// or if `--strict` is set and there are warnings.
    pub async fn execute(self, config: &GlobalConfig) -> Result<()> {
        let format = self.format.unwrap_or(config.format);
        let schema = Arc::new(resolve_form(&self.form, config).await?);
        let values = load_values(&self.values).await?;

        let report = run_check(schema, config, values);
        let strict_failure = self.strict && !report.warnings.is_empty();

        match format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(&report)?);
            }
            OutputFormat::Text => print_report(&report, self.strict),
        }

        if strict_failure {
            return Err(anyhow::anyhow!(
                "Strict mode: {} unknown key(s) in {}",
                report.warnings.len(),
                self.values.display()
            ));
        }
        if !report.valid {
            return Err(anyhow::anyhow!(
                "Form '{}' is invalid: {} field(s) failed validation",
                report.form,
                report.errors.len()
            ));
        }
        Ok(())
    }
}

/// Apply `values` to a fresh controller, submit once and summarize the outcome.
#[must_use]
pub fn run_check(
    schema: Arc<FormSchema>,
    config: &GlobalConfig,
    values: BTreeMap<String, FieldValue>,
) -> CheckReport {
    let mut form = FormController::with_policy(schema, config.error_policy);
    let mut warnings = Vec::new();

    for (name, value) in values {
        if let Err(e) = form.change(&name, value) {
            let message = match &e {
                FormgateError::UnknownField {
                    suggestion: Some(candidate),
                    ..
                } => format!("Unknown field '{name}' ignored (did you mean '{candidate}'?)"),
                _ => format!("Unknown field '{name}' ignored"),
            };
            warn!("{message}");
            warnings.push(message);
        }
    }

    let outcome = form.submit(&mut |_: &Submission| {});
    let errors = match outcome {
        SubmitOutcome::Accepted => ErrorMap::default(),
        SubmitOutcome::Rejected(errors) => errors,
    };

    CheckReport {
        valid: errors.is_empty(),
        form: form.schema().name().to_string(),
        active_fields: form.active_fields().clone(),
        errors,
        warnings,
    }
}

/// Read a values file: JSON for `.json`, TOML otherwise.
///
/// # Errors
///
/// Fails if the file cannot be read, or with [`FormgateError::ValuesParseError`]
/// if it is not a flat table of strings, numbers, booleans and string arrays.
pub async fn load_values(path: &Path) -> Result<BTreeMap<String, FieldValue>> {
    let content = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read values file {}", path.display()))?;

    let is_json = path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    let parsed: std::result::Result<BTreeMap<String, FieldValue>, String> = if is_json {
        serde_json::from_str(&content).map_err(|e| e.to_string())
    } else {
        toml::from_str(&content).map_err(|e| e.to_string())
    };

    parsed.map_err(|reason| {
        FormgateError::ValuesParseError {
            file: path.display().to_string(),
            reason,
        }
        .into()
    })
}

fn print_report(report: &CheckReport, strict: bool) {
    for warning in &report.warnings {
        if strict {
            println!("{} {warning}", "✗".red());
        } else {
            println!("{} {warning}", "⚠".yellow());
        }
    }

    if report.valid {
        println!(
            "{} Form '{}' is valid ({} active fields)",
            "✓".green(),
            report.form,
            report.active_fields.len()
        );
        return;
    }

    println!("{} Form '{}' has {} error(s):", "✗".red(), report.form, report.errors.len());
    for (field, message) in report.errors.iter() {
        println!("  {} {}", format!("{field}:").bold(), message);
    }
}
