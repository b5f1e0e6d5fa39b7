//! `formgate replay`: drive a form with a script.
//!
//! A script is a plain text file with one step per line:
//!
//! ```text
//! # Designer without a portfolio gets rejected
//! set fullName Grace Hopper
//! set position Designer
//! toggle additionalSkills CSS
//! submit
//! set portfolioUrl https://grace.dev
//! submit
//! reset
//! ```
//!
//! `set <field> <value...>` takes the rest of the line as the value (empty if
//! omitted). A checkbox field accepts `true`/`false`. Blank lines and lines
//! starting with `#` are ignored.

use crate::config::{GlobalConfig, OutputFormat, resolve_form};
use crate::controller::{FormController, Submission, SubmitOutcome};
use crate::core::FormgateError;
use crate::schema::{FieldKind, FormSchema};
use crate::store::FieldValue;
use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;

/// Arguments of `formgate replay`.
#[derive(Args, Debug)]
pub struct ReplayCommand {
    /// Script file
    #[arg(value_name = "SCRIPT")]
    pub script: PathBuf,

    /// Form name or schema file path
    #[arg(short, long)]
    pub form: String,

    /// Output format
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,
}

/// One parsed script line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ScriptStep {
    /// `set <field> <value...>`
    Set {
        /// Target field
        field: String,
        /// Raw value text
        value: String,
    },
    /// `toggle <field> <option>`
    Toggle {
        /// Multi-select field
        field: String,
        /// Option to flip
        option: String,
    },
    /// `submit`
    Submit,
    /// `reset`
    Reset,
}

/// A step with its one-based line number.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScriptLine {
    /// Line in the script file
    pub line: usize,
    /// What to do
    pub step: ScriptStep,
}

/// Parse a whole script.
///
/// # Errors
///
/// [`FormgateError::ScriptError`] for the first line that is not a valid step.
pub fn parse_script(source: &str) -> crate::core::Result<Vec<ScriptLine>> {
    let mut steps = Vec::new();
    for (index, raw) in source.lines().enumerate() {
        let line = index + 1;
        let text = raw.trim();
        if text.is_empty() || text.starts_with('#') {
            continue;
        }

        let error = |reason: &str| FormgateError::ScriptError {
            line,
            reason: reason.to_string(),
        };

        let (command, rest) = split_word(text);
        let step = match command {
            "set" => {
                let (field, value) = split_word(rest);
                if field.is_empty() {
                    return Err(error("'set' needs a field name"));
                }
                ScriptStep::Set {
                    field: field.to_string(),
                    value: value.to_string(),
                }
            }
            "toggle" => {
                let (field, option) = split_word(rest);
                if field.is_empty() || option.is_empty() {
                    return Err(error("'toggle' needs a field name and an option"));
                }
                ScriptStep::Toggle {
                    field: field.to_string(),
                    option: option.to_string(),
                }
            }
            "submit" | "reset" if !rest.is_empty() => {
                return Err(error(&format!("'{command}' takes no arguments")));
            }
            "submit" => ScriptStep::Submit,
            "reset" => ScriptStep::Reset,
            other => return Err(error(&format!("unknown command '{other}'"))),
        };
        steps.push(ScriptLine {
            line,
            step,
        });
    }
    Ok(steps)
}

fn split_word(text: &str) -> (&str, &str) {
    match text.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim_start()),
        None => (text, ""),
    }
}

/// Outcome of one `submit` step.
#[derive(Debug, Serialize)]
pub struct SubmitRecord {
    /// Script line of the submit
    pub line: usize,
    /// Accepted or rejected with errors
    #[serde(flatten)]
    pub outcome: SubmitOutcome,
}

/// Everything a replay produced.
#[derive(Debug, Default, Serialize)]
pub struct ReplayReport {
    /// One entry per `submit`
    pub submits: Vec<SubmitRecord>,
    /// Accepted submissions, in order
    pub submissions: Vec<Submission>,
}

/// Run parsed steps through a fresh controller.
///
/// # Errors
///
/// Fails on the first step that addresses an undeclared field or toggles a
/// field that is not a multi-select; the error names the script line.
pub fn run_script(
    schema: Arc<FormSchema>,
    config: &GlobalConfig,
    steps: &[ScriptLine],
) -> Result<ReplayReport> {
    let mut form = FormController::with_policy(schema, config.error_policy);
    let mut report = ReplayReport::default();

    for ScriptLine {
        line,
        step,
    } in steps
    {
        match step {
            ScriptStep::Set {
                field,
                value,
            } => {
                let value = typed_value(form.schema(), field, value);
                form.change(field, value).with_context(|| format!("Replay script line {line}"))?;
            }
            ScriptStep::Toggle {
                field,
                option,
            } => {
                form.toggle(field, option)
                    .with_context(|| format!("Replay script line {line}"))?;
            }
            ScriptStep::Submit => {
                let mut accepted = |submission: &Submission| {
                    report.submissions.push(submission.clone());
                };
                let outcome = form.submit(&mut accepted);
                report.submits.push(SubmitRecord {
                    line: *line,
                    outcome,
                });
            }
            ScriptStep::Reset => form.reset(),
        }
    }
    Ok(report)
}

fn typed_value(schema: &FormSchema, field: &str, raw: &str) -> FieldValue {
    let is_checkbox = schema.field(field).is_some_and(|spec| spec.kind == FieldKind::Checkbox);
    match raw {
        "true" if is_checkbox => FieldValue::Flag(true),
        "false" if is_checkbox => FieldValue::Flag(false),
        _ => FieldValue::from(raw),
    }
}

impl ReplayCommand {
    /// Run the replay.
    ///
    /// # Errors
    ///
    /// Fails if the form or script cannot be loaded, the script does not parse,
    /// or a step is rejected by the form.
    pub async fn execute(self, config: &GlobalConfig) -> Result<()> {
        let format = self.format.unwrap_or(config.format);
        let schema = Arc::new(resolve_form(&self.form, config).await?);
        let source = tokio::fs::read_to_string(&self.script)
            .await
            .with_context(|| format!("Failed to read replay script {}", self.script.display()))?;
        let steps = parse_script(&source)?;
        tracing::debug!(steps = steps.len(), script = %self.script.display(), "parsed replay script");

        let report = run_script(Arc::clone(&schema), config, &steps)?;

        match format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
            OutputFormat::Text => print_report(&schema, &report),
        }
        Ok(())
    }
}

fn print_report(schema: &FormSchema, report: &ReplayReport) {
    let mut submissions = report.submissions.iter();
    for record in &report.submits {
        match &record.outcome {
            SubmitOutcome::Accepted => {
                println!("{} line {}: accepted", "✓".green(), record.line);
                if let Some(submission) = submissions.next() {
                    for text in submission.summary(schema).lines() {
                        println!("  {text}");
                    }
                }
            }
            SubmitOutcome::Rejected(errors) => {
                println!("{} line {}: rejected", "✗".red(), record.line);
                for (field, message) in errors.iter() {
                    println!("  {} {}", format!("{field}:").bold(), message);
                }
            }
        }
    }
    if report.submits.is_empty() {
        println!("{} script contains no submit", "⚠".yellow());
    }
}
