//! `formgate schema`: list forms and describe one.

use crate::config::{FormSource, GlobalConfig, OutputFormat, available_forms, resolve_form};
use crate::schema::FormSchema;
use anyhow::Result;
use clap::Subcommand;
use colored::Colorize;
use serde::Serialize;

/// Schema subcommands.
#[derive(Subcommand, Debug)]
pub enum SchemaCommand {
    /// List built-in and registered forms
    List {
        /// Output format
        #[arg(long, value_enum)]
        format: Option<OutputFormat>,
    },

    /// Describe the fields, conditions and rules of a form
    Show {
        /// Form name or schema file path
        form: String,

        /// Output format
        #[arg(long, value_enum)]
        format: Option<OutputFormat>,
    },
}

/// One field of [`FormDescription`].
#[derive(Debug, Serialize)]
pub struct FieldDescription {
    /// Field name
    pub name: String,
    /// Label
    pub label: String,
    /// Widget kind
    pub kind: String,
    /// Choices, for select fields
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
    /// Initial value, rendered as text
    pub default: String,
    /// Visibility condition, if the field is conditional
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visible_when: Option<String>,
    /// `(rule, message)` pairs in evaluation order
    pub rules: Vec<RuleDescription>,
}

/// One rule of a [`FieldDescription`].
#[derive(Debug, Serialize)]
pub struct RuleDescription {
    /// Rule kind
    pub rule: String,
    /// Message reported when it fails
    pub message: String,
}

/// Printable summary of a [`FormSchema`].
#[derive(Debug, Serialize)]
pub struct FormDescription {
    /// Form name
    pub name: String,
    /// Display title
    pub title: String,
    /// Fields in declaration order
    pub fields: Vec<FieldDescription>,
}

impl From<&FormSchema> for FormDescription {
    fn from(schema: &FormSchema) -> Self {
        let fields = schema
            .fields()
            .iter()
            .map(|field| FieldDescription {
                name: field.name.clone(),
                label: field.label.clone(),
                kind: field.kind.to_string(),
                options: field.options.clone(),
                default: field.initial_value().to_string(),
                visible_when: field.visible_when.as_ref().map(ToString::to_string),
                rules: field
                    .rules
                    .iter()
                    .map(|check| RuleDescription {
                        rule: check.rule.kind().to_string(),
                        message: check.message.clone(),
                    })
                    .collect(),
            })
            .collect();

        Self {
            name: schema.name().to_string(),
            title: schema.title().to_string(),
            fields,
        }
    }
}

#[derive(Serialize)]
struct ListEntry {
    name: String,
    source: String,
}

impl SchemaCommand {
    /// Run the subcommand.
    ///
    /// # Errors
    ///
    /// `show` fails if the form cannot be resolved or its schema is invalid.
    pub async fn execute(self, config: &GlobalConfig) -> Result<()> {
        match self {
            Self::List {
                format,
            } => list(config, format.unwrap_or(config.format)),
            Self::Show {
                form,
                format,
            } => {
                let schema = resolve_form(&form, config).await?;
                show(&FormDescription::from(&schema), format.unwrap_or(config.format))
            }
        }
    }
}

fn list(config: &GlobalConfig, format: OutputFormat) -> Result<()> {
    let entries: Vec<ListEntry> = available_forms(config)
        .into_iter()
        .map(|entry| ListEntry {
            name: entry.name,
            source: match entry.source {
                FormSource::Builtin => "built-in".to_string(),
                FormSource::Registered(path) | FormSource::File(path) => {
                    path.display().to_string()
                }
            },
        })
        .collect();

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&entries)?),
        OutputFormat::Text => {
            for entry in &entries {
                println!("{:<16} {}", entry.name.bold(), entry.source.dimmed());
            }
        }
    }
    Ok(())
}

fn show(description: &FormDescription, format: OutputFormat) -> Result<()> {
    if format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(description)?);
        return Ok(());
    }

    println!("{} ({})", description.title.bold(), description.name);
    for field in &description.fields {
        println!();
        println!("  {} [{}] {}", field.name.cyan(), field.kind, field.label);
        if !field.options.is_empty() {
            println!("    options: {}", field.options.join(", "));
        }
        if !field.default.is_empty() {
            println!("    default: {}", field.default);
        }
        if let Some(condition) = &field.visible_when {
            println!("    active when: {condition}");
        }
        for rule in &field.rules {
            println!("    {} {} → \"{}\"", "•".dimmed(), rule.rule, rule.message);
        }
    }
    Ok(())
}
