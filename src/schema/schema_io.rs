//! Loading schemas from TOML files.
//!
//! ```toml
//! name = "newsletter"
//! title = "Newsletter Signup"
//!
//! [[fields]]
//! name = "email"
//! label = "Email"
//! kind = "email"
//! rules = ["required", "email"]
//!
//! [[fields]]
//! name = "plan"
//! label = "Plan"
//! kind = "select"
//! options = ["free", "business"]
//!
//! [[fields]]
//! name = "company"
//! label = "Company"
//! kind = "text"
//! when = { field = "plan", operator = "equals", value = "business" }
//! rules = [{ rule = "required", message = "Company is needed for business plans" }]
//! ```
//!
//! A parsed [`SchemaFile`] goes through [`FormSchema::builder`], so files get the
//! same fail-fast checks as schemas written in Rust.

use super::{Condition, ConditionalOperator, FieldKind, FieldSpec, FormSchema, Predicate, Rule, RuleKind};
use crate::core::{FormgateError, Result};
use crate::store::FieldValue;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Top-level shape of a schema file.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SchemaFile {
    /// Machine name of the form
    pub name: String,
    /// Display title; defaults to the name
    #[serde(default)]
    pub title: Option<String>,
    /// Field declarations in display order
    #[serde(default)]
    pub fields: Vec<FieldDef>,
}

/// One `[[fields]]` entry.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FieldDef {
    /// Field name
    pub name: String,
    /// Label; defaults to the name
    #[serde(default)]
    pub label: Option<String>,
    /// Widget kind
    #[serde(default = "default_kind")]
    pub kind: FieldKind,
    /// Choices for select and multi-select fields
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
    /// Explicit default value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<FieldValue>,
    /// Visibility condition
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub when: Option<WhenDef>,
    /// Rule chain
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rules: Vec<RuleDef>,
}

const fn default_kind() -> FieldKind {
    FieldKind::Text
}

/// `when = { field, operator, value }`
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WhenDef {
    /// Controlling field
    pub field: String,
    /// Comparison operator
    pub operator: ConditionalOperator,
    /// Operand; omitted for `is-empty` and `is-not-empty`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Operand>,
}

/// A single text or a list of texts.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Operand {
    /// One text
    One(String),
    /// Several texts
    Many(Vec<String>),
}

/// A rule entry: either a bare kind or a table with overrides.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RuleDef {
    /// `"required"`
    Kind(RuleKind),
    /// `{ rule = "pattern", pattern = "^\\d{5}$", message = "..." }`
    Detailed {
        /// Rule kind
        rule: RuleKind,
        /// Message override
        #[serde(default, skip_serializing_if = "Option::is_none")]
        message: Option<String>,
        /// Expression for `pattern`
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pattern: Option<String>,
        /// Options for `one-of`
        #[serde(default, skip_serializing_if = "Option::is_none")]
        options: Option<Vec<String>>,
    },
}

impl FormSchema {
    /// Parse and check a schema from TOML text.
    ///
    /// `origin` names the source in error messages (usually the file path).
    ///
    /// # Errors
    ///
    /// [`FormgateError::SchemaParseError`] for malformed TOML, otherwise any error
    /// [`SchemaBuilder::build`](super::SchemaBuilder::build) reports.
    pub fn from_toml_str(content: &str, origin: &str) -> Result<Self> {
        let file: SchemaFile =
            toml::from_str(content).map_err(|e| FormgateError::SchemaParseError {
                file: origin.to_string(),
                reason: e.to_string(),
            })?;
        file.into_schema()
    }

    /// Read, parse and check a schema file.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be read or [`Self::from_toml_str`] rejects it.
    pub async fn load(path: &Path) -> anyhow::Result<Self> {
        let content = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read schema file {}", path.display()))?;
        let schema = Self::from_toml_str(&content, &path.display().to_string())?;
        tracing::debug!(form = %schema.name(), path = %path.display(), "loaded schema file");
        Ok(schema)
    }
}

impl SchemaFile {
    /// Convert into a checked [`FormSchema`].
    ///
    /// # Errors
    ///
    /// Rejects incomplete rule or condition entries and anything the schema
    /// builder rejects.
    pub fn into_schema(self) -> Result<FormSchema> {
        let title = self.title.unwrap_or_else(|| self.name.clone());
        let mut builder = FormSchema::builder(self.name.clone(), title);
        for def in self.fields {
            builder = builder.field(def.into_spec(&self.name)?);
        }
        builder.build()
    }
}

impl FieldDef {
    fn into_spec(self, form: &str) -> Result<FieldSpec> {
        let label = self.label.unwrap_or_else(|| self.name.clone());
        let mut spec = FieldSpec::new(self.name.clone(), label, self.kind).options(self.options);
        spec.default = self.default;

        if let Some(when) = self.when {
            spec.visible_when = Some(when.into_condition(form, &self.name)?);
        }

        for def in self.rules {
            let (rule, message) = def.into_rule(form, &self.name)?;
            spec = match message {
                Some(message) => spec.rule_with_message(rule, message),
                None => spec.rule(rule),
            };
        }
        Ok(spec)
    }
}

impl WhenDef {
    fn into_condition(self, form: &str, field: &str) -> Result<Condition> {
        let invalid = |reason: &str| FormgateError::SchemaInvalid {
            form: form.to_string(),
            reason: format!("condition on field '{field}' {reason}"),
        };

        let predicate = match (self.operator, self.value) {
            (ConditionalOperator::IsEmpty, None) => Predicate::IsEmpty,
            (ConditionalOperator::IsNotEmpty, None) => Predicate::IsNotEmpty,
            (ConditionalOperator::IsEmpty | ConditionalOperator::IsNotEmpty, Some(_)) => {
                return Err(invalid("takes no value"));
            }
            (_, None) => return Err(invalid("needs a value")),
            (ConditionalOperator::OneOf, Some(Operand::Many(values))) => Predicate::OneOf(values),
            (ConditionalOperator::OneOf, Some(Operand::One(value))) => {
                Predicate::OneOf(vec![value])
            }
            (_, Some(Operand::Many(_))) => return Err(invalid("takes a single value")),
            (ConditionalOperator::Equals, Some(Operand::One(value))) => Predicate::Equals(value),
            (ConditionalOperator::NotEquals, Some(Operand::One(value))) => {
                Predicate::NotEquals(value)
            }
            (ConditionalOperator::Contains, Some(Operand::One(value))) => {
                Predicate::Contains(value)
            }
        };

        Ok(Condition::new(self.field, predicate))
    }
}

impl RuleDef {
    fn into_rule(self, form: &str, field: &str) -> Result<(Rule, Option<String>)> {
        let (kind, message, pattern, options) = match self {
            Self::Kind(kind) => (kind, None, None, None),
            Self::Detailed {
                rule,
                message,
                pattern,
                options,
            } => (rule, message, pattern, options),
        };

        let invalid = |reason: String| FormgateError::SchemaInvalid {
            form: form.to_string(),
            reason,
        };
        if pattern.is_some() && kind != RuleKind::Pattern {
            return Err(invalid(format!(
                "{kind} rule on field '{field}' does not take a 'pattern'"
            )));
        }
        if options.is_some() && kind != RuleKind::OneOf {
            return Err(invalid(format!(
                "{kind} rule on field '{field}' does not take 'options'"
            )));
        }

        let rule = match kind {
            RuleKind::Required => Rule::Required,
            RuleKind::Email => Rule::Email,
            RuleKind::PositiveNumber => Rule::PositiveNumber,
            RuleKind::Digits => Rule::Digits,
            RuleKind::Url => Rule::Url,
            RuleKind::NonEmptySet => Rule::NonEmptySet,
            RuleKind::DateTime => Rule::DateTime,
            RuleKind::Pattern => {
                let Some(pattern) = pattern else {
                    return Err(invalid(format!(
                        "pattern rule on field '{field}' needs a 'pattern'"
                    )));
                };
                Rule::pattern(&pattern).map_err(|e| FormgateError::InvalidPattern {
                    field: field.to_string(),
                    pattern: pattern.clone(),
                    reason: e.to_string(),
                })?
            }
            RuleKind::OneOf => Rule::OneOf(options.unwrap_or_default()),
        };

        Ok((rule, message))
    }
}
