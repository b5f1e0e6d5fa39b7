//! Form schemas: the declarative description of one form.
//!
//! A [`FormSchema`] lists every field with its kind, label, default value,
//! optional visibility [`Condition`] and rule chain. Schemas are plain data
//! consumed by one generic engine ([`crate::visibility`] and
//! [`crate::validation`]); the event registration and job application forms
//! are two instances in [`builtin`].
//!
//! Schemas are checked when built. A schema that references an undeclared
//! field, repeats a name, or carries a default that contradicts its field kind
//! is rejected by [`SchemaBuilder::build`] and never reaches validation.
//!
//! # Example
//!
//! ```rust,no_run
//! use formgate_cli::schema::{Condition, FieldSpec, FormSchema, Rule};
//!
//! # fn example() -> formgate_cli::core::Result<()> {
//! let schema = FormSchema::builder("rsvp", "RSVP")
//!     .field(FieldSpec::text("name", "Name").required())
//!     .field(FieldSpec::select("plusOne", "Bringing a guest?", ["no", "yes"]))
//!     .field(
//!         FieldSpec::text("guest", "Guest")
//!             .required()
//!             .visible_when(Condition::equals("plusOne", "yes")),
//!     )
//!     .field(FieldSpec::email("email", "Email").required().rule(Rule::Email))
//!     .build()?;
//! assert_eq!(schema.fields().len(), 4);
//! # Ok(())
//! # }
//! ```

pub mod builtin;
pub mod condition;
pub mod rule;
mod schema_io;


pub use condition::{Condition, ConditionalOperator, Predicate};
pub use rule::{Rule, RuleCheck, RuleKind};
pub use schema_io::{FieldDef, Operand, RuleDef, SchemaFile, WhenDef};

use crate::core::{FormgateError, Result, closest_match};
use crate::store::{FieldValue, FormState};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;

/// Input widget category of a field.
///
/// The kind decides the shape of the default value and whether `toggle` is
/// allowed; it does not imply any validation rule.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FieldKind {
    /// Single-line text
    Text,
    /// E-mail address input
    Email,
    /// Numeric input (stored as text)
    Number,
    /// Telephone input
    Phone,
    /// URL input
    Url,
    /// Single choice from `options`
    Select,
    /// Boolean checkbox
    Checkbox,
    /// Any number of choices from `options`
    MultiSelect,
    /// Date and time input (stored as text)
    DateTime,
}

impl FieldKind {
    /// Whether fields of this kind must declare `options`.
    #[must_use]
    pub const fn has_options(self) -> bool {
        matches!(self, Self::Select | Self::MultiSelect)
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Text => "text",
            Self::Email => "email",
            Self::Number => "number",
            Self::Phone => "phone",
            Self::Url => "url",
            Self::Select => "select",
            Self::Checkbox => "checkbox",
            Self::MultiSelect => "multi-select",
            Self::DateTime => "date-time",
        };
        f.write_str(name)
    }
}

/// Declaration of one field.
#[derive(Clone, Debug)]
pub struct FieldSpec {
    /// Unique field name
    pub name: String,
    /// Human-readable label, used in default messages
    pub label: String,
    /// Widget kind
    pub kind: FieldKind,
    /// Choices for select and multi-select fields
    pub options: Vec<String>,
    /// Explicit default; `None` means the kind's natural default
    pub default: Option<FieldValue>,
    /// Visibility condition; `None` means always active
    pub visible_when: Option<Condition>,
    /// Ordered rule chain, first failure wins
    pub rules: Vec<RuleCheck>,
}

impl FieldSpec {
    /// A field of `kind` with no options, default, condition or rules.
    pub fn new(name: impl Into<String>, label: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            kind,
            options: Vec::new(),
            default: None,
            visible_when: None,
            rules: Vec::new(),
        }
    }

    /// Text field.
    pub fn text(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(name, label, FieldKind::Text)
    }

    /// E-mail field.
    pub fn email(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(name, label, FieldKind::Email)
    }

    /// Number field.
    pub fn number(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(name, label, FieldKind::Number)
    }

    /// Phone field.
    pub fn phone(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(name, label, FieldKind::Phone)
    }

    /// URL field.
    pub fn url(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(name, label, FieldKind::Url)
    }

    /// Date-time field.
    pub fn date_time(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(name, label, FieldKind::DateTime)
    }

    /// Checkbox field.
    pub fn checkbox(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(name, label, FieldKind::Checkbox)
    }

    /// Single-choice field; defaults to the first option.
    pub fn select<I, S>(name: impl Into<String>, label: impl Into<String>, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(name, label, FieldKind::Select).options(options)
    }

    /// Multi-choice field; defaults to no selection.
    pub fn multi_select<I, S>(name: impl Into<String>, label: impl Into<String>, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(name, label, FieldKind::MultiSelect).options(options)
    }

    /// Replace the option list.
    #[must_use]
    pub fn options<I, S>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options = options.into_iter().map(Into::into).collect();
        self
    }

    /// Set an explicit default value.
    #[must_use]
    pub fn default_value(mut self, value: impl Into<FieldValue>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// Make the field conditional.
    #[must_use]
    pub fn visible_when(mut self, condition: Condition) -> Self {
        self.visible_when = Some(condition);
        self
    }

    /// Append `required` with the default message.
    #[must_use]
    pub fn required(self) -> Self {
        self.rule(Rule::Required)
    }

    /// Append a rule with its default message.
    #[must_use]
    pub fn rule(mut self, rule: Rule) -> Self {
        let message = rule.default_message(&self.label);
        self.rules.push(RuleCheck::new(rule, message));
        self
    }

    /// Append a rule with a custom message.
    #[must_use]
    pub fn rule_with_message(mut self, rule: Rule, message: impl Into<String>) -> Self {
        self.rules.push(RuleCheck::new(rule, message));
        self
    }

    /// Whether the field carries a `required` rule.
    #[must_use]
    pub fn is_required(&self) -> bool {
        self.rules.iter().any(|check| matches!(check.rule, Rule::Required))
    }

    /// The value the field starts with.
    #[must_use]
    pub fn initial_value(&self) -> FieldValue {
        if let Some(default) = &self.default {
            return default.clone();
        }
        match self.kind {
            FieldKind::Checkbox => FieldValue::Flag(false),
            FieldKind::MultiSelect => FieldValue::empty_set(),
            FieldKind::Select => {
                self.options.first().cloned().map_or_else(FieldValue::empty_text, FieldValue::Text)
            }
            _ => FieldValue::empty_text(),
        }
    }
}

/// A complete, consistency-checked form description.
#[derive(Clone, Debug)]
pub struct FormSchema {
    name: String,
    title: String,
    fields: Vec<FieldSpec>,
    index: HashMap<String, usize>,
}

impl FormSchema {
    /// Start building a schema.
    pub fn builder(name: impl Into<String>, title: impl Into<String>) -> SchemaBuilder {
        SchemaBuilder {
            name: name.into(),
            title: title.into(),
            fields: Vec::new(),
        }
    }

    /// Machine name of the form (`event`, `job`, ...).
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Display title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Fields in declaration order.
    #[must_use]
    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    /// Look up one field.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.index.get(name).map(|&i| &self.fields[i])
    }

    /// Whether `name` is declared.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Field names in declaration order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|field| field.name.as_str())
    }

    /// A fresh state holding every field's initial value.
    #[must_use]
    pub fn defaults(&self) -> FormState {
        let mut state = FormState::default();
        for field in &self.fields {
            state.insert(field.name.clone(), field.initial_value());
        }
        state
    }

    /// Error for a name outside the schema, with a "did you mean" suggestion.
    #[must_use]
    pub fn unknown_field(&self, name: &str) -> FormgateError {
        FormgateError::UnknownField {
            form: self.name.clone(),
            name: name.to_string(),
            suggestion: closest_match(name, self.field_names()),
        }
    }
}

/// Incremental constructor for [`FormSchema`].
#[derive(Debug)]
pub struct SchemaBuilder {
    name: String,
    title: String,
    fields: Vec<FieldSpec>,
}

impl SchemaBuilder {
    /// Append a field.
    #[must_use]
    pub fn field(mut self, field: FieldSpec) -> Self {
        self.fields.push(field);
        self
    }

    /// Check the schema and freeze it.
    ///
    /// # Errors
    ///
    /// - [`FormgateError::SchemaInvalid`] for an empty form name, a form without
    ///   fields, an empty field name, missing options, a default that contradicts
    ///   the field kind, or a `one-of` rule without options
    /// - [`FormgateError::DuplicateField`] when two fields share a name
    /// - [`FormgateError::ConditionTargetMissing`] when a condition names an
    ///   undeclared field or the field itself
    pub fn build(self) -> Result<FormSchema> {
        let form = self.name.clone();
        let invalid = |reason: String| FormgateError::SchemaInvalid {
            form: form.clone(),
            reason,
        };

        if self.name.trim().is_empty() {
            return Err(invalid("form name must not be empty".to_string()));
        }
        if self.fields.is_empty() {
            return Err(invalid("a form needs at least one field".to_string()));
        }

        let mut index = HashMap::with_capacity(self.fields.len());
        for (i, field) in self.fields.iter().enumerate() {
            if field.name.trim().is_empty() {
                return Err(invalid(format!("field #{} has an empty name", i + 1)));
            }
            if index.insert(field.name.clone(), i).is_some() {
                return Err(FormgateError::DuplicateField {
                    form: form.clone(),
                    field: field.name.clone(),
                });
            }
        }

        for field in &self.fields {
            check_options(field).map_err(&invalid)?;
            check_default(field).map_err(&invalid)?;

            for check in &field.rules {
                if let Rule::OneOf(options) = &check.rule {
                    if options.is_empty() {
                        return Err(invalid(format!(
                            "field '{}' has a one-of rule without options",
                            field.name
                        )));
                    }
                }
            }

            if let Some(condition) = &field.visible_when {
                if condition.controller == field.name || !index.contains_key(&condition.controller)
                {
                    return Err(FormgateError::ConditionTargetMissing {
                        form: form.clone(),
                        field: field.name.clone(),
                        controller: condition.controller.clone(),
                    });
                }
            }
        }

        tracing::debug!(form = %self.name, fields = self.fields.len(), "schema built");

        Ok(FormSchema {
            name: self.name,
            title: self.title,
            fields: self.fields,
            index,
        })
    }
}

fn check_options(field: &FieldSpec) -> std::result::Result<(), String> {
    if field.kind.has_options() {
        if field.options.is_empty() {
            return Err(format!("{} field '{}' declares no options", field.kind, field.name));
        }
        let mut seen = HashSet::new();
        if let Some(dup) = field.options.iter().find(|o| !seen.insert(o.as_str())) {
            return Err(format!("field '{}' lists option '{dup}' twice", field.name));
        }
    } else if !field.options.is_empty() {
        return Err(format!("{} field '{}' cannot declare options", field.kind, field.name));
    }
    Ok(())
}

fn check_default(field: &FieldSpec) -> std::result::Result<(), String> {
    let Some(default) = &field.default else {
        return Ok(());
    };
    let mismatch = || format!("default for {} field '{}' has the wrong shape", field.kind, field.name);
    match (field.kind, default) {
        (FieldKind::Checkbox, FieldValue::Flag(_)) => Ok(()),
        (FieldKind::MultiSelect, FieldValue::Set(chosen)) => {
            match chosen.iter().find(|c| !field.options.contains(c)) {
                Some(stray) => {
                    Err(format!("default '{stray}' of field '{}' is not an option", field.name))
                }
                None => Ok(()),
            }
        }
        (FieldKind::Select, FieldValue::Text(choice)) => {
            if field.options.contains(choice) {
                Ok(())
            } else {
                Err(format!("default '{choice}' of field '{}' is not an option", field.name))
            }
        }
        (FieldKind::Checkbox | FieldKind::MultiSelect | FieldKind::Select, _) => Err(mismatch()),
        (_, FieldValue::Text(_)) => Ok(()),
        _ => Err(mismatch()),
    }
}
