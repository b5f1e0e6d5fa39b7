//! Validation rules and rule chains.
//!
//! A rule chain is an ordered list of [`RuleCheck`]s - a [`Rule`] paired with the
//! message reported when it fails. The validation engine walks the chain and
//! stops at the first failure, so chains are data rather than nested conditionals.

use crate::store::FieldValue;
use crate::validation::checks;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a rule as written in schema files.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RuleKind {
    /// Value must be filled in
    Required,
    /// Value must look like `local@domain.tld`
    Email,
    /// Value must parse as a number greater than zero
    PositiveNumber,
    /// Value must consist of ASCII digits only
    Digits,
    /// Value must be an `http(s)://` URL
    Url,
    /// At least one option must be selected
    NonEmptySet,
    /// Value must parse as a calendar date-time
    DateTime,
    /// Value must match a caller-supplied regular expression
    Pattern,
    /// Value must be one of a fixed list of options
    OneOf,
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Required => "required",
            Self::Email => "email",
            Self::PositiveNumber => "positive-number",
            Self::Digits => "digits",
            Self::Url => "url",
            Self::NonEmptySet => "non-empty-set",
            Self::DateTime => "date-time",
            Self::Pattern => "pattern",
            Self::OneOf => "one-of",
        };
        f.write_str(name)
    }
}

/// One validation check.
#[derive(Clone, Debug)]
pub enum Rule {
    /// Non-empty text, checked flag or non-empty set
    Required,
    /// Basic `local@domain.tld` shape
    Email,
    /// Parses as a number and is `> 0`
    PositiveNumber,
    /// Digits only, non-empty
    Digits,
    /// `http://` or `https://` followed by a host and optional path
    Url,
    /// At least one element selected
    NonEmptySet,
    /// Parses as a calendar date-time
    DateTime,
    /// Matches the given expression
    Pattern(Regex),
    /// Equals one of the listed options
    OneOf(Vec<String>),
}

impl Rule {
    /// Compile a [`Rule::Pattern`].
    ///
    /// # Errors
    ///
    /// Returns the regex compiler error when `pattern` is not a valid expression.
    pub fn pattern(pattern: &str) -> Result<Self, regex::Error> {
        Regex::new(pattern).map(Self::Pattern)
    }

    /// The kind identifier of this rule.
    #[must_use]
    pub const fn kind(&self) -> RuleKind {
        match self {
            Self::Required => RuleKind::Required,
            Self::Email => RuleKind::Email,
            Self::PositiveNumber => RuleKind::PositiveNumber,
            Self::Digits => RuleKind::Digits,
            Self::Url => RuleKind::Url,
            Self::NonEmptySet => RuleKind::NonEmptySet,
            Self::DateTime => RuleKind::DateTime,
            Self::Pattern(_) => RuleKind::Pattern,
            Self::OneOf(_) => RuleKind::OneOf,
        }
    }

    /// Whether `value` satisfies this rule.
    #[must_use]
    pub fn passes(&self, value: &FieldValue) -> bool {
        match self {
            Self::Required => !value.is_blank(),
            Self::NonEmptySet => !value.is_blank(),
            Self::Email => with_text(value, checks::is_email),
            Self::PositiveNumber => with_text(value, checks::is_positive_number),
            Self::Digits => with_text(value, checks::is_digits),
            Self::Url => with_text(value, checks::is_http_url),
            Self::DateTime => with_text(value, checks::is_date_time),
            Self::Pattern(regex) => with_text(value, |text| regex.is_match(text)),
            Self::OneOf(options) => with_text(value, |text| options.iter().any(|o| o == text)),
        }
    }

    /// Message used when no override is given, phrased from the field label.
    #[must_use]
    pub fn default_message(&self, label: &str) -> String {
        match self {
            Self::Required => format!("{label} is required"),
            Self::Email | Self::Url | Self::Pattern(_) | Self::OneOf(_) => {
                format!("{label} is invalid")
            }
            Self::PositiveNumber => format!("{label} must be a number greater than 0"),
            Self::Digits => format!("{label} must be a valid number"),
            Self::NonEmptySet => format!("At least one {} must be selected", label.to_lowercase()),
            Self::DateTime => format!("{label} must be a valid date and time"),
        }
    }
}

// Format rules only apply to text; a flag or a set never matches them.
fn with_text(value: &FieldValue, check: impl Fn(&str) -> bool) -> bool {
    value.as_text().is_some_and(check)
}

/// A rule together with the message reported when it fails.
#[derive(Clone, Debug)]
pub struct RuleCheck {
    /// The check to run
    pub rule: Rule,
    /// Message reported on failure
    pub message: String,
}

impl RuleCheck {
    /// Pair a rule with its failure message.
    pub fn new(rule: Rule, message: impl Into<String>) -> Self {
        Self {
            rule,
            message: message.into(),
        }
    }

    /// Run the check, returning the failure message if it does not pass.
    #[must_use]
    pub fn evaluate(&self, value: &FieldValue) -> Option<&str> {
        if self.rule.passes(value) { None } else { Some(&self.message) }
    }
}
