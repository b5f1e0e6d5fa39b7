//! Visibility conditions.
//!
//! A conditional field is active only while its [`Condition`] holds. Every
//! condition reads exactly one controlling field; there is no multi-hop
//! evaluation.

use crate::store::FieldValue;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Operator names accepted in schema files.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConditionalOperator {
    /// Controlling value equals the given text
    Equals,
    /// Controlling value differs from the given text
    NotEquals,
    /// Controlling value is one of the given texts
    OneOf,
    /// Controlling text contains, or controlling set includes, the given text
    Contains,
    /// Controlling value is blank
    IsEmpty,
    /// Controlling value is not blank
    IsNotEmpty,
}

/// Predicate over the controlling field's value.
#[derive(Clone)]
pub enum Predicate {
    /// Text equality
    Equals(String),
    /// Text inequality
    NotEquals(String),
    /// Membership in a list of texts
    OneOf(Vec<String>),
    /// Substring of text or member of a set
    Contains(String),
    /// Blank value
    IsEmpty,
    /// Non-blank value
    IsNotEmpty,
    /// Arbitrary caller-supplied predicate
    Custom(Arc<dyn Fn(&FieldValue) -> bool + Send + Sync>),
}

impl Predicate {
    /// Wrap a closure as a predicate.
    pub fn custom<F>(predicate: F) -> Self
    where
        F: Fn(&FieldValue) -> bool + Send + Sync + 'static,
    {
        Self::Custom(Arc::new(predicate))
    }

    /// Evaluate against the controlling field's current value.
    #[must_use]
    pub fn matches(&self, value: &FieldValue) -> bool {
        match self {
            Self::Equals(expected) => scalar_text(value).is_some_and(|text| text == *expected),
            Self::NotEquals(expected) => scalar_text(value).is_none_or(|text| text != *expected),
            Self::OneOf(options) => {
                scalar_text(value).is_some_and(|text| options.iter().any(|o| *o == text))
            }
            Self::Contains(needle) => match value {
                FieldValue::Set(options) => options.contains(needle),
                FieldValue::Text(text) => text.contains(needle.as_str()),
                FieldValue::Flag(_) => false,
            },
            Self::IsEmpty => value.is_blank(),
            Self::IsNotEmpty => !value.is_blank(),
            Self::Custom(predicate) => predicate(value),
        }
    }
}

// Flags compare as "true"/"false" so checkbox fields can control visibility.
fn scalar_text(value: &FieldValue) -> Option<String> {
    match value {
        FieldValue::Text(text) => Some(text.clone()),
        FieldValue::Flag(flag) => Some(flag.to_string()),
        FieldValue::Set(_) => None,
    }
}

impl fmt::Debug for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Equals(v) => f.debug_tuple("Equals").field(v).finish(),
            Self::NotEquals(v) => f.debug_tuple("NotEquals").field(v).finish(),
            Self::OneOf(v) => f.debug_tuple("OneOf").field(v).finish(),
            Self::Contains(v) => f.debug_tuple("Contains").field(v).finish(),
            Self::IsEmpty => f.write_str("IsEmpty"),
            Self::IsNotEmpty => f.write_str("IsNotEmpty"),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Equals(v) => write!(f, "== \"{v}\""),
            Self::NotEquals(v) => write!(f, "!= \"{v}\""),
            Self::OneOf(v) => write!(f, "in [{}]", v.join(", ")),
            Self::Contains(v) => write!(f, "contains \"{v}\""),
            Self::IsEmpty => f.write_str("is empty"),
            Self::IsNotEmpty => f.write_str("is not empty"),
            Self::Custom(_) => f.write_str("matches custom predicate"),
        }
    }
}

/// Visibility condition of one field: a predicate over one controlling field.
#[derive(Clone, Debug)]
pub struct Condition {
    /// Name of the controlling field
    pub controller: String,
    /// Predicate over the controlling field's value
    pub predicate: Predicate,
}

impl Condition {
    /// Condition on `controller` satisfying `predicate`.
    pub fn new(controller: impl Into<String>, predicate: Predicate) -> Self {
        Self {
            controller: controller.into(),
            predicate,
        }
    }

    /// `controller == value`
    pub fn equals(controller: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(controller, Predicate::Equals(value.into()))
    }

    /// `controller ∈ values`
    pub fn one_of<I, S>(controller: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(controller, Predicate::OneOf(values.into_iter().map(Into::into).collect()))
    }

    /// Arbitrary predicate over the controlling value.
    pub fn custom<F>(controller: impl Into<String>, predicate: F) -> Self
    where
        F: Fn(&FieldValue) -> bool + Send + Sync + 'static,
    {
        Self::new(controller, Predicate::custom(predicate))
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.controller, self.predicate)
    }
}
