//! Field values and the complete form state.
//!
//! Values are stored exactly as the user entered them. Numbers, dates and
//! select choices are all plain text here; parsing happens only inside the
//! validation rules.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// The current value of one field.
///
/// Serialized untagged, so a values file can use plain TOML/JSON scalars:
///
/// ```toml
/// fullName = "Ada Lovelace"
/// age = 36                       # numbers are stored as text
/// newsletter = true
/// additionalSkills = ["CSS", "Python"]
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged, from = "RawFieldValue")]
pub enum FieldValue {
    /// Checkbox state
    Flag(bool),
    /// Free text, number-as-text, select choice or date-time string
    Text(String),
    /// Multi-select choices
    Set(BTreeSet<String>),
}

/// Wire shape accepted when reading values files.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawFieldValue {
    Flag(bool),
    Integer(i64),
    Float(f64),
    Text(String),
    Set(Vec<String>),
}

impl From<RawFieldValue> for FieldValue {
    fn from(raw: RawFieldValue) -> Self {
        match raw {
            RawFieldValue::Flag(flag) => Self::Flag(flag),
            RawFieldValue::Integer(n) => Self::Text(n.to_string()),
            RawFieldValue::Float(n) => Self::Text(n.to_string()),
            RawFieldValue::Text(text) => Self::Text(text),
            RawFieldValue::Set(items) => Self::Set(items.into_iter().collect()),
        }
    }
}

impl FieldValue {
    /// An empty text value.
    #[must_use]
    pub const fn empty_text() -> Self {
        Self::Text(String::new())
    }

    /// An empty multi-select value.
    #[must_use]
    pub const fn empty_set() -> Self {
        Self::Set(BTreeSet::new())
    }

    /// Build a multi-select value from any list of options.
    pub fn set<I, S>(options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Set(options.into_iter().map(Into::into).collect())
    }

    /// The text of a [`FieldValue::Text`], `None` for flags and sets.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    /// The options of a [`FieldValue::Set`], `None` otherwise.
    #[must_use]
    pub const fn as_set(&self) -> Option<&BTreeSet<String>> {
        match self {
            Self::Set(options) => Some(options),
            _ => None,
        }
    }

    /// Whether the value counts as "not filled in".
    ///
    /// Empty text, an unchecked flag and an empty set are blank. Whitespace-only
    /// text is not blank.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Flag(flag) => !flag,
            Self::Text(text) => text.is_empty(),
            Self::Set(options) => options.is_empty(),
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Flag(flag) => write!(f, "{}", if *flag { "yes" } else { "no" }),
            Self::Text(text) => f.write_str(text),
            Self::Set(options) => {
                let joined: Vec<&str> = options.iter().map(String::as_str).collect();
                f.write_str(&joined.join(", "))
            }
        }
    }
}

impl From<&str> for FieldValue {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<bool> for FieldValue {
    fn from(flag: bool) -> Self {
        Self::Flag(flag)
    }
}

/// The complete current value of every declared field.
///
/// Only the [`FieldStore`](super::FieldStore) can write to a `FormState`, which
/// keeps it limited to the fields of one schema.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FormState {
    values: BTreeMap<String, FieldValue>,
}

impl FormState {
    /// Current value of `name`, if the field exists.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.values.get(name)
    }

    /// Text of `name`, or `""` when the field is missing or not text.
    #[must_use]
    pub fn text(&self, name: &str) -> &str {
        self.get(name).and_then(FieldValue::as_text).unwrap_or_default()
    }

    /// Iterate over `(field, value)` pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.values.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Number of fields held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the state holds no fields at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub(crate) fn insert(&mut self, name: impl Into<String>, value: FieldValue) {
        self.values.insert(name.into(), value);
    }

    pub(crate) fn get_mut(&mut self, name: &str) -> Option<&mut FieldValue> {
        self.values.get_mut(name)
    }
}
