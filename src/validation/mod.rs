//! The validation engine.
//!
//! [`validate`] walks every field of a schema. Inactive fields are skipped
//! outright; active fields run their rule chain in order and the first failing
//! check supplies the field's message. Fields never influence each other.
//!
//! The result is recomputed from scratch on every call, and calling it twice
//! with the same inputs yields the same [`ErrorMap`].

pub mod checks;

use crate::schema::FormSchema;
use crate::store::FormState;
use crate::visibility::ActiveFields;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::trace;

/// Field name → error message for every active field that failed validation.
///
/// A missing key means the field is valid (or inactive).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ErrorMap {
    errors: BTreeMap<String, String>,
}

impl ErrorMap {
    /// Message for `field`, if it failed.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(String::as_str)
    }

    /// Whether `field` failed.
    #[must_use]
    pub fn contains(&self, field: &str) -> bool {
        self.errors.contains_key(field)
    }

    /// Whether no field failed, i.e. the form is valid.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Number of failing fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// `(field, message)` pairs in field-name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.errors.iter().map(|(field, message)| (field.as_str(), message.as_str()))
    }

    /// Drop the message for `field`, returning it.
    pub fn remove(&mut self, field: &str) -> Option<String> {
        self.errors.remove(field)
    }

    /// Keep only the fields for which `keep` returns true.
    pub fn retain(&mut self, mut keep: impl FnMut(&str) -> bool) {
        self.errors.retain(|field, _| keep(field));
    }

    fn insert(&mut self, field: &str, message: &str) {
        self.errors.insert(field.to_string(), message.to_string());
    }
}

impl<'a> IntoIterator for &'a ErrorMap {
    type Item = (&'a String, &'a String);
    type IntoIter = std::collections::btree_map::Iter<'a, String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}

/// Run every active field's rule chain and collect the first failure per field.
///
/// A field missing from `state` is validated as its schema default.
#[must_use]
pub fn validate(schema: &FormSchema, state: &FormState, active: &ActiveFields) -> ErrorMap {
    let mut errors = ErrorMap::default();

    for field in schema.fields() {
        if !active.contains(&field.name) {
            trace!(field = %field.name, "skipping inactive field");
            continue;
        }

        let fallback;
        let value = match state.get(&field.name) {
            Some(value) => value,
            None => {
                fallback = field.initial_value();
                &fallback
            }
        };

        let failure = field.rules.iter().find_map(|check| {
            let outcome = check.evaluate(value);
            trace!(field = %field.name, rule = %check.rule.kind(), passed = outcome.is_none());
            outcome
        });

        if let Some(message) = failure {
            errors.insert(&field.name, message);
        }
    }

    tracing::debug!(form = %schema.name(), errors = errors.len(), "validation finished");
    errors
}
