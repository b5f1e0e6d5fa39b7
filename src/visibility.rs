//! The visibility resolver.
//!
//! [`resolve_active`] maps the current state to the set of active fields. A field
//! without a condition is always active; a conditional field is active while its
//! predicate holds for the controlling field's current value. The resolver is a
//! pure function and is meant to be re-run after every change rather than cached.

use crate::schema::FormSchema;
use crate::store::FormState;
use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;

/// Names of the currently active fields.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ActiveFields {
    names: BTreeSet<String>,
}

impl ActiveFields {
    /// Whether `field` is active.
    #[must_use]
    pub fn contains(&self, field: &str) -> bool {
        self.names.contains(field)
    }

    /// Active field names in name order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    /// Number of active fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether no field is active.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Names active in `self` but not in `other`.
    pub fn difference<'a>(&'a self, other: &'a Self) -> impl Iterator<Item = &'a str> {
        self.names.difference(&other.names).map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for ActiveFields {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            names: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl fmt::Display for ActiveFields {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.iter().collect();
        f.write_str(&names.join(", "))
    }
}

/// Compute the active field set for `state`.
///
/// A controlling field missing from `state` is read as its schema default.
#[must_use]
pub fn resolve_active(schema: &FormSchema, state: &FormState) -> ActiveFields {
    schema
        .fields()
        .iter()
        .filter(|field| {
            let Some(condition) = &field.visible_when else {
                return true;
            };
            match state.get(&condition.controller) {
                Some(value) => condition.predicate.matches(value),
                None => schema
                    .field(&condition.controller)
                    .is_some_and(|controller| condition.predicate.matches(&controller.initial_value())),
            }
        })
        .map(|field| field.name.clone())
        .collect()
}
