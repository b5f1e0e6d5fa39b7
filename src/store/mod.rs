//! The field store: current values of one form instance.
//!
//! The store is type-agnostic. It accepts any [`FieldValue`] for any declared
//! field and never parses numbers or dates; that is left to validation. What it
//! does enforce is the field list: names outside the schema are rejected and
//! the state is left as it was.

mod value;

pub use value::{FieldValue, FormState};

use crate::core::{FormgateError, Result};
use crate::schema::{FieldKind, FormSchema};
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::trace;

/// Owns the [`FormState`] of one form instance.
#[derive(Clone, Debug)]
pub struct FieldStore {
    schema: Arc<FormSchema>,
    state: FormState,
}

impl FieldStore {
    /// A store holding every field's default value.
    #[must_use]
    pub fn new(schema: Arc<FormSchema>) -> Self {
        let state = schema.defaults();
        Self {
            schema,
            state,
        }
    }

    /// The schema this store follows.
    #[must_use]
    pub fn schema(&self) -> &Arc<FormSchema> {
        &self.schema
    }

    /// Snapshot of all current values.
    #[must_use]
    pub const fn state(&self) -> &FormState {
        &self.state
    }

    /// Current value of `name`; `None` when the field is not declared.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.state.get(name)
    }

    /// Replace the value of `name`.
    ///
    /// # Errors
    ///
    /// [`FormgateError::UnknownField`] if `name` is not declared; the state is
    /// unchanged in that case.
    pub fn set(&mut self, name: &str, value: impl Into<FieldValue>) -> Result<()> {
        let slot = self.state.get_mut(name).ok_or_else(|| self.schema.unknown_field(name))?;
        *slot = value.into();
        trace!(field = name, value = %slot, "field updated");
        Ok(())
    }

    /// Flip `option` in a multi-select field and return whether it is now selected.
    ///
    /// A non-set value left in the field by `set` is replaced by an empty set
    /// before toggling.
    ///
    /// # Errors
    ///
    /// - [`FormgateError::UnknownField`] if `name` is not declared
    /// - [`FormgateError::NotMultiSelect`] if the field is not a multi-select
    pub fn toggle(&mut self, name: &str, option: &str) -> Result<bool> {
        let field = self.schema.field(name).ok_or_else(|| self.schema.unknown_field(name))?;
        if field.kind != FieldKind::MultiSelect {
            return Err(FormgateError::NotMultiSelect {
                form: self.schema.name().to_string(),
                field: name.to_string(),
            });
        }

        let slot = self.state.get_mut(name).ok_or_else(|| self.schema.unknown_field(name))?;
        let mut options = match std::mem::replace(slot, FieldValue::empty_set()) {
            FieldValue::Set(options) => options,
            _ => BTreeSet::new(),
        };

        let selected = if options.remove(option) {
            false
        } else {
            options.insert(option.to_string());
            true
        };
        *slot = FieldValue::Set(options);
        trace!(field = name, option, selected, "option toggled");
        Ok(selected)
    }

    /// Restore every field to its default.
    pub fn reset(&mut self) {
        self.state = self.schema.defaults();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::builtin::{event_registration, job_application};

    fn job_store() -> FieldStore {
        FieldStore::new(Arc::new(job_application().unwrap()))
    }

    #[test]
    fn test_defaults_cover_every_field() {
        let store = job_store();
        assert_eq!(store.state().len(), store.schema().fields().len());
        assert_eq!(store.get("position"), Some(&FieldValue::from("Developer")));
        assert_eq!(store.get("additionalSkills"), Some(&FieldValue::empty_set()));
        assert_eq!(store.get("fullName"), Some(&FieldValue::empty_text()));

        let event = FieldStore::new(Arc::new(event_registration().unwrap()));
        assert_eq!(event.get("attendingWithGuest"), Some(&FieldValue::from("no")));
    }

    #[test]
    fn test_set_replaces_value_without_parsing() {
        let mut store = job_store();
        store.set("relevantExperience", "three").unwrap();
        assert_eq!(store.state().text("relevantExperience"), "three");
    }

    #[test]
    fn test_set_unknown_field_is_rejected() {
        let mut store = job_store();
        let before = store.state().clone();

        let err = store.set("fulName", "Ada").unwrap_err();
        match err {
            FormgateError::UnknownField {
                suggestion,
                ..
            } => assert_eq!(suggestion.as_deref(), Some("fullName")),
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(store.state(), &before);
        assert!(store.get("fulName").is_none());
    }

    #[test]
    fn test_toggle_adds_then_removes() {
        let mut store = job_store();
        assert!(store.toggle("additionalSkills", "CSS").unwrap());
        assert!(store.toggle("additionalSkills", "Python").unwrap());
        assert_eq!(store.get("additionalSkills"), Some(&FieldValue::set(["CSS", "Python"])));

        assert!(!store.toggle("additionalSkills", "CSS").unwrap());
        assert_eq!(store.get("additionalSkills"), Some(&FieldValue::set(["Python"])));
    }

    #[test]
    fn test_toggle_rejects_single_valued_fields() {
        let mut store = job_store();
        assert!(matches!(
            store.toggle("position", "Manager"),
            Err(FormgateError::NotMultiSelect { .. })
        ));
        assert!(matches!(
            store.toggle("hobbies", "chess"),
            Err(FormgateError::UnknownField { .. })
        ));
    }

    #[test]
    fn test_toggle_recovers_from_text_value() {
        let mut store = job_store();
        store.set("additionalSkills", "CSS").unwrap();
        assert!(store.toggle("additionalSkills", "Python").unwrap());
        assert_eq!(store.get("additionalSkills"), Some(&FieldValue::set(["Python"])));
    }

    #[test]
    fn test_reset_restores_defaults() {
        let mut store = job_store();
        store.set("position", "Manager").unwrap();
        store.toggle("additionalSkills", "CSS").unwrap();
        store.reset();
        assert_eq!(store.state(), &store.schema().defaults());
    }
}
