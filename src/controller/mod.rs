//! The form controller.
//!
//! A [`FormController`] owns one form instance: a [`FieldStore`], the derived
//! active-field set and the errors of the last rejected submit. Every operation
//! runs to completion before the next one starts.
//!
//! ```text
//!            change / toggle
//!          ┌────────────────┐
//!          ▼                │
//!       Editing ──submit──▶ Submitting ──▶ Accepted ──┐
//!          ▲                     │                     │
//!          │                     └──────▶ Rejected ────┤
//!          └───────────────────────────────────────────┘
//! ```
//!
//! Accepted and Rejected are transient: `submit` always leaves the controller
//! in [`FormPhase::Editing`], and the outcome is kept in
//! [`FormController::last_outcome`].
//!
//! # Stored errors while editing
//!
//! What happens to the errors of a rejected submit while the user keeps
//! editing is decided by the [`ErrorPolicy`]. Either way, an error for a field
//! that stops being active is dropped right away, so [`FormController::errors`]
//! never names an inactive field.

mod submission;

pub use submission::{CollectingSink, SUCCESS_HEADER, Submission, SubmissionSink};

use crate::core::Result;
use crate::schema::FormSchema;
use crate::store::{FieldStore, FieldValue, FormState};
use crate::validation::{ErrorMap, validate};
use crate::visibility::{ActiveFields, resolve_active};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info};

/// Where the controller is in its submit cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum FormPhase {
    /// Accepting changes
    Editing,
    /// Running validation
    Submitting,
    /// Validation passed, submission forwarded
    Accepted,
    /// Validation failed, errors stored
    Rejected,
}

impl fmt::Display for FormPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Editing => "editing",
            Self::Submitting => "submitting",
            Self::Accepted => "accepted",
            Self::Rejected => "rejected",
        };
        f.write_str(name)
    }
}

/// What editing a field does to that field's stored error.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ErrorPolicy {
    /// Editing a field removes its stored error
    #[default]
    ClearOnEdit,
    /// Stored errors stay until the next submit
    Retain,
}

/// Result of one submit attempt.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", content = "errors", rename_all = "kebab-case")]
pub enum SubmitOutcome {
    /// The state was valid and forwarded to the sink
    Accepted,
    /// At least one active field failed
    Rejected(ErrorMap),
}

impl SubmitOutcome {
    /// Whether the submit was accepted.
    #[must_use]
    pub const fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted)
    }

    /// Errors of a rejected submit; `None` for an accepted one.
    #[must_use]
    pub fn errors(&self) -> Option<&ErrorMap> {
        match self {
            Self::Accepted => None,
            Self::Rejected(errors) => Some(errors),
        }
    }
}

/// Drives one form instance.
#[derive(Debug)]
pub struct FormController {
    store: FieldStore,
    active: ActiveFields,
    errors: ErrorMap,
    policy: ErrorPolicy,
    phase: FormPhase,
    last_outcome: Option<SubmitOutcome>,
    submit_attempts: usize,
}

impl FormController {
    /// A controller holding the schema defaults, using [`ErrorPolicy::ClearOnEdit`].
    #[must_use]
    pub fn new(schema: Arc<FormSchema>) -> Self {
        Self::with_policy(schema, ErrorPolicy::default())
    }

    /// A controller with an explicit error policy.
    #[must_use]
    pub fn with_policy(schema: Arc<FormSchema>, policy: ErrorPolicy) -> Self {
        let store = FieldStore::new(schema);
        let active = resolve_active(store.schema(), store.state());
        Self {
            store,
            active,
            errors: ErrorMap::default(),
            policy,
            phase: FormPhase::Editing,
            last_outcome: None,
            submit_attempts: 0,
        }
    }

    /// The schema this form follows.
    #[must_use]
    pub fn schema(&self) -> &Arc<FormSchema> {
        self.store.schema()
    }

    /// Current values of every field.
    #[must_use]
    pub const fn state(&self) -> &FormState {
        self.store.state()
    }

    /// Fields that currently matter.
    #[must_use]
    pub const fn active_fields(&self) -> &ActiveFields {
        &self.active
    }

    /// Errors of the last rejected submit, minus those cleared since.
    #[must_use]
    pub const fn errors(&self) -> &ErrorMap {
        &self.errors
    }

    /// Current phase; always [`FormPhase::Editing`] between operations.
    #[must_use]
    pub const fn phase(&self) -> FormPhase {
        self.phase
    }

    /// The error policy in use.
    #[must_use]
    pub const fn policy(&self) -> ErrorPolicy {
        self.policy
    }

    /// Outcome of the most recent submit, if any since creation or reset.
    #[must_use]
    pub const fn last_outcome(&self) -> Option<&SubmitOutcome> {
        self.last_outcome.as_ref()
    }

    /// Number of submit attempts since creation or reset.
    #[must_use]
    pub const fn submit_attempts(&self) -> usize {
        self.submit_attempts
    }

    /// Set a field's value.
    ///
    /// # Errors
    ///
    /// [`FormgateError::UnknownField`](crate::core::FormgateError::UnknownField)
    /// if the schema does not declare `name`; nothing changes in that case.
    pub fn change(&mut self, name: &str, value: impl Into<FieldValue>) -> Result<()> {
        self.store.set(name, value)?;
        self.after_edit(name);
        Ok(())
    }

    /// Flip one option of a multi-select field; returns whether it is now selected.
    ///
    /// # Errors
    ///
    /// [`FormgateError::UnknownField`](crate::core::FormgateError::UnknownField)
    /// or [`FormgateError::NotMultiSelect`](crate::core::FormgateError::NotMultiSelect);
    /// nothing changes in either case.
    pub fn toggle(&mut self, name: &str, option: &str) -> Result<bool> {
        let selected = self.store.toggle(name, option)?;
        self.after_edit(name);
        Ok(selected)
    }

    /// Validate the current state and forward it to `sink` if it passes.
    ///
    /// The returned outcome is also kept as [`Self::last_outcome`].
    pub fn submit<S>(&mut self, sink: &mut S) -> SubmitOutcome
    where
        S: SubmissionSink + ?Sized,
    {
        self.submit_attempts += 1;
        self.transition(FormPhase::Submitting);

        let errors = validate(self.store.schema(), self.store.state(), &self.active);
        let outcome = if errors.is_empty() {
            self.transition(FormPhase::Accepted);
            self.errors = ErrorMap::default();
            let submission = Submission::new(self.store.schema().name(), self.store.state().clone());
            sink.accept(&submission);
            info!(form = %submission.form, attempt = self.submit_attempts, "submission accepted");
            SubmitOutcome::Accepted
        } else {
            self.transition(FormPhase::Rejected);
            debug!(
                form = %self.store.schema().name(),
                errors = errors.len(),
                attempt = self.submit_attempts,
                "submission rejected"
            );
            self.errors = errors.clone();
            SubmitOutcome::Rejected(errors)
        };

        self.transition(FormPhase::Editing);
        self.last_outcome = Some(outcome.clone());
        outcome
    }

    /// Back to schema defaults with no errors, outcome or attempts.
    pub fn reset(&mut self) {
        self.store.reset();
        self.active = resolve_active(self.store.schema(), self.store.state());
        self.errors = ErrorMap::default();
        self.last_outcome = None;
        self.submit_attempts = 0;
        self.phase = FormPhase::Editing;
        debug!(form = %self.store.schema().name(), "form reset");
    }

    fn after_edit(&mut self, name: &str) {
        if self.policy == ErrorPolicy::ClearOnEdit && self.errors.remove(name).is_some() {
            debug!(field = name, "cleared stored error");
        }

        let active = resolve_active(self.store.schema(), self.store.state());
        if active != self.active {
            let shown: Vec<&str> = active.difference(&self.active).collect();
            let hidden: Vec<&str> = self.active.difference(&active).collect();
            debug!(trigger = name, ?shown, ?hidden, "active fields changed");
            self.errors.retain(|field| active.contains(field));
            self.active = active;
        }
    }

    fn transition(&mut self, to: FormPhase) {
        debug!(form = %self.store.schema().name(), from = %self.phase, to = %to, "phase change");
        self.phase = to;
    }
}
