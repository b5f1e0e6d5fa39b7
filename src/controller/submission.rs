//! Accepted submissions and the collaborators that receive them.

use crate::schema::FormSchema;
use crate::store::FormState;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt::Write as _;

/// Header line of [`Submission::summary`].
pub const SUCCESS_HEADER: &str = "Form submitted successfully!";

/// A form state that passed validation.
///
/// `values` holds every declared field, including inactive ones with their
/// default or stale value.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Submission {
    /// Name of the submitted form
    pub form: String,
    /// Complete form state at submit time
    pub values: FormState,
    /// When the submission was accepted
    pub submitted_at: DateTime<Utc>,
}

impl Submission {
    pub(crate) fn new(form: &str, values: FormState) -> Self {
        Self {
            form: form.to_string(),
            values,
            submitted_at: Utc::now(),
        }
    }

    /// Confirmation text: the success header followed by one `Label: value`
    /// line per field in declaration order.
    #[must_use]
    pub fn summary(&self, schema: &FormSchema) -> String {
        let mut text = String::from(SUCCESS_HEADER);
        for field in schema.fields() {
            let value = self.values.get(&field.name).map(ToString::to_string).unwrap_or_default();
            let _ = write!(text, "\n{}: {}", field.label, value);
        }
        text
    }
}

/// Receives accepted submissions.
///
/// Implemented for any `FnMut(&Submission)` closure, so a caller can pass
/// `&mut |s: &Submission| ...` directly.
pub trait SubmissionSink {
    /// Called once per accepted submit, never for rejected ones.
    fn accept(&mut self, submission: &Submission);
}

impl<F> SubmissionSink for F
where
    F: FnMut(&Submission),
{
    fn accept(&mut self, submission: &Submission) {
        self(submission);
    }
}

/// Sink that keeps every submission it receives.
#[derive(Debug, Default)]
pub struct CollectingSink {
    submissions: Vec<Submission>,
}

impl CollectingSink {
    /// An empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Submissions received so far, oldest first.
    #[must_use]
    pub fn submissions(&self) -> &[Submission] {
        &self.submissions
    }

    /// The most recent submission.
    #[must_use]
    pub fn last(&self) -> Option<&Submission> {
        self.submissions.last()
    }

    /// Number of submissions received.
    #[must_use]
    pub fn len(&self) -> usize {
        self.submissions.len()
    }

    /// Whether nothing has been received.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.submissions.is_empty()
    }
}

impl SubmissionSink for CollectingSink {
    fn accept(&mut self, submission: &Submission) {
        self.submissions.push(submission.clone());
    }
}
