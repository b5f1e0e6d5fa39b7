//! Test utilities for formgate
//!
//! Available to unit tests and, through the `test-utils` feature, to the
//! integration suites under `tests/`.
//!
//! - [`init_test_logging`] - route `tracing` output through the test harness
//! - [`fixtures`] - values files, schema files and replay scripts
//! - [`job_form`] / [`event_form`] - controllers on the built-in forms
//! - [`fill`] - apply a list of values to a controller
//! - [`valid_job`] - a job application that passes validation
//!
//! # Example
//!
//! ```rust,no_run
//! use formgate_cli::test_utils::{fill, init_test_logging, job_form};
//!
//! init_test_logging(None);
//! let mut form = job_form();
//! fill(&mut form, &[("fullName", "Grace Hopper"), ("position", "Manager")]);
//! ```

pub mod fixtures;

pub use fixtures::{FileFixture, SchemaFixture, ScriptFixture, ValuesFixture};

use crate::controller::FormController;
use crate::schema::builtin::{event_registration, job_application};
use crate::store::FieldValue;
use std::sync::{Arc, Once};
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Global flag to ensure logging is only initialized once in tests
static INIT_LOGGING: Once = Once::new();

/// Initialize logging for tests.
///
/// Uses `level` if given, otherwise `RUST_LOG`; with neither, logging stays off.
/// Only the first call has any effect.
///
/// ```bash
/// RUST_LOG=formgate_cli=trace cargo test
/// ```
pub fn init_test_logging(level: Option<Level>) {
    INIT_LOGGING.call_once(|| {
        let filter = if let Some(level) = level {
            EnvFilter::new(level.to_string())
        } else if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            return;
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .with_thread_ids(false)
            .with_ansi(true)
            .try_init();
    });
}

/// A fresh controller on the built-in job application form.
///
/// # Panics
///
/// If the built-in schema fails its own checks.
#[must_use]
pub fn job_form() -> FormController {
    FormController::new(Arc::new(job_application().expect("job schema is valid")))
}

/// A fresh controller on the built-in event registration form.
///
/// # Panics
///
/// If the built-in schema fails its own checks.
#[must_use]
pub fn event_form() -> FormController {
    FormController::new(Arc::new(event_registration().expect("event schema is valid")))
}

/// Apply `(field, text)` pairs in order.
///
/// # Panics
///
/// If any field is not declared by the form.
pub fn fill(form: &mut FormController, values: &[(&str, &str)]) {
    for (field, value) in values {
        form.change(field, FieldValue::from(*value))
            .unwrap_or_else(|e| panic!("cannot set '{field}': {e}"));
    }
}

/// A job application controller that passes validation for `position`.
///
/// Only the experience fields that `position` activates are filled in, and
/// `CSS` is the one selected skill.
///
/// # Panics
///
/// If the built-in schema rejects one of the edits.
#[must_use]
pub fn valid_job(position: &str) -> FormController {
    let mut form = job_form();
    fill(
        &mut form,
        &[
            ("fullName", "Grace Hopper"),
            ("email", "grace@example.com"),
            ("phoneNumber", "5551234"),
            ("position", position),
            ("preferredInterviewTime", "2024-05-01T14:30"),
        ],
    );
    match position {
        "Developer" => fill(&mut form, &[("relevantExperience", "3")]),
        "Designer" => fill(
            &mut form,
            &[("relevantExperience", "7"), ("portfolioUrl", "https://grace.dev")],
        ),
        "Manager" => fill(&mut form, &[("managementExperience", "Led a team of 12")]),
        _ => {}
    }
    form.toggle("additionalSkills", "CSS").unwrap_or_else(|e| panic!("cannot toggle: {e}"));
    form
}
