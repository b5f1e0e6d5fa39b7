//! Library-level scenarios for the built-in forms.
//!
//! These drive the public API (`FormController`, `resolve_active`, `validate`)
//! the way an embedding application would, without the CLI.
//!
//! ```bash
//! cargo test --test unit
//! ```

use formgate_cli::controller::{CollectingSink, FormPhase, SubmitOutcome};
use formgate_cli::schema::builtin::POSITIONS;
use formgate_cli::store::FieldValue;
use formgate_cli::test_utils::{event_form, fill, init_test_logging, job_form, valid_job};
use formgate_cli::validation::validate;
use formgate_cli::visibility::resolve_active;

fn active_names(form: &formgate_cli::controller::FormController) -> Vec<String> {
    form.active_fields().iter().map(str::to_string).collect()
}

#[test]
fn test_valid_job_application_has_no_errors_for_every_position() {
    init_test_logging(None);

    for position in POSITIONS {
        let form = valid_job(position);
        let errors = validate(form.schema(), form.state(), form.active_fields());
        assert!(errors.is_empty(), "{position}: unexpected errors {errors:?}");
    }
}

#[test]
fn test_inactive_fields_are_never_reported() {
    let mut form = job_form();
    fill(&mut form, &[("position", "Manager"), ("relevantExperience", "lots")]);

    let mut sink = CollectingSink::new();
    let outcome = form.submit(&mut sink);

    let errors = outcome.errors().expect("rejected");
    for field in ["relevantExperience", "portfolioUrl"] {
        assert!(!form.active_fields().contains(field));
        assert!(!errors.contains(field), "{field} reported while inactive");
    }
    assert_eq!(errors.get("managementExperience"), Some("Management Experience is required"));
    assert!(sink.is_empty());
}

#[test]
fn test_validate_is_idempotent() {
    let mut form = job_form();
    fill(&mut form, &[("email", "nope"), ("position", "Designer")]);

    let first = validate(form.schema(), form.state(), form.active_fields());
    let second = validate(form.schema(), form.state(), form.active_fields());
    assert_eq!(first, second);
    assert!(!first.is_empty());
}

#[test]
fn test_unrelated_change_keeps_active_set() {
    let mut form = valid_job("Designer");
    let before = active_names(&form);

    fill(&mut form, &[("fullName", "Someone Else"), ("email", "other@example.com")]);
    assert_eq!(active_names(&form), before);

    let recomputed = resolve_active(form.schema(), form.state());
    assert_eq!(&recomputed, form.active_fields());
}

#[test]
fn test_event_registration_missing_name() {
    let mut form = event_form();
    fill(
        &mut form,
        &[("name", ""), ("email", "a@b.com"), ("age", "5"), ("attendingWithGuest", "no")],
    );

    let mut sink = CollectingSink::new();
    let outcome = form.submit(&mut sink);

    let errors = outcome.errors().expect("rejected");
    assert_eq!(errors.len(), 1);
    assert_eq!(errors.get("name"), Some("Name is required"));
    assert!(sink.is_empty());
    assert_eq!(form.phase(), FormPhase::Editing);
}

#[test]
fn test_event_guest_toggles_visibility() {
    let mut form = event_form();
    fill(&mut form, &[("name", "Ada"), ("email", "ada@example.com"), ("age", "36")]);
    assert!(!form.active_fields().contains("guestName"));

    fill(&mut form, &[("attendingWithGuest", "yes")]);
    assert!(form.active_fields().contains("guestName"));
    let outcome = form.submit(&mut CollectingSink::new());
    assert_eq!(
        outcome.errors().and_then(|e| e.get("guestName")),
        Some("Guest Name is required")
    );

    // Hiding the field again drops both the requirement and the error
    fill(&mut form, &[("attendingWithGuest", "no")]);
    assert!(!form.errors().contains("guestName"));
    assert!(form.submit(&mut CollectingSink::new()).is_accepted());
}

#[test]
fn test_designer_needs_portfolio_then_submits() {
    let mut form = valid_job("Designer");
    form.change("portfolioUrl", "").unwrap();

    let mut sink = CollectingSink::new();
    let outcome = form.submit(&mut sink);
    assert_eq!(
        outcome.errors().and_then(|e| e.get("portfolioUrl")),
        Some("Portfolio URL is required")
    );

    form.change("portfolioUrl", "ftp://grace.dev").unwrap();
    let outcome = form.submit(&mut sink);
    assert_eq!(
        outcome.errors().and_then(|e| e.get("portfolioUrl")),
        Some("Portfolio URL is invalid")
    );

    form.change("portfolioUrl", "https://grace.dev").unwrap();
    assert_eq!(form.submit(&mut sink), SubmitOutcome::Accepted);
    assert_eq!(sink.len(), 1);

    let submission = sink.last().unwrap();
    assert_eq!(submission.form, "job");
    assert_eq!(
        submission.values.get("portfolioUrl"),
        Some(&FieldValue::from("https://grace.dev"))
    );
    let summary = submission.summary(form.schema());
    assert!(summary.starts_with("Form submitted successfully!"));
    assert!(summary.contains("Position: Designer"));
}

#[test]
fn test_designer_with_malformed_portfolio_url() {
    let mut form = valid_job("Designer");
    form.change("portfolioUrl", "not-a-url").unwrap();

    let errors = validate(form.schema(), form.state(), form.active_fields());
    let entries: Vec<(&str, &str)> = errors.iter().collect();
    assert_eq!(entries, vec![("portfolioUrl", "Portfolio URL is invalid")]);

    let outcome = form.submit(&mut CollectingSink::new());
    assert_eq!(outcome.errors(), Some(&errors));
}

#[test]
fn test_skills_toggle_in_and_out() {
    let mut form = valid_job("Developer");
    assert!(!form.toggle("additionalSkills", "CSS").unwrap());

    let outcome = form.submit(&mut CollectingSink::new());
    assert_eq!(
        outcome.errors().and_then(|e| e.get("additionalSkills")),
        Some("At least one skill must be selected")
    );

    assert!(form.toggle("additionalSkills", "Python").unwrap());
    assert!(form.submit(&mut CollectingSink::new()).is_accepted());
    assert_eq!(
        form.state().get("additionalSkills"),
        Some(&FieldValue::set(["Python"]))
    );
}

#[test]
fn test_age_boundary() {
    for (age, ok) in [("0", false), ("-1", false), ("abc", false), ("1", true), (" 2.5 ", true)] {
        let mut form = event_form();
        fill(&mut form, &[("name", "Ada"), ("email", "ada@example.com"), ("age", age)]);

        let outcome = form.submit(&mut CollectingSink::new());
        assert_eq!(outcome.is_accepted(), ok, "age {age:?}");
        if !ok {
            assert_eq!(
                outcome.errors().and_then(|e| e.get("age")),
                Some("Age must be a number greater than 0")
            );
        }
    }
}

#[test]
fn test_reset_restores_defaults() {
    let mut form = valid_job("Manager");
    form.submit(&mut CollectingSink::new());
    assert_eq!(form.submit_attempts(), 1);

    form.reset();
    assert_eq!(form.submit_attempts(), 0);
    assert!(form.last_outcome().is_none());
    assert_eq!(form.state().text("position"), "Developer");
    assert!(form.active_fields().contains("relevantExperience"));
    assert!(!form.active_fields().contains("managementExperience"));
}
