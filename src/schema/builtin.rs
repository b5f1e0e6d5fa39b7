//! The two built-in forms: event registration and job application.

use super::{Condition, FieldSpec, FormSchema, Rule};
use crate::core::Result;

/// Name of the event registration form.
pub const EVENT_REGISTRATION: &str = "event";

/// Name of the job application form.
pub const JOB_APPLICATION: &str = "job";

/// `(name, title)` of every built-in form.
pub const BUILTIN_FORMS: &[(&str, &str)] = &[
    (EVENT_REGISTRATION, "Event Registration Form"),
    (JOB_APPLICATION, "Job Application Form"),
];

/// Skills offered by the job application form.
pub const SKILLS: [&str; 3] = ["JavaScript", "CSS", "Python"];

/// Positions offered by the job application form.
pub const POSITIONS: [&str; 3] = ["Developer", "Designer", "Manager"];

/// Look up a built-in form by name.
///
/// Returns `None` when `name` is not a built-in form.
pub fn builtin(name: &str) -> Option<Result<FormSchema>> {
    match name {
        EVENT_REGISTRATION => Some(event_registration()),
        JOB_APPLICATION => Some(job_application()),
        _ => None,
    }
}

/// Event registration: name, email, age and an optional guest.
///
/// `guestName` is active only while `attendingWithGuest` is `"yes"`.
///
/// # Errors
///
/// Only if the schema definition itself is inconsistent.
pub fn event_registration() -> Result<FormSchema> {
    FormSchema::builder(EVENT_REGISTRATION, "Event Registration Form")
        .field(FieldSpec::text("name", "Name").required())
        .field(FieldSpec::email("email", "Email").required().rule(Rule::Email))
        .field(FieldSpec::number("age", "Age").required().rule(Rule::PositiveNumber))
        .field(FieldSpec::select(
            "attendingWithGuest",
            "Attending with Guest",
            ["no", "yes"],
        ))
        .field(
            FieldSpec::text("guestName", "Guest Name")
                .required()
                .visible_when(Condition::equals("attendingWithGuest", "yes")),
        )
        .build()
}

/// Job application with position-dependent experience fields.
///
/// - `relevantExperience` is active for Developer and Designer
/// - `portfolioUrl` is active for Designer
/// - `managementExperience` is active for Manager
///
/// # Errors
///
/// Only if the schema definition itself is inconsistent.
pub fn job_application() -> Result<FormSchema> {
    FormSchema::builder(JOB_APPLICATION, "Job Application Form")
        .field(FieldSpec::text("fullName", "Full Name").required())
        .field(FieldSpec::email("email", "Email").required().rule(Rule::Email))
        .field(FieldSpec::phone("phoneNumber", "Phone Number").required().rule(Rule::Digits))
        .field(FieldSpec::select("position", "Position", POSITIONS))
        .field(
            FieldSpec::number("relevantExperience", "Relevant Experience")
                .required()
                .rule(Rule::PositiveNumber)
                .visible_when(Condition::one_of("position", ["Developer", "Designer"])),
        )
        .field(
            FieldSpec::url("portfolioUrl", "Portfolio URL")
                .required()
                .rule(Rule::Url)
                .visible_when(Condition::equals("position", "Designer")),
        )
        .field(
            FieldSpec::text("managementExperience", "Management Experience")
                .required()
                .visible_when(Condition::equals("position", "Manager")),
        )
        .field(
            FieldSpec::multi_select("additionalSkills", "Additional Skills", SKILLS)
                .rule_with_message(Rule::NonEmptySet, "At least one skill must be selected"),
        )
        .field(
            FieldSpec::date_time("preferredInterviewTime", "Preferred Interview Time")
                .required()
                .rule(Rule::DateTime),
        )
        .build()
}
