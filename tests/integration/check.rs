use formgate_cli::test_utils::{SchemaFixture, ValuesFixture};
use predicates::prelude::*;

use crate::common::TestProject;

/// A fully valid designer application passes
#[test]
fn test_check_valid_job_application() {
    let project = TestProject::new().unwrap();
    let values = project.write_fixture(&ValuesFixture::valid_job()).unwrap();

    project
        .formgate()
        .arg("check")
        .arg(&values)
        .args(["--form", "job"])
        .assert()
        .success()
        .stdout(predicate::str::contains("✓ Form 'job' is valid (8 active fields)"));
}

/// Every failing active field is listed; inactive fields are not
#[test]
fn test_check_invalid_job_application() {
    let project = TestProject::new().unwrap();
    let values = project.write_fixture(&ValuesFixture::invalid_job()).unwrap();

    project
        .formgate()
        .arg("check")
        .arg(&values)
        .args(["--form", "job"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("email: Email is invalid"))
        .stdout(predicate::str::contains("phoneNumber: Phone Number must be a valid number"))
        .stdout(predicate::str::contains(
            "managementExperience: Management Experience is required",
        ))
        .stdout(predicate::str::contains("additionalSkills: At least one skill must be selected"))
        .stdout(predicate::str::contains("relevantExperience").not())
        .stderr(predicate::str::contains("Form 'job' is invalid: 4 field(s) failed validation"));
}

/// JSON output for the event scenario with a missing name
#[test]
fn test_check_json_output() {
    let project = TestProject::new().unwrap();
    let values = project.write_fixture(&ValuesFixture::event_missing_name()).unwrap();

    let output = project
        .formgate()
        .arg("check")
        .arg(&values)
        .args(["--form", "event", "--format", "json"])
        .output()
        .unwrap();

    assert!(!output.status.success());
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["valid"], false);
    assert_eq!(report["errors"], serde_json::json!({ "name": "Name is required" }));
    assert_eq!(
        report["active_fields"],
        serde_json::json!(["age", "attendingWithGuest", "email", "name"])
    );
}

/// The configured default format applies when --format is not given
#[test]
fn test_check_uses_configured_format() {
    let project = TestProject::new().unwrap();
    project.write_config("format = \"json\"\n").unwrap();
    let values = project.write_fixture(&ValuesFixture::valid_job()).unwrap();

    project
        .formgate()
        .arg("check")
        .arg(&values)
        .args(["--form", "job"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"valid\": true"));
}

/// Unknown keys warn by default and fail under --strict
#[test]
fn test_check_unknown_keys() {
    let project = TestProject::new().unwrap();
    let values = project.write_fixture(&ValuesFixture::event_with_unknown_key()).unwrap();

    project
        .formgate()
        .arg("check")
        .arg(&values)
        .args(["--form", "event"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Unknown field 'gustName' ignored (did you mean 'guestName'?)",
        ))
        .stdout(predicate::str::contains("✓ Form 'event' is valid"));

    project
        .formgate()
        .arg("check")
        .arg(&values)
        .args(["--form", "event", "--strict"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Strict mode: 1 unknown key(s)"));
}

/// A schema file can be used directly or through the config
#[test]
fn test_check_against_schema_file() {
    let project = TestProject::new().unwrap();
    let schema = project.write_fixture(&SchemaFixture::newsletter()).unwrap();
    let values = project
        .write_file("signup.toml", "email = \"ada@example.com\"\nplan = \"business\"\n")
        .unwrap();

    project
        .formgate()
        .arg("check")
        .arg(&values)
        .arg("--form")
        .arg(&schema)
        .assert()
        .failure()
        .stdout(predicate::str::contains("company: Company is needed for business plans"));

    project.write_config("[schemas]\nnewsletter = \"newsletter.toml\"\n").unwrap();
    project.write_file("signup.toml", "email = \"ada@example.com\"\nplan = \"free\"\n").unwrap();
    project
        .formgate()
        .arg("check")
        .arg(&values)
        .args(["--form", "newsletter"])
        .assert()
        .success();
}

/// Broken schemas are rejected before any value is checked
#[test]
fn test_check_rejects_inconsistent_schema() {
    let project = TestProject::new().unwrap();
    let schema = project.write_fixture(&SchemaFixture::dangling_condition()).unwrap();
    let values = project.write_file("values.toml", "company = \"ACME\"\n").unwrap();

    project
        .formgate()
        .arg("check")
        .arg(&values)
        .arg("--form")
        .arg(&schema)
        .assert()
        .failure()
        .stderr(predicate::str::contains("conditional on undeclared field 'plan'"));
}

/// Unknown form names get a pointer to `schema list`
#[test]
fn test_check_unknown_form() {
    let project = TestProject::new().unwrap();
    let values = project.write_fixture(&ValuesFixture::valid_job()).unwrap();

    project
        .formgate()
        .arg("check")
        .arg(&values)
        .args(["--form", "survey"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Form 'survey' not found"))
        .stderr(predicate::str::contains("formgate schema list"));
}

/// Malformed values files are reported as such
#[test]
fn test_check_malformed_values() {
    let project = TestProject::new().unwrap();
    let values = project.write_file("values.json", "{ \"name\": ").unwrap();

    project
        .formgate()
        .arg("check")
        .arg(&values)
        .args(["--form", "event"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid values file"));
}
