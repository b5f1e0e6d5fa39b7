use formgate_cli::test_utils::SchemaFixture;
use predicates::prelude::*;

use crate::common::TestProject;

#[test]
fn test_schema_list_builtins() {
    let project = TestProject::new().unwrap();

    project
        .formgate()
        .args(["schema", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("event"))
        .stdout(predicate::str::contains("job"))
        .stdout(predicate::str::contains("built-in"));
}

#[test]
fn test_schema_list_includes_registered() {
    let project = TestProject::new().unwrap();
    project.write_fixture(&SchemaFixture::newsletter()).unwrap();
    project.write_config("[schemas]\nnewsletter = \"newsletter.toml\"\n").unwrap();

    let output = project.formgate().args(["schema", "list", "--format", "json"]).output().unwrap();
    assert!(output.status.success());

    let entries: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let names: Vec<&str> =
        entries.as_array().unwrap().iter().map(|e| e["name"].as_str().unwrap()).collect();
    assert_eq!(names, vec!["event", "job", "newsletter"]);
    assert!(entries[2]["source"].as_str().unwrap().ends_with("newsletter.toml"));
}

#[test]
fn test_schema_show_job() {
    let project = TestProject::new().unwrap();

    project
        .formgate()
        .args(["schema", "show", "job"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Job Application Form (job)"))
        .stdout(predicate::str::contains("portfolioUrl [url] Portfolio URL"))
        .stdout(predicate::str::contains("active when: position == \"Designer\""))
        .stdout(predicate::str::contains("active when: position in [Developer, Designer]"))
        .stdout(predicate::str::contains("At least one skill must be selected"));
}

#[test]
fn test_schema_show_file_as_json() {
    let project = TestProject::new().unwrap();
    let schema = project.write_fixture(&SchemaFixture::newsletter()).unwrap();

    let output = project
        .formgate()
        .args(["schema", "show"])
        .arg(&schema)
        .args(["--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let description: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(description["name"], "newsletter");
    assert_eq!(description["fields"][2]["visible_when"], "plan == \"business\"");
    assert_eq!(description["fields"][1]["default"], "free");
}

#[test]
fn test_schema_show_unknown_form() {
    let project = TestProject::new().unwrap();

    project
        .formgate()
        .args(["schema", "show", "survey"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Form 'survey' not found"));
}

#[test]
fn test_malformed_config_is_reported_as_config_error() {
    let project = TestProject::new().unwrap();
    project.write_config("format = \"json\"\n[schemas\n").unwrap();

    project
        .formgate()
        .args(["schema", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration error: Failed to parse global config"))
        .stderr(predicate::str::contains("formgate-config.toml"))
        .stderr(predicate::str::contains("--config"))
        .stderr(predicate::str::contains("schema file").not());
}
