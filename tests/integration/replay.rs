use formgate_cli::test_utils::ScriptFixture;
use predicates::prelude::*;

use crate::common::TestProject;

/// Rejected first, accepted once the portfolio is added
#[test]
fn test_replay_designer_session() {
    let project = TestProject::new().unwrap();
    let script = project.write_fixture(&ScriptFixture::designer_session()).unwrap();

    project
        .formgate()
        .arg("replay")
        .arg(&script)
        .args(["--form", "job"])
        .assert()
        .success()
        .stdout(predicate::str::contains("✗ line 9: rejected"))
        .stdout(predicate::str::contains("portfolioUrl: Portfolio URL is required"))
        .stdout(predicate::str::contains("✓ line 12: accepted"))
        .stdout(predicate::str::contains("Form submitted successfully!"))
        .stdout(predicate::str::contains("Full Name: Grace Hopper"))
        .stdout(predicate::str::contains("Additional Skills: CSS"));
}

#[test]
fn test_replay_json_report() {
    let project = TestProject::new().unwrap();
    let script = project.write_fixture(&ScriptFixture::designer_session()).unwrap();

    let output = project
        .formgate()
        .arg("replay")
        .arg(&script)
        .args(["--form", "job", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["submits"][0]["line"], 9);
    assert_eq!(report["submits"][0]["outcome"], "rejected");
    assert_eq!(report["submits"][0]["errors"]["portfolioUrl"], "Portfolio URL is required");
    assert_eq!(report["submits"][1]["outcome"], "accepted");
    assert_eq!(report["submissions"][0]["form"], "job");
    assert_eq!(report["submissions"][0]["values"]["additionalSkills"], serde_json::json!(["CSS"]));
}

#[test]
fn test_replay_reports_bad_line() {
    let project = TestProject::new().unwrap();
    let script = project.write_file("bad.txt", "set name Ada\njump around\n").unwrap();

    project
        .formgate()
        .arg("replay")
        .arg(&script)
        .args(["--form", "event"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Replay script line 2: unknown command 'jump'"));
}

#[test]
fn test_replay_unknown_field_names_line() {
    let project = TestProject::new().unwrap();
    let script = project.write_file("typo.txt", "# typo below\nset nam Ada\n").unwrap();

    project
        .formgate()
        .arg("replay")
        .arg(&script)
        .args(["--form", "event"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Field 'nam' is not declared in form 'event'"))
        .stderr(predicate::str::contains("Replay script line 2"))
        .stderr(predicate::str::contains("Did you mean 'name'?"));
}

#[test]
fn test_replay_toggle_on_select_fails() {
    let project = TestProject::new().unwrap();
    let script = project.write_file("toggle.txt", "toggle position Manager\n").unwrap();

    project
        .formgate()
        .arg("replay")
        .arg(&script)
        .args(["--form", "job"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("is not a multi-select field"));
}
