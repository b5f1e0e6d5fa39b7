//! Test fixtures for values files, schema files and replay scripts.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// A named file body that tests write into a temporary directory.
#[derive(Clone, Debug)]
pub struct FileFixture {
    /// File name, including extension
    pub name: String,
    /// File body
    pub content: String,
}

impl FileFixture {
    fn new(name: &str, content: &str) -> Self {
        Self {
            name: name.to_string(),
            content: content.trim_start().to_string(),
        }
    }

    /// Write the fixture into `dir` and return its path.
    pub fn write_to(&self, dir: &Path) -> Result<PathBuf> {
        let path = dir.join(&self.name);
        fs::write(&path, &self.content)
            .with_context(|| format!("Failed to write fixture {}", path.display()))?;
        Ok(path)
    }
}

/// Values files for the built-in forms.
pub struct ValuesFixture;

impl ValuesFixture {
    /// Job application for a designer; every active field valid.
    pub fn valid_job() -> FileFixture {
        FileFixture::new(
            "job.toml",
            r#"
fullName = "Grace Hopper"
email = "grace@example.com"
phoneNumber = "5551234"
position = "Designer"
relevantExperience = 7
portfolioUrl = "https://grace.dev"
additionalSkills = ["CSS", "Python"]
preferredInterviewTime = "2024-05-01T14:30"
"#,
        )
    }

    /// Job application for a manager with no skills and a malformed email.
    pub fn invalid_job() -> FileFixture {
        FileFixture::new(
            "job-invalid.toml",
            r#"
fullName = "Grace Hopper"
email = "grace-at-example"
phoneNumber = "555-1234"
position = "Manager"
relevantExperience = "lots"
preferredInterviewTime = "2024-05-01T14:30"
"#,
        )
    }

    /// Event registration missing the attendee name.
    pub fn event_missing_name() -> FileFixture {
        FileFixture::new(
            "event.json",
            r#"
{
  "name": "",
  "email": "a@b.com",
  "age": "5",
  "attendingWithGuest": "no"
}
"#,
        )
    }

    /// Valid event registration with a guest and one stray key.
    pub fn event_with_unknown_key() -> FileFixture {
        FileFixture::new(
            "event-extra.toml",
            r#"
name = "Ada Lovelace"
email = "ada@example.com"
age = 36
attendingWithGuest = "yes"
guestName = "Charles Babbage"
gustName = "typo"
"#,
        )
    }
}

/// Schema files.
pub struct SchemaFixture;

impl SchemaFixture {
    /// Newsletter signup with a business-only company field.
    pub fn newsletter() -> FileFixture {
        FileFixture::new(
            "newsletter.toml",
            r#"
name = "newsletter"
title = "Newsletter Signup"

[[fields]]
name = "email"
label = "Email"
kind = "email"
rules = ["required", "email"]

[[fields]]
name = "plan"
label = "Plan"
kind = "select"
options = ["free", "business"]

[[fields]]
name = "company"
label = "Company"
when = { field = "plan", operator = "equals", value = "business" }
rules = [{ rule = "required", message = "Company is needed for business plans" }]
"#,
        )
    }

    /// Schema whose condition names an undeclared field.
    pub fn dangling_condition() -> FileFixture {
        FileFixture::new(
            "dangling.toml",
            r#"
name = "dangling"

[[fields]]
name = "company"
when = { field = "plan", operator = "equals", value = "business" }
"#,
        )
    }
}

/// Replay scripts.
pub struct ScriptFixture;

impl ScriptFixture {
    /// Designer rejected for a missing portfolio, then accepted.
    pub fn designer_session() -> FileFixture {
        FileFixture::new(
            "designer.txt",
            r#"
# first attempt without a portfolio
set fullName Grace Hopper
set email grace@example.com
set phoneNumber 5551234
set position Designer
set relevantExperience 7
toggle additionalSkills CSS
set preferredInterviewTime 2024-05-01T14:30
submit

set portfolioUrl https://grace.dev
submit
"#,
        )
    }
}
