//! Error handling for formgate
//!
//! Two very different kinds of failure exist in this crate and they are kept apart:
//!
//! 1. **Field validation failures** are expected, user-correctable input problems.
//!    They are plain data (an [`ErrorMap`](crate::validation::ErrorMap) entry) and
//!    never surface as a Rust `Err`.
//! 2. **Programming and configuration errors** - a malformed schema, a reference to
//!    an undeclared field, an unreadable values file - are [`FormgateError`] values.
//!    Schema problems are raised when the schema is built, never during validation.
//!
//! [`ErrorContext`] wraps a [`FormgateError`] with a suggestion and details for
//! terminal display, and [`user_friendly_error`] converts any `anyhow::Error`
//! into one.
//!
//! # Examples
//!
//! ```rust,no_run
//! use formgate_cli::core::{FormgateError, ErrorContext};
//!
//! let context = ErrorContext::new(FormgateError::FormNotFound {
//!     name: "survey".to_string(),
//! })
//! .with_suggestion("Run 'formgate schema list' to see available forms");
//!
//! context.display();
//! ```

use colored::Colorize;
use std::fmt;
use thiserror::Error;

/// The main error type for formgate operations
///
/// # Error Categories
///
/// ## Schema Construction
/// - [`SchemaInvalid`] - General schema consistency failure
/// - [`DuplicateField`] - Two fields share a name
/// - [`ConditionTargetMissing`] - A visibility rule names an undeclared field
/// - [`InvalidPattern`] - A `pattern` rule carries a regex that does not compile
///
/// ## Runtime Field Access
/// - [`UnknownField`] - A value was addressed to a field outside the schema
/// - [`NotMultiSelect`] - `toggle` was used on a field that is not a multi-select
///
/// ## Files and Configuration
/// - [`FormNotFound`], [`SchemaParseError`], [`ValuesParseError`], [`ScriptError`],
///   [`ConfigError`]
///
/// [`SchemaInvalid`]: FormgateError::SchemaInvalid
/// [`DuplicateField`]: FormgateError::DuplicateField
/// [`ConditionTargetMissing`]: FormgateError::ConditionTargetMissing
/// [`InvalidPattern`]: FormgateError::InvalidPattern
/// [`UnknownField`]: FormgateError::UnknownField
/// [`NotMultiSelect`]: FormgateError::NotMultiSelect
/// [`FormNotFound`]: FormgateError::FormNotFound
/// [`SchemaParseError`]: FormgateError::SchemaParseError
/// [`ValuesParseError`]: FormgateError::ValuesParseError
/// [`ScriptError`]: FormgateError::ScriptError
/// [`ConfigError`]: FormgateError::ConfigError
#[derive(Error, Debug, Clone)]
pub enum FormgateError {
    /// Schema failed a consistency check while being built
    #[error("Invalid schema '{form}': {reason}")]
    SchemaInvalid {
        /// Name of the form whose schema is invalid
        form: String,
        /// Why the schema was rejected
        reason: String,
    },

    /// Two fields in one schema share a name
    #[error("Field '{field}' is declared more than once in form '{form}'")]
    DuplicateField {
        /// Name of the form
        form: String,
        /// The duplicated field name
        field: String,
    },

    /// A visibility rule references a field the schema does not declare
    ///
    /// Every conditional field is controlled by exactly one other field. The
    /// controlling field must exist and must not be the conditional field itself.
    #[error("Field '{field}' in form '{form}' is conditional on undeclared field '{controller}'")]
    ConditionTargetMissing {
        /// Name of the form
        form: String,
        /// The conditional field
        field: String,
        /// The controlling field that could not be found
        controller: String,
    },

    /// A `pattern` rule carries an invalid regular expression
    #[error("Invalid pattern for field '{field}': {reason}")]
    InvalidPattern {
        /// The field carrying the rule
        field: String,
        /// The pattern as written
        pattern: String,
        /// Compiler error from the regex engine
        reason: String,
    },

    /// A value was addressed to a field outside the schema
    #[error("Field '{name}' is not declared in form '{form}'")]
    UnknownField {
        /// Name of the form
        form: String,
        /// The unknown field name as supplied by the caller
        name: String,
        /// The closest declared field name, if any is similar enough
        suggestion: Option<String>,
    },

    /// `toggle` was applied to a field that does not hold a set of options
    #[error("Field '{field}' in form '{form}' is not a multi-select field")]
    NotMultiSelect {
        /// Name of the form
        form: String,
        /// The field that was toggled
        field: String,
    },

    /// No built-in or configured form has the requested name
    #[error("Form '{name}' not found")]
    FormNotFound {
        /// The requested form name
        name: String,
    },

    /// A schema file could not be parsed
    #[error("Invalid schema file syntax in {file}")]
    SchemaParseError {
        /// Path to the schema file
        file: String,
        /// Parser message
        reason: String,
    },

    /// A values file could not be parsed
    #[error("Invalid values file {file}: {reason}")]
    ValuesParseError {
        /// Path to the values file
        file: String,
        /// Parser message
        reason: String,
    },

    /// A replay script line could not be interpreted
    #[error("Replay script line {line}: {reason}")]
    ScriptError {
        /// One-based line number
        line: usize,
        /// What was wrong with the line
        reason: String,
    },

    /// The global config file is malformed
    #[error("Configuration error: {message}")]
    ConfigError {
        /// Description of the configuration error, including the file path
        message: String,
    },

    /// Other error
    #[error("{message}")]
    Other {
        /// Generic error message
        message: String,
    },
}

/// Error context wrapper that provides user-friendly error information
///
/// Wraps a [`FormgateError`] with an optional suggestion (shown in green) and
/// optional details (shown in yellow).
#[derive(Debug)]
pub struct ErrorContext {
    /// The underlying formgate error
    pub error: FormgateError,
    /// Optional suggestion for resolving the error
    pub suggestion: Option<String>,
    /// Optional additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    /// Create a new error context with no suggestion or details.
    #[must_use]
    pub const fn new(error: FormgateError) -> Self {
        Self {
            error,
            suggestion: None,
            details: None,
        }
    }

    /// Add a suggestion for resolving the error
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add additional details explaining the error
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Display the error context to stderr with terminal colors
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.error);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ErrorContext {}

/// Find the candidate closest to `name`, if any is close enough to be a likely typo.
///
/// Uses normalized Levenshtein similarity; candidates scoring below 0.6 are ignored.
pub fn closest_match<'a, I>(name: &str, candidates: I) -> Option<String>
where
    I: IntoIterator<Item = &'a str>,
{
    candidates
        .into_iter()
        .map(|candidate| (candidate, strsim::normalized_levenshtein(name, candidate)))
        .filter(|(_, score)| *score >= 0.6)
        .max_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(candidate, _)| candidate.to_string())
}

/// Convert any error into a user-friendly [`ErrorContext`]
///
/// Known [`FormgateError`] variants get tailored suggestions, a missing file
/// gets a path hint, and everything else is wrapped in [`FormgateError::Other`]
/// with the full cause chain.
#[must_use]
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    if let Some(formgate_error) = error.downcast_ref::<FormgateError>() {
        let mut ctx = create_error_context(formgate_error.clone());
        // Keep the outer context (e.g. the script line) when the variant adds no details
        let outer = error.to_string();
        if ctx.details.is_none() && outer != formgate_error.to_string() {
            ctx.details = Some(outer);
        }
        return ctx;
    }

    if let Some(io_error) = error.downcast_ref::<std::io::Error>() {
        if io_error.kind() == std::io::ErrorKind::NotFound {
            return ErrorContext::new(FormgateError::Other {
                message: error.to_string(),
            })
            .with_suggestion("Check that the file exists and the path is correct");
        }
    }

    let mut message = error.to_string();
    let chain: Vec<String> = error.chain().skip(1).map(ToString::to_string).collect();
    if !chain.is_empty() {
        message.push_str("\n\nCaused by:");
        for (i, cause) in chain.iter().enumerate() {
            message.push_str(&format!("\n  {}: {}", i + 1, cause));
        }
    }

    ErrorContext::new(FormgateError::Other {
        message,
    })
}

fn create_error_context(error: FormgateError) -> ErrorContext {
    match &error {
        FormgateError::UnknownField {
            suggestion,
            form,
            ..
        } => {
            let hint = match suggestion {
                Some(candidate) => format!("Did you mean '{candidate}'?"),
                None => format!("Run 'formgate schema show {form}' to list the declared fields"),
            };
            ErrorContext::new(error.clone()).with_suggestion(hint)
        }
        FormgateError::FormNotFound {
            ..
        } => ErrorContext::new(error.clone())
            .with_suggestion("Run 'formgate schema list' to see available forms, or pass a path to a schema .toml file")
            .with_details("Forms are either built in (event, job) or registered under [schemas] in the global config"),
        FormgateError::NotMultiSelect {
            ..
        } => ErrorContext::new(error.clone())
            .with_suggestion("Use 'set' to replace the value of single-valued fields"),
        FormgateError::DuplicateField {
            ..
        }
        | FormgateError::ConditionTargetMissing {
            ..
        }
        | FormgateError::SchemaInvalid {
            ..
        }
        | FormgateError::InvalidPattern {
            ..
        } => ErrorContext::new(error.clone())
            .with_details("Schemas are checked when they are built; fix the schema definition and retry"),
        FormgateError::SchemaParseError {
            reason,
            ..
        }
        | FormgateError::ValuesParseError {
            reason,
            ..
        } => {
            let reason = reason.clone();
            ErrorContext::new(error.clone()).with_details(reason)
        }
        FormgateError::ConfigError {
            ..
        } => ErrorContext::new(error.clone()).with_suggestion(
            "Check the TOML syntax of the global config, or pass another file with --config",
        ),
        FormgateError::ScriptError {
            ..
        } => ErrorContext::new(error.clone())
            .with_suggestion("Script lines are 'set <field> <value>', 'toggle <field> <option>', 'submit' or 'reset'"),
        _ => ErrorContext::new(error.clone()),
    }
}
