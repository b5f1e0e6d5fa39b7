//! formgate - conditional form validation
//!
//! A form is described once as a [`schema::FormSchema`]: its fields, their
//! default values, which other field switches each one on or off, and the
//! ordered rule chain each field must pass. One generic engine then serves any
//! number of schemas.
//!
//! # Architecture Overview
//!
//! ```text
//! user input ──▶ FieldStore ──▶ resolve_active ──▶ (on submit) validate ──▶ accept / reject
//!                    │               │                       │
//!                 FormState     ActiveFields              ErrorMap
//! ```
//!
//! - [`store`] - the Field Store: current values, type-agnostic
//! - [`visibility`] - the Visibility Resolver: state → active fields
//! - [`validation`] - the Validation Engine: state + active fields → errors
//! - [`controller`] - the Form Controller: edit/submit cycle and submission hand-off
//!
//! Supporting modules:
//!
//! - [`schema`] - schema types, the built-in event and job forms, TOML schema files
//! - [`config`] - `~/.formgate/config.toml` and form lookup
//! - [`core`] - error types and user-facing error rendering
//! - [`cli`] - the `formgate` command line
//!
//! # Example
//!
//! ```rust,no_run
//! use formgate_cli::controller::{CollectingSink, FormController};
//! use formgate_cli::schema::builtin::event_registration;
//! use std::sync::Arc;
//!
//! # fn example() -> formgate_cli::core::Result<()> {
//! let mut form = FormController::new(Arc::new(event_registration()?));
//! form.change("name", "Ada")?;
//! form.change("email", "ada@example.com")?;
//! form.change("age", "36")?;
//! form.change("attendingWithGuest", "yes")?;
//!
//! let mut sink = CollectingSink::new();
//! let outcome = form.submit(&mut sink);
//! assert_eq!(outcome.errors().and_then(|e| e.get("guestName")), Some("Guest Name is required"));
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod controller;
pub mod core;
pub mod schema;
pub mod store;
pub mod validation;
pub mod visibility;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
