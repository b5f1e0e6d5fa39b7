//! Core types shared by every formgate module.
//!
//! # Modules
//!
//! ## `error` - Error Handling System
//!
//! - [`FormgateError`] - Enumerated configuration and programming errors
//! - [`ErrorContext`] - User-friendly error wrapper with suggestions and details
//! - [`user_friendly_error`] - Convert any error to user-friendly format
//! - [`closest_match`] - "Did you mean" lookup for mistyped names
//!
//! Field validation failures are not errors in this sense; they live in
//! [`crate::validation::ErrorMap`].

pub mod error;

pub use error::{ErrorContext, FormgateError, closest_match, user_friendly_error};

/// Result alias for operations that fail with a [`FormgateError`].
pub type Result<T> = std::result::Result<T, FormgateError>;
