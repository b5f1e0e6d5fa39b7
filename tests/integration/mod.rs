//! Integration test suite for formgate
//!
//! These tests run the real `formgate` binary against files in a temporary
//! directory.
//!
//! # Running Integration Tests
//!
//! ```bash
//! cargo test --test integration
//! ```
//!
//! # Test Organization
//!
//! - **check**: `formgate check` on built-in and file schemas, text and JSON output
//! - **schema**: `formgate schema list` and `formgate schema show`
//! - **replay**: `formgate replay` scripts and script errors

// Shared test utilities (from parent tests/ directory)
#[path = "../common/mod.rs"]
mod common;

mod check;
mod replay;
mod schema;
