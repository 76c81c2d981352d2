//! Shared test infrastructure for the member directory
//!
//! # Modules
//!
//! - `database`: containerized Postgres management for integration tests
//! - `fixtures`: pre-built data sets for the repository contract tests
//! - `builders`: builder patterns for test data construction

pub mod builders;
pub mod database;
pub mod fixtures;

pub use builders::*;
pub use database::*;
pub use fixtures::*;
