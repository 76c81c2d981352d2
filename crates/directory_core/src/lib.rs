//! Core types for the member directory
//!
//! This crate provides the building blocks shared by the data-access and API
//! layers:
//! - Strongly-typed identifiers for database entities
//! - Paging vocabulary: page requests, sort direction, and page results

pub mod identifiers;
pub mod paging;

pub use identifiers::{ItemId, MemberId, TeamId};
pub use paging::{Page, PageRequest, SortDirection};
