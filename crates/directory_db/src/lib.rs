//! Database layer for the member directory
//!
//! This crate provides PostgreSQL data access using SQLx, following the
//! repository pattern: one pool-holding struct per aggregate, with every
//! query written out explicitly.
//!
//! There is no object-tracking cache and there are no lazy-loading proxies.
//! Rows come back as plain detached values; related records are loaded
//! either eagerly through a join (`find_all_with_team`) or on demand through
//! an explicit fetch (`team_of`). After a bulk statement, callers that need
//! the new state simply re-read.
//!
//! # Example
//!
//! ```rust,ignore
//! use directory_db::{create_pool_from_url, MemberRepository};
//!
//! let pool = create_pool_from_url("postgres://localhost/directory").await?;
//! let members = MemberRepository::new(pool);
//! ```

pub mod error;
pub mod example;
pub mod pool;
pub mod queries;
pub mod repositories;
pub mod spec;

pub use error::DatabaseError;
pub use example::MemberProbe;
pub use pool::{create_pool, create_pool_from_url, DatabaseConfig, DatabasePool};
pub use queries::MemberSearch;
pub use repositories::item::{ItemChanges, ItemRepository, ItemRow, NewItem};
pub use repositories::member::{
    MemberOrder, MemberRepository, MemberRow, MemberSortField, MemberSummaryRow,
    MemberWithTeamRow, NewMember,
};
pub use repositories::team::{NewTeam, TeamRepository, TeamRow};
pub use spec::MemberSpec;
