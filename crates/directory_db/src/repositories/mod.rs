//! Repository implementations
//!
//! One repository per aggregate: members, teams, and items. Each holds a
//! clone of the connection pool and exposes explicit, hand-written queries.

pub mod item;
pub mod member;
pub mod team;
