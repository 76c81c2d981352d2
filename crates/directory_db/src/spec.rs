//! Composable query predicates for members
//!
//! A [`MemberSpec`] is a reusable predicate value: leaf conditions on member
//! or team columns, combined with [`MemberSpec::and`] / [`MemberSpec::or`].
//! Repositories render a spec into a WHERE clause with bound parameters,
//! so values never end up in the SQL text.
//!
//! Team conditions assume the `members m LEFT JOIN teams t` aliases used by
//! [`MemberRepository::find_all_matching`].
//!
//! [`MemberRepository::find_all_matching`]: crate::MemberRepository::find_all_matching
//!
//! # Example
//!
//! ```rust
//! use directory_db::MemberSpec;
//!
//! let spec = MemberSpec::username("m1").and(MemberSpec::team_name("teamA"));
//! ```

use sqlx::{Postgres, QueryBuilder};

/// A composable predicate over the member/team join
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MemberSpec {
    /// `m.username = ?`
    UsernameEq(String),
    /// `m.age >= ?`
    AgeAtLeast(i32),
    /// `t.name = ?`
    TeamNameEq(String),
    /// Conjunction of two predicates
    And(Box<MemberSpec>, Box<MemberSpec>),
    /// Disjunction of two predicates
    Or(Box<MemberSpec>, Box<MemberSpec>),
}

impl MemberSpec {
    /// Predicate matching members with the given username
    pub fn username(username: impl Into<String>) -> Self {
        MemberSpec::UsernameEq(username.into())
    }

    /// Predicate matching members at or above the given age
    pub fn age_at_least(age: i32) -> Self {
        MemberSpec::AgeAtLeast(age)
    }

    /// Predicate matching members whose team has the given name
    pub fn team_name(name: impl Into<String>) -> Self {
        MemberSpec::TeamNameEq(name.into())
    }

    /// Conjunction: both predicates must hold
    pub fn and(self, other: MemberSpec) -> Self {
        MemberSpec::And(Box::new(self), Box::new(other))
    }

    /// Disjunction: either predicate may hold
    pub fn or(self, other: MemberSpec) -> Self {
        MemberSpec::Or(Box::new(self), Box::new(other))
    }

    /// Renders this predicate into the builder with bound parameters
    pub fn push_predicate(&self, builder: &mut QueryBuilder<'_, Postgres>) {
        match self {
            MemberSpec::UsernameEq(username) => {
                builder.push("m.username = ");
                builder.push_bind(username.clone());
            }
            MemberSpec::AgeAtLeast(age) => {
                builder.push("m.age >= ");
                builder.push_bind(*age);
            }
            MemberSpec::TeamNameEq(name) => {
                builder.push("t.name = ");
                builder.push_bind(name.clone());
            }
            MemberSpec::And(left, right) => {
                builder.push("(");
                left.push_predicate(builder);
                builder.push(" AND ");
                right.push_predicate(builder);
                builder.push(")");
            }
            MemberSpec::Or(left, right) => {
                builder.push("(");
                left.push_predicate(builder);
                builder.push(" OR ");
                right.push_predicate(builder);
                builder.push(")");
            }
        }
    }
}
