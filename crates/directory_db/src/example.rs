//! Query by example
//!
//! A [`MemberProbe`] is a partially-filled member shape: every set field
//! becomes an equality condition, every unset field is ignored. This is the
//! explicit form of an example matcher with ignore-paths: leaving a field
//! as `None` is the ignore.

use sqlx::{Postgres, QueryBuilder};

/// A probe for example-based member queries
///
/// # Example
///
/// ```rust
/// use directory_db::MemberProbe;
///
/// // Matches on username only; age is ignored.
/// let probe = MemberProbe::default().with_username("m1");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemberProbe {
    pub username: Option<String>,
    pub age: Option<i32>,
    pub team_name: Option<String>,
}

impl MemberProbe {
    /// Sets the username condition
    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    /// Sets the exact-age condition
    pub fn with_age(mut self, age: i32) -> Self {
        self.age = Some(age);
        self
    }

    /// Sets the team-name condition
    pub fn with_team_name(mut self, name: impl Into<String>) -> Self {
        self.team_name = Some(name.into());
        self
    }

    /// Whether no field is set; an empty probe matches everything
    pub fn is_empty(&self) -> bool {
        self.username.is_none() && self.age.is_none() && self.team_name.is_none()
    }

    /// Renders the set fields as AND-joined conditions with bound parameters
    ///
    /// Pushes `TRUE` for an empty probe so the surrounding WHERE clause
    /// stays valid.
    pub fn push_conditions(&self, builder: &mut QueryBuilder<'_, Postgres>) {
        if self.is_empty() {
            builder.push("TRUE");
            return;
        }

        let mut first = true;
        let mut separated = |builder: &mut QueryBuilder<'_, Postgres>| {
            if !first {
                builder.push(" AND ");
            }
            first = false;
        };

        if let Some(username) = &self.username {
            separated(builder);
            builder.push("m.username = ");
            builder.push_bind(username.clone());
        }
        if let Some(age) = self.age {
            separated(builder);
            builder.push("m.age = ");
            builder.push_bind(age);
        }
        if let Some(name) = &self.team_name {
            separated(builder);
            builder.push("t.name = ");
            builder.push_bind(name.clone());
        }
    }
}
