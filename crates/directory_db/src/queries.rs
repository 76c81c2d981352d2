//! Hand-maintained report queries
//!
//! Queries that do not belong to any one repository live here, the escape
//! hatch layered beside the repositories. Add one function per report and
//! keep the SQL next to the type it returns.

use sqlx::PgPool;

use crate::error::DatabaseError;
use crate::repositories::member::{MemberRow, MEMBER_COLUMNS};

/// Ad-hoc member search and reporting queries
#[derive(Debug, Clone)]
pub struct MemberSearch {
    pool: PgPool,
}

impl MemberSearch {
    /// Creates the search facade over the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Fetches members whose username contains the given fragment,
    /// case-insensitively
    pub async fn by_username_fragment(
        &self,
        fragment: &str,
    ) -> Result<Vec<MemberRow>, DatabaseError> {
        let pattern = contains_pattern(fragment);

        let rows = sqlx::query_as::<_, MemberRow>(&format!(
            "SELECT {MEMBER_COLUMNS} FROM members WHERE username ILIKE $1 ORDER BY member_id"
        ))
        .bind(pattern)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Reports how many members each team has, teams with no members
    /// included with a count of zero
    pub async fn team_headcounts(&self) -> Result<Vec<TeamHeadcountRow>, DatabaseError> {
        let rows = sqlx::query_as::<_, TeamHeadcountRow>(
            "SELECT t.name AS team_name, COUNT(m.member_id) AS member_count \
             FROM teams t LEFT JOIN members m ON m.team_id = t.team_id \
             GROUP BY t.team_id, t.name \
             ORDER BY t.name",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}

/// One row of the per-team headcount report
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct TeamHeadcountRow {
    pub team_name: String,
    pub member_count: i64,
}

/// Builds a contains-LIKE pattern, escaping pattern metacharacters in the
/// fragment
///
/// The escape character itself must be escaped first, otherwise a fragment
/// ending in `\` would swallow the closing `%` wildcard.
fn contains_pattern(fragment: &str) -> String {
    let escaped = fragment
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_fragment_is_wrapped_in_wildcards() {
        assert_eq!(contains_pattern("alice"), "%alice%");
    }

    #[test]
    fn like_metacharacters_are_escaped() {
        assert_eq!(contains_pattern("50%"), "%50\\%%");
        assert_eq!(contains_pattern("a_b"), "%a\\_b%");
    }

    #[test]
    fn trailing_backslash_cannot_escape_the_wildcard() {
        assert_eq!(contains_pattern("a\\"), "%a\\\\%");
        assert_eq!(contains_pattern("\\%"), "%\\\\\\%%");
    }
}
