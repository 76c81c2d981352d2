//! Team repository
//!
//! Teams sit on the "one" side of the one-to-many relation with members.
//! The back-reference is not materialized on the row; it is the explicit
//! [`TeamRepository::members_of`] query.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use directory_core::TeamId;

use crate::error::DatabaseError;
use crate::repositories::member::{MemberRow, MEMBER_COLUMNS};

pub(crate) const TEAM_COLUMNS: &str = "team_id, name, created_at, updated_at";

/// Repository for team rows
#[derive(Debug, Clone)]
pub struct TeamRepository {
    pool: PgPool,
}

impl TeamRepository {
    /// Creates a new repository over the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Inserts a team and returns the stored row
    pub async fn insert(&self, team: NewTeam) -> Result<TeamRow, DatabaseError> {
        let row = sqlx::query_as::<_, TeamRow>(
            "INSERT INTO teams (name) VALUES ($1) \
             RETURNING team_id, name, created_at, updated_at",
        )
        .bind(&team.name)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    /// Fetches a team by id, `None` if it does not exist
    pub async fn find_by_id(&self, id: TeamId) -> Result<Option<TeamRow>, DatabaseError> {
        let row = sqlx::query_as::<_, TeamRow>(&format!(
            "SELECT {TEAM_COLUMNS} FROM teams WHERE team_id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    /// Fetches all teams ordered by id
    pub async fn find_all(&self) -> Result<Vec<TeamRow>, DatabaseError> {
        let rows = sqlx::query_as::<_, TeamRow>(&format!(
            "SELECT {TEAM_COLUMNS} FROM teams ORDER BY team_id"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Counts all teams
    pub async fn count(&self) -> Result<i64, DatabaseError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM teams")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    /// Fetches the members of a team, the one-to-many back-reference
    pub async fn members_of(&self, id: TeamId) -> Result<Vec<MemberRow>, DatabaseError> {
        let rows = sqlx::query_as::<_, MemberRow>(&format!(
            "SELECT {MEMBER_COLUMNS} FROM members WHERE team_id = $1 ORDER BY member_id"
        ))
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Deletes a team, returning the number of rows removed
    ///
    /// Fails with a foreign-key violation while members still reference it.
    pub async fn delete(&self, id: TeamId) -> Result<u64, DatabaseError> {
        let result = sqlx::query("DELETE FROM teams WHERE team_id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}

/// Database row for a team
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct TeamRow {
    pub team_id: TeamId,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Data for inserting a new team
#[derive(Debug, Clone)]
pub struct NewTeam {
    pub name: String,
}

impl NewTeam {
    /// A team with the given name
    pub fn named(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}
