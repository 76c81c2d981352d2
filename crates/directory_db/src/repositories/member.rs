//! Member repository
//!
//! Data access for members, the central entity of the directory. A member
//! has a username, an age, and optionally belongs to a team through a
//! nullable foreign key.
//!
//! Queries that in an ORM would be derived from method names are written
//! out here as SQL, one function per query. Related teams are loaded either
//! eagerly through [`MemberRepository::find_all_with_team`] or on demand
//! through [`MemberRepository::team_of`]; there are no proxies.

use chrono::{DateTime, Utc};
use sqlx::{PgConnection, PgPool, Postgres, QueryBuilder};
use tracing::debug;

use directory_core::{MemberId, Page, PageRequest, SortDirection, TeamId};

use crate::error::DatabaseError;
use crate::example::MemberProbe;
use crate::repositories::team::{TeamRow, TEAM_COLUMNS};
use crate::spec::MemberSpec;

pub(crate) const MEMBER_COLUMNS: &str =
    "member_id, username, age, team_id, created_at, updated_at";

/// Select list used by queries that join members against teams
pub(crate) const MEMBER_JOIN_SELECT: &str = "SELECT m.member_id, m.username, m.age, m.team_id, \
     m.created_at, m.updated_at \
     FROM members m LEFT JOIN teams t ON t.team_id = m.team_id";

/// Repository for member rows
#[derive(Debug, Clone)]
pub struct MemberRepository {
    pool: PgPool,
}

impl MemberRepository {
    /// Creates a new repository over the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // ------------------------------------------------------------------
    // Basic CRUD
    // ------------------------------------------------------------------

    /// Inserts a member and returns the stored row
    pub async fn insert(&self, member: NewMember) -> Result<MemberRow, DatabaseError> {
        let row = sqlx::query_as::<_, MemberRow>(
            "INSERT INTO members (username, age, team_id) \
             VALUES ($1, $2, $3) \
             RETURNING member_id, username, age, team_id, created_at, updated_at",
        )
        .bind(&member.username)
        .bind(member.age)
        .bind(member.team_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    /// Fetches a member by id, `None` if it does not exist
    pub async fn find_by_id(&self, id: MemberId) -> Result<Option<MemberRow>, DatabaseError> {
        let row = sqlx::query_as::<_, MemberRow>(&format!(
            "SELECT {MEMBER_COLUMNS} FROM members WHERE member_id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    /// Fetches all members ordered by id
    pub async fn find_all(&self) -> Result<Vec<MemberRow>, DatabaseError> {
        let rows = sqlx::query_as::<_, MemberRow>(&format!(
            "SELECT {MEMBER_COLUMNS} FROM members ORDER BY member_id"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Deletes a member, returning the number of rows removed
    pub async fn delete(&self, id: MemberId) -> Result<u64, DatabaseError> {
        let result = sqlx::query("DELETE FROM members WHERE member_id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    /// Deletes every member, returning the number of rows removed
    pub async fn delete_all(&self) -> Result<u64, DatabaseError> {
        let result = sqlx::query("DELETE FROM members")
            .execute(&self.pool)
            .await?;

        debug!(rows = result.rows_affected(), "deleted all members");
        Ok(result.rows_affected())
    }

    /// Counts all members
    pub async fn count(&self) -> Result<i64, DatabaseError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM members")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    // ------------------------------------------------------------------
    // Field queries
    // ------------------------------------------------------------------

    /// Fetches members with the given username
    ///
    /// Returns an empty vector when nothing matches, never an error.
    pub async fn find_by_username(&self, username: &str) -> Result<Vec<MemberRow>, DatabaseError> {
        let rows = sqlx::query_as::<_, MemberRow>(&format!(
            "SELECT {MEMBER_COLUMNS} FROM members WHERE username = $1"
        ))
        .bind(username)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Fetches at most one member with the given username
    ///
    /// Returns `None` when nothing matches and fails with
    /// [`DatabaseError::NonUniqueResult`] when more than one row matches.
    pub async fn find_one_by_username(
        &self,
        username: &str,
    ) -> Result<Option<MemberRow>, DatabaseError> {
        let mut rows = self.find_by_username(username).await?;
        match rows.len() {
            0 => Ok(None),
            1 => Ok(rows.pop()),
            count => Err(DatabaseError::NonUniqueResult {
                entity: "member",
                count,
            }),
        }
    }

    /// Fetches members with the given username and an age strictly above
    /// the threshold
    pub async fn find_by_username_and_age_greater_than(
        &self,
        username: &str,
        age: i32,
    ) -> Result<Vec<MemberRow>, DatabaseError> {
        let rows = sqlx::query_as::<_, MemberRow>(&format!(
            "SELECT {MEMBER_COLUMNS} FROM members WHERE username = $1 AND age > $2"
        ))
        .bind(username)
        .bind(age)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Fetches members matching both username and exact age
    pub async fn find_user(&self, username: &str, age: i32) -> Result<Vec<MemberRow>, DatabaseError> {
        let rows = sqlx::query_as::<_, MemberRow>(&format!(
            "SELECT {MEMBER_COLUMNS} FROM members WHERE username = $1 AND age = $2"
        ))
        .bind(username)
        .bind(age)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Lists every username, one entry per member
    pub async fn list_usernames(&self) -> Result<Vec<String>, DatabaseError> {
        let usernames =
            sqlx::query_scalar::<_, String>("SELECT username FROM members ORDER BY member_id")
                .fetch_all(&self.pool)
                .await?;

        Ok(usernames)
    }

    /// Fetches members whose username is in the given list
    pub async fn find_by_usernames(
        &self,
        usernames: &[String],
    ) -> Result<Vec<MemberRow>, DatabaseError> {
        let rows = sqlx::query_as::<_, MemberRow>(&format!(
            "SELECT {MEMBER_COLUMNS} FROM members WHERE username = ANY($1) ORDER BY member_id"
        ))
        .bind(usernames)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Fetches the member summary projection: id, username, and the name of
    /// the team the member belongs to, if any
    pub async fn find_summaries(&self) -> Result<Vec<MemberSummaryRow>, DatabaseError> {
        let rows = sqlx::query_as::<_, MemberSummaryRow>(
            "SELECT m.member_id, m.username, t.name AS team_name \
             FROM members m LEFT JOIN teams t ON t.team_id = m.team_id \
             ORDER BY m.member_id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    // ------------------------------------------------------------------
    // Paging
    // ------------------------------------------------------------------

    /// Fetches one page of members with the given age
    ///
    /// Runs the content query with LIMIT/OFFSET plus a COUNT query for the
    /// totals; the returned [`Page`] reports total elements, total pages,
    /// and first/next-page booleans.
    pub async fn find_by_age(
        &self,
        age: i32,
        request: &PageRequest,
        order: MemberOrder,
    ) -> Result<Page<MemberRow>, DatabaseError> {
        let content = sqlx::query_as::<_, MemberRow>(&format!(
            "SELECT {MEMBER_COLUMNS} FROM members WHERE age = $1 \
             ORDER BY {} {} LIMIT $2 OFFSET $3",
            order.field.column(),
            order.direction.as_sql(),
        ))
        .bind(age)
        .bind(request.limit())
        .bind(request.offset())
        .fetch_all(&self.pool)
        .await?;

        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM members WHERE age = $1")
            .bind(age)
            .fetch_one(&self.pool)
            .await?;

        Ok(Page::new(content, request, total as u64))
    }

    /// Fetches one page over all members
    pub async fn find_page(
        &self,
        request: &PageRequest,
        order: MemberOrder,
    ) -> Result<Page<MemberRow>, DatabaseError> {
        let content = sqlx::query_as::<_, MemberRow>(&format!(
            "SELECT {MEMBER_COLUMNS} FROM members ORDER BY {} {} LIMIT $1 OFFSET $2",
            order.field.column(),
            order.direction.as_sql(),
        ))
        .bind(request.limit())
        .bind(request.offset())
        .fetch_all(&self.pool)
        .await?;

        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM members")
            .fetch_one(&self.pool)
            .await?;

        Ok(Page::new(content, request, total as u64))
    }

    // ------------------------------------------------------------------
    // Bulk statements
    // ------------------------------------------------------------------

    /// Increments the age of every member at or above the threshold
    ///
    /// One statement-level UPDATE; returns the affected-row count. Rows
    /// fetched before this call keep their old values, so re-read anything
    /// that needs the new state.
    pub async fn increment_age_where_at_least(&self, age: i32) -> Result<u64, DatabaseError> {
        let result = sqlx::query("UPDATE members SET age = age + 1 WHERE age >= $1")
            .bind(age)
            .execute(&self.pool)
            .await?;

        debug!(
            threshold = age,
            rows = result.rows_affected(),
            "bulk age increment"
        );
        Ok(result.rows_affected())
    }

    // ------------------------------------------------------------------
    // Fetch strategies
    // ------------------------------------------------------------------

    /// Fetches all members together with their team in a single join
    ///
    /// The eager-load counterpart of [`MemberRepository::team_of`]: one
    /// statement, no per-row secondary queries.
    pub async fn find_all_with_team(&self) -> Result<Vec<MemberWithTeamRow>, DatabaseError> {
        let rows = sqlx::query_as::<_, MemberWithTeamRow>(
            "SELECT m.member_id, m.username, m.age, m.team_id, t.name AS team_name \
             FROM members m LEFT JOIN teams t ON t.team_id = m.team_id \
             ORDER BY m.member_id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Fetches members with the given username, team joined in
    pub async fn find_with_team_by_username(
        &self,
        username: &str,
    ) -> Result<Vec<MemberWithTeamRow>, DatabaseError> {
        let rows = sqlx::query_as::<_, MemberWithTeamRow>(
            "SELECT m.member_id, m.username, m.age, m.team_id, t.name AS team_name \
             FROM members m LEFT JOIN teams t ON t.team_id = m.team_id \
             WHERE m.username = $1 ORDER BY m.member_id",
        )
        .bind(username)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Fetches the team a member belongs to, on demand
    ///
    /// The explicit replacement for a lazy-loading proxy: call it at the
    /// point where the team is actually needed.
    pub async fn team_of(&self, member: &MemberRow) -> Result<Option<TeamRow>, DatabaseError> {
        let Some(team_id) = member.team_id else {
            return Ok(None);
        };

        let team = sqlx::query_as::<_, TeamRow>(&format!(
            "SELECT {TEAM_COLUMNS} FROM teams WHERE team_id = $1"
        ))
        .bind(team_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(team)
    }

    // ------------------------------------------------------------------
    // Locking
    // ------------------------------------------------------------------

    /// Fetches members by username with a row-level write lock
    ///
    /// Appends `FOR UPDATE`, so this must run on a connection that holds an
    /// open transaction; the lock is released when the caller commits or
    /// rolls back.
    pub async fn find_by_username_for_update(
        &self,
        conn: &mut PgConnection,
        username: &str,
    ) -> Result<Vec<MemberRow>, DatabaseError> {
        let rows = sqlx::query_as::<_, MemberRow>(&format!(
            "SELECT {MEMBER_COLUMNS} FROM members WHERE username = $1 FOR UPDATE"
        ))
        .bind(username)
        .fetch_all(&mut *conn)
        .await?;

        Ok(rows)
    }

    // ------------------------------------------------------------------
    // Specifications and query by example
    // ------------------------------------------------------------------

    /// Fetches members matching a composed predicate
    pub async fn find_all_matching(
        &self,
        spec: &MemberSpec,
    ) -> Result<Vec<MemberRow>, DatabaseError> {
        let mut builder: QueryBuilder<Postgres> =
            QueryBuilder::new(format!("{MEMBER_JOIN_SELECT} WHERE "));
        spec.push_predicate(&mut builder);
        builder.push(" ORDER BY m.member_id");

        let rows = builder
            .build_query_as::<MemberRow>()
            .fetch_all(&self.pool)
            .await?;

        Ok(rows)
    }

    /// Fetches members matching a probe; unset probe fields are ignored
    pub async fn find_by_example(
        &self,
        probe: &MemberProbe,
    ) -> Result<Vec<MemberRow>, DatabaseError> {
        let mut builder: QueryBuilder<Postgres> =
            QueryBuilder::new(format!("{MEMBER_JOIN_SELECT} WHERE "));
        probe.push_conditions(&mut builder);
        builder.push(" ORDER BY m.member_id");

        let rows = builder
            .build_query_as::<MemberRow>()
            .fetch_all(&self.pool)
            .await?;

        Ok(rows)
    }
}

/// Column a member page can be ordered by
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberSortField {
    MemberId,
    Username,
    Age,
}

impl MemberSortField {
    /// The column name this field sorts on
    pub fn column(&self) -> &'static str {
        match self {
            MemberSortField::MemberId => "member_id",
            MemberSortField::Username => "username",
            MemberSortField::Age => "age",
        }
    }
}

/// Sort order for a member page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemberOrder {
    pub field: MemberSortField,
    pub direction: SortDirection,
}

impl MemberOrder {
    /// Ascending order on the given field
    pub fn asc(field: MemberSortField) -> Self {
        Self {
            field,
            direction: SortDirection::Asc,
        }
    }

    /// Descending order on the given field
    pub fn desc(field: MemberSortField) -> Self {
        Self {
            field,
            direction: SortDirection::Desc,
        }
    }
}

/// Database row for a member
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct MemberRow {
    pub member_id: MemberId,
    pub username: String,
    pub age: i32,
    pub team_id: Option<TeamId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Projection of a member: id, username, and team name from the join
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct MemberSummaryRow {
    pub member_id: MemberId,
    pub username: String,
    pub team_name: Option<String>,
}

/// A member with its team eagerly joined in
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct MemberWithTeamRow {
    pub member_id: MemberId,
    pub username: String,
    pub age: i32,
    pub team_id: Option<TeamId>,
    pub team_name: Option<String>,
}

/// Data for inserting a new member
#[derive(Debug, Clone)]
pub struct NewMember {
    pub username: String,
    pub age: i32,
    pub team_id: Option<TeamId>,
}

impl NewMember {
    /// A member with the given username, age zero, no team
    pub fn named(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            age: 0,
            team_id: None,
        }
    }

    /// A member with the given username and age, no team
    pub fn with_age(username: impl Into<String>, age: i32) -> Self {
        Self {
            username: username.into(),
            age,
            team_id: None,
        }
    }

    /// Assigns the member to a team
    pub fn in_team(mut self, team_id: TeamId) -> Self {
        self.team_id = Some(team_id);
        self
    }
}
