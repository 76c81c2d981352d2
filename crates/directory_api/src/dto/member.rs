//! Member request/response DTOs

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use directory_core::{MemberId, SortDirection, TeamId};
use directory_db::{MemberOrder, MemberRow, MemberSortField, NewMember};

/// Request to create a member
#[derive(Debug, Deserialize, Validate)]
pub struct CreateMemberRequest {
    #[validate(custom(function = not_blank))]
    pub username: String,
    #[validate(range(min = 0, message = "must not be negative"))]
    #[serde(default)]
    pub age: i32,
    pub team_id: Option<i64>,
}

impl CreateMemberRequest {
    /// Converts into insert data for the repository
    pub fn into_new_member(self) -> NewMember {
        NewMember {
            username: self.username,
            age: self.age,
            team_id: self.team_id.map(TeamId::new),
        }
    }
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("not_blank").with_message("must not be blank".into()));
    }
    Ok(())
}

/// Query parameters for the paged member list
#[derive(Debug, Deserialize)]
pub struct MemberPageQuery {
    #[serde(default)]
    pub page: u32,
    pub size: Option<u32>,
    pub sort: Option<String>,
    pub order: Option<String>,
}

impl MemberPageQuery {
    const DEFAULT_PAGE_SIZE: u32 = 20;
    const MAX_PAGE_SIZE: u32 = 100;

    /// The effective page size, clamped to the allowed maximum
    pub fn effective_size(&self) -> u32 {
        self.size
            .unwrap_or(Self::DEFAULT_PAGE_SIZE)
            .min(Self::MAX_PAGE_SIZE)
    }

    /// Resolves the sort column and direction, rejecting unknown names
    pub fn sort_order(&self) -> Result<MemberOrder, String> {
        let field = match self.sort.as_deref() {
            None | Some("member_id") => MemberSortField::MemberId,
            Some("username") => MemberSortField::Username,
            Some("age") => MemberSortField::Age,
            Some(other) => return Err(format!("unknown sort field '{other}'")),
        };
        let direction = match self.order.as_deref() {
            None | Some("asc") => SortDirection::Asc,
            Some("desc") => SortDirection::Desc,
            Some(other) => return Err(format!("unknown sort order '{other}'")),
        };
        Ok(MemberOrder { field, direction })
    }
}

/// Member response body
#[derive(Debug, Serialize)]
pub struct MemberResponse {
    pub member_id: MemberId,
    pub username: String,
    pub age: i32,
    pub team_id: Option<TeamId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team_name: Option<String>,
}

impl From<MemberRow> for MemberResponse {
    fn from(row: MemberRow) -> Self {
        Self {
            member_id: row.member_id,
            username: row.username,
            age: row.age,
            team_id: row.team_id,
            team_name: None,
        }
    }
}
