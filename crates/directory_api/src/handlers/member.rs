//! Member handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use directory_core::{MemberId, PageRequest};
use directory_db::MemberRepository;

use crate::dto::member::{CreateMemberRequest, MemberPageQuery, MemberResponse};
use crate::dto::PageResponse;
use crate::{error::ApiError, AppState};

/// Creates a new member
pub async fn create_member(
    State(state): State<AppState>,
    Json(request): Json<CreateMemberRequest>,
) -> Result<(StatusCode, Json<MemberResponse>), ApiError> {
    request.validate()?;

    let repository = MemberRepository::new(state.pool.clone());
    let row = repository.insert(request.into_new_member()).await?;

    tracing::info!(member_id = %row.member_id, "member created");
    Ok((StatusCode::CREATED, Json(row.into())))
}

/// Lists members, one page at a time
pub async fn list_members(
    State(state): State<AppState>,
    Query(query): Query<MemberPageQuery>,
) -> Result<Json<PageResponse<MemberResponse>>, ApiError> {
    let order = query.sort_order().map_err(ApiError::BadRequest)?;
    let request = PageRequest::of(query.page, query.effective_size());

    let repository = MemberRepository::new(state.pool.clone());
    let page = repository.find_page(&request, order).await?;

    Ok(Json(page.map(MemberResponse::from).into()))
}

/// Gets a member by id, with its team name joined in
pub async fn get_member(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<MemberResponse>, ApiError> {
    let repository = MemberRepository::new(state.pool.clone());
    let member_id = MemberId::new(id);

    let Some(row) = repository.find_by_id(member_id).await? else {
        return Err(ApiError::NotFound(format!("member {id} not found")));
    };
    let team = repository.team_of(&row).await?;

    let mut response = MemberResponse::from(row);
    response.team_name = team.map(|t| t.name);
    Ok(Json(response))
}

/// Deletes a member
pub async fn delete_member(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    let repository = MemberRepository::new(state.pool.clone());
    let deleted = repository.delete(MemberId::new(id)).await?;

    if deleted == 0 {
        return Err(ApiError::NotFound(format!("member {id} not found")));
    }

    tracing::info!(member_id = id, "member deleted");
    Ok(StatusCode::NO_CONTENT)
}
