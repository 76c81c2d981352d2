//! Team handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use directory_core::TeamId;
use directory_db::{NewTeam, TeamRepository};

use crate::dto::member::MemberResponse;
use crate::dto::team::{CreateTeamRequest, TeamResponse};
use crate::{error::ApiError, AppState};

/// Creates a new team
pub async fn create_team(
    State(state): State<AppState>,
    Json(request): Json<CreateTeamRequest>,
) -> Result<(StatusCode, Json<TeamResponse>), ApiError> {
    request.validate()?;

    let repository = TeamRepository::new(state.pool.clone());
    let row = repository.insert(NewTeam::named(request.name)).await?;

    tracing::info!(team_id = %row.team_id, "team created");
    Ok((StatusCode::CREATED, Json(row.into())))
}

/// Lists all teams
pub async fn list_teams(
    State(state): State<AppState>,
) -> Result<Json<Vec<TeamResponse>>, ApiError> {
    let repository = TeamRepository::new(state.pool.clone());
    let rows = repository.find_all().await?;

    Ok(Json(rows.into_iter().map(TeamResponse::from).collect()))
}

/// Gets a team by id
pub async fn get_team(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<TeamResponse>, ApiError> {
    let repository = TeamRepository::new(state.pool.clone());

    let Some(row) = repository.find_by_id(TeamId::new(id)).await? else {
        return Err(ApiError::NotFound(format!("team {id} not found")));
    };
    Ok(Json(row.into()))
}

/// Lists the members of a team
pub async fn team_members(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Vec<MemberResponse>>, ApiError> {
    let repository = TeamRepository::new(state.pool.clone());
    let team_id = TeamId::new(id);

    if repository.find_by_id(team_id).await?.is_none() {
        return Err(ApiError::NotFound(format!("team {id} not found")));
    }
    let rows = repository.members_of(team_id).await?;

    Ok(Json(rows.into_iter().map(MemberResponse::from).collect()))
}
