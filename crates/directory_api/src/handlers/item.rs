//! Item handlers

use axum::{
    extract::{Path, State},
    Json,
};

use directory_db::ItemRepository;

use crate::dto::item::{ItemResponse, ItemUpdateForm};
use crate::{error::ApiError, AppState};

/// Applies a validated update form to an item
///
/// The form carries its own id; a mismatch with the path is a client error
/// rather than a silent overwrite of a different row.
pub async fn update_item(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(form): Json<ItemUpdateForm>,
) -> Result<Json<ItemResponse>, ApiError> {
    let (item_id, changes) = form.into_changes()?;

    if item_id.as_i64() != id {
        return Err(ApiError::BadRequest(format!(
            "form id {} does not match path id {id}",
            item_id.as_i64()
        )));
    }

    let repository = ItemRepository::new(state.pool.clone());
    let updated = repository.update(item_id, changes).await?;
    if updated == 0 {
        return Err(ApiError::NotFound(format!("item {id} not found")));
    }

    let Some(row) = repository.find_by_id(item_id).await? else {
        return Err(ApiError::NotFound(format!("item {id} not found")));
    };

    tracing::info!(item_id = id, "item updated");
    Ok(Json(row.into()))
}
