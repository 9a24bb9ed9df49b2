//! POST/DELETE /favorite/people/:id and /favorite/planet/:id.
//! Generic over the link kind; the router instantiates one handler per kind.

use super::parse_id;
use crate::error::AppError;
use crate::extractors::CurrentUser;
use crate::model::FavoriteLink;
use crate::response::favorite;
use crate::service::{FavoriteService, FavoriteStatus, ACTIVE_FAVORITE_NOT_FOUND};
use crate::state::AppState;
use axum::extract::{Path, State};

pub async fn add_favorite<F: FavoriteLink>(
    CurrentUser(user_id): CurrentUser,
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let target_id = parse_id(&id_str, F::TARGET_NOT_FOUND)?;
    let (status, link) = FavoriteService::add::<F>(&state.store, user_id, target_id).await?;
    Ok(favorite(status, link))
}

pub async fn remove_favorite<F: FavoriteLink>(
    CurrentUser(user_id): CurrentUser,
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let target_id = parse_id(&id_str, ACTIVE_FAVORITE_NOT_FOUND)?;
    let link = FavoriteService::remove::<F>(&state.store, user_id, target_id).await?;
    Ok(favorite(FavoriteStatus::Deactivated, link))
}
