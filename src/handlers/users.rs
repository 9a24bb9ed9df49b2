//! GET /users, GET /users/favorites

use crate::error::AppError;
use crate::extractors::CurrentUser;
use crate::model::User;
use crate::response::ok;
use crate::service::{CatalogService, FavoriteService};
use crate::state::AppState;
use axum::extract::State;

pub async fn list_users(
    State(state): State<AppState>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let rows: Vec<User> = CatalogService::list(&state.store).await?;
    Ok(ok(rows))
}

/// The current user with their active character and planet favorites.
pub async fn my_favorites(
    CurrentUser(user_id): CurrentUser,
    State(state): State<AppState>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let favorites = FavoriteService::user_favorites(&state.store, user_id).await?;
    Ok(ok(favorites))
}
