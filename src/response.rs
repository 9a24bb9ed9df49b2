//! Response bodies and status helpers.

use crate::model::{FavoriteCharacter, FavoritePlanet, User};
use crate::service::FavoriteStatus;
use axum::{http::StatusCode, Json};
use serde::Serialize;

/// Body of every favorite mutation: `{"status": ..., "favorite": {...}}`.
#[derive(Debug, Serialize)]
pub struct FavoriteResponse<F> {
    pub status: FavoriteStatus,
    pub favorite: F,
}

/// Body of `GET /users/favorites`: the current user with their active favorites.
#[derive(Debug, Serialize)]
pub struct UserFavorites {
    pub user: User,
    pub characters: Vec<FavoriteCharacter>,
    pub planets: Vec<FavoritePlanet>,
}

impl FavoriteStatus {
    pub fn http_status(self) -> StatusCode {
        match self {
            FavoriteStatus::Created => StatusCode::CREATED,
            FavoriteStatus::Exists | FavoriteStatus::Reactivated | FavoriteStatus::Deactivated => StatusCode::OK,
        }
    }
}

pub fn ok<T: Serialize>(data: T) -> (StatusCode, Json<T>) {
    (StatusCode::OK, Json(data))
}

pub fn favorite<F: Serialize>(status: FavoriteStatus, favorite: F) -> (StatusCode, Json<FavoriteResponse<F>>) {
    (status.http_status(), Json(FavoriteResponse { status, favorite }))
}
