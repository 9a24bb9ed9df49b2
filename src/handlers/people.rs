//! GET /people, GET /people/:id

use super::parse_id;
use crate::error::AppError;
use crate::model::{Character, FavoriteCharacter, FavoriteLink};
use crate::response::ok;
use crate::service::CatalogService;
use crate::state::AppState;
use axum::extract::{Path, State};

const PERSON_NOT_FOUND: &str = FavoriteCharacter::TARGET_NOT_FOUND;

pub async fn list_people(
    State(state): State<AppState>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let rows: Vec<Character> = CatalogService::list(&state.store).await?;
    Ok(ok(rows))
}

pub async fn get_person(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let id = parse_id(&id_str, PERSON_NOT_FOUND)?;
    let row: Character = CatalogService::read(&state.store, id)
        .await?
        .ok_or_else(|| AppError::NotFound(PERSON_NOT_FOUND.into()))?;
    Ok(ok(row))
}
