//! GET /planets, GET /planets/:id

use super::parse_id;
use crate::error::AppError;
use crate::model::{FavoriteLink, FavoritePlanet, Planet};
use crate::response::ok;
use crate::service::CatalogService;
use crate::state::AppState;
use axum::extract::{Path, State};

const PLANET_NOT_FOUND: &str = FavoritePlanet::TARGET_NOT_FOUND;

pub async fn list_planets(
    State(state): State<AppState>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let rows: Vec<Planet> = CatalogService::list(&state.store).await?;
    Ok(ok(rows))
}

pub async fn get_planet(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let id = parse_id(&id_str, PLANET_NOT_FOUND)?;
    let row: Planet = CatalogService::read(&state.store, id)
        .await?
        .ok_or_else(|| AppError::NotFound(PLANET_NOT_FOUND.into()))?;
    Ok(ok(row))
}
