//! Resource routes: people, planets, users, favorites.

use crate::handlers::favorites::{add_favorite, remove_favorite};
use crate::handlers::people::{get_person, list_people};
use crate::handlers::planets::{get_planet, list_planets};
use crate::handlers::users::{list_users, my_favorites};
use crate::model::{FavoriteCharacter, FavoritePlanet};
use crate::state::AppState;
use axum::{routing::get, routing::post, Router};

pub fn api_routes(state: AppState) -> Router {
    Router::new()
        .route("/people", get(list_people))
        .route("/people/:id", get(get_person))
        .route("/planets", get(list_planets))
        .route("/planets/:id", get(get_planet))
        .route("/users", get(list_users))
        .route("/users/favorites", get(my_favorites))
        .route(
            "/favorite/people/:id",
            post(add_favorite::<FavoriteCharacter>).delete(remove_favorite::<FavoriteCharacter>),
        )
        .route(
            "/favorite/planet/:id",
            post(add_favorite::<FavoritePlanet>).delete(remove_favorite::<FavoritePlanet>),
        )
        .with_state(state)
}
