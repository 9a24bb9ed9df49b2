//! Record types and their JSON projections. Field names are column names; the serde
//! projection of each struct is the response body verbatim.

pub mod character;
pub mod favorite;
pub mod planet;
pub mod user;

pub use character::Character;
pub use favorite::{FavoriteCharacter, FavoriteLink, FavoritePlanet};
pub use planet::Planet;
pub use user::User;

use serde::Serialize;
use sqlx::postgres::PgRow;
use sqlx::sqlite::SqliteRow;
use sqlx::FromRow;

/// A row of one table, addressed by an integer primary key.
pub trait Record:
    for<'r> FromRow<'r, SqliteRow> + for<'r> FromRow<'r, PgRow> + Serialize + Send + Unpin + 'static
{
    const TABLE: &'static str;

    fn id(&self) -> i64;
}
