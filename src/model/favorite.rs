//! Favorite-links: one row per (user, target), soft-deleted through `is_active`.

use chrono::NaiveDate;
use serde::Serialize;
use sqlx::FromRow;

use super::{Character, Planet, Record};

pub const DEFAULT_ACTION_SOURCE: &str = "manual";

/// A join row between a user and a favoritable record. The character and planet variants share
/// every query through this trait; only table and column names differ.
pub trait FavoriteLink: Record {
    type Target: Record + Clone;

    /// Foreign-key column in `TABLE` referencing the target table.
    const TARGET_COLUMN: &'static str;
    /// Message returned when the target id does not exist.
    const TARGET_NOT_FOUND: &'static str;

    fn target_id(&self) -> i64;
    fn is_active(&self) -> bool;
    fn set_active(&mut self, active: bool);
    /// Embed the related record (or `None` when it is gone) into the projection.
    fn attach(&mut self, target: Option<Self::Target>);

    fn select_columns() -> String {
        format!(
            "id, user_id, {}, created_at, is_active, action_source",
            Self::TARGET_COLUMN
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct FavoriteCharacter {
    pub id: i64,
    pub user_id: i64,
    pub character_id: i64,
    pub created_at: Option<NaiveDate>,
    pub is_active: bool,
    pub action_source: String,
    #[sqlx(skip)]
    pub character: Option<Character>,
}

#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct FavoritePlanet {
    pub id: i64,
    pub user_id: i64,
    pub planet_id: i64,
    pub created_at: Option<NaiveDate>,
    pub is_active: bool,
    pub action_source: String,
    #[sqlx(skip)]
    pub planet: Option<Planet>,
}

impl Record for FavoriteCharacter {
    const TABLE: &'static str = "favorite_characters";

    fn id(&self) -> i64 {
        self.id
    }
}

impl Record for FavoritePlanet {
    const TABLE: &'static str = "favorite_planets";

    fn id(&self) -> i64 {
        self.id
    }
}

impl FavoriteLink for FavoriteCharacter {
    type Target = Character;

    const TARGET_COLUMN: &'static str = "character_id";
    const TARGET_NOT_FOUND: &'static str = "Person not found";

    fn target_id(&self) -> i64 {
        self.character_id
    }

    fn is_active(&self) -> bool {
        self.is_active
    }

    fn set_active(&mut self, active: bool) {
        self.is_active = active;
    }

    fn attach(&mut self, target: Option<Character>) {
        self.character = target;
    }
}

impl FavoriteLink for FavoritePlanet {
    type Target = Planet;

    const TARGET_COLUMN: &'static str = "planet_id";
    const TARGET_NOT_FOUND: &'static str = "Planet not found";

    fn target_id(&self) -> i64 {
        self.planet_id
    }

    fn is_active(&self) -> bool {
        self.is_active
    }

    fn set_active(&mut self, active: bool) {
        self.is_active = active;
    }

    fn attach(&mut self, target: Option<Planet>) {
        self.planet = target;
    }
}
