use serde::Serialize;
use sqlx::FromRow;

use super::Record;

#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct Character {
    pub id: i64,
    pub name: String,
    pub gender: String,
    pub skin_color: String,
    pub hair_color: String,
    pub height: String,
}

impl Record for Character {
    const TABLE: &'static str = "characters";

    fn id(&self) -> i64 {
        self.id
    }
}
