use serde::Serialize;
use sqlx::FromRow;

use super::Record;

#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct Planet {
    pub id: i64,
    pub name: String,
    pub climate: String,
    pub surface_water: String,
    pub diameter: String,
    pub rotation_period: String,
}

impl Record for Planet {
    const TABLE: &'static str = "planets";

    fn id(&self) -> i64 {
        self.id
    }
}
