use serde::Serialize;
use sqlx::FromRow;

use super::Record;

#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct User {
    pub id: i64,
    /// Handle.
    pub user: String,
    pub first_name: String,
    pub last_name: String,
    pub mail: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub is_active: bool,
}

impl Record for User {
    const TABLE: &'static str = "users";

    fn id(&self) -> i64 {
        self.id
    }
}
