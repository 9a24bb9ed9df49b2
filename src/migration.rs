//! DDL for the five tables. Idempotent (`IF NOT EXISTS`); there is no schema evolution.
//! The statements are shared by both backends except for the primary-key column, which is
//! substituted for `{pk}`.

use crate::error::AppError;
use crate::store::{Backend, Store};

const TABLES: &[(&str, &str)] = &[
    (
        "users",
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id {pk},
            "user" VARCHAR(50) NOT NULL,
            first_name VARCHAR(50) NOT NULL,
            last_name VARCHAR(50) NOT NULL,
            mail VARCHAR(120) NOT NULL UNIQUE,
            password VARCHAR(255) NOT NULL,
            is_active BOOLEAN NOT NULL DEFAULT TRUE
        )
        "#,
    ),
    (
        "characters",
        r#"
        CREATE TABLE IF NOT EXISTS characters (
            id {pk},
            name VARCHAR(120) NOT NULL,
            gender VARCHAR(20) NOT NULL,
            skin_color VARCHAR(40) NOT NULL,
            hair_color VARCHAR(40) NOT NULL,
            height VARCHAR(10) NOT NULL
        )
        "#,
    ),
    (
        "planets",
        r#"
        CREATE TABLE IF NOT EXISTS planets (
            id {pk},
            name VARCHAR(120) NOT NULL,
            climate VARCHAR(40) NOT NULL,
            surface_water VARCHAR(40) NOT NULL,
            diameter VARCHAR(40) NOT NULL,
            rotation_period VARCHAR(40) NOT NULL
        )
        "#,
    ),
    (
        "favorite_characters",
        r#"
        CREATE TABLE IF NOT EXISTS favorite_characters (
            id {pk},
            user_id BIGINT NOT NULL REFERENCES users (id) ON DELETE CASCADE,
            character_id BIGINT NOT NULL REFERENCES characters (id) ON DELETE CASCADE,
            created_at DATE,
            is_active BOOLEAN NOT NULL DEFAULT TRUE,
            action_source VARCHAR(40) NOT NULL DEFAULT 'manual',
            UNIQUE (user_id, character_id)
        )
        "#,
    ),
    (
        "favorite_planets",
        r#"
        CREATE TABLE IF NOT EXISTS favorite_planets (
            id {pk},
            user_id BIGINT NOT NULL REFERENCES users (id) ON DELETE CASCADE,
            planet_id BIGINT NOT NULL REFERENCES planets (id) ON DELETE CASCADE,
            created_at DATE,
            is_active BOOLEAN NOT NULL DEFAULT TRUE,
            action_source VARCHAR(40) NOT NULL DEFAULT 'manual',
            UNIQUE (user_id, planet_id)
        )
        "#,
    ),
];

pub const TABLE_NAMES: [&str; 5] = [
    "users",
    "characters",
    "planets",
    "favorite_characters",
    "favorite_planets",
];

/// Auto-assigned integer key. SQLite aliases `INTEGER PRIMARY KEY` to the rowid.
fn primary_key(backend: Backend) -> &'static str {
    match backend {
        Backend::Sqlite => "INTEGER PRIMARY KEY",
        Backend::Postgres => "BIGINT GENERATED BY DEFAULT AS IDENTITY PRIMARY KEY",
    }
}

pub fn table_ddl(backend: Backend, template: &str) -> String {
    template.replace("{pk}", primary_key(backend))
}

/// Create every table that does not exist yet, parents before children.
pub async fn apply_migrations(store: &Store) -> Result<(), AppError> {
    let mut tx = store.begin_write().await?;
    for (name, template) in TABLES {
        tracing::debug!(table = %name, "ensure table");
        tx.execute(&table_ddl(store.backend(), template), &[]).await?;
    }
    tx.commit().await?;
    Ok(())
}
