//! Fixed sample rows inserted into an empty database.

use crate::error::AppError;
use crate::migration::TABLE_NAMES;
use crate::state::AppState;
use crate::store::{Backend, Store};
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use chrono::NaiveDate;

type UserSeed = (i64, &'static str, &'static str, &'static str, &'static str);
type ReferenceSeed = (i64, &'static str, &'static str, &'static str, &'static str, &'static str);
type FavoriteSeed = (i64, i64, i64, (i32, u32, u32), bool, &'static str);

const USERS: &[UserSeed] = &[
    (1, "carlita03", "Carla", "Londoño", "carlita03@gmail.com"),
    (2, "josefacedo10", "Josefina", "Caicedo", "josefacedo10@gmail.com"),
    (3, "infandro14", "Pedro", "Infante", "infandro14@gmail.com"),
    (4, "veronesa25", "Verona", "Mesa", "veronesa25@outlook.com"),
];

const SEED_PASSWORD: &str = "hashed";

// id, name, gender, skin_color, hair_color, height
const CHARACTERS: &[ReferenceSeed] = &[
    (11, "Luke Skywalker", "male", "fair", "blond", "172"),
    (12, "C-3PO", "n/a", "gold", "n/a", "167"),
    (13, "R2-D2", "n/a", "white", "blue", "96"),
    (14, "Darth Vader", "male", "white", "none", "202"),
];

// id, name, climate, surface_water, diameter, rotation_period
const PLANETS: &[ReferenceSeed] = &[
    (21, "Tatooine", "arid", "1", "10465", "23"),
    (22, "Alderaan", "temperate", "40", "12500", "24"),
    (23, "Yavin IV", "temperate, tropical", "8", "10200", "24"),
    (24, "Hoth", "frozen", "100", "200", "23"),
];

// id, user_id, target_id, created_at, is_active, action_source
const FAVORITE_CHARACTERS: &[FavoriteSeed] = &[
    (31, 2, 11, (2025, 7, 4), true, "home"),
    (32, 3, 14, (2025, 6, 6), true, "navbar_button"),
    (33, 1, 13, (2025, 5, 16), false, "favorites_pages"),
    (34, 4, 12, (2025, 8, 1), true, "custom_list"),
];

const FAVORITE_PLANETS: &[FavoriteSeed] = &[
    (41, 1, 21, (2025, 8, 11), true, "favorites_pages"),
    (42, 2, 24, (2025, 8, 5), false, "custom_list"),
    (43, 4, 23, (2025, 8, 8), true, "home"),
    (44, 3, 22, (2025, 8, 1), true, "navbar_button"),
];

/// Insert the sample data when the users table is empty. All rows go in one transaction.
/// Returns true when rows were inserted.
pub async fn seed_if_empty(store: &Store) -> Result<bool, AppError> {
    if store.fetch_scalar("SELECT id FROM users LIMIT 1", &[]).await?.is_some() {
        return Ok(false);
    }

    let mut tx = store.begin_write().await?;
    // Another connection may have seeded between the probe and the write lock.
    if tx.fetch_scalar("SELECT id FROM users LIMIT 1", &[]).await?.is_some() {
        return Ok(false);
    }

    for (id, handle, first_name, last_name, mail) in USERS {
        tx.execute(
            "INSERT INTO users (id, \"user\", first_name, last_name, mail, password, is_active) \
             VALUES ($1, $2, $3, $4, $5, $6, TRUE)",
            &[
                (*id).into(),
                (*handle).into(),
                (*first_name).into(),
                (*last_name).into(),
                (*mail).into(),
                SEED_PASSWORD.into(),
            ],
        )
        .await?;
    }

    for (id, name, gender, skin_color, hair_color, height) in CHARACTERS {
        tx.execute(
            "INSERT INTO characters (id, name, gender, skin_color, hair_color, height) \
             VALUES ($1, $2, $3, $4, $5, $6)",
            &[
                (*id).into(),
                (*name).into(),
                (*gender).into(),
                (*skin_color).into(),
                (*hair_color).into(),
                (*height).into(),
            ],
        )
        .await?;
    }

    for (id, name, climate, surface_water, diameter, rotation_period) in PLANETS {
        tx.execute(
            "INSERT INTO planets (id, name, climate, surface_water, diameter, rotation_period) \
             VALUES ($1, $2, $3, $4, $5, $6)",
            &[
                (*id).into(),
                (*name).into(),
                (*climate).into(),
                (*surface_water).into(),
                (*diameter).into(),
                (*rotation_period).into(),
            ],
        )
        .await?;
    }

    for (table, column, rows) in [
        ("favorite_characters", "character_id", FAVORITE_CHARACTERS),
        ("favorite_planets", "planet_id", FAVORITE_PLANETS),
    ] {
        let sql = format!(
            "INSERT INTO {} (id, user_id, {}, created_at, is_active, action_source) \
             VALUES ($1, $2, $3, $4, $5, $6)",
            table, column
        );
        for (id, user_id, target_id, (y, m, d), is_active, action_source) in rows {
            tx.execute(
                &sql,
                &[
                    (*id).into(),
                    (*user_id).into(),
                    (*target_id).into(),
                    NaiveDate::from_ymd_opt(*y, *m, *d).into(),
                    (*is_active).into(),
                    (*action_source).into(),
                ],
            )
            .await?;
        }
    }

    // Explicit ids do not advance identity sequences; move them past the seeded rows.
    if tx.backend() == Backend::Postgres {
        for table in TABLE_NAMES {
            let sql = format!(
                "SELECT setval(pg_get_serial_sequence('{0}', 'id'), (SELECT MAX(id) FROM {0}))",
                table
            );
            tx.execute(&sql, &[]).await?;
        }
    }

    tx.commit().await?;
    tracing::info!(
        users = USERS.len(),
        characters = CHARACTERS.len(),
        planets = PLANETS.len(),
        "seeded empty database"
    );
    Ok(true)
}

/// Middleware: probe for seed data before every request.
pub async fn seed_before_request(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Response {
    if let Err(e) = seed_if_empty(&state.store).await {
        return e.into_response();
    }
    next.run(req).await
}
