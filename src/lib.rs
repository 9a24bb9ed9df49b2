//! Star Wars reference data (characters, planets) and per-user favorites, stored in an
//! embedded SQLite file or, given a `postgres://` URL, in PostgreSQL.

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod migration;
pub mod model;
pub mod response;
pub mod routes;
pub mod seed;
pub mod service;
pub mod state;
pub mod store;

pub use config::Settings;
pub use error::{AppError, ConfigError};
pub use migration::apply_migrations;
pub use routes::{api_routes, app, common_routes};
pub use seed::seed_if_empty;
pub use state::AppState;
pub use store::{connect, connect_in_memory, Backend, Store};
