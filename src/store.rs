//! Connection pools and query execution. The embedded SQLite file is the default store; a
//! `postgres://` connection string selects PostgreSQL. Both run the same SQL (`$N`
//! placeholders, `TRUE`/`FALSE` literals); backend-specific DDL lives in `migration`.

use crate::config::Settings;
use crate::error::{AppError, ConfigError};
use crate::model::Record;
use chrono::NaiveDate;
use sqlx::postgres::{PgPool, PgPoolOptions};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::{Postgres, Sqlite, Transaction};
use std::str::FromStr;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Backend {
    Sqlite,
    Postgres,
}

impl Backend {
    pub fn from_url(database_url: &str) -> Result<Self, ConfigError> {
        if database_url.starts_with("sqlite:") {
            Ok(Backend::Sqlite)
        } else if database_url.starts_with("postgres://") || database_url.starts_with("postgresql://") {
            Ok(Backend::Postgres)
        } else {
            Err(ConfigError::InvalidValue {
                key: "DATABASE_URL",
                value: database_url.to_string(),
            })
        }
    }
}

/// A value bound to a `$N` placeholder.
#[derive(Clone, Debug, PartialEq)]
pub enum BindValue {
    Int(i64),
    Bool(bool),
    Text(String),
    Date(Option<NaiveDate>),
}

impl From<i64> for BindValue {
    fn from(v: i64) -> Self {
        BindValue::Int(v)
    }
}

impl From<bool> for BindValue {
    fn from(v: bool) -> Self {
        BindValue::Bool(v)
    }
}

impl From<&str> for BindValue {
    fn from(v: &str) -> Self {
        BindValue::Text(v.to_string())
    }
}

impl From<Option<NaiveDate>> for BindValue {
    fn from(v: Option<NaiveDate>) -> Self {
        BindValue::Date(v)
    }
}

impl From<NaiveDate> for BindValue {
    fn from(v: NaiveDate) -> Self {
        BindValue::Date(Some(v))
    }
}

macro_rules! bind_values {
    ($query:expr, $params:expr) => {{
        let mut query = $query;
        for value in $params {
            query = match value {
                BindValue::Int(v) => query.bind(*v),
                BindValue::Bool(v) => query.bind(*v),
                BindValue::Text(v) => query.bind(v.as_str()),
                BindValue::Date(v) => query.bind(*v),
            };
        }
        query
    }};
}

#[derive(Clone, Debug)]
pub enum Store {
    Sqlite(SqlitePool),
    Postgres(PgPool),
}

impl From<SqlitePool> for Store {
    fn from(pool: SqlitePool) -> Self {
        Store::Sqlite(pool)
    }
}

impl From<PgPool> for Store {
    fn from(pool: PgPool) -> Self {
        Store::Postgres(pool)
    }
}

/// An open transaction on either backend. Dropping it without `commit` rolls back.
pub enum Tx {
    Sqlite(Transaction<'static, Sqlite>),
    Postgres(Transaction<'static, Postgres>),
}

impl Store {
    pub fn backend(&self) -> Backend {
        match self {
            Store::Sqlite(_) => Backend::Sqlite,
            Store::Postgres(_) => Backend::Postgres,
        }
    }

    /// Transaction for reads. On SQLite this is a deferred `BEGIN`.
    pub async fn begin(&self) -> Result<Tx, AppError> {
        Ok(match self {
            Store::Sqlite(pool) => Tx::Sqlite(pool.begin().await?),
            Store::Postgres(pool) => Tx::Postgres(pool.begin().await?),
        })
    }

    /// Transaction that will write. On SQLite it takes the write lock up front
    /// (`BEGIN IMMEDIATE`), so concurrent writers queue on the busy timeout instead of
    /// failing when a read snapshot is upgraded.
    pub async fn begin_write(&self) -> Result<Tx, AppError> {
        Ok(match self {
            Store::Sqlite(pool) => Tx::Sqlite(pool.begin_with("BEGIN IMMEDIATE").await?),
            Store::Postgres(pool) => Tx::Postgres(pool.begin().await?),
        })
    }

    pub async fn fetch_all<T: Record>(&self, sql: &str, params: &[BindValue]) -> Result<Vec<T>, AppError> {
        tracing::debug!(sql = %sql, params = ?params, "query");
        let rows = match self {
            Store::Sqlite(pool) => bind_values!(sqlx::query_as::<Sqlite, T>(sql), params).fetch_all(pool).await?,
            Store::Postgres(pool) => bind_values!(sqlx::query_as::<Postgres, T>(sql), params).fetch_all(pool).await?,
        };
        Ok(rows)
    }

    pub async fn fetch_optional<T: Record>(&self, sql: &str, params: &[BindValue]) -> Result<Option<T>, AppError> {
        tracing::debug!(sql = %sql, params = ?params, "query");
        let row = match self {
            Store::Sqlite(pool) => bind_values!(sqlx::query_as::<Sqlite, T>(sql), params).fetch_optional(pool).await?,
            Store::Postgres(pool) => {
                bind_values!(sqlx::query_as::<Postgres, T>(sql), params).fetch_optional(pool).await?
            }
        };
        Ok(row)
    }

    /// First column of the first row as an integer (`COUNT(*)`, a presence check).
    pub async fn fetch_scalar(&self, sql: &str, params: &[BindValue]) -> Result<Option<i64>, AppError> {
        tracing::debug!(sql = %sql, params = ?params, "query");
        let value = match self {
            Store::Sqlite(pool) => {
                bind_values!(sqlx::query_scalar::<Sqlite, i64>(sql), params).fetch_optional(pool).await?
            }
            Store::Postgres(pool) => {
                bind_values!(sqlx::query_scalar::<Postgres, i64>(sql), params).fetch_optional(pool).await?
            }
        };
        Ok(value)
    }

    pub async fn execute(&self, sql: &str, params: &[BindValue]) -> Result<u64, AppError> {
        tracing::debug!(sql = %sql, params = ?params, "execute");
        let affected = match self {
            Store::Sqlite(pool) => bind_values!(sqlx::query::<Sqlite>(sql), params).execute(pool).await?.rows_affected(),
            Store::Postgres(pool) => {
                bind_values!(sqlx::query::<Postgres>(sql), params).execute(pool).await?.rows_affected()
            }
        };
        Ok(affected)
    }

    pub async fn close(&self) {
        match self {
            Store::Sqlite(pool) => pool.close().await,
            Store::Postgres(pool) => pool.close().await,
        }
    }
}

impl Tx {
    pub fn backend(&self) -> Backend {
        match self {
            Tx::Sqlite(_) => Backend::Sqlite,
            Tx::Postgres(_) => Backend::Postgres,
        }
    }

    pub async fn fetch_all<T: Record>(&mut self, sql: &str, params: &[BindValue]) -> Result<Vec<T>, AppError> {
        tracing::debug!(sql = %sql, params = ?params, "query (tx)");
        let rows = match self {
            Tx::Sqlite(tx) => bind_values!(sqlx::query_as::<Sqlite, T>(sql), params).fetch_all(&mut **tx).await?,
            Tx::Postgres(tx) => bind_values!(sqlx::query_as::<Postgres, T>(sql), params).fetch_all(&mut **tx).await?,
        };
        Ok(rows)
    }

    pub async fn fetch_optional<T: Record>(&mut self, sql: &str, params: &[BindValue]) -> Result<Option<T>, AppError> {
        tracing::debug!(sql = %sql, params = ?params, "query (tx)");
        let row = match self {
            Tx::Sqlite(tx) => {
                bind_values!(sqlx::query_as::<Sqlite, T>(sql), params).fetch_optional(&mut **tx).await?
            }
            Tx::Postgres(tx) => {
                bind_values!(sqlx::query_as::<Postgres, T>(sql), params).fetch_optional(&mut **tx).await?
            }
        };
        Ok(row)
    }

    pub async fn fetch_one<T: Record>(&mut self, sql: &str, params: &[BindValue]) -> Result<T, AppError> {
        tracing::debug!(sql = %sql, params = ?params, "query (tx)");
        let row = match self {
            Tx::Sqlite(tx) => bind_values!(sqlx::query_as::<Sqlite, T>(sql), params).fetch_one(&mut **tx).await?,
            Tx::Postgres(tx) => bind_values!(sqlx::query_as::<Postgres, T>(sql), params).fetch_one(&mut **tx).await?,
        };
        Ok(row)
    }

    pub async fn fetch_scalar(&mut self, sql: &str, params: &[BindValue]) -> Result<Option<i64>, AppError> {
        tracing::debug!(sql = %sql, params = ?params, "query (tx)");
        let value = match self {
            Tx::Sqlite(tx) => {
                bind_values!(sqlx::query_scalar::<Sqlite, i64>(sql), params).fetch_optional(&mut **tx).await?
            }
            Tx::Postgres(tx) => {
                bind_values!(sqlx::query_scalar::<Postgres, i64>(sql), params)
                    .fetch_optional(&mut **tx)
                    .await?
            }
        };
        Ok(value)
    }

    pub async fn execute(&mut self, sql: &str, params: &[BindValue]) -> Result<u64, AppError> {
        tracing::debug!(sql = %sql, params = ?params, "execute (tx)");
        let affected = match self {
            Tx::Sqlite(tx) => bind_values!(sqlx::query::<Sqlite>(sql), params)
                .execute(&mut **tx)
                .await?
                .rows_affected(),
            Tx::Postgres(tx) => bind_values!(sqlx::query::<Postgres>(sql), params)
                .execute(&mut **tx)
                .await?
                .rows_affected(),
        };
        Ok(affected)
    }

    pub async fn commit(self) -> Result<(), AppError> {
        match self {
            Tx::Sqlite(tx) => tx.commit().await?,
            Tx::Postgres(tx) => tx.commit().await?,
        }
        Ok(())
    }
}

/// Parse a SQLite connection string. The database file is created if it does not exist and
/// foreign-key enforcement is switched on so favorite-links cascade with their owners.
pub fn sqlite_options(database_url: &str) -> Result<SqliteConnectOptions, AppError> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true);
    Ok(options)
}

pub async fn connect(settings: &Settings) -> Result<Store, AppError> {
    let store = match Backend::from_url(&settings.database_url)? {
        Backend::Sqlite => {
            let pool = SqlitePoolOptions::new()
                .max_connections(settings.max_connections)
                .connect_with(sqlite_options(&settings.database_url)?)
                .await?;
            Store::Sqlite(pool)
        }
        Backend::Postgres => {
            let pool = PgPoolOptions::new()
                .max_connections(settings.max_connections)
                .connect(&settings.database_url)
                .await?;
            Store::Postgres(pool)
        }
    };
    tracing::info!(backend = ?store.backend(), "database pool ready");
    Ok(store)
}

/// Single-connection in-memory pool. Every connection to `sqlite::memory:` is a separate
/// database, so the pool is capped at one.
pub async fn connect_in_memory() -> Result<SqlitePool, AppError> {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(sqlite_options("sqlite::memory:")?)
        .await?;
    Ok(pool)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Character;

    #[tokio::test]
    async fn in_memory_pool_enforces_foreign_keys() {
        let pool = connect_in_memory().await.unwrap();
        let enabled: i64 = sqlx::query_scalar("PRAGMA foreign_keys")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(enabled, 1);
    }

    #[test]
    fn backend_follows_url_scheme() {
        assert_eq!(Backend::from_url("sqlite://starwars.db").unwrap(), Backend::Sqlite);
        assert_eq!(Backend::from_url("sqlite::memory:").unwrap(), Backend::Sqlite);
        assert_eq!(Backend::from_url("postgres://u:p@db/starwars").unwrap(), Backend::Postgres);
        assert_eq!(Backend::from_url("postgresql://db/starwars").unwrap(), Backend::Postgres);
        assert!(matches!(
            Backend::from_url("mysql://db/starwars"),
            Err(ConfigError::InvalidValue { key: "DATABASE_URL", .. })
        ));
    }

    #[tokio::test]
    async fn binds_every_value_kind() {
        let store = Store::from(connect_in_memory().await.unwrap());
        store
            .execute(
                "CREATE TABLE samples (n BIGINT, b BOOLEAN, t TEXT, d DATE)",
                &[],
            )
            .await
            .unwrap();
        let date = NaiveDate::from_ymd_opt(2025, 7, 4);
        let inserted = store
            .execute(
                "INSERT INTO samples (n, b, t, d) VALUES ($1, $2, $3, $4)",
                &[7i64.into(), true.into(), "arid".into(), date.into()],
            )
            .await
            .unwrap();
        assert_eq!(inserted, 1);
        let n = store
            .fetch_scalar(
                "SELECT n FROM samples WHERE b = $1 AND t = $2 AND d = $3",
                &[true.into(), "arid".into(), date.into()],
            )
            .await
            .unwrap();
        assert_eq!(n, Some(7));
    }

    #[tokio::test]
    async fn dropped_transaction_rolls_back() {
        let store = Store::from(connect_in_memory().await.unwrap());
        store
            .execute(
                "CREATE TABLE characters (id INTEGER PRIMARY KEY, name TEXT NOT NULL, gender TEXT NOT NULL, \
                 skin_color TEXT NOT NULL, hair_color TEXT NOT NULL, height TEXT NOT NULL)",
                &[],
            )
            .await
            .unwrap();
        {
            let mut tx = store.begin_write().await.unwrap();
            tx.execute(
                "INSERT INTO characters VALUES (1, 'Yoda', 'male', 'green', 'white', '66')",
                &[],
            )
            .await
            .unwrap();
        }
        let rows: Vec<Character> = store.fetch_all("SELECT * FROM characters", &[]).await.unwrap();
        assert!(rows.is_empty());
    }
}
