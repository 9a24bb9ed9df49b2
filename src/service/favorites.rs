//! Favorite-link reads and mutations, shared by the character and planet variants.
//!
//! Mutations run in a write transaction (`BEGIN IMMEDIATE` on SQLite), so the existence check
//! and the write that follows it see the same state. Two adds for a pair with no row yet are
//! serialized by the store and the second reports `exists`.

use crate::error::AppError;
use crate::model::favorite::DEFAULT_ACTION_SOURCE;
use crate::model::{FavoriteCharacter, FavoriteLink, FavoritePlanet, Record, User};
use crate::response::UserFavorites;
use crate::service::CatalogService;
use crate::store::{BindValue, Store, Tx};
use chrono::{Local, NaiveDate};
use serde::Serialize;
use std::collections::HashMap;

pub const CURRENT_USER_NOT_FOUND: &str = "Current user not found";
pub const ACTIVE_FAVORITE_NOT_FOUND: &str = "Active favorite not found";

/// Outcome tag reported alongside a mutated favorite.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FavoriteStatus {
    Exists,
    Reactivated,
    Created,
    Deactivated,
}

pub struct FavoriteService;

impl FavoriteService {
    pub async fn user_favorites(store: &Store, user_id: i64) -> Result<UserFavorites, AppError> {
        let mut tx = store.begin().await?;
        let user = CatalogService::read_in::<User>(&mut tx, user_id)
            .await?
            .ok_or_else(|| AppError::NotFound(CURRENT_USER_NOT_FOUND.into()))?;
        let characters = Self::active_for_user::<FavoriteCharacter>(&mut tx, user_id).await?;
        let planets = Self::active_for_user::<FavoritePlanet>(&mut tx, user_id).await?;
        tx.commit().await?;
        Ok(UserFavorites {
            user,
            characters,
            planets,
        })
    }

    /// Active links of one kind for a user, ordered by id, with their targets embedded.
    pub async fn active_for_user<F: FavoriteLink>(tx: &mut Tx, user_id: i64) -> Result<Vec<F>, AppError> {
        let sql = format!(
            "SELECT {} FROM {} WHERE user_id = $1 AND is_active = TRUE ORDER BY id",
            F::select_columns(),
            F::TABLE
        );
        let mut links: Vec<F> = tx.fetch_all(&sql, &[user_id.into()]).await?;
        Self::attach_targets(tx, &mut links).await?;
        Ok(links)
    }

    /// Mark `target_id` as a favorite of `user_id`: create the link, reactivate it, or report
    /// that it is already active. Reactivation keeps the original creation date and source.
    pub async fn add<F: FavoriteLink>(
        store: &Store,
        user_id: i64,
        target_id: i64,
    ) -> Result<(FavoriteStatus, F), AppError> {
        let mut tx = store.begin_write().await?;
        CatalogService::read_in::<User>(&mut tx, user_id)
            .await?
            .ok_or_else(|| AppError::NotFound(CURRENT_USER_NOT_FOUND.into()))?;
        let target = CatalogService::read_in::<F::Target>(&mut tx, target_id)
            .await?
            .ok_or_else(|| AppError::NotFound(F::TARGET_NOT_FOUND.into()))?;

        let existing = Self::find::<F>(&mut tx, user_id, target_id, false).await?;
        let (status, mut link) = match existing {
            Some(link) if link.is_active() => (FavoriteStatus::Exists, link),
            Some(mut link) => {
                Self::set_active::<F>(&mut tx, link.id(), true).await?;
                link.set_active(true);
                (FavoriteStatus::Reactivated, link)
            }
            None => {
                let today = Local::now().date_naive();
                let link = Self::insert::<F>(&mut tx, user_id, target_id, today).await?;
                (FavoriteStatus::Created, link)
            }
        };
        tx.commit().await?;

        tracing::info!(table = F::TABLE, user_id, target_id, status = ?status, "favorite added");
        link.attach(Some(target));
        Ok((status, link))
    }

    /// Soft-delete the active link between `user_id` and `target_id`.
    pub async fn remove<F: FavoriteLink>(store: &Store, user_id: i64, target_id: i64) -> Result<F, AppError> {
        let mut tx = store.begin_write().await?;
        let mut link = Self::find::<F>(&mut tx, user_id, target_id, true)
            .await?
            .ok_or_else(|| AppError::NotFound(ACTIVE_FAVORITE_NOT_FOUND.into()))?;
        Self::set_active::<F>(&mut tx, link.id(), false).await?;
        link.set_active(false);
        let target = CatalogService::read_in::<F::Target>(&mut tx, target_id).await?;
        tx.commit().await?;

        tracing::info!(table = F::TABLE, user_id, target_id, "favorite deactivated");
        link.attach(target);
        Ok(link)
    }

    async fn find<F: FavoriteLink>(
        tx: &mut Tx,
        user_id: i64,
        target_id: i64,
        active_only: bool,
    ) -> Result<Option<F>, AppError> {
        let mut sql = format!(
            "SELECT {} FROM {} WHERE user_id = $1 AND {} = $2",
            F::select_columns(),
            F::TABLE,
            F::TARGET_COLUMN
        );
        if active_only {
            sql.push_str(" AND is_active = TRUE");
        }
        tx.fetch_optional(&sql, &[user_id.into(), target_id.into()]).await
    }

    async fn insert<F: FavoriteLink>(
        tx: &mut Tx,
        user_id: i64,
        target_id: i64,
        created_at: NaiveDate,
    ) -> Result<F, AppError> {
        let sql = format!(
            "INSERT INTO {} (user_id, {}, created_at, is_active, action_source) \
             VALUES ($1, $2, $3, TRUE, $4) RETURNING {}",
            F::TABLE,
            F::TARGET_COLUMN,
            F::select_columns()
        );
        tx.fetch_one(
            &sql,
            &[
                user_id.into(),
                target_id.into(),
                created_at.into(),
                DEFAULT_ACTION_SOURCE.into(),
            ],
        )
        .await
    }

    async fn set_active<F: FavoriteLink>(tx: &mut Tx, id: i64, active: bool) -> Result<(), AppError> {
        let sql = format!("UPDATE {} SET is_active = $1 WHERE id = $2", F::TABLE);
        tx.execute(&sql, &[active.into(), id.into()]).await?;
        Ok(())
    }

    /// Batch-load the targets of `links` with one `IN` query.
    async fn attach_targets<F: FavoriteLink>(tx: &mut Tx, links: &mut [F]) -> Result<(), AppError> {
        if links.is_empty() {
            return Ok(());
        }
        let placeholders: Vec<String> = (1..=links.len()).map(|i| format!("${}", i)).collect();
        let sql = format!(
            "SELECT * FROM {} WHERE id IN ({})",
            <F::Target as Record>::TABLE,
            placeholders.join(", ")
        );
        let params: Vec<BindValue> = links.iter().map(|l| l.target_id().into()).collect();
        let targets: HashMap<i64, F::Target> = tx
            .fetch_all::<F::Target>(&sql, &params)
            .await?
            .into_iter()
            .map(|t| (t.id(), t))
            .collect();
        for link in links.iter_mut() {
            link.attach(targets.get(&link.target_id()).cloned());
        }
        Ok(())
    }
}
