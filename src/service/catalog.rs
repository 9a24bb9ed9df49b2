//! Read queries over the reference tables (users, characters, planets).

use crate::error::AppError;
use crate::model::Record;
use crate::store::{Store, Tx};

pub struct CatalogService;

impl CatalogService {
    fn list_sql<T: Record>() -> String {
        format!("SELECT * FROM {} ORDER BY id", T::TABLE)
    }

    fn read_sql<T: Record>() -> String {
        format!("SELECT * FROM {} WHERE id = $1", T::TABLE)
    }

    /// Every row of `T`'s table, ordered by id.
    pub async fn list<T: Record>(store: &Store) -> Result<Vec<T>, AppError> {
        store.fetch_all(&Self::list_sql::<T>(), &[]).await
    }

    /// Fetch one row by primary key.
    pub async fn read<T: Record>(store: &Store, id: i64) -> Result<Option<T>, AppError> {
        store.fetch_optional(&Self::read_sql::<T>(), &[id.into()]).await
    }

    /// `read` inside an open transaction.
    pub async fn read_in<T: Record>(tx: &mut Tx, id: i64) -> Result<Option<T>, AppError> {
        tx.fetch_optional(&Self::read_sql::<T>(), &[id.into()]).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::migration::apply_migrations;
    use crate::model::{Character, Planet, User};
    use crate::seed::seed_if_empty;
    use crate::store::connect_in_memory;

    async fn seeded() -> Store {
        let store = Store::from(connect_in_memory().await.unwrap());
        apply_migrations(&store).await.unwrap();
        seed_if_empty(&store).await.unwrap();
        store
    }

    #[tokio::test]
    async fn lists_are_ordered_by_id() {
        let store = seeded().await;
        let characters: Vec<Character> = CatalogService::list(&store).await.unwrap();
        let ids: Vec<i64> = characters.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![11, 12, 13, 14]);

        let planets: Vec<Planet> = CatalogService::list(&store).await.unwrap();
        assert_eq!(planets[2].name, "Yavin IV");
        assert_eq!(planets[2].climate, "temperate, tropical");
    }

    #[tokio::test]
    async fn read_by_id() {
        let store = seeded().await;
        let luke: Option<Character> = CatalogService::read(&store, 11).await.unwrap();
        assert_eq!(luke.unwrap().name, "Luke Skywalker");

        let missing: Option<Planet> = CatalogService::read(&store, 999).await.unwrap();
        assert!(missing.is_none());

        let mut tx = store.begin().await.unwrap();
        let user: User = CatalogService::read_in(&mut tx, 4).await.unwrap().unwrap();
        tx.commit().await.unwrap();
        assert_eq!(user.mail, "veronesa25@outlook.com");
        assert!(user.is_active);
    }
}
