//! Query and mutation services over the store.

mod catalog;
mod favorites;
pub use catalog::CatalogService;
pub use favorites::{
    FavoriteService, FavoriteStatus, ACTIVE_FAVORITE_NOT_FOUND, CURRENT_USER_NOT_FOUND,
};
