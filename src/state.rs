//! Shared application state for all routes.

use crate::store::Store;

#[derive(Clone)]
pub struct AppState {
    pub store: Store,
    /// Identity the favorites routes act for. Read by the `CurrentUser` extractor.
    pub current_user_id: i64,
}

impl AppState {
    pub fn new(store: impl Into<Store>, current_user_id: i64) -> Self {
        AppState {
            store: store.into(),
            current_user_id,
        }
    }
}
