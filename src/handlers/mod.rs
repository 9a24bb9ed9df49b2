//! HTTP handlers, one per route.

pub mod favorites;
pub mod people;
pub mod planets;
pub mod users;

use crate::error::AppError;

/// Parse an integer path id. A segment that is not an integer addresses no record, so it
/// fails with the same 404 `not_found` message as an unknown id.
pub(crate) fn parse_id(id_str: &str, not_found: &str) -> Result<i64, AppError> {
    id_str
        .parse()
        .map_err(|_| AppError::NotFound(not_found.to_string()))
}
