//! Router assembly.

mod api;
mod common;

pub use api::api_routes;
pub use common::common_routes;

use crate::seed::seed_before_request;
use crate::state::AppState;
use axum::{middleware, Router};
use tower::Layer;
use tower_http::{cors::CorsLayer, normalize_path::NormalizePath, normalize_path::NormalizePathLayer, trace::TraceLayer};

/// Full application: common and resource routes, seeding before every request, request
/// tracing, permissive CORS. Trailing slashes are trimmed before routing, so `/people/` and
/// `/people` are the same route.
pub fn app(state: AppState) -> NormalizePath<Router> {
    let router = Router::new()
        .merge(common_routes(state.clone()))
        .merge(api_routes(state.clone()))
        .layer(middleware::from_fn_with_state(state, seed_before_request))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());
    NormalizePathLayer::trim_trailing_slash().layer(router)
}
