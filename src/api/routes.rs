//! API route configuration under `/api/v1`.
//!
//! Reads are public. Writes require Bearer token authentication via
//! [`crate::api::middleware::auth`], applied by the caller with `route_layer`.

use crate::api::handlers::{
    check_handler, country_handler, country_list_handler, create_country_handler,
    delete_country_handler, health_handler, update_country_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, patch, post},
};

/// Public routes.
///
/// # Endpoints
///
/// - `GET  /health`            - Service and dependency health
/// - `GET  /countries`         - List countries
/// - `GET  /countries/{code}`  - One country by code (case-insensitive)
/// - `POST /check`             - Is a coordinate inside a country
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_handler))
        .route("/countries", get(country_list_handler))
        .route("/countries/{code}", get(country_handler))
        .route("/check", post(check_handler))
}

/// Country management routes, to be protected by Bearer token authentication.
///
/// # Endpoints
///
/// - `POST   /countries`         - Add a country
/// - `PATCH  /countries/{code}`  - Rename or replace the boundary
/// - `DELETE /countries/{code}`  - Remove a country
pub fn protected_routes() -> Router<AppState> {
    Router::new()
        .route("/countries", post(create_country_handler))
        .route(
            "/countries/{code}",
            patch(update_country_handler).delete(delete_country_handler),
        )
}
