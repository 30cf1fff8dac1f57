//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET    /api/v1/health`            - Health check (public)
//! - `GET    /api/v1/countries`         - Country list (public)
//! - `GET    /api/v1/countries/{code}`  - Country details (public)
//! - `POST   /api/v1/check`             - Containment check (public)
//! - `POST   /api/v1/countries`         - Add country (Bearer token)
//! - `PATCH  /api/v1/countries/{code}`  - Update country (Bearer token)
//! - `DELETE /api/v1/countries/{code}`  - Remove country (Bearer token)
//!
//! Unknown paths and unsupported methods answer in the JSON error envelope.
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **CORS** - Origins from `CORS_ORIGINS`
//! - **Rate limiting** - Per-IP token bucket, stricter for writes
//! - **Authentication** - Bearer token on write routes
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::{method_not_allowed_handler, not_found_handler};
use crate::api::middleware::{auth, cors, rate_limit, tracing};
use crate::config::Config;
use crate::state::AppState;
use axum::{Router, middleware};
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Constructs the application router with all routes and middleware.
///
/// Uses `config.behind_proxy` for rate-limit key extraction and
/// `config.cors_origins` for CORS.
pub fn app_router(state: AppState, config: &Config) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(api_router(state, config))
}

/// [`app_router`] without trailing-slash normalization.
pub fn api_router(state: AppState, config: &Config) -> Router {
    let writes = api::routes::protected_routes()
        .route_layer(middleware::from_fn_with_state(state.clone(), auth::layer));
    let writes = rate_limit::apply(writes, rate_limit::SECURE, config.behind_proxy);

    let reads = rate_limit::apply(
        api::routes::public_routes(),
        rate_limit::PUBLIC,
        config.behind_proxy,
    );

    Router::new()
        .nest("/api/v1", reads.merge(writes))
        .method_not_allowed_fallback(method_not_allowed_handler)
        .fallback(not_found_handler)
        .with_state(state)
        .layer(cors::layer(&config.cors_origins))
        .layer(tracing::layer())
}
