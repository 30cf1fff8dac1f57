//! Shared application state injected into handlers and middleware.

use std::sync::Arc;

use crate::application::services::{
    AuthService, ContainmentService, CountryService, GeometryCache,
};
use crate::infrastructure::cache::CacheService;
use crate::infrastructure::persistence::{PgCountryRepository, PgTokenRepository};

/// Services wired against the PostgreSQL repositories.
///
/// Cloned per request; every field is an `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub country_service: Arc<CountryService<PgCountryRepository>>,
    pub containment_service: Arc<ContainmentService<PgCountryRepository>>,
    pub auth_service: Arc<AuthService<PgTokenRepository>>,
    pub cache: Arc<dyn CacheService>,
}

impl AppState {
    /// Builds the services over shared repositories, record cache and geometry cache.
    pub fn new(
        countries: Arc<PgCountryRepository>,
        tokens: Arc<PgTokenRepository>,
        cache: Arc<dyn CacheService>,
        token_signing_secret: String,
    ) -> Self {
        let geometries = Arc::new(GeometryCache::new());

        Self {
            country_service: Arc::new(CountryService::new(
                countries.clone(),
                cache.clone(),
                geometries.clone(),
            )),
            containment_service: Arc::new(ContainmentService::new(
                countries,
                cache.clone(),
                geometries,
            )),
            auth_service: Arc::new(AuthService::new(tokens, token_signing_secret)),
            cache,
        }
    }
}
