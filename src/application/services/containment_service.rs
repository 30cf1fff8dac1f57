//! Point-in-country checks against stored boundaries.

use serde_json::json;
use std::sync::Arc;

use crate::application::services::GeometryCache;
use crate::domain::entities::Country;
use crate::domain::geometry::Coordinate;
use crate::domain::repositories::CountryRepository;
use crate::error::AppError;
use crate::infrastructure::cache::CacheService;

/// Result of a containment check.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckOutcome {
    pub is_inside_country: bool,
    pub country_code: String,
    pub country_name: String,
}

/// Answers "is this point inside that country" for stored countries.
pub struct ContainmentService<R: CountryRepository> {
    repository: Arc<R>,
    cache: Arc<dyn CacheService>,
    geometries: Arc<GeometryCache>,
}

impl<R: CountryRepository> ContainmentService<R> {
    pub fn new(
        repository: Arc<R>,
        cache: Arc<dyn CacheService>,
        geometries: Arc<GeometryCache>,
    ) -> Self {
        Self {
            repository,
            cache,
            geometries,
        }
    }

    /// Checks whether (`latitude`, `longitude`) lies inside the country `country_code`.
    ///
    /// Points on a boundary edge count as inside. A stored boundary that cannot
    /// be parsed yields `false` and a warning instead of an error, so a single
    /// bad record never turns checks into server errors.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the country does not exist.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn check(
        &self,
        latitude: f64,
        longitude: f64,
        country_code: &str,
    ) -> Result<CheckOutcome, AppError> {
        let country = self.load(country_code).await?;
        let point = Coordinate::new(latitude, longitude);

        let is_inside_country = match self.geometries.get_or_parse(&country) {
            Ok(boundary) => boundary.contains(point),
            Err(e) => {
                tracing::warn!(
                    country_code = %country.country_code,
                    error = %e,
                    "Stored boundary is malformed; reporting point as outside"
                );
                false
            }
        };

        tracing::debug!(
            country_code = %country.country_code,
            latitude,
            longitude,
            is_inside_country,
            "Containment check"
        );

        Ok(CheckOutcome {
            is_inside_country,
            country_code: country.country_code,
            country_name: country.country_name,
        })
    }

    async fn load(&self, country_code: &str) -> Result<Country, AppError> {
        let code = Country::normalize_code(country_code);

        if let Ok(Some(country)) = self.cache.get_country(&code).await {
            return Ok(country);
        }

        let country = self
            .repository
            .find_by_code(&code)
            .await?
            .ok_or_else(|| AppError::not_found("Country not found", json!({ "country_code": code })))?;

        let _ = self.cache.set_country(&country, None).await;

        Ok(country)
    }
}
