//! Country management service.

use regex::Regex;
use serde_json::json;
use std::sync::{Arc, LazyLock};

use crate::application::services::GeometryCache;
use crate::domain::entities::{Country, NewCountry, UpdateCountry};
use crate::domain::geometry::parse_boundary;
use crate::domain::repositories::CountryRepository;
use crate::error::AppError;
use crate::infrastructure::cache::CacheService;

/// ISO 3166-1 alpha-3 shape, checked after normalization.
static COUNTRY_CODE_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[A-Z]{3}$").unwrap());

/// Maximum length of a country name (column width).
pub const MAX_NAME_LENGTH: usize = 100;

/// Service for creating, reading, updating and removing country records.
///
/// Codes are normalized to uppercase on every entry point. Boundaries are
/// validated with the geometry parser before they are written, so only
/// legacy rows can hold malformed payloads. Updates and removals invalidate
/// both the record cache and the parsed-geometry cache.
pub struct CountryService<R: CountryRepository> {
    repository: Arc<R>,
    cache: Arc<dyn CacheService>,
    geometries: Arc<GeometryCache>,
}

impl<R: CountryRepository> CountryService<R> {
    /// Creates a new country service.
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

    /// Adds a new country.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the code, name or boundary is invalid.
    /// Returns [`AppError::Conflict`] if the code already exists.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn create_country(
        &self,
        country_code: &str,
        country_name: String,
        polygon_data: String,
    ) -> Result<Country, AppError> {
        let code = validate_code(country_code)?;
        let country_name = validate_name(country_name)?;
        parse_boundary(&polygon_data)?;

        if self.repository.find_by_code(&code).await?.is_some() {
            return Err(AppError::conflict(
                "Country already exists",
                json!({ "country_code": code }),
            ));
        }

        let created = self
            .repository
            .create(NewCountry {
                country_code: code,
                country_name,
                polygon_data,
            })
            .await?;

        tracing::info!(country_code = %created.country_code, "Country added");
        Ok(created)
    }

    /// Retrieves a country by code (case-insensitive), reading through the record cache.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the country does not exist.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn get_country(&self, country_code: &str) -> Result<Country, AppError> {
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

    /// Lists all countries ordered by code.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn list_countries(&self) -> Result<Vec<Country>, AppError> {
        self.repository.list().await
    }

    /// Number of stored countries.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn count_countries(&self) -> Result<i64, AppError> {
        self.repository.count().await
    }

    /// Partially updates a country.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if nothing is to be changed or a new
    /// value is invalid.
    /// Returns [`AppError::NotFound`] if the country does not exist.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn update_country(
        &self,
        country_code: &str,
        update: UpdateCountry,
    ) -> Result<Country, AppError> {
        let code = Country::normalize_code(country_code);

        if update.is_empty() {
            return Err(AppError::bad_request(
                "Nothing to update",
                json!({ "fields": ["country_name", "polygon_data"] }),
            ));
        }

        let country_name = update.country_name.map(validate_name).transpose()?;
        if let Some(polygon_data) = &update.polygon_data {
            parse_boundary(polygon_data)?;
        }

        let updated = self
            .repository
            .update(
                &code,
                UpdateCountry {
                    country_name,
                    polygon_data: update.polygon_data,
                },
            )
            .await?;

        self.forget(&code).await;
        tracing::info!(country_code = %code, "Country updated");

        Ok(updated)
    }

    /// Removes a country.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the country does not exist.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn delete_country(&self, country_code: &str) -> Result<(), AppError> {
        let code = Country::normalize_code(country_code);

        self.repository.delete(&code).await?;

        self.forget(&code).await;
        tracing::info!(country_code = %code, "Country removed");

        Ok(())
    }

    async fn forget(&self, code: &str) {
        let _ = self.cache.invalidate(code).await;
        self.geometries.invalidate(code);
    }
}

/// Normalizes and validates a country code.
///
/// # Errors
///
/// Returns [`AppError::Validation`] unless the code is three ASCII letters.
pub fn validate_code(country_code: &str) -> Result<String, AppError> {
    let code = Country::normalize_code(country_code);

    if !COUNTRY_CODE_REGEX.is_match(&code) {
        return Err(AppError::bad_request(
            "Invalid country code",
            json!({ "country_code": country_code, "hint": "Expected three letters, e.g. USA" }),
        ));
    }

    Ok(code)
}

fn validate_name(country_name: String) -> Result<String, AppError> {
    let name = country_name.trim();

    if name.is_empty() || name.chars().count() > MAX_NAME_LENGTH {
        return Err(AppError::bad_request(
            "Invalid country name length",
            json!({ "min": 1, "max": MAX_NAME_LENGTH }),
        ));
    }

    Ok(name.to_string())
}
