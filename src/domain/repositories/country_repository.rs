//! Repository trait for country boundary records.

use crate::domain::entities::{Country, NewCountry, UpdateCountry};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for country records.
///
/// Codes passed in are expected to be normalized (uppercase) by the caller.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgCountryRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
///
/// # Examples
///
/// See integration tests: `tests/repository_country.rs`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CountryRepository: Send + Sync {
    /// Inserts a new country.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the code already exists.
    /// Returns [`AppError::Internal`] on database errors.
    async fn create(&self, new_country: NewCountry) -> Result<Country, AppError>;

    /// Finds a country by its code.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_code(&self, code: &str) -> Result<Option<Country>, AppError>;

    /// Lists all countries ordered by code.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn list(&self) -> Result<Vec<Country>, AppError>;

    /// Applies a partial update and bumps `updated_at`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the country does not exist.
    /// Returns [`AppError::Internal`] on database errors.
    async fn update(&self, code: &str, update: UpdateCountry) -> Result<Country, AppError>;

    /// Deletes a country.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the country does not exist.
    /// Returns [`AppError::Internal`] on database errors.
    async fn delete(&self, code: &str) -> Result<(), AppError>;

    /// Counts stored countries.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn count(&self) -> Result<i64, AppError>;
}
