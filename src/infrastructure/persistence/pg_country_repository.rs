//! PostgreSQL implementation of the country repository.

use async_trait::async_trait;
use serde_json::json;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{Country, NewCountry, UpdateCountry};
use crate::domain::repositories::CountryRepository;
use crate::error::AppError;

const COUNTRY_COLUMNS: &str =
    "id, country_code, country_name, polygon_data, created_at, updated_at";

/// PostgreSQL repository for country boundary records.
pub struct PgCountryRepository {
    pool: Arc<PgPool>,
}

impl PgCountryRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CountryRepository for PgCountryRepository {
    async fn create(&self, new_country: NewCountry) -> Result<Country, AppError> {
        let country = sqlx::query_as::<_, Country>(&format!(
            r#"
            INSERT INTO countries (country_code, country_name, polygon_data)
            VALUES ($1, $2, $3)
            RETURNING {COUNTRY_COLUMNS}
            "#
        ))
        .bind(&new_country.country_code)
        .bind(&new_country.country_name)
        .bind(&new_country.polygon_data)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(country)
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<Country>, AppError> {
        let country = sqlx::query_as::<_, Country>(&format!(
            "SELECT {COUNTRY_COLUMNS} FROM countries WHERE country_code = $1"
        ))
        .bind(code)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(country)
    }

    async fn list(&self) -> Result<Vec<Country>, AppError> {
        let countries = sqlx::query_as::<_, Country>(&format!(
            "SELECT {COUNTRY_COLUMNS} FROM countries ORDER BY country_code"
        ))
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(countries)
    }

    async fn update(&self, code: &str, update: UpdateCountry) -> Result<Country, AppError> {
        let country = sqlx::query_as::<_, Country>(&format!(
            r#"
            UPDATE countries SET
                country_name = COALESCE($2, country_name),
                polygon_data = COALESCE($3, polygon_data),
                updated_at   = NOW()
            WHERE country_code = $1
            RETURNING {COUNTRY_COLUMNS}
            "#
        ))
        .bind(code)
        .bind(update.country_name)
        .bind(update.polygon_data)
        .fetch_optional(self.pool.as_ref())
        .await?;

        country.ok_or_else(|| {
            AppError::not_found("Country not found", json!({ "country_code": code }))
        })
    }

    async fn delete(&self, code: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM countries WHERE country_code = $1")
            .bind(code)
            .execute(self.pool.as_ref())
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(
                "Country not found",
                json!({ "country_code": code }),
            ));
        }

        Ok(())
    }

    async fn count(&self) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM countries")
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }
}
