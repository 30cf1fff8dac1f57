#![allow(dead_code)]

use is_in_country::application::services::auth_service::hash_token;
use is_in_country::infrastructure::cache::NullCache;
use is_in_country::infrastructure::persistence::{PgCountryRepository, PgTokenRepository};
use is_in_country::state::AppState;
use serde_json::json;
use sqlx::PgPool;
use std::sync::Arc;

pub const TEST_SECRET: &str = "test-signing-secret";

pub fn rectangle(west: f64, south: f64, east: f64, north: f64) -> String {
    json!({
        "type": "Polygon",
        "coordinates": [[[west, south], [east, south], [east, north], [west, north], [west, south]]]
    })
    .to_string()
}

pub fn usa_box() -> String {
    rectangle(-125.0, 25.0, -66.0, 49.0)
}

pub fn canada_box() -> String {
    rectangle(-140.0, 42.0, -52.0, 84.0)
}

pub async fn insert_country(pool: &PgPool, code: &str, name: &str, polygon_data: &str) -> i64 {
    sqlx::query_scalar(
        "INSERT INTO countries (country_code, country_name, polygon_data) VALUES ($1, $2, $3) RETURNING id",
    )
    .bind(code)
    .bind(name)
    .bind(polygon_data)
    .fetch_one(pool)
    .await
    .unwrap()
}

/// Stores a token hashed with [`TEST_SECRET`] and returns the raw value.
pub async fn insert_token(pool: &PgPool, name: &str, raw: &str) -> String {
    sqlx::query("INSERT INTO api_tokens (name, token_hash) VALUES ($1, $2)")
        .bind(name)
        .bind(hash_token(TEST_SECRET, raw))
        .execute(pool)
        .await
        .unwrap();

    raw.to_string()
}

pub async fn revoke_token(pool: &PgPool, name: &str) {
    sqlx::query("UPDATE api_tokens SET revoked_at = NOW() WHERE name = $1")
        .bind(name)
        .execute(pool)
        .await
        .unwrap();
}

pub fn create_test_state(pool: PgPool) -> AppState {
    let pool = Arc::new(pool);

    AppState::new(
        Arc::new(PgCountryRepository::new(pool.clone())),
        Arc::new(PgTokenRepository::new(pool)),
        Arc::new(NullCache::new()),
        TEST_SECRET.to_string(),
    )
}
