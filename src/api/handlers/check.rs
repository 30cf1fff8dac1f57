//! Handler for the containment check endpoint.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use chrono::Utc;
use serde_json::json;
use validator::Validate;

use crate::api::dto::check::{CheckRequest, CheckResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Checks whether a coordinate lies inside a country.
///
/// # Endpoint
///
/// `POST /api/v1/check`
///
/// # Request Body
///
/// ```json
/// { "latitude": 40.7128, "longitude": -74.0060, "country_code": "USA" }
/// ```
///
/// Points on the country boundary are reported as inside. A country whose
/// stored boundary cannot be parsed reports every point as outside.
///
/// # Errors
///
/// Returns 400 if the body is not JSON, a field is missing, or a coordinate
/// is not a number or out of range.
/// Returns 404 if the country does not exist.
pub async fn check_handler(
    State(state): State<AppState>,
    payload: Result<Json<CheckRequest>, JsonRejection>,
) -> Result<Json<CheckResponse>, AppError> {
    let Json(payload) = payload?;
    payload.validate()?;

    if !payload.latitude.is_finite() || !payload.longitude.is_finite() {
        return Err(AppError::bad_request(
            "Invalid latitude or longitude format",
            json!({ "latitude": payload.latitude.to_string(), "longitude": payload.longitude.to_string() }),
        ));
    }

    let outcome = state
        .containment_service
        .check(payload.latitude, payload.longitude, &payload.country_code)
        .await?;

    Ok(Json(CheckResponse {
        is_inside_country: outcome.is_inside_country,
        latitude: payload.latitude,
        longitude: payload.longitude,
        country_code: outcome.country_code,
        country_name: outcome.country_name,
        checked_at: Utc::now(),
    }))
}
