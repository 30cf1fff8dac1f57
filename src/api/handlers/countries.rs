//! Handlers for country endpoints.

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use validator::Validate;

use crate::api::dto::country::{
    CountryItem, CountryListResponse, CreateCountryRequest, UpdateCountryRequest,
};
use crate::domain::entities::UpdateCountry;
use crate::error::AppError;
use crate::state::AppState;

/// Lists all countries ordered by code.
///
/// # Endpoint
///
/// `GET /api/v1/countries`
pub async fn country_list_handler(
    State(state): State<AppState>,
) -> Result<Json<CountryListResponse>, AppError> {
    let countries = state.country_service.list_countries().await?;

    let items: Vec<CountryItem> = countries.into_iter().map(CountryItem::from).collect();

    Ok(Json(CountryListResponse {
        count: items.len(),
        items,
    }))
}

/// Returns a single country. The code is case-insensitive.
///
/// # Endpoint
///
/// `GET /api/v1/countries/{code}`
///
/// # Errors
///
/// Returns 404 if the country does not exist.
pub async fn country_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<CountryItem>, AppError> {
    let country = state.country_service.get_country(&code).await?;

    Ok(Json(country.into()))
}

/// Adds a country.
///
/// # Endpoint
///
/// `POST /api/v1/countries`
///
/// `polygon_data` may be the GeoJSON geometry as a string or as an object.
///
/// # Errors
///
/// Returns 400 if the code, name or boundary is invalid.
/// Returns 409 if the country already exists.
pub async fn create_country_handler(
    State(state): State<AppState>,
    payload: Result<Json<CreateCountryRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CountryItem>), AppError> {
    let Json(payload) = payload?;
    payload.validate()?;

    let country = state
        .country_service
        .create_country(
            &payload.country_code,
            payload.country_name,
            payload.polygon_data.into_text(),
        )
        .await?;

    Ok((StatusCode::CREATED, Json(country.into())))
}

/// Partially updates a country.
///
/// # Endpoint
///
/// `PATCH /api/v1/countries/{code}`
///
/// # Errors
///
/// Returns 400 if no field is given or a value is invalid.
/// Returns 404 if the country does not exist.
pub async fn update_country_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
    payload: Result<Json<UpdateCountryRequest>, JsonRejection>,
) -> Result<Json<CountryItem>, AppError> {
    let Json(payload) = payload?;
    payload.validate()?;

    let update = UpdateCountry {
        country_name: payload.country_name,
        polygon_data: payload.polygon_data.map(|p| p.into_text()),
    };

    let country = state.country_service.update_country(&code, update).await?;

    Ok(Json(country.into()))
}

/// Removes a country.
///
/// # Endpoint
///
/// `DELETE /api/v1/countries/{code}`
///
/// # Errors
///
/// Returns 404 if the country does not exist.
pub async fn delete_country_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<StatusCode, AppError> {
    state.country_service.delete_country(&code).await?;
    Ok(StatusCode::NO_CONTENT)
}
