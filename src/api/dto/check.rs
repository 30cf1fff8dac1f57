//! DTOs for the containment check endpoint.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_with::{DisplayFromStr, PickFirst, serde_as};
use validator::Validate;

/// Request to check whether a point lies inside a country.
///
/// Coordinates are accepted as JSON numbers or numeric strings
/// (`40.7128` or `"40.7128"`).
#[serde_as]
#[derive(Debug, Deserialize, Validate)]
pub struct CheckRequest {
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    #[validate(range(min = -90.0, max = 90.0, message = "Latitude must be between -90 and 90"))]
    pub latitude: f64,

    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    #[validate(range(
        min = -180.0,
        max = 180.0,
        message = "Longitude must be between -180 and 180"
    ))]
    pub longitude: f64,

    #[validate(length(min = 1, max = 3, message = "Country code must be 1 to 3 characters"))]
    pub country_code: String,
}

/// Result of a containment check.
#[derive(Debug, Serialize)]
pub struct CheckResponse {
    pub is_inside_country: bool,
    pub latitude: f64,
    pub longitude: f64,
    pub country_code: String,
    pub country_name: String,
    pub checked_at: DateTime<Utc>,
}
