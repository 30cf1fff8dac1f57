//! DTOs for country endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::entities::Country;

/// Boundary payload as submitted by clients.
///
/// Either the GeoJSON geometry serialized to a string (the stored form) or
/// the geometry object inline.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum PolygonData {
    Text(String),
    Inline(serde_json::Value),
}

impl PolygonData {
    /// The payload in its stored text form.
    pub fn into_text(self) -> String {
        match self {
            PolygonData::Text(text) => text,
            PolygonData::Inline(value) => value.to_string(),
        }
    }
}

/// Request to add a country.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateCountryRequest {
    #[validate(length(equal = 3, message = "Country code must be 3 letters"))]
    pub country_code: String,

    #[validate(length(min = 1, max = 100))]
    pub country_name: String,

    pub polygon_data: PolygonData,
}

/// Partial update of a country. Omitted fields are left unchanged.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateCountryRequest {
    #[validate(length(min = 1, max = 100))]
    pub country_name: Option<String>,

    pub polygon_data: Option<PolygonData>,
}

/// Public view of a country. The boundary itself is not returned.
#[derive(Debug, Serialize)]
pub struct CountryItem {
    pub id: i64,
    pub country_code: String,
    pub country_name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Country> for CountryItem {
    fn from(country: Country) -> Self {
        Self {
            id: country.id,
            country_code: country.country_code,
            country_name: country.country_name,
            created_at: country.created_at,
            updated_at: country.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CountryListResponse {
    pub items: Vec<CountryItem>,
    pub count: usize,
}
