//! Country entity: a named boundary stored as serialized geometry.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A country boundary record.
///
/// `polygon_data` holds the boundary exactly as stored (GeoJSON-shaped text);
/// it is parsed on demand by [`crate::domain::geometry::parse_boundary`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Country {
    pub id: i64,
    pub country_code: String,
    pub country_name: String,
    pub polygon_data: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Country {
    /// Creates a new Country instance.
    pub fn new(
        id: i64,
        country_code: String,
        country_name: String,
        polygon_data: String,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            country_code,
            country_name,
            polygon_data,
            created_at,
            updated_at,
        }
    }

    /// Canonical form of a country code: trimmed and uppercased.
    pub fn normalize_code(code: &str) -> String {
        code.trim().to_ascii_uppercase()
    }
}

/// Input data for creating a new country.
///
/// `country_code` is expected to be normalized already.
#[derive(Debug, Clone)]
pub struct NewCountry {
    pub country_code: String,
    pub country_name: String,
    pub polygon_data: String,
}

/// Partial update of a country. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default)]
pub struct UpdateCountry {
    pub country_name: Option<String>,
    pub polygon_data: Option<String>,
}

impl UpdateCountry {
    pub fn is_empty(&self) -> bool {
        self.country_name.is_none() && self.polygon_data.is_none()
    }
}
