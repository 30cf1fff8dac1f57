//! Country boundaries from outside the API: GeoJSON files and the sample set.

use serde::Deserialize;
use serde_json::{Map, Value, json};

use crate::application::services::country_service::validate_code;
use crate::domain::entities::NewCountry;
use crate::domain::geometry::parse_boundary;

/// Feature properties holding the ISO 3166-1 alpha-3 code, in lookup order.
const CODE_PROPERTIES: &[&str] = &["ISO_A3", "ISO3166-1-Alpha-3", "iso_a3", "ADM0_A3"];

/// Feature properties holding the display name, in lookup order.
const NAME_PROPERTIES: &[&str] = &["ADMIN", "NAME", "name"];

#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("not a GeoJSON document: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("expected a FeatureCollection, found {0}")]
    NotACollection(String),
}

/// A feature that could not be turned into a country.
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedFeature {
    pub index: usize,
    pub label: String,
    pub reason: String,
}

/// Countries extracted from a feature collection.
#[derive(Debug, Default)]
pub struct ImportBatch {
    pub countries: Vec<NewCountry>,
    pub skipped: Vec<SkippedFeature>,
}

#[derive(Deserialize)]
struct FeatureCollection {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    features: Vec<Feature>,
}

#[derive(Deserialize)]
struct Feature {
    #[serde(default)]
    properties: Option<Map<String, Value>>,
    #[serde(default)]
    geometry: Option<Value>,
}

/// Extracts countries from a GeoJSON `FeatureCollection`.
///
/// Each feature needs a three-letter code property, a name property and a
/// `Polygon` or `MultiPolygon` geometry that parses. Features failing any of
/// these are reported in [`ImportBatch::skipped`] instead of aborting the
/// import. When a code appears twice only the first feature is kept.
///
/// # Errors
///
/// Returns [`ImportError`] if the document is not a feature collection.
pub fn parse_feature_collection(document: &str) -> Result<ImportBatch, ImportError> {
    let collection: FeatureCollection = serde_json::from_str(document)?;

    if collection.kind != "FeatureCollection" {
        return Err(ImportError::NotACollection(collection.kind));
    }

    let mut batch = ImportBatch::default();

    for (index, feature) in collection.features.into_iter().enumerate() {
        let properties = feature.properties.unwrap_or_default();
        let code = first_string(&properties, CODE_PROPERTIES);
        let name = first_string(&properties, NAME_PROPERTIES);
        let label = name
            .clone()
            .or_else(|| code.clone())
            .unwrap_or_else(|| format!("feature #{index}"));

        match build_country(code, name, feature.geometry) {
            Ok(country) => {
                if batch
                    .countries
                    .iter()
                    .any(|c| c.country_code == country.country_code)
                {
                    batch.skipped.push(SkippedFeature {
                        index,
                        label,
                        reason: format!("duplicate code {}", country.country_code),
                    });
                } else {
                    batch.countries.push(country);
                }
            }
            Err(reason) => batch.skipped.push(SkippedFeature {
                index,
                label,
                reason,
            }),
        }
    }

    Ok(batch)
}

fn first_string(properties: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|key| properties.get(*key))
        .filter_map(Value::as_str)
        .map(str::trim)
        .find(|value| !value.is_empty())
        .map(str::to_string)
}

fn build_country(
    code: Option<String>,
    name: Option<String>,
    geometry: Option<Value>,
) -> Result<NewCountry, String> {
    let code = code.ok_or("no country code property")?;
    let country_code = validate_code(&code).map_err(|_| format!("invalid country code {code:?}"))?;
    let country_name = name.ok_or("no name property")?;

    let geometry = geometry.ok_or("no geometry")?;
    let polygon_data = geometry.to_string();
    parse_boundary(&polygon_data).map_err(|e| e.to_string())?;

    Ok(NewCountry {
        country_code,
        country_name,
        polygon_data,
    })
}

/// Coarse bounding rectangles `[min_lon, min_lat, max_lon, max_lat]` for
/// demos and local testing. They overlap neighbours and are not real borders.
const SAMPLE_RECTANGLES: &[(&str, &str, [f64; 4])] = &[
    ("USA", "United States", [-125.0, 25.0, -66.0, 49.0]),
    ("CAN", "Canada", [-140.0, 42.0, -52.0, 84.0]),
    ("MEX", "Mexico", [-118.0, 14.0, -86.0, 33.0]),
    ("GBR", "United Kingdom", [-8.0, 49.0, 2.0, 61.0]),
    ("FRA", "France", [-5.0, 42.0, 8.0, 52.0]),
    ("ISR", "Israel", [34.2, 29.5, 35.9, 33.4]),
    ("DEU", "Germany", [5.8, 47.3, 15.0, 55.1]),
    ("ITA", "Italy", [6.6, 35.5, 18.5, 47.1]),
    ("ESP", "Spain", [-9.3, 35.9, 4.3, 43.8]),
    ("JPN", "Japan", [123.0, 24.0, 146.0, 46.0]),
    ("CHN", "China", [73.5, 18.2, 135.1, 53.6]),
    ("IND", "India", [68.1, 6.8, 97.4, 37.1]),
    ("AUS", "Australia", [113.3, -43.6, 153.6, -10.7]),
    ("BRA", "Brazil", [-74.0, -33.8, -34.8, 5.3]),
    ("RUS", "Russia", [19.6, 41.2, 180.0, 81.9]),
    ("ZAF", "South Africa", [16.3, -35.0, 32.9, -22.1]),
    ("EGY", "Egypt", [24.7, 22.0, 36.9, 31.7]),
    ("TUR", "Turkey", [26.0, 35.8, 44.8, 42.1]),
    ("ARG", "Argentina", [-73.6, -55.1, -53.6, -21.8]),
    ("NLD", "Netherlands", [3.4, 50.8, 7.2, 53.6]),
    ("CHE", "Switzerland", [6.0, 45.8, 10.5, 47.8]),
    ("SWE", "Sweden", [11.1, 55.3, 24.2, 69.1]),
    ("NOR", "Norway", [4.6, 58.0, 31.3, 71.2]),
    ("DNK", "Denmark", [8.1, 54.6, 12.7, 57.8]),
    ("POL", "Poland", [14.1, 49.0, 24.1, 54.8]),
];

/// The built-in sample countries, each a closed rectangular `Polygon`.
pub fn sample_countries() -> Vec<NewCountry> {
    SAMPLE_RECTANGLES
        .iter()
        .map(|&(code, name, [west, south, east, north])| NewCountry {
            country_code: code.to_string(),
            country_name: name.to_string(),
            polygon_data: json!({
                "type": "Polygon",
                "coordinates": [[
                    [west, south], [east, south], [east, north], [west, north], [west, south]
                ]]
            })
            .to_string(),
        })
        .collect()
}
