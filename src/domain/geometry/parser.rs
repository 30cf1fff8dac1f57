//! Decoding of stored boundary payloads.

use serde::Deserialize;
use thiserror::Error;

use super::model::{Coordinate, Geometry, Polygon, Ring};

/// Minimum number of positions in a ring.
pub const MIN_RING_POSITIONS: usize = 3;

/// Why a boundary payload could not be turned into a [`Geometry`].
///
/// `polygon` is the part index (always 0 for a `"Polygon"` payload) and
/// `ring` 0 is the exterior ring.
#[derive(Debug, Error)]
pub enum GeometryParseError {
    #[error("malformed boundary payload: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("polygon {polygon} has no rings, expected an exterior ring")]
    EmptyPolygon { polygon: usize },

    #[error("polygon {polygon}, ring {ring}: expected at least 3 positions, found {found}")]
    TooFewPositions {
        polygon: usize,
        ring: usize,
        found: usize,
    },

    #[error("polygon {polygon}, ring {ring}, position {position}: coordinate is not a finite number")]
    NonFiniteCoordinate {
        polygon: usize,
        ring: usize,
        position: usize,
    },
}

type Position = [f64; 2];
type RawPolygon = Vec<Vec<Position>>;

/// Wire shape of a stored boundary. Positions are `[lon, lat]`; anything other
/// than exactly two numbers is rejected by serde.
#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
enum RawBoundary {
    Polygon { coordinates: RawPolygon },
    MultiPolygon { coordinates: Vec<RawPolygon> },
}

/// Parses a GeoJSON-shaped `Polygon` or `MultiPolygon` payload.
///
/// # Errors
///
/// Returns [`GeometryParseError`] for non-JSON text, an unsupported `type`,
/// a wrongly nested or non-numeric `coordinates` array, a polygon without
/// rings, or a ring with fewer than three positions.
pub fn parse_boundary(payload: &str) -> Result<Geometry, GeometryParseError> {
    match serde_json::from_str::<RawBoundary>(payload)? {
        RawBoundary::Polygon { coordinates } => {
            build_polygon(0, coordinates).map(Geometry::Polygon)
        }
        RawBoundary::MultiPolygon { coordinates } => coordinates
            .into_iter()
            .enumerate()
            .map(|(index, rings)| build_polygon(index, rings))
            .collect::<Result<Vec<_>, _>>()
            .map(Geometry::MultiPolygon),
    }
}

fn build_polygon(polygon: usize, rings: RawPolygon) -> Result<Polygon, GeometryParseError> {
    let mut rings = rings
        .into_iter()
        .enumerate()
        .map(|(ring, positions)| build_ring(polygon, ring, positions));

    let exterior = rings
        .next()
        .ok_or(GeometryParseError::EmptyPolygon { polygon })??;
    let holes = rings.collect::<Result<Vec<_>, _>>()?;

    Ok(Polygon::new(exterior, holes))
}

fn build_ring(
    polygon: usize,
    ring: usize,
    positions: Vec<Position>,
) -> Result<Ring, GeometryParseError> {
    if positions.len() < MIN_RING_POSITIONS {
        return Err(GeometryParseError::TooFewPositions {
            polygon,
            ring,
            found: positions.len(),
        });
    }

    if let Some(position) = positions
        .iter()
        .position(|[lon, lat]| !lon.is_finite() || !lat.is_finite())
    {
        return Err(GeometryParseError::NonFiniteCoordinate {
            polygon,
            ring,
            position,
        });
    }

    Ok(Ring::new(
        positions.into_iter().map(Coordinate::from_position).collect(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_polygon() {
        let geometry = parse_boundary(
            r#"{"type": "Polygon", "coordinates": [[[-125, 25], [-66, 25], [-66, 49], [-125, 49], [-125, 25]]]}"#,
        )
        .unwrap();

        let Geometry::Polygon(polygon) = geometry else {
            panic!("expected a polygon");
        };
        assert_eq!(polygon.exterior.vertices().len(), 5);
        assert!(polygon.holes.is_empty());
        assert_eq!(polygon.exterior.vertices()[0], Coordinate::new(25.0, -125.0));
    }

    #[test]
    fn test_parse_polygon_with_hole() {
        let geometry = parse_boundary(
            r#"{"type": "Polygon", "coordinates": [
                [[0, 0], [10, 0], [10, 10], [0, 10], [0, 0]],
                [[4, 4], [6, 4], [6, 6], [4, 6], [4, 4]]
            ]}"#,
        )
        .unwrap();

        let Geometry::Polygon(polygon) = geometry else {
            panic!("expected a polygon");
        };
        assert_eq!(polygon.holes.len(), 1);
    }

    #[test]
    fn test_parse_multipolygon() {
        let geometry = parse_boundary(
            r#"{"type": "MultiPolygon", "coordinates": [
                [[[0, 0], [1, 0], [1, 1], [0, 1]]],
                [[[10, 10], [11, 10], [11, 11], [10, 11]]]
            ]}"#,
        )
        .unwrap();

        let Geometry::MultiPolygon(parts) = geometry else {
            panic!("expected a multipolygon");
        };
        assert_eq!(parts.len(), 2);
    }

    #[test]
    fn test_parse_empty_multipolygon() {
        let geometry = parse_boundary(r#"{"type": "MultiPolygon", "coordinates": []}"#).unwrap();

        assert_eq!(geometry, Geometry::MultiPolygon(Vec::new()));
    }

    #[test]
    fn test_extra_members_are_ignored() {
        let result = parse_boundary(
            r#"{"bbox": [0, 0, 1, 1], "type": "Polygon", "coordinates": [[[0, 0], [1, 0], [1, 1]]]}"#,
        );

        assert!(result.is_ok());
    }

    #[test]
    fn test_unsupported_type() {
        let err = parse_boundary(r#"{"type": "Point", "coordinates": [1, 2]}"#).unwrap_err();

        assert!(matches!(err, GeometryParseError::Malformed(_)));
        assert!(err.to_string().contains("Point"));
    }

    #[test]
    fn test_missing_type() {
        let err = parse_boundary(r#"{"coordinates": [[[0, 0], [1, 0], [1, 1]]]}"#).unwrap_err();

        assert!(matches!(err, GeometryParseError::Malformed(_)));
    }

    #[test]
    fn test_not_json() {
        let err = parse_boundary("definitely not json").unwrap_err();

        assert!(matches!(err, GeometryParseError::Malformed(_)));
    }

    #[test]
    fn test_ring_with_two_positions() {
        let err = parse_boundary(r#"{"type": "Polygon", "coordinates": [[[0, 0], [1, 1]]]}"#)
            .unwrap_err();

        assert!(matches!(
            err,
            GeometryParseError::TooFewPositions {
                polygon: 0,
                ring: 0,
                found: 2
            }
        ));
    }

    #[test]
    fn test_short_hole_reports_its_index() {
        let err = parse_boundary(
            r#"{"type": "MultiPolygon", "coordinates": [
                [[[0, 0], [1, 0], [1, 1]]],
                [[[10, 10], [11, 10], [11, 11]], [[10.2, 10.2], [10.4, 10.4]]]
            ]}"#,
        )
        .unwrap_err();

        assert!(matches!(
            err,
            GeometryParseError::TooFewPositions {
                polygon: 1,
                ring: 1,
                found: 2
            }
        ));
    }

    #[test]
    fn test_polygon_without_rings() {
        let err = parse_boundary(r#"{"type": "Polygon", "coordinates": []}"#).unwrap_err();

        assert!(matches!(err, GeometryParseError::EmptyPolygon { polygon: 0 }));
    }

    #[test]
    fn test_non_numeric_coordinate() {
        let err = parse_boundary(
            r#"{"type": "Polygon", "coordinates": [[[0, 0], ["1", 0], [1, 1]]]}"#,
        )
        .unwrap_err();

        assert!(matches!(err, GeometryParseError::Malformed(_)));
    }

    #[test]
    fn test_position_with_three_numbers() {
        let err = parse_boundary(
            r#"{"type": "Polygon", "coordinates": [[[0, 0, 5], [1, 0, 5], [1, 1, 5]]]}"#,
        )
        .unwrap_err();

        assert!(matches!(err, GeometryParseError::Malformed(_)));
    }

    #[test]
    fn test_wrong_nesting_depth() {
        let err = parse_boundary(
            r#"{"type": "MultiPolygon", "coordinates": [[[0, 0], [1, 0], [1, 1]]]}"#,
        )
        .unwrap_err();

        assert!(matches!(err, GeometryParseError::Malformed(_)));
    }
}
