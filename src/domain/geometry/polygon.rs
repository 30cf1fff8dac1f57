//! Polygon and multi-polygon containment.

use super::model::{Coordinate, Geometry, Polygon};

impl Polygon {
    /// Inside the exterior ring and outside every hole.
    ///
    /// Ring tests are boundary-inclusive, so a point on a hole's edge is
    /// excluded from the polygon.
    pub fn contains(&self, point: Coordinate) -> bool {
        self.exterior.contains(point) && !self.holes.iter().any(|hole| hole.contains(point))
    }
}

/// Union of `parts`; `false` for an empty slice.
pub fn any_contains(parts: &[Polygon], point: Coordinate) -> bool {
    parts.iter().any(|polygon| polygon.contains(point))
}

impl Geometry {
    pub fn contains(&self, point: Coordinate) -> bool {
        match self {
            Geometry::Polygon(polygon) => polygon.contains(point),
            Geometry::MultiPolygon(parts) => any_contains(parts, point),
        }
    }
}
