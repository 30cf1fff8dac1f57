//! Value types for country boundaries.

use serde::{Deserialize, Serialize};

/// A geographic point in planar degree space.
///
/// Field order follows the HTTP API (`latitude`, `longitude`). Stored boundary
/// payloads use the opposite `[longitude, latitude]` order; convert those with
/// [`Coordinate::from_position`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Builds a coordinate from a GeoJSON position `[lon, lat]`.
    pub fn from_position([longitude, latitude]: [f64; 2]) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Ray-casting abscissa.
    pub(crate) fn x(&self) -> f64 {
        self.longitude
    }

    /// Ray-casting ordinate.
    pub(crate) fn y(&self) -> f64 {
        self.latitude
    }
}

/// Axis-aligned bounding box of a ring.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min_lon: f64,
    pub min_lat: f64,
    pub max_lon: f64,
    pub max_lat: f64,
}

impl Bounds {
    fn empty() -> Self {
        Self {
            min_lon: f64::INFINITY,
            min_lat: f64::INFINITY,
            max_lon: f64::NEG_INFINITY,
            max_lat: f64::NEG_INFINITY,
        }
    }

    fn extend(mut self, c: &Coordinate) -> Self {
        self.min_lon = self.min_lon.min(c.longitude);
        self.min_lat = self.min_lat.min(c.latitude);
        self.max_lon = self.max_lon.max(c.longitude);
        self.max_lat = self.max_lat.max(c.latitude);
        self
    }

    /// Inclusive check, widened by `tolerance` on every side.
    pub fn contains(&self, point: Coordinate, tolerance: f64) -> bool {
        point.longitude >= self.min_lon - tolerance
            && point.longitude <= self.max_lon + tolerance
            && point.latitude >= self.min_lat - tolerance
            && point.latitude <= self.max_lat + tolerance
    }
}

/// One closed loop of a polygon boundary.
///
/// The last vertex always connects back to the first, whether or not the
/// source data repeats it.
#[derive(Debug, Clone, PartialEq)]
pub struct Ring {
    vertices: Vec<Coordinate>,
    bounds: Bounds,
}

impl Ring {
    pub fn new(vertices: Vec<Coordinate>) -> Self {
        let bounds = vertices.iter().fold(Bounds::empty(), Bounds::extend);
        Self { vertices, bounds }
    }

    pub fn vertices(&self) -> &[Coordinate] {
        &self.vertices
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Iterates edges `(v[i], v[i + 1])`, including the closing edge back to `v[0]`.
    pub fn edges(&self) -> impl Iterator<Item = (Coordinate, Coordinate)> + '_ {
        let n = self.vertices.len();
        (0..n).map(move |i| (self.vertices[i], self.vertices[(i + 1) % n]))
    }
}

/// An exterior ring with optional holes.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    pub exterior: Ring,
    pub holes: Vec<Ring>,
}

impl Polygon {
    pub fn new(exterior: Ring, holes: Vec<Ring>) -> Self {
        Self { exterior, holes }
    }
}

/// A parsed country boundary.
#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    Polygon(Polygon),
    MultiPolygon(Vec<Polygon>),
}

impl Geometry {
    /// Name of the variant as it appears in the payload `type` field.
    pub fn kind(&self) -> &'static str {
        match self {
            Geometry::Polygon(_) => "Polygon",
            Geometry::MultiPolygon(_) => "MultiPolygon",
        }
    }

    /// Total number of vertices across every ring.
    pub fn vertex_count(&self) -> usize {
        let count = |p: &Polygon| {
            p.exterior.vertices().len()
                + p.holes.iter().map(|h| h.vertices().len()).sum::<usize>()
        };

        match self {
            Geometry::Polygon(p) => count(p),
            Geometry::MultiPolygon(parts) => parts.iter().map(count).sum(),
        }
    }
}
