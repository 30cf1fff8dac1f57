//! Point-in-boundary engine.
//!
//! Pure and synchronous: every function here is a deterministic function of its
//! arguments, holds no shared state and performs no I/O, so it can be called
//! from any number of request tasks at once.
//!
//! # Entry Points
//!
//! - [`parse_boundary`] - decode a stored payload into a [`Geometry`]
//! - [`is_contained`] - test a [`Coordinate`] against a parsed [`Geometry`]
//! - [`is_contained_raw`] - parse and test in one step, `false` on bad payloads
//!
//! # Payload Format
//!
//! ```text
//! {"type": "Polygon", "coordinates": [[[lon, lat], [lon, lat], ...]]}
//! {"type": "MultiPolygon", "coordinates": [[[[lon, lat], ...]], [[[lon, lat], ...]]]}
//! ```
//!
//! Positions are `[longitude, latitude]`, the reverse of [`Coordinate`]'s
//! field order.
//!
//! # Semantics
//!
//! Planar point-in-polygon in raw degree space. Points on a ring's boundary
//! count as inside that ring. No geodesic or antimeridian handling.

mod model;
mod parser;
mod polygon;
mod ring;

pub use model::{Bounds, Coordinate, Geometry, Polygon, Ring};
pub use parser::{GeometryParseError, MIN_RING_POSITIONS, parse_boundary};
pub use polygon::any_contains;
pub use ring::BOUNDARY_TOLERANCE;

/// Returns whether `point` lies inside `boundary` (boundary-inclusive).
pub fn is_contained(point: Coordinate, boundary: &Geometry) -> bool {
    boundary.contains(point)
}

/// Parses `payload` and tests `point` against it.
///
/// A payload that fails to parse yields `false` rather than an error, so a bad
/// stored boundary never fails the calling request. The parse error is logged
/// at `WARN`.
pub fn is_contained_raw(point: Coordinate, payload: &str) -> bool {
    match parse_boundary(payload) {
        Ok(geometry) => is_contained(point, &geometry),
        Err(e) => {
            tracing::warn!(error = %e, "Boundary payload rejected, treating point as outside");
            false
        }
    }
}
