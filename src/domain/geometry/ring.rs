//! Point-in-ring test (crossing number).

use super::model::{Coordinate, Ring};

/// Maximum perpendicular distance, in degrees, at which a point still counts
/// as lying on an edge. Roughly 0.1 mm on the ground.
pub const BOUNDARY_TOLERANCE: f64 = 1e-9;

impl Ring {
    /// Returns `true` if `point` is inside the ring or on its boundary.
    ///
    /// A horizontal ray is cast from the point toward increasing longitude and
    /// the edges it crosses are counted; an odd count means inside. Edge
    /// endpoints use the half-open rule `(ay > py) != (by > py)` so a ray through
    /// a vertex is counted exactly once.
    ///
    /// Longitudes are compared in raw degrees. Rings that cross the ±180°
    /// meridian are not unwrapped.
    pub fn contains(&self, point: Coordinate) -> bool {
        if !self.bounds().contains(point, BOUNDARY_TOLERANCE) {
            return false;
        }

        let (px, py) = (point.x(), point.y());
        let mut inside = false;

        for (a, b) in self.edges() {
            if a == b {
                continue;
            }

            if on_segment(a, b, point) {
                return true;
            }

            let (ax, ay, bx, by) = (a.x(), a.y(), b.x(), b.y());
            if (ay > py) != (by > py) {
                let x_cross = ax + (py - ay) * (bx - ax) / (by - ay);
                if px < x_cross {
                    inside = !inside;
                }
            }
        }

        inside
    }
}

/// Whether `p` lies on the closed segment `a`-`b` (within [`BOUNDARY_TOLERANCE`]).
fn on_segment(a: Coordinate, b: Coordinate, p: Coordinate) -> bool {
    let (dx, dy) = (b.x() - a.x(), b.y() - a.y());
    let length = dx.hypot(dy);
    if length == 0.0 {
        return false;
    }

    let cross = dx * (p.y() - a.y()) - dy * (p.x() - a.x());
    if cross.abs() / length > BOUNDARY_TOLERANCE {
        return false;
    }

    p.x() >= a.x().min(b.x()) - BOUNDARY_TOLERANCE
        && p.x() <= a.x().max(b.x()) + BOUNDARY_TOLERANCE
        && p.y() >= a.y().min(b.y()) - BOUNDARY_TOLERANCE
        && p.y() <= a.y().max(b.y()) + BOUNDARY_TOLERANCE
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ring(positions: &[[f64; 2]]) -> Ring {
        Ring::new(positions.iter().copied().map(Coordinate::from_position).collect())
    }

    fn usa() -> Ring {
        ring(&[
            [-125.0, 25.0],
            [-66.0, 25.0],
            [-66.0, 49.0],
            [-125.0, 49.0],
            [-125.0, 25.0],
        ])
    }

    #[test]
    fn test_point_strictly_inside_rectangle() {
        assert!(usa().contains(Coordinate::new(40.7128, -74.0060)));
        assert!(usa().contains(Coordinate::new(37.0, -100.0)));
    }

    #[test]
    fn test_point_strictly_outside_rectangle() {
        assert!(!usa().contains(Coordinate::new(50.0, -100.0)));
        assert!(!usa().contains(Coordinate::new(37.0, -60.0)));
        assert!(!usa().contains(Coordinate::new(31.7683, 35.2137)));
    }

    #[test]
    fn test_coarse_usa_box_reaches_ottawa() {
        // 45.42N, 75.70W sits below the 49N edge of the sample box.
        assert!(usa().contains(Coordinate::new(45.4215, -75.6972)));
    }

    #[test]
    fn test_swapped_axes_change_the_answer() {
        // New York read as (lon, lat) instead of (lat, lon) lands in Antarctica.
        assert!(!usa().contains(Coordinate::new(-74.0060, 40.7128)));
    }

    #[test]
    fn test_point_on_edge_is_inside() {
        let r = usa();
        assert!(r.contains(Coordinate::new(25.0, -100.0)));
        assert!(r.contains(Coordinate::new(49.0, -100.0)));
        assert!(r.contains(Coordinate::new(30.0, -125.0)));
        assert!(r.contains(Coordinate::new(30.0, -66.0)));
    }

    #[test]
    fn test_point_on_vertex_is_inside() {
        let r = usa();
        assert!(r.contains(Coordinate::new(25.0, -125.0)));
        assert!(r.contains(Coordinate::new(49.0, -66.0)));
    }

    #[test]
    fn test_boundary_result_is_reproducible() {
        let r = usa();
        let p = Coordinate::new(49.0, -90.5);
        let first = r.contains(p);
        assert!(first);
        for _ in 0..100 {
            assert_eq!(r.contains(p), first);
        }
    }

    #[test]
    fn test_point_on_diagonal_edge_is_inside() {
        let triangle = ring(&[[0.0, 0.0], [10.0, 0.0], [0.0, 10.0]]);

        assert!(triangle.contains(Coordinate::new(5.0, 5.0)));
        assert!(triangle.contains(Coordinate::new(0.3, 9.7)));
        assert!(!triangle.contains(Coordinate::new(5.1, 5.1)));
    }

    #[test]
    fn test_closure_insensitive() {
        let open = ring(&[[34.2, 29.5], [35.9, 29.5], [35.9, 33.4], [34.2, 33.4]]);
        let closed = ring(&[
            [34.2, 29.5],
            [35.9, 29.5],
            [35.9, 33.4],
            [34.2, 33.4],
            [34.2, 29.5],
        ]);

        let probes = [
            Coordinate::new(31.7683, 35.2137),
            Coordinate::new(29.5, 35.0),
            Coordinate::new(33.4, 34.2),
            Coordinate::new(28.0, 35.0),
            Coordinate::new(31.0, 36.5),
            Coordinate::new(31.0, 34.2),
        ];

        for p in probes {
            assert_eq!(open.contains(p), closed.contains(p), "probe {:?}", p);
        }
    }

    #[test]
    fn test_duplicate_vertices_are_skipped() {
        let r = ring(&[
            [0.0, 0.0],
            [0.0, 0.0],
            [4.0, 0.0],
            [4.0, 0.0],
            [4.0, 4.0],
            [0.0, 4.0],
            [0.0, 4.0],
        ]);

        assert!(r.contains(Coordinate::new(2.0, 2.0)));
        assert!(!r.contains(Coordinate::new(5.0, 2.0)));
    }

    #[test]
    fn test_ray_through_vertex_counts_once() {
        // Diamond: the ray from (lat 0, lon -1) passes exactly through the
        // vertex at (lon 1, lat 0) and the one at (lon -2, lat 0) lies behind it.
        let diamond = ring(&[[0.0, -1.0], [1.0, 0.0], [0.0, 1.0], [-2.0, 0.0]]);

        assert!(diamond.contains(Coordinate::new(0.0, -1.0)));
        assert!(diamond.contains(Coordinate::new(0.0, 0.5)));
        assert!(!diamond.contains(Coordinate::new(0.0, 1.5)));
        assert!(!diamond.contains(Coordinate::new(0.0, -3.0)));
    }

    #[test]
    fn test_concave_ring() {
        // U shape open to the north.
        let u = ring(&[
            [0.0, 0.0],
            [6.0, 0.0],
            [6.0, 6.0],
            [4.0, 6.0],
            [4.0, 2.0],
            [2.0, 2.0],
            [2.0, 6.0],
            [0.0, 6.0],
        ]);

        assert!(u.contains(Coordinate::new(1.0, 1.0)));
        assert!(u.contains(Coordinate::new(5.0, 5.0)));
        assert!(!u.contains(Coordinate::new(4.0, 3.0)));
    }

    #[test]
    fn test_degenerate_rings_do_not_panic() {
        let collapsed = ring(&[[1.0, 1.0], [1.0, 1.0], [1.0, 1.0]]);
        assert!(!collapsed.contains(Coordinate::new(0.0, 0.0)));

        let line = ring(&[[0.0, 0.0], [2.0, 2.0], [0.0, 0.0]]);
        assert!(line.contains(Coordinate::new(1.0, 1.0)));
        assert!(!line.contains(Coordinate::new(0.0, 1.0)));

        let empty = Ring::new(Vec::new());
        assert!(!empty.contains(Coordinate::new(0.0, 0.0)));
    }

    #[test]
    fn test_out_of_range_and_nan_points_do_not_panic() {
        let r = usa();
        assert!(!r.contains(Coordinate::new(500.0, -1000.0)));
        assert!(!r.contains(Coordinate::new(f64::NAN, -100.0)));
        assert!(!r.contains(Coordinate::new(30.0, f64::INFINITY)));
    }

    #[test]
    fn test_antimeridian_ring_is_not_unwrapped() {
        // Spans 170E..-170E the "short way"; in raw degrees it covers -170..170.
        let r = ring(&[[170.0, -10.0], [-170.0, -10.0], [-170.0, 10.0], [170.0, 10.0]]);

        assert!(r.contains(Coordinate::new(0.0, 0.0)));
        assert!(!r.contains(Coordinate::new(0.0, 179.0)));
    }
}
