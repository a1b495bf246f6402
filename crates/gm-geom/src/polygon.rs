//! Point-in-polygon testing over flattened vertex buffers.
//!
//! [`PolygonsPoint`] answers 2D containment queries against one or more
//! polygons given as a single flat `x, y` vertex buffer plus the start index
//! of each sub-polygon. Containment uses the even-odd rule with a horizontal
//! ray cast, so interior sub-polygons act as holes and nested polygons
//! alternate between solid and hole.
//!
//! # Usage
//!
//! ```rust
//! use gm_geom::PolygonsPoint;
//!
//! // a unit square with a centered half-size square hole
//! let verts = [
//!     0.0, 0.0, 1.0, 0.0, 1.0, 1.0, 0.0, 1.0, // outer
//!     0.25, 0.25, 0.75, 0.25, 0.75, 0.75, 0.25, 0.75, // hole
//! ];
//! let poly = PolygonsPoint::new(&verts, &[4]);
//! assert!(poly.test_point(0.1, 0.1));
//! assert!(!poly.test_point(0.5, 0.5));
//! ```

use gm_core::FloatScalar;

/// A set of polygons prepared for point containment queries.
///
/// The vertex data is copied at construction; the predicate owns it.
#[derive(Debug, Clone, PartialEq)]
pub struct PolygonsPoint<T: FloatScalar> {
    /// Flattened `x0, y0, x1, y1, ...` coordinates of all sub-polygons.
    vertices: Vec<T>,
    /// First vertex index of each sub-polygon; always begins with 0.
    starts: Vec<usize>,
    min_x: T,
    min_y: T,
    max_x: T,
    max_y: T,
}

/// Single-precision alias.
pub type PolygonsPointf = PolygonsPoint<f32>;
/// Double-precision alias.
pub type PolygonsPointd = PolygonsPoint<f64>;

impl<T: FloatScalar> PolygonsPoint<T> {
    /// Creates the predicate from a flattened vertex buffer.
    ///
    /// `starts` lists the first vertex index (counted in vertices, not
    /// floats) of every sub-polygon after the first; an empty slice means a
    /// single polygon. Sub-polygons are implicitly closed.
    ///
    /// # Panics
    ///
    /// Panics when `vertices_xy` has an odd length or a start index is out
    /// of range or unsorted.
    pub fn new(vertices_xy: &[T], starts: &[usize]) -> Self {
        assert!(
            vertices_xy.len() % 2 == 0,
            "vertex buffer must hold x/y pairs, got {} floats",
            vertices_xy.len()
        );
        let count = vertices_xy.len() / 2;
        let mut all_starts = Vec::with_capacity(starts.len() + 1);
        all_starts.push(0);
        all_starts.extend_from_slice(starts);
        for w in all_starts.windows(2) {
            assert!(w[0] < w[1] && w[1] < count, "invalid sub-polygon start {}", w[1]);
        }

        let mut poly = Self {
            vertices: vertices_xy.to_vec(),
            starts: all_starts,
            min_x: T::infinity(),
            min_y: T::infinity(),
            max_x: T::neg_infinity(),
            max_y: T::neg_infinity(),
        };
        for i in 0..count {
            let x = poly.x(i);
            let y = poly.y(i);
            poly.min_x = poly.min_x.min(x);
            poly.min_y = poly.min_y.min(y);
            poly.max_x = poly.max_x.max(x);
            poly.max_y = poly.max_y.max(y);
        }
        poly
    }

    #[inline]
    fn x(&self, i: usize) -> T {
        self.vertices[2 * i]
    }

    #[inline]
    fn y(&self, i: usize) -> T {
        self.vertices[2 * i + 1]
    }

    /// Number of sub-polygons.
    #[inline]
    pub fn polygon_count(&self) -> usize {
        self.starts.len()
    }

    /// Tests whether the point `(x, y)` lies inside the polygon set under
    /// the even-odd rule.
    ///
    /// Points inside a hole sub-polygon are outside; the bounding rectangle
    /// rejects far-away points before any edges are visited.
    pub fn test_point(&self, x: T, y: T) -> bool {
        if x < self.min_x || x > self.max_x || y < self.min_y || y > self.max_y {
            return false;
        }
        let count = self.vertices.len() / 2;
        let mut odd = false;
        for (k, &start) in self.starts.iter().enumerate() {
            let end = self.starts.get(k + 1).copied().unwrap_or(count);
            let mut j = end - 1;
            for i in start..end {
                let yi = self.y(i);
                let yj = self.y(j);
                if (yi <= y && y < yj) || (yj <= y && y < yi) {
                    let xi = self.x(i);
                    let xj = self.x(j);
                    // x coordinate where the edge crosses the scanline
                    if x < (xj - xi) * (y - yi) / (yj - yi) + xi {
                        odd = !odd;
                    }
                }
                j = i;
            }
        }
        odd
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(x0: f32, y0: f32, x1: f32, y1: f32) -> [f32; 8] {
        [x0, y0, x1, y0, x1, y1, x0, y1]
    }

    #[test]
    fn test_point_in_triangle() {
        let poly = PolygonsPointf::new(&[0.0, 0.0, 4.0, 0.0, 0.0, 4.0], &[]);
        assert!(poly.test_point(1.0, 1.0));
        assert!(!poly.test_point(3.0, 3.0));
        assert!(!poly.test_point(-1.0, 1.0));
    }

    #[test]
    fn test_bounding_box_early_reject() {
        let poly = PolygonsPointf::new(&square(0.0, 0.0, 1.0, 1.0), &[]);
        assert!(!poly.test_point(100.0, 0.5));
        assert!(!poly.test_point(0.5, -100.0));
    }

    #[test]
    fn test_polygon_with_hole() {
        let mut verts = Vec::new();
        verts.extend_from_slice(&square(0.0, 0.0, 10.0, 10.0));
        verts.extend_from_slice(&square(4.0, 4.0, 6.0, 6.0));
        let poly = PolygonsPointf::new(&verts, &[4]);
        assert_eq!(poly.polygon_count(), 2);
        assert!(poly.test_point(1.0, 1.0));
        assert!(!poly.test_point(5.0, 5.0)); // inside the hole
        assert!(poly.test_point(4.0 - 0.5, 5.0)); // between hole and border
        assert!(!poly.test_point(11.0, 5.0));
    }

    #[test]
    fn test_disjoint_polygons() {
        let mut verts = Vec::new();
        verts.extend_from_slice(&square(0.0, 0.0, 1.0, 1.0));
        verts.extend_from_slice(&square(5.0, 5.0, 6.0, 6.0));
        let poly = PolygonsPointd::new(
            &verts.iter().map(|&v| v as f64).collect::<Vec<_>>(),
            &[4],
        );
        assert!(poly.test_point(0.5, 0.5));
        assert!(poly.test_point(5.5, 5.5));
        assert!(!poly.test_point(3.0, 3.0));
    }

    #[test]
    fn test_concave_polygon() {
        // a U shape: inside the notch is outside the polygon
        let verts = [
            0.0f32, 0.0, 5.0, 0.0, 5.0, 5.0, 3.0, 5.0, 3.0, 2.0, 2.0, 2.0, 2.0, 5.0, 0.0, 5.0,
        ];
        let poly = PolygonsPointf::new(&verts, &[]);
        assert!(poly.test_point(1.0, 4.0));
        assert!(poly.test_point(4.0, 4.0));
        assert!(!poly.test_point(2.5, 4.0));
        assert!(poly.test_point(2.5, 1.0));
    }

    #[test]
    #[should_panic]
    fn test_odd_vertex_buffer_rejected() {
        let _ = PolygonsPointf::new(&[0.0, 0.0, 1.0], &[]);
    }
}
