//! Frustum culling against cached planes.
//!
//! [`FrustumCuller`] extracts the six frustum planes of an arbitrary
//! transformation matrix (usually `projection * view`) once, then answers
//! point/sphere/box queries against them. Preferred over re-deriving planes
//! per query when many objects are culled by the same frustum.
//!
//! Plane extraction follows the Gribb/Hartmann method: each plane is a sum
//! or difference of matrix rows, normalized so signed distances are in world
//! units.
//!
//! The box tests are conservative: a box that lies outside the frustum
//! volume but not fully outside any single plane is reported as
//! intersecting.

use gm_core::FloatScalar;
use gm_math::{Mat4, Vec3, Vec4};
use tracing::trace;

/// One of the six frustum planes.
///
/// Named after the clip-space half-space it bounds for the identity
/// frustum: [`Plane::NegX`] is `x = -1`, [`Plane::PosX`] is `x = 1`, and so
/// on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Plane {
    /// `x = -1` (left)
    NegX = 0,
    /// `x = 1` (right)
    PosX = 1,
    /// `y = -1` (bottom)
    NegY = 2,
    /// `y = 1` (top)
    PosY = 3,
    /// `z = -1` (near)
    NegZ = 4,
    /// `z = 1` (far)
    PosZ = 5,
}

impl Plane {
    /// All six planes in extraction order.
    pub const ALL: [Plane; 6] = [
        Plane::NegX,
        Plane::PosX,
        Plane::NegY,
        Plane::PosY,
        Plane::NegZ,
        Plane::PosZ,
    ];

    /// The plane's index in `[0, 6)`.
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// The plane's bit for [`FrustumCuller::intersect_aab_masked`] masks.
    #[inline]
    pub fn mask(self) -> u32 {
        1 << self.index()
    }
}

/// Bitmask selecting every plane.
pub const PLANE_MASK_ALL: u32 = 0x3f;

/// Result of a frustum containment query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrustumTest {
    /// Fully inside the frustum.
    Inside,
    /// Partly inside (or conservatively assumed so).
    Intersect,
    /// Fully outside; the plane that culled it.
    Culled(Plane),
}

impl FrustumTest {
    /// True unless the query was culled.
    #[inline]
    pub fn is_visible(self) -> bool {
        !matches!(self, FrustumTest::Culled(_))
    }
}

/// Cached frustum planes of a transformation matrix.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrustumCuller<T: FloatScalar> {
    /// Normalized plane equations `(a, b, c, d)`, indexed by [`Plane`].
    planes: [Vec4<T>; 6],
}

/// Single-precision alias.
pub type FrustumCullerf = FrustumCuller<f32>;
/// Double-precision alias.
pub type FrustumCullerd = FrustumCuller<f64>;

impl<T: FloatScalar> FrustumCuller<T> {
    /// Extracts the frustum planes of `m` (typically `projection * view`).
    pub fn from_matrix(m: &Mat4<T>) -> Self {
        let mut culler = Self {
            planes: [Vec4::zero(); 6],
        };
        culler.set(m);
        culler
    }

    /// Re-derives the planes from a new matrix.
    pub fn set(&mut self, m: &Mat4<T>) -> &mut Self {
        let r0 = m.row(0);
        let r1 = m.row(1);
        let r2 = m.row(2);
        let r3 = m.row(3);
        let raw = [
            r3 + r0, // neg x
            r3 - r0, // pos x
            r3 + r1, // neg y
            r3 - r1, // pos y
            r3 + r2, // neg z
            r3 - r2, // pos z
        ];
        for (i, p) in raw.iter().enumerate() {
            let inv_len = T::one() / p.truncate().length();
            self.planes[i] = *p * inv_len;
        }
        trace!("frustum planes updated");
        self
    }

    /// The normalized plane equation for `plane`.
    #[inline]
    pub fn plane(&self, plane: Plane) -> Vec4<T> {
        self.planes[plane.index()]
    }

    #[inline]
    fn dist(&self, i: usize, x: T, y: T, z: T) -> T {
        let p = self.planes[i];
        p.x * x + p.y * y + p.z * z + p.w
    }

    // signed distance to the box corner furthest along the plane normal
    #[inline]
    fn dist_p_vertex(&self, i: usize, min: Vec3<T>, max: Vec3<T>) -> T {
        let p = self.planes[i];
        p.x * (if p.x < T::zero() { min.x } else { max.x })
            + p.y * (if p.y < T::zero() { min.y } else { max.y })
            + p.z * (if p.z < T::zero() { min.z } else { max.z })
            + p.w
    }

    // signed distance to the opposite corner
    #[inline]
    fn dist_n_vertex(&self, i: usize, min: Vec3<T>, max: Vec3<T>) -> T {
        let p = self.planes[i];
        p.x * (if p.x < T::zero() { max.x } else { min.x })
            + p.y * (if p.y < T::zero() { max.y } else { min.y })
            + p.z * (if p.z < T::zero() { max.z } else { min.z })
            + p.w
    }

    /// Tests whether a point lies within the frustum.
    pub fn test_point(&self, p: Vec3<T>) -> bool {
        (0..6).all(|i| self.dist(i, p.x, p.y, p.z) >= T::zero())
    }

    /// Tests whether a sphere is at least partly within the frustum.
    ///
    /// Conservative: may report true for spheres slightly outside near the
    /// frustum edges.
    pub fn test_sphere(&self, center: Vec3<T>, radius: T) -> bool {
        (0..6).all(|i| self.dist(i, center.x, center.y, center.z) >= -radius)
    }

    /// Classifies a sphere as inside, intersecting or culled.
    pub fn intersect_sphere(&self, center: Vec3<T>, radius: T) -> FrustumTest {
        let mut inside = true;
        for plane in Plane::ALL {
            let dist = self.dist(plane.index(), center.x, center.y, center.z);
            if dist < -radius {
                return FrustumTest::Culled(plane);
            }
            inside &= dist >= radius;
        }
        if inside {
            FrustumTest::Inside
        } else {
            FrustumTest::Intersect
        }
    }

    /// Tests whether an axis-aligned box is at least partly within the
    /// frustum.
    pub fn test_aab(&self, min: Vec3<T>, max: Vec3<T>) -> bool {
        (0..6).all(|i| self.dist_p_vertex(i, min, max) >= T::zero())
    }

    /// Classifies an axis-aligned box, reporting the first plane that culled
    /// it.
    pub fn intersect_aab(&self, min: Vec3<T>, max: Vec3<T>) -> FrustumTest {
        self.intersect_aab_masked(min, max, PLANE_MASK_ALL)
    }

    /// Like [`intersect_aab`](Self::intersect_aab), but planes whose bit is
    /// absent from `mask` cannot cull the box.
    ///
    /// Useful with temporal coherency: re-test only the plane that culled an
    /// object last frame by passing just that plane's
    /// [`mask`](Plane::mask).
    pub fn intersect_aab_masked(&self, min: Vec3<T>, max: Vec3<T>, mask: u32) -> FrustumTest {
        let mut inside = true;
        for plane in Plane::ALL {
            let i = plane.index();
            if mask & plane.mask() != 0 && self.dist_p_vertex(i, min, max) < T::zero() {
                return FrustumTest::Culled(plane);
            }
            inside &= self.dist_n_vertex(i, min, max) >= T::zero();
        }
        if inside {
            FrustumTest::Inside
        } else {
            FrustumTest::Intersect
        }
    }
}

impl<T: FloatScalar> Default for FrustumCuller<T> {
    /// The identity frustum: the clip-space cube `[-1, 1]^3`.
    fn default() -> Self {
        Self::from_matrix(&Mat4::identity())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gm_math::{Mat4d, Mat4f, Vec3d, Vec3f};

    #[test]
    fn test_identity_frustum_point() {
        let c = FrustumCullerf::default();
        assert!(c.test_point(Vec3f::zero()));
        assert!(c.test_point(Vec3f::new(1.0, 1.0, 1.0)));
        assert!(!c.test_point(Vec3f::new(1.1, 0.0, 0.0)));
        assert!(!c.test_point(Vec3f::new(0.0, -1.1, 0.0)));
    }

    #[test]
    fn test_ortho_sphere_classification() {
        let c = FrustumCullerf::from_matrix(&Mat4f::ortho(-1.0, 1.0, -1.0, 1.0, -1.0, 1.0));
        assert!(c.test_sphere(Vec3f::new(1.0, 0.0, 0.0), 0.1));
        assert!(!c.test_sphere(Vec3f::new(1.2, 0.0, 0.0), 0.1));
    }

    #[test]
    fn test_intersect_sphere_three_states() {
        let c = FrustumCullerd::default();
        assert_eq!(
            c.intersect_sphere(Vec3d::zero(), 0.5),
            FrustumTest::Inside
        );
        assert_eq!(
            c.intersect_sphere(Vec3d::new(1.0, 0.0, 0.0), 0.5),
            FrustumTest::Intersect
        );
        assert_eq!(
            c.intersect_sphere(Vec3d::new(3.0, 0.0, 0.0), 0.5),
            FrustumTest::Culled(Plane::PosX)
        );
        assert_eq!(
            c.intersect_sphere(Vec3d::new(-3.0, 0.0, 0.0), 0.5),
            FrustumTest::Culled(Plane::NegX)
        );
    }

    #[test]
    fn test_intersect_aab_reports_culling_plane() {
        let c = FrustumCullerd::default();
        assert_eq!(
            c.intersect_aab(Vec3d::splat(-0.5), Vec3d::splat(0.5)),
            FrustumTest::Inside
        );
        assert_eq!(
            c.intersect_aab(Vec3d::new(0.5, -0.5, -0.5), Vec3d::new(1.5, 0.5, 0.5)),
            FrustumTest::Intersect
        );
        assert_eq!(
            c.intersect_aab(Vec3d::new(0.0, 2.0, 0.0), Vec3d::new(1.0, 3.0, 1.0)),
            FrustumTest::Culled(Plane::PosY)
        );
    }

    #[test]
    fn test_intersect_aab_masked_skips_planes() {
        let c = FrustumCullerd::default();
        let (min, max) = (Vec3d::new(2.0, -0.5, -0.5), Vec3d::new(3.0, 0.5, 0.5));
        assert_eq!(c.intersect_aab(min, max), FrustumTest::Culled(Plane::PosX));
        // masking off the culling plane downgrades the result
        let masked = c.intersect_aab_masked(min, max, PLANE_MASK_ALL ^ Plane::PosX.mask());
        assert_ne!(masked, FrustumTest::Culled(Plane::PosX));
    }

    #[test]
    fn test_perspective_view_frustum() {
        let proj = Mat4d::perspective(std::f64::consts::FRAC_PI_2, 1.0, 0.1, 100.0);
        let view = Mat4d::look_at(
            Vec3d::new(0.0, 0.0, 5.0),
            Vec3d::zero(),
            Vec3d::new(0.0, 1.0, 0.0),
        );
        let c = FrustumCullerd::from_matrix(&(proj * view));
        // looking down -z from z=5: origin visible, behind the eye not
        assert!(c.test_point(Vec3d::zero()));
        assert!(!c.test_point(Vec3d::new(0.0, 0.0, 10.0)));
        assert!(c.test_sphere(Vec3d::new(0.0, 0.0, -50.0), 1.0));
        assert!(!c.test_aab(Vec3d::new(0.0, 0.0, 200.0), Vec3d::new(1.0, 1.0, 201.0)));
    }

    #[test]
    fn test_set_rederives_planes() {
        let mut c = FrustumCullerf::default();
        assert!(!c.test_point(Vec3f::new(5.0, 0.0, 0.0)));
        c.set(&Mat4f::ortho(-10.0, 10.0, -10.0, 10.0, -10.0, 10.0));
        assert!(c.test_point(Vec3f::new(5.0, 0.0, 0.0)));
    }
}
