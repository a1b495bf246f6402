//! Ray versus axis-aligned box intersection.
//!
//! [`RayAab`] is a slab test with the per-ray work hoisted out: reciprocal
//! direction components and the near/far corner selection are computed once
//! in [`new`](RayAab::new), so testing a ray against many boxes costs a few
//! multiplies and compares per box.

use gm_core::FloatScalar;
use gm_math::Vec3;

/// A ray prepared for repeated axis-aligned box tests.
///
/// Zero direction components follow IEEE semantics: the reciprocal becomes
/// infinite and the slab comparisons still resolve correctly for boxes not
/// containing the ray origin's coordinate on that axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayAab<T: FloatScalar> {
    origin: Vec3<T>,
    inv_dir: Vec3<T>,
    /// Per-axis: true when the direction component is negative, so the far
    /// slab comes from the box minimum.
    neg: [bool; 3],
}

/// Single-precision alias.
pub type RayAabf = RayAab<f32>;
/// Double-precision alias.
pub type RayAabd = RayAab<f64>;

impl<T: FloatScalar> RayAab<T> {
    /// Prepares a ray from its origin and direction.
    ///
    /// The direction need not be normalized.
    pub fn new(origin: Vec3<T>, dir: Vec3<T>) -> Self {
        let mut r = Self {
            origin,
            inv_dir: Vec3::zero(),
            neg: [false; 3],
        };
        r.set(origin, dir);
        r
    }

    /// Re-initializes with a new ray, keeping the precomputation scheme.
    pub fn set(&mut self, origin: Vec3<T>, dir: Vec3<T>) -> &mut Self {
        self.origin = origin;
        self.inv_dir = Vec3::new(T::one() / dir.x, T::one() / dir.y, T::one() / dir.z);
        self.neg = [dir.x < T::zero(), dir.y < T::zero(), dir.z < T::zero()];
        self
    }

    /// Tests whether the ray intersects the box `[min, max]` at any
    /// non-negative parameter.
    pub fn test(&self, min: Vec3<T>, max: Vec3<T>) -> bool {
        let bounds = [min, max];
        let near = |axis: usize, neg: bool| bounds[neg as usize][axis];
        let far = |axis: usize, neg: bool| bounds[!neg as usize][axis];

        let mut tmin = (near(0, self.neg[0]) - self.origin.x) * self.inv_dir.x;
        let mut tmax = (far(0, self.neg[0]) - self.origin.x) * self.inv_dir.x;

        let tymin = (near(1, self.neg[1]) - self.origin.y) * self.inv_dir.y;
        let tymax = (far(1, self.neg[1]) - self.origin.y) * self.inv_dir.y;
        if tmin > tymax || tymin > tmax {
            return false;
        }
        tmin = tmin.max(tymin);
        tmax = tmax.min(tymax);

        let tzmin = (near(2, self.neg[2]) - self.origin.z) * self.inv_dir.z;
        let tzmax = (far(2, self.neg[2]) - self.origin.z) * self.inv_dir.z;
        if tmin > tzmax || tzmin > tmax {
            return false;
        }
        tmin = tmin.max(tzmin);
        tmax = tmax.min(tzmax);

        tmax >= tmin && tmax >= T::zero()
    }
}
