//! Axis-angle rotation representation.
//!
//! [`AxisAngle`] stores a rotation as an angle in radians plus a rotation
//! axis. The axis is expected to be unit length for the conversions to hold;
//! [`normalize`](AxisAngle::normalize) restores that, it is never enforced
//! automatically.

use std::fmt;

use approx::{AbsDiffEq, RelativeEq};
use gm_core::FloatScalar;

use crate::{Mat3, Mat4, Quat, Vec3};

/// An angle (radians) and rotation axis.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(C)]
pub struct AxisAngle<T: FloatScalar> {
    /// Rotation angle in radians
    pub angle: T,
    /// X component of the axis
    pub x: T,
    /// Y component of the axis
    pub y: T,
    /// Z component of the axis
    pub z: T,
}

/// Single-precision alias.
pub type AxisAnglef = AxisAngle<f32>;
/// Double-precision alias.
pub type AxisAngled = AxisAngle<f64>;

// acos clamped against rounding drift just outside [-1, 1]
fn safe_acos<T: FloatScalar>(v: T) -> T {
    if v < -T::one() {
        T::pi()
    } else if v > T::one() {
        T::zero()
    } else {
        v.acos()
    }
}

impl<T: FloatScalar> AxisAngle<T> {
    /// Creates from an angle and raw axis components.
    #[inline]
    pub fn new(angle: T, x: T, y: T, z: T) -> Self {
        Self { angle, x, y, z }
    }

    /// Creates from an angle and an axis vector.
    #[inline]
    pub fn from_vec(angle: T, axis: Vec3<T>) -> Self {
        Self::new(angle, axis.x, axis.y, axis.z)
    }

    /// Extracts the rotation of a quaternion.
    ///
    /// `angle = 2·acos(w)`; the axis is the vector part scaled by
    /// `1/sqrt(1 - w²)`. Undefined for the zero rotation (`w = ±1`), where
    /// that scale is infinite; the result's axis is then non-finite. Not
    /// checked.
    pub fn from_quat(q: Quat<T>) -> Self {
        let acos = safe_acos(q.w);
        let inv_sqrt = T::one() / (T::one() - q.w * q.w).sqrt();
        Self::new(acos + acos, q.x * inv_sqrt, q.y * inv_sqrt, q.z * inv_sqrt)
    }

    /// The axis as a vector.
    #[inline]
    pub fn axis(self) -> Vec3<T> {
        Vec3::new(self.x, self.y, self.z)
    }

    /// The equivalent quaternion.
    ///
    /// The axis must be unit length.
    pub fn to_quat(self) -> Quat<T> {
        let half = self.angle * T::half();
        let sin = half.sin();
        Quat::new(self.x * sin, self.y * sin, self.z * sin, half.cos())
    }

    /// The equivalent 3x3 rotation matrix. The axis must be unit length.
    #[inline]
    pub fn to_mat3(self) -> Mat3<T> {
        Mat3::rotation(self.angle, self.axis())
    }

    /// The equivalent 4x4 rotation matrix. The axis must be unit length.
    #[inline]
    pub fn to_mat4(self) -> Mat4<T> {
        Mat4::rotation(self.angle, self.axis())
    }

    /// Normalizes the axis component, leaving the angle.
    pub fn normalize(self) -> Self {
        let inv = T::one() / self.axis().length();
        Self::new(self.angle, self.x * inv, self.y * inv, self.z * inv)
    }

    /// Adds `delta` to the angle, wrapping the result into `[0, 2pi)`.
    pub fn rotate(self, delta: T) -> Self {
        let two_pi = T::two_pi();
        let mut angle = (self.angle + delta) % two_pi;
        if angle < T::zero() {
            angle = angle + two_pi;
        }
        Self::new(angle, self.x, self.y, self.z)
    }

    /// Writes `angle, x, y, z` into `slice[0..4]` in field order.
    ///
    /// # Panics
    ///
    /// Panics if the slice holds fewer than 4 elements.
    #[inline]
    pub fn write_to_slice(self, slice: &mut [T]) {
        slice[0] = self.angle;
        slice[1] = self.x;
        slice[2] = self.y;
        slice[3] = self.z;
    }

    /// Reads an axis-angle from `slice[0..4]` as `angle, x, y, z`.
    ///
    /// # Panics
    ///
    /// Panics if the slice holds fewer than 4 elements.
    #[inline]
    pub fn from_slice(slice: &[T]) -> Self {
        Self::new(slice[0], slice[1], slice[2], slice[3])
    }
}

impl<T: FloatScalar> Default for AxisAngle<T> {
    /// Zero rotation about the z axis.
    #[inline]
    fn default() -> Self {
        Self::new(T::zero(), T::zero(), T::zero(), T::one())
    }
}

impl<T: FloatScalar> fmt::Display for AxisAngle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({} <{} {} {}>)", self.angle, self.x, self.y, self.z)
    }
}

impl<T: FloatScalar + AbsDiffEq<Epsilon = T>> AbsDiffEq for AxisAngle<T> {
    type Epsilon = T;

    #[inline]
    fn default_epsilon() -> T {
        T::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: T) -> bool {
        self.angle.abs_diff_eq(&other.angle, epsilon)
            && self.x.abs_diff_eq(&other.x, epsilon)
            && self.y.abs_diff_eq(&other.y, epsilon)
            && self.z.abs_diff_eq(&other.z, epsilon)
    }
}

impl<T: FloatScalar + RelativeEq<Epsilon = T>> RelativeEq for AxisAngle<T> {
    #[inline]
    fn default_max_relative() -> T {
        T::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: T, max_relative: T) -> bool {
        self.angle.relative_eq(&other.angle, epsilon, max_relative)
            && self.x.relative_eq(&other.x, epsilon, max_relative)
            && self.y.relative_eq(&other.y, epsilon, max_relative)
            && self.z.relative_eq(&other.z, epsilon, max_relative)
    }
}
