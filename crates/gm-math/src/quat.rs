//! Quaternion rotation type.
//!
//! [`Quat`] stores a rotation as `x, y, z, w` with `w` the scalar part. Unit
//! length is expected for a valid rotation but never enforced; call
//! [`normalize`](Quat::normalize) after accumulating error.
//!
//! # Usage
//!
//! ```rust
//! use gm_math::{Quatf, Vec3f};
//!
//! let spin = Quatf::from_axis_angle(std::f32::consts::FRAC_PI_2, Vec3f::new(0.0, 1.0, 0.0));
//! let v = spin.transform(Vec3f::new(1.0, 0.0, 0.0));
//! assert!((v.z + 1.0).abs() < 1e-6);
//! ```

use std::fmt;
use std::ops::{Add, Mul};

use approx::{AbsDiffEq, RelativeEq};
use gm_core::{Buffer, FloatScalar, Result};

use crate::{Mat3, Mat4, Vec3};

/// A rotation quaternion (`w` is the scalar part).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(C)]
pub struct Quat<T: FloatScalar> {
    /// X component of the vector part
    pub x: T,
    /// Y component of the vector part
    pub y: T,
    /// Z component of the vector part
    pub z: T,
    /// Scalar part
    pub w: T,
}

/// Single-precision alias.
pub type Quatf = Quat<f32>;
/// Double-precision alias.
pub type Quatd = Quat<f64>;

impl<T: FloatScalar> Quat<T> {
    /// Creates a quaternion from raw components.
    #[inline]
    pub fn new(x: T, y: T, z: T, w: T) -> Self {
        Self { x, y, z, w }
    }

    /// The identity rotation `(0, 0, 0, 1)`.
    #[inline]
    pub fn identity() -> Self {
        Self::new(T::zero(), T::zero(), T::zero(), T::one())
    }

    /// A rotation of `angle` radians about `axis`.
    ///
    /// The axis is normalized internally; a zero axis propagates non-finite
    /// components.
    pub fn from_axis_angle(angle: T, axis: Vec3<T>) -> Self {
        let half = angle * T::half();
        let sin = half.sin();
        let n = axis.normalize();
        Self::new(n.x * sin, n.y * sin, n.z * sin, half.cos())
    }

    /// A rotation from Euler angles applied in X, then Y, then Z order.
    ///
    /// Not interchangeable with [`from_euler_zyx`](Self::from_euler_zyx) for
    /// mixed angles.
    pub fn from_euler_xyz(angle_x: T, angle_y: T, angle_z: T) -> Self {
        let sx = (angle_x * T::half()).sin();
        let cx = (angle_x * T::half()).cos();
        let sy = (angle_y * T::half()).sin();
        let cy = (angle_y * T::half()).cos();
        let sz = (angle_z * T::half()).sin();
        let cz = (angle_z * T::half()).cos();

        let cycz = cy * cz;
        let sysz = sy * sz;
        let sycz = sy * cz;
        let cysz = cy * sz;
        Self::new(
            sx * cycz + cx * sysz,
            cx * sycz - sx * cysz,
            cx * cysz + sx * sycz,
            cx * cycz - sx * sysz,
        )
    }

    /// A rotation from Euler angles applied in Z, then Y, then X order.
    pub fn from_euler_zyx(angle_z: T, angle_y: T, angle_x: T) -> Self {
        let sx = (angle_x * T::half()).sin();
        let cx = (angle_x * T::half()).cos();
        let sy = (angle_y * T::half()).sin();
        let cy = (angle_y * T::half()).cos();
        let sz = (angle_z * T::half()).sin();
        let cz = (angle_z * T::half()).cos();

        let cycz = cy * cz;
        let sysz = sy * sz;
        let sycz = sy * cz;
        let cysz = cy * sz;
        Self::new(
            sx * cycz - cx * sysz,
            cx * sycz + sx * cysz,
            cx * cysz - sx * sycz,
            cx * cycz + sx * sysz,
        )
    }

    /// The rotation taking `forward` to point along `dir`.
    ///
    /// Two degenerate cases are handled explicitly (within `1e-6`): when
    /// `dir` is aligned with `forward` the identity is returned, and when it
    /// is exactly opposite the result is a half turn about `up`.
    pub fn look_rotation(dir: Vec3<T>, up: Vec3<T>, forward: Vec3<T>) -> Self {
        let eps = T::from(1e-6).unwrap();
        let dirn = dir.normalize();
        let dot = forward.dot(dirn);

        if (dot + T::one()).abs() < eps {
            // opposite: half turn about up
            return Self::from_axis_angle(T::pi(), up);
        }
        if (dot - T::one()).abs() < eps {
            return Self::identity();
        }

        let angle = dot.acos();
        let axis = forward.cross(dirn).normalize();
        Self::from_axis_angle(angle, axis)
    }

    /// Dot product.
    #[inline]
    pub fn dot(self, other: Self) -> T {
        self.x * other.x + self.y * other.y + self.z * other.z + self.w * other.w
    }

    /// Squared norm `x² + y² + z² + w²`.
    #[inline]
    pub fn length_squared(self) -> T {
        self.dot(self)
    }

    /// Norm.
    #[inline]
    pub fn length(self) -> T {
        self.length_squared().sqrt()
    }

    /// Normalizes to unit length.
    ///
    /// A zero quaternion propagates non-finite components.
    pub fn normalize(self) -> Self {
        let inv = T::one() / self.length();
        Self::new(self.x * inv, self.y * inv, self.z * inv, self.w * inv)
    }

    /// Normalizes to unit length, returning the identity when the norm is
    /// zero.
    pub fn normalize_or_identity(self) -> Self {
        let len = self.length();
        if len > T::zero() {
            let inv = T::one() / len;
            Self::new(self.x * inv, self.y * inv, self.z * inv, self.w * inv)
        } else {
            Self::identity()
        }
    }

    /// The rotation angle in `[0, pi]`.
    ///
    /// `2·acos(w)`, reflected back when the raw value exceeds pi so that a
    /// rotation and its negated representation report the same angle.
    pub fn angle(self) -> T {
        let angle = T::two() * self.w.acos();
        if angle <= T::pi() {
            angle
        } else {
            T::two_pi() - angle
        }
    }

    /// The conjugate `(-x, -y, -z, w)`.
    #[inline]
    pub fn conjugate(self) -> Self {
        Self::new(-self.x, -self.y, -self.z, self.w)
    }

    /// The multiplicative inverse: conjugate over squared norm.
    ///
    /// A zero quaternion propagates non-finite components. For unit
    /// quaternions this equals [`conjugate`](Self::conjugate).
    pub fn invert(self) -> Self {
        let inv_norm = T::one() / self.length_squared();
        Self::new(
            -self.x * inv_norm,
            -self.y * inv_norm,
            -self.z * inv_norm,
            self.w * inv_norm,
        )
    }

    /// Hamilton product `self * other`: `other` rotates first.
    pub fn mul_quat(self, b: Self) -> Self {
        let a = self;
        Self::new(
            a.w * b.x + a.x * b.w + a.y * b.z - a.z * b.y,
            a.w * b.y - a.x * b.z + a.y * b.w + a.z * b.x,
            a.w * b.z + a.x * b.y - a.y * b.x + a.z * b.w,
            a.w * b.w - a.x * b.x - a.y * b.y - a.z * b.z,
        )
    }

    /// Spherical linear interpolation towards `target`.
    ///
    /// When the arc is small (`1 - |dot| <= 0.1`) the `sin(angle)` division
    /// becomes unstable and plain linear interpolation is used instead. The
    /// second weight flips sign when `dot < 0` so the shorter arc is taken.
    pub fn slerp(self, target: Self, t: T) -> Self {
        let threshold = T::from(0.1).unwrap();
        let dot = self.dot(target);
        let abs_dot = dot.abs();
        let scale1;
        let mut scale2;
        if T::one() - abs_dot > threshold {
            let angle = abs_dot.acos();
            let inv_sin = T::one() / angle.sin();
            scale1 = ((T::one() - t) * angle).sin() * inv_sin;
            scale2 = (t * angle).sin() * inv_sin;
        } else {
            scale1 = T::one() - t;
            scale2 = t;
        }
        if dot < T::zero() {
            scale2 = -scale2;
        }
        Self::new(
            scale1 * self.x + scale2 * target.x,
            scale1 * self.y + scale2 * target.y,
            scale1 * self.z + scale2 * target.z,
            scale1 * self.w + scale2 * target.w,
        )
    }

    /// The equivalent 3x3 rotation matrix (direct closed form).
    pub fn to_mat3(self) -> Mat3<T> {
        let two = T::two();
        let q00 = two * self.x * self.x;
        let q11 = two * self.y * self.y;
        let q22 = two * self.z * self.z;
        let q01 = two * self.x * self.y;
        let q02 = two * self.x * self.z;
        let q03 = two * self.x * self.w;
        let q12 = two * self.y * self.z;
        let q13 = two * self.y * self.w;
        let q23 = two * self.z * self.w;
        let o = T::one();
        Mat3::from_cols([
            [o - q11 - q22, q01 + q23, q02 - q13],
            [q01 - q23, o - q22 - q00, q12 + q03],
            [q02 + q13, q12 - q03, o - q11 - q00],
        ])
    }

    /// The equivalent 4x4 rotation matrix.
    pub fn to_mat4(self) -> Mat4<T> {
        let r3 = self.to_mat3();
        let mut r = Mat4::identity();
        for c in 0..3 {
            for i in 0..3 {
                r.m[c][i] = r3.m[c][i];
            }
        }
        r
    }

    /// Rotates a vector by this quaternion.
    ///
    /// Expects a unit quaternion.
    pub fn transform(self, v: Vec3<T>) -> Vec3<T> {
        let q = Vec3::new(self.x, self.y, self.z);
        let t = q.cross(v) * T::two();
        v + t * self.w + q.cross(t)
    }

    /// Writes `x, y, z, w` into `slice[0..4]`.
    ///
    /// # Panics
    ///
    /// Panics if the slice holds fewer than 4 elements.
    #[inline]
    pub fn write_to_slice(self, slice: &mut [T]) {
        slice[0] = self.x;
        slice[1] = self.y;
        slice[2] = self.z;
        slice[3] = self.w;
    }

    /// Reads a quaternion from `slice[0..4]` as `x, y, z, w`.
    ///
    /// # Panics
    ///
    /// Panics if the slice holds fewer than 4 elements.
    #[inline]
    pub fn from_slice(slice: &[T]) -> Self {
        Self::new(slice[0], slice[1], slice[2], slice[3])
    }

    /// Writes the components at the buffer cursor, advancing it.
    pub fn write_to_buffer(self, buf: &mut Buffer<T>) -> Result<()> {
        buf.put_slice(&[self.x, self.y, self.z, self.w])
    }

    /// Writes the components at absolute `index`, cursor untouched.
    pub fn write_to_buffer_at(self, index: usize, buf: &mut Buffer<T>) -> Result<()> {
        buf.put_slice_at(index, &[self.x, self.y, self.z, self.w])
    }

    /// Reads a quaternion at the buffer cursor, advancing it.
    pub fn read_from_buffer(buf: &mut Buffer<T>) -> Result<Self> {
        let mut a = [T::zero(); 4];
        buf.get_slice(&mut a)?;
        Ok(Self::new(a[0], a[1], a[2], a[3]))
    }

    /// Reads a quaternion at absolute `index`, cursor untouched.
    pub fn read_from_buffer_at(index: usize, buf: &Buffer<T>) -> Result<Self> {
        let mut a = [T::zero(); 4];
        buf.get_slice_at(index, &mut a)?;
        Ok(Self::new(a[0], a[1], a[2], a[3]))
    }
}

impl Quatf {
    /// Converts to glam.
    #[inline]
    pub fn to_glam(self) -> glam::Quat {
        glam::Quat::from_xyzw(self.x, self.y, self.z, self.w)
    }

    /// Creates from glam.
    #[inline]
    pub fn from_glam(q: glam::Quat) -> Self {
        Self::new(q.x, q.y, q.z, q.w)
    }
}

impl<T: FloatScalar> Default for Quat<T> {
    #[inline]
    fn default() -> Self {
        Self::identity()
    }
}

impl<T: FloatScalar> Mul for Quat<T> {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        self.mul_quat(rhs)
    }
}

impl<T: FloatScalar> Add for Quat<T> {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(
            self.x + rhs.x,
            self.y + rhs.y,
            self.z + rhs.z,
            self.w + rhs.w,
        )
    }
}

impl<T: FloatScalar> fmt::Display for Quat<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({} {} {} {})", self.x, self.y, self.z, self.w)
    }
}

impl<T: FloatScalar + AbsDiffEq<Epsilon = T>> AbsDiffEq for Quat<T> {
    type Epsilon = T;

    #[inline]
    fn default_epsilon() -> T {
        T::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: T) -> bool {
        self.x.abs_diff_eq(&other.x, epsilon)
            && self.y.abs_diff_eq(&other.y, epsilon)
            && self.z.abs_diff_eq(&other.z, epsilon)
            && self.w.abs_diff_eq(&other.w, epsilon)
    }
}

impl<T: FloatScalar + RelativeEq<Epsilon = T>> RelativeEq for Quat<T> {
    #[inline]
    fn default_max_relative() -> T {
        T::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: T, max_relative: T) -> bool {
        self.x.relative_eq(&other.x, epsilon, max_relative)
            && self.y.relative_eq(&other.y, epsilon, max_relative)
            && self.z.relative_eq(&other.z, epsilon, max_relative)
            && self.w.relative_eq(&other.w, epsilon, max_relative)
    }
}
