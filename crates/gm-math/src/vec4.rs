//! 4D vector type.
//!
//! [`Vec4`] is the homogeneous-coordinate companion of [`Vec3`](crate::Vec3):
//! positions with `w = 1`, directions with `w = 0`, and the row/column type
//! of [`Mat4`](crate::Mat4).

use std::fmt;
use std::ops::{Add, AddAssign, Div, DivAssign, Index, IndexMut, Mul, MulAssign, Neg, Sub, SubAssign};

use approx::{AbsDiffEq, RelativeEq};
use gm_core::{Buffer, FloatScalar, Result, Scalar};
use num_traits::{NumCast, Signed};

use crate::Vec3;

/// A 4D vector with components `x`, `y`, `z`, `w`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(C)]
pub struct Vec4<T: Scalar> {
    /// X component
    pub x: T,
    /// Y component
    pub y: T,
    /// Z component
    pub z: T,
    /// W component
    pub w: T,
}

/// Single-precision alias.
pub type Vec4f = Vec4<f32>;
/// Double-precision alias.
pub type Vec4d = Vec4<f64>;
/// 32-bit integer alias.
pub type Vec4i = Vec4<i32>;
/// 64-bit integer alias.
pub type Vec4l = Vec4<i64>;

impl<T: Scalar> Vec4<T> {
    /// Creates a new vector.
    #[inline]
    pub fn new(x: T, y: T, z: T, w: T) -> Self {
        Self { x, y, z, w }
    }

    /// The zero vector.
    #[inline]
    pub fn zero() -> Self {
        Self::splat(T::zero())
    }

    /// A vector with all components set to one.
    #[inline]
    pub fn one() -> Self {
        Self::splat(T::one())
    }

    /// Creates a vector with all components set to the same value.
    #[inline]
    pub fn splat(v: T) -> Self {
        Self::new(v, v, v, v)
    }

    /// Extends a 3D vector with the given `w`.
    #[inline]
    pub fn from_vec3(v: Vec3<T>, w: T) -> Self {
        Self::new(v.x, v.y, v.z, w)
    }

    /// Drops the `w` component.
    #[inline]
    pub fn truncate(self) -> Vec3<T> {
        Vec3::new(self.x, self.y, self.z)
    }

    /// Creates from an array in `[x, y, z, w]` order.
    #[inline]
    pub fn from_array(a: [T; 4]) -> Self {
        Self::new(a[0], a[1], a[2], a[3])
    }

    /// Converts to an array in `[x, y, z, w]` order.
    #[inline]
    pub fn to_array(self) -> [T; 4] {
        [self.x, self.y, self.z, self.w]
    }

    /// Dot product.
    #[inline]
    pub fn dot(self, other: Self) -> T {
        self.x * other.x + self.y * other.y + self.z * other.z + self.w * other.w
    }

    /// Squared length, defined for every scalar type.
    #[inline]
    pub fn length_squared(self) -> T {
        self.dot(self)
    }

    /// Squared distance to `other`.
    #[inline]
    pub fn distance_squared(self, other: Self) -> T {
        (other - self).length_squared()
    }

    /// Componentwise minimum.
    #[inline]
    pub fn min(self, other: Self) -> Self {
        Self::new(
            self.x.min_scalar(other.x),
            self.y.min_scalar(other.y),
            self.z.min_scalar(other.z),
            self.w.min_scalar(other.w),
        )
    }

    /// Componentwise maximum.
    #[inline]
    pub fn max(self, other: Self) -> Self {
        Self::new(
            self.x.max_scalar(other.x),
            self.y.max_scalar(other.y),
            self.z.max_scalar(other.z),
            self.w.max_scalar(other.w),
        )
    }

    /// Converts the components to another scalar type.
    ///
    /// Returns `None` if any component is not representable in `U`.
    #[inline]
    pub fn cast<U: Scalar>(self) -> Option<Vec4<U>> {
        Some(Vec4::new(
            <U as NumCast>::from(self.x)?,
            <U as NumCast>::from(self.y)?,
            <U as NumCast>::from(self.z)?,
            <U as NumCast>::from(self.w)?,
        ))
    }

    /// Writes the components into `slice[0..4]` in field order.
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

    /// Reads a vector from `slice[0..4]`.
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
        buf.put_slice(&self.to_array())
    }

    /// Writes the components at absolute `index`, cursor untouched.
    pub fn write_to_buffer_at(self, index: usize, buf: &mut Buffer<T>) -> Result<()> {
        buf.put_slice_at(index, &self.to_array())
    }

    /// Reads a vector at the buffer cursor, advancing it.
    pub fn read_from_buffer(buf: &mut Buffer<T>) -> Result<Self> {
        let mut a = [T::zero(); 4];
        buf.get_slice(&mut a)?;
        Ok(Self::from_array(a))
    }

    /// Reads a vector at absolute `index`, cursor untouched.
    pub fn read_from_buffer_at(index: usize, buf: &Buffer<T>) -> Result<Self> {
        let mut a = [T::zero(); 4];
        buf.get_slice_at(index, &mut a)?;
        Ok(Self::from_array(a))
    }
}

impl<T: Scalar + Signed> Vec4<T> {
    /// Componentwise absolute value.
    #[inline]
    pub fn abs(self) -> Self {
        Self::new(self.x.abs(), self.y.abs(), self.z.abs(), self.w.abs())
    }
}

impl<T: FloatScalar> Vec4<T> {
    /// Length (magnitude).
    #[inline]
    pub fn length(self) -> T {
        self.length_squared().sqrt()
    }

    /// Distance to `other`.
    #[inline]
    pub fn distance(self, other: Self) -> T {
        (other - self).length()
    }

    /// Normalizes to unit length.
    ///
    /// Divides by the length unconditionally: a zero-length input yields
    /// non-finite components rather than an error.
    #[inline]
    pub fn normalize(self) -> Self {
        self / self.length()
    }

    /// Normalizes to unit length, returning the zero vector when the length
    /// is zero.
    #[inline]
    pub fn normalize_or_zero(self) -> Self {
        let len = self.length();
        if len > T::zero() { self / len } else { Self::zero() }
    }

    /// Linear interpolation towards `other`.
    #[inline]
    pub fn lerp(self, other: Self, t: T) -> Self {
        self + (other - self) * t
    }

    /// Componentwise floor.
    #[inline]
    pub fn floor(self) -> Self {
        Self::new(self.x.floor(), self.y.floor(), self.z.floor(), self.w.floor())
    }

    /// Componentwise ceiling.
    #[inline]
    pub fn ceil(self) -> Self {
        Self::new(self.x.ceil(), self.y.ceil(), self.z.ceil(), self.w.ceil())
    }

    /// Componentwise rounding to the nearest integer value.
    #[inline]
    pub fn round(self) -> Self {
        Self::new(self.x.round(), self.y.round(), self.z.round(), self.w.round())
    }

    /// Returns true if all components are finite.
    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite() && self.w.is_finite()
    }

    /// Returns true if any component is NaN.
    #[inline]
    pub fn is_nan(self) -> bool {
        self.x.is_nan() || self.y.is_nan() || self.z.is_nan() || self.w.is_nan()
    }
}

impl Vec4f {
    /// Converts to glam.
    #[inline]
    pub fn to_glam(self) -> glam::Vec4 {
        glam::Vec4::new(self.x, self.y, self.z, self.w)
    }

    /// Creates from glam.
    #[inline]
    pub fn from_glam(v: glam::Vec4) -> Self {
        Self::new(v.x, v.y, v.z, v.w)
    }
}

impl<T: Scalar> Default for Vec4<T> {
    #[inline]
    fn default() -> Self {
        Self::zero()
    }
}

impl<T: Scalar> fmt::Display for Vec4<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({} {} {} {})", self.x, self.y, self.z, self.w)
    }
}

impl<T: Scalar> Index<usize> for Vec4<T> {
    type Output = T;

    #[inline]
    fn index(&self, i: usize) -> &T {
        match i {
            0 => &self.x,
            1 => &self.y,
            2 => &self.z,
            3 => &self.w,
            _ => panic!("Vec4 index out of bounds: {}", i),
        }
    }
}

impl<T: Scalar> IndexMut<usize> for Vec4<T> {
    #[inline]
    fn index_mut(&mut self, i: usize) -> &mut T {
        match i {
            0 => &mut self.x,
            1 => &mut self.y,
            2 => &mut self.z,
            3 => &mut self.w,
            _ => panic!("Vec4 index out of bounds: {}", i),
        }
    }
}

impl<T: Scalar> Add for Vec4<T> {
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

impl<T: Scalar> Sub for Vec4<T> {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(
            self.x - rhs.x,
            self.y - rhs.y,
            self.z - rhs.z,
            self.w - rhs.w,
        )
    }
}

// componentwise product
impl<T: Scalar> Mul for Vec4<T> {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        Self::new(
            self.x * rhs.x,
            self.y * rhs.y,
            self.z * rhs.z,
            self.w * rhs.w,
        )
    }
}

impl<T: Scalar> Mul<T> for Vec4<T> {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: T) -> Self {
        Self::new(self.x * rhs, self.y * rhs, self.z * rhs, self.w * rhs)
    }
}

impl Mul<Vec4<f32>> for f32 {
    type Output = Vec4<f32>;

    #[inline]
    fn mul(self, rhs: Vec4<f32>) -> Vec4<f32> {
        rhs * self
    }
}

impl Mul<Vec4<f64>> for f64 {
    type Output = Vec4<f64>;

    #[inline]
    fn mul(self, rhs: Vec4<f64>) -> Vec4<f64> {
        rhs * self
    }
}

// componentwise quotient
impl<T: Scalar> Div for Vec4<T> {
    type Output = Self;

    #[inline]
    fn div(self, rhs: Self) -> Self {
        Self::new(
            self.x / rhs.x,
            self.y / rhs.y,
            self.z / rhs.z,
            self.w / rhs.w,
        )
    }
}

impl<T: Scalar> Div<T> for Vec4<T> {
    type Output = Self;

    #[inline]
    fn div(self, rhs: T) -> Self {
        Self::new(self.x / rhs, self.y / rhs, self.z / rhs, self.w / rhs)
    }
}

impl<T: Scalar + Neg<Output = T>> Neg for Vec4<T> {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y, -self.z, -self.w)
    }
}

impl<T: Scalar> AddAssign for Vec4<T> {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl<T: Scalar> SubAssign for Vec4<T> {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl<T: Scalar> MulAssign for Vec4<T> {
    #[inline]
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

impl<T: Scalar> MulAssign<T> for Vec4<T> {
    #[inline]
    fn mul_assign(&mut self, rhs: T) {
        *self = *self * rhs;
    }
}

impl<T: Scalar> DivAssign for Vec4<T> {
    #[inline]
    fn div_assign(&mut self, rhs: Self) {
        *self = *self / rhs;
    }
}

impl<T: Scalar> DivAssign<T> for Vec4<T> {
    #[inline]
    fn div_assign(&mut self, rhs: T) {
        *self = *self / rhs;
    }
}

impl<T: Scalar> From<[T; 4]> for Vec4<T> {
    #[inline]
    fn from(a: [T; 4]) -> Self {
        Self::from_array(a)
    }
}

impl<T: Scalar> From<Vec4<T>> for [T; 4] {
    #[inline]
    fn from(v: Vec4<T>) -> [T; 4] {
        v.to_array()
    }
}

impl From<glam::Vec4> for Vec4f {
    #[inline]
    fn from(v: glam::Vec4) -> Self {
        Self::from_glam(v)
    }
}

impl From<Vec4f> for glam::Vec4 {
    #[inline]
    fn from(v: Vec4f) -> glam::Vec4 {
        v.to_glam()
    }
}

impl<T: Scalar + AbsDiffEq<Epsilon = T>> AbsDiffEq for Vec4<T> {
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

impl<T: Scalar + RelativeEq<Epsilon = T>> RelativeEq for Vec4<T> {
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
