//! 2D vector type.
//!
//! [`Vec2`] covers texture coordinates, screen positions and the planar
//! polygon predicates. Same contract as [`Vec3`](crate::Vec3) minus the
//! cross product (the 2D "perp dot" is exposed instead).

use std::fmt;
use std::ops::{Add, AddAssign, Div, DivAssign, Index, IndexMut, Mul, MulAssign, Neg, Sub, SubAssign};

use approx::{AbsDiffEq, RelativeEq};
use gm_core::{Buffer, FloatScalar, Result, Scalar};
use num_traits::{NumCast, Signed};

/// A 2D vector with components `x`, `y`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(C)]
pub struct Vec2<T: Scalar> {
    /// X component
    pub x: T,
    /// Y component
    pub y: T,
}

/// Single-precision alias.
pub type Vec2f = Vec2<f32>;
/// Double-precision alias.
pub type Vec2d = Vec2<f64>;
/// 32-bit integer alias.
pub type Vec2i = Vec2<i32>;
/// 64-bit integer alias.
pub type Vec2l = Vec2<i64>;

impl<T: Scalar> Vec2<T> {
    /// Creates a new vector.
    #[inline]
    pub fn new(x: T, y: T) -> Self {
        Self { x, y }
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

    /// Creates a vector with both components set to the same value.
    #[inline]
    pub fn splat(v: T) -> Self {
        Self::new(v, v)
    }

    /// Creates from an array in `[x, y]` order.
    #[inline]
    pub fn from_array(a: [T; 2]) -> Self {
        Self::new(a[0], a[1])
    }

    /// Converts to an array in `[x, y]` order.
    #[inline]
    pub fn to_array(self) -> [T; 2] {
        [self.x, self.y]
    }

    /// Dot product.
    #[inline]
    pub fn dot(self, other: Self) -> T {
        self.x * other.x + self.y * other.y
    }

    /// Perp-dot product: the z component of the 3D cross product of the two
    /// vectors extended with z = 0.
    #[inline]
    pub fn perp_dot(self, other: Self) -> T {
        self.x * other.y - self.y * other.x
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
        Self::new(self.x.min_scalar(other.x), self.y.min_scalar(other.y))
    }

    /// Componentwise maximum.
    #[inline]
    pub fn max(self, other: Self) -> Self {
        Self::new(self.x.max_scalar(other.x), self.y.max_scalar(other.y))
    }

    /// Converts the components to another scalar type.
    ///
    /// Returns `None` if any component is not representable in `U`.
    #[inline]
    pub fn cast<U: Scalar>(self) -> Option<Vec2<U>> {
        Some(Vec2::new(
            <U as NumCast>::from(self.x)?,
            <U as NumCast>::from(self.y)?,
        ))
    }

    /// Writes the components into `slice[0..2]` in field order.
    ///
    /// # Panics
    ///
    /// Panics if the slice holds fewer than 2 elements.
    #[inline]
    pub fn write_to_slice(self, slice: &mut [T]) {
        slice[0] = self.x;
        slice[1] = self.y;
    }

    /// Reads a vector from `slice[0..2]`.
    ///
    /// # Panics
    ///
    /// Panics if the slice holds fewer than 2 elements.
    #[inline]
    pub fn from_slice(slice: &[T]) -> Self {
        Self::new(slice[0], slice[1])
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
        let mut a = [T::zero(); 2];
        buf.get_slice(&mut a)?;
        Ok(Self::from_array(a))
    }

    /// Reads a vector at absolute `index`, cursor untouched.
    pub fn read_from_buffer_at(index: usize, buf: &Buffer<T>) -> Result<Self> {
        let mut a = [T::zero(); 2];
        buf.get_slice_at(index, &mut a)?;
        Ok(Self::from_array(a))
    }
}

impl<T: Scalar + Signed> Vec2<T> {
    /// Componentwise absolute value.
    #[inline]
    pub fn abs(self) -> Self {
        Self::new(self.x.abs(), self.y.abs())
    }
}

impl<T: FloatScalar> Vec2<T> {
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
        Self::new(self.x.floor(), self.y.floor())
    }

    /// Componentwise ceiling.
    #[inline]
    pub fn ceil(self) -> Self {
        Self::new(self.x.ceil(), self.y.ceil())
    }

    /// Componentwise rounding to the nearest integer value.
    #[inline]
    pub fn round(self) -> Self {
        Self::new(self.x.round(), self.y.round())
    }

    /// Returns true if all components are finite.
    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Returns true if any component is NaN.
    #[inline]
    pub fn is_nan(self) -> bool {
        self.x.is_nan() || self.y.is_nan()
    }
}

impl Vec2f {
    /// Converts to glam.
    #[inline]
    pub fn to_glam(self) -> glam::Vec2 {
        glam::Vec2::new(self.x, self.y)
    }

    /// Creates from glam.
    #[inline]
    pub fn from_glam(v: glam::Vec2) -> Self {
        Self::new(v.x, v.y)
    }
}

impl<T: Scalar> Default for Vec2<T> {
    #[inline]
    fn default() -> Self {
        Self::zero()
    }
}

impl<T: Scalar> fmt::Display for Vec2<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({} {})", self.x, self.y)
    }
}

impl<T: Scalar> Index<usize> for Vec2<T> {
    type Output = T;

    #[inline]
    fn index(&self, i: usize) -> &T {
        match i {
            0 => &self.x,
            1 => &self.y,
            _ => panic!("Vec2 index out of bounds: {}", i),
        }
    }
}

impl<T: Scalar> IndexMut<usize> for Vec2<T> {
    #[inline]
    fn index_mut(&mut self, i: usize) -> &mut T {
        match i {
            0 => &mut self.x,
            1 => &mut self.y,
            _ => panic!("Vec2 index out of bounds: {}", i),
        }
    }
}

impl<T: Scalar> Add for Vec2<T> {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl<T: Scalar> Sub for Vec2<T> {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

// componentwise product
impl<T: Scalar> Mul for Vec2<T> {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        Self::new(self.x * rhs.x, self.y * rhs.y)
    }
}

impl<T: Scalar> Mul<T> for Vec2<T> {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: T) -> Self {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

impl Mul<Vec2<f32>> for f32 {
    type Output = Vec2<f32>;

    #[inline]
    fn mul(self, rhs: Vec2<f32>) -> Vec2<f32> {
        rhs * self
    }
}

impl Mul<Vec2<f64>> for f64 {
    type Output = Vec2<f64>;

    #[inline]
    fn mul(self, rhs: Vec2<f64>) -> Vec2<f64> {
        rhs * self
    }
}

// componentwise quotient
impl<T: Scalar> Div for Vec2<T> {
    type Output = Self;

    #[inline]
    fn div(self, rhs: Self) -> Self {
        Self::new(self.x / rhs.x, self.y / rhs.y)
    }
}

impl<T: Scalar> Div<T> for Vec2<T> {
    type Output = Self;

    #[inline]
    fn div(self, rhs: T) -> Self {
        Self::new(self.x / rhs, self.y / rhs)
    }
}

impl<T: Scalar + Neg<Output = T>> Neg for Vec2<T> {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y)
    }
}

impl<T: Scalar> AddAssign for Vec2<T> {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl<T: Scalar> SubAssign for Vec2<T> {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl<T: Scalar> MulAssign for Vec2<T> {
    #[inline]
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

impl<T: Scalar> MulAssign<T> for Vec2<T> {
    #[inline]
    fn mul_assign(&mut self, rhs: T) {
        *self = *self * rhs;
    }
}

impl<T: Scalar> DivAssign for Vec2<T> {
    #[inline]
    fn div_assign(&mut self, rhs: Self) {
        *self = *self / rhs;
    }
}

impl<T: Scalar> DivAssign<T> for Vec2<T> {
    #[inline]
    fn div_assign(&mut self, rhs: T) {
        *self = *self / rhs;
    }
}

impl<T: Scalar> From<[T; 2]> for Vec2<T> {
    #[inline]
    fn from(a: [T; 2]) -> Self {
        Self::from_array(a)
    }
}

impl<T: Scalar> From<Vec2<T>> for [T; 2] {
    #[inline]
    fn from(v: Vec2<T>) -> [T; 2] {
        v.to_array()
    }
}

impl From<glam::Vec2> for Vec2f {
    #[inline]
    fn from(v: glam::Vec2) -> Self {
        Self::from_glam(v)
    }
}

impl From<Vec2f> for glam::Vec2 {
    #[inline]
    fn from(v: Vec2f) -> glam::Vec2 {
        v.to_glam()
    }
}

impl<T: Scalar + AbsDiffEq<Epsilon = T>> AbsDiffEq for Vec2<T> {
    type Epsilon = T;

    #[inline]
    fn default_epsilon() -> T {
        T::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: T) -> bool {
        self.x.abs_diff_eq(&other.x, epsilon) && self.y.abs_diff_eq(&other.y, epsilon)
    }
}

impl<T: Scalar + RelativeEq<Epsilon = T>> RelativeEq for Vec2<T> {
    #[inline]
    fn default_max_relative() -> T {
        T::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: T, max_relative: T) -> bool {
        self.x.relative_eq(&other.x, epsilon, max_relative)
            && self.y.relative_eq(&other.y, epsilon, max_relative)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_vec2_ops() {
        let a = Vec2f::new(1.0, 2.0);
        let b = Vec2f::new(3.0, 5.0);
        assert_eq!(a + b, Vec2f::new(4.0, 7.0));
        assert_eq!(b - a, Vec2f::new(2.0, 3.0));
        assert_eq!(a * 3.0, Vec2f::new(3.0, 6.0));
        assert_eq!(a.dot(b), 13.0);
    }

    #[test]
    fn test_vec2_perp_dot() {
        let x = Vec2f::new(1.0, 0.0);
        let y = Vec2f::new(0.0, 1.0);
        assert_eq!(x.perp_dot(y), 1.0);
        assert_eq!(y.perp_dot(x), -1.0);
    }

    #[test]
    fn test_vec2_normalize() {
        let v = Vec2d::new(3.0, 4.0);
        assert_relative_eq!(v.length(), 5.0);
        assert_relative_eq!(v.normalize().length(), 1.0, epsilon = 1e-12);
        assert_eq!(Vec2d::zero().normalize_or_zero(), Vec2d::zero());
    }

    #[test]
    fn test_vec2_int() {
        let v = Vec2i::new(-2, 7);
        assert_eq!(v.abs(), Vec2i::new(2, 7));
        assert_eq!(v.length_squared(), 53);
    }

    #[test]
    fn test_vec2_buffer_round_trip() {
        let mut buf: Buffer<f64> = Buffer::with_capacity(2);
        let v = Vec2d::new(1.0, -1.0);
        v.write_to_buffer(&mut buf).unwrap();
        buf.rewind();
        assert_eq!(Vec2d::read_from_buffer(&mut buf).unwrap(), v);
    }

    #[test]
    fn test_vec2_display() {
        assert_eq!(Vec2i::new(4, 5).to_string(), "(4 5)");
    }
}
