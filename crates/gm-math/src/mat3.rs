//! 3x3 matrix type.
//!
//! [`Mat3`] covers pure rotations and scales and the linear part of affine
//! transforms.
//!
//! # Convention
//!
//! Storage is **column-major**: `m[col][row]`, matching what graphics APIs
//! expect from a flat upload. With column vectors the transform reads
//! `result = matrix * vector`.
//!
//! # Usage
//!
//! ```rust
//! use gm_math::{Mat3f, Vec3f};
//!
//! let rot = Mat3f::rotation_z(std::f32::consts::FRAC_PI_2);
//! let v = rot * Vec3f::new(1.0, 0.0, 0.0);
//! assert!((v.y - 1.0).abs() < 1e-6);
//! ```

use std::fmt;
use std::ops::{Index, Mul};

use approx::{AbsDiffEq, RelativeEq};
use gm_core::{Buffer, FloatScalar, Result};

use crate::{Quat, Vec3};

/// A 3x3 matrix in column-major storage.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(C)]
pub struct Mat3<T: FloatScalar> {
    /// Matrix elements as `m[col][row]`.
    pub m: [[T; 3]; 3],
}

/// Single-precision alias.
pub type Mat3f = Mat3<f32>;
/// Double-precision alias.
pub type Mat3d = Mat3<f64>;

impl<T: FloatScalar> Mat3<T> {
    /// The identity matrix.
    #[inline]
    pub fn identity() -> Self {
        let o = T::one();
        let z = T::zero();
        Self::from_cols([[o, z, z], [z, o, z], [z, z, o]])
    }

    /// The zero matrix.
    #[inline]
    pub fn zero() -> Self {
        Self::from_cols([[T::zero(); 3]; 3])
    }

    /// Creates a matrix from column arrays.
    #[inline]
    pub fn from_cols(cols: [[T; 3]; 3]) -> Self {
        Self { m: cols }
    }

    /// Creates a matrix from [`Vec3`] columns.
    #[inline]
    pub fn from_col_vecs(c0: Vec3<T>, c1: Vec3<T>, c2: Vec3<T>) -> Self {
        Self::from_cols([c0.to_array(), c1.to_array(), c2.to_array()])
    }

    /// Creates a matrix from a column-major flat array.
    #[inline]
    pub fn from_array(a: [T; 9]) -> Self {
        Self::from_cols([
            [a[0], a[1], a[2]],
            [a[3], a[4], a[5]],
            [a[6], a[7], a[8]],
        ])
    }

    /// Converts to a column-major flat array.
    #[inline]
    pub fn to_array(self) -> [T; 9] {
        let m = &self.m;
        [
            m[0][0], m[0][1], m[0][2],
            m[1][0], m[1][1], m[1][2],
            m[2][0], m[2][1], m[2][2],
        ]
    }

    /// Returns column `i` as a vector.
    #[inline]
    pub fn col(&self, i: usize) -> Vec3<T> {
        Vec3::from_array(self.m[i])
    }

    /// Returns row `i` as a vector.
    #[inline]
    pub fn row(&self, i: usize) -> Vec3<T> {
        Vec3::new(self.m[0][i], self.m[1][i], self.m[2][i])
    }

    /// A diagonal scaling matrix.
    #[inline]
    pub fn scaling(x: T, y: T, z: T) -> Self {
        let zr = T::zero();
        Self::from_cols([[x, zr, zr], [zr, y, zr], [zr, zr, z]])
    }

    /// A rotation of `angle` radians about the given axis (Rodrigues form).
    ///
    /// The axis must be unit length.
    pub fn rotation(angle: T, axis: Vec3<T>) -> Self {
        let sin = angle.sin();
        let cos = angle.cos();
        let c = T::one() - cos;
        let (x, y, z) = (axis.x, axis.y, axis.z);
        let xy = x * y;
        let xz = x * z;
        let yz = y * z;
        Self::from_cols([
            [cos + x * x * c, xy * c + z * sin, xz * c - y * sin],
            [xy * c - z * sin, cos + y * y * c, yz * c + x * sin],
            [xz * c + y * sin, yz * c - x * sin, cos + z * z * c],
        ])
    }

    /// A rotation of `angle` radians about the x axis.
    pub fn rotation_x(angle: T) -> Self {
        let sin = angle.sin();
        let cos = angle.cos();
        let mut r = Self::identity();
        r.m[1][1] = cos;
        r.m[1][2] = sin;
        r.m[2][1] = -sin;
        r.m[2][2] = cos;
        r
    }

    /// A rotation of `angle` radians about the y axis.
    pub fn rotation_y(angle: T) -> Self {
        let sin = angle.sin();
        let cos = angle.cos();
        let mut r = Self::identity();
        r.m[0][0] = cos;
        r.m[0][2] = -sin;
        r.m[2][0] = sin;
        r.m[2][2] = cos;
        r
    }

    /// A rotation of `angle` radians about the z axis.
    pub fn rotation_z(angle: T) -> Self {
        let sin = angle.sin();
        let cos = angle.cos();
        let mut r = Self::identity();
        r.m[0][0] = cos;
        r.m[0][1] = sin;
        r.m[1][0] = -sin;
        r.m[1][1] = cos;
        r
    }

    /// The rotation matrix of a quaternion.
    #[inline]
    pub fn from_quat(q: Quat<T>) -> Self {
        q.to_mat3()
    }

    /// Returns the transpose.
    #[inline]
    pub fn transpose(&self) -> Self {
        let m = &self.m;
        Self::from_cols([
            [m[0][0], m[1][0], m[2][0]],
            [m[0][1], m[1][1], m[2][1]],
            [m[0][2], m[1][2], m[2][2]],
        ])
    }

    /// Computes the determinant by cofactor expansion.
    #[inline]
    pub fn determinant(&self) -> T {
        let m = &self.m;
        m[0][0] * (m[1][1] * m[2][2] - m[1][2] * m[2][1])
            - m[0][1] * (m[1][0] * m[2][2] - m[1][2] * m[2][0])
            + m[0][2] * (m[1][0] * m[2][1] - m[1][1] * m[2][0])
    }

    /// Computes the inverse.
    ///
    /// Returns `None` when the determinant is zero.
    pub fn invert(&self) -> Option<Self> {
        let det = self.determinant();
        if det == T::zero() {
            return None;
        }
        let s = T::one() / det;
        let m = &self.m;
        let (m00, m01, m02) = (m[0][0], m[0][1], m[0][2]);
        let (m10, m11, m12) = (m[1][0], m[1][1], m[1][2]);
        let (m20, m21, m22) = (m[2][0], m[2][1], m[2][2]);
        Some(Self::from_cols([
            [
                (m11 * m22 - m21 * m12) * s,
                (m21 * m02 - m01 * m22) * s,
                (m01 * m12 - m11 * m02) * s,
            ],
            [
                (m20 * m12 - m10 * m22) * s,
                (m00 * m22 - m20 * m02) * s,
                (m10 * m02 - m00 * m12) * s,
            ],
            [
                (m10 * m21 - m20 * m11) * s,
                (m20 * m01 - m00 * m21) * s,
                (m00 * m11 - m10 * m01) * s,
            ],
        ]))
    }

    /// Transforms a vector: `matrix * v`.
    #[inline]
    pub fn transform(&self, v: Vec3<T>) -> Vec3<T> {
        let m = &self.m;
        Vec3::new(
            m[0][0] * v.x + m[1][0] * v.y + m[2][0] * v.z,
            m[0][1] * v.x + m[1][1] * v.y + m[2][1] * v.z,
            m[0][2] * v.x + m[1][2] * v.y + m[2][2] * v.z,
        )
    }

    /// Multiplies two matrices: `self * other`.
    pub fn mul_mat(&self, other: &Self) -> Self {
        let mut result = Self::zero();
        for j in 0..3 {
            for i in 0..3 {
                result.m[j][i] = self.m[0][i] * other.m[j][0]
                    + self.m[1][i] * other.m[j][1]
                    + self.m[2][i] * other.m[j][2];
            }
        }
        result
    }

    /// Returns true if all elements are finite.
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.m.iter().flatten().all(|x| x.is_finite())
    }

    /// Writes the elements into `slice[0..9]` in column-major order.
    ///
    /// # Panics
    ///
    /// Panics if the slice holds fewer than 9 elements.
    #[inline]
    pub fn write_to_slice(self, slice: &mut [T]) {
        slice[..9].copy_from_slice(&self.to_array());
    }

    /// Reads a matrix from `slice[0..9]` in column-major order.
    ///
    /// # Panics
    ///
    /// Panics if the slice holds fewer than 9 elements.
    #[inline]
    pub fn from_slice(slice: &[T]) -> Self {
        let mut a = [T::zero(); 9];
        a.copy_from_slice(&slice[..9]);
        Self::from_array(a)
    }

    /// Writes the elements at the buffer cursor in column-major order.
    pub fn write_to_buffer(self, buf: &mut Buffer<T>) -> Result<()> {
        buf.put_slice(&self.to_array())
    }

    /// Writes the elements at absolute `index`, cursor untouched.
    pub fn write_to_buffer_at(self, index: usize, buf: &mut Buffer<T>) -> Result<()> {
        buf.put_slice_at(index, &self.to_array())
    }

    /// Reads a matrix at the buffer cursor.
    pub fn read_from_buffer(buf: &mut Buffer<T>) -> Result<Self> {
        let mut a = [T::zero(); 9];
        buf.get_slice(&mut a)?;
        Ok(Self::from_array(a))
    }

    /// Reads a matrix at absolute `index`, cursor untouched.
    pub fn read_from_buffer_at(index: usize, buf: &Buffer<T>) -> Result<Self> {
        let mut a = [T::zero(); 9];
        buf.get_slice_at(index, &mut a)?;
        Ok(Self::from_array(a))
    }
}

impl Mat3f {
    /// Converts to glam (also column-major).
    #[inline]
    pub fn to_glam(self) -> glam::Mat3 {
        glam::Mat3::from_cols_array(&self.to_array())
    }

    /// Creates from glam.
    #[inline]
    pub fn from_glam(m: glam::Mat3) -> Self {
        Self::from_array(m.to_cols_array())
    }
}

impl<T: FloatScalar> Default for Mat3<T> {
    #[inline]
    fn default() -> Self {
        Self::identity()
    }
}

impl<T: FloatScalar> Mul<Vec3<T>> for Mat3<T> {
    type Output = Vec3<T>;

    #[inline]
    fn mul(self, rhs: Vec3<T>) -> Vec3<T> {
        self.transform(rhs)
    }
}

impl<T: FloatScalar> Mul for Mat3<T> {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        self.mul_mat(&rhs)
    }
}

impl<T: FloatScalar> Mul<T> for Mat3<T> {
    type Output = Self;

    fn mul(self, rhs: T) -> Self {
        let mut r = self;
        for col in r.m.iter_mut() {
            for e in col.iter_mut() {
                *e *= rhs;
            }
        }
        r
    }
}

// Indexes columns; `m[col][row]` via chained indexing.
impl<T: FloatScalar> Index<usize> for Mat3<T> {
    type Output = [T; 3];

    #[inline]
    fn index(&self, i: usize) -> &[T; 3] {
        &self.m[i]
    }
}

impl<T: FloatScalar> fmt::Display for Mat3<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for r in 0..3 {
            writeln!(f, "({} {} {})", self.m[0][r], self.m[1][r], self.m[2][r])?;
        }
        Ok(())
    }
}

impl<T: FloatScalar + AbsDiffEq<Epsilon = T>> AbsDiffEq for Mat3<T> {
    type Epsilon = T;

    #[inline]
    fn default_epsilon() -> T {
        T::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: T) -> bool {
        self.m
            .iter()
            .flatten()
            .zip(other.m.iter().flatten())
            .all(|(a, b)| a.abs_diff_eq(b, epsilon))
    }
}

impl<T: FloatScalar + RelativeEq<Epsilon = T>> RelativeEq for Mat3<T> {
    #[inline]
    fn default_max_relative() -> T {
        T::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: T, max_relative: T) -> bool {
        self.m
            .iter()
            .flatten()
            .zip(other.m.iter().flatten())
            .all(|(a, b)| a.relative_eq(b, epsilon, max_relative))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Vec3f;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_mat3_identity_transform() {
        let v = Vec3f::new(1.0, 2.0, 3.0);
        assert_eq!(Mat3f::identity() * v, v);
    }

    #[test]
    fn test_mat3_scaling() {
        let m = Mat3f::scaling(2.0, 3.0, 4.0);
        assert_eq!(m * Vec3f::one(), Vec3f::new(2.0, 3.0, 4.0));
        assert_eq!(m.determinant(), 24.0);
    }

    #[test]
    fn test_mat3_transpose_involutive() {
        let m = Mat3f::from_array([1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0]);
        assert_eq!(m.transpose().transpose(), m);
        assert_eq!(m.transpose().m[1][0], m.m[0][1]);
    }

    #[test]
    fn test_mat3_invert_round_trip() {
        let m = Mat3d::rotation(0.7, Vec3::new(0.0, 1.0, 0.0).normalize())
            .mul_mat(&Mat3d::scaling(2.0, 2.0, 2.0));
        let inv = m.invert().unwrap();
        assert_abs_diff_eq!(m * inv, Mat3d::identity(), epsilon = 1e-12);
        assert_abs_diff_eq!(inv.invert().unwrap(), m, epsilon = 1e-12);
    }

    #[test]
    fn test_mat3_singular_invert_none() {
        let m = Mat3f::from_cols([
            [1.0, 2.0, 3.0],
            [2.0, 4.0, 6.0],
            [0.5, 1.0, 1.5],
        ]);
        assert!(m.invert().is_none());
    }

    #[test]
    fn test_mat3_rotation_axis_matches_single_axis() {
        let a = Mat3d::rotation(0.4, Vec3::new(0.0, 0.0, 1.0));
        let b = Mat3d::rotation_z(0.4);
        assert_abs_diff_eq!(a, b, epsilon = 1e-12);
    }

    #[test]
    fn test_mat3_rotation_z_quarter_turn() {
        let m = Mat3f::rotation_z(std::f32::consts::FRAC_PI_2);
        let v = m * Vec3f::new(1.0, 0.0, 0.0);
        assert_abs_diff_eq!(v, Vec3f::new(0.0, 1.0, 0.0), epsilon = 1e-6);
    }

    #[test]
    fn test_mat3_slice_round_trip() {
        let m = Mat3f::rotation_x(0.3);
        let mut a = [0.0f32; 9];
        m.write_to_slice(&mut a);
        assert_eq!(Mat3f::from_slice(&a), m);
    }

    #[test]
    fn test_mat3_buffer_round_trip() {
        let m = Mat3d::rotation_y(1.2);
        let mut buf: Buffer<f64> = Buffer::with_capacity(9);
        m.write_to_buffer(&mut buf).unwrap();
        assert_eq!(Mat3d::read_from_buffer_at(0, &buf).unwrap(), m);
    }

    #[test]
    fn test_mat3_glam_round_trip() {
        let m = Mat3f::rotation(0.9, Vec3f::new(1.0, 0.0, 0.0));
        assert_abs_diff_eq!(Mat3f::from_glam(m.to_glam()), m, epsilon = 1e-6);
    }
}
