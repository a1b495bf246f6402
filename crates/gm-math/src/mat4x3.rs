//! 4x3 affine matrix type.
//!
//! [`Mat4x3`] stores an affine transform as four columns of three rows: the
//! 3x3 linear block plus a translation column, with the projective row
//! `(0 0 0 1)` implied. It composes and inverts cheaper than [`Mat4`](crate::Mat4)
//! when no projection is involved.

use std::fmt;
use std::ops::{Index, Mul};

use approx::{AbsDiffEq, RelativeEq};
use gm_core::{Buffer, FloatScalar, Result};

use crate::{Mat3, Mat4, Quat, Vec3};

/// An affine 4x3 matrix in column-major storage (implied last row `0 0 0 1`).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(C)]
pub struct Mat4x3<T: FloatScalar> {
    /// Matrix elements as `m[col][row]`, four columns of three rows.
    pub m: [[T; 3]; 4],
}

/// Single-precision alias.
pub type Mat4x3f = Mat4x3<f32>;
/// Double-precision alias.
pub type Mat4x3d = Mat4x3<f64>;

impl<T: FloatScalar> Mat4x3<T> {
    /// The identity transform.
    #[inline]
    pub fn identity() -> Self {
        let o = T::one();
        let z = T::zero();
        Self::from_cols([[o, z, z], [z, o, z], [z, z, o], [z, z, z]])
    }

    /// The zero matrix.
    #[inline]
    pub fn zero() -> Self {
        Self::from_cols([[T::zero(); 3]; 4])
    }

    /// Creates a matrix from column arrays.
    #[inline]
    pub fn from_cols(cols: [[T; 3]; 4]) -> Self {
        Self { m: cols }
    }

    /// Creates a matrix from a column-major flat array of 12 elements.
    #[inline]
    pub fn from_array(a: [T; 12]) -> Self {
        Self::from_cols([
            [a[0], a[1], a[2]],
            [a[3], a[4], a[5]],
            [a[6], a[7], a[8]],
            [a[9], a[10], a[11]],
        ])
    }

    /// Converts to a column-major flat array of 12 elements.
    pub fn to_array(self) -> [T; 12] {
        let m = &self.m;
        [
            m[0][0], m[0][1], m[0][2],
            m[1][0], m[1][1], m[1][2],
            m[2][0], m[2][1], m[2][2],
            m[3][0], m[3][1], m[3][2],
        ]
    }

    /// Returns column `i` as a vector.
    #[inline]
    pub fn col(&self, i: usize) -> Vec3<T> {
        Vec3::from_array(self.m[i])
    }

    /// A translation transform.
    pub fn translation(x: T, y: T, z: T) -> Self {
        let mut r = Self::identity();
        r.m[3] = [x, y, z];
        r
    }

    /// A scaling transform.
    pub fn scaling(x: T, y: T, z: T) -> Self {
        let mut r = Self::identity();
        r.m[0][0] = x;
        r.m[1][1] = y;
        r.m[2][2] = z;
        r
    }

    /// A rotation of `angle` radians about the given unit axis.
    pub fn rotation(angle: T, axis: Vec3<T>) -> Self {
        Self::from_mat3(Mat3::rotation(angle, axis))
    }

    /// A rotation about the x axis.
    #[inline]
    pub fn rotation_x(angle: T) -> Self {
        Self::from_mat3(Mat3::rotation_x(angle))
    }

    /// A rotation about the y axis.
    #[inline]
    pub fn rotation_y(angle: T) -> Self {
        Self::from_mat3(Mat3::rotation_y(angle))
    }

    /// A rotation about the z axis.
    #[inline]
    pub fn rotation_z(angle: T) -> Self {
        Self::from_mat3(Mat3::rotation_z(angle))
    }

    /// The rotation transform of a quaternion.
    #[inline]
    pub fn from_quat(q: Quat<T>) -> Self {
        Self::from_mat3(q.to_mat3())
    }

    /// Embeds a 3x3 linear block with zero translation.
    pub fn from_mat3(r3: Mat3<T>) -> Self {
        Self::from_cols([r3.m[0], r3.m[1], r3.m[2], [T::zero(); 3]])
    }

    /// The 3x3 linear block.
    pub fn to_mat3(&self) -> Mat3<T> {
        Mat3::from_cols([self.m[0], self.m[1], self.m[2]])
    }

    /// The translation column.
    #[inline]
    pub fn translation_part(&self) -> Vec3<T> {
        self.col(3)
    }

    /// Promotes to a full 4x4 matrix with row `(0 0 0 1)`.
    pub fn to_mat4(&self) -> Mat4<T> {
        let z = T::zero();
        let o = T::one();
        Mat4::from_cols([
            [self.m[0][0], self.m[0][1], self.m[0][2], z],
            [self.m[1][0], self.m[1][1], self.m[1][2], z],
            [self.m[2][0], self.m[2][1], self.m[2][2], z],
            [self.m[3][0], self.m[3][1], self.m[3][2], o],
        ])
    }

    /// Transposes the 3x3 linear block, leaving the translation column.
    pub fn transpose3x3(&self) -> Self {
        let m = &self.m;
        Self::from_cols([
            [m[0][0], m[1][0], m[2][0]],
            [m[0][1], m[1][1], m[2][1]],
            [m[0][2], m[1][2], m[2][2]],
            m[3],
        ])
    }

    /// Determinant of the affine transform (the 3x3 block's determinant).
    #[inline]
    pub fn determinant(&self) -> T {
        self.to_mat3().determinant()
    }

    /// Computes the affine inverse.
    ///
    /// Returns `None` when the determinant is zero.
    pub fn invert(&self) -> Option<Self> {
        let inv3 = self.to_mat3().invert()?;
        let t = self.translation_part();
        let it = -(inv3.transform(t));
        Some(Self::from_cols([inv3.m[0], inv3.m[1], inv3.m[2], it.to_array()]))
    }

    /// Multiplies two affine transforms: `self * other`.
    pub fn mul_mat(&self, other: &Self) -> Self {
        let l = self.to_mat3();
        let mut r = Self::zero();
        for j in 0..3 {
            let c = l.transform(other.col(j));
            r.m[j] = c.to_array();
        }
        let t = l.transform(other.col(3)) + self.translation_part();
        r.m[3] = t.to_array();
        r
    }

    /// Transforms a point (translation applies).
    pub fn transform_point(&self, v: Vec3<T>) -> Vec3<T> {
        self.to_mat3().transform(v) + self.translation_part()
    }

    /// Transforms a direction (translation ignored).
    #[inline]
    pub fn transform_direction(&self, v: Vec3<T>) -> Vec3<T> {
        self.to_mat3().transform(v)
    }

    /// Returns true if all elements are finite.
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.m.iter().flatten().all(|x| x.is_finite())
    }

    /// Writes the elements into `slice[0..12]` in column-major order.
    ///
    /// # Panics
    ///
    /// Panics if the slice holds fewer than 12 elements.
    #[inline]
    pub fn write_to_slice(self, slice: &mut [T]) {
        slice[..12].copy_from_slice(&self.to_array());
    }

    /// Reads a matrix from `slice[0..12]` in column-major order.
    ///
    /// # Panics
    ///
    /// Panics if the slice holds fewer than 12 elements.
    #[inline]
    pub fn from_slice(slice: &[T]) -> Self {
        let mut a = [T::zero(); 12];
        a.copy_from_slice(&slice[..12]);
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
        let mut a = [T::zero(); 12];
        buf.get_slice(&mut a)?;
        Ok(Self::from_array(a))
    }

    /// Reads a matrix at absolute `index`, cursor untouched.
    pub fn read_from_buffer_at(index: usize, buf: &Buffer<T>) -> Result<Self> {
        let mut a = [T::zero(); 12];
        buf.get_slice_at(index, &mut a)?;
        Ok(Self::from_array(a))
    }
}

impl<T: FloatScalar> Default for Mat4x3<T> {
    #[inline]
    fn default() -> Self {
        Self::identity()
    }
}

impl<T: FloatScalar> Mul for Mat4x3<T> {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        self.mul_mat(&rhs)
    }
}

// Indexes columns; `m[col][row]` via chained indexing.
impl<T: FloatScalar> Index<usize> for Mat4x3<T> {
    type Output = [T; 3];

    #[inline]
    fn index(&self, i: usize) -> &[T; 3] {
        &self.m[i]
    }
}

impl<T: FloatScalar> fmt::Display for Mat4x3<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for r in 0..3 {
            writeln!(
                f,
                "({} {} {} {})",
                self.m[0][r], self.m[1][r], self.m[2][r], self.m[3][r]
            )?;
        }
        Ok(())
    }
}

impl<T: FloatScalar + AbsDiffEq<Epsilon = T>> AbsDiffEq for Mat4x3<T> {
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

impl<T: FloatScalar + RelativeEq<Epsilon = T>> RelativeEq for Mat4x3<T> {
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
    use crate::Vec3d;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_mat4x3_identity() {
        let m = Mat4x3d::identity();
        let v = Vec3d::new(1.0, 2.0, 3.0);
        assert_eq!(m.transform_point(v), v);
        assert_eq!(m.determinant(), 1.0);
    }

    #[test]
    fn test_mat4x3_translation_only_affects_points() {
        let m = Mat4x3d::translation(1.0, -1.0, 2.0);
        assert_eq!(m.transform_point(Vec3d::zero()), Vec3d::new(1.0, -1.0, 2.0));
        assert_eq!(
            m.transform_direction(Vec3d::new(0.0, 0.0, 1.0)),
            Vec3d::new(0.0, 0.0, 1.0)
        );
    }

    #[test]
    fn test_mat4x3_mul_matches_mat4() {
        let a = Mat4x3d::translation(1.0, 2.0, 3.0);
        let b = Mat4x3d::rotation_y(0.8);
        let ab = a.mul_mat(&b);
        let full = a.to_mat4() * b.to_mat4();
        assert_abs_diff_eq!(ab.to_mat4(), full, epsilon = 1e-12);
    }

    #[test]
    fn test_mat4x3_invert_round_trip() {
        let m = Mat4x3d::translation(4.0, -1.0, 0.5)
            .mul_mat(&Mat4x3d::rotation(0.3, Vec3d::new(0.0, 0.0, 1.0)))
            .mul_mat(&Mat4x3d::scaling(2.0, 2.0, 2.0));
        let inv = m.invert().unwrap();
        assert_abs_diff_eq!(m.mul_mat(&inv), Mat4x3d::identity(), epsilon = 1e-12);
        assert_abs_diff_eq!(inv.invert().unwrap(), m, epsilon = 1e-12);
    }

    #[test]
    fn test_mat4x3_singular_invert_none() {
        assert!(Mat4x3d::scaling(1.0, 0.0, 1.0).invert().is_none());
    }

    #[test]
    fn test_mat4x3_mat4_round_trip() {
        let m = Mat4x3f::rotation_x(0.4).mul_mat(&Mat4x3f::translation(1.0, 2.0, 3.0));
        assert_eq!(m.to_mat4().to_mat4x3(), m);
    }

    #[test]
    fn test_mat4x3_transpose3x3_keeps_translation() {
        let m = Mat4x3f::translation(5.0, 6.0, 7.0);
        let t = m.transpose3x3();
        assert_eq!(t.translation_part(), crate::Vec3f::new(5.0, 6.0, 7.0));
    }

    #[test]
    fn test_mat4x3_buffer_round_trip() {
        let m = Mat4x3d::rotation_z(0.2).mul_mat(&Mat4x3d::translation(1.0, 0.0, 0.0));
        let mut buf: Buffer<f64> = Buffer::with_capacity(12);
        m.write_to_buffer(&mut buf).unwrap();
        assert_eq!(Mat4x3d::read_from_buffer_at(0, &buf).unwrap(), m);
    }
}
