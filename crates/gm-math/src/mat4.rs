//! 4x4 matrix type.
//!
//! [`Mat4`] is the general homogeneous transform: model/view/projection
//! construction, composition and inversion.
//!
//! # Convention
//!
//! Storage is **column-major** (`m[col][row]`), angles are radians, and the
//! fluent appliers post-multiply: `m.translate(..)` computes `M * T`, so the
//! translation applies first when the result transforms a column vector.
//!
//! # Usage
//!
//! ```rust
//! use gm_math::{Mat4f, Vec3f};
//!
//! let mvp = Mat4f::perspective(std::f32::consts::FRAC_PI_3, 4.0 / 3.0, 0.1, 100.0)
//!     * Mat4f::look_at(Vec3f::new(0.0, 1.0, 3.0), Vec3f::zero(), Vec3f::new(0.0, 1.0, 0.0))
//!     * Mat4f::translation(1.0, 0.0, 0.0);
//! # let _ = mvp;
//! ```

use std::fmt;
use std::ops::{Index, Mul};

use approx::{AbsDiffEq, RelativeEq};
use gm_core::{Buffer, FloatScalar, Result};

use crate::{Mat3, Mat4x3, Quat, Vec3, Vec4};

/// A 4x4 matrix in column-major storage.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(C)]
pub struct Mat4<T: FloatScalar> {
    /// Matrix elements as `m[col][row]`.
    pub m: [[T; 4]; 4],
}

/// Single-precision alias.
pub type Mat4f = Mat4<f32>;
/// Double-precision alias.
pub type Mat4d = Mat4<f64>;

impl<T: FloatScalar> Mat4<T> {
    /// The identity matrix.
    #[inline]
    pub fn identity() -> Self {
        let o = T::one();
        let z = T::zero();
        Self::from_cols([
            [o, z, z, z],
            [z, o, z, z],
            [z, z, o, z],
            [z, z, z, o],
        ])
    }

    /// The zero matrix.
    #[inline]
    pub fn zero() -> Self {
        Self::from_cols([[T::zero(); 4]; 4])
    }

    /// Creates a matrix from column arrays.
    #[inline]
    pub fn from_cols(cols: [[T; 4]; 4]) -> Self {
        Self { m: cols }
    }

    /// Creates a matrix from [`Vec4`] columns.
    #[inline]
    pub fn from_col_vecs(c0: Vec4<T>, c1: Vec4<T>, c2: Vec4<T>, c3: Vec4<T>) -> Self {
        Self::from_cols([c0.to_array(), c1.to_array(), c2.to_array(), c3.to_array()])
    }

    /// Creates a matrix from a column-major flat array.
    #[inline]
    pub fn from_array(a: [T; 16]) -> Self {
        Self::from_cols([
            [a[0], a[1], a[2], a[3]],
            [a[4], a[5], a[6], a[7]],
            [a[8], a[9], a[10], a[11]],
            [a[12], a[13], a[14], a[15]],
        ])
    }

    /// Converts to a column-major flat array.
    pub fn to_array(self) -> [T; 16] {
        let m = &self.m;
        [
            m[0][0], m[0][1], m[0][2], m[0][3],
            m[1][0], m[1][1], m[1][2], m[1][3],
            m[2][0], m[2][1], m[2][2], m[2][3],
            m[3][0], m[3][1], m[3][2], m[3][3],
        ]
    }

    /// Returns column `i` as a vector.
    #[inline]
    pub fn col(&self, i: usize) -> Vec4<T> {
        Vec4::from_array(self.m[i])
    }

    /// Returns row `i` as a vector.
    #[inline]
    pub fn row(&self, i: usize) -> Vec4<T> {
        Vec4::new(self.m[0][i], self.m[1][i], self.m[2][i], self.m[3][i])
    }

    /// A translation matrix.
    pub fn translation(x: T, y: T, z: T) -> Self {
        let mut r = Self::identity();
        r.m[3][0] = x;
        r.m[3][1] = y;
        r.m[3][2] = z;
        r
    }

    /// A translation matrix from a vector.
    #[inline]
    pub fn translation_vec(v: Vec3<T>) -> Self {
        Self::translation(v.x, v.y, v.z)
    }

    /// A scaling matrix.
    pub fn scaling(x: T, y: T, z: T) -> Self {
        let mut r = Self::identity();
        r.m[0][0] = x;
        r.m[1][1] = y;
        r.m[2][2] = z;
        r
    }

    /// A rotation of `angle` radians about the given axis (Rodrigues form).
    ///
    /// The axis must be unit length.
    pub fn rotation(angle: T, axis: Vec3<T>) -> Self {
        let mut r = Self::identity();
        let r3 = Mat3::rotation(angle, axis);
        for c in 0..3 {
            for i in 0..3 {
                r.m[c][i] = r3.m[c][i];
            }
        }
        r
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
        q.to_mat4()
    }

    /// Applies a translation: `self * T(x, y, z)`.
    ///
    /// Only the fourth column changes; the product is not formed in full.
    pub fn translate(self, x: T, y: T, z: T) -> Self {
        let mut r = self;
        for i in 0..4 {
            r.m[3][i] = self.m[0][i] * x + self.m[1][i] * y + self.m[2][i] * z + self.m[3][i];
        }
        r
    }

    /// Applies a scale: `self * S(x, y, z)`.
    pub fn scale(self, x: T, y: T, z: T) -> Self {
        let mut r = self;
        for i in 0..4 {
            r.m[0][i] = self.m[0][i] * x;
            r.m[1][i] = self.m[1][i] * y;
            r.m[2][i] = self.m[2][i] * z;
        }
        r
    }

    /// Applies a rotation about an arbitrary unit axis: `self * R`.
    #[inline]
    pub fn rotate(self, angle: T, axis: Vec3<T>) -> Self {
        self.mul_mat(&Self::rotation(angle, axis))
    }

    /// Applies a rotation about the x axis: `self * Rx`.
    ///
    /// Only the two affected columns are recomputed.
    pub fn rotate_x(self, angle: T) -> Self {
        let sin = angle.sin();
        let cos = angle.cos();
        let mut r = self;
        for i in 0..4 {
            r.m[1][i] = self.m[1][i] * cos + self.m[2][i] * sin;
            r.m[2][i] = self.m[2][i] * cos - self.m[1][i] * sin;
        }
        r
    }

    /// Applies a rotation about the y axis: `self * Ry`.
    pub fn rotate_y(self, angle: T) -> Self {
        let sin = angle.sin();
        let cos = angle.cos();
        let mut r = self;
        for i in 0..4 {
            r.m[0][i] = self.m[0][i] * cos - self.m[2][i] * sin;
            r.m[2][i] = self.m[0][i] * sin + self.m[2][i] * cos;
        }
        r
    }

    /// Applies a rotation about the z axis: `self * Rz`.
    pub fn rotate_z(self, angle: T) -> Self {
        let sin = angle.sin();
        let cos = angle.cos();
        let mut r = self;
        for i in 0..4 {
            r.m[0][i] = self.m[0][i] * cos + self.m[1][i] * sin;
            r.m[1][i] = self.m[1][i] * cos - self.m[0][i] * sin;
        }
        r
    }

    /// A right-handed view matrix looking from `eye` towards `center`.
    ///
    /// The basis is re-orthogonalized: `up` only fixes the camera roll and
    /// need not be perpendicular to the view direction.
    pub fn look_at(eye: Vec3<T>, center: Vec3<T>, up: Vec3<T>) -> Self {
        let dir = (eye - center).normalize();
        let left = up.cross(dir).normalize();
        let upn = dir.cross(left);
        Self::from_cols([
            [left.x, upn.x, dir.x, T::zero()],
            [left.y, upn.y, dir.y, T::zero()],
            [left.z, upn.z, dir.z, T::zero()],
            [
                -left.dot(eye),
                -upn.dot(eye),
                -dir.dot(eye),
                T::one(),
            ],
        ])
    }

    /// A rotation-only view matrix aligning `-z` with `dir`.
    ///
    /// Equivalent to [`look_at`](Self::look_at) with `eye` at the origin and
    /// `center = dir`.
    pub fn look_along(dir: Vec3<T>, up: Vec3<T>) -> Self {
        let dirn = (-dir).normalize();
        let left = up.cross(dirn).normalize();
        let upn = dirn.cross(left);
        Self::from_cols([
            [left.x, upn.x, dirn.x, T::zero()],
            [left.y, upn.y, dirn.y, T::zero()],
            [left.z, upn.z, dirn.z, T::zero()],
            [T::zero(), T::zero(), T::zero(), T::one()],
        ])
    }

    /// A symmetric perspective projection.
    ///
    /// `fovy` is the vertical field of view in radians. An infinite `zfar`
    /// produces the unbounded-depth projection.
    pub fn perspective(fovy: T, aspect: T, znear: T, zfar: T) -> Self {
        let h = (fovy * T::half()).tan();
        let mut r = Self::zero();
        r.m[0][0] = T::one() / (h * aspect);
        r.m[1][1] = T::one() / h;
        if zfar > T::zero() && zfar.is_infinite() {
            let e = T::from(1e-6).unwrap();
            r.m[2][2] = e - T::one();
            r.m[3][2] = (e - T::two()) * znear;
        } else {
            r.m[2][2] = (zfar + znear) / (znear - zfar);
            r.m[3][2] = (zfar + zfar) * znear / (znear - zfar);
        }
        r.m[2][3] = -T::one();
        r
    }

    /// An arbitrary perspective frustum projection.
    pub fn frustum(left: T, right: T, bottom: T, top: T, znear: T, zfar: T) -> Self {
        let two = T::two();
        let mut r = Self::zero();
        r.m[0][0] = two * znear / (right - left);
        r.m[1][1] = two * znear / (top - bottom);
        r.m[2][0] = (right + left) / (right - left);
        r.m[2][1] = (top + bottom) / (top - bottom);
        r.m[2][2] = (zfar + znear) / (znear - zfar);
        r.m[2][3] = -T::one();
        r.m[3][2] = two * zfar * znear / (znear - zfar);
        r
    }

    /// An orthographic projection.
    pub fn ortho(left: T, right: T, bottom: T, top: T, znear: T, zfar: T) -> Self {
        let two = T::two();
        let mut r = Self::identity();
        r.m[0][0] = two / (right - left);
        r.m[1][1] = two / (top - bottom);
        r.m[2][2] = two / (znear - zfar);
        r.m[3][0] = (right + left) / (left - right);
        r.m[3][1] = (top + bottom) / (bottom - top);
        r.m[3][2] = (zfar + znear) / (znear - zfar);
        r
    }

    /// Returns the transpose.
    pub fn transpose(&self) -> Self {
        let m = &self.m;
        Self::from_cols([
            [m[0][0], m[1][0], m[2][0], m[3][0]],
            [m[0][1], m[1][1], m[2][1], m[3][1]],
            [m[0][2], m[1][2], m[2][2], m[3][2]],
            [m[0][3], m[1][3], m[2][3], m[3][3]],
        ])
    }

    /// Computes the determinant by cofactor expansion over 2x2 blocks.
    pub fn determinant(&self) -> T {
        let m = &self.m;
        let (m00, m01, m02, m03) = (m[0][0], m[0][1], m[0][2], m[0][3]);
        let (m10, m11, m12, m13) = (m[1][0], m[1][1], m[1][2], m[1][3]);
        let (m20, m21, m22, m23) = (m[2][0], m[2][1], m[2][2], m[2][3]);
        let (m30, m31, m32, m33) = (m[3][0], m[3][1], m[3][2], m[3][3]);
        (m00 * m11 - m01 * m10) * (m22 * m33 - m23 * m32)
            + (m02 * m10 - m00 * m12) * (m21 * m33 - m23 * m31)
            + (m00 * m13 - m03 * m10) * (m21 * m32 - m22 * m31)
            + (m01 * m12 - m02 * m11) * (m20 * m33 - m23 * m30)
            + (m03 * m11 - m01 * m13) * (m20 * m32 - m22 * m30)
            + (m02 * m13 - m03 * m12) * (m20 * m31 - m21 * m30)
    }

    /// Computes the inverse via the 2x2-block cofactor form.
    ///
    /// Returns `None` when the determinant is zero.
    pub fn invert(&self) -> Option<Self> {
        let m = &self.m;
        let (m00, m01, m02, m03) = (m[0][0], m[0][1], m[0][2], m[0][3]);
        let (m10, m11, m12, m13) = (m[1][0], m[1][1], m[1][2], m[1][3]);
        let (m20, m21, m22, m23) = (m[2][0], m[2][1], m[2][2], m[2][3]);
        let (m30, m31, m32, m33) = (m[3][0], m[3][1], m[3][2], m[3][3]);
        let a = m00 * m11 - m01 * m10;
        let b = m00 * m12 - m02 * m10;
        let c = m00 * m13 - m03 * m10;
        let d = m01 * m12 - m02 * m11;
        let e = m01 * m13 - m03 * m11;
        let f = m02 * m13 - m03 * m12;
        let g = m20 * m31 - m21 * m30;
        let h = m20 * m32 - m22 * m30;
        let i = m20 * m33 - m23 * m30;
        let j = m21 * m32 - m22 * m31;
        let k = m21 * m33 - m23 * m31;
        let l = m22 * m33 - m23 * m32;
        let det = a * l - b * k + c * j + d * i - e * h + f * g;
        if det == T::zero() {
            return None;
        }
        let det = T::one() / det;
        Some(Self::from_cols([
            [
                (m11 * l - m12 * k + m13 * j) * det,
                (-m01 * l + m02 * k - m03 * j) * det,
                (m31 * f - m32 * e + m33 * d) * det,
                (-m21 * f + m22 * e - m23 * d) * det,
            ],
            [
                (-m10 * l + m12 * i - m13 * h) * det,
                (m00 * l - m02 * i + m03 * h) * det,
                (-m30 * f + m32 * c - m33 * b) * det,
                (m20 * f - m22 * c + m23 * b) * det,
            ],
            [
                (m10 * k - m11 * i + m13 * g) * det,
                (-m00 * k + m01 * i - m03 * g) * det,
                (m30 * e - m31 * c + m33 * a) * det,
                (-m20 * e + m21 * c - m23 * a) * det,
            ],
            [
                (-m10 * j + m11 * h - m12 * g) * det,
                (m00 * j - m01 * h + m02 * g) * det,
                (-m30 * d + m31 * b - m32 * a) * det,
                (m20 * d - m21 * b + m22 * a) * det,
            ],
        ]))
    }

    /// Multiplies two matrices: `self * other`.
    pub fn mul_mat(&self, other: &Self) -> Self {
        let mut result = Self::zero();
        for j in 0..4 {
            for i in 0..4 {
                result.m[j][i] = self.m[0][i] * other.m[j][0]
                    + self.m[1][i] * other.m[j][1]
                    + self.m[2][i] * other.m[j][2]
                    + self.m[3][i] * other.m[j][3];
            }
        }
        result
    }

    /// Transforms a homogeneous vector: `matrix * v`.
    pub fn transform(&self, v: Vec4<T>) -> Vec4<T> {
        let m = &self.m;
        Vec4::new(
            m[0][0] * v.x + m[1][0] * v.y + m[2][0] * v.z + m[3][0] * v.w,
            m[0][1] * v.x + m[1][1] * v.y + m[2][1] * v.z + m[3][1] * v.w,
            m[0][2] * v.x + m[1][2] * v.y + m[2][2] * v.z + m[3][2] * v.w,
            m[0][3] * v.x + m[1][3] * v.y + m[2][3] * v.z + m[3][3] * v.w,
        )
    }

    /// Transforms a point (`w = 1`), without perspective divide.
    #[inline]
    pub fn transform_point(&self, v: Vec3<T>) -> Vec3<T> {
        self.transform(Vec4::from_vec3(v, T::one())).truncate()
    }

    /// Transforms a direction (`w = 0`).
    #[inline]
    pub fn transform_direction(&self, v: Vec3<T>) -> Vec3<T> {
        self.transform(Vec4::from_vec3(v, T::zero())).truncate()
    }

    /// The upper-left 3x3 block.
    pub fn to_mat3(&self) -> Mat3<T> {
        Mat3::from_cols([
            [self.m[0][0], self.m[0][1], self.m[0][2]],
            [self.m[1][0], self.m[1][1], self.m[1][2]],
            [self.m[2][0], self.m[2][1], self.m[2][2]],
        ])
    }

    /// Demotes to the affine 4x3 form, dropping the projective row.
    pub fn to_mat4x3(&self) -> Mat4x3<T> {
        Mat4x3::from_cols([
            [self.m[0][0], self.m[0][1], self.m[0][2]],
            [self.m[1][0], self.m[1][1], self.m[1][2]],
            [self.m[2][0], self.m[2][1], self.m[2][2]],
            [self.m[3][0], self.m[3][1], self.m[3][2]],
        ])
    }

    /// Returns true if all elements are finite.
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.m.iter().flatten().all(|x| x.is_finite())
    }

    /// Writes the elements into `slice[0..16]` in column-major order.
    ///
    /// # Panics
    ///
    /// Panics if the slice holds fewer than 16 elements.
    #[inline]
    pub fn write_to_slice(self, slice: &mut [T]) {
        slice[..16].copy_from_slice(&self.to_array());
    }

    /// Reads a matrix from `slice[0..16]` in column-major order.
    ///
    /// # Panics
    ///
    /// Panics if the slice holds fewer than 16 elements.
    #[inline]
    pub fn from_slice(slice: &[T]) -> Self {
        let mut a = [T::zero(); 16];
        a.copy_from_slice(&slice[..16]);
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
        let mut a = [T::zero(); 16];
        buf.get_slice(&mut a)?;
        Ok(Self::from_array(a))
    }

    /// Reads a matrix at absolute `index`, cursor untouched.
    pub fn read_from_buffer_at(index: usize, buf: &Buffer<T>) -> Result<Self> {
        let mut a = [T::zero(); 16];
        buf.get_slice_at(index, &mut a)?;
        Ok(Self::from_array(a))
    }
}

impl Mat4f {
    /// Converts to glam (also column-major).
    #[inline]
    pub fn to_glam(self) -> glam::Mat4 {
        glam::Mat4::from_cols_array(&self.to_array())
    }

    /// Creates from glam.
    #[inline]
    pub fn from_glam(m: glam::Mat4) -> Self {
        Self::from_array(m.to_cols_array())
    }
}

impl<T: FloatScalar> Default for Mat4<T> {
    #[inline]
    fn default() -> Self {
        Self::identity()
    }
}

impl<T: FloatScalar> Mul<Vec4<T>> for Mat4<T> {
    type Output = Vec4<T>;

    #[inline]
    fn mul(self, rhs: Vec4<T>) -> Vec4<T> {
        self.transform(rhs)
    }
}

impl<T: FloatScalar> Mul for Mat4<T> {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        self.mul_mat(&rhs)
    }
}

impl<T: FloatScalar> Mul<T> for Mat4<T> {
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
impl<T: FloatScalar> Index<usize> for Mat4<T> {
    type Output = [T; 4];

    #[inline]
    fn index(&self, i: usize) -> &[T; 4] {
        &self.m[i]
    }
}

impl<T: FloatScalar> fmt::Display for Mat4<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for r in 0..4 {
            writeln!(
                f,
                "({} {} {} {})",
                self.m[0][r], self.m[1][r], self.m[2][r], self.m[3][r]
            )?;
        }
        Ok(())
    }
}

impl<T: FloatScalar + AbsDiffEq<Epsilon = T>> AbsDiffEq for Mat4<T> {
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

impl<T: FloatScalar + RelativeEq<Epsilon = T>> RelativeEq for Mat4<T> {
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
    use crate::{Vec3d, Vec3f, Vec4f};
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_mat4_identity() {
        let v = Vec4f::new(1.0, 2.0, 3.0, 1.0);
        assert_eq!(Mat4f::identity() * v, v);
        assert_eq!(Mat4f::identity().determinant(), 1.0);
    }

    #[test]
    fn test_mat4_translation_point_vs_direction() {
        let m = Mat4f::translation(1.0, 2.0, 3.0);
        assert_eq!(m.transform_point(Vec3f::zero()), Vec3f::new(1.0, 2.0, 3.0));
        assert_eq!(
            m.transform_direction(Vec3f::new(1.0, 0.0, 0.0)),
            Vec3f::new(1.0, 0.0, 0.0)
        );
    }

    #[test]
    fn test_mat4_translate_post_multiplies() {
        let m = Mat4f::scaling(2.0, 2.0, 2.0).translate(1.0, 0.0, 0.0);
        // scale applied to the translated point: (0,0,0) -> (2,0,0)
        assert_eq!(m.transform_point(Vec3f::zero()), Vec3f::new(2.0, 0.0, 0.0));
        assert_abs_diff_eq!(
            m,
            Mat4f::scaling(2.0, 2.0, 2.0) * Mat4f::translation(1.0, 0.0, 0.0)
        );
    }

    #[test]
    fn test_mat4_rotate_axis_minimal_update_matches_full_multiply() {
        let base = Mat4d::translation(1.0, -2.0, 0.5).scale(1.5, 1.5, 1.5);
        let ang = 0.7;
        assert_abs_diff_eq!(
            base.rotate_x(ang),
            base.mul_mat(&Mat4d::rotation_x(ang)),
            epsilon = 1e-12
        );
        assert_abs_diff_eq!(
            base.rotate_y(ang),
            base.mul_mat(&Mat4d::rotation_y(ang)),
            epsilon = 1e-12
        );
        assert_abs_diff_eq!(
            base.rotate_z(ang),
            base.mul_mat(&Mat4d::rotation_z(ang)),
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_mat4_transpose_involutive() {
        let m = Mat4f::frustum(-1.0, 1.0, -0.5, 0.5, 0.1, 10.0);
        assert_eq!(m.transpose().transpose(), m);
    }

    #[test]
    fn test_mat4_invert_round_trip() {
        let m = Mat4d::translation(1.0, 2.0, 3.0)
            .rotate(0.6, Vec3d::new(0.0, 1.0, 0.0))
            .scale(2.0, 2.0, 2.0);
        let inv = m.invert().unwrap();
        assert_abs_diff_eq!(m * inv, Mat4d::identity(), epsilon = 1e-12);
        assert_abs_diff_eq!(inv.invert().unwrap(), m, epsilon = 1e-12);
    }

    #[test]
    fn test_mat4_invert_projection() {
        let m = Mat4d::perspective(1.0, 1.5, 0.1, 100.0);
        let inv = m.invert().unwrap();
        assert_abs_diff_eq!(m * inv, Mat4d::identity(), epsilon = 1e-9);
    }

    #[test]
    fn test_mat4_singular_invert_none() {
        assert!(Mat4f::zero().invert().is_none());
        assert!(Mat4f::scaling(1.0, 1.0, 0.0).invert().is_none());
    }

    #[test]
    fn test_mat4_look_at_maps_eye_to_origin() {
        let eye = Vec3d::new(3.0, 4.0, 5.0);
        let m = Mat4d::look_at(eye, Vec3d::zero(), Vec3d::new(0.0, 1.0, 0.0));
        assert_abs_diff_eq!(m.transform_point(eye), Vec3d::zero(), epsilon = 1e-12);
        // center lands on the negative z axis
        let c = m.transform_point(Vec3d::zero());
        assert!(c.z < 0.0);
        assert_abs_diff_eq!(c.x, 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(c.y, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_mat4_look_along_matches_look_at_from_origin() {
        let dir = Vec3d::new(0.3, -0.2, -1.0);
        let up = Vec3d::new(0.0, 1.0, 0.0);
        let a = Mat4d::look_along(dir, up);
        let b = Mat4d::look_at(Vec3d::zero(), dir, up);
        assert_abs_diff_eq!(a, b, epsilon = 1e-12);
    }

    #[test]
    fn test_mat4_ortho_maps_corners_to_ndc() {
        let m = Mat4d::ortho(-2.0, 2.0, -1.0, 1.0, 0.0, 10.0);
        let p = m.transform_point(Vec3d::new(2.0, 1.0, -10.0));
        assert_abs_diff_eq!(p, Vec3d::new(1.0, 1.0, 1.0), epsilon = 1e-12);
        let q = m.transform_point(Vec3d::new(-2.0, -1.0, 0.0));
        assert_abs_diff_eq!(q, Vec3d::new(-1.0, -1.0, -1.0), epsilon = 1e-12);
    }

    #[test]
    fn test_mat4_perspective_depth_range() {
        let m = Mat4d::perspective(std::f64::consts::FRAC_PI_2, 1.0, 1.0, 10.0);
        let near = m.transform(Vec4::new(0.0, 0.0, -1.0, 1.0));
        assert_abs_diff_eq!(near.z / near.w, -1.0, epsilon = 1e-12);
        let far = m.transform(Vec4::new(0.0, 0.0, -10.0, 1.0));
        assert_abs_diff_eq!(far.z / far.w, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_mat4_perspective_infinite_far() {
        let m = Mat4f::perspective(1.0, 1.0, 0.1, f32::INFINITY);
        assert!(m.is_finite());
        let far = m.transform(Vec4::new(0.0, 0.0, -1e7, 1.0));
        assert!((far.z / far.w) < 1.0);
    }

    #[test]
    fn test_mat4_frustum_matches_symmetric_perspective() {
        let fovy = 0.9f64;
        let (zn, zf) = (0.5, 50.0);
        let h = (fovy * 0.5).tan() * zn;
        let w = h * 2.0;
        let a = Mat4d::perspective(fovy, 2.0, zn, zf);
        let b = Mat4d::frustum(-w, w, -h, h, zn, zf);
        assert_abs_diff_eq!(a, b, epsilon = 1e-12);
    }

    #[test]
    fn test_mat4_slice_round_trip_column_major() {
        let m = Mat4f::translation(1.0, 2.0, 3.0);
        let mut a = [0.0f32; 16];
        m.write_to_slice(&mut a);
        // translation sits in the last column
        assert_eq!(&a[12..15], &[1.0, 2.0, 3.0]);
        assert_eq!(Mat4f::from_slice(&a), m);
    }

    #[test]
    fn test_mat4_buffer_round_trip() {
        let m = Mat4d::rotation(1.1, Vec3d::new(0.0, 0.0, 1.0));
        let mut buf: Buffer<f64> = Buffer::with_capacity(32);
        m.write_to_buffer(&mut buf).unwrap();
        m.write_to_buffer_at(16, &mut buf).unwrap();
        assert_eq!(buf.position(), 16);
        assert_eq!(Mat4d::read_from_buffer_at(16, &buf).unwrap(), m);
    }

    #[test]
    fn test_mat4_glam_round_trip() {
        let m = Mat4f::perspective(1.0, 1.3, 0.1, 64.0);
        assert_abs_diff_eq!(Mat4f::from_glam(m.to_glam()), m, epsilon = 1e-6);
    }
}
