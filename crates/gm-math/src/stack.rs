//! Legacy-GL style matrix stack.
//!
//! [`MatrixStack`] resembles the fixed-depth transform stack of legacy
//! OpenGL: a bounded sequence of [`Mat4`] slots with a cursor. All transform
//! operations act on the matrix at the cursor; [`push`](MatrixStack::push)
//! copies it one slot up and [`pop`](MatrixStack::pop) discards it.
//!
//! The capacity is fixed at construction. Pushing at full depth and popping
//! at the bottom are hard errors that leave the stack untouched; the stack
//! never grows. Slots above the initial one are allocated lazily the first
//! time that depth is reached and reused afterwards.
//!
//! # Usage
//!
//! ```rust
//! use gm_math::MatrixStackf;
//!
//! let mut stack = MatrixStackf::new(4).unwrap();
//! stack.translate(1.0, 0.0, 0.0);
//! stack.push().unwrap();
//! stack.scale(2.0, 2.0, 2.0);
//! stack.pop().unwrap();
//! // back to the pure translation
//! assert_eq!(stack.current().m[3][0], 1.0);
//! ```

use gm_core::{Buffer, Error, FloatScalar, Result};
use tracing::trace;

use crate::{Mat4, Vec3};

/// A fixed-capacity stack of [`Mat4`] transforms with a cursor.
#[derive(Debug, Clone, PartialEq)]
pub struct MatrixStack<T: FloatScalar> {
    /// Allocated slots; `mats.len()` grows lazily up to `capacity`.
    mats: Vec<Mat4<T>>,
    /// Index of the current matrix.
    curr: usize,
    /// Hard depth limit.
    capacity: usize,
}

/// Single-precision alias.
pub type MatrixStackf = MatrixStack<f32>;
/// Double-precision alias.
pub type MatrixStackd = MatrixStack<f64>;

impl<T: FloatScalar> MatrixStack<T> {
    /// Creates a stack of the given capacity with the bottom slot set to
    /// identity.
    ///
    /// Fails with [`Error::InvalidCapacity`] when `capacity` is zero.
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity < 1 {
            return Err(Error::InvalidCapacity { given: capacity });
        }
        let mut mats = Vec::with_capacity(1);
        mats.push(Mat4::identity());
        Ok(Self {
            mats,
            curr: 0,
            capacity,
        })
    }

    /// The fixed depth limit.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Current depth (number of matrices in use, at least 1).
    #[inline]
    pub fn depth(&self) -> usize {
        self.curr + 1
    }

    /// Resets the cursor to the bottom and the bottom matrix to identity.
    ///
    /// Already-allocated slots are kept for reuse.
    pub fn clear(&mut self) -> &mut Self {
        trace!(depth = self.depth(), "matrix stack cleared");
        self.curr = 0;
        self.mats[0] = Mat4::identity();
        self
    }

    /// Copies the current matrix into the next slot and moves the cursor up.
    ///
    /// Fails with [`Error::StackOverflow`] at full depth; the stack is left
    /// unchanged.
    pub fn push(&mut self) -> Result<&mut Self> {
        if self.curr == self.capacity - 1 {
            return Err(Error::StackOverflow {
                capacity: self.capacity,
            });
        }
        let top = self.mats[self.curr];
        if self.curr + 1 == self.mats.len() {
            self.mats.push(top);
        } else {
            self.mats[self.curr + 1] = top;
        }
        self.curr += 1;
        trace!(depth = self.depth(), "matrix stack push");
        Ok(self)
    }

    /// Moves the cursor down, discarding the current matrix.
    ///
    /// Fails with [`Error::StackUnderflow`] at the bottom; the stack is left
    /// unchanged.
    pub fn pop(&mut self) -> Result<&mut Self> {
        if self.curr == 0 {
            return Err(Error::StackUnderflow);
        }
        self.curr -= 1;
        trace!(depth = self.depth(), "matrix stack pop");
        Ok(self)
    }

    /// A copy of the current matrix.
    #[inline]
    pub fn current(&self) -> Mat4<T> {
        self.mats[self.curr]
    }

    /// Direct mutable access to the current matrix.
    ///
    /// This aliases the stack's internal storage: mutations through the
    /// returned reference are visible to subsequent stack operations.
    #[inline]
    pub fn current_mut(&mut self) -> &mut Mat4<T> {
        &mut self.mats[self.curr]
    }

    /// Replaces the current matrix with identity.
    pub fn load_identity(&mut self) -> &mut Self {
        self.mats[self.curr] = Mat4::identity();
        self
    }

    /// Replaces the current matrix.
    pub fn load(&mut self, mat: &Mat4<T>) -> &mut Self {
        self.mats[self.curr] = *mat;
        self
    }

    /// Replaces the current matrix from a column-major slice.
    ///
    /// # Panics
    ///
    /// Panics if the slice holds fewer than 16 elements.
    pub fn load_from_slice(&mut self, slice: &[T]) -> &mut Self {
        self.mats[self.curr] = Mat4::from_slice(slice);
        self
    }

    /// Post-multiplies the current matrix: `C * mat`.
    pub fn mul(&mut self, mat: &Mat4<T>) -> &mut Self {
        self.mats[self.curr] = self.mats[self.curr].mul_mat(mat);
        self
    }

    /// Applies a translation to the current matrix (`C * T`, translation
    /// first when transforming).
    pub fn translate(&mut self, x: T, y: T, z: T) -> &mut Self {
        self.mats[self.curr] = self.mats[self.curr].translate(x, y, z);
        self
    }

    /// Applies a scale to the current matrix.
    pub fn scale(&mut self, x: T, y: T, z: T) -> &mut Self {
        self.mats[self.curr] = self.mats[self.curr].scale(x, y, z);
        self
    }

    /// Applies a rotation about a unit axis to the current matrix.
    pub fn rotate(&mut self, angle: T, axis: Vec3<T>) -> &mut Self {
        self.mats[self.curr] = self.mats[self.curr].rotate(angle, axis);
        self
    }

    /// Applies a rotation about the x axis to the current matrix.
    pub fn rotate_x(&mut self, angle: T) -> &mut Self {
        self.mats[self.curr] = self.mats[self.curr].rotate_x(angle);
        self
    }

    /// Applies a rotation about the y axis to the current matrix.
    pub fn rotate_y(&mut self, angle: T) -> &mut Self {
        self.mats[self.curr] = self.mats[self.curr].rotate_y(angle);
        self
    }

    /// Applies a rotation about the z axis to the current matrix.
    pub fn rotate_z(&mut self, angle: T) -> &mut Self {
        self.mats[self.curr] = self.mats[self.curr].rotate_z(angle);
        self
    }

    /// Applies a look-at view transform to the current matrix.
    pub fn look_at(&mut self, eye: Vec3<T>, center: Vec3<T>, up: Vec3<T>) -> &mut Self {
        self.mul(&Mat4::look_at(eye, center, up))
    }

    /// Applies a look-along rotation to the current matrix.
    pub fn look_along(&mut self, dir: Vec3<T>, up: Vec3<T>) -> &mut Self {
        self.mul(&Mat4::look_along(dir, up))
    }

    /// Applies a symmetric perspective projection to the current matrix.
    pub fn perspective(&mut self, fovy: T, aspect: T, znear: T, zfar: T) -> &mut Self {
        self.mul(&Mat4::perspective(fovy, aspect, znear, zfar))
    }

    /// Applies an orthographic projection to the current matrix.
    pub fn ortho(&mut self, left: T, right: T, bottom: T, top: T, znear: T, zfar: T) -> &mut Self {
        self.mul(&Mat4::ortho(left, right, bottom, top, znear, zfar))
    }

    /// Applies an arbitrary frustum projection to the current matrix.
    pub fn frustum(&mut self, left: T, right: T, bottom: T, top: T, znear: T, zfar: T) -> &mut Self {
        self.mul(&Mat4::frustum(left, right, bottom, top, znear, zfar))
    }

    /// Writes the current matrix at the buffer cursor in column-major order.
    pub fn write_to_buffer(&self, buf: &mut Buffer<T>) -> Result<()> {
        self.current().write_to_buffer(buf)
    }

    /// Writes the current matrix into `slice[0..16]` in column-major order.
    ///
    /// # Panics
    ///
    /// Panics if the slice holds fewer than 16 elements.
    pub fn write_to_slice(&self, slice: &mut [T]) {
        self.current().write_to_slice(slice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Mat4f, Vec3f};
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_stack_zero_capacity_rejected() {
        assert!(MatrixStackf::new(0).is_err());
    }

    #[test]
    fn test_stack_starts_at_identity() {
        let stack = MatrixStackf::new(2).unwrap();
        assert_eq!(stack.depth(), 1);
        assert_eq!(stack.current(), Mat4f::identity());
    }

    #[test]
    fn test_stack_push_pop_restores_exactly() {
        let mut stack = MatrixStackf::new(3).unwrap();
        stack.translate(1.0, 2.0, 3.0).rotate_y(0.5);
        let before = stack.current();
        stack.push().unwrap();
        stack.scale(4.0, 4.0, 4.0).rotate_x(1.0);
        assert_ne!(stack.current(), before);
        stack.pop().unwrap();
        assert_eq!(stack.current(), before);
    }

    #[test]
    fn test_stack_overflow_leaves_state() {
        let mut stack = MatrixStackf::new(2).unwrap();
        stack.push().unwrap();
        let before = stack.current();
        let err = stack.push().unwrap_err();
        assert!(err.is_stack_error());
        assert_eq!(stack.depth(), 2);
        assert_eq!(stack.current(), before);
    }

    #[test]
    fn test_stack_underflow_leaves_state() {
        let mut stack = MatrixStackf::new(2).unwrap();
        stack.translate(1.0, 0.0, 0.0);
        let before = stack.current();
        assert!(stack.pop().is_err());
        assert_eq!(stack.depth(), 1);
        assert_eq!(stack.current(), before);
    }

    #[test]
    fn test_stack_slots_reused_after_pop() {
        let mut stack = MatrixStackf::new(4).unwrap();
        stack.push().unwrap();
        stack.translate(9.0, 9.0, 9.0);
        stack.pop().unwrap();
        stack.push().unwrap();
        // the reused slot is a fresh copy of the bottom, not the old contents
        assert_eq!(stack.current(), Mat4f::identity());
    }

    #[test]
    fn test_stack_clear() {
        let mut stack = MatrixStackf::new(3).unwrap();
        stack.push().unwrap();
        stack.translate(1.0, 1.0, 1.0);
        stack.clear();
        assert_eq!(stack.depth(), 1);
        assert_eq!(stack.current(), Mat4f::identity());
    }

    #[test]
    fn test_stack_current_mut_aliases_storage() {
        let mut stack = MatrixStackf::new(2).unwrap();
        stack.current_mut().m[3][0] = 7.0;
        assert_eq!(stack.current().m[3][0], 7.0);
    }

    #[test]
    fn test_stack_transform_composition_order() {
        // C * T * S applied to a point: scale first, then translate
        let mut stack = MatrixStackf::new(2).unwrap();
        stack.translate(1.0, 0.0, 0.0).scale(2.0, 2.0, 2.0);
        let p = stack.current().transform_point(Vec3f::new(1.0, 0.0, 0.0));
        assert_abs_diff_eq!(p, Vec3f::new(3.0, 0.0, 0.0), epsilon = 1e-6);
    }

    #[test]
    fn test_stack_load_and_mul() {
        let mut stack = MatrixStackf::new(2).unwrap();
        let m = Mat4f::scaling(2.0, 3.0, 4.0);
        stack.load(&m);
        assert_eq!(stack.current(), m);
        stack.mul(&Mat4f::translation(1.0, 0.0, 0.0));
        assert_abs_diff_eq!(
            stack.current(),
            m * Mat4f::translation(1.0, 0.0, 0.0),
            epsilon = 1e-6
        );
        stack.load_identity();
        assert_eq!(stack.current(), Mat4f::identity());
    }

    #[test]
    fn test_stack_buffer_export() {
        let mut stack = MatrixStackf::new(2).unwrap();
        stack.translate(1.0, 2.0, 3.0);
        let mut buf: Buffer<f32> = Buffer::with_capacity(16);
        stack.write_to_buffer(&mut buf).unwrap();
        assert_eq!(buf.get_at(12).unwrap(), 1.0);
        assert_eq!(buf.get_at(13).unwrap(), 2.0);
        assert_eq!(buf.get_at(14).unwrap(), 3.0);
    }
}
