//! Position-tracked linear buffers for graphics-API interop.
//!
//! [`Buffer`] plays the role NIO buffers play in legacy GL bindings: a
//! fixed-capacity sequence of scalars with a cursor, written element by
//! element and then handed to an API expecting a flat column-major blob.
//!
//! Relative access ([`put`](Buffer::put)/[`get`](Buffer::get)) advances the
//! cursor; absolute access ([`put_at`](Buffer::put_at)/[`get_at`](Buffer::get_at))
//! leaves it untouched. All accesses are bounds-checked and return
//! [`Error`](crate::Error) values instead of panicking.
//!
//! # Usage
//!
//! ```rust
//! use gm_core::Buffer;
//!
//! let mut buf: Buffer<f32> = Buffer::with_capacity(3);
//! buf.put(1.0).unwrap();
//! buf.put(2.0).unwrap();
//! buf.put(3.0).unwrap();
//! buf.rewind();
//! assert_eq!(buf.get().unwrap(), 1.0);
//! assert_eq!(buf.as_slice(), &[1.0, 2.0, 3.0]);
//! ```

use crate::{Error, Result, Scalar};

/// A fixed-capacity, position-tracked buffer of scalars.
///
/// Storage is zero-initialized at construction; the capacity never changes.
#[derive(Debug, Clone, PartialEq)]
pub struct Buffer<T: Scalar> {
    data: Vec<T>,
    position: usize,
}

impl<T: Scalar> Buffer<T> {
    /// Creates a zero-filled buffer holding `capacity` elements, cursor at 0.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: vec![T::zero(); capacity],
            position: 0,
        }
    }

    /// Creates a buffer from existing elements, cursor at 0.
    pub fn from_vec(data: Vec<T>) -> Self {
        Self { data, position: 0 }
    }

    /// Total element capacity.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if the buffer holds no elements at all.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Current cursor position.
    #[inline]
    pub fn position(&self) -> usize {
        self.position
    }

    /// Moves the cursor to `position`.
    pub fn set_position(&mut self, position: usize) -> Result<()> {
        if position > self.data.len() {
            return Err(Error::buffer_position(position, self.data.len()));
        }
        self.position = position;
        Ok(())
    }

    /// Elements between the cursor and the end of the buffer.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.data.len() - self.position
    }

    /// Resets the cursor to 0, keeping contents.
    #[inline]
    pub fn rewind(&mut self) {
        self.position = 0;
    }

    /// Zeroes all elements and resets the cursor.
    pub fn clear(&mut self) {
        self.data.fill(T::zero());
        self.position = 0;
    }

    /// Writes one element at the cursor and advances it.
    pub fn put(&mut self, value: T) -> Result<()> {
        if self.remaining() < 1 {
            return Err(Error::buffer_overflow(1, 0));
        }
        self.data[self.position] = value;
        self.position += 1;
        Ok(())
    }

    /// Reads one element at the cursor and advances it.
    pub fn get(&mut self) -> Result<T> {
        if self.remaining() < 1 {
            return Err(Error::buffer_overflow(1, 0));
        }
        let value = self.data[self.position];
        self.position += 1;
        Ok(value)
    }

    /// Writes `values` starting at the cursor and advances it past them.
    pub fn put_slice(&mut self, values: &[T]) -> Result<()> {
        if self.remaining() < values.len() {
            return Err(Error::buffer_overflow(values.len(), self.remaining()));
        }
        self.data[self.position..self.position + values.len()].copy_from_slice(values);
        self.position += values.len();
        Ok(())
    }

    /// Reads `dest.len()` elements starting at the cursor and advances it.
    pub fn get_slice(&mut self, dest: &mut [T]) -> Result<()> {
        if self.remaining() < dest.len() {
            return Err(Error::buffer_overflow(dest.len(), self.remaining()));
        }
        dest.copy_from_slice(&self.data[self.position..self.position + dest.len()]);
        self.position += dest.len();
        Ok(())
    }

    /// Writes one element at absolute `index` without moving the cursor.
    pub fn put_at(&mut self, index: usize, value: T) -> Result<()> {
        if index >= self.data.len() {
            return Err(Error::buffer_position(index, self.data.len()));
        }
        self.data[index] = value;
        Ok(())
    }

    /// Reads one element at absolute `index` without moving the cursor.
    pub fn get_at(&self, index: usize) -> Result<T> {
        if index >= self.data.len() {
            return Err(Error::buffer_position(index, self.data.len()));
        }
        Ok(self.data[index])
    }

    /// Writes `values` at absolute `index` without moving the cursor.
    pub fn put_slice_at(&mut self, index: usize, values: &[T]) -> Result<()> {
        if index > self.data.len() || self.data.len() - index < values.len() {
            return Err(Error::buffer_overflow(
                values.len(),
                self.data.len().saturating_sub(index),
            ));
        }
        self.data[index..index + values.len()].copy_from_slice(values);
        Ok(())
    }

    /// Reads `dest.len()` elements at absolute `index` without moving the cursor.
    pub fn get_slice_at(&self, index: usize, dest: &mut [T]) -> Result<()> {
        if index > self.data.len() || self.data.len() - index < dest.len() {
            return Err(Error::buffer_overflow(
                dest.len(),
                self.data.len().saturating_sub(index),
            ));
        }
        dest.copy_from_slice(&self.data[index..index + dest.len()]);
        Ok(())
    }

    /// The full backing storage, cursor-independent.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Mutable view of the full backing storage.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_put_get() {
        let mut buf: Buffer<f32> = Buffer::with_capacity(2);
        buf.put(1.5).unwrap();
        buf.put(2.5).unwrap();
        assert_eq!(buf.remaining(), 0);
        assert!(buf.put(3.5).is_err());
        buf.rewind();
        assert_eq!(buf.get().unwrap(), 1.5);
        assert_eq!(buf.get().unwrap(), 2.5);
    }

    #[test]
    fn test_absolute_access_keeps_cursor() {
        let mut buf: Buffer<i32> = Buffer::with_capacity(4);
        buf.put(7).unwrap();
        buf.put_at(3, 9).unwrap();
        assert_eq!(buf.position(), 1);
        assert_eq!(buf.get_at(3).unwrap(), 9);
        assert!(buf.get_at(4).is_err());
    }

    #[test]
    fn test_slice_round_trip() {
        let mut buf: Buffer<f64> = Buffer::with_capacity(4);
        buf.put_slice(&[1.0, 2.0, 3.0, 4.0]).unwrap();
        let mut out = [0.0; 4];
        buf.get_slice_at(0, &mut out).unwrap();
        assert_eq!(out, [1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_overflow_reports_sizes() {
        let mut buf: Buffer<f32> = Buffer::with_capacity(3);
        let err = buf.put_slice(&[0.0; 5]).unwrap_err();
        assert!(err.to_string().contains("5"));
        assert!(err.to_string().contains("3"));
    }

    #[test]
    fn test_set_position_bounds() {
        let mut buf: Buffer<f32> = Buffer::with_capacity(3);
        buf.set_position(3).unwrap();
        assert_eq!(buf.remaining(), 0);
        assert!(buf.set_position(4).is_err());
    }

    #[test]
    fn test_clear_zeroes() {
        let mut buf: Buffer<i64> = Buffer::from_vec(vec![5, 6]);
        buf.get().unwrap();
        buf.clear();
        assert_eq!(buf.position(), 0);
        assert_eq!(buf.as_slice(), &[0, 0]);
    }
}
