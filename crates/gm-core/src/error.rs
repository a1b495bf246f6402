//! Error types for gm-rs operations.
//!
//! A single unified error enum covers the runtime-checkable failure modes of
//! the workspace: buffer interop bounds and matrix-stack structural misuse.
//!
//! Numerical degeneracy (zero determinant, zero-length normalization) is
//! deliberately *not* an error here: inversion returns `Option` and
//! normalization propagates non-finite components. See the per-method docs in
//! `gm-math`.
//!
//! # Usage
//!
//! ```rust
//! use gm_core::{Buffer, Error};
//!
//! let mut buf: Buffer<f32> = Buffer::with_capacity(1);
//! buf.put(1.0).unwrap();
//! let err = buf.put(2.0).unwrap_err();
//! assert!(err.is_buffer_error());
//! ```

use thiserror::Error;

/// Result type alias using [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by gm-rs buffer and stack operations.
///
/// # Categories
///
/// - **Buffer errors**: [`BufferOverflow`](Error::BufferOverflow),
///   [`BufferPosition`](Error::BufferPosition)
/// - **Stack errors**: [`StackOverflow`](Error::StackOverflow),
///   [`StackUnderflow`](Error::StackUnderflow),
///   [`InvalidCapacity`](Error::InvalidCapacity)
#[derive(Debug, Error)]
pub enum Error {
    /// A buffer read or write needs more elements than remain.
    #[error("buffer access needs {needed} elements but only {remaining} remain")]
    BufferOverflow {
        /// Elements the operation needs
        needed: usize,
        /// Elements remaining in the buffer
        remaining: usize,
    },

    /// An absolute buffer position lies outside the buffer.
    #[error("position {position} out of range for buffer of length {len}")]
    BufferPosition {
        /// Requested absolute position
        position: usize,
        /// Buffer length
        len: usize,
    },

    /// A push was attempted on a full matrix stack.
    ///
    /// The stack is left unchanged; its capacity never grows.
    #[error("matrix stack at maximum depth {capacity}")]
    StackOverflow {
        /// The fixed stack capacity
        capacity: usize,
    },

    /// A pop was attempted at the bottom of the matrix stack.
    #[error("matrix stack already at the bottom")]
    StackUnderflow,

    /// A matrix stack was constructed with zero capacity.
    #[error("stack capacity must be at least 1, got {given}")]
    InvalidCapacity {
        /// The rejected capacity
        given: usize,
    },
}

impl Error {
    /// Creates an [`Error::BufferOverflow`] error.
    #[inline]
    pub fn buffer_overflow(needed: usize, remaining: usize) -> Self {
        Self::BufferOverflow { needed, remaining }
    }

    /// Creates an [`Error::BufferPosition`] error.
    #[inline]
    pub fn buffer_position(position: usize, len: usize) -> Self {
        Self::BufferPosition { position, len }
    }

    /// Returns `true` if this is a buffer bounds error.
    #[inline]
    pub fn is_buffer_error(&self) -> bool {
        matches!(
            self,
            Self::BufferOverflow { .. } | Self::BufferPosition { .. }
        )
    }

    /// Returns `true` if this is a stack over/underflow or capacity error.
    #[inline]
    pub fn is_stack_error(&self) -> bool {
        matches!(
            self,
            Self::StackOverflow { .. } | Self::StackUnderflow | Self::InvalidCapacity { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffer_overflow_message() {
        let err = Error::buffer_overflow(16, 3);
        let msg = err.to_string();
        assert!(msg.contains("16"));
        assert!(msg.contains("3"));
        assert!(err.is_buffer_error());
        assert!(!err.is_stack_error());
    }

    #[test]
    fn test_stack_errors() {
        assert!(Error::StackOverflow { capacity: 8 }.is_stack_error());
        assert!(Error::StackUnderflow.is_stack_error());
        assert!(Error::InvalidCapacity { given: 0 }.is_stack_error());
    }
}
