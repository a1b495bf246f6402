//! Scalar trait bounds for the generic math types.
//!
//! The gm-rs value types are generic over their component type rather than
//! duplicated per precision. [`Scalar`] is the common contract shared by all
//! supported component types (`f32`, `f64`, `i32`, `i64`); [`FloatScalar`]
//! narrows it to the floating-point pair for operations that need square
//! roots or trigonometry.
//!
//! Both traits are blanket-implemented: any type satisfying the bounds is a
//! scalar, no manual opt-in needed.
//!
//! # Usage
//!
//! ```rust
//! use gm_core::FloatScalar;
//!
//! fn hypot<T: FloatScalar>(a: T, b: T) -> T {
//!     (a * a + b * b).sqrt()
//! }
//!
//! assert_eq!(hypot(3.0f32, 4.0f32), 5.0);
//! ```

use std::fmt;
use std::ops::{AddAssign, DivAssign, MulAssign, RemAssign, SubAssign};

use num_traits::{Float, Num, NumCast};

/// Component types usable in every gm-rs aggregate.
///
/// Covers the arithmetic, comparison and casting surface the componentwise
/// vector operations need. Implemented by `f32`, `f64`, `i32` and `i64`
/// (and any other type meeting the bounds).
pub trait Scalar:
    Copy
    + fmt::Debug
    + fmt::Display
    + Num
    + NumCast
    + PartialOrd
    + AddAssign
    + SubAssign
    + MulAssign
    + DivAssign
    + RemAssign
{
    /// Componentwise minimum of two scalars.
    ///
    /// `PartialOrd`-based so a single definition serves floats and integers.
    #[inline]
    fn min_scalar(self, other: Self) -> Self {
        if other < self { other } else { self }
    }

    /// Componentwise maximum of two scalars.
    #[inline]
    fn max_scalar(self, other: Self) -> Self {
        if other > self { other } else { self }
    }
}

impl<T> Scalar for T where
    T: Copy
        + fmt::Debug
        + fmt::Display
        + Num
        + NumCast
        + PartialOrd
        + AddAssign
        + SubAssign
        + MulAssign
        + DivAssign
        + RemAssign
{
}

/// Floating-point component types.
///
/// Adds the transcendental and rounding operations (via [`num_traits::Float`])
/// that normalization, interpolation and rotation construction require.
/// Implemented by `f32` and `f64`.
pub trait FloatScalar: Scalar + Float {
    /// The value of pi for this precision.
    #[inline]
    fn pi() -> Self {
        Self::from(std::f64::consts::PI).unwrap()
    }

    /// Two times pi for this precision.
    #[inline]
    fn two_pi() -> Self {
        Self::from(2.0 * std::f64::consts::PI).unwrap()
    }

    /// One half, used by the quaternion half-angle constructions.
    #[inline]
    fn half() -> Self {
        Self::from(0.5).unwrap()
    }

    /// Two.
    #[inline]
    fn two() -> Self {
        Self::from(2.0).unwrap()
    }
}

impl<T> FloatScalar for T where T: Scalar + Float {}

#[cfg(test)]
mod tests {
    use super::*;

    fn sum3<T: Scalar>(a: T, b: T, c: T) -> T {
        a + b + c
    }

    #[test]
    fn test_scalar_blanket_covers_all_precisions() {
        assert_eq!(sum3(1.0f32, 2.0, 3.0), 6.0);
        assert_eq!(sum3(1.0f64, 2.0, 3.0), 6.0);
        assert_eq!(sum3(1i32, 2, 3), 6);
        assert_eq!(sum3(1i64, 2, 3), 6);
    }

    #[test]
    fn test_min_max_scalar() {
        assert_eq!(3i32.min_scalar(5), 3);
        assert_eq!(3i32.max_scalar(5), 5);
        assert_eq!((-1.5f64).min_scalar(0.0), -1.5);
    }

    #[test]
    fn test_float_constants() {
        assert!((f32::pi() - std::f32::consts::PI).abs() < 1e-6);
        assert_eq!(f64::two(), 2.0);
        assert_eq!(f64::half(), 0.5);
    }
}
