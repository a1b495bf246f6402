//! Angle conversion and small scalar helpers.
//!
//! Every gm-rs API takes angles in **radians**. These helpers cover callers
//! holding degrees, plus the cotangent used by projection construction and
//! the scalar interpolation family.
//!
//! # Usage
//!
//! ```rust
//! use gm_core::angle::{deg_to_rad, rad_to_deg};
//!
//! let r = deg_to_rad(180.0f32);
//! assert!((r - std::f32::consts::PI).abs() < 1e-6);
//! assert!((rad_to_deg(r) - 180.0).abs() < 1e-4);
//! ```

use crate::FloatScalar;

/// Converts an angle in degrees to radians.
#[inline]
pub fn deg_to_rad<T: FloatScalar>(deg: T) -> T {
    deg * T::pi() / T::from(180.0).unwrap()
}

/// Converts an angle in radians to degrees.
#[inline]
pub fn rad_to_deg<T: FloatScalar>(rad: T) -> T {
    rad * T::from(180.0).unwrap() / T::pi()
}

/// Cotangent of `rad`.
///
/// Computed as `cos/sin`; undefined (non-finite) at multiples of pi.
#[inline]
pub fn cot<T: FloatScalar>(rad: T) -> T {
    rad.cos() / rad.sin()
}

/// Linear interpolation between two values.
///
/// Returns `a` when `t = 0`, `b` when `t = 1`; extrapolates outside `[0, 1]`.
///
/// # Example
///
/// ```rust
/// use gm_core::angle::lerp;
///
/// assert_eq!(lerp(0.0, 10.0, 0.5), 5.0);
/// ```
#[inline]
pub fn lerp<T: FloatScalar>(a: T, b: T, t: T) -> T {
    a + (b - a) * t
}

/// Inverse linear interpolation.
///
/// Given a value between `a` and `b`, returns the corresponding `t`.
/// Returns zero when the range is degenerate.
#[inline]
pub fn inverse_lerp<T: FloatScalar>(a: T, b: T, value: T) -> T {
    if (b - a).abs() < T::from(1e-10).unwrap() {
        T::zero()
    } else {
        (value - a) / (b - a)
    }
}

/// Clamps `value` to the range `[min, max]`.
#[inline]
pub fn clamp<T: FloatScalar>(value: T, min: T, max: T) -> T {
    value.max(min).min(max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_deg_rad_round_trip() {
        assert_relative_eq!(deg_to_rad(90.0f64), std::f64::consts::FRAC_PI_2);
        assert_relative_eq!(rad_to_deg(deg_to_rad(37.5f64)), 37.5, epsilon = 1e-12);
    }

    #[test]
    fn test_cot() {
        assert_relative_eq!(cot(std::f64::consts::FRAC_PI_4), 1.0, epsilon = 1e-12);
        assert_relative_eq!(cot(std::f64::consts::FRAC_PI_2), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_lerp_endpoints() {
        assert_eq!(lerp(2.0, 8.0, 0.0), 2.0);
        assert_eq!(lerp(2.0, 8.0, 1.0), 8.0);
    }

    #[test]
    fn test_inverse_lerp_degenerate() {
        assert_eq!(inverse_lerp(3.0, 3.0, 5.0), 0.0);
        assert_eq!(inverse_lerp(0.0, 10.0, 5.0), 0.5);
    }

    #[test]
    fn test_clamp() {
        assert_eq!(clamp(-0.5, 0.0, 1.0), 0.0);
        assert_eq!(clamp(0.25, 0.0, 1.0), 0.25);
        assert_eq!(clamp(2.0, 0.0, 1.0), 1.0);
    }
}
