//! # gm-math
//!
//! Vectors, matrices, quaternions, axis-angle rotations and a legacy-GL
//! matrix stack for graphics and geometry code.
//!
//! Every type is a flat `#[repr(C)]` aggregate of scalar fields, generic over
//! the component type via [`gm_core::Scalar`]/[`gm_core::FloatScalar`], with
//! fixed aliases covering the usual precisions:
//!
//! - [`Vec2`]/[`Vec3`]/[`Vec4`] with `f`/`d`/`i`/`l` aliases
//! - [`Mat3`], [`Mat4`] and the affine [`Mat4x3`] with `f`/`d` aliases
//! - [`Quat`] and [`AxisAngle`]
//! - [`MatrixStack`] - fixed-depth transform stack
//!
//! # Design
//!
//! All matrix storage is **column-major** and all angles are **radians**.
//! Operations take operands by value and return fresh values; the `*Assign`
//! operators and the matrix-stack appliers cover in-place mutation. Since
//! operands are `Copy`, every operation is alias-safe.
//!
//! Numerical degeneracy is surfaced, not panicked on: [`Mat4::invert`]
//! returns `Option`, [`Vec3::normalize`] propagates non-finite components
//! (use [`Vec3::normalize_or_zero`] for the defensive variant).
//!
//! # Usage
//!
//! ```rust
//! use gm_math::{Mat4f, Quatf, Vec3f};
//!
//! let view = Mat4f::look_at(
//!     Vec3f::new(0.0, 2.0, 5.0),
//!     Vec3f::zero(),
//!     Vec3f::new(0.0, 1.0, 0.0),
//! );
//! let proj = Mat4f::perspective(std::f32::consts::FRAC_PI_3, 16.0 / 9.0, 0.1, 100.0);
//! let view_proj = proj * view;
//!
//! let spin = Quatf::from_axis_angle(std::f32::consts::FRAC_PI_2, Vec3f::new(0.0, 1.0, 0.0));
//! let rotated = spin.transform(Vec3f::new(1.0, 0.0, 0.0));
//! # let _ = (view_proj, rotated);
//! ```
//!
//! # Dependencies
//!
//! - [`gm_core`] - scalar traits, errors, buffers
//! - [`glam`] - interop conversions on the f32 aliases
//! - [`approx`] - approximate-equality trait impls
//!
//! # Used By
//!
//! - `gm-geom` - frustum/ray/polygon predicates

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod axis_angle;
mod mat3;
mod mat4;
mod mat4x3;
mod quat;
mod stack;
mod vec2;
mod vec3;
mod vec4;

pub use axis_angle::*;
pub use mat3::*;
pub use mat4::*;
pub use mat4x3::*;
pub use quat::*;
pub use stack::*;
pub use vec2::*;
pub use vec3::*;
pub use vec4::*;

/// Re-export glam types for direct use
pub mod glam {
    pub use ::glam::{Mat3 as GlamMat3, Mat4 as GlamMat4, Quat as GlamQuat};
    pub use ::glam::{Vec2 as GlamVec2, Vec3 as GlamVec3, Vec4 as GlamVec4};
}
