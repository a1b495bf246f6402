//! # gm-core
//!
//! Core building blocks for the gm-rs math workspace.
//!
//! This crate provides the pieces every other gm-rs crate builds on:
//!
//! - [`Scalar`] / [`FloatScalar`] - numeric trait bounds for the generic
//!   vector and matrix types
//! - [`angle`] - degree/radian conversion and small trig helpers
//! - [`Error`] / [`Result`] - the unified error taxonomy
//! - [`Buffer`] - a position-tracked linear buffer for graphics-API interop
//!
//! # Design
//!
//! All higher-level types (vectors, matrices, quaternions) are generic over a
//! scalar parameter instead of being hand-duplicated per precision. The two
//! traits here split the contract: [`Scalar`] is what integer components can
//! satisfy, [`FloatScalar`] adds the transcendental operations rotation and
//! normalization need.
//!
//! # Dependencies
//!
//! - [`num_traits`] - numeric trait building blocks
//! - [`thiserror`] - derive macro error implementation
//!
//! # Used By
//!
//! - `gm-math` - vectors, matrices, quaternions, matrix stack
//! - `gm-geom` - intersection predicates

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod buffer;
mod error;
mod scalar;
pub mod angle;

pub use buffer::*;
pub use error::*;
pub use scalar::*;
