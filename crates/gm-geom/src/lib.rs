//! # gm-geom
//!
//! Intersection and containment predicates built on `gm-math`:
//!
//! - [`FrustumCuller`] - six-plane frustum tests against points, spheres and
//!   axis-aligned boxes, with plane identification and masking
//! - [`RayAab`] - ray versus axis-aligned box slab test with precomputed
//!   reciprocals
//! - [`PolygonsPoint`] - point-in-polygon(s) test over a flattened vertex
//!   buffer, holes included
//!
//! Each predicate is a small value object: construct it from the geometry
//! that stays fixed (the view-projection matrix, the ray, the polygon set)
//! and query it many times.
//!
//! # Usage
//!
//! ```rust
//! use gm_geom::FrustumCuller;
//! use gm_math::{Mat4f, Vec3f};
//!
//! let culler = FrustumCuller::from_matrix(&Mat4f::ortho(-1.0, 1.0, -1.0, 1.0, -1.0, 1.0));
//! assert!(culler.test_sphere(Vec3f::new(1.0, 0.0, 0.0), 0.1));
//! assert!(!culler.test_sphere(Vec3f::new(1.2, 0.0, 0.0), 0.1));
//! ```
//!
//! # Dependencies
//!
//! - [`gm_math`] - vector and matrix types
//! - [`gm_core`] - scalar traits

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod frustum;
mod polygon;
mod ray_aab;

pub use frustum::*;
pub use polygon::*;
pub use ray_aab::*;
