//! 3D Mathematics Library
//!
//! This crate provides the small set of 3D types the Scrollfolio scene needs.
//!
//! ## Core Types
//!
//! - [`Vec3`] - 3D vector with x, y, z components
//! - [`Euler`] - Rotation as XYZ-ordered Euler angles (radians)
//! - [`Mat4`] - Column-major 4x4 matrix for transformations

mod vec3;
mod euler;
pub mod mat4;

pub use vec3::Vec3;
pub use euler::Euler;
pub use mat4::Mat4;
