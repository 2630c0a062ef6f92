//! Page Rendering Library
//!
//! This crate provides the wgpu-based rendering for the scroll page:
//! toon-shaded models and a square-particle field under one directional light.
//!
//! ## Key Components
//!
//! - [`context::RenderContext`] - WGPU device, queue, surface, and depth buffer
//! - [`camera::Camera`] - Perspective camera inside a parallax rig
//! - [`gradient::GradientMap`] - Toon light bands, loaded from an image
//! - [`pipeline::ToonPipeline`] - Banded diffuse shading for model meshes
//! - [`pipeline::PointsPipeline`] - Screen-facing particle squares
//! - [`renderable::RenderableScene`] - Converts the scene graph to GPU buffers

pub mod context;
pub mod camera;
pub mod gradient;
pub mod pipeline;
pub mod renderable;

pub use camera::Camera;
pub use context::{ContextError, RenderContext};
pub use gradient::{GradientError, GradientMap};
pub use renderable::{collect_draws, DrawItem, RenderableScene};
