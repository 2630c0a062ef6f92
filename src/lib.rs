//! Scrollfolio - a scroll-driven 3D portfolio page
//!
//! The binary wires these modules to a winit event loop. They are exposed as a
//! library so the page logic can be exercised without a window or a GPU.

pub mod config;
pub mod input;
pub mod scene;
pub mod systems;
