//! Core types for the Scrollfolio scene
//!
//! This crate provides everything the page needs that does not touch the GPU:
//!
//! - [`Color`] - Linear RGB color parsed from sRGB hex strings
//! - [`Transform3D`] - Position, Euler rotation, and scale
//! - [`SceneGraph`] - Arena of nodes under a shared root
//! - [`ColorBroadcast`] - Owner of the material color and every shaded surface
//! - [`ModelFragment`] - A decoded GLTF model, ready to attach to the graph
//! - [`ModelLoader`] / [`LoadBarrier`] - Concurrent all-or-nothing model loading
//! - [`TweenSet`] - Eased relative rotation tweens
//! - [`ParticleField`] - Random point cloud spread over the page

mod color;
mod transform;
mod mesh;
mod model;
mod scene_graph;
mod surface;
mod tween;
mod particles;
pub mod asset_error;
pub mod asset_loader;

pub use color::{Color, ColorParseError};
pub use transform::Transform3D;
pub use mesh::MeshData;
pub use model::{FragmentNode, ModelFragment};
pub use scene_graph::{Node, NodeKey, RenderItem, SceneGraph};
pub use surface::{ColorBroadcast, GradientId, Surface, SurfaceKey, SurfaceKind};
pub use tween::{Ease, RotationTween, TweenSet};
pub use particles::{ParticleField, ParticleSettings};
pub use asset_error::AssetError;
pub use asset_loader::{Asset, BarrierState, LoadBarrier, LoadedAsset, ModelLoadError, ModelLoader, ModelRequest};

// Re-export commonly used types from folio_math for convenience
pub use folio_math::{Euler, Mat4, Vec3};
