//! Rendering pipeline components
//!
//! Toon-shaded meshes and square particles, drawn in one pass over a shared
//! depth buffer.

pub mod types;
pub mod frame;
pub mod toon_pipeline;
pub mod points_pipeline;

// Re-export types
pub use types::{FrameUniforms, MeshVertex, ObjectUniforms, PointInstance, PointUniforms};

// Re-export pipelines
pub use frame::FrameBindings;
pub use toon_pipeline::{GpuMesh, ToonPipeline};
pub use points_pipeline::PointsPipeline;
