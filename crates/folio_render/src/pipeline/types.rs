//! GPU-compatible data types for the page pipelines
//!
//! These types are designed to match the shader layouts exactly.
//! All types derive Pod and Zeroable for safe GPU buffer operations.

use bytemuck::{Pod, Zeroable};
use folio_math::{mat4, Mat4};

/// A mesh vertex
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

/// One particle, drawn as an instanced screen-facing square
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct PointInstance {
    pub center: [f32; 3],
}

/// Per-frame uniforms shared by every pipeline
/// Layout: 176 bytes (must match `Frame` in the shaders)
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct FrameUniforms {
    pub view_matrix: Mat4,
    pub projection_matrix: Mat4,
    /// Direction toward the light (normalized) + padding
    pub light_dir: [f32; 4],
    /// Light color (rgb) and intensity (w)
    pub light_color: [f32; 4],
    /// Viewport size in physical pixels (xy) + padding
    pub viewport: [f32; 4],
}

impl Default for FrameUniforms {
    fn default() -> Self {
        Self {
            view_matrix: mat4::IDENTITY,
            projection_matrix: mat4::IDENTITY,
            light_dir: [std::f32::consts::FRAC_1_SQRT_2, std::f32::consts::FRAC_1_SQRT_2, 0.0, 0.0],
            light_color: [1.0, 1.0, 1.0, 1.0],
            viewport: [1.0, 1.0, 0.0, 0.0],
        }
    }
}

/// Per-mesh uniforms for the toon pipeline
/// Layout: 144 bytes (must match `Object` in toon.wgsl)
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct ObjectUniforms {
    pub model_matrix: Mat4,
    pub normal_matrix: Mat4,
    pub color: [f32; 4],
}

impl ObjectUniforms {
    pub fn new(model_matrix: Mat4, color: [f32; 4]) -> Self {
        Self {
            model_matrix,
            normal_matrix: mat4::normal_matrix(model_matrix),
            color,
        }
    }
}

/// Uniforms for the points pipeline
/// Layout: 32 bytes (must match `Points` in points.wgsl)
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct PointUniforms {
    pub color: [f32; 4],
    /// World-space size (attenuated) or pixel size
    pub size: f32,
    /// Non-zero to shrink points with distance
    pub size_attenuation: u32,
    pub _padding: [f32; 2],
}
