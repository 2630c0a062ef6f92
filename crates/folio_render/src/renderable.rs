//! Renderable scene - bridges the scene graph and surfaces to GPU buffers
//!
//! Meshes are uploaded once, the first time their node shows up in a draw
//! list. Every frame only the per-mesh uniforms (world matrix and surface
//! color) are rewritten.

use std::collections::HashMap;

use folio_core::{ColorBroadcast, NodeKey, ParticleField, SceneGraph, SurfaceKey, SurfaceKind};
use folio_math::Mat4;

use crate::pipeline::{GpuMesh, ObjectUniforms, PointUniforms, PointsPipeline, ToonPipeline};

/// One toon mesh to draw this frame
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DrawItem {
    pub node: NodeKey,
    pub world: Mat4,
    pub color: [f32; 4],
}

/// Collect the toon draws for a frame, parents before children.
///
/// Nodes whose surface is missing from `colors` or is not a toon surface are
/// skipped.
pub fn collect_draws(graph: &SceneGraph, colors: &ColorBroadcast) -> Vec<DrawItem> {
    graph
        .render_items()
        .into_iter()
        .filter_map(|item| {
            let surface = colors.get(item.surface)?;
            match surface.kind {
                SurfaceKind::Toon { .. } => Some(DrawItem {
                    node: item.key,
                    world: item.world,
                    color: surface.color.to_rgba(1.0),
                }),
                SurfaceKind::Points { .. } => None,
            }
        })
        .collect()
}

/// Point uniforms for a surface, if it is a points surface
pub fn point_uniforms(colors: &ColorBroadcast, surface: SurfaceKey) -> Option<PointUniforms> {
    let surface = colors.get(surface)?;
    match surface.kind {
        SurfaceKind::Points { size, size_attenuation } => Some(PointUniforms {
            color: surface.color.to_rgba(1.0),
            size,
            size_attenuation: size_attenuation as u32,
            _padding: [0.0; 2],
        }),
        SurfaceKind::Toon { .. } => None,
    }
}

/// GPU-side state of the page
#[derive(Default)]
pub struct RenderableScene {
    meshes: HashMap<NodeKey, GpuMesh>,
    draw_order: Vec<NodeKey>,
    particle_surface: Option<SurfaceKey>,
}

impl RenderableScene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Upload the particle field to the points pipeline
    pub fn set_particles(&mut self, device: &wgpu::Device, points: &mut PointsPipeline, field: &ParticleField) {
        points.upload_points(device, field.positions());
        self.particle_surface = Some(field.surface());
        log::info!("Uploaded {} particles", field.len());
    }

    /// Bring GPU buffers in line with the graph and the current colors
    pub fn sync(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        toon: &ToonPipeline,
        points: &PointsPipeline,
        graph: &SceneGraph,
        colors: &ColorBroadcast,
    ) {
        self.draw_order.clear();
        for draw in collect_draws(graph, colors) {
            let Some(node) = graph.get(draw.node) else { continue };
            let Some(mesh) = node.mesh.as_ref() else { continue };

            let gpu = self.meshes.entry(draw.node).or_insert_with(|| {
                log::debug!("Uploading mesh with {} triangles", mesh.triangle_count());
                toon.upload_mesh(device, mesh)
            });
            gpu.update_uniforms(queue, &ObjectUniforms::new(draw.world, draw.color));
            self.draw_order.push(draw.node);
        }

        if let Some(uniforms) = self.particle_surface.and_then(|s| point_uniforms(colors, s)) {
            points.update_uniforms(queue, &uniforms);
        }
    }

    /// Meshes to draw this frame, in draw order
    pub fn meshes(&self) -> impl Iterator<Item = &GpuMesh> + '_ {
        self.draw_order.iter().filter_map(move |key| self.meshes.get(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_core::{Color, FragmentNode, GradientId, MeshData, ParticleSettings};

    fn triangle() -> MeshData {
        MeshData::new(
            vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
            None,
            None,
        )
    }

    #[test]
    fn test_draws_follow_surface_color() {
        let mut graph = SceneGraph::new();
        let mut colors = ColorBroadcast::new(Color::from_hex("#ffeded").unwrap());
        let fragment = FragmentNode::new("model")
            .with_child(FragmentNode::new("a").with_mesh(triangle()))
            .with_child(FragmentNode::new("b").with_mesh(triangle()));
        graph
            .insert_fragment(graph.root(), fragment, &mut |_| {
                colors.subscribe(SurfaceKind::Toon { gradient: GradientId(0) })
            })
            .unwrap();

        assert_eq!(collect_draws(&graph, &colors).len(), 2);

        colors.set_color(Color::BLACK);
        for draw in collect_draws(&graph, &colors) {
            assert_eq!(draw.color, [0.0, 0.0, 0.0, 1.0]);
        }
    }

    #[test]
    fn test_points_surface_is_not_a_toon_draw() {
        let mut graph = SceneGraph::new();
        let mut colors = ColorBroadcast::default();
        let field = ParticleField::generate(&ParticleSettings::default(), 4.0, 3, &mut colors);
        graph
            .insert_fragment(graph.root(), FragmentNode::new("odd").with_mesh(triangle()), &mut |_| field.surface())
            .unwrap();

        assert!(collect_draws(&graph, &colors).is_empty());
        let uniforms = point_uniforms(&colors, field.surface()).unwrap();
        assert_eq!(uniforms.size, 0.03);
        assert_eq!(uniforms.size_attenuation, 1);
    }
}
