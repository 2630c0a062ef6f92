//! GPU rendering system
//!
//! Manages GPU rendering including:
//! - Render context, surface, and depth buffer
//! - Toon and points pipelines
//! - Frame rendering (or a bare clear while the page is loading)

use std::sync::Arc;

use folio_core::{Color, ColorBroadcast, ParticleField, SceneGraph, Vec3};
use folio_render::{
    context::{ContextError, RenderContext},
    pipeline::{FrameBindings, FrameUniforms, PointsPipeline, ToonPipeline},
    Camera, GradientMap, RenderableScene,
};
use winit::{dpi::PhysicalSize, window::Window};

use crate::config::RenderingConfig;

/// Render error types
#[derive(Debug)]
pub enum RenderError {
    /// GPU setup failed
    Context(ContextError),
    /// Surface was lost or went stale (window resized, minimized, etc.)
    SurfaceLost,
    /// GPU out of memory
    OutOfMemory,
    /// Other surface error
    Other(String),
}

impl std::fmt::Display for RenderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RenderError::Context(e) => write!(f, "{}", e),
            RenderError::SurfaceLost => write!(f, "Surface lost"),
            RenderError::OutOfMemory => write!(f, "Out of memory"),
            RenderError::Other(msg) => write!(f, "Render error: {}", msg),
        }
    }
}

impl std::error::Error for RenderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RenderError::Context(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ContextError> for RenderError {
    fn from(e: ContextError) -> Self {
        RenderError::Context(e)
    }
}

/// Convert a linear config color to a wgpu clear color
pub fn clear_color(color: Color) -> wgpu::Color {
    wgpu::Color {
        r: color.r as f64,
        g: color.g as f64,
        b: color.b as f64,
        a: 1.0,
    }
}

/// Frame uniforms for the current camera and window
pub fn frame_uniforms(
    camera: &Camera,
    size: PhysicalSize<u32>,
    rendering: &RenderingConfig,
) -> FrameUniforms {
    let aspect = size.width as f32 / size.height.max(1) as f32;
    let [lx, ly, lz] = rendering.light_position;
    let light = Vec3::new(lx, ly, lz).normalized();
    let [r, g, b, _] = rendering.light_color.to_rgba(1.0);

    FrameUniforms {
        view_matrix: camera.view_matrix(),
        projection_matrix: camera.projection_matrix(aspect),
        light_dir: [light.x, light.y, light.z, 0.0],
        light_color: [r, g, b, rendering.light_intensity],
        viewport: [size.width as f32, size.height as f32, 0.0, 0.0],
    }
}

/// Manages GPU rendering
pub struct RenderSystem {
    context: RenderContext,
    frame: FrameBindings,
    toon: ToonPipeline,
    points: PointsPipeline,
    scene: RenderableScene,
    rendering: RenderingConfig,
    clear_color: wgpu::Color,
}

impl RenderSystem {
    /// Create render system from window and config
    pub fn new(
        window: Arc<Window>,
        rendering: RenderingConfig,
        gradient: &GradientMap,
        vsync: bool,
    ) -> Result<Self, RenderError> {
        let context = pollster::block_on(RenderContext::with_vsync(window, vsync))?;

        let frame = FrameBindings::new(&context.device);
        let toon = ToonPipeline::new(
            &context.device,
            &context.queue,
            context.config.format,
            &frame,
            gradient,
        );
        let points = PointsPipeline::new(&context.device, context.config.format, &frame);

        Ok(Self {
            clear_color: clear_color(rendering.background_color),
            context,
            frame,
            toon,
            points,
            scene: RenderableScene::new(),
            rendering,
        })
    }

    /// Handle window resize
    pub fn resize(&mut self, size: PhysicalSize<u32>) {
        self.context.resize(size);
    }

    /// Reconfigure the surface after it was lost
    pub fn recover(&mut self) {
        self.context.reconfigure();
    }

    /// Upload the particle field
    pub fn upload_particles(&mut self, field: &ParticleField) {
        self.scene
            .set_particles(&self.context.device, &mut self.points, field);
    }

    /// Render the page: particles and every toon mesh in the graph
    pub fn render_frame(
        &mut self,
        camera: &Camera,
        graph: &SceneGraph,
        colors: &ColorBroadcast,
    ) -> Result<(), RenderError> {
        self.scene.sync(
            &self.context.device,
            &self.context.queue,
            &self.toon,
            &self.points,
            graph,
            colors,
        );
        self.frame.update(
            &self.context.queue,
            &frame_uniforms(camera, self.context.size, &self.rendering),
        );

        let output = self.acquire()?;
        let view = output.texture.create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .context
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        {
            let mut pass = self.begin_pass(&mut encoder, &view);
            self.toon.draw(&mut pass, &self.frame, self.scene.meshes());
            self.points.draw(&mut pass, &self.frame);
        }

        self.context.queue.submit(std::iter::once(encoder.finish()));
        output.present();
        Ok(())
    }

    /// Present a frame holding only the background color
    pub fn clear_frame(&mut self) -> Result<(), RenderError> {
        let output = self.acquire()?;
        let view = output.texture.create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .context
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Clear Encoder"),
            });
        drop(self.begin_pass(&mut encoder, &view));

        self.context.queue.submit(std::iter::once(encoder.finish()));
        output.present();
        Ok(())
    }

    fn acquire(&self) -> Result<wgpu::SurfaceTexture, RenderError> {
        match self.context.surface.get_current_texture() {
            Ok(output) => Ok(output),
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => Err(RenderError::SurfaceLost),
            Err(wgpu::SurfaceError::OutOfMemory) => Err(RenderError::OutOfMemory),
            Err(e) => Err(RenderError::Other(format!("{:?}", e))),
        }
    }

    fn begin_pass<'e>(
        &self,
        encoder: &'e mut wgpu::CommandEncoder,
        view: &wgpu::TextureView,
    ) -> wgpu::RenderPass<'e> {
        encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Page Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(self.clear_color),
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: self.context.depth_view(),
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(1.0),
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            timestamp_writes: None,
            occlusion_query_set: None,
        })
    }
}
