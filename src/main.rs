//! Scrollfolio - scroll-driven 3D portfolio page
//!
//! Three toon-shaded models sit down a virtual page. Scrolling moves the
//! camera between them, the cursor adds parallax, and each section spins into
//! view with a rotation tween.

use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop, EventLoopProxy},
    keyboard::PhysicalKey,
    window::WindowId,
};

use folio_core::{ColorBroadcast, GradientId, ParticleField, SceneGraph};
use folio_input::{InputTracker, SectionCrossing};
use folio_render::{Camera, GradientMap};

use scrollfolio::config::AppConfig;
use scrollfolio::input::{InputAction, InputMapper};
use scrollfolio::scene::{SceneComposer, SectionList};
use scrollfolio::systems::{
    on_models_loaded, AnimationDriver, AppEvent, ColorPanel, FrameClock, LoadingSystem,
    RenderError, RenderSystem, WindowSystem,
};

/// Main application state
struct App {
    /// Application configuration
    config: AppConfig,
    proxy: EventLoopProxy<AppEvent>,
    window: Option<WindowSystem>,
    renderer: Option<RenderSystem>,
    loading: Option<LoadingSystem>,
    /// Created with the window, since it needs the viewport size
    input: Option<InputTracker>,
    graph: SceneGraph,
    colors: ColorBroadcast,
    sections: SectionList,
    camera: Camera,
    driver: AnimationDriver,
    clock: FrameClock,
    panel: ColorPanel,
}

impl App {
    fn new(proxy: EventLoopProxy<AppEvent>) -> Self {
        // Load configuration
        let config = AppConfig::load().unwrap_or_else(|e| {
            log::warn!("Failed to load config: {}. Using defaults.", e);
            AppConfig::default()
        });

        let camera = Camera::new()
            .with_distance(config.camera.distance)
            .with_projection(config.camera.fov, config.camera.near, config.camera.far);
        let driver = AnimationDriver::new(&config.animation, config.page.section_spacing);
        let clock = FrameClock::new(config.animation.max_frame_delta);
        let panel = ColorPanel::new(config.color_palette());

        Self {
            colors: ColorBroadcast::new(panel.current()),
            config,
            proxy,
            window: None,
            renderer: None,
            loading: None,
            input: None,
            graph: SceneGraph::new(),
            sections: SectionList::new(),
            camera,
            driver,
            clock,
            panel,
        }
    }

    /// Start the section tween for a crossing, if any
    fn handle_crossing(&mut self, crossing: Option<SectionCrossing>) {
        if let Some(crossing) = crossing {
            self.driver.on_section_crossing(crossing, &self.sections);
        }
    }

    fn handle_action(&mut self, event_loop: &ActiveEventLoop, action: InputAction) {
        match action {
            InputAction::Exit => event_loop.exit(),
            InputAction::ToggleFullscreen => {
                if let Some(window) = &self.window {
                    window.toggle_fullscreen();
                }
            }
            InputAction::CycleColor => {
                self.panel.cycle(&mut self.colors);
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
        }
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let dt = self.clock.tick();
        let (Some(window), Some(renderer), Some(input)) =
            (&self.window, &mut self.renderer, &self.input)
        else {
            return;
        };

        let running = self.driver.update(
            dt,
            input,
            &mut self.camera,
            &mut self.graph,
            &self.sections,
        );

        let result = if running {
            renderer.render_frame(&self.camera, &self.graph, &self.colors)
        } else {
            // Nothing to animate yet: keep the window showing the background
            renderer.clear_frame()
        };

        match result {
            Ok(()) => {}
            Err(RenderError::SurfaceLost) => {
                renderer.recover();
                window.request_redraw();
                return;
            }
            Err(RenderError::OutOfMemory) => {
                log::error!("GPU out of memory, exiting");
                event_loop.exit();
                return;
            }
            Err(e) => {
                log::warn!("{}", e);
            }
        }

        if running {
            if self.config.debug.title_stats {
                window.update_title(input.section(), input.section_count(), input.scroll_fraction());
            }
            // Request next frame
            window.request_redraw();
        }
    }
}

impl ApplicationHandler<AppEvent> for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window = match WindowSystem::create(event_loop, &self.config.window) {
            Ok(window) => window,
            Err(e) => {
                log::error!("{}", e);
                event_loop.exit();
                return;
            }
        };

        let gradient = GradientMap::load_or_default(&self.config.page.gradient_map);
        let mut renderer = match RenderSystem::new(
            window.window().clone(),
            self.config.rendering.clone(),
            &gradient,
            self.config.window.vsync,
        ) {
            Ok(renderer) => renderer,
            Err(e) => {
                log::error!("{}", e);
                event_loop.exit();
                return;
            }
        };

        let models = &self.config.page.models;
        let particles = ParticleField::generate(
            &self.config.particles,
            self.config.page.section_spacing,
            models.len(),
            &mut self.colors,
        );
        renderer.upload_particles(&particles);

        let native = window.window();
        self.input = Some(
            InputTracker::new(native.inner_size(), native.scale_factor(), models.len())
                .with_line_height(self.config.page.line_height),
        );

        // Loading starts once there is somewhere to show the result
        match LoadingSystem::spawn(models.clone(), self.proxy.clone()) {
            Ok(loading) => self.loading = Some(loading),
            Err(e) => log::error!("Failed to start model loader: {}", e),
        }

        window.request_redraw();
        self.window = Some(window);
        self.renderer = Some(renderer);
    }

    fn user_event(&mut self, _event_loop: &ActiveEventLoop, event: AppEvent) {
        match event {
            AppEvent::ModelsLoaded(result) => {
                let Some(loading) = self.loading.as_mut() else {
                    return;
                };
                let composer = SceneComposer::new(self.config.page.section_spacing)
                    .with_gradient(GradientId(0));
                let Some(sections) = on_models_loaded(
                    loading,
                    result,
                    &composer,
                    &mut self.graph,
                    &mut self.colors,
                    &mut self.driver,
                ) else {
                    return;
                };

                self.sections = sections;
                self.clock.reset();
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }

            WindowEvent::Resized(physical_size) => {
                if let Some(renderer) = &mut self.renderer {
                    renderer.resize(physical_size);
                }
                let scale_factor = self.window.as_ref().map(|w| w.window().scale_factor());
                let crossing = match (&mut self.input, scale_factor) {
                    (Some(input), Some(scale_factor)) => input.resize(physical_size, scale_factor),
                    _ => None,
                };
                self.handle_crossing(crossing);
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }

            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                let size = self.window.as_ref().map(|w| w.window().inner_size());
                let crossing = match (&mut self.input, size) {
                    (Some(input), Some(size)) => input.resize(size, scale_factor),
                    _ => None,
                };
                self.handle_crossing(crossing);
            }

            WindowEvent::CursorMoved { position, .. } => {
                if let Some(input) = &mut self.input {
                    input.process_cursor_moved(position);
                }
            }

            WindowEvent::MouseWheel { delta, .. } => {
                let crossing = self
                    .input
                    .as_mut()
                    .and_then(|input| input.process_mouse_wheel(delta));
                self.handle_crossing(crossing);
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(key) = event.physical_key {
                    if let Some(action) = InputMapper::map_keyboard(key, event.state) {
                        self.handle_action(event_loop, action);
                    }
                }
            }

            WindowEvent::RedrawRequested => {
                self.redraw(event_loop);
            }

            _ => {}
        }
    }
}

fn main() {
    // Initialize logging
    env_logger::init();
    log::info!("Starting Scrollfolio");

    // Create event loop
    let event_loop = EventLoop::<AppEvent>::with_user_event()
        .build()
        .expect("Failed to create event loop");
    event_loop.set_control_flow(ControlFlow::Wait);

    // Create and run application
    let mut app = App::new(event_loop.create_proxy());
    event_loop.run_app(&mut app).expect("Event loop error");
}
