//! Integration tests for the page flow without a window or GPU
//!
//! Loading result -> composition -> scroll input -> animation.

use folio_core::{
    AssetError, Color, ColorBroadcast, FragmentNode, LoadedAsset, MeshData, ModelFragment,
    ModelLoadError, SceneGraph, SurfaceKind,
};
use folio_input::InputTracker;
use folio_render::Camera;
use scrollfolio::config::AppConfig;
use scrollfolio::scene::{SceneComposer, SectionList};
use scrollfolio::systems::{on_models_loaded, AnimationDriver, ColorPanel, LoadingSystem};
use winit::dpi::PhysicalSize;
use winit::event::MouseScrollDelta;

fn triangle() -> MeshData {
    MeshData::new(
        vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
        None,
        None,
    )
}

fn loaded_models(config: &AppConfig) -> Vec<LoadedAsset<ModelFragment>> {
    config
        .page
        .models
        .iter()
        .map(|request| LoadedAsset {
            request: request.clone(),
            asset: ModelFragment {
                label: request.path.display().to_string(),
                root: FragmentNode::new("root")
                    .with_child(FragmentNode::new("mesh").with_mesh(triangle())),
            },
        })
        .collect()
}

#[test]
fn test_scrolling_to_second_section_spins_it() {
    let config = AppConfig::default();
    let spacing = config.page.section_spacing;
    let mut graph = SceneGraph::new();
    let mut colors = ColorBroadcast::new(config.material.color);
    let mut loading = LoadingSystem::new(config.page.models.len());
    let mut driver = AnimationDriver::new(&config.animation, spacing);

    let sections = on_models_loaded(
        &mut loading,
        Ok(loaded_models(&config)),
        &SceneComposer::new(spacing),
        &mut graph,
        &mut colors,
        &mut driver,
    )
    .unwrap();
    assert_eq!(sections.len(), 3);
    assert_eq!(colors.len(), 3);
    assert!(driver.is_running());

    let mut input = InputTracker::new(PhysicalSize::new(800, 600), 1.0, sections.len())
        .with_line_height(config.page.line_height);
    let mut camera = Camera::new().with_distance(config.camera.distance);

    // 10 lines of 40px = 400px, past the halfway point of the first viewport
    let crossing = input
        .process_mouse_wheel(MouseScrollDelta::LineDelta(0.0, -10.0))
        .unwrap();
    assert_eq!((crossing.from, crossing.to), (0, 1));
    assert!(driver.on_section_crossing(crossing, &sections));

    // Scrolling further inside the same section emits nothing
    assert!(input
        .process_mouse_wheel(MouseScrollDelta::LineDelta(0.0, -1.0))
        .is_none());

    for _ in 0..30 {
        driver.update(0.1, &input, &mut camera, &mut graph, &sections);
    }

    let tweened = graph.get(sections.get(1).unwrap().node).unwrap().transform.rotation;
    let untouched = graph.get(sections.get(0).unwrap().node).unwrap().transform.rotation;
    // Spin for 3s plus the full tween delta
    assert!((tweened.x - (6.0 + 0.3)).abs() < 1e-3);
    assert!((tweened.y - (3.0 + 0.36)).abs() < 1e-3);
    assert!((untouched.x - 0.3).abs() < 1e-3);
    assert_eq!(driver.active_tweens(), 0);

    // 440px of 600px scrolled
    let expected_y = -(440.0 / 600.0) * spacing;
    assert!((camera.local.y - expected_y).abs() < 1e-4);
}

#[test]
fn test_scroll_past_the_end_is_clamped() {
    let mut input = InputTracker::new(PhysicalSize::new(800, 600), 1.0, 3);
    input.process_mouse_wheel(MouseScrollDelta::LineDelta(0.0, -1000.0));
    assert_eq!(input.scroll_offset(), 1200.0);
    assert_eq!(input.section(), 2);

    input.process_mouse_wheel(MouseScrollDelta::LineDelta(0.0, 1000.0));
    assert_eq!(input.scroll_offset(), 0.0);
    assert_eq!(input.section(), 0);
}

#[test]
fn test_failed_batch_never_starts_the_page() {
    let config = AppConfig::default();
    let spacing = config.page.section_spacing;
    let mut graph = SceneGraph::new();
    let mut colors = ColorBroadcast::new(config.material.color);
    let mut loading = LoadingSystem::new(config.page.models.len());
    let mut driver = AnimationDriver::new(&config.animation, spacing);
    let composer = SceneComposer::new(spacing);
    let error = ModelLoadError {
        index: 2,
        path: "assets/models/3.glb".into(),
        source: AssetError::Parse("truncated".to_string()),
    };

    let sections = on_models_loaded(
        &mut loading,
        Err(error),
        &composer,
        &mut graph,
        &mut colors,
        &mut driver,
    );
    assert!(sections.is_none());
    assert!(!driver.is_running());
    assert_eq!(graph.node_count(), 1);

    // A late success after the failure is ignored too
    let late = on_models_loaded(
        &mut loading,
        Ok(loaded_models(&config)),
        &composer,
        &mut graph,
        &mut colors,
        &mut driver,
    );
    assert!(late.is_none());
    assert!(!driver.is_running());

    // Scrolling on the idle page animates nothing
    let mut input = InputTracker::new(PhysicalSize::new(800, 600), 1.0, 3);
    let mut camera = Camera::new();
    input.scroll_to(600.0);
    let sections = SectionList::new();
    assert!(!driver.update(0.1, &input, &mut camera, &mut graph, &sections));
    assert_eq!(camera.local.y, 0.0);
}

#[test]
fn test_color_change_reaches_models_and_particles() {
    let config = AppConfig::default();
    let mut graph = SceneGraph::new();
    let mut panel = ColorPanel::new(config.color_palette());
    let mut colors = ColorBroadcast::new(panel.current());

    let particles = folio_core::ParticleField::generate(
        &config.particles,
        config.page.section_spacing,
        config.page.models.len(),
        &mut colors,
    );
    SceneComposer::new(config.page.section_spacing).compose(
        loaded_models(&config),
        &mut graph,
        &mut colors,
    );

    let next = panel.cycle(&mut colors);
    assert_ne!(next, config.material.color);
    assert_eq!(colors.get(particles.surface()).unwrap().color, next);
    let toon_colors: Vec<Color> = colors
        .iter()
        .filter(|(_, s)| matches!(s.kind, SurfaceKind::Toon { .. }))
        .map(|(_, s)| s.color)
        .collect();
    assert_eq!(toon_colors, vec![next; 3]);
}

#[test]
fn test_unknown_section_is_ignored_before_loading() {
    let config = AppConfig::default();
    let mut driver = AnimationDriver::new(&config.animation, config.page.section_spacing);
    let sections = SectionList::new();
    let mut input = InputTracker::new(PhysicalSize::new(800, 600), 1.0, 3);

    let crossing = input.scroll_to(600.0).unwrap();
    assert!(!driver.on_section_crossing(crossing, &sections));
    assert_eq!(driver.active_tweens(), 0);
}
