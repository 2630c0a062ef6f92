//! Animation system
//!
//! Drives everything that moves on the page once the models are in place:
//! - Camera scroll and cursor parallax
//! - Continuous spin of every section
//! - Rotation tweens started by section changes

use std::time::Instant;

use folio_core::{Euler, RotationTween, SceneGraph, TweenSet};
use folio_input::{InputTracker, ParallaxController, RigControl, SectionCrossing};

use crate::config::{AnimationConfig, TweenConfig};
use crate::scene::SectionList;

/// Lifecycle of the page animation
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DriverState {
    /// Models are still loading (or failed to); frames do nothing
    Idle,
    /// Sections exist and animate every frame
    Running,
}

/// Monotonic frame timer with a capped step
pub struct FrameClock {
    last_frame: Instant,
    max_delta: f32,
}

impl FrameClock {
    pub fn new(max_delta: f32) -> Self {
        Self {
            last_frame: Instant::now(),
            max_delta,
        }
    }

    /// Restart timing from now
    pub fn reset(&mut self) {
        self.last_frame = Instant::now();
    }

    /// Seconds since the previous tick, capped
    pub fn tick(&mut self) -> f32 {
        let now = Instant::now();
        let raw_dt = (now - self.last_frame).as_secs_f32();
        self.last_frame = now;
        self.clamp(raw_dt)
    }

    /// Cap a raw step so a stalled frame does not jump the animation
    pub fn clamp(&self, raw_dt: f32) -> f32 {
        raw_dt.clamp(0.0, self.max_delta)
    }
}

/// Idle/Running state machine plus the per-frame page update
pub struct AnimationDriver {
    state: DriverState,
    parallax: ParallaxController,
    tweens: TweenSet,
    /// Radians per second around X and Y
    spin: Euler,
    section_tween: TweenConfig,
    section_spacing: f32,
}

impl AnimationDriver {
    /// Create an idle driver
    pub fn new(config: &AnimationConfig, section_spacing: f32) -> Self {
        Self {
            state: DriverState::Idle,
            parallax: ParallaxController::new()
                .with_damping(config.parallax_damping)
                .with_amplitude(config.parallax_amplitude),
            tweens: TweenSet::new(),
            spin: Euler::new(config.spin_x, config.spin_y, 0.0),
            section_tween: config.section_tween.clone(),
            section_spacing,
        }
    }

    pub fn state(&self) -> DriverState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == DriverState::Running
    }

    /// Switch to Running. Returns false if already running.
    pub fn start(&mut self) -> bool {
        if self.state == DriverState::Running {
            return false;
        }
        self.state = DriverState::Running;
        log::info!("Animation started");
        true
    }

    /// Number of rotation tweens in flight
    pub fn active_tweens(&self) -> usize {
        self.tweens.active()
    }

    /// Start the section tween on the section scrolled into view.
    ///
    /// Returns whether a tween was started; sections that do not exist (yet)
    /// are skipped.
    pub fn on_section_crossing(&mut self, crossing: SectionCrossing, sections: &SectionList) -> bool {
        let Some(section) = sections.get(crossing.to) else {
            log::debug!(
                "No section {} to animate ({} loaded)",
                crossing.to,
                sections.len()
            );
            return false;
        };
        let [x, y, z] = self.section_tween.rotation;
        self.tweens.start(RotationTween::new(
            section.node,
            Euler::new(x, y, z),
            self.section_tween.duration,
            self.section_tween.ease,
        ));
        log::debug!("Section {} tween started", section.index);
        true
    }

    /// Advance one frame. Returns false while idle, in which case nothing
    /// was touched and nothing should be rendered.
    pub fn update<R: RigControl>(
        &mut self,
        dt: f32,
        input: &InputTracker,
        rig: &mut R,
        graph: &mut SceneGraph,
        sections: &SectionList,
    ) -> bool {
        if self.state == DriverState::Idle {
            return false;
        }

        rig.set_scroll_y(-input.scroll_fraction() * self.section_spacing);
        self.parallax.update(rig, input.cursor(), dt);

        let spin = self.spin.scaled(dt);
        for section in sections.iter() {
            if let Some(node) = graph.get_mut(section.node) {
                node.transform.rotate(spin);
            }
        }

        let finished = self.tweens.advance(dt, graph);
        if finished > 0 {
            log::trace!("{} tweens finished", finished);
        }
        true
    }
}
