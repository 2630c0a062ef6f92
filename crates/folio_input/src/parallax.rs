//! Cursor parallax for the camera rig
//!
//! The rig eases toward a target derived from the cursor. Each frame closes
//! `damping * dt` of the remaining distance, capped at the whole distance so
//! a long frame lands on the target instead of overshooting it.

/// Smoothly moves a camera rig toward the cursor
pub struct ParallaxController {
    /// Fraction of the remaining distance closed per second
    pub damping: f32,
    /// Rig offset at the edge of the window
    pub amplitude: f32,
}

impl Default for ParallaxController {
    fn default() -> Self {
        Self::new()
    }
}

impl ParallaxController {
    pub fn new() -> Self {
        Self {
            damping: 5.0,
            amplitude: 0.5,
        }
    }

    /// Rig target for a normalized cursor. Screen y grows downward, world y up.
    pub fn target(&self, cursor: (f32, f32)) -> (f32, f32) {
        (cursor.0 * self.amplitude, -cursor.1 * self.amplitude)
    }

    /// Move the rig one step toward the cursor target
    pub fn update<R: RigControl>(&self, rig: &mut R, cursor: (f32, f32), dt: f32) -> (f32, f32) {
        let (tx, ty) = self.target(cursor);
        let (x, y) = rig.rig_offset();
        let factor = (self.damping * dt.max(0.0)).min(1.0);
        let next = (x + (tx - x) * factor, y + (ty - y) * factor);
        rig.set_rig_offset(next.0, next.1);
        next
    }

    /// Builder: set damping rate
    pub fn with_damping(mut self, damping: f32) -> Self {
        self.damping = damping;
        self
    }

    /// Builder: set parallax amplitude
    pub fn with_amplitude(mut self, amplitude: f32) -> Self {
        self.amplitude = amplitude;
        self
    }
}

/// Trait for the camera rig
/// Allows the controller to drive any camera that sits inside a rig
pub trait RigControl {
    fn rig_offset(&self) -> (f32, f32);
    fn set_rig_offset(&mut self, x: f32, y: f32);
    /// Vertical camera position inside the rig, following the page scroll
    fn set_scroll_y(&mut self, y: f32);
}
