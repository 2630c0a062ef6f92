//! Page camera inside a parallax rig
//!
//! The rig only translates in X/Y following the cursor. The camera sits at a
//! local offset inside the rig: its Y follows the page scroll and its Z is the
//! fixed viewing distance. The camera never rotates.

use folio_input::RigControl;
use folio_math::{mat4, Mat4, Vec3};

/// Perspective camera parented to a translating rig
pub struct Camera {
    /// Rig translation (parallax)
    pub rig: Vec3,
    /// Camera position relative to the rig
    pub local: Vec3,
    /// Vertical field of view in degrees
    pub fov: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}

impl Camera {
    pub fn new() -> Self {
        Self {
            rig: Vec3::ZERO,
            local: Vec3::new(0.0, 0.0, 6.0),
            fov: 35.0,
            near: 0.1,
            far: 100.0,
        }
    }

    /// Builder: set the viewing distance
    pub fn with_distance(mut self, distance: f32) -> Self {
        self.local.z = distance;
        self
    }

    /// Builder: set projection parameters
    pub fn with_projection(mut self, fov: f32, near: f32, far: f32) -> Self {
        self.fov = fov;
        self.near = near;
        self.far = far;
        self
    }

    /// World-space eye position
    pub fn eye(&self) -> Vec3 {
        self.rig + self.local
    }

    /// World-to-view matrix
    pub fn view_matrix(&self) -> Mat4 {
        mat4::translation(-self.eye())
    }

    /// View-to-clip matrix for the given aspect ratio
    pub fn projection_matrix(&self, aspect: f32) -> Mat4 {
        mat4::perspective(self.fov.to_radians(), aspect, self.near, self.far)
    }
}

impl RigControl for Camera {
    fn rig_offset(&self) -> (f32, f32) {
        (self.rig.x, self.rig.y)
    }

    fn set_rig_offset(&mut self, x: f32, y: f32) {
        self.rig.x = x;
        self.rig.y = y;
    }

    fn set_scroll_y(&mut self, y: f32) {
        self.local.y = y;
    }
}
