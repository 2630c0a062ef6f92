//! Euler angle rotations
//!
//! Rotations are stored as three angles applied in XYZ order (the rotation
//! matrix is `Rx * Ry * Rz`). Angles accumulate without wrapping so that
//! relative animations ("spin by 6 radians") stay additive.

use serde::{Serialize, Deserialize};
use crate::mat4::{self, Mat4};
use crate::Vec3;

/// Rotation as XYZ-ordered Euler angles in radians
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Euler {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Euler {
    pub const IDENTITY: Self = Self { x: 0.0, y: 0.0, z: 0.0 };

    /// Create a new rotation from per-axis angles
    #[inline]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Convert a unit quaternion `[x, y, z, w]` (GLTF order) to XYZ Euler angles
    pub fn from_quaternion(q: [f32; 4]) -> Self {
        let [x, y, z, w] = q;

        // Rotation matrix entries (row, column)
        let m11 = 1.0 - 2.0 * (y * y + z * z);
        let m12 = 2.0 * (x * y - w * z);
        let m13 = 2.0 * (x * z + w * y);
        let m22 = 1.0 - 2.0 * (x * x + z * z);
        let m23 = 2.0 * (y * z - w * x);
        let m32 = 2.0 * (y * z + w * x);
        let m33 = 1.0 - 2.0 * (x * x + y * y);

        let ry = m13.clamp(-1.0, 1.0).asin();
        if m13.abs() < 0.999_999_9 {
            Self::new((-m23).atan2(m33), ry, (-m12).atan2(m11))
        } else {
            // Gimbal lock: fold the Z rotation into X
            Self::new(m32.atan2(m22), ry, 0.0)
        }
    }

    /// Add another rotation's angles to this one
    #[inline]
    pub fn add_angles(&mut self, delta: Euler) {
        self.x += delta.x;
        self.y += delta.y;
        self.z += delta.z;
    }

    /// Angles scaled by a factor
    #[inline]
    pub fn scaled(self, factor: f32) -> Self {
        Self::new(self.x * factor, self.y * factor, self.z * factor)
    }

    /// Rotation matrix (`Rx * Ry * Rz`)
    pub fn to_matrix(self) -> Mat4 {
        mat4::mul(
            mat4::rotation_x(self.x),
            mat4::mul(mat4::rotation_y(self.y), mat4::rotation_z(self.z)),
        )
    }

    /// Rotate a vector
    pub fn rotate(self, v: Vec3) -> Vec3 {
        mat4::transform_vector(self.to_matrix(), v)
    }
}
