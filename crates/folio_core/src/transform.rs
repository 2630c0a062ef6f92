//! 3D Transform (position, rotation, scale)

use folio_math::{mat4, Euler, Mat4, Vec3};
use serde::{Serialize, Deserialize};

/// A 3D transform with position, Euler rotation, and per-axis scale
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Transform3D {
    /// Position relative to the parent node
    pub position: Vec3,
    /// Rotation as XYZ Euler angles
    pub rotation: Euler,
    /// Per-axis scale
    pub scale: Vec3,
}

impl Default for Transform3D {
    fn default() -> Self {
        Self::identity()
    }
}

impl Transform3D {
    /// Create an identity transform
    pub fn identity() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Euler::IDENTITY,
            scale: Vec3::ONE,
        }
    }

    /// Build from a GLTF-style decomposition (translation, quaternion, scale)
    pub fn from_decomposed(translation: [f32; 3], rotation: [f32; 4], scale: [f32; 3]) -> Self {
        Self {
            position: Vec3::from_array(translation),
            rotation: Euler::from_quaternion(rotation),
            scale: Vec3::from_array(scale),
        }
    }

    /// Local-to-parent matrix (`T * R * S`)
    pub fn to_matrix(&self) -> Mat4 {
        mat4::compose_trs(self.position, self.rotation, self.scale)
    }

    /// Add Euler angles to the rotation
    pub fn rotate(&mut self, delta: Euler) {
        self.rotation.add_angles(delta);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-5;

    #[test]
    fn test_identity_leaves_points_alone() {
        let t = Transform3D::identity();
        let p = Vec3::new(1.0, 2.0, 3.0);
        assert!((mat4::transform_point(t.to_matrix(), p) - p).length() < EPSILON);
    }

    #[test]
    fn test_scale_then_rotate_then_translate() {
        let mut t = Transform3D::identity();
        t.position = Vec3::new(0.0, -4.0, 0.0);
        t.scale = Vec3::new(2.0, 2.0, 2.0);
        t.rotation = Euler::new(0.0, 0.0, std::f32::consts::FRAC_PI_2);

        // X scaled to 2, rotated onto +Y, then moved down by 4
        let p = mat4::transform_point(t.to_matrix(), Vec3::X);
        assert!((p - Vec3::new(0.0, -2.0, 0.0)).length() < EPSILON);
    }

    #[test]
    fn test_from_decomposed_identity_rotation() {
        let t = Transform3D::from_decomposed([1.0, 2.0, 3.0], [0.0, 0.0, 0.0, 1.0], [1.0, 1.0, 1.0]);
        assert_eq!(t.position, Vec3::new(1.0, 2.0, 3.0));
        assert!(t.rotation.x.abs() < EPSILON);
        assert!(t.rotation.y.abs() < EPSILON);
        assert!(t.rotation.z.abs() < EPSILON);
    }

    #[test]
    fn test_rotate_accumulates() {
        let mut t = Transform3D::identity();
        t.rotate(Euler::new(0.1, 0.12, 0.0));
        t.rotate(Euler::new(0.1, 0.12, 0.0));
        assert!((t.rotation.x - 0.2).abs() < EPSILON);
        assert!((t.rotation.y - 0.24).abs() < EPSILON);
    }
}
