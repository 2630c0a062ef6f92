//! 4x4 Matrix utilities for 3D transformations
//!
//! Matrices are column-major (`m[column][row]`), matching WGSL's `mat4x4<f32>`
//! layout so they can be uploaded to uniform buffers without transposing.

use crate::{Euler, Vec3};

/// 4x4 matrix type (column-major)
pub type Mat4 = [[f32; 4]; 4];

/// Identity matrix
pub const IDENTITY: Mat4 = [
    [1.0, 0.0, 0.0, 0.0],
    [0.0, 1.0, 0.0, 0.0],
    [0.0, 0.0, 1.0, 0.0],
    [0.0, 0.0, 0.0, 1.0],
];

/// Multiply two 4x4 matrices: result = a * b
///
/// In column-major convention, this applies b first, then a.
#[allow(clippy::needless_range_loop)]
pub fn mul(a: Mat4, b: Mat4) -> Mat4 {
    let mut result = [[0.0f32; 4]; 4];

    for i in 0..4 {
        for j in 0..4 {
            for k in 0..4 {
                result[i][j] += a[k][j] * b[i][k];
            }
        }
    }

    result
}

/// Translation matrix
pub fn translation(t: Vec3) -> Mat4 {
    let mut m = IDENTITY;
    m[3][0] = t.x;
    m[3][1] = t.y;
    m[3][2] = t.z;
    m
}

/// Non-uniform scale matrix
pub fn scale(s: Vec3) -> Mat4 {
    let mut m = IDENTITY;
    m[0][0] = s.x;
    m[1][1] = s.y;
    m[2][2] = s.z;
    m
}

/// Rotation about the X axis
pub fn rotation_x(angle: f32) -> Mat4 {
    let (sn, cs) = angle.sin_cos();
    let mut m = IDENTITY;
    m[1][1] = cs;
    m[1][2] = sn;
    m[2][1] = -sn;
    m[2][2] = cs;
    m
}

/// Rotation about the Y axis
pub fn rotation_y(angle: f32) -> Mat4 {
    let (sn, cs) = angle.sin_cos();
    let mut m = IDENTITY;
    m[0][0] = cs;
    m[0][2] = -sn;
    m[2][0] = sn;
    m[2][2] = cs;
    m
}

/// Rotation about the Z axis
pub fn rotation_z(angle: f32) -> Mat4 {
    let (sn, cs) = angle.sin_cos();
    let mut m = IDENTITY;
    m[0][0] = cs;
    m[0][1] = sn;
    m[1][0] = -sn;
    m[1][1] = cs;
    m
}

/// Compose translation, rotation and scale: `T * R * S`
pub fn compose_trs(t: Vec3, r: Euler, s: Vec3) -> Mat4 {
    mul(translation(t), mul(r.to_matrix(), scale(s)))
}

/// Right-handed perspective projection with a `[0, 1]` depth range (wgpu)
pub fn perspective(fov_y: f32, aspect: f32, near: f32, far: f32) -> Mat4 {
    let f = 1.0 / (fov_y / 2.0).tan();
    let nf = 1.0 / (near - far);

    [
        [f / aspect, 0.0, 0.0, 0.0],
        [0.0, f, 0.0, 0.0],
        [0.0, 0.0, far * nf, -1.0],
        [0.0, 0.0, near * far * nf, 0.0],
    ]
}

/// Inverse-transpose of the upper 3x3, embedded in a 4x4
///
/// Used to transform normals under non-uniform scale. A singular matrix
/// yields the identity.
pub fn normal_matrix(m: Mat4) -> Mat4 {
    // a[row][col] of the upper 3x3
    let a = |r: usize, c: usize| m[c][r];

    let c00 = a(1, 1) * a(2, 2) - a(1, 2) * a(2, 1);
    let c01 = a(1, 2) * a(2, 0) - a(1, 0) * a(2, 2);
    let c02 = a(1, 0) * a(2, 1) - a(1, 1) * a(2, 0);
    let det = a(0, 0) * c00 + a(0, 1) * c01 + a(0, 2) * c02;
    if det.abs() < 1e-12 {
        return IDENTITY;
    }
    let inv_det = 1.0 / det;

    let c10 = a(0, 2) * a(2, 1) - a(0, 1) * a(2, 2);
    let c11 = a(0, 0) * a(2, 2) - a(0, 2) * a(2, 0);
    let c12 = a(0, 1) * a(2, 0) - a(0, 0) * a(2, 1);
    let c20 = a(0, 1) * a(1, 2) - a(0, 2) * a(1, 1);
    let c21 = a(0, 2) * a(1, 0) - a(0, 0) * a(1, 2);
    let c22 = a(0, 0) * a(1, 1) - a(0, 1) * a(1, 0);

    // The cofactor matrix divided by det is the inverse-transpose;
    // cofactor (row r, col c) lands at column c, row r.
    let mut out = IDENTITY;
    let cof = [[c00, c01, c02], [c10, c11, c12], [c20, c21, c22]];
    for (r, row) in cof.iter().enumerate() {
        for (c, value) in row.iter().enumerate() {
            out[c][r] = value * inv_det;
        }
    }
    out
}

/// Transform a point (w = 1)
pub fn transform_point(m: Mat4, p: Vec3) -> Vec3 {
    Vec3::new(
        m[0][0] * p.x + m[1][0] * p.y + m[2][0] * p.z + m[3][0],
        m[0][1] * p.x + m[1][1] * p.y + m[2][1] * p.z + m[3][1],
        m[0][2] * p.x + m[1][2] * p.y + m[2][2] * p.z + m[3][2],
    )
}

/// Transform a direction (w = 0)
pub fn transform_vector(m: Mat4, v: Vec3) -> Vec3 {
    Vec3::new(
        m[0][0] * v.x + m[1][0] * v.y + m[2][0] * v.z,
        m[0][1] * v.x + m[1][1] * v.y + m[2][1] * v.z,
        m[0][2] * v.x + m[1][2] * v.y + m[2][2] * v.z,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-5;

    fn vec_approx_eq(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < EPSILON
    }

    fn mat_approx_eq(a: Mat4, b: Mat4) -> bool {
        for i in 0..4 {
            for j in 0..4 {
                if (a[i][j] - b[i][j]).abs() > EPSILON {
                    return false;
                }
            }
        }
        true
    }

    #[test]
    fn test_mul_identity() {
        let m = rotation_y(0.7);
        assert!(mat_approx_eq(mul(IDENTITY, m), m));
        assert!(mat_approx_eq(mul(m, IDENTITY), m));
    }

    #[test]
    fn test_mul_applies_right_first() {
        // Translate then rotate vs rotate then translate
        let t = translation(Vec3::new(1.0, 0.0, 0.0));
        let r = rotation_z(std::f32::consts::FRAC_PI_2);
        let p = transform_point(mul(r, t), Vec3::ZERO);
        assert!(vec_approx_eq(p, Vec3::new(0.0, 1.0, 0.0)));
        let q = transform_point(mul(t, r), Vec3::ZERO);
        assert!(vec_approx_eq(q, Vec3::new(1.0, 0.0, 0.0)));
    }

    #[test]
    fn test_axis_rotations() {
        let half_pi = std::f32::consts::FRAC_PI_2;
        assert!(vec_approx_eq(transform_vector(rotation_x(half_pi), Vec3::Y), Vec3::Z));
        assert!(vec_approx_eq(transform_vector(rotation_y(half_pi), Vec3::Z), Vec3::X));
        assert!(vec_approx_eq(transform_vector(rotation_z(half_pi), Vec3::X), Vec3::Y));
    }

    #[test]
    fn test_compose_trs() {
        let m = compose_trs(
            Vec3::new(2.0, -4.0, 0.0),
            Euler::IDENTITY,
            Vec3::new(2.0, 2.0, 2.0),
        );
        let p = transform_point(m, Vec3::new(1.0, 1.0, 1.0));
        assert!(vec_approx_eq(p, Vec3::new(4.0, -2.0, 2.0)));
    }

    #[test]
    fn test_perspective_depth_range() {
        let proj = perspective(35f32.to_radians(), 1.5, 0.1, 100.0);

        let clip = |z: f32| {
            let zc = proj[2][2] * z + proj[3][2];
            let wc = proj[2][3] * z;
            zc / wc
        };
        assert!(clip(-0.1).abs() < EPSILON);
        assert!((clip(-100.0) - 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_normal_matrix_of_rotation_is_rotation() {
        let r = rotation_x(0.4);
        assert!(mat_approx_eq(normal_matrix(r), r));
    }

    #[test]
    fn test_normal_matrix_non_uniform_scale() {
        let m = scale(Vec3::new(2.0, 1.0, 1.0));
        let n = normal_matrix(m);
        assert!((n[0][0] - 0.5).abs() < EPSILON);
        assert!((n[1][1] - 1.0).abs() < EPSILON);
    }

    #[test]
    fn test_normal_matrix_singular() {
        let m = scale(Vec3::new(0.0, 1.0, 1.0));
        assert_eq!(normal_matrix(m), IDENTITY);
    }
}
