//! Triangle mesh data
//!
//! CPU-side geometry decoded from model files, uploaded once to the GPU.

use folio_math::Vec3;

/// Indexed triangle mesh with per-vertex normals
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MeshData {
    /// Vertex positions
    pub positions: Vec<[f32; 3]>,
    /// Vertex normals, same length as `positions`
    pub normals: Vec<[f32; 3]>,
    /// Triangle list indices into `positions`
    pub indices: Vec<u32>,
}

impl MeshData {
    /// Build a mesh, generating sequential indices and smooth normals when the
    /// source did not provide them
    pub fn new(
        positions: Vec<[f32; 3]>,
        normals: Option<Vec<[f32; 3]>>,
        indices: Option<Vec<u32>>,
    ) -> Self {
        let indices = indices.unwrap_or_else(|| (0..positions.len() as u32).collect());
        let mut mesh = Self {
            positions,
            normals: Vec::new(),
            indices,
        };
        match normals {
            Some(n) if n.len() == mesh.positions.len() => mesh.normals = n,
            _ => mesh.compute_normals(),
        }
        mesh
    }

    /// Number of vertices
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Number of triangles
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// True if there is nothing to draw
    pub fn is_empty(&self) -> bool {
        self.triangle_count() == 0
    }

    /// Append another mesh, offsetting its indices
    pub fn append(&mut self, other: MeshData) {
        let offset = self.positions.len() as u32;
        self.positions.extend(other.positions);
        self.normals.extend(other.normals);
        self.indices.extend(other.indices.into_iter().map(|i| i + offset));
    }

    /// Recompute smooth vertex normals from area-weighted face normals
    pub fn compute_normals(&mut self) {
        let mut accum = vec![Vec3::ZERO; self.positions.len()];

        for tri in self.indices.chunks_exact(3) {
            let [a, b, c] = [tri[0] as usize, tri[1] as usize, tri[2] as usize];
            if a >= accum.len() || b >= accum.len() || c >= accum.len() {
                continue;
            }
            let pa = Vec3::from_array(self.positions[a]);
            let pb = Vec3::from_array(self.positions[b]);
            let pc = Vec3::from_array(self.positions[c]);
            // Cross product length is twice the area, so larger faces weigh more
            let face = (pb - pa).cross(pc - pa);
            accum[a] += face;
            accum[b] += face;
            accum[c] += face;
        }

        self.normals = accum
            .into_iter()
            .map(|n| {
                let n = n.normalized();
                if n == Vec3::ZERO { Vec3::Y.to_array() } else { n.to_array() }
            })
            .collect();
    }
}
