//! Decoded GLTF models
//!
//! A [`ModelFragment`] is the subtree rooted at the first node of the file's
//! scene, with every triangle primitive decoded into [`MeshData`]. Materials
//! in the file are ignored: the composer gives every mesh node its own toon
//! surface.

use std::path::Path;

use crate::asset_error::AssetError;
use crate::asset_loader::Asset;
use crate::{MeshData, Transform3D};

/// One node of a decoded model
#[derive(Clone, Debug, Default)]
pub struct FragmentNode {
    /// Node name from the file, if any
    pub name: Option<String>,
    /// Local transform relative to the parent node
    pub transform: Transform3D,
    /// Triangle geometry; `None` for pure transform nodes
    pub mesh: Option<MeshData>,
    /// Child nodes
    pub children: Vec<FragmentNode>,
}

impl FragmentNode {
    /// Create an empty transform node
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// Builder: set the local transform
    pub fn with_transform(mut self, transform: Transform3D) -> Self {
        self.transform = transform;
        self
    }

    /// Builder: attach a mesh
    pub fn with_mesh(mut self, mesh: MeshData) -> Self {
        self.mesh = Some(mesh);
        self
    }

    /// Builder: add a child node
    pub fn with_child(mut self, child: FragmentNode) -> Self {
        self.children.push(child);
        self
    }

    /// Visit this node and its descendants depth-first
    pub fn visit<'a>(&'a self, f: &mut impl FnMut(&'a FragmentNode)) {
        f(self);
        for child in &self.children {
            child.visit(f);
        }
    }

    fn from_gltf(node: gltf::Node<'_>, buffers: &[gltf::buffer::Data]) -> Self {
        let (translation, rotation, scale) = node.transform().decomposed();
        let mesh = node.mesh().and_then(|mesh| decode_mesh(&mesh, buffers));

        Self {
            name: node.name().map(str::to_string),
            transform: Transform3D::from_decomposed(translation, rotation, scale),
            mesh,
            children: node
                .children()
                .map(|child| Self::from_gltf(child, buffers))
                .collect(),
        }
    }
}

/// A model ready to be attached to the scene graph
#[derive(Clone, Debug)]
pub struct ModelFragment {
    /// Label for logging (usually the file path)
    pub label: String,
    /// Root of the model subtree
    pub root: FragmentNode,
}

impl ModelFragment {
    /// Decode a model from in-memory GLTF/GLB bytes
    pub fn from_slice(bytes: &[u8], label: impl Into<String>) -> Result<Self, AssetError> {
        let (document, buffers, _images) = gltf::import_slice(bytes)?;
        Self::from_document(&document, &buffers, label.into())
    }

    fn from_document(
        document: &gltf::Document,
        buffers: &[gltf::buffer::Data],
        label: String,
    ) -> Result<Self, AssetError> {
        let scene = document
            .default_scene()
            .or_else(|| document.scenes().next())
            .ok_or_else(|| AssetError::Empty(label.clone()))?;
        let root = scene
            .nodes()
            .next()
            .ok_or_else(|| AssetError::Empty(label.clone()))?;

        let fragment = Self {
            root: FragmentNode::from_gltf(root, buffers),
            label,
        };
        log::debug!(
            "Decoded '{}': {} nodes, {} with meshes",
            fragment.label,
            fragment.node_count(),
            fragment.mesh_node_count()
        );
        Ok(fragment)
    }

    /// Total number of nodes in the fragment
    pub fn node_count(&self) -> usize {
        let mut count = 0;
        self.root.visit(&mut |_| count += 1);
        count
    }

    /// Number of nodes carrying a mesh
    pub fn mesh_node_count(&self) -> usize {
        let mut count = 0;
        self.root.visit(&mut |node| {
            if node.mesh.is_some() {
                count += 1;
            }
        });
        count
    }
}

impl Asset for ModelFragment {
    fn load_from_file(path: &Path) -> Result<Self, AssetError> {
        let (document, buffers, _images) = gltf::import(path)?;
        Self::from_document(&document, &buffers, path.display().to_string())
    }
}

/// Merge every triangle primitive of a mesh into one [`MeshData`]
fn decode_mesh(mesh: &gltf::Mesh<'_>, buffers: &[gltf::buffer::Data]) -> Option<MeshData> {
    let mut merged: Option<MeshData> = None;

    for primitive in mesh.primitives() {
        if primitive.mode() != gltf::mesh::Mode::Triangles {
            log::warn!(
                "Skipping {:?} primitive in mesh {:?}",
                primitive.mode(),
                mesh.name()
            );
            continue;
        }

        let reader = primitive.reader(|buffer| buffers.get(buffer.index()).map(|d| d.0.as_slice()));
        let Some(positions) = reader.read_positions() else {
            log::warn!("Skipping primitive without positions in mesh {:?}", mesh.name());
            continue;
        };

        let data = MeshData::new(
            positions.collect(),
            reader.read_normals().map(|n| n.collect()),
            reader.read_indices().map(|i| i.into_u32().collect()),
        );
        if data.is_empty() {
            continue;
        }

        match merged.as_mut() {
            Some(existing) => existing.append(data),
            None => merged = Some(data),
        }
    }

    merged
}
