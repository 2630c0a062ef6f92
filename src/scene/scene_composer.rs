//! SceneComposer - places loaded models down the page
//!
//! Every model becomes one section. Its fragment root is moved to its slot
//! (`slot * section_spacing` below the top of the page, shifted sideways by the
//! request's offset), its scale is reset, and every mesh underneath gets a
//! fresh toon surface from the color broadcast.

use folio_core::{
    ColorBroadcast, GradientId, LoadedAsset, ModelFragment, NodeKey, SceneGraph, SurfaceKind, Vec3,
};

/// One page section: the model root it animates
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Section {
    /// Position of the model in the load request list
    pub index: usize,
    /// Fragment root carrying the section's transform
    pub node: NodeKey,
}

/// Sections in request order
#[derive(Clone, Debug, Default)]
pub struct SectionList {
    sections: Vec<Section>,
}

impl SectionList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Section at `index`, if it exists
    pub fn get(&self, index: usize) -> Option<&Section> {
        self.sections.get(index)
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Section> {
        self.sections.iter()
    }

    fn push(&mut self, node: NodeKey) {
        let index = self.sections.len();
        self.sections.push(Section { index, node });
    }
}

/// Attaches loaded models to the scene graph
///
/// # Example
/// ```ignore
/// let sections = SceneComposer::new(4.0)
///     .with_gradient(GradientId(0))
///     .compose(loaded, &mut graph, &mut colors);
/// ```
pub struct SceneComposer {
    section_spacing: f32,
    gradient: GradientId,
}

impl SceneComposer {
    /// Create a composer with the given distance between sections
    pub fn new(section_spacing: f32) -> Self {
        Self {
            section_spacing,
            gradient: GradientId::default(),
        }
    }

    /// Builder: gradient map used by the toon surfaces
    pub fn with_gradient(mut self, gradient: GradientId) -> Self {
        self.gradient = gradient;
        self
    }

    /// Where a model's root goes, keeping the depth it was authored at
    pub fn section_position(&self, slot: usize, offset_x: f32, file_z: f32) -> Vec3 {
        Vec3::new(offset_x, -(slot as f32) * self.section_spacing, file_z)
    }

    /// Attach every loaded model under the graph root, in the given order
    pub fn compose(
        &self,
        loaded: Vec<LoadedAsset<ModelFragment>>,
        graph: &mut SceneGraph,
        colors: &mut ColorBroadcast,
    ) -> SectionList {
        let mut sections = SectionList::new();
        let kind = SurfaceKind::Toon { gradient: self.gradient };
        let root = graph.root();

        for LoadedAsset { request, asset } in loaded {
            let mut fragment = asset.root;
            fragment.transform.position = self.section_position(
                request.slot,
                request.offset_x,
                fragment.transform.position.z,
            );
            fragment.transform.scale = Vec3::ONE;

            let before = colors.len();
            let Some(node) = graph.insert_fragment(root, fragment, &mut |_| colors.subscribe(kind)) else {
                log::error!("Scene root missing while attaching '{}'", asset.label);
                continue;
            };
            log::info!(
                "Section {}: '{}' at slot {} with {} surfaces",
                sections.len(),
                asset.label,
                request.slot,
                colors.len() - before
            );
            sections.push(node);
        }

        sections
    }
}
