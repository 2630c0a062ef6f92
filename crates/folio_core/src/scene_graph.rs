//! Scene graph
//!
//! Nodes live in a [`SlotMap`] keyed by [`NodeKey`]. Every node hangs off a
//! single root; world matrices are evaluated top-down on demand.

use std::sync::Arc;

use folio_math::{mat4, Mat4};
use slotmap::{new_key_type, SlotMap};

use crate::{FragmentNode, MeshData, SurfaceKey, Transform3D};

new_key_type! {
    /// Key to a node in the scene graph
    pub struct NodeKey;
}

/// A node in the scene graph
#[derive(Clone, Debug, Default)]
pub struct Node {
    /// Optional name (for lookup and logging)
    pub name: Option<String>,
    /// Transform relative to the parent
    pub transform: Transform3D,
    /// Geometry drawn at this node
    pub mesh: Option<Arc<MeshData>>,
    /// Surface the geometry is shaded with
    pub surface: Option<SurfaceKey>,
    parent: Option<NodeKey>,
    children: Vec<NodeKey>,
}

impl Node {
    /// Create an empty named node
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// Parent node (`None` only for the root)
    pub fn parent(&self) -> Option<NodeKey> {
        self.parent
    }

    /// Child nodes in insertion order
    pub fn children(&self) -> &[NodeKey] {
        &self.children
    }

    /// True if this node has both geometry and a surface to shade it with
    pub fn is_renderable(&self) -> bool {
        self.mesh.is_some() && self.surface.is_some()
    }
}

/// A renderable node with its evaluated world matrix
pub struct RenderItem<'a> {
    pub key: NodeKey,
    pub world: Mat4,
    pub mesh: &'a Arc<MeshData>,
    pub surface: SurfaceKey,
}

/// Tree of nodes under a shared root
pub struct SceneGraph {
    nodes: SlotMap<NodeKey, Node>,
    root: NodeKey,
}

impl Default for SceneGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneGraph {
    /// Create a graph holding only the root node
    pub fn new() -> Self {
        let mut nodes = SlotMap::with_key();
        let root = nodes.insert(Node::new("scene"));
        Self { nodes, root }
    }

    /// The shared root node
    pub fn root(&self) -> NodeKey {
        self.root
    }

    /// Number of nodes, including the root
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Get a node by key
    pub fn get(&self, key: NodeKey) -> Option<&Node> {
        self.nodes.get(key)
    }

    /// Get a mutable node by key
    pub fn get_mut(&mut self, key: NodeKey) -> Option<&mut Node> {
        self.nodes.get_mut(key)
    }

    /// Add a node under `parent`; returns `None` if the parent does not exist
    pub fn add_node(&mut self, parent: NodeKey, mut node: Node) -> Option<NodeKey> {
        if !self.nodes.contains_key(parent) {
            return None;
        }
        node.parent = Some(parent);
        node.children.clear();
        let key = self.nodes.insert(node);
        self.nodes[parent].children.push(key);
        Some(key)
    }

    /// Copy a decoded model subtree under `parent`.
    ///
    /// `surface_for` is called once for every node that carries a mesh, in
    /// depth-first order, and returns the surface that node is shaded with.
    /// Returns the key of the inserted subtree root.
    pub fn insert_fragment(
        &mut self,
        parent: NodeKey,
        fragment: FragmentNode,
        surface_for: &mut impl FnMut(&MeshData) -> SurfaceKey,
    ) -> Option<NodeKey> {
        let FragmentNode { name, transform, mesh, children } = fragment;

        let surface = mesh.as_ref().map(|m| surface_for(m));
        let node = Node {
            name,
            transform,
            mesh: mesh.map(Arc::new),
            surface,
            ..Node::default()
        };
        let key = self.add_node(parent, node)?;

        for child in children {
            self.insert_fragment(key, child, surface_for)?;
        }
        Some(key)
    }

    /// World matrix of every node, parents before children
    pub fn world_matrices(&self) -> Vec<(NodeKey, Mat4)> {
        let mut out = Vec::with_capacity(self.nodes.len());
        let mut stack = vec![(self.root, mat4::IDENTITY)];

        while let Some((key, parent_world)) = stack.pop() {
            let Some(node) = self.nodes.get(key) else { continue };
            let world = mat4::mul(parent_world, node.transform.to_matrix());
            out.push((key, world));
            for &child in node.children.iter().rev() {
                stack.push((child, world));
            }
        }
        out
    }

    /// Every renderable node with its world matrix
    pub fn render_items(&self) -> Vec<RenderItem<'_>> {
        self.world_matrices()
            .into_iter()
            .filter_map(|(key, world)| {
                let node = &self.nodes[key];
                match (&node.mesh, node.surface) {
                    (Some(mesh), Some(surface)) => Some(RenderItem { key, world, mesh, surface }),
                    _ => None,
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ColorBroadcast, GradientId, SurfaceKind};
    use folio_math::Vec3;

    fn triangle() -> MeshData {
        MeshData::new(
            vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
            None,
            None,
        )
    }

    #[test]
    fn test_new_graph_has_root() {
        let graph = SceneGraph::new();
        assert_eq!(graph.node_count(), 1);
        assert!(graph.get(graph.root()).unwrap().parent().is_none());
    }

    #[test]
    fn test_add_node_links_parent() {
        let mut graph = SceneGraph::new();
        let root = graph.root();
        let child = graph.add_node(root, Node::new("child")).unwrap();
        assert_eq!(graph.get(child).unwrap().parent(), Some(root));
        assert_eq!(graph.get(root).unwrap().children(), &[child]);
    }

    #[test]
    fn test_world_matrix_composes_parents() {
        let mut graph = SceneGraph::new();
        let mut parent = Node::new("parent");
        parent.transform.position = Vec3::new(0.0, -4.0, 0.0);
        let parent = graph.add_node(graph.root(), parent).unwrap();

        let mut child = Node::new("child");
        child.transform.position = Vec3::new(2.0, 0.0, 0.0);
        let child = graph.add_node(parent, child).unwrap();

        let world = graph
            .world_matrices()
            .into_iter()
            .find(|(k, _)| *k == child)
            .map(|(_, m)| m)
            .unwrap();
        let p = mat4::transform_point(world, Vec3::ZERO);
        assert_eq!(p, Vec3::new(2.0, -4.0, 0.0));
    }

    #[test]
    fn test_insert_fragment_assigns_surfaces_to_meshes_only() {
        let mut graph = SceneGraph::new();
        let mut registry = ColorBroadcast::default();
        let fragment = FragmentNode::new("model")
            .with_child(FragmentNode::new("a").with_mesh(triangle()))
            .with_child(FragmentNode::new("pivot").with_child(FragmentNode::new("b").with_mesh(triangle())));

        let root = graph
            .insert_fragment(graph.root(), fragment, &mut |_| {
                registry.subscribe(SurfaceKind::Toon { gradient: GradientId::default() })
            })
            .unwrap();

        assert_eq!(graph.node_count(), 5);
        assert_eq!(registry.len(), 2);
        assert_eq!(graph.render_items().len(), 2);
        assert!(!graph.get(root).unwrap().is_renderable());
        assert_eq!(graph.get(root).unwrap().children().len(), 2);
    }

    #[test]
    fn test_add_node_to_missing_parent() {
        let mut graph = SceneGraph::new();
        let orphan_parent = {
            let mut other = SceneGraph::new();
            other.add_node(other.root(), Node::new("x")).unwrap()
        };
        // A key from another graph's slot 1 does not exist here
        assert!(graph.add_node(orphan_parent, Node::new("y")).is_none());
    }
}
