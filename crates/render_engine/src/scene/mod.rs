//! Scene graph
//!
//! A flat collection of renderable nodes addressed by stable handles.
//! Nodes own their transform and material; mesh and texture data live
//! on the GPU behind renderer handles.

use slotmap::SlotMap;

use crate::foundation::math::{Transform, Vec3};
use crate::render::api::{MeshHandle, TextureHandle};
use crate::render::resources::Material;

slotmap::new_key_type! {
    /// Stable handle to a scene node
    ///
    /// Remains valid across insertions and removals of other nodes;
    /// resolving a removed node's handle yields `None`.
    pub struct NodeId;
}

/// A renderable object in the scene
#[derive(Debug, Clone)]
pub struct SceneNode {
    /// Identifier used in log messages
    pub name: String,
    /// GPU mesh to draw
    pub mesh: MeshHandle,
    /// Surface appearance
    pub material: Material,
    /// Local-to-world transform
    pub transform: Transform,
    /// Skipped by the renderer when false
    pub visible: bool,
}

impl SceneNode {
    /// Create a node at the origin with an identity transform
    pub fn new(name: impl Into<String>, mesh: MeshHandle, material: Material) -> Self {
        Self {
            name: name.into(),
            mesh,
            material,
            transform: Transform::identity(),
            visible: true,
        }
    }

    /// Set the world position
    #[must_use]
    pub fn with_position(mut self, position: Vec3) -> Self {
        self.transform.position = position;
        self
    }

    /// Set the uniform scale
    #[must_use]
    pub fn with_scale(mut self, scale: f32) -> Self {
        self.transform.scale = Vec3::new(scale, scale, scale);
        self
    }
}

/// Cubemap drawn behind all scene geometry
#[derive(Debug, Clone)]
pub struct Skybox {
    /// Cube texture sampled by view direction
    pub texture: TextureHandle,
}

impl Skybox {
    /// Create a skybox from an uploaded cube texture
    pub fn new(texture: TextureHandle) -> Self {
        Self { texture }
    }
}

/// All renderable state for one frame
#[derive(Debug, Default)]
pub struct Scene {
    nodes: SlotMap<NodeId, SceneNode>,
    skybox: Option<Skybox>,
    /// Background color as linear RGBA, used where no geometry lands
    pub clear_color: [f32; 4],
}

impl Scene {
    /// Create an empty scene with a black background
    pub fn new() -> Self {
        Self {
            nodes: SlotMap::with_key(),
            skybox: None,
            clear_color: [0.0, 0.0, 0.0, 1.0],
        }
    }

    /// Insert a node, returning its stable handle
    pub fn add_node(&mut self, node: SceneNode) -> NodeId {
        log::debug!("Adding scene node '{}'", node.name);
        self.nodes.insert(node)
    }

    /// Remove a node; returns it if the handle was live
    pub fn remove_node(&mut self, id: NodeId) -> Option<SceneNode> {
        let removed = self.nodes.remove(id);
        if let Some(node) = &removed {
            log::debug!("Removed scene node '{}'", node.name);
        }
        removed
    }

    /// Look up a node by handle
    pub fn node(&self, id: NodeId) -> Option<&SceneNode> {
        self.nodes.get(id)
    }

    /// Look up a node mutably by handle
    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut SceneNode> {
        self.nodes.get_mut(id)
    }

    /// Iterate over all nodes with their handles
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &SceneNode)> {
        self.nodes.iter()
    }

    /// Number of nodes in the scene
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the scene has no nodes
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Install the skybox
    pub fn set_skybox(&mut self, skybox: Skybox) {
        self.skybox = Some(skybox);
    }

    /// The installed skybox, if any
    pub fn skybox(&self) -> Option<&Skybox> {
        self.skybox.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_node(name: &str) -> SceneNode {
        SceneNode::new(name, MeshHandle::default(), Material::default())
    }

    #[test]
    fn test_add_and_lookup_node() {
        let mut scene = Scene::new();
        let id = scene.add_node(test_node("sphere").with_position(Vec3::new(4.0, 0.0, 0.0)));

        let node = scene.node(id).unwrap();
        assert_eq!(node.name, "sphere");
        assert_eq!(node.transform.position.x, 4.0);
    }

    #[test]
    fn test_removed_handle_resolves_to_none() {
        let mut scene = Scene::new();
        let id = scene.add_node(test_node("a"));
        let keep = scene.add_node(test_node("b"));

        assert!(scene.remove_node(id).is_some());
        assert!(scene.node(id).is_none());
        // Other handles stay valid
        assert_eq!(scene.node(keep).unwrap().name, "b");
        assert_eq!(scene.len(), 1);
    }

    #[test]
    fn test_node_mut_updates_position() {
        let mut scene = Scene::new();
        let id = scene.add_node(test_node("planet"));

        if let Some(node) = scene.node_mut(id) {
            node.transform.position = Vec3::new(0.0, 0.0, 6.0);
        }
        assert_eq!(scene.node(id).unwrap().transform.position.z, 6.0);
    }
}
