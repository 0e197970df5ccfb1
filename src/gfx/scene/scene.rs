use crate::gfx::color::Color;

use super::{
    light::Light,
    object::{Mesh, NodeKind, ObjectId, SceneNode},
};

/// Root of the scene graph
///
/// Children are kept in insertion order. Every child gets an identity when it
/// is added; removal is immediate.
#[derive(Debug, Clone)]
pub struct Scene {
    pub background: Color,
    children: Vec<SceneNode>,
    next_id: u64,
}

impl Scene {
    /// Creates an empty scene with the given background color
    pub fn new(background: Color) -> Self {
        Self {
            background,
            children: Vec::new(),
            next_id: 1,
        }
    }

    /// Adds a child and returns its freshly assigned identity
    pub fn add(&mut self, node: impl Into<NodeKind>) -> ObjectId {
        let id = ObjectId(self.next_id);
        self.next_id += 1;
        self.children.push(SceneNode::new(id, node.into()));
        id
    }

    /// Removes the child with this identity, returning it if it was present
    pub fn remove(&mut self, id: ObjectId) -> Option<SceneNode> {
        let index = self.children.iter().position(|child| child.id() == id)?;
        Some(self.children.remove(index))
    }

    /// Direct children in insertion order
    pub fn children(&self) -> &[SceneNode] {
        &self.children
    }

    pub fn get(&self, id: ObjectId) -> Option<&SceneNode> {
        self.children.iter().find(|child| child.id() == id)
    }

    /// Looks up a mesh child by identity
    pub fn get_mesh(&self, id: ObjectId) -> Option<&Mesh> {
        self.get(id).and_then(SceneNode::as_mesh)
    }

    /// Mesh children with their identities, in insertion order
    pub fn meshes(&self) -> impl Iterator<Item = (ObjectId, &Mesh)> {
        self.children
            .iter()
            .filter_map(|child| child.as_mesh().map(|mesh| (child.id(), mesh)))
    }

    /// Light children, in insertion order
    pub fn lights(&self) -> impl Iterator<Item = &Light> {
        self.children.iter().filter_map(SceneNode::as_light)
    }

    pub fn mesh_count(&self) -> usize {
        self.meshes().count()
    }

    /// Gets statistics about the scene
    ///
    /// Counts come from the geometry descriptors, nothing is tessellated.
    pub fn get_statistics(&self) -> SceneStatistics {
        let (total_triangles, total_vertices) =
            self.meshes().fold((0u64, 0u64), |(triangles, vertices), (_, mesh)| {
                (
                    triangles.saturating_add(mesh.geometry.triangle_count()),
                    vertices.saturating_add(mesh.geometry.vertex_count()),
                )
            });

        SceneStatistics {
            object_count: self.mesh_count(),
            light_count: self.lights().count(),
            total_triangles,
            total_vertices,
        }
    }
}

/// Scene statistics for the side panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SceneStatistics {
    pub object_count: usize,
    pub light_count: usize,
    pub total_triangles: u64,
    pub total_vertices: u64,
}
