use std::{fmt, rc::Rc};

use cgmath::{Matrix4, Vector3};

use crate::gfx::{geometry::GeometryDescriptor, resources::material::Material};

use super::light::Light;

/// Engine-assigned identity of a scene child
///
/// Identities are unique within a scene and never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(pub(crate) u64);

impl ObjectId {
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A renderable object: geometry plus a shared material, placed in the scene
#[derive(Debug, Clone)]
pub struct Mesh {
    pub geometry: GeometryDescriptor,
    pub material: Rc<Material>,
    pub position: Vector3<f32>,
    pub scale: Vector3<f32>,
}

impl Mesh {
    /// Creates a mesh at the origin with unit scale
    pub fn new(geometry: GeometryDescriptor, material: Rc<Material>) -> Self {
        Self {
            geometry,
            material,
            position: Vector3::new(0.0, 0.0, 0.0),
            scale: Vector3::new(1.0, 1.0, 1.0),
        }
    }

    pub fn set_position(&mut self, position: Vector3<f32>) {
        self.position = position;
    }

    /// Sets the same scale factor on all three axes
    pub fn set_uniform_scale(&mut self, scale: f32) {
        self.scale = Vector3::new(scale, scale, scale);
    }

    /// Model matrix, translation applied after scale
    pub fn model_matrix(&self) -> Matrix4<f32> {
        Matrix4::from_translation(self.position)
            * Matrix4::from_nonuniform_scale(self.scale.x, self.scale.y, self.scale.z)
    }
}

/// What a scene child is
#[derive(Debug, Clone)]
pub enum NodeKind {
    Mesh(Mesh),
    Light(Light),
}

impl From<Mesh> for NodeKind {
    fn from(mesh: Mesh) -> Self {
        NodeKind::Mesh(mesh)
    }
}

impl From<Light> for NodeKind {
    fn from(light: Light) -> Self {
        NodeKind::Light(light)
    }
}

/// A direct child of the scene root
#[derive(Debug, Clone)]
pub struct SceneNode {
    id: ObjectId,
    pub kind: NodeKind,
}

impl SceneNode {
    pub(crate) fn new(id: ObjectId, kind: NodeKind) -> Self {
        Self { id, kind }
    }

    pub fn id(&self) -> ObjectId {
        self.id
    }

    pub fn as_mesh(&self) -> Option<&Mesh> {
        match &self.kind {
            NodeKind::Mesh(mesh) => Some(mesh),
            NodeKind::Light(_) => None,
        }
    }

    pub fn as_light(&self) -> Option<&Light> {
        match &self.kind {
            NodeKind::Light(light) => Some(light),
            NodeKind::Mesh(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::Vector4;

    #[test]
    fn model_matrix_scales_then_translates() {
        let geometry = GeometryDescriptor::Box {
            width: 1.0,
            height: 1.0,
            depth: 1.0,
        };
        let mut mesh = Mesh::new(geometry, Rc::new(Material::default()));
        mesh.set_uniform_scale(2.0);
        mesh.set_position(Vector3::new(1.0, 0.0, -1.0));

        let corner = mesh.model_matrix() * Vector4::new(0.5, 0.5, 0.5, 1.0);
        assert_eq!(corner, Vector4::new(2.0, 1.0, 0.0, 1.0));
    }

    #[test]
    fn object_id_displays_as_number() {
        assert_eq!(ObjectId(42).to_string(), "42");
    }
}
