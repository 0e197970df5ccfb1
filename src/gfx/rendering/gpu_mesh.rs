//! GPU-side copies of scene meshes
//!
//! Geometry is uploaded once per object identity; the model matrix is
//! re-uploaded every frame but skipped by the uniform buffer when unchanged.
//! Objects whose buffers would not fit the device are skipped, not drawn.

use std::{
    collections::{hash_map::Entry, HashMap, HashSet},
    mem::size_of,
};

use wgpu::util::DeviceExt;

use crate::{
    error::RenderError,
    gfx::{
        geometry::GeometryDescriptor,
        scene::{Mesh, ObjectId, Scene, Vertex3D},
    },
    wgpu_utils::UniformBuffer,
};

/// Byte sizes of the (vertex, index) buffers a geometry needs
pub fn buffer_sizes(geometry: &GeometryDescriptor) -> (u64, u64) {
    let vertex_bytes = geometry
        .vertex_count()
        .saturating_mul(size_of::<Vertex3D>() as u64);
    let index_bytes = geometry.index_count().saturating_mul(size_of::<u32>() as u64);
    (vertex_bytes, index_bytes)
}

/// Fails if either buffer of `geometry` would exceed `max_buffer_size`
///
/// Works from the analytic counts, so nothing is tessellated for meshes that
/// get rejected.
pub fn check_buffer_limits(
    id: ObjectId,
    geometry: &GeometryDescriptor,
    max_buffer_size: u64,
) -> Result<(), RenderError> {
    let (vertex_bytes, index_bytes) = buffer_sizes(geometry);
    let bytes = vertex_bytes.max(index_bytes);
    if bytes > max_buffer_size {
        return Err(RenderError::MeshTooLarge {
            id,
            bytes,
            limit: max_buffer_size,
        });
    }
    Ok(())
}

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ModelUniform {
    pub model: [[f32; 4]; 4],
}

impl From<&Mesh> for ModelUniform {
    fn from(mesh: &Mesh) -> Self {
        Self {
            model: mesh.model_matrix().into(),
        }
    }
}

/// Vertex, index and transform buffers for one scene object
pub struct GpuMesh {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
    transform: UniformBuffer<ModelUniform>,
    transform_bind_group: wgpu::BindGroup,
    pub material_name: String,
}

impl GpuMesh {
    pub fn upload(
        device: &wgpu::Device,
        transform_layout: &wgpu::BindGroupLayout,
        id: ObjectId,
        mesh: &Mesh,
    ) -> Result<Self, RenderError> {
        check_buffer_limits(id, &mesh.geometry, device.limits().max_buffer_size)?;

        let data = mesh.geometry.tessellate();
        let vertices = data.to_vertices();

        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("Vertex Buffer: object {}", id)),
            contents: bytemuck::cast_slice(&vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("Index Buffer: object {}", id)),
            contents: bytemuck::cast_slice(&data.indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        let transform = UniformBuffer::new(device);
        let transform_bind_group = transform.create_bind_group(
            device,
            transform_layout,
            &format!("Transform Bind Group: object {}", id),
        );

        Ok(Self {
            vertex_buffer,
            index_buffer,
            index_count: data.indices.len() as u32,
            transform,
            transform_bind_group,
            material_name: mesh.material.name.clone(),
        })
    }

    pub fn update_transform(&mut self, queue: &wgpu::Queue, mesh: &Mesh) {
        self.transform.update_content(queue, ModelUniform::from(mesh));
    }
}

/// GPU meshes keyed by the identity of the scene object they mirror
#[derive(Default)]
pub struct GpuMeshCache {
    meshes: HashMap<ObjectId, GpuMesh>,
    /// Objects that could not be uploaded; retried never, forgotten on delete
    rejected: HashSet<ObjectId>,
}

impl GpuMeshCache {
    /// Uploads new objects, refreshes transforms, and drops buffers of
    /// objects that left the scene
    ///
    /// An object that cannot be uploaded is logged once and left out of every
    /// later frame; the rest of the scene still renders.
    pub fn sync(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        transform_layout: &wgpu::BindGroupLayout,
        scene: &Scene,
    ) {
        let live: HashSet<ObjectId> = scene.meshes().map(|(id, _)| id).collect();
        let before = self.meshes.len();
        self.meshes.retain(|id, _| live.contains(id));
        self.rejected.retain(|id| live.contains(id));
        if self.meshes.len() != before {
            log::debug!("Released GPU buffers of {} objects", before - self.meshes.len());
        }

        for (id, mesh) in scene.meshes() {
            if self.rejected.contains(&id) {
                continue;
            }
            let gpu_mesh = match self.meshes.entry(id) {
                Entry::Occupied(entry) => entry.into_mut(),
                Entry::Vacant(entry) => match GpuMesh::upload(device, transform_layout, id, mesh) {
                    Ok(gpu_mesh) => entry.insert(gpu_mesh),
                    Err(error) => {
                        log::warn!("Not drawing object {}: {}", id, error);
                        self.rejected.insert(id);
                        continue;
                    }
                },
            };
            gpu_mesh.update_transform(queue, mesh);
        }
    }

    pub fn get(&self, id: ObjectId) -> Option<&GpuMesh> {
        self.meshes.get(&id)
    }

    pub fn len(&self) -> usize {
        self.meshes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.meshes.is_empty()
    }
}

pub trait DrawMesh {
    fn draw_gpu_mesh(&mut self, mesh: &GpuMesh);
}

impl DrawMesh for wgpu::RenderPass<'_> {
    /// Expects the globals and material bind groups to be set already
    fn draw_gpu_mesh(&mut self, mesh: &GpuMesh) {
        if mesh.index_count == 0 {
            return;
        }
        self.set_bind_group(1, &mesh.transform_bind_group, &[]);
        self.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
        self.set_index_buffer(mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        self.draw_indexed(0..mesh.index_count, 0, 0..1);
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use cgmath::Vector3;

    use super::*;
    use crate::gfx::{geometry::ShapeKind, resources::material::Material};

    #[test]
    fn model_uniform_is_column_major() {
        let mut mesh = Mesh::new(ShapeKind::Cube.geometry(1.0), Rc::new(Material::default()));
        mesh.set_position(Vector3::new(1.0, 2.0, 3.0));
        let uniform = ModelUniform::from(&mesh);
        assert_eq!(uniform.model[3], [1.0, 2.0, 3.0, 1.0]);
        assert_eq!(uniform.model[0], [1.0, 0.0, 0.0, 0.0]);
    }

    fn default_limit() -> u64 {
        wgpu::Limits::downlevel_defaults().max_buffer_size
    }

    #[test]
    fn buffer_sizes_follow_vertex_layout() {
        let sphere = ShapeKind::Sphere.geometry(1.0);
        let (vertex_bytes, index_bytes) = buffer_sizes(&sphere);
        assert_eq!(vertex_bytes, 129 * 129 * 24);
        assert_eq!(index_bytes, 128 * 128 * 6 * 4);
    }

    #[test]
    fn everyday_shapes_fit_the_device() {
        for shape in ShapeKind::ALL {
            let geometry = shape.geometry(2.0);
            assert!(check_buffer_limits(ObjectId(1), &geometry, default_limit()).is_ok());
        }
    }

    #[test]
    fn oversized_sphere_is_rejected_before_upload() {
        let sphere = ShapeKind::Sphere.geometry(30.0);
        let error = check_buffer_limits(ObjectId(7), &sphere, default_limit()).unwrap_err();
        match error {
            RenderError::MeshTooLarge { id, bytes, limit } => {
                assert_eq!(id, ObjectId(7));
                assert_eq!(limit, default_limit());
                assert!(bytes > limit);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn oversized_cylinder_is_rejected() {
        // Radial segments grow linearly, so it takes a far larger size
        let cylinder = ShapeKind::Cylinder.geometry(200_000.0);
        assert!(check_buffer_limits(ObjectId(1), &cylinder, default_limit()).is_err());
        let cylinder = ShapeKind::Cylinder.geometry(30.0);
        assert!(check_buffer_limits(ObjectId(1), &cylinder, default_limit()).is_ok());
    }

    #[test]
    fn infinite_size_is_rejected_without_tessellating() {
        let sphere = ShapeKind::Sphere.geometry(f32::INFINITY);
        assert!(matches!(
            check_buffer_limits(ObjectId(1), &sphere, default_limit()),
            Err(RenderError::MeshTooLarge { bytes: u64::MAX, .. })
        ));
    }
}
