//! # Procedural Geometry
//!
//! Maps a shape key and a size to a parametric [`GeometryDescriptor`], and
//! tessellates descriptors into vertex data ready for GPU upload.
//!
//! ## Supported Shapes
//!
//! - **Cube**: box with every edge equal to the size
//! - **Sphere**: UV sphere of diameter `size`, `size * 128` segments each way
//! - **Cylinder**: height `size`, radius `size / 4`, `size * 128` radial segments
//!
//! ## Usage
//!
//! ```rust
//! use shapeforge::gfx::geometry::{create_geometry, GeometryDescriptor};
//!
//! let cube = create_geometry("CUBE", 2.0).unwrap();
//! assert_eq!(cube, GeometryDescriptor::Box { width: 2.0, height: 2.0, depth: 2.0 });
//!
//! let data = cube.tessellate();
//! assert_eq!(data.triangle_count(), 12);
//! ```

pub mod primitives;
pub mod shape;

pub use primitives::*;
pub use shape::{create_geometry, segment_count, GeometryDescriptor, ShapeKind};

/// Represents generated geometry data ready for GPU upload
#[derive(Debug, Clone, Default)]
pub struct GeometryData {
    /// Vertex positions (x, y, z)
    pub vertices: Vec<[f32; 3]>,
    /// Normal vectors (x, y, z)
    pub normals: Vec<[f32; 3]>,
    /// Triangle indices (counter-clockwise winding)
    pub indices: Vec<u32>,
}

impl GeometryData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Interleaves positions and normals into the renderer's vertex format
    pub fn to_vertices(&self) -> Vec<crate::gfx::scene::vertex::Vertex3D> {
        use crate::gfx::scene::vertex::Vertex3D;

        self.vertices
            .iter()
            .enumerate()
            .map(|(i, position)| Vertex3D {
                position: *position,
                normal: self.normals.get(i).copied().unwrap_or([0.0, 1.0, 0.0]),
            })
            .collect()
    }

    /// Axis-aligned extent of the vertices as (min, max)
    pub fn bounds(&self) -> Option<([f32; 3], [f32; 3])> {
        let first = *self.vertices.first()?;
        Some(self.vertices.iter().fold((first, first), |(mut min, mut max), v| {
            for axis in 0..3 {
                min[axis] = min[axis].min(v[axis]);
                max[axis] = max[axis].max(v[axis]);
            }
            (min, max)
        }))
    }
}
