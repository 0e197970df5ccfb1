//! Shape keys and the geometry factory

use std::{fmt, str::FromStr};

use crate::error::EditorError;

use super::{generate_box, generate_cylinder, generate_sphere, GeometryData};

/// Tessellation segments per unit of size for curved shapes
pub const SEGMENTS_PER_UNIT: f32 = 128.0;

/// Fewest segments around the Y axis a sphere or cylinder is built with
pub const MIN_RADIAL_SEGMENTS: u32 = 3;

/// Fewest pole-to-pole segments a sphere is built with
pub const MIN_HEIGHT_SEGMENTS: u32 = 2;

/// The shapes the editor can spawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    Cube,
    Sphere,
    Cylinder,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 3] = [ShapeKind::Cube, ShapeKind::Sphere, ShapeKind::Cylinder];

    /// Key used by the shape selector
    pub fn key(self) -> &'static str {
        match self {
            ShapeKind::Cube => "CUBE",
            ShapeKind::Sphere => "SPHERE",
            ShapeKind::Cylinder => "CYLINDER",
        }
    }

    /// Human readable label for the selector
    pub fn label(self) -> &'static str {
        match self {
            ShapeKind::Cube => "Cube",
            ShapeKind::Sphere => "Sphere",
            ShapeKind::Cylinder => "Cylinder",
        }
    }

    /// Builds the descriptor for this shape at the given size
    ///
    /// Segment counts are clamped to the tessellator's minimums here, so a
    /// descriptor always carries the counts that will actually be generated.
    pub fn geometry(self, size: f32) -> GeometryDescriptor {
        match self {
            ShapeKind::Cube => GeometryDescriptor::Box {
                width: size,
                height: size,
                depth: size,
            },
            ShapeKind::Sphere => {
                let segments = segment_count(size);
                GeometryDescriptor::Sphere {
                    radius: size / 2.0,
                    width_segments: segments.max(MIN_RADIAL_SEGMENTS),
                    height_segments: segments.max(MIN_HEIGHT_SEGMENTS),
                }
            }
            ShapeKind::Cylinder => GeometryDescriptor::Cylinder {
                radius_top: size / 4.0,
                radius_bottom: size / 4.0,
                height: size,
                radial_segments: segment_count(size).max(MIN_RADIAL_SEGMENTS),
            },
        }
    }
}

impl FromStr for ShapeKind {
    type Err = EditorError;

    fn from_str(key: &str) -> Result<Self, Self::Err> {
        ShapeKind::ALL
            .into_iter()
            .find(|shape| shape.key() == key)
            .ok_or_else(|| EditorError::UnsupportedShape(key.to_owned()))
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Segment count for a curved shape of the given size
///
/// Truncates toward zero; negative and NaN sizes saturate to 0, infinite
/// sizes to `u32::MAX`.
pub fn segment_count(size: f32) -> u32 {
    (size * SEGMENTS_PER_UNIT) as u32
}

/// Parametric definition of a mesh shape
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GeometryDescriptor {
    Box {
        width: f32,
        height: f32,
        depth: f32,
    },
    Sphere {
        radius: f32,
        width_segments: u32,
        height_segments: u32,
    },
    Cylinder {
        radius_top: f32,
        radius_bottom: f32,
        height: f32,
        radial_segments: u32,
    },
}

impl GeometryDescriptor {
    /// Generates vertex data for this descriptor
    pub fn tessellate(&self) -> GeometryData {
        match *self {
            GeometryDescriptor::Box {
                width,
                height,
                depth,
            } => generate_box(width, height, depth),
            GeometryDescriptor::Sphere {
                radius,
                width_segments,
                height_segments,
            } => generate_sphere(radius, width_segments, height_segments),
            GeometryDescriptor::Cylinder {
                radius_top,
                radius_bottom,
                height,
                radial_segments,
            } => generate_cylinder(radius_top, radius_bottom, height, radial_segments),
        }
    }

    /// Number of vertices [`tessellate`](Self::tessellate) produces
    ///
    /// Computed from the parameters alone, so it is cheap for any size and
    /// saturates instead of overflowing for absurd segment counts.
    pub fn vertex_count(&self) -> u64 {
        match *self {
            GeometryDescriptor::Box { .. } => 24,
            GeometryDescriptor::Sphere {
                width_segments,
                height_segments,
                ..
            } => {
                let around = u64::from(width_segments.max(MIN_RADIAL_SEGMENTS)) + 1;
                let down = u64::from(height_segments.max(MIN_HEIGHT_SEGMENTS)) + 1;
                around.saturating_mul(down)
            }
            // Side strip of 2 * (n + 1), plus two caps of a center and n + 1 ring vertices
            GeometryDescriptor::Cylinder { radial_segments, .. } => {
                u64::from(radial_segments.max(MIN_RADIAL_SEGMENTS)) * 4 + 6
            }
        }
    }

    /// Number of indices [`tessellate`](Self::tessellate) produces
    pub fn index_count(&self) -> u64 {
        self.triangle_count().saturating_mul(3)
    }

    pub fn triangle_count(&self) -> u64 {
        match *self {
            GeometryDescriptor::Box { .. } => 12,
            GeometryDescriptor::Sphere {
                width_segments,
                height_segments,
                ..
            } => u64::from(width_segments.max(MIN_RADIAL_SEGMENTS))
                .saturating_mul(u64::from(height_segments.max(MIN_HEIGHT_SEGMENTS)))
                .saturating_mul(2),
            // Two per side quad, one per cap wedge on each cap
            GeometryDescriptor::Cylinder { radial_segments, .. } => {
                u64::from(radial_segments.max(MIN_RADIAL_SEGMENTS)) * 4
            }
        }
    }

    /// Human readable kind, used in logs
    pub fn kind_name(&self) -> &'static str {
        match self {
            GeometryDescriptor::Box { .. } => "box",
            GeometryDescriptor::Sphere { .. } => "sphere",
            GeometryDescriptor::Cylinder { .. } => "cylinder",
        }
    }
}

/// Looks up the recipe for `shape_key` and builds its geometry at `size`
///
/// Fails with [`EditorError::UnsupportedShape`] for unknown keys. The size is
/// not validated: zero, negative or NaN sizes give degenerate geometry.
pub fn create_geometry(shape_key: &str, size: f32) -> Result<GeometryDescriptor, EditorError> {
    let shape: ShapeKind = shape_key.parse()?;
    Ok(shape.geometry(size))
}
