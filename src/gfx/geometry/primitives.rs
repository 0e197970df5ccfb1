//! # Primitive Shape Generation
//!
//! Tessellation for the editor's shapes. All shapes are Y-up, centered at the
//! origin, with outward normals and counter-clockwise front faces.

use super::GeometryData;
use std::f32::consts::PI;

/// Generate a box centered at the origin
///
/// Each face has its own four vertices so normals stay flat per face.
pub fn generate_box(width: f32, height: f32, depth: f32) -> GeometryData {
    let mut data = GeometryData::new();

    #[rustfmt::skip]
    let unit_positions: [[f32; 3]; 24] = [
        // Front face
        [-0.5, -0.5,  0.5], [ 0.5, -0.5,  0.5], [ 0.5,  0.5,  0.5], [-0.5,  0.5,  0.5],
        // Back face
        [-0.5, -0.5, -0.5], [-0.5,  0.5, -0.5], [ 0.5,  0.5, -0.5], [ 0.5, -0.5, -0.5],
        // Left face
        [-0.5, -0.5, -0.5], [-0.5, -0.5,  0.5], [-0.5,  0.5,  0.5], [-0.5,  0.5, -0.5],
        // Right face
        [ 0.5, -0.5,  0.5], [ 0.5, -0.5, -0.5], [ 0.5,  0.5, -0.5], [ 0.5,  0.5,  0.5],
        // Top face
        [-0.5,  0.5,  0.5], [ 0.5,  0.5,  0.5], [ 0.5,  0.5, -0.5], [-0.5,  0.5, -0.5],
        // Bottom face
        [-0.5, -0.5, -0.5], [ 0.5, -0.5, -0.5], [ 0.5, -0.5,  0.5], [-0.5, -0.5,  0.5],
    ];

    let face_normals: [[f32; 3]; 6] = [
        [0.0, 0.0, 1.0],
        [0.0, 0.0, -1.0],
        [-1.0, 0.0, 0.0],
        [1.0, 0.0, 0.0],
        [0.0, 1.0, 0.0],
        [0.0, -1.0, 0.0],
    ];

    for (i, p) in unit_positions.iter().enumerate() {
        data.vertices.push([p[0] * width, p[1] * height, p[2] * depth]);
        data.normals.push(face_normals[i / 4]);
    }

    for face in 0..6u32 {
        let base = face * 4;
        data.indices
            .extend_from_slice(&[base, base + 1, base + 2, base + 2, base + 3, base]);
    }

    data
}

/// Generate a UV sphere
///
/// # Arguments
/// * `radius` - Sphere radius
/// * `longitude_segments` - Segments around the Y axis (at least 3 are used)
/// * `latitude_segments` - Segments from pole to pole (at least 2 are used)
pub fn generate_sphere(radius: f32, longitude_segments: u32, latitude_segments: u32) -> GeometryData {
    let mut data = GeometryData::new();

    let long_segs = longitude_segments.max(3);
    let lat_segs = latitude_segments.max(2);

    for lat in 0..=lat_segs {
        let theta = lat as f32 * PI / lat_segs as f32;
        let (sin_theta, cos_theta) = theta.sin_cos();

        for long in 0..=long_segs {
            let phi = long as f32 * 2.0 * PI / long_segs as f32;
            let (sin_phi, cos_phi) = phi.sin_cos();

            let normal = [sin_theta * cos_phi, cos_theta, sin_theta * sin_phi];

            data.vertices
                .push([normal[0] * radius, normal[1] * radius, normal[2] * radius]);
            data.normals.push(normal);
        }
    }

    for lat in 0..lat_segs {
        for long in 0..long_segs {
            let first = lat * (long_segs + 1) + long;
            let second = first + long_segs + 1;

            data.indices.extend_from_slice(&[first, first + 1, second]);
            data.indices.extend_from_slice(&[second, first + 1, second + 1]);
        }
    }

    data
}

/// Generate a capped cylinder along the Y axis
///
/// # Arguments
/// * `radius_top` - Radius of the top cap
/// * `radius_bottom` - Radius of the bottom cap
/// * `height` - Height, the cylinder spans `-height/2..height/2`
/// * `segments` - Radial segments (at least 3 are used)
pub fn generate_cylinder(
    radius_top: f32,
    radius_bottom: f32,
    height: f32,
    segments: u32,
) -> GeometryData {
    let mut data = GeometryData::new();

    let segs = segments.max(3);
    let half_height = height * 0.5;
    // Side normals tilt when the radii differ
    let slope = if height != 0.0 {
        (radius_bottom - radius_top) / height
    } else {
        0.0
    };

    for i in 0..=segs {
        let angle = i as f32 * 2.0 * PI / segs as f32;
        let (sin_a, cos_a) = angle.sin_cos();

        let length = (1.0 + slope * slope).sqrt();
        let normal = [sin_a / length, slope / length, cos_a / length];

        data.vertices
            .push([radius_bottom * sin_a, -half_height, radius_bottom * cos_a]);
        data.normals.push(normal);

        data.vertices
            .push([radius_top * sin_a, half_height, radius_top * cos_a]);
        data.normals.push(normal);
    }

    for i in 0..segs {
        let bottom_current = i * 2;
        let top_current = bottom_current + 1;
        let bottom_next = bottom_current + 2;
        let top_next = bottom_next + 1;

        data.indices
            .extend_from_slice(&[bottom_current, bottom_next, top_current]);
        data.indices
            .extend_from_slice(&[top_current, bottom_next, top_next]);
    }

    push_cap(&mut data, radius_top, half_height, segs, true);
    push_cap(&mut data, radius_bottom, -half_height, segs, false);

    data
}

/// Appends a flat disc cap with its own ring of vertices
fn push_cap(data: &mut GeometryData, radius: f32, y: f32, segs: u32, top: bool) {
    let normal = if top { [0.0, 1.0, 0.0] } else { [0.0, -1.0, 0.0] };

    let center = data.vertices.len() as u32;
    data.vertices.push([0.0, y, 0.0]);
    data.normals.push(normal);

    let ring_start = center + 1;
    for i in 0..=segs {
        let angle = i as f32 * 2.0 * PI / segs as f32;
        let (sin_a, cos_a) = angle.sin_cos();
        data.vertices.push([radius * sin_a, y, radius * cos_a]);
        data.normals.push(normal);
    }

    for i in 0..segs {
        let current = ring_start + i;
        let next = current + 1;
        if top {
            data.indices.extend_from_slice(&[center, current, next]);
        } else {
            data.indices.extend_from_slice(&[center, next, current]);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn face_normal(data: &GeometryData, triangle: usize) -> [f32; 3] {
        let idx = &data.indices[triangle * 3..triangle * 3 + 3];
        let [a, b, c] = [
            data.vertices[idx[0] as usize],
            data.vertices[idx[1] as usize],
            data.vertices[idx[2] as usize],
        ];
        let e1 = [b[0] - a[0], b[1] - a[1], b[2] - a[2]];
        let e2 = [c[0] - a[0], c[1] - a[1], c[2] - a[2]];
        [
            e1[1] * e2[2] - e1[2] * e2[1],
            e1[2] * e2[0] - e1[0] * e2[2],
            e1[0] * e2[1] - e1[1] * e2[0],
        ]
    }

    fn dot(a: [f32; 3], b: [f32; 3]) -> f32 {
        a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
    }

    #[test]
    fn test_box_generation() {
        let cube = generate_box(2.0, 2.0, 2.0);
        assert_eq!(cube.vertex_count(), 24);
        assert_eq!(cube.triangle_count(), 12);
        assert_eq!(cube.bounds(), Some(([-1.0, -1.0, -1.0], [1.0, 1.0, 1.0])));
    }

    #[test]
    fn test_box_faces_point_outward() {
        let cube = generate_box(1.0, 1.0, 1.0);
        for triangle in 0..cube.triangle_count() {
            let first_vertex = cube.indices[triangle * 3] as usize;
            let normal = cube.normals[first_vertex];
            assert!(dot(face_normal(&cube, triangle), normal) > 0.0);
        }
    }

    #[test]
    fn test_sphere_generation() {
        let sphere = generate_sphere(0.5, 8, 6);
        assert_eq!(sphere.vertex_count(), 9 * 7);
        assert_eq!(sphere.triangle_count(), 8 * 6 * 2);
        assert_eq!(sphere.vertices.len(), sphere.normals.len());

        for v in &sphere.vertices {
            let length = dot(*v, *v).sqrt();
            assert!((length - 0.5).abs() < 1e-5);
        }
    }

    #[test]
    fn test_sphere_faces_point_outward() {
        let sphere = generate_sphere(1.0, 16, 8);
        for triangle in 0..sphere.triangle_count() {
            let n = face_normal(&sphere, triangle);
            // Degenerate slivers at the poles have zero area
            if dot(n, n) < 1e-10 {
                continue;
            }
            let idx = sphere.indices[triangle * 3] as usize;
            let centroid = sphere.vertices[idx];
            assert!(dot(n, centroid) >= 0.0, "triangle {triangle} faces inward");
        }
    }

    #[test]
    fn test_cylinder_generation() {
        let cylinder = generate_cylinder(0.25, 0.25, 1.0, 16);
        // 17 * 2 side vertices plus two caps of 1 + 17
        assert_eq!(cylinder.vertex_count(), 34 + 2 * 18);
        assert_eq!(cylinder.triangle_count(), 16 * 2 + 16 * 2);
        assert_eq!(
            cylinder.bounds().map(|(min, max)| (min[1], max[1])),
            Some((-0.5, 0.5))
        );
    }

    #[test]
    fn test_cylinder_caps_face_away_from_center() {
        let cylinder = generate_cylinder(0.25, 0.25, 1.0, 8);
        let side_triangles = 8 * 2;
        for triangle in side_triangles..cylinder.triangle_count() {
            let idx = cylinder.indices[triangle * 3] as usize;
            let cap_y = cylinder.vertices[idx][1];
            assert!(face_normal(&cylinder, triangle)[1] * cap_y > 0.0);
        }
    }

    #[test]
    fn test_degenerate_segments_are_clamped() {
        let cylinder = generate_cylinder(0.0, 0.0, 0.0, 0);
        assert_eq!(cylinder.triangle_count(), 3 * 2 + 3 * 2);
    }
}
