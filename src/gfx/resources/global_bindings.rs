//! Global uniform bindings for camera and scene data
//!
//! Per-frame data shared by every draw: the camera matrices and the scene's
//! lights. Bound to slot 0 of the mesh pipeline.

use crate::{
    gfx::{
        camera::{CameraUniform, PerspectiveCamera},
        scene::{Light, Scene},
    },
    wgpu_utils::{binding_types, uniform_buffer::UniformBuffer},
};

/// Global uniform buffer content structure
///
/// MUST match the `Globals` struct in `mesh.wgsl` exactly.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct GlobalUniform {
    pub view_proj: [[f32; 4]; 4],
    pub view_position: [f32; 4],
    /// Summed ambient light, linear
    pub ambient: [f32; 4],
    pub hemisphere_sky: [f32; 4],
    pub hemisphere_ground: [f32; 4],
    /// Point light position, range in `w` (0 = no falloff)
    pub point_position: [f32; 4],
    /// Point light color, intensity already applied; `w` is 1 when present
    pub point_color: [f32; 4],
}

impl GlobalUniform {
    /// Collects camera and lights for one frame
    ///
    /// Ambient and hemisphere lights accumulate; only the last point light is used.
    pub fn from_scene(camera: &PerspectiveCamera, scene: &Scene) -> Self {
        let CameraUniform {
            view_position,
            view_proj,
        } = camera.uniform();

        let mut uniform = Self {
            view_proj,
            view_position,
            ambient: [0.0; 4],
            hemisphere_sky: [0.0; 4],
            hemisphere_ground: [0.0; 4],
            point_position: [0.0; 4],
            point_color: [0.0; 4],
        };

        for light in scene.lights() {
            match *light {
                Light::Ambient { color, intensity } => {
                    add_assign(&mut uniform.ambient, color.to_linear_vec4(intensity, 0.0));
                }
                Light::Hemisphere {
                    sky,
                    ground,
                    intensity,
                } => {
                    add_assign(&mut uniform.hemisphere_sky, sky.to_linear_vec4(intensity, 0.0));
                    add_assign(
                        &mut uniform.hemisphere_ground,
                        ground.to_linear_vec4(intensity, 0.0),
                    );
                }
                Light::Point {
                    color,
                    intensity,
                    distance,
                    position,
                } => {
                    uniform.point_position = [position.x, position.y, position.z, distance];
                    uniform.point_color = color.to_linear_vec4(intensity, 1.0);
                }
            }
        }

        uniform
    }
}

fn add_assign(target: &mut [f32; 4], value: [f32; 4]) {
    for (t, v) in target.iter_mut().zip(value) {
        *t += v;
    }
}

/// Type alias for the global uniform buffer
pub type GlobalUBO = UniformBuffer<GlobalUniform>;

/// Owns the global uniform buffer and its bind group
pub struct GlobalBindings {
    ubo: GlobalUBO,
    bind_group_layout: wgpu::BindGroupLayout,
    bind_group: wgpu::BindGroup,
}

impl GlobalBindings {
    pub fn new(device: &wgpu::Device) -> Self {
        let ubo = GlobalUBO::new(device);
        let bind_group_layout = binding_types::single_uniform_layout(
            device,
            "Globals Bind Group Layout",
            wgpu::ShaderStages::VERTEX_FRAGMENT,
        );
        let bind_group = ubo.create_bind_group(device, &bind_group_layout, "Globals Bind Group");

        Self {
            ubo,
            bind_group_layout,
            bind_group,
        }
    }

    pub fn update(&mut self, queue: &wgpu::Queue, camera: &PerspectiveCamera, scene: &Scene) {
        self.ubo
            .update_content(queue, GlobalUniform::from_scene(camera, scene));
    }

    pub fn bind_group_layout(&self) -> &wgpu::BindGroupLayout {
        &self.bind_group_layout
    }

    pub fn bind_group(&self) -> &wgpu::BindGroup {
        &self.bind_group
    }
}

#[cfg(test)]
mod tests {
    use cgmath::Vector3;

    use super::*;
    use crate::gfx::color::Color;

    #[test]
    fn lights_are_packed_in_linear_space() {
        let mut scene = Scene::new(Color::new(0.0, 0.0, 0.0));
        scene.add(Light::Ambient {
            color: Color::new(1.0, 1.0, 1.0),
            intensity: 0.5,
        });
        scene.add(Light::Hemisphere {
            sky: Color::new(1.0, 0.0, 0.0),
            ground: Color::new(0.0, 0.0, 1.0),
            intensity: 0.2,
        });
        scene.add(Light::Point {
            color: Color::new(1.0, 1.0, 1.0),
            intensity: 2.0,
            distance: 5.0,
            position: Vector3::new(1.0, 1.0, 1.0),
        });

        let uniform = GlobalUniform::from_scene(&PerspectiveCamera::new(1.0), &scene);
        assert_eq!(uniform.ambient, [0.5, 0.5, 0.5, 0.0]);
        assert_eq!(uniform.hemisphere_sky, [0.2, 0.0, 0.0, 0.0]);
        assert_eq!(uniform.hemisphere_ground, [0.0, 0.0, 0.2, 0.0]);
        assert_eq!(uniform.point_position, [1.0, 1.0, 1.0, 5.0]);
        assert_eq!(uniform.point_color, [2.0, 2.0, 2.0, 1.0]);
        assert_eq!(uniform.view_position, [0.0, 0.0, 1.0, 1.0]);
    }

    #[test]
    fn scene_without_lights_is_dark() {
        let scene = Scene::new(Color::new(0.0, 0.0, 0.0));
        let uniform = GlobalUniform::from_scene(&PerspectiveCamera::new(1.0), &scene);
        assert_eq!(uniform.ambient, [0.0; 4]);
        assert_eq!(uniform.point_color, [0.0; 4]);
    }
}
