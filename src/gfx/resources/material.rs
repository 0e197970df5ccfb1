//! Material system for PBR rendering
//!
//! A [`Material`] is plain data shared between meshes through `Rc`. Its GPU
//! counterpart, [`MaterialBindings`], is owned by the render engine and created
//! the first time a material is drawn.

use wgpu::Device;

use crate::{
    gfx::color::Color,
    wgpu_utils::{binding_types, uniform_buffer::UniformBuffer},
};

/// GPU uniform data for materials
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MaterialUniform {
    /// Linear base color, alpha in `w`
    pub base_color: [f32; 4],
    /// metallic, roughness, flat shading flag, unused
    pub params: [f32; 4],
}

type MaterialUBO = UniformBuffer<MaterialUniform>;

/// Material definition with PBR properties
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    pub name: String,
    pub base_color: Color,
    pub metallic: f32,
    pub roughness: f32,
    /// Facet normals instead of interpolated ones
    pub flat_shading: bool,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            name: "Default".to_string(),
            base_color: Color::new(1.0, 1.0, 1.0),
            metallic: 0.0,
            roughness: 1.0,
            flat_shading: false,
        }
    }
}

impl Material {
    /// Creates a new material with basic PBR properties
    ///
    /// # Arguments
    /// * `name` - Name used to cache GPU resources
    /// * `base_color` - sRGB base color
    /// * `metallic` - Metallic factor (0.0 = dielectric, 1.0 = metallic)
    /// * `roughness` - Surface roughness (0.0 = mirror, 1.0 = rough)
    pub fn new(name: &str, base_color: Color, metallic: f32, roughness: f32) -> Self {
        Self {
            name: name.to_string(),
            base_color,
            metallic: metallic.clamp(0.0, 1.0),
            roughness: roughness.clamp(0.0, 1.0),
            flat_shading: false,
        }
    }

    pub fn with_flat_shading(mut self, flat_shading: bool) -> Self {
        self.flat_shading = flat_shading;
        self
    }

    pub fn uniform(&self) -> MaterialUniform {
        let [r, g, b] = self.base_color.to_linear();
        MaterialUniform {
            base_color: [r, g, b, 1.0],
            params: [
                self.metallic,
                self.roughness,
                if self.flat_shading { 1.0 } else { 0.0 },
                0.0,
            ],
        }
    }
}

/// Layout for the material bind group (group 2 in the mesh pipeline)
pub fn material_bind_group_layout(device: &Device) -> wgpu::BindGroupLayout {
    binding_types::single_uniform_layout(
        device,
        "Material Bind Group Layout",
        wgpu::ShaderStages::FRAGMENT,
    )
}

/// GPU resources for one material
pub struct MaterialBindings {
    ubo: MaterialUBO,
    bind_group: wgpu::BindGroup,
}

impl MaterialBindings {
    pub fn new(
        device: &Device,
        queue: &wgpu::Queue,
        layout: &wgpu::BindGroupLayout,
        material: &Material,
    ) -> Self {
        let mut ubo = MaterialUBO::new(device);
        ubo.update_content(queue, material.uniform());

        let bind_group = ubo.create_bind_group(
            device,
            layout,
            &format!("Material Bind Group: {}", material.name),
        );

        Self { ubo, bind_group }
    }

    /// Re-uploads the uniform if the material changed
    pub fn sync(&mut self, queue: &wgpu::Queue, material: &Material) {
        self.ubo.update_content(queue, material.uniform());
    }

    pub fn bind_group(&self) -> &wgpu::BindGroup {
        &self.bind_group
    }
}
