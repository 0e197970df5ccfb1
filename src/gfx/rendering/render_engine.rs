//! WGPU-based rendering engine for the editor viewport
//!
//! Owns the surface, device and every GPU resource derived from the scene.
//! Nothing here mutates the scene: each frame mirrors it into GPU buffers and
//! draws the mirror.

use std::{collections::HashMap, sync::Arc};

use wgpu::TextureFormat;

use crate::{
    error::{EditorError, RenderError},
    gfx::{
        camera::PerspectiveCamera,
        resources::{
            global_bindings::GlobalBindings,
            material::{material_bind_group_layout, MaterialBindings},
            texture_resource::TextureResource,
        },
        scene::Scene,
    },
    wgpu_utils::binding_types,
};

use super::{
    frame::{FrameRenderer, Overlay},
    gpu_mesh::{DrawMesh, GpuMeshCache},
    pipeline_manager::{PipelineConfig, PipelineManager},
};

const MESH_PIPELINE: &str = "Mesh";
const MESH_SHADER: &str = "mesh";
const MSAA_SAMPLES: u32 = 4;

/// Core rendering engine managing GPU resources and draw calls
pub struct RenderEngine {
    surface: wgpu::Surface<'static>,
    device: Arc<wgpu::Device>,
    queue: Arc<wgpu::Queue>,
    config: wgpu::SurfaceConfiguration,
    format: TextureFormat,
    depth_texture: TextureResource,
    msaa_texture: Option<TextureResource>,
    pipeline_manager: PipelineManager,
    global_bindings: GlobalBindings,
    transform_layout: wgpu::BindGroupLayout,
    material_layout: wgpu::BindGroupLayout,
    materials: HashMap<String, MaterialBindings>,
    meshes: GpuMeshCache,
}

impl RenderEngine {
    /// Creates a new render engine for the given window
    ///
    /// The surface is configured once at `width` x `height`; the editor window
    /// is not resizable. With `antialias` the scene is drawn with 4x MSAA when
    /// the surface format supports it.
    pub async fn new(
        window: impl Into<wgpu::SurfaceTarget<'static>>,
        width: u32,
        height: u32,
        antialias: bool,
    ) -> Result<RenderEngine, EditorError> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });
        let surface = instance.create_surface(window)?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await?;
        log::info!("Using GPU adapter: {}", adapter.get_info().name);

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("WGPU Device"),
                required_features: wgpu::Features::default(),
                required_limits: wgpu::Limits {
                    max_texture_dimension_2d: 4096,
                    ..wgpu::Limits::downlevel_defaults()
                },
                memory_hints: wgpu::MemoryHints::default(),
                trace: wgpu::Trace::Off,
            })
            .await?;

        let surface_capabilities = surface.get_capabilities(&adapter);
        let format = surface_capabilities
            .formats
            .iter()
            .copied()
            .find(|f| !f.is_srgb())
            .or_else(|| surface_capabilities.formats.first().copied())
            .unwrap_or(TextureFormat::Bgra8Unorm);
        let alpha_mode = surface_capabilities
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: width.max(1),
            height: height.max(1),
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let msaa_supported = adapter
            .get_texture_format_features(format)
            .flags
            .sample_count_supported(MSAA_SAMPLES);
        let sample_count = if antialias && msaa_supported {
            MSAA_SAMPLES
        } else {
            if antialias {
                log::warn!("{:?} does not support {}x MSAA, rendering aliased", format, MSAA_SAMPLES);
            }
            1
        };

        let depth_texture = TextureResource::create_depth_texture(&device, &config, sample_count);
        let msaa_texture = (sample_count > 1)
            .then(|| TextureResource::create_msaa_texture(&device, &config, sample_count));

        let global_bindings = GlobalBindings::new(&device);
        let transform_layout = binding_types::single_uniform_layout(
            &device,
            "Transform Bind Group Layout",
            wgpu::ShaderStages::VERTEX,
        );
        let material_layout = material_bind_group_layout(&device);

        let device: Arc<wgpu::Device> = device.into();
        let queue: Arc<wgpu::Queue> = queue.into();

        let mut pipeline_manager = PipelineManager::new(device.clone());
        pipeline_manager.load_shader(MESH_SHADER, include_str!("mesh.wgsl"));
        pipeline_manager.register_pipeline(
            MESH_PIPELINE,
            PipelineConfig::default()
                .with_label(MESH_PIPELINE)
                .with_shader(MESH_SHADER)
                .with_color_format(format)
                .with_depth_format(TextureResource::DEPTH_FORMAT)
                .with_sample_count(sample_count)
                .with_bind_group_layouts(vec![
                    global_bindings.bind_group_layout().clone(),
                    transform_layout.clone(),
                    material_layout.clone(),
                ]),
        );
        pipeline_manager.create_all_pipelines()?;

        log::info!(
            "Render engine ready: {}x{} {:?}, {} sample(s)",
            config.width,
            config.height,
            format,
            sample_count
        );

        Ok(RenderEngine {
            surface,
            device,
            queue,
            config,
            format,
            depth_texture,
            msaa_texture,
            pipeline_manager,
            global_bindings,
            transform_layout,
            material_layout,
            materials: HashMap::new(),
            meshes: GpuMeshCache::default(),
        })
    }

    /// Mirrors the scene into GPU buffers and uniforms
    fn prepare(&mut self, scene: &Scene, camera: &PerspectiveCamera) {
        self.global_bindings.update(&self.queue, camera, scene);
        self.meshes
            .sync(&self.device, &self.queue, &self.transform_layout, scene);

        for (_, mesh) in scene.meshes() {
            let material = &mesh.material;
            match self.materials.get_mut(&material.name) {
                Some(bindings) => bindings.sync(&self.queue, material),
                None => {
                    let bindings = MaterialBindings::new(
                        &self.device,
                        &self.queue,
                        &self.material_layout,
                        material,
                    );
                    self.materials.insert(material.name.clone(), bindings);
                }
            }
        }
    }

    fn acquire_frame(&mut self) -> Result<wgpu::SurfaceTexture, RenderError> {
        match self.surface.get_current_texture() {
            Ok(frame) => Ok(frame),
            Err(error @ (wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated)) => {
                self.surface.configure(&self.device, &self.config);
                Err(error.into())
            }
            Err(error) => Err(error.into()),
        }
    }

    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }

    pub fn queue(&self) -> &wgpu::Queue {
        &self.queue
    }

    /// Returns the surface texture format
    ///
    /// Used for creating compatible render targets and UI systems.
    pub fn surface_format(&self) -> TextureFormat {
        self.format
    }
}

impl FrameRenderer for RenderEngine {
    fn render(
        &mut self,
        scene: &Scene,
        camera: &PerspectiveCamera,
        overlay: Option<&mut dyn Overlay>,
    ) -> Result<(), RenderError> {
        self.prepare(scene, camera);

        let surface_texture = self.acquire_frame()?;
        let surface_view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        {
            let (view, resolve_target) = match &self.msaa_texture {
                Some(msaa) => (&msaa.view, Some(&surface_view)),
                None => (&surface_view, None),
            };

            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Main Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view,
                    resolve_target,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(scene.background.to_wgpu()),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_texture.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            render_pass.set_pipeline(self.pipeline_manager.get_pipeline(MESH_PIPELINE)?);
            render_pass.set_bind_group(0, self.global_bindings.bind_group(), &[]);

            for (id, _) in scene.meshes() {
                let Some(gpu_mesh) = self.meshes.get(id) else {
                    continue;
                };
                let Some(material) = self.materials.get(&gpu_mesh.material_name) else {
                    log::debug!("Skipping object {}: material has no GPU resources", id);
                    continue;
                };
                render_pass.set_bind_group(2, material.bind_group(), &[]);
                render_pass.draw_gpu_mesh(gpu_mesh);
            }
        }

        if let Some(overlay) = overlay {
            overlay.draw(&self.device, &self.queue, &mut encoder, &surface_view)?;
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        surface_texture.present();
        Ok(())
    }
}
