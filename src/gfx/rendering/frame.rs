//! Seams between the editor and whatever presents its frames
//!
//! The editor only needs "draw this scene through this camera". The GPU
//! engine implements [`FrameRenderer`]; tests substitute recording doubles.

use crate::{
    error::RenderError,
    gfx::{camera::PerspectiveCamera, scene::Scene},
};

/// Something drawn on top of the 3D scene in the same frame, such as the UI
pub trait Overlay {
    fn draw(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        encoder: &mut wgpu::CommandEncoder,
        target: &wgpu::TextureView,
    ) -> Result<(), RenderError>;
}

/// Presents one frame of a scene as seen by a camera
pub trait FrameRenderer {
    fn render(
        &mut self,
        scene: &Scene,
        camera: &PerspectiveCamera,
        overlay: Option<&mut dyn Overlay>,
    ) -> Result<(), RenderError>;
}
