//! Error types for the editor core and the GPU renderer
//!
//! Editor operations that the UI treats as silent no-ops (unsupported shapes,
//! deleting an object that is already gone) still have a typed error so the
//! fallible variants of those operations can report what happened.

use thiserror::Error;

use crate::gfx::scene::ObjectId;

/// Errors raised by editor operations and resource construction
#[derive(Debug, Error)]
pub enum EditorError {
    /// The shape key has no registered geometry recipe
    #[error("unsupported shape `{0}`")]
    UnsupportedShape(String),

    /// No mesh with this identity is present in the scene graph
    #[error("object {0} is not in the scene")]
    ObjectNotFound(ObjectId),

    /// The renderer recipe was already consumed by a failed construction
    #[error("renderer is unavailable: its construction failed earlier in this session")]
    RendererUnavailable,

    #[error("failed to create a rendering surface: {0}")]
    CreateSurface(#[from] wgpu::CreateSurfaceError),

    #[error("no suitable GPU adapter: {0}")]
    RequestAdapter(#[from] wgpu::RequestAdapterError),

    #[error("failed to acquire a GPU device: {0}")]
    RequestDevice(#[from] wgpu::RequestDeviceError),

    /// A single frame failed; the render loop logs it and keeps going
    #[error(transparent)]
    Render(#[from] RenderError),

    #[error("failed to create the application window: {0}")]
    CreateWindow(#[from] winit::error::OsError),

    #[error("event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),
}

/// Errors that can occur while drawing a single frame
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("could not acquire the next surface texture: {0}")]
    Surface(#[from] wgpu::SurfaceError),

    #[error("render pipeline `{0}` is not registered")]
    MissingPipeline(String),

    #[error("shader `{0}` is not loaded")]
    MissingShader(String),

    #[error("object {id} needs a {bytes} byte buffer, the device allows {limit}")]
    MeshTooLarge { id: ObjectId, bytes: u64, limit: u64 },

    #[error("failed to render the UI overlay: {0}")]
    Overlay(String),
}
