//! Core rendering functionality
//!
//! Handles the render pipeline, GPU mirrors of scene meshes, and frame
//! presentation.

pub mod frame;
pub mod gpu_mesh;
pub mod pipeline_manager;
pub mod render_engine;

// Re-export main types
pub use frame::{FrameRenderer, Overlay};
pub use gpu_mesh::{DrawMesh, GpuMesh, GpuMeshCache};
pub use pipeline_manager::{PipelineConfig, PipelineManager};
pub use render_engine::RenderEngine;
