//! GPU resource management
//!
//! Handles render targets, uniform buffers, and bind groups for rendering.

pub mod global_bindings;
pub mod material;
pub mod texture_resource;

// Re-export main types
pub use global_bindings::{GlobalBindings, GlobalUniform};
pub use material::{Material, MaterialBindings, MaterialUniform};
pub use texture_resource::TextureResource;
