//! WGPU utility functions and helpers
//!
//! Small wrappers for the bind group plumbing shared by the render engine.

pub mod binding_types;
pub mod uniform_buffer;

pub use uniform_buffer::UniformBuffer;
