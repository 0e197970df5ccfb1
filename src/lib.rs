//! Shapeforge
//!
//! A small 3D scene editor built on wgpu, winit and Dear ImGui: pick a shape
//! and a size, spawn it at a random spot in the viewport, and manage the
//! spawned objects from a side panel.

pub mod app;
pub mod config;
pub mod editor;
pub mod error;
pub mod gfx;
pub mod ui;
pub mod wgpu_utils;

// Re-export main types for convenience
pub use app::{run, EditorApp};
pub use config::EditorConfig;
pub use editor::{EditorController, EditorSession, SceneResources};
pub use error::{EditorError, RenderError};
