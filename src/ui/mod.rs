//! # User Interface Module
//!
//! A Dear ImGui side panel drawn over the 3D viewport.
//!
//! - [`UiManager`] - ImGui integration with winit and wgpu, drawn as a frame overlay
//! - [`panel`] - The shape form and object list
//!
//! When the UI wants the mouse, input does not reach the orbit controls.

pub mod manager;
pub mod panel;

// Re-export main types
pub use manager::UiManager;
pub use panel::{apply_actions, editor_panel, PanelAction, PanelView};
