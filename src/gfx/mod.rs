//! # Graphics Module
//!
//! Everything between the editor and the GPU: the scene graph, procedural
//! geometry, the camera with its orbit controls, and the `wgpu` renderer.
//!
//! ## Architecture Overview
//!
//! - **Scene Graph** ([`scene`]) - Meshes and lights in insertion order
//! - **Geometry** ([`geometry`]) - Shape descriptors and tessellation
//! - **Camera System** ([`camera`]) - Perspective camera and orbit controls
//! - **Rendering Pipeline** ([`rendering`]) - Lit mesh pipeline with MSAA
//! - **Resource Management** ([`resources`]) - Materials, uniforms, render targets
//!
//! Only [`rendering`] and [`resources`] touch the GPU. The scene, geometry and
//! camera are plain data, which keeps the editor testable without a device.

pub mod camera;
pub mod color;
pub mod geometry;
pub mod rendering;
pub mod resources;
pub mod scene;

// Re-export commonly used types
pub use camera::{OrbitControls, PerspectiveCamera};
pub use color::Color;
pub use rendering::{FrameRenderer, Overlay, RenderEngine};
pub use scene::Scene;
