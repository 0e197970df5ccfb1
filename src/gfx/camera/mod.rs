//! Camera and orbit controls
//!
//! The [`PerspectiveCamera`] is the registry's camera resource. The
//! [`OrbitControls`] are attached to it once, together with the renderer, and
//! rewrite its eye and target from mouse input.

pub mod orbit_controls;
pub mod perspective;

pub use orbit_controls::{OrbitBounds, OrbitControls};
pub use perspective::{Camera, CameraUniform, PerspectiveCamera, OPENGL_TO_WGPU_MATRIX};
