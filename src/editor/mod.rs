//! # Editor Core
//!
//! The GPU-independent heart of the application: a session owning the lazily
//! built engine resources, the create and delete operations, the controller
//! holding form state and the derived object list, and the render loop.
//!
//! ## Key Components
//!
//! - [`SceneResources`] - Construct-once camera, scene, material and renderer
//! - [`EditorSession`] - Create, delete and list operations on the scene
//! - [`EditorController`] - Form state plus the mirrored object list
//! - [`RenderLoop`] - Fail-soft per-frame driver
//!
//! ## Usage
//!
//! ```rust
//! use shapeforge::config::EditorConfig;
//! use shapeforge::editor::{EditorController, EditorSession, Viewport};
//! use shapeforge::error::RenderError;
//! use shapeforge::gfx::{camera::PerspectiveCamera, rendering::{FrameRenderer, Overlay}, scene::Scene};
//!
//! struct Headless;
//!
//! impl FrameRenderer for Headless {
//!     fn render(
//!         &mut self,
//!         _scene: &Scene,
//!         _camera: &PerspectiveCamera,
//!         _overlay: Option<&mut dyn Overlay>,
//!     ) -> Result<(), RenderError> {
//!         Ok(())
//!     }
//! }
//!
//! let session = EditorSession::new(
//!     EditorConfig::default(),
//!     Viewport::new(1200, 800),
//!     Box::new(|_| Ok(Headless)),
//! );
//! let mut controller = EditorController::new(session);
//!
//! controller.set_shape("SPHERE");
//! let id = controller.submit().unwrap();
//! assert_eq!(controller.items()[0].label, id.to_string());
//!
//! controller.delete(id);
//! assert!(controller.items().is_empty());
//! ```

pub mod controller;
pub mod registry;
pub mod render_loop;
pub mod session;

pub use controller::{coerce_size, EditorController, FormState};
pub use registry::{RendererRecipe, SceneResources, Viewport};
pub use render_loop::{FrameStats, RenderLoop};
pub use session::{EditorSession, ListItem};
