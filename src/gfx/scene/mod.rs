//! # Scene Graph
//!
//! The retained-mode store of everything the renderer draws: mesh objects and
//! the lights that illuminate them. The scene is the single source of truth for
//! which objects exist; UI lists are derived from it.
//!
//! ## Key Components
//!
//! - [`Scene`] - Root container holding children in insertion order
//! - [`SceneNode`] - A child with its engine-assigned [`ObjectId`]
//! - [`Mesh`] - Geometry plus a shared material, positioned and scaled
//! - [`Light`] - Ambient, hemisphere and point lights
//! - [`Vertex3D`] - GPU vertex format
//!
//! ## Usage
//!
//! ```rust
//! use std::rc::Rc;
//! use shapeforge::gfx::{color::Color, geometry::ShapeKind, resources::material::Material};
//! use shapeforge::gfx::scene::{Mesh, Scene};
//!
//! let mut scene = Scene::new(Color::from_hex(0x87ceeb));
//! let material = Rc::new(Material::default());
//! let id = scene.add(Mesh::new(ShapeKind::Cube.geometry(0.1), material));
//!
//! assert!(scene.get_mesh(id).is_some());
//! scene.remove(id);
//! assert_eq!(scene.mesh_count(), 0);
//! ```

pub mod light;
pub mod object;
pub mod scene;
pub mod vertex;

// Re-export main types
pub use light::Light;
pub use object::{Mesh, NodeKind, ObjectId, SceneNode};
pub use scene::{Scene, SceneStatistics};
pub use vertex::Vertex3D;
