//! An editing session: the resource registry plus the operations on it
//!
//! Every mutation of the scene goes through [`EditorSession`]. After a
//! mutation the caller re-derives the display list with
//! [`EditorSession::refresh_list`]; the scene graph stays the only
//! authoritative record of which objects exist.

use cgmath::Vector3;
use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::{
    config::{EditorConfig, SizingMode, BASE_GEOMETRY_SIZE, XY_RANGE},
    error::EditorError,
    gfx::{
        geometry::create_geometry,
        rendering::{FrameRenderer, Overlay},
        scene::{Mesh, ObjectId},
    },
};

use super::registry::{RendererRecipe, SceneResources, Viewport};

/// Display projection of one scene object
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListItem {
    pub id: ObjectId,
    pub label: String,
}

impl ListItem {
    pub fn new(id: ObjectId) -> Self {
        Self {
            id,
            label: id.to_string(),
        }
    }
}

pub struct EditorSession<R> {
    resources: SceneResources<R>,
    config: EditorConfig,
    rng: StdRng,
}

impl<R: FrameRenderer> EditorSession<R> {
    pub fn new(config: EditorConfig, viewport: Viewport, renderer_recipe: RendererRecipe<R>) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        Self {
            resources: SceneResources::new(viewport, renderer_recipe),
            config,
            rng,
        }
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn resources(&self) -> &SceneResources<R> {
        &self.resources
    }

    pub fn resources_mut(&mut self) -> &mut SceneResources<R> {
        &mut self.resources
    }

    /// Creates an object, or reports why none was created
    ///
    /// The shape is validated before anything else happens, so an
    /// unsupported key leaves the session untouched.
    pub fn try_create_object(&mut self, shape_key: &str, size: f32) -> Result<ObjectId, EditorError> {
        let geometry_size = match self.config.sizing_mode {
            SizingMode::Dimensions => size,
            SizingMode::UniformScale => BASE_GEOMETRY_SIZE,
        };
        let geometry = create_geometry(shape_key, geometry_size)?;

        let mut mesh = Mesh::new(geometry, self.resources.material());
        if self.config.sizing_mode == SizingMode::UniformScale {
            mesh.set_uniform_scale(size);
        }
        mesh.set_position(self.random_position());

        let kind = geometry.kind_name();
        let position = mesh.position;
        let id = self.resources.scene().add(mesh);
        log::debug!("Created {} {} (size {}) at {:?}", kind, id, size, position);
        Ok(id)
    }

    /// Creates an object; unsupported shapes are a silent no-op
    pub fn create_object(&mut self, shape_key: &str, size: f32) -> Option<ObjectId> {
        match self.try_create_object(shape_key, size) {
            Ok(id) => Some(id),
            Err(error) => {
                log::debug!("Create request ignored: {}", error);
                None
            }
        }
    }

    /// Removes a mesh object, or reports that it is not in the scene
    pub fn try_delete_object(&mut self, id: ObjectId) -> Result<(), EditorError> {
        let scene = self.resources.scene();
        if scene.get_mesh(id).is_none() {
            return Err(EditorError::ObjectNotFound(id));
        }
        scene.remove(id);
        log::debug!("Deleted object {}", id);
        Ok(())
    }

    /// Removes a mesh object; absent identities are a silent no-op
    pub fn delete_object(&mut self, id: ObjectId) -> bool {
        match self.try_delete_object(id) {
            Ok(()) => true,
            Err(error) => {
                log::debug!("Delete request ignored: {}", error);
                false
            }
        }
    }

    /// Derives the display list from the scene's mesh children, in order
    pub fn refresh_list(&mut self) -> Vec<ListItem> {
        self.resources
            .scene()
            .meshes()
            .map(|(id, _)| ListItem::new(id))
            .collect()
    }

    /// Identities of all mesh children, in insertion order
    pub fn object_ids(&mut self) -> Vec<ObjectId> {
        self.resources.scene().meshes().map(|(id, _)| id).collect()
    }

    /// Draws the current scene through the current camera
    pub fn render_frame(&mut self, overlay: Option<&mut dyn Overlay>) -> Result<(), EditorError> {
        let (scene, camera, renderer) = self.resources.frame_parts()?;
        renderer.render(scene, camera, overlay)?;
        Ok(())
    }

    fn random_position(&mut self) -> Vector3<f32> {
        Vector3::new(
            self.rng.random_range(XY_RANGE),
            self.rng.random_range(XY_RANGE),
            self.rng.random_range(self.config.z_range.clone()),
        )
    }
}

#[cfg(test)]
mod tests {
    use std::{collections::HashSet, rc::Rc};

    use super::*;
    use crate::{
        config::{Z_RANGE_NARROW, Z_RANGE_WIDE},
        error::RenderError,
        gfx::{camera::PerspectiveCamera, geometry::GeometryDescriptor, scene::Scene},
    };

    #[derive(Default)]
    struct CountingRenderer {
        frames: usize,
        last_mesh_count: usize,
    }

    impl FrameRenderer for CountingRenderer {
        fn render(
            &mut self,
            scene: &Scene,
            _camera: &PerspectiveCamera,
            _overlay: Option<&mut dyn Overlay>,
        ) -> Result<(), RenderError> {
            self.frames += 1;
            self.last_mesh_count = scene.mesh_count();
            Ok(())
        }
    }

    fn session(config: EditorConfig) -> EditorSession<CountingRenderer> {
        EditorSession::new(
            config.with_seed(7),
            Viewport::new(1200, 800),
            Box::new(|_| Ok(CountingRenderer::default())),
        )
    }

    fn list_matches_scene(session: &mut EditorSession<CountingRenderer>) -> bool {
        let listed: HashSet<ObjectId> = session.refresh_list().into_iter().map(|item| item.id).collect();
        let meshes: HashSet<ObjectId> = session.object_ids().into_iter().collect();
        listed == meshes
    }

    #[test]
    fn created_objects_share_the_default_material() {
        let mut session = session(EditorConfig::default());
        let a = session.create_object("CUBE", 0.1).unwrap();
        let b = session.create_object("SPHERE", 0.1).unwrap();

        let scene = session.resources_mut().scene();
        let first = scene.get_mesh(a).unwrap().material.clone();
        let second = scene.get_mesh(b).unwrap().material.clone();
        assert!(Rc::ptr_eq(&first, &second));
    }

    #[test]
    fn cube_of_size_two_has_edges_of_two() {
        let mut session = session(EditorConfig::default());
        let id = session.create_object("CUBE", 2.0).unwrap();
        let mesh = session.resources_mut().scene().get_mesh(id).unwrap().clone();
        assert_eq!(
            mesh.geometry,
            GeometryDescriptor::Box {
                width: 2.0,
                height: 2.0,
                depth: 2.0
            }
        );
        assert_eq!(mesh.scale, Vector3::new(1.0, 1.0, 1.0));
    }

    #[test]
    fn uniform_scale_mode_scales_base_geometry() {
        let mut session = session(EditorConfig::default().with_sizing_mode(SizingMode::UniformScale));
        let id = session.create_object("CUBE", 3.0).unwrap();
        let mesh = session.resources_mut().scene().get_mesh(id).unwrap().clone();
        assert_eq!(
            mesh.geometry,
            GeometryDescriptor::Box {
                width: BASE_GEOMETRY_SIZE,
                height: BASE_GEOMETRY_SIZE,
                depth: BASE_GEOMETRY_SIZE
            }
        );
        assert_eq!(mesh.scale, Vector3::new(3.0, 3.0, 3.0));
    }

    #[test]
    fn unsupported_shape_changes_nothing() {
        let mut session = session(EditorConfig::default());
        session.create_object("CUBE", 0.1);
        let before = session.refresh_list();

        assert!(session.create_object("TORUS", 0.1).is_none());
        assert!(matches!(
            session.try_create_object("TORUS", 0.1),
            Err(EditorError::UnsupportedShape(key)) if key == "TORUS"
        ));
        assert_eq!(session.refresh_list(), before);
        assert_eq!(session.resources_mut().scene().children().len(), 4);
    }

    #[test]
    fn deleting_an_absent_object_changes_nothing() {
        let mut session = session(EditorConfig::default());
        let id = session.create_object("CYLINDER", 0.1).unwrap();
        assert!(session.delete_object(id));
        let before = session.refresh_list();

        assert!(!session.delete_object(id));
        assert!(matches!(
            session.try_delete_object(id),
            Err(EditorError::ObjectNotFound(missing)) if missing == id
        ));
        assert_eq!(session.refresh_list(), before);
    }

    #[test]
    fn lights_cannot_be_deleted() {
        let mut session = session(EditorConfig::default());
        let light_ids: Vec<ObjectId> = session
            .resources_mut()
            .scene()
            .children()
            .iter()
            .map(|child| child.id())
            .collect();

        for id in light_ids {
            assert!(!session.delete_object(id));
        }
        assert_eq!(session.resources_mut().scene().lights().count(), 3);
    }

    #[test]
    fn list_tracks_scene_through_mixed_operations() {
        let mut session = session(EditorConfig::default());
        let mut created = Vec::new();
        for (i, shape) in ["CUBE", "SPHERE", "CYLINDER", "TORUS"].iter().cycle().take(20).enumerate() {
            if let Some(id) = session.create_object(shape, 0.05) {
                created.push(id);
            }
            if i % 3 == 2 {
                if let Some(id) = created.first().copied() {
                    session.delete_object(id);
                    created.remove(0);
                }
            }
            assert!(list_matches_scene(&mut session));
        }

        let labels: Vec<String> = session.refresh_list().into_iter().map(|item| item.label).collect();
        let expected: Vec<String> = created.iter().map(ObjectId::to_string).collect();
        assert_eq!(labels, expected);
    }

    #[test]
    fn positions_stay_in_range() {
        for z_range in [Z_RANGE_NARROW, Z_RANGE_WIDE] {
            let mut session = session(EditorConfig::default().with_z_range(z_range.clone()));
            for _ in 0..1000 {
                let id = session.create_object("CUBE", 0.01).unwrap();
                let position = session.resources_mut().scene().get_mesh(id).unwrap().position;
                assert!(XY_RANGE.contains(&position.x));
                assert!(XY_RANGE.contains(&position.y));
                assert!(z_range.contains(&position.z));
            }
        }
    }

    #[test]
    fn same_seed_gives_same_layout() {
        let mut a = session(EditorConfig::default());
        let mut b = session(EditorConfig::default());
        let pa = {
            let id = a.create_object("CUBE", 0.1).unwrap();
            a.resources_mut().scene().get_mesh(id).unwrap().position
        };
        let pb = {
            let id = b.create_object("CUBE", 0.1).unwrap();
            b.resources_mut().scene().get_mesh(id).unwrap().position
        };
        assert_eq!(pa, pb);
    }

    #[test]
    fn render_frame_draws_current_scene() {
        let mut session = session(EditorConfig::default());
        session.create_object("SPHERE", 0.1);
        session.render_frame(None).unwrap();

        let renderer = session.resources().renderer_if_ready().unwrap();
        assert_eq!(renderer.frames, 1);
        assert_eq!(renderer.last_mesh_count, 1);
    }
}
