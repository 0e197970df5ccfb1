//! Construct-once registry of the engine resources of one editing session
//!
//! Camera, scene graph, default material and renderer are each built by a
//! fixed recipe the first time they are asked for, and the same instance is
//! handed out on every later access. Nothing is ever rebuilt or torn down
//! before the registry itself is dropped.

use std::{fmt, rc::Rc};

use cgmath::Vector3;

use crate::{
    error::EditorError,
    gfx::{
        camera::{OrbitControls, PerspectiveCamera},
        color::Color,
        resources::material::Material,
        scene::{Light, Scene},
    },
};

pub const BACKGROUND_COLOR: Color = Color::from_hex(0x87ceeb);

pub const AMBIENT_COLOR: Color = Color::from_hex(0xfefff0);
pub const AMBIENT_INTENSITY: f32 = 0.1;

pub const HEMISPHERE_SKY_COLOR: Color = Color::from_hex(0xfffcab);
pub const HEMISPHERE_GROUND_COLOR: Color = Color::from_hex(0xffaeab);
pub const HEMISPHERE_INTENSITY: f32 = 0.2;

pub const POINT_LIGHT_COLOR: Color = Color::from_hex(0xfffed6);
pub const POINT_LIGHT_INTENSITY: f32 = 1.0;
pub const POINT_LIGHT_RANGE: f32 = 5.0;
pub const POINT_LIGHT_POSITION: [f32; 3] = [1.0, 1.0, 1.0];

pub const MATERIAL_NAME: &str = "Shape";
pub const MATERIAL_COLOR: Color = Color::from_hex(0xffb759);
pub const MATERIAL_METALLIC: f32 = 0.0;
pub const MATERIAL_ROUGHNESS: f32 = 1.0;

/// Pixel size of the drawable area, read once per session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Host-supplied constructor for the renderer, consumed by its only call
pub type RendererRecipe<R> = Box<dyn FnOnce(Viewport) -> Result<R, EditorError>>;

enum RendererSlot<R> {
    Pending(RendererRecipe<R>),
    Ready(R),
    Failed,
}

/// Builds the scene graph root with its background and fixed lights
pub fn build_scene() -> Scene {
    let mut scene = Scene::new(BACKGROUND_COLOR);
    scene.add(Light::Ambient {
        color: AMBIENT_COLOR,
        intensity: AMBIENT_INTENSITY,
    });
    scene.add(Light::Hemisphere {
        sky: HEMISPHERE_SKY_COLOR,
        ground: HEMISPHERE_GROUND_COLOR,
        intensity: HEMISPHERE_INTENSITY,
    });
    scene.add(Light::Point {
        color: POINT_LIGHT_COLOR,
        intensity: POINT_LIGHT_INTENSITY,
        distance: POINT_LIGHT_RANGE,
        position: Vector3::from(POINT_LIGHT_POSITION),
    });
    scene
}

/// The single material shared by every created object
pub fn build_material() -> Material {
    Material::new(
        MATERIAL_NAME,
        MATERIAL_COLOR,
        MATERIAL_METALLIC,
        MATERIAL_ROUGHNESS,
    )
    .with_flat_shading(false)
}

/// Lazily constructed engine resources
pub struct SceneResources<R> {
    viewport: Viewport,
    camera: Option<PerspectiveCamera>,
    scene: Option<Scene>,
    material: Option<Rc<Material>>,
    renderer: RendererSlot<R>,
    controls: Option<OrbitControls>,
}

impl<R> SceneResources<R> {
    pub fn new(viewport: Viewport, renderer_recipe: RendererRecipe<R>) -> Self {
        Self {
            viewport,
            camera: None,
            scene: None,
            material: None,
            renderer: RendererSlot::Pending(renderer_recipe),
            controls: None,
        }
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn camera(&mut self) -> &mut PerspectiveCamera {
        let viewport = self.viewport;
        self.camera.get_or_insert_with(|| {
            log::info!(
                "Creating camera for a {}x{} viewport",
                viewport.width,
                viewport.height
            );
            PerspectiveCamera::for_viewport(viewport.width, viewport.height)
        })
    }

    pub fn scene(&mut self) -> &mut Scene {
        self.scene.get_or_insert_with(|| {
            log::info!("Creating scene graph");
            build_scene()
        })
    }

    /// Shared handle to the default material
    pub fn material(&mut self) -> Rc<Material> {
        self.material
            .get_or_insert_with(|| {
                log::info!("Creating default material");
                Rc::new(build_material())
            })
            .clone()
    }

    /// The renderer, constructed by the recipe on first access
    ///
    /// The orbit controls are attached to the camera in the same step. If the
    /// recipe fails its error is returned once; every later call reports
    /// [`EditorError::RendererUnavailable`].
    pub fn renderer(&mut self) -> Result<&mut R, EditorError> {
        let slot = std::mem::replace(&mut self.renderer, RendererSlot::Failed);
        self.renderer = match slot {
            RendererSlot::Pending(recipe) => {
                log::info!("Creating renderer");
                match recipe(self.viewport) {
                    Ok(renderer) => {
                        let controls = OrbitControls::attach(self.camera());
                        self.controls = Some(controls);
                        RendererSlot::Ready(renderer)
                    }
                    Err(error) => {
                        log::error!("Renderer construction failed: {}", error);
                        return Err(error);
                    }
                }
            }
            other => other,
        };

        match &mut self.renderer {
            RendererSlot::Ready(renderer) => Ok(renderer),
            _ => Err(EditorError::RendererUnavailable),
        }
    }

    /// Camera together with its orbit controls, once the renderer exists
    pub fn camera_and_controls(&mut self) -> Option<(&mut PerspectiveCamera, &mut OrbitControls)> {
        match (&mut self.camera, &mut self.controls) {
            (Some(camera), Some(controls)) => Some((camera, controls)),
            _ => None,
        }
    }

    /// Everything one frame needs, constructing whatever is still missing
    pub fn frame_parts(&mut self) -> Result<(&Scene, &PerspectiveCamera, &mut R), EditorError> {
        self.renderer()?;
        self.camera();
        self.scene();

        match (&self.scene, &self.camera, &mut self.renderer) {
            (Some(scene), Some(camera), RendererSlot::Ready(renderer)) => {
                Ok((scene, camera, renderer))
            }
            _ => Err(EditorError::RendererUnavailable),
        }
    }

    /// Read-only view of the scene if it has been constructed
    pub fn scene_if_created(&self) -> Option<&Scene> {
        self.scene.as_ref()
    }

    pub fn renderer_if_ready(&self) -> Option<&R> {
        match &self.renderer {
            RendererSlot::Ready(renderer) => Some(renderer),
            _ => None,
        }
    }

    pub fn has_camera(&self) -> bool {
        self.camera.is_some()
    }

    pub fn has_scene(&self) -> bool {
        self.scene.is_some()
    }

    pub fn has_material(&self) -> bool {
        self.material.is_some()
    }

    pub fn has_controls(&self) -> bool {
        self.controls.is_some()
    }
}

impl<R> fmt::Debug for SceneResources<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let renderer = match self.renderer {
            RendererSlot::Pending(_) => "pending",
            RendererSlot::Ready(_) => "ready",
            RendererSlot::Failed => "failed",
        };
        f.debug_struct("SceneResources")
            .field("viewport", &self.viewport)
            .field("camera", &self.camera.is_some())
            .field("scene", &self.scene.is_some())
            .field("material", &self.material.is_some())
            .field("renderer", &renderer)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;

    #[derive(Debug)]
    struct NullRenderer;

    fn counting_recipe(calls: Rc<Cell<u32>>) -> RendererRecipe<NullRenderer> {
        Box::new(move |_| {
            calls.set(calls.get() + 1);
            Ok(NullRenderer)
        })
    }

    fn resources() -> SceneResources<NullRenderer> {
        SceneResources::new(Viewport::new(800, 400), Box::new(|_| Ok(NullRenderer)))
    }

    #[test]
    fn nothing_is_built_before_first_access() {
        let resources = resources();
        assert!(!resources.has_camera());
        assert!(!resources.has_scene());
        assert!(!resources.has_material());
        assert!(!resources.has_controls());
        assert!(resources.renderer_if_ready().is_none());
    }

    #[test]
    fn camera_is_constructed_once() {
        let mut resources = resources();
        let first = resources.camera() as *const PerspectiveCamera;
        let second = resources.camera() as *const PerspectiveCamera;
        assert!(std::ptr::eq(first, second));
        assert_eq!(resources.camera().aspect, 2.0);
    }

    #[test]
    fn scene_is_constructed_once_with_three_lights() {
        let mut resources = resources();
        let first = resources.scene() as *const Scene;
        resources.scene().add(Light::Ambient {
            color: AMBIENT_COLOR,
            intensity: 1.0,
        });
        let second = resources.scene() as *const Scene;
        assert!(std::ptr::eq(first, second));
        assert_eq!(resources.scene().lights().count(), 4);
        assert_eq!(resources.scene().background, BACKGROUND_COLOR);
    }

    #[test]
    fn material_handles_share_one_instance() {
        let mut resources = resources();
        let first = resources.material();
        let second = resources.material();
        assert!(Rc::ptr_eq(&first, &second));
        assert_eq!(first.base_color, MATERIAL_COLOR);
        assert_eq!(first.metallic, 0.0);
        assert_eq!(first.roughness, 1.0);
        assert!(!first.flat_shading);
    }

    #[test]
    fn renderer_recipe_runs_once_and_attaches_controls() {
        let calls = Rc::new(Cell::new(0));
        let mut resources = SceneResources::new(Viewport::new(10, 10), counting_recipe(calls.clone()));

        let first = resources.renderer().map(|r| r as *const NullRenderer).ok();
        let second = resources.renderer().map(|r| r as *const NullRenderer).ok();
        assert!(first.is_some());
        assert_eq!(first, second);
        assert_eq!(calls.get(), 1);
        assert!(resources.has_controls());
        assert!(resources.camera_and_controls().is_some());
    }

    #[test]
    fn failed_renderer_is_not_retried() {
        let calls = Rc::new(Cell::new(0));
        let counter = calls.clone();
        let mut resources: SceneResources<NullRenderer> = SceneResources::new(
            Viewport::new(10, 10),
            Box::new(move |_| {
                counter.set(counter.get() + 1);
                Err(EditorError::RendererUnavailable)
            }),
        );

        assert!(resources.renderer().is_err());
        assert!(matches!(
            resources.renderer(),
            Err(EditorError::RendererUnavailable)
        ));
        assert_eq!(calls.get(), 1);
        assert!(!resources.has_controls());
    }

    #[test]
    fn recipe_receives_the_session_viewport() {
        let seen = Rc::new(Cell::new(None));
        let sink = seen.clone();
        let mut resources = SceneResources::new(
            Viewport::new(640, 480),
            Box::new(move |viewport| {
                sink.set(Some(viewport));
                Ok(NullRenderer)
            }),
        );
        assert!(resources.renderer().is_ok());
        assert_eq!(seen.get(), Some(Viewport::new(640, 480)));
    }

    #[test]
    fn frame_parts_builds_everything_missing() {
        let mut resources = resources();
        assert!(resources.frame_parts().is_ok());
        assert!(resources.has_camera());
        assert!(resources.has_scene());
        assert!(!resources.has_material());
    }
}
