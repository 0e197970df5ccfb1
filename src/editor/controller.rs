//! Form state and the mirrored object list behind the side panel

use crate::{
    config::DEFAULT_SIZE_TEXT,
    gfx::{geometry::ShapeKind, rendering::FrameRenderer, scene::ObjectId},
};

use super::session::{EditorSession, ListItem};

/// Coerces the size field the way a loose numeric cast would
///
/// Blank text is `0`, anything unparsable is `NaN`. Of the spelled-out
/// forms only `Infinity` is accepted; `inf` or `nan` spellings are `NaN`. No
/// range checks: zero, negative and fractional sizes go through unchanged.
pub fn coerce_size(text: &str) -> f32 {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return 0.0;
    }
    let unsigned = trimmed.strip_prefix(['+', '-']).unwrap_or(trimmed);
    if unsigned.starts_with(|c: char| c.is_ascii_alphabetic()) && unsigned != "Infinity" {
        return f32::NAN;
    }
    trimmed.parse().unwrap_or(f32::NAN)
}

/// Transient user input, changed only by explicit edits
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormState {
    pub shape_key: String,
    pub size_text: String,
}

impl Default for FormState {
    fn default() -> Self {
        Self {
            shape_key: ShapeKind::Cube.key().to_string(),
            size_text: DEFAULT_SIZE_TEXT.to_string(),
        }
    }
}

/// Owns the form and keeps the displayed list in step with the scene
pub struct EditorController<R> {
    session: EditorSession<R>,
    form: FormState,
    items: Vec<ListItem>,
}

impl<R: FrameRenderer> EditorController<R> {
    /// The list starts empty; the scene is not touched until the first edit
    pub fn new(session: EditorSession<R>) -> Self {
        Self {
            session,
            form: FormState::default(),
            items: Vec::new(),
        }
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn set_shape(&mut self, shape_key: &str) {
        self.form.shape_key = shape_key.to_string();
    }

    pub fn set_size_text(&mut self, size_text: &str) {
        self.form.size_text = size_text.to_string();
    }

    /// Creates an object from the current form, then re-derives the list
    pub fn submit(&mut self) -> Option<ObjectId> {
        let size = coerce_size(&self.form.size_text);
        let created = self.session.create_object(&self.form.shape_key, size);
        self.sync_list();
        created
    }

    /// Deletes an object by identity, then re-derives the list
    pub fn delete(&mut self, id: ObjectId) -> bool {
        let deleted = self.session.delete_object(id);
        self.sync_list();
        deleted
    }

    pub fn items(&self) -> &[ListItem] {
        &self.items
    }

    pub fn session(&self) -> &EditorSession<R> {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut EditorSession<R> {
        &mut self.session
    }

    fn sync_list(&mut self) {
        self.items = self.session.refresh_list();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::EditorConfig,
        editor::registry::Viewport,
        error::RenderError,
        gfx::{camera::PerspectiveCamera, rendering::Overlay, scene::Scene},
    };

    struct NoopRenderer;

    impl FrameRenderer for NoopRenderer {
        fn render(
            &mut self,
            _scene: &Scene,
            _camera: &PerspectiveCamera,
            _overlay: Option<&mut dyn Overlay>,
        ) -> Result<(), RenderError> {
            Ok(())
        }
    }

    fn controller() -> EditorController<NoopRenderer> {
        let session = EditorSession::new(
            EditorConfig::default().with_seed(1),
            Viewport::new(100, 100),
            Box::new(|_| Ok(NoopRenderer)),
        );
        EditorController::new(session)
    }

    #[test]
    fn coerce_size_mirrors_loose_cast() {
        assert_eq!(coerce_size("0.25"), 0.25);
        assert_eq!(coerce_size(" 2 "), 2.0);
        assert_eq!(coerce_size(""), 0.0);
        assert_eq!(coerce_size("   "), 0.0);
        assert_eq!(coerce_size("-1"), -1.0);
        assert!(coerce_size("big").is_nan());
        assert!(coerce_size("inf").is_nan());
        assert!(coerce_size("-infinity").is_nan());
        assert!(coerce_size("NaN").is_nan());
        assert_eq!(coerce_size("Infinity"), f32::INFINITY);
        assert_eq!(coerce_size("-Infinity"), f32::NEG_INFINITY);
    }

    #[test]
    fn form_starts_with_cube_and_default_size() {
        let controller = controller();
        assert_eq!(controller.form().shape_key, "CUBE");
        assert_eq!(controller.form().size_text, "0.1");
        assert!(controller.items().is_empty());
        assert!(!controller.session().resources().has_scene());
    }

    #[test]
    fn submit_adds_one_list_item_and_keeps_the_form() {
        let mut controller = controller();
        controller.set_shape("SPHERE");
        controller.set_size_text("0.3");

        let id = controller.submit().unwrap();
        assert_eq!(controller.items(), &[ListItem::new(id)]);
        assert_eq!(controller.items()[0].label, id.to_string());
        assert_eq!(controller.form().shape_key, "SPHERE");
        assert_eq!(controller.form().size_text, "0.3");
    }

    #[test]
    fn delete_removes_the_list_item() {
        let mut controller = controller();
        let a = controller.submit().unwrap();
        let b = controller.submit().unwrap();

        assert!(controller.delete(a));
        assert_eq!(controller.items(), &[ListItem::new(b)]);
        assert!(!controller.delete(a));
        assert_eq!(controller.items(), &[ListItem::new(b)]);
    }

    #[test]
    fn unknown_shape_submits_nothing() {
        let mut controller = controller();
        controller.submit();
        controller.set_shape("TORUS");

        assert!(controller.submit().is_none());
        assert_eq!(controller.items().len(), 1);
    }

    #[test]
    fn unparsable_size_still_creates_an_object() {
        let mut controller = controller();
        controller.set_size_text("abc");
        let id = controller.submit().unwrap();

        let scene = controller.session_mut().resources_mut().scene();
        let mesh = scene.get_mesh(id).unwrap();
        assert!(matches!(
            mesh.geometry,
            crate::gfx::geometry::GeometryDescriptor::Box { width, .. } if width.is_nan()
        ));
    }
}
