//! The editor side panel
//!
//! The panel only reads state and returns the edits the user made this frame
//! as [`PanelAction`]s. They are applied after the UI is built, so the object
//! list is never mutated while it is being drawn.

use crate::{
    editor::{EditorController, FormState, FrameStats, ListItem},
    gfx::{geometry::ShapeKind, rendering::FrameRenderer, scene::ObjectId, scene::Scene},
};

/// One user edit coming out of the panel
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelAction {
    SetShape(String),
    SetSizeText(String),
    Create,
    Delete(ObjectId),
}

/// Read-only state the panel displays
pub struct PanelView<'a> {
    pub form: &'a FormState,
    pub items: &'a [ListItem],
    pub scene: Option<&'a Scene>,
    pub frames: FrameStats,
}

/// Draws the shape form and the object list
pub fn editor_panel(ui: &imgui::Ui, view: &PanelView<'_>) -> Vec<PanelAction> {
    let mut actions = Vec::new();
    let display_size = ui.io().display_size;
    if display_size[0] <= 0.0 || display_size[1] <= 0.0 {
        return actions;
    }

    ui.window("Shapes")
        .position([16.0, 16.0], imgui::Condition::FirstUseEver)
        .size([280.0, (display_size[1] - 32.0).max(200.0)], imgui::Condition::FirstUseEver)
        .collapsible(true)
        .build(|| {
            render_form(ui, view.form, &mut actions);
            ui.separator();
            render_object_list(ui, view.items, &mut actions);
            render_scene_info(ui, view);
        });

    actions
}

fn render_form(ui: &imgui::Ui, form: &FormState, actions: &mut Vec<PanelAction>) {
    let mut size_text = form.size_text.clone();
    if ui.input_text("Size", &mut size_text).build() {
        actions.push(PanelAction::SetSizeText(size_text));
    }

    let labels: Vec<&str> = ShapeKind::ALL.iter().map(|kind| kind.label()).collect();
    let mut selected = ShapeKind::ALL
        .iter()
        .position(|kind| kind.key() == form.shape_key)
        .unwrap_or(0);
    if ui.combo_simple_string("Shape", &mut selected, &labels) {
        if let Some(kind) = ShapeKind::ALL.get(selected) {
            actions.push(PanelAction::SetShape(kind.key().to_string()));
        }
    }

    if ui.button("Create") {
        actions.push(PanelAction::Create);
    }
}

fn render_object_list(ui: &imgui::Ui, items: &[ListItem], actions: &mut Vec<PanelAction>) {
    ui.text(format!("Objects ({})", items.len()));

    if items.is_empty() {
        ui.text_disabled("Nothing created yet");
        return;
    }

    ui.child_window("object_list")
        .size([0.0, 0.0])
        .border(true)
        .build(|| {
            for item in items {
                ui.text(&item.label);
                ui.same_line();
                if ui.small_button(format!("x##delete_{}", item.id)) {
                    actions.push(PanelAction::Delete(item.id));
                }
            }
        });
}

fn render_scene_info(ui: &imgui::Ui, view: &PanelView<'_>) {
    if !ui.collapsing_header("Scene info", imgui::TreeNodeFlags::empty()) {
        return;
    }

    if let Some(scene) = view.scene {
        let stats = scene.get_statistics();
        ui.text(format!("Meshes: {}", stats.object_count));
        ui.text(format!("Lights: {}", stats.light_count));
        ui.text(format!("Triangles: {}", stats.total_triangles));
        ui.text(format!("Vertices: {}", stats.total_vertices));
    }
    ui.text(format!(
        "Frames: {} drawn, {} failed",
        view.frames.rendered, view.frames.failed
    ));
}

/// Applies the panel's edits in the order the user made them
pub fn apply_actions<R: FrameRenderer>(controller: &mut EditorController<R>, actions: Vec<PanelAction>) {
    for action in actions {
        match action {
            PanelAction::SetShape(key) => controller.set_shape(&key),
            PanelAction::SetSizeText(text) => controller.set_size_text(&text),
            PanelAction::Create => {
                controller.submit();
            }
            PanelAction::Delete(id) => {
                controller.delete(id);
            }
        }
    }
}
