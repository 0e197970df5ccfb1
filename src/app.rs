//! Native application shell
//!
//! Opens a fixed-size window, builds the editing session on first resume and
//! routes input: the UI sees every event first, the orbit controls only get
//! what the UI did not capture.

use std::sync::Arc;
use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::{DeviceEvent, DeviceId, ElementState, KeyEvent, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowAttributes, WindowId},
};

use crate::{
    config::EditorConfig,
    editor::{EditorController, EditorSession, RenderLoop, Viewport},
    error::EditorError,
    gfx::rendering::{Overlay, RenderEngine},
    ui::{apply_actions, editor_panel, PanelView, UiManager},
};

/// Runs the editor until the window is closed
pub fn run(config: EditorConfig) -> Result<(), EditorError> {
    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = EditorApp::new(config);
    event_loop.run_app(&mut app)?;

    match app.fatal_error.take() {
        Some(error) => Err(error),
        None => Ok(()),
    }
}

pub struct EditorApp {
    config: EditorConfig,
    state: Option<AppState>,
    fatal_error: Option<EditorError>,
}

struct AppState {
    window: Arc<Window>,
    controller: EditorController<RenderEngine>,
    ui_manager: UiManager,
    render_loop: RenderLoop,
}

impl EditorApp {
    pub fn new(config: EditorConfig) -> Self {
        Self {
            config,
            state: None,
            fatal_error: None,
        }
    }

    fn init(&self, event_loop: &ActiveEventLoop) -> Result<AppState, EditorError> {
        let (width, height) = self.config.window_size;
        let window = Arc::new(
            event_loop.create_window(
                WindowAttributes::default()
                    .with_title(self.config.window_title.clone())
                    .with_inner_size(PhysicalSize::new(width, height))
                    .with_resizable(false),
            )?,
        );

        let size = window.inner_size();
        let viewport = Viewport::new(size.width, size.height);
        let antialias = self.config.antialias;
        let surface_window = window.clone();
        let session = EditorSession::new(
            self.config.clone(),
            viewport,
            Box::new(move |viewport: Viewport| {
                pollster::block_on(RenderEngine::new(
                    surface_window,
                    viewport.width,
                    viewport.height,
                    antialias,
                ))
            }),
        );
        let mut controller = EditorController::new(session);

        // The UI needs the device, so the renderer is built up front
        let renderer = controller.session_mut().resources_mut().renderer()?;
        let ui_manager = UiManager::new(
            renderer.device(),
            renderer.queue(),
            renderer.surface_format(),
            &window,
        );

        Ok(AppState {
            window,
            controller,
            ui_manager,
            render_loop: RenderLoop::new(),
        })
    }
}

impl AppState {
    fn redraw(&mut self) {
        let mut actions = Vec::new();
        {
            let view = PanelView {
                form: self.controller.form(),
                items: self.controller.items(),
                scene: self.controller.session().resources().scene_if_created(),
                frames: self.render_loop.stats(),
            };
            self.ui_manager.update_logic(&self.window, |ui| {
                actions = editor_panel(ui, &view);
            });
        }
        apply_actions(&mut self.controller, actions);

        let overlay: &mut dyn Overlay = &mut self.ui_manager;
        self.render_loop
            .tick(self.controller.session_mut(), Some(overlay));
    }
}

impl ApplicationHandler for EditorApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_some() {
            return;
        }

        match self.init(event_loop) {
            Ok(state) => {
                state.window.request_redraw();
                self.state = Some(state);
            }
            Err(error) => {
                log::error!("Could not start the editor: {}", error);
                self.fatal_error = Some(error);
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, window_id: WindowId, event: WindowEvent) {
        let Some(state) = self.state.as_mut() else {
            return;
        };

        if state
            .ui_manager
            .handle_input(&state.window, window_id, &event)
        {
            state.window.request_redraw();
            return;
        }

        match event {
            WindowEvent::CloseRequested
            | WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        state: ElementState::Pressed,
                        ..
                    },
                ..
            } => {
                event_loop.exit();
            }
            WindowEvent::ModifiersChanged(modifiers) => {
                let resources = state.controller.session_mut().resources_mut();
                if let Some((_, controls)) = resources.camera_and_controls() {
                    controls.handle_modifiers(modifiers.state());
                }
            }
            WindowEvent::MouseInput {
                state: button_state,
                button,
                ..
            } => {
                let resources = state.controller.session_mut().resources_mut();
                if let Some((_, controls)) = resources.camera_and_controls() {
                    controls.handle_mouse_button(button, button_state);
                }
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let resources = state.controller.session_mut().resources_mut();
                if let Some((camera, controls)) = resources.camera_and_controls() {
                    controls.handle_scroll(delta, camera);
                    state.window.request_redraw();
                }
            }
            WindowEvent::RedrawRequested => state.redraw(),
            _ => (),
        }
    }

    fn device_event(&mut self, _event_loop: &ActiveEventLoop, _device_id: DeviceId, event: DeviceEvent) {
        let Some(state) = self.state.as_mut() else {
            return;
        };
        // Drags that started over the panel belong to the panel
        if state.ui_manager.wants_mouse() {
            return;
        }

        if let DeviceEvent::MouseMotion { delta } = event {
            let resources = state.controller.session_mut().resources_mut();
            if let Some((camera, controls)) = resources.camera_and_controls() {
                if controls.handle_mouse_motion(delta, camera) {
                    state.window.request_redraw();
                }
            }
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(state) = self.state.as_ref() {
            state.window.request_redraw();
        }
    }
}
