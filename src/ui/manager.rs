//! ImGui UI manager
//!
//! Handles ImGui integration with wgpu and winit: input forwarding, frame
//! preparation, and drawing the UI on top of the rendered scene.

use imgui::{Context, FontConfig, FontSource, MouseCursor};
use imgui_wgpu::{Renderer, RendererConfig};
use imgui_winit_support::{HiDpiMode, WinitPlatform};
use std::time::Instant;
use wgpu::{CommandEncoder, Device, Queue, TextureFormat, TextureView};
use winit::{
    event::{Event, WindowEvent},
    window::{Window, WindowId},
};

use crate::{error::RenderError, gfx::rendering::Overlay};

/// ImGui UI manager
///
/// Call [`UiManager::update_logic`] once per frame to build the UI, then hand
/// the manager to the renderer as its [`Overlay`] to draw what was built.
pub struct UiManager {
    pub context: Context,
    platform: WinitPlatform,
    renderer: Renderer,
    last_frame: Instant,
    last_cursor: Option<MouseCursor>,
    frame_ready: bool,
}

impl UiManager {
    /// Creates a new UI manager
    ///
    /// # Arguments
    /// * `device` - WGPU device for creating renderer resources
    /// * `queue` - WGPU queue for renderer operations
    /// * `output_color_format` - Format of the surface the UI is drawn into
    /// * `window` - Window for platform integration
    pub fn new(
        device: &Device,
        queue: &Queue,
        output_color_format: TextureFormat,
        window: &Window,
    ) -> Self {
        let mut context = Context::create();
        context.set_ini_filename(None);

        // Locked DPI keeps panel sizes in physical pixels
        let mut platform = WinitPlatform::new(&mut context);
        platform.attach_window(context.io_mut(), window, HiDpiMode::Locked(1.0));

        let font_size = 18.0;
        context.fonts().add_font(&[FontSource::DefaultFontData {
            config: Some(FontConfig {
                oversample_h: 1,
                pixel_snap_h: true,
                size_pixels: font_size,
                ..Default::default()
            }),
        }]);

        let renderer_config = RendererConfig {
            texture_format: output_color_format,
            ..Default::default()
        };
        let renderer = Renderer::new(&mut context, device, queue, renderer_config);

        Self {
            context,
            platform,
            renderer,
            last_frame: Instant::now(),
            last_cursor: None,
            frame_ready: false,
        }
    }

    /// Forwards an input event and returns whether the UI captured it
    ///
    /// Mouse events count as captured only while ImGui wants the mouse, and
    /// keyboard events only while it wants the keyboard. Captured events must
    /// not reach the orbit controls.
    pub fn handle_input(&mut self, window: &Window, window_id: WindowId, event: &WindowEvent) -> bool {
        let Some(capture) = InputCapture::of(event) else {
            return false;
        };

        let ui_event: Event<()> = Event::WindowEvent {
            window_id,
            event: event.clone(),
        };
        self.platform
            .handle_event(self.context.io_mut(), window, &ui_event);

        let io = self.context.io();
        capture.captured(io.want_capture_mouse, io.want_capture_keyboard)
    }

    pub fn wants_input(&self) -> bool {
        let io = self.context.io();
        io.want_capture_mouse || io.want_capture_keyboard
    }

    pub fn wants_mouse(&self) -> bool {
        self.context.io().want_capture_mouse
    }

    /// Builds this frame's UI and returns whether the UI wants input capture
    ///
    /// If the platform cannot prepare the frame the UI is skipped for this
    /// frame and nothing is drawn.
    pub fn update_logic<F>(&mut self, window: &Window, run_ui: F) -> bool
    where
        F: FnOnce(&imgui::Ui),
    {
        let now = Instant::now();
        self.context
            .io_mut()
            .update_delta_time(now - self.last_frame);
        self.last_frame = now;

        if let Err(error) = self.platform.prepare_frame(self.context.io_mut(), window) {
            log::warn!("Skipping UI frame: {}", error);
            self.frame_ready = false;
            return false;
        }

        let ui = self.context.frame();
        run_ui(ui);

        if self.last_cursor != ui.mouse_cursor() {
            self.last_cursor = ui.mouse_cursor();
            self.platform.prepare_render(ui, window);
        }
        self.frame_ready = true;

        self.wants_input()
    }

    /// Draws the UI built by the last `update_logic()` call
    ///
    /// Loads the existing color attachment so the 3D scene stays underneath.
    pub fn render_display_only(
        &mut self,
        device: &Device,
        queue: &Queue,
        encoder: &mut CommandEncoder,
        color_attachment: &TextureView,
    ) -> Result<(), RenderError> {
        if !self.frame_ready {
            return Ok(());
        }
        self.frame_ready = false;

        let draw_data = self.context.render();
        if draw_data.display_size[0] <= 0.0 || draw_data.display_size[1] <= 0.0 {
            return Ok(());
        }

        let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("imgui_render_pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: color_attachment,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
        });

        self.renderer
            .render(draw_data, queue, device, &mut render_pass)
            .map_err(|error| RenderError::Overlay(format!("{:?}", error)))
    }
}

/// Which ImGui capture flag decides whether an event stays with the UI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InputCapture {
    Mouse,
    Keyboard,
    /// Forwarded to ImGui, never withheld from the viewport
    Never,
}

impl InputCapture {
    /// `None` for events the UI does not consume at all
    fn of(event: &WindowEvent) -> Option<Self> {
        match event {
            WindowEvent::CursorMoved { .. }
            | WindowEvent::MouseInput { .. }
            | WindowEvent::MouseWheel { .. } => Some(InputCapture::Mouse),
            WindowEvent::KeyboardInput { .. } => Some(InputCapture::Keyboard),
            WindowEvent::ModifiersChanged(_) | WindowEvent::Focused(_) => Some(InputCapture::Never),
            _ => None,
        }
    }

    fn captured(self, wants_mouse: bool, wants_keyboard: bool) -> bool {
        match self {
            InputCapture::Mouse => wants_mouse,
            InputCapture::Keyboard => wants_keyboard,
            InputCapture::Never => false,
        }
    }
}

impl Overlay for UiManager {
    fn draw(
        &mut self,
        device: &Device,
        queue: &Queue,
        encoder: &mut CommandEncoder,
        target: &TextureView,
    ) -> Result<(), RenderError> {
        self.render_display_only(device, queue, encoder, target)
    }
}

#[cfg(test)]
mod tests {
    use winit::event::{DeviceId, ElementState, MouseButton, MouseScrollDelta, TouchPhase};

    use super::*;

    fn left_click() -> WindowEvent {
        WindowEvent::MouseInput {
            device_id: DeviceId::dummy(),
            state: ElementState::Pressed,
            button: MouseButton::Left,
        }
    }

    fn scroll() -> WindowEvent {
        WindowEvent::MouseWheel {
            device_id: DeviceId::dummy(),
            delta: MouseScrollDelta::LineDelta(0.0, 1.0),
            phase: TouchPhase::Moved,
        }
    }

    #[test]
    fn keyboard_focus_does_not_swallow_viewport_mouse() {
        for event in [left_click(), scroll()] {
            let capture = InputCapture::of(&event).expect("mouse event");
            assert!(!capture.captured(false, true));
            assert!(capture.captured(true, false));
        }
    }

    #[test]
    fn modifiers_always_reach_the_viewport() {
        let event = WindowEvent::ModifiersChanged(Default::default());
        let capture = InputCapture::of(&event).expect("forwarded to the UI");
        assert!(!capture.captured(true, true));
    }

    #[test]
    fn unrelated_events_are_not_forwarded() {
        assert_eq!(InputCapture::of(&WindowEvent::RedrawRequested), None);
    }
}
