//! Per-frame driver of the editor viewport
//!
//! The host calls [`RenderLoop::tick`] on every redraw. A failing frame is
//! logged and counted, and the next tick simply tries again.

use crate::gfx::rendering::{FrameRenderer, Overlay};

use super::session::EditorSession;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FrameStats {
    pub rendered: u64,
    pub failed: u64,
}

#[derive(Debug, Default)]
pub struct RenderLoop {
    stats: FrameStats,
    failure_streak: u64,
}

impl RenderLoop {
    pub fn new() -> Self {
        Self::default()
    }

    /// Renders one frame; returns whether it reached the screen
    pub fn tick<R: FrameRenderer>(
        &mut self,
        session: &mut EditorSession<R>,
        overlay: Option<&mut dyn Overlay>,
    ) -> bool {
        match session.render_frame(overlay) {
            Ok(()) => {
                if self.failure_streak > 0 {
                    log::info!("Rendering recovered after {} failed frames", self.failure_streak);
                }
                self.failure_streak = 0;
                self.stats.rendered += 1;
                true
            }
            Err(error) => {
                // Only the first failure of a streak is worth a warning
                if self.failure_streak == 0 {
                    log::warn!("Frame failed: {}", error);
                } else {
                    log::debug!("Frame failed: {}", error);
                }
                self.failure_streak += 1;
                self.stats.failed += 1;
                false
            }
        }
    }

    pub fn stats(&self) -> FrameStats {
        self.stats
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, collections::VecDeque, rc::Rc};

    use super::*;
    use crate::{
        config::EditorConfig,
        editor::registry::Viewport,
        error::{EditorError, RenderError},
        gfx::{camera::PerspectiveCamera, scene::Scene},
    };

    /// Fails the frames scripted as `false`
    struct ScriptedRenderer {
        script: Rc<RefCell<VecDeque<bool>>>,
        seen_meshes: Rc<RefCell<Vec<usize>>>,
    }

    impl FrameRenderer for ScriptedRenderer {
        fn render(
            &mut self,
            scene: &Scene,
            _camera: &PerspectiveCamera,
            _overlay: Option<&mut dyn Overlay>,
        ) -> Result<(), RenderError> {
            self.seen_meshes.borrow_mut().push(scene.mesh_count());
            match self.script.borrow_mut().pop_front() {
                Some(false) => Err(RenderError::Surface(wgpu::SurfaceError::Timeout)),
                _ => Ok(()),
            }
        }
    }

    #[test]
    fn failed_frames_do_not_stop_the_loop() {
        let script = Rc::new(RefCell::new(VecDeque::from([true, false, false, true])));
        let seen = Rc::new(RefCell::new(Vec::new()));
        let (script_handle, seen_handle) = (script.clone(), seen.clone());
        let mut session = EditorSession::new(
            EditorConfig::default().with_seed(3),
            Viewport::new(64, 64),
            Box::new(move |_| {
                Ok(ScriptedRenderer {
                    script: script_handle,
                    seen_meshes: seen_handle,
                })
            }),
        );
        let mut render_loop = RenderLoop::new();

        assert!(render_loop.tick(&mut session, None));
        session.create_object("CUBE", 0.1);
        assert!(!render_loop.tick(&mut session, None));
        assert!(!render_loop.tick(&mut session, None));
        assert!(render_loop.tick(&mut session, None));

        assert_eq!(
            render_loop.stats(),
            FrameStats {
                rendered: 2,
                failed: 2
            }
        );
        assert_eq!(*seen.borrow(), vec![0, 1, 1, 1]);
    }

    #[test]
    fn unavailable_renderer_counts_as_failed_frames() {
        let mut session: EditorSession<ScriptedRenderer> = EditorSession::new(
            EditorConfig::default().with_seed(3),
            Viewport::new(64, 64),
            Box::new(|_| Err(EditorError::RendererUnavailable)),
        );
        let mut render_loop = RenderLoop::new();

        for _ in 0..3 {
            assert!(!render_loop.tick(&mut session, None));
        }
        assert_eq!(render_loop.stats().failed, 3);
        assert_eq!(render_loop.stats().rendered, 0);
    }
}
