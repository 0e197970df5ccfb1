use cgmath::{InnerSpace, MetricSpace, Point3, Vector3};
use winit::{
    dpi::PhysicalPosition,
    event::{ElementState, MouseButton, MouseScrollDelta},
    keyboard::ModifiersState,
};

use super::perspective::PerspectiveCamera;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitBounds {
    pub min_distance: f32,
    pub max_distance: f32,
    pub min_pitch: f32,
    pub max_pitch: f32,
}

impl Default for OrbitBounds {
    fn default() -> Self {
        Self {
            min_distance: 0.1,
            // Stays inside the camera's far plane
            max_distance: 9.0,
            min_pitch: -std::f32::consts::FRAC_PI_2 + 0.01,
            max_pitch: std::f32::consts::FRAC_PI_2 - 0.01,
        }
    }
}

/// Mouse-driven orbit around a target point
///
/// Left drag rotates, shift + left drag pans, the wheel zooms. Every change is
/// written straight back into the attached camera's eye and target.
#[derive(Debug, Clone)]
pub struct OrbitControls {
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    pub pan_speed: f32,
    pub bounds: OrbitBounds,
    distance: f32,
    pitch: f32,
    yaw: f32,
    target: Point3<f32>,
    is_mouse_pressed: bool,
    is_shift_held: bool,
}

impl OrbitControls {
    /// Derives the orbit state from the camera's current placement
    pub fn attach(camera: &PerspectiveCamera) -> Self {
        let bounds = OrbitBounds::default();
        let offset = camera.eye - camera.target;
        let distance = offset
            .magnitude()
            .clamp(bounds.min_distance, bounds.max_distance);
        let pitch = (offset.y / distance)
            .clamp(-1.0, 1.0)
            .asin()
            .clamp(bounds.min_pitch, bounds.max_pitch);
        let yaw = offset.x.atan2(offset.z);

        Self {
            rotate_speed: 0.005,
            zoom_speed: 0.1,
            pan_speed: 0.002,
            bounds,
            distance,
            pitch,
            yaw,
            target: camera.target,
            is_mouse_pressed: false,
            is_shift_held: false,
        }
    }

    pub fn distance(&self) -> f32 {
        self.distance
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn target(&self) -> Point3<f32> {
        self.target
    }

    pub fn handle_mouse_button(&mut self, button: MouseButton, state: ElementState) {
        if button == MouseButton::Left {
            self.is_mouse_pressed = state == ElementState::Pressed;
        }
    }

    pub fn handle_modifiers(&mut self, modifiers: ModifiersState) {
        self.is_shift_held = modifiers.shift_key();
    }

    /// Applies raw mouse motion; returns true if the camera moved
    pub fn handle_mouse_motion(&mut self, delta: (f64, f64), camera: &mut PerspectiveCamera) -> bool {
        if !self.is_mouse_pressed {
            return false;
        }

        let (dx, dy) = (delta.0 as f32, delta.1 as f32);
        if self.is_shift_held {
            self.pan(-dx * self.pan_speed, dy * self.pan_speed);
        } else {
            self.yaw -= dx * self.rotate_speed;
            self.pitch = (self.pitch + dy * self.rotate_speed)
                .clamp(self.bounds.min_pitch, self.bounds.max_pitch);
        }
        self.apply(camera);
        true
    }

    pub fn handle_scroll(&mut self, delta: MouseScrollDelta, camera: &mut PerspectiveCamera) {
        let scroll = match delta {
            MouseScrollDelta::LineDelta(_, y) => y,
            MouseScrollDelta::PixelDelta(PhysicalPosition { y, .. }) => y as f32 / 50.0,
        };
        self.zoom(scroll, camera);
    }

    /// Scrolling up moves the eye towards the target
    pub fn zoom(&mut self, scroll: f32, camera: &mut PerspectiveCamera) {
        let factor = (1.0 - scroll * self.zoom_speed).max(0.1);
        self.distance =
            (self.distance * factor).clamp(self.bounds.min_distance, self.bounds.max_distance);
        self.apply(camera);
    }

    /// Moves the target in the view plane, scaled by distance
    fn pan(&mut self, horizontal: f32, vertical: f32) {
        let forward = -self.offset().normalize();
        let right = forward.cross(Vector3::unit_y()).normalize();
        let up = right.cross(forward).normalize();
        self.target += (right * horizontal + up * vertical) * self.distance;
    }

    fn offset(&self) -> Vector3<f32> {
        Vector3::new(
            self.distance * self.yaw.sin() * self.pitch.cos(),
            self.distance * self.pitch.sin(),
            self.distance * self.yaw.cos() * self.pitch.cos(),
        )
    }

    /// Writes the orbit state into the camera
    pub fn apply(&self, camera: &mut PerspectiveCamera) {
        camera.target = self.target;
        camera.eye = self.target + self.offset();
    }

    /// Distance between the camera's eye and the orbit target
    pub fn eye_distance(&self, camera: &PerspectiveCamera) -> f32 {
        camera.eye.distance(self.target)
    }
}
