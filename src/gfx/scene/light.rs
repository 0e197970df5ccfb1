//! Scene lights

use cgmath::Vector3;

use crate::gfx::color::Color;

/// A light source living in the scene graph
#[derive(Debug, Clone, PartialEq)]
pub enum Light {
    /// Uniform light from every direction
    Ambient { color: Color, intensity: f32 },
    /// Sky color from above blending into ground color from below
    Hemisphere {
        sky: Color,
        ground: Color,
        intensity: f32,
    },
    /// Omnidirectional light fading out completely at `distance`
    Point {
        color: Color,
        intensity: f32,
        distance: f32,
        position: Vector3<f32>,
    },
}
