//! sRGB colors as used by the scene recipes

/// An sRGB color with components in `0.0..=1.0`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Builds a color from a `0xRRGGBB` literal
    pub const fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xff) as f32 / 255.0,
            g: ((hex >> 8) & 0xff) as f32 / 255.0,
            b: (hex & 0xff) as f32 / 255.0,
        }
    }

    /// Converts to linear space for lighting math
    pub fn to_linear(self) -> [f32; 3] {
        [
            srgb_to_linear(self.r),
            srgb_to_linear(self.g),
            srgb_to_linear(self.b),
        ]
    }

    /// Linear color scaled by `intensity`, padded with `w`
    pub fn to_linear_vec4(self, intensity: f32, w: f32) -> [f32; 4] {
        let [r, g, b] = self.to_linear();
        [r * intensity, g * intensity, b * intensity, w]
    }

    /// Clear color for a non-sRGB surface; the shader gamma-encodes its own output
    pub fn to_wgpu(self) -> wgpu::Color {
        wgpu::Color {
            r: self.r as f64,
            g: self.g as f64,
            b: self.b as f64,
            a: 1.0,
        }
    }
}

fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_components_are_normalized() {
        let sky_blue = Color::from_hex(0x87ceeb);
        assert_eq!(sky_blue, Color::new(135.0 / 255.0, 206.0 / 255.0, 235.0 / 255.0));
    }

    #[test]
    fn linear_conversion_keeps_extremes() {
        assert_eq!(Color::new(0.0, 1.0, 0.0).to_linear(), [0.0, 1.0, 0.0]);
        let mid = Color::new(0.5, 0.5, 0.5).to_linear()[0];
        assert!((mid - 0.214).abs() < 1e-3);
    }
}
