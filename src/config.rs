//! Editor configuration
//!
//! Everything a host can tune about an editing session. Recipe constants that
//! are fixed by design (camera lens, lights, default material) live next to
//! the code that uses them instead.

use std::ops::RangeInclusive;

/// Random range for the x and y coordinates of spawned objects
pub const XY_RANGE: RangeInclusive<f32> = -0.5..=0.5;

/// Depth range used by the first editor version
pub const Z_RANGE_NARROW: RangeInclusive<f32> = -0.2..=0.2;

/// Depth range used by the later editor versions
pub const Z_RANGE_WIDE: RangeInclusive<f32> = -0.5..=0.5;

/// Geometry size used when the user value drives the scale instead
pub const BASE_GEOMETRY_SIZE: f32 = 0.1;

/// Initial contents of the size field
pub const DEFAULT_SIZE_TEXT: &str = "0.1";

/// How the user supplied size is applied to a new object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SizingMode {
    /// Geometry is built at the requested size and the object keeps scale 1
    #[default]
    Dimensions,
    /// Geometry is built at [`BASE_GEOMETRY_SIZE`] and scaled uniformly
    UniformScale,
}

/// Configuration for one editing session and its window
#[derive(Debug, Clone)]
pub struct EditorConfig {
    pub z_range: RangeInclusive<f32>,
    pub sizing_mode: SizingMode,
    pub antialias: bool,
    pub window_title: String,
    pub window_size: (u32, u32),
    /// Fixed seed for object placement, `None` draws one from the OS
    pub seed: Option<u64>,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            z_range: Z_RANGE_NARROW,
            sizing_mode: SizingMode::Dimensions,
            antialias: true,
            window_title: "Shapeforge".to_string(),
            window_size: (1200, 800),
            seed: None,
        }
    }
}

impl EditorConfig {
    pub fn with_z_range(mut self, z_range: RangeInclusive<f32>) -> Self {
        self.z_range = z_range;
        self
    }

    pub fn with_sizing_mode(mut self, mode: SizingMode) -> Self {
        self.sizing_mode = mode;
        self
    }

    pub fn with_antialias(mut self, antialias: bool) -> Self {
        self.antialias = antialias;
        self
    }

    pub fn with_window_title(mut self, title: &str) -> Self {
        self.window_title = title.to_owned();
        self
    }

    pub fn with_window_size(mut self, width: u32, height: u32) -> Self {
        self.window_size = (width, height);
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_use_narrow_depth_and_dimension_sizing() {
        let config = EditorConfig::default();
        assert_eq!(config.z_range, Z_RANGE_NARROW);
        assert_eq!(config.sizing_mode, SizingMode::Dimensions);
        assert!(config.antialias);
        assert!(config.seed.is_none());
    }

    #[test]
    fn builder_overrides_fields() {
        let config = EditorConfig::default()
            .with_z_range(Z_RANGE_WIDE)
            .with_sizing_mode(SizingMode::UniformScale)
            .with_seed(7)
            .with_window_size(640, 480);

        assert_eq!(config.z_range, Z_RANGE_WIDE);
        assert_eq!(config.sizing_mode, SizingMode::UniformScale);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.window_size, (640, 480));
    }
}
