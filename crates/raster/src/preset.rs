use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// One rasterization attempt: a logical canvas and a pixel multiplier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityPreset {
    pub name: String,
    pub width: u32,
    pub height: u32,
    #[serde(default = "default_scale")]
    pub scale: u32,
}

fn default_scale() -> u32 {
    1
}

impl QualityPreset {
    pub fn new(name: impl Into<String>, width: u32, height: u32, scale: u32) -> Self {
        Self {
            name: name.into(),
            width,
            height,
            scale,
        }
    }

    pub fn pixel_width(&self) -> u64 {
        self.width as u64 * self.scale as u64
    }

    pub fn pixel_height(&self) -> u64 {
        self.height as u64 * self.scale as u64
    }

    pub fn pixels(&self) -> u64 {
        self.pixel_width() * self.pixel_height()
    }

    pub fn is_valid(&self) -> bool {
        self.width > 0 && self.height > 0 && self.scale > 0
    }
}

/// The fallback chain, highest quality first.
pub fn default_presets() -> Vec<QualityPreset> {
    vec![
        QualityPreset::new("ultra", 2000, 1200, 2),
        QualityPreset::new("high", 1600, 960, 2),
        QualityPreset::new("medium", 1600, 960, 1),
        QualityPreset::new("low", 1200, 720, 1),
        QualityPreset::new("minimal", 800, 480, 1),
    ]
}

/// Rasterizer settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RasterConfig {
    /// Tried in order until one succeeds.
    pub presets: Vec<QualityPreset>,
    /// Upper bound on `width * height * scale^2`; larger presets fail before allocating.
    pub max_pixels: u64,
    /// TrueType/OpenType file used for chart text instead of a system font.
    pub font_path: Option<PathBuf>,
}

impl Default for RasterConfig {
    fn default() -> Self {
        Self {
            presets: default_presets(),
            max_pixels: 8_000_000,
            font_path: None,
        }
    }
}
