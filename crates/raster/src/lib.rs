//! Chart rasterization for the paginated and slide-deck exporters.
//!
//! A [`ChartRasterizer`] turns a chart into a [`Bitmap`] at one
//! [`QualityPreset`]. [`rasterize_with_fallback`] walks an ordered preset list
//! from the highest resolution down and returns the first bitmap that could be
//! produced, so one oversized chart never takes a whole export down.

mod bitmap;
mod error;
mod fallback;
mod fonts;
mod palette;
mod plot;
mod preset;

pub use bitmap::Bitmap;
pub use error::RasterError;
pub use fallback::{rasterize_for_export, rasterize_with_fallback, ChartRasterizer, Rasterized};
pub use fonts::{ensure_fonts, FontStatus};
pub use palette::{series_color, DEFAULT_PALETTE};
pub use plot::PlottersRasterizer;
pub use preset::{default_presets, QualityPreset, RasterConfig};
