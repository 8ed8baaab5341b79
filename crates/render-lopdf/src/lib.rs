//! Section PDFs: a header with logos and title, KPI tile rows, and a grid of
//! rasterized charts on one landscape A4 page, written with lopdf.

mod canvas;
mod error;
mod exporter;
mod grid;
mod layout;
mod text;
mod tiles;

pub use canvas::{PageCanvas, PdfFont};
pub use error::RenderError;
pub use exporter::{GridPdfExporter, HeaderLogos, PdfExport, SkippedChart};
pub use grid::{cell_rects, GridSpec};
pub use layout::PageLayout;
pub use text::{pdf_safe_text, text_width, to_win_ansi};
