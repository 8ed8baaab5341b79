//! The unified error type for every export operation.

use powerdeck_pdf_composer::ComposerError;
use powerdeck_render_lopdf::RenderError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExportError {
    /// The requested format was compiled out. Raised before any work is done.
    #[error("{0} export is not available in this build")]
    CapabilityUnavailable(String),

    /// The section captured no charts. Single-section exports still succeed;
    /// this is what `Exporter::check_section` reports.
    #[error("no charts captured for section '{0}'")]
    EmptySection(String),

    #[error("no charts found to export; open the dashboard tabs once so their charts are captured")]
    NothingToExport,

    #[error("PDF error: {0}")]
    Pdf(String),

    #[error("Office document error: {0}")]
    Ooxml(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<RenderError> for ExportError {
    fn from(e: RenderError) -> Self {
        ExportError::Pdf(e.to_string())
    }
}

impl From<ComposerError> for ExportError {
    fn from(e: ComposerError) -> Self {
        ExportError::Pdf(e.to_string())
    }
}

impl From<lopdf::Error> for ExportError {
    fn from(e: lopdf::Error) -> Self {
        ExportError::Pdf(e.to_string())
    }
}

#[cfg(feature = "docx")]
impl From<powerdeck_docx::DocxError> for ExportError {
    fn from(e: powerdeck_docx::DocxError) -> Self {
        ExportError::Ooxml(e.to_string())
    }
}

#[cfg(feature = "pptx")]
impl From<powerdeck_deck::DeckError> for ExportError {
    fn from(e: powerdeck_deck::DeckError) -> Self {
        ExportError::Ooxml(e.to_string())
    }
}
