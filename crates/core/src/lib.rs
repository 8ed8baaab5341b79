//! # powerdeck-core
//!
//! The export facade over the section registry.
//!
//! - **config**: brand, rasterization, report and cache settings
//! - **exporter**: single-section, consolidated-report and all-format exports
//! - **report**: which sections the consolidated report covers
//! - **artifact**: formats and finished files
//!
//! PDF export is always available. DOCX and PPTX sit behind the `docx` and
//! `pptx` features; requesting a format that was compiled out fails with
//! [`ExportError::CapabilityUnavailable`] before any work is done.

pub use powerdeck_capture as capture;
pub use powerdeck_model as model;
pub use powerdeck_raster as raster;

pub mod artifact;
pub mod config;
pub mod error;
pub mod exporter;
pub mod report;

pub use artifact::{ExportArtifact, ExportFormat};
pub use config::{BrandConfig, ExportConfig, LogoSource, ReportConfig, DEFAULT_REPORT_SECTIONS};
pub use error::ExportError;
pub use exporter::Exporter;
pub use report::{collect_report, ReportSection};

pub use capture::{Registry, RenderCache, SectionHandle};
pub use model::{Card, CardGroup, Chart, Trace};
