#![allow(dead_code)]

pub mod fixtures;
pub mod pdf_assertions;

use lopdf::Document as LopdfDocument;
use powerdeck::raster::{Bitmap, ChartRasterizer, QualityPreset, RasterError};
use powerdeck::{Chart, ExportConfig, Exporter};
use std::io::{Cursor, Read};

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

/// Wrapper around an exported PDF with helper methods
pub struct GeneratedPdf {
    pub bytes: Vec<u8>,
    pub doc: LopdfDocument,
}

impl GeneratedPdf {
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, Box<dyn std::error::Error>> {
        let doc = LopdfDocument::load_mem(&bytes)?;
        Ok(Self { bytes, doc })
    }

    pub fn page_count(&self) -> usize {
        self.doc.get_pages().len()
    }

    /// Save PDF to a file for manual debugging
    pub fn save_for_debug(&self, name: &str) -> std::io::Result<()> {
        std::fs::write(format!("test_output_{}.pdf", name), &self.bytes)
    }
}

/// Paints every chart as a small solid bitmap, and fails for charts titled "broken".
pub struct SolidRasterizer;

impl ChartRasterizer for SolidRasterizer {
    fn rasterize(&self, chart: &Chart, preset: &QualityPreset) -> Result<Bitmap, RasterError> {
        if chart.title() == Some("broken") {
            return Err(RasterError::Draw("broken chart".into()));
        }
        Ok(Bitmap::blank(preset.width / 50, preset.height / 50))
    }
}

/// An exporter with default configuration that does not depend on system fonts.
pub fn test_exporter() -> Exporter {
    let _ = env_logger::builder().is_test(true).try_init();
    Exporter::new(ExportConfig::default()).with_rasterizer(SolidRasterizer)
}

/// Reads the named parts of a zip package as text.
pub fn zip_part(bytes: &[u8], name: &str) -> Result<String, Box<dyn std::error::Error>> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes))?;
    let mut file = archive.by_name(name)?;
    let mut text = String::new();
    file.read_to_string(&mut text)?;
    Ok(text)
}

pub fn zip_names(bytes: &[u8]) -> Result<Vec<String>, Box<dyn std::error::Error>> {
    let archive = zip::ZipArchive::new(Cursor::new(bytes))?;
    Ok(archive.file_names().map(str::to_string).collect())
}
