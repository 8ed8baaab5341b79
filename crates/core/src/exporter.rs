use crate::artifact::{ExportArtifact, ExportFormat};
use crate::config::{ExportConfig, LogoSource};
use crate::error::ExportError;
use crate::report::{collect_report, ReportSection};
use powerdeck_capture::Registry;
use powerdeck_model::{CardGroup, Chart};
use powerdeck_pdf_composer::{concat_documents, TitledDocument};
use powerdeck_raster::{ensure_fonts, Bitmap, ChartRasterizer, PlottersRasterizer};
use powerdeck_render_lopdf::{GridPdfExporter, HeaderLogos};
use std::sync::Arc;

/// Produces exports from what a [`Registry`] captured.
///
/// The registry is only ever borrowed immutably, so a failed export leaves it
/// as it was.
pub struct Exporter {
    config: ExportConfig,
    rasterizer: Box<dyn ChartRasterizer>,
    logos: HeaderLogos,
}

impl Exporter {
    /// Registers fonts, decodes the configured logos and sets up the plotters rasterizer.
    pub fn new(config: ExportConfig) -> Self {
        let fonts = ensure_fonts(config.raster.font_path.as_deref());
        log::debug!("Chart fonts: {:?}", fonts);
        let rasterizer = Box::new(PlottersRasterizer::new(&config.raster));
        let logos = HeaderLogos {
            left: load_logo(&config, config.brand.left_logo.as_ref()),
            right: load_logo(&config, config.brand.right_logo.as_ref()),
        };
        Self {
            config,
            rasterizer,
            logos,
        }
    }

    pub fn with_rasterizer(mut self, rasterizer: impl ChartRasterizer + 'static) -> Self {
        self.rasterizer = Box::new(rasterizer);
        self
    }

    pub fn config(&self) -> &ExportConfig {
        &self.config
    }

    /// Reports [`ExportError::EmptySection`] when `section` captured no charts.
    pub fn check_section(&self, registry: &Registry, section: &str) -> Result<(), ExportError> {
        if registry.get_charts(section).is_empty() {
            return Err(ExportError::EmptySection(section.to_string()));
        }
        Ok(())
    }

    /// Exports one section. An empty section still produces a valid document.
    pub fn export_section(
        &self,
        registry: &Registry,
        section: &str,
        title: &str,
        format: ExportFormat,
    ) -> Result<ExportArtifact, ExportError> {
        ensure_available(format)?;
        let charts = registry.get_charts(section);
        if charts.is_empty() {
            log::info!("{}", ExportError::EmptySection(section.to_string()));
        }

        let bytes = match format {
            ExportFormat::Pdf => self.section_pdf(title, registry.get_cards(section), charts)?,
            ExportFormat::Docx => self.section_docx(title, charts)?,
            ExportFormat::Pptx => self.section_pptx(title, charts)?,
        };
        log::info!("Exported section '{}' as {} ({} bytes)", section, format, bytes.len());
        Ok(ExportArtifact::new(format, title, bytes))
    }

    /// Exports the consolidated report over the configured sections.
    pub fn export_report(
        &self,
        registry: &Registry,
        title: &str,
        format: ExportFormat,
    ) -> Result<ExportArtifact, ExportError> {
        ensure_available(format)?;
        let sections = collect_report(registry, &self.config.report);
        if sections.is_empty() {
            return Err(ExportError::NothingToExport);
        }

        let bytes = match format {
            ExportFormat::Pdf => self.report_pdf(&sections)?,
            ExportFormat::Docx => self.report_docx(title, &sections)?,
            ExportFormat::Pptx => self.report_pptx(title, &sections)?,
        };
        log::info!(
            "Exported report '{}' as {} from {} sections ({} bytes)",
            title,
            format,
            sections.len(),
            bytes.len()
        );
        Ok(ExportArtifact::new(format, title, bytes))
    }

    /// Every format for one section, or for the report when `section` is `None`.
    /// A failure in one format does not stop the others.
    pub fn export_all(
        &self,
        registry: &Registry,
        section: Option<&str>,
        title: &str,
    ) -> Vec<(ExportFormat, Result<ExportArtifact, ExportError>)> {
        ExportFormat::ALL
            .iter()
            .map(|&format| {
                let result = match section {
                    Some(section) => self.export_section(registry, section, title, format),
                    None => self.export_report(registry, title, format),
                };
                if let Err(e) = &result {
                    log::warn!("{} export failed: {}", format, e);
                }
                (format, result)
            })
            .collect()
    }

    fn grid_exporter(&self) -> GridPdfExporter<'_> {
        GridPdfExporter::new(self.rasterizer.as_ref())
            .with_presets(self.config.raster.presets.clone())
            .with_logos(self.logos.clone())
    }

    fn section_pdf(&self, title: &str, cards: &[CardGroup], charts: &[Arc<Chart>]) -> Result<Vec<u8>, ExportError> {
        let mut export = self.grid_exporter().render_section(title, cards, charts)?;
        Ok(export.to_bytes()?)
    }

    /// One page per section, titled `"<section> — <dashboard>"`, bookmarked by section.
    fn report_pdf(&self, sections: &[ReportSection]) -> Result<Vec<u8>, ExportError> {
        let exporter = self.grid_exporter();
        let mut parts = Vec::with_capacity(sections.len());
        for section in sections {
            let page_title = format!("{} \u{2014} {}", section.name, self.config.brand.dashboard);
            let export = exporter.render_section(&page_title, &section.card_groups, &section.charts)?;
            parts.push(TitledDocument::new(section.name.clone(), export.document));
        }
        let mut document = concat_documents(parts)?;
        let mut bytes = Vec::new();
        document.save_to(&mut bytes)?;
        Ok(bytes)
    }

    #[cfg(feature = "docx")]
    fn voice(&self) -> powerdeck_docx::DocumentVoice {
        let brand = &self.config.brand;
        powerdeck_docx::DocumentVoice {
            dashboard: brand.dashboard.clone(),
            organization: brand.organization.clone(),
            team: brand.team.clone(),
        }
    }

    #[cfg(feature = "docx")]
    fn section_docx(&self, title: &str, charts: &[Arc<Chart>]) -> Result<Vec<u8>, ExportError> {
        let document = powerdeck_docx::NarrativeDocument::for_section(title, charts, &self.voice());
        Ok(powerdeck_docx::write_docx(&document)?)
    }

    #[cfg(feature = "docx")]
    fn report_docx(&self, title: &str, sections: &[ReportSection]) -> Result<Vec<u8>, ExportError> {
        let sections: Vec<powerdeck_docx::ChartSection> = sections
            .iter()
            .map(|s| powerdeck_docx::ChartSection::new(s.name.clone(), s.charts.clone()))
            .collect();
        let document = powerdeck_docx::NarrativeDocument::for_report(title, &sections, &self.voice());
        Ok(powerdeck_docx::write_docx(&document)?)
    }

    #[cfg(not(feature = "docx"))]
    fn section_docx(&self, _title: &str, _charts: &[Arc<Chart>]) -> Result<Vec<u8>, ExportError> {
        Err(unavailable(ExportFormat::Docx))
    }

    #[cfg(not(feature = "docx"))]
    fn report_docx(&self, _title: &str, _sections: &[ReportSection]) -> Result<Vec<u8>, ExportError> {
        Err(unavailable(ExportFormat::Docx))
    }

    #[cfg(feature = "pptx")]
    fn deck_builder(&self) -> Result<powerdeck_deck::DeckBuilder<'_>, ExportError> {
        let picture = |logo: &Option<Bitmap>| logo.as_ref().map(powerdeck_deck::Picture::from_bitmap).transpose();
        let brand = &self.config.brand;
        let deck_brand = powerdeck_deck::DeckBrand {
            left_band: brand.primary,
            right_band: brand.secondary,
            subtitle: brand.subtitle(),
            left_logo: picture(&self.logos.left)?,
            right_logo: picture(&self.logos.right)?,
        };
        Ok(powerdeck_deck::DeckBuilder::new(self.rasterizer.as_ref())
            .with_presets(self.config.raster.presets.clone())
            .with_brand(deck_brand))
    }

    #[cfg(feature = "pptx")]
    fn section_pptx(&self, title: &str, charts: &[Arc<Chart>]) -> Result<Vec<u8>, ExportError> {
        let deck = self.deck_builder()?.build_section(title, charts);
        Ok(powerdeck_deck::write_pptx(&deck)?)
    }

    #[cfg(feature = "pptx")]
    fn report_pptx(&self, title: &str, sections: &[ReportSection]) -> Result<Vec<u8>, ExportError> {
        let items: Vec<powerdeck_deck::DeckChart> = sections
            .iter()
            .flat_map(|s| {
                s.charts
                    .iter()
                    .map(move |c| powerdeck_deck::DeckChart::new(c.clone(), s.name.clone()))
            })
            .collect();
        let deck = self.deck_builder()?.build_report(title, &items);
        Ok(powerdeck_deck::write_pptx(&deck)?)
    }

    #[cfg(not(feature = "pptx"))]
    fn section_pptx(&self, _title: &str, _charts: &[Arc<Chart>]) -> Result<Vec<u8>, ExportError> {
        Err(unavailable(ExportFormat::Pptx))
    }

    #[cfg(not(feature = "pptx"))]
    fn report_pptx(&self, _title: &str, _sections: &[ReportSection]) -> Result<Vec<u8>, ExportError> {
        Err(unavailable(ExportFormat::Pptx))
    }
}

fn unavailable(format: ExportFormat) -> ExportError {
    ExportError::CapabilityUnavailable(format.to_string())
}

fn ensure_available(format: ExportFormat) -> Result<(), ExportError> {
    if format.is_available() {
        Ok(())
    } else {
        Err(unavailable(format))
    }
}

/// A logo that cannot be loaded is left out of the header.
fn load_logo(config: &ExportConfig, source: Option<&LogoSource>) -> Option<Bitmap> {
    let source = source?;
    match source.load(config.base_dir.as_deref()) {
        Ok(bitmap) => Some(bitmap),
        Err(e) => {
            log::warn!("Logo '{}' skipped: {}", source.0.chars().take(64).collect::<String>(), e);
            None
        }
    }
}
