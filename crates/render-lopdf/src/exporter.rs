use crate::canvas::{PageCanvas, PdfFont};
use crate::error::RenderError;
use crate::grid::{cell_rects, GridSpec, MAX_CELLS};
use crate::layout::PageLayout;
use crate::text::pdf_safe_text;
use crate::tiles::draw_card_groups;
use lopdf::content::Content;
use lopdf::{dictionary, Dictionary, Document, Object, Stream};
use powerdeck_model::{CardGroup, Chart};
use powerdeck_raster::{default_presets, rasterize_for_export, Bitmap, ChartRasterizer, QualityPreset};
use powerdeck_types::{Color, Rect, Size};
use std::sync::Arc;

const TITLE_COLOR: Color = Color::rgb(23, 23, 31);

const GRID_FULL: &str = "chart grid is full";
const NO_ROOM: &str = "no room left below the cards";

/// Optional corner logos for the page header.
#[derive(Debug, Clone, Default)]
pub struct HeaderLogos {
    pub left: Option<Bitmap>,
    pub right: Option<Bitmap>,
}

/// A chart that could not be placed on the page.
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedChart {
    /// Position in the section's chart list.
    pub index: usize,
    pub title: String,
    pub reason: String,
}

/// A rendered section page.
#[derive(Debug)]
pub struct PdfExport {
    pub document: Document,
    pub placed_charts: usize,
    pub skipped_charts: Vec<SkippedChart>,
}

impl PdfExport {
    pub fn to_bytes(&mut self) -> Result<Vec<u8>, RenderError> {
        let mut buf = Vec::new();
        self.document.save_to(&mut buf)?;
        Ok(buf)
    }
}

/// Renders one section to a single landscape page: header, KPI tiles, then
/// the rasterized charts packed into a grid.
pub struct GridPdfExporter<'a> {
    rasterizer: &'a dyn ChartRasterizer,
    presets: Vec<QualityPreset>,
    layout: PageLayout,
    logos: HeaderLogos,
}

impl<'a> GridPdfExporter<'a> {
    pub fn new(rasterizer: &'a dyn ChartRasterizer) -> Self {
        Self {
            rasterizer,
            presets: default_presets(),
            layout: PageLayout::default(),
            logos: HeaderLogos::default(),
        }
    }

    pub fn with_presets(mut self, presets: Vec<QualityPreset>) -> Self {
        self.presets = presets;
        self
    }

    pub fn with_layout(mut self, layout: PageLayout) -> Self {
        self.layout = layout;
        self
    }

    pub fn with_logos(mut self, logos: HeaderLogos) -> Self {
        self.logos = logos;
        self
    }

    pub fn layout(&self) -> &PageLayout {
        &self.layout
    }

    pub fn render_section(
        &self,
        title: &str,
        card_groups: &[CardGroup],
        charts: &[Arc<Chart>],
    ) -> Result<PdfExport, RenderError> {
        let layout = &self.layout;
        let mut page = PageBuilder::new();
        let mut canvas = PageCanvas::new(layout.height);

        canvas.fill_rect(&Rect::new(0.0, 0.0, layout.width, layout.header_height), Color::WHITE);
        for (logo, right) in [(&self.logos.left, false), (&self.logos.right, true)] {
            if let Some(bitmap) = logo {
                let name = page.add_image(bitmap)?;
                canvas.image(&name, &layout.logo_rect(bitmap.size(), right));
            }
        }
        canvas.text_centered(
            &pdf_safe_text(title),
            PdfFont::Bold,
            layout.title_size,
            layout.width / 2.0,
            layout.title_baseline,
            TITLE_COLOR,
        );

        let cursor = draw_card_groups(&mut canvas, layout, card_groups, layout.content_top());
        let area = layout.chart_area(cursor);
        // Up to three rows share two gaps; anything less leaves no visible cell.
        let has_room = area.width > 0.0 && area.height > 2.0 * layout.cell_gap;
        if !has_room && !charts.is_empty() {
            log::warn!("Cards fill the page for '{}'; {} charts left out", title, charts.len());
        }

        // Images are embedded as soon as they exist so only one raw bitmap is alive at a time.
        // Rasterizing stops once the grid is full; a failed chart leaves its cell to a later one.
        let mut images: Vec<(String, Size)> = Vec::new();
        let mut skipped_charts = Vec::new();
        let skip = |index: usize, chart: &Chart, reason: String| SkippedChart {
            index,
            title: chart.caption_or("").to_string(),
            reason,
        };
        for (index, chart) in charts.iter().enumerate() {
            if !has_room {
                skipped_charts.push(skip(index, chart, NO_ROOM.to_string()));
                continue;
            }
            if images.len() == MAX_CELLS {
                skipped_charts.push(skip(index, chart, GRID_FULL.to_string()));
                continue;
            }
            match rasterize_for_export(self.rasterizer, chart, &self.presets) {
                Ok(rasterized) => {
                    let size = rasterized.bitmap.size();
                    images.push((page.add_image(&rasterized.bitmap)?, size));
                }
                Err(e) => {
                    log::warn!("Skipping chart {} in '{}': {}", index + 1, title, e);
                    skipped_charts.push(skip(index, chart, e.to_string()));
                }
            }
        }
        let dropped = skipped_charts.iter().filter(|s| s.reason == GRID_FULL).count();
        if dropped > 0 {
            log::warn!(
                "Section '{}' has more charts than the page holds; {} dropped after the first {}",
                title,
                dropped,
                MAX_CELLS
            );
        }

        let mut placed_charts = 0;
        if let Some(spec) = GridSpec::for_count(images.len()) {
            let cells = cell_rects(area, spec, layout.cell_gap);
            for ((name, size), cell) in images.iter().zip(&cells) {
                canvas.image(name, &cell.fit_centered(*size));
                placed_charts += 1;
            }
        }

        log::debug!(
            "Rendered section '{}': {} charts placed, {} skipped",
            title,
            placed_charts,
            skipped_charts.len()
        );
        Ok(PdfExport {
            document: page.finish(canvas.finish(), layout)?,
            placed_charts,
            skipped_charts,
        })
    }
}

struct PageBuilder {
    doc: Document,
    xobjects: Dictionary,
    image_count: usize,
}

impl PageBuilder {
    fn new() -> Self {
        Self {
            doc: Document::with_version("1.5"),
            xobjects: Dictionary::new(),
            image_count: 0,
        }
    }

    /// Embeds `bitmap` as a DeviceRGB image XObject and returns its resource name.
    fn add_image(&mut self, bitmap: &Bitmap) -> Result<String, RenderError> {
        let dict = dictionary! {
            "Type" => "XObject",
            "Subtype" => "Image",
            "Width" => bitmap.width as i64,
            "Height" => bitmap.height as i64,
            "ColorSpace" => "DeviceRGB",
            "BitsPerComponent" => 8,
        };
        let mut stream = Stream::new(dict, bitmap.rgb.clone());
        stream.compress()?;
        let id = self.doc.add_object(stream);

        self.image_count += 1;
        let name = format!("Im{}", self.image_count);
        self.xobjects.set(name.as_bytes(), Object::Reference(id));
        Ok(name)
    }

    fn finish(mut self, content: Content, layout: &PageLayout) -> Result<Document, RenderError> {
        let doc = &mut self.doc;
        let pages_id = doc.new_object_id();

        let mut fonts = Dictionary::new();
        for font in [PdfFont::Regular, PdfFont::Bold] {
            let font_id = doc.add_object(dictionary! {
                "Type" => "Font",
                "Subtype" => "Type1",
                "BaseFont" => font.base_font(),
                "Encoding" => "WinAnsiEncoding",
            });
            fonts.set(font.resource_name().as_bytes(), Object::Reference(font_id));
        }
        let resources_id = doc.add_object(dictionary! {
            "Font" => fonts,
            "XObject" => self.xobjects,
        });

        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![0.0.into(), 0.0.into(), layout.width.into(), layout.height.into()],
            "Contents" => content_id,
            "Resources" => resources_id,
        });
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => vec![page_id.into()],
                "Count" => 1,
            }),
        );
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);
        doc.compress();
        Ok(self.doc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use powerdeck_model::{Card, Trace};
    use powerdeck_raster::RasterError;

    /// Returns a small solid bitmap, or fails for charts titled "broken".
    struct Solid;

    impl ChartRasterizer for Solid {
        fn rasterize(&self, chart: &Chart, preset: &QualityPreset) -> Result<Bitmap, RasterError> {
            if chart.title() == Some("broken") {
                return Err(RasterError::Draw("boom".into()));
            }
            let mut bitmap = Bitmap::blank(preset.width / 100, preset.height / 100);
            bitmap.rgb.iter_mut().step_by(3).for_each(|r| *r = 30);
            Ok(bitmap)
        }
    }

    fn charts(n: usize) -> Vec<Arc<Chart>> {
        (0..n)
            .map(|i| Arc::new(Chart::new(format!("Chart {}", i)).with_trace(Trace::line("kWh", ["Jan"], vec![Some(1.0)]))))
            .collect()
    }

    fn image_draws(export: &PdfExport) -> usize {
        let page_id = export.document.get_pages()[&1];
        let content = export.document.get_and_decode_page_content(page_id).unwrap();
        content.operations.iter().filter(|op| op.operator == "Do").count()
    }

    #[test]
    fn empty_section_is_a_valid_single_page() {
        let _ = env_logger::builder().is_test(true).try_init();
        let exporter = GridPdfExporter::new(&Solid);
        let mut export = exporter.render_section("Overview", &[], &[]).unwrap();
        assert_eq!(export.placed_charts, 0);

        let bytes = export.to_bytes().unwrap();
        assert!(bytes.starts_with(b"%PDF-1.5"));
        let reloaded = Document::load_mem(&bytes).unwrap();
        assert_eq!(reloaded.get_pages().len(), 1);
    }

    #[test]
    fn places_at_most_the_grid_capacity() {
        let exporter = GridPdfExporter::new(&Solid);
        for (count, expected) in [(1, 1), (3, 3), (6, 6), (10, 9)] {
            let export = exporter.render_section("Energy", &[], &charts(count)).unwrap();
            assert_eq!(export.placed_charts, expected);
            assert_eq!(image_draws(&export), expected);
        }
    }

    #[test]
    fn failed_charts_are_skipped_and_reported() {
        let mut list = charts(2);
        list.insert(1, Arc::new(Chart::new("broken")));
        let cards = vec![CardGroup::new("Highlights", vec![Card::new("Solar", "1,200")])];
        let logos = HeaderLogos {
            left: Some(Bitmap::blank(60, 20)),
            right: None,
        };

        let export = GridPdfExporter::new(&Solid)
            .with_logos(logos)
            .render_section("Solar Savings", &cards, &list)
            .unwrap();
        assert_eq!(export.placed_charts, 2);
        assert_eq!(export.skipped_charts.len(), 1);
        assert_eq!(export.skipped_charts[0].index, 1);
        assert_eq!(export.skipped_charts[0].title, "broken");
        // one logo plus two charts
        assert_eq!(image_draws(&export), 3);
    }

    /// Counts rasterization calls on top of [`Solid`].
    struct Counting(std::cell::Cell<usize>);

    impl ChartRasterizer for Counting {
        fn rasterize(&self, chart: &Chart, preset: &QualityPreset) -> Result<Bitmap, RasterError> {
            self.0.set(self.0.get() + 1);
            Solid.rasterize(chart, preset)
        }
    }

    fn image_objects(document: &Document) -> usize {
        document
            .objects
            .values()
            .filter_map(|object| object.as_stream().ok())
            .filter(|stream| matches!(stream.dict.get(b"Subtype").and_then(Object::as_name), Ok(b"Image")))
            .count()
    }

    #[test]
    fn charts_beyond_the_grid_are_neither_rasterized_nor_embedded() {
        let rasterizer = Counting(std::cell::Cell::new(0));
        let export = GridPdfExporter::new(&rasterizer)
            .render_section("Energy", &[], &charts(12))
            .unwrap();

        assert_eq!(rasterizer.0.get(), 9);
        assert_eq!(export.placed_charts, 9);
        assert_eq!(image_objects(&export.document), 9);
        let dropped: Vec<usize> = export.skipped_charts.iter().map(|s| s.index).collect();
        assert_eq!(dropped, vec![9, 10, 11]);
    }

    #[test]
    fn a_failed_chart_leaves_its_cell_to_a_later_one() {
        let mut list = charts(12);
        list[2] = Arc::new(Chart::new("broken"));
        let export = GridPdfExporter::new(&Solid).render_section("Energy", &[], &list).unwrap();

        assert_eq!(export.placed_charts, 9);
        assert_eq!(image_objects(&export.document), 9);
        assert_eq!(export.skipped_charts.len(), 3);
        assert_eq!(export.skipped_charts[0].index, 2);
    }

    #[test]
    fn charts_are_left_out_when_cards_fill_the_page() {
        let group = CardGroup::new("Totals", vec![Card::new("Solar", "1,200")]);
        let cards = vec![group; 8];
        let rasterizer = Counting(std::cell::Cell::new(0));
        let export = GridPdfExporter::new(&rasterizer)
            .render_section("Overview", &cards, &charts(2))
            .unwrap();

        assert_eq!(rasterizer.0.get(), 0);
        assert_eq!(export.placed_charts, 0);
        assert_eq!(export.skipped_charts.len(), 2);
        assert_eq!(image_draws(&export), 0);
        assert_eq!(image_objects(&export.document), 0);
    }
}
