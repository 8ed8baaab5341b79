use crate::error::DeckError;
use powerdeck_model::Chart;
use powerdeck_narrative::summary_points;
use powerdeck_raster::{default_presets, rasterize_for_export, Bitmap, ChartRasterizer, QualityPreset};
use powerdeck_types::Color;
use std::sync::Arc;

/// At most this many bullets fit an explanation slide.
pub const MAX_BULLETS: usize = 14;
pub const NO_DATA_BULLET: &str = "No data available.";
pub const CONCLUSION_CAPTION: &str = "Conclusion & Recommendations";

/// An encoded PNG and its pixel size.
#[derive(Debug, Clone, PartialEq)]
pub struct Picture {
    pub png: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

impl Picture {
    pub fn from_bitmap(bitmap: &Bitmap) -> Result<Self, DeckError> {
        Ok(Self {
            png: bitmap.to_png()?,
            width: bitmap.width,
            height: bitmap.height,
        })
    }
}

/// Colors, subtitle and logos shared by every slide.
#[derive(Debug, Clone)]
pub struct DeckBrand {
    pub left_band: Color,
    pub right_band: Color,
    /// Shown under the hero title.
    pub subtitle: String,
    pub left_logo: Option<Picture>,
    pub right_logo: Option<Picture>,
}

impl Default for DeckBrand {
    fn default() -> Self {
        Self {
            left_band: Color::rgb(0xFF, 0x6A, 0x2C),
            right_band: Color::rgb(0x1E, 0x3A, 0x8A),
            subtitle: "Powerhouse Dashboard \u{2014} PETPAK & GPAK".to_string(),
            left_logo: None,
            right_logo: None,
        }
    }
}

/// Which closing recommendations the deck ends with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Conclusion {
    Section,
    Report,
}

impl Conclusion {
    pub fn bullets(self) -> Vec<String> {
        let lines: [&str; 4] = match self {
            Conclusion::Section => [
                "Sustain reliability by addressing sources with highest month-to-month variance.",
                "Prioritize solar utilization in months with favorable yield and tariff differentials.",
                "Investigate outliers in PKR/kWh and kWh/kg to identify maintenance or efficiency actions.",
                "Share this deck with operations; align next month\u{2019}s targets to the median of the last 6 months.",
            ],
            Conclusion::Report => [
                "Sustain reliability by addressing sources with the highest variance.",
                "Prioritize solar utilization where yield and tariff differentials are favorable.",
                "Investigate cost outliers (\u{20A8}/kWh) and kWh/kg to spot efficiency opportunities.",
                "Align next month\u{2019}s targets to the median of the trailing six months.",
            ],
        };
        lines.iter().map(|l| l.to_string()).collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SlideContent {
    Title { title: String, subtitle: String },
    /// `image` is `None` when every preset failed.
    Chart { caption: String, image: Option<Picture> },
    Explanation { caption: String, bullets: Vec<String> },
    Conclusion { bullets: Vec<String> },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Slide {
    /// 1-based position in the deck.
    pub index: usize,
    pub total: usize,
    pub content: SlideContent,
}

impl Slide {
    /// Text drawn over the header bands; the title slide has none.
    pub fn header_caption(&self) -> Option<String> {
        match &self.content {
            SlideContent::Title { .. } => None,
            SlideContent::Chart { caption, .. } => Some(caption.clone()),
            SlideContent::Explanation { caption, .. } => Some(format!("{} \u{2014} Explanation", caption)),
            SlideContent::Conclusion { .. } => Some(CONCLUSION_CAPTION.to_string()),
        }
    }

    pub fn footer(&self) -> String {
        format!("{} / {}", self.index, self.total)
    }
}

#[derive(Debug, Clone)]
pub struct Deck {
    pub title: String,
    pub brand: DeckBrand,
    pub slides: Vec<Slide>,
}

impl Deck {
    /// A title slide, two slides per chart and a conclusion.
    pub fn slide_count(charts: usize) -> usize {
        2 * charts + 2
    }
}

/// A chart together with the caption used when it has no title.
#[derive(Debug, Clone)]
pub struct DeckChart {
    pub chart: Arc<Chart>,
    pub fallback_caption: String,
}

impl DeckChart {
    pub fn new(chart: Arc<Chart>, fallback_caption: impl Into<String>) -> Self {
        Self {
            chart,
            fallback_caption: fallback_caption.into(),
        }
    }

    pub fn caption(&self) -> &str {
        self.chart.caption_or(&self.fallback_caption)
    }
}

/// Assembles decks. Charts are rasterized here, so a [`Deck`] is ready to serialize.
pub struct DeckBuilder<'a> {
    rasterizer: &'a dyn ChartRasterizer,
    presets: Vec<QualityPreset>,
    brand: DeckBrand,
}

impl<'a> DeckBuilder<'a> {
    pub fn new(rasterizer: &'a dyn ChartRasterizer) -> Self {
        Self {
            rasterizer,
            presets: default_presets(),
            brand: DeckBrand::default(),
        }
    }

    pub fn with_presets(mut self, presets: Vec<QualityPreset>) -> Self {
        self.presets = presets;
        self
    }

    pub fn with_brand(mut self, brand: DeckBrand) -> Self {
        self.brand = brand;
        self
    }

    /// Deck for one section; untitled charts are captioned with the deck title.
    pub fn build_section(&self, title: &str, charts: &[Arc<Chart>]) -> Deck {
        let items: Vec<DeckChart> = charts.iter().map(|c| DeckChart::new(c.clone(), title)).collect();
        self.build(title, &items, Conclusion::Section)
    }

    /// Deck over charts from several sections; untitled charts are captioned
    /// with their section name.
    pub fn build_report(&self, title: &str, items: &[DeckChart]) -> Deck {
        self.build(title, items, Conclusion::Report)
    }

    pub fn build(&self, title: &str, items: &[DeckChart], conclusion: Conclusion) -> Deck {
        let total = Deck::slide_count(items.len());
        let mut slides = Vec::with_capacity(total);
        let mut push = |content: SlideContent| {
            let index = slides.len() + 1;
            slides.push(Slide { index, total, content });
        };

        push(SlideContent::Title {
            title: title.to_string(),
            subtitle: self.brand.subtitle.clone(),
        });
        for item in items {
            let caption = item.caption().to_string();
            push(SlideContent::Chart {
                caption: caption.clone(),
                image: self.picture(&item.chart, &caption),
            });
            push(SlideContent::Explanation {
                caption,
                bullets: explanation_bullets(&item.chart),
            });
        }
        push(SlideContent::Conclusion {
            bullets: conclusion.bullets(),
        });

        log::debug!("Assembled deck '{}' with {} slides", title, slides.len());
        Deck {
            title: title.to_string(),
            brand: self.brand.clone(),
            slides,
        }
    }

    fn picture(&self, chart: &Chart, caption: &str) -> Option<Picture> {
        let encoded = rasterize_for_export(self.rasterizer, chart, &self.presets)
            .map_err(DeckError::from)
            .and_then(|r| Picture::from_bitmap(&r.bitmap));
        match encoded {
            Ok(picture) => Some(picture),
            Err(e) => {
                log::warn!("Chart '{}' has no image in the deck: {}", caption, e);
                None
            }
        }
    }
}

fn explanation_bullets(chart: &Chart) -> Vec<String> {
    let mut bullets = summary_points(chart);
    if bullets.is_empty() {
        bullets.push(NO_DATA_BULLET.to_string());
    }
    bullets.truncate(MAX_BULLETS);
    bullets
}

#[cfg(test)]
mod tests {
    use super::*;
    use powerdeck_model::Trace;
    use powerdeck_raster::RasterError;

    struct Tiny;

    impl ChartRasterizer for Tiny {
        fn rasterize(&self, chart: &Chart, _preset: &QualityPreset) -> Result<Bitmap, RasterError> {
            if chart.title() == Some("broken") {
                return Err(RasterError::Draw("no".into()));
            }
            Ok(Bitmap::blank(16, 10))
        }
    }

    fn chart(title: &str) -> Arc<Chart> {
        Arc::new(Chart::new(title).with_trace(Trace::bar("LESCO", ["Jan", "Feb"], vec![Some(5.0), Some(8.0)])))
    }

    #[test]
    fn three_charts_make_eight_numbered_slides() {
        let deck = DeckBuilder::new(&Tiny).build_section("Overview", &[chart("A"), chart("B"), chart("C")]);
        assert_eq!(deck.slides.len(), 8);
        for (i, slide) in deck.slides.iter().enumerate() {
            assert_eq!(slide.index, i + 1);
            assert_eq!(slide.total, 8);
        }
        assert_eq!(deck.slides[7].footer(), "8 / 8");
        assert!(matches!(deck.slides[0].content, SlideContent::Title { .. }));
        assert!(matches!(deck.slides[1].content, SlideContent::Chart { image: Some(_), .. }));
        assert_eq!(deck.slides[2].header_caption().as_deref(), Some("A \u{2014} Explanation"));
        assert_eq!(deck.slides[7].header_caption().as_deref(), Some(CONCLUSION_CAPTION));
    }

    #[test]
    fn empty_deck_has_title_and_conclusion() {
        let deck = DeckBuilder::new(&Tiny).build_section("Comparison", &[]);
        assert_eq!(deck.slides.len(), 2);
        assert_eq!(deck.slides[1].footer(), "2 / 2");
    }

    #[test]
    fn captions_fall_back_to_section_names() {
        let untitled = Arc::new(Chart::default().with_trace(Trace::line("Gas", ["Jan"], vec![Some(2.0)])));
        let items = vec![DeckChart::new(untitled.clone(), "Gas Consumption")];
        let deck = DeckBuilder::new(&Tiny).build_report("Full Report", &items);
        assert_eq!(deck.slides[1].header_caption().as_deref(), Some("Gas Consumption"));
        match &deck.slides[3].content {
            SlideContent::Conclusion { bullets } => assert!(bullets[2].contains("\u{20A8}/kWh")),
            other => panic!("unexpected {:?}", other),
        }

        let section = DeckBuilder::new(&Tiny).build_section("Gas", &[untitled]);
        assert_eq!(section.slides[1].header_caption().as_deref(), Some("Gas"));
    }

    #[test]
    fn failed_rasterization_keeps_the_slide() {
        let _ = env_logger::builder().is_test(true).try_init();
        let deck = DeckBuilder::new(&Tiny).build_section("Energy", &[chart("broken")]);
        assert_eq!(deck.slides.len(), 4);
        assert!(matches!(deck.slides[1].content, SlideContent::Chart { image: None, .. }));
    }

    #[test]
    fn explanation_bullets_are_capped() {
        let mut many = Chart::new("Busy");
        for i in 0..20 {
            many = many.with_trace(Trace::line(&format!("S{}", i), ["Jan"], vec![Some(i as f64)]));
        }
        assert_eq!(explanation_bullets(&many).len(), MAX_BULLETS);
        assert_eq!(explanation_bullets(&Chart::new("Empty")), vec!["Overview: Empty", "No significant variability detected; continue monitoring."]);
    }
}
