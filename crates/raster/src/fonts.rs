//! Font registration for chart text.
//!
//! plotters draws text through ab_glyph, which only knows fonts registered by
//! family name. Registration happens once per process: either the configured
//! font file or, with the `system-fonts` feature, a sans-serif face found by
//! fontdb. When neither is available charts are drawn without text.

use once_cell::sync::OnceCell;
use plotters::style::{register_font, FontStyle};
use std::path::Path;

const FAMILY: &str = "sans-serif";

#[cfg(feature = "system-fonts")]
const PREFERRED_FAMILIES: [&str; 5] = ["DejaVu Sans", "Liberation Sans", "Noto Sans", "Helvetica", "Arial"];

/// Whether chart text can be drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontStatus {
    Available,
    Unavailable,
}

impl FontStatus {
    pub fn is_available(self) -> bool {
        self == FontStatus::Available
    }
}

static FONT_STATUS: OnceCell<FontStatus> = OnceCell::new();

/// Registers the chart font on first use and reports the outcome.
///
/// `font_path` is only consulted on the first call.
pub fn ensure_fonts(font_path: Option<&Path>) -> FontStatus {
    *FONT_STATUS.get_or_init(|| {
        let Some(data) = load_font_data(font_path) else {
            log::warn!("No font available for chart text; charts will be drawn without labels");
            return FontStatus::Unavailable;
        };
        // ab_glyph keeps a reference for the lifetime of the process.
        let data: &'static [u8] = Box::leak(data.into_boxed_slice());
        match register_font(FAMILY, FontStyle::Normal, data) {
            Ok(()) => FontStatus::Available,
            Err(_) => {
                log::warn!("Chart font could not be parsed; charts will be drawn without labels");
                FontStatus::Unavailable
            }
        }
    })
}

fn load_font_data(font_path: Option<&Path>) -> Option<Vec<u8>> {
    if let Some(path) = font_path {
        match std::fs::read(path) {
            Ok(data) => {
                log::debug!("Loaded chart font from {}", path.display());
                return Some(data);
            }
            Err(e) => log::warn!("Failed to read chart font {}: {}", path.display(), e),
        }
    }
    system_font_data()
}

#[cfg(feature = "system-fonts")]
fn system_font_data() -> Option<Vec<u8>> {
    let mut db = fontdb::Database::new();
    db.load_system_fonts();

    let mut families: Vec<fontdb::Family> = PREFERRED_FAMILIES.iter().copied().map(fontdb::Family::Name).collect();
    families.push(fontdb::Family::SansSerif);
    let query = fontdb::Query {
        families: &families,
        ..fontdb::Query::default()
    };

    let id = db.query(&query).or_else(|| {
        db.faces()
            .find(|face| face.index == 0 && !face.monospaced)
            .map(|face| face.id)
    })?;
    let data = db.with_face_data(id, |data, index| (index == 0).then(|| data.to_vec()))??;
    log::debug!("Using system font face {:?} for chart text", id);
    Some(data)
}

#[cfg(not(feature = "system-fonts"))]
fn system_font_data() -> Option<Vec<u8>> {
    None
}
