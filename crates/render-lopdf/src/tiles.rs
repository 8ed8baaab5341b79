use crate::canvas::{PageCanvas, PdfFont};
use crate::layout::PageLayout;
use crate::text::pdf_safe_text;
use powerdeck_model::{Card, CardGroup, DeltaTone};
use powerdeck_types::{Color, Rect};

const INK: Color = Color::rgb(26, 26, 26);
const BORDER: Color = Color::rgb(230, 230, 230);
const ACCENT_BOTTOM: Color = Color::rgb(255, 107, 54);
const ACCENT_TOP: Color = Color::rgb(31, 64, 176);
const ACCENT_WIDTH: f32 = 6.0;
const LABEL_SEPARATOR: &str = " \u{2014} ";

pub(crate) fn tone_color(tone: DeltaTone) -> Color {
    match tone {
        DeltaTone::Favorable => Color::rgb(26, 179, 26),
        DeltaTone::Unfavorable => Color::rgb(179, 26, 26),
        DeltaTone::Neutral => Color::rgb(100, 116, 139),
    }
}

/// Draws every non-empty group starting at `cursor` and returns the cursor
/// below the last row.
pub(crate) fn draw_card_groups(canvas: &mut PageCanvas, layout: &PageLayout, groups: &[CardGroup], mut cursor: f32) -> f32 {
    for group in groups.iter().filter(|g| !g.cards.is_empty()) {
        if let Some(title) = group.title() {
            canvas.text(&pdf_safe_text(title), PdfFont::Bold, 14.0, layout.margin, cursor + 15.0, INK);
            cursor += 25.0;
        }
        for (tile, card) in tile_rects(layout, group.cards.len(), cursor).iter().zip(&group.cards) {
            draw_tile(canvas, tile, card);
        }
        cursor += layout.tile_height + 10.0;
    }
    cursor
}

pub(crate) fn tile_rects(layout: &PageLayout, count: usize, top: f32) -> Vec<Rect> {
    if count == 0 {
        return Vec::new();
    }
    let width = (layout.usable_width() - layout.tile_gap * (count as f32 - 1.0)) / count as f32;
    (0..count)
        .map(|i| Rect::new(layout.margin + i as f32 * (width + layout.tile_gap), top, width, layout.tile_height))
        .collect()
}

fn draw_tile(canvas: &mut PageCanvas, tile: &Rect, card: &Card) {
    canvas.fill_rect(tile, Color::WHITE);
    canvas.stroke_rect(tile, BORDER, 1.0);
    canvas.fill_rect(&Rect::new(tile.x, tile.y, ACCENT_WIDTH, tile.height), ACCENT_BOTTOM);
    canvas.fill_rect(&Rect::new(tile.x, tile.y, ACCENT_WIDTH, tile.height / 2.0), ACCENT_TOP);

    let x = tile.x + 8.0;
    let label = pdf_safe_text(&card.label);
    match label.split_once(LABEL_SEPARATOR) {
        Some((period, metric)) => {
            canvas.text(period, PdfFont::Regular, 8.0, x, tile.y + 8.0, INK);
            canvas.text(metric, PdfFont::Regular, 8.0, x, tile.y + 18.0, INK);
        }
        None => canvas.text(&label, PdfFont::Regular, 8.0, x, tile.y + 12.0, INK),
    }
    canvas.text(&pdf_safe_text(&card.value), PdfFont::Bold, 12.0, x, tile.y + 30.0, INK);

    if let Some(delta) = card.delta() {
        let color = tone_color(card.delta_tone());
        let baseline = tile.y + 38.0;
        let text_x = match card.delta_direction() {
            Some(up) => {
                let (tip, base) = if up { (baseline - 5.0, baseline) } else { (baseline, baseline - 5.0) };
                canvas.fill_triangle([(x, base), (x + 6.0, base), (x + 3.0, tip)], color);
                x + 9.0
            }
            None => x,
        };
        canvas.text(&pdf_safe_text(delta), PdfFont::Regular, 7.0, text_x, baseline, color);
    }
}
