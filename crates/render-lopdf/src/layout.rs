use powerdeck_types::{Rect, Size};

/// Page geometry for section PDFs, in points. Defaults to landscape A4.
#[derive(Debug, Clone, PartialEq)]
pub struct PageLayout {
    pub width: f32,
    pub height: f32,
    pub margin: f32,
    pub header_height: f32,
    /// Bounding box each corner logo is scaled into.
    pub logo_max: Size,
    pub title_size: f32,
    /// Distance from the page top to the title baseline.
    pub title_baseline: f32,
    pub tile_height: f32,
    pub tile_gap: f32,
    pub cell_gap: f32,
}

impl Default for PageLayout {
    fn default() -> Self {
        Self {
            width: 841.89,
            height: 595.28,
            margin: 20.0,
            header_height: 60.0,
            logo_max: Size::new(120.0, 40.0),
            title_size: 18.0,
            title_baseline: 46.0,
            tile_height: 40.0,
            tile_gap: 8.0,
            cell_gap: 3.0,
        }
    }
}

impl PageLayout {
    pub fn usable_width(&self) -> f32 {
        self.width - 2.0 * self.margin
    }

    /// Where content starts below the header.
    pub fn content_top(&self) -> f32 {
        self.header_height + 20.0
    }

    /// Logo box for the left or right corner; logos sit on a line 50 pt below the top edge.
    pub fn logo_rect(&self, logo: Size, right: bool) -> Rect {
        let box_ = Rect::new(0.0, 0.0, self.logo_max.width, self.logo_max.height);
        let scale = box_.fit_scale(logo);
        let (w, h) = (logo.width * scale, logo.height * scale);
        let bottom = 10.0 + self.logo_max.height;
        let x = if right { self.width - self.margin - w } else { self.margin };
        Rect::new(x, bottom - h, w, h)
    }

    /// The area left for the chart grid when content above ends at `cursor`.
    pub fn chart_area(&self, cursor: f32) -> Rect {
        let top = cursor + 1.0;
        Rect::new(
            self.margin,
            top,
            self.usable_width(),
            (self.height - self.margin - top).max(0.0),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn logos_fit_the_corner_boxes() {
        let layout = PageLayout::default();
        let wide = layout.logo_rect(Size::new(600.0, 100.0), false);
        assert_eq!((wide.x, wide.width, wide.height), (20.0, 120.0, 20.0));
        assert_eq!(wide.bottom(), 50.0);

        let tall = layout.logo_rect(Size::new(100.0, 200.0), true);
        assert_eq!(tall.height, 40.0);
        assert!((tall.right() - (layout.width - 20.0)).abs() < 1e-3);
    }

    #[test]
    fn chart_area_fills_to_the_bottom_margin() {
        let layout = PageLayout::default();
        let area = layout.chart_area(layout.content_top());
        assert_eq!(area.y, 81.0);
        assert!((area.bottom() - (layout.height - 20.0)).abs() < 1e-3);
    }
}
