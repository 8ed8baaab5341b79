//! Slide geometry in English Metric Units.

pub const EMU_PER_INCH: i64 = 914_400;

/// 13.333 in by 7.5 in.
pub const SLIDE_WIDTH: i64 = 12_192_000;
pub const SLIDE_HEIGHT: i64 = 6_858_000;

pub fn inches(value: f64) -> i64 {
    (value * EMU_PER_INCH as f64).round() as i64
}

/// A positioned box on the slide.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame {
    pub x: i64,
    pub y: i64,
    pub cx: i64,
    pub cy: i64,
}

impl Frame {
    pub const fn new(x: i64, y: i64, cx: i64, cy: i64) -> Self {
        Self { x, y, cx, cy }
    }

    /// The largest frame with the aspect ratio of `width`×`height` that fits
    /// inside `self`, centered.
    pub fn fit(&self, width: u32, height: u32) -> Frame {
        if width == 0 || height == 0 {
            return *self;
        }
        let scale = (self.cx as f64 / width as f64).min(self.cy as f64 / height as f64);
        let cx = (width as f64 * scale).round() as i64;
        let cy = (height as f64 * scale).round() as i64;
        Frame::new(self.x + (self.cx - cx) / 2, self.y + (self.cy - cy) / 2, cx, cy)
    }
}

/// Fixed positions shared by every slide.
#[derive(Debug, Clone, Copy)]
pub struct SlideLayout {
    pub header_height: i64,
    pub margin_x: i64,
}

impl Default for SlideLayout {
    fn default() -> Self {
        Self {
            header_height: inches(0.9),
            margin_x: inches(0.5),
        }
    }
}

impl SlideLayout {
    pub fn left_band(&self) -> Frame {
        Frame::new(0, 0, SLIDE_WIDTH / 2, self.header_height)
    }

    pub fn right_band(&self) -> Frame {
        Frame::new(SLIDE_WIDTH / 2, 0, SLIDE_WIDTH - SLIDE_WIDTH / 2, self.header_height)
    }

    pub fn header_caption(&self) -> Frame {
        Frame::new(self.margin_x, inches(0.12), SLIDE_WIDTH - 2 * self.margin_x, inches(0.7))
    }

    /// Logo box of a picture `width`×`height` pixels, scaled to the header height.
    pub fn logo(&self, width: u32, height: u32, right: bool) -> Frame {
        let cy = self.header_height - inches(0.16);
        let cx = if height == 0 {
            0
        } else {
            (cy as f64 * width as f64 / height as f64).round() as i64
        };
        let x = if right { SLIDE_WIDTH - inches(0.2) - cx } else { inches(0.2) };
        Frame::new(x, inches(0.08), cx, cy)
    }

    pub fn slide_number(&self) -> Frame {
        let (cx, cy) = (inches(1.2), inches(0.3));
        Frame::new(SLIDE_WIDTH - cx - inches(0.25), SLIDE_HEIGHT - cy - inches(0.15), cx, cy)
    }

    pub fn hero_title(&self) -> Frame {
        Frame::new(inches(1.2), SLIDE_HEIGHT / 2 - inches(0.9), SLIDE_WIDTH - inches(2.4), inches(1.8))
    }

    pub fn hero_subtitle(&self) -> Frame {
        Frame::new(inches(2.0), SLIDE_HEIGHT / 2 + inches(0.5), SLIDE_WIDTH - inches(4.0), inches(0.8))
    }

    /// Chart area below the header, clear of the slide number.
    pub fn chart_area(&self) -> Frame {
        let top = self.header_height + inches(0.2);
        Frame::new(
            self.margin_x,
            top,
            SLIDE_WIDTH - 2 * self.margin_x,
            SLIDE_HEIGHT - top - inches(0.5),
        )
    }

    pub fn body(&self) -> Frame {
        Frame::new(
            self.margin_x,
            self.header_height + inches(0.3),
            SLIDE_WIDTH - 2 * self.margin_x,
            SLIDE_HEIGHT - self.header_height - inches(0.6),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bands_cover_the_header() {
        let layout = SlideLayout::default();
        assert_eq!(layout.header_height, 822_960);
        assert_eq!(layout.left_band().cx + layout.right_band().cx, SLIDE_WIDTH);
        assert_eq!(layout.right_band().x, 6_096_000);
    }

    #[test]
    fn wide_pictures_fit_by_width() {
        let area = SlideLayout::default().chart_area();
        let frame = area.fit(1600, 960);
        assert!(frame.cx <= area.cx && frame.cy <= area.cy);
        assert!(frame.cx == area.cx || frame.cy == area.cy);
        let (left_gap, right_gap) = (frame.x - area.x, area.x + area.cx - (frame.x + frame.cx));
        assert!((left_gap - right_gap).abs() <= 1);
    }

    #[test]
    fn right_logo_hugs_the_edge() {
        let layout = SlideLayout::default();
        let logo = layout.logo(300, 100, true);
        assert_eq!(logo.cx, logo.cy * 3);
        assert_eq!(logo.x + logo.cx, SLIDE_WIDTH - inches(0.2));
        assert_eq!(layout.logo(300, 100, false).x, inches(0.2));
    }
}
