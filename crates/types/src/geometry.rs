/// An axis-aligned rectangle in top-down page coordinates (y grows downwards).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn zero() -> Self {
        Self {
            width: 0.0,
            height: 0.0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Scale factor that makes `content` fit inside this rectangle without distortion.
    pub fn fit_scale(&self, content: Size) -> f32 {
        if content.is_empty() {
            return 0.0;
        }
        (self.width / content.width).min(self.height / content.height)
    }

    /// Places `content` inside this rectangle, scaled by [`Rect::fit_scale`] and centered
    /// on both axes.
    pub fn fit_centered(&self, content: Size) -> Rect {
        let scale = self.fit_scale(content);
        let width = content.width * scale;
        let height = content.height * scale;
        Rect {
            x: self.x + (self.width - width) / 2.0,
            y: self.y + (self.height - height) / 2.0,
            width,
            height,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fit_uses_the_smaller_ratio_and_centers() {
        let cell = Rect::new(10.0, 20.0, 400.0, 100.0);
        let placed = cell.fit_centered(Size::new(1600.0, 960.0));
        // height is the binding dimension: 100 / 960
        assert!((placed.height - 100.0).abs() < 1e-3);
        assert!((placed.width - 1600.0 * 100.0 / 960.0).abs() < 1e-3);
        assert!((placed.x - (10.0 + (400.0 - placed.width) / 2.0)).abs() < 1e-3);
        assert!((placed.y - 20.0).abs() < 1e-3);
    }

    #[test]
    fn empty_content_does_not_divide_by_zero() {
        let cell = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert_eq!(cell.fit_scale(Size::zero()), 0.0);
    }
}
