use powerdeck_types::Rect;

/// Most charts a section page holds; the 3x3 grid.
pub const MAX_CELLS: usize = 9;

/// Columns and rows of the chart grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridSpec {
    pub cols: usize,
    pub rows: usize,
}

impl GridSpec {
    /// Packing for `count` images: 1 is 1x1, up to 4 is 2x2, up to 6 is 3x2,
    /// anything more is 3x3. `None` for zero images.
    pub fn for_count(count: usize) -> Option<GridSpec> {
        let (cols, rows) = match count {
            0 => return None,
            1 => (1, 1),
            2..=4 => (2, 2),
            5 | 6 => (3, 2),
            _ => (3, 3),
        };
        Some(GridSpec { cols, rows })
    }

    pub fn capacity(&self) -> usize {
        self.cols * self.rows
    }
}

/// Cell rectangles in row-major order, `gap` points apart. Cells never have a
/// negative size; an area smaller than its gaps yields zero-sized cells.
pub fn cell_rects(area: Rect, spec: GridSpec, gap: f32) -> Vec<Rect> {
    let cell_w = ((area.width - (spec.cols as f32 - 1.0) * gap) / spec.cols as f32).max(0.0);
    let cell_h = ((area.height - (spec.rows as f32 - 1.0) * gap) / spec.rows as f32).max(0.0);
    (0..spec.rows)
        .flat_map(|r| {
            (0..spec.cols).map(move |c| {
                Rect::new(
                    area.x + c as f32 * (cell_w + gap),
                    area.y + r as f32 * (cell_h + gap),
                    cell_w,
                    cell_h,
                )
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packing_table() {
        let expected = [
            (1, (1, 1)),
            (2, (2, 2)),
            (3, (2, 2)),
            (4, (2, 2)),
            (5, (3, 2)),
            (6, (3, 2)),
            (7, (3, 3)),
            (8, (3, 3)),
            (9, (3, 3)),
            (10, (3, 3)),
        ];
        for (count, (cols, rows)) in expected {
            let spec = GridSpec::for_count(count).unwrap();
            assert_eq!((spec.cols, spec.rows), (cols, rows), "count {}", count);
            assert!(count.min(spec.capacity()) <= spec.cols * spec.rows);
        }
        assert_eq!(GridSpec::for_count(0), None);
    }

    #[test]
    fn cells_tile_the_area_with_gaps() {
        let area = Rect::new(20.0, 100.0, 803.0, 403.0);
        let cells = cell_rects(area, GridSpec { cols: 2, rows: 2 }, 3.0);
        assert_eq!(cells.len(), 4);
        assert_eq!(cells[0], Rect::new(20.0, 100.0, 400.0, 200.0));
        assert_eq!(cells[3], Rect::new(423.0, 303.0, 400.0, 200.0));
    }

    #[test]
    fn areas_smaller_than_the_gaps_give_empty_cells() {
        let area = Rect::new(20.0, 580.0, 803.0, 0.0);
        let cells = cell_rects(area, GridSpec { cols: 3, rows: 3 }, 3.0);
        assert_eq!(cells.len(), 9);
        assert!(cells.iter().all(|c| c.height == 0.0 && c.width > 0.0));
        assert_eq!(GridSpec::for_count(100).map(|s| s.capacity()), Some(MAX_CELLS));
    }
}
