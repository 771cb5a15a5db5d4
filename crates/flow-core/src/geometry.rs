/// Cell edge length in pixel space.
pub const CELL: f64 = 44.0;
/// Gap between neighboring cells (and around the border).
pub const GAP: f64 = 4.0;

/// Maps grid (row, col) indices to pixel-space coordinates. The grid
/// renderer and the solution-line renderer both go through this, so
/// the two layers stay aligned.
#[derive(Clone, Copy, Debug)]
pub struct CellMetrics {
    pub cell: f64,
    pub gap: f64,
}

impl Default for CellMetrics {
    fn default() -> Self {
        Self {
            cell: CELL,
            gap: GAP,
        }
    }
}

impl CellMetrics {
    /// Pixel coordinates of the center of cell (r, c).
    pub fn center(&self, r: usize, c: usize) -> (f64, f64) {
        let x = self.gap + c as f64 * (self.cell + self.gap) + self.cell / 2.0;
        let y = self.gap + r as f64 * (self.cell + self.gap) + self.cell / 2.0;
        (x, y)
    }

    /// Top-left corner of cell (r, c).
    pub fn origin(&self, r: usize, c: usize) -> (f64, f64) {
        let x = self.gap + c as f64 * (self.cell + self.gap);
        let y = self.gap + r as f64 * (self.cell + self.gap);
        (x, y)
    }

    /// Total pixel size of an h x w grid, gaps included.
    pub fn canvas_size(&self, h: usize, w: usize) -> (f64, f64) {
        let width = w as f64 * (self.cell + self.gap) + self.gap;
        let height = h as f64 * (self.cell + self.gap) + self.gap;
        (width, height)
    }

    /// Inverse of `center`: which cell contains pixel (x, y), if any.
    /// Points on gap pixels or outside the h x w grid hit nothing.
    pub fn cell_at(&self, x: f64, y: f64, h: usize, w: usize) -> Option<(usize, usize)> {
        let pitch = self.cell + self.gap;
        let cx = x - self.gap;
        let cy = y - self.gap;
        if cx < 0.0 || cy < 0.0 {
            return None;
        }
        let c = (cx / pitch) as usize;
        let r = (cy / pitch) as usize;
        if r >= h || c >= w {
            return None;
        }
        // Inside the cell proper, not the trailing gap
        if cx - c as f64 * pitch >= self.cell || cy - r as f64 * pitch >= self.cell {
            return None;
        }
        Some((r, c))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adjacent_centers_differ_by_one_pitch() {
        let m = CellMetrics::default();
        let (x0, y0) = m.center(2, 3);
        let (x1, y1) = m.center(2, 4);
        assert_eq!(x1 - x0, CELL + GAP);
        assert_eq!(y1, y0);

        let (x2, y2) = m.center(3, 3);
        assert_eq!(y2 - y0, CELL + GAP);
        assert_eq!(x2, x0);
    }

    #[test]
    fn first_center_offset() {
        let m = CellMetrics::default();
        assert_eq!(m.center(0, 0), (GAP + CELL / 2.0, GAP + CELL / 2.0));
    }

    #[test]
    fn canvas_size_counts_all_gaps() {
        let m = CellMetrics::default();
        let (w, h) = m.canvas_size(3, 5);
        assert_eq!(w, 5.0 * (CELL + GAP) + GAP);
        assert_eq!(h, 3.0 * (CELL + GAP) + GAP);
    }

    #[test]
    fn cell_at_inverts_center() {
        let m = CellMetrics::default();
        for r in 0..4 {
            for c in 0..6 {
                let (x, y) = m.center(r, c);
                assert_eq!(m.cell_at(x, y, 4, 6), Some((r, c)));
            }
        }
    }

    #[test]
    fn cell_at_misses_gaps_and_outside() {
        let m = CellMetrics::default();
        assert_eq!(m.cell_at(1.0, 1.0, 3, 3), None); // leading gap
        assert_eq!(m.cell_at(GAP + CELL + 1.0, GAP + 1.0, 3, 3), None); // inter-cell gap
        assert_eq!(m.cell_at(-5.0, 10.0, 3, 3), None);
        let (w, h) = m.canvas_size(3, 3);
        assert_eq!(m.cell_at(w + 1.0, h + 1.0, 3, 3), None);
    }
}
