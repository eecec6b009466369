/// Vertical extent of an element relative to the viewport top, in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub top: f64,
    pub bottom: f64,
}

impl Rect {
    pub fn new(top: f64, bottom: f64) -> Self {
        Self { top, bottom }
    }

    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    /// True when the horizontal line at `y` crosses the rect (edges inclusive).
    pub fn spans_line(&self, y: f64) -> bool {
        self.top <= y && self.bottom >= y
    }

    /// True when the rect overlaps the open band `(band_top, band_bottom)`.
    pub fn intersects_band(&self, band_top: f64, band_bottom: f64) -> bool {
        band_top < band_bottom && self.top < band_bottom && self.bottom > band_top
    }

    pub fn offset(&self, dy: f64) -> Self {
        Self::new(self.top + dy, self.bottom + dy)
    }
}

#[cfg(test)]
mod tests {
    use super::Rect;

    #[test]
    fn line_on_edges_counts_as_spanned() {
        let rect = Rect::new(100.0, 400.0);
        assert!(rect.spans_line(100.0));
        assert!(rect.spans_line(400.0));
        assert!(!rect.spans_line(400.5));
    }

    #[test]
    fn touching_band_edge_is_not_an_intersection() {
        let rect = Rect::new(700.0, 900.0);
        assert!(!rect.intersects_band(100.0, 700.0));
        assert!(rect.intersects_band(100.0, 700.5));
    }

    #[test]
    fn inverted_band_never_intersects() {
        let rect = Rect::new(0.0, 1000.0);
        assert!(!rect.intersects_band(100.0, 50.0));
    }
}
