use serde::{Deserialize, Serialize};

/// One-dimensional linear mapping between a data domain and a pixel length.
///
/// A zero (or non-finite) domain span never fails: the scale factor collapses
/// to 0 so every value lands on the range's single coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisScale {
    domain_start: f64,
    domain_end: f64,
    length_px: f64,
    inverted: bool,
}

impl AxisScale {
    #[must_use]
    pub fn new(domain_start: f64, domain_end: f64, length_px: f64) -> Self {
        Self {
            domain_start,
            domain_end,
            length_px,
            inverted: false,
        }
    }

    /// Pixel origin at the domain end (screen Y grows downward, prices upward).
    #[must_use]
    pub fn inverted(mut self) -> Self {
        self.inverted = true;
        self
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        (self.domain_start, self.domain_end)
    }

    #[must_use]
    pub fn length_px(self) -> f64 {
        self.length_px
    }

    #[must_use]
    pub fn span(self) -> f64 {
        let span = self.domain_end - self.domain_start;
        if span.is_finite() { span } else { 0.0 }
    }

    #[must_use]
    pub fn is_degenerate(self) -> bool {
        self.span() == 0.0 || !self.usable_length()
    }

    #[must_use]
    pub fn domain_to_pixel(self, value: f64) -> f64 {
        let span = self.span();
        let normalized = if span == 0.0 {
            0.0
        } else {
            (value - self.domain_start) / span
        };
        let along = normalized * self.length_px;
        if self.inverted {
            self.length_px - along
        } else {
            along
        }
    }

    #[must_use]
    pub fn pixel_to_domain(self, pixel: f64) -> f64 {
        if !self.usable_length() {
            return self.domain_start;
        }
        let along = if self.inverted {
            self.length_px - pixel
        } else {
            pixel
        };
        self.domain_start + (along / self.length_px) * self.span()
    }

    fn usable_length(self) -> bool {
        self.length_px.is_finite() && self.length_px > 0.0
    }
}
