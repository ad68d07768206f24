use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Pixel-space bounding box of the chart's plot area.
///
/// `left`/`top` locate the plot area inside the host container; all
/// annotation geometry is expressed relative to the plot-area top-left.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlotArea {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl PlotArea {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            left: 0.0,
            top: 0.0,
            width,
            height,
        }
    }

    #[must_use]
    pub fn with_offset(mut self, left: f64, top: f64) -> Self {
        self.left = left;
        self.top = top;
        self
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.left.is_finite()
            && self.top.is_finite()
            && self.width.is_finite()
            && self.height.is_finite()
            && self.width > 0.0
            && self.height > 0.0
    }

    pub fn validate(self) -> ChartResult<Self> {
        if !self.is_valid() {
            return Err(ChartError::InvalidPlotArea {
                width: self.width,
                height: self.height,
            });
        }
        Ok(self)
    }

    /// Inclusive containment test in plot-local pixels.
    #[must_use]
    pub fn contains_local(self, x: f64, y: f64) -> bool {
        (0.0..=self.width).contains(&x) && (0.0..=self.height).contains(&y)
    }

    /// Converts a container-space position into plot-local pixels.
    #[must_use]
    pub fn to_local(self, screen: PixelPoint) -> PixelPoint {
        PixelPoint::new(screen.x - self.left, screen.y - self.top)
    }

    /// Converts a plot-local position back into container-space pixels.
    #[must_use]
    pub fn to_screen(self, local: PixelPoint) -> PixelPoint {
        PixelPoint::new(local.x + self.left, local.y + self.top)
    }
}

/// Position in data space: epoch milliseconds and price.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    #[serde(alias = "x")]
    pub time: f64,
    #[serde(alias = "y")]
    pub price: f64,
}

impl DataPoint {
    #[must_use]
    pub fn new(time: f64, price: f64) -> Self {
        Self { time, price }
    }

    #[must_use]
    pub fn is_finite(self) -> bool {
        self.time.is_finite() && self.price.is_finite()
    }

    /// Rejects points that cannot be ordered or serialized.
    pub fn validate(self) -> ChartResult<Self> {
        if !self.is_finite() {
            return Err(ChartError::InvalidData(format!(
                "data point must be finite: time={}, price={}",
                self.time, self.price
            )));
        }
        Ok(self)
    }
}

/// Position in plot-local pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PixelPoint {
    pub x: f64,
    pub y: f64,
}

impl PixelPoint {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub fn distance_to(self, other: PixelPoint) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    #[must_use]
    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    #[must_use]
    pub fn midpoint(self, other: PixelPoint) -> Self {
        Self::new((self.x + other.x) * 0.5, (self.y + other.y) * 0.5)
    }
}
