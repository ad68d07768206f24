use serde::{Deserialize, Serialize};

use crate::core::{AxisScale, DataExtents, DataPoint, PixelPoint, PlotArea};

/// Stateless pixel <-> data conversion for the current plot area and extents.
///
/// Pixel coordinates are plot-local: origin at the plot-area top-left, Y
/// growing downward while price grows upward.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CoordinateMapper {
    plot_area: PlotArea,
    extents: DataExtents,
}

impl CoordinateMapper {
    #[must_use]
    pub fn new(plot_area: PlotArea, extents: DataExtents) -> Self {
        Self {
            plot_area,
            extents,
        }
    }

    #[must_use]
    pub fn plot_area(self) -> PlotArea {
        self.plot_area
    }

    #[must_use]
    pub fn extents(self) -> DataExtents {
        self.extents
    }

    #[must_use]
    pub fn time_scale(self) -> AxisScale {
        AxisScale::new(
            self.extents.time_min,
            self.extents.time_max,
            self.plot_area.width,
        )
    }

    #[must_use]
    pub fn price_scale(self) -> AxisScale {
        AxisScale::new(
            self.extents.price_min,
            self.extents.price_max,
            self.plot_area.height,
        )
        .inverted()
    }

    /// Maps a plot-local pixel into data space.
    ///
    /// Returns `None` when the position lies outside the plot rectangle.
    #[must_use]
    pub fn to_data(self, x: f64, y: f64) -> Option<DataPoint> {
        if !self.plot_area.is_valid() || !self.plot_area.contains_local(x, y) {
            return None;
        }

        Some(DataPoint::new(
            self.time_scale().pixel_to_domain(x),
            self.price_scale().pixel_to_domain(y),
        ))
    }

    #[must_use]
    pub fn pixel_to_data(self, pixel: PixelPoint) -> Option<DataPoint> {
        self.to_data(pixel.x, pixel.y)
    }

    /// Maps a data point into plot-local pixels without bounds checks.
    ///
    /// Off-screen endpoints yield off-canvas positions.
    #[must_use]
    pub fn to_pixel(self, point: DataPoint) -> PixelPoint {
        PixelPoint::new(
            self.time_scale().domain_to_pixel(point.time),
            self.price_scale().domain_to_pixel(point.price),
        )
    }
}
