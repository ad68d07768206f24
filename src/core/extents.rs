use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::core::OhlcBar;
use crate::error::{ChartError, ChartResult};

/// Default multiplicative padding applied to candle-derived price bounds.
pub const DEFAULT_PRICE_PADDING_RATIO: f64 = 0.01;

/// Visible data-space window: time and price min/max.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DataExtents {
    pub time_min: f64,
    pub time_max: f64,
    pub price_min: f64,
    pub price_max: f64,
}

impl DataExtents {
    pub fn new(time_min: f64, time_max: f64, price_min: f64, price_max: f64) -> ChartResult<Self> {
        for (value, name) in [
            (time_min, "time_min"),
            (time_max, "time_max"),
            (price_min, "price_min"),
            (price_max, "price_max"),
        ] {
            if !value.is_finite() {
                return Err(ChartError::InvalidData(format!(
                    "extent `{name}` must be finite"
                )));
            }
        }
        if time_min > time_max || price_min > price_max {
            return Err(ChartError::InvalidData(
                "extent minimums must be <= maximums".to_owned(),
            ));
        }

        Ok(Self {
            time_min,
            time_max,
            price_min,
            price_max,
        })
    }

    /// Derives extents from a candle series.
    ///
    /// Price bounds cover every OHLC value and are padded by
    /// `price_padding_ratio` on each side (`min * (1 - r)`, `max * (1 + r)`).
    /// Returns `None` for an empty series.
    #[must_use]
    pub fn from_candles(candles: &[OhlcBar], price_padding_ratio: f64) -> Option<Self> {
        let time_min = candles.iter().map(|bar| OrderedFloat(bar.time)).min()?.0;
        let time_max = candles.iter().map(|bar| OrderedFloat(bar.time)).max()?.0;
        let price_min = candles
            .iter()
            .flat_map(|bar| bar.prices())
            .map(OrderedFloat)
            .min()?
            .0;
        let price_max = candles
            .iter()
            .flat_map(|bar| bar.prices())
            .map(OrderedFloat)
            .max()?
            .0;

        let ratio = if price_padding_ratio.is_finite() && price_padding_ratio >= 0.0 {
            price_padding_ratio
        } else {
            0.0
        };
        // Multiplicative padding inverts direction for negative prices; keep
        // the pair ordered so the extents stay well-formed.
        let padded_min = price_min * (1.0 - ratio);
        let padded_max = price_max * (1.0 + ratio);

        Some(Self {
            time_min,
            time_max,
            price_min: padded_min.min(padded_max),
            price_max: padded_max.max(padded_min),
        })
    }

    #[must_use]
    pub fn time_span(self) -> f64 {
        self.time_max - self.time_min
    }

    #[must_use]
    pub fn price_span(self) -> f64 {
        self.price_max - self.price_min
    }
}
