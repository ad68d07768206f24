use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use crate::core::DataPoint;

/// Fixed display palette; new trendlines pick one entry pseudo-randomly.
pub const TRENDLINE_PALETTE: [&str; 10] = [
    "#FF6384", "#36A2EB", "#FFCE56", "#4BC0C0", "#9966FF", "#FF9F40", "#8AC926", "#1982C4",
    "#6A4C93", "#FF595E",
];

pub const DEFAULT_TRENDLINE_WIDTH: f64 = 2.0;

/// Unique trendline identifier.
///
/// Older persisted collections stored numeric ids; those deserialize into
/// their decimal string form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct TrendlineId(String);

impl TrendlineId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Last `n` characters, used for compact on-chart labels.
    #[must_use]
    pub fn suffix(&self, n: usize) -> &str {
        let start = self
            .0
            .char_indices()
            .rev()
            .nth(n.saturating_sub(1))
            .map_or(0, |(index, _)| index);
        &self.0[start..]
    }
}

impl fmt::Display for TrendlineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for TrendlineId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for TrendlineId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl<'de> Deserialize<'de> for TrendlineId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Text(String),
            Integer(u64),
            Float(f64),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Text(text) => Self(text),
            RawId::Integer(value) => Self(value.to_string()),
            RawId::Float(value) => Self(value.to_string()),
        })
    }
}

/// `#RRGGBB` display color.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrendlineColor(String);

impl Default for TrendlineColor {
    fn default() -> Self {
        Self(TRENDLINE_PALETTE[1].to_owned())
    }
}

impl TrendlineColor {
    #[must_use]
    pub fn new(hex: impl Into<String>) -> Self {
        Self(hex.into())
    }

    #[must_use]
    pub fn palette(index: usize) -> Self {
        Self(TRENDLINE_PALETTE[index % TRENDLINE_PALETTE.len()].to_owned())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parses `#RRGGBB` into byte channels; `None` for any other shape.
    #[must_use]
    pub fn rgb_components(&self) -> Option<(u8, u8, u8)> {
        let hex = self.0.strip_prefix('#')?;
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).ok();
        Some((channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }
}

/// Sign of a trendline's price move, as reported in interaction records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrendDirection {
    Bullish,
    Bearish,
}

impl fmt::Display for TrendDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bullish => f.write_str("Bullish"),
            Self::Bearish => f.write_str("Bearish"),
        }
    }
}

/// Orders two points so the earlier one comes first (ties keep `a` first).
#[must_use]
pub fn order_by_time(a: DataPoint, b: DataPoint) -> (DataPoint, DataPoint) {
    if a.time <= b.time { (a, b) } else { (b, a) }
}

/// Two-point annotation in data space.
///
/// `start_point.time <= end_point.time` holds for every value built through
/// this type's constructors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trendline {
    id: TrendlineId,
    #[serde(alias = "start")]
    start_point: DataPoint,
    #[serde(alias = "end")]
    end_point: DataPoint,
    #[serde(default)]
    color: TrendlineColor,
    #[serde(default = "default_width")]
    width: f64,
}

fn default_width() -> f64 {
    DEFAULT_TRENDLINE_WIDTH
}

impl Trendline {
    #[must_use]
    pub fn new(id: TrendlineId, a: DataPoint, b: DataPoint, color: TrendlineColor) -> Self {
        let (start_point, end_point) = order_by_time(a, b);
        Self {
            id,
            start_point,
            end_point,
            color,
            width: DEFAULT_TRENDLINE_WIDTH,
        }
    }

    /// Same identity and styling, new geometry (re-ordered by time).
    #[must_use]
    pub fn with_points(&self, a: DataPoint, b: DataPoint) -> Self {
        let (start_point, end_point) = order_by_time(a, b);
        Self {
            start_point,
            end_point,
            ..self.clone()
        }
    }

    /// Restores the time-order invariant on values that bypassed the constructors.
    #[must_use]
    pub fn normalized(self) -> Self {
        let (start_point, end_point) = order_by_time(self.start_point, self.end_point);
        Self {
            start_point,
            end_point,
            ..self
        }
    }

    #[must_use]
    pub fn id(&self) -> &TrendlineId {
        &self.id
    }

    #[must_use]
    pub fn start_point(&self) -> DataPoint {
        self.start_point
    }

    #[must_use]
    pub fn end_point(&self) -> DataPoint {
        self.end_point
    }

    #[must_use]
    pub fn color(&self) -> &TrendlineColor {
        &self.color
    }

    #[must_use]
    pub fn width(&self) -> f64 {
        self.width
    }

    #[must_use]
    pub fn is_time_ordered(&self) -> bool {
        self.start_point.time <= self.end_point.time
    }

    /// Price units per time unit; `None` for a vertical line.
    #[must_use]
    pub fn slope(&self) -> Option<f64> {
        let time_span = self.end_point.time - self.start_point.time;
        if time_span == 0.0 {
            return None;
        }
        Some((self.end_point.price - self.start_point.price) / time_span)
    }

    #[must_use]
    pub fn price_change(&self) -> f64 {
        self.end_point.price - self.start_point.price
    }

    /// Percentage move relative to the start price; `None` when it is zero.
    #[must_use]
    pub fn percent_change(&self) -> Option<f64> {
        if self.start_point.price == 0.0 {
            return None;
        }
        Some(self.price_change() / self.start_point.price * 100.0)
    }

    #[must_use]
    pub fn direction(&self) -> TrendDirection {
        if self.end_point.price > self.start_point.price {
            TrendDirection::Bullish
        } else {
            TrendDirection::Bearish
        }
    }

    #[must_use]
    pub fn midpoint(&self) -> DataPoint {
        DataPoint::new(
            (self.start_point.time + self.end_point.time) * 0.5,
            (self.start_point.price + self.end_point.price) * 0.5,
        )
    }
}
