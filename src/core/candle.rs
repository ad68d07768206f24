use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::primitives::{datetime_to_unix_millis, decimal_to_f64, parse_date_to_unix_millis};
use crate::error::{ChartError, ChartResult};

/// Canonical OHLC candle consumed for data extents.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OhlcBar {
    pub time: f64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

impl OhlcBar {
    /// Builds a validated OHLC bar from raw floating values.
    ///
    /// Invariants:
    /// - all values are finite
    /// - `low <= high`
    /// - `open` and `close` are within `[low, high]`
    pub fn new(time: f64, open: f64, high: f64, low: f64, close: f64) -> ChartResult<Self> {
        if !time.is_finite()
            || !open.is_finite()
            || !high.is_finite()
            || !low.is_finite()
            || !close.is_finite()
        {
            return Err(ChartError::InvalidData(
                "ohlc values must be finite".to_owned(),
            ));
        }

        if low > high {
            return Err(ChartError::InvalidData(
                "ohlc low must be <= high".to_owned(),
            ));
        }

        if open < low || open > high || close < low || close > high {
            return Err(ChartError::InvalidData(
                "ohlc open/close must be within low/high range".to_owned(),
            ));
        }

        Ok(Self {
            time,
            open,
            high,
            low,
            close,
        })
    }

    /// Converts strongly-typed temporal/decimal input into a validated OHLC bar.
    pub fn from_decimal_time(
        time: DateTime<Utc>,
        open: Decimal,
        high: Decimal,
        low: Decimal,
        close: Decimal,
    ) -> ChartResult<Self> {
        Self::new(
            datetime_to_unix_millis(time),
            decimal_to_f64(open, "open")?,
            decimal_to_f64(high, "high")?,
            decimal_to_f64(low, "low")?,
            decimal_to_f64(close, "close")?,
        )
    }

    /// Every price value of the bar, in OHLC order.
    #[must_use]
    pub fn prices(self) -> [f64; 4] {
        [self.open, self.high, self.low, self.close]
    }
}

/// Timestamp shape delivered by the market-data collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CandleTime {
    EpochMillis(i64),
    Date(String),
}

impl CandleTime {
    pub fn to_unix_millis(&self) -> ChartResult<f64> {
        match self {
            Self::EpochMillis(millis) => Ok(*millis as f64),
            Self::Date(date) => parse_date_to_unix_millis(date),
        }
    }
}

/// Price field as delivered upstream: exchanges commonly send decimal strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CandlePrice {
    Number(f64),
    Text(String),
}

impl CandlePrice {
    fn to_f64(&self, field_name: &str) -> ChartResult<f64> {
        match self {
            Self::Number(value) => Ok(*value),
            Self::Text(text) => {
                let decimal = Decimal::from_str(text.trim()).map_err(|e| {
                    ChartError::InvalidData(format!("{field_name} `{text}` is not a decimal: {e}"))
                })?;
                decimal_to_f64(decimal, field_name)
            }
        }
    }
}

/// Raw `{timestamp, open, high, low, close}` record from the market-data source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandleRecord {
    #[serde(alias = "date")]
    pub timestamp: CandleTime,
    pub open: CandlePrice,
    pub high: CandlePrice,
    pub low: CandlePrice,
    pub close: CandlePrice,
}

impl CandleRecord {
    pub fn to_bar(&self) -> ChartResult<OhlcBar> {
        OhlcBar::new(
            self.timestamp.to_unix_millis()?,
            self.open.to_f64("open")?,
            self.high.to_f64("high")?,
            self.low.to_f64("low")?,
            self.close.to_f64("close")?,
        )
    }
}

/// Converts a market-data batch, failing on the first invalid record.
pub fn bars_from_records(records: &[CandleRecord]) -> ChartResult<Vec<OhlcBar>> {
    records.iter().map(CandleRecord::to_bar).collect()
}
