use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use crate::error::{ChartError, ChartResult};

pub fn decimal_to_f64(value: Decimal, field_name: &str) -> ChartResult<f64> {
    value.to_f64().ok_or_else(|| {
        ChartError::InvalidData(format!("{field_name} cannot be represented as f64"))
    })
}

#[must_use]
pub fn datetime_to_unix_millis(time: DateTime<Utc>) -> f64 {
    time.timestamp_millis() as f64
}

/// Parses `YYYY-MM-DD` (UTC midnight) or RFC 3339 timestamps into epoch millis.
pub fn parse_date_to_unix_millis(input: &str) -> ChartResult<f64> {
    let trimmed = input.trim();
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        && let Some(midnight) = date.and_hms_opt(0, 0, 0)
    {
        return Ok(datetime_to_unix_millis(midnight.and_utc()));
    }
    DateTime::parse_from_rfc3339(trimmed)
        .map(|time| datetime_to_unix_millis(time.with_timezone(&Utc)))
        .map_err(|e| ChartError::InvalidData(format!("unparseable candle date `{input}`: {e}")))
}

/// Formats epoch millis as an RFC 3339 UTC string for log records.
///
/// Values outside chrono's representable range fall back to the raw number.
#[must_use]
pub fn format_unix_millis(time: f64) -> String {
    if time.is_finite()
        && let Some(datetime) = DateTime::<Utc>::from_timestamp_millis(time.round() as i64)
    {
        return datetime.to_rfc3339_opts(SecondsFormat::Millis, true);
    }
    format!("{time}")
}
