pub mod candle;
pub mod extents;
pub mod hit_test;
pub mod mapper;
pub mod primitives;
pub mod scale;
pub mod trendline;
pub mod types;

pub use candle::{CandlePrice, CandleRecord, CandleTime, OhlcBar, bars_from_records};
pub use extents::{DEFAULT_PRICE_PADDING_RATIO, DataExtents};
pub use hit_test::{
    HitKind, HitTestConfig, classify_hit, distance_point_to_point, distance_point_to_segment,
};
pub use mapper::CoordinateMapper;
pub use scale::AxisScale;
pub use trendline::{
    DEFAULT_TRENDLINE_WIDTH, TRENDLINE_PALETTE, TrendDirection, Trendline, TrendlineColor,
    TrendlineId, order_by_time,
};
pub use types::{DataPoint, PixelPoint, PlotArea};
