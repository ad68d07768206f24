use serde::{Deserialize, Serialize};

use crate::core::PixelPoint;
use crate::error::{ChartError, ChartResult};

/// Pixel-radius thresholds shared by hover, drag-start and click handling.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HitTestConfig {
    /// Radius around an endpoint that counts as a handle hit.
    pub point_threshold_px: f64,
    /// Maximum distance from the segment that counts as a body hit.
    pub line_threshold_px: f64,
}

impl Default for HitTestConfig {
    fn default() -> Self {
        Self {
            point_threshold_px: 10.0,
            line_threshold_px: 8.0,
        }
    }
}

impl HitTestConfig {
    pub fn validate(self) -> ChartResult<Self> {
        for (value, name) in [
            (self.point_threshold_px, "point_threshold_px"),
            (self.line_threshold_px, "line_threshold_px"),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ChartError::InvalidData(format!(
                    "hit-test `{name}` must be finite and > 0"
                )));
            }
        }
        Ok(self)
    }
}

/// Which part of a trendline a pointer is over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HitKind {
    None,
    StartHandle,
    EndHandle,
    Body,
}

impl HitKind {
    #[must_use]
    pub fn is_hit(self) -> bool {
        self != Self::None
    }

    #[must_use]
    pub fn is_handle(self) -> bool {
        matches!(self, Self::StartHandle | Self::EndHandle)
    }
}

#[must_use]
pub fn distance_point_to_point(p: PixelPoint, q: PixelPoint) -> f64 {
    p.distance_to(q)
}

/// Distance from `p` to the closed segment `a`-`b`.
///
/// Projects `p` onto the segment's line, clamps the parameter to `[0, 1]`
/// and measures to the clamped point. A zero-length segment degrades to
/// point distance.
#[must_use]
pub fn distance_point_to_segment(p: PixelPoint, a: PixelPoint, b: PixelPoint) -> f64 {
    let seg_x = b.x - a.x;
    let seg_y = b.y - a.y;
    let len_sq = seg_x * seg_x + seg_y * seg_y;
    if len_sq == 0.0 {
        return distance_point_to_point(p, a);
    }

    let dot = (p.x - a.x) * seg_x + (p.y - a.y) * seg_y;
    let t = (dot / len_sq).clamp(0.0, 1.0);
    let closest = PixelPoint::new(a.x + t * seg_x, a.y + t * seg_y);
    distance_point_to_point(p, closest)
}

/// Classifies a pointer against one trendline's pixel endpoints.
///
/// Handles win over the body since both regions overlap near the ends.
#[must_use]
pub fn classify_hit(
    pointer: PixelPoint,
    start: PixelPoint,
    end: PixelPoint,
    config: HitTestConfig,
) -> HitKind {
    if distance_point_to_point(pointer, start) <= config.point_threshold_px {
        return HitKind::StartHandle;
    }
    if distance_point_to_point(pointer, end) <= config.point_threshold_px {
        return HitKind::EndHandle;
    }
    if distance_point_to_segment(pointer, start, end) <= config.line_threshold_px {
        return HitKind::Body;
    }
    HitKind::None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn px(x: f64, y: f64) -> PixelPoint {
        PixelPoint::new(x, y)
    }

    #[test]
    fn segment_distance_is_perpendicular_inside_and_clamped_outside() {
        let a = px(0.0, 0.0);
        let b = px(100.0, 0.0);
        assert_eq!(distance_point_to_segment(px(50.0, 5.0), a, b), 5.0);
        assert_eq!(distance_point_to_segment(px(-3.0, 4.0), a, b), 5.0);
        assert_eq!(distance_point_to_segment(px(103.0, -4.0), a, b), 5.0);
    }

    #[test]
    fn degenerate_segment_uses_point_distance() {
        let a = px(10.0, 10.0);
        assert_eq!(distance_point_to_segment(px(13.0, 14.0), a, a), 5.0);
    }

    #[test]
    fn thresholds_are_inclusive() {
        let config = HitTestConfig::default();
        let start = px(0.0, 0.0);
        let end = px(200.0, 0.0);
        assert_eq!(
            classify_hit(px(100.0, 8.0), start, end, config),
            HitKind::Body
        );
        assert_eq!(
            classify_hit(px(100.0, 8.01), start, end, config),
            HitKind::None
        );
        assert_eq!(
            classify_hit(px(210.0, 0.0), start, end, config),
            HitKind::EndHandle
        );
    }

    #[test]
    fn rejects_non_positive_thresholds() {
        let config = HitTestConfig {
            point_threshold_px: 0.0,
            ..HitTestConfig::default()
        };
        assert!(config.validate().is_err());
        assert!(HitTestConfig::default().validate().is_ok());
    }
}
