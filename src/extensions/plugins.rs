use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::primitives::format_unix_millis;
use crate::core::{DataExtents, DataPoint, PlotArea, TrendDirection, Trendline, TrendlineId};
use crate::interaction::InteractionMode;

/// What happened to a trendline, as reported in interaction records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrendlineAction {
    Created,
    Selected,
    Updated,
    Dragged,
    DoubleClicked,
    Deleted,
}

impl fmt::Display for TrendlineAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Created => "Created",
            Self::Selected => "Selected",
            Self::Updated => "Updated",
            Self::Dragged => "Dragged",
            Self::DoubleClicked => "Double-clicked",
            Self::Deleted => "Deleted",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventPoint {
    /// RFC 3339 rendering of `time`.
    pub timestamp: String,
    pub time: f64,
    pub price: f64,
}

impl From<DataPoint> for EventPoint {
    fn from(point: DataPoint) -> Self {
        Self {
            timestamp: format_unix_millis(point.time),
            time: point.time,
            price: point.price,
        }
    }
}

/// Structured debugging record for one trendline interaction.
///
/// Logged and handed to plugins; never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendlineEvent {
    pub id: TrendlineId,
    pub action: TrendlineAction,
    pub start_point: EventPoint,
    pub end_point: EventPoint,
    pub price_change: f64,
    pub direction: TrendDirection,
    pub slope: Option<f64>,
}

impl TrendlineEvent {
    #[must_use]
    pub fn new(trendline: &Trendline, action: TrendlineAction) -> Self {
        Self {
            id: trendline.id().clone(),
            action,
            start_point: trendline.start_point().into(),
            end_point: trendline.end_point().into(),
            price_change: trendline.price_change(),
            direction: trendline.direction(),
            slope: trendline.slope(),
        }
    }
}

/// Read-only state snapshot passed to plugin hooks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PluginContext {
    pub plot_area: Option<PlotArea>,
    pub extents: Option<DataExtents>,
    pub trendlines_len: usize,
    pub interaction_mode: InteractionMode,
    pub draw_mode: bool,
    pub selected: Option<TrendlineId>,
    pub hovered: Option<TrendlineId>,
}

/// Extension hook interface for interaction records.
///
/// Plugins observe events and read engine context without mutating
/// annotation state directly.
pub trait AnnotationPlugin {
    fn id(&self) -> &str;
    fn on_event(&mut self, event: &TrendlineEvent, context: &PluginContext);
}
