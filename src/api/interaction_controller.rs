use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::{
    CoordinateMapper, DataPoint, HitKind, PixelPoint, TrendlineId, classify_hit,
    distance_point_to_segment,
};
use crate::extensions::TrendlineAction;
use crate::interaction::CursorStyle;
use crate::render::Renderer;

use super::AnnotationEngine;

/// First trendline under the pointer and the part that was hit.
#[derive(Debug, Clone, PartialEq)]
pub struct TrendlineHit {
    pub id: TrendlineId,
    pub kind: HitKind,
    /// Plot-local projection of the start point.
    pub start_px: PixelPoint,
    /// Plot-local projection of the end point.
    pub end_px: PixelPoint,
}

/// Summary shown for a double-clicked trendline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendlineInfo {
    pub id: TrendlineId,
    pub start: DataPoint,
    pub end: DataPoint,
    /// `None` for a vertical line.
    pub slope: Option<f64>,
    pub percent_change: Option<f64>,
}

impl<R: Renderer> AnnotationEngine<R> {
    /// Hit-tests a container-space position against every trendline.
    ///
    /// Trendlines are visited in collection order and the first non-`None`
    /// classification wins.
    #[must_use]
    pub fn hit_test(&self, x: f64, y: f64) -> Option<TrendlineHit> {
        let mapper = self.mapper()?;
        let pointer = self.plot_local(x, y)?;
        self.hit_at(mapper, pointer)
    }

    pub(super) fn hit_at(
        &self,
        mapper: CoordinateMapper,
        pointer: PixelPoint,
    ) -> Option<TrendlineHit> {
        self.store.iter().find_map(|trendline| {
            let start_px = mapper.to_pixel(trendline.start_point());
            let end_px = mapper.to_pixel(trendline.end_point());
            let kind = classify_hit(pointer, start_px, end_px, self.config.hit_test);
            kind.is_hit().then(|| TrendlineHit {
                id: trendline.id().clone(),
                kind,
                start_px,
                end_px,
            })
        })
    }

    /// First trendline whose segment lies within the line threshold.
    pub(super) fn body_hit_at(
        &self,
        mapper: CoordinateMapper,
        pointer: PixelPoint,
    ) -> Option<TrendlineId> {
        let threshold = self.config.hit_test.line_threshold_px;
        self.store
            .iter()
            .find(|trendline| {
                let start_px = mapper.to_pixel(trendline.start_point());
                let end_px = mapper.to_pixel(trendline.end_point());
                distance_point_to_segment(pointer, start_px, end_px) <= threshold
            })
            .map(|trendline| trendline.id().clone())
    }

    /// Routes pointer movement to the active drag, or updates hover state.
    ///
    /// Returns `true` when a dragged trendline changed.
    pub fn pointer_move(&mut self, x: f64, y: f64) -> bool {
        if self.interaction.is_dragging() {
            return self.drag_to(x, y);
        }

        if self.interaction.is_draw_mode() {
            self.interaction.set_hovered(None);
            self.interaction.set_cursor(CursorStyle::Crosshair);
            return false;
        }

        let hit = self
            .mapper()
            .zip(self.plot_local(x, y))
            .and_then(|(mapper, pointer)| self.hit_at(mapper, pointer));
        match hit {
            Some(hit) => {
                trace!(id = %hit.id, kind = ?hit.kind, "hovering trendline");
                self.interaction.set_cursor(CursorStyle::for_hit(hit.kind));
                self.interaction.set_hovered(Some(hit.id));
            }
            None => {
                self.interaction.set_hovered(None);
                self.interaction.set_cursor(CursorStyle::Default);
            }
        }
        false
    }

    /// Pointer left the chart container.
    ///
    /// Clears hover only; an active drag keeps going under pointer capture.
    pub fn pointer_leave(&mut self) {
        self.interaction.set_hovered(None);
        if !self.interaction.is_dragging() {
            self.interaction.set_cursor(self.interaction.resting_cursor());
        }
    }

    /// Selects the trendline under the pointer and reports its geometry.
    ///
    /// Ignored in draw mode and while dragging.
    pub fn double_click(&mut self, x: f64, y: f64) -> Option<TrendlineInfo> {
        if self.interaction.is_draw_mode() || self.interaction.is_dragging() {
            return None;
        }
        let mapper = self.mapper()?;
        let pointer = self.plot_local(x, y)?;
        let id = self.body_hit_at(mapper, pointer)?;
        let trendline = self.store.get(id.as_str())?.clone();

        self.interaction.set_selected(Some(id.clone()));
        let info = TrendlineInfo {
            id,
            start: trendline.start_point(),
            end: trendline.end_point(),
            slope: trendline.slope(),
            percent_change: trendline.percent_change(),
        };
        self.trendline_info = Some(info.clone());
        self.emit_trendline_event(&trendline, TrendlineAction::DoubleClicked);
        Some(info)
    }
}
