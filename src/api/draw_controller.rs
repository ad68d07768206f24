use tracing::{debug, trace};

use crate::core::{DataPoint, Trendline, TrendlineId};
use crate::extensions::TrendlineAction;
use crate::render::Renderer;

use super::AnnotationEngine;

/// What a single click did.
#[derive(Debug, Clone, PartialEq)]
pub enum ClickOutcome {
    /// Outside the plot, before the viewport is known, or mid-drag.
    Ignored,
    /// First click of the draw gesture.
    AnchorPlaced(DataPoint),
    /// Second click of the draw gesture.
    Created(Trendline),
    Selected(TrendlineId),
    SelectionCleared,
}

impl<R: Renderer> AnnotationEngine<R> {
    /// Flips draw mode and returns the new state.
    pub fn toggle_draw_mode(&mut self) -> bool {
        let enabled = !self.interaction.is_draw_mode();
        self.set_draw_mode(enabled);
        enabled
    }

    /// Enters or leaves draw mode; any pending anchor is discarded.
    ///
    /// Ignored while a drag is in progress.
    pub fn set_draw_mode(&mut self, enabled: bool) {
        if self.interaction.is_dragging() {
            return;
        }
        self.interaction.set_draw_mode(enabled);
        debug!(enabled, "draw mode changed");
    }

    /// Handles a click in container pixels.
    ///
    /// In draw mode two in-bounds clicks create a trendline; draw mode stays
    /// on afterwards. Out-of-bounds clicks leave any pending anchor in place.
    /// Outside draw mode the click selects the first trendline whose body is
    /// within the line threshold, or clears the selection on a miss.
    pub fn click(&mut self, x: f64, y: f64) -> ClickOutcome {
        if self.interaction.is_dragging() {
            return ClickOutcome::Ignored;
        }
        let Some(mapper) = self.mapper() else {
            return ClickOutcome::Ignored;
        };
        let Some(pointer) = self.plot_local(x, y) else {
            return ClickOutcome::Ignored;
        };

        if self.interaction.is_draw_mode() {
            let Some(point) = mapper.pixel_to_data(pointer) else {
                trace!(x, y, "draw click outside plot area");
                return ClickOutcome::Ignored;
            };
            let Some(anchor) = self.interaction.finish_drawing() else {
                self.interaction.begin_drawing(point);
                trace!(time = point.time, price = point.price, "draw anchor placed");
                return ClickOutcome::AnchorPlaced(point);
            };

            let trendline = match self.store.create(anchor, point) {
                Ok(trendline) => trendline,
                Err(err) => {
                    debug!(error = %err, "draw gesture rejected");
                    return ClickOutcome::Ignored;
                }
            };
            self.interaction.set_selected(Some(trendline.id().clone()));
            self.emit_trendline_event(&trendline, TrendlineAction::Created);
            return ClickOutcome::Created(trendline);
        }

        match self.body_hit_at(mapper, pointer) {
            Some(id) => {
                self.select_trendline(id.as_str());
                ClickOutcome::Selected(id)
            }
            None => {
                self.interaction.set_selected(None);
                ClickOutcome::SelectionCleared
            }
        }
    }
}
