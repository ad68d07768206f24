use tracing::{debug, trace};

use crate::core::Trendline;
use crate::extensions::TrendlineAction;
use crate::interaction::{CursorStyle, DragKind, DragState, PointerCaptureGuard};
use crate::render::Renderer;

use super::AnnotationEngine;

impl<R: Renderer> AnnotationEngine<R> {
    /// Starts dragging the first trendline under the pointer.
    ///
    /// Ignored in draw mode, where the same gesture arrives as a `click`.
    /// Returns `true` when a drag started.
    pub fn pointer_down(&mut self, x: f64, y: f64) -> bool {
        if self.interaction.is_draw_mode() || self.interaction.is_dragging() {
            return false;
        }
        let Some(mapper) = self.mapper() else {
            return false;
        };
        let Some(pointer) = self.plot_local(x, y) else {
            return false;
        };
        let Some(hit) = self.hit_at(mapper, pointer) else {
            return false;
        };
        let Some(drag_kind) = DragKind::from_hit(hit.kind) else {
            return false;
        };
        let Some(original) = self.store.get(hit.id.as_str()).cloned() else {
            return false;
        };

        let capture = PointerCaptureGuard::acquire(self.pointer_capture.clone());
        self.interaction.begin_drag(
            DragState {
                trendline_id: hit.id.clone(),
                drag_kind,
                pointer_anchor: pointer,
                original_trendline: original,
                original_start_px: hit.start_px,
                original_end_px: hit.end_px,
            },
            capture,
        );
        self.interaction.set_selected(Some(hit.id.clone()));
        self.interaction.set_cursor(CursorStyle::for_hit(hit.kind));
        debug!(id = %hit.id, kind = ?drag_kind, "drag started");
        true
    }

    /// Applies one drag step. Returns `true` when the trendline changed.
    pub(super) fn drag_to(&mut self, x: f64, y: f64) -> bool {
        let Some(drag) = self.interaction.drag() else {
            return false;
        };
        let Some(mapper) = self.mapper() else {
            return false;
        };
        let Some(pointer) = self.plot_local(x, y) else {
            return false;
        };
        let original = &drag.original_trendline;

        let points = match drag.drag_kind {
            DragKind::StartPoint => mapper
                .pixel_to_data(pointer)
                .map(|point| (point, original.end_point())),
            DragKind::EndPoint => mapper
                .pixel_to_data(pointer)
                .map(|point| (original.start_point(), point)),
            DragKind::WholeLine => {
                let dx = pointer.x - drag.pointer_anchor.x;
                let dy = pointer.y - drag.pointer_anchor.y;
                let start = mapper.pixel_to_data(drag.original_start_px.offset(dx, dy));
                let end = mapper.pixel_to_data(drag.original_end_px.offset(dx, dy));
                start.zip(end)
            }
        };
        let Some((a, b)) = points else {
            trace!(x, y, "drag step out of bounds; skipped");
            return false;
        };

        let id = drag.trendline_id.clone();
        match self.store.update(id.as_str(), a, b) {
            Ok(_) => true,
            Err(err) => {
                debug!(id = %id, error = %err, "dragged trendline vanished; ending drag");
                self.interaction.end_drag();
                self.interaction.set_cursor(self.interaction.resting_cursor());
                false
            }
        }
    }

    /// Ends the active drag and releases pointer capture.
    ///
    /// Returns the trendline's final geometry when it still exists.
    pub fn pointer_up(&mut self) -> Option<Trendline> {
        let drag = self.interaction.end_drag()?;
        self.interaction.set_cursor(self.interaction.resting_cursor());

        let trendline = self.store.get(drag.trendline_id.as_str())?.clone();
        debug!(id = %trendline.id(), "drag finished");
        self.emit_trendline_event(&trendline, TrendlineAction::Dragged);
        Some(trendline)
    }
}
