use tracing::debug;

use crate::core::{DataPoint, Trendline};
use crate::error::ChartResult;
use crate::extensions::TrendlineAction;
use crate::render::Renderer;

use super::AnnotationEngine;

impl<R: Renderer> AnnotationEngine<R> {
    /// Creates a trendline from two data points in any order.
    pub fn create_trendline(&mut self, a: DataPoint, b: DataPoint) -> ChartResult<Trendline> {
        let trendline = self.store.create(a, b)?;
        self.emit_trendline_event(&trendline, TrendlineAction::Created);
        Ok(trendline)
    }

    /// Replaces a trendline's geometry, e.g. from a coordinate editor.
    pub fn update_trendline(
        &mut self,
        id: &str,
        a: DataPoint,
        b: DataPoint,
    ) -> ChartResult<Trendline> {
        let trendline = self.store.update(id, a, b)?;
        if self
            .trendline_info
            .as_ref()
            .is_some_and(|info| info.id.as_str() == id)
        {
            self.trendline_info = None;
        }
        self.emit_trendline_event(&trendline, TrendlineAction::Updated);
        Ok(trendline)
    }

    /// Selects a trendline by id. Returns `false` when it does not exist.
    pub fn select_trendline(&mut self, id: &str) -> bool {
        let Some(trendline) = self.store.get(id).cloned() else {
            return false;
        };
        self.interaction.set_selected(Some(trendline.id().clone()));
        self.emit_trendline_event(&trendline, TrendlineAction::Selected);
        true
    }

    pub fn clear_selection(&mut self) {
        self.interaction.set_selected(None);
    }

    /// Deletes a trendline and drops every transient reference to it.
    ///
    /// The `Deleted` record is emitted while the trendline still exists.
    /// A drag on it is cancelled and pointer capture released. Returns
    /// `false` when the id is unknown.
    pub fn delete_trendline(&mut self, id: &str) -> bool {
        let Some(trendline) = self.store.get(id).cloned() else {
            return false;
        };
        self.emit_trendline_event(&trendline, TrendlineAction::Deleted);
        self.store.delete(id);

        if self.interaction.forget(id) {
            debug!(id, "cancelled drag on deleted trendline");
        }
        if self
            .trendline_info
            .as_ref()
            .is_some_and(|info| info.id.as_str() == id)
        {
            self.trendline_info = None;
        }
        true
    }

    /// Deletes the current selection, if any.
    pub fn delete_selected(&mut self) -> bool {
        let Some(id) = self.interaction.selected().cloned() else {
            return false;
        };
        self.delete_trendline(id.as_str())
    }

    /// Removes every trendline and resets all transient interaction state.
    ///
    /// Draw mode itself is kept; a pending anchor is dropped.
    pub fn clear_all(&mut self) {
        self.store.clear();
        self.interaction.reset();
        self.trendline_info = None;
    }
}
