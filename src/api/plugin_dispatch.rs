use tracing::info;

use crate::core::Trendline;
use crate::extensions::{PluginContext, TrendlineAction, TrendlineEvent};
use crate::render::Renderer;

use super::AnnotationEngine;

impl<R: Renderer> AnnotationEngine<R> {
    pub(super) fn plugin_context(&self) -> PluginContext {
        PluginContext {
            plot_area: self.plot_area,
            extents: self.extents,
            trendlines_len: self.store.len(),
            interaction_mode: self.interaction.mode(),
            draw_mode: self.interaction.is_draw_mode(),
            selected: self.interaction.selected().cloned(),
            hovered: self.interaction.hovered().cloned(),
        }
    }

    /// Logs the interaction record and hands it to every plugin.
    pub(super) fn emit_trendline_event(&mut self, trendline: &Trendline, action: TrendlineAction) {
        let event = TrendlineEvent::new(trendline, action);
        info!(
            id = %event.id,
            action = %event.action,
            start_timestamp = %event.start_point.timestamp,
            start_price = event.start_point.price,
            end_timestamp = %event.end_point.timestamp,
            end_price = event.end_point.price,
            price_change = event.price_change,
            direction = %event.direction,
            slope = ?event.slope,
            "trendline interaction"
        );

        let context = self.plugin_context();
        for plugin in &mut self.plugins {
            plugin.on_event(&event, &context);
        }
    }
}
