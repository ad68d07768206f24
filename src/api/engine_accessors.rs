use tracing::debug;

use crate::core::{
    CoordinateMapper, DataExtents, DataPoint, OhlcBar, PixelPoint, PlotArea, Trendline,
};
use crate::error::{ChartError, ChartResult};
use crate::interaction::{CursorStyle, InteractionMode, SharedPointerCapture};
use crate::render::Renderer;
use crate::store::{StoreSubscriber, TrendlineStore};

use super::{AnnotationEngine, TrendlineInfo};

impl<R: Renderer> AnnotationEngine<R> {
    #[must_use]
    pub fn plot_area(&self) -> Option<PlotArea> {
        self.plot_area
    }

    /// Updates the plot rectangle reported by the chart collaborator.
    pub fn set_plot_area(&mut self, plot_area: PlotArea) -> ChartResult<()> {
        let plot_area = plot_area.validate()?;
        self.plot_area = Some(plot_area);
        debug!(
            width = plot_area.width,
            height = plot_area.height,
            "plot area updated"
        );
        Ok(())
    }

    #[must_use]
    pub fn extents(&self) -> Option<DataExtents> {
        self.extents
    }

    pub fn set_extents(&mut self, extents: DataExtents) {
        self.extents = Some(extents);
    }

    /// Recomputes extents from candle data with the configured price padding.
    ///
    /// On error the previous extents stay in place.
    pub fn set_candles(&mut self, candles: &[OhlcBar]) -> ChartResult<()> {
        let extents = DataExtents::from_candles(candles, self.config.price_padding_ratio)
            .ok_or_else(|| ChartError::InvalidData("candle set must not be empty".to_owned()))?;
        self.extents = Some(extents);
        debug!(
            candles = candles.len(),
            time_min = extents.time_min,
            time_max = extents.time_max,
            price_min = extents.price_min,
            price_max = extents.price_max,
            "extents recomputed from candles"
        );
        Ok(())
    }

    /// Mapper for the current plot area and extents, once both are known.
    #[must_use]
    pub fn mapper(&self) -> Option<CoordinateMapper> {
        Some(CoordinateMapper::new(self.plot_area?, self.extents?))
    }

    /// Maps a container-space position into data space.
    #[must_use]
    pub fn data_at(&self, x: f64, y: f64) -> Option<DataPoint> {
        let mapper = self.mapper()?;
        mapper.pixel_to_data(self.plot_local(x, y)?)
    }

    pub(super) fn plot_local(&self, x: f64, y: f64) -> Option<PixelPoint> {
        if !x.is_finite() || !y.is_finite() {
            return None;
        }
        Some(self.plot_area?.to_local(PixelPoint::new(x, y)))
    }

    #[must_use]
    pub fn trendlines(&self) -> Vec<Trendline> {
        self.store.list()
    }

    #[must_use]
    pub fn trendline(&self, id: &str) -> Option<&Trendline> {
        self.store.get(id)
    }

    #[must_use]
    pub fn store(&self) -> &TrendlineStore {
        &self.store
    }

    pub fn subscribe_store(&mut self, subscriber: Box<dyn StoreSubscriber>) -> ChartResult<()> {
        self.store.subscribe(subscriber)
    }

    pub fn unsubscribe_store(&mut self, subscriber_id: &str) -> bool {
        self.store.unsubscribe(subscriber_id)
    }

    /// Installs the host hook used to capture the pointer during drags.
    pub fn set_pointer_capture(&mut self, capture: Option<SharedPointerCapture>) {
        self.pointer_capture = capture;
    }

    #[must_use]
    pub fn interaction_mode(&self) -> InteractionMode {
        self.interaction.mode()
    }

    #[must_use]
    pub fn is_draw_mode(&self) -> bool {
        self.interaction.is_draw_mode()
    }

    #[must_use]
    pub fn pending_anchor(&self) -> Option<DataPoint> {
        self.interaction.pending_anchor()
    }

    #[must_use]
    pub fn selected_id(&self) -> Option<&str> {
        self.interaction.selected().map(|id| id.as_str())
    }

    #[must_use]
    pub fn hovered_id(&self) -> Option<&str> {
        self.interaction.hovered().map(|id| id.as_str())
    }

    #[must_use]
    pub fn dragging_id(&self) -> Option<&str> {
        self.interaction
            .drag()
            .map(|drag| drag.trendline_id.as_str())
    }

    #[must_use]
    pub fn cursor(&self) -> CursorStyle {
        self.interaction.cursor()
    }

    /// Details of the last double-clicked trendline.
    #[must_use]
    pub fn trendline_info(&self) -> Option<&TrendlineInfo> {
        self.trendline_info.as_ref()
    }

    /// Closes the info panel; the selection is kept.
    pub fn dismiss_trendline_info(&mut self) {
        self.trendline_info = None;
    }
}
