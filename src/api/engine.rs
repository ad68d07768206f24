use crate::core::{DataExtents, PlotArea};
use crate::error::ChartResult;
use crate::extensions::AnnotationPlugin;
use crate::interaction::{InteractionState, SharedPointerCapture};
use crate::render::Renderer;
use crate::store::TrendlineStore;

use super::{AnnotationEngineConfig, TrendlineInfo};

/// Main orchestration facade consumed by host applications.
///
/// `AnnotationEngine` owns the trendline store, the mapper inputs (plot area
/// and data extents), transient interaction state, plugins and the overlay
/// renderer. Pointer positions are container pixels; they are shifted into
/// plot-local space before any mapping or hit testing.
pub struct AnnotationEngine<R: Renderer> {
    pub(super) renderer: R,
    pub(super) config: AnnotationEngineConfig,
    pub(super) plot_area: Option<PlotArea>,
    pub(super) extents: Option<DataExtents>,
    pub(super) store: TrendlineStore,
    pub(super) interaction: InteractionState,
    pub(super) pointer_capture: Option<SharedPointerCapture>,
    pub(super) plugins: Vec<Box<dyn AnnotationPlugin>>,
    pub(super) trendline_info: Option<TrendlineInfo>,
}

impl<R: Renderer> AnnotationEngine<R> {
    #[must_use]
    pub fn config(&self) -> &AnnotationEngineConfig {
        &self.config
    }

    /// Builds the overlay frame and hands it to the renderer.
    ///
    /// Without a usable plot area and extents there is nothing to project,
    /// so the call is a no-op.
    pub fn render(&mut self) -> ChartResult<()> {
        let Some(frame) = self.build_overlay_frame() else {
            return Ok(());
        };
        self.renderer.render(&frame)
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    #[must_use]
    pub fn into_renderer(self) -> R {
        self.renderer
    }
}

impl<R: Renderer> std::fmt::Debug for AnnotationEngine<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnnotationEngine")
            .field("plot_area", &self.plot_area)
            .field("extents", &self.extents)
            .field("store", &self.store)
            .field("interaction", &self.interaction)
            .field(
                "plugins",
                &self
                    .plugins
                    .iter()
                    .map(|plugin| plugin.id())
                    .collect::<Vec<_>>(),
            )
            .finish_non_exhaustive()
    }
}
