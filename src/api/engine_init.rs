use tracing::debug;

use crate::error::ChartResult;
use crate::interaction::InteractionState;
use crate::persistence::TrendlinePersistence;
use crate::render::Renderer;
use crate::store::TrendlineStore;

use super::{AnnotationEngine, AnnotationEngineConfig};

impl<R: Renderer> AnnotationEngine<R> {
    /// Creates an engine and loads the persisted collection once.
    ///
    /// The config's `storage_key` replaces whatever key `persistence`
    /// carried. Extents stay unset until candles or explicit extents arrive,
    /// and pointer events are ignored until then.
    pub fn new(
        renderer: R,
        config: AnnotationEngineConfig,
        persistence: TrendlinePersistence,
    ) -> ChartResult<Self> {
        let config = config.validate()?;

        let mut store = TrendlineStore::open(persistence.with_key(config.storage_key.clone()));
        if let Some(seed) = config.rng_seed {
            store = store.with_rng_seed(seed);
        }
        debug!(
            trendlines = store.len(),
            key = %config.storage_key,
            "annotation engine initialized"
        );

        Ok(Self {
            renderer,
            plot_area: config.plot_area,
            extents: None,
            store,
            interaction: InteractionState::default(),
            pointer_capture: None,
            plugins: Vec::new(),
            trendline_info: None,
            config,
        })
    }
}
