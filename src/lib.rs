//! chart-trendlines: two-point trendline annotations for price charts.
//!
//! The crate keeps annotation geometry in data space (time, price) and maps
//! it to plot pixels on demand, so lines stay anchored while the chart
//! rescales. Hosts feed pointer events and plot geometry into
//! [`AnnotationEngine`]; the engine owns the persisted collection, the
//! transient interaction state and the overlay frame handed to a
//! [`render::Renderer`].

pub mod api;
pub mod core;
pub mod error;
pub mod extensions;
pub mod interaction;
pub mod persistence;
pub mod render;
pub mod store;
pub mod telemetry;

pub use api::{AnnotationEngine, AnnotationEngineConfig};
pub use error::{ChartError, ChartResult};
