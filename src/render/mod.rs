mod frame;
mod null_renderer;
mod primitives;

pub use frame::RenderFrame;
pub use null_renderer::NullRenderer;
pub use primitives::{CirclePrimitive, Color, LinePrimitive, TextPrimitive};

use crate::error::ChartResult;

/// Contract implemented by any overlay rendering backend.
///
/// Backends receive a fully materialized `RenderFrame` so drawing code stays
/// isolated from annotation state and interaction logic.
pub trait Renderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()>;
}
