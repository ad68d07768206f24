use crate::core::{PixelPoint, Trendline, TrendlineColor};
use crate::render::{CirclePrimitive, Color, LinePrimitive, RenderFrame, Renderer, TextPrimitive};

use super::AnnotationEngine;

const PENDING_ANCHOR_COLOR: Color = Color::rgb(0.231, 0.510, 0.965);
const LABEL_COLOR: Color = Color::WHITE;
const LABEL_OFFSET_PX: (f64, f64) = (10.0, -10.0);
const ID_LABEL_CHARS: usize = 4;

impl<R: Renderer> AnnotationEngine<R> {
    /// Materializes the annotation overlay in container pixels.
    ///
    /// Hovered, selected and dragged lines are drawn thicker and carry
    /// endpoint handles plus a short id label. Returns `None` until both a
    /// plot area and extents are known.
    #[must_use]
    pub fn build_overlay_frame(&self) -> Option<RenderFrame> {
        let mapper = self.mapper()?;
        let plot_area = mapper.plot_area();
        let fallback = Color::from_trendline_color(&TrendlineColor::default(), Color::WHITE);
        let mut frame = RenderFrame::new(plot_area);

        for trendline in self.store.iter() {
            let start = plot_area.to_screen(mapper.to_pixel(trendline.start_point()));
            let end = plot_area.to_screen(mapper.to_pixel(trendline.end_point()));
            if ![start.x, start.y, end.x, end.y]
                .iter()
                .all(|value| value.is_finite())
            {
                continue;
            }
            let color = Color::from_trendline_color(trendline.color(), fallback);
            let emphasized = self.is_emphasized(trendline);
            let stroke_width = if emphasized {
                trendline.width() + self.config.emphasis_stroke_delta_px
            } else {
                trendline.width()
            };
            frame = frame.with_line(LinePrimitive::new(start, end, stroke_width, color));

            if emphasized {
                frame = self.with_handles(frame, trendline, start, end, color);
            }
        }

        if let Some(anchor) = self.interaction.pending_anchor() {
            let anchor_px = plot_area.to_screen(mapper.to_pixel(anchor));
            frame = frame.with_circle(CirclePrimitive::new(
                anchor_px.x,
                anchor_px.y,
                self.config.handle_radius_px,
                PENDING_ANCHOR_COLOR,
            ));
        }

        Some(frame)
    }

    fn is_emphasized(&self, trendline: &Trendline) -> bool {
        let id = trendline.id().as_str();
        self.hovered_id() == Some(id)
            || self.selected_id() == Some(id)
            || self.dragging_id() == Some(id)
    }

    fn with_handles(
        &self,
        frame: RenderFrame,
        trendline: &Trendline,
        start: PixelPoint,
        end: PixelPoint,
        color: Color,
    ) -> RenderFrame {
        let radius = self.config.handle_radius_px;
        let label_at = start
            .midpoint(end)
            .offset(LABEL_OFFSET_PX.0, LABEL_OFFSET_PX.1);
        frame
            .with_circle(CirclePrimitive::new(start.x, start.y, radius, color))
            .with_circle(CirclePrimitive::new(end.x, end.y, radius, color))
            .with_text(TextPrimitive::new(
                format!("#{}", trendline.id().suffix(ID_LABEL_CHARS)),
                label_at,
                self.config.label_font_size_px,
                LABEL_COLOR,
            ))
    }
}
