mod capture;

use serde::{Deserialize, Serialize};

use crate::core::{DataPoint, HitKind, PixelPoint, Trendline, TrendlineId};

pub use capture::{PointerCapture, PointerCaptureGuard, SharedPointerCapture};

/// Coarse interaction phase exposed to hosts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InteractionMode {
    Idle,
    Drawing,
    Dragging,
}

/// Which part of a trendline a drag reshapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DragKind {
    StartPoint,
    EndPoint,
    WholeLine,
}

impl DragKind {
    #[must_use]
    pub fn from_hit(hit: HitKind) -> Option<Self> {
        match hit {
            HitKind::StartHandle => Some(Self::StartPoint),
            HitKind::EndHandle => Some(Self::EndPoint),
            HitKind::Body => Some(Self::WholeLine),
            HitKind::None => None,
        }
    }
}

/// Pointer affordance for the current hover/drag target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CursorStyle {
    #[default]
    Default,
    Crosshair,
    Grab,
    Move,
}

impl CursorStyle {
    #[must_use]
    pub fn for_hit(hit: HitKind) -> Self {
        match hit {
            HitKind::StartHandle | HitKind::EndHandle => Self::Grab,
            HitKind::Body => Self::Move,
            HitKind::None => Self::Default,
        }
    }
}

/// First click of a two-click draw gesture.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DrawingState {
    pub active: bool,
    pub anchor_point: Option<DataPoint>,
}

/// Drag bookkeeping captured at pointer-down.
///
/// Whole-line moves translate the cached pixel projections of the original
/// endpoints, so repeated moves never accumulate rounding error.
#[derive(Debug, Clone, PartialEq)]
pub struct DragState {
    pub trendline_id: TrendlineId,
    pub drag_kind: DragKind,
    pub pointer_anchor: PixelPoint,
    pub original_trendline: Trendline,
    pub original_start_px: PixelPoint,
    pub original_end_px: PixelPoint,
}

#[derive(Debug)]
struct DragSession {
    state: DragState,
    _capture: PointerCaptureGuard,
}

#[derive(Debug, Default)]
enum Gesture {
    #[default]
    Idle,
    Drawing(DrawingState),
    Dragging(DragSession),
}

/// Transient, non-persisted interaction state.
///
/// At most one gesture (draw or drag) is active; hovered and selected are
/// single-valued.
#[derive(Debug, Default)]
pub struct InteractionState {
    gesture: Gesture,
    draw_mode: bool,
    hovered: Option<TrendlineId>,
    selected: Option<TrendlineId>,
    cursor: CursorStyle,
}

impl InteractionState {
    #[must_use]
    pub fn mode(&self) -> InteractionMode {
        match self.gesture {
            Gesture::Idle => InteractionMode::Idle,
            Gesture::Drawing(_) => InteractionMode::Drawing,
            Gesture::Dragging(_) => InteractionMode::Dragging,
        }
    }

    #[must_use]
    pub fn is_draw_mode(&self) -> bool {
        self.draw_mode
    }

    /// Switches draw mode; any pending anchor is discarded.
    pub fn set_draw_mode(&mut self, enabled: bool) {
        self.draw_mode = enabled;
        if matches!(self.gesture, Gesture::Drawing(_)) {
            self.gesture = Gesture::Idle;
        }
        if enabled {
            self.hovered = None;
        }
        self.cursor = if enabled {
            CursorStyle::Crosshair
        } else {
            CursorStyle::Default
        };
    }

    #[must_use]
    pub fn drawing_state(&self) -> DrawingState {
        match self.gesture {
            Gesture::Drawing(state) => state,
            _ => DrawingState::default(),
        }
    }

    #[must_use]
    pub fn pending_anchor(&self) -> Option<DataPoint> {
        self.drawing_state().anchor_point
    }

    pub fn begin_drawing(&mut self, anchor: DataPoint) {
        self.gesture = Gesture::Drawing(DrawingState {
            active: true,
            anchor_point: Some(anchor),
        });
    }

    /// Consumes the pending anchor and returns to idle.
    pub fn finish_drawing(&mut self) -> Option<DataPoint> {
        let anchor = self.pending_anchor()?;
        self.gesture = Gesture::Idle;
        Some(anchor)
    }

    #[must_use]
    pub fn drag(&self) -> Option<&DragState> {
        match &self.gesture {
            Gesture::Dragging(session) => Some(&session.state),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        matches!(self.gesture, Gesture::Dragging(_))
    }

    pub fn begin_drag(&mut self, state: DragState, capture: PointerCaptureGuard) {
        self.gesture = Gesture::Dragging(DragSession {
            state,
            _capture: capture,
        });
    }

    /// Ends the active drag, releasing pointer capture.
    pub fn end_drag(&mut self) -> Option<DragState> {
        match std::mem::take(&mut self.gesture) {
            Gesture::Dragging(session) => Some(session.state),
            other => {
                self.gesture = other;
                None
            }
        }
    }

    #[must_use]
    pub fn hovered(&self) -> Option<&TrendlineId> {
        self.hovered.as_ref()
    }

    pub fn set_hovered(&mut self, id: Option<TrendlineId>) {
        self.hovered = id;
    }

    #[must_use]
    pub fn selected(&self) -> Option<&TrendlineId> {
        self.selected.as_ref()
    }

    pub fn set_selected(&mut self, id: Option<TrendlineId>) {
        self.selected = id;
    }

    #[must_use]
    pub fn cursor(&self) -> CursorStyle {
        self.cursor
    }

    pub fn set_cursor(&mut self, cursor: CursorStyle) {
        self.cursor = cursor;
    }

    /// Drops every reference to a removed trendline. Returns `true` when a
    /// drag on it was cancelled.
    pub fn forget(&mut self, id: &str) -> bool {
        if self.hovered.as_ref().is_some_and(|hovered| hovered.as_str() == id) {
            self.hovered = None;
        }
        if self
            .selected
            .as_ref()
            .is_some_and(|selected| selected.as_str() == id)
        {
            self.selected = None;
        }
        let dragging_it = self
            .drag()
            .is_some_and(|drag| drag.trendline_id.as_str() == id);
        if dragging_it {
            self.end_drag();
            self.cursor = self.resting_cursor();
        }
        dragging_it
    }

    /// Back to idle with nothing hovered or selected; draw mode is kept.
    pub fn reset(&mut self) {
        self.gesture = Gesture::Idle;
        self.hovered = None;
        self.selected = None;
        self.cursor = self.resting_cursor();
    }

    #[must_use]
    pub fn resting_cursor(&self) -> CursorStyle {
        if self.draw_mode {
            CursorStyle::Crosshair
        } else {
            CursorStyle::Default
        }
    }
}
