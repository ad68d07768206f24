use std::cell::RefCell;
use std::rc::Rc;

use approx::assert_abs_diff_eq;
use chart_trendlines::api::{AnnotationEngine, AnnotationEngineConfig};
use chart_trendlines::core::{DataExtents, DataPoint, HitKind, PlotArea, Trendline};
use chart_trendlines::interaction::{
    CursorStyle, InteractionMode, PointerCapture, SharedPointerCapture,
};
use chart_trendlines::persistence::TrendlinePersistence;
use chart_trendlines::render::NullRenderer;

#[derive(Debug, Default)]
struct CaptureCounter {
    acquired: usize,
    released: usize,
}

impl PointerCapture for CaptureCounter {
    fn acquire(&mut self) {
        self.acquired += 1;
    }

    fn release(&mut self) {
        self.released += 1;
    }
}

/// 200x200 plot over time 0..100 and price 0..100, counting pointer-capture calls.
fn engine() -> (AnnotationEngine<NullRenderer>, Rc<RefCell<CaptureCounter>>) {
    let config = AnnotationEngineConfig::default()
        .with_plot_area(PlotArea::new(200.0, 200.0))
        .with_rng_seed(5);
    let mut engine = AnnotationEngine::new(
        NullRenderer::default(),
        config,
        TrendlinePersistence::in_memory(),
    )
    .expect("engine init");
    engine.set_extents(DataExtents::new(0.0, 100.0, 0.0, 100.0).expect("extents"));

    let counter = Rc::new(RefCell::new(CaptureCounter::default()));
    let shared: SharedPointerCapture = counter.clone();
    engine.set_pointer_capture(Some(shared));
    (engine, counter)
}

fn px(time: f64, price: f64) -> (f64, f64) {
    (time * 2.0, 200.0 - price * 2.0)
}

fn assert_point(actual: DataPoint, time: f64, price: f64) {
    assert_abs_diff_eq!(actual.time, time, epsilon = 1e-9);
    assert_abs_diff_eq!(actual.price, price, epsilon = 1e-9);
}

fn current(engine: &AnnotationEngine<NullRenderer>, line: &Trendline) -> Trendline {
    engine
        .trendline(line.id().as_str())
        .expect("trendline exists")
        .clone()
}

#[test]
fn dragging_start_handle_past_end_reorders_points() {
    let (mut engine, counter) = engine();
    let line = engine
        .create_trendline(DataPoint::new(5.0, 20.0), DataPoint::new(10.0, 50.0))
        .expect("create trendline");

    let (x, y) = px(5.0, 20.0);
    assert_eq!(
        engine.hit_test(x, y).map(|hit| hit.kind),
        Some(HitKind::StartHandle)
    );
    assert!(engine.pointer_down(x, y));
    assert_eq!(engine.interaction_mode(), InteractionMode::Dragging);
    assert_eq!(engine.cursor(), CursorStyle::Grab);
    assert_eq!(engine.selected_id(), Some(line.id().as_str()));
    assert_eq!(counter.borrow().acquired, 1);

    let (x, y) = px(15.0, 70.0);
    assert!(engine.pointer_move(x, y));
    let moved = current(&engine, &line);
    assert_point(moved.start_point(), 10.0, 50.0);
    assert_point(moved.end_point(), 15.0, 70.0);

    let finished = engine.pointer_up().expect("drag finished on existing line");
    assert_eq!(finished, moved);
    assert_eq!(engine.interaction_mode(), InteractionMode::Idle);
    assert_eq!(counter.borrow().released, 1);
}

#[test]
fn dragging_end_handle_moves_only_the_end() {
    let (mut engine, _counter) = engine();
    let line = engine
        .create_trendline(DataPoint::new(10.0, 10.0), DataPoint::new(50.0, 30.0))
        .expect("create trendline");

    let (x, y) = px(50.0, 30.0);
    assert!(engine.pointer_down(x, y));
    let (x, y) = px(60.0, 40.0);
    engine.pointer_move(x, y);
    let (x, y) = px(70.0, 45.0);
    engine.pointer_move(x, y);
    engine.pointer_up();

    let moved = current(&engine, &line);
    assert_point(moved.start_point(), 10.0, 10.0);
    assert_point(moved.end_point(), 70.0, 45.0);
}

#[test]
fn whole_line_drag_translates_both_endpoints() {
    let (mut engine, _counter) = engine();
    let line = engine
        .create_trendline(DataPoint::new(10.0, 50.0), DataPoint::new(30.0, 50.0))
        .expect("create trendline");

    let (x, y) = px(20.0, 50.0);
    assert!(engine.pointer_down(x, y));
    assert_eq!(engine.cursor(), CursorStyle::Move);

    // 10px right and 20px up: +5 time, +10 price.
    assert!(engine.pointer_move(x + 10.0, y - 20.0));
    let moved = current(&engine, &line);
    assert_point(moved.start_point(), 15.0, 60.0);
    assert_point(moved.end_point(), 35.0, 60.0);

    // Further moves are measured from the drag origin, not accumulated.
    assert!(engine.pointer_move(x + 20.0, y));
    let moved = current(&engine, &line);
    assert_point(moved.start_point(), 20.0, 50.0);
    assert_point(moved.end_point(), 40.0, 50.0);
}

#[test]
fn whole_line_drag_out_of_bounds_leaves_line_untouched() {
    let (mut engine, _counter) = engine();
    let line = engine
        .create_trendline(DataPoint::new(10.0, 50.0), DataPoint::new(90.0, 50.0))
        .expect("create trendline");

    let (x, y) = px(50.0, 50.0);
    assert!(engine.pointer_down(x, y));
    // The end point would land at time 130.
    assert!(!engine.pointer_move(x + 40.0, y));
    assert_eq!(current(&engine, &line), line);
    assert_eq!(engine.interaction_mode(), InteractionMode::Dragging);
}

#[test]
fn handle_drag_out_of_bounds_is_skipped() {
    let (mut engine, _counter) = engine();
    let line = engine
        .create_trendline(DataPoint::new(10.0, 50.0), DataPoint::new(90.0, 50.0))
        .expect("create trendline");

    let (x, y) = px(10.0, 50.0);
    assert!(engine.pointer_down(x, y));
    assert!(!engine.pointer_move(-5.0, 100.0));
    assert_eq!(current(&engine, &line), line);
}

#[test]
fn pointer_down_on_empty_space_starts_nothing() {
    let (mut engine, counter) = engine();
    engine
        .create_trendline(DataPoint::new(10.0, 10.0), DataPoint::new(20.0, 10.0))
        .expect("create trendline");

    let (x, y) = px(80.0, 80.0);
    assert!(!engine.pointer_down(x, y));
    assert_eq!(engine.interaction_mode(), InteractionMode::Idle);
    assert_eq!(counter.borrow().acquired, 0);
    assert!(engine.pointer_up().is_none());
}

#[test]
fn pointer_down_is_ignored_in_draw_mode() {
    let (mut engine, _counter) = engine();
    engine
        .create_trendline(DataPoint::new(10.0, 10.0), DataPoint::new(20.0, 10.0))
        .expect("create trendline");
    engine.set_draw_mode(true);

    let (x, y) = px(10.0, 10.0);
    assert!(!engine.pointer_down(x, y));
    assert_eq!(engine.interaction_mode(), InteractionMode::Idle);
}

#[test]
fn deleting_the_dragged_line_cancels_the_drag() {
    let (mut engine, counter) = engine();
    let line = engine
        .create_trendline(DataPoint::new(10.0, 10.0), DataPoint::new(50.0, 50.0))
        .expect("create trendline");

    let (x, y) = px(30.0, 30.0);
    assert!(engine.pointer_down(x, y));
    assert!(engine.delete_trendline(line.id().as_str()));

    assert_eq!(engine.interaction_mode(), InteractionMode::Idle);
    assert_eq!(engine.selected_id(), None);
    assert_eq!(counter.borrow().released, 1);
    assert!(!engine.pointer_move(x + 10.0, y));
    assert!(engine.pointer_up().is_none());
    assert!(engine.trendlines().is_empty());
}

#[test]
fn clear_all_resets_interaction_and_releases_capture() {
    let (mut engine, counter) = engine();
    for i in 0..3 {
        let t = f64::from(i) * 20.0 + 10.0;
        engine
            .create_trendline(DataPoint::new(t, 10.0), DataPoint::new(t + 10.0, 40.0))
            .expect("create trendline");
    }
    let (x, y) = px(10.0, 10.0);
    assert!(engine.pointer_down(x, y));

    engine.clear_all();

    assert!(engine.trendlines().is_empty());
    assert_eq!(engine.interaction_mode(), InteractionMode::Idle);
    assert_eq!(engine.selected_id(), None);
    assert_eq!(engine.hovered_id(), None);
    assert_eq!(engine.trendline_info(), None);
    assert_eq!(counter.borrow().released, 1);
}

#[test]
fn hover_sets_cursor_by_hit_kind() {
    let (mut engine, _counter) = engine();
    let line = engine
        .create_trendline(DataPoint::new(10.0, 50.0), DataPoint::new(90.0, 50.0))
        .expect("create trendline");

    let (x, y) = px(10.0, 50.0);
    engine.pointer_move(x, y);
    assert_eq!(engine.hovered_id(), Some(line.id().as_str()));
    assert_eq!(engine.cursor(), CursorStyle::Grab);

    let (x, y) = px(50.0, 52.0);
    engine.pointer_move(x, y);
    assert_eq!(engine.cursor(), CursorStyle::Move);

    let (x, y) = px(50.0, 80.0);
    engine.pointer_move(x, y);
    assert_eq!(engine.hovered_id(), None);
    assert_eq!(engine.cursor(), CursorStyle::Default);

    let (x, y) = px(50.0, 50.0);
    engine.pointer_move(x, y);
    engine.pointer_leave();
    assert_eq!(engine.hovered_id(), None);
}

#[test]
fn hover_is_skipped_in_draw_mode() {
    let (mut engine, _counter) = engine();
    engine
        .create_trendline(DataPoint::new(10.0, 50.0), DataPoint::new(90.0, 50.0))
        .expect("create trendline");
    engine.set_draw_mode(true);

    let (x, y) = px(50.0, 50.0);
    engine.pointer_move(x, y);
    assert_eq!(engine.hovered_id(), None);
    assert_eq!(engine.cursor(), CursorStyle::Crosshair);
}

#[test]
fn first_trendline_in_collection_order_wins() {
    let (mut engine, _counter) = engine();
    let first = engine
        .create_trendline(DataPoint::new(10.0, 50.0), DataPoint::new(90.0, 50.0))
        .expect("create trendline");
    engine
        .create_trendline(DataPoint::new(10.0, 51.0), DataPoint::new(90.0, 51.0))
        .expect("create trendline");

    let (x, y) = px(50.0, 50.5);
    let hit = engine.hit_test(x, y).expect("both lines are close");
    assert_eq!(&hit.id, first.id());
}

#[test]
fn double_click_reports_slope_and_selects() {
    let (mut engine, _counter) = engine();
    let line = engine
        .create_trendline(DataPoint::new(10.0, 20.0), DataPoint::new(30.0, 60.0))
        .expect("create trendline");

    let (x, y) = px(20.0, 40.0);
    let info = engine.double_click(x, y).expect("body hit");
    assert_eq!(&info.id, line.id());
    assert_abs_diff_eq!(info.slope.expect("finite slope"), 2.0, epsilon = 1e-9);
    assert_abs_diff_eq!(
        info.percent_change.expect("non-zero start"),
        200.0,
        epsilon = 1e-9
    );
    assert_eq!(engine.selected_id(), Some(line.id().as_str()));
    assert_eq!(engine.trendline_info(), Some(&info));

    assert!(engine.delete_trendline(line.id().as_str()));
    assert_eq!(engine.trendline_info(), None);
}

#[test]
fn dismissing_info_keeps_selection() {
    let (mut engine, _counter) = engine();
    let line = engine
        .create_trendline(DataPoint::new(10.0, 20.0), DataPoint::new(30.0, 60.0))
        .expect("create trendline");
    let (x, y) = px(20.0, 40.0);
    engine.double_click(x, y).expect("body hit");

    engine.dismiss_trendline_info();

    assert_eq!(engine.trendline_info(), None);
    assert_eq!(engine.selected_id(), Some(line.id().as_str()));
    assert!(engine.trendline(line.id().as_str()).is_some());
}

#[test]
fn double_click_is_ignored_in_draw_mode_and_while_dragging() {
    let (mut engine, _counter) = engine();
    engine
        .create_trendline(DataPoint::new(10.0, 20.0), DataPoint::new(30.0, 60.0))
        .expect("create trendline");
    let (x, y) = px(20.0, 40.0);

    engine.set_draw_mode(true);
    assert!(engine.double_click(x, y).is_none());
    engine.set_draw_mode(false);

    assert!(engine.pointer_down(x, y));
    assert!(engine.double_click(x, y).is_none());
}
