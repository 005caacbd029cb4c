mod common;

use common::chart_with_data;
use kline_rs::api::ChartOptions;
use kline_rs::core::PaneId;
use kline_rs::interaction::{InteractionController, InteractionMode};

fn options() -> ChartOptions {
    ChartOptions::default().with_candle_size(6.0, 2.0)
}

#[test]
fn crosshair_snaps_to_the_rendered_column() {
    let mut chart = chart_with_data(460.0, 424.0, 2.0, 100, options());
    let mut controller = InteractionController::default();

    controller.on_mouse_move(&mut chart, 161.0, 50.0);
    let crosshair = controller.crosshair().expect("inside plot").clone();
    assert_eq!(crosshair.index, Some(20));
    let center = chart
        .layout_snapshot()
        .columns
        .center_x(20)
        .expect("visible");
    assert_eq!(crosshair.x, center);
    assert_eq!(crosshair.y, 50.0);
    assert_eq!(crosshair.pane_id, Some(PaneId::new("main")));
    assert_eq!(chart.crosshair(), Some(&crosshair));
    assert_eq!(controller.mode(), InteractionMode::Hovering);

    controller.on_mouse_move(&mut chart, 161.0, 350.0);
    assert_eq!(
        controller.crosshair().and_then(|c| c.pane_id.clone()),
        Some(PaneId::new("volume"))
    );
}

#[test]
fn container_offset_is_subtracted_from_client_coordinates() {
    let mut chart = chart_with_data(460.0, 424.0, 1.0, 100, options());
    let geometry = chart.host().geometry.at(100.0, 40.0);
    chart.host_mut().geometry = geometry;
    chart.resize();
    let mut controller = InteractionController::default();

    controller.on_mouse_move(&mut chart, 100.0 + 20.0, 40.0 + 10.0);
    let crosshair = controller.crosshair().expect("inside plot");
    assert_eq!(crosshair.index, Some(2));
    assert_eq!(crosshair.y, 10.0);

    controller.on_mouse_move(&mut chart, 50.0, 50.0);
    assert!(controller.crosshair().is_none());
    assert!(chart.crosshair().is_none());
}

#[test]
fn points_outside_the_plot_clear_the_crosshair() {
    let mut chart = chart_with_data(460.0, 424.0, 1.0, 100, options());
    let mut controller = InteractionController::default();
    controller.on_mouse_move(&mut chart, 100.0, 100.0);
    assert!(controller.crosshair().is_some());

    // Right price axis.
    controller.on_mouse_move(&mut chart, 430.0, 100.0);
    assert!(controller.crosshair().is_none());
    assert_eq!(controller.mode(), InteractionMode::Idle);

    // Bottom time axis.
    controller.on_mouse_move(&mut chart, 100.0, 410.0);
    assert!(controller.crosshair().is_none());
}

#[test]
fn drag_scrolls_by_cursor_delta() {
    let mut chart = chart_with_data(460.0, 424.0, 1.0, 100, options());
    chart.set_scroll_left(100.0);
    let mut controller = InteractionController::default();

    controller.on_pointer_down(&mut chart, 200.0, 100.0);
    assert_eq!(controller.mode(), InteractionMode::Dragging);
    assert!(controller.crosshair().is_some());

    controller.on_pointer_move(&mut chart, 150.0, 100.0);
    assert_eq!(chart.host().scroll_left, 150.0);
    controller.on_pointer_move(&mut chart, 260.0, 100.0);
    assert_eq!(chart.host().scroll_left, 40.0);
    controller.on_pointer_move(&mut chart, 600.0, 100.0);
    assert_eq!(chart.host().scroll_left, 0.0);

    controller.on_pointer_up(&mut chart);
    assert_eq!(controller.mode(), InteractionMode::Idle);
    let scroll = chart.host().scroll_left;
    controller.on_pointer_move(&mut chart, 100.0, 100.0);
    assert_eq!(chart.host().scroll_left, scroll);
    assert_eq!(controller.mode(), InteractionMode::Hovering);
}

#[test]
fn mouse_events_are_ignored_during_a_pointer_session() {
    let mut chart = chart_with_data(460.0, 424.0, 1.0, 100, options());
    chart.set_scroll_left(100.0);
    let mut controller = InteractionController::default();

    controller.on_pointer_down(&mut chart, 200.0, 100.0);
    controller.on_mouse_move(&mut chart, 100.0, 100.0);
    assert_eq!(chart.host().scroll_left, 100.0);
    controller.on_mouse_up(&mut chart);
    assert!(controller.state().is_dragging());

    controller.on_pointer_up(&mut chart);
    controller.on_mouse_down(&mut chart, 200.0, 100.0);
    assert!(controller.state().is_dragging());
}

#[test]
fn leave_clears_crosshair_and_hover() {
    let mut chart = chart_with_data(460.0, 424.0, 1.0, 100, options());
    let mut controller = InteractionController::default();
    controller.on_mouse_move(&mut chart, 100.0, 100.0);
    controller.on_mouse_down(&mut chart, 100.0, 100.0);

    controller.on_mouse_leave(&mut chart);
    assert!(controller.crosshair().is_none());
    assert!(controller.hovered_index().is_none());
    assert!(!controller.state().is_dragging());
    assert_eq!(controller.mode(), InteractionMode::Idle);
    assert!(chart.crosshair().is_none());
}

#[test]
fn scroll_event_drops_crosshair_and_cached_columns() {
    let mut chart = chart_with_data(460.0, 424.0, 1.0, 100, options());
    let mut controller = InteractionController::default();
    controller.on_mouse_move(&mut chart, 100.0, 100.0);
    let before = chart.layout_snapshot();

    chart.host_mut().scroll_left = 80.0;
    controller.on_scroll(&mut chart);
    assert!(controller.crosshair().is_none());
    assert!(chart.crosshair().is_none());

    let after = chart.layout_snapshot();
    assert_eq!(after.viewport.scroll_left, 80.0);
    assert_ne!(before.range, after.range);
}

#[test]
fn hovering_a_candle_body_places_the_tooltip() {
    let mut chart = chart_with_data(460.0, 424.0, 1.0, 100, options());
    let mut controller = InteractionController::default();
    controller.set_tooltip_size(120.0, 80.0);

    let layout = chart.layout_snapshot();
    let band = layout.main_pane().expect("main pane").clone();
    let record = chart.data()[10].clone();
    let x = layout.columns.center_x(10).expect("visible");
    let y = band.layout.top + band.y_axis.price_to_y((record.open + record.close) / 2.0);

    controller.on_mouse_move(&mut chart, x, y);
    assert_eq!(controller.hovered_index(), Some(10));
    let tooltip = controller.tooltip().expect("tooltip shown");
    assert_eq!(tooltip.x, x + 12.0);
    assert_eq!((tooltip.width, tooltip.height), (120.0, 80.0));

    // Empty space high above the candle only gets the crosshair.
    controller.on_mouse_move(&mut chart, x + 2.0, band.layout.top + 1.0);
    assert!(controller.crosshair().is_some());
    assert!(controller.hovered_index().is_none());
    assert!(controller.tooltip().is_none());
}

#[test]
fn wheel_clears_crosshair_before_zooming() {
    let mut chart = chart_with_data(460.0, 424.0, 1.0, 100, options());
    let mut controller = InteractionController::default();
    controller.on_mouse_move(&mut chart, 100.0, 100.0);
    let change = controller.on_wheel(&mut chart, 100.0, 120.0);
    assert!(change.is_some());
    assert!(controller.crosshair().is_none());
    assert!(chart.crosshair().is_none());
    assert!(chart.options().k_width < 6.0);
}
