use tracing::trace;

use crate::api::{Chart, HostContainer, ZoomChange};
use crate::render::Renderer;
use crate::renderers::CrosshairOverlay;

use super::hit_test::{HitTolerance, hit_test_candle};
use super::state::{DragAnchor, InteractionMode, InteractionState, TooltipState};
use super::tooltip::TooltipPlacement;

/// Translates raw pointer, mouse, wheel and scroll events into drag-scroll,
/// crosshair, hovered candle and tooltip placement.
///
/// Event coordinates are client coordinates; the container origin reported
/// by the host is subtracted to get plot-local positions. Mouse events are
/// ignored while a pointer session is active so synthetic duplicates of
/// touch input do not double-apply.
#[derive(Debug, Clone, PartialEq)]
pub struct InteractionController {
    state: InteractionState,
    tooltip_size: (f64, f64),
    placement: TooltipPlacement,
    tolerance: HitTolerance,
}

impl Default for InteractionController {
    fn default() -> Self {
        Self {
            state: InteractionState::default(),
            tooltip_size: (160.0, 120.0),
            placement: TooltipPlacement::default(),
            tolerance: HitTolerance::default(),
        }
    }
}

impl InteractionController {
    #[must_use]
    pub fn new(placement: TooltipPlacement, tolerance: HitTolerance) -> Self {
        Self {
            placement,
            tolerance,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn state(&self) -> &InteractionState {
        &self.state
    }

    #[must_use]
    pub fn mode(&self) -> InteractionMode {
        self.state.mode()
    }

    #[must_use]
    pub fn crosshair(&self) -> Option<&CrosshairOverlay> {
        self.state.crosshair()
    }

    #[must_use]
    pub fn hovered_index(&self) -> Option<usize> {
        self.state.hovered_index()
    }

    #[must_use]
    pub fn tooltip(&self) -> Option<TooltipState> {
        self.state.tooltip()
    }

    /// Measured size of the host's tooltip view, used for placement.
    pub fn set_tooltip_size(&mut self, width: f64, height: f64) {
        if width.is_finite() && height.is_finite() {
            self.tooltip_size = (width.max(0.0), height.max(0.0));
        }
    }

    pub fn on_pointer_down<H: HostContainer, R: Renderer>(
        &mut self,
        chart: &mut Chart<H, R>,
        x: f64,
        y: f64,
    ) {
        self.state.begin_pointer_session();
        self.press(chart, x, y);
    }

    pub fn on_pointer_move<H: HostContainer, R: Renderer>(
        &mut self,
        chart: &mut Chart<H, R>,
        x: f64,
        y: f64,
    ) {
        self.moved(chart, x, y);
    }

    pub fn on_pointer_up<H: HostContainer, R: Renderer>(&mut self, _chart: &mut Chart<H, R>) {
        self.state.end_pointer_session();
        self.release();
    }

    pub fn on_pointer_leave<H: HostContainer, R: Renderer>(&mut self, chart: &mut Chart<H, R>) {
        self.state.end_pointer_session();
        self.leave(chart);
    }

    pub fn on_mouse_down<H: HostContainer, R: Renderer>(
        &mut self,
        chart: &mut Chart<H, R>,
        x: f64,
        y: f64,
    ) {
        if self.mouse_suppressed("down") {
            return;
        }
        self.press(chart, x, y);
    }

    pub fn on_mouse_move<H: HostContainer, R: Renderer>(
        &mut self,
        chart: &mut Chart<H, R>,
        x: f64,
        y: f64,
    ) {
        if self.mouse_suppressed("move") {
            return;
        }
        self.moved(chart, x, y);
    }

    pub fn on_mouse_up<H: HostContainer, R: Renderer>(&mut self, _chart: &mut Chart<H, R>) {
        if self.mouse_suppressed("up") {
            return;
        }
        self.release();
    }

    pub fn on_mouse_leave<H: HostContainer, R: Renderer>(&mut self, chart: &mut Chart<H, R>) {
        if self.mouse_suppressed("leave") {
            return;
        }
        self.leave(chart);
    }

    /// The host container scrolled. Cached column positions are dropped and
    /// the crosshair is cleared so it never points at a stale column.
    pub fn on_scroll<H: HostContainer, R: Renderer>(&mut self, chart: &mut Chart<H, R>) {
        chart.on_host_scrolled();
        self.clear(chart);
    }

    /// Wheel over the chart: clears the crosshair, then zooms around the
    /// cursor.
    pub fn on_wheel<H: HostContainer, R: Renderer>(
        &mut self,
        chart: &mut Chart<H, R>,
        x: f64,
        delta_y: f64,
    ) -> Option<ZoomChange> {
        self.clear(chart);
        let local_x = x - chart.host().geometry().left;
        let scroll_left = chart.host().scroll_left();
        chart.zoom_at(local_x, scroll_left, delta_y)
    }

    fn press<H: HostContainer, R: Renderer>(&mut self, chart: &mut Chart<H, R>, x: f64, y: f64) {
        self.state.start_drag(DragAnchor {
            scroll_left: chart.host().scroll_left(),
            x,
        });
        self.update_crosshair(chart, x, y);
    }

    fn moved<H: HostContainer, R: Renderer>(&mut self, chart: &mut Chart<H, R>, x: f64, y: f64) {
        if let Some(anchor) = self.state.drag_anchor() {
            chart.set_scroll_left(anchor.scroll_left - (x - anchor.x));
        }
        self.update_crosshair(chart, x, y);
    }

    fn release(&mut self) {
        if self.state.is_dragging() {
            self.state.end_drag();
        }
    }

    fn leave<H: HostContainer, R: Renderer>(&mut self, chart: &mut Chart<H, R>) {
        self.state.reset();
        chart.set_crosshair(None);
    }

    fn clear<H: HostContainer, R: Renderer>(&mut self, chart: &mut Chart<H, R>) {
        self.state.clear_pointer_targets();
        chart.set_crosshair(None);
    }

    fn mouse_suppressed(&self, event: &'static str) -> bool {
        let suppressed = self.state.pointer_session_active();
        if suppressed {
            trace!(event, "mouse event suppressed during pointer session");
        }
        suppressed
    }

    /// Recomputes crosshair, hovered candle and tooltip for a client point.
    fn update_crosshair<H: HostContainer, R: Renderer>(
        &mut self,
        chart: &mut Chart<H, R>,
        x: f64,
        y: f64,
    ) {
        let geometry = chart.host().geometry();
        let local_x = x - geometry.left;
        let local_y = y - geometry.top;
        let layout = chart.layout_snapshot();
        if !layout.contains_plot_point(local_x, local_y) {
            self.clear(chart);
            return;
        }

        let metrics = layout.columns.metrics();
        let index = metrics
            .index_at(layout.viewport.scroll_left, local_x)
            .filter(|&index| index < chart.data().len());
        let snapped_x = index
            .and_then(|index| layout.columns.center_x(index))
            .unwrap_or(local_x);
        let pane_id = layout.pane_at(local_y).map(|band| band.id.clone());
        let crosshair = CrosshairOverlay {
            x: snapped_x,
            y: local_y,
            index,
            pane_id,
        };
        self.state.set_crosshair(crosshair.clone());
        chart.set_crosshair(Some(crosshair));

        if self.state.is_dragging() {
            self.state.set_hover(None, None);
            return;
        }
        let hovered = hit_test_candle(&layout, chart.data(), local_x, local_y, self.tolerance);
        let tooltip = hovered.map(|_| {
            let (width, height) = self.tooltip_size;
            let (tooltip_x, tooltip_y) = self.placement.place(
                (local_x, local_y),
                self.tooltip_size,
                (layout.viewport.view_width, layout.viewport.view_height),
            );
            TooltipState {
                x: tooltip_x,
                y: tooltip_y,
                width,
                height,
            }
        });
        self.state.set_hover(hovered, tooltip);
    }
}
