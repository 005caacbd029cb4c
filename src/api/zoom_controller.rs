use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::core::pixel_align::{logical_to_physical_px, next_odd, sanitize_dpr};
use crate::core::{ColumnMetrics, compute_viewport};
use crate::render::Renderer;

use super::host::HostContainer;
use super::options::ChartOptions;
use super::Chart;

/// Physical pixels added to or removed from the body per wheel tick.
pub const ZOOM_STEP_PX: i64 = 2;
/// Physical gap between candles after any zoom.
pub const ZOOM_GAP_PX: i64 = 3;

/// Outcome of one zoom step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoomChange {
    pub k_width: f64,
    pub k_gap: f64,
    /// Scroll offset that keeps `center_index` under the cursor. Not yet
    /// clamped to the host's scroll bounds.
    pub scroll_left: f64,
    /// Fractional data index that was under the cursor.
    pub center_index: f64,
}

/// Computes the candle size and scroll target for one wheel step.
///
/// The body grows (negative `delta_y`) or shrinks by [`ZOOM_STEP_PX`]
/// physical pixels and stays odd; the gap is fixed at [`ZOOM_GAP_PX`].
/// Returns `None` when the width would not change.
#[must_use]
pub fn plan_zoom(
    options: &ChartOptions,
    dpr: f64,
    mouse_x: f64,
    scroll_left: f64,
    delta_y: f64,
) -> Option<ZoomChange> {
    if !delta_y.is_finite() || delta_y == 0.0 || !mouse_x.is_finite() || !scroll_left.is_finite()
    {
        return None;
    }
    let dpr = sanitize_dpr(dpr);
    let current = ColumnMetrics::new(options.k_width, options.k_gap, dpr);
    let center_index = current.fractional_index_at(scroll_left, mouse_x);

    let direction: i64 = if delta_y < 0.0 { 1 } else { -1 };
    let mut width_px = current.body_px() + direction * ZOOM_STEP_PX;
    if width_px % 2 == 0 {
        width_px += direction;
    }
    let (min_px, max_px) = physical_width_bounds(options, dpr);
    let width_px = width_px.clamp(min_px, max_px);
    if width_px == current.body_px() {
        trace!(width_px, "zoom step is a no-op");
        return None;
    }

    let next = ColumnMetrics::from_physical(width_px, ZOOM_GAP_PX, dpr);
    Some(ZoomChange {
        k_width: next.body_width(),
        k_gap: next.gap(),
        scroll_left: center_index * next.unit() - mouse_x,
        center_index,
    })
}

/// Odd physical body widths allowed by `[min_k_width, max_k_width]`.
fn physical_width_bounds(options: &ChartOptions, dpr: f64) -> (i64, i64) {
    let min_px = next_odd((options.min_k_width * dpr).ceil() as i64);
    let mut max_px = logical_to_physical_px(options.max_k_width, dpr);
    if max_px % 2 == 0 {
        max_px -= 1;
    }
    (min_px, max_px.max(min_px))
}

impl<H: HostContainer, R: Renderer> Chart<H, R> {
    /// Zooms around the plot-local `cursor_x`, keeping the candle under the
    /// cursor in place.
    ///
    /// With a zoom listener registered the listener runs first so the host
    /// can resize its content, and the scroll target is clamped against the
    /// new bounds afterwards; otherwise it is clamped against the current
    /// bounds right away.
    pub fn zoom_at(&mut self, cursor_x: f64, scroll_left: f64, delta_y: f64) -> Option<ZoomChange> {
        if self.is_destroyed() {
            trace!("zoom after destroy ignored");
            return None;
        }
        let viewport = compute_viewport(
            self.host.geometry(),
            scroll_left,
            self.options.axis_insets(),
        );
        let change = plan_zoom(&self.options, viewport.dpr, cursor_x, scroll_left, delta_y)?;

        let mut next = ChartOptions::clone(&self.options);
        next.k_width = change.k_width;
        next.k_gap = change.k_gap;
        self.options = Arc::new(next);
        self.invalidate_layout();

        if let Some(listener) = self.zoom_listener.as_mut() {
            listener(&mut self.host, &change);
        }
        let applied = change.scroll_left.clamp(0.0, self.max_scroll_left());
        self.host.set_scroll_left(applied);
        debug!(
            k_width = change.k_width,
            k_gap = change.k_gap,
            center_index = change.center_index,
            scroll_left = applied,
            "zoomed"
        );
        self.schedule_draw();
        Some(change)
    }
}

#[cfg(test)]
mod tests {
    use super::{ZOOM_GAP_PX, plan_zoom};
    use crate::api::ChartOptions;
    use crate::core::ColumnMetrics;

    #[test]
    fn zoom_in_grows_by_two_physical_pixels() {
        let options = ChartOptions::default().with_candle_size(6.0, 2.0);
        let change = plan_zoom(&options, 2.0, 100.0, 0.0, -100.0).expect("zoomed");
        // 12 physical -> 13 (odd) -> 15
        assert_eq!(change.k_width, 7.5);
        assert_eq!(change.k_gap, ZOOM_GAP_PX as f64 / 2.0);
    }

    #[test]
    fn zoom_out_shrinks_and_stays_odd() {
        let options = ChartOptions::default().with_candle_size(6.0, 2.0);
        let change = plan_zoom(&options, 1.5, 100.0, 0.0, 120.0).expect("zoomed");
        let metrics = ColumnMetrics::new(change.k_width, change.k_gap, 1.5);
        assert_eq!(metrics.body_px() % 2, 1);
        assert_eq!(metrics.body_px(), 7);
        assert_eq!(metrics.gap_px(), ZOOM_GAP_PX);
    }

    #[test]
    fn clamped_width_is_a_no_op() {
        let mut options = ChartOptions::default().with_candle_size(5.0, 2.0);
        options.max_k_width = 5.0;
        assert!(plan_zoom(&options, 1.0, 10.0, 0.0, -1.0).is_none());
        assert!(plan_zoom(&options, 1.0, 10.0, 0.0, 0.0).is_none());
    }

    #[test]
    fn index_under_cursor_is_preserved() {
        let options = ChartOptions::default().with_candle_size(6.0, 2.0);
        let dpr = 2.0;
        let mouse_x = 163.0;
        let before = ColumnMetrics::new(6.0, 2.0, dpr).fractional_index_at(0.0, mouse_x);
        let change = plan_zoom(&options, dpr, mouse_x, 0.0, -100.0).expect("zoomed");
        let after = ColumnMetrics::new(change.k_width, change.k_gap, dpr)
            .fractional_index_at(change.scroll_left.max(0.0), mouse_x);
        assert!((after - before).abs() <= 1.0);
    }
}
