//! Column (one candle slot) geometry in physical pixels.
//!
//! The column pitch is an integer number of physical pixels and the body
//! width is odd, so candle positions are produced by integer accumulation
//! and never drift across thousands of columns.

use serde::{Deserialize, Serialize};

use crate::core::VisibleRange;
use crate::core::pixel_align::{next_odd, sanitize_dpr};

/// Candle body/gap resolved against one device pixel ratio.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColumnMetrics {
    body_px: i64,
    gap_px: i64,
    dpr: f64,
}

impl ColumnMetrics {
    /// Resolves logical candle width/gap into physical pixels.
    ///
    /// The pitch is `round((k_width + k_gap) * dpr)`; the body is the odd
    /// width closest to `k_width * dpr` that still leaves at least one gap
    /// pixel when the pitch allows it.
    #[must_use]
    pub fn new(k_width: f64, k_gap: f64, dpr: f64) -> Self {
        let dpr = sanitize_dpr(dpr);
        let k_width = if k_width.is_finite() { k_width.max(0.0) } else { 1.0 };
        let k_gap = if k_gap.is_finite() { k_gap.max(0.0) } else { 0.0 };

        let unit_px = to_px((k_width + k_gap) * dpr).max(1);
        let mut body_px = next_odd(to_px(k_width * dpr));
        if body_px > unit_px - 1 {
            body_px = largest_odd_at_most(unit_px - 1);
        }
        let gap_px = (unit_px - body_px).max(0);

        Self {
            body_px,
            gap_px,
            dpr,
        }
    }

    /// Builds metrics straight from physical sizes (used by zoom).
    #[must_use]
    pub fn from_physical(body_px: i64, gap_px: i64, dpr: f64) -> Self {
        Self {
            body_px: next_odd(body_px),
            gap_px: gap_px.max(0),
            dpr: sanitize_dpr(dpr),
        }
    }

    #[must_use]
    pub fn body_px(self) -> i64 {
        self.body_px
    }

    #[must_use]
    pub fn gap_px(self) -> i64 {
        self.gap_px
    }

    #[must_use]
    pub fn unit_px(self) -> i64 {
        self.body_px + self.gap_px
    }

    #[must_use]
    pub fn dpr(self) -> f64 {
        self.dpr
    }

    /// Logical body width.
    #[must_use]
    pub fn body_width(self) -> f64 {
        self.body_px as f64 / self.dpr
    }

    /// Logical gap.
    #[must_use]
    pub fn gap(self) -> f64 {
        self.gap_px as f64 / self.dpr
    }

    /// Logical column pitch.
    #[must_use]
    pub fn unit(self) -> f64 {
        self.unit_px() as f64 / self.dpr
    }

    /// Scrollable content width for `count` columns.
    #[must_use]
    pub fn content_width(self, count: usize) -> f64 {
        count as f64 * self.unit()
    }

    /// Whole physical pixels scrolled for a logical scroll offset.
    #[must_use]
    pub fn scroll_px(self, scroll_left: f64) -> i64 {
        to_px(scroll_left.max(0.0) * self.dpr)
    }

    /// Fractional column index under a plot-local x coordinate.
    ///
    /// Measured against whole column slots rather than `column_start`: each
    /// body lies entirely inside its own slot, so the half gap needs no offset.
    #[must_use]
    pub fn fractional_index_at(self, scroll_left: f64, local_x: f64) -> f64 {
        let world_px = self.scroll_px(scroll_left) as f64 + local_x * self.dpr;
        world_px / self.unit_px() as f64
    }

    /// Column slot under a plot-local x coordinate, if it is not left of the
    /// first column.
    #[must_use]
    pub fn index_at(self, scroll_left: f64, local_x: f64) -> Option<usize> {
        let index = self.fractional_index_at(scroll_left, local_x).floor();
        if index.is_finite() && index >= 0.0 {
            Some(index as usize)
        } else {
            None
        }
    }
}

/// One drawable column in plot-local coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColumnPosition {
    pub index: usize,
    /// Plot-local physical left edge of the body.
    pub left_px: i64,
    /// Plot-local physical column of the wick.
    pub wick_px: i64,
    /// Logical left edge of the body.
    pub left_x: f64,
    /// Logical center of the wick column.
    pub center_x: f64,
}

/// Column positions for one frame's visible range.
///
/// Valid only for the scroll offset it was computed with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnLayout {
    metrics: ColumnMetrics,
    range: VisibleRange,
    scroll_px: i64,
    positions: Vec<ColumnPosition>,
}

impl ColumnLayout {
    #[must_use]
    pub fn compute(range: VisibleRange, metrics: ColumnMetrics, scroll_left: f64) -> Self {
        let unit_px = metrics.unit_px();
        let scroll_px = metrics.scroll_px(scroll_left);
        let dpr = metrics.dpr();
        let column_start_px = range.start as i64 * unit_px + metrics.gap_px() / 2 - scroll_px;

        let positions = (range.start..range.end)
            .map(|index| {
                let left_px = column_start_px + (index - range.start) as i64 * unit_px;
                let wick_px = left_px + (metrics.body_px() - 1) / 2;
                ColumnPosition {
                    index,
                    left_px,
                    wick_px,
                    left_x: left_px as f64 / dpr,
                    center_x: (wick_px as f64 + 0.5) / dpr,
                }
            })
            .collect();

        Self {
            metrics,
            range,
            scroll_px,
            positions,
        }
    }

    #[must_use]
    pub fn metrics(&self) -> ColumnMetrics {
        self.metrics
    }

    #[must_use]
    pub fn range(&self) -> VisibleRange {
        self.range
    }

    #[must_use]
    pub fn scroll_px(&self) -> i64 {
        self.scroll_px
    }

    #[must_use]
    pub fn positions(&self) -> &[ColumnPosition] {
        &self.positions
    }

    #[must_use]
    pub fn position(&self, index: usize) -> Option<&ColumnPosition> {
        if !self.range.contains(index) {
            return None;
        }
        self.positions.get(index - self.range.start)
    }

    #[must_use]
    pub fn center_x(&self, index: usize) -> Option<f64> {
        self.position(index).map(|p| p.center_x)
    }
}

fn to_px(value: f64) -> i64 {
    let rounded = value.round();
    if rounded.is_finite() { rounded as i64 } else { 0 }
}

fn largest_odd_at_most(value: i64) -> i64 {
    if value < 1 {
        1
    } else if value % 2 == 0 {
        value - 1
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::{ColumnLayout, ColumnMetrics};
    use crate::core::VisibleRange;

    #[test]
    fn pitch_follows_options_and_body_is_odd() {
        let metrics = ColumnMetrics::new(6.0, 2.0, 2.0);
        assert_eq!(metrics.unit_px(), 16);
        assert_eq!(metrics.body_px(), 13);
        assert_eq!(metrics.gap_px(), 3);
        assert_eq!(metrics.unit(), 8.0);
    }

    #[test]
    fn body_shrinks_when_bump_would_eat_the_gap() {
        let metrics = ColumnMetrics::new(4.0, 0.0, 1.0);
        assert_eq!(metrics.unit_px(), 4);
        assert_eq!(metrics.body_px(), 3);
        assert_eq!(metrics.gap_px(), 1);
    }

    #[test]
    fn positions_accumulate_in_integer_pixels() {
        let metrics = ColumnMetrics::new(7.0, 3.0, 1.5);
        let layout = ColumnLayout::compute(VisibleRange::new(990, 1000), metrics, 9_900.0);
        let unit = metrics.unit_px();
        for pair in layout.positions().windows(2) {
            assert_eq!(pair[1].left_px - pair[0].left_px, unit);
        }
    }

    #[test]
    fn wick_is_centered_in_body() {
        let metrics = ColumnMetrics::new(9.0, 3.0, 1.5);
        let layout = ColumnLayout::compute(VisibleRange::new(0, 5), metrics, 0.0);
        for position in layout.positions() {
            let left_margin = position.wick_px - position.left_px;
            let right_margin = position.left_px + metrics.body_px() - 1 - position.wick_px;
            assert_eq!(left_margin, right_margin);
        }
    }

    #[test]
    fn index_lookup_matches_column_slots() {
        let metrics = ColumnMetrics::new(6.0, 2.0, 1.0);
        assert_eq!(metrics.index_at(0.0, 0.0), Some(0));
        assert_eq!(metrics.index_at(0.0, 7.9), Some(0));
        assert_eq!(metrics.index_at(80.0, 8.0), Some(11));
        assert_eq!(metrics.index_at(0.0, -1.0), None);
    }
}
