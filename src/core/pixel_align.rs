//! Device-pixel-ratio aware snapping.
//!
//! Every function here takes logical (CSS-like) coordinates, makes its
//! decisions in integer physical-pixel space and converts back to logical
//! units only at the end. Snapping the body and the wick of a candle
//! separately from logical coordinates produces off-center wicks at
//! fractional ratios such as 1.5, so the candle helper works from an integer
//! left edge and an odd integer width.

use serde::{Deserialize, Serialize};

/// Returns a usable device pixel ratio, falling back to `1.0`.
#[must_use]
pub fn sanitize_dpr(dpr: f64) -> f64 {
    if dpr.is_finite() && dpr > 0.0 {
        dpr
    } else {
        1.0
    }
}

/// Snaps a logical coordinate to the nearest physical pixel boundary.
#[must_use]
pub fn round_to_physical_pixel(value: f64, dpr: f64) -> f64 {
    let dpr = sanitize_dpr(dpr);
    (value * dpr).round() / dpr
}

/// Snaps a logical coordinate to the center of the physical pixel that
/// contains it. Strokes one physical pixel wide must sit on pixel centers.
#[must_use]
pub fn align_to_physical_pixel_center(value: f64, dpr: f64) -> f64 {
    let dpr = sanitize_dpr(dpr);
    ((value * dpr).floor() + 0.5) / dpr
}

/// Converts a logical length to a whole number of physical pixels (>= 1).
#[must_use]
pub fn logical_to_physical_px(value: f64, dpr: f64) -> i64 {
    let dpr = sanitize_dpr(dpr);
    let px = (value * dpr).round();
    if px.is_finite() { (px as i64).max(1) } else { 1 }
}

/// Returns `value` if odd, otherwise the next odd integer. Never below 1.
#[must_use]
pub const fn next_odd(value: i64) -> i64 {
    if value < 1 {
        1
    } else if value % 2 == 0 {
        value + 1
    } else {
        value
    }
}

/// Physical width for a candle body: rounded to whole pixels and forced odd
/// so a one-pixel wick has the same number of pixels on each side.
#[must_use]
pub fn odd_physical_width(logical_width: f64, dpr: f64) -> i64 {
    next_odd(logical_to_physical_px(logical_width, dpr))
}

/// Logical rectangle whose four edges fall on physical pixel boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AlignedRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl AlignedRect {
    #[must_use]
    pub fn right(self) -> f64 {
        self.x + self.width
    }

    #[must_use]
    pub fn bottom(self) -> f64 {
        self.y + self.height
    }
}

/// Aligns an arbitrary logical rectangle.
///
/// Left/top and right/bottom edges are rounded independently and the size
/// is derived from the rounded edges, so neighbouring rectangles sharing an
/// edge never drift apart. Width and height are floored at one physical
/// pixel.
#[must_use]
pub fn align_rect(x: f64, y: f64, width: f64, height: f64, dpr: f64) -> AlignedRect {
    let dpr = sanitize_dpr(dpr);
    let (x, width) = if width < 0.0 { (x + width, -width) } else { (x, width) };
    let (y, height) = if height < 0.0 { (y + height, -height) } else { (y, height) };

    let left = (x * dpr).round();
    let right = ((x + width) * dpr).round();
    let top = (y * dpr).round();
    let bottom = ((y + height) * dpr).round();

    AlignedRect {
        x: left / dpr,
        y: top / dpr,
        width: (right - left).max(1.0) / dpr,
        height: (bottom - top).max(1.0) / dpr,
    }
}

/// Builds a filled rectangle for a vertical line exactly one physical pixel
/// wide at `center_x`, spanning `y_start..y_end`.
///
/// Returns `None` when the span rounds to zero physical pixels.
#[must_use]
pub fn create_vertical_line_rect(
    center_x: f64,
    y_start: f64,
    y_end: f64,
    dpr: f64,
) -> Option<AlignedRect> {
    let dpr = sanitize_dpr(dpr);
    if !center_x.is_finite() || !y_start.is_finite() || !y_end.is_finite() {
        return None;
    }
    let column = (center_x * dpr).floor();
    let top = (y_start.min(y_end) * dpr).round();
    let bottom = (y_start.max(y_end) * dpr).round();
    if bottom <= top {
        return None;
    }
    Some(AlignedRect {
        x: column / dpr,
        y: top / dpr,
        width: 1.0 / dpr,
        height: (bottom - top) / dpr,
    })
}

/// Horizontal counterpart of [`create_vertical_line_rect`].
#[must_use]
pub fn create_horizontal_line_rect(
    center_y: f64,
    x_start: f64,
    x_end: f64,
    dpr: f64,
) -> Option<AlignedRect> {
    let dpr = sanitize_dpr(dpr);
    if !center_y.is_finite() || !x_start.is_finite() || !x_end.is_finite() {
        return None;
    }
    let row = (center_y * dpr).floor();
    let left = (x_start.min(x_end) * dpr).round();
    let right = (x_start.max(x_end) * dpr).round();
    if right <= left {
        return None;
    }
    Some(AlignedRect {
        x: left / dpr,
        y: row / dpr,
        width: (right - left) / dpr,
        height: 1.0 / dpr,
    })
}

/// Candle body and wick column resolved in physical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AlignedKLine {
    /// Body rectangle in logical units.
    pub body: AlignedRect,
    pub body_left_px: i64,
    pub body_width_px: i64,
    pub body_top_px: i64,
    pub body_bottom_px: i64,
    /// Physical column holding the wick.
    pub wick_px: i64,
    /// Logical left edge of the wick column.
    pub wick_x: f64,
    /// Logical center of the wick column.
    pub wick_center_x: f64,
}

/// Lays out one candle from an integer physical left edge and width.
///
/// `width_px` must be odd for the wick to be centered; an even width is
/// bumped to the next odd value. The wick lands on
/// `left_px + (width_px - 1) / 2`, leaving identical margins on both sides.
/// The body is at least one physical pixel tall.
#[must_use]
pub fn create_aligned_kline_from_px(
    left_px: i64,
    y_top: f64,
    width_px: i64,
    height: f64,
    dpr: f64,
) -> AlignedKLine {
    let dpr = sanitize_dpr(dpr);
    let width_px = next_odd(width_px);
    let top_px = (y_top * dpr).round() as i64;
    let mut bottom_px = ((y_top + height.max(0.0)) * dpr).round() as i64;
    if bottom_px <= top_px {
        bottom_px = top_px + 1;
    }
    let wick_px = left_px + (width_px - 1) / 2;

    AlignedKLine {
        body: AlignedRect {
            x: left_px as f64 / dpr,
            y: top_px as f64 / dpr,
            width: width_px as f64 / dpr,
            height: (bottom_px - top_px) as f64 / dpr,
        },
        body_left_px: left_px,
        body_width_px: width_px,
        body_top_px: top_px,
        body_bottom_px: bottom_px,
        wick_px,
        wick_x: wick_px as f64 / dpr,
        wick_center_x: (wick_px as f64 + 0.5) / dpr,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn pixel_center_alignment_lands_on_half_pixels() {
        assert_abs_diff_eq!(align_to_physical_pixel_center(10.2, 1.0), 10.5);
        assert_abs_diff_eq!(align_to_physical_pixel_center(10.2, 2.0), 10.25);
        assert_abs_diff_eq!(align_to_physical_pixel_center(10.0, 1.5), 10.0 + 0.5 / 1.5, epsilon = 1e-12);
    }

    #[test]
    fn adjacent_rects_share_edges_without_drift() {
        let dpr = 1.5;
        let width = 7.375;
        let mut previous_right: Option<f64> = None;
        for index in 0..500 {
            let x = f64::from(index) * width;
            let rect = align_rect(x, 0.0, width, 10.0, dpr);
            if let Some(previous_right) = previous_right {
                assert_abs_diff_eq!(rect.x, previous_right, epsilon = 1e-9);
            }
            previous_right = Some(rect.right());
        }
    }

    #[test]
    fn tiny_rect_is_floored_to_one_physical_pixel() {
        let rect = align_rect(3.0, 3.0, 0.01, 0.0, 2.0);
        assert_abs_diff_eq!(rect.width, 0.5);
        assert_abs_diff_eq!(rect.height, 0.5);
    }

    #[test]
    fn negative_sizes_are_normalized() {
        let rect = align_rect(10.0, 10.0, -4.0, -2.0, 1.0);
        assert_abs_diff_eq!(rect.x, 6.0);
        assert_abs_diff_eq!(rect.y, 8.0);
        assert_abs_diff_eq!(rect.width, 4.0);
    }

    #[test]
    fn vertical_line_is_exactly_one_physical_pixel() {
        for dpr in [1.0, 1.25, 1.5, 2.0, 3.0] {
            let rect = create_vertical_line_rect(42.37, 5.0, 80.0, dpr).expect("non-empty");
            assert_abs_diff_eq!(rect.width * dpr, 1.0, epsilon = 1e-9);
            let left_px = rect.x * dpr;
            assert_abs_diff_eq!(left_px, left_px.round(), epsilon = 1e-9);
        }
    }

    #[test]
    fn zero_length_lines_are_skipped() {
        assert!(create_vertical_line_rect(10.0, 5.0, 5.0, 2.0).is_none());
        assert!(create_horizontal_line_rect(10.0, 7.0, 7.0, 1.5).is_none());
    }

    #[test]
    fn horizontal_line_uses_reversed_span() {
        let rect = create_horizontal_line_rect(20.0, 100.0, 0.0, 1.0).expect("non-empty");
        assert_abs_diff_eq!(rect.x, 0.0);
        assert_abs_diff_eq!(rect.width, 100.0);
        assert_abs_diff_eq!(rect.height, 1.0);
    }

    #[test]
    fn aligned_kline_centers_wick_for_common_ratios() {
        for dpr in [1.0, 1.5, 2.0, 3.0] {
            for requested in 1..40 {
                let width_px = odd_physical_width(f64::from(requested) * 0.37, dpr);
                let kline = create_aligned_kline_from_px(17, 10.0, width_px, 30.0, dpr);
                assert_eq!(kline.body_width_px % 2, 1);
                assert_eq!(kline.wick_px, 17 + (kline.body_width_px - 1) / 2);
                let left_margin = kline.wick_px - kline.body_left_px;
                let right_margin = kline.body_left_px + kline.body_width_px - 1 - kline.wick_px;
                assert_eq!(left_margin, right_margin);
            }
        }
    }

    #[test]
    fn aligned_kline_bumps_even_width() {
        let kline = create_aligned_kline_from_px(0, 0.0, 8, 4.0, 2.0);
        assert_eq!(kline.body_width_px, 9);
        assert_eq!(kline.wick_px, 4);
    }

    #[test]
    fn flat_body_keeps_one_physical_pixel() {
        let kline = create_aligned_kline_from_px(0, 12.3, 5, 0.0, 1.5);
        assert_eq!(kline.body_bottom_px - kline.body_top_px, 1);
    }

    #[test]
    fn invalid_ratio_falls_back_to_one() {
        assert_abs_diff_eq!(round_to_physical_pixel(3.4, 0.0), 3.0);
        assert_abs_diff_eq!(round_to_physical_pixel(3.6, f64::NAN), 4.0);
    }
}
