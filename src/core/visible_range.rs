use serde::{Deserialize, Serialize};

/// Half-open `[start, end)` window into the record sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct VisibleRange {
    pub start: usize,
    pub end: usize,
}

impl VisibleRange {
    #[must_use]
    pub fn new(start: usize, end: usize) -> Self {
        Self {
            start: start.min(end),
            end,
        }
    }

    #[must_use]
    pub fn len(self) -> usize {
        self.end.saturating_sub(self.start)
    }

    #[must_use]
    pub fn is_empty(self) -> bool {
        self.start >= self.end
    }

    #[must_use]
    pub fn contains(self, index: usize) -> bool {
        index >= self.start && index < self.end
    }

    /// Clamps the window to a sequence of `total` items.
    #[must_use]
    pub fn clamp_to(self, total: usize) -> Self {
        let end = self.end.min(total);
        Self::new(self.start.min(end), end)
    }

    /// Returns the slice of `data` covered by the window.
    #[must_use]
    pub fn slice<T>(self, data: &[T]) -> &[T] {
        let clamped = self.clamp_to(data.len());
        &data[clamped.start..clamped.end]
    }
}

/// Resolves which columns can be drawn at `scroll_left`.
///
/// One extra column is included on each side so edge candles never blink
/// during fast scrolling. A non-positive column pitch yields an empty
/// window.
#[must_use]
pub fn get_visible_range(
    scroll_left: f64,
    view_width: f64,
    col_width: f64,
    col_gap: f64,
    total: usize,
) -> VisibleRange {
    let unit = col_width + col_gap;
    if !unit.is_finite() || unit <= 0.0 || total == 0 {
        return VisibleRange::default();
    }
    let scroll_left = if scroll_left.is_finite() { scroll_left.max(0.0) } else { 0.0 };
    let view_width = if view_width.is_finite() { view_width.max(0.0) } else { 0.0 };

    let first = (scroll_left / unit).floor() - 1.0;
    let last = ((scroll_left + view_width) / unit).ceil() + 1.0;

    let start = to_index(first).min(total);
    let end = to_index(last).min(total);
    VisibleRange::new(start, end)
}

fn to_index(value: f64) -> usize {
    if value <= 0.0 {
        0
    } else if value >= usize::MAX as f64 {
        usize::MAX
    } else {
        value as usize
    }
}

#[cfg(test)]
mod tests {
    use super::{VisibleRange, get_visible_range};

    #[test]
    fn scroll_origin_starts_at_zero() {
        let range = get_visible_range(0.0, 400.0, 6.0, 2.0, 100);
        assert_eq!(range.start, 0);
        assert_eq!(range.end, 51);
    }

    #[test]
    fn scrolled_window_contains_target_column() {
        let range = get_visible_range(50.0 * 8.0, 400.0, 6.0, 2.0, 100);
        assert!(range.contains(50));
        assert_eq!(range.start, 49);
        assert_eq!(range.end, 100);
    }

    #[test]
    fn zero_pitch_is_empty() {
        assert!(get_visible_range(0.0, 400.0, 0.0, 0.0, 100).is_empty());
    }

    #[test]
    fn scroll_beyond_data_is_clamped() {
        let range = get_visible_range(1e9, 400.0, 6.0, 2.0, 100);
        assert!(range.start <= range.end);
        assert!(range.end <= 100);
    }

    #[test]
    fn inverted_literal_window_is_empty() {
        let range = VisibleRange { start: 7, end: 3 };
        assert_eq!(range.len(), 0);
        assert!(range.is_empty());
    }

    #[test]
    fn slice_tolerates_out_of_bounds_window() {
        let data = [1, 2, 3];
        assert_eq!(VisibleRange::new(1, 10).slice(&data), &[2, 3]);
    }
}
