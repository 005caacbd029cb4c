use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::OhlcRecord;
use crate::core::ticks::nice_ticks;

const DEFAULT_MAX_PRICE: f64 = 100.0;
const DEFAULT_MIN_PRICE: f64 = 0.0;

/// Closed price interval used by one pane.
///
/// Invariant: `max_price >= min_price` and both are finite.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceRange {
    pub max_price: f64,
    pub min_price: f64,
}

impl Default for PriceRange {
    fn default() -> Self {
        Self {
            max_price: DEFAULT_MAX_PRICE,
            min_price: DEFAULT_MIN_PRICE,
        }
    }
}

impl PriceRange {
    /// Builds a range from two bounds in any order. Non-finite input yields
    /// the default band.
    #[must_use]
    pub fn new(min_price: f64, max_price: f64) -> Self {
        if !min_price.is_finite() || !max_price.is_finite() {
            return Self::default();
        }
        Self {
            max_price: max_price.max(min_price),
            min_price: min_price.min(max_price),
        }
    }

    /// Min of `low` and max of `high` across the slice.
    #[must_use]
    pub fn from_high_low(records: &[OhlcRecord]) -> Self {
        let high = records.iter().map(|r| OrderedFloat(r.high)).max();
        let low = records.iter().map(|r| OrderedFloat(r.low)).min();
        match (low, high) {
            (Some(low), Some(high)) => Self::new(low.0, high.0),
            _ => Self::default(),
        }
    }

    /// `[0, max volume]` across the slice; default band when no volume is
    /// positive.
    #[must_use]
    pub fn from_volume(records: &[OhlcRecord]) -> Self {
        let max = records
            .iter()
            .map(|r| OrderedFloat(r.volume_or_zero()))
            .max()
            .map_or(0.0, |v| v.0);
        if max > 0.0 {
            Self::new(0.0, max)
        } else {
            Self::default()
        }
    }

    #[must_use]
    pub fn span(self) -> f64 {
        self.max_price - self.min_price
    }
}

/// Linear price to y mapping for one pane, in pane-local logical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceScale {
    range: PriceRange,
    height: f64,
    padding_top: f64,
    padding_bottom: f64,
}

impl Default for PriceScale {
    fn default() -> Self {
        Self::new(PriceRange::default(), 1.0, 0.0, 0.0)
    }
}

impl PriceScale {
    #[must_use]
    pub fn new(range: PriceRange, height: f64, padding_top: f64, padding_bottom: f64) -> Self {
        Self {
            range,
            height: sanitize_length(height, 1.0),
            padding_top: sanitize_length(padding_top, 0.0),
            padding_bottom: sanitize_length(padding_bottom, 0.0),
        }
    }

    #[must_use]
    pub fn range(self) -> PriceRange {
        self.range
    }

    pub fn set_range(&mut self, range: PriceRange) {
        self.range = range;
    }

    #[must_use]
    pub fn height(self) -> f64 {
        self.height
    }

    pub fn set_height(&mut self, height: f64) {
        self.height = sanitize_length(height, 1.0);
    }

    pub fn set_padding(&mut self, padding_top: f64, padding_bottom: f64) {
        self.padding_top = sanitize_length(padding_top, 0.0);
        self.padding_bottom = sanitize_length(padding_bottom, 0.0);
    }

    #[must_use]
    pub fn padding(self) -> (f64, f64) {
        (self.padding_top, self.padding_bottom)
    }

    fn inner_height(self) -> f64 {
        (self.height - self.padding_top - self.padding_bottom).max(0.0)
    }

    fn effective_span(self) -> f64 {
        let span = self.range.span();
        if span == 0.0 { 1.0 } else { span }
    }

    /// Maps a price to a pane-local y coordinate (larger prices are higher up).
    #[must_use]
    pub fn price_to_y(self, price: f64) -> f64 {
        let normalized = (price - self.range.min_price) / self.effective_span();
        self.padding_top + self.inner_height() * (1.0 - normalized)
    }

    /// Inverse of [`Self::price_to_y`]. Returns the range minimum when the
    /// drawable height collapsed to zero.
    #[must_use]
    pub fn y_to_price(self, y: f64) -> f64 {
        let inner = self.inner_height();
        if inner <= 0.0 {
            return self.range.min_price;
        }
        let normalized = 1.0 - (y - self.padding_top) / inner;
        self.range.min_price + normalized * self.effective_span()
    }

    /// Round-number tick prices inside the current range.
    #[must_use]
    pub fn ticks(self, target_count: usize) -> SmallVec<[f64; 12]> {
        nice_ticks(self.range.min_price, self.range.max_price, target_count)
    }
}

fn sanitize_length(value: f64, floor: f64) -> f64 {
    if value.is_finite() { value.max(floor) } else { floor }
}

#[cfg(test)]
mod tests {
    use super::{PriceRange, PriceScale};
    use crate::core::OhlcRecord;
    use approx::assert_abs_diff_eq;

    #[test]
    fn empty_slice_falls_back_to_default_band() {
        let range = PriceRange::from_high_low(&[]);
        assert_eq!(range.max_price, 100.0);
        assert_eq!(range.min_price, 0.0);
    }

    #[test]
    fn range_covers_lows_and_highs() {
        let records = vec![
            OhlcRecord::new(1, 10.0, 12.0, 9.0, 11.0).expect("valid"),
            OhlcRecord::new(2, 11.0, 15.0, 10.5, 14.0).expect("valid"),
        ];
        let range = PriceRange::from_high_low(&records);
        assert_eq!(range.min_price, 9.0);
        assert_eq!(range.max_price, 15.0);
    }

    #[test]
    fn padding_is_respected_at_range_edges() {
        let scale = PriceScale::new(PriceRange::new(10.0, 110.0), 300.0, 20.0, 10.0);
        assert_abs_diff_eq!(scale.price_to_y(110.0), 20.0);
        assert_abs_diff_eq!(scale.price_to_y(10.0), 290.0);
    }

    #[test]
    fn flat_range_does_not_divide_by_zero() {
        let scale = PriceScale::new(PriceRange::new(5.0, 5.0), 100.0, 0.0, 0.0);
        let y = scale.price_to_y(5.0);
        assert!(y.is_finite());
        assert_abs_diff_eq!(y, 100.0);
    }

    #[test]
    fn collapsed_height_maps_back_to_minimum() {
        let scale = PriceScale::new(PriceRange::new(1.0, 2.0), 10.0, 8.0, 8.0);
        assert_eq!(scale.y_to_price(3.0), 1.0);
    }

    #[test]
    fn volume_range_starts_at_zero() {
        let records = vec![
            OhlcRecord::new(1, 1.0, 1.0, 1.0, 1.0)
                .expect("valid")
                .with_volume(300.0),
            OhlcRecord::new(2, 1.0, 1.0, 1.0, 1.0)
                .expect("valid")
                .with_volume(900.0),
        ];
        let range = PriceRange::from_volume(&records);
        assert_eq!(range.min_price, 0.0);
        assert_eq!(range.max_price, 900.0);
    }
}
