use crate::core::{OhlcRecord, VisibleRange};

/// Simple moving average of `close` for every index of `range`.
///
/// Entries are `None` until a full window of `period` closes is available.
/// The sliding sum is seeded from the records before `range.start`, so the
/// visible values match a computation over the whole series.
#[must_use]
pub fn simple_moving_average(
    data: &[OhlcRecord],
    period: usize,
    range: VisibleRange,
) -> Vec<Option<f64>> {
    let range = range.clamp_to(data.len());
    if period == 0 {
        return vec![None; range.len()];
    }

    let seed_start = range.start.saturating_sub(period - 1);
    let mut sum = 0.0;
    let mut out = Vec::with_capacity(range.len());
    for index in seed_start..range.end {
        sum += data[index].close;
        if index >= seed_start + period {
            sum -= data[index - period].close;
        }
        if index < range.start {
            continue;
        }
        if index + 1 >= period {
            out.push(Some(sum / period as f64));
        } else {
            out.push(None);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::simple_moving_average;
    use crate::core::{OhlcRecord, VisibleRange};
    use approx::assert_abs_diff_eq;

    fn closes(values: &[f64]) -> Vec<OhlcRecord> {
        values
            .iter()
            .enumerate()
            .map(|(i, close)| {
                OhlcRecord::new(i as i64, *close, *close, *close, *close).expect("valid")
            })
            .collect()
    }

    #[test]
    fn warm_up_entries_are_empty() {
        let data = closes(&[1.0, 2.0, 3.0, 4.0]);
        let ma = simple_moving_average(&data, 3, VisibleRange::new(0, 4));
        assert_eq!(ma[0], None);
        assert_eq!(ma[1], None);
        assert_abs_diff_eq!(ma[2].expect("full window"), 2.0);
        assert_abs_diff_eq!(ma[3].expect("full window"), 3.0);
    }

    #[test]
    fn window_seeded_before_visible_start() {
        let data = closes(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        let ma = simple_moving_average(&data, 3, VisibleRange::new(4, 6));
        assert_eq!(ma.len(), 2);
        assert_abs_diff_eq!(ma[0].expect("value"), 4.0);
        assert_abs_diff_eq!(ma[1].expect("value"), 5.0);
    }

    #[test]
    fn zero_period_yields_nothing() {
        let data = closes(&[1.0, 2.0]);
        assert!(simple_moving_average(&data, 0, VisibleRange::new(0, 2))
            .iter()
            .all(Option::is_none));
    }
}
