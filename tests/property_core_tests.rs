use kline_rs::api::{ChartOptions, plan_zoom};
use kline_rs::core::pixel_align::odd_physical_width;
use kline_rs::core::{
    ColumnMetrics, PriceRange, PriceScale, create_aligned_kline_from_px, get_visible_range,
    layout_panes, round_to_physical_pixel,
};
use proptest::prelude::*;

fn dpr_strategy() -> impl Strategy<Value = f64> {
    prop_oneof![Just(1.0), Just(1.25), Just(1.5), Just(2.0), Just(3.0)]
}

proptest! {
    #[test]
    fn physical_rounding_is_idempotent(value in -100_000.0f64..100_000.0, dpr in 0.5f64..4.0) {
        let once = round_to_physical_pixel(value, dpr);
        let twice = round_to_physical_pixel(once, dpr);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn candle_wick_is_centered_in_an_odd_body(
        logical_width in 0.5f64..40.0,
        left_px in -500i64..5_000,
        y_top in 0.0f64..500.0,
        height in 0.0f64..300.0,
        dpr in dpr_strategy()
    ) {
        let width_px = odd_physical_width(logical_width, dpr);
        let kline = create_aligned_kline_from_px(left_px, y_top, width_px, height, dpr);
        prop_assert_eq!(kline.body_width_px % 2, 1);
        prop_assert_eq!(kline.wick_px, left_px + (kline.body_width_px - 1) / 2);
        let left_margin = kline.wick_px - kline.body_left_px;
        let right_margin = kline.body_left_px + kline.body_width_px - 1 - kline.wick_px;
        prop_assert_eq!(left_margin, right_margin);
        prop_assert!(kline.body_bottom_px > kline.body_top_px);
    }

    #[test]
    fn visible_range_is_bounded_and_covers_the_viewport(
        scroll_left in 0.0f64..20_000.0,
        view_width in 1.0f64..3_000.0,
        col_width in 1.0f64..30.0,
        col_gap in 0.0f64..6.0,
        total in 0usize..3_000
    ) {
        let range = get_visible_range(scroll_left, view_width, col_width, col_gap, total);
        prop_assert!(range.start <= range.end);
        prop_assert!(range.end <= total);

        let unit = col_width + col_gap;
        let first = (scroll_left / unit).floor() as usize;
        let last = ((scroll_left + view_width) / unit).ceil() as usize;
        for index in first..last.min(total) {
            prop_assert!(range.contains(index), "index {} outside {:?}", index, range);
        }
    }

    #[test]
    fn price_round_trips_through_the_scale(
        min in -10_000.0f64..10_000.0,
        span in 0.01f64..10_000.0,
        factor in 0.01f64..0.99,
        height in 50.0f64..2_000.0,
        padding in 0.0f64..20.0
    ) {
        let scale = PriceScale::new(PriceRange::new(min, min + span), height, padding, padding);
        let price = min + span * factor;
        let recovered = scale.y_to_price(scale.price_to_y(price));
        prop_assert!((recovered - price).abs() <= 1e-6 * (1.0 + price.abs()));
    }

    #[test]
    fn pane_heights_and_gaps_fill_the_plot(
        ratios in proptest::collection::vec(0.05f64..1.0, 1..5),
        gap in 0u32..8,
        extra in 0u32..2_000
    ) {
        let count = ratios.len() as f64;
        let gap = f64::from(gap);
        let available = count + (count - 1.0) * gap + f64::from(extra);
        let layouts = layout_panes(&ratios, available, gap);

        let used: f64 = layouts.iter().map(|layout| layout.height).sum::<f64>()
            + (count - 1.0) * gap;
        prop_assert_eq!(used, available);
        prop_assert!(layouts.iter().all(|layout| layout.height >= 1.0));
        for pair in layouts.windows(2) {
            prop_assert_eq!(pair[1].top, pair[0].top + pair[0].height + gap);
        }
    }

    #[test]
    fn zoom_keeps_the_index_under_the_cursor(
        k_width in 2.0f64..20.0,
        k_gap in 1.0f64..4.0,
        dpr in dpr_strategy(),
        mouse_x in 0.0f64..400.0,
        scroll_left in 0.0f64..4_000.0,
        zoom_in in any::<bool>()
    ) {
        let options = ChartOptions::default().with_candle_size(k_width, k_gap);
        let delta_y = if zoom_in { -100.0 } else { 100.0 };
        let before = ColumnMetrics::new(k_width, k_gap, dpr).fractional_index_at(scroll_left, mouse_x);

        if let Some(change) = plan_zoom(&options, dpr, mouse_x, scroll_left, delta_y) {
            prop_assume!(change.scroll_left >= 0.0);
            let metrics = ColumnMetrics::new(change.k_width, change.k_gap, dpr);
            prop_assert_eq!(metrics.body_px() % 2, 1);
            let after = metrics.fractional_index_at(change.scroll_left, mouse_x);
            prop_assert!((after.floor() - before.floor()).abs() <= 1.0);
        }
    }
}
