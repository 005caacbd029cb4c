use serde::{Deserialize, Serialize};

#[cfg(feature = "parallel-projection")]
use rayon::prelude::*;

use crate::core::pixel_align::{
    AlignedKLine, AlignedRect, create_aligned_kline_from_px, create_vertical_line_rect,
};
use crate::core::{ColumnLayout, ColumnPosition, OhlcRecord, PriceScale};

/// Minimum logical body height so flat candles stay visible.
pub const MIN_BODY_HEIGHT: f64 = 1.0;

/// Pixel-aligned geometry of one candle, in absolute logical coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CandleGeometry {
    pub index: usize,
    pub kline: AlignedKLine,
    /// Wick segment from the high down to the body top, if the high pokes out.
    pub upper_wick: Option<AlignedRect>,
    /// Wick segment from the body bottom down to the low, if the low pokes out.
    pub lower_wick: Option<AlignedRect>,
    pub high_y: f64,
    pub low_y: f64,
    pub is_bullish: bool,
}

/// Projects every column of `columns` into candle geometry.
///
/// `pane_top` offsets the pane-local y values produced by `scale`.
/// Columns whose index is outside `data` are skipped.
#[must_use]
pub fn project_candles(
    data: &[OhlcRecord],
    columns: &ColumnLayout,
    scale: PriceScale,
    pane_top: f64,
) -> Vec<CandleGeometry> {
    let body_px = columns.metrics().body_px();
    let dpr = columns.metrics().dpr();

    #[cfg(feature = "parallel-projection")]
    {
        columns
            .positions()
            .par_iter()
            .filter_map(|position| {
                data.get(position.index).map(|record| {
                    project_single_candle(record, position, scale, pane_top, body_px, dpr)
                })
            })
            .collect()
    }

    #[cfg(not(feature = "parallel-projection"))]
    {
        columns
            .positions()
            .iter()
            .filter_map(|position| {
                data.get(position.index).map(|record| {
                    project_single_candle(record, position, scale, pane_top, body_px, dpr)
                })
            })
            .collect()
    }
}

fn project_single_candle(
    record: &OhlcRecord,
    position: &ColumnPosition,
    scale: PriceScale,
    pane_top: f64,
    body_px: i64,
    dpr: f64,
) -> CandleGeometry {
    let open_y = pane_top + scale.price_to_y(record.open);
    let close_y = pane_top + scale.price_to_y(record.close);
    let high_y = pane_top + scale.price_to_y(record.high);
    let low_y = pane_top + scale.price_to_y(record.low);

    let body_top = open_y.min(close_y);
    let body_height = (open_y - close_y).abs().max(MIN_BODY_HEIGHT);
    let kline = create_aligned_kline_from_px(position.left_px, body_top, body_px, body_height, dpr);

    let upper_wick = if ((high_y * dpr).round() as i64) < kline.body_top_px {
        create_vertical_line_rect(kline.wick_center_x, high_y, kline.body.y, dpr)
    } else {
        None
    };
    let lower_wick = if ((low_y * dpr).round() as i64) > kline.body_bottom_px {
        create_vertical_line_rect(kline.wick_center_x, kline.body.bottom(), low_y, dpr)
    } else {
        None
    };

    CandleGeometry {
        index: position.index,
        kline,
        upper_wick,
        lower_wick,
        high_y,
        low_y,
        is_bullish: record.is_bullish(),
    }
}
