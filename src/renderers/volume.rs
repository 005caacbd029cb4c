use crate::core::{PriceRange, PriceScale, create_aligned_kline_from_px};
use crate::error::ChartResult;

use super::{DrawContext, PaneRenderer};

/// Volume bars scaled against the largest visible volume.
///
/// The scale is local to this renderer so bars fill the pane whatever range
/// the pane itself tracks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VolumeRenderer;

impl PaneRenderer for VolumeRenderer {
    fn name(&self) -> &'static str {
        "volume"
    }

    fn draw(&self, ctx: &mut DrawContext<'_>) -> ChartResult<()> {
        let (padding_top, _) = ctx.pane.y_axis().padding();
        let scale = PriceScale::new(
            PriceRange::from_volume(ctx.range.slice(ctx.data)),
            ctx.pane.height(),
            padding_top,
            0.0,
        );
        let bottom = ctx.pane.bottom();
        let body_px = ctx.columns.metrics().body_px();

        let bars: Vec<_> = ctx
            .visible_records()
            .filter(|(_, record)| record.volume_or_zero() > 0.0)
            .map(|(position, record)| {
                let top = ctx.pane.top() + scale.price_to_y(record.volume_or_zero());
                let bar = create_aligned_kline_from_px(
                    position.left_px,
                    top,
                    body_px,
                    bottom - top,
                    ctx.dpr,
                );
                let color = ctx
                    .style
                    .candle_color(record.is_bullish())
                    .with_alpha(ctx.style.volume_alpha);
                (bar.body, color)
            })
            .collect();
        for (rect, color) in bars {
            ctx.surface.fill_aligned(rect, color);
        }
        Ok(())
    }
}
