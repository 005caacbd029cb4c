use crate::core::create_horizontal_line_rect;
use crate::error::ChartResult;

use super::{DrawContext, PaneRenderer};

const DASH_ON: f64 = 4.0;
const DASH_OFF: f64 = 3.0;

/// Dashed horizontal line at the close of the newest record.
///
/// Dashes are emitted as aligned rects rather than a stroked path so the
/// line stays exactly one physical pixel tall.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LastPriceRenderer;

impl PaneRenderer for LastPriceRenderer {
    fn name(&self) -> &'static str {
        "last_price"
    }

    fn draw(&self, ctx: &mut DrawContext<'_>) -> ChartResult<()> {
        let Some(last) = ctx.data.last() else {
            return Ok(());
        };
        let y = ctx.price_to_y(last.close);
        if !ctx.pane.layout().contains_y(y) {
            return Ok(());
        }
        let color = ctx.style.candle_color(last.is_bullish());

        let mut x = 0.0;
        while x < ctx.pane_width {
            let end = (x + DASH_ON).min(ctx.pane_width);
            let dash = create_horizontal_line_rect(y, x, end, ctx.dpr);
            ctx.surface.fill_aligned_opt(dash, color);
            x += DASH_ON + DASH_OFF;
        }
        Ok(())
    }
}
