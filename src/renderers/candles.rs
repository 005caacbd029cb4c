use crate::core::project_candles;
use crate::error::ChartResult;

use super::{DrawContext, PaneRenderer};

/// Candle bodies and wicks for the visible columns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CandleRenderer;

impl PaneRenderer for CandleRenderer {
    fn name(&self) -> &'static str {
        "candles"
    }

    fn draw(&self, ctx: &mut DrawContext<'_>) -> ChartResult<()> {
        let candles = project_candles(ctx.data, ctx.columns, ctx.pane.y_axis(), ctx.pane.top());
        for candle in &candles {
            let color = ctx.style.candle_color(candle.is_bullish);
            ctx.surface.fill_aligned_opt(candle.upper_wick, color);
            ctx.surface.fill_aligned_opt(candle.lower_wick, color);
            ctx.surface.fill_aligned(candle.kline.body, color);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::CandleRenderer;
    use crate::render::DrawCommand;
    use crate::renderers::test_support::{draw_with, fixture, sample_records};

    #[test]
    fn one_body_per_visible_column() {
        let fixture = fixture(sample_records(20), 2.0);
        let frame = draw_with(&fixture, &CandleRenderer, None);
        let bodies = frame
            .commands
            .iter()
            .filter(|command| match command {
                DrawCommand::FillRect(rect) => rect.width > 0.5,
                _ => false,
            })
            .count();
        assert_eq!(bodies, fixture.columns.positions().len());
    }

    #[test]
    fn bodies_are_odd_physical_width() {
        let fixture = fixture(sample_records(20), 2.0);
        let frame = draw_with(&fixture, &CandleRenderer, None);
        for command in &frame.commands {
            if let DrawCommand::FillRect(rect) = command
                && rect.width > 0.5
            {
                let physical = (rect.width * 2.0).round() as i64;
                assert_eq!(physical % 2, 1);
            }
        }
    }
}
