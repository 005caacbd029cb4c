use crate::core::ticks::{decimals_for_step, format_price, format_volume, nice_step};
use crate::core::{
    PaneRangeSource, align_rect, create_horizontal_line_rect, create_vertical_line_rect,
    time_ticks,
};
use crate::error::ChartResult;
use crate::render::{Color, TextHAlign, TextPrimitive, TextVAlign};

use super::{ChartStyle, DrawContext, Pane, PaneRenderer};

const TICK_MARK_LENGTH: f64 = 4.0;
const LABEL_OFFSET: f64 = 6.0;
const LABEL_BOX_PADDING: f64 = 4.0;

/// Formats a value of `pane` the way its price axis prints it.
pub(super) fn format_axis_value(pane: &Pane, value: f64, style: &ChartStyle) -> String {
    match pane.range_source() {
        PaneRangeSource::Volume => format_volume(value),
        PaneRangeSource::HighLow => {
            let step = nice_step(pane.price_range().span(), style.main_price_ticks);
            format_price(value, decimals_for_step(step).max(2))
        }
    }
}

/// Filled label box with centered text, used by axis and crosshair labels.
pub(super) fn draw_label_box(
    ctx: &mut DrawContext<'_>,
    text: String,
    x: f64,
    y_center: f64,
    width: f64,
    background: Color,
) {
    let height = ctx.style.font_size_px + LABEL_BOX_PADDING * 2.0;
    let rect = align_rect(x, y_center - height / 2.0, width, height, ctx.dpr);
    ctx.surface.fill_aligned(rect, background);
    ctx.surface.fill_text(TextPrimitive::new(
        text,
        rect.x + rect.width / 2.0,
        rect.y + rect.height / 2.0,
        ctx.style.font_size_px,
        ctx.style.label_text_color,
        TextHAlign::Center,
    ));
}

/// Keeps a label centered on `y` fully inside the pane band.
pub(super) fn clamp_label_y(ctx: &DrawContext<'_>, y: f64) -> f64 {
    let half = ctx.style.font_size_px / 2.0 + LABEL_BOX_PADDING;
    let top = ctx.pane.top() + half;
    let bottom = ctx.pane.bottom() - half;
    if bottom <= top {
        return ctx.pane.top() + ctx.pane.height() / 2.0;
    }
    y.clamp(top, bottom)
}

/// Tick marks and labels right of the plot, plus the last-price tag on
/// price panes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PriceAxisRenderer;

impl PaneRenderer for PriceAxisRenderer {
    fn name(&self) -> &'static str {
        "price_axis"
    }

    fn draw(&self, ctx: &mut DrawContext<'_>) -> ChartResult<()> {
        if ctx.axis_width <= 0.0 {
            return Ok(());
        }
        let layout = ctx.pane.layout();
        let tick_count = match ctx.pane.range_source() {
            PaneRangeSource::HighLow => ctx.style.main_price_ticks,
            PaneRangeSource::Volume => ctx.style.sub_price_ticks,
        };

        for price in ctx.pane.y_axis().ticks(tick_count) {
            let y = ctx.price_to_y(price);
            if !layout.contains_y(y) {
                continue;
            }
            let mark = create_horizontal_line_rect(
                y,
                ctx.pane_width,
                ctx.pane_width + TICK_MARK_LENGTH,
                ctx.dpr,
            );
            ctx.surface.fill_aligned_opt(mark, ctx.style.border_color);
            let label = format_axis_value(ctx.pane, price, ctx.style);
            ctx.surface.fill_text(TextPrimitive::new(
                label,
                ctx.pane_width + LABEL_OFFSET,
                clamp_label_y(ctx, y),
                ctx.style.font_size_px,
                ctx.style.text_color,
                TextHAlign::Left,
            ));
        }

        if ctx.pane.range_source() == PaneRangeSource::HighLow
            && let Some(last) = ctx.data.last()
        {
            let y = ctx.price_to_y(last.close);
            if layout.contains_y(y) {
                let text = format_axis_value(ctx.pane, last.close, ctx.style);
                let color = ctx.style.candle_color(last.is_bullish());
                let y = clamp_label_y(ctx, y);
                let (x, width) = (ctx.pane_width, ctx.axis_width);
                draw_label_box(ctx, text, x, y, width, color);
            }
        }
        Ok(())
    }
}

/// Separators between panes and along the price axis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PaneBorderRenderer;

impl PaneRenderer for PaneBorderRenderer {
    fn name(&self) -> &'static str {
        "borders"
    }

    fn draw(&self, ctx: &mut DrawContext<'_>) -> ChartResult<()> {
        let color = ctx.style.border_color;
        let layout = ctx.pane.layout();
        let axis_line = create_vertical_line_rect(ctx.pane_width, layout.top, layout.bottom(), ctx.dpr);
        ctx.surface.fill_aligned_opt(axis_line, color);

        let separator = create_horizontal_line_rect(
            layout.bottom(),
            0.0,
            ctx.pane_width + ctx.axis_width,
            ctx.dpr,
        );
        ctx.surface.fill_aligned_opt(separator, color);
        Ok(())
    }
}

/// Date labels under the last pane.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TimeAxisRenderer;

impl PaneRenderer for TimeAxisRenderer {
    fn name(&self) -> &'static str {
        "time_axis"
    }

    fn draw(&self, ctx: &mut DrawContext<'_>) -> ChartResult<()> {
        if !ctx.is_last_pane() {
            return Ok(());
        }
        let baseline = ctx.pane.bottom();
        let ticks = time_ticks(
            ctx.data,
            ctx.range,
            ctx.column_unit(),
            ctx.style.time_label_spacing,
        );
        for tick in ticks {
            let Some(x) = ctx.columns.center_x(tick.index) else {
                continue;
            };
            if x < 0.0 || x >= ctx.pane_width {
                continue;
            }
            let mark = create_vertical_line_rect(x, baseline, baseline + TICK_MARK_LENGTH, ctx.dpr);
            ctx.surface.fill_aligned_opt(mark, ctx.style.border_color);
            ctx.surface.fill_text(
                TextPrimitive::new(
                    tick.label,
                    x,
                    baseline + LABEL_OFFSET,
                    ctx.style.font_size_px,
                    ctx.style.text_color,
                    TextHAlign::Center,
                )
                .with_v_align(TextVAlign::Top),
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{PriceAxisRenderer, TimeAxisRenderer, format_axis_value};
    use crate::core::{PaneRangeSource, PaneSpec, PriceRange};
    use crate::render::DrawCommand;
    use crate::renderers::test_support::{draw_with, fixture, sample_records};
    use crate::renderers::{ChartStyle, Pane, RendererChain};

    #[test]
    fn volume_values_use_compact_suffixes() {
        let spec = PaneSpec::new("vol", 1.0).with_range_source(PaneRangeSource::Volume);
        let mut pane = Pane::new(&spec, RendererChain::empty(), 0.0);
        pane.set_price_range(PriceRange::new(0.0, 2_500_000.0));
        assert_eq!(
            format_axis_value(&pane, 1_250_000.0, &ChartStyle::default()),
            "1.25M"
        );
    }

    #[test]
    fn price_labels_sit_right_of_the_plot() {
        let fixture = fixture(sample_records(60), 1.0);
        let frame = draw_with(&fixture, &PriceAxisRenderer, None);
        assert!(frame.text_count() >= 2);
        for command in &frame.commands {
            if let DrawCommand::FillText(text) = command {
                assert!(text.x >= fixture.viewport.plot_width);
            }
        }
    }

    #[test]
    fn time_labels_hang_below_the_last_pane() {
        let fixture = fixture(sample_records(200), 1.0);
        let frame = draw_with(&fixture, &TimeAxisRenderer, None);
        assert!(frame.text_count() > 0);
        for command in &frame.commands {
            if let DrawCommand::FillText(text) = command {
                assert!(text.y > fixture.pane.bottom());
                assert_eq!(text.text.len(), "2024-02".len());
            }
        }
    }
}
