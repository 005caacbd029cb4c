use ordered_float::OrderedFloat;

use crate::core::create_horizontal_line_rect;
use crate::error::ChartResult;
use crate::render::{TextHAlign, TextPrimitive};

use super::axis::{clamp_label_y, format_axis_value};
use super::{DrawContext, PaneRenderer};

const LEADER_LENGTH: f64 = 12.0;
const TEXT_GAP: f64 = 2.0;

/// Labels the highest high and lowest low among the on-screen candles.
///
/// A label points right of its candle unless it would overflow the pane,
/// in which case it flips to the left.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtremaRenderer;

impl ExtremaRenderer {
    fn draw_marker(ctx: &mut DrawContext<'_>, x: f64, y: f64, value: f64) {
        let text = format_axis_value(ctx.pane, value, ctx.style);
        let text_width = ctx.style.estimate_text_width(&text);
        let flip = x + LEADER_LENGTH + TEXT_GAP + text_width > ctx.pane_width;
        let (leader_end, h_align) = if flip {
            (x - LEADER_LENGTH, TextHAlign::Right)
        } else {
            (x + LEADER_LENGTH, TextHAlign::Left)
        };
        let color = ctx.style.text_color;

        let leader = create_horizontal_line_rect(y, x, leader_end, ctx.dpr);
        ctx.surface.fill_aligned_opt(leader, color);

        let text_x = if flip {
            leader_end - TEXT_GAP
        } else {
            leader_end + TEXT_GAP
        };
        ctx.surface.fill_text(TextPrimitive::new(
            text,
            text_x,
            clamp_label_y(ctx, y),
            ctx.style.font_size_px,
            color,
            h_align,
        ));
    }
}

impl PaneRenderer for ExtremaRenderer {
    fn name(&self) -> &'static str {
        "extrema"
    }

    fn draw(&self, ctx: &mut DrawContext<'_>) -> ChartResult<()> {
        let pane_width = ctx.pane_width;
        let on_screen: Vec<(f64, f64, f64)> = ctx
            .visible_records()
            .filter(|(position, _)| position.center_x >= 0.0 && position.center_x < pane_width)
            .map(|(position, record)| (position.center_x, record.high, record.low))
            .collect();
        let highest = on_screen
            .iter()
            .max_by_key(|(_, high, _)| OrderedFloat(*high))
            .map(|(x, high, _)| (*x, *high));
        let lowest = on_screen
            .iter()
            .min_by_key(|(_, _, low)| OrderedFloat(*low))
            .map(|(x, _, low)| (*x, *low));

        if let Some((x, high)) = highest {
            let y = ctx.price_to_y(high);
            Self::draw_marker(ctx, x, y, high);
        }
        if let Some((x, low)) = lowest {
            let y = ctx.price_to_y(low);
            Self::draw_marker(ctx, x, y, low);
        }
        Ok(())
    }
}
