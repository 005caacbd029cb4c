use crate::core::ticks::format_price;
use crate::core::{VisibleRange, simple_moving_average};
use crate::error::ChartResult;
use crate::render::{Color, TextHAlign, TextPrimitive, TextVAlign};

use super::{DrawContext, PaneRenderer};

const MARGIN: f64 = 6.0;
const ITEM_SPACING: f64 = 10.0;

/// Legend in the pane's top-left corner: the title followed by the moving
/// average values at the right-most on-screen candle.
#[derive(Debug, Clone, PartialEq)]
pub struct TitleRenderer {
    title: String,
    moving_averages: Vec<(usize, Color)>,
}

impl TitleRenderer {
    #[must_use]
    pub fn new(title: impl Into<String>, moving_averages: Vec<(usize, Color)>) -> Self {
        Self {
            title: title.into(),
            moving_averages,
        }
    }

    fn legend_items(&self, ctx: &DrawContext<'_>) -> Vec<(String, Color)> {
        let mut items = Vec::with_capacity(self.moving_averages.len() + 1);
        if !self.title.is_empty() {
            items.push((self.title.clone(), ctx.style.text_color));
        }
        let Some(index) = ctx.last_on_screen_index() else {
            return items;
        };
        for (period, color) in &self.moving_averages {
            let value = simple_moving_average(ctx.data, *period, VisibleRange::new(index, index + 1))
                .first()
                .copied()
                .flatten();
            let text = match value {
                Some(value) => format!("MA{period}: {}", format_price(value, 2)),
                None => format!("MA{period}: -"),
            };
            items.push((text, *color));
        }
        items
    }
}

impl PaneRenderer for TitleRenderer {
    fn name(&self) -> &'static str {
        "title"
    }

    fn draw(&self, ctx: &mut DrawContext<'_>) -> ChartResult<()> {
        let y = ctx.pane.top() + MARGIN;
        let mut x = MARGIN;
        for (text, color) in self.legend_items(ctx) {
            let width = ctx.style.estimate_text_width(&text);
            ctx.surface.fill_text(
                TextPrimitive::new(text, x, y, ctx.style.font_size_px, color, TextHAlign::Left)
                    .with_v_align(TextVAlign::Top),
            );
            x += width + ITEM_SPACING;
        }
        Ok(())
    }
}
