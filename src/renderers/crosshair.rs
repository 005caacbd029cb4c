use serde::{Deserialize, Serialize};

use crate::core::{PaneId, create_horizontal_line_rect, create_vertical_line_rect};
use crate::error::ChartResult;

use super::axis::{clamp_label_y, draw_label_box, format_axis_value};
use super::{DrawContext, PaneRenderer};

const DATE_LABEL_PADDING: f64 = 8.0;

/// Crosshair position handed to the overlay, in plot coordinates.
///
/// `x` is already snapped to a column center when the cursor is over a
/// record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrosshairOverlay {
    pub x: f64,
    pub y: f64,
    pub index: Option<usize>,
    pub pane_id: Option<PaneId>,
}

/// Vertical line across every pane, horizontal line and price tag in the
/// hovered pane, date tag under the last pane.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CrosshairRenderer;

impl PaneRenderer for CrosshairRenderer {
    fn name(&self) -> &'static str {
        "crosshair"
    }

    fn draw(&self, ctx: &mut DrawContext<'_>) -> ChartResult<()> {
        let Some(crosshair) = ctx.crosshair.cloned() else {
            return Ok(());
        };
        let color = ctx.style.crosshair_color;
        let layout = ctx.pane.layout();

        let vertical = create_vertical_line_rect(crosshair.x, layout.top, layout.bottom(), ctx.dpr);
        ctx.surface.fill_aligned_opt(vertical, color);

        if crosshair.pane_id.as_ref() == Some(ctx.pane.id()) && layout.contains_y(crosshair.y) {
            let horizontal = create_horizontal_line_rect(crosshair.y, 0.0, ctx.pane_width, ctx.dpr);
            ctx.surface.fill_aligned_opt(horizontal, color);

            if ctx.axis_width > 0.0 {
                let price = ctx.pane.y_axis().y_to_price(crosshair.y - layout.top);
                let text = format_axis_value(ctx.pane, price, ctx.style);
                let y = clamp_label_y(ctx, crosshair.y);
                let (x, width, background) =
                    (ctx.pane_width, ctx.axis_width, ctx.style.label_background);
                draw_label_box(ctx, text, x, y, width, background);
            }
        }

        if ctx.is_last_pane()
            && let Some(record) = crosshair.index.and_then(|index| ctx.data.get(index))
            && let Some(time) = record.datetime()
        {
            let text = time.format("%Y-%m-%d").to_string();
            let width = ctx.style.estimate_text_width(&text) + DATE_LABEL_PADDING * 2.0;
            let max_left = (ctx.pane_width + ctx.axis_width - width).max(0.0);
            let left = (crosshair.x - width / 2.0).clamp(0.0, max_left);
            let y = layout.bottom() + ctx.style.font_size_px / 2.0 + DATE_LABEL_PADDING;
            let background = ctx.style.label_background;
            draw_label_box(ctx, text, left, y, width, background);
        }
        Ok(())
    }
}
