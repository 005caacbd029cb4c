use crate::core::{create_horizontal_line_rect, create_vertical_line_rect, time_ticks};
use crate::error::ChartResult;

use super::{DrawContext, PaneRenderer};

/// Horizontal lines at round prices and vertical lines at time ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridRenderer {
    price_ticks: usize,
}

impl GridRenderer {
    #[must_use]
    pub const fn new(price_ticks: usize) -> Self {
        Self { price_ticks }
    }
}

impl PaneRenderer for GridRenderer {
    fn name(&self) -> &'static str {
        "grid"
    }

    fn draw(&self, ctx: &mut DrawContext<'_>) -> ChartResult<()> {
        let color = ctx.style.grid_color;
        let layout = ctx.pane.layout();

        for price in ctx.pane.y_axis().ticks(self.price_ticks) {
            let y = ctx.price_to_y(price);
            if !layout.contains_y(y) {
                continue;
            }
            let line = create_horizontal_line_rect(y, 0.0, ctx.pane_width, ctx.dpr);
            ctx.surface.fill_aligned_opt(line, color);
        }

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
            let line = create_vertical_line_rect(x, layout.top, layout.bottom(), ctx.dpr);
            ctx.surface.fill_aligned_opt(line, color);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::GridRenderer;
    use crate::render::DrawCommand;
    use crate::renderers::test_support::{draw_with, fixture, sample_records};

    #[test]
    fn grid_lines_are_one_physical_pixel_thick() {
        let fixture = fixture(sample_records(120), 2.0);
        let frame = draw_with(&fixture, &GridRenderer::new(6), None);
        assert!(frame.rect_count() > 2);
        for command in &frame.commands {
            let DrawCommand::FillRect(rect) = command else {
                panic!("grid only fills rects");
            };
            let thin = rect.width.min(rect.height);
            assert_eq!(thin, 0.5);
            assert_eq!((rect.x * 2.0).fract(), 0.0);
            assert_eq!((rect.y * 2.0).fract(), 0.0);
        }
    }

    #[test]
    fn horizontal_lines_stay_inside_the_pane() {
        let fixture = fixture(sample_records(40), 1.0);
        let frame = draw_with(&fixture, &GridRenderer::new(6), None);
        let layout = fixture.pane.layout();
        for command in &frame.commands {
            if let DrawCommand::FillRect(rect) = command
                && rect.height == 1.0
            {
                assert!(layout.contains_y(rect.y));
            }
        }
    }
}
