use crate::core::simple_moving_average;
use crate::error::ChartResult;
use crate::render::{Color, PolylinePrimitive};

use super::{DrawContext, PaneRenderer};

const STROKE_WIDTH: f64 = 1.0;

/// Simple moving average of closes drawn through the column centers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MovingAverageRenderer {
    period: usize,
    color: Color,
}

impl MovingAverageRenderer {
    #[must_use]
    pub const fn new(period: usize, color: Color) -> Self {
        Self { period, color }
    }

    #[must_use]
    pub const fn period(&self) -> usize {
        self.period
    }
}

impl PaneRenderer for MovingAverageRenderer {
    fn name(&self) -> &'static str {
        "moving_average"
    }

    fn draw(&self, ctx: &mut DrawContext<'_>) -> ChartResult<()> {
        let values = simple_moving_average(ctx.data, self.period, ctx.range);
        let mut segment: Vec<(f64, f64)> = Vec::new();
        for (position, value) in ctx.columns.positions().iter().zip(values) {
            match value {
                Some(value) => segment.push((position.center_x, ctx.price_to_y(value))),
                None => self.flush(ctx, &mut segment),
            }
        }
        self.flush(ctx, &mut segment);
        Ok(())
    }
}

impl MovingAverageRenderer {
    fn flush(&self, ctx: &mut DrawContext<'_>, segment: &mut Vec<(f64, f64)>) {
        if segment.len() >= 2 {
            let points = std::mem::take(segment);
            ctx.surface
                .stroke_polyline(PolylinePrimitive::new(points, STROKE_WIDTH, self.color));
        } else {
            segment.clear();
        }
    }
}
