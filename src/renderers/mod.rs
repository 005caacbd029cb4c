//! Renderer pipeline.
//!
//! A renderer is a stateless drawing unit. It reads one frame's inputs
//! through [`DrawContext`] and writes to the drawing surface; it never
//! mutates the pane or the data. Panes keep their renderers in a
//! [`RendererChain`] that is swapped as a whole when configuration changes.

mod axis;
mod candles;
mod crosshair;
mod extrema;
mod grid;
mod last_price;
mod moving_average;
mod pane;
mod style;
mod title;
mod volume;

use std::fmt;
use std::sync::Arc;

pub use axis::{PaneBorderRenderer, PriceAxisRenderer, TimeAxisRenderer};
pub use candles::CandleRenderer;
pub use crosshair::{CrosshairOverlay, CrosshairRenderer};
pub use extrema::ExtremaRenderer;
pub use grid::GridRenderer;
pub use last_price::LastPriceRenderer;
pub use moving_average::MovingAverageRenderer;
pub use pane::Pane;
pub use style::ChartStyle;
pub use title::TitleRenderer;
pub use volume::VolumeRenderer;

use crate::core::{ColumnLayout, ColumnPosition, OhlcRecord, VisibleRange};
use crate::error::ChartResult;
use crate::render::DrawingSurface;

/// Everything a renderer may read while drawing one pane.
pub struct DrawContext<'a> {
    pub surface: &'a mut dyn DrawingSurface,
    pub pane: &'a Pane,
    pub pane_index: usize,
    pub pane_count: usize,
    pub data: &'a [OhlcRecord],
    pub range: VisibleRange,
    pub scroll_left: f64,
    pub columns: &'a ColumnLayout,
    pub dpr: f64,
    /// Width of the data area (the pane's drawable width).
    pub pane_width: f64,
    /// Height of the whole plot area, all panes included.
    pub plot_height: f64,
    /// Width reserved right of the plot for price labels.
    pub axis_width: f64,
    pub style: &'a ChartStyle,
    pub crosshair: Option<&'a CrosshairOverlay>,
}

impl DrawContext<'_> {
    /// Absolute y of `price` on this pane's scale.
    #[must_use]
    pub fn price_to_y(&self, price: f64) -> f64 {
        self.pane.top() + self.pane.y_axis().price_to_y(price)
    }

    /// Logical column pitch.
    #[must_use]
    pub fn column_unit(&self) -> f64 {
        self.columns.metrics().unit()
    }

    #[must_use]
    pub fn is_last_pane(&self) -> bool {
        self.pane_index + 1 == self.pane_count
    }

    /// Visible columns paired with their records.
    pub fn visible_records(&self) -> impl Iterator<Item = (&ColumnPosition, &OhlcRecord)> + '_ {
        self.columns
            .positions()
            .iter()
            .filter_map(|position| self.data.get(position.index).map(|record| (position, record)))
    }

    /// Index of the right-most record whose column is on screen.
    #[must_use]
    pub fn last_on_screen_index(&self) -> Option<usize> {
        self.visible_records()
            .filter(|(position, _)| position.center_x < self.pane_width)
            .map(|(position, _)| position.index)
            .last()
    }
}

/// Polymorphic drawing unit executed by a pane.
pub trait PaneRenderer: fmt::Debug + Send + Sync {
    /// Stable name used for frame pass bookkeeping.
    fn name(&self) -> &'static str;

    fn draw(&self, ctx: &mut DrawContext<'_>) -> ChartResult<()>;
}

/// Immutable, ordered renderer list. Cloning shares the underlying slice.
#[derive(Clone, Default)]
pub struct RendererChain(Arc<[Arc<dyn PaneRenderer>]>);

impl RendererChain {
    #[must_use]
    pub fn new(renderers: Vec<Arc<dyn PaneRenderer>>) -> Self {
        Self(renderers.into())
    }

    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn PaneRenderer>> {
        self.0.iter()
    }

    #[must_use]
    pub fn names(&self) -> Vec<&'static str> {
        self.0.iter().map(|renderer| renderer.name()).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for RendererChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}

impl FromIterator<Arc<dyn PaneRenderer>> for RendererChain {
    fn from_iter<I: IntoIterator<Item = Arc<dyn PaneRenderer>>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Default chain for the price pane:
/// grid, last-price line, candles, extrema, moving averages, title.
#[must_use]
pub fn main_pane_chain(style: &ChartStyle, ma_periods: &[usize], title: &str) -> RendererChain {
    let mut renderers: Vec<Arc<dyn PaneRenderer>> = vec![
        Arc::new(GridRenderer::new(style.main_price_ticks)),
        Arc::new(LastPriceRenderer),
        Arc::new(CandleRenderer),
        Arc::new(ExtremaRenderer),
    ];
    let averages: Vec<(usize, crate::render::Color)> = ma_periods
        .iter()
        .enumerate()
        .map(|(slot, period)| (*period, style.moving_average_color(slot)))
        .collect();
    for (period, color) in &averages {
        renderers.push(Arc::new(MovingAverageRenderer::new(*period, *color)));
    }
    renderers.push(Arc::new(TitleRenderer::new(title, averages)));
    RendererChain::new(renderers)
}

/// Default chain for a volume pane: reduced grid, then volume bars.
#[must_use]
pub fn volume_pane_chain(style: &ChartStyle) -> RendererChain {
    RendererChain::new(vec![
        Arc::new(GridRenderer::new(style.sub_price_ticks)),
        Arc::new(VolumeRenderer),
    ])
}

/// Overlay drawn after every pane's own chain.
#[must_use]
pub fn overlay_chain() -> RendererChain {
    RendererChain::new(vec![
        Arc::new(PriceAxisRenderer),
        Arc::new(PaneBorderRenderer),
        Arc::new(TimeAxisRenderer),
        Arc::new(CrosshairRenderer),
    ])
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::core::{
        AxisInsets, ColumnLayout, ColumnMetrics, ContainerGeometry, OhlcRecord, PaneSpec,
        Viewport, VisibleRange, compute_viewport, get_visible_range,
    };
    use crate::render::RenderFrame;

    use super::{ChartStyle, CrosshairOverlay, DrawContext, Pane, PaneRenderer, RendererChain};

    pub(crate) const DAY_MS: i64 = 86_400_000;

    pub(crate) fn sample_records(count: usize) -> Vec<OhlcRecord> {
        (0..count)
            .map(|i| {
                let base = 100.0 + (i as f64 * 0.7).sin() * 10.0;
                let open = base;
                let close = if i % 2 == 0 { base + 2.0 } else { base - 2.0 };
                OhlcRecord::new(
                    1_704_067_200_000 + i as i64 * DAY_MS,
                    open,
                    open.max(close) + 1.5,
                    open.min(close) - 1.5,
                    close,
                )
                .expect("valid record")
                .with_volume(1_000.0 + i as f64 * 10.0)
            })
            .collect()
    }

    pub(crate) struct Fixture {
        pub viewport: Viewport,
        pub columns: ColumnLayout,
        pub range: VisibleRange,
        pub pane: Pane,
        pub style: ChartStyle,
        pub data: Vec<OhlcRecord>,
    }

    pub(crate) fn fixture(data: Vec<OhlcRecord>, dpr: f64) -> Fixture {
        let viewport = compute_viewport(
            ContainerGeometry::new(460.0, 320.0, dpr),
            0.0,
            AxisInsets {
                right_axis_width: 60.0,
                bottom_axis_height: 20.0,
                price_label_width: 0.0,
            },
        );
        let metrics = ColumnMetrics::new(6.0, 2.0, viewport.dpr);
        let range = get_visible_range(0.0, viewport.plot_width, metrics.body_width(), metrics.gap(), data.len());
        let columns = ColumnLayout::compute(range, metrics, 0.0);
        let mut pane = Pane::new(&PaneSpec::new("main", 1.0), RendererChain::empty(), 10.0);
        pane.set_layout(0.0, viewport.plot_height);
        pane.update_range(&data, range);
        Fixture {
            viewport,
            columns,
            range,
            pane,
            style: ChartStyle::default(),
            data,
        }
    }

    pub(crate) fn draw_with(
        fixture: &Fixture,
        renderer: &dyn PaneRenderer,
        crosshair: Option<&CrosshairOverlay>,
    ) -> RenderFrame {
        let mut frame = RenderFrame::new(fixture.viewport);
        let mut ctx = DrawContext {
            surface: &mut frame,
            pane: &fixture.pane,
            pane_index: 0,
            pane_count: 1,
            data: &fixture.data,
            range: fixture.range,
            scroll_left: 0.0,
            columns: &fixture.columns,
            dpr: fixture.viewport.dpr,
            pane_width: fixture.viewport.plot_width,
            plot_height: fixture.viewport.plot_height,
            axis_width: 60.0,
            style: &fixture.style,
            crosshair,
        };
        renderer.draw(&mut ctx).expect("draw");
        frame
    }
}
