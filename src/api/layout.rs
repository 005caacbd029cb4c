use crate::core::{ColumnLayout, PaneId, PaneLayout, PriceScale, Viewport, VisibleRange};

/// Placement and scale of one pane in a frame.
#[derive(Debug, Clone, PartialEq)]
pub struct PaneBand {
    pub id: PaneId,
    pub layout: PaneLayout,
    pub y_axis: PriceScale,
}

/// Per-frame derived geometry.
///
/// Built once per frame and shared by drawing and hit testing, so the
/// crosshair lands on exactly the columns that were rendered. A snapshot is
/// only valid for the scroll offset it was built with; scrolling drops it.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameLayout {
    pub viewport: Viewport,
    pub range: VisibleRange,
    pub columns: ColumnLayout,
    pub panes: Vec<PaneBand>,
}

impl FrameLayout {
    /// Pane whose `[top, top + height)` band contains `y`.
    #[must_use]
    pub fn pane_at(&self, y: f64) -> Option<&PaneBand> {
        self.panes.iter().find(|band| band.layout.contains_y(y))
    }

    #[must_use]
    pub fn pane(&self, id: &PaneId) -> Option<&PaneBand> {
        self.panes.iter().find(|band| &band.id == id)
    }

    /// The first pane, which carries the candles.
    #[must_use]
    pub fn main_pane(&self) -> Option<&PaneBand> {
        self.panes.first()
    }

    #[must_use]
    pub fn contains_plot_point(&self, x: f64, y: f64) -> bool {
        self.viewport.contains_plot_point(x, y)
    }
}
