use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use tracing::debug;

use crate::core::{ColumnMetrics, OhlcRecord, PaneId, PaneRangeSource, compute_viewport};
use crate::error::ChartResult;
use crate::render::Renderer;
use crate::renderers::{
    CrosshairOverlay, Pane, RendererChain, main_pane_chain, overlay_chain, volume_pane_chain,
};

use super::frame_scheduler::FrameScheduler;
use super::host::HostContainer;
use super::layout::FrameLayout;
use super::options::ChartOptions;
use super::zoom_controller::ZoomChange;

/// Called after a zoom computed its new candle size, before the scroll
/// offset is applied. The listener receives the host so it can grow the
/// scrollable content first.
pub type ZoomListener<H> = Box<dyn FnMut(&mut H, &ZoomChange)>;

/// Candlestick chart bound to one host container and one backend.
///
/// Data and options are immutable snapshots replaced wholesale; every frame
/// reads one snapshot of each. Drawing only happens from
/// [`Chart::on_animation_frame`] or an explicit [`Chart::draw`].
pub struct Chart<H: HostContainer, R: Renderer> {
    pub(super) host: H,
    pub(super) renderer: R,
    pub(super) options: Arc<ChartOptions>,
    pub(super) data: Arc<[OhlcRecord]>,
    pub(super) panes: IndexMap<PaneId, Pane>,
    pub(super) overlay: RendererChain,
    pub(super) scheduler: FrameScheduler,
    pub(super) frame_layout: Option<Arc<FrameLayout>>,
    pub(super) crosshair: Option<CrosshairOverlay>,
    pub(super) zoom_listener: Option<ZoomListener<H>>,
    pub(super) frames_drawn: u64,
}

impl<H: HostContainer, R: Renderer> Chart<H, R> {
    pub fn new(host: H, renderer: R, options: ChartOptions) -> ChartResult<Self> {
        options.validate()?;
        let panes = build_panes(&options);
        debug!(
            panes = panes.len(),
            k_width = options.k_width,
            k_gap = options.k_gap,
            "chart created"
        );
        Ok(Self {
            host,
            renderer,
            options: Arc::new(options),
            data: Arc::from(Vec::new()),
            panes,
            overlay: overlay_chain(),
            scheduler: FrameScheduler::default(),
            frame_layout: None,
            crosshair: None,
            zoom_listener: None,
            frames_drawn: 0,
        })
    }

    #[must_use]
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Mutable host access; geometry or scroll changes made through it
    /// should be followed by [`Self::resize`] or [`Self::on_host_scrolled`].
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    #[must_use]
    pub fn options(&self) -> Arc<ChartOptions> {
        Arc::clone(&self.options)
    }

    #[must_use]
    pub fn panes(&self) -> impl Iterator<Item = &Pane> {
        self.panes.values()
    }

    #[must_use]
    pub fn pane(&self, id: &PaneId) -> Option<&Pane> {
        self.panes.get(id)
    }

    #[must_use]
    pub fn frames_drawn(&self) -> u64 {
        self.frames_drawn
    }

    #[must_use]
    pub fn is_destroyed(&self) -> bool {
        self.scheduler.is_shut_down()
    }

    /// Column metrics at the host's current device pixel ratio.
    #[must_use]
    pub fn column_metrics(&self) -> ColumnMetrics {
        let viewport = compute_viewport(
            self.host.geometry(),
            self.host.scroll_left(),
            self.options.axis_insets(),
        );
        ColumnMetrics::new(self.options.k_width, self.options.k_gap, viewport.dpr)
    }

    /// Scrollable width the host should lay out: every column plus the
    /// price axis, so the newest candle can scroll flush against the axis.
    #[must_use]
    pub fn content_width(&self) -> f64 {
        let insets = self.options.axis_insets();
        self.column_metrics().content_width(self.data.len())
            + insets.right_axis_width
            + insets.price_label_width
    }

    /// Largest legal scroll offset for the host's current content width.
    #[must_use]
    pub fn max_scroll_left(&self) -> f64 {
        let width = self.host.geometry().width;
        let width = if width.is_finite() { width } else { 0.0 };
        (self.host.scroll_width() - width).max(0.0)
    }

    /// Clamps and writes the host scroll offset, then schedules a frame.
    pub fn set_scroll_left(&mut self, scroll_left: f64) {
        let target = if scroll_left.is_finite() { scroll_left } else { 0.0 };
        let clamped = target.clamp(0.0, self.max_scroll_left());
        self.host.set_scroll_left(clamped);
        self.on_host_scrolled();
    }

    /// The host scrolled: cached column positions are stale.
    pub fn on_host_scrolled(&mut self) {
        self.invalidate_layout();
        self.schedule_draw();
    }

    /// The host container changed size or pixel ratio.
    pub fn resize(&mut self) {
        let geometry = self.host.geometry();
        debug!(
            width = geometry.width,
            height = geometry.height,
            dpr = geometry.device_pixel_ratio,
            "chart resized"
        );
        self.invalidate_layout();
        self.schedule_draw();
    }

    #[must_use]
    pub fn crosshair(&self) -> Option<&CrosshairOverlay> {
        self.crosshair.as_ref()
    }

    pub fn set_crosshair(&mut self, crosshair: Option<CrosshairOverlay>) {
        if self.crosshair == crosshair {
            return;
        }
        self.crosshair = crosshair;
        self.schedule_draw();
    }

    pub fn set_on_zoom_change(&mut self, listener: ZoomListener<H>) {
        self.zoom_listener = Some(listener);
    }

    pub fn clear_on_zoom_change(&mut self) {
        self.zoom_listener = None;
    }

    /// Tears the chart down: cancels the pending frame and drops data,
    /// panes and listeners. Later scheduling and frame callbacks are no-ops.
    pub fn destroy(&mut self) {
        if self.is_destroyed() {
            return;
        }
        self.scheduler.shut_down(&mut self.host);
        self.data = Arc::from(Vec::new());
        self.panes.clear();
        self.overlay = RendererChain::empty();
        self.frame_layout = None;
        self.crosshair = None;
        self.zoom_listener = None;
        debug!(frames_drawn = self.frames_drawn, "chart destroyed");
    }

    pub(super) fn invalidate_layout(&mut self) {
        self.frame_layout = None;
    }
}

impl<H: HostContainer, R: Renderer> fmt::Debug for Chart<H, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Chart")
            .field("records", &self.data.len())
            .field("panes", &self.panes.keys().collect::<Vec<_>>())
            .field("pending_frame", &self.scheduler.pending())
            .field("frames_drawn", &self.frames_drawn)
            .field("destroyed", &self.is_destroyed())
            .finish()
    }
}

/// Creates panes with their default renderer chains.
pub(super) fn build_panes(options: &ChartOptions) -> IndexMap<PaneId, Pane> {
    options
        .panes
        .iter()
        .map(|spec| {
            let chain = match spec.range_source {
                PaneRangeSource::HighLow => {
                    main_pane_chain(&options.style, &options.moving_averages, &options.title)
                }
                PaneRangeSource::Volume => volume_pane_chain(&options.style),
            };
            (spec.id.clone(), Pane::new(spec, chain, options.y_padding_px))
        })
        .collect()
}
