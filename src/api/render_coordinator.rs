use std::sync::Arc;

use tracing::trace;

use crate::core::{
    ColumnLayout, ColumnMetrics, compute_viewport, get_visible_range, layout_panes,
};
use crate::error::{ChartError, ChartResult};
use crate::render::{ClipRect, DrawingSurface, RenderFrame, Renderer};
use crate::renderers::{DrawContext, RendererChain};

use super::host::{FrameHandle, HostContainer};
use super::layout::{FrameLayout, PaneBand};
use super::Chart;

impl<H: HostContainer, R: Renderer> Chart<H, R> {
    /// Requests a frame; calls within one tick coalesce into a single draw.
    pub fn schedule_draw(&mut self) {
        self.scheduler.schedule(&mut self.host);
    }

    #[must_use]
    pub fn pending_frame(&self) -> Option<FrameHandle> {
        self.scheduler.pending()
    }

    /// Animation-frame callback. Stale handles and callbacks arriving after
    /// [`Chart::destroy`] are ignored and return `Ok(false)`.
    pub fn on_animation_frame(&mut self, handle: FrameHandle) -> ChartResult<bool> {
        if self.is_destroyed() {
            trace!(handle = handle.0, "frame callback after destroy ignored");
            return Ok(false);
        }
        if !self.scheduler.take_if_current(handle) {
            trace!(handle = handle.0, "stale frame callback ignored");
            return Ok(false);
        }
        self.draw()?;
        Ok(true)
    }

    /// Renders synchronously, bypassing the scheduler.
    pub fn draw(&mut self) -> ChartResult<()> {
        let frame = self.build_frame()?;
        self.renderer.render(&frame)?;
        self.frames_drawn += 1;
        trace!(
            frame = self.frames_drawn,
            commands = frame.commands.len(),
            "frame rendered"
        );
        Ok(())
    }

    /// Geometry of the last drawn frame for hit testing between frames;
    /// recomputed if a scroll, resize or update dropped it.
    pub fn layout_snapshot(&mut self) -> Arc<FrameLayout> {
        if let Some(layout) = &self.frame_layout {
            return Arc::clone(layout);
        }
        self.refresh_layout()
    }

    fn refresh_layout(&mut self) -> Arc<FrameLayout> {
        let layout = Arc::new(self.compute_frame_layout());
        self.frame_layout = Some(Arc::clone(&layout));
        layout
    }

    /// Builds the draw command list for the current state without handing
    /// it to the backend. Viewport, visible range and pane ranges are read
    /// from the host afresh for every frame.
    pub fn build_frame(&mut self) -> ChartResult<RenderFrame> {
        if self.is_destroyed() {
            return Err(ChartError::InvalidData(
                "chart has been destroyed".to_owned(),
            ));
        }
        let layout = self.refresh_layout();
        let options = Arc::clone(&self.options);
        let data = Arc::clone(&self.data);
        let viewport = layout.viewport;
        let axis_width = options.right_axis_width + options.price_label_width.unwrap_or(0.0);
        let pane_count = self.panes.len();

        let mut frame = RenderFrame::new(viewport);
        frame.begin_frame(viewport, options.style.background);

        for (pane_index, pane) in self.panes.values().enumerate() {
            frame.push_clip(ClipRect::new(0.0, pane.top(), viewport.plot_width, pane.height()));
            let chain = pane.renderers().clone();
            for renderer in chain.iter() {
                frame.begin_pass(Some(pane.id().clone()), renderer.name());
                let mut ctx = DrawContext {
                    surface: &mut frame,
                    pane,
                    pane_index,
                    pane_count,
                    data: &data,
                    range: layout.range,
                    scroll_left: viewport.scroll_left,
                    columns: &layout.columns,
                    dpr: viewport.dpr,
                    pane_width: viewport.plot_width,
                    plot_height: viewport.plot_height,
                    axis_width,
                    style: &options.style,
                    crosshair: self.crosshair.as_ref(),
                };
                renderer.draw(&mut ctx)?;
            }
            frame.end_pass();
            frame.pop_clip();
        }

        let overlay: RendererChain = self.overlay.clone();
        for (pane_index, pane) in self.panes.values().enumerate() {
            for renderer in overlay.iter() {
                frame.begin_pass(Some(pane.id().clone()), renderer.name());
                let mut ctx = DrawContext {
                    surface: &mut frame,
                    pane,
                    pane_index,
                    pane_count,
                    data: &data,
                    range: layout.range,
                    scroll_left: viewport.scroll_left,
                    columns: &layout.columns,
                    dpr: viewport.dpr,
                    pane_width: viewport.plot_width,
                    plot_height: viewport.plot_height,
                    axis_width,
                    style: &options.style,
                    crosshair: self.crosshair.as_ref(),
                };
                renderer.draw(&mut ctx)?;
            }
        }
        frame.end_pass();
        Ok(frame)
    }

    /// Viewport, visible range, column positions and pane placement for the
    /// host's current geometry and scroll offset. Pane ranges are refreshed
    /// from the visible slice as a side effect.
    fn compute_frame_layout(&mut self) -> FrameLayout {
        let viewport = compute_viewport(
            self.host.geometry(),
            self.host.scroll_left(),
            self.options.axis_insets(),
        );
        let metrics = ColumnMetrics::new(self.options.k_width, self.options.k_gap, viewport.dpr);
        let range = get_visible_range(
            viewport.scroll_left,
            viewport.plot_width,
            metrics.body_width(),
            metrics.gap(),
            self.data.len(),
        );
        let columns = ColumnLayout::compute(range, metrics, viewport.scroll_left);

        let ratios: Vec<f64> = self.panes.values().map(|pane| pane.ratio()).collect();
        let placements = layout_panes(&ratios, viewport.plot_height, self.options.pane_gap_px());
        let mut panes = Vec::with_capacity(placements.len());
        for (pane, placement) in self.panes.values_mut().zip(placements) {
            pane.set_layout(placement.top, placement.height);
            pane.update_range(&self.data, range);
            panes.push(PaneBand {
                id: pane.id().clone(),
                layout: pane.layout(),
                y_axis: pane.y_axis(),
            });
        }
        trace!(
            start = range.start,
            end = range.end,
            scroll_left = viewport.scroll_left,
            dpr = viewport.dpr,
            "frame layout computed"
        );

        FrameLayout {
            viewport,
            range,
            columns,
            panes,
        }
    }
}
