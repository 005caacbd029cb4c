use std::sync::Arc;

use tracing::debug;

use crate::core::PaneId;
use crate::error::{ChartError, ChartResult};
use crate::render::Renderer;
use crate::renderers::{PaneRenderer, RendererChain};

use super::chart::build_panes;
use super::host::HostContainer;
use super::options::ChartOptionsPatch;
use super::Chart;

impl<H: HostContainer, R: Renderer> Chart<H, R> {
    /// Applies a partial option update.
    ///
    /// Panes are recreated with default renderer chains when the pane list,
    /// moving averages, title or style change; otherwise existing panes and
    /// any custom chains survive.
    pub fn update_options(&mut self, patch: &ChartOptionsPatch) -> ChartResult<()> {
        let next = patch.apply_to(&self.options);
        next.validate()?;

        if next.pane_structure_differs(&self.options) {
            self.panes = build_panes(&next);
            debug!(panes = self.panes.len(), "panes rebuilt");
        } else if next.y_padding_px != self.options.y_padding_px {
            for pane in self.panes.values_mut() {
                pane.set_padding(next.y_padding_px);
            }
        }
        debug!(k_width = next.k_width, k_gap = next.k_gap, "options updated");
        self.options = Arc::new(next);
        self.invalidate_layout();
        self.schedule_draw();
        Ok(())
    }

    /// Replaces the renderer chain of one pane in a single swap.
    pub fn set_pane_renderers(
        &mut self,
        pane_id: &PaneId,
        renderers: Vec<Arc<dyn PaneRenderer>>,
    ) -> ChartResult<()> {
        let pane = self
            .panes
            .get_mut(pane_id)
            .ok_or_else(|| ChartError::UnknownPane(pane_id.to_string()))?;
        let chain = RendererChain::new(renderers);
        debug!(pane = %pane_id, renderers = ?chain, "pane renderers replaced");
        pane.set_renderers(chain);
        self.schedule_draw();
        Ok(())
    }
}
