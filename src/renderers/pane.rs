use tracing::trace;

use crate::core::{
    OhlcRecord, PaneId, PaneLayout, PaneRangeSource, PaneSpec, PriceRange, PriceScale,
    VisibleRange,
};

use super::RendererChain;

/// One horizontal band of the plot area.
///
/// A pane owns its vertical scale and the renderer chain that draws it.
/// Layout and range are refreshed by the chart every frame; renderers only
/// ever see the pane through a shared reference.
#[derive(Debug, Clone)]
pub struct Pane {
    id: PaneId,
    ratio: f64,
    range_source: PaneRangeSource,
    layout: PaneLayout,
    y_axis: PriceScale,
    renderers: RendererChain,
}

impl Pane {
    #[must_use]
    pub fn new(spec: &PaneSpec, renderers: RendererChain, y_padding: f64) -> Self {
        let (padding_top, padding_bottom) = match spec.range_source {
            PaneRangeSource::HighLow => (y_padding, y_padding),
            // Volume bars grow from the pane bottom.
            PaneRangeSource::Volume => (y_padding, 0.0),
        };
        Self {
            id: spec.id.clone(),
            ratio: spec.ratio,
            range_source: spec.range_source,
            layout: PaneLayout {
                top: 0.0,
                height: 1.0,
            },
            y_axis: PriceScale::new(PriceRange::default(), 1.0, padding_top, padding_bottom),
            renderers,
        }
    }

    #[must_use]
    pub fn id(&self) -> &PaneId {
        &self.id
    }

    #[must_use]
    pub fn ratio(&self) -> f64 {
        self.ratio
    }

    #[must_use]
    pub fn range_source(&self) -> PaneRangeSource {
        self.range_source
    }

    #[must_use]
    pub fn layout(&self) -> PaneLayout {
        self.layout
    }

    #[must_use]
    pub fn top(&self) -> f64 {
        self.layout.top
    }

    #[must_use]
    pub fn height(&self) -> f64 {
        self.layout.height
    }

    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.layout.bottom()
    }

    /// Places the pane; the height is floored at one logical pixel.
    pub fn set_layout(&mut self, top: f64, height: f64) {
        let height = if height.is_finite() { height.max(1.0) } else { 1.0 };
        let top = if top.is_finite() { top } else { 0.0 };
        self.layout = PaneLayout { top, height };
        self.y_axis.set_height(height);
    }

    #[must_use]
    pub fn y_axis(&self) -> PriceScale {
        self.y_axis
    }

    #[must_use]
    pub fn price_range(&self) -> PriceRange {
        self.y_axis.range()
    }

    pub fn set_price_range(&mut self, range: PriceRange) {
        self.y_axis.set_range(range);
    }

    pub fn set_padding(&mut self, y_padding: f64) {
        match self.range_source {
            PaneRangeSource::HighLow => self.y_axis.set_padding(y_padding, y_padding),
            PaneRangeSource::Volume => self.y_axis.set_padding(y_padding, 0.0),
        }
    }

    /// Recomputes the vertical range from the records of `range`.
    ///
    /// An empty window resets the range to the default band.
    pub fn update_range(&mut self, data: &[OhlcRecord], range: VisibleRange) {
        let visible = range.slice(data);
        let next = match self.range_source {
            PaneRangeSource::HighLow => PriceRange::from_high_low(visible),
            PaneRangeSource::Volume => PriceRange::from_volume(visible),
        };
        trace!(
            pane = %self.id,
            min = next.min_price,
            max = next.max_price,
            "pane range updated"
        );
        self.y_axis.set_range(next);
    }

    #[must_use]
    pub fn renderers(&self) -> &RendererChain {
        &self.renderers
    }

    /// Replaces the whole chain; in-flight clones keep the previous one.
    pub fn set_renderers(&mut self, renderers: RendererChain) {
        self.renderers = renderers;
    }
}

#[cfg(test)]
mod tests {
    use super::Pane;
    use crate::core::{OhlcRecord, PaneRangeSource, PaneSpec, PriceRange, VisibleRange};
    use crate::renderers::{CandleRenderer, RendererChain};
    use std::sync::Arc;

    fn records() -> Vec<OhlcRecord> {
        vec![
            OhlcRecord::new(1, 10.0, 12.0, 9.0, 11.0)
                .expect("valid")
                .with_volume(500.0),
            OhlcRecord::new(2, 11.0, 15.0, 10.0, 14.0)
                .expect("valid")
                .with_volume(900.0),
            OhlcRecord::new(3, 14.0, 14.5, 8.0, 9.0)
                .expect("valid")
                .with_volume(300.0),
        ]
    }

    #[test]
    fn layout_height_is_floored_at_one_pixel() {
        let mut pane = Pane::new(&PaneSpec::new("main", 1.0), RendererChain::empty(), 10.0);
        pane.set_layout(20.0, 0.0);
        assert_eq!(pane.height(), 1.0);
        assert_eq!(pane.y_axis().height(), 1.0);
        pane.set_layout(20.0, 150.0);
        assert_eq!(pane.bottom(), 170.0);
    }

    #[test]
    fn high_low_range_follows_visible_window() {
        let mut pane = Pane::new(&PaneSpec::new("main", 1.0), RendererChain::empty(), 10.0);
        pane.update_range(&records(), VisibleRange::new(0, 2));
        assert_eq!(pane.price_range(), PriceRange::new(9.0, 15.0));

        pane.update_range(&records(), VisibleRange::new(3, 3));
        assert_eq!(pane.price_range(), PriceRange::default());
    }

    #[test]
    fn volume_pane_uses_its_own_local_maximum() {
        let spec = PaneSpec::new("vol", 0.25).with_range_source(PaneRangeSource::Volume);
        let mut pane = Pane::new(&spec, RendererChain::empty(), 4.0);
        pane.update_range(&records(), VisibleRange::new(2, 3));
        assert_eq!(pane.price_range(), PriceRange::new(0.0, 300.0));
        assert_eq!(pane.y_axis().padding(), (4.0, 0.0));
    }

    #[test]
    fn replacing_renderers_leaves_previous_chain_intact() {
        let mut pane = Pane::new(&PaneSpec::new("main", 1.0), RendererChain::empty(), 0.0);
        let snapshot = pane.renderers().clone();
        pane.set_renderers(RendererChain::new(vec![Arc::new(CandleRenderer)]));
        assert!(snapshot.is_empty());
        assert_eq!(pane.renderers().names(), vec!["candles"]);
    }
}
