use serde::{Deserialize, Serialize};

use crate::core::pane::validate_pane_specs;
use crate::core::{AxisInsets, PaneRangeSource, PaneSpec};
use crate::error::{ChartError, ChartResult};
use crate::renderers::ChartStyle;

fn default_k_width() -> f64 {
    6.0
}

fn default_k_gap() -> f64 {
    2.0
}

fn default_y_padding_px() -> f64 {
    10.0
}

fn default_right_axis_width() -> f64 {
    60.0
}

fn default_bottom_axis_height() -> f64 {
    24.0
}

fn default_min_k_width() -> f64 {
    1.0
}

fn default_max_k_width() -> f64 {
    40.0
}

fn default_panes() -> Vec<PaneSpec> {
    vec![
        PaneSpec::new("main", 0.75),
        PaneSpec::new("volume", 0.25).with_range_source(PaneRangeSource::Volume),
    ]
}

fn default_moving_averages() -> Vec<usize> {
    vec![5, 10, 20]
}

/// Chart configuration.
///
/// Serializable so hosts can persist and restore a chart setup. A chart
/// holds one immutable snapshot and swaps it whole on every update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartOptions {
    /// Logical candle body width.
    #[serde(default = "default_k_width")]
    pub k_width: f64,
    /// Logical gap between candles.
    #[serde(default = "default_k_gap")]
    pub k_gap: f64,
    /// Vertical breathing room above and below the price range.
    #[serde(default = "default_y_padding_px")]
    pub y_padding_px: f64,
    #[serde(default = "default_right_axis_width")]
    pub right_axis_width: f64,
    #[serde(default = "default_bottom_axis_height")]
    pub bottom_axis_height: f64,
    #[serde(default = "default_min_k_width")]
    pub min_k_width: f64,
    #[serde(default = "default_max_k_width")]
    pub max_k_width: f64,
    #[serde(default = "default_panes")]
    pub panes: Vec<PaneSpec>,
    #[serde(default)]
    pub pane_gap: Option<f64>,
    /// Extra width reserved next to the price axis for wide labels.
    #[serde(default)]
    pub price_label_width: Option<f64>,
    /// Periods of the moving averages drawn on price panes.
    #[serde(default = "default_moving_averages")]
    pub moving_averages: Vec<usize>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub style: ChartStyle,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            k_width: default_k_width(),
            k_gap: default_k_gap(),
            y_padding_px: default_y_padding_px(),
            right_axis_width: default_right_axis_width(),
            bottom_axis_height: default_bottom_axis_height(),
            min_k_width: default_min_k_width(),
            max_k_width: default_max_k_width(),
            panes: default_panes(),
            pane_gap: None,
            price_label_width: None,
            moving_averages: default_moving_averages(),
            title: String::new(),
            style: ChartStyle::default(),
        }
    }
}

impl ChartOptions {
    #[must_use]
    pub fn with_panes(mut self, panes: Vec<PaneSpec>) -> Self {
        self.panes = panes;
        self
    }

    #[must_use]
    pub fn with_candle_size(mut self, k_width: f64, k_gap: f64) -> Self {
        self.k_width = k_width;
        self.k_gap = k_gap;
        self
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    #[must_use]
    pub fn axis_insets(&self) -> AxisInsets {
        AxisInsets {
            right_axis_width: self.right_axis_width,
            bottom_axis_height: self.bottom_axis_height,
            price_label_width: self.price_label_width.unwrap_or(0.0),
        }
    }

    #[must_use]
    pub fn pane_gap_px(&self) -> f64 {
        self.pane_gap.unwrap_or(0.0)
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.k_width.is_finite() || self.k_width <= 0.0 {
            return Err(ChartError::InvalidOptions(
                "k_width must be finite and > 0".to_owned(),
            ));
        }
        for (name, value) in [
            ("k_gap", self.k_gap),
            ("y_padding_px", self.y_padding_px),
            ("right_axis_width", self.right_axis_width),
            ("bottom_axis_height", self.bottom_axis_height),
            ("pane_gap", self.pane_gap_px()),
            ("price_label_width", self.price_label_width.unwrap_or(0.0)),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ChartError::InvalidOptions(format!(
                    "{name} must be finite and >= 0"
                )));
            }
        }
        if !self.min_k_width.is_finite() || self.min_k_width <= 0.0 {
            return Err(ChartError::InvalidOptions(
                "min_k_width must be finite and > 0".to_owned(),
            ));
        }
        if !self.max_k_width.is_finite() || self.max_k_width < self.min_k_width {
            return Err(ChartError::InvalidOptions(
                "max_k_width must be finite and >= min_k_width".to_owned(),
            ));
        }
        if self.moving_averages.contains(&0) {
            return Err(ChartError::InvalidOptions(
                "moving average periods must be > 0".to_owned(),
            ));
        }
        if !self.style.font_size_px.is_finite() || self.style.font_size_px <= 0.0 {
            return Err(ChartError::InvalidOptions(
                "style font size must be finite and > 0".to_owned(),
            ));
        }
        validate_pane_specs(&self.panes)
    }

    pub fn from_json(input: &str) -> ChartResult<Self> {
        let options: Self = serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidOptions(format!("failed to parse options json: {e}")))?;
        options.validate()?;
        Ok(options)
    }

    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ChartError::InvalidOptions(format!("failed to serialize options: {e}")))
    }

    /// Returns `true` when the two option sets need different pane objects
    /// (and therefore fresh default renderer chains).
    #[must_use]
    pub(crate) fn pane_structure_differs(&self, other: &Self) -> bool {
        self.panes != other.panes
            || self.moving_averages != other.moving_averages
            || self.title != other.title
            || self.style != other.style
    }
}

/// Partial update for [`ChartOptions`]; `None` keeps the current value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ChartOptionsPatch {
    pub k_width: Option<f64>,
    pub k_gap: Option<f64>,
    pub y_padding_px: Option<f64>,
    pub right_axis_width: Option<f64>,
    pub bottom_axis_height: Option<f64>,
    pub min_k_width: Option<f64>,
    pub max_k_width: Option<f64>,
    pub panes: Option<Vec<PaneSpec>>,
    pub pane_gap: Option<Option<f64>>,
    pub price_label_width: Option<Option<f64>>,
    pub moving_averages: Option<Vec<usize>>,
    pub title: Option<String>,
    pub style: Option<ChartStyle>,
}

impl ChartOptionsPatch {
    /// Produces the patched copy of `base`. `base` itself is left untouched.
    #[must_use]
    pub fn apply_to(&self, base: &ChartOptions) -> ChartOptions {
        let mut next = base.clone();
        if let Some(value) = self.k_width {
            next.k_width = value;
        }
        if let Some(value) = self.k_gap {
            next.k_gap = value;
        }
        if let Some(value) = self.y_padding_px {
            next.y_padding_px = value;
        }
        if let Some(value) = self.right_axis_width {
            next.right_axis_width = value;
        }
        if let Some(value) = self.bottom_axis_height {
            next.bottom_axis_height = value;
        }
        if let Some(value) = self.min_k_width {
            next.min_k_width = value;
        }
        if let Some(value) = self.max_k_width {
            next.max_k_width = value;
        }
        if let Some(value) = &self.panes {
            next.panes = value.clone();
        }
        if let Some(value) = self.pane_gap {
            next.pane_gap = value;
        }
        if let Some(value) = self.price_label_width {
            next.price_label_width = value;
        }
        if let Some(value) = &self.moving_averages {
            next.moving_averages = value.clone();
        }
        if let Some(value) = &self.title {
            next.title = value.clone();
        }
        if let Some(value) = &self.style {
            next.style = value.clone();
        }
        next
    }
}
