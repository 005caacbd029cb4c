use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PaneId(String);

impl PaneId {
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for PaneId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl fmt::Display for PaneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Which values drive a pane's vertical range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PaneRangeSource {
    /// Min low / max high of the visible records.
    #[default]
    HighLow,
    /// `[0, max volume]` of the visible records.
    Volume,
}

/// Declarative pane entry of `ChartOptions`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaneSpec {
    pub id: PaneId,
    pub ratio: f64,
    #[serde(default)]
    pub range_source: PaneRangeSource,
}

impl PaneSpec {
    #[must_use]
    pub fn new(id: impl Into<String>, ratio: f64) -> Self {
        Self {
            id: PaneId::new(id),
            ratio,
            range_source: PaneRangeSource::HighLow,
        }
    }

    #[must_use]
    pub fn with_range_source(mut self, range_source: PaneRangeSource) -> Self {
        self.range_source = range_source;
        self
    }
}

/// Vertical placement of one pane inside the plot area.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PaneLayout {
    pub top: f64,
    pub height: f64,
}

impl PaneLayout {
    #[must_use]
    pub fn bottom(self) -> f64 {
        self.top + self.height
    }

    /// Half-open band test `[top, top + height)`.
    #[must_use]
    pub fn contains_y(self, y: f64) -> bool {
        y >= self.top && y < self.bottom()
    }
}

pub fn validate_pane_specs(specs: &[PaneSpec]) -> ChartResult<()> {
    if specs.is_empty() {
        return Err(ChartError::InvalidOptions(
            "at least one pane is required".to_owned(),
        ));
    }
    for (index, spec) in specs.iter().enumerate() {
        if !spec.ratio.is_finite() || spec.ratio <= 0.0 {
            return Err(ChartError::InvalidOptions(format!(
                "pane `{}` ratio must be finite and > 0",
                spec.id
            )));
        }
        if specs[..index].iter().any(|other| other.id == spec.id) {
            return Err(ChartError::InvalidOptions(format!(
                "duplicate pane id `{}`",
                spec.id
            )));
        }
    }
    Ok(())
}

/// Splits `available` height between panes by ratio.
///
/// Every pane but the last gets `floor(share)`, bounded so that each later
/// pane can still receive at least one pixel; the last pane absorbs the
/// remainder. Heights plus `(n - 1) * gap` therefore add up to `available`
/// exactly whenever `available >= n + (n - 1) * gap`.
#[must_use]
pub fn layout_panes(ratios: &[f64], available: f64, gap: f64) -> Vec<PaneLayout> {
    let count = ratios.len();
    if count == 0 {
        return Vec::new();
    }
    let gap = if gap.is_finite() { gap.max(0.0) } else { 0.0 };
    let available = if available.is_finite() { available.max(0.0) } else { 0.0 };
    let distributable = available - gap * (count - 1) as f64;

    let ratio_sum: f64 = ratios
        .iter()
        .map(|r| if r.is_finite() && *r > 0.0 { *r } else { 0.0 })
        .sum();
    let weight = |r: f64| -> f64 {
        if ratio_sum > 0.0 {
            if r.is_finite() && r > 0.0 { r / ratio_sum } else { 0.0 }
        } else {
            1.0 / count as f64
        }
    };

    let mut layouts = Vec::with_capacity(count);
    let mut top = 0.0;
    let mut remaining = distributable;
    for (index, ratio) in ratios.iter().enumerate() {
        let panes_after = (count - index - 1) as f64;
        let height = if index + 1 == count {
            remaining.max(1.0)
        } else {
            let share = (distributable * weight(*ratio)).floor();
            let ceiling = (remaining - panes_after).floor().max(1.0);
            share.clamp(1.0, ceiling)
        };
        layouts.push(PaneLayout { top, height });
        top += height + gap;
        remaining -= height;
    }
    layouts
}
