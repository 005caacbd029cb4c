use serde::{Deserialize, Serialize};

use crate::core::pixel_align::sanitize_dpr;

/// Backing-buffer pixel budget (4096 x 4096). Larger canvases get a reduced
/// device pixel ratio instead of an oversized allocation.
pub const MAX_BACKING_PIXELS: f64 = 16_777_216.0;

/// Raw container geometry as reported by the host.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ContainerGeometry {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
    pub device_pixel_ratio: f64,
}

impl ContainerGeometry {
    #[must_use]
    pub fn new(width: f64, height: f64, device_pixel_ratio: f64) -> Self {
        Self {
            left: 0.0,
            top: 0.0,
            width,
            height,
            device_pixel_ratio,
        }
    }

    #[must_use]
    pub fn at(mut self, left: f64, top: f64) -> Self {
        self.left = left;
        self.top = top;
        self
    }
}

/// Space reserved around the plot for axes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisInsets {
    pub right_axis_width: f64,
    pub bottom_axis_height: f64,
    pub price_label_width: f64,
}

/// Per-frame viewport snapshot. All sizes are logical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub view_width: f64,
    pub view_height: f64,
    pub plot_width: f64,
    pub plot_height: f64,
    pub scroll_left: f64,
    pub dpr: f64,
}

impl Viewport {
    #[must_use]
    pub fn is_valid(self) -> bool {
        self.view_width >= 1.0
            && self.view_height >= 1.0
            && self.dpr.is_finite()
            && self.dpr > 0.0
    }

    /// Returns `true` when the plot-local point lies inside the data area.
    #[must_use]
    pub fn contains_plot_point(self, x: f64, y: f64) -> bool {
        x >= 0.0 && x < self.plot_width && y >= 0.0 && y < self.plot_height
    }

    /// Physical backing-buffer size (width, height).
    #[must_use]
    pub fn backing_size_px(self) -> (u32, u32) {
        let width = (self.view_width * self.dpr).round().max(1.0);
        let height = (self.view_height * self.dpr).round().max(1.0);
        (width as u32, height as u32)
    }
}

/// Reduces `dpr` when the backing buffer would exceed [`MAX_BACKING_PIXELS`].
#[must_use]
pub fn cap_device_pixel_ratio(view_width: f64, view_height: f64, dpr: f64) -> f64 {
    let dpr = sanitize_dpr(dpr);
    let area = view_width * view_height;
    if !area.is_finite() || area <= 0.0 {
        return dpr;
    }
    if area * dpr * dpr > MAX_BACKING_PIXELS {
        (MAX_BACKING_PIXELS / area).sqrt()
    } else {
        dpr
    }
}

/// Derives the frame viewport from container geometry and axis insets.
///
/// Every size is floored at one logical pixel so a collapsed container still
/// yields a drawable (empty) frame.
#[must_use]
pub fn compute_viewport(geometry: ContainerGeometry, scroll_left: f64, insets: AxisInsets) -> Viewport {
    let view_width = finite_or(geometry.width, 0.0).max(1.0);
    let view_height = finite_or(geometry.height, 0.0).max(1.0);
    let plot_width =
        (view_width - insets.right_axis_width - insets.price_label_width).max(1.0);
    let plot_height = (view_height - insets.bottom_axis_height).max(1.0);

    Viewport {
        view_width,
        view_height,
        plot_width,
        plot_height,
        scroll_left: finite_or(scroll_left, 0.0).max(0.0),
        dpr: cap_device_pixel_ratio(view_width, view_height, geometry.device_pixel_ratio),
    }
}

fn finite_or(value: f64, fallback: f64) -> f64 {
    if value.is_finite() { value } else { fallback }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn insets() -> AxisInsets {
        AxisInsets {
            right_axis_width: 60.0,
            bottom_axis_height: 24.0,
            price_label_width: 10.0,
        }
    }

    #[test]
    fn plot_area_excludes_axes() {
        let viewport = compute_viewport(ContainerGeometry::new(800.0, 500.0, 2.0), 40.0, insets());
        assert_eq!(viewport.plot_width, 730.0);
        assert_eq!(viewport.plot_height, 476.0);
        assert_eq!(viewport.dpr, 2.0);
        assert_eq!(viewport.scroll_left, 40.0);
    }

    #[test]
    fn oversized_canvas_reduces_ratio() {
        let viewport =
            compute_viewport(ContainerGeometry::new(8000.0, 4000.0, 2.0), 0.0, insets());
        let (w, h) = (viewport.view_width * viewport.dpr, viewport.view_height * viewport.dpr);
        assert!(w * h <= MAX_BACKING_PIXELS * (1.0 + 1e-9));
        assert!(viewport.dpr < 1.0);
    }

    #[test]
    fn collapsed_container_floors_sizes() {
        let viewport = compute_viewport(ContainerGeometry::new(0.0, 0.0, 1.0), -5.0, insets());
        assert!(viewport.is_valid());
        assert_eq!(viewport.plot_width, 1.0);
        assert_eq!(viewport.plot_height, 1.0);
        assert_eq!(viewport.scroll_left, 0.0);
    }
}
