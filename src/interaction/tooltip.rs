use serde::{Deserialize, Serialize};

/// Tooltip anchoring rules, in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TooltipPlacement {
    /// Distance between the cursor and the tooltip edge.
    pub gap: f64,
    /// Minimum distance kept from the container edges.
    pub padding: f64,
}

impl Default for TooltipPlacement {
    fn default() -> Self {
        Self {
            gap: 12.0,
            padding: 8.0,
        }
    }
}

impl TooltipPlacement {
    /// Top-left corner for a `width` x `height` tooltip next to the cursor.
    ///
    /// Prefers right of and below the cursor, flips to the left side when the
    /// right side would overflow, then clamps both axes into
    /// `[padding, bounds - size - padding]`.
    #[must_use]
    pub fn place(
        self,
        cursor: (f64, f64),
        size: (f64, f64),
        bounds: (f64, f64),
    ) -> (f64, f64) {
        let (cursor_x, cursor_y) = cursor;
        let (width, height) = size;
        let (bounds_width, bounds_height) = bounds;

        let mut x = cursor_x + self.gap;
        if x + width > bounds_width - self.padding {
            x = cursor_x - self.gap - width;
        }
        let y = cursor_y + self.gap;

        (
            clamp_axis(x, width, bounds_width, self.padding),
            clamp_axis(y, height, bounds_height, self.padding),
        )
    }
}

fn clamp_axis(value: f64, size: f64, bounds: f64, padding: f64) -> f64 {
    let max = bounds - size - padding;
    if max < padding {
        return padding;
    }
    value.clamp(padding, max)
}
