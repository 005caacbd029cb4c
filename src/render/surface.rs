use crate::core::{AlignedRect, Viewport};

use super::{ClipRect, Color, PolylinePrimitive, RectPrimitive, TextPrimitive};

/// 2D drawing target used by the renderer pipeline.
///
/// Coordinates are logical pixels. `begin_frame` resets the transform to
/// identity, scales by the viewport's device pixel ratio and clears the
/// background; implementations must not carry a transform across frames.
pub trait DrawingSurface {
    fn begin_frame(&mut self, viewport: Viewport, background: Color);
    fn fill_rect(&mut self, rect: RectPrimitive);
    fn stroke_polyline(&mut self, line: PolylinePrimitive);
    fn fill_text(&mut self, text: TextPrimitive);
    fn push_clip(&mut self, clip: ClipRect);
    fn pop_clip(&mut self);

    /// Fills an already pixel-aligned rectangle.
    fn fill_aligned(&mut self, rect: AlignedRect, color: Color) {
        self.fill_rect(RectPrimitive::from_aligned(rect, color));
    }

    /// Fills an optional aligned rectangle; `None` draws nothing.
    fn fill_aligned_opt(&mut self, rect: Option<AlignedRect>, color: Color) {
        if let Some(rect) = rect {
            self.fill_aligned(rect, color);
        }
    }
}
