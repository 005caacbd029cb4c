use serde::{Deserialize, Serialize};

use crate::core::ContainerGeometry;

/// Opaque animation-frame request id issued by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FrameHandle(pub u64);

/// Services the embedding view provides to a chart.
///
/// The host owns the scrollable container: the chart reads and writes its
/// horizontal offset but never sets it past `scroll_width`. Hosts forward
/// their resize notifications to [`super::Chart::resize`].
pub trait HostContainer {
    /// Current bounding box and device pixel ratio of the chart container.
    fn geometry(&self) -> ContainerGeometry;

    fn scroll_left(&self) -> f64;

    /// Writes the horizontal scroll offset. Hosts may clamp further.
    fn set_scroll_left(&mut self, scroll_left: f64);

    /// Width of the scrollable content as currently laid out by the host.
    fn scroll_width(&self) -> f64;

    /// Asks for a callback on the next animation frame; the host later calls
    /// [`super::Chart::on_animation_frame`] with the returned handle.
    fn request_animation_frame(&mut self) -> FrameHandle;

    fn cancel_animation_frame(&mut self, handle: FrameHandle);
}
