use tracing::trace;

use super::host::{FrameHandle, HostContainer};

/// Single-slot animation-frame scheduler.
///
/// `schedule` cancels the pending request before asking for a new one, so
/// any number of calls within one tick produce exactly one frame. After
/// `shut_down` every call is a no-op.
#[derive(Debug, Default)]
pub struct FrameScheduler {
    pending: Option<FrameHandle>,
    shut_down: bool,
}

impl FrameScheduler {
    #[must_use]
    pub fn pending(&self) -> Option<FrameHandle> {
        self.pending
    }

    #[must_use]
    pub fn is_shut_down(&self) -> bool {
        self.shut_down
    }

    pub fn schedule<H: HostContainer + ?Sized>(&mut self, host: &mut H) -> Option<FrameHandle> {
        if self.shut_down {
            trace!("frame request after shutdown ignored");
            return None;
        }
        if let Some(previous) = self.pending.take() {
            host.cancel_animation_frame(previous);
        }
        let handle = host.request_animation_frame();
        trace!(handle = handle.0, "animation frame requested");
        self.pending = Some(handle);
        Some(handle)
    }

    pub fn cancel<H: HostContainer + ?Sized>(&mut self, host: &mut H) {
        if let Some(previous) = self.pending.take() {
            host.cancel_animation_frame(previous);
        }
    }

    /// Consumes `handle` if it is the pending request. Stale or cancelled
    /// handles return `false`.
    pub fn take_if_current(&mut self, handle: FrameHandle) -> bool {
        if self.shut_down || self.pending != Some(handle) {
            return false;
        }
        self.pending = None;
        true
    }

    pub fn shut_down<H: HostContainer + ?Sized>(&mut self, host: &mut H) {
        self.cancel(host);
        self.shut_down = true;
    }
}
