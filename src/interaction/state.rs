use serde::{Deserialize, Serialize};

use crate::renderers::CrosshairOverlay;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum InteractionMode {
    #[default]
    Idle,
    Dragging,
    /// Crosshair visible, possibly over a candle.
    Hovering,
}

/// Scroll offset and cursor x captured when a drag starts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DragAnchor {
    pub scroll_left: f64,
    pub x: f64,
}

/// Tooltip box in container-local logical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TooltipState {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Transient pointer state.
///
/// Cleared on leave, on scroll and when a drag starts.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InteractionState {
    mode: InteractionMode,
    pointer_session: bool,
    drag: Option<DragAnchor>,
    crosshair: Option<CrosshairOverlay>,
    hovered_index: Option<usize>,
    tooltip: Option<TooltipState>,
}

impl InteractionState {
    #[must_use]
    pub fn mode(&self) -> InteractionMode {
        self.mode
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    #[must_use]
    pub fn drag_anchor(&self) -> Option<DragAnchor> {
        self.drag
    }

    #[must_use]
    pub fn crosshair(&self) -> Option<&CrosshairOverlay> {
        self.crosshair.as_ref()
    }

    #[must_use]
    pub fn hovered_index(&self) -> Option<usize> {
        self.hovered_index
    }

    #[must_use]
    pub fn tooltip(&self) -> Option<TooltipState> {
        self.tooltip
    }

    #[must_use]
    pub fn pointer_session_active(&self) -> bool {
        self.pointer_session
    }

    pub fn begin_pointer_session(&mut self) {
        self.pointer_session = true;
    }

    pub fn end_pointer_session(&mut self) {
        self.pointer_session = false;
    }

    pub fn start_drag(&mut self, anchor: DragAnchor) {
        self.clear_pointer_targets();
        self.drag = Some(anchor);
        self.mode = InteractionMode::Dragging;
    }

    pub fn end_drag(&mut self) {
        self.drag = None;
        self.mode = if self.crosshair.is_some() {
            InteractionMode::Hovering
        } else {
            InteractionMode::Idle
        };
    }

    pub fn set_crosshair(&mut self, crosshair: CrosshairOverlay) {
        self.crosshair = Some(crosshair);
        if self.drag.is_none() {
            self.mode = InteractionMode::Hovering;
        }
    }

    pub fn set_hover(&mut self, index: Option<usize>, tooltip: Option<TooltipState>) {
        self.hovered_index = index;
        self.tooltip = tooltip;
    }

    /// Drops crosshair, hovered candle and tooltip. An ongoing drag is kept.
    pub fn clear_pointer_targets(&mut self) {
        self.crosshair = None;
        self.hovered_index = None;
        self.tooltip = None;
        if self.drag.is_none() {
            self.mode = InteractionMode::Idle;
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::{DragAnchor, InteractionMode, InteractionState};
    use crate::renderers::CrosshairOverlay;

    fn crosshair() -> CrosshairOverlay {
        CrosshairOverlay {
            x: 10.0,
            y: 20.0,
            index: Some(1),
            pane_id: None,
        }
    }

    #[test]
    fn drag_start_clears_hover_and_keeps_mode_while_crosshair_moves() {
        let mut state = InteractionState::default();
        state.set_crosshair(crosshair());
        state.set_hover(Some(1), None);
        assert_eq!(state.mode(), InteractionMode::Hovering);

        state.start_drag(DragAnchor {
            scroll_left: 40.0,
            x: 100.0,
        });
        assert!(state.crosshair().is_none());
        assert!(state.hovered_index().is_none());

        state.set_crosshair(crosshair());
        assert_eq!(state.mode(), InteractionMode::Dragging);
        state.end_drag();
        assert_eq!(state.mode(), InteractionMode::Hovering);
    }

    #[test]
    fn clearing_targets_returns_to_idle() {
        let mut state = InteractionState::default();
        state.set_crosshair(crosshair());
        state.clear_pointer_targets();
        assert_eq!(state.mode(), InteractionMode::Idle);
        assert!(state.tooltip().is_none());
    }
}
