//! Pointer, mouse, wheel and scroll handling.

mod controller;
mod state;
mod tooltip;

pub use controller::InteractionController;
pub use hit_test::{HitTolerance, hit_test_candle};
pub use state::{DragAnchor, InteractionMode, InteractionState, TooltipState};
pub use tooltip::TooltipPlacement;
