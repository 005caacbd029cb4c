//! Chart orchestration: options, host integration, frame scheduling, data
//! updates and zoom.

mod chart;
mod data_controller;
mod frame_scheduler;
mod host;
mod layout;
mod options;
mod pane_controller;
mod provider;
mod render_coordinator;
mod zoom_controller;

pub use chart::{Chart, ZoomListener};
pub use frame_scheduler::FrameScheduler;
pub use host::{FrameHandle, HostContainer};
pub use layout::{FrameLayout, PaneBand};
pub use options::{ChartOptions, ChartOptionsPatch};
pub use provider::{DataProvider, FetchRequest, KlinePeriod};
pub use zoom_controller::{ZOOM_GAP_PX, ZOOM_STEP_PX, ZoomChange, plan_zoom};

pub use crate::renderers::Pane;
