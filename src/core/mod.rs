pub mod candlestick;
pub mod columns;
pub mod indicators;
pub mod pane;
pub mod pixel_align;
pub mod price_scale;
pub mod primitives;
pub mod ticks;
pub mod types;
pub mod viewport;
pub mod visible_range;

pub use candlestick::{CandleGeometry, project_candles};
pub use columns::{ColumnLayout, ColumnMetrics, ColumnPosition};
pub use indicators::simple_moving_average;
pub use pane::{PaneId, PaneLayout, PaneRangeSource, PaneSpec, layout_panes};
pub use pixel_align::{
    AlignedKLine, AlignedRect, align_rect, align_to_physical_pixel_center,
    create_aligned_kline_from_px, create_horizontal_line_rect, create_vertical_line_rect,
    round_to_physical_pixel,
};
pub use price_scale::{PriceRange, PriceScale};
pub use ticks::{TimeTick, nice_ticks, time_ticks};
pub use types::{OhlcRecord, validate_series};
pub use viewport::{AxisInsets, ContainerGeometry, MAX_BACKING_PIXELS, Viewport, compute_viewport};
pub use visible_range::{VisibleRange, get_visible_range};
