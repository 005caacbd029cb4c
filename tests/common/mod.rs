#![allow(dead_code)]

use kline_rs::api::{Chart, ChartOptions, FrameHandle, HostContainer};
use kline_rs::core::{ContainerGeometry, OhlcRecord};
use kline_rs::render::NullRenderer;

pub const DAY_MS: i64 = 86_400_000;

/// Scrollable container double: clamps scroll like a browser would and
/// records animation-frame traffic.
#[derive(Debug)]
pub struct FakeHost {
    pub geometry: ContainerGeometry,
    pub scroll_left: f64,
    pub scroll_width: f64,
    pub next_handle: u64,
    pub requested: Vec<FrameHandle>,
    pub cancelled: Vec<FrameHandle>,
}

impl FakeHost {
    pub fn new(width: f64, height: f64, dpr: f64) -> Self {
        Self {
            geometry: ContainerGeometry::new(width, height, dpr),
            scroll_left: 0.0,
            scroll_width: width,
            next_handle: 0,
            requested: Vec::new(),
            cancelled: Vec::new(),
        }
    }
}

impl HostContainer for FakeHost {
    fn geometry(&self) -> ContainerGeometry {
        self.geometry
    }

    fn scroll_left(&self) -> f64 {
        self.scroll_left
    }

    fn set_scroll_left(&mut self, scroll_left: f64) {
        let max = (self.scroll_width - self.geometry.width).max(0.0);
        self.scroll_left = scroll_left.clamp(0.0, max);
    }

    fn scroll_width(&self) -> f64 {
        self.scroll_width
    }

    fn request_animation_frame(&mut self) -> FrameHandle {
        self.next_handle += 1;
        let handle = FrameHandle(self.next_handle);
        self.requested.push(handle);
        handle
    }

    fn cancel_animation_frame(&mut self, handle: FrameHandle) {
        self.cancelled.push(handle);
    }
}

pub fn daily_records(count: usize) -> Vec<OhlcRecord> {
    (0..count)
        .map(|i| {
            let base = 50.0 + (i as f64 * 0.3).cos() * 5.0 + i as f64 * 0.1;
            let close = if i % 3 == 0 { base - 1.0 } else { base + 1.0 };
            OhlcRecord::new(
                1_704_067_200_000 + i as i64 * DAY_MS,
                base,
                base.max(close) + 0.8,
                base.min(close) - 0.8,
                close,
            )
            .expect("valid record")
            .with_volume(10_000.0 + i as f64 * 25.0)
        })
        .collect()
}

/// Chart over a `width` x `height` container holding `count` daily candles,
/// with the host's scroll width already matching the content.
pub fn chart_with_data(
    width: f64,
    height: f64,
    dpr: f64,
    count: usize,
    options: ChartOptions,
) -> Chart<FakeHost, NullRenderer> {
    let host = FakeHost::new(width, height, dpr);
    let mut chart = Chart::new(host, NullRenderer::default(), options).expect("chart init");
    chart
        .update_data(daily_records(count))
        .expect("valid series");
    let content_width = chart.content_width();
    chart.host_mut().scroll_width = content_width;
    chart
}
