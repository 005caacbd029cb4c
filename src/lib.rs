//! kline-rs: candlestick (K-line) chart engine.
//!
//! Candles are laid out in integer physical pixels with odd body widths so
//! wicks sit on an exact pixel column at any device pixel ratio. Drawing is
//! split into stateless per-pane renderers that write backend-agnostic
//! [`render::RenderFrame`]s; hosts supply container geometry, scrolling and
//! animation frames through [`api::HostContainer`].

pub mod api;
pub mod core;
pub mod error;
pub mod interaction;
pub mod render;
pub mod renderers;
pub mod telemetry;

pub use api::{Chart, ChartOptions, ChartOptionsPatch, HostContainer};
pub use error::{ChartError, ChartResult};
pub use interaction::InteractionController;
