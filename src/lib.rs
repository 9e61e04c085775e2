//! candle-layout: headless candlestick chart layout.
//!
//! Maps an ordered OHLC bar sequence and a container size into pixel-space
//! geometry (bar sizing, padded price range, per-bar wick/body coordinates)
//! and, optionally, into a backend-agnostic draw list. Layout never fails:
//! empty or degenerate input is normalized into a renderable geometry.

pub mod api;
pub mod core;
pub mod error;
pub mod render;
pub mod telemetry;

pub use crate::core::{
    BarGeometry, BarTime, BarWindow, ChartGeometry, ChartLayout, LayoutConfig, LayoutRequest,
    PriceBar, compute_geometry, compute_layout, project_bars,
};
pub use error::{LayoutError, LayoutResult};
