mod candlestick_frame;
mod frame;
mod null_renderer;
mod primitives;
mod style;

pub use candlestick_frame::build_candlestick_frame;
pub use frame::RenderFrame;
pub use null_renderer::NullRenderer;
pub use primitives::{Color, LinePrimitive, RectPrimitive, TextHAlign, TextPrimitive};
pub use style::CandlestickStyle;

use crate::error::LayoutResult;

/// Contract implemented by any rendering backend.
///
/// Backends receive a fully materialized, deterministic `RenderFrame` so
/// drawing code stays isolated from layout logic.
pub trait Renderer {
    fn render(&mut self, frame: &RenderFrame) -> LayoutResult<()>;
}
