use tracing::trace;

use crate::core::{BarGeometry, ChartLayout, Viewport};
use crate::render::{
    CandlestickStyle, LinePrimitive, RectPrimitive, RenderFrame, TextHAlign, TextPrimitive,
};

/// Turns a computed layout into one wick line and one body rect per bar.
///
/// The frame covers `canvas_width × container_height`. A placeholder layout
/// yields a background rect and a centered "no data" label instead.
#[must_use]
pub fn build_candlestick_frame(layout: &ChartLayout, style: &CandlestickStyle) -> RenderFrame {
    let geometry = &layout.geometry;
    let viewport = Viewport::covering(geometry.canvas_width, geometry.container_height);
    let mut frame = RenderFrame::new(viewport);

    if layout.is_placeholder() {
        return frame
            .with_rect(RectPrimitive::new(
                0.0,
                0.0,
                geometry.canvas_width,
                geometry.container_height,
                style.placeholder_background,
            ))
            .with_text(TextPrimitive::new(
                style.placeholder_text.clone(),
                geometry.canvas_width / 2.0,
                geometry.container_height / 2.0,
                style.placeholder_font_size_px,
                style.placeholder_text_color,
                TextHAlign::Center,
            ));
    }

    frame.lines.reserve(layout.bars.len());
    frame.rects.reserve(layout.bars.len());
    for bar in &layout.bars {
        let (wick, body) = candle_primitives(bar, style);
        frame.lines.push(wick);
        frame.rects.push(body);
    }

    trace!(
        bars = layout.bars.len(),
        outcome_bars = layout.outcome_bars().count(),
        "built candlestick frame"
    );
    frame
}

fn candle_primitives(bar: &BarGeometry, style: &CandlestickStyle) -> (LinePrimitive, RectPrimitive) {
    let base = style.color_for(bar.is_bullish);
    let color = if bar.is_outcome() {
        base.with_opacity(style.outcome_opacity)
    } else {
        base
    };

    let wick = LinePrimitive::new(
        bar.center_x,
        bar.wick_top,
        bar.center_x,
        bar.wick_bottom,
        style.wick_width_px,
        color,
    );
    let body = RectPrimitive::new(bar.x, bar.body_top, bar.width, bar.body_height, color)
        .with_border(style.body_border_width_px, color);

    (wick, body)
}
