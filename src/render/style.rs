use serde::{Deserialize, Serialize};

use crate::error::{LayoutError, LayoutResult};
use crate::render::Color;

/// Colors and strokes used when turning a layout into draw primitives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CandlestickStyle {
    /// Wick and body color for bars with `close >= open`.
    pub up_color: Color,
    pub down_color: Color,
    pub wick_width_px: f64,
    pub body_border_width_px: f64,
    /// Opacity multiplier applied to outcome-window bars.
    pub outcome_opacity: f64,
    pub placeholder_background: Color,
    pub placeholder_text_color: Color,
    pub placeholder_font_size_px: f64,
    pub placeholder_text: String,
}

impl Default for CandlestickStyle {
    fn default() -> Self {
        Self {
            up_color: Color::rgb(0.133, 0.773, 0.369),
            down_color: Color::rgb(0.937, 0.267, 0.267),
            wick_width_px: 1.0,
            body_border_width_px: 1.0,
            outcome_opacity: 0.7,
            placeholder_background: Color::rgba(0.5, 0.5, 0.5, 0.3),
            placeholder_text_color: Color::rgb(0.45, 0.45, 0.5),
            placeholder_font_size_px: 14.0,
            placeholder_text: "No chart data".to_owned(),
        }
    }
}

impl CandlestickStyle {
    #[must_use]
    pub fn with_colors(mut self, up_color: Color, down_color: Color) -> Self {
        self.up_color = up_color;
        self.down_color = down_color;
        self
    }

    #[must_use]
    pub fn with_outcome_opacity(mut self, outcome_opacity: f64) -> Self {
        self.outcome_opacity = outcome_opacity;
        self
    }

    #[must_use]
    pub fn color_for(&self, is_bullish: bool) -> Color {
        if is_bullish {
            self.up_color
        } else {
            self.down_color
        }
    }

    pub fn validate(self) -> LayoutResult<Self> {
        self.up_color.validate()?;
        self.down_color.validate()?;
        self.placeholder_background.validate()?;
        self.placeholder_text_color.validate()?;
        if !self.wick_width_px.is_finite() || self.wick_width_px <= 0.0 {
            return Err(LayoutError::InvalidData(
                "wick width must be finite and > 0".to_owned(),
            ));
        }
        if !self.body_border_width_px.is_finite() || self.body_border_width_px < 0.0 {
            return Err(LayoutError::InvalidData(
                "body border width must be finite and >= 0".to_owned(),
            ));
        }
        if !(0.0..=1.0).contains(&self.outcome_opacity) {
            return Err(LayoutError::InvalidData(
                "outcome opacity must be in [0, 1]".to_owned(),
            ));
        }
        if self.placeholder_text.is_empty() {
            return Err(LayoutError::InvalidData(
                "placeholder text must not be empty".to_owned(),
            ));
        }
        if !self.placeholder_font_size_px.is_finite() || self.placeholder_font_size_px <= 0.0 {
            return Err(LayoutError::InvalidData(
                "placeholder font size must be finite and > 0".to_owned(),
            ));
        }
        Ok(self)
    }
}
