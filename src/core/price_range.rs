use serde::{Deserialize, Serialize};

use crate::core::PriceBar;
use crate::core::primitives::finite_extent;

/// Padded vertical value range covering a bar sequence.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceRange {
    pub min: f64,
    pub max: f64,
}

impl PriceRange {
    #[must_use]
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Builds the low/high envelope of `bars` padded by `padding_ratio` of its span.
    ///
    /// A flat envelope (every high equals every low) pads by
    /// `flat_span * padding_ratio` instead so the range never collapses.
    /// Returns `None` when no bar carries a finite high or low.
    pub fn from_bars(bars: &[PriceBar], padding_ratio: f64, flat_span: f64) -> Option<Self> {
        let (low, _) = finite_extent(bars.iter().map(|bar| bar.low))?;
        let (_, high) = finite_extent(bars.iter().map(|bar| bar.high))?;

        // `high - low` overflows for envelopes wider than f64::MAX.
        let raw_span = (high - low).min(f64::MAX);
        let span = if raw_span > 0.0 { raw_span } else { flat_span };
        let pad = span * padding_ratio;

        Some(Self::new(
            (low - pad).max(f64::MIN),
            (high + pad).min(f64::MAX),
        ))
    }

    #[must_use]
    pub fn span(self) -> f64 {
        self.max - self.min
    }

    /// Half of [`span`](Self::span), finite for any pair of finite bounds.
    #[must_use]
    pub fn half_span(self) -> f64 {
        self.max / 2.0 - self.min / 2.0
    }
}

/// Price-to-pixel mapping on an inverted Y axis.
///
/// Higher prices map to smaller y. `top_padding` is the pixel offset of
/// `price_max`; `top_padding + drawable_height` is the offset of `price_min`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VerticalScale {
    pub range: PriceRange,
    pub top_padding: f64,
    pub drawable_height: f64,
}

impl VerticalScale {
    #[must_use]
    pub fn new(range: PriceRange, top_padding: f64, drawable_height: f64) -> Self {
        Self {
            range,
            top_padding,
            drawable_height,
        }
    }

    #[must_use]
    pub fn price_to_pixel(self, price: f64) -> f64 {
        let half_span = self.range.half_span();
        let normalized = if half_span > 0.0 {
            (price / 2.0 - self.range.min / 2.0) / half_span
        } else {
            0.5
        };
        self.top_padding + self.drawable_height - normalized * self.drawable_height
    }

    /// Inverse of [`price_to_pixel`](Self::price_to_pixel). Returns `None` for a zero-height scale.
    #[must_use]
    pub fn pixel_to_price(self, pixel: f64) -> Option<f64> {
        if self.drawable_height <= 0.0 {
            return None;
        }
        let normalized = (self.top_padding + self.drawable_height - pixel) / self.drawable_height;
        let offset = normalized * self.range.half_span();
        Some(self.range.min + offset + offset)
    }
}
