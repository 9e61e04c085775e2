use std::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::primitives::{datetime_to_unix_seconds, decimal_to_f64};
use crate::error::LayoutResult;

/// Integer pixel size of a drawing surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Smallest viewport covering `width × height` pixels.
    #[must_use]
    pub fn covering(width: f64, height: f64) -> Self {
        Self::new(width.max(0.0).ceil() as u32, height.max(0.0).ceil() as u32)
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }
}

/// Opaque ordering key attached to a bar.
///
/// The layout engine never interprets it; bars are laid out in slice order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BarTime {
    Numeric(f64),
    Label(String),
}

impl From<f64> for BarTime {
    fn from(value: f64) -> Self {
        Self::Numeric(value)
    }
}

impl From<i64> for BarTime {
    fn from(value: i64) -> Self {
        Self::Numeric(value as f64)
    }
}

impl From<&str> for BarTime {
    fn from(value: &str) -> Self {
        Self::Label(value.to_owned())
    }
}

impl From<String> for BarTime {
    fn from(value: String) -> Self {
        Self::Label(value)
    }
}

impl fmt::Display for BarTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Numeric(value) => write!(f, "{value}"),
            Self::Label(label) => f.write_str(label),
        }
    }
}

/// One OHLC(V) price record for a fixed interval.
///
/// `low <= min(open, close) <= max(open, close) <= high` is assumed to hold.
/// Layout does not check it; see [`PriceBar::is_consistent`] for an opt-in
/// check at the data source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceBar {
    pub time: BarTime,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume: Option<f64>,
}

impl PriceBar {
    #[must_use]
    pub fn new(time: impl Into<BarTime>, open: f64, high: f64, low: f64, close: f64) -> Self {
        Self {
            time: time.into(),
            open,
            high,
            low,
            close,
            volume: None,
        }
    }

    #[must_use]
    pub fn with_volume(mut self, volume: f64) -> Self {
        self.volume = Some(volume);
        self
    }

    /// Converts strongly-typed temporal/decimal input into a bar keyed by unix seconds.
    pub fn from_decimal_time(
        time: DateTime<Utc>,
        open: Decimal,
        high: Decimal,
        low: Decimal,
        close: Decimal,
    ) -> LayoutResult<Self> {
        Ok(Self::new(
            datetime_to_unix_seconds(time),
            decimal_to_f64(open, "open")?,
            decimal_to_f64(high, "high")?,
            decimal_to_f64(low, "low")?,
            decimal_to_f64(close, "close")?,
        ))
    }

    /// Returns `true` when close price is greater than or equal to open price.
    ///
    /// Doji bars (`open == close`) count as bullish.
    #[must_use]
    pub fn is_bullish(&self) -> bool {
        self.close >= self.open
    }

    /// Returns `true` when all prices are finite and open/close sit inside `[low, high]`.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        let finite = [self.open, self.high, self.low, self.close]
            .iter()
            .all(|value| value.is_finite());
        finite
            && self.low <= self.open.min(self.close)
            && self.open.max(self.close) <= self.high
    }
}
