use serde::{Deserialize, Serialize};

use crate::error::{LayoutError, LayoutResult};

pub const DEFAULT_CONTAINER_HEIGHT: f64 = 320.0;
pub const DEFAULT_WIDTH_HINT: f64 = 400.0;

/// Sizing and padding constants used by the layout engine.
///
/// Serializable so host applications can persist chart setup. Missing fields
/// fall back to the defaults below.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub min_bar_width: f64,
    pub bar_gap: f64,
    pub left_padding: f64,
    pub right_padding: f64,
    /// Applied to both top and bottom edges.
    pub vertical_padding: f64,
    /// Fraction of the high/low span added above and below the bars.
    pub range_padding_ratio: f64,
    /// Span substituted when every bar shares one price.
    pub flat_range_span: f64,
    pub min_body_height: f64,
    pub placeholder_price_min: f64,
    pub placeholder_price_max: f64,
    pub placeholder_bar_width: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            min_bar_width: 4.0,
            bar_gap: 4.0,
            left_padding: 40.0,
            right_padding: 20.0,
            vertical_padding: 40.0,
            range_padding_ratio: 0.05,
            flat_range_span: 1.0,
            min_body_height: 2.0,
            placeholder_price_min: 0.0,
            placeholder_price_max: 100.0,
            placeholder_bar_width: 8.0,
        }
    }
}

impl LayoutConfig {
    #[must_use]
    pub fn with_bar_gap(mut self, bar_gap: f64) -> Self {
        self.bar_gap = bar_gap;
        self
    }

    #[must_use]
    pub fn with_min_bar_width(mut self, min_bar_width: f64) -> Self {
        self.min_bar_width = min_bar_width;
        self
    }

    #[must_use]
    pub fn with_horizontal_padding(mut self, left: f64, right: f64) -> Self {
        self.left_padding = left;
        self.right_padding = right;
        self
    }

    #[must_use]
    pub fn with_vertical_padding(mut self, vertical_padding: f64) -> Self {
        self.vertical_padding = vertical_padding;
        self
    }

    #[must_use]
    pub fn with_range_padding_ratio(mut self, ratio: f64) -> Self {
        self.range_padding_ratio = ratio;
        self
    }

    #[must_use]
    pub fn with_min_body_height(mut self, min_body_height: f64) -> Self {
        self.min_body_height = min_body_height;
        self
    }

    /// Checks that every constant is finite and within its usable range.
    ///
    /// `compute_geometry_tuned` does not call this; hosts loading configs from
    /// untrusted sources should.
    pub fn validate(self) -> LayoutResult<Self> {
        for (name, value) in [
            ("bar_gap", self.bar_gap),
            ("left_padding", self.left_padding),
            ("right_padding", self.right_padding),
            ("vertical_padding", self.vertical_padding),
            ("range_padding_ratio", self.range_padding_ratio),
            ("min_body_height", self.min_body_height),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(LayoutError::InvalidData(format!(
                    "layout `{name}` must be finite and >= 0"
                )));
            }
        }

        for (name, value) in [
            ("min_bar_width", self.min_bar_width),
            ("flat_range_span", self.flat_range_span),
            ("placeholder_bar_width", self.placeholder_bar_width),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(LayoutError::InvalidData(format!(
                    "layout `{name}` must be finite and > 0"
                )));
            }
        }

        if !self.placeholder_price_min.is_finite()
            || !self.placeholder_price_max.is_finite()
            || self.placeholder_price_min >= self.placeholder_price_max
        {
            return Err(LayoutError::InvalidData(
                "placeholder price range must be finite with min < max".to_owned(),
            ));
        }

        Ok(self)
    }
}

/// Per-render inputs that are not layout constants.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutRequest {
    pub container_height: f64,
    #[serde(default)]
    pub width_hint: Option<f64>,
    /// Index of the first bar after the decision point.
    #[serde(default)]
    pub outcome_start: Option<usize>,
    #[serde(default)]
    pub config: LayoutConfig,
}

impl Default for LayoutRequest {
    fn default() -> Self {
        Self::new(DEFAULT_CONTAINER_HEIGHT)
    }
}

impl LayoutRequest {
    #[must_use]
    pub fn new(container_height: f64) -> Self {
        Self {
            container_height,
            width_hint: None,
            outcome_start: None,
            config: LayoutConfig::default(),
        }
    }

    #[must_use]
    pub fn with_width_hint(mut self, width_hint: f64) -> Self {
        self.width_hint = Some(width_hint);
        self
    }

    #[must_use]
    pub fn with_outcome_start(mut self, outcome_start: Option<usize>) -> Self {
        self.outcome_start = outcome_start;
        self
    }

    #[must_use]
    pub fn with_config(mut self, config: LayoutConfig) -> Self {
        self.config = config;
        self
    }
}
