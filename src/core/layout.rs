use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

#[cfg(feature = "parallel-projection")]
use rayon::prelude::*;

use crate::core::config::{DEFAULT_CONTAINER_HEIGHT, DEFAULT_WIDTH_HINT};
use crate::core::{LayoutConfig, LayoutRequest, PriceBar, PriceRange, VerticalScale};

/// Pixel-space geometry shared by every bar of one render pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartGeometry {
    pub price_min: f64,
    pub price_max: f64,
    pub bar_width: f64,
    pub bar_gap: f64,
    pub left_padding: f64,
    pub right_padding: f64,
    pub top_bottom_padding: f64,
    /// Drawable vertical span: container height minus top and bottom padding.
    pub pixel_height: f64,
    pub container_height: f64,
    /// Width of the full drawing surface, at least the width hint.
    pub canvas_width: f64,
    pub min_body_height: f64,
    /// `true` when produced from an empty bar sequence.
    pub is_placeholder: bool,
}

impl ChartGeometry {
    #[must_use]
    pub fn price_range(&self) -> PriceRange {
        PriceRange::new(self.price_min, self.price_max)
    }

    #[must_use]
    pub fn vertical_scale(&self) -> VerticalScale {
        VerticalScale::new(
            self.price_range(),
            self.top_bottom_padding,
            self.pixel_height,
        )
    }

    /// Maps a price to a y coordinate; higher prices map to smaller y.
    #[must_use]
    pub fn scale_y(&self, price: f64) -> f64 {
        self.vertical_scale().price_to_pixel(price)
    }

    /// Horizontal distance between the left edges of consecutive bars.
    #[must_use]
    pub fn bar_step(&self) -> f64 {
        self.bar_width + self.bar_gap
    }

    /// Left edge of the bar body at `index`.
    #[must_use]
    pub fn bar_x(&self, index: usize) -> f64 {
        self.left_padding + index as f64 * self.bar_step()
    }
}

/// Which side of the decision point a bar falls on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum BarWindow {
    /// Bars visible when the decision was made.
    #[default]
    Decision,
    /// Bars revealed after the decision; drawn at reduced opacity.
    Outcome,
}

impl BarWindow {
    /// `index >= outcome_start` is an outcome bar; no start means no outcome bars.
    #[must_use]
    pub fn classify(index: usize, outcome_start: Option<usize>) -> Self {
        match outcome_start {
            Some(start) if index >= start => Self::Outcome,
            _ => Self::Decision,
        }
    }
}

/// Render-ready coordinates for one bar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BarGeometry {
    pub index: usize,
    pub x: f64,
    pub center_x: f64,
    pub width: f64,
    pub body_top: f64,
    pub body_bottom: f64,
    pub body_height: f64,
    pub wick_top: f64,
    pub wick_bottom: f64,
    pub is_bullish: bool,
    pub window: BarWindow,
}

impl BarGeometry {
    #[must_use]
    pub fn is_outcome(&self) -> bool {
        self.window == BarWindow::Outcome
    }

    #[must_use]
    pub fn wick_length(&self) -> f64 {
        self.wick_bottom - self.wick_top
    }
}

/// Geometry plus per-bar coordinates for one render pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartLayout {
    pub geometry: ChartGeometry,
    pub bars: Vec<BarGeometry>,
}

impl ChartLayout {
    #[must_use]
    pub fn is_placeholder(&self) -> bool {
        self.geometry.is_placeholder
    }

    pub fn outcome_bars(&self) -> impl Iterator<Item = &BarGeometry> {
        self.bars.iter().filter(|bar| bar.is_outcome())
    }
}

/// Computes chart geometry with default layout constants.
#[must_use]
pub fn compute_geometry(
    bars: &[PriceBar],
    container_height: f64,
    width_hint: Option<f64>,
) -> ChartGeometry {
    compute_geometry_tuned(bars, container_height, width_hint, LayoutConfig::default())
}

/// Computes chart geometry for `bars` inside a container of `container_height` pixels.
///
/// Never fails:
/// - an empty sequence yields the placeholder geometry from `config`
/// - a flat series is padded by `config.flat_range_span`
/// - bar width never drops below `config.min_bar_width`
/// - a non-finite or non-positive height falls back to the default height
#[must_use]
pub fn compute_geometry_tuned(
    bars: &[PriceBar],
    container_height: f64,
    width_hint: Option<f64>,
    config: LayoutConfig,
) -> ChartGeometry {
    let container_height = resolve_container_height(container_height);
    let width_hint = resolve_width_hint(width_hint);
    let pixel_height = (container_height - 2.0 * config.vertical_padding).max(0.0);
    trace!(
        bar_count = bars.len(),
        container_height, width_hint, "compute chart geometry"
    );

    if bars.is_empty() {
        debug!("empty bar sequence, using placeholder geometry");
        return ChartGeometry {
            price_min: config.placeholder_price_min,
            price_max: config.placeholder_price_max,
            bar_width: config.placeholder_bar_width,
            bar_gap: config.bar_gap,
            left_padding: config.left_padding,
            right_padding: config.right_padding,
            top_bottom_padding: config.vertical_padding,
            pixel_height,
            container_height,
            canvas_width: width_hint,
            min_body_height: config.min_body_height,
            is_placeholder: true,
        };
    }

    let range = PriceRange::from_bars(bars, config.range_padding_ratio, config.flat_range_span)
        .unwrap_or_else(|| {
            warn!(
                bar_count = bars.len(),
                "no finite high/low in bars, using placeholder price range"
            );
            PriceRange::new(config.placeholder_price_min, config.placeholder_price_max)
        });

    let count = bars.len() as f64;
    let horizontal_padding = config.left_padding + config.right_padding;
    let drawing_width = width_hint.max(count * config.min_bar_width);
    let bar_width = ((drawing_width - config.bar_gap * (count - 1.0) - horizontal_padding)
        / count)
        .max(config.min_bar_width);
    let canvas_width = width_hint.max(count * (bar_width + config.bar_gap) + horizontal_padding);

    ChartGeometry {
        price_min: range.min,
        price_max: range.max,
        bar_width,
        bar_gap: config.bar_gap,
        left_padding: config.left_padding,
        right_padding: config.right_padding,
        top_bottom_padding: config.vertical_padding,
        pixel_height,
        container_height,
        canvas_width,
        min_body_height: config.min_body_height,
        is_placeholder: false,
    }
}

/// Projects every bar into pixel coordinates, preserving input order.
///
/// Bars at or after `outcome_start` are tagged [`BarWindow::Outcome`].
#[must_use]
pub fn project_bars(
    bars: &[PriceBar],
    geometry: &ChartGeometry,
    outcome_start: Option<usize>,
) -> Vec<BarGeometry> {
    #[cfg(feature = "parallel-projection")]
    {
        bars.par_iter()
            .enumerate()
            .map(|(index, bar)| project_single_bar(index, bar, geometry, outcome_start))
            .collect()
    }

    #[cfg(not(feature = "parallel-projection"))]
    {
        bars.iter()
            .enumerate()
            .map(|(index, bar)| project_single_bar(index, bar, geometry, outcome_start))
            .collect()
    }
}

/// Computes geometry and per-bar coordinates in one pass.
#[must_use]
pub fn compute_layout(bars: &[PriceBar], request: &LayoutRequest) -> ChartLayout {
    let geometry = compute_geometry_tuned(
        bars,
        request.container_height,
        request.width_hint,
        request.config,
    );
    let projected = project_bars(bars, &geometry, request.outcome_start);
    ChartLayout {
        geometry,
        bars: projected,
    }
}

fn project_single_bar(
    index: usize,
    bar: &PriceBar,
    geometry: &ChartGeometry,
    outcome_start: Option<usize>,
) -> BarGeometry {
    let scale = geometry.vertical_scale();
    let x = geometry.bar_x(index);
    let body_top = scale.price_to_pixel(bar.open.max(bar.close));
    let body_bottom = scale.price_to_pixel(bar.open.min(bar.close));

    BarGeometry {
        index,
        x,
        center_x: x + geometry.bar_width / 2.0,
        width: geometry.bar_width,
        body_top,
        body_bottom,
        body_height: (body_bottom - body_top).abs().max(geometry.min_body_height),
        wick_top: scale.price_to_pixel(bar.high),
        wick_bottom: scale.price_to_pixel(bar.low),
        is_bullish: bar.is_bullish(),
        window: BarWindow::classify(index, outcome_start),
    }
}

fn resolve_container_height(container_height: f64) -> f64 {
    if container_height.is_finite() && container_height > 0.0 {
        return container_height;
    }
    warn!(
        container_height,
        fallback = DEFAULT_CONTAINER_HEIGHT,
        "container height must be finite and > 0, using default"
    );
    DEFAULT_CONTAINER_HEIGHT
}

fn resolve_width_hint(width_hint: Option<f64>) -> f64 {
    match width_hint {
        Some(hint) if hint.is_finite() && hint >= 0.0 => hint,
        Some(hint) => {
            warn!(
                width_hint = hint,
                fallback = DEFAULT_WIDTH_HINT,
                "width hint must be finite and >= 0, using default"
            );
            DEFAULT_WIDTH_HINT
        }
        None => DEFAULT_WIDTH_HINT,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outcome_classification_boundaries() {
        assert_eq!(BarWindow::classify(0, None), BarWindow::Decision);
        assert_eq!(BarWindow::classify(0, Some(0)), BarWindow::Outcome);
        assert_eq!(BarWindow::classify(4, Some(5)), BarWindow::Decision);
        assert_eq!(BarWindow::classify(5, Some(5)), BarWindow::Outcome);
    }

    #[cfg(feature = "parallel-projection")]
    #[test]
    fn parallel_projection_matches_sequential_order_and_values() {
        let bars: Vec<PriceBar> = (0..2_048)
            .map(|i| {
                let open = 100.0 + (i % 37) as f64 * 0.25;
                let close = if i % 3 == 0 { open - 1.5 } else { open + 0.75 };
                PriceBar::new(i as f64, open, open.max(close) + 1.0, open.min(close) - 1.0, close)
            })
            .collect();
        let geometry = compute_geometry(&bars, 320.0, Some(1_200.0));

        let sequential: Vec<BarGeometry> = bars
            .iter()
            .enumerate()
            .map(|(index, bar)| project_single_bar(index, bar, &geometry, Some(1_500)))
            .collect();
        assert_eq!(project_bars(&bars, &geometry, Some(1_500)), sequential);
    }

    #[test]
    fn width_hint_falls_back_when_not_finite() {
        assert_eq!(resolve_width_hint(Some(f64::NAN)), DEFAULT_WIDTH_HINT);
        assert_eq!(resolve_width_hint(None), DEFAULT_WIDTH_HINT);
        assert_eq!(resolve_width_hint(Some(640.0)), 640.0);
    }
}
