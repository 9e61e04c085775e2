use tracing::debug;

use crate::api::ReplayBars;
use crate::core::{ChartLayout, LayoutConfig, LayoutRequest, PriceBar, compute_layout};
use crate::error::{LayoutError, LayoutResult};
use crate::render::{CandlestickStyle, RenderFrame, Renderer, build_candlestick_frame};

/// Facade owning one bar series, its layout inputs and a renderer.
///
/// The layout is recomputed lazily after any input change; between changes
/// repeated renders reuse the cached layout.
pub struct CandlestickChart<R: Renderer> {
    renderer: R,
    request: LayoutRequest,
    style: CandlestickStyle,
    bars: Vec<PriceBar>,
    cached_layout: Option<ChartLayout>,
}

impl<R: Renderer> CandlestickChart<R> {
    pub fn new(renderer: R, request: LayoutRequest) -> LayoutResult<Self> {
        validate_request(&request)?;
        Ok(Self {
            renderer,
            request,
            style: CandlestickStyle::default(),
            bars: Vec::new(),
            cached_layout: None,
        })
    }

    #[must_use]
    pub fn bars(&self) -> &[PriceBar] {
        &self.bars
    }

    #[must_use]
    pub fn request(&self) -> LayoutRequest {
        self.request
    }

    #[must_use]
    pub fn style(&self) -> &CandlestickStyle {
        &self.style
    }

    /// Replaces the bar series. The latest call wins; nothing is merged.
    pub fn set_bars(&mut self, bars: Vec<PriceBar>) {
        debug!(count = bars.len(), "set bars");
        self.bars = bars;
        self.invalidate();
    }

    pub fn append_bar(&mut self, bar: PriceBar) {
        self.bars.push(bar);
        self.invalidate();
    }

    pub fn set_container_height(&mut self, container_height: f64) -> LayoutResult<()> {
        if !container_height.is_finite() || container_height <= 0.0 {
            return Err(LayoutError::InvalidData(
                "container height must be finite and > 0".to_owned(),
            ));
        }
        self.request.container_height = container_height;
        self.invalidate();
        Ok(())
    }

    pub fn set_width_hint(&mut self, width_hint: Option<f64>) -> LayoutResult<()> {
        validate_width_hint(width_hint)?;
        self.request.width_hint = width_hint;
        self.invalidate();
        Ok(())
    }

    /// Replaces the bar series together with its decision/outcome split.
    pub fn set_replay(&mut self, replay: ReplayBars) {
        debug!(
            count = replay.bars.len(),
            outcome_start = ?replay.outcome_start,
            "set replay bars"
        );
        self.request = replay.apply_to(self.request);
        self.bars = replay.bars;
        self.invalidate();
    }

    pub fn set_outcome_start(&mut self, outcome_start: Option<usize>) {
        self.request.outcome_start = outcome_start;
        self.invalidate();
    }

    pub fn set_layout_config(&mut self, config: LayoutConfig) -> LayoutResult<()> {
        self.request.config = config.validate()?;
        self.invalidate();
        Ok(())
    }

    pub fn set_style(&mut self, style: CandlestickStyle) -> LayoutResult<()> {
        self.style = style.validate()?;
        Ok(())
    }

    /// Returns the layout for the current inputs, computing it if stale.
    pub fn layout(&mut self) -> &ChartLayout {
        let (bars, request) = (&self.bars, &self.request);
        self.cached_layout
            .get_or_insert_with(|| compute_layout(bars, request))
    }

    pub fn build_render_frame(&mut self) -> RenderFrame {
        let style = self.style.clone();
        build_candlestick_frame(self.layout(), &style)
    }

    pub fn render(&mut self) -> LayoutResult<()> {
        let frame = self.build_render_frame();
        self.renderer.render(&frame)
    }

    #[must_use]
    pub fn into_renderer(self) -> R {
        self.renderer
    }

    fn invalidate(&mut self) {
        self.cached_layout = None;
    }
}

fn validate_request(request: &LayoutRequest) -> LayoutResult<()> {
    if !request.container_height.is_finite() || request.container_height <= 0.0 {
        return Err(LayoutError::InvalidData(
            "container height must be finite and > 0".to_owned(),
        ));
    }
    validate_width_hint(request.width_hint)?;
    request.config.validate()?;
    Ok(())
}

fn validate_width_hint(width_hint: Option<f64>) -> LayoutResult<()> {
    match width_hint {
        Some(hint) if !hint.is_finite() || hint < 0.0 => Err(LayoutError::InvalidData(
            "width hint must be finite and >= 0".to_owned(),
        )),
        _ => Ok(()),
    }
}
