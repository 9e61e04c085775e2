use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{ChartLayout, LayoutRequest, PriceBar};
use crate::error::{LayoutError, LayoutResult};

pub const CHART_LAYOUT_JSON_SCHEMA_V1: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartLayoutJsonContractV1 {
    pub schema_version: u32,
    pub layout: ChartLayout,
}

/// Bar payload shapes accepted at the JSON boundary.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum BarsPayload {
    Bare(Vec<PriceBar>),
    Windowed(WindowedBars),
}

/// Challenge-style payload: bars before the decision point plus an optional
/// forward window revealed afterwards. Unknown keys (ids, metadata) are ignored.
#[derive(Debug, Deserialize)]
struct WindowedBars {
    #[serde(
        default,
        rename = "snapshotCandles",
        alias = "snapshot_candles",
        alias = "candles"
    )]
    snapshot: Option<Vec<PriceBar>>,
    #[serde(
        default,
        rename = "forwardCandles",
        alias = "forward_candles",
        alias = "outcomeCandles",
        alias = "outcome_candles"
    )]
    forward: Option<Vec<PriceBar>>,
}

/// Bars for one replayed chart: the decision window followed by the outcome
/// window, with `outcome_start` pointing at the first outcome bar.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ReplayBars {
    pub bars: Vec<PriceBar>,
    pub outcome_start: Option<usize>,
}

impl ReplayBars {
    /// Concatenates both windows. An empty forward window leaves every bar in
    /// the decision window.
    #[must_use]
    pub fn from_windows(snapshot: Vec<PriceBar>, forward: Vec<PriceBar>) -> Self {
        let outcome_start = (!forward.is_empty()).then_some(snapshot.len());
        let mut bars = snapshot;
        bars.extend(forward);
        Self {
            bars,
            outcome_start,
        }
    }

    /// Copies the outcome split onto `request`.
    #[must_use]
    pub fn apply_to(&self, request: LayoutRequest) -> LayoutRequest {
        request.with_outcome_start(self.outcome_start)
    }
}

/// Parses a bar payload and keeps the decision/outcome split.
///
/// Accepts a bare JSON array, or an object carrying `snapshotCandles` (also
/// `candles`) and/or `forwardCandles` (also `outcomeCandles`), camel or snake
/// case. Bars come back in payload order with no consistency checks applied.
pub fn parse_replay_bars_json(input: &str) -> LayoutResult<ReplayBars> {
    let payload: BarsPayload = serde_json::from_str(input).map_err(|e| {
        LayoutError::InvalidData(format!("failed to parse price bars json payload: {e}"))
    })?;
    let replay = match payload {
        BarsPayload::Bare(bars) => ReplayBars {
            bars,
            outcome_start: None,
        },
        BarsPayload::Windowed(WindowedBars {
            snapshot: None,
            forward: None,
        }) => {
            return Err(LayoutError::InvalidData(
                "price bars json payload carries no candle array".to_owned(),
            ));
        }
        BarsPayload::Windowed(windowed) => ReplayBars::from_windows(
            windowed.snapshot.unwrap_or_default(),
            windowed.forward.unwrap_or_default(),
        ),
    };
    debug!(
        count = replay.bars.len(),
        outcome_start = ?replay.outcome_start,
        "parsed price bars"
    );
    Ok(replay)
}

/// Parses bars in payload order, discarding the decision/outcome split.
///
/// See [`parse_replay_bars_json`] for the accepted shapes.
pub fn parse_price_bars_json(input: &str) -> LayoutResult<Vec<PriceBar>> {
    parse_replay_bars_json(input).map(|replay| replay.bars)
}

impl ChartLayout {
    pub fn to_json_pretty(&self) -> LayoutResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn to_json_contract_v1_pretty(&self) -> LayoutResult<String> {
        let payload = ChartLayoutJsonContractV1 {
            schema_version: CHART_LAYOUT_JSON_SCHEMA_V1,
            layout: self.clone(),
        };
        serde_json::to_string_pretty(&payload).map_err(|e| {
            LayoutError::InvalidData(format!("failed to serialize layout contract v1: {e}"))
        })
    }

    /// Accepts either a raw layout or a versioned contract payload.
    pub fn from_json_compat_str(input: &str) -> LayoutResult<Self> {
        if let Ok(layout) = serde_json::from_str::<ChartLayout>(input) {
            return Ok(layout);
        }
        let payload: ChartLayoutJsonContractV1 = serde_json::from_str(input).map_err(|e| {
            LayoutError::InvalidData(format!("failed to parse layout json payload: {e}"))
        })?;
        if payload.schema_version != CHART_LAYOUT_JSON_SCHEMA_V1 {
            return Err(LayoutError::InvalidData(format!(
                "unsupported layout schema version: {}",
                payload.schema_version
            )));
        }
        Ok(payload.layout)
    }
}
