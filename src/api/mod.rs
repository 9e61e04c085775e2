mod chart;
mod json_contract;

pub use chart::CandlestickChart;
pub use json_contract::{
    CHART_LAYOUT_JSON_SCHEMA_V1, ChartLayoutJsonContractV1, ReplayBars, parse_price_bars_json,
    parse_replay_bars_json,
};
