pub mod config;
pub mod layout;
pub mod price_range;
pub mod primitives;
pub mod types;

pub use config::{DEFAULT_CONTAINER_HEIGHT, DEFAULT_WIDTH_HINT, LayoutConfig, LayoutRequest};
pub use layout::{
    BarGeometry, BarWindow, ChartGeometry, ChartLayout, compute_geometry, compute_geometry_tuned,
    compute_layout, project_bars,
};
pub use price_range::{PriceRange, VerticalScale};
pub use types::{BarTime, PriceBar, Viewport};
