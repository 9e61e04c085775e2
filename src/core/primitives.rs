use chrono::{DateTime, Utc};
use ordered_float::OrderedFloat;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use crate::error::{LayoutError, LayoutResult};

pub fn decimal_to_f64(value: Decimal, field_name: &str) -> LayoutResult<f64> {
    value.to_f64().ok_or_else(|| {
        LayoutError::InvalidData(format!("{field_name} cannot be represented as f64"))
    })
}

#[must_use]
pub fn datetime_to_unix_seconds(time: DateTime<Utc>) -> f64 {
    time.timestamp_millis() as f64 / 1000.0
}

/// Returns `(min, max)` over the finite values yielded by `values`.
///
/// Non-finite values are skipped; `None` means nothing finite was seen.
pub fn finite_extent(values: impl IntoIterator<Item = f64>) -> Option<(f64, f64)> {
    let mut extent: Option<(OrderedFloat<f64>, OrderedFloat<f64>)> = None;
    for value in values.into_iter().filter(|value| value.is_finite()) {
        let value = OrderedFloat(value);
        extent = Some(match extent {
            Some((min, max)) => (min.min(value), max.max(value)),
            None => (value, value),
        });
    }
    extent.map(|(min, max)| (min.into_inner(), max.into_inner()))
}
