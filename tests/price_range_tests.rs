use chrono::{TimeZone, Utc};
use rust_decimal::Decimal;

use candle_layout::core::{
    BarTime, LayoutConfig, PriceBar, PriceRange, VerticalScale,
};

#[test]
fn range_pads_by_ratio_of_span() {
    let bars = vec![
        PriceBar::new(0.0, 100.0, 110.0, 90.0, 105.0),
        PriceBar::new(1.0, 105.0, 120.0, 95.0, 98.0),
    ];
    let range = PriceRange::from_bars(&bars, 0.05, 1.0).expect("range");

    assert!((range.min - 88.5).abs() <= 1e-9);
    assert!((range.max - 121.5).abs() <= 1e-9);
}

#[test]
fn flat_range_uses_fallback_span() {
    let bars = vec![PriceBar::new(0.0, 42.0, 42.0, 42.0, 42.0); 3];
    let range = PriceRange::from_bars(&bars, 0.05, 1.0).expect("range");

    assert!((range.min - 41.95).abs() <= 1e-9);
    assert!((range.max - 42.05).abs() <= 1e-9);
    assert!(range.span() > 0.0);
}

#[test]
fn range_ignores_non_finite_values() {
    let bars = vec![
        PriceBar::new(0.0, 10.0, f64::NAN, 9.0, 10.0),
        PriceBar::new(1.0, 10.0, 12.0, f64::NEG_INFINITY, 10.0),
    ];
    let range = PriceRange::from_bars(&bars, 0.0, 1.0).expect("range");
    assert_eq!(range.min, 9.0);
    assert_eq!(range.max, 12.0);

    let hopeless = vec![PriceBar::new(0.0, 1.0, f64::NAN, f64::NAN, 1.0)];
    assert!(PriceRange::from_bars(&hopeless, 0.05, 1.0).is_none());
}

#[test]
fn extreme_finite_prices_keep_range_and_pixels_finite() {
    let bars = vec![PriceBar::new(0.0, 0.0, f64::MAX, -f64::MAX, 0.0)];
    let range = PriceRange::from_bars(&bars, 0.05, 1.0).expect("range");
    assert_eq!(range.min, f64::MIN);
    assert_eq!(range.max, f64::MAX);
    assert!(range.half_span().is_finite());

    let scale = VerticalScale::new(range, 40.0, 240.0);
    assert_eq!(scale.price_to_pixel(f64::MAX), 40.0);
    assert_eq!(scale.price_to_pixel(f64::MIN), 280.0);
    assert_eq!(scale.price_to_pixel(0.0), 160.0);
    assert_eq!(scale.pixel_to_price(40.0), Some(f64::MAX));
}

#[test]
fn vertical_scale_is_inverted_and_invertible() {
    let scale = VerticalScale::new(PriceRange::new(0.0, 100.0), 40.0, 240.0);

    assert_eq!(scale.price_to_pixel(100.0), 40.0);
    assert_eq!(scale.price_to_pixel(0.0), 280.0);
    assert_eq!(scale.price_to_pixel(50.0), 160.0);

    let px = scale.price_to_pixel(37.5);
    let recovered = scale.pixel_to_price(px).expect("invertible");
    assert!((recovered - 37.5).abs() <= 1e-9);

    let flat = VerticalScale::new(PriceRange::new(0.0, 100.0), 40.0, 0.0);
    assert!(flat.pixel_to_price(40.0).is_none());
}

#[test]
fn bullish_tie_break_and_consistency_helper() {
    let doji = PriceBar::new(0.0, 5.0, 6.0, 4.0, 5.0);
    assert!(doji.is_bullish());
    assert!(doji.is_consistent());

    let bearish = PriceBar::new(0.0, 5.0, 6.0, 4.0, 4.5);
    assert!(!bearish.is_bullish());

    let broken = PriceBar::new(0.0, 120.0, 110.0, 90.0, 100.0);
    assert!(!broken.is_consistent());
}

#[test]
fn decimal_time_constructor_uses_unix_seconds() {
    let time = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();
    let bar = PriceBar::from_decimal_time(
        time,
        Decimal::new(1005, 1),
        Decimal::new(1100, 1),
        Decimal::new(995, 1),
        Decimal::new(1050, 1),
    )
    .expect("decimal bar");

    assert_eq!(bar.time, BarTime::Numeric(1_709_251_200.0));
    assert!((bar.open - 100.5).abs() <= 1e-12);
    assert!((bar.close - 105.0).abs() <= 1e-12);
}

#[test]
fn config_validation_rejects_bad_constants() {
    assert!(LayoutConfig::default().validate().is_ok());
    assert!(LayoutConfig::default().with_min_bar_width(0.0).validate().is_err());
    assert!(LayoutConfig::default().with_bar_gap(f64::NAN).validate().is_err());
    assert!(LayoutConfig::default().with_min_body_height(-1.0).validate().is_err());
}

#[test]
fn config_deserializes_with_defaults_for_missing_fields() {
    let config: LayoutConfig =
        serde_json::from_str(r#"{"bar_gap": 6.0, "left_padding": 10.0}"#).expect("config json");

    assert_eq!(config.bar_gap, 6.0);
    assert_eq!(config.left_padding, 10.0);
    assert_eq!(config.min_bar_width, LayoutConfig::default().min_bar_width);
    assert_eq!(config.placeholder_price_max, 100.0);
}
