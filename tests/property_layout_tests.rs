use candle_layout::core::{LayoutRequest, PriceBar, compute_layout};
use proptest::prelude::*;

fn bar_strategy() -> impl Strategy<Value = PriceBar> {
    (
        -1_000.0f64..1_000.0,
        0.0f64..500.0,
        0.0f64..1.0,
        0.0f64..1.0,
    )
        .prop_map(|(low, span, open_factor, close_factor)| {
            let high = low + span;
            PriceBar::new(
                0.0,
                low + open_factor * span,
                high,
                low,
                low + close_factor * span,
            )
        })
}

proptest! {
    #[test]
    fn layout_keeps_one_record_per_bar(
        bars in prop::collection::vec(bar_strategy(), 1..200),
        height in 100.0f64..1_200.0,
        outcome_start in prop::option::of(0usize..250)
    ) {
        let request = LayoutRequest::new(height).with_outcome_start(outcome_start);
        let layout = compute_layout(&bars, &request);

        prop_assert_eq!(layout.bars.len(), bars.len());
        for (index, projected) in layout.bars.iter().enumerate() {
            prop_assert_eq!(projected.index, index);
            prop_assert_eq!(projected.is_bullish, bars[index].close >= bars[index].open);
            let expected_outcome = outcome_start.is_some_and(|start| index >= start);
            prop_assert_eq!(projected.is_outcome(), expected_outcome);
        }
    }

    #[test]
    fn wick_and_body_stay_inside_drawable_area(
        bars in prop::collection::vec(bar_strategy(), 1..100),
        height in 100.0f64..1_200.0
    ) {
        let layout = compute_layout(&bars, &LayoutRequest::new(height));
        let geometry = layout.geometry;
        let top = geometry.top_bottom_padding;
        let bottom = top + geometry.pixel_height;
        let eps = 1e-6;

        prop_assert!(geometry.price_min < geometry.price_max);
        for projected in &layout.bars {
            prop_assert!(projected.wick_top <= projected.wick_bottom + eps);
            prop_assert!(projected.wick_top <= projected.body_top + eps);
            prop_assert!(projected.body_bottom <= projected.wick_bottom + eps);
            prop_assert!(projected.wick_top >= top - eps);
            prop_assert!(projected.wick_bottom <= bottom + eps);
            prop_assert!(projected.body_height >= geometry.min_body_height);
        }
    }

    #[test]
    fn bars_never_overlap_and_canvas_covers_hint(
        bars in prop::collection::vec(bar_strategy(), 1..400),
        width_hint in prop::option::of(0.0f64..2_000.0)
    ) {
        let mut request = LayoutRequest::new(320.0);
        request.width_hint = width_hint;
        let layout = compute_layout(&bars, &request);
        let geometry = layout.geometry;

        prop_assert!(geometry.bar_width >= 4.0);
        prop_assert!(geometry.canvas_width >= width_hint.unwrap_or(400.0));
        for pair in layout.bars.windows(2) {
            prop_assert!(pair[0].x + pair[0].width <= pair[1].x);
        }
        if let Some(last) = layout.bars.last() {
            prop_assert!(last.x + last.width <= geometry.canvas_width + 1e-6);
        }
    }

    #[test]
    fn layout_is_deterministic(
        bars in prop::collection::vec(bar_strategy(), 0..64),
        height in 100.0f64..800.0
    ) {
        let request = LayoutRequest::new(height);
        prop_assert_eq!(compute_layout(&bars, &request), compute_layout(&bars, &request));
    }
}
