#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use spanflex::{ResolutionContext, ResolveMode, SegmentConfig};

#[derive(Debug, Arbitrary)]
struct FuzzSegment {
    base: f64,
    compress_ratio: f64,
    expand_ratio: f64,
    min: f64,
    max: f64,
    order: i32,
}

#[derive(Debug, Arbitrary)]
struct FuzzInput {
    root_distance: f64,
    segments: Vec<FuzzSegment>,
    reorders: Vec<(u8, i32)>,
}

fuzz_target!(|input: FuzzInput| {
    // Keep the cascade short enough for the fuzzer to stay fast.
    if input.segments.len() > 64 {
        return;
    }

    let configs = input.segments.iter().enumerate().map(|(i, s)| SegmentConfig {
        name: format!("s{i}"),
        base: s.base,
        compress_ratio: s.compress_ratio,
        expand_ratio: s.expand_ratio,
        min: s.min,
        max: s.max,
        order: s.order,
    });

    let mut context = ResolutionContext::new(input.root_distance, configs);
    context.solve();

    // Post-conditions that must always hold:
    for (segment, metrics) in context.segments().iter().zip(context.metrics()) {
        assert!(!segment.distance().is_nan(), "NaN distance");
        assert!(segment.distance() >= metrics.min, "floor violated");
        if context.mode() == ResolveMode::Expand {
            assert!(segment.expand_delta() >= 0.0, "negative delta");
            assert!(
                segment.expand_delta() <= (metrics.max - metrics.base).max(0.0),
                "ceiling violated"
            );
        }
    }

    let sizes: Vec<_> = context
        .segments()
        .iter()
        .map(|s| (s.base().to_bits(), s.distance().to_bits()))
        .collect();

    let count = context.segments().len();
    if count > 0 {
        for &(pick, order) in &input.reorders {
            let name = format!("s{}", pick as usize % count);
            assert!(context.set_order(&name, order));
        }
    }
    context.place();

    let after: Vec<_> = context
        .segments()
        .iter()
        .map(|s| (s.base().to_bits(), s.distance().to_bits()))
        .collect();
    assert_eq!(sizes, after, "reorder touched sizes");

    let mut previous = None;
    for &index in context.placement_order() {
        let segment = &context.segments()[index];
        if let Some(prev) = previous {
            assert!(segment.offset() >= prev, "offsets went backwards");
        }
        previous = Some(segment.offset());
    }
});
