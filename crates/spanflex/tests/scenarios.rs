//! Literal resolution scenarios with hand-checked expected values.
//!
//! Run with: `cargo test -p spanflex --test scenarios`

use spanflex::{
    Clamp, DEFAULT_TOLERANCE, LayoutConfig, ResolutionContext, ResolveMode, SegmentConfig,
};

const EPS: f64 = 1e-4;

fn assert_close(actual: f64, expected: f64, what: &str) {
    assert!(
        (actual - expected).abs() < EPS,
        "{what}: expected {expected}, got {actual}"
    );
}

fn four_segment_configs() -> Vec<SegmentConfig> {
    vec![
        SegmentConfig::new("Seg1", 200.0)
            .compress(0.7)
            .expand(0.1)
            .bounds(0.0, 100.0)
            .order(2),
        SegmentConfig::new("Seg2", 200.0)
            .compress(1.0)
            .expand(1.0)
            .bounds(300.0, 800.0)
            .order(1),
        SegmentConfig::new("Seg3", 150.0)
            .compress(0.0)
            .expand(2.0)
            .bounds(0.0, 200.0)
            .order(3),
        SegmentConfig::new("Seg4", 350.0)
            .compress(0.3)
            .expand(0.5)
            .bounds(50.0, 300.0)
            .order(0),
    ]
}

fn distance(context: &ResolutionContext, name: &str) -> f64 {
    context.segment(name).expect(name).distance()
}

fn offset(context: &ResolutionContext, name: &str) -> f64 {
    context.segment(name).expect(name).offset()
}

// ============================================================================
// Compression
// ============================================================================

#[test]
fn compression_four_segments() {
    let mut context = ResolutionContext::new(800.0, four_segment_configs());

    let bases: Vec<f64> = context.metrics().iter().map(|m| m.base).collect();
    assert_eq!(bases, vec![100.0, 300.0, 150.0, 300.0]);
    assert_eq!(context.totals().base, 850.0);
    assert_eq!(context.mode(), ResolveMode::Compress);

    let report = context.solve();

    assert_close(distance(&context, "Seg1"), 78.125, "Seg1 distance");
    assert_close(distance(&context, "Seg2"), 300.0, "Seg2 distance");
    assert_close(distance(&context, "Seg3"), 150.0, "Seg3 distance");
    assert_close(distance(&context, "Seg4"), 271.875, "Seg4 distance");
    assert_close(report.total_distance, 800.0, "total");
    assert!(report.is_conserved(DEFAULT_TOLERANCE));

    assert_eq!(context.placement_order(), &[3, 1, 0, 2]);
    assert_close(offset(&context, "Seg4"), 0.0, "Seg4 offset");
    assert_close(offset(&context, "Seg2"), 271.875, "Seg2 offset");
    assert_close(offset(&context, "Seg1"), 571.875, "Seg1 offset");
    assert_close(offset(&context, "Seg3"), 650.0, "Seg3 offset");

    let last = context.segment("Seg3").expect("Seg3");
    assert_close(last.end(), 800.0, "final end");
}

#[test]
fn compression_floor_on_seg2_is_flagged() {
    // Seg2's proportional share (~267) is below its min of 300.
    let mut context = ResolutionContext::new(800.0, four_segment_configs());
    let report = context.solve();
    assert_eq!(
        context.segment("Seg2").and_then(|s| s.clamp()),
        Some(Clamp::Floor)
    );
    assert_eq!(report.floor_clamps, 1);
    assert_eq!(report.ceiling_clamps, 0);
}

#[test]
fn compression_leaves_expand_delta_zero() {
    let mut context = ResolutionContext::new(800.0, four_segment_configs());
    context.solve();
    for segment in context.segments() {
        assert_eq!(segment.expand_delta(), 0.0, "{}", segment.name());
        assert_eq!(segment.base(), segment.distance(), "{}", segment.name());
    }
}

#[test]
fn infeasible_minimums_overflow() {
    // Σmin = 180 > 100.
    let mut context = ResolutionContext::new(
        100.0,
        [
            SegmentConfig::new("a", 100.0).compress(1.0).min(90.0),
            SegmentConfig::new("b", 100.0).compress(1.0).min(90.0),
        ],
    );
    let report = context.solve();
    assert_eq!(report.mode, ResolveMode::Compress);
    assert_close(distance(&context, "a"), 90.0, "a");
    assert_close(distance(&context, "b"), 90.0, "b");
    assert!(report.has_overflow());
    assert_close(report.deviation(), 80.0, "deviation");
}

// ============================================================================
// Expansion
// ============================================================================

#[test]
fn expansion_two_segments() {
    let mut context = ResolutionContext::new(
        300.0,
        [
            SegmentConfig::new("A", 100.0).expand(1.0).bounds(0.0, 200.0).order(0),
            SegmentConfig::new("B", 100.0).expand(1.0).bounds(0.0, 150.0).order(1),
        ],
    );
    assert_eq!(context.mode(), ResolveMode::Expand);
    let report = context.solve();

    assert_close(distance(&context, "A"), 150.0, "A");
    assert_close(distance(&context, "B"), 150.0, "B");
    assert_eq!(report.ceiling_clamps, 0);
    assert!(report.is_conserved(DEFAULT_TOLERANCE));
    assert_close(offset(&context, "A"), 0.0, "A offset");
    assert_close(offset(&context, "B"), 150.0, "B offset");
}

#[test]
fn four_segments_expand_when_budget_allows() {
    // Σbase = 850; surplus 150 over ratios 0.1 + 1 + 2 + 0.5 = 3.6.
    let mut context = ResolutionContext::new(1000.0, four_segment_configs());
    let report = context.solve();
    assert_eq!(report.mode, ResolveMode::Expand);

    // Seg1 is already at its max of 100.
    assert_close(distance(&context, "Seg1"), 100.0, "Seg1");
    // 150 / 3.6 * 1.0, remaining 150 over 3.5 after Seg1 took nothing.
    let seg2 = 150.0 / 3.5;
    assert_close(distance(&context, "Seg2"), 300.0 + seg2, "Seg2");
    // Seg3 would take (150 - seg2) / 2.5 * 2 but caps at 50.
    assert_close(distance(&context, "Seg3"), 200.0, "Seg3");
    // Seg4 is at its max of 300.
    assert_close(distance(&context, "Seg4"), 300.0, "Seg4");

    assert_eq!(report.ceiling_clamps, 3);
    assert!(report.has_underflow());
}

#[test]
fn equal_budget_is_a_noop_expansion() {
    let mut context = ResolutionContext::new(
        850.0,
        four_segment_configs(),
    );
    let report = context.solve();
    assert_eq!(report.mode, ResolveMode::Expand);
    assert_close(distance(&context, "Seg1"), 100.0, "Seg1");
    assert_close(distance(&context, "Seg2"), 300.0, "Seg2");
    assert_close(distance(&context, "Seg3"), 150.0, "Seg3");
    assert_close(distance(&context, "Seg4"), 300.0, "Seg4");
    assert!(report.is_conserved(DEFAULT_TOLERANCE));
    assert!(!report.any_clamped());
}

// ============================================================================
// Order mutation
// ============================================================================

#[test]
fn reordering_moves_offsets_only() {
    let mut context = ResolutionContext::new(800.0, four_segment_configs());
    context.solve();
    let sizes: Vec<(f64, f64, f64)> = context
        .segments()
        .iter()
        .map(|s| (s.base(), s.expand_delta(), s.distance()))
        .collect();

    // Move Seg3 to the front.
    assert!(context.set_order("Seg3", -1));
    context.place();

    assert_close(offset(&context, "Seg3"), 0.0, "Seg3 offset");
    assert_close(offset(&context, "Seg4"), 150.0, "Seg4 offset");
    assert_close(offset(&context, "Seg2"), 421.875, "Seg2 offset");
    assert_close(offset(&context, "Seg1"), 721.875, "Seg1 offset");

    let after: Vec<(f64, f64, f64)> = context
        .segments()
        .iter()
        .map(|s| (s.base(), s.expand_delta(), s.distance()))
        .collect();
    assert_eq!(sizes, after);
}

#[test]
fn reordering_unknown_segment_changes_nothing() {
    let mut context = ResolutionContext::new(800.0, four_segment_configs());
    context.solve();
    let before = context.segments().to_vec();
    assert!(!context.set_order("Seg9", 0));
    context.place();
    assert_eq!(context.segments(), before.as_slice());
}

// ============================================================================
// Configuration
// ============================================================================

#[test]
fn json_config_matches_builder() {
    let json = r#"{
        "root_distance": 800,
        "segments": [
            { "name": "Seg1", "base": 200, "compress_ratio": 0.7, "expand_ratio": 0.1, "min": 0,   "max": 100, "order": 2 },
            { "name": "Seg2", "base": 200, "compress_ratio": 1.0, "expand_ratio": 1.0, "min": 300, "max": 800, "order": 1 },
            { "name": "Seg3", "base": 150, "compress_ratio": 0.0, "expand_ratio": 2.0, "min": 0,   "max": 200, "order": 3 },
            { "name": "Seg4", "base": 350, "compress_ratio": 0.3, "expand_ratio": 0.5, "min": 50,  "max": 300, "order": 0 }
        ]
    }"#;
    let config = LayoutConfig::from_json_str(json).expect("valid config");
    assert_eq!(config.segments, four_segment_configs());

    let mut context = config.into_context().expect("valid config");
    context.solve();
    assert_close(distance(&context, "Seg1"), 78.125, "Seg1");
    assert_close(distance(&context, "Seg4"), 271.875, "Seg4");
}

#[test]
fn resolved_segments_serialize() {
    let context = spanflex::solve(
        300.0,
        [SegmentConfig::new("A", 100.0).expand(1.0).max(120.0)],
    );
    let value = serde_json::to_value(context.segments()).expect("serializes");
    assert_eq!(value[0]["name"], "A");
    assert_eq!(value[0]["distance"], 120.0);
    assert_eq!(value[0]["expand_delta"], 20.0);
    assert_eq!(value[0]["clamp"], "ceiling");
}
