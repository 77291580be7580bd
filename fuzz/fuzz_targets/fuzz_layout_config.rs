#![no_main]

use libfuzzer_sys::fuzz_target;
use spanflex::LayoutConfig;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    // Cap input length so parsing stays cheap.
    if text.len() > 4096 {
        return;
    }

    // Malformed configs must fail cleanly; valid ones must resolve.
    let Ok(config) = LayoutConfig::from_json_str(text) else {
        return;
    };
    let mut context = config.into_context().expect("validated config builds");
    let report = context.solve();
    assert!(!report.total_distance.is_nan());
});
