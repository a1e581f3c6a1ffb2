#![no_main]
use libfuzzer_sys::fuzz_target;

/// Fuzz the detail and review-tab normalizers on the same arbitrary value.
///
/// Both map flat objects; neither is allowed to panic on any JSON shape.
fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        if let Ok(value) = serde_json::from_str::<serde_json::Value>(s) {
            let _ = campus_partners::api::map::offer_detail(&value);
            let summary = campus_partners::api::map::review_summary(&value, 1, None);
            // Without an origin, every photo URL that survives is absolute.
            for entry in &summary.entries {
                for url in &entry.photo_urls {
                    assert!(url.starts_with("http://") || url.starts_with("https://"));
                }
            }
        }
    }
});
