#![no_main]
use libfuzzer_sys::fuzz_target;

const MAX_WRAPPED_INPUT_LEN: usize = 10_000;

/// Fuzz the branch-listing normalizer.
///
/// Wraps the input as a `storeList` record to reach the per-store field
/// resolution (id candidates, phone drift, hours pairing).
fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        if let Ok(value) = serde_json::from_str::<serde_json::Value>(s) {
            let page = campus_partners::api::map::store_page(&value);
            assert!(page.total_pages >= 1);
        }

        if s.len() < MAX_WRAPPED_INPUT_LEN {
            let wrapped = format!(r#"{{"storeList":[{s}],"pageAmount":{s}}}"#);
            if let Ok(value) = serde_json::from_str::<serde_json::Value>(&wrapped) {
                let _ = campus_partners::api::map::store_page(&value);
            }
        }
    }
});
