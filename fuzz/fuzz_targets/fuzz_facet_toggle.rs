#![no_main]
use libfuzzer_sys::fuzz_target;

use campus_partners::catalog::{FacetKind, ListFilter};

/// Fuzz the facet state machine with arbitrary tag strings.
///
/// Input bytes are split into lines; each line is toggled as a tag. The
/// filter must stay consistent: encoding never panics, a facet is ALL
/// exactly when it has no selected tags, and the page stays reset.
fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let mut filter = ListFilter::new(
            vec!["음식".to_string(), "카페".to_string()],
            vec!["할인".to_string()],
            Vec::new(),
            9,
        );
        for tag in s.lines().filter(|t| !t.is_empty()).take(64) {
            filter.toggle(FacetKind::Organization, tag);
            let facet = filter.facet(FacetKind::Organization);
            assert_eq!(facet.is_all(), facet.selected_count() == 0);
            assert_eq!(facet.encode().is_empty(), facet.is_all());
            assert_eq!(filter.page().current(), 1);
        }
        let _ = filter.encode();
    }
});
