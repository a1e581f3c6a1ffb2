//! Property-based tests for the listing filter engine.
//!
//! The inline unit tests pin specific cases; these pin the invariants across
//! random inputs: facet collapse rules, canonical encoding, page arithmetic,
//! and the sort comparators.

use std::cmp::Ordering;
use std::collections::HashSet;

use chrono::NaiveDate;
use proptest::prelude::*;

use campus_partners::catalog::{
    slice_for_page, total_pages, FacetKind, ListFilter, PageWindow, SortKey,
};
use campus_partners::model::Offer;

fn offer(id: u64) -> Offer {
    Offer {
        id,
        title: format!("offer {id}"),
        merchant_name: String::new(),
        image_url: String::new(),
        category: String::new(),
        organization_tags: Vec::new(),
        benefit_type_tags: Vec::new(),
        view_count: 0,
        discount_percent: 0,
        deadline_text: String::new(),
        deadline: None,
        is_featured: false,
    }
}

fn offer_strategy() -> impl Strategy<Value = Offer> {
    (
        1u64..10_000,
        0u64..100_000,
        0u8..=100,
        prop::option::of((2024i32..2030, 1u32..=12, 1u32..=28)),
    )
        .prop_map(|(id, views, discount, deadline)| {
            let mut o = offer(id);
            o.view_count = views;
            o.discount_percent = discount;
            o.deadline = deadline.and_then(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d));
            o
        })
}

/// Random offers with ids rewritten to be distinct, so every comparator is a
/// total order over the collection.
fn offers_strategy(max_len: usize) -> impl Strategy<Value = Vec<Offer>> {
    prop::collection::vec(offer_strategy(), 0..max_len).prop_map(|mut offers| {
        for (index, o) in offers.iter_mut().enumerate() {
            o.id = index as u64 + 1;
        }
        offers
    })
}

proptest! {
    // 500 cases: the engine is pure state with no I/O, broad coverage is cheap.
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn covering_the_vocabulary_one_toggle_at_a_time_collapses_to_all(size in 1usize..8) {
        let options: Vec<String> = (0..size).map(|i| format!("tag{i}")).collect();
        let mut filter = ListFilter::new(options.clone(), Vec::new(), Vec::new(), 9);

        for (index, tag) in options.iter().enumerate() {
            filter.toggle(FacetKind::Organization, tag);
            let is_last = index + 1 == options.len();
            prop_assert_eq!(
                filter.facet(FacetKind::Organization).is_all(),
                is_last,
                "after {} of {} toggles",
                index + 1,
                options.len()
            );
        }
        prop_assert_eq!(filter.encode().organization, "");
    }

    #[test]
    fn toggle_sequences_match_a_set_model(clicks in prop::collection::vec(0usize..5, 0..25)) {
        let options: Vec<String> = ["음식", "카페", "생활", "문화", "기타"]
            .iter()
            .map(ToString::to_string)
            .collect();
        let mut filter = ListFilter::new(Vec::new(), options.clone(), Vec::new(), 9);
        let mut model: HashSet<usize> = HashSet::new();

        for &click in &clicks {
            filter.toggle(FacetKind::Category, &options[click]);
            if !model.remove(&click) {
                model.insert(click);
            }
            if model.len() == options.len() {
                model.clear();
            }

            let expected: Vec<&str> = options
                .iter()
                .enumerate()
                .filter(|(i, _)| model.contains(i))
                .map(|(_, tag)| tag.as_str())
                .collect();
            prop_assert_eq!(filter.encode().category, expected.join(","));
            prop_assert_eq!(filter.facet(FacetKind::Category).is_all(), model.is_empty());
        }
    }

    #[test]
    fn page_count_brackets_the_item_total(total in 0usize..10_000, size in 1u32..100) {
        let pages = total_pages(total, size) as usize;
        let size = size as usize;
        prop_assert!(pages >= 1);
        prop_assert!(pages * size >= total.max(1));
        prop_assert!((pages - 1) * size < total.max(1));
    }

    #[test]
    fn page_slices_partition_the_list(total in 0usize..500, size in 1u32..50) {
        let items: Vec<usize> = (0..total).collect();
        let pages = total_pages(total, size);

        let mut rebuilt = Vec::new();
        for page in 1..=pages {
            rebuilt.extend_from_slice(slice_for_page(&items, page, size));
        }
        prop_assert_eq!(rebuilt, items.clone());
        prop_assert!(slice_for_page(&items, pages + 1, size).is_empty());
    }

    #[test]
    fn rejected_page_moves_leave_the_window_unchanged(total in 1u32..50, target in 0u32..100) {
        let mut window = PageWindow::new(9);
        window.set_total_pages(total);
        let before = window;

        if window.set_page(target) {
            prop_assert!(target >= 1 && target <= total);
            prop_assert_eq!(window.current(), target);
        } else {
            prop_assert_eq!(window, before);
        }
    }

    #[test]
    fn sorting_is_idempotent_and_ordered(
        mut offers in offers_strategy(40),
        key in prop::sample::select(SortKey::ALL.to_vec()),
    ) {
        key.sort(&mut offers);
        prop_assert!(key.is_ordered(&offers));

        let once: Vec<u64> = offers.iter().map(|o| o.id).collect();
        key.sort(&mut offers);
        let twice: Vec<u64> = offers.iter().map(|o| o.id).collect();
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn comparators_are_total_orders_over_distinct_ids(
        offers in offers_strategy(12),
        key in prop::sample::select(SortKey::ALL.to_vec()),
    ) {
        for a in &offers {
            for b in &offers {
                let ab = key.compare(a, b);
                let ba = key.compare(b, a);
                prop_assert_eq!(ab, ba.reverse(), "asymmetry for ids {} and {}", a.id, b.id);
                if a.id == b.id {
                    prop_assert_eq!(ab, Ordering::Equal);
                } else {
                    prop_assert_ne!(ab, Ordering::Equal, "distinct ids must not tie");
                }
            }
        }
    }

    #[test]
    fn every_filter_mutation_resets_to_page_one(
        page in 2u32..=5,
        key in prop::sample::select(SortKey::ALL.to_vec()),
    ) {
        let options = vec!["음식".to_string(), "카페".to_string(), "생활".to_string()];
        let mut filter = ListFilter::new(options.clone(), options.clone(), options, 9);
        filter.page_mut().set_total_pages(9);

        prop_assert!(filter.page_mut().set_page(page));
        filter.toggle(FacetKind::BenefitType, "카페");
        prop_assert_eq!(filter.page().current(), 1);

        prop_assert!(filter.page_mut().set_page(page));
        filter.set_sort(key);
        prop_assert_eq!(filter.page().current(), 1);

        prop_assert!(filter.page_mut().set_page(page));
        filter.clear_facet(FacetKind::BenefitType);
        prop_assert_eq!(filter.page().current(), 1);
    }

    #[test]
    fn the_all_filter_matches_every_offer(mut candidate in offer_strategy()) {
        candidate.category = "미등록분류".to_string();
        candidate.organization_tags = vec!["미등록단체".to_string()];

        let filter = ListFilter::new(
            vec!["총학생회".to_string()],
            vec!["음식".to_string()],
            vec!["할인".to_string()],
            9,
        );
        prop_assert!(filter.matches(&candidate));
    }

    #[test]
    fn subset_matching_needs_an_intersection(
        selected in prop::sample::select(vec!["음식", "카페", "생활"]),
        offered in prop::sample::select(vec!["음식", "카페", "생활", "문화"]),
    ) {
        let options: Vec<String> = ["음식", "카페", "생활", "문화"]
            .iter()
            .map(ToString::to_string)
            .collect();
        let mut filter = ListFilter::new(Vec::new(), options, Vec::new(), 9);
        filter.toggle(FacetKind::Category, selected);

        let mut candidate = offer(1);
        candidate.category = offered.to_string();
        prop_assert_eq!(filter.matches(&candidate), selected == offered);
    }
}
