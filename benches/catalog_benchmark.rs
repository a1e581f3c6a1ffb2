//! Performance benchmarks for the catalog engine.
//!
//! Run with: cargo bench --bench catalog_benchmark
//!
//! Covers the hot paths of the client-filtered mode: response normalization,
//! facet matching, sorting, and page slicing. All inputs are synthetic and
//! deterministic so runs are comparable.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::hint::black_box;

use campus_partners::api::map;
use campus_partners::catalog::{slice_for_page, FacetKind, ListFilter, SortKey};
use campus_partners::model::Offer;
use chrono::NaiveDate;
use reqwest::Url;
use serde_json::json;

const CATEGORIES: [&str; 5] = ["음식", "카페", "생활", "문화", "헬스"];
const ORGANIZATIONS: [&str; 3] = ["총학생회", "공과대학", "경영대학"];

/// Deterministic synthetic catalog of `count` offers.
fn generate_offers(count: usize) -> Vec<Offer> {
    (0..count)
        .map(|i| Offer {
            id: i as u64 + 1,
            title: format!("제휴 혜택 {}", i + 1),
            merchant_name: format!("매장 {}", i % 40),
            image_url: String::new(),
            category: CATEGORIES[i % CATEGORIES.len()].to_string(),
            organization_tags: vec![ORGANIZATIONS[i % ORGANIZATIONS.len()].to_string()],
            benefit_type_tags: vec!["할인".to_string()],
            view_count: (i as u64 * 37) % 9973,
            discount_percent: ((i * 7) % 61) as u8,
            deadline_text: "2026-05-31".to_string(),
            deadline: NaiveDate::from_ymd_opt(2026, 1 + (i % 12) as u32, 1 + (i % 28) as u32),
            is_featured: false,
        })
        .collect()
}

fn vocab_filter() -> ListFilter {
    ListFilter::new(
        ORGANIZATIONS.iter().map(ToString::to_string).collect(),
        CATEGORIES.iter().map(ToString::to_string).collect(),
        vec!["할인".to_string(), "증정".to_string()],
        9,
    )
}

/// A raw listing response in the backend's current shape.
fn listing_body(count: usize) -> serde_json::Value {
    let items: Vec<serde_json::Value> = (0..count)
        .map(|i| {
            json!({
                "id": i + 1,
                "content": format!("제휴 혜택 {}", i + 1),
                "storeName": format!("매장 {}", i % 40),
                "url": "/files/offer.jpg",
                "category": CATEGORIES[i % CATEGORIES.len()],
                "organization": [ORGANIZATIONS[i % ORGANIZATIONS.len()]],
                "type": "할인",
                "viewCount": (i * 37) % 9973,
                "discount": format!("{}%", (i * 7) % 61),
                "deadline": "2026-05-31"
            })
        })
        .collect();
    json!({
        "top3": items.iter().take(3).cloned().collect::<Vec<_>>(),
        "sort": items,
        "pageAmount": 5
    })
}

fn bench_normalize_listing(c: &mut Criterion) {
    let origin = Url::parse("https://api.example.edu/").expect("static URL parses");
    let mut group = c.benchmark_group("normalize_listing");

    for size in [9, 100, 500] {
        let body = listing_body(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &body, |b, body| {
            b.iter(|| {
                let page = map::offer_page(black_box(body), Some(&origin));
                black_box(page);
            })
        });
    }

    group.finish();
}

fn bench_facet_matching(c: &mut Criterion) {
    let offers = generate_offers(1000);
    let mut filter = vocab_filter();
    filter.toggle(FacetKind::Category, "카페");
    filter.toggle(FacetKind::Category, "문화");
    filter.toggle(FacetKind::Organization, "총학생회");

    c.bench_function("facet_matching_1000", |b| {
        b.iter(|| {
            let hits = offers.iter().filter(|o| filter.matches(black_box(o))).count();
            black_box(hits);
        })
    });
}

fn bench_sort_keys(c: &mut Criterion) {
    let offers = generate_offers(1000);
    let mut group = c.benchmark_group("sort_1000");

    for key in SortKey::ALL {
        group.bench_function(key.wire(), |b| {
            b.iter(|| {
                let mut items = offers.clone();
                key.sort(&mut items);
                black_box(items);
            })
        });
    }

    group.finish();
}

fn bench_encode(c: &mut Criterion) {
    let mut filter = vocab_filter();
    filter.toggle(FacetKind::Category, "카페");
    filter.toggle(FacetKind::Category, "음식");
    filter.toggle(FacetKind::BenefitType, "할인");
    filter.set_sort(SortKey::DiscountDesc);

    c.bench_function("encode_query", |b| {
        b.iter(|| {
            black_box(filter.encode());
        })
    });
}

fn bench_page_slicing(c: &mut Criterion) {
    let offers = generate_offers(10_000);

    c.bench_function("slice_all_pages_10000", |b| {
        b.iter(|| {
            let mut shown = 0;
            for page in 1..=1112 {
                shown += slice_for_page(black_box(&offers), page, 9).len();
            }
            black_box(shown);
        })
    });
}

criterion_group!(
    benches,
    bench_normalize_listing,
    bench_facet_matching,
    bench_sort_keys,
    bench_encode,
    bench_page_slicing,
);

criterion_main!(benches);
