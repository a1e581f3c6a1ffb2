//! Bundled sample catalog for running without a backend.
//!
//! `browse --sample` and the one-shot commands' `--sample` flag serve these
//! fixtures instead of calling the API. Listing pages are produced through
//! the same filter, sort, and slice code as a real client-side listing, so
//! the whole filter engine is exercisable offline.

use chrono::NaiveDate;

use crate::api::map;
use crate::catalog::{slice_for_page, total_pages, ListFilter};
use crate::model::{
    HoursRange, Offer, OfferDetail, OfferPage, ReviewEntry, ReviewSummary, Store, StorePage,
};

#[allow(clippy::too_many_arguments)]
fn offer(
    id: u64,
    title: &str,
    merchant: &str,
    category: &str,
    organization: &str,
    benefit: &str,
    views: u64,
    discount: u8,
    deadline: &str,
    featured: bool,
) -> Offer {
    Offer {
        id,
        title: title.to_string(),
        merchant_name: merchant.to_string(),
        image_url: map::placeholder_image(id),
        category: category.to_string(),
        organization_tags: vec![organization.to_string()],
        benefit_type_tags: vec![benefit.to_string()],
        view_count: views,
        discount_percent: discount,
        deadline_text: deadline.to_string(),
        deadline: NaiveDate::parse_from_str(deadline, "%Y-%m-%d").ok(),
        is_featured: featured,
    }
}

/// The full sample offer list. The first three are the featured strip.
#[must_use]
pub fn sample_offers() -> Vec<Offer> {
    vec![
        offer(1, "파스타 세트 25% 할인", "삼성점", "음식", "총학생회", "할인", 1200, 25, "2026-09-30", true),
        offer(2, "런치 뷔페 20% 할인", "송파점", "음식", "총학생회", "할인", 980, 20, "2026-09-25", true),
        offer(3, "시그니처 라떼 1+1", "연남점", "카페", "공과대학", "증정", 1510, 10, "2026-09-22", true),
        offer(4, "베이커리 전품목 12% 할인", "성심당", "생활", "총학생회", "할인", 410, 12, "2026-10-10", false),
        offer(5, "아메리카노 사이즈업", "문과관", "카페", "인문대학", "증정", 820, 18, "2026-10-02", false),
        offer(6, "기획전 입장권 5% 할인", "미술관", "문화", "동아리연합회", "할인", 300, 5, "2026-09-25", false),
        offer(7, "문구류 14% 할인", "정문점", "생활", "총학생회", "할인", 520, 14, "2026-09-29", false),
        offer(8, "치킨 세트 22% 할인", "상도점", "음식", "공과대학", "이벤트", 770, 22, "2026-09-28", false),
        offer(9, "디저트 증정 이벤트", "충무로", "카페", "인문대학", "증정", 640, 16, "2026-10-01", false),
        offer(10, "영화 관람권 8% 할인", "홍대점", "문화", "동아리연합회", "할인", 210, 8, "2026-09-21", false),
        offer(11, "세탁 서비스 12% 할인", "역곡점", "생활", "총학생회", "할인", 430, 12, "2026-09-27", false),
        offer(12, "학식 제휴 28% 할인", "성의관", "음식", "총학생회", "할인", 1110, 28, "상시", false),
    ]
}

/// One listing page of the sample catalog under `filter`, produced by the
/// client-side path: facet match, comparator sort, page slice.
#[must_use]
pub fn sample_page(filter: &ListFilter) -> OfferPage {
    let offers = sample_offers();
    let featured: Vec<Offer> = offers
        .iter()
        .filter(|o| o.is_featured)
        .take(3)
        .cloned()
        .collect();

    let mut items: Vec<Offer> = offers
        .into_iter()
        .filter(|o| !o.is_featured)
        .filter(|o| filter.matches(o))
        .collect();
    filter.sort().sort(&mut items);

    let page_size = filter.page().page_size();
    let pages = total_pages(items.len(), page_size);
    let current = slice_for_page(&items, filter.page().current(), page_size).to_vec();
    OfferPage {
        featured,
        items: current,
        total_pages: pages,
    }
}

/// Sample inform payload for any offer id.
#[must_use]
pub fn sample_detail(_id: u64) -> OfferDetail {
    OfferDetail {
        target: "대학(원) 재/휴학생, 교직원".to_string(),
        benefit_type: "할인".to_string(),
        sale_start: "26.07.03".to_string(),
        sale_end: "26.12.23".to_string(),
        use_start: "26.07.04".to_string(),
        use_end: "26.12.24".to_string(),
        note: "학생증 또는 모바일 신분증 제시 후 적용".to_string(),
    }
}

/// Sample review feed for any offer id.
#[must_use]
pub fn sample_reviews(id: u64) -> ReviewSummary {
    ReviewSummary {
        image_url: map::placeholder_image(id),
        digest: String::new(),
        entries: vec![ReviewEntry {
            text: "재학생 확인 후 바로 적용해 주셨어요.".to_string(),
            photo_urls: Vec::new(),
        }],
    }
}

#[allow(clippy::too_many_arguments)]
fn store(
    id: u64,
    name: &str,
    phone: &str,
    email: &str,
    address: &str,
    open: &str,
    close: &str,
    parking: bool,
) -> Store {
    Store {
        id,
        name: name.to_string(),
        category: String::new(),
        phone: phone.to_string(),
        email: email.to_string(),
        address: address.to_string(),
        hours: Some(HoursRange {
            open: open.to_string(),
            close: close.to_string(),
        }),
        has_parking: parking,
    }
}

/// The full sample branch list.
#[must_use]
pub fn sample_stores() -> Vec<Store> {
    vec![
        store(1, "문과관카페", "02-123-4567", "cafe@uni.kr", "가대 문과관 1층", "09:00", "19:00", false),
        store(2, "홍대이탈리안", "02-223-1234", "italy@food.kr", "역곡로 12", "11:00", "22:00", true),
        store(3, "성심당", "02-331-0000", "bakery@shop.kr", "신관 앞", "08:00", "20:00", false),
        store(4, "연남디저트", "02-991-1199", "dessert@cake.kr", "정문 골목", "10:00", "21:00", false),
        store(5, "미술관", "02-555-2222", "art@museum.kr", "후문 맞은편", "10:00", "18:00", true),
        store(6, "상도카페", "02-444-7777", "sangdo@cafe.kr", "상도동 45", "09:30", "20:30", false),
        store(7, "정문분식", "02-888-9999", "bunsik@shop.kr", "정문앞", "10:30", "21:00", false),
        store(8, "교내문구", "02-321-2221", "stationery@uni.kr", "학생회관 1층", "09:00", "18:00", false),
        store(9, "영화관", "02-100-2000", "cinema@film.kr", "역곡역 3번출구", "12:00", "24:00", true),
        store(10, "충무로카페", "02-712-8888", "chung@cafe.kr", "충무로 12", "08:30", "19:30", false),
    ]
}

/// One page of the sample branch list.
#[must_use]
pub fn sample_store_page(page: u32, page_size: u32) -> StorePage {
    let stores = sample_stores();
    let pages = total_pages(stores.len(), page_size);
    StorePage {
        items: slice_for_page(&stores, page, page_size).to_vec(),
        total_pages: pages,
    }
}
