//! Normalization of backend records into canonical view-models.
//!
//! The backend has shipped more than one record shape over time (ids under
//! `id`, `partnershipId`, or `storeId`; phone numbers under `number`,
//! `phoneNumber`, or `Number`; images under `partnershipImageUrl` or `url`).
//! Every candidate-key lookup lives in this module and nowhere else, and
//! each observed shape is pinned by a fixture test below.
//!
//! Mapping never fails. Malformed or missing fields degrade field by field:
//! strings go empty, counters go to zero, a record without any id gets a
//! synthetic one from its list position, and a record without a usable image
//! gets a deterministic placeholder keyed by its id.

use chrono::NaiveDate;
use reqwest::Url;
use serde_json::Value;

use crate::model::{
    HoursRange, Offer, OfferDetail, OfferPage, ReviewEntry, ReviewSummary, Store, StorePage,
};

const OFFER_ID_KEYS: &[&str] = &["id", "partnershipId", "storeId"];
const STORE_ID_KEYS: &[&str] = &["storeId", "id"];
const PHONE_KEYS: &[&str] = &["number", "phoneNumber", "Number"];
const IMAGE_KEYS: &[&str] = &["partnershipImageUrl", "url", "img"];
const DEADLINE_KEYS: &[&str] = &["deadline", "expireAt", "partnershipDeadline"];

/// Maps a whole listing response: `top3` becomes the featured strip, `sort`
/// (the current page's items, despite the name) becomes the grid, and
/// `pageAmount` the page count. Missing arrays map to empty lists.
#[must_use]
pub fn offer_page(body: &Value, origin: Option<&Url>) -> OfferPage {
    let featured = array(body, "top3")
        .iter()
        .enumerate()
        .map(|(index, raw)| {
            let mut offer = map_offer(raw, index, 0, origin);
            offer.is_featured = true;
            offer
        })
        .collect();
    let items = array(body, "sort")
        .iter()
        .enumerate()
        .map(|(index, raw)| map_offer(raw, index, 0, origin))
        .collect();
    OfferPage {
        featured,
        items,
        total_pages: page_amount(body),
    }
}

/// Maps one raw offer record.
///
/// `index` and `id_offset` feed the synthetic id (`id_offset + index + 1`)
/// used when no id candidate is present; `origin` is the API base for
/// rebasing relative image paths.
#[must_use]
pub fn map_offer(raw: &Value, index: usize, id_offset: u64, origin: Option<&Url>) -> Offer {
    let id = resolve_id(raw, OFFER_ID_KEYS).unwrap_or(id_offset + index as u64 + 1);
    let deadline_text = first_str(raw, DEADLINE_KEYS);
    Offer {
        id,
        title: first_str(raw, &["content", "title"]),
        merchant_name: first_str(raw, &["storeName", "merchant", "name"]),
        image_url: resolve_image(raw, id, origin),
        category: first_str(raw, &["category"]),
        organization_tags: string_list(raw, "organization"),
        benefit_type_tags: string_list(raw, "type"),
        view_count: first_u64(raw, &["views", "viewCount"]),
        discount_percent: discount_percent(raw),
        deadline: parse_deadline(&deadline_text),
        deadline_text,
        is_featured: first_bool(raw, &["hot"]),
    }
}

/// Maps the detail endpoint's inform payload. Period fields are kept as the
/// pre-formatted strings the server sends.
#[must_use]
pub fn offer_detail(body: &Value) -> OfferDetail {
    OfferDetail {
        target: first_str(body, &["target"]),
        benefit_type: first_str(body, &["type"]),
        sale_start: first_str(body, &["saleStartDate"]),
        sale_end: first_str(body, &["saleEndDate"]),
        use_start: first_str(body, &["useStartDate"]),
        use_end: first_str(body, &["useEndDate"]),
        note: first_str(body, &["note"]),
    }
}

/// Maps the review tab payload. `offer_id` keys the header image placeholder
/// when the server sends no image.
#[must_use]
pub fn review_summary(body: &Value, offer_id: u64, origin: Option<&Url>) -> ReviewSummary {
    let entries = array(body, "items")
        .iter()
        .map(|raw| ReviewEntry {
            text: first_str(raw, &["text", "content"]),
            photo_urls: photo_urls(raw, origin),
        })
        .collect();
    ReviewSummary {
        image_url: resolve_image(body, offer_id, origin),
        digest: first_str(body, &["summary"]),
        entries,
    }
}

/// Maps a branch-listing response (`storeList` + `pageAmount`).
#[must_use]
pub fn store_page(body: &Value) -> StorePage {
    let items = array(body, "storeList")
        .iter()
        .enumerate()
        .map(|(index, raw)| map_store(raw, index))
        .collect();
    StorePage {
        items,
        total_pages: page_amount(body),
    }
}

/// Maps one raw store record.
#[must_use]
pub fn map_store(raw: &Value, index: usize) -> Store {
    Store {
        id: resolve_id(raw, STORE_ID_KEYS).unwrap_or(index as u64 + 1),
        name: first_str(raw, &["storeName", "name"]),
        category: first_str(raw, &["category", "type"]),
        phone: phone(raw),
        email: first_str(raw, &["email"]),
        address: first_str(raw, &["address"]),
        hours: hours(raw),
        has_parking: first_bool(raw, &["parking", "hasParking"]),
    }
}

/// First candidate key holding a non-negative integer or a numeric string.
fn resolve_id(raw: &Value, keys: &[&str]) -> Option<u64> {
    keys.iter().find_map(|key| match raw.get(*key) {
        Some(Value::Number(n)) => n.as_u64(),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    })
}

/// First candidate key holding a string; empty when none do.
fn first_str(raw: &Value, keys: &[&str]) -> String {
    keys.iter()
        .find_map(|key| raw.get(*key).and_then(Value::as_str))
        .filter(|s| !s.is_empty())
        .map_or_else(String::new, str::to_string)
}

fn first_u64(raw: &Value, keys: &[&str]) -> u64 {
    keys.iter()
        .find_map(|key| match raw.get(*key) {
            Some(Value::Number(n)) => n.as_u64(),
            Some(Value::String(s)) => s.trim().parse().ok(),
            _ => None,
        })
        .unwrap_or(0)
}

fn first_bool(raw: &Value, keys: &[&str]) -> bool {
    keys.iter()
        .find_map(|key| raw.get(*key).and_then(Value::as_bool))
        .unwrap_or(false)
}

/// A tag field that may arrive as a scalar or as a list. Null and empty
/// entries are dropped; order is preserved for display.
fn string_list(raw: &Value, key: &str) -> Vec<String> {
    match raw.get(key) {
        Some(Value::String(s)) if !s.is_empty() => vec![s.clone()],
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(Value::as_str)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect(),
        _ => Vec::new(),
    }
}

/// Discount may arrive as a number or as text like `"15%"`; anything else
/// counts as zero. Values above 100 are clamped.
fn discount_percent(raw: &Value) -> u8 {
    let value = ["discount", "benefit", "partnershipBenefit"]
        .iter()
        .find_map(|key| raw.get(*key))
        .cloned()
        .unwrap_or(Value::Null);
    let percent = match value {
        Value::Number(n) => n.as_u64().unwrap_or(0),
        Value::String(s) => digits_prefix(&s).unwrap_or(0),
        _ => 0,
    };
    u8::try_from(percent.min(100)).unwrap_or(100)
}

/// First contiguous run of ASCII digits anywhere in `s`.
fn digits_prefix(s: &str) -> Option<u64> {
    let start = s.find(|c: char| c.is_ascii_digit())?;
    let digits: String = s[start..]
        .chars()
        .take_while(char::is_ascii_digit)
        .collect();
    digits.parse().ok()
}

fn parse_deadline(text: &str) -> Option<NaiveDate> {
    const FORMATS: [&str; 3] = ["%Y-%m-%d", "%Y.%m.%d", "%y.%m.%d"];
    FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(text, fmt).ok())
}

/// Image URL resolution: absolute URLs pass through, relative paths are
/// rebased onto the API origin, everything else falls back to the
/// deterministic placeholder for `id`.
fn resolve_image(raw: &Value, id: u64, origin: Option<&Url>) -> String {
    let candidate = first_str(raw, IMAGE_KEYS);
    if candidate.is_empty() {
        return placeholder_image(id);
    }
    if candidate.starts_with("http://") || candidate.starts_with("https://") {
        return candidate;
    }
    match origin.and_then(|base| base.join(&candidate).ok()) {
        Some(url) => url.to_string(),
        None => placeholder_image(id),
    }
}

/// Placeholder card image; stable per id so re-fetches do not flicker.
#[must_use]
pub fn placeholder_image(id: u64) -> String {
    format!("https://picsum.photos/seed/partner-{id}/400/300")
}

fn photo_urls(raw: &Value, origin: Option<&Url>) -> Vec<String> {
    array(raw, "photoUrl")
        .iter()
        .filter_map(Value::as_str)
        .filter(|s| !s.is_empty())
        .filter_map(|s| {
            if s.starts_with("http://") || s.starts_with("https://") {
                Some(s.to_string())
            } else {
                origin
                    .and_then(|base| base.join(s).ok())
                    .map(|url| url.to_string())
            }
        })
        .collect()
}

fn hours(raw: &Value) -> Option<HoursRange> {
    let open = first_str(raw, &["openTime"]);
    let close = first_str(raw, &["closeTime"]);
    if open.is_empty() || close.is_empty() {
        None
    } else {
        Some(HoursRange { open, close })
    }
}

fn phone(raw: &Value) -> String {
    PHONE_KEYS
        .iter()
        .find_map(|key| match raw.get(*key) {
            Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
            Some(Value::Number(n)) => Some(n.to_string()),
            _ => None,
        })
        .unwrap_or_default()
}

fn array<'a>(body: &'a Value, key: &str) -> &'a [Value] {
    match body.get(key).and_then(Value::as_array) {
        Some(items) => items,
        None => &[],
    }
}

fn page_amount(body: &Value) -> u32 {
    body.get("pageAmount")
        .and_then(Value::as_u64)
        .map_or(1, |n| u32::try_from(n).unwrap_or(u32::MAX).max(1))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn origin() -> Url {
        Url::parse("https://api.example.edu/").unwrap()
    }

    #[test]
    fn current_shape_maps_every_field() {
        let raw = json!({
            "id": 42,
            "content": "아메리카노 15% 할인",
            "storeName": "연남커피",
            "partnershipImageUrl": "https://cdn.example.edu/42.jpg",
            "category": "카페",
            "organization": "총학생회",
            "type": "할인",
            "viewCount": 310,
            "discount": 15,
            "deadline": "2026-03-01"
        });
        let offer = map_offer(&raw, 0, 0, Some(&origin()));
        assert_eq!(offer.id, 42);
        assert_eq!(offer.title, "아메리카노 15% 할인");
        assert_eq!(offer.merchant_name, "연남커피");
        assert_eq!(offer.image_url, "https://cdn.example.edu/42.jpg");
        assert_eq!(offer.category, "카페");
        assert_eq!(offer.organization_tags, vec!["총학생회"]);
        assert_eq!(offer.benefit_type_tags, vec!["할인"]);
        assert_eq!(offer.view_count, 310);
        assert_eq!(offer.discount_percent, 15);
        assert_eq!(offer.deadline, NaiveDate::from_ymd_opt(2026, 3, 1));
        assert!(!offer.is_featured);
    }

    #[test]
    fn id_candidates_are_checked_in_order() {
        let partnership = json!({ "partnershipId": 7, "storeId": 9 });
        assert_eq!(map_offer(&partnership, 0, 0, None).id, 7);

        let store_only = json!({ "storeId": 9 });
        assert_eq!(map_offer(&store_only, 0, 0, None).id, 9);

        let preferred = json!({ "id": 3, "partnershipId": 7 });
        assert_eq!(map_offer(&preferred, 0, 0, None).id, 3);
    }

    #[test]
    fn numeric_string_ids_parse() {
        let raw = json!({ "id": "128" });
        assert_eq!(map_offer(&raw, 0, 0, None).id, 128);
    }

    #[test]
    fn missing_id_gets_synthetic_from_position() {
        let raw = json!({ "content": "x" });
        assert_eq!(map_offer(&raw, 4, 0, None).id, 5);
        assert_eq!(map_offer(&raw, 4, 100, None).id, 105);
    }

    #[test]
    fn null_id_falls_through_to_next_candidate() {
        let raw = json!({ "id": null, "partnershipId": "19" });
        assert_eq!(map_offer(&raw, 0, 0, None).id, 19);
    }

    #[test]
    fn relative_image_is_rebased_on_the_origin() {
        let raw = json!({ "id": 1, "url": "/files/a.jpg" });
        let offer = map_offer(&raw, 0, 0, Some(&origin()));
        assert_eq!(offer.image_url, "https://api.example.edu/files/a.jpg");
    }

    #[test]
    fn absolute_image_passes_through() {
        let raw = json!({ "id": 1, "partnershipImageUrl": "http://cdn.other.net/x.png" });
        let offer = map_offer(&raw, 0, 0, Some(&origin()));
        assert_eq!(offer.image_url, "http://cdn.other.net/x.png");
    }

    #[test]
    fn missing_image_uses_the_id_keyed_placeholder() {
        let raw = json!({ "id": 6 });
        let first = map_offer(&raw, 0, 0, None);
        let second = map_offer(&raw, 3, 50, None);
        assert_eq!(first.image_url, second.image_url);
        assert!(first.image_url.contains("partner-6"));
    }

    #[test]
    fn relative_image_without_origin_degrades_to_placeholder() {
        let raw = json!({ "id": 2, "url": "/files/a.jpg" });
        let offer = map_offer(&raw, 0, 0, None);
        assert_eq!(offer.image_url, placeholder_image(2));
    }

    #[test]
    fn null_and_empty_tags_are_dropped() {
        let raw = json!({ "id": 1, "organization": null, "type": "" });
        let offer = map_offer(&raw, 0, 0, None);
        assert!(offer.organization_tags.is_empty());
        assert!(offer.benefit_type_tags.is_empty());
    }

    #[test]
    fn list_valued_tags_are_accepted() {
        let raw = json!({ "id": 1, "organization": ["총학생회", "", "공과대학"] });
        let offer = map_offer(&raw, 0, 0, None);
        assert_eq!(offer.organization_tags, vec!["총학생회", "공과대학"]);
    }

    #[test]
    fn discount_text_and_overflow_are_handled() {
        assert_eq!(map_offer(&json!({ "id": 1, "discount": "15%" }), 0, 0, None).discount_percent, 15);
        assert_eq!(map_offer(&json!({ "id": 1, "discount": "최대 30% 할인" }), 0, 0, None).discount_percent, 30);
        assert_eq!(map_offer(&json!({ "id": 1, "discount": 250 }), 0, 0, None).discount_percent, 100);
        assert_eq!(map_offer(&json!({ "id": 1, "discount": "무료" }), 0, 0, None).discount_percent, 0);
        assert_eq!(map_offer(&json!({ "id": 1 }), 0, 0, None).discount_percent, 0);
    }

    #[test]
    fn unparseable_deadline_keeps_raw_text() {
        let raw = json!({ "id": 1, "deadline": "상시" });
        let offer = map_offer(&raw, 0, 0, None);
        assert_eq!(offer.deadline_text, "상시");
        assert!(offer.deadline.is_none());
    }

    #[test]
    fn dotted_deadline_formats_parse() {
        let raw = json!({ "id": 1, "deadline": "2026.03.01" });
        assert_eq!(
            map_offer(&raw, 0, 0, None).deadline,
            NaiveDate::from_ymd_opt(2026, 3, 1)
        );
    }

    #[test]
    fn listing_response_splits_featured_and_items() {
        let body = json!({
            "top3": [{ "id": 1, "content": "A" }],
            "sort": [{ "id": 2, "content": "B" }, { "id": 3, "content": "C" }],
            "pageAmount": 4
        });
        let page = offer_page(&body, None);
        assert_eq!(page.featured.len(), 1);
        assert!(page.featured[0].is_featured);
        assert_eq!(page.items.len(), 2);
        assert!(!page.items[0].is_featured);
        assert_eq!(page.total_pages, 4);
    }

    #[test]
    fn missing_arrays_and_page_amount_degrade() {
        let page = offer_page(&json!({}), None);
        assert!(page.is_empty());
        assert_eq!(page.total_pages, 1);

        let zero = offer_page(&json!({ "pageAmount": 0 }), None);
        assert_eq!(zero.total_pages, 1);
    }

    #[test]
    fn detail_fields_map_verbatim() {
        let body = json!({
            "target": "대학(원) 재/휴학생, 교직원",
            "type": "할인",
            "saleStartDate": "25.07.03",
            "saleEndDate": "25.07.23",
            "useStartDate": "25.07.04",
            "useEndDate": "25.07.24",
            "note": "구명조끼 + 입장권 32,000~"
        });
        let detail = offer_detail(&body);
        assert_eq!(detail.target, "대학(원) 재/휴학생, 교직원");
        assert_eq!(detail.benefit_type, "할인");
        assert_eq!(detail.sale_start, "25.07.03");
        assert_eq!(detail.use_end, "25.07.24");
        assert_eq!(detail.note, "구명조끼 + 입장권 32,000~");
    }

    #[test]
    fn review_summary_maps_entries_and_rebases_photos() {
        let body = json!({
            "partnershipImageUrl": "/imgs/head.jpg",
            "summary": "대체로 만족",
            "items": [
                { "text": "좋아요", "photoUrl": ["/p/1.jpg", "https://cdn.example.edu/2.jpg"] },
                { "text": "보통" }
            ]
        });
        let summary = review_summary(&body, 9, Some(&origin()));
        assert_eq!(summary.image_url, "https://api.example.edu/imgs/head.jpg");
        assert_eq!(summary.digest, "대체로 만족");
        assert_eq!(summary.entries.len(), 2);
        assert_eq!(
            summary.entries[0].photo_urls,
            vec![
                "https://api.example.edu/p/1.jpg",
                "https://cdn.example.edu/2.jpg"
            ]
        );
        assert!(summary.entries[1].photo_urls.is_empty());
        assert!(!summary.is_empty());
    }

    #[test]
    fn store_phone_drift_is_resolved_in_order() {
        assert_eq!(map_store(&json!({ "number": "02-123-4567" }), 0).phone, "02-123-4567");
        assert_eq!(map_store(&json!({ "phoneNumber": "02-111-2222" }), 0).phone, "02-111-2222");
        assert_eq!(map_store(&json!({ "Number": "02-333-4444" }), 0).phone, "02-333-4444");
        assert_eq!(map_store(&json!({ "number": 21234567 }), 0).phone, "21234567");
        assert_eq!(map_store(&json!({}), 0).phone, "");
    }

    #[test]
    fn store_hours_need_both_ends() {
        let both = map_store(&json!({ "openTime": "09:00", "closeTime": "21:00" }), 0);
        assert_eq!(both.hours.unwrap().to_string(), "09:00 ~ 21:00");

        let open_only = map_store(&json!({ "openTime": "09:00" }), 0);
        assert!(open_only.hours.is_none());
    }

    #[test]
    fn store_listing_maps_list_and_pages() {
        let body = json!({
            "storeList": [
                { "storeId": 1, "storeName": "문과관카페", "parking": true },
                { "storeName": "정문분식" }
            ],
            "pageAmount": 2
        });
        let page = store_page(&body);
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.items[0].id, 1);
        assert!(page.items[0].has_parking);
        assert_eq!(page.items[1].id, 2);
        assert!(!page.items[1].has_parking);
        assert_eq!(page.total_pages, 2);
    }
}
