//! Integration tests for `ApiClient` using wiremock HTTP mocks.
//!
//! Covers the wire contract (every facet parameter always present, paths per
//! endpoint, multipart review encoding), the error taxonomy, and the rule
//! that local validation failures never produce a request.

use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use campus_partners::api::{ApiClient, Attachment, ReviewDraft};
use campus_partners::catalog::{FacetKind, ListFilter, SortKey};
use campus_partners::error::{ApiErrorKind, CatalogError};

fn test_client(base_url: &str) -> ApiClient {
    ApiClient::new(base_url, 30).expect("client construction should not fail")
}

fn campus_filter() -> ListFilter {
    ListFilter::new(
        vec!["총학생회".to_string(), "공과대학".to_string()],
        vec!["음식".to_string(), "카페".to_string()],
        vec!["할인".to_string(), "증정".to_string()],
        9,
    )
}

fn valid_draft() -> ReviewDraft {
    let mut draft = ReviewDraft::new();
    draft.set_text("재학생 확인 후 바로 할인받았습니다.");
    draft.set_receipt(Attachment::from_bytes("receipt.jpg", vec![0xFF, 0xD8, 0xFF]));
    draft
}

#[tokio::test]
async fn listing_request_carries_every_facet_param() {
    let server = MockServer::start().await;

    let body = json!({
        "top3": [{ "id": 1, "content": "featured", "hot": true }],
        "sort": [
            { "id": 2, "content": "카페 할인", "category": "카페", "viewCount": 10 },
            { "id": 3, "content": "음식 할인", "category": "음식", "viewCount": 4 }
        ],
        "pageAmount": 4
    });

    // The empty organization and benefit-type params must still be on the
    // wire; the backend treats an absent param differently from "no filter".
    Mock::given(method("GET"))
        .and(path("/partnership-info"))
        .and(query_param("organization", ""))
        .and(query_param("category", "카페"))
        .and(query_param("type", ""))
        .and(query_param("sort", "popular"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let mut filter = campus_filter();
    filter.toggle(FacetKind::Category, "카페");
    filter.set_sort(SortKey::PopularityDesc);
    filter.page_mut().set_total_pages(4);
    assert!(filter.page_mut().set_page(2));

    let client = test_client(&server.uri());
    let page = client
        .list_offers(&filter.encode())
        .await
        .expect("listing should parse");

    assert_eq!(page.featured.len(), 1);
    assert!(page.featured[0].is_featured);
    assert_eq!(page.items.len(), 2);
    assert_eq!(page.items[0].title, "카페 할인");
    assert_eq!(page.total_pages, 4);
}

#[tokio::test]
async fn detail_and_reviews_use_their_tab_endpoints() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/partnership-info/detail/42/inform"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&json!({
            "target": "재학생",
            "type": "할인",
            "saleStartDate": "25.07.03",
            "saleEndDate": "25.07.23",
            "note": "학생증 지참"
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/partnership-info/detail/42/review"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&json!({
            "summary": "대체로 만족",
            "items": [
                { "text": "좋아요", "photoUrl": ["/p/1.jpg"] },
                { "text": "보통" }
            ]
        })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());

    let detail = client.offer_detail(42).await.expect("detail should parse");
    assert_eq!(detail.target, "재학생");
    assert_eq!(detail.sale_end, "25.07.23");
    assert_eq!(detail.note, "학생증 지참");

    let reviews = client.offer_reviews(42).await.expect("reviews should parse");
    assert_eq!(reviews.digest, "대체로 만족");
    assert_eq!(reviews.entries.len(), 2);
    // Relative photo paths come back rebased onto the mock server's origin.
    assert!(reviews.entries[0].photo_urls[0].starts_with(&server.uri()));
}

#[tokio::test]
async fn store_listing_pages_through_the_query_param() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/store-info/7"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&json!({
            "storeList": [
                { "storeId": 11, "storeName": "정문점", "openTime": "09:00", "closeTime": "21:00" },
                { "storeName": "후문점" }
            ],
            "pageAmount": 3
        })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let page = client.store_list(7, 2).await.expect("stores should parse");

    assert_eq!(page.items.len(), 2);
    assert_eq!(page.items[0].id, 11);
    assert_eq!(page.items[0].name, "정문점");
    assert_eq!(page.total_pages, 3);
}

#[tokio::test]
async fn http_error_statuses_surface_as_status_errors() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/partnership-info"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client
        .list_offers(&campus_filter().encode())
        .await
        .expect_err("a 502 must not map to a page");

    assert!(err.is_api_failure());
    assert!(matches!(
        err,
        CatalogError::Api {
            source: ApiErrorKind::Status(502),
            ..
        }
    ));
}

#[tokio::test]
async fn non_json_bodies_are_malformed_errors() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/partnership-info/detail/3/inform"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client.offer_detail(3).await.expect_err("HTML is not a detail payload");

    assert!(matches!(
        err,
        CatalogError::Api {
            source: ApiErrorKind::Malformed(_),
            ..
        }
    ));
}

#[tokio::test]
async fn unreachable_backend_is_a_transport_error() {
    // Grab a port nobody is listening on by binding and dropping a listener.
    // Dropping a wiremock server does not free its port: the server returns
    // to the crate's process-wide pool and keeps answering (with 404s).
    let uri = {
        let listener =
            std::net::TcpListener::bind("127.0.0.1:0").expect("binding a throwaway port");
        let port = listener.local_addr().expect("listener has an address").port();
        format!("http://127.0.0.1:{port}")
    };

    let client = test_client(&uri);
    let err = client
        .offer_reviews(1)
        .await
        .expect_err("nothing listens on the dropped port");

    assert!(err.is_api_failure());
    assert!(matches!(
        err,
        CatalogError::Api {
            source: ApiErrorKind::Transport(_),
            ..
        }
    ));
}

#[tokio::test]
async fn review_submission_posts_a_multipart_form() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/partnership-info/detail/5/review/post"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let mut draft = valid_draft();
    draft.set_photo(0, Attachment::from_bytes("menu.png", vec![0x89, b'P', b'N', b'G']));

    let client = test_client(&server.uri());
    client.post_review(5, &draft).await.expect("submission should succeed");

    let requests = server
        .received_requests()
        .await
        .expect("request recording is enabled");
    assert_eq!(requests.len(), 1);

    let content_type = requests[0]
        .headers
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    assert!(content_type.starts_with("multipart/form-data"), "got {content_type}");

    let body = String::from_utf8_lossy(&requests[0].body);
    assert!(body.contains("name=\"text\""));
    assert!(body.contains("재학생 확인 후 바로 할인받았습니다."));
    assert!(body.contains("name=\"receiptFile\""));
    assert!(body.contains("filename=\"receipt.jpg\""));
    assert!(body.contains("name=\"photoFiles\""));
    assert!(body.contains("filename=\"menu.png\""));
}

#[tokio::test]
async fn rejected_submissions_surface_the_status() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/partnership-info/detail/5/review/post"))
        .respond_with(ResponseTemplate::new(413))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client
        .post_review(5, &valid_draft())
        .await
        .expect_err("a 413 must surface");

    assert!(matches!(
        err,
        CatalogError::Api {
            source: ApiErrorKind::Status(413),
            ..
        }
    ));
}

#[tokio::test]
async fn invalid_drafts_never_reach_the_network() {
    let server = MockServer::start().await;

    // Zero expected requests: the draft fails validation locally and the
    // mock server must stay untouched. Verified when the server drops.
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let mut draft = ReviewDraft::new();
    draft.set_text("영수증 없이 쓴 후기");

    let client = test_client(&server.uri());
    let err = client
        .post_review(5, &draft)
        .await
        .expect_err("a draft without a receipt is invalid");

    assert!(!err.is_api_failure(), "validation failures are local: {err}");
    assert!(err.to_string().contains("Review rejected"));
}
