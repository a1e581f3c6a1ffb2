//! HTTP client for the partnership backend.
//!
//! Wraps `reqwest` with the backend's endpoint layout and maps every
//! response through [`crate::api::map`] so callers only ever see canonical
//! view-models. Transport failures, non-2xx statuses, and bodies that fail
//! to parse all surface as [`crate::error::CatalogError`]; the listing flow
//! turns any of them into an empty snapshot.

use std::time::Duration;

use reqwest::{Client, Url};
use serde_json::Value;

use crate::api::map;
use crate::api::review::ReviewDraft;
use crate::catalog::ListQuery;
use crate::error::{ApiErrorKind, CatalogError, Result};
use crate::model::{OfferDetail, OfferPage, ReviewSummary, StorePage};

/// Client for the partnership REST backend.
///
/// Use [`ApiClient::new`] with the configured base URL; tests point
/// [`ApiClient::new`] at a wiremock server instead.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: Url,
}

impl ApiClient {
    /// Creates a client rooted at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns an API error when the HTTP client cannot be constructed or
    /// `base_url` does not parse as an absolute URL.
    pub fn new(base_url: &str, timeout_secs: u64) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("campus-partners/0.1")
            .build()
            .map_err(|e| CatalogError::transport("building HTTP client", e.to_string()))?;

        // Exactly one trailing slash so joined paths extend the base path
        // instead of replacing its last segment.
        let normalized = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalized).map_err(|e| {
            CatalogError::api(
                format!("parsing base URL '{base_url}'"),
                ApiErrorKind::InvalidUrl(e.to_string()),
            )
        })?;

        Ok(Self { client, base_url })
    }

    /// The API origin, used for rebasing relative image paths.
    #[must_use]
    pub fn origin(&self) -> &Url {
        &self.base_url
    }

    /// Fetches one listing page under the given filter snapshot.
    ///
    /// Every facet parameter is always present on the wire; the empty
    /// string means "no filter" for that facet.
    ///
    /// # Errors
    ///
    /// Transport failure, non-2xx status, or a body that is not JSON.
    pub async fn list_offers(&self, query: &ListQuery) -> Result<OfferPage> {
        let url = self.listing_url(query)?;
        let body = self.request_json(&url).await?;
        Ok(map::offer_page(&body, Some(&self.base_url)))
    }

    /// Fetches the inform tab of one offer.
    ///
    /// # Errors
    ///
    /// Transport failure, non-2xx status, or a body that is not JSON.
    pub async fn offer_detail(&self, id: u64) -> Result<OfferDetail> {
        let url = self.endpoint(&["partnership-info", "detail", &id.to_string(), "inform"])?;
        let body = self.request_json(&url).await?;
        Ok(map::offer_detail(&body))
    }

    /// Fetches the review tab of one offer.
    ///
    /// # Errors
    ///
    /// Transport failure, non-2xx status, or a body that is not JSON.
    pub async fn offer_reviews(&self, id: u64) -> Result<ReviewSummary> {
        let url = self.endpoint(&["partnership-info", "detail", &id.to_string(), "review"])?;
        let body = self.request_json(&url).await?;
        Ok(map::review_summary(&body, id, Some(&self.base_url)))
    }

    /// Fetches one page of a partnership's store branches.
    ///
    /// # Errors
    ///
    /// Transport failure, non-2xx status, or a body that is not JSON.
    pub async fn store_list(&self, store_id: u64, page: u32) -> Result<StorePage> {
        let mut url = self.endpoint(&["store-info", &store_id.to_string()])?;
        url.query_pairs_mut().append_pair("page", &page.to_string());
        let body = self.request_json(&url).await?;
        Ok(map::store_page(&body))
    }

    /// Submits a review draft for `offer_id` as a multipart form.
    ///
    /// The draft is validated locally first: an invalid draft returns the
    /// validation error without any request being sent.
    ///
    /// # Errors
    ///
    /// Review validation failure, transport failure, or non-2xx status.
    pub async fn post_review(&self, offer_id: u64, draft: &ReviewDraft) -> Result<()> {
        let form = draft.to_form()?;
        let url = self.endpoint(&[
            "partnership-info",
            "detail",
            &offer_id.to_string(),
            "review",
            "post",
        ])?;
        let response = self
            .client
            .post(url.clone())
            .multipart(form)
            .send()
            .await
            .map_err(|e| CatalogError::transport(url.to_string(), e.to_string()))?;
        response.error_for_status().map_err(|e| {
            CatalogError::status(url.to_string(), e.status().map_or(0, |s| s.as_u16()))
        })?;
        Ok(())
    }

    fn listing_url(&self, query: &ListQuery) -> Result<Url> {
        let mut url = self.endpoint(&["partnership-info"])?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("organization", &query.organization);
            pairs.append_pair("category", &query.category);
            pairs.append_pair("type", &query.benefit_type);
            pairs.append_pair("sort", query.sort);
            pairs.append_pair("page", &query.page.to_string());
        }
        Ok(url)
    }

    /// Appends percent-encoded path segments to the base URL.
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| {
                CatalogError::api(
                    "building request URL",
                    ApiErrorKind::InvalidUrl("base URL cannot be a base".to_string()),
                )
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Sends a GET, asserts a 2xx status, and parses the body as JSON.
    async fn request_json(&self, url: &Url) -> Result<Value> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| CatalogError::transport(url.to_string(), e.to_string()))?;
        let response = response.error_for_status().map_err(|e| {
            CatalogError::status(url.to_string(), e.status().map_or(0, |s| s.as_u16()))
        })?;
        let body = response
            .text()
            .await
            .map_err(|e| CatalogError::transport(url.to_string(), e.to_string()))?;
        serde_json::from_str(&body)
            .map_err(|e| CatalogError::malformed(url.to_string(), e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client(base_url: &str) -> ApiClient {
        ApiClient::new(base_url, 30).expect("client construction should not fail")
    }

    fn query() -> ListQuery {
        ListQuery {
            organization: String::new(),
            category: "음식,카페".to_string(),
            benefit_type: String::new(),
            sort: "popular",
            page: 2,
        }
    }

    #[test]
    fn listing_url_keeps_empty_facets_on_the_wire() {
        let client = test_client("https://api.example.edu");
        let url = client.listing_url(&query()).unwrap();
        assert!(url.as_str().starts_with("https://api.example.edu/partnership-info?"));
        assert!(url.as_str().contains("organization=&"));
        assert!(url.as_str().contains("sort=popular"));
        assert!(url.as_str().contains("page=2"));
    }

    #[test]
    fn listing_url_percent_encodes_tags() {
        let client = test_client("https://api.example.edu");
        let url = client.listing_url(&query()).unwrap();
        let decoded: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        assert!(decoded.contains(&("category".to_string(), "음식,카페".to_string())));
    }

    #[test]
    fn endpoint_joins_segments_without_double_slashes() {
        let client = test_client("https://api.example.edu/");
        let url = client.endpoint(&["partnership-info", "detail", "42", "inform"]).unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.example.edu/partnership-info/detail/42/inform"
        );
    }

    #[test]
    fn base_path_prefixes_are_preserved() {
        let client = test_client("https://host.example.edu/api/v1");
        let url = client.endpoint(&["store-info", "7"]).unwrap();
        assert_eq!(url.as_str(), "https://host.example.edu/api/v1/store-info/7");
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        assert!(ApiClient::new("not a url", 5).is_err());
    }
}
