//! Partnership offers and listing-page snapshots.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single partnership offer in its normalized form.
///
/// Every field is guaranteed present after mapping: missing identifiers drop
/// the record entirely, missing strings become empty, and missing images fall
/// back to a deterministic placeholder keyed by [`Offer::id`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Offer {
    /// Stable numeric identifier, also the detail-endpoint key.
    pub id: u64,
    /// Offer headline shown on the card.
    pub title: String,
    /// Partner business running the offer.
    pub merchant_name: String,
    /// Absolute card image URL (placeholder when the record had none).
    pub image_url: String,
    /// Business category, e.g. a food or cafe vocabulary entry.
    pub category: String,
    /// Student-organization affiliations, in server order.
    pub organization_tags: Vec<String>,
    /// Benefit kinds (discount, freebie, ...), in server order.
    pub benefit_type_tags: Vec<String>,
    /// Lifetime view counter used by the popularity ordering.
    pub view_count: u64,
    /// Headline discount in percent.
    pub discount_percent: u8,
    /// Deadline exactly as the server sent it, for display.
    pub deadline_text: String,
    /// Parsed deadline; `None` when the raw text did not parse.
    pub deadline: Option<NaiveDate>,
    /// Whether the server flagged this offer for the featured strip.
    pub is_featured: bool,
}

impl Offer {
    /// Card tags in display order: organization tags first, then benefit
    /// types. Empty entries never make it past the mapper, so this is
    /// render-ready as-is.
    pub fn display_tags(&self) -> impl Iterator<Item = &str> {
        self.organization_tags
            .iter()
            .chain(self.benefit_type_tags.iter())
            .map(String::as_str)
    }

    /// True when the offer belongs to `organization` (exact tag match).
    #[must_use]
    pub fn has_organization(&self, organization: &str) -> bool {
        self.organization_tags.iter().any(|t| t == organization)
    }

    /// True when the offer carries the benefit type `kind`.
    #[must_use]
    pub fn has_benefit_type(&self, kind: &str) -> bool {
        self.benefit_type_tags.iter().any(|t| t == kind)
    }
}

/// One page of listing results, replaced wholesale on every fetch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OfferPage {
    /// Featured strip shown above the grid (at most three entries).
    pub featured: Vec<Offer>,
    /// Offers for the requested page, already in requested order.
    pub items: Vec<Offer>,
    /// Total page count reported by the server; never below one.
    pub total_pages: u32,
}

impl OfferPage {
    /// The empty-but-valid snapshot used after a failed fetch: no rows,
    /// a single page, nothing stale left on screen.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            featured: Vec::new(),
            items: Vec::new(),
            total_pages: 1,
        }
    }

    /// Whether the page has nothing to show (featured strip included).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.featured.is_empty() && self.items.is_empty()
    }
}
