//! Offer detail and review payloads.

use serde::{Deserialize, Serialize};

/// Full description of one offer, from the detail endpoint.
///
/// Period fields stay as the pre-formatted strings the server sends
/// (`25.07.03` style); the detail view renders them verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OfferDetail {
    /// Who the offer applies to (students, staff, ...).
    pub target: String,
    /// Benefit kind as free text.
    pub benefit_type: String,
    /// First day the offer can be claimed.
    pub sale_start: String,
    /// Last day the offer can be claimed.
    pub sale_end: String,
    /// First day a claimed benefit can be used.
    pub use_start: String,
    /// Last day a claimed benefit can be used.
    pub use_end: String,
    /// Free-form usage note from the partner.
    pub note: String,
}

/// One published review on an offer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewEntry {
    /// Review body text.
    pub text: String,
    /// Absolute photo URLs attached to the review.
    pub photo_urls: Vec<String>,
}

/// The review tab payload for one offer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewSummary {
    /// Header image for the review tab (offer image).
    pub image_url: String,
    /// Server-generated digest of recent reviews, empty when absent.
    pub digest: String,
    /// Individual reviews, newest first as the server orders them.
    pub entries: Vec<ReviewEntry>,
}

impl ReviewSummary {
    /// Whether there is anything to render beyond the header.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.digest.is_empty() && self.entries.is_empty()
    }
}
