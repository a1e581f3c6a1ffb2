//! Canonical data model for the partnership catalog.
//!
//! Backend responses arrive in several historical shapes; everything in this
//! module is the normalized, shape-independent form produced by
//! [`crate::api::map`]. Snapshots are immutable: a new fetch replaces the
//! prior list wholesale, nothing is patched in place.

mod detail;
mod offer;
mod store;

pub use detail::{OfferDetail, ReviewEntry, ReviewSummary};
pub use offer::{Offer, OfferPage};
pub use store::{HoursRange, Store, StorePage};
