//! Partner store branches and the branch-listing snapshot.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Daily opening hours as the server formats them (e.g. `09:00` to `21:30`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HoursRange {
    /// Opening time text.
    pub open: String,
    /// Closing time text.
    pub close: String,
}

impl fmt::Display for HoursRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ~ {}", self.open, self.close)
    }
}

/// A physical branch of a partner business.
///
/// Contact fields drift across backend versions; the mapper resolves the
/// drift so consumers always read [`Store::phone`] regardless of which key
/// the server used.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Store {
    /// Branch identifier within the partner business.
    pub id: u64,
    /// Branch display name.
    pub name: String,
    /// Business category of the branch.
    pub category: String,
    /// Contact phone number, empty when the server sent none.
    pub phone: String,
    /// Contact email, empty when the server sent none.
    pub email: String,
    /// Street address.
    pub address: String,
    /// Opening hours, when published.
    pub hours: Option<HoursRange>,
    /// Whether the branch advertises parking.
    pub has_parking: bool,
}

/// One page of branch results for a partner business.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorePage {
    /// Branches for the requested page.
    pub items: Vec<Store>,
    /// Total page count reported by the server; never below one.
    pub total_pages: u32,
}

impl StorePage {
    /// Snapshot used after a failed fetch: no rows, a single page.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            total_pages: 1,
        }
    }
}
