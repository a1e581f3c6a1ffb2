//! Facet selections and the listing filter state.
//!
//! A facet is one independent filter dimension (organization, category,
//! benefit type). Each facet is either the ALL sentinel ("no restriction")
//! or a non-empty explicit subset of its option vocabulary. The invariant is
//! enforced here, not in the widgets: an empty subset collapses back to ALL,
//! and so does a subset that covers every available option.

use indexmap::IndexSet;

use crate::catalog::{PageWindow, SortKey};
use crate::model::Offer;

/// Current selection of one facet.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FacetSelection {
    /// No restriction. Encodes as the empty string on the wire.
    #[default]
    All,
    /// Explicit non-empty subset, in selection order.
    Subset(IndexSet<String>),
}

/// One filter dimension: its option vocabulary plus the active selection.
///
/// The vocabulary is configuration (see `catalog.*` config keys) and defines
/// both the menu contents and the canonical encoding order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Facet {
    options: Vec<String>,
    selection: FacetSelection,
}

impl Facet {
    /// Builds a facet over `options` with nothing selected (ALL).
    #[must_use]
    pub fn new<I, S>(options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            options: options.into_iter().map(Into::into).collect(),
            selection: FacetSelection::All,
        }
    }

    /// The option vocabulary, in menu order.
    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    #[must_use]
    pub fn selection(&self) -> &FacetSelection {
        &self.selection
    }

    /// Whether the facet imposes no restriction.
    #[must_use]
    pub fn is_all(&self) -> bool {
        matches!(self.selection, FacetSelection::All)
    }

    /// Whether `tag` is currently part of an explicit subset.
    #[must_use]
    pub fn is_selected(&self, tag: &str) -> bool {
        match &self.selection {
            FacetSelection::All => false,
            FacetSelection::Subset(tags) => tags.contains(tag),
        }
    }

    /// Number of explicitly selected tags; zero under ALL.
    #[must_use]
    pub fn selected_count(&self) -> usize {
        match &self.selection {
            FacetSelection::All => 0,
            FacetSelection::Subset(tags) => tags.len(),
        }
    }

    /// Selects the ALL sentinel, clearing any explicit subset.
    pub fn clear(&mut self) {
        self.selection = FacetSelection::All;
    }

    /// Toggles membership of `tag` in the explicit subset.
    ///
    /// Starting from ALL, the first toggle creates the subset `{tag}`.
    /// Removing the last tag collapses back to ALL, and so does growing the
    /// subset until it covers the whole vocabulary.
    pub fn toggle(&mut self, tag: &str) {
        let mut tags = match std::mem::take(&mut self.selection) {
            FacetSelection::All => IndexSet::new(),
            FacetSelection::Subset(tags) => tags,
        };
        if !tags.shift_remove(tag) {
            tags.insert(tag.to_string());
        }
        self.selection = Self::normalize(tags, &self.options);
    }

    /// Replaces the selection with `tags` wholesale, applying the same
    /// collapse rules as [`Facet::toggle`]. Used by the one-shot CLI path.
    pub fn set_tags<I, S>(&mut self, tags: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let tags: IndexSet<String> = tags
            .into_iter()
            .map(Into::into)
            .filter(|t| !t.is_empty())
            .collect();
        self.selection = Self::normalize(tags, &self.options);
    }

    fn normalize(tags: IndexSet<String>, options: &[String]) -> FacetSelection {
        if tags.is_empty() {
            return FacetSelection::All;
        }
        let covers_all =
            !options.is_empty() && options.iter().all(|option| tags.contains(option));
        if covers_all && tags.len() == options.len() {
            return FacetSelection::All;
        }
        FacetSelection::Subset(tags)
    }

    /// Wire encoding: selected tags comma-joined in vocabulary order, or the
    /// empty string for ALL. Tags outside the vocabulary (CLI input) follow
    /// in selection order.
    #[must_use]
    pub fn encode(&self) -> String {
        match &self.selection {
            FacetSelection::All => String::new(),
            FacetSelection::Subset(tags) => {
                let mut ordered: Vec<&str> = self
                    .options
                    .iter()
                    .filter(|option| tags.contains(option.as_str()))
                    .map(String::as_str)
                    .collect();
                for tag in tags {
                    if !self.options.iter().any(|option| option == tag) {
                        ordered.push(tag);
                    }
                }
                ordered.join(",")
            }
        }
    }

    /// Whether `candidates` satisfies the facet (ALL, or any tag selected).
    /// Used only in the client-filtered mode; the server applies its own
    /// matching when it does the filtering.
    #[must_use]
    pub fn matches<'a, I>(&self, candidates: I) -> bool
    where
        I: IntoIterator<Item = &'a str>,
    {
        match &self.selection {
            FacetSelection::All => true,
            FacetSelection::Subset(tags) => {
                candidates.into_iter().any(|value| tags.contains(value))
            }
        }
    }
}

/// Identifies one of the three multi-valued facets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FacetKind {
    Organization,
    Category,
    BenefitType,
}

impl FacetKind {
    /// Trigger label in the filter bar.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Organization => "Organization",
            Self::Category => "Category",
            Self::BenefitType => "Benefit",
        }
    }
}

/// Complete listing filter: three facets, a sort key, and the page window.
///
/// Every facet or sort mutation resets the page to 1; page moves go through
/// [`PageWindow`] which rejects out-of-range targets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListFilter {
    organization: Facet,
    category: Facet,
    benefit_type: Facet,
    sort: SortKey,
    page: PageWindow,
}

/// Wire query derived from a [`ListFilter`] snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    /// Comma-joined organization tags, empty for ALL.
    pub organization: String,
    /// Comma-joined category tags, empty for ALL.
    pub category: String,
    /// Comma-joined benefit-type tags, empty for ALL.
    pub benefit_type: String,
    /// Wire name of the sort key.
    pub sort: &'static str,
    /// 1-based page number.
    pub page: u32,
}

impl ListFilter {
    /// Builds a filter with nothing selected, default sort, page 1.
    #[must_use]
    pub fn new(
        organizations: Vec<String>,
        categories: Vec<String>,
        benefit_types: Vec<String>,
        page_size: u32,
    ) -> Self {
        Self {
            organization: Facet::new(organizations),
            category: Facet::new(categories),
            benefit_type: Facet::new(benefit_types),
            sort: SortKey::default(),
            page: PageWindow::new(page_size),
        }
    }

    #[must_use]
    pub fn facet(&self, kind: FacetKind) -> &Facet {
        match kind {
            FacetKind::Organization => &self.organization,
            FacetKind::Category => &self.category,
            FacetKind::BenefitType => &self.benefit_type,
        }
    }

    fn facet_mut(&mut self, kind: FacetKind) -> &mut Facet {
        match kind {
            FacetKind::Organization => &mut self.organization,
            FacetKind::Category => &mut self.category,
            FacetKind::BenefitType => &mut self.benefit_type,
        }
    }

    #[must_use]
    pub fn sort(&self) -> SortKey {
        self.sort
    }

    #[must_use]
    pub fn page(&self) -> &PageWindow {
        &self.page
    }

    #[must_use]
    pub fn page_mut(&mut self) -> &mut PageWindow {
        &mut self.page
    }

    /// Toggles `tag` within the facet and resets the page to 1.
    pub fn toggle(&mut self, kind: FacetKind, tag: &str) {
        self.facet_mut(kind).toggle(tag);
        self.page.reset();
    }

    /// Selects the ALL sentinel for the facet and resets the page to 1.
    pub fn clear_facet(&mut self, kind: FacetKind) {
        self.facet_mut(kind).clear();
        self.page.reset();
    }

    /// Replaces the facet's selection wholesale and resets the page to 1.
    pub fn set_tags<I, S>(&mut self, kind: FacetKind, tags: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.facet_mut(kind).set_tags(tags);
        self.page.reset();
    }

    /// Replaces the sort key and resets the page to 1.
    pub fn set_sort(&mut self, sort: SortKey) {
        self.sort = sort;
        self.page.reset();
    }

    /// Snapshot of the wire query for the current state.
    #[must_use]
    pub fn encode(&self) -> ListQuery {
        ListQuery {
            organization: self.organization.encode(),
            category: self.category.encode(),
            benefit_type: self.benefit_type.encode(),
            sort: self.sort.wire(),
            page: self.page.current(),
        }
    }

    /// Whether `offer` passes every facet. Client-filtered mode only.
    #[must_use]
    pub fn matches(&self, offer: &Offer) -> bool {
        self.organization
            .matches(offer.organization_tags.iter().map(String::as_str))
            && self.category.matches(std::iter::once(offer.category.as_str()))
            && self
                .benefit_type
                .matches(offer.benefit_type_tags.iter().map(String::as_str))
    }
}
