//! Application state for the TUI.

use std::path::{Path, PathBuf};
use std::sync::mpsc::Receiver;

use tokio::runtime::Handle;

use crate::api::{ApiClient, Attachment, ReviewDraft, PHOTO_SLOTS};
use crate::catalog::{Commit, FacetKind, ListFilter, PageWindow, RequestCoordinator, SortKey};
use crate::config::AppConfig;
use crate::error::{CatalogError, Result};
use crate::model::{Offer, OfferDetail, OfferPage, ReviewSummary, StorePage};
use crate::sample;
use crate::tui::state::{ListNavigation, ListState};
use crate::tui::widgets::{FacetMenu, MenuAction, SortMenu};

/// Which screen fills the content area.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    Offers,
    Stores,
    Detail,
}

/// Tabs inside the detail screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailTab {
    Info,
    Reviews,
}

impl DetailTab {
    pub(crate) fn next(self) -> Self {
        match self {
            Self::Info => Self::Reviews,
            Self::Reviews => Self::Info,
        }
    }
}

/// Payload of a completed background fetch.
pub enum Fetched {
    Offers(OfferPage),
    Detail {
        id: u64,
        detail: OfferDetail,
        reviews: ReviewSummary,
    },
    Stores(StorePage),
    ReviewPosted,
}

/// Which request the coordinator currently has in flight.
///
/// Commits only carry the payload, so errors need this to know which
/// screen to put back into a resting state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PendingFetch {
    Offers,
    Detail,
    Stores,
    Review,
}

/// Where offer pages come from.
enum Source {
    Remote(ApiClient),
    Sample,
}

/// Detail screen state: the card the user opened plus lazily fetched data.
pub struct DetailScreen {
    pub(crate) offer: Offer,
    pub(crate) tab: DetailTab,
    pub(crate) detail: Option<OfferDetail>,
    pub(crate) reviews: Option<ReviewSummary>,
    pub(crate) loading: bool,
    pub(crate) failed: bool,
}

/// Store branches screen state.
pub struct StoresScreen {
    pub(crate) store_id: u64,
    pub(crate) title: String,
    pub(crate) window: PageWindow,
    pub(crate) data: StorePage,
    pub(crate) list: ListState,
    pub(crate) loading: bool,
    pub(crate) return_to: ViewKind,
}

/// Input fields of the review form, in Tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewField {
    Text,
    Receipt,
    Photo(usize),
}

impl ReviewField {
    pub(crate) fn next(self) -> Self {
        match self {
            Self::Text => Self::Receipt,
            Self::Receipt => Self::Photo(0),
            Self::Photo(i) if i + 1 < PHOTO_SLOTS => Self::Photo(i + 1),
            Self::Photo(_) => Self::Text,
        }
    }

    pub(crate) fn prev(self) -> Self {
        match self {
            Self::Text => Self::Photo(PHOTO_SLOTS - 1),
            Self::Receipt => Self::Text,
            Self::Photo(0) => Self::Receipt,
            Self::Photo(i) => Self::Photo(i - 1),
        }
    }
}

/// Review drafting form. Paths are edited as text; attachments are read
/// from disk only at submit time.
pub struct ReviewForm {
    pub(crate) offer_id: u64,
    pub(crate) offer_title: String,
    pub(crate) field: ReviewField,
    pub(crate) text: String,
    pub(crate) receipt_path: String,
    pub(crate) photo_paths: [String; PHOTO_SLOTS],
    pub(crate) error: Option<String>,
    pub(crate) submitting: bool,
}

impl ReviewForm {
    fn new(offer_id: u64, offer_title: String) -> Self {
        Self {
            offer_id,
            offer_title,
            field: ReviewField::Text,
            text: String::new(),
            receipt_path: String::new(),
            photo_paths: Default::default(),
            error: None,
            submitting: false,
        }
    }

    pub(crate) fn active_input_mut(&mut self) -> &mut String {
        match self.field {
            ReviewField::Text => &mut self.text,
            ReviewField::Receipt => &mut self.receipt_path,
            ReviewField::Photo(i) => &mut self.photo_paths[i],
        }
    }

    /// Assemble and locally validate the draft. Receipt problems surface
    /// before text problems, matching the submit flow.
    fn build_draft(&self) -> Result<ReviewDraft> {
        let mut draft = ReviewDraft::new();
        draft.set_text(self.text.clone());
        let receipt = self.receipt_path.trim();
        if !receipt.is_empty() {
            draft.set_receipt(Attachment::load(Path::new(receipt))?);
        }
        let photos: Vec<PathBuf> = self
            .photo_paths
            .iter()
            .map(|p| p.trim())
            .filter(|p| !p.is_empty())
            .map(PathBuf::from)
            .collect();
        draft.set_photos_from_paths(&photos)?;
        draft.validate()?;
        Ok(draft)
    }
}

/// Filter bar dropdowns.
pub struct FilterBar {
    pub(crate) organization: FacetMenu,
    pub(crate) benefit: FacetMenu,
    pub(crate) sort: SortMenu,
}

impl FilterBar {
    fn new() -> Self {
        Self {
            organization: FacetMenu::new(FacetKind::Organization),
            benefit: FacetMenu::new(FacetKind::BenefitType),
            sort: SortMenu::new(),
        }
    }

    pub(crate) fn any_open(&self) -> bool {
        self.organization.is_open() || self.benefit.is_open() || self.sort.is_open()
    }

    pub(crate) fn close_all(&mut self) {
        self.organization.close();
        self.benefit.close();
        self.sort.close();
    }
}

/// Main application state
pub struct App {
    pub(crate) config: AppConfig,
    source: Source,
    coordinator: RequestCoordinator<Fetched>,
    commits: Receiver<Commit<Fetched>>,
    pending: Option<PendingFetch>,

    /// Active screen
    pub(crate) view: ViewKind,
    /// Listing filter: facets, sort, page window
    pub(crate) filter: ListFilter,
    /// Current offers snapshot
    pub(crate) offers: OfferPage,
    pub(crate) offers_loading: bool,
    /// Selection within `offers.items`
    pub(crate) grid: ListState,
    /// Category chip rectangles from the last render, chip 0 is ALL
    pub(crate) category_chips: Vec<ratatui::layout::Rect>,
    pub(crate) filter_bar: FilterBar,

    pub(crate) detail: Option<DetailScreen>,
    pub(crate) stores: Option<StoresScreen>,
    pub(crate) review: Option<ReviewForm>,

    pub(crate) show_help: bool,
    pub(crate) status_message: Option<String>,
    pub(crate) should_quit: bool,
    /// Animation tick counter
    pub(crate) tick: u64,
}

impl App {
    /// Build the app and issue the initial offers fetch.
    ///
    /// `api` of `None` serves the bundled sample catalog instead of
    /// talking to a backend.
    pub fn new(config: AppConfig, api: Option<ApiClient>, handle: Handle) -> Self {
        let (coordinator, commits) = RequestCoordinator::new(handle);
        let filter = ListFilter::new(
            config.catalog.organizations.clone(),
            config.catalog.categories.clone(),
            config.catalog.benefit_types.clone(),
            config.catalog.page_size,
        );

        let mut app = Self {
            config,
            source: api.map_or(Source::Sample, Source::Remote),
            coordinator,
            commits,
            pending: None,
            view: ViewKind::Offers,
            filter,
            offers: OfferPage::empty(),
            offers_loading: false,
            grid: ListState::new(),
            category_chips: Vec::new(),
            filter_bar: FilterBar::new(),
            detail: None,
            stores: None,
            review: None,
            show_help: false,
            status_message: None,
            should_quit: false,
            tick: 0,
        };
        app.request_offers();
        app
    }

    pub(crate) fn is_sample(&self) -> bool {
        matches!(self.source, Source::Sample)
    }

    pub(crate) fn selected_offer(&self) -> Option<&Offer> {
        self.offers.items.get(self.grid.selected)
    }

    pub(crate) fn set_status_message(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    pub(crate) fn clear_status_message(&mut self) {
        self.status_message = None;
    }

    // ========================================================================
    // Fetch requests
    // ========================================================================

    /// Issue a listing fetch for the current filter snapshot.
    ///
    /// Supersedes any fetch still in flight; the coordinator discards
    /// whatever the stale request would have delivered.
    pub(crate) fn request_offers(&mut self) {
        self.offers_loading = true;
        self.pending = Some(PendingFetch::Offers);
        match &self.source {
            Source::Remote(api) => {
                let api = api.clone();
                let query = self.filter.encode();
                self.coordinator
                    .issue(async move { api.list_offers(&query).await.map(Fetched::Offers) });
            }
            Source::Sample => {
                let page = sample::sample_page(&self.filter);
                self.coordinator.issue(async move { Ok(Fetched::Offers(page)) });
            }
        }
    }

    /// Open the detail screen for `offer` and fetch its info and reviews.
    pub(crate) fn open_detail(&mut self, offer: Offer) {
        let id = offer.id;
        self.detail = Some(DetailScreen {
            offer,
            tab: DetailTab::Info,
            detail: None,
            reviews: None,
            loading: true,
            failed: false,
        });
        self.view = ViewKind::Detail;
        self.request_detail(id);
    }

    fn request_detail(&mut self, id: u64) {
        self.pending = Some(PendingFetch::Detail);
        match &self.source {
            Source::Remote(api) => {
                let api = api.clone();
                self.coordinator.issue(async move {
                    let detail = api.offer_detail(id).await?;
                    let reviews = api.offer_reviews(id).await?;
                    Ok(Fetched::Detail { id, detail, reviews })
                });
            }
            Source::Sample => {
                let detail = sample::sample_detail(id);
                let reviews = sample::sample_reviews(id);
                self.coordinator.issue(async move {
                    Ok(Fetched::Detail { id, detail, reviews })
                });
            }
        }
    }

    /// Open the branches screen for the partner behind `offer`.
    pub(crate) fn open_stores(&mut self, offer: &Offer) {
        self.stores = Some(StoresScreen {
            store_id: offer.id,
            title: offer.merchant_name.clone(),
            window: PageWindow::new(self.config.catalog.store_page_size),
            data: StorePage::empty(),
            list: ListState::new(),
            loading: false,
            return_to: self.view,
        });
        self.view = ViewKind::Stores;
        self.request_stores();
    }

    pub(crate) fn request_stores(&mut self) {
        let Some(stores) = &mut self.stores else {
            return;
        };
        stores.loading = true;
        let id = stores.store_id;
        let page = stores.window.current();
        let page_size = stores.window.page_size();
        self.pending = Some(PendingFetch::Stores);
        match &self.source {
            Source::Remote(api) => {
                let api = api.clone();
                self.coordinator
                    .issue(async move { api.store_list(id, page).await.map(Fetched::Stores) });
            }
            Source::Sample => {
                let data = sample::sample_store_page(page, page_size);
                self.coordinator.issue(async move { Ok(Fetched::Stores(data)) });
            }
        }
    }

    /// Open the review form for the detail screen's offer.
    pub(crate) fn open_review_form(&mut self) {
        if let Some(detail) = &self.detail {
            self.review = Some(ReviewForm::new(
                detail.offer.id,
                detail.offer.title.clone(),
            ));
        }
    }

    /// Validate the form locally and, if it passes, post the review.
    /// Validation failures never reach the network.
    pub(crate) fn submit_review(&mut self) {
        let Some(form) = &mut self.review else {
            return;
        };
        if form.submitting {
            return;
        }
        match form.build_draft() {
            Ok(draft) => {
                form.error = None;
                form.submitting = true;
                let id = form.offer_id;
                self.pending = Some(PendingFetch::Review);
                match &self.source {
                    Source::Remote(api) => {
                        let api = api.clone();
                        self.coordinator.issue(async move {
                            api.post_review(id, &draft).await.map(|()| Fetched::ReviewPosted)
                        });
                    }
                    Source::Sample => {
                        self.coordinator.issue(async move { Ok(Fetched::ReviewPosted) });
                    }
                }
            }
            Err(e) => form.error = Some(e.to_string()),
        }
    }

    // ========================================================================
    // Commit handling
    // ========================================================================

    /// Apply everything the background tasks have delivered since the last
    /// pass. Stale commits are discarded by the coordinator.
    pub(crate) fn drain_commits(&mut self) {
        while let Ok(commit) = self.commits.try_recv() {
            let Some(outcome) = self.coordinator.try_commit(commit) else {
                continue;
            };
            let pending = self.pending.take();
            match outcome {
                Ok(Fetched::Offers(page)) => self.apply_offers(page),
                Ok(Fetched::Detail { id, detail, reviews }) => {
                    if let Some(screen) = &mut self.detail {
                        if screen.offer.id == id {
                            screen.detail = Some(detail);
                            screen.reviews = Some(reviews);
                            screen.loading = false;
                            screen.failed = false;
                        }
                    }
                }
                Ok(Fetched::Stores(page)) => {
                    if let Some(stores) = &mut self.stores {
                        stores.window.set_total_pages(page.total_pages);
                        stores.list.set_total(page.items.len());
                        stores.list.clamp_selection();
                        stores.data = page;
                        stores.loading = false;
                    }
                }
                Ok(Fetched::ReviewPosted) => {
                    self.review = None;
                    self.set_status_message("Review submitted");
                    // Refresh the reviews tab in place.
                    if let Some(screen) = &self.detail {
                        let id = screen.offer.id;
                        self.request_detail(id);
                    }
                }
                Err(e) => self.apply_fetch_error(pending, &e),
            }
        }
    }

    fn apply_offers(&mut self, page: OfferPage) {
        self.offers_loading = false;
        self.filter.page_mut().set_total_pages(page.total_pages);
        self.offers = page;
        self.grid.set_total(self.offers.items.len());
        self.grid.clamp_selection();

        // The server shrank the catalog under us: snap back to the first
        // page and re-fetch once. Page 1 can never overflow, so this does
        // not loop.
        if self.filter.page().is_overflowing() {
            self.filter.page_mut().reset();
            self.request_offers();
        }
    }

    /// Put the affected screen back into a resting state and surface the
    /// error. A failed listing fetch leaves an empty page rather than stale
    /// results that no longer match the filter.
    fn apply_fetch_error(&mut self, pending: Option<PendingFetch>, err: &CatalogError) {
        self.set_status_message(err.to_string());
        match pending {
            Some(PendingFetch::Offers) => {
                self.offers_loading = false;
                self.offers = OfferPage::empty();
                self.filter.page_mut().set_total_pages(1);
                self.grid.set_total(0);
                self.grid.clamp_selection();
            }
            Some(PendingFetch::Detail) => {
                if let Some(screen) = &mut self.detail {
                    screen.loading = false;
                    screen.failed = true;
                }
            }
            Some(PendingFetch::Stores) => {
                if let Some(stores) = &mut self.stores {
                    stores.loading = false;
                    stores.data = StorePage::empty();
                    stores.list.set_total(0);
                }
            }
            Some(PendingFetch::Review) => {
                if let Some(form) = &mut self.review {
                    form.submitting = false;
                    form.error = Some(err.to_string());
                }
            }
            None => {}
        }
    }

    // ========================================================================
    // Filter interactions
    // ========================================================================

    /// Apply a menu action to the facet and re-fetch.
    pub(crate) fn apply_facet_action(&mut self, kind: FacetKind, action: MenuAction) {
        match action {
            MenuAction::SelectAll => self.filter.clear_facet(kind),
            MenuAction::ToggleOption(idx) => {
                let Some(tag) = self.filter.facet(kind).options().get(idx).cloned() else {
                    return;
                };
                self.filter.toggle(kind, &tag);
            }
        }
        self.request_offers();
    }

    /// Switch the sort key and re-fetch, unless it is already active.
    pub(crate) fn apply_sort(&mut self, key: SortKey) {
        if key != self.filter.sort() {
            self.filter.set_sort(key);
            self.request_offers();
        }
    }

    /// Category chips behave like the single-choice nav row: chip 0 is ALL,
    /// the rest pick exactly one category.
    pub(crate) fn select_category_chip(&mut self, chip: usize) {
        if chip == 0 {
            self.filter.clear_facet(FacetKind::Category);
        } else {
            let Some(tag) = self
                .filter
                .facet(FacetKind::Category)
                .options()
                .get(chip - 1)
                .cloned()
            else {
                return;
            };
            self.filter.set_tags(FacetKind::Category, [tag]);
        }
        self.request_offers();
    }

    /// Advance to the next category chip (wrapping through ALL).
    pub(crate) fn cycle_category(&mut self) {
        let facet = self.filter.facet(FacetKind::Category);
        let options = facet.options();
        let next = if facet.is_all() {
            1
        } else {
            let current = options
                .iter()
                .position(|option| facet.is_selected(option))
                .map_or(0, |i| i + 1);
            (current + 1) % (options.len() + 1)
        };
        self.select_category_chip(next);
    }

    /// Move one page forward or back; out-of-range moves are rejected by
    /// the window and fetch nothing.
    pub(crate) fn change_page(&mut self, forward: bool) {
        let moved = if forward {
            self.filter.page_mut().next_page()
        } else {
            self.filter.page_mut().prev_page()
        };
        if moved {
            self.request_offers();
        }
    }

    /// Move one store page forward or back.
    pub(crate) fn change_store_page(&mut self, forward: bool) {
        let Some(stores) = &mut self.stores else {
            return;
        };
        let moved = if forward {
            stores.window.next_page()
        } else {
            stores.window.prev_page()
        };
        if moved {
            self.request_stores();
        }
    }

    // ========================================================================
    // Navigation
    // ========================================================================

    /// Leave the current screen: stores fall back to where they were opened
    /// from, detail falls back to the offers grid.
    pub(crate) fn navigate_back(&mut self) {
        match self.view {
            ViewKind::Stores => {
                let return_to = self
                    .stores
                    .take()
                    .map_or(ViewKind::Offers, |s| s.return_to);
                self.view = return_to;
            }
            ViewKind::Detail => {
                self.detail = None;
                self.view = ViewKind::Offers;
            }
            ViewKind::Offers => {}
        }
    }
}
