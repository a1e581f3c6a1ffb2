//! **A terminal catalog client for university partnership offers.**
//!
//! `campus-partners` browses the discount and benefit catalog that a university
//! partnership program publishes for its students. It talks to the program's
//! HTTP API, normalizes the loosely-typed responses into a strict data model,
//! and layers a filter/sort/pagination engine on top that works the same way
//! whether the offer list came from the network or from the built-in sample
//! catalog.
//!
//! The library powers both an interactive terminal UI (TUI) for browsing and a
//! set of one-shot CLI subcommands for scripting, and can be embedded in other
//! tools that need programmatic access to the catalog.
//!
//! ## Key Features
//!
//! - **Response Normalization**: Server responses arrive with stringly-typed
//!   numbers, absent fields, and flag characters; the [`model`] types decode
//!   all of that into owned, well-typed Rust structs.
//! - **Client-Side Catalog Engine**: [`ListFilter`] combines three independent
//!   multi-select facets (organization, category, benefit type) with a sort
//!   order and a page window, and encodes the result into the wire query the
//!   server expects. The same engine slices locally when no server is around.
//! - **Stale-Response Protection**: [`RequestCoordinator`] tags every fetch
//!   with a generation number so that out-of-order responses from abandoned
//!   filter states are discarded instead of clobbering the screen.
//! - **Review Submission**: [`ReviewDraft`] assembles a review with a receipt
//!   photo and optional extra photos, validating text length, photo count, and
//!   attachment type locally before anything touches the network.
//! - **Interactive TUI**: A [ratatui](https://docs.rs/ratatui)-based browser
//!   with facet chips, scrolling offer lists, detail and branch views, and a
//!   review form.
//!
//! ## Core Concepts & Modules
//!
//! - **[`model`]**: The normalized data types: [`Offer`], [`OfferPage`],
//!   [`OfferDetail`], [`ReviewSummary`], and [`StorePage`]. Custom serde
//!   decoders absorb the server's representational quirks so the rest of the
//!   crate never sees them.
//! - **[`catalog`]**: The client-side engine. [`ListFilter`] owns the facet
//!   selections, sort key, and [`PageWindow`]; [`SortKey`] defines the six
//!   supported orderings; [`RequestCoordinator`] sequences in-flight fetches.
//! - **[`api`]**: [`ApiClient`], an async HTTP client for the catalog
//!   endpoints, plus [`ReviewDraft`] and [`Attachment`] for multipart review
//!   submission.
//! - **[`sample`]**: A deterministic offline catalog used by `--sample` mode
//!   and by tests.
//! - **[`config`]**: Layered configuration with file discovery, environment
//!   variables, and CLI overrides.
//! - **[`tui`]**: The interactive browser. [`run_tui`] drives the event loop;
//!   [`App`] holds all screen state.
//!
//! ## Getting Started: Filtering the Catalog
//!
//! [`ListFilter`] starts with every facet at "all offers". Toggling tags
//! narrows a facet, and [`ListFilter::encode`] produces the query for the
//! current state:
//!
//! ```
//! use campus_partners::catalog::{FacetKind, ListFilter, SortKey};
//!
//! let mut filter = ListFilter::new(
//!     vec!["총학생회".to_string()],
//!     vec!["음식".to_string(), "카페".to_string()],
//!     vec!["할인".to_string()],
//!     9,
//! );
//! filter.toggle(FacetKind::Category, "카페");
//! filter.set_sort(SortKey::PopularityDesc);
//!
//! let query = filter.encode();
//! assert_eq!(query.category, "카페");
//! assert_eq!(query.sort, "popular");
//! assert_eq!(query.page, 1);
//! ```
//!
//! ## Talking to a Backend
//!
//! [`ApiClient`] covers the five catalog endpoints. All methods are async and
//! return [`CatalogError`] on transport, status, or decode failures:
//!
//! ```no_run
//! use campus_partners::api::ApiClient;
//! use campus_partners::catalog::ListFilter;
//!
//! # async fn demo() -> campus_partners::Result<()> {
//! let client = ApiClient::new("https://partners.example.edu", 30)?;
//! let filter = ListFilter::new(Vec::new(), Vec::new(), Vec::new(), 9);
//!
//! let snapshot = client.list_offers(&filter.encode()).await?;
//! println!(
//!     "page 1 of {}: {} offers, {} featured",
//!     snapshot.total_pages,
//!     snapshot.items.len(),
//!     snapshot.featured.len(),
//! );
//! # Ok(())
//! # }
//! ```
//!
//! ## Working Offline
//!
//! The [`sample`] module serves the same shapes without a server, so the whole
//! engine can be exercised in tests or demos:
//!
//! ```
//! use campus_partners::catalog::ListFilter;
//! use campus_partners::config::CatalogConfig;
//! use campus_partners::sample;
//!
//! let vocab = CatalogConfig::default();
//! let filter = ListFilter::new(
//!     vocab.organizations.clone(),
//!     vocab.categories.clone(),
//!     vocab.benefit_types.clone(),
//!     vocab.page_size,
//! );
//!
//! let page = sample::sample_page(&filter);
//! assert_eq!(page.featured.len(), 3);
//! assert!(page.items.iter().all(|offer| !offer.is_featured));
//! ```

// Lint to discourage unwrap() in production code - prefer explicit error handling
#![warn(clippy::unwrap_used)]
#![allow(
    // TUI layout math and page arithmetic cast between usize and the u16/u32
    // widths ratatui and the wire format use; values are bounded in practice
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_possible_wrap,
    // Error/panic doc sections are written where they carry information,
    // not mechanically on every fallible fn
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    // Render and event-dispatch functions read better as one unit
    clippy::too_many_lines,
    // Screen state structs legitimately track several independent flags
    clippy::struct_excessive_bools,
    clippy::similar_names
)]

pub mod api;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod model;
pub mod sample;
pub mod tui;

// Convenience re-exports of the main types
pub use api::{ApiClient, Attachment, ReviewDraft, PHOTO_SLOTS, TEXT_LIMIT};
pub use catalog::{
    slice_for_page, total_pages, Commit, Facet, FacetKind, FacetSelection, ListFilter, ListQuery,
    PageWindow, RequestCoordinator, SortKey,
};
pub use config::{ApiConfig, AppConfig, CatalogConfig, TuiConfig};
pub use error::{ApiErrorKind, CatalogError, ErrorContext, OptionContext, Result, ReviewErrorKind};
pub use model::{
    HoursRange, Offer, OfferDetail, OfferPage, ReviewEntry, ReviewSummary, Store, StorePage,
};
pub use tui::{run_tui, App, ListNavigation, ListState};
