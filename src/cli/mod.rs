//! CLI command handlers.
//!
//! This module provides testable command handlers that are invoked by main.rs.
//! Each handler implements the business logic for a specific CLI subcommand
//! and returns an exit code; operational failures propagate as errors.

mod browse;
mod detail;
mod offers;
mod review;
mod stores;

pub use browse::run_browse;
pub use detail::run_detail;
pub use offers::{run_offers, OffersFilter};
pub use review::run_review;
pub use stores::run_stores;

use anyhow::{Context, Result};
use clap::ValueEnum;

use crate::api::ApiClient;
use crate::config::AppConfig;
use crate::error::CatalogError;

/// Exit codes shared by the command handlers.
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    /// A review draft failed local validation; nothing was sent.
    pub const REVIEW_REJECTED: i32 = 2;
}

/// Output format for the one-shot commands.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable console listing
    #[default]
    Text,
    /// Pretty-printed JSON
    Json,
}

/// Builds the API client from the effective configuration.
///
/// Commands that talk to the backend call this; running without a base URL
/// is only possible through the sample catalog.
pub(crate) fn backend(config: &AppConfig) -> Result<ApiClient> {
    let base_url = config.api.base_url.as_deref().ok_or_else(|| {
        CatalogError::config(
            "no API base URL; set --base-url, CAMPUS_PARTNERS_API_BASE, or api.base_url \
             in the config file (or pass --sample)",
        )
    })?;
    Ok(ApiClient::new(base_url, config.api.timeout_secs)?)
}

/// Multi-thread runtime for commands that talk to the backend. One-shot
/// commands block on it; `browse` keeps it alive behind the TUI loop.
pub(crate) fn runtime() -> Result<tokio::runtime::Runtime> {
    tokio::runtime::Runtime::new().context("starting async runtime")
}

/// Stderr note printed when a requested page lies past the reported count.
pub(crate) fn note_page_reset(requested: u32, total_pages: u32) {
    eprintln!("page {requested} is past the last page ({total_pages}); showing page 1");
}
