//! Offers command handler.
//!
//! Implements the `offers` subcommand: one page of the partnership listing,
//! fetched with the same filter encoding the TUI uses.

use anyhow::Result;

use crate::catalog::{FacetKind, ListFilter, ListQuery, SortKey};
use crate::config::{AppConfig, CatalogConfig};
use crate::model::{Offer, OfferPage};
use crate::sample;

use super::{backend, exit_codes, note_page_reset, runtime, OutputFormat};

/// Facet and page selections for the offers listing, straight from the CLI
/// flags. Empty tag vectors leave the facet at ALL.
#[derive(Debug, Clone)]
pub struct OffersFilter {
    pub organizations: Vec<String>,
    pub categories: Vec<String>,
    pub benefit_types: Vec<String>,
    pub sort: SortKey,
    pub page: u32,
}

impl Default for OffersFilter {
    fn default() -> Self {
        Self {
            organizations: Vec::new(),
            categories: Vec::new(),
            benefit_types: Vec::new(),
            sort: SortKey::default(),
            page: 1,
        }
    }
}

/// Run the offers command
pub fn run_offers(
    config: AppConfig,
    args: OffersFilter,
    sample: bool,
    output: OutputFormat,
) -> Result<i32> {
    let mut filter = build_filter(&config.catalog, &args);
    let requested = args.page.max(1);

    let (snapshot, shown) = if sample {
        let (snapshot, shown) = sample_snapshot(&mut filter, requested);
        if shown != requested {
            note_page_reset(requested, snapshot.total_pages);
        }
        (snapshot, shown)
    } else {
        let client = backend(&config)?;
        let rt = runtime()?;
        let mut query = filter.encode();
        query.page = requested;
        let mut snapshot = rt.block_on(client.list_offers(&query))?;
        let mut shown = requested;
        if requested > snapshot.total_pages {
            note_page_reset(requested, snapshot.total_pages);
            query.page = 1;
            snapshot = rt.block_on(client.list_offers(&query))?;
            shown = 1;
        }
        (snapshot, shown)
    };

    match output {
        OutputFormat::Json => {
            let body = serde_json::json!({
                "page": shown,
                "total_pages": snapshot.total_pages,
                "featured": snapshot.featured,
                "items": snapshot.items,
            });
            println!("{}", serde_json::to_string_pretty(&body)?);
        }
        OutputFormat::Text => print_listing(&snapshot, &filter.encode(), shown, filter.sort()),
    }

    Ok(exit_codes::SUCCESS)
}

/// Translates the CLI selections into the shared filter state.
fn build_filter(catalog: &CatalogConfig, args: &OffersFilter) -> ListFilter {
    let mut filter = ListFilter::new(
        catalog.organizations.clone(),
        catalog.categories.clone(),
        catalog.benefit_types.clone(),
        catalog.page_size,
    );
    if !args.organizations.is_empty() {
        filter.set_tags(FacetKind::Organization, args.organizations.iter().cloned());
    }
    if !args.categories.is_empty() {
        filter.set_tags(FacetKind::Category, args.categories.iter().cloned());
    }
    if !args.benefit_types.is_empty() {
        filter.set_tags(FacetKind::BenefitType, args.benefit_types.iter().cloned());
    }
    filter.set_sort(args.sort);
    filter
}

/// One page of the sample catalog. Returns the page actually shown: a
/// request past the last page falls back to page 1, mirroring the
/// interactive listing's overflow recovery.
fn sample_snapshot(filter: &mut ListFilter, requested: u32) -> (OfferPage, u32) {
    let snapshot = sample::sample_page(filter);
    filter.page_mut().set_total_pages(snapshot.total_pages);
    if requested > 1 && filter.page_mut().set_page(requested) {
        (sample::sample_page(filter), requested)
    } else {
        (snapshot, 1)
    }
}

fn print_listing(snapshot: &OfferPage, query: &ListQuery, shown: u32, sort: SortKey) {
    let mut active = Vec::new();
    if !query.organization.is_empty() {
        active.push(format!("organization={}", query.organization));
    }
    if !query.category.is_empty() {
        active.push(format!("category={}", query.category));
    }
    if !query.benefit_type.is_empty() {
        active.push(format!("type={}", query.benefit_type));
    }
    if !active.is_empty() {
        println!("Filter  {}", active.join("  "));
        println!();
    }

    if !snapshot.featured.is_empty() {
        println!("Featured");
        for offer in &snapshot.featured {
            print_offer(offer, "*");
        }
        println!();
    }

    println!(
        "Offers  page {shown} of {}  sorted by {}",
        snapshot.total_pages,
        sort.label()
    );
    if snapshot.items.is_empty() {
        println!("  (no offers match the current filter)");
    }
    for offer in &snapshot.items {
        print_offer(offer, " ");
    }
}

fn print_offer(offer: &Offer, marker: &str) {
    println!("{marker} #{:<4} {}", offer.id, offer.title);
    println!(
        "        {}  {}  {}% off  {} views  {}",
        offer.merchant_name,
        offer.category,
        offer.discount_percent,
        offer.view_count,
        offer.deadline_text
    );
}
