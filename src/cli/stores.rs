//! Stores command handler.
//!
//! Implements the `stores` subcommand: one page of a partnership's store
//! branches.

use anyhow::Result;

use crate::config::AppConfig;
use crate::model::{Store, StorePage};
use crate::sample;

use super::{backend, exit_codes, note_page_reset, runtime, OutputFormat};

/// Run the stores command
pub fn run_stores(
    config: AppConfig,
    id: u64,
    page: u32,
    sample: bool,
    output: OutputFormat,
) -> Result<i32> {
    let requested = page.max(1);

    let (snapshot, shown) = if sample {
        let size = config.catalog.store_page_size;
        let mut snapshot = sample::sample_store_page(requested, size);
        let mut shown = requested;
        if requested > snapshot.total_pages {
            note_page_reset(requested, snapshot.total_pages);
            snapshot = sample::sample_store_page(1, size);
            shown = 1;
        }
        (snapshot, shown)
    } else {
        let client = backend(&config)?;
        let rt = runtime()?;
        let mut snapshot = rt.block_on(client.store_list(id, requested))?;
        let mut shown = requested;
        if requested > snapshot.total_pages {
            note_page_reset(requested, snapshot.total_pages);
            snapshot = rt.block_on(client.store_list(id, 1))?;
            shown = 1;
        }
        (snapshot, shown)
    };

    match output {
        OutputFormat::Json => {
            let body = serde_json::json!({
                "id": id,
                "page": shown,
                "total_pages": snapshot.total_pages,
                "items": snapshot.items,
            });
            println!("{}", serde_json::to_string_pretty(&body)?);
        }
        OutputFormat::Text => print_stores(id, &snapshot, shown),
    }

    Ok(exit_codes::SUCCESS)
}

fn print_stores(id: u64, snapshot: &StorePage, shown: u32) {
    println!(
        "Branches of partnership {id}  page {shown} of {}",
        snapshot.total_pages
    );
    if snapshot.items.is_empty() {
        println!("  (no branches on this page)");
        return;
    }
    for store in &snapshot.items {
        print_store(store);
    }
}

fn print_store(store: &Store) {
    println!("  #{:<4} {}", store.id, store.name);
    let hours = store
        .hours
        .as_ref()
        .map_or_else(|| "-".to_string(), |h| format!("{}-{}", h.open, h.close));
    let parking = if store.has_parking { "parking" } else { "no parking" };
    println!(
        "        {}  {}  {}  {}",
        store.phone, store.address, hours, parking
    );
}
