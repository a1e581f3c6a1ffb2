//! Detail command handler.
//!
//! Implements the `detail` subcommand: one offer's inform fields plus its
//! review feed, fetched through the same two endpoints the TUI detail view
//! uses.

use anyhow::Result;

use crate::config::AppConfig;
use crate::error::CatalogError;
use crate::model::{OfferDetail, ReviewSummary};
use crate::sample;

use super::{backend, exit_codes, runtime, OutputFormat};

/// Run the detail command
pub fn run_detail(config: AppConfig, id: u64, sample: bool, output: OutputFormat) -> Result<i32> {
    let (detail, reviews) = if sample {
        (sample::sample_detail(id), sample::sample_reviews(id))
    } else {
        let client = backend(&config)?;
        let rt = runtime()?;
        rt.block_on(async {
            let detail = client.offer_detail(id).await?;
            let reviews = client.offer_reviews(id).await?;
            Ok::<_, CatalogError>((detail, reviews))
        })?
    };

    match output {
        OutputFormat::Json => {
            let body = serde_json::json!({
                "id": id,
                "inform": detail,
                "reviews": reviews,
            });
            println!("{}", serde_json::to_string_pretty(&body)?);
        }
        OutputFormat::Text => print_detail(id, &detail, &reviews),
    }

    Ok(exit_codes::SUCCESS)
}

fn print_detail(id: u64, detail: &OfferDetail, reviews: &ReviewSummary) {
    println!("Offer {id}");
    print_field("Eligible", &detail.target);
    print_field("Benefit", &detail.benefit_type);
    print_field(
        "Offer period",
        &format!("{} ~ {}", detail.sale_start, detail.sale_end),
    );
    print_field(
        "Valid for use",
        &format!("{} ~ {}", detail.use_start, detail.use_end),
    );
    if !detail.note.is_empty() {
        print_field("Note", &detail.note);
    }

    println!();
    if reviews.is_empty() {
        println!("No reviews yet.");
        return;
    }
    println!("Reviews ({})", reviews.entries.len());
    if !reviews.digest.is_empty() {
        println!("  {}", reviews.digest);
    }
    for entry in &reviews.entries {
        println!("  - {}", entry.text);
        if !entry.photo_urls.is_empty() {
            println!("    {} photo(s)", entry.photo_urls.len());
        }
    }
}

fn print_field(label: &str, value: &str) {
    if value.is_empty() {
        return;
    }
    println!("  {:<14} {value}", format!("{label}:"));
}
