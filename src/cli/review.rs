//! Review command handler.
//!
//! Implements the `review` subcommand: builds a review draft from the CLI
//! arguments, validates it locally, and submits it as a multipart form.
//! Drafts that fail validation never produce a request.

use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::api::{Attachment, ReviewDraft};
use crate::config::AppConfig;
use crate::error::Result as CatalogResult;

use super::{backend, exit_codes, runtime};

/// Run the review command
pub fn run_review(
    config: AppConfig,
    id: u64,
    text: &str,
    receipt: &Path,
    photos: &[PathBuf],
    dry_run: bool,
) -> Result<i32> {
    let draft = match build_draft(text, receipt, photos) {
        Ok(draft) => draft,
        Err(err) => {
            eprintln!("{:#}", anyhow::Error::new(err));
            return Ok(exit_codes::REVIEW_REJECTED);
        }
    };

    if dry_run {
        println!(
            "Review for offer {id} passed validation ({} characters, {} photo(s)); not sent.",
            draft.text().chars().count(),
            draft.photo_count()
        );
        return Ok(exit_codes::SUCCESS);
    }

    let client = backend(&config)?;
    let rt = runtime()?;
    rt.block_on(client.post_review(id, &draft))?;
    println!("Review submitted for offer {id}.");

    Ok(exit_codes::SUCCESS)
}

/// Assembles and validates the draft. Any failure here is local: the
/// attachments could not be read or the submission rules were not met.
fn build_draft(text: &str, receipt: &Path, photos: &[PathBuf]) -> CatalogResult<ReviewDraft> {
    let mut draft = ReviewDraft::new();
    draft.set_text(text);
    draft.set_receipt(Attachment::load(receipt)?);
    draft.set_photos_from_paths(photos)?;
    draft.validate()?;
    Ok(draft)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    fn image_file() -> NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".jpg").tempfile().unwrap();
        file.write_all(&[0xFF, 0xD8, 0xFF]).unwrap();
        file
    }

    #[test]
    fn draft_assembles_from_paths() {
        let receipt = image_file();
        let photo = image_file();
        let draft = build_draft(
            "할인 바로 적용됐어요.",
            receipt.path(),
            &[photo.path().to_path_buf()],
        )
        .unwrap();
        assert_eq!(draft.photo_count(), 1);
    }

    #[test]
    fn missing_receipt_file_is_a_local_failure() {
        let err = build_draft("text", Path::new("/nonexistent/receipt.jpg"), &[]).unwrap_err();
        assert!(err.to_string().contains("Review rejected"));
    }

    #[test]
    fn empty_text_fails_validation() {
        let receipt = image_file();
        let err = build_draft("   ", receipt.path(), &[]).unwrap_err();
        assert!(!err.is_api_failure());
    }

    #[test]
    fn four_photos_are_rejected() {
        let receipt = image_file();
        let photo = image_file();
        let paths = vec![photo.path().to_path_buf(); 4];
        let err = build_draft("text", receipt.path(), &paths).unwrap_err();
        assert!(err.to_string().contains("Review rejected"));
    }
}
