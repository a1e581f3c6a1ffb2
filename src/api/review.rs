//! Review drafts: attachments, local validation, multipart encoding.
//!
//! A draft is validated entirely client-side before any network call: a
//! missing receipt or empty text never reaches the wire. Attachments own
//! their loaded bytes; replacing or removing one drops the old buffer, and
//! tearing the form down drops them all.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use reqwest::multipart::{Form, Part};

use crate::error::{CatalogError, Result, ReviewErrorKind};

/// Longest accepted review text, in characters.
pub const TEXT_LIMIT: usize = 1000;
/// Number of optional review photo slots.
pub const PHOTO_SLOTS: usize = 3;

/// One loaded image attachment.
#[derive(Debug, Clone)]
pub struct Attachment {
    file_name: String,
    mime: &'static str,
    bytes: Vec<u8>,
}

impl Attachment {
    /// Reads an attachment from disk.
    ///
    /// # Errors
    ///
    /// Returns [`ReviewErrorKind::UnreadableAttachment`] when the file
    /// cannot be read.
    pub fn load(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path).map_err(|e| {
            CatalogError::review(
                "loading attachment",
                ReviewErrorKind::UnreadableAttachment {
                    path: path.to_path_buf(),
                    reason: e.to_string(),
                },
            )
        })?;
        let file_name = path
            .file_name()
            .and_then(OsStr::to_str)
            .unwrap_or("attachment")
            .to_string();
        Ok(Self {
            file_name,
            mime: mime_for(path),
            bytes,
        })
    }

    /// Builds an attachment from in-memory bytes.
    #[must_use]
    pub fn from_bytes(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let file_name = file_name.into();
        let mime = mime_for(Path::new(&file_name));
        Self {
            file_name,
            mime,
            bytes,
        }
    }

    #[must_use]
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Size of the loaded buffer in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    fn part(&self) -> Result<Part> {
        Part::bytes(self.bytes.clone())
            .file_name(self.file_name.clone())
            .mime_str(self.mime)
            .map_err(|e| CatalogError::validation(format!("attachment mime type: {e}")))
    }
}

fn mime_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(OsStr::to_str)
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        _ => "application/octet-stream",
    }
}

/// An in-progress review: body text, the required receipt, and up to three
/// optional photos.
#[derive(Debug, Clone, Default)]
pub struct ReviewDraft {
    text: String,
    receipt: Option<Attachment>,
    photos: [Option<Attachment>; PHOTO_SLOTS],
}

impl ReviewDraft {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    #[must_use]
    pub fn receipt(&self) -> Option<&Attachment> {
        self.receipt.as_ref()
    }

    /// Installs the receipt, dropping any previous buffer.
    pub fn set_receipt(&mut self, attachment: Attachment) {
        self.receipt = Some(attachment);
    }

    pub fn clear_receipt(&mut self) {
        self.receipt = None;
    }

    #[must_use]
    pub fn photo(&self, slot: usize) -> Option<&Attachment> {
        self.photos.get(slot).and_then(Option::as_ref)
    }

    /// Fills a photo slot, dropping whatever buffer was there.
    pub fn set_photo(&mut self, slot: usize, attachment: Attachment) {
        if let Some(entry) = self.photos.get_mut(slot) {
            *entry = Some(attachment);
        }
    }

    pub fn clear_photo(&mut self, slot: usize) {
        if let Some(entry) = self.photos.get_mut(slot) {
            *entry = None;
        }
    }

    #[must_use]
    pub fn photo_count(&self) -> usize {
        self.photos.iter().filter(|p| p.is_some()).count()
    }

    /// Loads photo attachments from `paths` into the slots, left to right.
    ///
    /// # Errors
    ///
    /// Returns [`ReviewErrorKind::TooManyPhotos`] before touching the disk
    /// when more than [`PHOTO_SLOTS`] paths are given, and
    /// [`ReviewErrorKind::UnreadableAttachment`] for a path that fails to
    /// read.
    pub fn set_photos_from_paths(&mut self, paths: &[PathBuf]) -> Result<()> {
        if paths.len() > PHOTO_SLOTS {
            return Err(CatalogError::review(
                "review draft",
                ReviewErrorKind::TooManyPhotos {
                    count: paths.len(),
                    limit: PHOTO_SLOTS,
                },
            ));
        }
        for (slot, path) in paths.iter().enumerate() {
            self.set_photo(slot, Attachment::load(path)?);
        }
        Ok(())
    }

    /// Checks the draft against the submission rules without any I/O.
    ///
    /// The receipt is checked first, then the text; both mirror the order a
    /// user fills the form in.
    ///
    /// # Errors
    ///
    /// Returns the first failing [`ReviewErrorKind`].
    pub fn validate(&self) -> Result<()> {
        if self.receipt.is_none() {
            return Err(CatalogError::review(
                "review draft",
                ReviewErrorKind::MissingReceipt,
            ));
        }
        if self.text.trim().is_empty() {
            return Err(CatalogError::review(
                "review draft",
                ReviewErrorKind::EmptyText,
            ));
        }
        if self.text.chars().count() > TEXT_LIMIT {
            return Err(CatalogError::review(
                "review draft",
                ReviewErrorKind::TextTooLong { limit: TEXT_LIMIT },
            ));
        }
        Ok(())
    }

    /// Encodes the draft as the multipart form the backend expects:
    /// `text`, `receiptFile`, and one `photoFiles` part per photo.
    ///
    /// # Errors
    ///
    /// Returns a validation failure if the draft does not pass
    /// [`ReviewDraft::validate`].
    pub fn to_form(&self) -> Result<Form> {
        self.validate()?;
        let receipt = match &self.receipt {
            Some(receipt) => receipt,
            // validate() guarantees the receipt; this arm is for safety.
            None => {
                return Err(CatalogError::review(
                    "review draft",
                    ReviewErrorKind::MissingReceipt,
                ))
            }
        };
        let mut form = Form::new()
            .text("text", self.text.clone())
            .part("receiptFile", receipt.part()?);
        for photo in self.photos.iter().flatten() {
            form = form.part("photoFiles", photo.part()?);
        }
        Ok(form)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn receipt() -> Attachment {
        Attachment::from_bytes("receipt.jpg", vec![0xFF, 0xD8, 0xFF])
    }

    fn draft_with_receipt() -> ReviewDraft {
        let mut draft = ReviewDraft::new();
        draft.set_receipt(receipt());
        draft.set_text("재학생 확인 후 바로 할인받았습니다.");
        draft
    }

    #[test]
    fn valid_draft_passes() {
        assert!(draft_with_receipt().validate().is_ok());
    }

    #[test]
    fn receipt_is_checked_before_text() {
        let mut draft = ReviewDraft::new();
        draft.set_text("");
        let err = draft.validate().unwrap_err();
        assert!(err.to_string().contains("receipt"));
    }

    #[test]
    fn blank_text_is_rejected() {
        let mut draft = draft_with_receipt();
        draft.set_text("   ");
        let err = draft.validate().unwrap_err();
        assert!(err.to_string().contains("empty"));
    }

    #[test]
    fn overlong_text_is_rejected_by_character_count() {
        let mut draft = draft_with_receipt();
        draft.set_text("가".repeat(TEXT_LIMIT));
        assert!(draft.validate().is_ok());
        draft.set_text("가".repeat(TEXT_LIMIT + 1));
        assert!(draft.validate().is_err());
    }

    #[test]
    fn too_many_photo_paths_fail_before_any_read() {
        let mut draft = draft_with_receipt();
        let paths: Vec<PathBuf> = (0..4).map(|i| PathBuf::from(format!("/nonexistent/{i}.jpg"))).collect();
        let err = draft.set_photos_from_paths(&paths).unwrap_err();
        assert!(err.to_string().contains("Review rejected"));
        assert_eq!(draft.photo_count(), 0);
    }

    #[test]
    fn replacing_a_photo_slot_drops_the_old_buffer() {
        let mut draft = draft_with_receipt();
        draft.set_photo(0, Attachment::from_bytes("a.png", vec![1; 64]));
        draft.set_photo(0, Attachment::from_bytes("b.png", vec![2; 16]));
        assert_eq!(draft.photo_count(), 1);
        assert_eq!(draft.photo(0).unwrap().file_name(), "b.png");
        assert_eq!(draft.photo(0).unwrap().len(), 16);

        draft.clear_photo(0);
        assert_eq!(draft.photo_count(), 0);
    }

    #[test]
    fn form_encodes_without_photos() {
        let draft = draft_with_receipt();
        assert!(draft.to_form().is_ok());
    }

    #[test]
    fn form_refuses_invalid_drafts() {
        let draft = ReviewDraft::new();
        assert!(draft.to_form().is_err());
    }

    #[test]
    fn mime_is_guessed_from_the_extension() {
        assert_eq!(Attachment::from_bytes("x.PNG", vec![0]).mime, "image/png");
        assert_eq!(Attachment::from_bytes("x.jpeg", vec![0]).mime, "image/jpeg");
        assert_eq!(Attachment::from_bytes("x.bin", vec![0]).mime, "application/octet-stream");
    }
}
