//! Backend access: the HTTP client, record normalization, review drafts.

mod client;
pub mod map;
mod review;

pub use client::ApiClient;
pub use review::{Attachment, ReviewDraft, PHOTO_SLOTS, TEXT_LIMIT};
