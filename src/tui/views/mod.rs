//! Screen views for the TUI.

mod detail;
mod offers;
mod overlays;
mod review_form;
mod stores;

pub use detail::render_detail;
pub use offers::render_offers;
pub use overlays::render_help_overlay;
pub use review_form::render_review_form;
pub use stores::render_stores;
