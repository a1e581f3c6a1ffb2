//! Interactive catalog browser built on ratatui.
//!
//! The browser covers the whole catalog surface: a filterable offer grid,
//! partner branch listings, offer details with reviews, and a review
//! submission form.
//!
//! [`App`] holds all state and talks to the backend through a request
//! coordinator that keeps at most one fetch in flight; the event loop in
//! [`ui::run_tui`] drains completed fetches between frames.

mod app;
mod events;
pub mod state;
pub mod theme;
mod ui;
pub(crate) mod views;
pub(crate) mod widgets;

pub use app::{App, DetailTab, ReviewField, ViewKind};
pub use events::Event;
pub use state::{ListNavigation, ListState};
pub use theme::{colors, set_theme, toggle_theme, ColorScheme, FooterHints, Theme};
pub use ui::run_tui;
