//! Listing state machine: facets, sort order, pagination, single-flight.
//!
//! Everything here is pure state plus the request coordinator; no rendering
//! and no HTTP. The TUI and the one-shot CLI commands both drive the same
//! types, so the filter semantics cannot drift between the two surfaces.

mod coordinator;
mod facet;
mod page;
mod sort;

pub use coordinator::*;
pub use facet::*;
pub use page::*;
pub use sort::*;
