//! Nearby-place enrichment from Wikipedia's geosearch API.
//!
//! [`WikiClient`] performs the HTTP call, [`PlaceEnrichmentService`] wraps it
//! in a three-state loading machine for one location, and [`EditSession`]
//! pairs that service with the draft text of the record being edited.

pub mod client;
pub mod edit;
pub mod enrichment;
pub mod error;
pub mod types;

pub use client::WikiClient;
pub use edit::EditSession;
pub use enrichment::{LoadingState, PlaceEnrichmentService};
pub use error::WikiError;
pub use types::{sort_pages, Page, PageDescription, FALLBACK_DESCRIPTION};
