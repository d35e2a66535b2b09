//! Saved-places storage: an ordered, observable collection of [`Location`]s
//! persisted to a single JSON file after every mutation.
//!
//! [`Location`]: bucketlist_core::Location

pub mod error;
pub mod repository;
pub mod store;

pub use error::PersistenceError;
pub use repository::{JsonFileRepository, PlaceRepository};
pub use store::LocationStore;
