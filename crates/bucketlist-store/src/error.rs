use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while reading or writing the saved-places file.
///
/// [`crate::LocationStore`] never propagates these from its mutating
/// operations; they are logged and the in-memory state stays authoritative.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not encode saved places: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("could not decode {}: {source}", .path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
