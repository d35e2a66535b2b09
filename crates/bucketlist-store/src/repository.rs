//! Durable storage for the saved-places sequence.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use bucketlist_core::Location;
use tracing::{debug, warn};

use crate::error::PersistenceError;

/// Durable backing for [`crate::LocationStore`].
///
/// `save` must replace the whole sequence in one step: a reader running
/// concurrently sees either the previous sequence or the new one.
pub trait PlaceRepository {
    /// Reads the full ordered sequence.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError`] if the backing store is missing, unreadable,
    /// or holds content that does not decode.
    fn load(&self) -> Result<Vec<Location>, PersistenceError>;

    /// Replaces the stored sequence with `locations`.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError`] if encoding or the write fails.
    fn save(&self, locations: &[Location]) -> Result<(), PersistenceError>;
}

/// Stores the sequence as a JSON array in a single file.
///
/// Writes go to a uniquely named sibling temp file which is flushed to disk and
/// then renamed over the target, so concurrent writers never share a temp file.
/// On Unix the file is created owner-read/write only.
#[derive(Debug, Clone)]
pub struct JsonFileRepository {
    path: PathBuf,
}

impl JsonFileRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(path: &Path, source: std::io::Error) -> PersistenceError {
        PersistenceError::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    fn write_atomic(&self, data: &[u8]) -> Result<(), PersistenceError> {
        let parent = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        fs::create_dir_all(parent).map_err(|e| {
            warn!(parent = %parent.display(), error = %e, "saved_places: create_dir_all failed");
            Self::io_error(parent, e)
        })?;

        // Dropping the handle on any error path removes the temp file.
        let mut temp = Self::temp_builder().tempfile_in(parent).map_err(|e| {
            warn!(parent = %parent.display(), error = %e, "saved_places: create temp file failed");
            Self::io_error(parent, e)
        })?;
        temp.write_all(data)
            .and_then(|()| temp.as_file().sync_all())
            .map_err(|e| {
                warn!(temp_path = %temp.path().display(), error = %e, "saved_places: write failed");
                Self::io_error(temp.path(), e)
            })?;

        temp.persist(&self.path).map_err(|e| {
            warn!(to = %self.path.display(), error = %e.error, "saved_places: rename failed");
            Self::io_error(&self.path, e.error)
        })?;
        Ok(())
    }

    fn temp_builder() -> tempfile::Builder<'static, 'static> {
        let mut builder = tempfile::Builder::new();
        builder.prefix(".saved-places-").suffix(".tmp");
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            builder.permissions(fs::Permissions::from_mode(0o600));
        }
        builder
    }
}

impl PlaceRepository for JsonFileRepository {
    fn load(&self) -> Result<Vec<Location>, PersistenceError> {
        let data = fs::read(&self.path).map_err(|e| Self::io_error(&self.path, e))?;
        let locations: Vec<Location> =
            serde_json::from_slice(&data).map_err(|e| PersistenceError::Decode {
                path: self.path.clone(),
                source: e,
            })?;
        debug!(path = %self.path.display(), count = locations.len(), "saved_places: loaded");
        Ok(locations)
    }

    fn save(&self, locations: &[Location]) -> Result<(), PersistenceError> {
        let data = serde_json::to_vec(locations).map_err(PersistenceError::Encode)?;
        self.write_atomic(&data)?;
        debug!(path = %self.path.display(), count = locations.len(), size = data.len(), "saved_places: saved");
        Ok(())
    }
}
