//! The in-memory owner of the saved-places sequence.

use std::collections::{BTreeSet, HashSet};
use std::path::PathBuf;

use bucketlist_core::{Coordinate, Location};
use tokio::sync::watch;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::error::PersistenceError;
use crate::repository::{JsonFileRepository, PlaceRepository};

/// Ordered collection of saved places plus the current selection.
///
/// All mutation goes through `&mut self`, so whoever owns the store is its
/// single writer. Observers get snapshots through [`LocationStore::subscribe`]
/// and [`LocationStore::subscribe_selection`]. Every mutation is followed by a
/// full rewrite through the [`PlaceRepository`]; a failed write is logged and
/// retried implicitly by the next mutation.
pub struct LocationStore<R = JsonFileRepository> {
    repository: R,
    locations: Vec<Location>,
    selection: Option<Uuid>,
    locations_tx: watch::Sender<Vec<Location>>,
    selection_tx: watch::Sender<Option<Uuid>>,
}

impl LocationStore<JsonFileRepository> {
    /// Opens the store backed by the JSON file at `path`.
    pub fn open_file(path: impl Into<PathBuf>) -> Self {
        Self::open(JsonFileRepository::new(path))
    }
}

impl<R: PlaceRepository> LocationStore<R> {
    /// Creates the store and loads its contents.
    ///
    /// Any load failure (missing file, unreadable, undecodable) leaves the
    /// store empty; this never fails.
    pub fn open(repository: R) -> Self {
        let locations = match repository.load() {
            Ok(locations) => {
                info!(count = locations.len(), "saved places loaded");
                locations
            }
            Err(e) => {
                warn!(error = %e, "couldn't retrieve saved places; starting with an empty collection");
                Vec::new()
            }
        };
        let (locations_tx, _) = watch::channel(locations.clone());
        let (selection_tx, _) = watch::channel(None);
        Self {
            repository,
            locations,
            selection: None,
            locations_tx,
            selection_tx,
        }
    }

    #[must_use]
    pub fn locations(&self) -> &[Location] {
        &self.locations
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.locations.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    #[must_use]
    pub fn get(&self, id: Uuid) -> Option<&Location> {
        self.locations.iter().find(|l| l.id == id)
    }

    #[must_use]
    pub fn repository(&self) -> &R {
        &self.repository
    }

    /// Snapshot feed of the ordered sequence.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Vec<Location>> {
        self.locations_tx.subscribe()
    }

    /// Snapshot feed of the selected id.
    #[must_use]
    pub fn subscribe_selection(&self) -> watch::Receiver<Option<Uuid>> {
        self.selection_tx.subscribe()
    }

    #[must_use]
    pub fn selection(&self) -> Option<Uuid> {
        self.selection
    }

    /// The selected record, if the selection still names a stored record.
    #[must_use]
    pub fn selected(&self) -> Option<&Location> {
        self.selection.and_then(|id| self.get(id))
    }

    /// Sets or clears the selection. The id is taken as given, whether or not
    /// a record with that id is stored.
    pub fn select(&mut self, id: Option<Uuid>) {
        self.set_selection(id);
    }

    /// Appends a placeholder record at `default_center` and persists.
    ///
    /// The new id is distinct from every id already stored.
    pub fn add(&mut self, default_center: Coordinate) -> &Location {
        let existing: HashSet<Uuid> = self.locations.iter().map(|l| l.id).collect();
        let mut location = Location::placeholder(default_center);
        while existing.contains(&location.id) {
            location.id = Uuid::new_v4();
        }
        debug!(id = %location.id, "adding location");
        self.locations.push(location);
        self.commit();
        &self.locations[self.locations.len() - 1]
    }

    /// Replaces the record whose id is `selected` with `new_value`.
    ///
    /// `new_value` may carry a different id from `selected`. With no selection
    /// this does nothing at all. When nothing matches `selected` the sequence
    /// is left as is (and rewritten unchanged). Returns whether a record was
    /// replaced.
    pub fn update(&mut self, selected: Option<Uuid>, new_value: Location) -> bool {
        let Some(selected) = selected else {
            debug!("update ignored: no location selected");
            return false;
        };

        let replaced = match self.locations.iter().position(|l| l.id == selected) {
            Some(index) => {
                let new_id = new_value.id;
                self.locations[index] = new_value;
                if self.selection == Some(selected) {
                    self.set_selection(Some(new_id));
                }
                debug!(old_id = %selected, new_id = %new_id, index, "location updated");
                true
            }
            None => {
                debug!(id = %selected, "update found no matching location");
                false
            }
        };
        self.commit();
        replaced
    }

    /// [`LocationStore::update`] keyed on the current selection.
    pub fn update_selected(&mut self, new_value: Location) -> bool {
        self.update(self.selection, new_value)
    }

    /// Removes the records at `indices`, keeping the rest in order, and persists.
    ///
    /// Positions past the end are ignored.
    pub fn delete<I>(&mut self, indices: I)
    where
        I: IntoIterator<Item = usize>,
    {
        let indices: BTreeSet<usize> = indices.into_iter().collect();
        let len = self.locations.len();
        for &index in indices.iter().rev() {
            if index >= len {
                warn!(index, len, "delete ignored out-of-range position");
                continue;
            }
            let removed = self.locations.remove(index);
            if self.selection == Some(removed.id) {
                self.set_selection(None);
            }
        }
        self.commit();
    }

    /// Writes the full sequence through the repository.
    ///
    /// # Errors
    ///
    /// Returns the repository's [`PersistenceError`]; in-memory state is not
    /// affected either way.
    pub fn persist(&self) -> Result<(), PersistenceError> {
        self.repository.save(&self.locations)
    }

    fn commit(&mut self) {
        self.locations_tx.send_replace(self.locations.clone());
        if let Err(e) = self.persist() {
            error!(error = %e, "unable to save places; keeping in-memory state");
        }
    }

    fn set_selection(&mut self, id: Option<Uuid>) {
        self.selection = id;
        self.selection_tx.send_replace(id);
    }
}
