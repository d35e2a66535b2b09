use bucketlist_core::Coordinate;
use tokio::sync::watch;
use tracing::{info, warn};

use crate::client::WikiClient;
use crate::types::{sort_pages, Page};

/// Progress of the nearby-places lookup for one location.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadingState {
    #[default]
    Loading,
    /// Pages sorted by title.
    Loaded(Vec<Page>),
    /// The lookup failed; stays here until the next [`PlaceEnrichmentService::fetch`].
    Failed,
}

/// Nearby-places lookup for a single coordinate.
///
/// `fetch` takes `&mut self` for its whole duration, so at most one request
/// is in flight per service, and dropping the fetch future (or the service)
/// discards the request without touching the state.
pub struct PlaceEnrichmentService {
    client: WikiClient,
    coordinate: Coordinate,
    state: LoadingState,
    state_tx: watch::Sender<LoadingState>,
}

impl PlaceEnrichmentService {
    pub fn new(client: WikiClient, coordinate: Coordinate) -> Self {
        let (state_tx, _) = watch::channel(LoadingState::Loading);
        Self {
            client,
            coordinate,
            state: LoadingState::Loading,
            state_tx,
        }
    }

    #[must_use]
    pub fn coordinate(&self) -> Coordinate {
        self.coordinate
    }

    #[must_use]
    pub fn state(&self) -> &LoadingState {
        &self.state
    }

    /// Loaded pages, or an empty slice in any other state.
    #[must_use]
    pub fn pages(&self) -> &[Page] {
        match &self.state {
            LoadingState::Loaded(pages) => pages,
            LoadingState::Loading | LoadingState::Failed => &[],
        }
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<LoadingState> {
        self.state_tx.subscribe()
    }

    /// Runs the lookup and moves to `Loaded` or `Failed`.
    ///
    /// Failure causes are logged, not kept. There is no automatic retry.
    pub async fn fetch(&mut self) {
        self.transition(LoadingState::Loading);

        let next = match self.client.nearby_pages(self.coordinate).await {
            Ok(mut pages) => {
                sort_pages(&mut pages);
                info!(count = pages.len(), coordinate = %self.coordinate, "nearby places loaded");
                LoadingState::Loaded(pages)
            }
            Err(e) => {
                warn!(error = %e, coordinate = %self.coordinate, "nearby places lookup failed");
                LoadingState::Failed
            }
        };
        self.transition(next);
    }

    fn transition(&mut self, next: LoadingState) {
        self.state = next.clone();
        self.state_tx.send_replace(next);
    }
}
