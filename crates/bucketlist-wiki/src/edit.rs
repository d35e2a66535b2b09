use bucketlist_core::{IdentityPolicy, Location};

use crate::client::WikiClient;
use crate::enrichment::PlaceEnrichmentService;

/// Working copy of one record while it is being edited.
///
/// Holds the draft text and the nearby-places lookup for the record's
/// coordinates. Dropping the session drops any fetch still in flight.
pub struct EditSession {
    location: Location,
    pub name: String,
    pub description: String,
    enrichment: PlaceEnrichmentService,
}

impl EditSession {
    pub fn new(location: Location, client: WikiClient) -> Self {
        let enrichment = PlaceEnrichmentService::new(client, location.coordinate());
        Self {
            name: location.name.clone(),
            description: location.description.clone(),
            location,
            enrichment,
        }
    }

    /// The record as it was when the session started.
    #[must_use]
    pub fn original(&self) -> &Location {
        &self.location
    }

    #[must_use]
    pub fn enrichment(&self) -> &PlaceEnrichmentService {
        &self.enrichment
    }

    pub async fn fetch_nearby(&mut self) {
        self.enrichment.fetch().await;
    }

    /// The edited record, ready for `LocationStore::update`.
    #[must_use]
    pub fn finish(&self, policy: IdentityPolicy) -> Location {
        self.location
            .edited(self.name.clone(), self.description.clone(), policy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enrichment::LoadingState;

    fn session() -> EditSession {
        let client = WikiClient::with_base_url("http://127.0.0.1:9/w/api.php", "test", Some(1))
            .expect("client construction should not fail");
        EditSession::new(Location::example(), client)
    }

    #[test]
    fn drafts_start_from_the_record() {
        let s = session();
        assert_eq!(s.name, "Buckingham Palace");
        assert_eq!(s.description, s.original().description);
        assert_eq!(s.enrichment().coordinate(), s.original().coordinate());
        assert_eq!(s.enrichment().state(), &LoadingState::Loading);
    }

    #[test]
    fn finish_applies_drafts_and_keeps_identity_when_stable() {
        let mut s = session();
        s.name = "The Palace".to_string();
        s.description = "Open in summer".to_string();

        let edited = s.finish(IdentityPolicy::Stable);

        assert_eq!(edited.id, s.original().id);
        assert_eq!(edited.name, "The Palace");
        assert_eq!(edited.description, "Open in summer");
        assert_eq!(edited.coordinate(), s.original().coordinate());
    }

    #[test]
    fn finish_rotates_identity_when_asked() {
        let s = session();
        let first = s.finish(IdentityPolicy::Rotate);
        let second = s.finish(IdentityPolicy::Rotate);
        assert_ne!(first.id, s.original().id);
        assert_ne!(first.id, second.id);
    }
}
