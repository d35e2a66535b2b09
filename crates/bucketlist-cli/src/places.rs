//! Command handlers for the saved places.
//!
//! Positions on the command line are 1-based, matching `list` output.

use anyhow::{bail, Context};
use bucketlist_core::{AppConfig, Coordinate};
use bucketlist_store::{LocationStore, PlaceRepository};
use bucketlist_wiki::{EditSession, LoadingState, WikiClient};

fn position<R: PlaceRepository>(store: &LocationStore<R>, index: usize) -> anyhow::Result<usize> {
    if index == 0 || index > store.len() {
        bail!("no place #{index} (there are {} saved places)", store.len());
    }
    Ok(index - 1)
}

pub(crate) fn list<R: PlaceRepository>(store: &LocationStore<R>) {
    if store.is_empty() {
        println!("No saved places yet. Add one with `bucketlist add`.");
        return;
    }
    for (i, place) in store.locations().iter().enumerate() {
        println!("{:>3}. {} ({})", i + 1, place.name, place.coordinate());
        if !place.description.is_empty() {
            println!("     {}", place.description);
        }
    }
}

pub(crate) fn add<R: PlaceRepository>(
    store: &mut LocationStore<R>,
    config: &AppConfig,
    at: Option<(f64, f64)>,
) -> anyhow::Result<()> {
    let center = match at {
        Some((lat, lon)) => Coordinate::new(lat, lon)?,
        None => config.default_center,
    };
    let added = store.add(center).clone();
    tracing::info!(id = %added.id, coordinate = %added.coordinate(), "place added");
    println!("Added #{}: {} ({})", store.len(), added.name, added.coordinate());
    Ok(())
}

pub(crate) fn edit<R: PlaceRepository>(
    store: &mut LocationStore<R>,
    config: &AppConfig,
    index: usize,
    name: Option<String>,
    description: Option<String>,
) -> anyhow::Result<()> {
    if name.is_none() && description.is_none() {
        bail!("nothing to change; pass --name and/or --description");
    }
    let position = position(store, index)?;
    let place = &store.locations()[position];
    let edited = place.edited(
        name.unwrap_or_else(|| place.name.clone()),
        description.unwrap_or_else(|| place.description.clone()),
        config.edit_identity,
    );
    let id = place.id;

    store.select(Some(id));
    store.update_selected(edited);
    store.select(None);
    tracing::info!(position = index, identity = %config.edit_identity, "place edited");

    println!("Updated #{index}: {}", store.locations()[position].name);
    Ok(())
}

pub(crate) fn delete<R: PlaceRepository>(
    store: &mut LocationStore<R>,
    indices: &[usize],
) -> anyhow::Result<()> {
    let positions = indices
        .iter()
        .map(|&i| position(store, i))
        .collect::<anyhow::Result<Vec<_>>>()?;
    let before = store.len();
    store.delete(positions);
    tracing::info!(removed = before - store.len(), remaining = store.len(), "places deleted");
    println!("Deleted {} place(s)", before - store.len());
    Ok(())
}

pub(crate) async fn nearby<R: PlaceRepository>(
    store: &LocationStore<R>,
    config: &AppConfig,
    index: usize,
) -> anyhow::Result<()> {
    let position = position(store, index)?;
    let place = store.locations()[position].clone();
    let client = WikiClient::from_config(config).context("building Wikipedia client")?;
    let mut session = EditSession::new(place, client);

    let place_id = session.original().id;
    println!("Looking up places near {}...", session.original().name);
    tokio::select! {
        () = session.fetch_nearby() => {}
        _ = tokio::signal::ctrl_c() => {
            tracing::warn!(place = %place_id, "nearby lookup abandoned");
            println!("Cancelled.");
            return Ok(());
        }
    }

    match session.enrichment().state() {
        LoadingState::Loaded(pages) if pages.is_empty() => println!("Nothing nearby."),
        LoadingState::Loaded(pages) => {
            for page in pages {
                println!("- {}: {}", page.title, page.description());
            }
        }
        LoadingState::Failed => println!("Please try again later."),
        LoadingState::Loading => println!("Loading..."),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use bucketlist_core::Location;
    use bucketlist_store::PersistenceError;

    use super::*;

    #[derive(Default)]
    struct MemoryRepository {
        saved: RefCell<Vec<Location>>,
    }

    impl PlaceRepository for MemoryRepository {
        fn load(&self) -> Result<Vec<Location>, PersistenceError> {
            Ok(self.saved.borrow().clone())
        }

        fn save(&self, locations: &[Location]) -> Result<(), PersistenceError> {
            *self.saved.borrow_mut() = locations.to_vec();
            Ok(())
        }
    }

    fn test_config() -> AppConfig {
        AppConfig {
            log_level: "info".to_string(),
            data_dir: std::path::PathBuf::from("unused"),
            default_center: Coordinate {
                latitude: 50.0,
                longitude: 0.0,
            },
            wiki_base_url: "http://127.0.0.1:9/w/api.php".to_string(),
            wiki_timeout_secs: Some(1),
            user_agent: "bucketlist-test/0.1".to_string(),
            edit_identity: bucketlist_core::IdentityPolicy::Stable,
            passcode: None,
        }
    }

    fn store() -> LocationStore<MemoryRepository> {
        LocationStore::open(MemoryRepository::default())
    }

    #[test]
    fn add_uses_default_centre_without_coordinates() {
        let mut store = store();
        add(&mut store, &test_config(), None).unwrap();
        assert_eq!(store.locations()[0].coordinate(), test_config().default_center);
    }

    #[test]
    fn add_rejects_out_of_range_coordinates() {
        let mut store = store();
        assert!(add(&mut store, &test_config(), Some((95.0, 0.0))).is_err());
        assert!(store.is_empty());
    }

    #[test]
    fn edit_changes_text_and_keeps_identity() {
        let mut store = store();
        add(&mut store, &test_config(), None).unwrap();
        let id = store.locations()[0].id;

        edit(&mut store, &test_config(), 1, Some("Eiffel Tower".into()), None).unwrap();

        let place = &store.locations()[0];
        assert_eq!(place.id, id);
        assert_eq!(place.name, "Eiffel Tower");
        assert_eq!(store.selection(), None);
        assert_eq!(store.repository().saved.borrow()[0].name, "Eiffel Tower");
    }

    #[test]
    fn edit_rotates_identity_when_configured() {
        let mut store = store();
        add(&mut store, &test_config(), None).unwrap();
        let id = store.locations()[0].id;
        let config = AppConfig {
            edit_identity: bucketlist_core::IdentityPolicy::Rotate,
            ..test_config()
        };

        edit(&mut store, &config, 1, None, Some("Rebuilt".into())).unwrap();

        assert_ne!(store.locations()[0].id, id);
        assert_eq!(store.locations()[0].description, "Rebuilt");
    }

    #[test]
    fn edit_works_without_a_usable_wiki_endpoint() {
        let mut store = store();
        add(&mut store, &test_config(), None).unwrap();
        let config = AppConfig {
            wiki_base_url: "not a url".to_string(),
            ..test_config()
        };

        edit(&mut store, &config, 1, Some("Offline".into()), None).unwrap();

        assert_eq!(store.locations()[0].name, "Offline");
        assert_eq!(store.locations()[0].description, "");
    }

    #[test]
    fn positions_are_one_based_and_checked() {
        let mut store = store();
        for _ in 0..3 {
            add(&mut store, &test_config(), None).unwrap();
        }
        let ids: Vec<_> = store.locations().iter().map(|l| l.id).collect();

        assert!(delete(&mut store, &[0]).is_err());
        assert!(delete(&mut store, &[4]).is_err());
        assert_eq!(store.len(), 3);

        delete(&mut store, &[2]).unwrap();
        let remaining: Vec<_> = store.locations().iter().map(|l| l.id).collect();
        assert_eq!(remaining, vec![ids[0], ids[2]]);
    }
}
