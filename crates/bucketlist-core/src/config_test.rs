use std::collections::HashMap;
use std::env::VarError;

use super::*;

fn lookup_from_map<'a>(
    map: &'a HashMap<&'a str, &'a str>,
) -> impl Fn(&str) -> Result<String, VarError> + 'a {
    move |key| {
        map.get(key)
            .map(|v| (*v).to_string())
            .ok_or(VarError::NotPresent)
    }
}

#[test]
fn build_app_config_succeeds_with_empty_env() {
    let map: HashMap<&str, &str> = HashMap::new();
    let cfg = build_app_config(lookup_from_map(&map)).expect("defaults should be valid");
    assert_eq!(cfg.log_level, "info");
    assert_eq!(cfg.data_dir, std::path::PathBuf::from("./data"));
    assert_eq!(
        cfg.saved_places_path(),
        std::path::PathBuf::from("./data/SavedPlaces")
    );
    assert_eq!(
        cfg.default_center,
        Coordinate {
            latitude: 50.0,
            longitude: 0.0
        }
    );
    assert_eq!(cfg.wiki_base_url, "https://en.wikipedia.org/w/api.php");
    assert!(cfg.wiki_timeout_secs.is_none());
    assert_eq!(cfg.user_agent, "bucketlist/0.1 (nearby-places)");
    assert_eq!(cfg.edit_identity, IdentityPolicy::Stable);
    assert!(cfg.passcode.is_none());
}

#[test]
fn build_app_config_reads_overrides() {
    let mut map = HashMap::new();
    map.insert("BUCKETLIST_DATA_DIR", "/var/lib/bucketlist");
    map.insert("BUCKETLIST_DEFAULT_LATITUDE", "51.5");
    map.insert("BUCKETLIST_DEFAULT_LONGITUDE", "-0.12");
    map.insert("BUCKETLIST_WIKI_TIMEOUT_SECS", "15");
    map.insert("BUCKETLIST_EDIT_IDENTITY", "rotate");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.data_dir, std::path::PathBuf::from("/var/lib/bucketlist"));
    assert_eq!(
        cfg.default_center,
        Coordinate {
            latitude: 51.5,
            longitude: -0.12
        }
    );
    assert_eq!(cfg.wiki_timeout_secs, Some(15));
    assert_eq!(cfg.edit_identity, IdentityPolicy::Rotate);
}

#[test]
fn build_app_config_ignores_unrelated_variables() {
    let empty: HashMap<&str, &str> = HashMap::new();
    let mut map = HashMap::new();
    map.insert("BUCKETLIST_ENV", "production");
    map.insert("RUST_LOG", "debug");
    let baseline = build_app_config(lookup_from_map(&empty)).unwrap();
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(format!("{cfg:?}"), format!("{baseline:?}"));
}

#[test]
fn build_app_config_treats_blank_timeout_as_unset() {
    let mut map = HashMap::new();
    map.insert("BUCKETLIST_WIKI_TIMEOUT_SECS", "  ");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert!(cfg.wiki_timeout_secs.is_none());
}

#[test]
fn build_app_config_fails_with_invalid_timeout() {
    let mut map = HashMap::new();
    map.insert("BUCKETLIST_WIKI_TIMEOUT_SECS", "soon");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "BUCKETLIST_WIKI_TIMEOUT_SECS"),
        "expected InvalidEnvVar(BUCKETLIST_WIKI_TIMEOUT_SECS), got: {result:?}"
    );
}

#[test]
fn build_app_config_fails_with_unparseable_latitude() {
    let mut map = HashMap::new();
    map.insert("BUCKETLIST_DEFAULT_LATITUDE", "north");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "BUCKETLIST_DEFAULT_LATITUDE"),
        "expected InvalidEnvVar(BUCKETLIST_DEFAULT_LATITUDE), got: {result:?}"
    );
}

#[test]
fn build_app_config_fails_with_out_of_range_center() {
    let mut map = HashMap::new();
    map.insert("BUCKETLIST_DEFAULT_LATITUDE", "123");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var.starts_with("BUCKETLIST_DEFAULT_")),
        "expected InvalidEnvVar for the default centre, got: {result:?}"
    );
}

#[test]
fn build_app_config_fails_with_unknown_identity_policy() {
    let mut map = HashMap::new();
    map.insert("BUCKETLIST_EDIT_IDENTITY", "sometimes");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "BUCKETLIST_EDIT_IDENTITY"),
        "expected InvalidEnvVar(BUCKETLIST_EDIT_IDENTITY), got: {result:?}"
    );
}

#[test]
fn empty_passcode_counts_as_unset() {
    let mut map = HashMap::new();
    map.insert("BUCKETLIST_PASSCODE", "");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert!(cfg.passcode.is_none());
}

#[test]
fn debug_output_redacts_passcode() {
    let mut map = HashMap::new();
    map.insert("BUCKETLIST_PASSCODE", "1234-secret");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.passcode.as_deref(), Some("1234-secret"));
    let rendered = format!("{cfg:?}");
    assert!(!rendered.contains("1234-secret"));
    assert!(rendered.contains("[redacted]"));
}
