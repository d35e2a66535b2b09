use std::path::PathBuf;

use crate::location::{Coordinate, IdentityPolicy};

/// File name of the saved-places store inside [`AppConfig::data_dir`].
pub const SAVED_PLACES_FILE: &str = "SavedPlaces";

#[derive(Clone)]
pub struct AppConfig {
    pub log_level: String,
    pub data_dir: PathBuf,
    pub default_center: Coordinate,
    pub wiki_base_url: String,
    /// `None` leaves the HTTP client without an overall request timeout.
    pub wiki_timeout_secs: Option<u64>,
    pub user_agent: String,
    pub edit_identity: IdentityPolicy,
    /// Passcode accepted by the terminal unlock prompt; `None` means no
    /// passcode method is configured.
    pub passcode: Option<String>,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("log_level", &self.log_level)
            .field("data_dir", &self.data_dir)
            .field("default_center", &self.default_center)
            .field("wiki_base_url", &self.wiki_base_url)
            .field("wiki_timeout_secs", &self.wiki_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("edit_identity", &self.edit_identity)
            .field("passcode", &self.passcode.as_ref().map(|_| "[redacted]"))
            .finish()
    }
}

impl AppConfig {
    /// Full path of the saved-places store file.
    #[must_use]
    pub fn saved_places_path(&self) -> PathBuf {
        self.data_dir.join(SAVED_PLACES_FILE)
    }
}
