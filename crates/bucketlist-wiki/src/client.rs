//! HTTP client for the MediaWiki geosearch query.
//!
//! One endpoint, one call: [`WikiClient::nearby_pages`] asks for up to 50
//! pages within 10 km of a coordinate, with thumbnails and description terms.

use std::time::Duration;

use bucketlist_core::{AppConfig, Coordinate};
use reqwest::{Client, Url};
use tracing::debug;

use crate::error::WikiError;
use crate::types::{GeoSearchResponse, Page};

const DEFAULT_BASE_URL: &str = "https://en.wikipedia.org/w/api.php";

const SEARCH_RADIUS: &str = "10000";
const RESULT_LIMIT: &str = "50";
const THUMBNAIL_SIZE: &str = "500";

/// Client for the geosearch endpoint.
///
/// Cheap to clone; clones share the underlying connection pool. Use
/// [`WikiClient::with_base_url`] to point at a mock server in tests.
#[derive(Debug, Clone)]
pub struct WikiClient {
    client: Client,
    base_url: Url,
}

impl WikiClient {
    /// Creates a client pointed at English Wikipedia.
    ///
    /// # Errors
    ///
    /// Returns [`WikiError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(user_agent: &str, timeout_secs: Option<u64>) -> Result<Self, WikiError> {
        Self::with_base_url(DEFAULT_BASE_URL, user_agent, timeout_secs)
    }

    /// Creates a client from the application configuration.
    ///
    /// # Errors
    ///
    /// See [`WikiClient::with_base_url`].
    pub fn from_config(config: &AppConfig) -> Result<Self, WikiError> {
        Self::with_base_url(
            &config.wiki_base_url,
            &config.user_agent,
            config.wiki_timeout_secs,
        )
    }

    /// Creates a client for a custom endpoint URL.
    ///
    /// Without `timeout_secs` requests have no overall deadline beyond the
    /// connect timeout.
    ///
    /// # Errors
    ///
    /// Returns [`WikiError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`WikiError::InvalidBaseUrl`] if `base_url`
    /// does not parse.
    pub fn with_base_url(
        base_url: &str,
        user_agent: &str,
        timeout_secs: Option<u64>,
    ) -> Result<Self, WikiError> {
        let mut builder = Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent);
        if let Some(secs) = timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build()?;

        let base_url = Url::parse(base_url).map_err(|e| WikiError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self { client, base_url })
    }

    /// Fetches the pages near `at`, in the order the API listed them.
    ///
    /// # Errors
    ///
    /// - [`WikiError::Http`] on network failure or non-2xx HTTP status.
    /// - [`WikiError::Deserialize`] if the body does not match the expected shape.
    pub async fn nearby_pages(&self, at: Coordinate) -> Result<Vec<Page>, WikiError> {
        let url = self.geosearch_url(at);
        debug!(%url, "geosearch request");

        let response = self.client.get(url.clone()).send().await?;
        let response = response.error_for_status()?;
        let body = response.text().await?;

        let parsed: GeoSearchResponse =
            serde_json::from_str(&body).map_err(|e| WikiError::Deserialize {
                context: format!("geosearch({}|{})", at.latitude, at.longitude),
                source: e,
            })?;
        Ok(parsed.into_pages())
    }

    /// Builds the geosearch URL for `at` with properly percent-encoded parameters.
    #[must_use]
    pub fn geosearch_url(&self, at: Coordinate) -> Url {
        let coord = format!("{}|{}", at.latitude, at.longitude);
        let mut url = self.base_url.clone();
        url.query_pairs_mut()
            .append_pair("ggscoord", &coord)
            .append_pair("action", "query")
            .append_pair("prop", "coordinates|pageimages|pageterms")
            .append_pair("colimit", RESULT_LIMIT)
            .append_pair("piprop", "thumbnail")
            .append_pair("pithumbsize", THUMBNAIL_SIZE)
            .append_pair("pilimit", RESULT_LIMIT)
            .append_pair("wbptterms", "description")
            .append_pair("generator", "geosearch")
            .append_pair("ggsradius", SEARCH_RADIUS)
            .append_pair("ggslimit", RESULT_LIMIT)
            .append_pair("format", "json");
        url
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
