use tracing::{debug, instrument};

use crate::fetch_error::FetchError;
use crate::utils;

/// Resolves a station name to its numeric identifier via the site's
/// station-search endpoint. The lookup happens once per run.
#[derive(Clone)]
pub struct StationLocator {
    client: reqwest::Client,
    base_url: String,
}

impl StationLocator {
    pub fn new() -> Self {
        Self::with_base_url("https://www.meteociel.fr".to_string())
    }

    /// Create a locator against a custom base URL (for mocking)
    pub fn with_base_url(base_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
        }
    }

    #[instrument(skip(self), fields(base_url = %self.base_url))]
    pub async fn find_station_id(&self, station_name: &str) -> Result<String, FetchError> {
        let url = format!(
            "{}/temps-reel/lieuhelper.php?mode=findstation&str={}",
            self.base_url, station_name
        );

        debug!("Looking up station ID for '{}'", station_name);
        let response = self.client.get(&url).send().await?.error_for_status()?;
        debug!("Received HTTP response with status: {}", response.status());

        let body = response.text().await?;
        debug!("Lookup response: {}", body.trim());

        // Response format: 7156|Paris-Montsouris (75)|0|75|0|1716185221
        utils::extract_station_id(&body).map_err(|_| FetchError::ParseError)
    }
}

impl Default for StationLocator {
    fn default() -> Self {
        Self::new()
    }
}
