use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::debug;

use super::{PlacesError, PlacesGateway};
use crate::config::PlacesConfig;

/// Google Places web service client.
#[derive(Clone)]
pub struct GooglePlacesClient {
    http: Client,
    base_url: String,
    api_key: Option<String>,
    country: String,
}

impl GooglePlacesClient {
    pub fn new(config: &PlacesConfig) -> Self {
        Self::with_client(Client::new(), config)
    }

    pub fn with_client(http: Client, config: &PlacesConfig) -> Self {
        Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            country: config.country.clone(),
        }
    }

    async fn request(&self, endpoint: &str, params: &[(&str, &str)]) -> Result<Value, PlacesError> {
        let api_key = self.api_key.as_deref().ok_or(PlacesError::MissingApiKey)?;
        let url = format!("{}/{endpoint}", self.base_url);

        // The key rides in the query string, so URLs are stripped from transport errors.
        let response = self
            .http
            .get(&url)
            .query(params)
            .query(&[("key", api_key)])
            .send()
            .await
            .map_err(|err| PlacesError::Request(err.without_url()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(PlacesError::Status(status.as_u16()));
        }

        debug!(%endpoint, "places upstream responded");
        response
            .json::<Value>()
            .await
            .map_err(|err| PlacesError::Request(err.without_url()))
    }
}

impl std::fmt::Debug for GooglePlacesClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GooglePlacesClient")
            .field("base_url", &self.base_url)
            .field("country", &self.country)
            .field("has_api_key", &self.api_key.is_some())
            .finish()
    }
}

#[async_trait]
impl PlacesGateway for GooglePlacesClient {
    async fn autocomplete(&self, input: &str) -> Result<Value, PlacesError> {
        let components = format!("country:{}", self.country);
        self.request(
            "autocomplete/json",
            &[
                ("input", input),
                ("types", "address"),
                ("components", components.as_str()),
            ],
        )
        .await
    }

    async fn details(&self, place_id: &str) -> Result<Value, PlacesError> {
        self.request(
            "details/json",
            &[("place_id", place_id), ("fields", "address_components")],
        )
        .await
    }
}
