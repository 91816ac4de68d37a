//! Address autocomplete proxy backed by a geocoding upstream.

pub mod address;
pub mod google;

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

pub use address::{AddressComponent, PropertyAddress};
pub use google::GooglePlacesClient;

pub const INPUT_REQUIRED: &str = "Input parameter is required";
pub const PLACE_ID_REQUIRED: &str = "Place ID parameter is required";

/// Failures talking to the geocoding service. Always the server's problem, never the caller's.
#[derive(Debug, thiserror::Error)]
pub enum PlacesError {
    #[error("Google Places API key not configured")]
    MissingApiKey,
    #[error("Google Places API request failed with status {0}")]
    Status(u16),
    #[error("Google Places API request failed: {0}")]
    Request(#[from] reqwest::Error),
}

/// Upstream geocoding calls. Responses are returned as raw JSON.
#[async_trait]
pub trait PlacesGateway: Send + Sync {
    async fn autocomplete(&self, input: &str) -> Result<Value, PlacesError>;
    async fn details(&self, place_id: &str) -> Result<Value, PlacesError>;
}

#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    #[error("Input parameter is required")]
    MissingInput,
    #[error("Place ID parameter is required")]
    MissingPlaceId,
    #[error(transparent)]
    Upstream(#[from] PlacesError),
}

/// Validates lookup parameters before any upstream call is made.
pub struct AddressLookup<G> {
    gateway: Arc<G>,
}

impl<G> AddressLookup<G>
where
    G: PlacesGateway + 'static,
{
    pub fn new(gateway: Arc<G>) -> Self {
        Self { gateway }
    }

    /// Address suggestions for a partially typed address.
    pub async fn suggest(&self, fragment: &str) -> Result<Value, LookupError> {
        let fragment = fragment.trim();
        if fragment.is_empty() {
            return Err(LookupError::MissingInput);
        }
        Ok(self.gateway.autocomplete(fragment).await?)
    }

    /// Address components for a place picked from the suggestions.
    pub async fn resolve(&self, place_id: &str) -> Result<Value, LookupError> {
        let place_id = place_id.trim();
        if place_id.is_empty() {
            return Err(LookupError::MissingPlaceId);
        }
        Ok(self.gateway.details(place_id).await?)
    }
}
