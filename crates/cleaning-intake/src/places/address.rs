//! Decomposition of a place-details payload into form address fields.
//!
//! The details endpoint proxies the upstream JSON unchanged and the bundled
//! wizard splits it in the browser. This is the same split for Rust callers of
//! the library, such as integrations that consume `/api/places/details`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One entry of a place-details `address_components` array.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AddressComponent {
    pub long_name: String,
    pub short_name: String,
    #[serde(default)]
    pub types: Vec<String>,
}

impl AddressComponent {
    fn is(&self, kind: &str) -> bool {
        self.types.iter().any(|t| t == kind)
    }
}

/// The four address fields the inquiry form fills in after a suggestion is picked.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyAddress {
    pub street_address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
}

impl PropertyAddress {
    /// Later components win when a type appears more than once.
    pub fn from_components(components: &[AddressComponent]) -> Self {
        let mut street_number = "";
        let mut route = "";
        let mut address = Self::default();

        for component in components {
            if component.is("street_number") {
                street_number = component.long_name.as_str();
            }
            if component.is("route") {
                route = component.long_name.as_str();
            }
            if component.is("locality") {
                address.city = component.long_name.clone();
            }
            if component.is("administrative_area_level_1") {
                address.state = component.short_name.clone();
            }
            if component.is("postal_code") {
                address.zip_code = component.long_name.clone();
            }
        }

        address.street_address = format!("{street_number} {route}").trim().to_string();
        address
    }

    /// Reads `result.address_components` out of a raw details payload.
    /// Returns `None` when the payload carries no components.
    pub fn from_details(details: &Value) -> Option<Self> {
        let raw = details.get("result")?.get("address_components")?;
        let components: Vec<AddressComponent> = serde_json::from_value(raw.clone()).ok()?;
        Some(Self::from_components(&components))
    }
}
