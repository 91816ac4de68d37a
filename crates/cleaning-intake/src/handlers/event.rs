use std::collections::{BTreeMap, HashMap};

use axum::http::Method;
use serde::{Deserialize, Serialize};

use super::{ApiError, ApiRequest, ApiResponse, Endpoint, IntakeHandlers};
use crate::mail::MailTransport;
use crate::places::PlacesGateway;

/// Serverless function invocation payload.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionEvent {
    pub http_method: String,
    #[serde(default)]
    pub query_string_parameters: Option<HashMap<String, String>>,
    #[serde(default)]
    pub body: Option<String>,
}

/// Serverless function result; `body` is serialized JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionResponse {
    pub status_code: u16,
    pub headers: BTreeMap<String, String>,
    pub body: String,
}

impl FunctionEvent {
    fn into_request(self, endpoint: Endpoint) -> Result<ApiRequest, ApiError> {
        let method = Method::from_bytes(self.http_method.trim().to_ascii_uppercase().as_bytes())
            .map_err(|_| ApiError::MethodNotAllowed {
                method: self.http_method.clone(),
                allowed: endpoint.method(),
            })?;
        Ok(ApiRequest {
            method,
            query: self.query_string_parameters.unwrap_or_default(),
            body: self.body.unwrap_or_default().into(),
        })
    }
}

impl From<ApiResponse> for FunctionResponse {
    fn from(response: ApiResponse) -> Self {
        let mut headers = BTreeMap::new();
        headers.insert(
            "Content-Type".to_string(),
            mime::APPLICATION_JSON.to_string(),
        );
        if let Some(allowed) = &response.allow {
            headers.insert("Allow".to_string(), allowed.to_string());
        }
        Self {
            status_code: response.status.as_u16(),
            headers,
            body: response.body.to_string(),
        }
    }
}

impl<M, G> IntakeHandlers<M, G>
where
    M: MailTransport + 'static,
    G: PlacesGateway + 'static,
{
    /// Function-event entry point. Runs the same handler as the HTTP router.
    pub async fn invoke(&self, endpoint: Endpoint, event: FunctionEvent) -> FunctionResponse {
        let response = match event.into_request(endpoint) {
            Ok(request) => self.dispatch(endpoint, request).await,
            Err(err) => err.render(endpoint),
        };
        response.into()
    }
}
