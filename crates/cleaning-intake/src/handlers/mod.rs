//! Request handling shared by the HTTP router and the function-event adapter.
//!
//! Both boundaries translate their input into an [`ApiRequest`], call
//! [`IntakeHandlers::dispatch`], and translate the [`ApiResponse`] back.

pub mod event;
pub mod router;


use std::collections::HashMap;
use std::sync::Arc;

use axum::body::Bytes;
use axum::http::{header, HeaderValue, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use serde_json::{json, Value};
use tracing::{error, info};

use crate::inquiry::{InquiryError, InquiryService, ValidationFailure};
use crate::mail::MailTransport;
use crate::places::{AddressLookup, LookupError, PlacesGateway};

pub use event::{FunctionEvent, FunctionResponse};
pub use router::{intake_router, BODY_TOO_LARGE, MAX_BODY_BYTES};

pub const INVALID_FORM_DATA: &str = "Invalid form data";
pub const INQUIRY_FAILED: &str = "Failed to process inquiry. Please try again.";
pub const SUGGESTIONS_FAILED: &str = "Failed to fetch suggestions";
pub const DETAILS_FAILED: &str = "Failed to fetch place details";

/// The four public endpoints, each bound to exactly one verb.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    CleaningInquiry,
    CommercialInquiry,
    PlacesAutocomplete,
    PlacesDetails,
}

impl Endpoint {
    pub const ALL: [Endpoint; 4] = [
        Endpoint::CleaningInquiry,
        Endpoint::CommercialInquiry,
        Endpoint::PlacesAutocomplete,
        Endpoint::PlacesDetails,
    ];

    pub fn path(self) -> &'static str {
        match self {
            Endpoint::CleaningInquiry => "/api/cleaning-inquiry",
            Endpoint::CommercialInquiry => "/api/commercial-inquiry",
            Endpoint::PlacesAutocomplete => "/api/places/autocomplete",
            Endpoint::PlacesDetails => "/api/places/details",
        }
    }

    pub fn method(self) -> Method {
        match self {
            Endpoint::CleaningInquiry | Endpoint::CommercialInquiry => Method::POST,
            Endpoint::PlacesAutocomplete | Endpoint::PlacesDetails => Method::GET,
        }
    }

    /// Function name used by the serverless deployment and the `invoke` command.
    pub fn name(self) -> &'static str {
        match self {
            Endpoint::CleaningInquiry => "cleaning-inquiry",
            Endpoint::CommercialInquiry => "commercial-inquiry",
            Endpoint::PlacesAutocomplete => "places-autocomplete",
            Endpoint::PlacesDetails => "places-details",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|endpoint| endpoint.name() == name.trim())
    }

    fn is_inquiry(self) -> bool {
        matches!(self, Endpoint::CleaningInquiry | Endpoint::CommercialInquiry)
    }
}

/// Transport-neutral request.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    pub query: HashMap<String, String>,
    pub body: Bytes,
}

impl ApiRequest {
    pub fn new(method: Method) -> Self {
        Self {
            method,
            query: HashMap::new(),
            body: Bytes::new(),
        }
    }

    pub fn with_query(mut self, key: &str, value: &str) -> Self {
        self.query.insert(key.to_string(), value.to_string());
        self
    }

    pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = body.into();
        self
    }

    fn param(&self, key: &str) -> &str {
        self.query.get(key).map(String::as_str).unwrap_or_default()
    }
}

/// Transport-neutral response. `allow` is set only on 405.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub allow: Option<Method>,
    pub body: Value,
}

impl ApiResponse {
    fn new(status: StatusCode, body: Value) -> Self {
        Self {
            status,
            allow: None,
            body,
        }
    }
}

impl IntoResponse for ApiResponse {
    fn into_response(self) -> Response {
        let mut response = (self.status, axum::Json(self.body)).into_response();
        if let Some(allowed) = self.allow {
            if let Ok(value) = HeaderValue::from_str(allowed.as_str()) {
                response.headers_mut().insert(header::ALLOW, value);
            }
        }
        response
    }
}

/// Every way a request can fail. Upstream and unknown detail stays in the logs.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Validation(#[from] ValidationFailure),
    #[error("{0}")]
    MissingParameter(&'static str),
    #[error("Method {method} not allowed. Allowed: {allowed}")]
    MethodNotAllowed { method: String, allowed: Method },
    #[error("upstream failure: {0}")]
    Upstream(String),
    #[error("unexpected failure: {0}")]
    Unknown(String),
}

impl From<InquiryError> for ApiError {
    fn from(value: InquiryError) -> Self {
        match value {
            InquiryError::Validation(failure) => Self::Validation(failure),
            InquiryError::Dispatch(err) => Self::Upstream(err.to_string()),
        }
    }
}

impl From<LookupError> for ApiError {
    fn from(value: LookupError) -> Self {
        match value {
            LookupError::MissingInput => Self::MissingParameter(crate::places::INPUT_REQUIRED),
            LookupError::MissingPlaceId => {
                Self::MissingParameter(crate::places::PLACE_ID_REQUIRED)
            }
            LookupError::Upstream(err) => Self::Upstream(err.to_string()),
        }
    }
}

impl ApiError {
    /// Render in the response shape of the endpoint family that produced it.
    pub fn render(self, endpoint: Endpoint) -> ApiResponse {
        match self {
            ApiError::MethodNotAllowed { method, allowed } => {
                let body = json!({
                    "message": format!("Method {method} not allowed. Allowed: {allowed}"),
                    "allowed": [allowed.as_str()],
                });
                ApiResponse {
                    status: StatusCode::METHOD_NOT_ALLOWED,
                    allow: Some(allowed),
                    body,
                }
            }
            ApiError::Validation(failure) if endpoint.is_inquiry() => ApiResponse::new(
                StatusCode::BAD_REQUEST,
                json!({
                    "success": false,
                    "message": INVALID_FORM_DATA,
                    "issues": failure.into_issues(),
                }),
            ),
            ApiError::Validation(failure) => {
                let message = failure
                    .issues()
                    .first()
                    .map(|issue| issue.message.clone())
                    .unwrap_or_else(|| INVALID_FORM_DATA.to_string());
                ApiResponse::new(StatusCode::BAD_REQUEST, json!({ "error": message }))
            }
            ApiError::MissingParameter(message) if endpoint.is_inquiry() => ApiResponse::new(
                StatusCode::BAD_REQUEST,
                json!({ "success": false, "message": message }),
            ),
            ApiError::MissingParameter(message) => {
                ApiResponse::new(StatusCode::BAD_REQUEST, json!({ "error": message }))
            }
            ApiError::Upstream(detail) | ApiError::Unknown(detail) => {
                error!(endpoint = endpoint.name(), %detail, "request failed");
                let body = match endpoint {
                    Endpoint::CleaningInquiry | Endpoint::CommercialInquiry => {
                        json!({ "success": false, "message": INQUIRY_FAILED })
                    }
                    Endpoint::PlacesAutocomplete => json!({ "error": SUGGESTIONS_FAILED }),
                    Endpoint::PlacesDetails => json!({ "error": DETAILS_FAILED }),
                };
                ApiResponse::new(StatusCode::INTERNAL_SERVER_ERROR, body)
            }
        }
    }
}

/// The single handler implementation behind every endpoint.
pub struct IntakeHandlers<M, G> {
    inquiries: InquiryService<M>,
    lookup: AddressLookup<G>,
}

impl<M, G> IntakeHandlers<M, G>
where
    M: MailTransport + 'static,
    G: PlacesGateway + 'static,
{
    pub fn new(inquiries: InquiryService<M>, lookup: AddressLookup<G>) -> Self {
        Self { inquiries, lookup }
    }

    pub fn shared(self) -> Arc<Self> {
        Arc::new(self)
    }

    pub async fn dispatch(&self, endpoint: Endpoint, request: ApiRequest) -> ApiResponse {
        match self.handle(endpoint, request).await {
            Ok(body) => ApiResponse::new(StatusCode::OK, body),
            Err(err) => err.render(endpoint),
        }
    }

    async fn handle(&self, endpoint: Endpoint, request: ApiRequest) -> Result<Value, ApiError> {
        let allowed = endpoint.method();
        if request.method != allowed {
            return Err(ApiError::MethodNotAllowed {
                method: request.method.to_string(),
                allowed,
            });
        }

        match endpoint {
            Endpoint::CleaningInquiry => {
                let payload = parse_body(&request.body)?;
                let receipt = self.inquiries.submit_cleaning(&payload).await?;
                info!(endpoint = endpoint.name(), "cleaning inquiry submitted");
                Ok(json!({ "success": true, "message": receipt.message }))
            }
            Endpoint::CommercialInquiry => {
                let payload = parse_body(&request.body)?;
                let receipt = self.inquiries.submit_commercial(&payload).await?;
                info!(endpoint = endpoint.name(), "commercial inquiry submitted");
                Ok(json!({ "success": true, "message": receipt.message }))
            }
            Endpoint::PlacesAutocomplete => Ok(self.lookup.suggest(request.param("input")).await?),
            Endpoint::PlacesDetails => Ok(self.lookup.resolve(request.param("place_id")).await?),
        }
    }
}

/// An empty body reads as `{}`; anything else must be JSON.
fn parse_body(body: &[u8]) -> Result<Value, ValidationFailure> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(json!({}));
    }
    serde_json::from_slice(body)
        .map_err(|_| ValidationFailure::single("body", "Request body must be valid JSON"))
}
