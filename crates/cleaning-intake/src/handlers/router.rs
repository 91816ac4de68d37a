use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    extract::{Query, Request, State},
    response::{IntoResponse, Response},
    routing::any,
    Router,
};
use tracing::debug;

use super::{ApiError, ApiRequest, Endpoint, IntakeHandlers};
use crate::inquiry::ValidationFailure;
use crate::mail::MailTransport;
use crate::places::PlacesGateway;

pub const MAX_BODY_BYTES: usize = 64 * 1024;
pub const BODY_TOO_LARGE: &str = "Request body is too large";

/// Router exposing the inquiry and address lookup endpoints.
///
/// Every verb is routed so that the shared handler answers 405 itself.
pub fn intake_router<M, G>(handlers: Arc<IntakeHandlers<M, G>>) -> Router
where
    M: MailTransport + 'static,
    G: PlacesGateway + 'static,
{
    Router::new()
        .route(
            Endpoint::CleaningInquiry.path(),
            any(cleaning_inquiry_handler::<M, G>),
        )
        .route(
            Endpoint::CommercialInquiry.path(),
            any(commercial_inquiry_handler::<M, G>),
        )
        .route(
            Endpoint::PlacesAutocomplete.path(),
            any(places_autocomplete_handler::<M, G>),
        )
        .route(
            Endpoint::PlacesDetails.path(),
            any(places_details_handler::<M, G>),
        )
        .with_state(handlers)
}

pub(crate) async fn cleaning_inquiry_handler<M, G>(
    State(handlers): State<Arc<IntakeHandlers<M, G>>>,
    request: Request,
) -> Response
where
    M: MailTransport + 'static,
    G: PlacesGateway + 'static,
{
    forward(&handlers, Endpoint::CleaningInquiry, request).await
}

pub(crate) async fn commercial_inquiry_handler<M, G>(
    State(handlers): State<Arc<IntakeHandlers<M, G>>>,
    request: Request,
) -> Response
where
    M: MailTransport + 'static,
    G: PlacesGateway + 'static,
{
    forward(&handlers, Endpoint::CommercialInquiry, request).await
}

pub(crate) async fn places_autocomplete_handler<M, G>(
    State(handlers): State<Arc<IntakeHandlers<M, G>>>,
    request: Request,
) -> Response
where
    M: MailTransport + 'static,
    G: PlacesGateway + 'static,
{
    forward(&handlers, Endpoint::PlacesAutocomplete, request).await
}

pub(crate) async fn places_details_handler<M, G>(
    State(handlers): State<Arc<IntakeHandlers<M, G>>>,
    request: Request,
) -> Response
where
    M: MailTransport + 'static,
    G: PlacesGateway + 'static,
{
    forward(&handlers, Endpoint::PlacesDetails, request).await
}

async fn forward<M, G>(
    handlers: &IntakeHandlers<M, G>,
    endpoint: Endpoint,
    request: Request,
) -> Response
where
    M: MailTransport + 'static,
    G: PlacesGateway + 'static,
{
    let (parts, body) = request.into_parts();
    // A malformed query string reads as no parameters, which the lookup rejects.
    let query = Query::<HashMap<String, String>>::try_from_uri(&parts.uri)
        .map(|Query(query)| query)
        .unwrap_or_default();

    // The verb is checked before the body is touched, so a 405 never depends on the payload.
    let allowed = endpoint.method();
    if parts.method != allowed {
        let method = parts.method.to_string();
        return ApiError::MethodNotAllowed { method, allowed }
            .render(endpoint)
            .into_response();
    }

    let body = match axum::body::to_bytes(body, MAX_BODY_BYTES).await {
        Ok(body) => body,
        Err(err) => {
            debug!(endpoint = endpoint.name(), %err, "request body rejected");
            return ApiError::Validation(ValidationFailure::single("body", BODY_TOO_LARGE))
                .render(endpoint)
                .into_response();
        }
    };

    let request = ApiRequest {
        method: parts.method,
        query,
        body,
    };
    handlers.dispatch(endpoint, request).await.into_response()
}
