use cleaning_intake::config::{MailConfig, PlacesConfig};
use cleaning_intake::error::AppError;
use cleaning_intake::handlers::IntakeHandlers;
use cleaning_intake::inquiry::{InquiryService, NotificationDispatcher};
use cleaning_intake::mail::SmtpMailer;
use cleaning_intake::places::{AddressLookup, GooglePlacesClient};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

pub(crate) type LiveHandlers = IntakeHandlers<SmtpMailer, GooglePlacesClient>;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Wire the SMTP relay and the Places client into the shared handlers.
pub(crate) fn build_handlers(
    mail: &MailConfig,
    places: &PlacesConfig,
) -> Result<Arc<LiveHandlers>, AppError> {
    let mailer = Arc::new(SmtpMailer::from_config(mail)?);
    let dispatcher = NotificationDispatcher::new(mailer, mail);
    let lookup = AddressLookup::new(Arc::new(GooglePlacesClient::new(places)));

    Ok(IntakeHandlers::new(InquiryService::new(Arc::new(dispatcher)), lookup).shared())
}
