use std::sync::Arc;

use serde_json::Value;

use super::notification::{DispatchError, NotificationDispatcher};
use super::schema::{validate_cleaning_inquiry, validate_commercial_inquiry, ValidationFailure};
use crate::mail::MailTransport;

pub const CLEANING_INQUIRY_ACCEPTED: &str = "Cleaning inquiry submitted successfully";
pub const COMMERCIAL_INQUIRY_ACCEPTED: &str = "Commercial inquiry submitted successfully";

/// Acknowledgement returned once the notification left for the relay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmissionReceipt {
    pub message: &'static str,
}

/// Service composing schema validation with notification dispatch.
pub struct InquiryService<M> {
    dispatcher: Arc<NotificationDispatcher<M>>,
}

impl<M> InquiryService<M>
where
    M: MailTransport + 'static,
{
    pub fn new(dispatcher: Arc<NotificationDispatcher<M>>) -> Self {
        Self { dispatcher }
    }

    /// Validate a residential quote request and notify the operator.
    pub async fn submit_cleaning(
        &self,
        payload: &Value,
    ) -> Result<SubmissionReceipt, InquiryError> {
        let inquiry = validate_cleaning_inquiry(payload)?;
        self.dispatcher.dispatch(&inquiry).await?;
        Ok(SubmissionReceipt {
            message: CLEANING_INQUIRY_ACCEPTED,
        })
    }

    /// Validate a commercial inquiry and notify the operator.
    pub async fn submit_commercial(
        &self,
        payload: &Value,
    ) -> Result<SubmissionReceipt, InquiryError> {
        let inquiry = validate_commercial_inquiry(payload)?;
        self.dispatcher.dispatch(&inquiry).await?;
        Ok(SubmissionReceipt {
            message: COMMERCIAL_INQUIRY_ACCEPTED,
        })
    }
}

/// Error raised by the inquiry service. Validation always precedes dispatch.
#[derive(Debug, thiserror::Error)]
pub enum InquiryError {
    #[error(transparent)]
    Validation(#[from] ValidationFailure),
    #[error(transparent)]
    Dispatch(#[from] DispatchError),
}
