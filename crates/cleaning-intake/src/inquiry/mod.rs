//! Residential and commercial inquiry intake: schema rules, notification
//! rendering and the service tying them to the mail relay.

pub mod domain;
pub mod notification;
pub mod schema;
pub mod service;

#[cfg(test)]
pub(crate) mod tests;

pub use domain::{
    AddOn, AddOns, CleaningInquiry, CleaningType, CommercialInquiry, ContactPreference,
    FormChoice, HomeCondition, PreferredTime, PropertyType, RecurringBasis,
};
pub use notification::{DispatchError, Notification, NotificationDispatcher, RenderedNotification};
pub use schema::{
    validate_cleaning_inquiry, validate_commercial_inquiry, FieldIssue, ValidationFailure,
};
pub use service::{
    InquiryError, InquiryService, SubmissionReceipt, CLEANING_INQUIRY_ACCEPTED,
    COMMERCIAL_INQUIRY_ACCEPTED,
};
