//! Field rules for the two intake forms.
//!
//! Every rule runs against the untyped payload and failures are collected in
//! declaration order, so a single response can point at every bad field. The
//! referral rule is the only cross-field check and runs after the field pass.

use std::ops::RangeInclusive;

use serde::Serialize;
use serde_json::{Map, Value};
use validator::ValidateEmail;

use super::domain::{
    AddOn, AddOns, CleaningInquiry, CleaningType, CommercialInquiry, ContactPreference,
    FormChoice, HomeCondition, PreferredTime, PropertyType, RecurringBasis,
};

pub const REFERRAL_NAME_REQUIRED: &str = "Please provide the name of who referred you";
pub const PRIVACY_POLICY_REQUIRED: &str = "You must agree to the Privacy Policy";
pub const EMAIL_REQUIRED: &str = "Valid email is required";
pub const CLUTTER_LEVEL_RANGE: &str = "Clutter level must be a whole number between 1 and 10";

const CLUTTER_LEVELS: RangeInclusive<u8> = 1..=10;

/// A single violated rule, addressed by the payload key (dotted for nested keys).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldIssue {
    pub field: String,
    pub message: String,
}

/// Every rule a payload violated. Always non-empty.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid form data ({} issue(s))", .issues.len())]
pub struct ValidationFailure {
    issues: Vec<FieldIssue>,
}

impl ValidationFailure {
    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            issues: vec![FieldIssue {
                field: field.into(),
                message: message.into(),
            }],
        }
    }

    pub fn issues(&self) -> &[FieldIssue] {
        &self.issues
    }

    pub fn into_issues(self) -> Vec<FieldIssue> {
        self.issues
    }

    /// First message recorded against `field`, if any.
    pub fn message_for(&self, field: &str) -> Option<&str> {
        self.issues
            .iter()
            .find(|issue| issue.field == field)
            .map(|issue| issue.message.as_str())
    }
}

/// Cursor over a JSON object that records a [`FieldIssue`] for every failed read.
///
/// Failed reads hand back a placeholder value; the placeholders never escape
/// because [`FieldReader::finish`] rejects the payload when any issue exists.
struct FieldReader<'a> {
    object: &'a Map<String, Value>,
    issues: Vec<FieldIssue>,
}

impl<'a> FieldReader<'a> {
    fn new(payload: &'a Value) -> Result<Self, ValidationFailure> {
        match payload {
            Value::Object(object) => Ok(Self {
                object,
                issues: Vec::new(),
            }),
            _ => Err(ValidationFailure::single(
                "body",
                "Request body must be a JSON object",
            )),
        }
    }

    fn lookup(&self, path: &str) -> Option<&'a Value> {
        let object: &'a Map<String, Value> = self.object;
        let mut segments = path.split('.');
        let mut current = object.get(segments.next()?)?;
        for segment in segments {
            current = current.as_object()?.get(segment)?;
        }
        Some(current)
    }

    fn reject(&mut self, field: &str, message: impl Into<String>) {
        self.issues.push(FieldIssue {
            field: field.to_string(),
            message: message.into(),
        });
    }

    fn has_issue(&self, field: &str) -> bool {
        self.issues.iter().any(|issue| issue.field == field)
    }

    /// Missing, `null`, non-string and empty values all fail.
    fn required_text(&mut self, field: &str, message: &str) -> String {
        match self.lookup(field) {
            Some(Value::String(text)) if !text.is_empty() => text.clone(),
            _ => {
                self.reject(field, message);
                String::new()
            }
        }
    }

    fn optional_text(&mut self, field: &str) -> Option<String> {
        match self.lookup(field) {
            None | Some(Value::Null) => None,
            Some(Value::String(text)) => Some(text.clone()),
            Some(_) => {
                self.reject(field, format!("{field} must be text"));
                None
            }
        }
    }

    fn email(&mut self, field: &str) -> String {
        match self.lookup(field) {
            Some(Value::String(text)) if is_routable_email(text) => text.clone(),
            _ => {
                self.reject(field, EMAIL_REQUIRED);
                String::new()
            }
        }
    }

    fn choice<T: FormChoice>(&mut self, field: &str) -> T {
        let parsed = self
            .lookup(field)
            .and_then(Value::as_str)
            .and_then(T::from_key);

        match parsed {
            Some(choice) => choice,
            None => {
                let expected = T::ordered()
                    .iter()
                    .map(|choice| choice.key())
                    .collect::<Vec<_>>()
                    .join(", ");
                self.reject(
                    field,
                    format!("Invalid {}. Expected one of: {expected}", T::NOUN),
                );
                T::default()
            }
        }
    }

    fn flag(&mut self, field: &str) -> bool {
        match self.lookup(field) {
            Some(Value::Bool(value)) => *value,
            _ => {
                self.reject(field, format!("{field} must be true or false"));
                false
            }
        }
    }

    /// A boolean that must be `true`.
    fn accepted(&mut self, field: &str, message: &str) -> bool {
        match self.lookup(field) {
            Some(Value::Bool(true)) => true,
            Some(Value::Bool(false)) => {
                self.reject(field, message);
                false
            }
            _ => {
                self.reject(field, format!("{field} must be true or false"));
                false
            }
        }
    }

    fn whole_number(&mut self, field: &str, range: RangeInclusive<u8>, message: &str) -> u8 {
        let value = self
            .lookup(field)
            .and_then(Value::as_i64)
            .and_then(|number| u8::try_from(number).ok())
            .filter(|number| range.contains(number));

        match value {
            Some(number) => number,
            None => {
                self.reject(field, message);
                *range.start()
            }
        }
    }

    fn add_ons(&mut self, field: &str) -> AddOns {
        let mut add_ons = AddOns::default();
        if !matches!(self.lookup(field), Some(Value::Object(_))) {
            self.reject(field, "Add-on selections are required");
            return add_ons;
        }

        for add_on in AddOn::ordered() {
            let selected = self.flag(&format!("{field}.{}", add_on.key()));
            add_ons.set(add_on, selected);
        }
        add_ons
    }

    fn finish(self) -> Result<(), ValidationFailure> {
        if self.issues.is_empty() {
            Ok(())
        } else {
            Err(ValidationFailure {
                issues: self.issues,
            })
        }
    }
}

/// Validate a residential quote request.
pub fn validate_cleaning_inquiry(payload: &Value) -> Result<CleaningInquiry, ValidationFailure> {
    let mut reader = FieldReader::new(payload)?;

    let property_type = reader.choice::<PropertyType>("propertyType");
    let street_address = reader.required_text("streetAddress", "Street address is required");
    let city = reader.required_text("city", "City is required");
    let state = reader.required_text("state", "State is required");
    let zip_code = reader.required_text("zipCode", "ZIP code is required");

    let cleaning_type = reader.choice::<CleaningType>("cleaningType");

    let home_condition = reader.choice::<HomeCondition>("homeCondition");
    let clutter_level = reader.whole_number("clutterLevel", CLUTTER_LEVELS, CLUTTER_LEVEL_RANGE);

    let add_ons = reader.add_ons("addOns");
    let specific_requests = reader.optional_text("specificRequests");

    let preferred_date = reader.required_text("preferredDate", "Preferred date is required");
    let preferred_time = reader.choice::<PreferredTime>("preferredTime");
    let has_pets = reader.flag("hasPets");
    let recurring_basis = reader.choice::<RecurringBasis>("recurringBasis");

    let first_name = reader.required_text("firstName", "First name is required");
    let last_name = reader.required_text("lastName", "Last name is required");
    let phone = reader.required_text("phone", "Phone number is required");
    let email = reader.email("email");
    let has_referral = reader.flag("hasReferral");
    let referral_name = reader.optional_text("referralName");
    let preferred_contact = reader.choice::<ContactPreference>("preferredContact");
    let newsletter_opt_in = reader.flag("newsletterOptIn");
    let privacy_policy_agreed = reader.accepted("privacyPolicyAgreed", PRIVACY_POLICY_REQUIRED);

    let referral_blank = referral_name
        .as_deref()
        .map_or(true, |name| name.trim().is_empty());
    if has_referral && referral_blank && !reader.has_issue("referralName") {
        reader.reject("referralName", REFERRAL_NAME_REQUIRED);
    }

    reader.finish()?;

    Ok(CleaningInquiry {
        property_type,
        street_address,
        city,
        state,
        zip_code,
        cleaning_type,
        home_condition,
        clutter_level,
        add_ons,
        specific_requests,
        preferred_date,
        preferred_time,
        has_pets,
        recurring_basis,
        first_name,
        last_name,
        phone,
        email,
        has_referral,
        referral_name,
        preferred_contact,
        newsletter_opt_in,
        privacy_policy_agreed,
    })
}

/// Syntax check plus a dotted domain; `a@b` passes RFC syntax but is never a customer inbox.
fn is_routable_email(text: &str) -> bool {
    text.validate_email()
        && text
            .rsplit_once('@')
            .is_some_and(|(_, domain)| domain.contains('.') && !domain.ends_with('.'))
}

/// Validate a commercial inquiry.
pub fn validate_commercial_inquiry(
    payload: &Value,
) -> Result<CommercialInquiry, ValidationFailure> {
    let mut reader = FieldReader::new(payload)?;

    let first_name = reader.required_text("firstName", "First name is required");
    let last_name = reader.required_text("lastName", "Last name is required");
    let company_name = reader.required_text("companyName", "Company name is required");
    let phone = reader.required_text("phone", "Phone number is required");
    let email = reader.email("email");
    let message = reader.required_text("message", "Message is required");

    reader.finish()?;

    Ok(CommercialInquiry {
        first_name,
        last_name,
        company_name,
        phone,
        email,
        message,
    })
}
