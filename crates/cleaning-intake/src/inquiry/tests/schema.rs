use serde_json::{json, Value};

use super::common::*;
use crate::inquiry::domain::{
    AddOn, CleaningType, ContactPreference, HomeCondition, PreferredTime, PropertyType,
    RecurringBasis,
};
use crate::inquiry::schema::{
    validate_cleaning_inquiry, validate_commercial_inquiry, CLUTTER_LEVEL_RANGE, EMAIL_REQUIRED,
    PRIVACY_POLICY_REQUIRED, REFERRAL_NAME_REQUIRED,
};

#[test]
fn valid_payload_produces_typed_record() {
    let inquiry = validate_cleaning_inquiry(&cleaning_payload()).expect("payload is valid");

    assert_eq!(inquiry.property_type, PropertyType::TownhouseCondo);
    assert_eq!(inquiry.street_address, "1200 Barton Springs Rd");
    assert_eq!(inquiry.city, "Austin");
    assert_eq!(inquiry.state, "TX");
    assert_eq!(inquiry.zip_code, "78704");
    assert_eq!(inquiry.cleaning_type, CleaningType::Deep);
    assert_eq!(inquiry.home_condition, HomeCondition::Level2);
    assert_eq!(inquiry.clutter_level, 4);
    assert_eq!(
        inquiry.add_ons.selected(),
        vec![AddOn::InteriorOven, AddOn::InteriorWindows]
    );
    assert_eq!(
        inquiry.specific_requests.as_deref(),
        Some("Please use unscented products")
    );
    assert_eq!(inquiry.preferred_date, "2026-11-03");
    assert_eq!(inquiry.preferred_time, PreferredTime::Afternoon);
    assert!(inquiry.has_pets);
    assert_eq!(inquiry.recurring_basis, RecurringBasis::BiWeekly);
    assert_eq!(inquiry.first_name, "Dana");
    assert_eq!(inquiry.email, "dana@example.com");
    assert!(!inquiry.has_referral);
    assert_eq!(inquiry.referral_name.as_deref(), Some(""));
    assert_eq!(inquiry.preferred_contact, ContactPreference::Text);
    assert!(!inquiry.newsletter_opt_in);
    assert!(inquiry.privacy_policy_agreed);
}

#[test]
fn referral_name_required_when_referred() {
    let payload = with_field(cleaning_payload(), "hasReferral", json!(true));
    let payload = with_field(payload, "referralName", json!(""));

    let failure = validate_cleaning_inquiry(&payload).expect_err("referral name missing");
    assert_eq!(failure.issues().len(), 1);
    assert_eq!(
        failure.message_for("referralName"),
        Some(REFERRAL_NAME_REQUIRED)
    );
}

#[test]
fn whitespace_or_absent_referral_name_counts_as_missing() {
    let padded = with_field(cleaning_payload(), "hasReferral", json!(true));
    let padded = with_field(padded, "referralName", json!("   "));
    assert!(validate_cleaning_inquiry(&padded).is_err());

    let absent = with_field(cleaning_payload(), "hasReferral", json!(true));
    let absent = without_field(absent, "referralName");
    let failure = validate_cleaning_inquiry(&absent).expect_err("referral name absent");
    assert_eq!(
        failure.message_for("referralName"),
        Some(REFERRAL_NAME_REQUIRED)
    );
}

#[test]
fn referral_with_name_is_accepted() {
    let payload = with_field(cleaning_payload(), "hasReferral", json!(true));
    let payload = with_field(payload, "referralName", json!("Jane"));

    let inquiry = validate_cleaning_inquiry(&payload).expect("named referral is valid");
    assert!(inquiry.has_referral);
    assert_eq!(inquiry.referral_name.as_deref(), Some("Jane"));
}

#[test]
fn referral_name_ignored_without_referral() {
    for name in [json!(""), json!("Jane"), Value::Null] {
        let payload = with_field(cleaning_payload(), "referralName", name);
        assert!(validate_cleaning_inquiry(&payload).is_ok());
    }
    let payload = without_field(cleaning_payload(), "referralName");
    assert!(validate_cleaning_inquiry(&payload).is_ok());
}

#[test]
fn privacy_policy_must_be_accepted() {
    let payload = with_field(cleaning_payload(), "privacyPolicyAgreed", json!(false));

    let failure = validate_cleaning_inquiry(&payload).expect_err("privacy policy declined");
    assert_eq!(
        failure.message_for("privacyPolicyAgreed"),
        Some(PRIVACY_POLICY_REQUIRED)
    );
}

#[test]
fn clutter_level_bounds_are_inclusive() {
    for level in [1, 10] {
        let payload = with_field(cleaning_payload(), "clutterLevel", json!(level));
        let inquiry = validate_cleaning_inquiry(&payload).expect("boundary level accepted");
        assert_eq!(inquiry.clutter_level, level);
    }

    for level in [json!(0), json!(11), json!(-3), json!(4.5), json!("5")] {
        let payload = with_field(cleaning_payload(), "clutterLevel", level.clone());
        let failure = validate_cleaning_inquiry(&payload)
            .expect_err(&format!("clutter level {level} must be rejected"));
        assert_eq!(failure.message_for("clutterLevel"), Some(CLUTTER_LEVEL_RANGE));
    }
}

#[test]
fn missing_and_empty_text_share_the_required_message() {
    let empty = with_field(cleaning_payload(), "city", json!(""));
    let missing = without_field(cleaning_payload(), "city");

    for payload in [empty, missing] {
        let failure = validate_cleaning_inquiry(&payload).expect_err("city is required");
        assert_eq!(failure.message_for("city"), Some("City is required"));
    }
}

#[test]
fn unknown_enum_value_lists_expected_options() {
    let payload = with_field(cleaning_payload(), "preferredTime", json!("evening"));

    let failure = validate_cleaning_inquiry(&payload).expect_err("unknown time slot");
    assert_eq!(
        failure.message_for("preferredTime"),
        Some("Invalid preferred time. Expected one of: morning, afternoon")
    );
}

#[test]
fn every_violation_is_reported_in_field_order() {
    let payload = json!({
        "propertyType": "castle",
        "hasReferral": true,
        "privacyPolicyAgreed": false
    });

    let failure = validate_cleaning_inquiry(&payload).expect_err("mostly empty payload");
    let fields: Vec<&str> = failure
        .issues()
        .iter()
        .map(|issue| issue.field.as_str())
        .collect();

    assert_eq!(fields.first(), Some(&"propertyType"));
    assert!(fields.contains(&"streetAddress"));
    assert!(fields.contains(&"addOns"));
    assert!(fields.contains(&"email"));
    assert_eq!(fields.last(), Some(&"referralName"), "referral rule runs last");

    let privacy = fields
        .iter()
        .position(|field| *field == "privacyPolicyAgreed")
        .expect("privacy issue recorded");
    let street = fields
        .iter()
        .position(|field| *field == "streetAddress")
        .expect("street issue recorded");
    assert!(street < privacy);
}

#[test]
fn add_on_flags_must_be_booleans() {
    let mut payload = cleaning_payload();
    payload["addOns"]["dishes"] = json!("yes");
    payload["addOns"]
        .as_object_mut()
        .expect("addOns object")
        .remove("baseboards");

    let failure = validate_cleaning_inquiry(&payload).expect_err("bad add-on flags");
    assert_eq!(
        failure.message_for("addOns.dishes"),
        Some("addOns.dishes must be true or false")
    );
    assert!(failure.message_for("addOns.baseboards").is_some());
}

#[test]
fn non_object_payload_is_rejected() {
    let failure = validate_cleaning_inquiry(&json!(["not", "an", "object"]))
        .expect_err("arrays are not forms");
    assert_eq!(failure.issues().len(), 1);
    assert_eq!(failure.issues()[0].field, "body");
}

#[test]
fn minimal_commercial_inquiry_is_valid() {
    let inquiry = validate_commercial_inquiry(&commercial_payload()).expect("minimal payload");
    assert_eq!(inquiry.first_name, "A");
    assert_eq!(inquiry.company_name, "C");
    assert_eq!(inquiry.email, "a@b.com");
    assert_eq!(inquiry.message, "hi");
}

#[test]
fn commercial_inquiry_requires_valid_email_and_message() {
    let payload = with_field(commercial_payload(), "email", json!("not-an-email"));
    let payload = with_field(payload, "message", json!(""));

    let failure = validate_commercial_inquiry(&payload).expect_err("bad commercial payload");
    assert_eq!(failure.message_for("email"), Some(EMAIL_REQUIRED));
    assert_eq!(failure.message_for("message"), Some("Message is required"));
    assert_eq!(failure.issues().len(), 2);
}

#[test]
fn email_domain_must_be_dotted() {
    for rejected in ["a@b", "dana@localhost", "dana@example.", "dana.example.com"] {
        let payload = with_field(commercial_payload(), "email", json!(rejected));
        let failure = validate_commercial_inquiry(&payload)
            .expect_err(&format!("{rejected} must be rejected"));
        assert_eq!(failure.message_for("email"), Some(EMAIL_REQUIRED));
    }

    for accepted in ["a@b.co", "dana.whitfield+quotes@mail.example.com"] {
        let payload = with_field(commercial_payload(), "email", json!(accepted));
        assert!(
            validate_commercial_inquiry(&payload).is_ok(),
            "{accepted} should be accepted"
        );
    }
}
