use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::config::MailConfig;
use crate::mail::{MailError, MailTransport, OutboundMessage};

pub(crate) const RECIPIENT: &str = "office@sparkle.example";
pub(crate) const SENDER: &str = "quotes@sparkle.example";

pub(crate) fn mail_config() -> MailConfig {
    MailConfig {
        host: Some("smtp.sparkle.example".to_string()),
        port: 587,
        username: Some(SENDER.to_string()),
        password: Some("relay-secret".to_string()),
        recipient: Some(RECIPIENT.to_string()),
        from_name: "Cleaning Service".to_string(),
    }
}

pub(crate) fn cleaning_payload() -> Value {
    json!({
        "propertyType": "townhouse_condo",
        "streetAddress": "1200 Barton Springs Rd",
        "city": "Austin",
        "state": "TX",
        "zipCode": "78704",
        "cleaningType": "deep",
        "homeCondition": "level_2",
        "clutterLevel": 4,
        "addOns": {
            "interiorOven": true,
            "interiorFridge": false,
            "dishes": false,
            "interiorWindows": true,
            "baseboards": false,
            "wallSpotCleaning": false,
            "patioBalcony": false,
            "petHairRemoval": false
        },
        "specificRequests": "Please use unscented products",
        "preferredDate": "2026-11-03",
        "preferredTime": "afternoon",
        "hasPets": true,
        "recurringBasis": "bi_weekly",
        "firstName": "Dana",
        "lastName": "Whitfield",
        "phone": "(512) 555-0142",
        "email": "dana@example.com",
        "hasReferral": false,
        "referralName": "",
        "preferredContact": "text",
        "newsletterOptIn": false,
        "privacyPolicyAgreed": true
    })
}

pub(crate) fn commercial_payload() -> Value {
    json!({
        "firstName": "A",
        "lastName": "B",
        "companyName": "C",
        "phone": "1",
        "email": "a@b.com",
        "message": "hi"
    })
}

pub(crate) fn with_field(mut payload: Value, key: &str, value: Value) -> Value {
    payload
        .as_object_mut()
        .expect("payload is an object")
        .insert(key.to_string(), value);
    payload
}

pub(crate) fn without_field(mut payload: Value, key: &str) -> Value {
    payload
        .as_object_mut()
        .expect("payload is an object")
        .remove(key);
    payload
}

#[derive(Default)]
pub(crate) struct RecordingTransport {
    sent: Mutex<Vec<OutboundMessage>>,
}

impl RecordingTransport {
    pub(crate) fn sent(&self) -> Vec<OutboundMessage> {
        self.sent.lock().expect("transport mutex poisoned").clone()
    }
}

#[async_trait]
impl MailTransport for RecordingTransport {
    async fn send(&self, message: OutboundMessage) -> Result<(), MailError> {
        self.sent
            .lock()
            .expect("transport mutex poisoned")
            .push(message);
        Ok(())
    }
}

pub(crate) struct RejectingTransport;

#[async_trait]
impl MailTransport for RejectingTransport {
    async fn send(&self, _message: OutboundMessage) -> Result<(), MailError> {
        Err(MailError::Transport(
            "550 5.7.1 relay access denied for 10.0.0.7".to_string(),
        ))
    }
}
