use std::sync::Arc;

use chrono::NaiveDate;
use tracing::info;

use super::domain::{CleaningInquiry, CommercialInquiry, FormChoice};
use crate::config::MailConfig;
use crate::mail::{MailError, MailTransport, OutboundMessage};

const STYLE: &str = "\
body { font-family: Arial, sans-serif; line-height: 1.6; color: #333; max-width: 800px; margin: 0 auto; padding: 20px; }
.header { background: linear-gradient(135deg, #8b5cf6 0%, #6d28d9 100%); color: white; padding: 30px; border-radius: 8px; margin-bottom: 30px; }
.section { background: #f9fafb; border: 1px solid #e5e7eb; border-radius: 8px; padding: 20px; margin-bottom: 20px; }
.section h2 { color: #8b5cf6; margin-top: 0; margin-bottom: 15px; font-size: 18px; border-bottom: 2px solid #8b5cf6; padding-bottom: 8px; }
.field { margin-bottom: 12px; }
.field strong { color: #374151; display: inline-block; min-width: 180px; }
.add-ons { display: flex; flex-wrap: wrap; gap: 8px; margin-top: 8px; }
.add-on-tag { background: #8b5cf6; color: white; padding: 4px 12px; border-radius: 4px; font-size: 14px; }
.message { background: white; border: 1px solid #e5e7eb; border-radius: 4px; padding: 15px; margin-top: 10px; white-space: pre-wrap; }
";

/// Subject line and HTML body for one operator notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedNotification {
    pub subject: String,
    pub html_body: String,
}

/// A validated record that can be turned into an operator notification.
pub trait Notification {
    fn render(&self) -> RenderedNotification;
}

impl Notification for CleaningInquiry {
    fn render(&self) -> RenderedNotification {
        let property = self.property_type.label();
        let mut html = HtmlDocument::new(
            "NEW Cleaning Quote Request",
            &format!("{property} — {}", self.city),
        );

        html.section("I. CUSTOMER INFO");
        html.field("Name", &format!("{} {}", self.first_name, self.last_name));
        html.field("Phone", &self.phone);
        html.field("Email", &self.email);
        html.field("Preferred Contact", self.preferred_contact.label());
        if self.has_referral {
            if let Some(referrer) = self
                .referral_name
                .as_deref()
                .filter(|name| !name.trim().is_empty())
            {
                html.field("Referred By", referrer);
            }
        }
        html.field("Newsletter", yes_no(self.newsletter_opt_in));
        html.end_section();

        html.section("II. PROPERTY DETAILS");
        html.field("Type", property);
        html.field(
            "Address",
            &format!(
                "{}, {}, {} {}",
                self.street_address, self.city, self.state, self.zip_code
            ),
        );
        html.field("Cleaning Type", self.cleaning_type.label());
        html.end_section();

        html.section("III. CONDITION & ADD-ONS");
        html.field("Home Condition", self.home_condition.label());
        html.field("Clutter Level", &format!("{}/10", self.clutter_level));
        let selected = self.add_ons.selected();
        if selected.is_empty() {
            html.field("Selected Add-Ons", "None");
        } else {
            let tags: Vec<&str> = selected.iter().map(|add_on| add_on.label()).collect();
            html.tag_list("Selected Add-Ons", &tags);
        }
        if let Some(requests) = self.specific_requests.as_deref() {
            if !requests.trim().is_empty() {
                html.block_field("Specific Requests", requests);
            }
        }
        html.end_section();

        html.section("IV. SCHEDULING");
        html.field("Preferred Date", &display_date(&self.preferred_date));
        html.field("Preferred Time", self.preferred_time.label());
        html.field("Pets", yes_no(self.has_pets));
        html.field("Recurring", self.recurring_basis.label());
        html.end_section();

        RenderedNotification {
            subject: format!(
                "NEW Cleaning Quote Request: {} — {}",
                self.property_type.key().replace('_', " "),
                self.city
            ),
            html_body: html.finish(),
        }
    }
}

impl Notification for CommercialInquiry {
    fn render(&self) -> RenderedNotification {
        let mut html = HtmlDocument::new("NEW Commercial Cleaning Inquiry", &self.company_name);

        html.section("CONTACT INFORMATION");
        html.field("Name", &format!("{} {}", self.first_name, self.last_name));
        html.field("Company", &self.company_name);
        html.field("Phone", &self.phone);
        html.field("Email", &self.email);
        html.end_section();

        html.section("MESSAGE");
        html.message(&self.message);
        html.end_section();

        RenderedNotification {
            subject: format!("NEW Commercial Cleaning Inquiry: {}", self.company_name),
            html_body: html.finish(),
        }
    }
}

fn yes_no(value: bool) -> &'static str {
    if value {
        "Yes"
    } else {
        "No"
    }
}

/// ISO dates from the date picker read better spelled out; anything else passes through.
fn display_date(raw: &str) -> String {
    match NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d") {
        Ok(date) => format!("{} ({raw})", date.format("%A, %B %-d, %Y")),
        Err(_) => raw.to_string(),
    }
}

fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// Minimal builder for the sectioned notification layout. All text is escaped on the way in.
struct HtmlDocument {
    body: String,
}

impl HtmlDocument {
    fn new(title: &str, subtitle: &str) -> Self {
        let mut body = String::from("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<style>\n");
        body.push_str(STYLE);
        body.push_str("</style>\n</head>\n<body>\n");
        body.push_str(&format!(
            "<div class=\"header\">\n<h1 style=\"margin: 0; font-size: 28px;\">{}</h1>\n<p style=\"margin: 10px 0 0 0; opacity: 0.9;\">{}</p>\n</div>\n",
            escape_html(title),
            escape_html(subtitle)
        ));
        Self { body }
    }

    fn section(&mut self, heading: &str) {
        self.body.push_str(&format!(
            "<div class=\"section\">\n<h2>{}</h2>\n",
            escape_html(heading)
        ));
    }

    fn end_section(&mut self) {
        self.body.push_str("</div>\n");
    }

    fn field(&mut self, label: &str, value: &str) {
        self.body.push_str(&format!(
            "<div class=\"field\"><strong>{}:</strong> {}</div>\n",
            escape_html(label),
            escape_html(value)
        ));
    }

    fn block_field(&mut self, label: &str, value: &str) {
        self.body.push_str(&format!(
            "<div class=\"field\"><strong>{}:</strong><br>{}</div>\n",
            escape_html(label),
            escape_html(value)
        ));
    }

    fn tag_list(&mut self, label: &str, tags: &[&str]) {
        let rendered: String = tags
            .iter()
            .map(|tag| format!("<span class=\"add-on-tag\">{}</span>", escape_html(tag)))
            .collect();
        self.body.push_str(&format!(
            "<div class=\"field\"><strong>{}:</strong>\n<div class=\"add-ons\">{rendered}</div>\n</div>\n",
            escape_html(label)
        ));
    }

    fn message(&mut self, text: &str) {
        self.body.push_str(&format!(
            "<div class=\"message\">{}</div>\n",
            escape_html(text)
        ));
    }

    fn finish(mut self) -> String {
        self.body.push_str("</body>\n</html>\n");
        self.body
    }
}

/// Errors raised while handing a notification to the relay.
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error("{0} is not configured")]
    MissingSetting(&'static str),
    #[error(transparent)]
    Mail(#[from] MailError),
}

/// Renders validated inquiries and sends each one to the operator inbox.
pub struct NotificationDispatcher<M> {
    transport: Arc<M>,
    sender_name: String,
    sender_address: Option<String>,
    recipient: Option<String>,
}

impl<M> NotificationDispatcher<M>
where
    M: MailTransport + 'static,
{
    pub fn new(transport: Arc<M>, config: &MailConfig) -> Self {
        Self {
            transport,
            sender_name: config.from_name.clone(),
            sender_address: config.username.clone(),
            recipient: config.recipient.clone(),
        }
    }

    /// Send exactly one message. No retry; the relay's answer is final.
    pub async fn dispatch<N: Notification>(&self, notification: &N) -> Result<(), DispatchError> {
        let recipient = self
            .recipient
            .clone()
            .ok_or(DispatchError::MissingSetting("RECIPIENT_EMAIL"))?;
        let from_address = self
            .sender_address
            .clone()
            .ok_or(DispatchError::MissingSetting("SMTP_USER"))?;

        let RenderedNotification { subject, html_body } = notification.render();
        info!(%subject, "dispatching inquiry notification");

        self.transport
            .send(OutboundMessage {
                from_name: self.sender_name.clone(),
                from_address,
                to: recipient,
                subject,
                html_body,
            })
            .await?;
        Ok(())
    }
}
