//! Outbound mail relay.

use async_trait::async_trait;
use lettre::address::AddressError;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Address, AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::{debug, warn};

use crate::config::MailConfig;

/// A fully addressed HTML message ready for the relay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundMessage {
    pub from_name: String,
    pub from_address: String,
    pub to: String,
    pub subject: String,
    pub html_body: String,
}

#[derive(Debug, thiserror::Error)]
pub enum MailError {
    #[error("mail relay is not configured (SMTP_HOST missing)")]
    NotConfigured,
    #[error("invalid mail address: {0}")]
    Address(#[from] AddressError),
    #[error("unable to build message: {0}")]
    Message(#[from] lettre::error::Error),
    #[error("mail relay rejected the message: {0}")]
    Relay(#[from] lettre::transport::smtp::Error),
    #[error("mail transport unavailable: {0}")]
    Transport(String),
}

/// Boundary to whatever actually delivers mail, so dispatch can be exercised with fakes.
#[async_trait]
pub trait MailTransport: Send + Sync {
    async fn send(&self, message: OutboundMessage) -> Result<(), MailError>;
}

/// SMTP relay client. Without `SMTP_HOST` it still builds, and every send fails.
#[derive(Clone)]
pub struct SmtpMailer {
    transport: Option<AsyncSmtpTransport<Tokio1Executor>>,
}

impl SmtpMailer {
    pub fn from_config(config: &MailConfig) -> Result<Self, MailError> {
        let Some(host) = config.host.as_deref() else {
            warn!("SMTP_HOST not set; inquiry notifications will fail until configured");
            return Ok(Self { transport: None });
        };

        let builder = if config.implicit_tls() {
            AsyncSmtpTransport::<Tokio1Executor>::relay(host)?
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(host)?
        };

        let builder = builder.port(config.port);
        let builder = match (&config.username, &config.password) {
            (Some(user), Some(pass)) => {
                builder.credentials(Credentials::new(user.clone(), pass.clone()))
            }
            _ => builder,
        };

        Ok(Self {
            transport: Some(builder.build()),
        })
    }

    fn build_message(message: OutboundMessage) -> Result<Message, MailError> {
        let from = Mailbox::new(
            Some(message.from_name),
            message.from_address.parse::<Address>()?,
        );
        let to = Mailbox::new(None, message.to.parse::<Address>()?);

        let built = Message::builder()
            .from(from)
            .to(to)
            .subject(message.subject)
            .header(ContentType::TEXT_HTML)
            .body(message.html_body)?;
        Ok(built)
    }
}

impl std::fmt::Debug for SmtpMailer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmtpMailer")
            .field("configured", &self.transport.is_some())
            .finish()
    }
}

#[async_trait]
impl MailTransport for SmtpMailer {
    async fn send(&self, message: OutboundMessage) -> Result<(), MailError> {
        let transport = self.transport.as_ref().ok_or(MailError::NotConfigured)?;
        let email = Self::build_message(message)?;
        let response = transport.send(email).await?;
        debug!(code = %response.code(), "mail relay accepted message");
        Ok(())
    }
}
