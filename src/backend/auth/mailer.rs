/**
 * Confirmation Mail Delivery
 *
 * Registration sends a confirmation link through a `Mailer`. With SMTP
 * settings present the server uses `SmtpMailer` (lettre over tokio);
 * otherwise `LogMailer` writes the link to the log, which is what local
 * development and the tests use.
 */

use async_trait::async_trait;
use lettre::{
    message::{header::ContentType, Mailbox},
    transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use thiserror::Error;

use crate::shared::MailConfig;

pub const CONFIRMATION_SUBJECT: &str = "Please confirm your email";

/// Mail delivery failures
#[derive(Debug, Error)]
pub enum MailError {
    #[error("invalid address: {0}")]
    Address(#[from] lettre::address::AddressError),

    #[error("could not build message: {0}")]
    Message(#[from] lettre::error::Error),

    #[error("smtp failure: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),
}

/// Outgoing mail sink
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), MailError>;
}

/// Body of the confirmation mail
pub fn confirmation_body(username: &str, link: &str) -> String {
    format!(
        "Hi {},\n\nWelcome! Please follow this link to activate your account:\n\n{}\n\nThe link expires in one hour.\n",
        username, link
    )
}

/// Logs outgoing mail instead of delivering it
#[derive(Debug, Default, Clone)]
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), MailError> {
        tracing::info!(to = %to, subject = %subject, "Mail not delivered (no SMTP server configured):\n{}", body);
        Ok(())
    }
}

/// SMTP delivery through lettre
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    sender: Mailbox,
}

impl SmtpMailer {
    /// Build the transport from mail settings
    ///
    /// `use_ssl` selects implicit TLS, `use_tls` STARTTLS, neither a plain
    /// connection.
    pub fn new(config: &MailConfig) -> Result<Self, MailError> {
        let sender: Mailbox = config.default_sender.parse()?;
        let builder = if config.use_ssl {
            AsyncSmtpTransport::<Tokio1Executor>::relay(&config.server)?
        } else if config.use_tls {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.server)?
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&config.server)
        };

        let builder = builder.port(config.port);
        let builder = match (&config.username, &config.password) {
            (Some(username), Some(password)) => {
                builder.credentials(Credentials::new(username.clone(), password.clone()))
            }
            _ => builder,
        };

        Ok(Self {
            transport: builder.build(),
            sender,
        })
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), MailError> {
        let message = Message::builder()
            .from(self.sender.clone())
            .to(to.parse()?)
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(body.to_string())?;

        self.transport.send(message).await?;
        tracing::info!("Confirmation mail sent to {}", to);
        Ok(())
    }
}
