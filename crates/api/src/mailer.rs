//! Outbound mail over async SMTP.
//!
//! Delivery is best-effort: the password-reset endpoint answers 200 no
//! matter what, so send failures are logged here and never surfaced to the
//! caller. With no SMTP configuration the mailer is a no-op.

use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use crate::config::ServerConfig;

pub struct Mailer {
    transport: Option<AsyncSmtpTransport<Tokio1Executor>>,
    from: Option<Mailbox>,
}

impl Mailer {
    /// Build a mailer from server configuration. Missing or invalid SMTP
    /// settings produce a disabled mailer rather than a startup failure.
    pub fn from_config(config: &ServerConfig) -> Self {
        let Some(smtp) = &config.smtp else {
            tracing::info!("SMTP not configured; outbound mail disabled");
            return Self::disabled();
        };

        let from: Mailbox = match format!("{} <{}>", smtp.from_name, smtp.from_address).parse() {
            Ok(mailbox) => mailbox,
            Err(error) => {
                tracing::warn!(%error, "invalid SMTP from address; outbound mail disabled");
                return Self::disabled();
            }
        };

        let transport = match AsyncSmtpTransport::<Tokio1Executor>::relay(&smtp.host) {
            Ok(builder) => builder
                .credentials(Credentials::new(
                    smtp.username.clone(),
                    smtp.password.clone(),
                ))
                .build(),
            Err(error) => {
                tracing::warn!(%error, host = %smtp.host, "invalid SMTP relay; outbound mail disabled");
                return Self::disabled();
            }
        };

        Self {
            transport: Some(transport),
            from: Some(from),
        }
    }

    pub fn disabled() -> Self {
        Self {
            transport: None,
            from: None,
        }
    }

    /// Send a password-reset email. Failures are logged, never returned.
    pub async fn send_password_reset(&self, to_email: &str, to_name: &str, reset_url: &str) {
        let (Some(transport), Some(from)) = (&self.transport, &self.from) else {
            tracing::info!(email = %to_email, "mail disabled; skipping password-reset delivery");
            return;
        };

        let to: Mailbox = match format!("{to_name} <{to_email}>").parse() {
            Ok(mailbox) => mailbox,
            Err(error) => {
                tracing::warn!(%error, email = %to_email, "invalid recipient address");
                return;
            }
        };

        let body = format!(
            "Hi {to_name},\n\n\
             A password reset was requested for your account. Open the link\n\
             below within one hour to choose a new password:\n\n\
             {reset_url}\n\n\
             If you did not request this, you can ignore this email."
        );

        let message = match Message::builder()
            .from(from.clone())
            .to(to)
            .subject("Reset your password")
            .body(body)
        {
            Ok(message) => message,
            Err(error) => {
                tracing::warn!(%error, "failed to build password-reset email");
                return;
            }
        };

        match transport.send(message).await {
            Ok(_) => tracing::debug!(email = %to_email, "password-reset email sent"),
            Err(error) => {
                tracing::warn!(%error, email = %to_email, "failed to send password-reset email");
            }
        }
    }
}
