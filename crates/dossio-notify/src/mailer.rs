// SPDX-FileCopyrightText: 2026 Dossio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mail transports: real SMTP over lettre, and a no-op for disabled setups.

use async_trait::async_trait;
use dossio_config::SmtpConfig;
use dossio_core::{DossioError, MailReceipt, MailSender, OutboundEmail};
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::info;

/// SMTP transport built from the `[smtp]` config section.
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpMailer {
    /// Build the relay connection. Fails fast on a malformed host or sender
    /// address; actual connectivity is only tested on first send.
    pub fn from_config(config: &SmtpConfig) -> Result<Self, DossioError> {
        let host = config
            .host
            .as_deref()
            .ok_or_else(|| DossioError::Config("smtp.host manquant".into()))?;
        let from: Mailbox = config
            .from
            .as_deref()
            .ok_or_else(|| DossioError::Config("smtp.from manquant".into()))?
            .parse()
            .map_err(|e| DossioError::Config(format!("smtp.from invalide: {e}")))?;

        let mut builder = AsyncSmtpTransport::<Tokio1Executor>::relay(host)
            .map_err(|e| DossioError::Mail(format!("relais SMTP {host}: {e}")))?;
        if let Some(port) = config.port {
            builder = builder.port(port);
        }
        if let (Some(username), Some(password)) = (&config.username, &config.password) {
            builder = builder.credentials(Credentials::new(username.clone(), password.clone()));
        }

        info!(host, "SMTP transport configured");
        Ok(Self {
            transport: builder.build(),
            from,
        })
    }
}

#[async_trait]
impl MailSender for SmtpMailer {
    async fn send(&self, message: OutboundEmail) -> Result<MailReceipt, DossioError> {
        let to: Mailbox = message
            .to
            .parse()
            .map_err(|e| DossioError::Mail(format!("destinataire invalide: {e}")))?;
        let email = Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(message.subject)
            .header(ContentType::TEXT_HTML)
            .body(message.html)
            .map_err(|e| DossioError::Mail(format!("construction du message: {e}")))?;

        let response = self
            .transport
            .send(email)
            .await
            .map_err(|e| DossioError::Mail(e.to_string()))?;

        Ok(MailReceipt {
            id: Some(response.code().to_string()),
        })
    }
}

/// Transport used when `smtp.enabled = false`: accepts nothing, so every
/// notification surfaces as `sent: false` with an explanatory error.
pub struct NoopMailer;

#[async_trait]
impl MailSender for NoopMailer {
    async fn send(&self, _message: OutboundEmail) -> Result<MailReceipt, DossioError> {
        Err(DossioError::Mail("envoi SMTP désactivé".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_config_rejects_missing_host() {
        let config = SmtpConfig {
            enabled: true,
            host: None,
            port: None,
            username: None,
            password: None,
            from: Some("Dossio <no-reply@example.fr>".into()),
        };
        assert!(matches!(
            SmtpMailer::from_config(&config),
            Err(DossioError::Config(_))
        ));
    }

    #[test]
    fn from_config_rejects_malformed_sender() {
        let config = SmtpConfig {
            enabled: true,
            host: Some("smtp.example.fr".into()),
            port: Some(587),
            username: None,
            password: None,
            from: Some("pas une adresse".into()),
        };
        assert!(matches!(
            SmtpMailer::from_config(&config),
            Err(DossioError::Config(_))
        ));
    }

    #[tokio::test]
    async fn noop_mailer_reports_disabled() {
        let err = NoopMailer
            .send(OutboundEmail {
                to: "claire.martin@example.fr".into(),
                subject: "test".into(),
                html: "<p>test</p>".into(),
            })
            .await
            .unwrap_err();
        assert!(err.to_string().contains("désactivé"));
    }
}
