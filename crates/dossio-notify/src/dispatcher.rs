// SPDX-FileCopyrightText: 2026 Dossio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Best-effort notification dispatch.

use std::sync::Arc;
use std::time::Duration;

use dossio_core::{Dossier, Entreprise, MailSender, Statut};
use tracing::{debug, warn};

use crate::payload::NotificationPayload;
use crate::templates::EmailTemplate;

/// What happened to one notification attempt.
///
/// `sent: false` covers all of: no template for the status, transport
/// failure, and timeout. The `error` field distinguishes the latter two.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationOutcome {
    pub sent: bool,
    /// Template identifier, when the status maps to one.
    pub template: Option<&'static str>,
    pub error: Option<String>,
}

impl NotificationOutcome {
    fn skipped() -> Self {
        Self {
            sent: false,
            template: None,
            error: None,
        }
    }

    fn sent(template: EmailTemplate) -> Self {
        Self {
            sent: true,
            template: Some(template.name()),
            error: None,
        }
    }

    fn failed(template: EmailTemplate, error: String) -> Self {
        Self {
            sent: false,
            template: Some(template.name()),
            error: Some(error),
        }
    }
}

/// Maps a committed status to a template and drives the mail sender.
///
/// `dispatch` never returns `Err`: the status change it follows is already
/// durable, so the worst a mail problem can do is produce a warning.
#[derive(Clone)]
pub struct Dispatcher {
    mailer: Arc<dyn MailSender>,
    timeout: Duration,
}

impl Dispatcher {
    pub fn new(mailer: Arc<dyn MailSender>, timeout: Duration) -> Self {
        Self { mailer, timeout }
    }

    pub async fn dispatch(
        &self,
        dossier: &Dossier,
        entreprise: &Entreprise,
        nouveau_statut: Statut,
    ) -> NotificationOutcome {
        let Some(template) = EmailTemplate::for_statut(nouveau_statut) else {
            debug!(dossier_id = dossier.id, statut = %nouveau_statut, "no notification for status");
            return NotificationOutcome::skipped();
        };

        let payload = NotificationPayload::from_dossier(dossier, entreprise);
        let message = template.render(&payload);
        let to = message.to.clone();

        match tokio::time::timeout(self.timeout, self.mailer.send(message)).await {
            Ok(Ok(receipt)) => {
                debug!(
                    dossier_id = dossier.id,
                    template = template.name(),
                    %to,
                    message_id = receipt.id.as_deref().unwrap_or("-"),
                    "notification sent"
                );
                NotificationOutcome::sent(template)
            }
            Ok(Err(err)) => {
                warn!(
                    dossier_id = dossier.id,
                    template = template.name(),
                    %err,
                    "notification failed"
                );
                NotificationOutcome::failed(template, err.to_string())
            }
            Err(_) => {
                warn!(
                    dossier_id = dossier.id,
                    template = template.name(),
                    timeout_secs = self.timeout.as_secs(),
                    "mail sender timed out"
                );
                NotificationOutcome::failed(
                    template,
                    format!("délai de {} s dépassé", self.timeout.as_secs()),
                )
            }
        }
    }
}
