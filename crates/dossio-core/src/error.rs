// SPDX-FileCopyrightText: 2026 Dossio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Dossio dossier-management core.

use thiserror::Error;

use crate::types::Statut;

/// The primary error type used across all Dossio crates.
///
/// Notification failures are deliberately absent: the dispatcher converts
/// mail errors into a soft [`crate::mail::MailSender`] outcome before they
/// reach any caller, per the best-effort contract of the status workflow.
#[derive(Debug, Error)]
pub enum DossioError {
    /// A referenced entity does not exist. Client error, not retried.
    #[error("{what} introuvable (id {id})")]
    NotFound { what: &'static str, id: i64 },

    /// The actor lacks ownership/admin rights for the requested action.
    #[error("accès refusé: {0}")]
    Forbidden(String),

    /// The requested status change violates the transition table.
    ///
    /// The message always cites both the source and target status so a UI
    /// can explain why the action is blocked.
    #[error("transition invalide de {from} vers {to}: {reason}")]
    InvalidTransition {
        from: Statut,
        to: Statut,
        reason: String,
    },

    /// Malformed request payload (missing required identifiers, bad values).
    #[error("requête invalide: {0}")]
    Validation(String),

    /// The document renderer could not produce output.
    ///
    /// Distinct from [`DossioError::Validation`]: this originates from the
    /// rendering stage, only ever for missing required identity fields.
    #[error("génération du document impossible: {0}")]
    Render(String),

    /// Persistence failure. Fatal: aborts the operation, nothing committed.
    #[error("storage error: {source}")]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Mail transport failure. Internal to the notification dispatcher,
    /// which converts it into a soft `{sent: false}` outcome.
    #[error("mail error: {0}")]
    Mail(String),

    /// Configuration errors (invalid TOML, missing required fields).
    #[error("configuration error: {0}")]
    Config(String),
}

impl DossioError {
    /// Shorthand for a storage error wrapping any boxable source.
    pub fn storage(source: impl std::error::Error + Send + Sync + 'static) -> Self {
        DossioError::Storage {
            source: Box::new(source),
        }
    }
}
