// SPDX-FileCopyrightText: 2026 Dossio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for Dossio, the OPCO training-dossier manager.
//!
//! This crate provides the domain types, the lifecycle transition table,
//! the error taxonomy, money/date formatting and the mail-sender trait
//! used throughout the Dossio workspace. It performs no I/O.

pub mod error;
pub mod format;
pub mod mail;
pub mod transition;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::DossioError;
pub use mail::{MailReceipt, MailSender, OutboundEmail};
pub use transition::{decide, Decision, DenialReason};
pub use types::{
    ActorRole, Beneficiaire, Dossier, Entreprise, HistoriqueAction, HistoriqueDetails,
    HistoriqueEntry, Statut, TypeDossier,
};
