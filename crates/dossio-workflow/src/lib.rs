// SPDX-FileCopyrightText: 2026 Dossio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Dossier status workflow.
//!
//! [`StatusService`] orchestrates one status change as a coherent unit:
//! load, authorize, consult the transition table, persist the transition
//! field set, then append the audit entry and dispatch the notification as
//! best-effort follow-ups. The persistence commit is the durability
//! boundary; nothing after it can roll the change back.
//!
//! Intake, draft deletion, historique reads and document generation go
//! through the same service so every mutation lands in the audit log.

pub mod service;

pub use service::{
    ChangeStatutOutcome, ChangeStatutRequest, DocumentOptions, StatusService,
};
