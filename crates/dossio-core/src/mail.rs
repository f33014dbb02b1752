// SPDX-FileCopyrightText: 2026 Dossio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The mail-sender seam.
//!
//! The notification dispatcher talks to the outside world exclusively
//! through [`MailSender`]; the SMTP implementation lives in `dossio-notify`
//! and tests substitute a recording mock.

use async_trait::async_trait;

use crate::error::DossioError;

/// A fully assembled outbound email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundEmail {
    pub to: String,
    pub subject: String,
    pub html: String,
}

/// Receipt returned by a successful send.
#[derive(Debug, Clone, Default)]
pub struct MailReceipt {
    /// Transport-assigned message identifier, when the backend provides one.
    pub id: Option<String>,
}

/// Outbound mail transport.
///
/// Implementations may fail; callers on the status-change path must convert
/// failures into soft outcomes rather than propagating them.
#[async_trait]
pub trait MailSender: Send + Sync {
    async fn send(&self, message: OutboundEmail) -> Result<MailReceipt, DossioError>;
}
