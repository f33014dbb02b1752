// SPDX-FileCopyrightText: 2026 Dossio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Recording mail sender for tests in this crate and downstream crates.

use std::sync::Mutex;

use async_trait::async_trait;
use dossio_core::{DossioError, MailReceipt, MailSender, OutboundEmail};

/// Records every message instead of sending it; optionally fails each send
/// with a configured error.
#[derive(Default)]
pub struct RecordingMailer {
    sent: Mutex<Vec<OutboundEmail>>,
    fail_with: Option<String>,
}

impl RecordingMailer {
    pub fn new() -> Self {
        Self::default()
    }

    /// A mailer whose every send fails with `error`.
    pub fn failing(error: impl Into<String>) -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            fail_with: Some(error.into()),
        }
    }

    /// Snapshot of everything sent so far.
    pub fn sent(&self) -> Vec<OutboundEmail> {
        self.sent.lock().expect("mailer lock poisoned").clone()
    }
}

#[async_trait]
impl MailSender for RecordingMailer {
    async fn send(&self, message: OutboundEmail) -> Result<MailReceipt, DossioError> {
        if let Some(error) = &self.fail_with {
            return Err(DossioError::Mail(error.clone()));
        }
        let mut sent = self.sent.lock().expect("mailer lock poisoned");
        sent.push(message);
        Ok(MailReceipt {
            id: Some(format!("mock-{}", sent.len())),
        })
    }
}
