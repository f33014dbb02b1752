// SPDX-FileCopyrightText: 2026 Dossio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Status-change email notifications.
//!
//! A status transition maps to at most one email template; the dispatcher
//! assembles the payload, renders the template and hands the message to the
//! [`MailSender`](dossio_core::MailSender) behind a timeout. Every failure
//! mode is folded into a [`NotificationOutcome`] so a mail problem can never
//! fail the status change that triggered it.

pub mod dispatcher;
pub mod mailer;
pub mod mock;
pub mod payload;
pub mod templates;

pub use dispatcher::{Dispatcher, NotificationOutcome};
pub use mailer::{NoopMailer, SmtpMailer};
pub use payload::NotificationPayload;
pub use templates::EmailTemplate;
