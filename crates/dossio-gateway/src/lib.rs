// SPDX-FileCopyrightText: 2026 Dossio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP gateway for Dossio.
//!
//! Thin axum layer over the status workflow and the document renderer. The
//! gateway resolves the acting user from trusted headers set by the
//! fronting identity proxy, translates [`DossioError`] variants into HTTP
//! statuses, and never contains business rules of its own.
//!
//! [`DossioError`]: dossio_core::DossioError

pub mod auth;
pub mod error;
pub mod handlers;
pub mod server;

pub use auth::Actor;
pub use server::{build_router, start_server, GatewayState, ServerConfig};
