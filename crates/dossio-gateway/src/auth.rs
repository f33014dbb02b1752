// SPDX-FileCopyrightText: 2026 Dossio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Actor resolution middleware.
//!
//! Authentication itself is out of scope: a fronting proxy has already
//! verified the session and forwards the result as `x-actor-id` and
//! `x-actor-role` headers. Requests without both valid headers are
//! rejected (fail-closed).

use std::str::FromStr;

use axum::{
    extract::Request,
    http::StatusCode,
    middleware::Next,
    response::Response,
};
use dossio_core::ActorRole;

/// The authenticated user a request acts as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
    pub id: i64,
    pub role: ActorRole,
}

/// Middleware resolving the [`Actor`] from the identity headers and
/// injecting it as a request extension.
pub async fn actor_middleware(mut request: Request, next: Next) -> Result<Response, StatusCode> {
    let id = header_value(&request, "x-actor-id").and_then(|v| v.parse::<i64>().ok());
    let role = header_value(&request, "x-actor-role").and_then(|v| ActorRole::from_str(v).ok());

    match (id, role) {
        (Some(id), Some(role)) => {
            request.extensions_mut().insert(Actor { id, role });
            Ok(next.run(request).await)
        }
        _ => {
            tracing::debug!("request rejected: missing or invalid actor headers");
            Err(StatusCode::UNAUTHORIZED)
        }
    }
}

fn header_value<'a>(request: &'a Request, name: &str) -> Option<&'a str> {
    request.headers().get(name).and_then(|v| v.to_str().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_header_parses_snake_case() {
        assert_eq!(ActorRole::from_str("admin").unwrap(), ActorRole::Admin);
        assert_eq!(
            ActorRole::from_str("entreprise").unwrap(),
            ActorRole::Entreprise
        );
        assert!(ActorRole::from_str("superuser").is_err());
    }
}
