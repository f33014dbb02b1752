// SPDX-FileCopyrightText: 2026 Dossio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Gateway HTTP server built on axum.
//!
//! Sets up routes, middleware, and shared state.

use axum::{
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use dossio_core::DossioError;
use dossio_workflow::StatusService;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::auth::actor_middleware;
use crate::handlers;

/// Shared state for axum request handlers.
#[derive(Clone)]
pub struct GatewayState {
    /// The workflow service; the gateway holds no other state.
    pub service: StatusService,
}

/// Gateway server configuration (mirrors `GatewayConfig` from dossio-config).
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Build the full router. Exposed separately from [`start_server`] so tests
/// can drive it in-process with `tower::ServiceExt::oneshot`.
pub fn build_router(state: GatewayState) -> Router {
    // Unauthenticated public route (liveness for systemd and load balancers).
    let public_routes = Router::new().route("/health", get(handlers::get_health));

    // Routes requiring a resolved actor.
    let api_routes = Router::new()
        .route("/v1/dossiers", post(handlers::post_dossiers))
        .route(
            "/v1/dossiers/{id}",
            get(handlers::get_dossier).delete(handlers::delete_dossier),
        )
        .route("/v1/dossiers/{id}/statut", post(handlers::post_statut))
        .route("/v1/dossiers/{id}/historique", get(handlers::get_historique))
        .route("/v1/documents", post(handlers::post_document))
        .route_layer(axum_middleware::from_fn(actor_middleware))
        .with_state(state);

    Router::new()
        .merge(public_routes)
        .merge(api_routes)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

/// Bind and serve until the process is stopped.
pub async fn start_server(config: &ServerConfig, state: GatewayState) -> Result<(), DossioError> {
    let app = build_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| DossioError::Config(format!("liaison du serveur sur {addr}: {e}")))?;

    tracing::info!("gateway listening on {addr}");

    axum::serve(listener, app)
        .await
        .map_err(|e| DossioError::Config(format!("serveur HTTP: {e}")))?;

    Ok(())
}
