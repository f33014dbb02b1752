// SPDX-FileCopyrightText: 2026 Dossio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP request handlers for the Dossio REST API.

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Extension, Json,
};
use chrono::NaiveDate;
use dossio_core::{Beneficiaire, Dossier, HistoriqueEntry, Statut, TypeDossier};
use dossio_docgen::{DocumentKind, Seance};
use dossio_notify::NotificationOutcome;
use dossio_storage::NewDossier;
use dossio_workflow::{ChangeStatutRequest, DocumentOptions};
use serde::{Deserialize, Serialize};

use crate::auth::Actor;
use crate::error::ApiError;
use crate::server::GatewayState;

/// Request body for POST /v1/dossiers.
#[derive(Debug, Deserialize)]
pub struct CreateDossierRequest {
    #[serde(default)]
    pub reference: Option<String>,
    pub type_dossier: TypeDossier,
    pub entreprise_id: i64,
    pub beneficiaire: Beneficiaire,
    #[serde(default)]
    pub montant_estime: Option<f64>,
    #[serde(default)]
    pub heures_total: Option<f64>,
    #[serde(default)]
    pub date_debut: Option<NaiveDate>,
    #[serde(default)]
    pub date_fin: Option<NaiveDate>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Request body for POST /v1/dossiers/{id}/statut.
#[derive(Debug, Deserialize)]
pub struct ChangeStatutBody {
    pub nouveau_statut: Statut,
    #[serde(default)]
    pub motif_refus: Option<String>,
    /// Defaults to true: the email is part of the lifecycle contract.
    #[serde(default = "default_notify")]
    pub notify: bool,
}

fn default_notify() -> bool {
    true
}

/// Response body for a committed status change.
#[derive(Debug, Serialize)]
pub struct StatutResponse {
    pub success: bool,
    pub ancien_statut: Statut,
    pub nouveau_statut: Statut,
    pub dossier: Dossier,
    pub notification: NotificationBody,
    pub warnings: Vec<String>,
}

/// Serialized notification outcome.
#[derive(Debug, Serialize)]
pub struct NotificationBody {
    pub sent: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<NotificationOutcome> for NotificationBody {
    fn from(outcome: NotificationOutcome) -> Self {
        Self {
            sent: outcome.sent,
            template: outcome.template,
            error: outcome.error,
        }
    }
}

/// Request body for POST /v1/documents.
#[derive(Debug, Deserialize)]
pub struct DocumentRequest {
    #[serde(rename = "type")]
    pub kind: DocumentKind,
    pub dossier_id: i64,
    #[serde(default)]
    pub seance: Option<Seance>,
    #[serde(default)]
    pub montant: Option<f64>,
    #[serde(default)]
    pub numero_facture: Option<String>,
}

/// Response body for GET /health.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

/// GET /health — public liveness probe.
pub async fn get_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// POST /v1/dossiers — intake.
pub async fn post_dossiers(
    State(state): State<GatewayState>,
    Extension(actor): Extension<Actor>,
    Json(body): Json<CreateDossierRequest>,
) -> Result<(StatusCode, Json<Dossier>), ApiError> {
    let dossier = state
        .service
        .create_dossier(
            NewDossier {
                reference: body.reference,
                type_dossier: body.type_dossier,
                user_id: actor.id,
                entreprise_id: body.entreprise_id,
                beneficiaire: body.beneficiaire,
                montant_estime: body.montant_estime,
                heures_total: body.heures_total,
                date_debut: body.date_debut,
                date_fin: body.date_fin,
                notes: body.notes,
            },
            actor.id,
        )
        .await?;
    Ok((StatusCode::CREATED, Json(dossier)))
}

/// GET /v1/dossiers/{id}
pub async fn get_dossier(
    State(state): State<GatewayState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<i64>,
) -> Result<Json<Dossier>, ApiError> {
    let dossier = state.service.get_dossier(id, actor.id, actor.role).await?;
    Ok(Json(dossier))
}

/// DELETE /v1/dossiers/{id} — drafts only.
pub async fn delete_dossier(
    State(state): State<GatewayState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    state.service.delete_dossier(id, actor.id, actor.role).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /v1/dossiers/{id}/statut — the status workflow entry point.
pub async fn post_statut(
    State(state): State<GatewayState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<i64>,
    Json(body): Json<ChangeStatutBody>,
) -> Result<Json<StatutResponse>, ApiError> {
    let outcome = state
        .service
        .change_statut(ChangeStatutRequest {
            dossier_id: id,
            nouveau_statut: body.nouveau_statut,
            actor_id: actor.id,
            actor_role: actor.role,
            motif_refus: body.motif_refus,
            notify: body.notify,
        })
        .await?;
    Ok(Json(StatutResponse {
        success: true,
        ancien_statut: outcome.ancien_statut,
        nouveau_statut: outcome.nouveau_statut,
        dossier: outcome.dossier,
        notification: outcome.notification.into(),
        warnings: outcome.warnings,
    }))
}

/// GET /v1/dossiers/{id}/historique — audit trail, commit order.
pub async fn get_historique(
    State(state): State<GatewayState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<i64>,
) -> Result<Json<Vec<HistoriqueEntry>>, ApiError> {
    // Ownership gate before exposing the trail.
    state.service.get_dossier(id, actor.id, actor.role).await?;
    let entries = state.service.historique(id).await?;
    Ok(Json(entries))
}

/// POST /v1/documents — render a PDF and return it as a download.
pub async fn post_document(
    State(state): State<GatewayState>,
    Extension(actor): Extension<Actor>,
    Json(body): Json<DocumentRequest>,
) -> Result<Response, ApiError> {
    let document = state
        .service
        .generate_document(
            body.kind,
            body.dossier_id,
            actor.id,
            actor.role,
            DocumentOptions {
                seance: body.seance,
                montant: body.montant,
                numero_facture: body.numero_facture,
            },
        )
        .await?;

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", document.filename),
            ),
        ],
        document.pdf,
    )
        .into_response())
}
