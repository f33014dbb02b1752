// SPDX-FileCopyrightText: 2026 Dossio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mapping from the domain error taxonomy to HTTP responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use dossio_core::DossioError;
use serde::Serialize;

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Newtype letting handlers return `Result<_, ApiError>` with `?` on any
/// service call.
pub struct ApiError(pub DossioError);

impl From<DossioError> for ApiError {
    fn from(err: DossioError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            DossioError::NotFound { .. } => StatusCode::NOT_FOUND,
            DossioError::Forbidden(_) => StatusCode::FORBIDDEN,
            DossioError::InvalidTransition { .. } | DossioError::Validation(_) => {
                StatusCode::BAD_REQUEST
            }
            DossioError::Render(_) => StatusCode::UNPROCESSABLE_ENTITY,
            DossioError::Storage { .. } | DossioError::Mail(_) | DossioError::Config(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        if status.is_server_error() {
            tracing::error!(error = %self.0, "request failed");
        }
        (
            status,
            Json(ErrorResponse {
                error: self.0.to_string(),
            }),
        )
            .into_response()
    }
}
