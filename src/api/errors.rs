use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::engine::CatalogueError;

/// Structured API error that serializes to JSON.
#[derive(Debug)]
pub enum ApiError {
    SanNotFound(String),
    InvalidRequest(String),
    InternalError(String),
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ErrorResponse {
    error: ErrorDetail,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ErrorDetail {
    code: String,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            ApiError::SanNotFound(san) => (
                StatusCode::NOT_FOUND,
                "SAN_NOT_FOUND",
                format!("Not in the catalogue: {san}"),
            ),
            ApiError::InvalidRequest(msg) => (StatusCode::BAD_REQUEST, "INVALID_REQUEST", msg),
            ApiError::InternalError(msg) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR", msg)
            }
        };

        let body = ErrorResponse {
            error: ErrorDetail {
                code: code.to_string(),
                message,
            },
        };

        (status, Json(body)).into_response()
    }
}

impl From<CatalogueError> for ApiError {
    fn from(err: CatalogueError) -> Self {
        match &err {
            CatalogueError::InvalidSquare(_)
            | CatalogueError::InvalidPiece(_)
            | CatalogueError::InvalidDirection(_)
            | CatalogueError::InvalidSan(_)
            | CatalogueError::NotAligned { .. } => ApiError::InvalidRequest(err.to_string()),
            CatalogueError::Io(_) => ApiError::InternalError(err.to_string()),
        }
    }
}
