use crate::ingest::{ErrorDetail, ErrorKind, IngestError};
use axum::Json;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use serde::Serialize;
use tracing::error;
use utoipa::ToSchema;

/// JSON body of every error response.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<ErrorKind>,
    #[schema(example = "File contains no data")]
    pub message: String,
    /// Row or field problems of a rejected upload
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<ErrorDetail>>,
    /// Cause of an internal failure
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ErrorResponse {
    fn message(message: impl Into<String>) -> Self {
        Self {
            kind: None,
            message: message.into(),
            errors: None,
            error: None,
        }
    }
}

#[derive(Debug)]
pub enum AppError {
    InternalServerError(anyhow::Error),
    BadRequest(anyhow::Error),
    NotFound(anyhow::Error),
    PayloadTooLarge(anyhow::Error),
    Ingest(IngestError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::InternalServerError(error) => {
                error!("Internal Server Error: {:?}", error);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse {
                        error: Some(error.to_string()),
                        ..ErrorResponse::message("Internal Server Error")
                    },
                )
            }
            AppError::BadRequest(error) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse::message(error.to_string()),
            ),
            AppError::NotFound(error) => (
                StatusCode::NOT_FOUND,
                ErrorResponse::message(error.to_string()),
            ),
            AppError::PayloadTooLarge(error) => (
                StatusCode::PAYLOAD_TOO_LARGE,
                ErrorResponse::message(error.to_string()),
            ),
            AppError::Ingest(error) if error.is_client_error() => {
                let details = error.details();
                (
                    StatusCode::BAD_REQUEST,
                    ErrorResponse {
                        kind: Some(error.kind()),
                        message: error.to_string(),
                        errors: (!details.is_empty()).then_some(details),
                        error: None,
                    },
                )
            }
            AppError::Ingest(error) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorResponse {
                    kind: Some(error.kind()),
                    message: "Server error while processing file".to_string(),
                    errors: None,
                    error: Some(error.to_string()),
                },
            ),
        };
        (status, Json(body)).into_response()
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        Self::InternalServerError(err)
    }
}

impl From<IngestError> for AppError {
    fn from(err: IngestError) -> Self {
        Self::Ingest(err)
    }
}

impl AppError {
    pub fn bad_request(err: impl Into<anyhow::Error>) -> Self {
        Self::BadRequest(err.into())
    }

    pub fn not_found(err: impl Into<anyhow::Error>) -> Self {
        Self::NotFound(err.into())
    }
}
