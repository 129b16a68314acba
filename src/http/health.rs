use super::state::HttpServerState;
use axum::{Json, extract::State, http::StatusCode};
use serde::Serialize;
use tracing::warn;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    #[schema(example = "ok")]
    pub status: String,
}

/// Readiness of the service and of the dataset store behind it.
#[derive(Debug, Serialize, ToSchema)]
pub struct ReadinessResponse {
    #[schema(example = "ready")]
    pub status: String,
    #[schema(example = "ok")]
    pub storage: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ReadinessResponse {
    fn ready() -> Self {
        Self {
            status: "ready".to_string(),
            storage: "ok".to_string(),
            error: None,
        }
    }

    fn storage_failed(error: &anyhow::Error) -> Self {
        Self {
            status: "not_ready".to_string(),
            storage: "error".to_string(),
            error: Some(error.to_string()),
        }
    }
}

/// The process answers HTTP requests.
#[utoipa::path(
    get,
    path = "/health/live",
    tag = "Health",
    responses(
        (status = 200, description = "Service is alive", body = HealthResponse)
    )
)]
pub async fn liveness() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

/// The dataset store accepts uploads.
#[utoipa::path(
    get,
    path = "/health/ready",
    tag = "Health",
    responses(
        (status = 200, description = "Uploads are accepted", body = ReadinessResponse),
        (status = 503, description = "The store is unavailable", body = ReadinessResponse)
    )
)]
pub async fn readiness(
    State(state): State<HttpServerState>,
) -> (StatusCode, Json<ReadinessResponse>) {
    match state.storage.health_check().await {
        Ok(()) => (StatusCode::OK, Json(ReadinessResponse::ready())),
        Err(err) => {
            warn!("Storage health check failed: {:?}", err);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(ReadinessResponse::storage_failed(&err)),
            )
        }
    }
}
