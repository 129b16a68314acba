use super::app_error::AppError;
use super::datasets::{
    __path_get_chart, __path_get_column_stats, __path_get_dataset, __path_get_rows,
    __path_list_datasets, __path_upload, get_chart, get_column_stats, get_dataset, get_rows,
    list_datasets, upload,
};
use super::health::{__path_liveness, __path_readiness, liveness, readiness};
use super::state::HttpServerState;
use crate::config;
use anyhow::Result;
use axum::Json;
use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::extract::State;
use axum::http::header;
use axum::routing::{get, post};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::trace;
use tower_http::{ServiceBuilderExt, timeout::TimeoutLayer, trace::TraceLayer};
use tracing::{Level, info, warn};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable as ScalarServable};

#[derive(OpenApi)]
#[openapi(
    tags(
        (name = "SheetViz", description = "SheetViz API"),
        (name = "Datasets", description = "Upload and explore tabular datasets"),
        (name = "Health", description = "Liveness and readiness probes"),
    ),
    paths(frontpage, upload, list_datasets, get_dataset, get_chart, get_rows,
        get_column_stats, liveness, readiness),
)]
struct ApiDoc;

/// Routes of the application, without the outer middleware.
pub fn build_router(state: HttpServerState, body_limit: usize) -> Router {
    Router::new()
        .route("/", get(frontpage))
        .merge(Scalar::with_url("/docs", ApiDoc::openapi()))
        .route(
            "/api/upload",
            post(upload).layer(DefaultBodyLimit::max(body_limit)),
        )
        .route("/api/datasets", get(list_datasets))
        .route("/api/datasets/{id}", get(get_dataset))
        .route("/api/datasets/{id}/chart", get(get_chart))
        .route("/api/datasets/{id}/rows", get(get_rows))
        .route(
            "/api/datasets/{id}/columns/{column}/stats",
            get(get_column_stats),
        )
        .route("/health/live", get(liveness))
        .route("/health/ready", get(readiness))
        .with_state(state)
}

pub async fn run_http_server(state: HttpServerState, address: SocketAddr) -> Result<()> {
    let config = config::get()?;
    let body_limit = config.parse_http_body_limit()?;
    let timeout_seconds = config.http_server_timeout_seconds;

    // List of headers that shouldn't be logged
    let sensitive_headers: Arc<[_]> = vec![header::AUTHORIZATION, header::COOKIE].into();

    let middleware = ServiceBuilder::new()
        .sensitive_request_headers(sensitive_headers.clone())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(trace::DefaultMakeSpan::new().level(Level::INFO))
                .on_response(trace::DefaultOnResponse::new().level(Level::INFO)),
        )
        .sensitive_response_headers(sensitive_headers)
        .layer(TimeoutLayer::new(Duration::from_secs(timeout_seconds)))
        .compression()
        .into_inner();

    let app = build_router(state, body_limit).layer(middleware);

    let listener = tokio::net::TcpListener::bind(address).await?;
    info!("HTTP server listening on {}", address);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    // Wait for the CTRL+C signal
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for the shutdown signal: {}", err);
        std::future::pending::<()>().await;
    }
}

#[utoipa::path(
    get,
    path = "/",
    tag = "SheetViz",
    responses(
        (status = 200, description = "SheetViz Frontpage", body = String)
    )
)]
async fn frontpage(State(state): State<HttpServerState>) -> Result<Json<String>, AppError> {
    let name: String = (*state.name).clone();
    Ok(Json(name))
}
