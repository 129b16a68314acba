use crate::datamodel::summary::{ColumnStats, column_stats, filter_rows};
use crate::datamodel::{ChartConfig, ChartSeries, ChartType, DataRow, Dataset, chart::build_series};
use crate::http::app_error::{AppError, ErrorResponse};
use crate::http::state::HttpServerState;
use crate::ingest::ingest_upload;
use anyhow::anyhow;
use axum::Json;
use axum::extract::multipart::MultipartError;
use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::info;
use utoipa::ToSchema;

/// Multipart form of an upload.
#[derive(Debug, ToSchema)]
#[allow(dead_code)]
pub struct UploadForm {
    /// A .csv, .xls or .xlsx file
    #[schema(value_type = String, format = Binary)]
    file: Vec<u8>,
}

/// Upload a CSV or Excel file.
///
/// The file is parsed, numbers are detected cell by cell, and the resulting
/// dataset is stored. A file is either accepted whole or rejected.
#[utoipa::path(
    post,
    path = "/api/upload",
    tag = "Datasets",
    request_body(content = UploadForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Stored dataset", body = Dataset),
        (status = 400, description = "Rejected upload", body = ErrorResponse),
        (status = 413, description = "File too large", body = ErrorResponse),
        (status = 500, description = "Internal Server Error", body = ErrorResponse),
    )
)]
pub async fn upload(
    State(state): State<HttpServerState>,
    mut multipart: Multipart,
) -> Result<Json<Dataset>, AppError> {
    let mut upload = None;
    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() == Some("file") {
            let file_name = field.file_name().unwrap_or_default().to_string();
            let bytes = field.bytes().await.map_err(multipart_error)?;
            upload = Some((file_name, bytes));
            break;
        }
    }

    let (file_name, bytes) = upload.ok_or_else(|| AppError::bad_request(anyhow!("No file uploaded")))?;
    info!("Received file: {} ({} bytes)", file_name, bytes.len());

    let dataset = ingest_upload(state.storage.as_ref(), &bytes, &file_name).await?;
    Ok(Json(dataset))
}

fn multipart_error(err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(anyhow!("File is too large"))
    } else {
        AppError::bad_request(anyhow!("Invalid multipart upload: {}", err.body_text()))
    }
}

/// List all the datasets, oldest first.
#[utoipa::path(
    get,
    path = "/api/datasets",
    tag = "Datasets",
    responses(
        (status = 200, description = "List of datasets", body = Vec<Dataset>)
    )
)]
pub async fn list_datasets(
    State(state): State<HttpServerState>,
) -> Result<Json<Vec<Dataset>>, AppError> {
    Ok(Json(state.storage.list_datasets().await?))
}

async fn find_dataset(state: &HttpServerState, id: &str) -> Result<Dataset, AppError> {
    // Ids that aren't numbers can't name a dataset.
    let dataset = match id.parse::<u64>() {
        Ok(id) => state.storage.get_dataset(id).await?,
        Err(_) => None,
    };
    dataset.ok_or_else(|| AppError::not_found(anyhow!("Dataset not found")))
}

#[utoipa::path(
    get,
    path = "/api/datasets/{id}",
    tag = "Datasets",
    responses(
        (status = 200, description = "The dataset", body = Dataset),
        (status = 404, description = "Not Found", body = ErrorResponse),
    ),
    params(
        ("id" = u64, Path, description = "Dataset id", example = 1),
    )
)]
pub async fn get_dataset(
    State(state): State<HttpServerState>,
    Path(id): Path<String>,
) -> Result<Json<Dataset>, AppError> {
    Ok(Json(find_dataset(&state, &id).await?))
}

#[derive(Debug, Deserialize)]
pub struct ChartQuery {
    // Parsed with ChartType::from_str in the handler.
    #[serde(rename = "type")]
    pub chart_type: Option<String>,
    #[serde(rename = "xAxis")]
    pub x_axis: Option<String>,
    #[serde(rename = "yAxis")]
    pub y_axis: Option<String>,
}

/// Chart points of a dataset.
///
/// Without parameters, the second column is plotted against the first one as
/// a bar chart.
#[utoipa::path(
    get,
    path = "/api/datasets/{id}/chart",
    tag = "Datasets",
    responses(
        (status = 200, description = "Chart series", body = ChartSeries),
        (status = 400, description = "Bad Request", body = ErrorResponse),
        (status = 404, description = "Not Found", body = ErrorResponse),
    ),
    params(
        ("id" = u64, Path, description = "Dataset id"),
        ("type" = Option<ChartType>, Query, description = "bar, line or pie"),
        ("xAxis" = Option<String>, Query, description = "Column used for labels"),
        ("yAxis" = Option<String>, Query, description = "Column used for values"),
    )
)]
pub async fn get_chart(
    State(state): State<HttpServerState>,
    Path(id): Path<String>,
    Query(query): Query<ChartQuery>,
) -> Result<Json<ChartSeries>, AppError> {
    let chart_type = match query.chart_type.as_deref() {
        Some(name) => name.parse::<ChartType>().map_err(AppError::BadRequest)?,
        None => ChartType::default(),
    };
    let dataset = find_dataset(&state, &id).await?;
    let default = ChartConfig::default_for(&dataset.headers);

    let x_axis = query
        .x_axis
        .or_else(|| default.as_ref().map(|c| c.x_axis.clone()));
    let y_axis = query
        .y_axis
        .or_else(|| default.as_ref().map(|c| c.y_axis.clone()));
    let (Some(x_axis), Some(y_axis)) = (x_axis, y_axis) else {
        return Err(AppError::bad_request(anyhow!(
            "Both xAxis and yAxis are required for a dataset with fewer than two columns"
        )));
    };

    let config = ChartConfig {
        chart_type,
        x_axis,
        y_axis,
    };
    let series = build_series(&dataset, config).map_err(AppError::BadRequest)?;
    Ok(Json(series))
}

#[derive(Debug, Deserialize)]
pub struct RowsQuery {
    pub filter: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RowsResponse {
    pub total: usize,
    #[schema(value_type = Vec<Object>)]
    pub rows: Vec<DataRow>,
}

/// Rows of a dataset, optionally keeping only those containing a text.
#[utoipa::path(
    get,
    path = "/api/datasets/{id}/rows",
    tag = "Datasets",
    responses(
        (status = 200, description = "Matching rows", body = RowsResponse),
        (status = 404, description = "Not Found", body = ErrorResponse),
    ),
    params(
        ("id" = u64, Path, description = "Dataset id"),
        ("filter" = Option<String>, Query, description = "Case insensitive text to look for in any cell"),
    )
)]
pub async fn get_rows(
    State(state): State<HttpServerState>,
    Path(id): Path<String>,
    Query(query): Query<RowsQuery>,
) -> Result<Json<RowsResponse>, AppError> {
    let dataset = find_dataset(&state, &id).await?;
    let rows: Vec<DataRow> = filter_rows(&dataset, query.filter.as_deref().unwrap_or(""))
        .into_iter()
        .cloned()
        .collect();
    Ok(Json(RowsResponse {
        total: dataset.data.len(),
        rows,
    }))
}

#[utoipa::path(
    get,
    path = "/api/datasets/{id}/columns/{column}/stats",
    tag = "Datasets",
    responses(
        (status = 200, description = "Column statistics", body = ColumnStats),
        (status = 400, description = "Unknown column", body = ErrorResponse),
        (status = 404, description = "Not Found", body = ErrorResponse),
    ),
    params(
        ("id" = u64, Path, description = "Dataset id"),
        ("column" = String, Path, description = "Header name"),
    )
)]
pub async fn get_column_stats(
    State(state): State<HttpServerState>,
    Path((id, column)): Path<(String, String)>,
) -> Result<Json<ColumnStats>, AppError> {
    let dataset = find_dataset(&state, &id).await?;
    if !dataset.has_header(&column) {
        return Err(AppError::bad_request(anyhow!(
            "'{}' is not a column of the dataset",
            column
        )));
    }
    Ok(Json(column_stats(&dataset, &column)))
}
