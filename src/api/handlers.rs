//! HTTP request handlers for the benefit calculator API.
//!
//! This module contains the handler functions for all API endpoints.

use axum::{
    Json, Router,
    body::Bytes,
    extract::{Query, State, rejection::JsonRejection},
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
    routing::post,
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{compute_benefit, label_records};
use crate::error::EngineError;
use crate::loader::load_upload;
use crate::models::Dataset;
use crate::report::{EXPORT_FILE_NAME, export_csv};

use super::request::{CalculationRequest, UploadParams};
use super::response::{ApiError, ApiErrorResponse, CalculationResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/calculate", post(calculate_handler))
        .route("/upload", post(upload_handler))
        .route("/export", post(export_handler))
        .with_state(state)
}

/// Handler for POST /calculate.
///
/// Accepts a pasted table or JSON records and returns the benefit report.
async fn calculate_handler(
    State(state): State<AppState>,
    payload: Result<Json<CalculationRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing calculation request");

    let dataset = match parse_request(payload, correlation_id) {
        Ok(dataset) => dataset,
        Err(error) => return error.into_response(),
    };

    respond_with_benefit(&state, &dataset, correlation_id)
}

/// Handler for POST /upload.
///
/// The raw body is a CSV file, a workbook or plain text; `Content-Type`
/// chooses the parser.
async fn upload_handler(
    State(state): State<AppState>,
    Query(params): Query<UploadParams>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok());
    info!(
        correlation_id = %correlation_id,
        content_type = content_type.unwrap_or("none"),
        bytes = body.len(),
        "Processing upload request"
    );

    let dataset = match load_upload(&body, content_type, &params.mapping()) {
        Ok(dataset) => dataset,
        Err(err) => return engine_error_response(err, correlation_id),
    };

    respond_with_benefit(&state, &dataset, correlation_id)
}

/// Handler for POST /export.
///
/// Returns the input table with its normative label column as a CSV
/// attachment. Unlike `/calculate`, any number of records is accepted.
async fn export_handler(
    State(state): State<AppState>,
    payload: Result<Json<CalculationRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing export request");

    let dataset = match parse_request(payload, correlation_id) {
        Ok(dataset) => dataset,
        Err(error) => return error.into_response(),
    };

    let config = state.config().config();
    let classification = label_records(dataset.records(), config.normative(), 1);

    match export_csv(&dataset, &classification.labels, config) {
        Ok(csv) => {
            info!(
                correlation_id = %correlation_id,
                records = dataset.len(),
                warnings = classification.warnings.len(),
                "Export completed successfully"
            );
            (
                StatusCode::OK,
                [
                    (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
                    (
                        header::CONTENT_DISPOSITION,
                        format!("attachment; filename=\"{}\"", EXPORT_FILE_NAME),
                    ),
                ],
                csv,
            )
                .into_response()
        }
        Err(err) => engine_error_response(err, correlation_id),
    }
}

/// Turns the JSON body into a dataset, mapping rejections to API errors.
fn parse_request(
    payload: Result<Json<CalculationRequest>, JsonRejection>,
    correlation_id: Uuid,
) -> Result<Dataset, ApiErrorResponse> {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            let error = match rejection {
                JsonRejection::JsonDataError(err) => {
                    let body_text = err.body_text();
                    warn!(
                        correlation_id = %correlation_id,
                        error = %body_text,
                        "JSON data error"
                    );
                    ApiError::validation_error(body_text)
                }
                JsonRejection::JsonSyntaxError(err) => {
                    warn!(
                        correlation_id = %correlation_id,
                        error = %err,
                        "JSON syntax error"
                    );
                    ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
                }
                JsonRejection::MissingJsonContentType(_) => {
                    ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
                }
                _ => ApiError::malformed_json("Failed to parse request body"),
            };
            return Err(ApiErrorResponse::bad_request(error));
        }
    };

    request.into_dataset().map_err(|err| {
        warn!(correlation_id = %correlation_id, error = %err, "Invalid input");
        err.into()
    })
}

fn respond_with_benefit(state: &AppState, dataset: &Dataset, correlation_id: Uuid) -> Response {
    match compute_benefit(dataset, state.config().config()) {
        Ok(report) => {
            info!(
                correlation_id = %correlation_id,
                calculation_id = %report.calculation_id,
                records = report.record_count,
                benefit_amount = %report.calculation.benefit_amount.round_dp(2),
                duration_us = report.audit_trace.duration_us,
                "Calculation completed successfully"
            );
            (StatusCode::OK, Json(CalculationResponse::from(report))).into_response()
        }
        Err(err) => engine_error_response(err, correlation_id),
    }
}

fn engine_error_response(err: EngineError, correlation_id: Uuid) -> Response {
    warn!(correlation_id = %correlation_id, error = %err, "Request failed");
    ApiErrorResponse::from(err).into_response()
}
