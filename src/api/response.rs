//! Response types for the benefit calculator API.
//!
//! This module defines the success body of the calculation endpoints, the
//! error response structures and the mapping from engine errors to HTTP
//! status codes.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::models::BenefitReport;
use crate::report::{ChartPoint, ReportSummary, chart_series};

/// Success body of `/calculate` and `/upload`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculationResponse {
    /// The full calculation report.
    #[serde(flatten)]
    pub report: BenefitReport,
    /// The monetary results formatted for display.
    pub summary: ReportSummary,
    /// Top-earnings series for a bar chart.
    pub chart: Vec<ChartPoint>,
}

impl From<BenefitReport> for CalculationResponse {
    fn from(report: BenefitReport) -> Self {
        Self {
            summary: ReportSummary::from_report(&report),
            chart: chart_series(&report),
            report,
        }
    }
}

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
#[derive(Debug)]
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    /// Pairs an error body with a 400 status.
    pub fn bad_request(error: ApiError) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error,
        }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        let message = error.to_string();
        match error {
            EngineError::ConfigNotFound { path } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration error",
                    format!("Configuration file not found: {}", path),
                ),
            },
            EngineError::ConfigParseError { path, message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration parse error",
                    format!("Failed to parse {}: {}", path, message),
                ),
            },
            EngineError::NoInput => ApiErrorResponse::bad_request(ApiError::with_details(
                "NO_INPUT",
                message,
                "Send a 'text' table or a 'records' array",
            )),
            EngineError::Io { .. } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::new("IO_ERROR", message),
            },
            EngineError::Parse { .. } => {
                ApiErrorResponse::bad_request(ApiError::new("PARSE_ERROR", message))
            }
            EngineError::ColumnNotFound { column } => {
                ApiErrorResponse::bad_request(ApiError::with_details(
                    "COLUMN_NOT_FOUND",
                    message,
                    format!("No header named '{}' in the input", column),
                ))
            }
            EngineError::InvalidRecord { .. } => {
                ApiErrorResponse::bad_request(ApiError::new("INVALID_RECORD", message))
            }
            EngineError::EmptyDataset { records, required } => ApiErrorResponse {
                status: StatusCode::UNPROCESSABLE_ENTITY,
                error: ApiError::with_details(
                    "EMPTY_DATASET",
                    message,
                    format!("{} of {} required records", records, required),
                ),
            },
            EngineError::LabelParse { .. } => {
                ApiErrorResponse::bad_request(ApiError::new("PARSE_ERROR", message))
            }
            EngineError::Calculation { message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details("CALCULATION_ERROR", "Calculation failed", message),
            },
        }
    }
}
