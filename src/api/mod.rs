//! HTTP API module for the benefit calculator.
//!
//! This module provides the REST endpoints that load a remuneration table,
//! compute the benefit and export the labelled dataset. Every request is an
//! independent computation over the shared, read-only configuration.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{CalculationRequest, PeriodValue, RecordRequest, UploadParams};
pub use response::{ApiError, ApiErrorResponse, CalculationResponse};
pub use state::AppState;
