//! Reporting and export.
//!
//! Formats the monetary results of a [`BenefitReport`](crate::models::BenefitReport),
//! builds the top-earnings chart series and serializes the labelled dataset
//! back to comma-separated text.

mod export;
mod summary;

pub use export::{EXPORT_FILE_NAME, export_csv};
pub use summary::{ChartPoint, ReportSummary, chart_series, format_currency};
