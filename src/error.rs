//! Error types for the benefit calculator.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while loading tabular input,
//! computing a benefit or exporting the labeled dataset.

use thiserror::Error;

/// The main error type for the benefit calculator.
///
/// All operations in the crate return this error type, making it easy
/// to handle errors consistently at the request boundary. None of the
/// variants is fatal to the hosting process.
///
/// # Example
///
/// ```
/// use benefit_calculator::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/factor.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/factor.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// No input was supplied at all.
    #[error("No input data was provided")]
    NoInput,

    /// An input file could not be read.
    #[error("Failed to read input '{path}': {message}")]
    Io {
        /// The path that could not be read.
        path: String,
        /// The underlying I/O error.
        message: String,
    },

    /// Input was supplied but no tabular structure could be recovered from it.
    #[error("Could not parse input as a table: {message}")]
    Parse {
        /// A description of what made the input unreadable.
        message: String,
    },

    /// A configured column name is absent from the input header.
    #[error("Column not found in input header: {column}")]
    ColumnNotFound {
        /// The column that was expected.
        column: String,
    },

    /// A data row carries a value that cannot be used.
    #[error("Invalid value in row {row}, column '{column}': {message}")]
    InvalidRecord {
        /// One-based data row number.
        row: usize,
        /// The column holding the invalid value.
        column: String,
        /// A description of what made the value invalid.
        message: String,
    },

    /// Not enough records to form a top-earnings subset.
    #[error(
        "Not enough records to calculate a benefit: {records} usable record(s), at least {required} required"
    )]
    EmptyDataset {
        /// The number of records that were available.
        records: usize,
        /// The minimum number of records the selection policy needs.
        required: usize,
    },

    /// The year prefix of a period could not be parsed.
    ///
    /// The calculator recovers from this per record by labeling it
    /// [`NormativeLabel::Unknown`](crate::models::NormativeLabel::Unknown).
    #[error("Cannot extract a year from period '{period}'")]
    LabelParse {
        /// The offending period text.
        period: String,
    },

    /// A general calculation error occurred.
    #[error("Calculation error: {message}")]
    Calculation {
        /// A description of the calculation error.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
