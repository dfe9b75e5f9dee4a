//! Tabular input loading.
//!
//! Turns pasted text, CSV files and spreadsheet workbooks into a typed
//! [`Dataset`]. Every entry point distinguishes "no input given"
//! ([`EngineError::NoInput`]) from "input given but unparseable"
//! ([`EngineError::Parse`]).
//!
//! # Example
//!
//! ```
//! use benefit_calculator::loader::{load_text, ColumnMapping};
//!
//! let text = "Competencia;Salario\n2015;1000\n2016;4000\n";
//! let dataset = load_text(text, &ColumnMapping::default())?;
//! assert_eq!(dataset.len(), 2);
//! # Ok::<(), benefit_calculator::error::EngineError>(())
//! ```

mod delimited;
mod schema;
mod spreadsheet;

use std::fs;
use std::path::Path;

use tracing::{debug, info};

use crate::error::{EngineError, EngineResult};
use crate::models::Dataset;

pub use delimited::{CANDIDATE_DELIMITERS, detect_delimiter};
pub use schema::ColumnMapping;
pub use spreadsheet::SpreadsheetKind;

/// The format an input is read with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    /// Free-form text with a sniffed delimiter.
    Text,
    /// Comma-separated values.
    Csv,
    /// A spreadsheet workbook.
    Spreadsheet(SpreadsheetKind),
}

impl InputFormat {
    /// Picks the format from a file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_ascii_lowercase();
        match extension.as_str() {
            "csv" => Some(Self::Csv),
            "txt" | "tsv" => Some(Self::Text),
            other => SpreadsheetKind::from_extension(other).map(Self::Spreadsheet),
        }
    }

    /// Picks the format from a `Content-Type` value; a missing type means text.
    pub fn from_content_type(content_type: Option<&str>) -> Option<Self> {
        let Some(content_type) = content_type else {
            return Some(Self::Text);
        };
        let mime = content_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();

        match mime.as_str() {
            "text/csv" | "application/csv" => Some(Self::Csv),
            "text/plain" | "text/tab-separated-values" | "" => Some(Self::Text),
            other => SpreadsheetKind::from_mime(other).map(Self::Spreadsheet),
        }
    }
}

/// Loads free-form pasted text, detecting the delimiter.
///
/// # Errors
///
/// - `NoInput` when the text is blank
/// - `Parse` when no candidate delimiter yields a consistent table of two or more columns
/// - `ColumnNotFound` / `InvalidRecord` from schema binding
pub fn load_text(text: &str, mapping: &ColumnMapping) -> EngineResult<Dataset> {
    if text.trim().is_empty() {
        return Err(EngineError::NoInput);
    }

    let text = delimited::strip_blank_lines(text);
    let delimiter = detect_delimiter(&text).ok_or_else(|| EngineError::Parse {
        message: "could not detect a delimiter giving a consistent table of at least two columns"
            .to_string(),
    })?;

    let table = delimited::read_table(text.as_bytes(), delimiter)?;
    let dataset = schema::bind_table(table, mapping)?;
    info!(records = dataset.len(), format = "text", "Loaded dataset");
    Ok(dataset)
}

/// Loads a comma-separated file's contents.
pub fn load_csv(bytes: &[u8], mapping: &ColumnMapping) -> EngineResult<Dataset> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Err(EngineError::NoInput);
    }

    let table = delimited::read_table(bytes, b',')?;
    let dataset = schema::bind_table(table, mapping)?;
    info!(records = dataset.len(), format = "csv", "Loaded dataset");
    Ok(dataset)
}

/// Loads the first worksheet of a workbook.
pub fn load_spreadsheet(
    bytes: &[u8],
    kind: SpreadsheetKind,
    mapping: &ColumnMapping,
) -> EngineResult<Dataset> {
    if bytes.is_empty() {
        return Err(EngineError::NoInput);
    }

    let table = spreadsheet::read_table(bytes, kind)?;
    let dataset = schema::bind_table(table, mapping)?;
    info!(records = dataset.len(), format = ?kind, "Loaded dataset");
    Ok(dataset)
}

/// Loads bytes in an already chosen format.
pub fn load_bytes(
    bytes: &[u8],
    format: InputFormat,
    mapping: &ColumnMapping,
) -> EngineResult<Dataset> {
    match format {
        InputFormat::Csv => load_csv(bytes, mapping),
        InputFormat::Spreadsheet(kind) => load_spreadsheet(bytes, kind, mapping),
        InputFormat::Text => {
            let text = std::str::from_utf8(bytes).map_err(|e| EngineError::Parse {
                message: format!("input is not valid UTF-8: {}", e),
            })?;
            load_text(text, mapping)
        }
    }
}

/// Reads a file, choosing CSV or spreadsheet parsing by its extension.
pub fn load_file<P: AsRef<Path>>(path: P, mapping: &ColumnMapping) -> EngineResult<Dataset> {
    let path = path.as_ref();
    let format = InputFormat::from_path(path).ok_or_else(|| EngineError::Parse {
        message: format!("unsupported file type: {}", path.display()),
    })?;
    debug!(path = %path.display(), ?format, "Reading input file");

    let bytes = fs::read(path).map_err(|e| EngineError::Io {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;

    load_bytes(&bytes, format, mapping)
}

/// Loads an uploaded body, choosing the parser from its `Content-Type`.
pub fn load_upload(
    bytes: &[u8],
    content_type: Option<&str>,
    mapping: &ColumnMapping,
) -> EngineResult<Dataset> {
    if bytes.is_empty() {
        return Err(EngineError::NoInput);
    }

    let format = InputFormat::from_content_type(content_type).ok_or_else(|| EngineError::Parse {
        message: format!(
            "unsupported content type: {}",
            content_type.unwrap_or_default()
        ),
    })?;

    load_bytes(bytes, format, mapping)
}
