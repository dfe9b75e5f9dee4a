//! Spreadsheet reading.
//!
//! Reads the first worksheet of an xlsx, xls or ods workbook with `calamine`
//! and renders every cell as text so the rows can go through the same schema
//! binding as delimited input.

use std::io::Cursor;

use calamine::{DataType, Ods, Range, Reader, Xls, Xlsx};
use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{EngineError, EngineResult};

use super::schema::RawTable;

/// Supported workbook formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpreadsheetKind {
    /// Office Open XML workbook (`.xlsx`, `.xlsm`).
    Xlsx,
    /// Legacy binary Excel workbook (`.xls`).
    Xls,
    /// OpenDocument spreadsheet (`.ods`).
    Ods,
}

impl SpreadsheetKind {
    /// Maps a file extension (without the dot, any case) to a workbook format.
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension.to_ascii_lowercase().as_str() {
            "xlsx" | "xlsm" => Some(Self::Xlsx),
            "xls" => Some(Self::Xls),
            "ods" => Some(Self::Ods),
            _ => None,
        }
    }

    /// Maps a MIME type (parameters already stripped) to a workbook format.
    pub fn from_mime(mime: &str) -> Option<Self> {
        match mime {
            "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
            | "application/vnd.ms-excel.sheet.macroenabled.12" => Some(Self::Xlsx),
            "application/vnd.ms-excel" => Some(Self::Xls),
            "application/vnd.oasis.opendocument.spreadsheet" => Some(Self::Ods),
            _ => None,
        }
    }
}

/// Reads the first worksheet of a workbook into a raw table.
pub(crate) fn read_table(bytes: &[u8], kind: SpreadsheetKind) -> EngineResult<RawTable> {
    let cursor = Cursor::new(bytes.to_vec());

    let range = match kind {
        SpreadsheetKind::Xlsx => Xlsx::new(cursor)
            .map_err(open_error)?
            .worksheet_range_at(0)
            .map(|range| range.map_err(open_error)),
        SpreadsheetKind::Xls => Xls::new(cursor)
            .map_err(open_error)?
            .worksheet_range_at(0)
            .map(|range| range.map_err(open_error)),
        SpreadsheetKind::Ods => Ods::new(cursor)
            .map_err(open_error)?
            .worksheet_range_at(0)
            .map(|range| range.map_err(open_error)),
    }
    .ok_or_else(|| EngineError::Parse {
        message: "workbook has no worksheets".to_string(),
    })??;
    debug!(?kind, rows = range.height(), "Reading first worksheet");

    range_to_table(&range)
}

fn open_error(error: impl std::fmt::Display) -> EngineError {
    EngineError::Parse {
        message: format!("cannot open workbook: {}", error),
    }
}

fn range_to_table(range: &Range<DataType>) -> EngineResult<RawTable> {
    let mut rows = range
        .rows()
        .map(|row| row.iter().map(cell_to_string).collect::<Vec<String>>());

    let header = rows.next().ok_or_else(|| EngineError::Parse {
        message: "worksheet is empty".to_string(),
    })?;

    Ok(RawTable {
        header,
        rows: rows.collect(),
    })
}

/// Renders a cell the way a user would read it in the spreadsheet.
fn cell_to_string(cell: &DataType) -> String {
    match cell {
        DataType::Empty => String::new(),
        DataType::String(s) => s.trim().to_string(),
        DataType::Int(i) => i.to_string(),
        DataType::Float(f) => format_float(*f),
        DataType::Bool(b) => b.to_string(),
        DataType::DateTime(serial) => excel_serial_to_date(*serial)
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| format_float(*serial)),
        other => format!("{:?}", other),
    }
}

/// Integer-valued floats lose their fractional part (`2015.0` becomes `2015`).
fn format_float(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

/// Converts an Excel date serial (1900 system) to a calendar date.
pub(crate) fn excel_serial_to_date(serial: f64) -> Option<NaiveDate> {
    if !serial.is_finite() || serial < 0.0 {
        return None;
    }
    NaiveDate::from_ymd_opt(1899, 12, 30)?.checked_add_days(Days::new(serial.floor() as u64))
}
