//! Binding raw table rows to typed records.
//!
//! The loaders in this module tree produce a header plus string rows; this
//! module resolves the period and remuneration columns once, up front, and
//! turns every row into a [`Record`].

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::{Dataset, Period, Record};

/// Which input columns hold the period and the remuneration.
///
/// A `None` entry falls back to position: first column for the period,
/// second for the remuneration.
///
/// # Examples
///
/// ```
/// use benefit_calculator::loader::ColumnMapping;
///
/// let positional = ColumnMapping::default();
/// assert!(positional.period.is_none());
///
/// let named = ColumnMapping::named("Competência", "Remuneração");
/// assert_eq!(named.remuneration.as_deref(), Some("Remuneração"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnMapping {
    /// Header name of the period column.
    #[serde(default)]
    pub period: Option<String>,
    /// Header name of the remuneration column.
    #[serde(default)]
    pub remuneration: Option<String>,
}

impl ColumnMapping {
    /// Creates a mapping that looks both columns up by name.
    pub fn named(period: impl Into<String>, remuneration: impl Into<String>) -> Self {
        Self {
            period: Some(period.into()),
            remuneration: Some(remuneration.into()),
        }
    }
}

/// A raw table: header names plus data rows, all as text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct RawTable {
    pub(crate) header: Vec<String>,
    pub(crate) rows: Vec<Vec<String>>,
}

/// Resolves the bound columns and converts every row into a record.
pub(crate) fn bind_table(table: RawTable, mapping: &ColumnMapping) -> EngineResult<Dataset> {
    let RawTable { header, rows } = table;

    if header.len() < 2 {
        return Err(EngineError::Parse {
            message: format!(
                "at least two columns are required, found {}",
                header.len()
            ),
        });
    }

    let period_index = resolve_column(&header, mapping.period.as_deref(), 0)?;
    let remuneration_index = resolve_column(&header, mapping.remuneration.as_deref(), 1)?;

    if period_index == remuneration_index {
        return Err(EngineError::Parse {
            message: format!(
                "period and remuneration are bound to the same column '{}'",
                header[period_index]
            ),
        });
    }

    let mut records = Vec::with_capacity(rows.len());

    for (index, values) in rows.into_iter().enumerate() {
        if values.iter().all(|v| v.trim().is_empty()) {
            continue;
        }

        let line = index + 1;
        if values.len() != header.len() {
            return Err(EngineError::Parse {
                message: format!(
                    "data row {} has {} fields but the header has {}",
                    line,
                    values.len(),
                    header.len()
                ),
            });
        }

        let remuneration = parse_remuneration(&values[remuneration_index]).map_err(|message| {
            EngineError::InvalidRecord {
                row: line,
                column: header[remuneration_index].clone(),
                message,
            }
        })?;

        records.push(Record {
            row: records.len(),
            period: Period::new(&values[period_index]),
            remuneration,
            values,
        });
    }

    Ok(Dataset::new(header, period_index, remuneration_index, records))
}

/// Finds a column by name (trimmed, case-insensitive) or falls back to a position.
fn resolve_column(header: &[String], name: Option<&str>, fallback: usize) -> EngineResult<usize> {
    match name {
        Some(name) => {
            let wanted = name.trim().to_lowercase();
            header
                .iter()
                .position(|h| h.trim().to_lowercase() == wanted)
                .ok_or_else(|| EngineError::ColumnNotFound {
                    column: name.to_string(),
                })
        }
        None => Ok(fallback),
    }
}

/// Parses a non-negative decimal amount.
pub(crate) fn parse_remuneration(raw: &str) -> Result<Decimal, String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err("empty value".to_string());
    }

    let amount = Decimal::from_str(raw)
        .or_else(|_| Decimal::from_scientific(raw))
        .map_err(|_| format!("'{}' is not a decimal amount", raw))?;

    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(format!("negative amount {}", amount));
    }

    Ok(amount)
}
