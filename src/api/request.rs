//! Request types for the benefit calculator API.
//!
//! This module defines the JSON body shared by `/calculate` and `/export`
//! and the query parameters of `/upload`.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::loader::{ColumnMapping, load_text};
use crate::models::{
    DEFAULT_PERIOD_COLUMN, DEFAULT_REMUNERATION_COLUMN, Dataset, Period, Record,
};

/// Request body for the `/calculate` and `/export` endpoints.
///
/// Exactly one of `text` (a pasted table) or `records` must be given.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CalculationRequest {
    /// A pasted delimited table, header row first.
    #[serde(default)]
    pub text: Option<String>,
    /// Records given directly as JSON.
    #[serde(default)]
    pub records: Option<Vec<RecordRequest>>,
    /// Header name of the period column.
    #[serde(default)]
    pub period_column: Option<String>,
    /// Header name of the remuneration column.
    #[serde(default)]
    pub remuneration_column: Option<String>,
}

/// One record in a calculation request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordRequest {
    /// The period, as a date-like string or a bare year.
    pub period: PeriodValue,
    /// The remuneration amount.
    pub remuneration: Decimal,
}

/// A period given either as text or as an integer year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PeriodValue {
    /// A bare year, e.g. `2018`.
    Year(i64),
    /// A date-like string, e.g. `"2018-03-01"`.
    Text(String),
}

impl From<PeriodValue> for Period {
    fn from(value: PeriodValue) -> Self {
        match value {
            PeriodValue::Year(year) => Period::new(year.to_string()),
            PeriodValue::Text(text) => Period::new(text),
        }
    }
}

/// Query parameters of the `/upload` endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UploadParams {
    /// Header name of the period column.
    #[serde(default)]
    pub period_column: Option<String>,
    /// Header name of the remuneration column.
    #[serde(default)]
    pub remuneration_column: Option<String>,
}

impl UploadParams {
    /// Returns the column mapping named by the parameters.
    pub fn mapping(&self) -> ColumnMapping {
        ColumnMapping {
            period: self.period_column.clone(),
            remuneration: self.remuneration_column.clone(),
        }
    }
}

impl CalculationRequest {
    /// Returns the column mapping named by the request.
    pub fn mapping(&self) -> ColumnMapping {
        ColumnMapping {
            period: self.period_column.clone(),
            remuneration: self.remuneration_column.clone(),
        }
    }

    /// Turns the request into a dataset.
    ///
    /// # Errors
    ///
    /// - `NoInput` when neither `text` nor `records` is given
    /// - `Parse` when both are given, or when `text` is not a table
    /// - `InvalidRecord` for a negative remuneration in `records`
    pub fn into_dataset(self) -> EngineResult<Dataset> {
        let mapping = self.mapping();

        match (self.text, self.records) {
            (Some(_), Some(_)) => Err(EngineError::Parse {
                message: "provide either 'text' or 'records', not both".to_string(),
            }),
            (Some(text), None) => load_text(&text, &mapping),
            (None, Some(records)) => records_to_dataset(records, mapping),
            (None, None) => Err(EngineError::NoInput),
        }
    }
}

fn records_to_dataset(
    records: Vec<RecordRequest>,
    mapping: ColumnMapping,
) -> EngineResult<Dataset> {
    let period_column = mapping
        .period
        .unwrap_or_else(|| DEFAULT_PERIOD_COLUMN.to_string());
    let remuneration_column = mapping
        .remuneration
        .unwrap_or_else(|| DEFAULT_REMUNERATION_COLUMN.to_string());

    let mut rows = Vec::with_capacity(records.len());
    for (row, request) in records.into_iter().enumerate() {
        if request.remuneration.is_sign_negative() && !request.remuneration.is_zero() {
            return Err(EngineError::InvalidRecord {
                row: row + 1,
                column: remuneration_column,
                message: format!("negative amount {}", request.remuneration),
            });
        }
        rows.push(Record::new(row, request.period.into(), request.remuneration));
    }

    Ok(Dataset::new(
        vec![period_column, remuneration_column],
        0,
        1,
        rows,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_period_accepts_string_or_year() {
        let request: CalculationRequest = serde_json::from_value(json!({
            "records": [
                {"period": "2018-03-01", "remuneration": "1000.00"},
                {"period": 2019, "remuneration": 2000}
            ]
        }))
        .unwrap();

        let dataset = request.into_dataset().unwrap();

        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.records()[0].period.as_str(), "2018-03-01");
        assert_eq!(dataset.records()[1].period.as_str(), "2019");
        assert_eq!(dataset.records()[1].remuneration, Decimal::from(2000));
    }

    #[test]
    fn test_text_request_is_sniffed() {
        let request = CalculationRequest {
            text: Some("Competencia;Remuneracao\n2015;1000\n2016;2000\n".to_string()),
            ..Default::default()
        };

        let dataset = request.into_dataset().unwrap();

        assert_eq!(dataset.columns(), ["Competencia", "Remuneracao"]);
    }

    #[test]
    fn test_named_columns_apply_to_records() {
        let request = CalculationRequest {
            records: Some(vec![RecordRequest {
                period: PeriodValue::Year(2015),
                remuneration: Decimal::ONE,
            }]),
            period_column: Some("Competência".to_string()),
            remuneration_column: Some("Salário".to_string()),
            ..Default::default()
        };

        let dataset = request.into_dataset().unwrap();

        assert_eq!(dataset.columns(), ["Competência", "Salário"]);
    }

    #[test]
    fn test_empty_request_is_no_input() {
        assert!(matches!(
            CalculationRequest::default().into_dataset(),
            Err(EngineError::NoInput)
        ));
    }

    #[test]
    fn test_both_inputs_are_rejected() {
        let request = CalculationRequest {
            text: Some("a,b\n1,2\n".to_string()),
            records: Some(vec![]),
            ..Default::default()
        };

        assert!(matches!(
            request.into_dataset(),
            Err(EngineError::Parse { .. })
        ));
    }

    #[test]
    fn test_negative_remuneration_is_invalid_record() {
        let request: CalculationRequest = serde_json::from_value(json!({
            "records": [
                {"period": 2015, "remuneration": "10"},
                {"period": 2016, "remuneration": "-5"}
            ]
        }))
        .unwrap();

        match request.into_dataset() {
            Err(EngineError::InvalidRecord { row, column, .. }) => {
                assert_eq!(row, 2);
                assert_eq!(column, "remuneration");
            }
            other => panic!("Expected InvalidRecord, got {:?}", other),
        }
    }
}
