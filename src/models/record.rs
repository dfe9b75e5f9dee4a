//! Record and dataset models.
//!
//! This module defines the typed rows produced by the tabular input loader:
//! a [`Period`], the [`Record`] carrying it together with the remuneration,
//! and the ordered [`Dataset`] with its bound column layout.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The date or year identifier of one remuneration record.
///
/// The raw text is kept as received (trimmed), e.g. `"2018-03-01"`,
/// `"2015"` or `"03/2018"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Period(String);

impl Period {
    /// Creates a period from raw text, trimming surrounding whitespace.
    pub fn new(raw: impl AsRef<str>) -> Self {
        Self(raw.as_ref().trim().to_string())
    }

    /// Returns the raw period text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the year encoded in the first four characters, if they are digits.
    ///
    /// # Examples
    ///
    /// ```
    /// use benefit_calculator::models::Period;
    ///
    /// assert_eq!(Period::new("2018-03-01").year_prefix(), Some(2018));
    /// assert_eq!(Period::new("2015").year_prefix(), Some(2015));
    /// assert_eq!(Period::new("abcd").year_prefix(), None);
    /// assert_eq!(Period::new("03/2018").year_prefix(), None);
    /// ```
    pub fn year_prefix(&self) -> Option<i32> {
        let prefix = self.0.get(..4)?;
        if prefix.bytes().all(|b| b.is_ascii_digit()) {
            prefix.parse().ok()
        } else {
            None
        }
    }

    /// Returns the period as an integer when the whole text is one (e.g. a bare year).
    pub fn as_integer(&self) -> Option<i64> {
        self.0.parse().ok()
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Period {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<i32> for Period {
    fn from(year: i32) -> Self {
        Self(year.to_string())
    }
}

/// One row of the input table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Zero-based position of the row among the data rows of the input.
    pub row: usize,
    /// The period this remuneration refers to.
    pub period: Period,
    /// The remuneration amount (never negative).
    pub remuneration: Decimal,
    /// Every raw cell of the row, in input column order.
    pub values: Vec<String>,
}

impl Record {
    /// Creates a two-column record whose raw values are the period and the amount.
    pub fn new(row: usize, period: Period, remuneration: Decimal) -> Self {
        let values = vec![period.as_str().to_string(), remuneration.to_string()];
        Self {
            row,
            period,
            remuneration,
            values,
        }
    }
}

/// Default header of the period column for datasets built from pairs.
pub const DEFAULT_PERIOD_COLUMN: &str = "period";

/// Default header of the remuneration column for datasets built from pairs.
pub const DEFAULT_REMUNERATION_COLUMN: &str = "remuneration";

/// An ordered sequence of records plus the column layout they were read with.
///
/// Record order is the order received from the loader. Periods need not be
/// unique.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    columns: Vec<String>,
    period_index: usize,
    remuneration_index: usize,
    records: Vec<Record>,
}

impl Dataset {
    /// Creates a dataset from its header, bound column positions and records.
    pub fn new(
        columns: Vec<String>,
        period_index: usize,
        remuneration_index: usize,
        records: Vec<Record>,
    ) -> Self {
        Self {
            columns,
            period_index,
            remuneration_index,
            records,
        }
    }

    /// Builds a two-column dataset from `(period, remuneration)` pairs.
    ///
    /// # Examples
    ///
    /// ```
    /// use benefit_calculator::models::Dataset;
    /// use rust_decimal::Decimal;
    ///
    /// let dataset = Dataset::from_pairs([
    ///     ("2015", Decimal::from(1000)),
    ///     ("2016", Decimal::from(4000)),
    /// ]);
    /// assert_eq!(dataset.len(), 2);
    /// assert_eq!(dataset.columns(), ["period", "remuneration"]);
    /// ```
    pub fn from_pairs<P, I>(pairs: I) -> Self
    where
        P: Into<Period>,
        I: IntoIterator<Item = (P, Decimal)>,
    {
        let records = pairs
            .into_iter()
            .enumerate()
            .map(|(row, (period, remuneration))| Record::new(row, period.into(), remuneration))
            .collect();

        Self::new(
            vec![
                DEFAULT_PERIOD_COLUMN.to_string(),
                DEFAULT_REMUNERATION_COLUMN.to_string(),
            ],
            0,
            1,
            records,
        )
    }

    /// Returns the header names in input order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Returns the position of the period column.
    pub fn period_index(&self) -> usize {
        self.period_index
    }

    /// Returns the position of the remuneration column.
    pub fn remuneration_index(&self) -> usize {
        self.remuneration_index
    }

    /// Returns the header of the period column.
    pub fn period_column(&self) -> &str {
        &self.columns[self.period_index]
    }

    /// Returns the header of the remuneration column.
    pub fn remuneration_column(&self) -> &str {
        &self.columns[self.remuneration_index]
    }

    /// Returns the records in loader order.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Returns the number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if the dataset has no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_period_is_trimmed() {
        assert_eq!(Period::new("  2018-03-01 ").as_str(), "2018-03-01");
    }

    #[test]
    fn test_year_prefix_of_iso_date() {
        assert_eq!(Period::new("2019-01-01").year_prefix(), Some(2019));
    }

    #[test]
    fn test_year_prefix_requires_four_digits() {
        assert_eq!(Period::new("201").year_prefix(), None);
        assert_eq!(Period::new("20a8-01-01").year_prefix(), None);
        assert_eq!(Period::new("").year_prefix(), None);
    }

    #[test]
    fn test_year_prefix_with_multibyte_text_does_not_panic() {
        assert_eq!(Period::new("ação").year_prefix(), None);
    }

    #[test]
    fn test_as_integer_only_for_whole_integers() {
        assert_eq!(Period::new("2015").as_integer(), Some(2015));
        assert_eq!(Period::new("2015-01").as_integer(), None);
    }

    #[test]
    fn test_period_serializes_as_plain_string() {
        let json = serde_json::to_string(&Period::new("2018-03")).unwrap();
        assert_eq!(json, "\"2018-03\"");
    }

    #[test]
    fn test_record_new_fills_raw_values() {
        let record = Record::new(0, Period::from(2015), Decimal::new(100050, 2));
        assert_eq!(record.values, vec!["2015".to_string(), "1000.50".to_string()]);
    }

    #[test]
    fn test_from_pairs_keeps_order_and_rows() {
        let dataset = Dataset::from_pairs([
            ("2017", Decimal::from(3)),
            ("2015", Decimal::from(1)),
            ("2016", Decimal::from(2)),
        ]);
        let periods: Vec<&str> = dataset.records().iter().map(|r| r.period.as_str()).collect();
        assert_eq!(periods, vec!["2017", "2015", "2016"]);
        assert_eq!(dataset.records()[2].row, 2);
        assert_eq!(dataset.period_column(), "period");
        assert_eq!(dataset.remuneration_column(), "remuneration");
    }

    #[test]
    fn test_empty_dataset() {
        let dataset = Dataset::from_pairs(Vec::<(&str, Decimal)>::new());
        assert!(dataset.is_empty());
        assert_eq!(dataset.len(), 0);
    }
}
