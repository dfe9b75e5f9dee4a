//! Period ordering of the input records.
//!
//! Records are sorted ascending by period before the top-earnings selection
//! so that ties at the selection boundary resolve deterministically.

use serde::{Deserialize, Serialize};

use crate::models::{AuditStep, Record};

/// How periods were compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PeriodOrdering {
    /// Every period was an integer, compared by value.
    Numeric,
    /// At least one period was not an integer, compared by raw text.
    Lexicographic,
}

/// The result of sorting records by period, including the audit step.
#[derive(Debug, Clone)]
pub struct PeriodSortResult {
    /// The records in ascending period order.
    pub sorted: Vec<Record>,
    /// The comparison that was applied.
    pub ordering: PeriodOrdering,
    /// The audit step recording this sort.
    pub audit_step: AuditStep,
}

/// Sorts records ascending by period.
///
/// The sort is stable: records with equal periods keep their input order.
/// When every period is an integer (e.g. bare years) the comparison is
/// numeric, so `"999"` sorts before `"1000"`; otherwise the raw text is
/// compared, which orders ISO dates chronologically.
///
/// # Examples
///
/// ```
/// use benefit_calculator::calculation::{sort_by_period, PeriodOrdering};
/// use benefit_calculator::models::Dataset;
/// use rust_decimal::Decimal;
///
/// let dataset = Dataset::from_pairs([
///     ("2017", Decimal::from(2000)),
///     ("2015", Decimal::from(1000)),
///     ("2016", Decimal::from(4000)),
/// ]);
///
/// let result = sort_by_period(dataset.records(), 1);
/// assert_eq!(result.ordering, PeriodOrdering::Numeric);
/// assert_eq!(result.sorted[0].period.as_str(), "2015");
/// assert_eq!(result.sorted[2].period.as_str(), "2017");
/// ```
pub fn sort_by_period(records: &[Record], step_number: u32) -> PeriodSortResult {
    let mut sorted = records.to_vec();

    let ordering = if records.iter().all(|r| r.period.as_integer().is_some()) {
        sorted.sort_by_key(|r| r.period.as_integer());
        PeriodOrdering::Numeric
    } else {
        sorted.sort_by(|a, b| a.period.as_str().cmp(b.period.as_str()));
        PeriodOrdering::Lexicographic
    };

    let reasoning = match (sorted.first(), sorted.last()) {
        (Some(first), Some(last)) => format!(
            "Sorted {} records by period ({:?} comparison), from {} to {}",
            sorted.len(),
            ordering,
            first.period,
            last.period
        ),
        _ => "No records to sort".to_string(),
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "period_sort".to_string(),
        rule_name: "Period Sort".to_string(),
        clause_ref: String::new(),
        input: serde_json::json!({
            "records": records.len()
        }),
        output: serde_json::json!({
            "ordering": ordering,
            "first_period": sorted.first().map(|r| r.period.as_str()),
            "last_period": sorted.last().map(|r| r.period.as_str())
        }),
        reasoning,
    };

    PeriodSortResult {
        sorted,
        ordering,
        audit_step,
    }
}
