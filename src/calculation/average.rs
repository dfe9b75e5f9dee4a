//! Average of the top-earnings subset.

use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};
use crate::models::{AuditStep, Record};

/// The result of averaging the selected remunerations, including the audit step.
#[derive(Debug, Clone)]
pub struct AverageResult {
    /// Arithmetic mean of the remunerations.
    pub average: Decimal,
    /// Sum of the remunerations.
    pub total: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Computes the arithmetic mean remuneration of `subset`.
///
/// # Errors
///
/// Returns [`EngineError::EmptyDataset`] for an empty subset, and
/// [`EngineError::Calculation`] if the sum overflows.
///
/// # Examples
///
/// ```
/// use benefit_calculator::calculation::calculate_average;
/// use benefit_calculator::models::Dataset;
/// use rust_decimal::Decimal;
///
/// let dataset = Dataset::from_pairs([
///     ("2016", Decimal::from(4000)),
///     ("2017", Decimal::from(2000)),
///     ("2018", Decimal::from(3000)),
///     ("2019", Decimal::from(5000)),
/// ]);
///
/// let result = calculate_average(dataset.records(), "art. 29, II", 3).unwrap();
/// assert_eq!(result.average, Decimal::from(3500));
/// ```
pub fn calculate_average(
    subset: &[Record],
    clause_ref: &str,
    step_number: u32,
) -> EngineResult<AverageResult> {
    if subset.is_empty() {
        return Err(EngineError::EmptyDataset {
            records: 0,
            required: 1,
        });
    }

    let total = subset
        .iter()
        .try_fold(Decimal::ZERO, |acc, r| acc.checked_add(r.remuneration))
        .ok_or_else(|| EngineError::Calculation {
            message: "remuneration sum overflowed".to_string(),
        })?;

    let count = Decimal::from(subset.len());
    let average = total.checked_div(count).ok_or_else(|| EngineError::Calculation {
        message: format!("cannot divide {} by {}", total, count),
    })?;

    let audit_step = AuditStep {
        step_number,
        rule_id: "top_earnings_average".to_string(),
        rule_name: "Top Earnings Average".to_string(),
        clause_ref: clause_ref.to_string(),
        input: serde_json::json!({
            "records": subset.len(),
            "total": total.normalize().to_string()
        }),
        output: serde_json::json!({
            "average": average.normalize().to_string()
        }),
        reasoning: format!(
            "{} / {} = {}",
            total.normalize(),
            subset.len(),
            average.round_dp(2)
        ),
    };

    Ok(AverageResult {
        average,
        total,
        audit_step,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Dataset;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_average_of_four_top_earnings() {
        let dataset = Dataset::from_pairs([
            ("2016", dec("4000")),
            ("2017", dec("2000")),
            ("2018", dec("3000")),
            ("2019", dec("5000")),
        ]);

        let result = calculate_average(dataset.records(), "", 1).unwrap();

        assert_eq!(result.average, dec("3500"));
        assert_eq!(result.total, dec("14000"));
        assert_eq!(result.audit_step.rule_id, "top_earnings_average");
        assert_eq!(result.audit_step.output["average"], "3500");
    }

    #[test]
    fn test_average_keeps_cents() {
        let dataset = Dataset::from_pairs([("2015", dec("1000.10")), ("2016", dec("1000.25"))]);

        let result = calculate_average(dataset.records(), "", 1).unwrap();

        assert_eq!(result.average, dec("1000.175"));
    }

    #[test]
    fn test_average_of_empty_subset_is_rejected() {
        assert!(matches!(
            calculate_average(&[], "", 1),
            Err(EngineError::EmptyDataset { records: 0, .. })
        ));
    }

    #[test]
    fn test_average_overflow_is_calculation_error() {
        let dataset = Dataset::from_pairs([("2015", Decimal::MAX), ("2016", Decimal::MAX)]);

        assert!(matches!(
            calculate_average(dataset.records(), "", 1),
            Err(EngineError::Calculation { .. })
        ));
    }
}
