//! Top-earnings selection.
//!
//! This module selects the largest remunerations, by count, that the
//! benefit average is computed over (Lei 8.213/91, art. 29, II).

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::config::{RoundingPolicy, SelectionPolicy};
use crate::error::{EngineError, EngineResult};
use crate::models::{AuditStep, Record};

/// The result of selecting the top earnings, including the audit step.
#[derive(Debug, Clone)]
pub struct TopEarningsResult {
    /// The selected records, in the order of the input slice.
    pub subset: Vec<Record>,
    /// The audit step recording this selection.
    pub audit_step: AuditStep,
}

/// Returns how many records the selection keeps out of `records`.
///
/// The product `fraction * records` is turned into a count with the given
/// rounding and capped at `records`.
///
/// # Examples
///
/// ```
/// use benefit_calculator::calculation::top_count;
/// use benefit_calculator::config::RoundingPolicy;
/// use rust_decimal::Decimal;
///
/// let fraction = Decimal::new(8, 1);
/// assert_eq!(top_count(5, fraction, RoundingPolicy::Floor), 4);
/// assert_eq!(top_count(7, fraction, RoundingPolicy::Floor), 5);
/// assert_eq!(top_count(7, fraction, RoundingPolicy::Ceil), 6);
/// assert_eq!(top_count(1, fraction, RoundingPolicy::Floor), 0);
/// ```
pub fn top_count(records: usize, fraction: Decimal, rounding: RoundingPolicy) -> usize {
    let raw = fraction * Decimal::from(records);
    let rounded = match rounding {
        RoundingPolicy::Floor => raw.floor(),
        RoundingPolicy::Round => {
            raw.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        }
        RoundingPolicy::Ceil => raw.ceil(),
    };

    rounded.to_usize().unwrap_or(0).min(records)
}

/// Returns the smallest record count for which [`top_count`] keeps at least
/// one record.
///
/// `None` when no count qualifies, which is the case for a non-positive
/// fraction.
///
/// # Examples
///
/// ```
/// use benefit_calculator::calculation::smallest_selecting_count;
/// use benefit_calculator::config::RoundingPolicy;
/// use rust_decimal::Decimal;
///
/// assert_eq!(smallest_selecting_count(Decimal::new(8, 1), RoundingPolicy::Floor), Some(2));
/// assert_eq!(smallest_selecting_count(Decimal::new(1, 1), RoundingPolicy::Floor), Some(10));
/// assert_eq!(smallest_selecting_count(Decimal::new(1, 1), RoundingPolicy::Ceil), Some(1));
/// ```
pub fn smallest_selecting_count(fraction: Decimal, rounding: RoundingPolicy) -> Option<usize> {
    if fraction <= Decimal::ZERO {
        return None;
    }

    let target = match rounding {
        RoundingPolicy::Floor => Decimal::ONE,
        RoundingPolicy::Round => Decimal::new(5, 1),
        RoundingPolicy::Ceil => return Some(1),
    };
    let mut count = target.checked_div(fraction)?.ceil().to_usize()?.max(1);

    // The quotient may be off by one unit in its last digit either way.
    while top_count(count, fraction, rounding) == 0 {
        count = count.checked_add(1)?;
    }
    while count > 1 && top_count(count - 1, fraction, rounding) > 0 {
        count -= 1;
    }

    Some(count)
}

/// Selects the records with the largest remuneration.
///
/// Takes `top_count` records from `sorted`. Ties at the boundary are broken
/// by position: of two equal remunerations, the one earlier in `sorted` is
/// kept. The subset is returned in the order of `sorted`.
///
/// # Errors
///
/// Returns [`EngineError::EmptyDataset`] when `sorted` holds fewer records
/// than the policy's `minimum_records`, or when the selection would be empty.
/// In the second case `required` is the smallest record count that selects
/// something. Returns [`EngineError::Calculation`] when the policy's
/// `top_fraction` can never select a record.
///
/// # Examples
///
/// ```
/// use benefit_calculator::calculation::select_top_earnings;
/// use benefit_calculator::config::BenefitConfig;
/// use benefit_calculator::models::Dataset;
/// use rust_decimal::Decimal;
///
/// let dataset = Dataset::from_pairs([
///     ("2015", Decimal::from(1000)),
///     ("2016", Decimal::from(4000)),
///     ("2017", Decimal::from(2000)),
///     ("2018", Decimal::from(3000)),
///     ("2019", Decimal::from(5000)),
/// ]);
///
/// let config = BenefitConfig::default();
/// let result = select_top_earnings(dataset.records(), config.selection(), 2).unwrap();
///
/// let amounts: Vec<Decimal> = result.subset.iter().map(|r| r.remuneration).collect();
/// assert_eq!(amounts, vec![
///     Decimal::from(4000),
///     Decimal::from(2000),
///     Decimal::from(3000),
///     Decimal::from(5000),
/// ]);
/// ```
pub fn select_top_earnings(
    sorted: &[Record],
    policy: &SelectionPolicy,
    step_number: u32,
) -> EngineResult<TopEarningsResult> {
    let total = sorted.len();

    if total < policy.minimum_records {
        return Err(EngineError::EmptyDataset {
            records: total,
            required: policy.minimum_records,
        });
    }

    let count = top_count(total, policy.top_fraction, policy.rounding);
    if count == 0 {
        let required = smallest_selecting_count(policy.top_fraction, policy.rounding)
            .ok_or_else(|| EngineError::Calculation {
                message: format!(
                    "top_fraction {} never selects a record",
                    policy.top_fraction.normalize()
                ),
            })?;
        return Err(EngineError::EmptyDataset {
            records: total,
            required: required.max(policy.minimum_records),
        });
    }

    // Stable sort keeps earlier positions first among equal amounts.
    let mut ranked: Vec<usize> = (0..total).collect();
    ranked.sort_by(|&a, &b| sorted[b].remuneration.cmp(&sorted[a].remuneration));
    ranked.truncate(count);

    let threshold = ranked
        .last()
        .map(|&i| sorted[i].remuneration)
        .unwrap_or_default();

    ranked.sort_unstable();
    let subset: Vec<Record> = ranked.into_iter().map(|i| sorted[i].clone()).collect();

    let audit_step = AuditStep {
        step_number,
        rule_id: "top_earnings_selection".to_string(),
        rule_name: "Top Earnings Selection".to_string(),
        clause_ref: policy.clause.clone(),
        input: serde_json::json!({
            "records": total,
            "top_fraction": policy.top_fraction.normalize().to_string(),
            "rounding": policy.rounding
        }),
        output: serde_json::json!({
            "selected": count,
            "smallest_selected": threshold.normalize().to_string(),
            "periods": subset.iter().map(|r| r.period.as_str()).collect::<Vec<_>>()
        }),
        reasoning: format!(
            "{:?}({} × {}) = {} records kept, smallest selected remuneration {}",
            policy.rounding,
            policy.top_fraction.normalize(),
            total,
            count,
            threshold.normalize()
        ),
    };

    Ok(TopEarningsResult { subset, audit_step })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BenefitConfig;
    use crate::models::Dataset;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn policy() -> SelectionPolicy {
        BenefitConfig::default().selection().clone()
    }

    #[test]
    fn test_top_count_floor_matches_truncation() {
        let fraction = dec("0.8");
        assert_eq!(top_count(2, fraction, RoundingPolicy::Floor), 1);
        assert_eq!(top_count(3, fraction, RoundingPolicy::Floor), 2);
        assert_eq!(top_count(10, fraction, RoundingPolicy::Floor), 8);
        assert_eq!(top_count(12, fraction, RoundingPolicy::Floor), 9);
    }

    #[test]
    fn test_top_count_round_and_ceil() {
        let fraction = dec("0.8");
        // 0.8 * 3 = 2.4, 0.8 * 4 = 3.2, 0.8 * 7 = 5.6
        assert_eq!(top_count(3, fraction, RoundingPolicy::Round), 2);
        assert_eq!(top_count(7, fraction, RoundingPolicy::Round), 6);
        assert_eq!(top_count(4, fraction, RoundingPolicy::Ceil), 4);
        assert_eq!(top_count(1, fraction, RoundingPolicy::Ceil), 1);
    }

    #[test]
    fn test_top_count_never_exceeds_records() {
        assert_eq!(top_count(3, Decimal::ONE, RoundingPolicy::Ceil), 3);
        assert_eq!(top_count(0, dec("0.8"), RoundingPolicy::Ceil), 0);
    }

    #[test]
    fn test_selection_keeps_sorted_order() {
        let dataset = Dataset::from_pairs([
            ("2015", dec("1000")),
            ("2016", dec("4000")),
            ("2017", dec("2000")),
            ("2018", dec("3000")),
            ("2019", dec("5000")),
        ]);

        let result = select_top_earnings(dataset.records(), &policy(), 2).unwrap();
        let periods: Vec<&str> = result.subset.iter().map(|r| r.period.as_str()).collect();

        assert_eq!(periods, vec!["2016", "2017", "2018", "2019"]);
        assert_eq!(result.audit_step.output["selected"], 4);
        assert_eq!(result.audit_step.output["smallest_selected"], "2000");
    }

    #[test]
    fn test_ties_at_boundary_keep_earlier_position() {
        // 5 records -> 4 kept; three records tie at 1000 for the last two places.
        let dataset = Dataset::from_pairs([
            ("2015", dec("1000")),
            ("2016", dec("9000")),
            ("2017", dec("1000")),
            ("2018", dec("8000")),
            ("2019", dec("1000")),
        ]);

        let result = select_top_earnings(dataset.records(), &policy(), 1).unwrap();
        let periods: Vec<&str> = result.subset.iter().map(|r| r.period.as_str()).collect();

        assert_eq!(periods, vec!["2015", "2016", "2017", "2018"]);
    }

    #[test]
    fn test_two_records_keep_the_larger() {
        let dataset = Dataset::from_pairs([("2015", dec("1000")), ("2016", dec("3000"))]);

        let result = select_top_earnings(dataset.records(), &policy(), 1).unwrap();

        assert_eq!(result.subset.len(), 1);
        assert_eq!(result.subset[0].remuneration, dec("3000"));
    }

    #[test]
    fn test_single_record_is_empty_dataset() {
        let dataset = Dataset::from_pairs([("2015", dec("1000"))]);

        let result = select_top_earnings(dataset.records(), &policy(), 1);

        match result {
            Err(EngineError::EmptyDataset { records, required }) => {
                assert_eq!(records, 1);
                assert_eq!(required, 2);
            }
            other => panic!("Expected EmptyDataset, got {:?}", other),
        }
    }

    #[test]
    fn test_zero_count_is_empty_dataset_even_above_minimum() {
        let mut policy = policy();
        policy.minimum_records = 1;
        let dataset = Dataset::from_pairs([("2015", dec("1000"))]);

        let result = select_top_earnings(dataset.records(), &policy, 1);

        assert!(matches!(
            result,
            Err(EngineError::EmptyDataset { records: 1, .. })
        ));
    }

    #[test]
    fn test_smallest_selecting_count_per_rounding() {
        assert_eq!(smallest_selecting_count(dec("0.3"), RoundingPolicy::Floor), Some(4));
        assert_eq!(smallest_selecting_count(dec("0.1"), RoundingPolicy::Round), Some(5));
        assert_eq!(smallest_selecting_count(dec("0.8"), RoundingPolicy::Round), Some(1));
        assert_eq!(smallest_selecting_count(Decimal::ZERO, RoundingPolicy::Floor), None);
    }

    #[test]
    fn test_small_fraction_reports_count_that_selects_a_record() {
        let mut policy = policy();
        policy.top_fraction = dec("0.1");
        let dataset = Dataset::from_pairs([
            ("2015", dec("1000")),
            ("2016", dec("4000")),
            ("2017", dec("2000")),
            ("2018", dec("3000")),
            ("2019", dec("5000")),
        ]);

        let result = select_top_earnings(dataset.records(), &policy, 1);

        match result {
            Err(EngineError::EmptyDataset { records, required }) => {
                assert_eq!(records, 5);
                assert_eq!(required, 10);
                assert_eq!(top_count(required, policy.top_fraction, policy.rounding), 1);
            }
            other => panic!("Expected EmptyDataset, got {:?}", other),
        }
    }

    #[test]
    fn test_zero_fraction_is_calculation_error() {
        let mut policy = policy();
        policy.top_fraction = Decimal::ZERO;
        let dataset = Dataset::from_pairs([("2015", dec("1000")), ("2016", dec("3000"))]);

        let result = select_top_earnings(dataset.records(), &policy, 1);

        assert!(matches!(result, Err(EngineError::Calculation { .. })));
    }
}
