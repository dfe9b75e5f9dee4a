//! The complete benefit calculation.
//!
//! Chains the individual rules in order and assembles a [`BenefitReport`]
//! with the audit trace of every step.

use std::time::Instant;

use chrono::Utc;
use tracing::{debug, info};
use uuid::Uuid;

use crate::config::BenefitConfig;
use crate::error::EngineResult;
use crate::models::{AuditTrace, BenefitReport, CalculationResult, Dataset};

use super::average::calculate_average;
use super::benefit_factor::{calculate_benefit_amount, calculate_benefit_factor};
use super::normative_classification::label_records;
use super::period_sort::sort_by_period;
use super::top_earnings::select_top_earnings;

/// Computes the benefit for a dataset.
///
/// 1. sort the records by period
/// 2. keep the top earnings by count
/// 3. average them
/// 4. compute the benefit factor from the configured constants
/// 5. multiply average and factor
/// 6. label every record (input order) relative to the threshold year
///
/// The dataset is not modified.
///
/// # Errors
///
/// - `EmptyDataset` when there are fewer records than the configured minimum
///   or the selection would be empty
/// - `Calculation` for a zero survival expectancy or arithmetic overflow
///
/// # Examples
///
/// ```
/// use benefit_calculator::calculation::compute_benefit;
/// use benefit_calculator::config::BenefitConfig;
/// use benefit_calculator::models::Dataset;
/// use rust_decimal::Decimal;
///
/// let dataset = Dataset::from_pairs([
///     (2015, Decimal::from(1000)),
///     (2016, Decimal::from(4000)),
///     (2017, Decimal::from(2000)),
///     (2018, Decimal::from(3000)),
///     (2019, Decimal::from(5000)),
/// ]);
///
/// let report = compute_benefit(&dataset, &BenefitConfig::default())?;
/// assert_eq!(report.calculation.average_top80, Decimal::from(3500));
/// assert_eq!(report.top_earnings.len(), 4);
/// # Ok::<(), benefit_calculator::error::EngineError>(())
/// ```
pub fn compute_benefit(dataset: &Dataset, config: &BenefitConfig) -> EngineResult<BenefitReport> {
    let start_time = Instant::now();
    let calculation_id = Uuid::new_v4();
    let mut steps = Vec::with_capacity(6);
    let mut step_number: u32 = 1;

    debug!(
        calculation_id = %calculation_id,
        records = dataset.len(),
        "Starting benefit calculation"
    );

    let sort = sort_by_period(dataset.records(), step_number);
    steps.push(sort.audit_step);
    step_number += 1;

    let selection = select_top_earnings(&sort.sorted, config.selection(), step_number)?;
    steps.push(selection.audit_step);
    step_number += 1;

    let average = calculate_average(&selection.subset, &config.selection().clause, step_number)?;
    steps.push(average.audit_step);
    step_number += 1;

    let factor = calculate_benefit_factor(config.factor(), step_number)?;
    steps.push(factor.audit_step);
    step_number += 1;

    let amount = calculate_benefit_amount(
        average.average,
        factor.factor,
        &config.factor().clause,
        step_number,
    )?;
    steps.push(amount.audit_step);
    step_number += 1;

    let classification = label_records(dataset.records(), config.normative(), step_number);
    steps.push(classification.audit_step);

    let duration_us = start_time.elapsed().as_micros() as u64;

    info!(
        calculation_id = %calculation_id,
        records = dataset.len(),
        selected = selection.subset.len(),
        benefit_amount = %amount.amount.round_dp(2),
        warnings = classification.warnings.len(),
        duration_us,
        "Benefit calculation completed"
    );

    Ok(BenefitReport {
        calculation_id,
        timestamp: Utc::now(),
        engine_version: env!("CARGO_PKG_VERSION").to_string(),
        regime: config.regime().code.clone(),
        record_count: dataset.len(),
        top_earnings: selection.subset,
        calculation: CalculationResult {
            average_top80: average.average,
            benefit_factor: factor.factor,
            benefit_amount: amount.amount,
        },
        labels: classification.labels,
        audit_trace: AuditTrace {
            steps,
            warnings: classification.warnings,
            duration_us,
        },
    })
}
