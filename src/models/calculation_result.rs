//! Calculation result models for the benefit calculator.
//!
//! This module contains the [`CalculationResult`] triple, the [`BenefitReport`]
//! handed to the reporting layer, and the audit trace structures that record
//! every decision taken while computing it.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{NormativeLabel, Record};

/// The three derived values of a benefit calculation.
///
/// Computed fresh on every invocation and never mutated afterwards.
///
/// # Example
///
/// ```
/// use benefit_calculator::models::CalculationResult;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let result = CalculationResult {
///     average_top80: Decimal::from(3500),
///     benefit_factor: Decimal::from_str("0.9322").unwrap(),
///     benefit_amount: Decimal::from_str("3262.70").unwrap(),
/// };
/// assert!(result.benefit_amount < result.average_top80);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationResult {
    /// Arithmetic mean of the top-earnings subset.
    pub average_top80: Decimal,
    /// The benefit factor derived from the configured constants.
    pub benefit_factor: Decimal,
    /// `average_top80 * benefit_factor`.
    pub benefit_amount: Decimal,
}

/// A single step in the audit trace recording a calculation decision.
///
/// Each step captures the input, output, and reasoning for a rule application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// Reference to the legal clause for this rule.
    pub clause_ref: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// A warning generated during calculation.
///
/// Warnings indicate potential issues that don't prevent calculation
/// but may require attention.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level (e.g., "low", "medium", "high").
    pub severity: String,
}

/// The complete audit trace for a calculation.
///
/// # Example
///
/// ```
/// use benefit_calculator::models::AuditTrace;
///
/// let trace = AuditTrace {
///     steps: vec![],
///     warnings: vec![],
///     duration_us: 1234,
/// };
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The sequence of calculation steps.
    pub steps: Vec<AuditStep>,
    /// Any warnings generated during calculation.
    pub warnings: Vec<AuditWarning>,
    /// The total calculation duration in microseconds.
    pub duration_us: u64,
}

/// Everything the reporting layer receives from one calculation.
///
/// `labels` is aligned with the input dataset order (one label per record),
/// while `top_earnings` follows the period-sorted order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenefitReport {
    /// Unique identifier for this calculation.
    pub calculation_id: Uuid,
    /// When the calculation was performed.
    pub timestamp: DateTime<Utc>,
    /// The version of the engine that performed the calculation.
    pub engine_version: String,
    /// Code of the regime whose constants were used.
    pub regime: String,
    /// Number of records in the input dataset.
    pub record_count: usize,
    /// The top-earnings subset the average was computed over.
    pub top_earnings: Vec<Record>,
    /// Average, factor and benefit amount.
    pub calculation: CalculationResult,
    /// Normative label of every input record.
    pub labels: Vec<NormativeLabel>,
    /// Complete audit trace of calculation decisions.
    pub audit_trace: AuditTrace,
}
