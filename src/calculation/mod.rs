//! Calculation logic for the benefit calculator.
//!
//! This module contains one function per rule of the simplified benefit
//! calculation: period sorting, top-earnings selection, averaging, the
//! benefit factor and amount, and the per-record normative classification.
//! [`compute_benefit`] chains them into a [`BenefitReport`](crate::models::BenefitReport).

mod average;
mod benefit;
mod benefit_factor;
mod normative_classification;
mod period_sort;
mod top_earnings;

pub use average::{AverageResult, calculate_average};
pub use benefit::compute_benefit;
pub use benefit_factor::{
    BenefitAmountResult, BenefitFactorResult, calculate_benefit_amount, calculate_benefit_factor,
};
pub use normative_classification::{
    ClassificationResult, UNPARSEABLE_PERIOD_WARNING, classify_period, label_records,
};
pub use period_sort::{PeriodOrdering, PeriodSortResult, sort_by_period};
pub use top_earnings::{TopEarningsResult, select_top_earnings, smallest_selecting_count, top_count};
