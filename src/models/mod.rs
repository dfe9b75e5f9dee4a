//! Core data models for the benefit calculator.
//!
//! This module contains all the domain models used throughout the crate.

mod calculation_result;
mod normative_label;
mod record;

pub use calculation_result::{
    AuditStep, AuditTrace, AuditWarning, BenefitReport, CalculationResult,
};
pub use normative_label::NormativeLabel;
pub use record::{
    DEFAULT_PERIOD_COLUMN, DEFAULT_REMUNERATION_COLUMN, Dataset, Period, Record,
};
