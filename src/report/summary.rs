//! Human-readable summary and chart data of a benefit report.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::BenefitReport;

/// The monetary results formatted for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSummary {
    /// Average of the top earnings, e.g. `R$ 3,500.00`.
    pub average_top80: String,
    /// Benefit factor with four decimal places, e.g. `0.9322`.
    pub benefit_factor: String,
    /// Benefit amount, e.g. `R$ 3,262.72`.
    pub benefit_amount: String,
}

impl ReportSummary {
    /// Formats the calculation result of a report.
    ///
    /// # Examples
    ///
    /// ```
    /// use benefit_calculator::calculation::compute_benefit;
    /// use benefit_calculator::config::BenefitConfig;
    /// use benefit_calculator::models::Dataset;
    /// use benefit_calculator::report::ReportSummary;
    /// use rust_decimal::Decimal;
    ///
    /// let dataset = Dataset::from_pairs([
    ///     (2015, Decimal::from(1000)),
    ///     (2016, Decimal::from(4000)),
    ///     (2017, Decimal::from(2000)),
    ///     (2018, Decimal::from(3000)),
    ///     (2019, Decimal::from(5000)),
    /// ]);
    /// let report = compute_benefit(&dataset, &BenefitConfig::default())?;
    ///
    /// let summary = ReportSummary::from_report(&report);
    /// assert_eq!(summary.average_top80, "R$ 3,500.00");
    /// assert_eq!(summary.benefit_factor, "0.9322");
    /// assert_eq!(summary.benefit_amount, "R$ 3,262.72");
    /// # Ok::<(), benefit_calculator::error::EngineError>(())
    /// ```
    pub fn from_report(report: &BenefitReport) -> Self {
        let calculation = &report.calculation;
        Self {
            average_top80: format_currency(calculation.average_top80),
            benefit_factor: format!("{:.4}", calculation.benefit_factor.round_dp(4)),
            benefit_amount: format_currency(calculation.benefit_amount),
        }
    }
}

impl fmt::Display for ReportSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Média dos 80% maiores salários: {}", self.average_top80)?;
        writeln!(f, "Fator Previdenciário: {}", self.benefit_factor)?;
        write!(f, "Salário de Benefício: {}", self.benefit_amount)
    }
}

/// One bar of the top-earnings chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartPoint {
    /// Period shown on the x axis.
    pub period: String,
    /// Remuneration shown as the bar height.
    pub remuneration: Decimal,
}

/// Returns the `(period, remuneration)` series of the top-earnings subset.
pub fn chart_series(report: &BenefitReport) -> Vec<ChartPoint> {
    report
        .top_earnings
        .iter()
        .map(|record| ChartPoint {
            period: record.period.to_string(),
            remuneration: record.remuneration,
        })
        .collect()
}

/// Formats an amount as `R$ 1,234.56`: two decimals, comma thousands separator.
pub fn format_currency(amount: Decimal) -> String {
    let text = format!("{:.2}", amount.round_dp(2));
    let (sign, unsigned) = match text.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", text.as_str()),
    };
    let (integer, fraction) = unsigned.split_once('.').unwrap_or((unsigned, "00"));

    let mut grouped = String::with_capacity(integer.len() + integer.len() / 3);
    for (i, digit) in integer.chars().enumerate() {
        if i > 0 && (integer.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    format!("R$ {}{}.{}", sign, grouped, fraction)
}
