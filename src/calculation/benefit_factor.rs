//! Benefit factor ("fator previdenciário") calculation.
//!
//! The factor depends only on the configured constants:
//!
//! ```text
//! f = (Tc × a / Es) × (1 + (Id + Tc × a) / 100)
//! ```
//!
//! where `Tc` is the contribution time in years, `a` the contribution
//! weight, `Es` the survival expectancy and `Id` the minimum age.

use rust_decimal::Decimal;

use crate::config::FactorConstants;
use crate::error::{EngineError, EngineResult};
use crate::models::AuditStep;

/// The result of computing the benefit factor, including the audit step.
#[derive(Debug, Clone)]
pub struct BenefitFactorResult {
    /// The computed factor.
    pub factor: Decimal,
    /// Contribution time expressed in fractional years.
    pub contribution_years: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// The result of applying the factor to the average, including the audit step.
#[derive(Debug, Clone)]
pub struct BenefitAmountResult {
    /// `average × factor`.
    pub amount: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Computes the benefit factor from its constants.
///
/// # Errors
///
/// Returns [`EngineError::Calculation`] when the survival expectancy is
/// zero or an intermediate value overflows.
///
/// # Examples
///
/// ```
/// use benefit_calculator::calculation::calculate_benefit_factor;
/// use benefit_calculator::config::BenefitConfig;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let config = BenefitConfig::default();
/// let result = calculate_benefit_factor(config.factor(), 4).unwrap();
/// assert_eq!(result.factor.round_dp(4), Decimal::from_str("0.9322").unwrap());
/// ```
pub fn calculate_benefit_factor(
    constants: &FactorConstants,
    step_number: u32,
) -> EngineResult<BenefitFactorResult> {
    if constants.survival_expectancy.is_zero() {
        return Err(EngineError::Calculation {
            message: "survival expectancy must not be zero".to_string(),
        });
    }

    let overflow = || EngineError::Calculation {
        message: "benefit factor overflowed".to_string(),
    };

    let contribution_years = constants.contribution_time.in_years();
    let weighted = contribution_years
        .checked_mul(constants.weight)
        .ok_or_else(overflow)?;
    let base = weighted
        .checked_div(constants.survival_expectancy)
        .ok_or_else(overflow)?;
    let age_term = constants
        .minimum_age
        .checked_add(weighted)
        .ok_or_else(overflow)?
        / Decimal::ONE_HUNDRED;
    let factor = base
        .checked_mul(Decimal::ONE + age_term)
        .ok_or_else(overflow)?;

    let time = constants.contribution_time;
    let audit_step = AuditStep {
        step_number,
        rule_id: "benefit_factor".to_string(),
        rule_name: "Benefit Factor".to_string(),
        clause_ref: constants.clause.clone(),
        input: serde_json::json!({
            "contribution_time": {
                "years": time.years,
                "months": time.months,
                "days": time.days
            },
            "weight": constants.weight.normalize().to_string(),
            "survival_expectancy": constants.survival_expectancy.normalize().to_string(),
            "minimum_age": constants.minimum_age.normalize().to_string()
        }),
        output: serde_json::json!({
            "contribution_years": contribution_years.round_dp(6).to_string(),
            "factor": factor.normalize().to_string()
        }),
        reasoning: format!(
            "({} × {} / {}) × (1 + ({} + {} × {}) / 100) = {}",
            contribution_years.round_dp(4),
            constants.weight.normalize(),
            constants.survival_expectancy.normalize(),
            constants.minimum_age.normalize(),
            contribution_years.round_dp(4),
            constants.weight.normalize(),
            factor.round_dp(4)
        ),
    };

    Ok(BenefitFactorResult {
        factor,
        contribution_years,
        audit_step,
    })
}

/// Applies the factor to the top-earnings average.
///
/// # Errors
///
/// Returns [`EngineError::Calculation`] if the product overflows.
pub fn calculate_benefit_amount(
    average: Decimal,
    factor: Decimal,
    clause_ref: &str,
    step_number: u32,
) -> EngineResult<BenefitAmountResult> {
    let amount = average
        .checked_mul(factor)
        .ok_or_else(|| EngineError::Calculation {
            message: format!("{} × {} overflowed", average, factor),
        })?;

    let audit_step = AuditStep {
        step_number,
        rule_id: "benefit_amount".to_string(),
        rule_name: "Benefit Amount".to_string(),
        clause_ref: clause_ref.to_string(),
        input: serde_json::json!({
            "average": average.normalize().to_string(),
            "factor": factor.normalize().to_string()
        }),
        output: serde_json::json!({
            "amount": amount.normalize().to_string()
        }),
        reasoning: format!(
            "{} × {} = {}",
            average.round_dp(2),
            factor.round_dp(4),
            amount.round_dp(2)
        ),
    };

    Ok(BenefitAmountResult { amount, audit_step })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{BenefitConfig, ContributionTime};
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn default_constants() -> FactorConstants {
        BenefitConfig::default().factor().clone()
    }

    #[test]
    fn test_default_factor() {
        let result = calculate_benefit_factor(&default_constants(), 1).unwrap();

        assert_eq!(result.factor.round_dp(4), dec("0.9322"));
        assert_eq!(result.contribution_years.round_dp(6), dec("38.151826"));
        assert_eq!(result.audit_step.rule_id, "benefit_factor");
        assert_eq!(result.audit_step.clause_ref, "Lei 8.213/91, art. 29, §7º");
    }

    #[test]
    fn test_factor_is_deterministic() {
        let a = calculate_benefit_factor(&default_constants(), 1).unwrap();
        let b = calculate_benefit_factor(&default_constants(), 9).unwrap();
        assert_eq!(a.factor, b.factor);
    }

    #[test]
    fn test_factor_with_round_constants() {
        // Tc = 40, a = 0.5, Es = 20, Id = 60 -> (20 / 20) × (1 + 80 / 100) = 1.8
        let constants = FactorConstants {
            contribution_time: ContributionTime {
                years: 40,
                months: 0,
                days: 0,
            },
            weight: dec("0.5"),
            survival_expectancy: dec("20"),
            minimum_age: dec("60"),
            ..default_constants()
        };

        let result = calculate_benefit_factor(&constants, 1).unwrap();

        assert_eq!(result.factor, dec("1.8"));
    }

    #[test]
    fn test_zero_survival_expectancy_is_rejected() {
        let constants = FactorConstants {
            survival_expectancy: Decimal::ZERO,
            ..default_constants()
        };

        match calculate_benefit_factor(&constants, 1) {
            Err(EngineError::Calculation { message }) => {
                assert!(message.contains("survival expectancy"))
            }
            other => panic!("Expected Calculation error, got {:?}", other),
        }
    }

    #[test]
    fn test_benefit_amount_of_3500_average() {
        let factor = calculate_benefit_factor(&default_constants(), 1)
            .unwrap()
            .factor;

        let result = calculate_benefit_amount(dec("3500"), factor, "", 2).unwrap();

        assert_eq!(result.amount.round_dp(2), dec("3262.72"));
        assert_eq!(result.audit_step.rule_id, "benefit_amount");
    }

    #[test]
    fn test_benefit_amount_overflow_is_calculation_error() {
        assert!(matches!(
            calculate_benefit_amount(Decimal::MAX, dec("2"), "", 1),
            Err(EngineError::Calculation { .. })
        ));
    }
}
