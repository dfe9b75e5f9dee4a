//! Configuration types for benefit calculation.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Metadata about the benefit regime.
///
/// Contains identifying information about the jurisdiction and the version
/// of the rules the constants were taken from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegimeMetadata {
    /// Short code of the regime (e.g., "INSS-RGPS").
    pub code: String,
    /// The human-readable name of the regime.
    pub name: String,
    /// The version or effective year of the constants.
    pub version: String,
    /// URL to the official legislation.
    pub source_url: String,
}

/// Contribution time split into whole years, months and days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributionTime {
    /// Whole years of contribution.
    pub years: u32,
    /// Additional months (counted as twelfths of a year).
    #[serde(default)]
    pub months: u32,
    /// Additional days (counted as 1/365 of a year).
    #[serde(default)]
    pub days: u32,
}

impl ContributionTime {
    /// Returns the contribution time in fractional years.
    ///
    /// # Examples
    ///
    /// ```
    /// use benefit_calculator::config::ContributionTime;
    /// use rust_decimal::Decimal;
    ///
    /// let time = ContributionTime { years: 30, months: 6, days: 0 };
    /// assert_eq!(time.in_years(), Decimal::new(305, 1));
    /// ```
    pub fn in_years(&self) -> Decimal {
        Decimal::from(self.years)
            + Decimal::from(self.months) / Decimal::from(12)
            + Decimal::from(self.days) / Decimal::from(365)
    }
}

/// The constants of the benefit factor formula.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactorConstants {
    /// Reference to the legal clause defining the factor.
    pub clause: String,
    /// Time of contribution of the insured person.
    pub contribution_time: ContributionTime,
    /// Statutory contribution weight (aliquot).
    pub weight: Decimal,
    /// Expected survival at retirement, in years.
    pub survival_expectancy: Decimal,
    /// Minimum retirement age.
    pub minimum_age: Decimal,
}

/// How the fractional top-earnings count is turned into a record count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundingPolicy {
    /// Truncate toward zero.
    Floor,
    /// Round half away from zero.
    Round,
    /// Round up.
    Ceil,
}

/// Configuration for the top-earnings selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectionPolicy {
    /// Reference to the legal clause defining the averaging rule.
    pub clause: String,
    /// Share of records kept, by count (e.g., 0.8).
    pub top_fraction: Decimal,
    /// Rounding applied to `top_fraction * records`.
    pub rounding: RoundingPolicy,
    /// Minimum number of records needed before a benefit is calculated.
    #[serde(default = "default_minimum_records")]
    pub minimum_records: usize,
}

fn default_minimum_records() -> usize {
    2
}

/// Display texts of the normative labels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormativeLabels {
    /// Text for periods before the threshold year.
    pub pre_threshold: String,
    /// Text for periods in or after the threshold year.
    pub post_threshold: String,
    /// Text for periods without a readable year.
    pub unknown: String,
}

/// Configuration for the per-record normative classification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormativeConfig {
    /// Reference to the rule that introduced the threshold.
    pub clause: String,
    /// First year classified as post-threshold.
    pub threshold_year: i32,
    /// Name of the label column in exported files.
    pub column_name: String,
    /// Display texts for each label.
    pub labels: NormativeLabels,
}

/// The complete benefit configuration loaded from YAML files.
///
/// The [`Default`] implementation carries the constants of the simplified
/// INSS calculation so the library can be used without configuration files.
#[derive(Debug, Clone, PartialEq)]
pub struct BenefitConfig {
    /// Regime metadata.
    metadata: RegimeMetadata,
    /// Benefit factor constants.
    factor: FactorConstants,
    /// Top-earnings selection policy.
    selection: SelectionPolicy,
    /// Normative classification settings.
    normative: NormativeConfig,
}

impl BenefitConfig {
    /// Creates a new BenefitConfig from its component parts.
    pub fn new(
        metadata: RegimeMetadata,
        factor: FactorConstants,
        selection: SelectionPolicy,
        normative: NormativeConfig,
    ) -> Self {
        Self {
            metadata,
            factor,
            selection,
            normative,
        }
    }

    /// Returns the regime metadata.
    pub fn regime(&self) -> &RegimeMetadata {
        &self.metadata
    }

    /// Returns the benefit factor constants.
    pub fn factor(&self) -> &FactorConstants {
        &self.factor
    }

    /// Returns the top-earnings selection policy.
    pub fn selection(&self) -> &SelectionPolicy {
        &self.selection
    }

    /// Returns the normative classification settings.
    pub fn normative(&self) -> &NormativeConfig {
        &self.normative
    }

    /// Returns a copy with different factor constants.
    pub fn with_factor(mut self, factor: FactorConstants) -> Self {
        self.factor = factor;
        self
    }

    /// Returns a copy with a different selection policy.
    pub fn with_selection(mut self, selection: SelectionPolicy) -> Self {
        self.selection = selection;
        self
    }
}

impl Default for BenefitConfig {
    fn default() -> Self {
        Self {
            metadata: RegimeMetadata {
                code: "INSS-RGPS".to_string(),
                name: "Regime Geral de Previdência Social".to_string(),
                version: "2019".to_string(),
                source_url: "https://www.planalto.gov.br/ccivil_03/leis/l8213cons.htm".to_string(),
            },
            factor: FactorConstants {
                clause: "Lei 8.213/91, art. 29, §7º".to_string(),
                contribution_time: ContributionTime {
                    years: 38,
                    months: 1,
                    days: 25,
                },
                weight: Decimal::new(31, 2),
                survival_expectancy: Decimal::new(218, 1),
                minimum_age: Decimal::from(60),
            },
            selection: SelectionPolicy {
                clause: "Lei 8.213/91, art. 29, II".to_string(),
                top_fraction: Decimal::new(8, 1),
                rounding: RoundingPolicy::Floor,
                minimum_records: default_minimum_records(),
            },
            normative: NormativeConfig {
                clause: "EC 103/2019".to_string(),
                threshold_year: 2019,
                column_name: "Normativa".to_string(),
                labels: NormativeLabels {
                    pre_threshold: "Lei 8.213/91".to_string(),
                    post_threshold: "Pós-2019".to_string(),
                    unknown: "Indeterminada".to_string(),
                },
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_contribution_time_in_years() {
        let time = ContributionTime {
            years: 38,
            months: 1,
            days: 25,
        };
        let years = time.in_years();
        assert_eq!(years.round_dp(6), Decimal::from_str("38.151826").unwrap());
    }

    #[test]
    fn test_contribution_time_months_and_days_default_to_zero() {
        let time: ContributionTime = serde_yaml::from_str("years: 35").unwrap();
        assert_eq!(time.in_years(), Decimal::from(35));
    }

    #[test]
    fn test_rounding_policy_deserializes_snake_case() {
        let policy: RoundingPolicy = serde_yaml::from_str("ceil").unwrap();
        assert_eq!(policy, RoundingPolicy::Ceil);
    }

    #[test]
    fn test_default_config_matches_simplified_inss_constants() {
        let config = BenefitConfig::default();
        assert_eq!(config.factor().weight, Decimal::from_str("0.31").unwrap());
        assert_eq!(
            config.factor().survival_expectancy,
            Decimal::from_str("21.8").unwrap()
        );
        assert_eq!(config.factor().minimum_age, Decimal::from(60));
        assert_eq!(config.selection().top_fraction, Decimal::from_str("0.8").unwrap());
        assert_eq!(config.selection().rounding, RoundingPolicy::Floor);
        assert_eq!(config.normative().threshold_year, 2019);
        assert_eq!(config.normative().column_name, "Normativa");
    }

    #[test]
    fn test_with_selection_replaces_policy_only() {
        let config = BenefitConfig::default().with_selection(SelectionPolicy {
            clause: "test".to_string(),
            top_fraction: Decimal::ONE,
            rounding: RoundingPolicy::Ceil,
            minimum_records: 1,
        });
        assert_eq!(config.selection().rounding, RoundingPolicy::Ceil);
        assert_eq!(config.factor(), BenefitConfig::default().factor());
    }
}
