//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading benefit
//! configurations from YAML files.

use rust_decimal::Decimal;
use std::fs;
use std::path::Path;
use tracing::debug;

use crate::error::{EngineError, EngineResult};

use super::types::{
    BenefitConfig, FactorConstants, NormativeConfig, RegimeMetadata, SelectionPolicy,
};

/// Loads and provides access to benefit configuration.
///
/// The `ConfigLoader` reads YAML configuration files from a directory
/// and exposes the regime constants used by the calculator.
///
/// # Directory Structure
///
/// The configuration directory should have the following structure:
/// ```text
/// config/inss/
/// ├── regime.yaml     # Regime metadata
/// ├── factor.yaml     # Benefit factor constants
/// ├── selection.yaml  # Top-earnings selection policy
/// └── normative.yaml  # Threshold year and label texts
/// ```
///
/// # Example
///
/// ```no_run
/// use benefit_calculator::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/inss").unwrap();
/// println!("Threshold year: {}", loader.normative().threshold_year);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: BenefitConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - Any required file is missing (`ConfigNotFound`)
    /// - Any file contains invalid YAML or out-of-range constants (`ConfigParseError`)
    ///
    /// # Example
    ///
    /// ```no_run
    /// use benefit_calculator::config::ConfigLoader;
    ///
    /// let loader = ConfigLoader::load("./config/inss")?;
    /// # Ok::<(), benefit_calculator::error::EngineError>(())
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let metadata = Self::load_yaml::<RegimeMetadata>(&path.join("regime.yaml"))?;

        let factor_path = path.join("factor.yaml");
        let factor = Self::load_yaml::<FactorConstants>(&factor_path)?;
        Self::validate_factor(&factor, &factor_path)?;

        let selection_path = path.join("selection.yaml");
        let selection = Self::load_yaml::<SelectionPolicy>(&selection_path)?;
        Self::validate_selection(&selection, &selection_path)?;

        let normative = Self::load_yaml::<NormativeConfig>(&path.join("normative.yaml"))?;

        debug!(
            regime = %metadata.code,
            version = %metadata.version,
            "Loaded benefit configuration"
        );

        Ok(Self {
            config: BenefitConfig::new(metadata, factor, selection, normative),
        })
    }

    /// Wraps an already built configuration.
    pub fn from_config(config: BenefitConfig) -> Self {
        Self { config }
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    fn validate_factor(factor: &FactorConstants, path: &Path) -> EngineResult<()> {
        if factor.survival_expectancy <= Decimal::ZERO {
            return Err(EngineError::ConfigParseError {
                path: path.display().to_string(),
                message: "survival_expectancy must be greater than zero".to_string(),
            });
        }
        if factor.weight < Decimal::ZERO || factor.minimum_age < Decimal::ZERO {
            return Err(EngineError::ConfigParseError {
                path: path.display().to_string(),
                message: "weight and minimum_age cannot be negative".to_string(),
            });
        }
        Ok(())
    }

    fn validate_selection(selection: &SelectionPolicy, path: &Path) -> EngineResult<()> {
        if selection.top_fraction <= Decimal::ZERO || selection.top_fraction > Decimal::ONE {
            return Err(EngineError::ConfigParseError {
                path: path.display().to_string(),
                message: format!(
                    "top_fraction must be in (0, 1], got {}",
                    selection.top_fraction
                ),
            });
        }
        Ok(())
    }

    /// Returns the underlying benefit configuration.
    pub fn config(&self) -> &BenefitConfig {
        &self.config
    }

    /// Returns the regime metadata.
    pub fn regime(&self) -> &RegimeMetadata {
        self.config.regime()
    }

    /// Returns the benefit factor constants.
    pub fn factor(&self) -> &FactorConstants {
        self.config.factor()
    }

    /// Returns the top-earnings selection policy.
    pub fn selection(&self) -> &SelectionPolicy {
        self.config.selection()
    }

    /// Returns the normative classification settings.
    pub fn normative(&self) -> &NormativeConfig {
        self.config.normative()
    }
}
