//! Configuration loading and management for the benefit calculator.
//!
//! This module provides functionality to load the regime constants from YAML
//! files: regime metadata, benefit factor constants, the top-earnings
//! selection policy and the normative classification settings. The server
//! binary's own settings come from `BENEFIT_*` environment variables.
//!
//! # Example
//!
//! ```no_run
//! use benefit_calculator::config::ConfigLoader;
//!
//! let loader = ConfigLoader::load("./config/inss").unwrap();
//! println!("Loaded regime: {}", loader.regime().name);
//! ```

mod loader;
mod server;
mod types;

pub use loader::ConfigLoader;
pub use server::{ENV_PREFIX, ServerSettings};
pub use types::{
    BenefitConfig, ContributionTime, FactorConstants, NormativeConfig, NormativeLabels,
    RegimeMetadata, RoundingPolicy, SelectionPolicy,
};
