//! Server settings read from the environment.

use serde::Deserialize;

use crate::error::{EngineError, EngineResult};

/// Prefix of the environment variables the server reads, as in
/// `BENEFIT_CONFIG_DIR`.
pub const ENV_PREFIX: &str = "BENEFIT";

fn default_config_dir() -> String {
    "./config/inss".to_string()
}

fn default_bind_addr() -> String {
    "127.0.0.1:3000".to_string()
}

/// Settings for the `benefit-server` binary.
///
/// Every field has a default, so an empty environment is valid.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServerSettings {
    /// Directory holding the regime YAML files.
    #[serde(default = "default_config_dir")]
    pub config_dir: String,
    /// Address the HTTP listener binds to.
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
}

impl ServerSettings {
    /// Loads the settings from `BENEFIT_*` variables, after reading a `.env`
    /// file when one exists.
    pub fn load() -> EngineResult<Self> {
        dotenv::dotenv().ok();
        Self::from_source(None)
    }

    /// Loads the settings from the given variables instead of the process
    /// environment. `None` reads the process environment.
    pub fn from_source(source: Option<config::Map<String, String>>) -> EngineResult<Self> {
        let settings: Self = config::Config::builder()
            .add_source(config::Environment::with_prefix(ENV_PREFIX).source(source))
            .build()
            .and_then(|settings| settings.try_deserialize())
            .map_err(|e| EngineError::ConfigParseError {
                path: format!("{}_* environment", ENV_PREFIX),
                message: e.to_string(),
            })?;

        Ok(settings)
    }
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            config_dir: default_config_dir(),
            bind_addr: default_bind_addr(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> config::Map<String, String> {
        let mut map = config::Map::new();
        for (key, value) in pairs {
            map.insert(key.to_string(), value.to_string());
        }
        map
    }

    #[test]
    fn test_empty_environment_uses_defaults() {
        let settings = ServerSettings::from_source(Some(vars(&[]))).unwrap();
        assert_eq!(settings, ServerSettings::default());
    }

    #[test]
    fn test_prefixed_variables_override_defaults() {
        let settings = ServerSettings::from_source(Some(vars(&[
            ("BENEFIT_CONFIG_DIR", "/etc/benefit"),
            ("BENEFIT_BIND_ADDR", "0.0.0.0:8080"),
        ])))
        .unwrap();

        assert_eq!(settings.config_dir, "/etc/benefit");
        assert_eq!(settings.bind_addr, "0.0.0.0:8080");
    }

    #[test]
    fn test_unprefixed_variables_are_ignored() {
        let settings =
            ServerSettings::from_source(Some(vars(&[("BIND_ADDR", "0.0.0.0:8080")]))).unwrap();
        assert_eq!(settings.bind_addr, "127.0.0.1:3000");
    }
}
