pub mod schema;

use schema::{ConfigSchemaError, Validate};
use std::sync::{Arc, PoisonError, RwLock};
use thiserror::Error as ThisError;

pub use schema::{ClientConfig, LogConfig};

//
// CONFIG
//
// One client configuration per process. Sessions and endpoints running on
// any executor thread read the same snapshot, so it sits behind a global
// RwLock and is handed out as Arc clones.
//

static CONFIG: RwLock<Option<Arc<ClientConfig>>> = RwLock::new(None);

/// Errors related to configuration lifecycle and parsing.
#[derive(Debug, ThisError)]
pub enum ConfigError {
    #[error("config has already been initialized")]
    AlreadyInitialized,

    #[error("config has not been initialized")]
    NotInitialized,

    /// TOML could not be parsed into the expected structure.
    #[error("toml error: {0}")]
    CannotParseToml(String),

    /// Wrapper for data schema-level errors.
    #[error(transparent)]
    ConfigSchema(#[from] ConfigSchemaError),
}

///
/// Config
///

pub struct Config {}

impl Config {
    pub fn get() -> Result<Arc<ClientConfig>, ConfigError> {
        Self::try_get().ok_or(ConfigError::NotInitialized)
    }

    #[must_use]
    pub fn try_get() -> Option<Arc<ClientConfig>> {
        CONFIG
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .cloned()
    }

    /// Initialize the global configuration from a TOML string.
    pub fn init_from_toml(config_str: &str) -> Result<Arc<ClientConfig>, ConfigError> {
        let config = ClientConfig::from_toml(config_str)?;

        Self::install(config)
    }

    /// Initialize the global configuration from an already built model.
    pub fn init_from_model(config: ClientConfig) -> Result<Arc<ClientConfig>, ConfigError> {
        config.validate()?;

        Self::install(config)
    }

    /// Return the current config as a TOML string.
    pub fn to_toml() -> Result<String, ConfigError> {
        let cfg = Self::get()?;

        toml::to_string_pretty(&*cfg).map_err(|e| ConfigError::CannotParseToml(e.to_string()))
    }

    /// Clear the global config so it can be initialized again.
    pub fn reset() {
        *CONFIG.write().unwrap_or_else(PoisonError::into_inner) = None;
    }

    fn install(config: ClientConfig) -> Result<Arc<ClientConfig>, ConfigError> {
        let mut slot = CONFIG.write().unwrap_or_else(PoisonError::into_inner);
        if slot.is_some() {
            return Err(ConfigError::AlreadyInitialized);
        }

        let arc = Arc::new(config);
        *slot = Some(arc.clone());

        Ok(arc)
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use crate::log::Level;

    // The global slot is process-wide; keep every lifecycle assertion in one
    // test so parallel test threads never race on it.
    #[test]
    fn global_config_lifecycle() {
        Config::reset();
        assert!(matches!(Config::get(), Err(ConfigError::NotInitialized)));

        let cfg = Config::init_from_toml(
            r#"
            base_url = "https://admin.crowbar.example:3000"

            [log]
            level = "warn"
            "#,
        )
        .expect("config initializes");
        assert_eq!(cfg.base_url, "https://admin.crowbar.example:3000");
        assert_eq!(cfg.log.level, Level::Warn);

        let again = Config::init_from_toml("");
        assert!(matches!(again, Err(ConfigError::AlreadyInitialized)));

        let rendered = Config::to_toml().expect("config renders");
        assert!(rendered.contains("admin.crowbar.example"));

        Config::reset();
        assert!(Config::try_get().is_none());

        Config::init_from_model(ClientConfig::default()).expect("default model is valid");
        assert_eq!(
            Config::get().expect("installed").base_url,
            ClientConfig::default().base_url
        );
        Config::reset();
    }
}
