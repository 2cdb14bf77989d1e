mod log;

pub use log::*;

use crate::session::ApiRequest;
use serde::{Deserialize, Serialize};
use thiserror::Error as ThisError;

///
/// ConfigSchemaError
///

#[derive(Debug, ThisError)]
pub enum ConfigSchemaError {
    #[error("validation error: {0}")]
    ValidationError(String),
}

///
/// Validate
///

pub trait Validate {
    fn validate(&self) -> Result<(), ConfigSchemaError>;
}

///
/// Defaults
///

mod defaults {
    pub fn base_url() -> String {
        "http://127.0.0.1:3000".to_string()
    }
}

///
/// ClientConfig
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ClientConfig {
    // scheme + authority of the admin node, no trailing slash
    #[serde(default = "defaults::base_url")]
    pub base_url: String,

    #[serde(default)]
    pub log: LogConfig,
}

impl ClientConfig {
    /// Parse and validate a config without installing it globally.
    pub fn from_toml(config_str: &str) -> Result<Self, super::ConfigError> {
        let config: Self = toml::from_str(config_str)
            .map_err(|e| super::ConfigError::CannotParseToml(e.to_string()))?;

        config.validate()?;

        Ok(config)
    }

    /// Absolute URL of `request` on the configured admin node.
    #[must_use]
    pub fn request_url(&self, request: &ApiRequest) -> String {
        request.url(&self.base_url)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::base_url(),
            log: LogConfig::default(),
        }
    }
}

impl Validate for ClientConfig {
    fn validate(&self) -> Result<(), ConfigSchemaError> {
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(ConfigSchemaError::ValidationError(format!(
                "base_url '{}' must start with http:// or https://",
                self.base_url
            )));
        }

        if self.base_url.ends_with('/') {
            return Err(ConfigSchemaError::ValidationError(format!(
                "base_url '{}' must not end with '/'",
                self.base_url
            )));
        }

        self.log.validate()
    }
}

///
/// TESTS
///
