use super::{ConfigSchemaError, Validate};
use crate::log::Level;
use serde::{Deserialize, Serialize};

///
/// Defaults
///

mod defaults {
    use crate::log::Level;

    pub const fn level() -> Level {
        Level::Info
    }
}

///
/// LogConfig
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LogConfig {
    #[serde(default = "defaults::level")]
    pub level: Level,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: defaults::level(),
        }
    }
}

impl Validate for LogConfig {
    fn validate(&self) -> Result<(), ConfigSchemaError> {
        // endpoint failures log at Warn and must stay visible
        if self.level > Level::Warn {
            return Err(ConfigSchemaError::ValidationError(format!(
                "log.level '{}' hides endpoint failures; use warn or lower",
                self.level
            )));
        }

        Ok(())
    }
}

///
/// TESTS
///
