//! Configuration for sable tools: logging and dispatch behaviour, loaded from
//! `sable.toml`.

#![forbid(unsafe_code)]

use std::path::Path;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

mod logging;
mod schema;

pub use logging::{init_tracing, LoggingConfig};
pub use sable_dispatch::{DiamondPolicy, DispatchConfig};
pub use schema::json_schema;

/// File name looked up by tools that search for a config next to their input.
pub const CONFIG_FILE_NAME: &str = "sable.toml";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse toml config: {0}")]
    Toml(String),
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::Toml(err.message().to_owned())
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
#[schemars(deny_unknown_fields)]
pub struct SableConfig {
    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub dispatch: DispatchConfig,
}

impl SableConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Load a config file from TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let config = Self::from_toml_str(&text)?;
        tracing::debug!(
            target: "sable.config",
            path = %path.display(),
            diamond = ?config.dispatch.diamond,
            "loaded config"
        );
        Ok(config)
    }

    /// Load `sable.toml` from `dir` if it exists, otherwise the defaults.
    pub fn load_from_dir(dir: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = dir.as_ref().join(CONFIG_FILE_NAME);
        if path.is_file() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }
}
