use std::env;

use derive_new::new;

/// Environment variable naming the comments table
pub static TABLE_NAME_VAR: &str = "TABLE_NAME";

/// Environment variable holding the inference service base URL
pub static SERVICE_URL_VAR: &str = "SENTIMENT_SERVICE_URL";

/// Environment variable for the directory tables are stored in
pub static TABLE_DIR_VAR: &str = "TABLE_DIR";

/// Where tables live when `TABLE_DIR` is unset
pub static DEFAULT_TABLE_DIR: &str = "data/tables";

/// Handler configuration, read once at cold start
#[derive(Clone, Debug, PartialEq, Eq, new)]
pub struct Config {
    /// Name of the comments table
    pub table_name: String,

    /// Base URL of the inference service
    pub service_url: String,

    /// Directory holding the table files
    pub table_dir: String,
}

impl Config {
    /// Read the configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Read the configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &'static str| {
            lookup(key)
                .filter(|value| !value.trim().is_empty())
                .ok_or(ConfigError::Missing(key))
        };

        Ok(Self {
            table_name: required(TABLE_NAME_VAR)?,
            service_url: required(SERVICE_URL_VAR)?,
            table_dir: lookup(TABLE_DIR_VAR).unwrap_or_else(|| DEFAULT_TABLE_DIR.to_string()),
        })
    }
}

/// Config Error
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// A required environment variable is unset or blank
    #[error("missing required environment variable {0}")]
    Missing(&'static str),
}
