//! Database connection settings
//!
//! Read once at startup and passed explicitly to the commands that talk to
//! the database.

use serde::{Deserialize, Serialize};

/// Environment variable holding the MongoDB connection string
pub const MONGO_URL_VAR: &str = "MONGO_URL";
/// Environment variable holding the database name
pub const DB_NAME_VAR: &str = "DB_NAME";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} is not set in the environment")]
    MissingVar(&'static str),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Connection string, e.g. `mongodb://localhost:27017`
    pub connection_url: String,
    /// Database holding the content collections
    pub database: String,
}

impl StoreConfig {
    pub fn new(connection_url: impl Into<String>, database: impl Into<String>) -> Self {
        Self {
            connection_url: connection_url.into(),
            database: database.into(),
        }
    }

    /// Load from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load using an arbitrary variable lookup (empty values count as missing)
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &'static str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .ok_or(ConfigError::MissingVar(key))
        };

        Ok(Self {
            connection_url: read(MONGO_URL_VAR)?,
            database: read(DB_NAME_VAR)?,
        })
    }
}
