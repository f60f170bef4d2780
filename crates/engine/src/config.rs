//! Adapter configuration
//!
//! Read once at `init` from the harness property bag, or from a
//! `cpbench.toml` file. Every setting has a default; nothing is validated
//! beyond rejecting an empty URL.

use cpbench_core::{Error, Result};
use cpbench_wire::ConnectParams;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::path::Path;

/// Config file name
pub const CONFIG_FILE_NAME: &str = "cpbench.toml";

/// Property key for the store URL.
pub const PROP_URL: &str = "clusterpoint.url";
/// Property key for the user name.
pub const PROP_USER: &str = "clusterpoint.user";
/// Property key for the password.
pub const PROP_PASSWORD: &str = "clusterpoint.password";
/// Property key for the database name.
pub const PROP_DATABASE: &str = "clusterpoint.database";
/// Property key for the account id.
pub const PROP_ACCOUNT: &str = "clusterpoint.account";

fn default_url() -> String {
    "tcp://localhost:15006".to_string()
}

fn default_user() -> String {
    "user".to_string()
}

fn default_password() -> String {
    "password".to_string()
}

fn default_database() -> String {
    "ycsb".to_string()
}

fn default_account() -> String {
    "1".to_string()
}

/// Connection settings for one adapter instance.
///
/// # Example
///
/// ```toml
/// url = "tcp://localhost:15006"
/// user = "user"
/// password = "password"
/// database = "ycsb"
/// account = "1"
/// ```
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdapterConfig {
    /// Store URL
    #[serde(default = "default_url")]
    pub url: String,
    /// Authentication user
    #[serde(default = "default_user")]
    pub user: String,
    /// Authentication password
    #[serde(default = "default_password")]
    pub password: String,
    /// Database name
    #[serde(default = "default_database")]
    pub database: String,
    /// Account identifier
    #[serde(default = "default_account")]
    pub account: String,
}

impl Default for AdapterConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            user: default_user(),
            password: default_password(),
            database: default_database(),
            account: default_account(),
        }
    }
}

impl fmt::Debug for AdapterConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdapterConfig")
            .field("url", &self.url)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("database", &self.database)
            .field("account", &self.account)
            .finish()
    }
}

impl AdapterConfig {
    /// Build from the harness property bag. Absent keys take their default.
    ///
    /// # Errors
    ///
    /// Returns an error if `clusterpoint.url` is present but empty.
    pub fn from_properties(props: &HashMap<String, String>) -> Result<Self> {
        let get = |key: &str, default: fn() -> String| {
            props.get(key).cloned().unwrap_or_else(default)
        };
        let config = Self {
            url: get(PROP_URL, default_url),
            user: get(PROP_USER, default_user),
            password: get(PROP_PASSWORD, default_password),
            database: get(PROP_DATABASE, default_database),
            account: get(PROP_ACCOUNT, default_account),
        };
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.url.trim().is_empty() {
            return Err(Error::config("connection url must not be empty"));
        }
        Ok(())
    }

    /// Parameters handed to the connector.
    pub fn connect_params(&self) -> ConnectParams {
        ConnectParams {
            url: self.url.clone(),
            database: self.database.clone(),
            user: self.user.clone(),
            password: self.password.clone(),
            account: self.account.clone(),
        }
    }

    /// Returns the default config file content with comments.
    pub fn default_toml() -> &'static str {
        r#"# cpbench adapter configuration
#
# Store endpoint (default: tcp://localhost:15006)
url = "tcp://localhost:15006"

# Credentials
user = "user"
password = "password"

# Database and account identifiers
database = "ycsb"
account = "1"
"#
    }

    /// Read and parse config from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        let config: AdapterConfig = toml::from_str(&content).map_err(|e| {
            Error::config(format!(
                "Failed to parse config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Write the default config file if it does not already exist.
    pub fn write_default_if_missing(path: &Path) -> Result<()> {
        if !path.exists() {
            std::fs::write(path, Self::default_toml()).map_err(|e| {
                Error::config(format!(
                    "Failed to write default config file '{}': {}",
                    path.display(),
                    e
                ))
            })?;
        }
        Ok(())
    }
}
