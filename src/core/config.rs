//! Configuration for the installer plugin
//!
//! Defaults match the variables and host the download endpoint expects; a
//! TOML file may override any of them.

use crate::core::error::InstallerError;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable holding the license key
pub const KEY_ENV_VARIABLE: &str = "WPMDB_PRO_KEY";

/// Environment variable holding the site domain
pub const DOMAIN_ENV_VARIABLE: &str = "DOMAIN_CURRENT_SITE";

/// Default secrets file, relative to the working directory
pub const DOTENV_FILENAME: &str = ".env";

/// Host serving the protected downloads
pub const DOWNLOAD_HOST: &str = "deliciousbrains.com";

/// Root configuration object
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct InstallerConfig {
    /// Variable read for the license key
    pub key_variable: String,

    /// Variable read for the site domain
    pub domain_variable: String,

    /// Secrets file used as a fallback when a variable is unset
    pub dotenv_file: PathBuf,

    /// Host of the download endpoint
    pub download_host: String,
}

impl Default for InstallerConfig {
    fn default() -> Self {
        Self {
            key_variable: KEY_ENV_VARIABLE.to_string(),
            domain_variable: DOMAIN_ENV_VARIABLE.to_string(),
            dotenv_file: PathBuf::from(DOTENV_FILENAME),
            download_host: DOWNLOAD_HOST.to_string(),
        }
    }
}

impl InstallerConfig {
    /// Parse a configuration from TOML; absent fields keep their defaults
    pub fn from_toml_str(content: &str) -> Result<Self, InstallerError> {
        let config: Self = toml::from_str(content).map_err(|e| InstallerError::Config {
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a configuration file
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        let config = Self::from_toml_str(&content)
            .with_context(|| format!("failed to parse config file {}", path.display()))?;
        Ok(config)
    }

    /// Check that every field is usable
    pub fn validate(&self) -> Result<(), InstallerError> {
        if self.key_variable.trim().is_empty() {
            return Err(InstallerError::Config {
                message: "key_variable must not be empty".to_string(),
            });
        }
        if self.domain_variable.trim().is_empty() {
            return Err(InstallerError::Config {
                message: "domain_variable must not be empty".to_string(),
            });
        }
        if self.download_host.is_empty() || self.download_host.contains('/') {
            return Err(InstallerError::Config {
                message: format!("download_host is not a bare host: {:?}", self.download_host),
            });
        }
        Ok(())
    }

    /// Resolve the secrets file against the given working directory
    pub fn dotenv_path(&self, cwd: &Path) -> PathBuf {
        if self.dotenv_file.is_absolute() {
            self.dotenv_file.clone()
        } else {
            cwd.join(&self.dotenv_file)
        }
    }
}
