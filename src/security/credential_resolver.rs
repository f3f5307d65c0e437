//! Credential resolution for the protected download endpoint
//!
//! The license key and the site domain are read from a [`CredentialSource`]
//! on every call. When a variable is missing, the secrets file in the working
//! directory is merged into the source once (never overwriting set values)
//! and the variable is read again.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use secrecy::ExposeSecret;
//! use wpmdb_pro_installer::core::InstallerConfig;
//! use wpmdb_pro_installer::security::{CredentialResolver, MemorySource};
//!
//! let source = MemorySource::new()
//!     .with_var("WPMDB_PRO_KEY", "ABC")
//!     .with_var("DOMAIN_CURRENT_SITE", "example.com");
//! let resolver = CredentialResolver::new(Arc::new(source), InstallerConfig::default(), "/nonexistent");
//!
//! let credential = resolver.resolve().unwrap();
//! assert_eq!(credential.key.expose_secret(), "ABC");
//! assert_eq!(credential.domain, "example.com");
//! ```

use crate::core::config::InstallerConfig;
use crate::core::error::InstallerError;
use crate::core::traits::CredentialSource;
use crate::security::credential_source::ProcessEnvSource;
use crate::security::dotenv::DotEnvFile;
use secrecy::SecretString;
use std::path::PathBuf;
use std::sync::{Arc, Once};
use tracing::{debug, warn};

/// Resolved download credentials; the key never appears in `Debug` output
#[derive(Debug)]
pub struct Credential {
    pub key: SecretString,
    pub domain: String,
}

/// Resolves the license key and site domain
pub struct CredentialResolver {
    source: Arc<dyn CredentialSource>,
    config: InstallerConfig,
    cwd: PathBuf,
    dotenv_loaded: Once,
}

impl CredentialResolver {
    /// Create a resolver over `source`, reading the secrets file relative to `cwd`
    pub fn new(
        source: Arc<dyn CredentialSource>,
        config: InstallerConfig,
        cwd: impl Into<PathBuf>,
    ) -> Self {
        Self {
            source,
            config,
            cwd: cwd.into(),
            dotenv_loaded: Once::new(),
        }
    }

    /// Resolver over the process environment and the current working directory
    pub fn from_process_env(config: InstallerConfig) -> std::io::Result<Self> {
        let cwd = std::env::current_dir()?;
        Ok(Self::new(Arc::new(ProcessEnvSource::new()), config, cwd))
    }

    /// License key from the configured variable
    pub fn resolve_key(&self) -> Result<SecretString, InstallerError> {
        let variable = &self.config.key_variable;
        self.lookup(variable)
            .map(|key| SecretString::new(key.into()))
            .ok_or_else(|| InstallerError::MissingKey {
                variable: variable.clone(),
            })
    }

    /// Site domain from the configured variable
    pub fn resolve_domain(&self) -> Result<String, InstallerError> {
        let variable = &self.config.domain_variable;
        self.lookup(variable)
            .ok_or_else(|| InstallerError::MissingDomain {
                variable: variable.clone(),
            })
    }

    /// Key and domain together, key first
    pub fn resolve(&self) -> Result<Credential, InstallerError> {
        let key = self.resolve_key()?;
        let domain = self.resolve_domain()?;
        Ok(Credential { key, domain })
    }

    fn lookup(&self, variable: &str) -> Option<String> {
        if let Some(value) = self.read_non_empty(variable) {
            return Some(value);
        }
        self.load_dotenv_once();
        self.read_non_empty(variable)
    }

    fn read_non_empty(&self, variable: &str) -> Option<String> {
        self.source.var(variable).filter(|value| !value.is_empty())
    }

    fn load_dotenv_once(&self) {
        self.dotenv_loaded.call_once(|| {
            let path = self.config.dotenv_path(&self.cwd);
            match DotEnvFile::read(&path) {
                Ok(Some(file)) => {
                    let stored = file.apply(self.source.as_ref());
                    debug!(path = %path.display(), stored, "merged secrets file");
                }
                Ok(None) => debug!(path = %path.display(), "no secrets file"),
                Err(e) => warn!(path = %path.display(), error = %e, "could not read secrets file"),
            }
        });
    }
}

/// Mask a secret for safe logging
///
/// Shows only the first 3 and last 3 characters. Secrets shorter than
/// 10 characters are fully masked as "****".
pub fn mask_secret(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    if chars.len() < 10 {
        return "****".to_string();
    }

    let prefix: String = chars[..3].iter().collect();
    let suffix: String = chars[chars.len() - 3..].iter().collect();
    format!("{}...{}", prefix, suffix)
}
