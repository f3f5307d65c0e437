//! Credential sources backing [`CredentialResolver`](super::CredentialResolver)

use crate::core::traits::CredentialSource;
use std::collections::HashMap;
use std::env;
use std::sync::RwLock;

/// Process environment, with values from the secrets file layered underneath
///
/// Seeded values never shadow a real environment variable: a variable set in
/// the process always wins, and a seeded name is only stored once.
#[derive(Debug, Default)]
pub struct ProcessEnvSource {
    seeded: RwLock<HashMap<String, String>>,
}

impl ProcessEnvSource {
    /// Create a source with nothing seeded yet
    pub fn new() -> Self {
        Self::default()
    }
}

impl CredentialSource for ProcessEnvSource {
    fn var(&self, name: &str) -> Option<String> {
        if let Ok(value) = env::var(name) {
            return Some(value);
        }
        let seeded = self.seeded.read().unwrap_or_else(|e| e.into_inner());
        seeded.get(name).cloned()
    }

    fn set_if_absent(&self, name: &str, value: &str) -> bool {
        if env::var_os(name).is_some() {
            return false;
        }
        let mut seeded = self.seeded.write().unwrap_or_else(|e| e.into_inner());
        if seeded.contains_key(name) {
            return false;
        }
        seeded.insert(name.to_string(), value.to_string());
        true
    }
}

/// In-memory variable map
///
/// # Examples
///
/// ```
/// use wpmdb_pro_installer::core::CredentialSource;
/// use wpmdb_pro_installer::security::MemorySource;
///
/// let source = MemorySource::new().with_var("WPMDB_PRO_KEY", "ABC");
/// assert_eq!(source.var("WPMDB_PRO_KEY").as_deref(), Some("ABC"));
/// assert!(!source.set_if_absent("WPMDB_PRO_KEY", "other"));
/// ```
#[derive(Debug, Default)]
pub struct MemorySource {
    vars: RwLock<HashMap<String, String>>,
}

impl MemorySource {
    /// Create an empty source
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert, overwriting any previous value
    pub fn with_var(self, name: &str, value: &str) -> Self {
        self.vars
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .insert(name.to_string(), value.to_string());
        self
    }
}

impl CredentialSource for MemorySource {
    fn var(&self, name: &str) -> Option<String> {
        let vars = self.vars.read().unwrap_or_else(|e| e.into_inner());
        vars.get(name).cloned()
    }

    fn set_if_absent(&self, name: &str, value: &str) -> bool {
        let mut vars = self.vars.write().unwrap_or_else(|e| e.into_inner());
        if vars.contains_key(name) {
            return false;
        }
        vars.insert(name.to_string(), value.to_string());
        true
    }
}
