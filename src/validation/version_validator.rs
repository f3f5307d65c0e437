//! Version Validator - Accepts only exact, downloadable versions
//!
//! The download endpoint serves tagged builds only, so a version must be
//! `d.d.d`, `d.d.dd` or either of those followed by `.d`. Ranges, wildcards,
//! pre-release suffixes and other digit counts are rejected.
//!
//! # Example
//!
//! ```
//! use wpmdb_pro_installer::validation::version_validator::VersionValidator;
//!
//! let validator = VersionValidator::new();
//!
//! assert_eq!(validator.validate("deliciousbrains/wp-migrate-db-pro", "2.5.3").unwrap(), "2.5.3");
//! assert!(validator.validate("deliciousbrains/wp-migrate-db-pro", "^2.5").is_err());
//! ```

use crate::core::error::InstallerError;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // ASCII digits only; `\d` would also match other Unicode digits
    static ref EXACT_VERSION: Regex =
        Regex::new(r"^[0-9]\.[0-9]\.[0-9]{1,2}(?:\.[0-9])?$").expect("version pattern is valid");
}

/// Validator for exact download versions
pub struct VersionValidator;

impl Default for VersionValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl VersionValidator {
    /// Create a new VersionValidator
    ///
    /// # Examples
    ///
    /// ```
    /// use wpmdb_pro_installer::validation::VersionValidator;
    ///
    /// let validator = VersionValidator::new();
    /// assert!(validator.is_exact("1.2.3"));
    /// ```
    pub fn new() -> Self {
        Self
    }

    /// Whether `version` is an exact 3 or 4 component version
    pub fn is_exact(&self, version: &str) -> bool {
        EXACT_VERSION.is_match(version)
    }

    /// Return `version` unchanged if it is exact
    ///
    /// # Arguments
    ///
    /// * `package_name` - Package the version belongs to, used in the error
    /// * `version` - Pretty version string as recorded by the host
    pub fn validate<'a>(
        &self,
        package_name: &str,
        version: &'a str,
    ) -> Result<&'a str, InstallerError> {
        if self.is_exact(version) {
            Ok(version)
        } else {
            Err(InstallerError::InvalidVersion {
                package: package_name.to_string(),
                version: version.to_string(),
            })
        }
    }
}
