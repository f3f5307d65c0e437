//! Error handling for download interception
//!
//! Every condition that aborts a single package operation or download is a
//! variant of [`InstallerError`]. Messages are surfaced to the host verbatim.

use thiserror::Error;

/// Main error type for the installer plugin
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InstallerError {
    // Credential errors
    #[error(
        "Could not find a key for WPMDB PRO. Please make it available via the environment variable {variable}"
    )]
    MissingKey { variable: String },

    #[error(
        "Could not find a domain for WPMDB PRO. Please make it available via the environment variable {variable}"
    )]
    MissingDomain { variable: String },

    // Validation errors
    #[error(
        "The version constraint of {package} should be exact (with 3 or 4 digits). Invalid version string \"{version}\""
    )]
    InvalidVersion { package: String, version: String },

    // Configuration errors
    #[error("Invalid installer configuration: {message}")]
    Config { message: String },
}

impl InstallerError {
    /// Name of the environment variable involved, if any
    pub fn variable(&self) -> Option<&str> {
        match self {
            Self::MissingKey { variable } | Self::MissingDomain { variable } => Some(variable),
            Self::InvalidVersion { .. } | Self::Config { .. } => None,
        }
    }

    /// Get suggested actions for this error
    pub fn suggested_actions(&self) -> Vec<&'static str> {
        match self {
            Self::MissingKey { .. } => vec![
                "Export the license key in the environment",
                "Or add it to the .env file next to composer.json",
            ],
            Self::MissingDomain { .. } => vec![
                "Export the site domain in the environment",
                "Or add it to the .env file next to composer.json",
            ],
            Self::InvalidVersion { .. } => vec![
                "Pin the package to an exact version such as 2.5.3 or 1.9.10.1",
                "Ranges, wildcards and pre-release suffixes cannot be downloaded",
            ],
            Self::Config { .. } => vec!["Check the installer configuration file"],
        }
    }

    /// Get error code for this error
    pub fn code(&self) -> &'static str {
        match self {
            Self::MissingKey { .. } => "MISSING_KEY",
            Self::MissingDomain { .. } => "MISSING_DOMAIN",
            Self::InvalidVersion { .. } => "INVALID_VERSION",
            Self::Config { .. } => "CONFIG_INVALID",
        }
    }
}
