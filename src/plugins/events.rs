//! Host-side data the plugin reads and rewrites
//!
//! [`Package`] is what ends up in the lockfile. [`RemoteFilesystem`] is the
//! transport the host downloads with; it is never serialized.

use crate::core::traits::HostEvent;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ============================================================================
// Packages and operations
// ============================================================================

/// A package as recorded in the dependency graph and lockfile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Package {
    pub name: String,
    pub pretty_version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dist_url: Option<String>,
}

impl Package {
    pub fn new(name: impl Into<String>, pretty_version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            pretty_version: pretty_version.into(),
            dist_url: None,
        }
    }

    pub fn with_dist_url(mut self, url: impl Into<String>) -> Self {
        self.dist_url = Some(url.into());
        self
    }
}

/// Job type of a package operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobType {
    Install,
    Update,
}

impl JobType {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobType::Install => "install",
            JobType::Update => "update",
        }
    }
}

/// Install or update of a single package
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PackageOperation {
    Install { package: Package },
    Update { initial: Package, target: Package },
}

impl PackageOperation {
    pub fn job_type(&self) -> JobType {
        match self {
            PackageOperation::Install { .. } => JobType::Install,
            PackageOperation::Update { .. } => JobType::Update,
        }
    }

    /// The package that will be fetched: the target of an update
    pub fn package(&self) -> &Package {
        match self {
            PackageOperation::Install { package } => package,
            PackageOperation::Update { target, .. } => target,
        }
    }

    pub fn package_mut(&mut self) -> &mut Package {
        match self {
            PackageOperation::Install { package } => package,
            PackageOperation::Update { target, .. } => target,
        }
    }
}

/// Pre-install / pre-update event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageEvent {
    operation: PackageOperation,
}

impl PackageEvent {
    pub fn new(operation: PackageOperation) -> Self {
        Self { operation }
    }

    pub fn event(&self) -> HostEvent {
        match self.operation.job_type() {
            JobType::Install => HostEvent::PrePackageInstall,
            JobType::Update => HostEvent::PrePackageUpdate,
        }
    }

    pub fn operation(&self) -> &PackageOperation {
        &self.operation
    }

    pub fn operation_mut(&mut self) -> &mut PackageOperation {
        &mut self.operation
    }

    pub fn into_operation(self) -> PackageOperation {
        self.operation
    }
}

// ============================================================================
// Transport
// ============================================================================

/// Download transport handed out by the host
///
/// A URL override replaces whatever URL the host asks for. It may carry
/// credentials, so it is kept secret and never shown by `Debug`.
#[derive(Debug, Default)]
pub struct RemoteFilesystem {
    options: BTreeMap<String, serde_json::Value>,
    tls_disabled: bool,
    url_override: Option<SecretString>,
}

impl RemoteFilesystem {
    pub fn new(options: BTreeMap<String, serde_json::Value>, tls_disabled: bool) -> Self {
        Self {
            options,
            tls_disabled,
            url_override: None,
        }
    }

    pub fn options(&self) -> &BTreeMap<String, serde_json::Value> {
        &self.options
    }

    pub fn is_tls_disabled(&self) -> bool {
        self.tls_disabled
    }

    pub fn url_override(&self) -> Option<&str> {
        self.url_override.as_ref().map(|url| url.expose_secret())
    }

    /// A new transport with the same options and TLS setting, fetching `url`
    pub fn with_url(&self, url: String) -> Self {
        Self {
            options: self.options.clone(),
            tls_disabled: self.tls_disabled,
            url_override: Some(SecretString::new(url.into())),
        }
    }

    /// URL the transport will actually request for `requested`
    pub fn effective_url<'a>(&'a self, requested: &'a str) -> &'a str {
        self.url_override().unwrap_or(requested)
    }
}

/// Fired right before the host downloads a file
#[derive(Debug)]
pub struct PreFileDownloadEvent {
    processed_url: String,
    remote_filesystem: RemoteFilesystem,
}

impl PreFileDownloadEvent {
    pub fn new(processed_url: impl Into<String>, remote_filesystem: RemoteFilesystem) -> Self {
        Self {
            processed_url: processed_url.into(),
            remote_filesystem,
        }
    }

    pub fn processed_url(&self) -> &str {
        &self.processed_url
    }

    pub fn remote_filesystem(&self) -> &RemoteFilesystem {
        &self.remote_filesystem
    }

    pub fn set_remote_filesystem(&mut self, remote_filesystem: RemoteFilesystem) {
        self.remote_filesystem = remote_filesystem;
    }
}
