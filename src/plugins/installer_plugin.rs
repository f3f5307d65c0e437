//! WP Migrate DB Pro installer plugin
//!
//! Two handlers make the protected downloads installable without writing the
//! license key to the lockfile:
//!
//! - Pre install/update: the pinned version is added to the package's dist
//!   URL (`?t=<version>`). This URL is recorded in the lockfile, so two
//!   versions never share one cached download.
//! - Pre download: the transport is swapped for one that fetches the URL with
//!   `licence_key` and `site_url` appended. Only the transient transport ever
//!   sees the credentials.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use wpmdb_pro_installer::core::InstallerConfig;
//! use wpmdb_pro_installer::plugins::{Package, PackageEvent, PackageOperation, WpmdbProPlugin};
//! use wpmdb_pro_installer::security::MemorySource;
//!
//! let plugin = WpmdbProPlugin::new(InstallerConfig::default(), Arc::new(MemorySource::new()), "/nonexistent");
//! let package = Package::new("deliciousbrains/wp-migrate-db-pro", "2.5.3")
//!     .with_dist_url("https://deliciousbrains.com/dl/wp-migrate-db-pro-latest.zip");
//! let mut event = PackageEvent::new(PackageOperation::Install { package });
//!
//! plugin.add_version(&mut event).unwrap();
//! assert_eq!(
//!     event.operation().package().dist_url.as_deref(),
//!     Some("https://deliciousbrains.com/dl/wp-migrate-db-pro-latest.zip?t=2.5.3")
//! );
//! ```

use crate::core::config::InstallerConfig;
use crate::core::error::InstallerError;
use crate::core::query::append_query_params;
use crate::core::traits::{CredentialSource, EventSubscriber, Handler, HostEvent, HostEventPayload};
use crate::plugins::events::{PackageEvent, PreFileDownloadEvent};
use crate::security::credential_resolver::{CredentialResolver, mask_secret};
use crate::validation::{UrlMatcher, VersionValidator};
use secrecy::ExposeSecret;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Query parameter carrying the pinned version
pub const VERSION_TAG_PARAM: &str = "t";

/// Query parameter carrying the license key
pub const LICENCE_KEY_PARAM: &str = "licence_key";

/// Query parameter carrying the site domain
pub const SITE_URL_PARAM: &str = "site_url";

const SUBSCRIPTIONS: &[(HostEvent, Handler)] = &[
    (HostEvent::PrePackageInstall, Handler::AddVersion),
    (HostEvent::PrePackageUpdate, Handler::AddVersion),
    (HostEvent::PreFileDownload, Handler::AddKeyAndDomain),
];

/// Intercepts package and download events for the protected products
pub struct WpmdbProPlugin {
    matcher: UrlMatcher,
    validator: VersionValidator,
    resolver: CredentialResolver,
}

impl WpmdbProPlugin {
    /// Plugin reading credentials from `source`, with the secrets file under `cwd`
    pub fn new(
        config: InstallerConfig,
        source: Arc<dyn CredentialSource>,
        cwd: impl Into<PathBuf>,
    ) -> Self {
        let matcher = UrlMatcher::new(&config.download_host);
        Self {
            matcher,
            validator: VersionValidator::new(),
            resolver: CredentialResolver::new(source, config, cwd),
        }
    }

    /// Plugin over the process environment, as activated by the host
    pub fn activate(config: InstallerConfig) -> anyhow::Result<Self> {
        config.validate()?;
        let matcher = UrlMatcher::new(&config.download_host);
        let resolver = CredentialResolver::from_process_env(config)?;
        Ok(Self {
            matcher,
            validator: VersionValidator::new(),
            resolver,
        })
    }

    /// Tag the effective package's dist URL with its exact version
    pub fn add_version(&self, event: &mut PackageEvent) -> Result<(), InstallerError> {
        let package = event.operation_mut().package_mut();

        if !self.matcher.is_protected_package(&package.name) {
            debug!(package = %package.name, "not a protected package");
            return Ok(());
        }

        let version = self
            .validator
            .validate(&package.name, &package.pretty_version)?
            .to_string();

        let Some(dist_url) = package.dist_url.as_deref() else {
            debug!(package = %package.name, "protected package has no dist url");
            return Ok(());
        };

        let tagged = append_query_params(dist_url, [(VERSION_TAG_PARAM, version.as_str())]);
        info!(package = %package.name, %version, url = %tagged, "tagged dist url with version");
        package.dist_url = Some(tagged);
        Ok(())
    }

    /// Swap the transport for one fetching the URL with credentials appended
    pub fn add_key_and_domain(&self, event: &mut PreFileDownloadEvent) -> Result<(), InstallerError> {
        let processed_url = event.processed_url();

        if !self.matcher.is_protected_url(processed_url) {
            debug!(url = %processed_url, "not a protected download");
            return Ok(());
        }

        let credential = self.resolver.resolve()?;
        let augmented = append_query_params(
            processed_url,
            [
                (LICENCE_KEY_PARAM, credential.key.expose_secret()),
                (SITE_URL_PARAM, credential.domain.as_str()),
            ],
        );
        info!(
            url = %processed_url,
            key = %mask_secret(credential.key.expose_secret()),
            "injecting download credentials"
        );
        debug!(domain = %mask_secret(&credential.domain), "site domain resolved");

        let replacement = event.remote_filesystem().with_url(augmented);
        event.set_remote_filesystem(replacement);
        Ok(())
    }
}

impl EventSubscriber for WpmdbProPlugin {
    fn subscribed_events() -> &'static [(HostEvent, Handler)] {
        SUBSCRIPTIONS
    }

    fn dispatch(&self, payload: HostEventPayload<'_>) -> Result<(), InstallerError> {
        let host_event = payload.event();
        let Some((_, handler)) = SUBSCRIPTIONS.iter().find(|(e, _)| *e == host_event) else {
            return Ok(());
        };

        let result = match (handler, payload) {
            (Handler::AddVersion, HostEventPayload::Package(event)) => self.add_version(event),
            (Handler::AddKeyAndDomain, HostEventPayload::PreFileDownload(event)) => {
                self.add_key_and_domain(event)
            }
            _ => Ok(()),
        };

        result.inspect_err(|e| {
            warn!(
                event = host_event.as_str(),
                code = e.code(),
                actions = ?e.suggested_actions(),
                "{}", e
            )
        })
    }
}
