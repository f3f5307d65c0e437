use std::collections::BTreeMap;
use std::sync::Arc;

use wpmdb_pro_installer::core::{EventSubscriber, HostEventPayload, InstallerConfig, InstallerError};
use wpmdb_pro_installer::plugins::{
    Package, PackageEvent, PackageOperation, PreFileDownloadEvent, RemoteFilesystem, WpmdbProPlugin,
};
use wpmdb_pro_installer::security::MemorySource;

const HOST: &str = "https://deliciousbrains.com";

fn credentials() -> MemorySource {
    MemorySource::new()
        .with_var("WPMDB_PRO_KEY", "ABC")
        .with_var("DOMAIN_CURRENT_SITE", "example.com")
}

fn plugin_in(source: MemorySource, cwd: &std::path::Path) -> WpmdbProPlugin {
    WpmdbProPlugin::new(InstallerConfig::default(), Arc::new(source), cwd)
}

fn transport() -> RemoteFilesystem {
    let mut options = BTreeMap::new();
    options.insert(
        "ssl".to_string(),
        serde_json::json!({"verify_peer": false, "cafile": "/etc/ssl/ca.pem"}),
    );
    RemoteFilesystem::new(options, true)
}

#[test]
fn install_tags_dist_url_with_version() {
    let dir = tempfile::tempdir().unwrap();
    let plugin = plugin_in(MemorySource::new(), dir.path());
    let package = Package::new("deliciousbrains/wp-migrate-db-pro", "2.5.3")
        .with_dist_url(format!("{HOST}/dl/wp-migrate-db-pro-latest.zip"));
    let mut event = PackageEvent::new(PackageOperation::Install { package });

    plugin
        .dispatch(HostEventPayload::Package(&mut event))
        .unwrap();

    assert_eq!(
        event.operation().package().dist_url,
        Some(format!("{HOST}/dl/wp-migrate-db-pro-latest.zip?t=2.5.3"))
    );
}

#[test]
fn update_with_two_part_version_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let plugin = plugin_in(MemorySource::new(), dir.path());
    let url = format!("{HOST}/dl/wp-migrate-db-pro-media-files-latest.zip");
    let mut event = PackageEvent::new(PackageOperation::Update {
        initial: Package::new("deliciousbrains/wp-migrate-db-pro-media-files", "1.1.3")
            .with_dist_url(url.clone()),
        target: Package::new("deliciousbrains/wp-migrate-db-pro-media-files", "1.2")
            .with_dist_url(url.clone()),
    });

    let err = plugin
        .dispatch(HostEventPayload::Package(&mut event))
        .unwrap_err();

    assert_eq!(
        err,
        InstallerError::InvalidVersion {
            package: "deliciousbrains/wp-migrate-db-pro-media-files".to_string(),
            version: "1.2".to_string(),
        }
    );
    assert_eq!(event.operation().package().dist_url, Some(url));
}

#[test]
fn pre_download_swaps_transport_with_credentials() {
    let dir = tempfile::tempdir().unwrap();
    let plugin = plugin_in(credentials(), dir.path());
    let url = format!("{HOST}/dl/wp-migrate-db-pro-cli-latest.zip");
    let original = transport();
    let original_options = original.options().clone();
    let mut event = PreFileDownloadEvent::new(url.clone(), original);

    plugin
        .dispatch(HostEventPayload::PreFileDownload(&mut event))
        .unwrap();

    let replacement = event.remote_filesystem();
    assert_eq!(
        replacement.url_override(),
        Some(format!("{url}?licence_key=ABC&site_url=example.com").as_str())
    );
    assert_eq!(replacement.options(), &original_options);
    assert!(replacement.is_tls_disabled());
    // The processed URL itself is not rewritten
    assert_eq!(event.processed_url(), url);
}

#[test]
fn pre_download_ignores_other_products() {
    let dir = tempfile::tempdir().unwrap();
    let plugin = plugin_in(credentials(), dir.path());
    let mut event = PreFileDownloadEvent::new(
        format!("{HOST}/dl/advanced-custom-fields-pro-latest.zip"),
        transport(),
    );

    plugin
        .dispatch(HostEventPayload::PreFileDownload(&mut event))
        .unwrap();

    assert!(event.remote_filesystem().url_override().is_none());
    assert!(event.remote_filesystem().is_tls_disabled());
}

#[test]
fn pre_download_ignores_other_products_even_without_credentials() {
    let dir = tempfile::tempdir().unwrap();
    let plugin = plugin_in(MemorySource::new(), dir.path());
    let mut event =
        PreFileDownloadEvent::new("https://packagist.org/p2/vendor/pkg.json", transport());

    assert!(plugin
        .dispatch(HostEventPayload::PreFileDownload(&mut event))
        .is_ok());
}

#[test]
fn credentials_fall_back_to_dotenv_file() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join(".env"),
        "# secrets\nWPMDB_PRO_KEY=FILEKEY\nDOMAIN_CURRENT_SITE=\"file.example\"\n",
    )
    .unwrap();
    let plugin = plugin_in(MemorySource::new().with_var("WPMDB_PRO_KEY", "ENVKEY"), dir.path());
    let mut event = PreFileDownloadEvent::new(
        format!("{HOST}/dl/wp-migrate-db-pro-latest.zip"),
        RemoteFilesystem::default(),
    );

    plugin.add_key_and_domain(&mut event).unwrap();

    assert_eq!(
        event.remote_filesystem().url_override(),
        Some(
            "https://deliciousbrains.com/dl/wp-migrate-db-pro-latest.zip?licence_key=ENVKEY&site_url=file.example"
        )
    );
}

#[test]
fn missing_credentials_abort_only_that_download() {
    let dir = tempfile::tempdir().unwrap();
    let plugin = plugin_in(MemorySource::new(), dir.path());
    let mut event = PreFileDownloadEvent::new(
        format!("{HOST}/dl/wp-migrate-db-pro-latest.zip"),
        RemoteFilesystem::default(),
    );

    let err = plugin.add_key_and_domain(&mut event).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Could not find a key for WPMDB PRO. Please make it available via the environment variable WPMDB_PRO_KEY"
    );

    // A later, unrelated package event still succeeds
    let mut other = PackageEvent::new(PackageOperation::Install {
        package: Package::new("vendor/other", "1.0").with_dist_url("https://x.test/a.zip"),
    });
    assert!(plugin.add_version(&mut other).is_ok());
}

#[test]
fn lockfile_record_never_contains_credentials() {
    let dir = tempfile::tempdir().unwrap();
    let plugin = plugin_in(credentials(), dir.path());
    let package = Package::new("deliciousbrains/wp-migrate-db-pro-multisite-tools", "1.4.1")
        .with_dist_url(format!("{HOST}/dl/wp-migrate-db-pro-multisite-tools-latest.zip"));
    let mut package_event = PackageEvent::new(PackageOperation::Install { package });

    plugin.add_version(&mut package_event).unwrap();
    let dist_url = package_event
        .operation()
        .package()
        .dist_url
        .clone()
        .unwrap();

    // The host downloads the tagged URL; matching still applies
    let mut download = PreFileDownloadEvent::new(dist_url.clone(), transport());
    plugin.add_key_and_domain(&mut download).unwrap();
    assert_eq!(
        download.remote_filesystem().url_override(),
        Some(format!("{dist_url}?licence_key=ABC&site_url=example.com").as_str())
    );

    let lock_entry = serde_json::to_string(package_event.operation().package()).unwrap();
    assert!(lock_entry.contains("?t=1.4.1"));
    assert!(!lock_entry.contains("licence_key"));
    assert!(!lock_entry.contains("ABC"));
    assert!(!lock_entry.contains("example.com"));
}
