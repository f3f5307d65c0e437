pub mod events;
pub mod installer_plugin;

pub use events::{JobType, Package, PackageEvent, PackageOperation, PreFileDownloadEvent, RemoteFilesystem};
pub use installer_plugin::{LICENCE_KEY_PARAM, SITE_URL_PARAM, VERSION_TAG_PARAM, WpmdbProPlugin};
