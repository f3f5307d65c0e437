//! Recognizes the WP Migrate DB Pro packages and their download URLs

use crate::core::config::DOWNLOAD_HOST;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Vendor part of every protected package name
pub const VENDOR: &str = "deliciousbrains";

/// Product identifier shared by all variants
pub const BASE_PRODUCT: &str = "wp-migrate-db-pro";

const VARIANT_GROUP: &str = "(-media-files|-cli|-multisite-tools)?";

lazy_static! {
    static ref PACKAGE_NAME: Regex = Regex::new(&format!(
        r"^{}/{}{}$",
        VENDOR, BASE_PRODUCT, VARIANT_GROUP
    ))
    .expect("package pattern is valid");
}

/// Product family member
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProductVariant {
    Base,
    MediaFiles,
    Cli,
    MultisiteTools,
}

impl ProductVariant {
    pub const ALL: [ProductVariant; 4] = [
        ProductVariant::Base,
        ProductVariant::MediaFiles,
        ProductVariant::Cli,
        ProductVariant::MultisiteTools,
    ];

    fn from_suffix(suffix: Option<&str>) -> Option<Self> {
        match suffix {
            None | Some("") => Some(ProductVariant::Base),
            Some("-media-files") => Some(ProductVariant::MediaFiles),
            Some("-cli") => Some(ProductVariant::Cli),
            Some("-multisite-tools") => Some(ProductVariant::MultisiteTools),
            Some(_) => None,
        }
    }

    pub fn suffix(&self) -> &'static str {
        match self {
            ProductVariant::Base => "",
            ProductVariant::MediaFiles => "-media-files",
            ProductVariant::Cli => "-cli",
            ProductVariant::MultisiteTools => "-multisite-tools",
        }
    }

    /// e.g. `wp-migrate-db-pro-cli`
    pub fn product_id(&self) -> String {
        format!("{}{}", BASE_PRODUCT, self.suffix())
    }

    /// e.g. `deliciousbrains/wp-migrate-db-pro-cli`
    pub fn package_name(&self) -> String {
        format!("{}/{}", VENDOR, self.product_id())
    }

    /// e.g. `https://deliciousbrains.com/dl/wp-migrate-db-pro-cli-latest.zip`
    pub fn download_url(&self, host: &str) -> String {
        format!("https://{}/dl/{}-latest.zip", host, self.product_id())
    }
}

/// Classifies URLs and package names as protected
#[derive(Debug, Clone)]
pub struct UrlMatcher {
    download_url: Regex,
}

impl Default for UrlMatcher {
    fn default() -> Self {
        Self::new(DOWNLOAD_HOST)
    }
}

impl UrlMatcher {
    /// Matcher for downloads served from `host`
    pub fn new(host: &str) -> Self {
        // A trailing query (such as the version tag) never changes the outcome
        let pattern = format!(
            r"^https://{}/dl/{}{}-latest\.zip(?:\?.*)?$",
            regex::escape(host),
            BASE_PRODUCT,
            VARIANT_GROUP
        );
        Self {
            download_url: Regex::new(&pattern).expect("download pattern is valid"),
        }
    }

    pub fn is_protected_url(&self, url: &str) -> bool {
        self.variant_of_url(url).is_some()
    }

    pub fn is_protected_package(&self, name: &str) -> bool {
        self.variant_of_package(name).is_some()
    }

    /// Variant served by `url`, if it is a protected download URL
    pub fn variant_of_url(&self, url: &str) -> Option<ProductVariant> {
        let caps = self.download_url.captures(url)?;
        ProductVariant::from_suffix(caps.get(1).map(|m| m.as_str()))
    }

    /// Variant named by `name`, if it is a protected package
    pub fn variant_of_package(&self, name: &str) -> Option<ProductVariant> {
        let caps = PACKAGE_NAME.captures(name)?;
        ProductVariant::from_suffix(caps.get(1).map(|m| m.as_str()))
    }
}
