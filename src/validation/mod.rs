pub mod url_matcher;
pub mod version_validator;

pub use url_matcher::{ProductVariant, UrlMatcher};
pub use version_validator::VersionValidator;
