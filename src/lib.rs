pub mod core;
pub mod plugins;
pub mod security;
pub mod validation;

pub use crate::core::*;
pub use plugins::WpmdbProPlugin;
pub use security::{Credential, CredentialResolver, MemorySource, ProcessEnvSource};
pub use validation::{ProductVariant, UrlMatcher, VersionValidator};
