pub mod credential_resolver;
pub mod credential_source;
pub mod dotenv;

pub use credential_resolver::{Credential, CredentialResolver, mask_secret};
pub use credential_source::{MemorySource, ProcessEnvSource};
pub use dotenv::DotEnvFile;
