pub mod config;
pub mod error;
pub mod logging;
pub mod query;
pub mod traits;

pub use config::*;
pub use error::*;
pub use logging::init_logging;
pub use query::{append_query_params, encode_component};
pub use traits::*;
