pub mod config;
pub mod errors;
pub mod types;
pub mod utils;

pub use config::ClientConfig;
pub use errors::{Error, Result};
pub use types::*;
