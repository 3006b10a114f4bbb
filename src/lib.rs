pub mod config;
pub mod error;
pub mod inference;
pub mod prompt;
pub mod relay;
pub mod server;

pub use error::{Error, RelayError, Result};
