//! Layered configuration loading.

mod builder;
mod env;
mod error;
mod file;
mod source;

pub use builder::Config;
pub use error::ConfigError;
