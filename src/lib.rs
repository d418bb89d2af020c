pub mod config;
pub mod install;
pub mod script;
pub mod template;
mod error;

pub use config::{Config, ConfigError};
pub use error::Error;
pub use install::InstallDir;
pub use script::{PrometheusScript, ScriptError};
