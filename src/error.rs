use crate::config::ConfigError;
use crate::script::ScriptError;
use thiserror::Error;

/// Top-level error type for the prometheus-script library.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("script generation error: {0}")]
    Script(#[from] ScriptError),
}
