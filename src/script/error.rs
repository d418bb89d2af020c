use std::path::PathBuf;
use thiserror::Error;

use crate::template::{ExecError, ParseError};

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ScriptError {
    #[error("failed to read template '{path}': {source}")]
    TemplateNotFound {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid template syntax: {0}")]
    TemplateSyntax(#[from] ParseError),

    #[error("failed to execute template: {0}")]
    TemplateExecution(#[from] ExecError),

    #[error("failed to write script '{path}': {source}")]
    FileWrite {
        path: PathBuf,
        source: std::io::Error,
    },
}
