use thiserror::Error;

/// A template that cannot be rendered, reported before anything is executed.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ParseError {
    #[error(transparent)]
    Syntax(#[from] gtmpl::error::ParseError),

    #[error("line {line}: field {name:?} is not defined")]
    UnknownField { line: usize, name: String },
}

/// A failure while executing an already parsed template.
#[derive(Debug, Error)]
#[error(transparent)]
pub struct ExecError(#[from] gtmpl::error::ExecError);
