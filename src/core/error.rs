use thiserror::Error;

/// Errors surfaced by the cash flow engine.
///
/// Every rejected input maps to a single category; the engine either
/// returns the whole monthly series or fails before producing any of it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CalcError {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
}

impl CalcError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        CalcError::InvalidConfiguration(msg.into())
    }
}
