use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by the checking pipeline
#[derive(Debug, Error)]
pub enum CheckError {
    /// Input of the wrong kind where text or a count was required
    #[error("invalid input: {0}")]
    InvalidInputType(String),

    /// Text longer than the configured character limit
    #[error("input too large: {len} characters exceeds the limit of {max}")]
    InputTooLarge { len: usize, max: usize },

    /// Unexpected internal fault, the original cause is kept as source
    #[error("similarity computation failed: {source}")]
    ComputationFailure {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync + 'static>,
    },

    /// File bytes could not be decoded as text
    #[error("unrecognized text encoding in {}", path.display())]
    EncodingUnrecognized { path: PathBuf },

    /// Configuration could not be parsed or is out of range
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl CheckError {
    /// Wrap any error as `ComputationFailure`
    pub fn computation<E>(err: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync + 'static>>,
    {
        CheckError::ComputationFailure { source: err.into() }
    }

    /// Contract violations are passed through the orchestrator unchanged
    #[inline]
    pub fn is_contract_violation(&self) -> bool {
        matches!(
            self,
            CheckError::InvalidInputType(_) | CheckError::InputTooLarge { .. }
        )
    }

    /// Keep contract violations and existing failures as they are,
    /// wrap everything else exactly once.
    pub(crate) fn into_boundary(self) -> Self {
        match self {
            err if err.is_contract_violation() => err,
            err @ CheckError::ComputationFailure { .. } => err,
            other => CheckError::computation(other),
        }
    }
}

pub type Result<T> = std::result::Result<T, CheckError>;
