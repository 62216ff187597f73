//! Core error type.
//!
//! Sub-crates define their own error enums and either wrap `CoreError` as a
//! variant or convert into it; `iso-pipeline` wraps it so that validation
//! failures raised here keep their "known client error" classification.

use thiserror::Error;

/// Errors produced by `iso-core`.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Caller input or configuration is unusable.  Always a client error.
    #[error("invalid input: {0}")]
    Validation(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl CoreError {
    pub fn validation(msg: impl Into<String>) -> Self {
        CoreError::Validation(msg.into())
    }
}

/// Shorthand result type for `iso-core`.
pub type CoreResult<T> = Result<T, CoreError>;
