//! Workspace base error type.
//!
//! Higher crates define their own error enums and wrap this one where they
//! touch configuration or the file system.

use thiserror::Error;

/// Errors raised by `circ-core` (configuration loading and validation).
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Shorthand result type for `circ-core`.
pub type CoreResult<T> = Result<T, CoreError>;
