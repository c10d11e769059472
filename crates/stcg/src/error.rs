//! Error types for template compilation and execution.
//!
//! Every failure surfaces as a [`StcgError`] carrying a human-readable
//! message. The variant tells which phase failed: building the marker set,
//! slicing the template, or running the compiled program.

use thiserror::Error;

/// The phase a [`StcgError`] originated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Invalid options or marker set, detected before any scanning.
    Configuration,
    /// Illegal marker sequencing or an unterminated region.
    Syntax,
    /// Failure reported by the evaluator while running a program.
    Runtime,
}

/// Errors raised while compiling or running a template.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StcgError {
    /// Bad marker set or option value.
    #[error("{0}")]
    Configuration(String),

    /// Malformed template.
    #[error("{0}")]
    Syntax(String),

    /// Evaluation failure, wrapping the evaluator's message.
    #[error("{0}")]
    Runtime(String),
}

impl StcgError {
    /// Returns the phase this error belongs to.
    pub fn kind(&self) -> ErrorKind {
        match self {
            StcgError::Configuration(_) => ErrorKind::Configuration,
            StcgError::Syntax(_) => ErrorKind::Syntax,
            StcgError::Runtime(_) => ErrorKind::Runtime,
        }
    }

    /// Returns the bare message without the phase.
    pub fn message(&self) -> &str {
        match self {
            StcgError::Configuration(msg) | StcgError::Syntax(msg) | StcgError::Runtime(msg) => {
                msg
            }
        }
    }
}

/// Result type for generator operations.
pub type Result<T> = std::result::Result<T, StcgError>;
