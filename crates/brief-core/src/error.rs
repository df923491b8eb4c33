//! Error types for letter assembly

use thiserror::Error;

use crate::diagnostics::CompileFailure;
use crate::field::FieldShape;

/// Result type for letter operations
pub type Result<T> = std::result::Result<T, LetterError>;

/// Errors that can occur while assembling or building a letter
#[derive(Error, Debug)]
pub enum LetterError {
    /// A setter or getter referenced a key the registry does not contain
    #[error("Unknown field: {0}")]
    UnknownField(String),

    /// Two fields with the same key were passed to a registry
    #[error("Duplicate field: {0}")]
    DuplicateField(String),

    /// The value's shape does not match the field's fixed shape
    #[error("Field '{key}' holds {expected} values, got {found}")]
    TypeMismatch {
        key: String,
        expected: FieldShape,
        found: FieldShape,
    },

    /// The letter session was closed
    #[error("Letter session is closed")]
    ClosedSession,

    /// The compiler rejected the document
    #[error(transparent)]
    CompileFailure(#[from] CompileFailure),

    /// The compiler could not be run at all
    #[error("Compiler error: {0}")]
    Compiler(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl LetterError {
    /// Diagnostics carried by a compile failure, empty for every other error
    pub fn diagnostics(&self) -> &[crate::Diagnostic] {
        match self {
            LetterError::CompileFailure(failure) => failure.diagnostics(),
            _ => &[],
        }
    }
}
